use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::app::{AppError, Session};
use crate::config::Config;
use crate::form::{Decision, InitiativeForm, Step};
use crate::i18n::{keys, Translator};
use crate::projection::{GrowthInterval, MAX_TIMELINE_YEARS};
use crate::report::{write_projection_text, ExportFormat, Formatting, Report};
use crate::risk::RiskEntry;
use crate::scoring::Criterion;

/// 한 폼에 입력할 수 있는 위험 항목 수 상한.
pub const MAX_RISKS: usize = 50;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Questionnaire,
    JumpToStep,
    Projection,
    Export,
    SaveForm,
    LoadForm,
    Settings,
    Exit,
}

/// 단계 이동 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Next,
    Back,
    Menu,
}

/// 입력/출력 스트림을 묶은 콘솔. 테스트에서는 메모리 버퍼를 넣는다.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn out(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn say(&mut self, text: &str) -> Result<(), AppError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝나면 `InputClosed`.
    pub fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(AppError::InputClosed);
        }
        Ok(buf.trim().to_string())
    }

    /// 현재 값을 보여주고 새 값을 읽는다. 빈 입력이면 현재 값을 유지한다.
    fn read_parsed<T>(&mut self, tr: &Translator, label: &str, current: T) -> Result<T, AppError>
    where
        T: FromStr + Display + Copy,
    {
        let prompt = format!("{label} [{current}]: ");
        loop {
            let s = self.read_line(&prompt)?;
            if s.is_empty() {
                return Ok(current);
            }
            match s.parse::<T>() {
                Ok(v) => return Ok(v),
                Err(_) => self.say(tr.t(keys::ERROR_INVALID_NUMBER))?,
            }
        }
    }

    fn read_f64(&mut self, tr: &Translator, label: &str, current: f64) -> Result<f64, AppError> {
        loop {
            let v = self.read_parsed(tr, label, current)?;
            if v.is_finite() {
                return Ok(v);
            }
            self.say(tr.t(keys::ERROR_INVALID_NUMBER))?;
        }
    }

    /// 항목 개수를 읽는다. `max`를 넘으면 다시 묻는다.
    fn read_count(
        &mut self,
        tr: &Translator,
        label: &str,
        current: usize,
        max: usize,
    ) -> Result<usize, AppError> {
        loop {
            let n = self.read_parsed(tr, label, current.min(max))?;
            if n <= max {
                return Ok(n);
            }
            self.say(tr.t(keys::ERROR_INVALID_NUMBER))?;
        }
    }

    fn read_text(&mut self, label: &str, current: &str) -> Result<String, AppError> {
        let prompt = if current.is_empty() {
            format!("{label}: ")
        } else {
            format!("{label} [{current}]: ")
        };
        let s = self.read_line(&prompt)?;
        Ok(if s.is_empty() { current.to_string() } else { s })
    }

    fn read_list(
        &mut self,
        tr: &Translator,
        label: &str,
        current: &[String],
    ) -> Result<Vec<String>, AppError> {
        let joined = current.join(", ");
        let label = format!("{label} {}", tr.t(keys::HINT_LIST));
        let s = self.read_text(&label, &joined)?;
        Ok(split_list(&s))
    }
}

/// 쉼표로 구분된 목록을 나눈다. 빈 항목은 버린다.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_QUESTIONNAIRE,
        keys::MAIN_MENU_JUMP,
        keys::MAIN_MENU_PROJECTION,
        keys::MAIN_MENU_EXPORT,
        keys::MAIN_MENU_SAVE,
        keys::MAIN_MENU_LOAD,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        con.say(tr.t(key))?;
    }
    loop {
        let sel = con.read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.as_str() {
            "1" => return Ok(MenuChoice::Questionnaire),
            "2" => return Ok(MenuChoice::JumpToStep),
            "3" => return Ok(MenuChoice::Projection),
            "4" => return Ok(MenuChoice::Export),
            "5" => return Ok(MenuChoice::SaveForm),
            "6" => return Ok(MenuChoice::LoadForm),
            "7" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => con.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 현재 단계부터 질문지를 진행한다. 메뉴로 돌아가거나 마지막 단계를 마치면 끝난다.
pub fn run_questionnaire<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    cfg: &Config,
    session: &mut Session,
) -> Result<(), AppError> {
    loop {
        let step = session.step;
        let title_key = format!("step.{}", step.key());
        con.say(&format!(
            "\n[{}/{}] {} ({} {}%)",
            step.index(),
            Step::ALL.len() - 1,
            tr.t(&title_key),
            tr.t(keys::NAV_PROGRESS),
            step.progress_percent()
        ))?;
        con.say(tr.t(keys::HINT_KEEP_CURRENT))?;
        handle_step(con, tr, cfg, session, step)?;

        if let Err(e) = session.form.validate_step(step) {
            con.say(&format!("{} {e}", tr.t(keys::ERROR_PREFIX)))?;
            continue;
        }

        match read_navigation(con, tr)? {
            Navigation::Menu => return Ok(()),
            Navigation::Back => session.step = step.previous(),
            Navigation::Next => {
                if step.is_last() {
                    con.say(tr.t(keys::NAV_COMPLETED))?;
                    return Ok(());
                }
                session.step = step.next();
            }
        }
    }
}

fn read_navigation<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
) -> Result<Navigation, AppError> {
    loop {
        let sel = con.read_line(tr.t(keys::NAV_PROMPT))?;
        match sel.to_lowercase().as_str() {
            "" | "n" => return Ok(Navigation::Next),
            "b" => return Ok(Navigation::Back),
            "m" => return Ok(Navigation::Menu),
            _ => con.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 단계 번호를 입력받아 이동한다.
pub fn handle_jump<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    session: &mut Session,
) -> Result<(), AppError> {
    for step in Step::ALL {
        let key = format!("step.{}", step.key());
        con.say(&format!("{:>2}) {}", step.index(), tr.t(&key)))?;
    }
    let sel = con.read_line(tr.t(keys::PROMPT_JUMP_STEP))?;
    match sel.parse::<usize>().ok().and_then(Step::from_index) {
        Some(step) => session.step = step,
        None => con.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
    }
    Ok(())
}

fn handle_step<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    cfg: &Config,
    session: &mut Session,
    step: Step,
) -> Result<(), AppError> {
    let form = &mut session.form;
    match step {
        Step::ProjectInfo => {
            let p = &mut form.project;
            p.name = con.read_text(tr.t(keys::FIELD_PROJECT_NAME), &p.name)?;
            p.description = con.read_text(tr.t(keys::FIELD_PROJECT_DESCRIPTION), &p.description)?;
            p.owner = con.read_text(tr.t(keys::FIELD_PROJECT_OWNER), &p.owner)?;
        }
        Step::StrategicFit => {
            let s = &mut form.strategy;
            s.goals = con.read_list(tr, tr.t(keys::FIELD_GOALS), &s.goals)?;
            s.kpis = con.read_list(tr, tr.t(keys::FIELD_KPIS), &s.kpis)?;
            s.alignment = con.read_text(tr.t(keys::FIELD_ALIGNMENT), &s.alignment)?;
        }
        Step::UseCase => {
            let u = &mut form.use_case;
            u.technology = con.read_text(tr.t(keys::FIELD_TECHNOLOGY), &u.technology)?;
            u.purpose = con.read_text(tr.t(keys::FIELD_PURPOSE), &u.purpose)?;
            u.application_area =
                con.read_text(tr.t(keys::FIELD_APPLICATION_AREA), &u.application_area)?;
            u.innovation_kind =
                con.read_text(tr.t(keys::FIELD_INNOVATION_KIND), &u.innovation_kind)?;
        }
        Step::Feasibility => {
            let f = &mut form.feasibility;
            f.data_availability =
                read_criterion(con, tr, Criterion::DataAvailability, f.data_availability)?;
            f.technical_skills =
                read_criterion(con, tr, Criterion::TechnicalSkills, f.technical_skills)?;
            f.tech_compatibility =
                read_criterion(con, tr, Criterion::TechCompatibility, f.tech_compatibility)?;
        }
        Step::Costs => {
            let c = &mut form.costs;
            c.development_cost =
                con.read_f64(tr, tr.t(keys::FIELD_DEVELOPMENT_COST), c.development_cost)?;
            c.operating_cost_per_year =
                con.read_f64(tr, tr.t(keys::FIELD_OPERATING_COST), c.operating_cost_per_year)?;
            c.risk_budget = con.read_f64(tr, tr.t(keys::FIELD_RISK_BUDGET), c.risk_budget)?;
        }
        Step::Revenue => {
            handle_revenue(con, tr, session)?;
            if let Ok(projection) = session.form.to_projection_input().evaluate() {
                write_projection_text(&projection, &Formatting::from(cfg), tr, con.out())?;
            }
        }
        Step::Risks => handle_risks(con, tr, session)?,
        Step::Sustainability => {
            let s = &mut form.sustainability;
            s.scalability = read_criterion(con, tr, Criterion::Scalability, s.scalability)?;
            s.sustainability =
                read_criterion(con, tr, Criterion::Sustainability, s.sustainability)?;
        }
        Step::SuccessMetrics => {
            let m = &mut form.success;
            m.metrics = con.read_list(tr, tr.t(keys::FIELD_METRICS), &m.metrics)?;
            m.targets = con.read_list(tr, tr.t(keys::FIELD_TARGETS), &m.targets)?;
        }
        Step::Summary => match Report::build(form) {
            Ok(report) => report.write(ExportFormat::Text, &Formatting::from(cfg), tr, con.out())?,
            Err(e) => con.say(&format!("{} {e}", tr.t(keys::ERROR_PREFIX)))?,
        },
        Step::Decision => {
            let d = &mut form.decision;
            con.say(tr.t(keys::DECISION_OPTIONS))?;
            let current = format!("decision.{}", d.decision.key());
            let sel = con.read_text(tr.t(keys::FIELD_DECISION), tr.t(&current))?;
            d.decision = match sel.as_str() {
                "1" => Decision::Go,
                "2" => Decision::NoGo,
                "3" => Decision::Defer,
                "4" => Decision::Undecided,
                _ => d.decision,
            };
            d.reasoning = con.read_text(tr.t(keys::FIELD_REASONING), &d.reasoning)?;
        }
        Step::Implementation => {
            let i = &mut form.implementation;
            i.plan = con.read_text(tr.t(keys::FIELD_PLAN), &i.plan)?;
            i.roles = con.read_list(tr, tr.t(keys::FIELD_ROLES), &i.roles)?;
            i.resources = con.read_text(tr.t(keys::FIELD_RESOURCES), &i.resources)?;
        }
        Step::Monitoring => {
            let m = &mut form.monitoring;
            m.performance = con.read_text(tr.t(keys::FIELD_MONITORING), &m.performance)?;
            m.reviews = con.read_text(tr.t(keys::FIELD_REVIEWS), &m.reviews)?;
        }
        Step::UtilityAnalysis => {
            for criterion in Criterion::ALL {
                let key = format!("criterion.{}", criterion.key());
                let label = format!("{} - {}", tr.t(keys::FIELD_WEIGHT), tr.t(&key));
                let current = form.weights.get(criterion);
                let value = con.read_f64(tr, &label, current)?;
                form.weights.set(criterion, value);
            }
        }
    }
    Ok(())
}

fn read_criterion<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    criterion: Criterion,
    current: u8,
) -> Result<u8, AppError> {
    let key = format!("criterion.{}", criterion.key());
    con.read_parsed(tr, tr.t(&key), current)
}

fn handle_revenue<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    session: &mut Session,
) -> Result<(), AppError> {
    let plan = &mut session.form.revenue;
    plan.timeline_years = con.read_parsed(tr, tr.t(keys::FIELD_TIMELINE), plan.timeline_years)?;
    plan.ramp_up_years = con.read_f64(tr, tr.t(keys::FIELD_RAMP_UP), plan.ramp_up_years)?;

    let max_intervals = plan.timeline_years.min(MAX_TIMELINE_YEARS) as usize;
    let count = con.read_count(
        tr,
        tr.t(keys::FIELD_INTERVAL_COUNT),
        plan.growth_intervals.len(),
        max_intervals,
    )?;
    let mut intervals = Vec::new();
    for i in 0..count {
        let default = plan.growth_intervals.get(i).copied().unwrap_or_else(|| {
            let start = intervals
                .last()
                .map(|prev: &GrowthInterval| prev.end + 1.0)
                .unwrap_or(plan.ramp_up_years + 1.0);
            GrowthInterval::new(start, f64::from(plan.timeline_years), 0.0)
        });
        con.say(&format!("{} {}", tr.t(keys::LABEL_PERIOD), i + 1))?;
        let start = con.read_f64(tr, tr.t(keys::FIELD_INTERVAL_START), default.start)?;
        let end = con.read_f64(tr, tr.t(keys::FIELD_INTERVAL_END), default.end)?;
        let rate = con.read_f64(tr, tr.t(keys::FIELD_INTERVAL_RATE), default.rate_percent)?;
        intervals.push(GrowthInterval::new(start, end, rate));
    }
    plan.growth_intervals = intervals;

    plan.annual_savings = con.read_f64(tr, tr.t(keys::FIELD_ANNUAL_SAVINGS), plan.annual_savings)?;
    plan.base_revenue = con.read_f64(tr, tr.t(keys::FIELD_BASE_REVENUE), plan.base_revenue)?;
    Ok(())
}

fn handle_risks<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    session: &mut Session,
) -> Result<(), AppError> {
    let register = &mut session.form.risks;
    let current = register.entries.len().max(1);
    let count = con.read_count(tr, tr.t(keys::FIELD_RISK_COUNT), current, MAX_RISKS)?;
    let mut entries = Vec::new();
    for i in 0..count {
        let current = register.entries.get(i).cloned().unwrap_or_default();
        con.say(&format!("{} {}", tr.t(keys::LABEL_RISK), i + 1))?;
        let description = con.read_text(tr.t(keys::FIELD_RISK_DESCRIPTION), &current.description)?;
        let probability =
            con.read_parsed(tr, tr.t(keys::FIELD_RISK_PROBABILITY), current.probability_percent)?;
        let impact = con.read_parsed(tr, tr.t(keys::FIELD_RISK_IMPACT), current.impact)?;
        entries.push(RiskEntry::new(description, probability, impact));
    }
    register.entries = entries;

    for entry in &register.entries {
        let level = format!("risk_level.{}", entry.level().as_str());
        con.say(&format!(
            "  {} ({}%, {}) -> {:.2} [{}]",
            entry.description,
            entry.probability_percent,
            entry.impact,
            entry.exposure(),
            tr.t(&level)
        ))?;
    }
    Ok(())
}

/// 현재 폼의 재무 투영을 보여준다.
pub fn handle_projection<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    cfg: &Config,
    session: &Session,
) -> Result<(), AppError> {
    let projection = session.form.to_projection_input().evaluate()?;
    write_projection_text(&projection, &Formatting::from(cfg), tr, con.out())?;
    Ok(())
}

/// 보고서를 화면이나 파일로 내보낸다.
pub fn handle_export<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    cfg: &Config,
    session: &Session,
) -> Result<(), AppError> {
    let report = Report::build(&session.form)?;
    con.say(tr.t(keys::EXPORT_FORMAT_OPTIONS))?;
    let sel = con.read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
    let format = match sel.as_str() {
        "1" => ExportFormat::Text,
        "2" => ExportFormat::Csv,
        "3" => ExportFormat::Json,
        _ => cfg.export_format,
    };
    let fmt = Formatting::from(cfg);
    let path = con.read_line(tr.t(keys::EXPORT_PROMPT_PATH))?;
    if path.is_empty() {
        report.write(format, &fmt, tr, con.out())?;
    } else {
        let path = PathBuf::from(path);
        report.write_to(&path, format, &fmt, tr)?;
        con.say(&format!("{} {}", tr.t(keys::EXPORT_WRITTEN), path.display()))?;
    }
    Ok(())
}

pub fn handle_save<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    session: &mut Session,
) -> Result<(), AppError> {
    let current = session.form_path.display().to_string();
    let path = con.read_text(tr.t(keys::PROMPT_FORM_PATH), &current)?;
    session.form_path = PathBuf::from(path);
    session.form.save(&session.form_path)?;
    con.say(&format!(
        "{} {}",
        tr.t(keys::FORM_SAVED),
        session.form_path.display()
    ))
}

pub fn handle_load<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    session: &mut Session,
) -> Result<(), AppError> {
    let current = session.form_path.display().to_string();
    let path = PathBuf::from(con.read_text(tr.t(keys::PROMPT_FORM_PATH), &current)?);
    session.form = InitiativeForm::load(&path)?;
    session.form_path = path;
    session.step = Step::ProjectInfo;
    con.say(&format!(
        "{} {}",
        tr.t(keys::FORM_LOADED),
        session.form_path.display()
    ))
}

/// 설정 메뉴를 처리한다. 언어가 바뀌면 true를 반환한다.
pub fn handle_settings<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    tr: &Translator,
    cfg: &mut Config,
) -> Result<bool, AppError> {
    con.say(tr.t(keys::SETTINGS_HEADING))?;
    let language = con.read_text(tr.t(keys::SETTINGS_LANGUAGE), &cfg.language)?;
    cfg.currency_symbol = con.read_text(tr.t(keys::SETTINGS_CURRENCY), &cfg.currency_symbol)?;
    cfg.decimals = con.read_parsed(tr, tr.t(keys::SETTINGS_DECIMALS), cfg.decimals)?;
    let format = con.read_text(tr.t(keys::SETTINGS_FORMAT), cfg.export_format.as_str())?;
    match ExportFormat::parse(&format) {
        Some(f) => cfg.export_format = f,
        None => con.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
    }
    let changed = language != cfg.language;
    cfg.language = language;
    Ok(changed)
}
