use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const HINT_KEEP_CURRENT: &str = "general.hint_keep_current";
    pub const HINT_LIST: &str = "general.hint_list";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_QUESTIONNAIRE: &str = "main_menu.questionnaire";
    pub const MAIN_MENU_JUMP: &str = "main_menu.jump";
    pub const MAIN_MENU_PROJECTION: &str = "main_menu.projection";
    pub const MAIN_MENU_EXPORT: &str = "main_menu.export";
    pub const MAIN_MENU_SAVE: &str = "main_menu.save";
    pub const MAIN_MENU_LOAD: &str = "main_menu.load";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";

    pub const NAV_PROMPT: &str = "nav.prompt";
    pub const NAV_COMPLETED: &str = "nav.completed";
    pub const NAV_PROGRESS: &str = "nav.progress";
    pub const PROMPT_JUMP_STEP: &str = "prompt.jump_step";

    pub const FIELD_PROJECT_NAME: &str = "field.project_name";
    pub const FIELD_PROJECT_DESCRIPTION: &str = "field.project_description";
    pub const FIELD_PROJECT_OWNER: &str = "field.project_owner";
    pub const FIELD_ALIGNMENT: &str = "field.alignment";
    pub const FIELD_GOALS: &str = "field.goals";
    pub const FIELD_KPIS: &str = "field.kpis";
    pub const FIELD_TECHNOLOGY: &str = "field.technology";
    pub const FIELD_PURPOSE: &str = "field.purpose";
    pub const FIELD_APPLICATION_AREA: &str = "field.application_area";
    pub const FIELD_INNOVATION_KIND: &str = "field.innovation_kind";
    pub const FIELD_DEVELOPMENT_COST: &str = "field.development_cost";
    pub const FIELD_OPERATING_COST: &str = "field.operating_cost";
    pub const FIELD_RISK_BUDGET: &str = "field.risk_budget";
    pub const FIELD_TIMELINE: &str = "field.timeline";
    pub const FIELD_RAMP_UP: &str = "field.ramp_up";
    pub const FIELD_INTERVAL_COUNT: &str = "field.interval_count";
    pub const FIELD_INTERVAL_START: &str = "field.interval_start";
    pub const FIELD_INTERVAL_END: &str = "field.interval_end";
    pub const FIELD_INTERVAL_RATE: &str = "field.interval_rate";
    pub const FIELD_ANNUAL_SAVINGS: &str = "field.annual_savings";
    pub const FIELD_BASE_REVENUE: &str = "field.base_revenue";
    pub const FIELD_RISK_COUNT: &str = "field.risk_count";
    pub const FIELD_RISK_DESCRIPTION: &str = "field.risk_description";
    pub const FIELD_RISK_PROBABILITY: &str = "field.risk_probability";
    pub const FIELD_RISK_IMPACT: &str = "field.risk_impact";
    pub const FIELD_METRICS: &str = "field.metrics";
    pub const FIELD_TARGETS: &str = "field.targets";
    pub const FIELD_DECISION: &str = "field.decision";
    pub const FIELD_REASONING: &str = "field.reasoning";
    pub const FIELD_PLAN: &str = "field.plan";
    pub const FIELD_ROLES: &str = "field.roles";
    pub const FIELD_RESOURCES: &str = "field.resources";
    pub const FIELD_MONITORING: &str = "field.monitoring";
    pub const FIELD_REVIEWS: &str = "field.reviews";
    pub const FIELD_WEIGHT: &str = "field.weight";
    pub const LABEL_PERIOD: &str = "label.period";
    pub const LABEL_RISK: &str = "label.risk";
    pub const DECISION_OPTIONS: &str = "decision.options";

    pub const REPORT_TITLE: &str = "report.title";
    pub const REPORT_OWNER: &str = "report.owner";
    pub const REPORT_DECISION: &str = "report.decision";
    pub const REPORT_PROJECTION_HEADING: &str = "report.projection_heading";
    pub const REPORT_TOTAL_REVENUE: &str = "report.total_revenue";
    pub const REPORT_TOTAL_COST: &str = "report.total_cost";
    pub const REPORT_TOTAL_PROFIT: &str = "report.total_profit";
    pub const REPORT_ROI: &str = "report.roi";
    pub const REPORT_ROI_UNDEFINED: &str = "report.roi_undefined";
    pub const REPORT_BREAKEVEN: &str = "report.breakeven";
    pub const REPORT_NO_BREAKEVEN: &str = "report.no_breakeven";
    pub const REPORT_YEARS_UNIT: &str = "report.years_unit";
    pub const COL_YEAR: &str = "column.year";
    pub const COL_REVENUE: &str = "column.revenue";
    pub const COL_SAVINGS: &str = "column.savings";
    pub const COL_COST: &str = "column.cost";
    pub const COL_PROFIT: &str = "column.profit";
    pub const COL_CUM_REVENUE: &str = "column.cumulative_revenue";
    pub const COL_CUM_COST: &str = "column.cumulative_cost";
    pub const COL_CUM_PROFIT: &str = "column.cumulative_profit";
    pub const REPORT_RISK_HEADING: &str = "report.risk_heading";
    pub const REPORT_RISK_COUNTS: &str = "report.risk_counts";
    pub const REPORT_RISK_MEAN: &str = "report.risk_mean";
    pub const REPORT_RISK_HIGHEST: &str = "report.risk_highest";
    pub const REPORT_UTILITY_HEADING: &str = "report.utility_heading";
    pub const REPORT_UTILITY_TOTAL: &str = "report.utility_total";
    pub const REPORT_UTILITY_UNAVAILABLE: &str = "report.utility_unavailable";

    pub const EXPORT_FORMAT_OPTIONS: &str = "export.format_options";
    pub const EXPORT_PROMPT_PATH: &str = "export.prompt_path";
    pub const EXPORT_WRITTEN: &str = "export.written";
    pub const PROMPT_FORM_PATH: &str = "prompt.form_path";
    pub const FORM_SAVED: &str = "form.saved";
    pub const FORM_LOADED: &str = "form.loaded";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_CURRENCY: &str = "settings.currency";
    pub const SETTINGS_DECIMALS: &str = "settings.decimals";
    pub const SETTINGS_FORMAT: &str = "settings.format";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. ko 이외의 코드는 영어 내장 문자열을 쓴다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 locales/ 를 시도하고, 그래도 없으면 내장 문자열만 쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 선택 언어 → 한국어 → 키 자체 순으로 찾는다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let built_in = match self.lang {
            Language::En => en(key).or_else(|| ko(key)),
            Language::Ko => ko(key),
        };
        built_in.unwrap_or(key)
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        // 언어팩 파일 이름으로 쓰이므로 알파벳 코드만 받는다.
        other if is_pack_code(other) => Some(other.into()),
        _ => None,
    }
}

fn is_pack_code(code: &str) -> bool {
    code.len() >= 2 && code.chars().all(|c| c.is_ascii_alphabetic() || c == '-')
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| normalize_locale_string(&value))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 아래 key = "value".
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    lang.split_once(['-', '_'])
        .and_then(|(base, _)| try_load(base))
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let table: toml::Table = toml::from_str(src).ok()?;
    let map: HashMap<String, String> = table
        .iter()
        .flat_map(|(section, value)| flatten_strings(section.clone(), value))
        .collect();
    (!map.is_empty()).then_some(map)
}

/// `[section]` 아래 값을 `section.key` 형태로 펼친다. 문자열이 아닌 값은 버린다.
fn flatten_strings(key: String, value: &toml::Value) -> Vec<(String, String)> {
    match value {
        toml::Value::String(text) => vec![(key, text.clone())],
        toml::Value::Table(table) => table
            .iter()
            .flat_map(|(child, v)| flatten_strings(format!("{key}.{child}"), v))
            .collect(),
        _ => Vec::new(),
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류:",
        APP_EXIT => "프로그램을 종료합니다.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        HINT_KEEP_CURRENT => "(엔터 = 현재 값 유지)",
        HINT_LIST => "(쉼표로 구분)",
        MAIN_MENU_TITLE => "\n=== 이니셔티브 평가 도구 ===",
        MAIN_MENU_QUESTIONNAIRE => "1) 질문지 진행",
        MAIN_MENU_JUMP => "2) 단계로 이동",
        MAIN_MENU_PROJECTION => "3) 매출/비용/ROI 투영 보기",
        MAIN_MENU_EXPORT => "4) 보고서 내보내기",
        MAIN_MENU_SAVE => "5) 폼 저장",
        MAIN_MENU_LOAD => "6) 폼 불러오기",
        MAIN_MENU_SETTINGS => "7) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        NAV_PROMPT => "엔터=다음, b=이전, m=메뉴: ",
        NAV_COMPLETED => "모든 단계를 마쳤습니다.",
        NAV_PROGRESS => "진행률",
        PROMPT_JUMP_STEP => "단계 번호(0-13): ",
        FIELD_PROJECT_NAME => "프로젝트 이름",
        FIELD_PROJECT_DESCRIPTION => "프로젝트 설명",
        FIELD_PROJECT_OWNER => "프로젝트 책임자",
        FIELD_ALIGNMENT => "사업 목표와의 정렬",
        FIELD_GOALS => "전략 목표",
        FIELD_KPIS => "핵심 성과 지표(KPI)",
        FIELD_TECHNOLOGY => "기술 유형",
        FIELD_PURPOSE => "도입 목적",
        FIELD_APPLICATION_AREA => "적용 분야",
        FIELD_INNOVATION_KIND => "혁신 유형",
        FIELD_DEVELOPMENT_COST => "개발비",
        FIELD_OPERATING_COST => "연간 운영비",
        FIELD_RISK_BUDGET => "위험 예비비",
        FIELD_TIMELINE => "평가 기간 [년]",
        FIELD_RAMP_UP => "준비 기간 [년]",
        FIELD_INTERVAL_COUNT => "성장률 구간 수",
        FIELD_INTERVAL_START => "시작 연도",
        FIELD_INTERVAL_END => "종료 연도",
        FIELD_INTERVAL_RATE => "성장률 [%]",
        FIELD_ANNUAL_SAVINGS => "연간 비용 절감액",
        FIELD_BASE_REVENUE => "준비 기간 후 첫해 매출",
        FIELD_RISK_COUNT => "위험 항목 수",
        FIELD_RISK_DESCRIPTION => "설명",
        FIELD_RISK_PROBABILITY => "발생 확률 [%] (0-100)",
        FIELD_RISK_IMPACT => "영향도 (1-10)",
        FIELD_METRICS => "성과 측정 지표",
        FIELD_TARGETS => "목표값",
        FIELD_DECISION => "결정",
        FIELD_REASONING => "근거",
        FIELD_PLAN => "프로젝트 계획",
        FIELD_ROLES => "역할과 책임",
        FIELD_RESOURCES => "필요 자원",
        FIELD_MONITORING => "성과 모니터링(방법, 주기)",
        FIELD_REVIEWS => "정기 검토(일정, 담당자)",
        FIELD_WEIGHT => "가중치 [%]",
        LABEL_PERIOD => "구간",
        LABEL_RISK => "위험",
        DECISION_OPTIONS => "1) 추진  2) 중단  3) 보류  4) 미정",
        "decision.go" => "추진",
        "decision.no_go" => "중단",
        "decision.defer" => "보류",
        "decision.undecided" => "미정",
        "step.project_info" => "프로젝트 정보",
        "step.strategic_fit" => "전략 적합성",
        "step.use_case" => "활용 사례",
        "step.feasibility" => "기술적 타당성 (1-10)",
        "step.costs" => "비용과 자원",
        "step.revenue" => "매출, 비용, ROI 추정",
        "step.risks" => "위험 평가",
        "step.sustainability" => "확장성과 지속가능성 (1-10)",
        "step.success_metrics" => "성과 측정",
        "step.summary" => "입력 요약",
        "step.decision" => "의사결정",
        "step.implementation" => "실행 계획",
        "step.monitoring" => "모니터링과 평가",
        "step.utility_analysis" => "효용 분석",
        "criterion.data_availability" => "데이터 가용성과 품질",
        "criterion.technical_skills" => "팀의 기술 역량",
        "criterion.tech_compatibility" => "기존 IT 인프라와의 호환성",
        "criterion.scalability" => "확장성",
        "criterion.sustainability" => "지속가능성",
        "risk_level.low" => "낮음",
        "risk_level.medium" => "중간",
        "risk_level.high" => "높음",
        REPORT_TITLE => "이니셔티브 평가 보고서",
        REPORT_OWNER => "책임자:",
        REPORT_DECISION => "결정:",
        REPORT_PROJECTION_HEADING => "-- 재무 투영 --",
        REPORT_TOTAL_REVENUE => "총매출:",
        REPORT_TOTAL_COST => "총비용:",
        REPORT_TOTAL_PROFIT => "총이익:",
        REPORT_ROI => "ROI:",
        REPORT_ROI_UNDEFINED => "ROI: 비용 정보가 부족하여 계산할 수 없습니다.",
        REPORT_BREAKEVEN => "손익분기:",
        REPORT_NO_BREAKEVEN => "평가 기간 안에 투자비가 회수되지 않습니다.",
        REPORT_YEARS_UNIT => "년",
        COL_YEAR => "연도",
        COL_REVENUE => "매출",
        COL_SAVINGS => "절감액",
        COL_COST => "비용",
        COL_PROFIT => "이익",
        COL_CUM_REVENUE => "누적 매출",
        COL_CUM_COST => "누적 비용",
        COL_CUM_PROFIT => "누적 이익",
        REPORT_RISK_HEADING => "-- 위험 --",
        REPORT_RISK_COUNTS => "건수(낮음/중간/높음):",
        REPORT_RISK_MEAN => "평균 노출도:",
        REPORT_RISK_HIGHEST => "최대 노출 위험:",
        REPORT_UTILITY_HEADING => "-- 효용 분석 --",
        REPORT_UTILITY_TOTAL => "종합 점수(10점 만점):",
        REPORT_UTILITY_UNAVAILABLE => "가중치 합이 100%가 아니어서 효용 분석을 생략합니다.",
        EXPORT_FORMAT_OPTIONS => "형식: 1) 텍스트  2) CSV  3) JSON (엔터 = 기본값)",
        EXPORT_PROMPT_PATH => "출력 파일(엔터 = 화면): ",
        EXPORT_WRITTEN => "보고서를 저장했습니다:",
        PROMPT_FORM_PATH => "폼 파일",
        FORM_SAVED => "폼을 저장했습니다:",
        FORM_LOADED => "폼을 불러왔습니다:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_LANGUAGE => "언어 (auto/ko/en)",
        SETTINGS_CURRENCY => "통화 기호",
        SETTINGS_DECIMALS => "소수 자릿수",
        SETTINGS_FORMAT => "기본 보고서 형식 (text/csv/json)",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error:",
        APP_EXIT => "Exiting.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        HINT_KEEP_CURRENT => "(enter = keep current value)",
        HINT_LIST => "(comma separated)",
        MAIN_MENU_TITLE => "\n=== Initiative Evaluator ===",
        MAIN_MENU_QUESTIONNAIRE => "1) Continue questionnaire",
        MAIN_MENU_JUMP => "2) Jump to step",
        MAIN_MENU_PROJECTION => "3) Show revenue/cost/ROI projection",
        MAIN_MENU_EXPORT => "4) Export report",
        MAIN_MENU_SAVE => "5) Save form",
        MAIN_MENU_LOAD => "6) Load form",
        MAIN_MENU_SETTINGS => "7) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        NAV_PROMPT => "enter=next, b=back, m=menu: ",
        NAV_COMPLETED => "All steps completed.",
        NAV_PROGRESS => "Progress",
        PROMPT_JUMP_STEP => "Step number (0-13): ",
        FIELD_PROJECT_NAME => "Project name",
        FIELD_PROJECT_DESCRIPTION => "Project description",
        FIELD_PROJECT_OWNER => "Project owner",
        FIELD_ALIGNMENT => "Alignment with business goals",
        FIELD_GOALS => "Strategic goals",
        FIELD_KPIS => "Key performance indicators",
        FIELD_TECHNOLOGY => "Technology",
        FIELD_PURPOSE => "Purpose",
        FIELD_APPLICATION_AREA => "Application area",
        FIELD_INNOVATION_KIND => "Kind of innovation",
        FIELD_DEVELOPMENT_COST => "Development cost",
        FIELD_OPERATING_COST => "Operating cost per year",
        FIELD_RISK_BUDGET => "Risk budget",
        FIELD_TIMELINE => "Timeline [years]",
        FIELD_RAMP_UP => "Ramp-up [years]",
        FIELD_INTERVAL_COUNT => "Number of growth periods",
        FIELD_INTERVAL_START => "Start year",
        FIELD_INTERVAL_END => "End year",
        FIELD_INTERVAL_RATE => "Growth rate [%]",
        FIELD_ANNUAL_SAVINGS => "Annual cost savings",
        FIELD_BASE_REVENUE => "Base revenue in first year after ramp-up",
        FIELD_RISK_COUNT => "Number of risks",
        FIELD_RISK_DESCRIPTION => "Description",
        FIELD_RISK_PROBABILITY => "Probability [%] (0-100)",
        FIELD_RISK_IMPACT => "Impact (1-10)",
        FIELD_METRICS => "Success metrics",
        FIELD_TARGETS => "Target values",
        FIELD_DECISION => "Decision",
        FIELD_REASONING => "Reasoning",
        FIELD_PLAN => "Project plan",
        FIELD_ROLES => "Roles and responsibilities",
        FIELD_RESOURCES => "Required resources",
        FIELD_MONITORING => "Performance monitoring (methods, frequency)",
        FIELD_REVIEWS => "Regular reviews (schedule, owners)",
        FIELD_WEIGHT => "Weight [%]",
        LABEL_PERIOD => "Period",
        LABEL_RISK => "Risk",
        DECISION_OPTIONS => "1) Go  2) No go  3) Defer  4) Undecided",
        "decision.go" => "Go",
        "decision.no_go" => "No go",
        "decision.defer" => "Defer",
        "decision.undecided" => "Undecided",
        "step.project_info" => "Project information",
        "step.strategic_fit" => "Strategic fit",
        "step.use_case" => "Use case",
        "step.feasibility" => "Technical feasibility (1-10)",
        "step.costs" => "Costs and resources",
        "step.revenue" => "Revenue, costs and ROI",
        "step.risks" => "Risk assessment",
        "step.sustainability" => "Scalability and sustainability (1-10)",
        "step.success_metrics" => "Success measurement",
        "step.summary" => "Summary of inputs",
        "step.decision" => "Decision",
        "step.implementation" => "Implementation planning",
        "step.monitoring" => "Monitoring and evaluation",
        "step.utility_analysis" => "Utility analysis",
        "criterion.data_availability" => "Data availability and quality",
        "criterion.technical_skills" => "Technical skills in the team",
        "criterion.tech_compatibility" => "Compatibility with existing IT",
        "criterion.scalability" => "Scalability",
        "criterion.sustainability" => "Sustainability",
        "risk_level.low" => "low",
        "risk_level.medium" => "medium",
        "risk_level.high" => "high",
        REPORT_TITLE => "Initiative evaluation report",
        REPORT_OWNER => "Owner:",
        REPORT_DECISION => "Decision:",
        REPORT_PROJECTION_HEADING => "-- Financial projection --",
        REPORT_TOTAL_REVENUE => "Total revenue:",
        REPORT_TOTAL_COST => "Total cost:",
        REPORT_TOTAL_PROFIT => "Total profit:",
        REPORT_ROI => "ROI:",
        REPORT_ROI_UNDEFINED => "ROI: not available, total cost is zero.",
        REPORT_BREAKEVEN => "Break-even:",
        REPORT_NO_BREAKEVEN => "The investment does not pay back within the timeline.",
        REPORT_YEARS_UNIT => "year(s)",
        COL_YEAR => "Year",
        COL_REVENUE => "Revenue",
        COL_SAVINGS => "Savings",
        COL_COST => "Cost",
        COL_PROFIT => "Profit",
        COL_CUM_REVENUE => "Cum. revenue",
        COL_CUM_COST => "Cum. cost",
        COL_CUM_PROFIT => "Cum. profit",
        REPORT_RISK_HEADING => "-- Risks --",
        REPORT_RISK_COUNTS => "Count (low/medium/high):",
        REPORT_RISK_MEAN => "Mean exposure:",
        REPORT_RISK_HIGHEST => "Highest exposure:",
        REPORT_UTILITY_HEADING => "-- Utility analysis --",
        REPORT_UTILITY_TOTAL => "Total score (out of 10):",
        REPORT_UTILITY_UNAVAILABLE => "Weights do not sum to 100%; utility analysis skipped.",
        EXPORT_FORMAT_OPTIONS => "Format: 1) text  2) CSV  3) JSON (enter = default)",
        EXPORT_PROMPT_PATH => "Output file (enter = screen): ",
        EXPORT_WRITTEN => "Report written to",
        PROMPT_FORM_PATH => "Form file",
        FORM_SAVED => "Form saved to",
        FORM_LOADED => "Form loaded from",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_LANGUAGE => "Language (auto/ko/en)",
        SETTINGS_CURRENCY => "Currency symbol",
        SETTINGS_DECIMALS => "Decimal places",
        SETTINGS_FORMAT => "Default report format (text/csv/json)",
        SETTINGS_SAVED => "Settings saved.",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_falls_back_to_key_for_unknown() {
        let tr = Translator::new("en");
        assert_eq!(tr.t(keys::APP_EXIT), "Exiting.");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
    }

    #[test]
    fn nested_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map("[general]\napp_exit = \"Tschüss\"\n").unwrap();
        assert_eq!(map.get("general.app_exit").map(String::as_str), Some("Tschüss"));
    }

    #[test]
    fn deeper_tables_flatten_and_non_strings_are_skipped() {
        let src = "title = \"Top\"\n[report.risk]\nheading = \"Risiken\"\ncount = 3\n";
        let map = parse_toml_to_map(src).unwrap();
        assert_eq!(map.get("title").map(String::as_str), Some("Top"));
        assert_eq!(
            map.get("report.risk.heading").map(String::as_str),
            Some("Risiken")
        );
        assert!(!map.contains_key("report.risk.count"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn pack_without_strings_is_ignored() {
        assert!(parse_toml_to_map("[general]\nlimit = 3\n").is_none());
        assert!(parse_toml_to_map("not toml = = =").is_none());
    }

    #[test]
    fn explicit_language_wins_over_config() {
        assert_eq!(resolve_language("en-GB", Some("ko")), "en");
        assert_eq!(resolve_language("auto", Some("ko")), "ko");
        assert_eq!(resolve_language("de", None), "de");
    }

    #[test]
    fn pack_languages_fall_back_to_english() {
        let tr = Translator::new("de");
        assert_eq!(tr.language(), Language::En);
        assert_eq!(tr.t(keys::COL_YEAR), "Year");
    }
}
