use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::form::{FormError, InitiativeForm, Step};
use crate::i18n::{self, keys, Translator};
use crate::projection::ProjectionError;
use crate::report::ReportError;
use crate::ui_cli::{self, Console, MenuChoice};

/// 폼을 저장할 기본 파일 이름.
pub const DEFAULT_FORM_PATH: &str = "initiative.toml";

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 콘솔 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 폼 검증/저장 오류
    #[error("입력 양식 오류: {0}")]
    Form(#[from] FormError),
    #[error("보고서 오류: {0}")]
    Report(#[from] ReportError),
    #[error("재무 투영 오류: {0}")]
    Projection(#[from] ProjectionError),
    /// 입력 스트림이 닫힘(EOF)
    #[error("입력이 종료되었습니다")]
    InputClosed,
}

impl AppError {
    /// 메뉴로 돌아가 계속 진행할 수 있는 오류인지 여부.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::InputClosed | AppError::Io(_))
    }
}

/// 대화형 세션 상태. 작성 중인 폼과 현재 단계를 들고 다닌다.
#[derive(Debug, Clone)]
pub struct Session {
    pub form: InitiativeForm,
    pub step: Step,
    pub form_path: PathBuf,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            form: InitiativeForm::default(),
            step: Step::ProjectInfo,
            form_path: PathBuf::from(DEFAULT_FORM_PATH),
        }
    }
}

impl Session {
    /// 기존 폼으로 세션을 시작한다.
    pub fn with_form(form: InitiativeForm, form_path: PathBuf) -> Self {
        Self {
            form,
            step: Step::ProjectInfo,
            form_path,
        }
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 복구 가능한 오류는 출력 후 메뉴로 돌아가고, 입력이 끝나면 설정을 저장하고 종료한다.
pub fn run<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    config: &mut Config,
    config_path: &Path,
    tr: &mut Translator,
    session: &mut Session,
) -> Result<(), AppError> {
    loop {
        match dispatch(con, config, config_path, tr, session) {
            Ok(true) => {}
            Ok(false) => break,
            Err(AppError::InputClosed) => {
                debug!("input closed; leaving main loop");
                break;
            }
            Err(e) if e.is_recoverable() => {
                warn!("{e}");
                con.say(&format!("{} {e}", tr.t(keys::ERROR_PREFIX)))?;
            }
            Err(e) => return Err(e),
        }
    }
    config.save_to(config_path)?;
    con.say(tr.t(keys::APP_EXIT))?;
    Ok(())
}

/// 메뉴 한 번을 처리한다. 종료를 선택하면 false.
fn dispatch<R: BufRead, W: Write>(
    con: &mut Console<R, W>,
    config: &mut Config,
    config_path: &Path,
    tr: &mut Translator,
    session: &mut Session,
) -> Result<bool, AppError> {
    match ui_cli::main_menu(con, tr)? {
        MenuChoice::Questionnaire => ui_cli::run_questionnaire(con, tr, config, session)?,
        MenuChoice::JumpToStep => {
            ui_cli::handle_jump(con, tr, session)?;
            ui_cli::run_questionnaire(con, tr, config, session)?;
        }
        MenuChoice::Projection => ui_cli::handle_projection(con, tr, config, session)?,
        MenuChoice::Export => ui_cli::handle_export(con, tr, config, session)?,
        MenuChoice::SaveForm => ui_cli::handle_save(con, tr, session)?,
        MenuChoice::LoadForm => ui_cli::handle_load(con, tr, session)?,
        MenuChoice::Settings => {
            if ui_cli::handle_settings(con, tr, config)? {
                let lang = i18n::resolve_language("", Some(&config.language));
                *tr = Translator::new_with_pack(&lang, config.locale_dir.as_deref());
                debug!("language switched to {lang}");
            }
            config.save_to(config_path)?;
            con.say(tr.t(keys::SETTINGS_SAVED))?;
        }
        MenuChoice::Exit => return Ok(false),
    }
    Ok(true)
}
