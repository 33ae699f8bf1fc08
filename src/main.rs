use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use initiative_evaluator::app::{self, Session, DEFAULT_FORM_PATH};
use initiative_evaluator::config::{self, Config, DEFAULT_CONFIG_PATH};
use initiative_evaluator::form::InitiativeForm;
use initiative_evaluator::i18n::{resolve_language, Translator};
use initiative_evaluator::report::{ExportFormat, Formatting, Report};
use initiative_evaluator::ui_cli::Console;

#[derive(Parser, Debug)]
#[command(name = "initiative_evaluator")]
#[command(about = "Questionnaire and ROI projection for innovation initiatives", long_about = None)]
#[command(version)]
struct Cli {
    /// 표시 언어(auto/ko/en 또는 언어팩 코드)
    #[arg(short = 'L', long, global = true, default_value = "auto")]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 대화형 질문지를 실행한다 (기본)
    Interactive {
        /// 시작 시 불러올 폼 파일
        #[arg(short, long)]
        form: Option<PathBuf>,
    },
    /// 폼 파일로 투영을 계산해 보고서를 출력한다
    Project {
        #[arg(short, long)]
        input: PathBuf,

        /// 출력 형식. 생략하면 설정값을 쓴다
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// 출력 파일 (생략 시 표준 출력)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// 폼 파일 전체를 검증한다
    Validate {
        #[arg(short, long)]
        input: PathBuf,
    },
    /// 빈 폼 템플릿을 생성한다
    Template {
        #[arg(short, long, default_value = DEFAULT_FORM_PATH)]
        output: PathBuf,
    },
}

/// 프로그램의 엔트리 포인트.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("오류: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<()> {
    let mut cfg = config::load_from(&cli.config)
        .with_context(|| format!("설정 파일 {} 로드", cli.config.display()))?;
    let lang = resolve_language(&cli.lang, Some(&cfg.language));
    let mut tr = Translator::new_with_pack(&lang, cfg.locale_dir.as_deref());
    info!("language: {lang}");

    match cli.command.unwrap_or(Commands::Interactive { form: None }) {
        Commands::Interactive { form } => {
            let mut session = match form {
                Some(path) => {
                    let loaded = InitiativeForm::load(&path)?;
                    Session::with_form(loaded, path)
                }
                None => Session::default(),
            };
            let stdin = io::stdin();
            let mut con = Console::new(stdin.lock(), io::stdout());
            app::run(&mut con, &mut cfg, &cli.config, &mut tr, &mut session)?;
        }
        Commands::Project {
            input,
            format,
            output,
        } => project(&cfg, &tr, &input, format, output.as_deref())?,
        Commands::Validate { input } => {
            let form = InitiativeForm::load(&input)?;
            form.validate()
                .with_context(|| format!("{} 입력 양식이 완성되지 않았습니다", input.display()))?;
            println!("{}: 검증 통과", input.display());
        }
        Commands::Template { output } => {
            InitiativeForm::default().save(&output)?;
            println!("{}", output.display());
        }
    }
    Ok(())
}

fn project(
    cfg: &Config,
    tr: &Translator,
    input: &Path,
    format: Option<ExportFormat>,
    output: Option<&Path>,
) -> Result<()> {
    let form = InitiativeForm::load(input)?;
    let report = Report::build(&form)?;
    let format = format.unwrap_or(cfg.export_format);
    let fmt = Formatting::from(cfg);
    match output {
        Some(path) => report.write_to(path, format, &fmt, tr)?,
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            report.write(format, &fmt, tr, &mut out)?;
            out.flush()?;
        }
    }
    Ok(())
}
