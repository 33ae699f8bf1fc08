//! 혁신 이니셔티브 평가 도구. 질문지, 재무 투영, 효용 분석, 보고서 출력을 라이브러리로 제공한다.

pub mod app;
pub mod config;
pub mod costs;
pub mod form;
pub mod i18n;
pub mod projection;
pub mod report;
pub mod risk;
pub mod scoring;
pub mod ui_cli;
