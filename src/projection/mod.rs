//! 연도별 매출/비용/절감액을 전개하고 ROI와 손익분기점을 계산하는 모듈.
//! 성장 구간 검증(growth)과 투영 계산(engine)으로 구성한다.

pub mod engine;
pub mod growth;

pub use engine::{
    compute_projection, ProjectionError, ProjectionInput, ProjectionResult, YearRecord,
    MAX_TIMELINE_YEARS,
};
pub use growth::{validate_intervals, GrowthInterval, IntervalError};
