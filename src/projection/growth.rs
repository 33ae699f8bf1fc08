use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 하나의 성장률이 적용되는 연도 구간.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthInterval {
    /// 시작 연도(포함)
    pub start: f64,
    /// 종료 연도(포함)
    pub end: f64,
    /// 전년 대비 성장률 [%]
    pub rate_percent: f64,
}

impl GrowthInterval {
    pub fn new(start: f64, end: f64, rate_percent: f64) -> Self {
        Self {
            start,
            end,
            rate_percent,
        }
    }

    /// 해당 연도가 구간 안에 있는지 확인한다. 양 끝을 포함한다.
    pub fn contains(&self, year: f64) -> bool {
        self.start <= year && year <= self.end
    }
}

/// 성장 구간 검증 오류. `index`는 0부터 시작하는 구간 번호다.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntervalError {
    #[error(
        "성장 구간 {}의 시작 연도 {start}가 이전 구간의 종료 연도 {previous_end}와 겹칩니다",
        .index + 1
    )]
    Overlap {
        index: usize,
        start: f64,
        previous_end: f64,
    },
    #[error(
        "성장 구간 {} [{start}, {end}]은 {lower} <= 시작 <= 종료 <= {upper} 범위여야 합니다",
        .index + 1
    )]
    Range {
        index: usize,
        start: f64,
        end: f64,
        lower: f64,
        upper: f64,
    },
    #[error("성장 구간 {}의 성장률 {rate}%가 유한한 값이 아닙니다", .index + 1)]
    Rate { index: usize, rate: f64 },
}

impl IntervalError {
    pub fn index(&self) -> usize {
        match self {
            IntervalError::Overlap { index, .. }
            | IntervalError::Range { index, .. }
            | IntervalError::Rate { index, .. } => *index,
        }
    }
}

/// 성장 구간이 시간 순서대로 겹치지 않고 `[ramp_up, timeline_length]` 안에 있는지 검사한다.
///
/// 구간 사이의 빈 연도는 허용한다(해당 연도 성장률은 0).
pub fn validate_intervals(
    intervals: &[GrowthInterval],
    ramp_up: f64,
    timeline_length: u32,
) -> Result<(), IntervalError> {
    let upper = f64::from(timeline_length);
    let mut previous_end: Option<f64> = None;
    for (index, interval) in intervals.iter().enumerate() {
        if !interval.rate_percent.is_finite() {
            return Err(IntervalError::Rate {
                index,
                rate: interval.rate_percent,
            });
        }
        let in_range = interval.start >= ramp_up
            && interval.end <= upper
            && interval.start <= interval.end;
        if !in_range {
            return Err(IntervalError::Range {
                index,
                start: interval.start,
                end: interval.end,
                lower: ramp_up,
                upper,
            });
        }
        if let Some(prev) = previous_end {
            if interval.start <= prev {
                return Err(IntervalError::Overlap {
                    index,
                    start: interval.start,
                    previous_end: prev,
                });
            }
        }
        previous_end = Some(interval.end);
    }
    Ok(())
}

/// 연도에 적용할 성장률[%]. 첫 번째로 일치하는 구간을 쓰고, 없으면 0이다.
pub(crate) fn rate_for_year(intervals: &[GrowthInterval], year: f64) -> f64 {
    intervals
        .iter()
        .find(|i| i.contains(year))
        .map(|i| i.rate_percent)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_between_intervals_yields_zero_rate() {
        let intervals = [
            GrowthInterval::new(1.0, 2.0, 10.0),
            GrowthInterval::new(4.0, 5.0, 5.0),
        ];
        assert_eq!(rate_for_year(&intervals, 3.0), 0.0);
        assert_eq!(rate_for_year(&intervals, 2.0), 10.0);
        assert_eq!(rate_for_year(&intervals, 4.0), 5.0);
    }

    #[test]
    fn fractional_bounds_are_inclusive() {
        let interval = GrowthInterval::new(1.5, 3.0, 2.0);
        assert!(!interval.contains(1.0));
        assert!(interval.contains(2.0));
        assert!(interval.contains(3.0));
    }

    #[test]
    fn non_finite_rate_rejected_before_range() {
        let intervals = [
            GrowthInterval::new(1.0, 2.0, 10.0),
            GrowthInterval::new(3.0, 9.0, f64::INFINITY),
        ];
        let err = validate_intervals(&intervals, 0.0, 5).unwrap_err();
        assert!(matches!(err, IntervalError::Rate { index: 1, .. }));
        assert_eq!(err.index(), 1);
    }
}
