use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::growth::{rate_for_year, validate_intervals, GrowthInterval, IntervalError};

/// 평가 기간 상한 [년]
pub const MAX_TIMELINE_YEARS: u32 = 200;

/// 재무 투영 입력. 계산할 때마다 폼 상태에서 새로 만든다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    /// 평가 기간 [년] (1 ~ [`MAX_TIMELINE_YEARS`])
    pub timeline_length: u32,
    /// 준비 기간 [년]. 이 기간에는 매출/절감액/운영비가 없다.
    pub ramp_up: f64,
    /// 준비 기간 직후 첫해 매출
    pub base_revenue: f64,
    /// 연간 비용 절감액
    pub annual_savings: f64,
    /// 연간 운영비
    pub annual_operating_cost: f64,
    /// 초기 투자비(0년차 비용)
    pub initial_investment: f64,
    /// 시간 순으로 정렬된 성장 구간
    #[serde(default)]
    pub growth_intervals: Vec<GrowthInterval>,
}

/// 한 해의 투영 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,
    pub revenue: f64,
    pub savings: f64,
    pub cost: f64,
    pub profit: f64,
    pub cumulative_revenue: f64,
    pub cumulative_cost: f64,
    /// 누적 이익. 0년차 투자비가 비용에 포함되므로 누적 현금흐름과 같다.
    pub cumulative_profit: f64,
}

/// 투영 전체 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// 0년차부터 평가 기간 마지막 해까지
    pub years: Vec<YearRecord>,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub total_cost: f64,
    /// 총비용이 0이면 None(비용 정보 부족)
    pub roi_percent: Option<f64>,
    /// 기간 안에 회수되지 않으면 None
    pub breakeven_year: Option<f64>,
}

/// 투영 계산 전에 입력을 거부하는 경우.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProjectionError {
    #[error("평가 기간은 1년 이상이어야 합니다")]
    EmptyTimeline,
    #[error("평가 기간 {timeline_length}년이 상한 {max}년을 넘습니다")]
    TimelineTooLong { timeline_length: u32, max: u32 },
    #[error("준비 기간 {ramp_up}은 [0, {timeline_length}] 범위여야 합니다")]
    RampUpOutOfRange { ramp_up: f64, timeline_length: u32 },
    #[error("{field}는 0 이상의 유한한 금액이어야 합니다 (입력값 {value})")]
    InvalidAmount { field: &'static str, value: f64 },
    #[error(transparent)]
    Interval(#[from] IntervalError),
}

impl ProjectionInput {
    /// 스칼라 입력 범위와 성장 구간을 모두 검사한다.
    pub fn validate(&self) -> Result<(), ProjectionError> {
        if self.timeline_length == 0 {
            return Err(ProjectionError::EmptyTimeline);
        }
        if self.timeline_length > MAX_TIMELINE_YEARS {
            return Err(ProjectionError::TimelineTooLong {
                timeline_length: self.timeline_length,
                max: MAX_TIMELINE_YEARS,
            });
        }
        if !self.ramp_up.is_finite()
            || self.ramp_up < 0.0
            || self.ramp_up > f64::from(self.timeline_length)
        {
            return Err(ProjectionError::RampUpOutOfRange {
                ramp_up: self.ramp_up,
                timeline_length: self.timeline_length,
            });
        }
        let amounts = [
            ("base_revenue", self.base_revenue),
            ("annual_savings", self.annual_savings),
            ("annual_operating_cost", self.annual_operating_cost),
            ("initial_investment", self.initial_investment),
        ];
        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ProjectionError::InvalidAmount { field, value });
            }
        }
        validate_intervals(&self.growth_intervals, self.ramp_up, self.timeline_length)?;
        Ok(())
    }

    /// 검증 후 투영을 계산한다.
    pub fn evaluate(&self) -> Result<ProjectionResult, ProjectionError> {
        self.validate()?;
        Ok(compute_projection(self))
    }
}

/// 연도별 매출/비용/이익과 누적값, ROI, 손익분기 연도를 계산한다.
///
/// 입력은 [`ProjectionInput::validate`]를 통과했다고 가정한다. 준비 기간 종료는
/// 직전 연도 번호로 판단하므로 기준 매출이 0이어도 구분된다.
pub fn compute_projection(input: &ProjectionInput) -> ProjectionResult {
    let n = input.timeline_length as usize;
    let mut revenue = vec![0.0_f64; n + 1];
    let mut savings = vec![0.0_f64; n + 1];
    let mut cost = vec![0.0_f64; n + 1];

    cost[0] = input.initial_investment;

    for y in 1..=n {
        let year = y as f64;
        if year <= input.ramp_up {
            continue;
        }
        revenue[y] = if year - 1.0 <= input.ramp_up {
            input.base_revenue
        } else {
            let rate = rate_for_year(&input.growth_intervals, year);
            revenue[y - 1] * (1.0 + rate / 100.0)
        };
        cost[y] = input.annual_operating_cost;
        savings[y] = input.annual_savings;
    }

    let mut years = Vec::with_capacity(n + 1);
    let (mut cum_revenue, mut cum_cost, mut cum_profit) = (0.0, 0.0, 0.0);
    for y in 0..=n {
        let profit = revenue[y] + savings[y] - cost[y];
        cum_revenue += revenue[y];
        cum_cost += cost[y];
        cum_profit += profit;
        years.push(YearRecord {
            year: y as u32,
            revenue: revenue[y],
            savings: savings[y],
            cost: cost[y],
            profit,
            cumulative_revenue: cum_revenue,
            cumulative_cost: cum_cost,
            cumulative_profit: cum_profit,
        });
    }

    let roi_percent = if cum_cost > 0.0 {
        Some(cum_profit / cum_cost * 100.0)
    } else {
        None
    };
    let breakeven_year = find_breakeven(&years);

    debug!(
        "projection: {n} years, total_profit={cum_profit}, total_cost={cum_cost}, \
         roi={roi_percent:?}, breakeven={breakeven_year:?}"
    );

    ProjectionResult {
        years,
        total_revenue: cum_revenue,
        total_profit: cum_profit,
        total_cost: cum_cost,
        roi_percent,
        breakeven_year,
    }
}

/// 누적 이익이 음수에서 0 이상으로 바뀌는 첫 구간을 선형 보간한다.
fn find_breakeven(years: &[YearRecord]) -> Option<f64> {
    years.windows(2).find_map(|pair| {
        let (prev, cur) = (&pair[0], &pair[1]);
        if prev.cumulative_profit < 0.0 && cur.cumulative_profit >= 0.0 {
            let (y0, y1) = (f64::from(prev.year), f64::from(cur.year));
            Some(
                y0 + (0.0 - prev.cumulative_profit) * (y1 - y0)
                    / (cur.cumulative_profit - prev.cumulative_profit),
            )
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u32, cumulative_profit: f64) -> YearRecord {
        YearRecord {
            year,
            revenue: 0.0,
            savings: 0.0,
            cost: 0.0,
            profit: 0.0,
            cumulative_revenue: 0.0,
            cumulative_cost: 0.0,
            cumulative_profit,
        }
    }

    #[test]
    fn breakeven_interpolates_first_crossing() {
        let years = [
            record(0, -100.0),
            record(1, -50.0),
            record(2, 50.0),
            record(3, -10.0),
            record(4, 10.0),
        ];
        assert_eq!(find_breakeven(&years), Some(1.5));
    }

    #[test]
    fn breakeven_exactly_zero_counts() {
        let years = [record(0, -100.0), record(1, 0.0)];
        assert_eq!(find_breakeven(&years), Some(1.0));
    }

    #[test]
    fn never_negative_has_no_crossing() {
        let years = [record(0, 0.0), record(1, 10.0)];
        assert_eq!(find_breakeven(&years), None);
    }
}
