use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 비용 추정 입력.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostEstimate {
    /// 1회성 개발비
    pub development_cost: f64,
    /// 연간 운영/유지비
    pub operating_cost_per_year: f64,
    /// 예측하지 못한 위험에 대비한 예비비
    pub risk_budget: f64,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CostError {
    #[error("{field}는 0 이상의 유한한 금액이어야 합니다 (입력값 {value})")]
    InvalidAmount { field: &'static str, value: f64 },
}

impl CostEstimate {
    /// 0년차에 인식하는 초기 투자비. 개발비와 예비비의 합이다.
    pub fn initial_investment(&self) -> f64 {
        self.development_cost + self.risk_budget
    }

    pub fn validate(&self) -> Result<(), CostError> {
        let fields = [
            ("development_cost", self.development_cost),
            ("operating_cost_per_year", self.operating_cost_per_year),
            ("risk_budget", self.risk_budget),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(CostError::InvalidAmount { field, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn investment_excludes_operating_cost() {
        let c = CostEstimate {
            development_cost: 40_000.0,
            operating_cost_per_year: 5_000.0,
            risk_budget: 10_000.0,
        };
        assert_eq!(c.initial_investment(), 50_000.0);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn negative_risk_budget_rejected() {
        let c = CostEstimate {
            risk_budget: -1.0,
            ..Default::default()
        };
        assert_eq!(
            c.validate(),
            Err(CostError::InvalidAmount {
                field: "risk_budget",
                value: -1.0
            })
        );
    }
}
