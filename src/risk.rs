//! 위험 등록부. 발생 확률(%)과 영향도(1~10)로 노출도와 위험 매트릭스 등급을 구한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 매트릭스에서 "높음" 쪽으로 보는 확률 경계 [%]
const HIGH_PROBABILITY_PERCENT: u8 = 50;
/// 매트릭스에서 "높음" 쪽으로 보는 영향도 경계
const HIGH_IMPACT: u8 = 6;

/// 위험 항목 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskEntry {
    pub description: String,
    /// 발생 확률 [%] (0~100)
    pub probability_percent: u8,
    /// 영향도 (1~10)
    pub impact: u8,
}

impl Default for RiskEntry {
    fn default() -> Self {
        Self {
            description: String::new(),
            probability_percent: 50,
            impact: 5,
        }
    }
}

/// 위험 매트릭스 등급.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    #[error("위험 {}의 설명이 비어 있습니다", .index + 1)]
    MissingDescription { index: usize },
    #[error("위험 {}의 발생 확률 {value}%가 0~100 범위를 벗어났습니다", .index + 1)]
    Probability { index: usize, value: u8 },
    #[error("위험 {}의 영향도 {value}가 1~10 범위를 벗어났습니다", .index + 1)]
    Impact { index: usize, value: u8 },
}

impl RiskEntry {
    pub fn new(description: impl Into<String>, probability_percent: u8, impact: u8) -> Self {
        Self {
            description: description.into(),
            probability_percent,
            impact,
        }
    }

    /// 노출도 = 확률 × 영향도 (0~10)
    pub fn exposure(&self) -> f64 {
        f64::from(self.probability_percent) / 100.0 * f64::from(self.impact)
    }

    pub fn level(&self) -> RiskLevel {
        let likely = self.probability_percent >= HIGH_PROBABILITY_PERCENT;
        let severe = self.impact >= HIGH_IMPACT;
        match (likely, severe) {
            (true, true) => RiskLevel::High,
            (false, false) => RiskLevel::Low,
            _ => RiskLevel::Medium,
        }
    }
}

/// 등록부 요약.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub count: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub mean_exposure: f64,
    /// 노출도가 가장 큰 항목(설명, 노출도). 비어 있으면 None.
    pub highest: Option<(String, f64)>,
}

/// 질문지 위험 평가 단계에서 모은 위험 목록.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskRegister {
    #[serde(default)]
    pub entries: Vec<RiskEntry>,
}

impl RiskRegister {
    pub fn validate(&self) -> Result<(), RiskError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.description.trim().is_empty() {
                return Err(RiskError::MissingDescription { index });
            }
            if entry.probability_percent > 100 {
                return Err(RiskError::Probability {
                    index,
                    value: entry.probability_percent,
                });
            }
            if !(1..=10).contains(&entry.impact) {
                return Err(RiskError::Impact {
                    index,
                    value: entry.impact,
                });
            }
        }
        Ok(())
    }

    pub fn summary(&self) -> RiskSummary {
        let mut summary = RiskSummary {
            count: self.entries.len(),
            low: 0,
            medium: 0,
            high: 0,
            mean_exposure: 0.0,
            highest: None,
        };
        let mut total = 0.0;
        for entry in &self.entries {
            match entry.level() {
                RiskLevel::Low => summary.low += 1,
                RiskLevel::Medium => summary.medium += 1,
                RiskLevel::High => summary.high += 1,
            }
            let exposure = entry.exposure();
            total += exposure;
            let replace = match &summary.highest {
                Some((_, best)) => exposure > *best,
                None => true,
            };
            if replace {
                summary.highest = Some((entry.description.clone(), exposure));
            }
        }
        if summary.count > 0 {
            summary.mean_exposure = total / summary.count as f64;
        }
        summary
    }
}
