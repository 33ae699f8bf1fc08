//! 효용 분석(가중 점수 모델).
//!
//! 기술적 타당성 단계의 세 항목과 확장성/지속가능성 점수(각 1~10)에 백분율 가중치를
//! 곱해 10점 만점의 종합 점수를 만든다. 가중치 합은 100%여야 한다.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// 평가 항목.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    DataAvailability,
    TechnicalSkills,
    TechCompatibility,
    Scalability,
    Sustainability,
}

impl Criterion {
    pub const ALL: [Criterion; 5] = [
        Criterion::DataAvailability,
        Criterion::TechnicalSkills,
        Criterion::TechCompatibility,
        Criterion::Scalability,
        Criterion::Sustainability,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Criterion::DataAvailability => "data_availability",
            Criterion::TechnicalSkills => "technical_skills",
            Criterion::TechCompatibility => "tech_compatibility",
            Criterion::Scalability => "scalability",
            Criterion::Sustainability => "sustainability",
        }
    }
}

/// 항목별 가중치 [%].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weights {
    pub data_availability: f64,
    pub technical_skills: f64,
    pub tech_compatibility: f64,
    pub scalability: f64,
    pub sustainability: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            data_availability: 20.0,
            technical_skills: 20.0,
            tech_compatibility: 20.0,
            scalability: 20.0,
            sustainability: 20.0,
        }
    }
}

impl Weights {
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::DataAvailability => self.data_availability,
            Criterion::TechnicalSkills => self.technical_skills,
            Criterion::TechCompatibility => self.tech_compatibility,
            Criterion::Scalability => self.scalability,
            Criterion::Sustainability => self.sustainability,
        }
    }

    pub fn set(&mut self, criterion: Criterion, value: f64) {
        let slot = match criterion {
            Criterion::DataAvailability => &mut self.data_availability,
            Criterion::TechnicalSkills => &mut self.technical_skills,
            Criterion::TechCompatibility => &mut self.tech_compatibility,
            Criterion::Scalability => &mut self.scalability,
            Criterion::Sustainability => &mut self.sustainability,
        };
        *slot = value;
    }

    pub fn total(&self) -> f64 {
        Criterion::ALL.iter().map(|c| self.get(*c)).sum()
    }

    pub fn validate(&self) -> Result<(), WeightError> {
        for criterion in Criterion::ALL {
            let value = self.get(criterion);
            if !value.is_finite() || !(0.0..=100.0).contains(&value) {
                return Err(WeightError::OutOfRange {
                    criterion: criterion.key(),
                    value,
                });
            }
        }
        let total = self.total();
        if (total - 100.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(WeightError::Sum { total });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeightError {
    #[error("{criterion} 가중치는 0~100 범위여야 합니다 (입력값 {value})")]
    OutOfRange { criterion: &'static str, value: f64 },
    #[error("가중치 합계는 100%여야 합니다 (현재 {total}%)")]
    Sum { total: f64 },
}

/// 항목별 점수(1~10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scores {
    pub data_availability: u8,
    pub technical_skills: u8,
    pub tech_compatibility: u8,
    pub scalability: u8,
    pub sustainability: u8,
}

impl Default for Scores {
    fn default() -> Self {
        Self {
            data_availability: 5,
            technical_skills: 5,
            tech_compatibility: 5,
            scalability: 5,
            sustainability: 5,
        }
    }
}

impl Scores {
    pub fn get(&self, criterion: Criterion) -> u8 {
        match criterion {
            Criterion::DataAvailability => self.data_availability,
            Criterion::TechnicalSkills => self.technical_skills,
            Criterion::TechCompatibility => self.tech_compatibility,
            Criterion::Scalability => self.scalability,
            Criterion::Sustainability => self.sustainability,
        }
    }
}

/// 결과 표의 한 줄.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub criterion: Criterion,
    pub score: u8,
    pub weight_percent: f64,
    pub weighted_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilityResult {
    pub rows: Vec<ScoreRow>,
    /// 10점 만점 종합 점수
    pub total_score: f64,
}

/// 가중 점수를 계산한다. 가중치 합이 100%가 아니면 거부한다.
pub fn utility_analysis(scores: &Scores, weights: &Weights) -> Result<UtilityResult, WeightError> {
    weights.validate()?;
    let rows: Vec<ScoreRow> = Criterion::ALL
        .iter()
        .map(|&criterion| {
            let score = scores.get(criterion);
            let weight_percent = weights.get(criterion);
            ScoreRow {
                criterion,
                score,
                weight_percent,
                weighted_score: f64::from(score) * weight_percent / 100.0,
            }
        })
        .collect();
    let total_score = rows.iter().map(|r| r.weighted_score).sum();
    Ok(UtilityResult { rows, total_score })
}
