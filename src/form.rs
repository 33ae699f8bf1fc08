//! 질문지 폼 상태.
//!
//! 각 단계의 입력을 타입이 있는 구조체로 보관하고, 계산 시점에
//! [`ProjectionInput`]으로 변환한다. 폼 전체는 TOML 파일로 저장/복원한다.

use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::costs::{CostError, CostEstimate};
use crate::projection::{GrowthInterval, ProjectionError, ProjectionInput};
use crate::risk::{RiskError, RiskRegister};
use crate::scoring::{Scores, WeightError, Weights};

/// 질문지 단계. 순서대로 진행한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    ProjectInfo,
    StrategicFit,
    UseCase,
    Feasibility,
    Costs,
    Revenue,
    Risks,
    Sustainability,
    SuccessMetrics,
    Summary,
    Decision,
    Implementation,
    Monitoring,
    UtilityAnalysis,
}

impl Step {
    pub const ALL: [Step; 14] = [
        Step::ProjectInfo,
        Step::StrategicFit,
        Step::UseCase,
        Step::Feasibility,
        Step::Costs,
        Step::Revenue,
        Step::Risks,
        Step::Sustainability,
        Step::SuccessMetrics,
        Step::Summary,
        Step::Decision,
        Step::Implementation,
        Step::Monitoring,
        Step::UtilityAnalysis,
    ];

    pub fn index(&self) -> usize {
        Step::ALL
            .iter()
            .position(|s| s == self)
            .unwrap_or_default()
    }

    pub fn from_index(index: usize) -> Option<Step> {
        Step::ALL.get(index).copied()
    }

    /// 다음 단계. 마지막 단계면 그대로 머문다.
    pub fn next(&self) -> Step {
        Step::from_index(self.index() + 1).unwrap_or(*self)
    }

    /// 이전 단계. 첫 단계면 그대로 머문다.
    pub fn previous(&self) -> Step {
        self.index()
            .checked_sub(1)
            .and_then(Step::from_index)
            .unwrap_or(*self)
    }

    pub fn is_last(&self) -> bool {
        self.index() + 1 == Step::ALL.len()
    }

    /// 진행률 [%]. 첫 단계 0, 마지막 단계 100.
    pub fn progress_percent(&self) -> u8 {
        (self.index() * 100 / (Step::ALL.len() - 1)) as u8
    }

    /// 번역 키에 쓰는 식별자.
    pub fn key(&self) -> &'static str {
        match self {
            Step::ProjectInfo => "project_info",
            Step::StrategicFit => "strategic_fit",
            Step::UseCase => "use_case",
            Step::Feasibility => "feasibility",
            Step::Costs => "costs",
            Step::Revenue => "revenue",
            Step::Risks => "risks",
            Step::Sustainability => "sustainability",
            Step::SuccessMetrics => "success_metrics",
            Step::Summary => "summary",
            Step::Decision => "decision",
            Step::Implementation => "implementation",
            Step::Monitoring => "monitoring",
            Step::UtilityAnalysis => "utility_analysis",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub name: String,
    pub description: String,
    pub owner: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategicFit {
    /// 사업 목표와의 정렬
    pub alignment: String,
    pub goals: Vec<String>,
    pub kpis: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UseCase {
    pub technology: String,
    pub purpose: String,
    pub application_area: String,
    pub innovation_kind: String,
}

/// 기술적 타당성 점수(1~10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feasibility {
    pub data_availability: u8,
    pub technical_skills: u8,
    pub tech_compatibility: u8,
}

impl Default for Feasibility {
    fn default() -> Self {
        Self {
            data_availability: 5,
            technical_skills: 5,
            tech_compatibility: 5,
        }
    }
}

/// 매출 계획. 비용 단계와 합쳐 투영 입력이 된다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevenuePlan {
    pub timeline_years: u32,
    pub ramp_up_years: f64,
    pub base_revenue: f64,
    pub annual_savings: f64,
    pub growth_intervals: Vec<GrowthInterval>,
}

impl Default for RevenuePlan {
    fn default() -> Self {
        Self {
            timeline_years: 1,
            ramp_up_years: 0.0,
            base_revenue: 0.0,
            annual_savings: 0.0,
            growth_intervals: Vec::new(),
        }
    }
}

/// 확장성/지속가능성 점수(1~10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SustainabilityScores {
    pub scalability: u8,
    pub sustainability: u8,
}

impl Default for SustainabilityScores {
    fn default() -> Self {
        Self {
            scalability: 5,
            sustainability: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuccessMetrics {
    pub metrics: Vec<String>,
    pub targets: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Go,
    NoGo,
    Defer,
    #[default]
    Undecided,
}

impl Decision {
    pub fn key(&self) -> &'static str {
        match self {
            Decision::Go => "go",
            Decision::NoGo => "no_go",
            Decision::Defer => "defer",
            Decision::Undecided => "undecided",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecisionRecord {
    pub decision: Decision,
    pub reasoning: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Implementation {
    pub plan: String,
    pub resources: String,
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Monitoring {
    pub performance: String,
    pub reviews: String,
}

/// 질문지 전체 상태.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitiativeForm {
    pub project: ProjectInfo,
    pub strategy: StrategicFit,
    pub use_case: UseCase,
    pub feasibility: Feasibility,
    pub costs: CostEstimate,
    pub revenue: RevenuePlan,
    pub risks: RiskRegister,
    pub sustainability: SustainabilityScores,
    pub success: SuccessMetrics,
    pub decision: DecisionRecord,
    pub implementation: Implementation,
    pub monitoring: Monitoring,
    pub weights: Weights,
}

/// 폼 검증/입출력 오류.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("필수 항목 `{field}`이(가) 비어 있습니다")]
    MissingField { step: Step, field: &'static str },
    #[error("점수 `{field}`는 1~10 범위여야 합니다 (입력값 {value})")]
    Score { field: &'static str, value: u8 },
    #[error(transparent)]
    Cost(#[from] CostError),
    #[error(transparent)]
    Projection(#[from] ProjectionError),
    #[error(transparent)]
    Risk(#[from] RiskError),
    #[error(transparent)]
    Weights(#[from] WeightError),
    #[error("{} 파일 접근 실패: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("입력 양식 파싱 실패: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("입력 양식 직렬화 실패: {0}")]
    Serialize(#[from] toml::ser::Error),
}

impl FormError {
    /// 오류가 속한 단계. 파일 입출력 오류는 None.
    pub fn step(&self) -> Option<Step> {
        match self {
            FormError::MissingField { step, .. } => Some(*step),
            FormError::Score { field, .. } => Some(match *field {
                "scalability" | "sustainability" => Step::Sustainability,
                _ => Step::Feasibility,
            }),
            FormError::Cost(_) => Some(Step::Costs),
            FormError::Projection(_) => Some(Step::Revenue),
            FormError::Risk(_) => Some(Step::Risks),
            FormError::Weights(_) => Some(Step::UtilityAnalysis),
            FormError::Io { .. } | FormError::Parse(_) | FormError::Serialize(_) => None,
        }
    }
}

fn require(step: Step, field: &'static str, value: &str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::MissingField { step, field });
    }
    Ok(())
}

fn check_score(field: &'static str, value: u8) -> Result<(), FormError> {
    if !(1..=10).contains(&value) {
        return Err(FormError::Score { field, value });
    }
    Ok(())
}

impl InitiativeForm {
    /// 비용 단계와 매출 계획으로 새 투영 입력을 만든다.
    pub fn to_projection_input(&self) -> ProjectionInput {
        ProjectionInput {
            timeline_length: self.revenue.timeline_years,
            ramp_up: self.revenue.ramp_up_years,
            base_revenue: self.revenue.base_revenue,
            annual_savings: self.revenue.annual_savings,
            annual_operating_cost: self.costs.operating_cost_per_year,
            initial_investment: self.costs.initial_investment(),
            growth_intervals: self.revenue.growth_intervals.clone(),
        }
    }

    /// 효용 분석에 쓰는 점수 묶음.
    pub fn scores(&self) -> Scores {
        Scores {
            data_availability: self.feasibility.data_availability,
            technical_skills: self.feasibility.technical_skills,
            tech_compatibility: self.feasibility.tech_compatibility,
            scalability: self.sustainability.scalability,
            sustainability: self.sustainability.sustainability,
        }
    }

    /// 한 단계의 필수 항목과 수치 범위를 검사한다.
    pub fn validate_step(&self, step: Step) -> Result<(), FormError> {
        let result = match step {
            Step::ProjectInfo => require(step, "name", &self.project.name)
                .and_then(|_| require(step, "owner", &self.project.owner)),
            Step::Feasibility => {
                let f = &self.feasibility;
                check_score("data_availability", f.data_availability)
                    .and_then(|_| check_score("technical_skills", f.technical_skills))
                    .and_then(|_| check_score("tech_compatibility", f.tech_compatibility))
            }
            Step::Costs => self.costs.validate().map_err(FormError::from),
            Step::Revenue => self
                .to_projection_input()
                .validate()
                .map_err(FormError::from),
            Step::Risks => self.risks.validate().map_err(FormError::from),
            Step::Sustainability => check_score("scalability", self.sustainability.scalability)
                .and_then(|_| check_score("sustainability", self.sustainability.sustainability)),
            Step::UtilityAnalysis => self.weights.validate().map_err(FormError::from),
            Step::StrategicFit
            | Step::UseCase
            | Step::SuccessMetrics
            | Step::Summary
            | Step::Decision
            | Step::Implementation
            | Step::Monitoring => Ok(()),
        };
        if let Err(ref e) = result {
            warn!("step {} rejected: {e}", step.key());
        }
        result
    }

    /// 모든 단계를 순서대로 검사하고 첫 오류를 반환한다.
    pub fn validate(&self) -> Result<(), FormError> {
        Step::ALL
            .iter()
            .try_for_each(|step| self.validate_step(*step))
    }

    pub fn load(path: &Path) -> Result<Self, FormError> {
        let content = fs::read_to_string(path).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let form: InitiativeForm = toml::from_str(&content)?;
        info!("loaded form from {}", path.display());
        Ok(form)
    }

    pub fn save(&self, path: &Path) -> Result<(), FormError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| FormError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("saved form to {}", path.display());
        Ok(())
    }
}
