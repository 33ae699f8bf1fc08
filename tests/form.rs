//! 질문지 폼 검증 및 TOML 저장/불러오기 테스트.
use initiative_evaluator::costs::CostEstimate;
use initiative_evaluator::form::{Decision, FormError, InitiativeForm, Step};
use initiative_evaluator::projection::{GrowthInterval, IntervalError, ProjectionError};
use initiative_evaluator::risk::{RiskEntry, RiskError};
use initiative_evaluator::scoring::WeightError;
use pretty_assertions::assert_eq;

fn filled_form() -> InitiativeForm {
    let mut form = InitiativeForm::default();
    form.project.name = "Predictive maintenance".into();
    form.project.owner = "Operations".into();
    form.project.description = "Sensor-based failure prediction".into();
    form.strategy.goals = vec!["Reduce downtime".into(), "Lower repair cost".into()];
    form.strategy.kpis = vec!["MTBF".into()];
    form.costs = CostEstimate {
        development_cost: 40_000.0,
        operating_cost_per_year: 5_000.0,
        risk_budget: 10_000.0,
    };
    form.revenue.timeline_years = 5;
    form.revenue.ramp_up_years = 1.0;
    form.revenue.base_revenue = 30_000.0;
    form.revenue.annual_savings = 8_000.0;
    form.revenue.growth_intervals = vec![
        GrowthInterval::new(2.0, 3.0, 10.0),
        GrowthInterval::new(4.0, 5.0, 5.0),
    ];
    form.risks.entries = vec![
        RiskEntry::new("Sensor data quality", 60, 7),
        RiskEntry::new("Vendor lock-in", 20, 4),
    ];
    form.decision.decision = Decision::Go;
    form.decision.reasoning = "Pays back within three years".into();
    form.implementation.roles = vec!["Data engineer".into()];
    form
}

#[test]
fn filled_form_passes_every_step() {
    let form = filled_form();
    for step in Step::ALL {
        assert!(form.validate_step(step).is_ok(), "step {step:?}");
    }
    assert!(form.validate().is_ok());
}

#[test]
fn projection_input_combines_costs_and_revenue() {
    let input = filled_form().to_projection_input();
    assert_eq!(input.timeline_length, 5);
    assert_eq!(input.initial_investment, 50_000.0);
    assert_eq!(input.annual_operating_cost, 5_000.0);
    assert_eq!(input.growth_intervals.len(), 2);
}

#[test]
fn missing_name_blocks_first_step() {
    let mut form = filled_form();
    form.project.name = "  ".into();
    let err = form.validate().unwrap_err();
    assert!(matches!(
        err,
        FormError::MissingField {
            step: Step::ProjectInfo,
            field: "name"
        }
    ));
    assert_eq!(err.step(), Some(Step::ProjectInfo));
}

#[test]
fn overlapping_growth_reported_on_revenue_step() {
    let mut form = filled_form();
    form.revenue.growth_intervals[1].start = 3.0;
    let err = form.validate_step(Step::Revenue).unwrap_err();
    assert!(matches!(
        err,
        FormError::Projection(ProjectionError::Interval(IntervalError::Overlap {
            index: 1,
            ..
        }))
    ));
    assert_eq!(err.step(), Some(Step::Revenue));
}

#[test]
fn score_out_of_range_rejected() {
    let mut form = filled_form();
    form.feasibility.technical_skills = 11;
    let err = form.validate().unwrap_err();
    assert!(matches!(
        err,
        FormError::Score {
            field: "technical_skills",
            value: 11
        }
    ));
    assert_eq!(err.step(), Some(Step::Feasibility));
}

#[test]
fn incomplete_risk_rejected() {
    let mut form = filled_form();
    form.risks.entries.push(RiskEntry::default());
    let err = form.validate_step(Step::Risks).unwrap_err();
    assert!(matches!(
        err,
        FormError::Risk(RiskError::MissingDescription { index: 2 })
    ));
}

#[test]
fn weights_must_sum_to_hundred() {
    let mut form = filled_form();
    form.weights.scalability = 30.0;
    let err = form.validate_step(Step::UtilityAnalysis).unwrap_err();
    assert!(matches!(err, FormError::Weights(WeightError::Sum { .. })));
}

#[test]
fn negative_cost_rejected_on_cost_step() {
    let mut form = filled_form();
    form.costs.development_cost = -5.0;
    assert_eq!(
        form.validate_step(Step::Costs).unwrap_err().step(),
        Some(Step::Costs)
    );
}

#[test]
fn save_and_load_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("initiative.toml");
    let form = filled_form();
    form.save(&path).expect("save");
    let loaded = InitiativeForm::load(&path).expect("load");
    assert_eq!(loaded, form);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("partial.toml");
    std::fs::write(
        &path,
        "[project]\nname = \"Chatbot\"\nowner = \"Support\"\n\n[revenue]\ntimeline_years = 3\n",
    )
    .expect("write");
    let form = InitiativeForm::load(&path).expect("load");
    assert_eq!(form.project.name, "Chatbot");
    assert_eq!(form.revenue.timeline_years, 3);
    assert_eq!(form.feasibility.data_availability, 5);
    assert_eq!(form.weights.total(), 100.0);
    assert_eq!(form.decision.decision, Decision::Undecided);
    assert!(form.validate().is_ok());
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.toml");
    let err = InitiativeForm::load(&path).unwrap_err();
    assert!(matches!(err, FormError::Io { .. }));
    assert!(err.to_string().contains("absent.toml"));
    assert_eq!(err.step(), None);
}
