//! 재무 투영 엔진 회귀 테스트.
use initiative_evaluator::projection::{
    compute_projection, validate_intervals, GrowthInterval, IntervalError, ProjectionError,
    ProjectionInput, MAX_TIMELINE_YEARS,
};
use proptest::prelude::*;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "actual={actual} expected={expected}"
    );
}

fn growth_example() -> ProjectionInput {
    ProjectionInput {
        timeline_length: 5,
        ramp_up: 1.0,
        base_revenue: 1000.0,
        annual_savings: 0.0,
        annual_operating_cost: 0.0,
        initial_investment: 1000.0,
        growth_intervals: vec![GrowthInterval::new(2.0, 5.0, 10.0)],
    }
}

#[test]
fn revenue_compounds_after_ramp_up() {
    let res = growth_example().evaluate().expect("valid input");
    let revenue: Vec<f64> = res.years.iter().map(|y| y.revenue).collect();
    let expected = [0.0, 0.0, 1000.0, 1100.0, 1210.0, 1331.0];
    assert_eq!(revenue.len(), expected.len());
    for (a, e) in revenue.iter().zip(expected) {
        assert_close(*a, e);
    }
    assert_close(res.total_profit, 3641.0);
    assert_close(res.total_cost, 1000.0);
    assert_close(res.roi_percent.expect("cost is positive"), 364.1);
}

#[test]
fn breakeven_interpolates_between_years() {
    let res = growth_example().evaluate().expect("valid input");
    // 누적 이익: -1000, -1000, 0 → 2년차에 정확히 회수
    assert_close(res.breakeven_year.expect("pays back"), 2.0);

    let mut input = growth_example();
    input.initial_investment = 1500.0;
    let res = compute_projection(&input);
    // -1500, -1500, -500, 600 → 2 + 500/1100
    assert_close(res.breakeven_year.expect("pays back"), 2.0 + 500.0 / 1100.0);
}

#[test]
fn cost_only_never_breaks_even() {
    let input = ProjectionInput {
        timeline_length: 6,
        ramp_up: 0.0,
        base_revenue: 0.0,
        annual_savings: 0.0,
        annual_operating_cost: 1000.0,
        initial_investment: 5000.0,
        growth_intervals: Vec::new(),
    };
    let res = input.evaluate().expect("valid input");
    assert!(res.breakeven_year.is_none());
    for pair in res.years.windows(2) {
        assert!(pair[1].cumulative_profit < pair[0].cumulative_profit);
    }
    assert_close(res.total_cost, 11_000.0);
    assert_close(res.roi_percent.expect("cost is positive"), -100.0);
}

#[test]
fn ramp_up_covering_whole_horizon_leaves_only_investment() {
    let input = ProjectionInput {
        timeline_length: 1,
        ramp_up: 1.0,
        base_revenue: 800.0,
        annual_savings: 200.0,
        annual_operating_cost: 100.0,
        initial_investment: 2500.0,
        growth_intervals: Vec::new(),
    };
    let res = input.evaluate().expect("valid input");
    assert_eq!(res.years.len(), 2);
    let last = res.years[1];
    assert_eq!((last.revenue, last.savings, last.cost), (0.0, 0.0, 0.0));
    assert_close(res.total_profit, -2500.0);
    assert_close(res.roi_percent.expect("cost is positive"), -100.0);
    assert!(res.breakeven_year.is_none());
}

#[test]
fn zero_cost_leaves_roi_undefined() {
    let input = ProjectionInput {
        timeline_length: 3,
        ramp_up: 0.0,
        base_revenue: 100.0,
        annual_savings: 0.0,
        annual_operating_cost: 0.0,
        initial_investment: 0.0,
        growth_intervals: Vec::new(),
    };
    let res = input.evaluate().expect("valid input");
    assert!(res.roi_percent.is_none());
    // 누적 이익이 음수였던 적이 없으므로 손익분기도 없다
    assert!(res.breakeven_year.is_none());
    assert_close(res.total_profit, 300.0);
}

#[test]
fn fractional_ramp_up_starts_revenue_in_next_whole_year() {
    let input = ProjectionInput {
        timeline_length: 4,
        ramp_up: 1.5,
        base_revenue: 500.0,
        annual_savings: 50.0,
        annual_operating_cost: 0.0,
        initial_investment: 0.0,
        growth_intervals: vec![GrowthInterval::new(3.0, 4.0, 20.0)],
    };
    let res = input.evaluate().expect("valid input");
    assert_close(res.years[1].revenue, 0.0);
    assert_close(res.years[2].revenue, 500.0);
    assert_close(res.years[2].savings, 50.0);
    assert_close(res.years[3].revenue, 600.0);
    assert_close(res.years[4].revenue, 720.0);
}

#[test]
fn zero_base_revenue_still_ends_ramp_up() {
    let input = ProjectionInput {
        timeline_length: 3,
        ramp_up: 1.0,
        base_revenue: 0.0,
        annual_savings: 400.0,
        annual_operating_cost: 100.0,
        initial_investment: 600.0,
        growth_intervals: vec![GrowthInterval::new(2.0, 3.0, 50.0)],
    };
    let res = compute_projection(&input);
    assert_close(res.years[2].revenue, 0.0);
    assert_close(res.years[3].revenue, 0.0);
    assert_close(res.years[2].profit, 300.0);
    // -600, -600, -300, 0
    assert_close(res.breakeven_year.expect("pays back"), 3.0);
}

#[test]
fn gap_between_intervals_uses_zero_rate() {
    let input = ProjectionInput {
        timeline_length: 6,
        ramp_up: 0.0,
        base_revenue: 100.0,
        annual_savings: 0.0,
        annual_operating_cost: 0.0,
        initial_investment: 0.0,
        growth_intervals: vec![
            GrowthInterval::new(1.0, 2.0, 100.0),
            GrowthInterval::new(5.0, 6.0, 50.0),
        ],
    };
    let res = input.evaluate().expect("valid input");
    let revenue: Vec<f64> = res.years.iter().map(|y| y.revenue).collect();
    for (a, e) in revenue.iter().zip([0.0, 100.0, 200.0, 200.0, 200.0, 300.0, 450.0]) {
        assert_close(*a, e);
    }
}

#[test]
fn overlapping_intervals_rejected() {
    let intervals = [
        GrowthInterval::new(1.0, 5.0, 10.0),
        GrowthInterval::new(3.0, 6.0, 5.0),
    ];
    let err = validate_intervals(&intervals, 0.0, 10).unwrap_err();
    assert_eq!(
        err,
        IntervalError::Overlap {
            index: 1,
            start: 3.0,
            previous_end: 5.0
        }
    );
    assert!(err.to_string().contains("성장 구간 2"));
}

#[test]
fn adjacent_intervals_accepted() {
    let intervals = [
        GrowthInterval::new(1.0, 5.0, 10.0),
        GrowthInterval::new(6.0, 10.0, 5.0),
    ];
    assert!(validate_intervals(&intervals, 0.0, 10).is_ok());
}

#[test]
fn interval_outside_horizon_rejected() {
    let before_ramp = [GrowthInterval::new(1.0, 3.0, 5.0)];
    assert!(matches!(
        validate_intervals(&before_ramp, 2.0, 5),
        Err(IntervalError::Range { index: 0, .. })
    ));

    let past_end = [
        GrowthInterval::new(1.0, 2.0, 5.0),
        GrowthInterval::new(3.0, 7.0, 5.0),
    ];
    assert!(matches!(
        validate_intervals(&past_end, 0.0, 5),
        Err(IntervalError::Range { index: 1, .. })
    ));

    let reversed = [GrowthInterval::new(4.0, 2.0, 5.0)];
    assert!(validate_intervals(&reversed, 0.0, 5).is_err());
}

#[test]
fn evaluate_blocks_invalid_input() {
    let mut input = growth_example();
    input.growth_intervals.push(GrowthInterval::new(4.0, 5.0, 1.0));
    assert!(matches!(
        input.evaluate(),
        Err(ProjectionError::Interval(IntervalError::Overlap { .. }))
    ));

    let mut input = growth_example();
    input.timeline_length = 0;
    assert_eq!(input.evaluate(), Err(ProjectionError::EmptyTimeline));

    let mut input = growth_example();
    input.ramp_up = 6.0;
    assert!(matches!(
        input.evaluate(),
        Err(ProjectionError::RampUpOutOfRange { .. })
    ));

    let mut input = growth_example();
    input.annual_operating_cost = -1.0;
    assert!(matches!(
        input.evaluate(),
        Err(ProjectionError::InvalidAmount {
            field: "annual_operating_cost",
            ..
        })
    ));
}

#[test]
fn timeline_longer_than_limit_rejected() {
    let mut input = growth_example();
    input.timeline_length = u32::MAX;
    assert_eq!(
        input.validate(),
        Err(ProjectionError::TimelineTooLong {
            timeline_length: u32::MAX,
            max: MAX_TIMELINE_YEARS
        })
    );

    input.timeline_length = MAX_TIMELINE_YEARS;
    let res = input.evaluate().expect("limit itself is allowed");
    assert_eq!(res.years.len(), MAX_TIMELINE_YEARS as usize + 1);
}

#[test]
fn non_finite_growth_rate_rejected() {
    for rate in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let mut input = growth_example();
        input.growth_intervals[0].rate_percent = rate;
        assert!(matches!(
            input.evaluate(),
            Err(ProjectionError::Interval(IntervalError::Rate { index: 0, .. }))
        ));
    }
}

#[test]
fn nan_rate_in_toml_blocked_before_computation() {
    let text = r#"
timeline_length = 5
ramp_up = 1.0
base_revenue = 1000.0
annual_savings = 0.0
annual_operating_cost = 0.0
initial_investment = 1000.0

[[growth_intervals]]
start = 2.0
end = 5.0
rate_percent = nan
"#;
    let input: ProjectionInput = toml::from_str(text).expect("nan is valid TOML");
    assert!(input.growth_intervals[0].rate_percent.is_nan());
    assert!(input.evaluate().is_err());
}

#[test]
fn toml_round_trip_recomputes_identically() {
    let input = growth_example();
    let text = toml::to_string(&input).expect("serialize");
    let back: ProjectionInput = toml::from_str(&text).expect("deserialize");
    assert_eq!(back, input);
    assert_eq!(compute_projection(&back), compute_projection(&input));
}

#[test]
fn recomputation_is_idempotent() {
    let input = growth_example();
    assert_eq!(compute_projection(&input), compute_projection(&input));
}

fn valid_input() -> impl Strategy<Value = ProjectionInput> {
    (1u32..40)
        .prop_flat_map(|n| {
            (
                Just(n),
                0u32..=n,
                0.0f64..1e6,
                0.0f64..1e5,
                0.0f64..1e5,
                0.0f64..1e6,
                -50.0f64..50.0,
            )
        })
        .prop_map(|(n, ramp, base, savings, opex, invest, rate)| {
            let growth_intervals = if ramp < n {
                vec![GrowthInterval::new(f64::from(ramp), f64::from(n), rate)]
            } else {
                Vec::new()
            };
            ProjectionInput {
                timeline_length: n,
                ramp_up: f64::from(ramp),
                base_revenue: base,
                annual_savings: savings,
                annual_operating_cost: opex,
                initial_investment: invest,
                growth_intervals,
            }
        })
}

proptest! {
    #[test]
    fn cumulative_cost_never_decreases(input in valid_input()) {
        prop_assert!(input.validate().is_ok());
        let res = compute_projection(&input);
        prop_assert_eq!(res.years.len(), input.timeline_length as usize + 1);
        for pair in res.years.windows(2) {
            prop_assert!(pair[1].cumulative_cost >= pair[0].cumulative_cost);
        }
    }

    #[test]
    fn cumulative_profit_is_prefix_sum(input in valid_input()) {
        let res = compute_projection(&input);
        let mut sum = 0.0;
        for y in &res.years {
            sum += y.profit;
            prop_assert_eq!(y.cumulative_profit, sum);
            prop_assert_eq!(y.profit, y.revenue + y.savings - y.cost);
        }
        prop_assert_eq!(res.total_profit, sum);
    }

    #[test]
    fn flat_rate_keeps_base_revenue(n in 1u32..40, base in 0.0f64..1e6) {
        let input = ProjectionInput {
            timeline_length: n,
            ramp_up: 0.0,
            base_revenue: base,
            annual_savings: 0.0,
            annual_operating_cost: 0.0,
            initial_investment: 0.0,
            growth_intervals: vec![GrowthInterval::new(0.0, f64::from(n), 0.0)],
        };
        let res = input.evaluate().expect("valid input");
        for y in &res.years[1..] {
            prop_assert_eq!(y.revenue, base);
        }
    }

    #[test]
    fn breakeven_lies_within_horizon(input in valid_input()) {
        let res = compute_projection(&input);
        if let Some(b) = res.breakeven_year {
            prop_assert!(b > 0.0 && b <= f64::from(input.timeline_length));
        }
    }
}
