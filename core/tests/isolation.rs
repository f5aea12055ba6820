//! Rules read the round they were computed from, never a neighbour's
//! freshly committed value, and no compartment ever goes negative.

use outbreak_core::{
    compartment::CompartmentDef,
    config::SimConfig,
    engine::SimEngine,
    model::ModelSpec,
    models::ModelKind,
    rates::RateDef,
    report::RoundReport,
    rule::{Term, UpdateRule},
};

const A: usize = 0;
const B: usize = 1;
const C: usize = 2;

/// Every round, A and B trade their whole populations. C copies A.
fn swap_model() -> ModelSpec {
    ModelSpec::new(
        "swap",
        vec![
            CompartmentDef::new("a", "A", 10),
            CompartmentDef::new("b", "B", 3),
            CompartmentDef::new("c", "C", 0),
        ],
        vec![RateDef::new("all", 1.0)],
        vec![
            UpdateRule::new(A, vec![Term::inflow(B, &[0]), Term::outflow(A, &[0])]),
            UpdateRule::new(B, vec![Term::inflow(A, &[0]), Term::outflow(B, &[0])]),
            UpdateRule::new(C, vec![Term::inflow(A, &[0]), Term::outflow(C, &[0])]),
        ],
        0,
        1,
    )
    .unwrap()
}

fn run(spec: ModelSpec, threads: usize) -> Vec<RoundReport> {
    let config = SimConfig::builder(spec).threads(threads).build().unwrap();
    let mut reports = Vec::new();
    SimEngine::new(config).run(&mut reports).unwrap();
    reports
}

#[test]
fn every_rule_sees_the_previous_round() {
    for threads in [1, 4] {
        let reports = run(swap_model(), threads);
        assert_eq!(reports.len(), 12);
        for (i, report) in reports.iter().enumerate() {
            let expected = if i % 2 == 0 { vec![3, 10, 10] } else { vec![10, 3, 3] };
            assert_eq!(report.values(), expected, "round {} with {threads} threads", i + 1);
        }
    }
}

#[test]
fn rule_order_does_not_matter() {
    let mut spec = swap_model();
    spec.rules.reverse();
    let reversed = ModelSpec::new(
        spec.name,
        spec.compartments,
        spec.rates,
        spec.rules,
        spec.start_year,
        spec.default_years,
    )
    .unwrap();
    assert_eq!(run(reversed, 4), run(swap_model(), 4));
}

#[test]
fn overdrawn_compartment_commits_zero() {
    let spec = ModelSpec::new(
        "drain",
        vec![
            CompartmentDef::new("pool", "Pool", 100),
            CompartmentDef::new("sink", "Sink", 0),
        ],
        vec![RateDef::new("drain_rate", 2.0)],
        vec![
            UpdateRule::new(0, vec![Term::outflow(0, &[0])]),
            UpdateRule::new(1, vec![Term::inflow(0, &[0])]),
        ],
        0,
        1,
    )
    .unwrap();
    for threads in [1, 3] {
        let reports = run(spec.clone(), threads);
        // 100 - 200 clamps to 0; the sink still receives the full term.
        assert_eq!(reports[0].values(), vec![0, 200]);
        assert_eq!(reports[1].values(), vec![0, 200]);
    }
}

#[test]
fn built_in_models_survive_extreme_rates() {
    for kind in ModelKind::ALL {
        let spec = kind.spec().unwrap();
        let mut builder = SimConfig::builder(spec.clone()).years(3);
        for rate in &spec.rates {
            builder = builder.rate(rate.name, 5.0);
        }
        let mut reports: Vec<RoundReport> = Vec::new();
        SimEngine::new(builder.build().unwrap()).run(&mut reports).unwrap();
        assert_eq!(reports.len(), 36, "{kind}");
    }
}

#[test]
fn sir_susceptibles_clamp_at_zero() {
    let config = SimConfig::builder(ModelKind::Sir.spec().unwrap())
        .rate("infection_rate", 5.0)
        .years(1)
        .build()
        .unwrap();
    let mut reports: Vec<RoundReport> = Vec::new();
    SimEngine::new(config).run(&mut reports).unwrap();
    // S: 175000 - 50 = 174950, then 174950 - 5 × 875010 clamps to 0.
    assert_eq!(reports[0].value_of("Susceptible"), Some(174_950));
    assert_eq!(reports[1].value_of("Susceptible"), Some(0));
    assert!(reports[2..].iter().all(|r| r.value_of("Susceptible") == Some(0)));
}
