use outbreak_core::{
    config::SimConfig,
    engine::SimEngine,
    models::ModelKind,
    report::RoundReport,
};

fn run(kind: ModelKind, years: u32, threads: usize, initial: bool) -> (Vec<RoundReport>, SimEngine) {
    let config = SimConfig::builder(kind.spec().unwrap())
        .years(years)
        .threads(threads)
        .emit_initial_state(initial)
        .build()
        .unwrap();
    let mut engine = SimEngine::new(config);
    let mut reports = Vec::new();
    engine.run(&mut reports).unwrap();
    (reports, engine)
}

#[test]
fn twelve_reports_per_simulated_year() {
    for kind in ModelKind::ALL {
        let tasks = kind.spec().unwrap().task_count();
        for years in [1, 3] {
            for threads in [1, tasks] {
                let (reports, _) = run(kind, years, threads, false);
                assert_eq!(reports.len(), 12 * years as usize, "{kind} years={years} threads={threads}");
            }
        }
    }
}

#[test]
fn zero_year_horizon_emits_nothing() {
    for threads in [1, 4] {
        let (reports, engine) = run(ModelKind::Sir, 0, threads, false);
        assert!(reports.is_empty());
        assert_eq!(engine.clock().current_year, engine.clock().start_year);
        assert_eq!(engine.compartments().snapshot(), vec![175_000, 10, 0]);
    }
}

#[test]
fn zero_year_horizon_skips_the_initial_report_too() {
    let (reports, _) = run(ModelKind::Sir, 0, 4, true);
    assert!(reports.is_empty());
}

#[test]
fn clock_stops_exactly_at_the_horizon() {
    let (_, engine) = run(ModelKind::Zombie, 2, 6, false);
    let clock = engine.clock();
    assert_eq!(clock.current_year, 2025);
    assert_eq!(clock.current_month, 0);
    assert!(!clock.is_running());
}

#[test]
fn reports_walk_the_calendar_in_order() {
    let (reports, _) = run(ModelKind::Zombie, 2, 6, false);
    for (i, report) in reports.iter().enumerate() {
        assert_eq!(report.round, i as u64 + 1);
        assert_eq!(report.linear_month, i as u64);
        assert_eq!(report.year, 2023 + (i / 12) as u32);
        assert_eq!(report.month, (i % 12) as u32 + 1);
    }
    assert_eq!(reports.last().unwrap().human_line().split(" - ").next(), Some("Year 2024, Month 12"));
}

#[test]
fn initial_state_report_keeps_the_total() {
    for threads in [1, 4] {
        let (reports, _) = run(ModelKind::Sir, 2, threads, true);
        assert_eq!(reports.len(), 24);

        let first = &reports[0];
        assert_eq!(first.round, 0);
        assert_eq!(first.linear_month, 0);
        assert_eq!(first.values(), vec![175_000, 10, 0]);

        // The first computed round lands on the second month.
        assert_eq!(reports[1].round, 1);
        assert_eq!(reports[1].linear_month, 1);
        assert_eq!(reports[1].values(), vec![174_996, 70_010, 0]);
    }
}

#[test]
fn summary_counts_every_report() {
    let config = SimConfig::builder(ModelKind::Sqeir.spec().unwrap())
        .years(1)
        .emit_initial_state(true)
        .build()
        .unwrap();
    let mut reports: Vec<RoundReport> = Vec::new();
    let summary = SimEngine::new(config).run(&mut reports).unwrap();
    assert_eq!(summary.rounds, 12);
    assert_eq!(summary.model, "sqeir");
    assert_eq!(summary.clock.current_year, 1);
}

#[test]
fn a_finished_engine_does_not_run_again() {
    let config = SimConfig::for_model(ModelKind::Sir).unwrap();
    let mut engine = SimEngine::new(config);
    let mut first: Vec<RoundReport> = Vec::new();
    engine.run(&mut first).unwrap();
    let mut second: Vec<RoundReport> = Vec::new();
    let summary = engine.run(&mut second).unwrap();
    assert_eq!(first.len(), 24);
    assert!(second.is_empty());
    assert_eq!(summary.rounds, 0);
}
