use lsystem_evolver::{
    chromosome::Chromosome,
    evolution::{
        CacheType, EvolutionOptions, Population, RecordReason, RunController, RunReport, RunState,
    },
    rng::RandomNumberGenerator,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn options(generation_limit: usize, goal_fitness: f64) -> EvolutionOptions {
    EvolutionOptions::builder()
        .population_size(40)
        .chromosome_length(15)
        .elite_count(4)
        .iterations(3)
        .generation_limit(generation_limit)
        .goal_fitness(goal_fitness)
        .build()
        .unwrap()
}

fn run(options: EvolutionOptions, seed: u64) -> RunReport {
    RunController::new(options, RandomNumberGenerator::from_seed(seed))
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn test_single_generation_limit() {
    init_tracing();
    let report = run(options(1, 1e12), 1);

    assert_eq!(report.final_state, RunState::LimitReached);
    assert_eq!(report.generations, 1);
    assert_eq!(report.history.len(), 1);
    assert_eq!(report.history.get(0).map(<[f64]>::len), Some(40));
    // Stride 10 never fires and the goal is out of reach.
    assert!(report.best_individuals.is_empty());
    assert!(report.best_rules().is_empty());
}

#[test]
fn test_snapshot_at_stride() {
    init_tracing();
    let report = run(options(10, 1e12), 2);

    assert_eq!(report.final_state, RunState::LimitReached);
    assert_eq!(report.generations, 10);
    assert_eq!(report.history.len(), 10);
    assert_eq!(report.best_individuals.len(), 1);

    let snapshot = &report.best_individuals[0];
    assert_eq!(snapshot.generation, 10);
    assert_eq!(snapshot.reason, RecordReason::Snapshot);
    assert_eq!(snapshot.chromosome.len(), 15);

    // The snapshot is the best of the population that generation 10 advanced.
    let stats = report.generation_stats();
    assert_eq!(stats.len(), 10);
    assert_eq!(snapshot.score, stats[9].max);
    assert_eq!(report.best_rules(), vec![snapshot.chromosome.to_rule()]);
}

#[test]
fn test_minimum_goal_stops_after_streak() {
    init_tracing();
    // Bracket-free rules stay disqualified under crossover and inversion.
    let population = Population::new(vec![Chromosome::from_rule(&"F".repeat(15)).unwrap(); 40])
        .unwrap();
    let report = RunController::with_population(
        options(100, 1.0),
        population,
        RandomNumberGenerator::from_seed(3),
    )
    .unwrap()
    .run()
    .unwrap();

    assert_eq!(report.final_state, RunState::GoalReached);
    assert_eq!(report.generations, 2);
    assert_eq!(report.history.len(), 2);
    let generations: Vec<usize> = report
        .best_individuals
        .iter()
        .map(|r| r.generation)
        .collect();
    assert_eq!(generations, vec![1, 2]);
    assert!(report
        .best_individuals
        .iter()
        .all(|r| r.reason == RecordReason::GoalHit && r.score == 1.0));
}

#[test]
fn test_seeded_runs_are_reproducible() {
    init_tracing();
    let first = run(options(12, 1e12), 99);
    let second = run(options(12, 1e12), 99);

    assert_eq!(first, second);
}

#[test]
fn test_cache_type_does_not_change_results() {
    init_tracing();
    let with_cache = |cache_type| {
        let options = EvolutionOptions::builder()
            .population_size(30)
            .chromosome_length(12)
            .elite_count(3)
            .iterations(2)
            .generation_limit(5)
            .goal_fitness(1e12)
            .snapshot_stride(1)
            .cache_type(cache_type)
            .build()
            .unwrap();
        run(options, 7)
    };

    let reference = with_cache(CacheType::None);
    assert_eq!(with_cache(CacheType::Global), reference);
    assert_eq!(with_cache(CacheType::ThreadLocal), reference);
    assert_eq!(reference.best_individuals.len(), 5);
}

fn branching_run(goal_fitness: f64, generation_limit: usize) -> RunReport {
    let rule = "F[+G][-G][+G][-G]";
    // Every slot is an elite, so the population never changes and scores 102.
    let options = EvolutionOptions::builder()
        .population_size(10)
        .chromosome_length(rule.len())
        .elite_count(10)
        .iterations(1)
        .generation_limit(generation_limit)
        .goal_fitness(goal_fitness)
        .build()
        .unwrap();
    let seed = Chromosome::from_rule(rule).unwrap();
    let population = Population::new(vec![seed; 10]).unwrap();

    RunController::with_population(options, population, RandomNumberGenerator::from_seed(5))
        .unwrap()
        .run()
        .unwrap()
}

#[test]
fn test_exact_goal_is_reached() {
    init_tracing();
    let report = branching_run(102.0, 50);

    assert_eq!(report.final_state, RunState::GoalReached);
    assert_eq!(report.generations, 2);
    assert_eq!(report.history.get(0), Some(&[102.0; 10][..]));
    assert_eq!(
        report.best_rules(),
        vec!["F[+G][-G][+G][-G]".to_string(), "F[+G][-G][+G][-G]".to_string()]
    );
}

#[test]
fn test_score_above_goal_is_not_a_hit() {
    init_tracing();
    let report = branching_run(100.0, 5);

    assert_eq!(report.final_state, RunState::LimitReached);
    assert_eq!(report.generations, 5);
    assert!(report.best_individuals.is_empty());
}

#[test]
fn test_stepwise_matches_run() {
    init_tracing();
    let mut controller =
        RunController::new(options(4, 1e12), RandomNumberGenerator::from_seed(8)).unwrap();
    let mut states = Vec::new();
    while !controller.state().is_terminal() {
        states.push(controller.step().unwrap());
    }

    assert_eq!(
        states,
        vec![
            RunState::Running,
            RunState::Running,
            RunState::Running,
            RunState::LimitReached
        ]
    );
    assert_eq!(controller.report(), run(options(4, 1e12), 8));
}

#[cfg(feature = "serde")]
#[test]
fn test_report_serde_round_trip() {
    let report = run(options(10, 1e12), 4);

    let json = serde_json::to_string(&report).unwrap();
    let restored: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.final_state, report.final_state);
    assert_eq!(restored.generations, report.generations);
    assert_eq!(restored.best_rules(), report.best_rules());
    assert_eq!(restored.history.len(), report.history.len());
    for (restored, original) in restored.history.iter().zip(report.history.iter()) {
        for (a, b) in restored.iter().zip(original) {
            assert!((a - b).abs() <= 1e-9 * b.abs());
        }
    }

    let options_json = serde_json::to_string(&options(3, 50.0)).unwrap();
    let restored_options: EvolutionOptions = serde_json::from_str(&options_json).unwrap();
    assert_eq!(restored_options.get_generation_limit(), 3);
    assert!(restored_options.validate().is_ok());
}
