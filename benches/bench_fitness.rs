use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use lsystem_evolver::{
    chromosome::Chromosome,
    evolution::{caching_challenge::CachingChallenge, CacheType, Challenge},
    fitness::GrammarChallenge,
    rng::RandomNumberGenerator,
    symbol::parse_symbols,
};

fn bench_single_rule(c: &mut Criterion) {
    let candidate = Chromosome::from_rule("F[+G][-G][+G][-G]").unwrap();

    let mut group = c.benchmark_group("score_single_rule");
    for iterations in [1, 3, 5] {
        let challenge = GrammarChallenge::new(parse_symbols("G").unwrap(), iterations);
        group.bench_with_input(
            BenchmarkId::from_parameter(iterations),
            &iterations,
            |b, _| b.iter(|| challenge.score(black_box(&candidate))),
        );
    }
    group.finish();
}

fn bench_random_rules(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(0);
    let candidates: Vec<Chromosome> = (0..500).map(|_| Chromosome::random(15, &mut rng)).collect();
    let challenge = GrammarChallenge::new(parse_symbols("G").unwrap(), 5);

    let mut group = c.benchmark_group("score_random_rules");
    for cache_type in [CacheType::None, CacheType::Global, CacheType::ThreadLocal] {
        let wrapped = challenge.with_cache(cache_type);
        group.bench_function(format!("{:?}", cache_type), |b| {
            b.iter(|| {
                candidates
                    .iter()
                    .map(|candidate| wrapped.score(black_box(candidate)))
                    .sum::<f64>()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_rule, bench_random_rules);
criterion_main!(benches);
