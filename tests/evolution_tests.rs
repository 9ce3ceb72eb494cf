#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use gembots::brain::{Activation, CrossoverKind, Layer, MutationKind, Network, Neuron, WeightRange};
use gembots::evolution::{
    Bot, EvolutionEngine, GenerationConfig, GenerationReport, History, Individual,
    MatingSchedule, Remainder, run_generation, selection,
};
use gembots::{Error, ErrorKind, Params};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn random_genome(seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    Network::new_random(
        &[4, 3, 1],
        8,
        WeightRange::default(),
        Activation::Sigmoid,
        &mut rng,
    )
    .unwrap()
}

fn population(fitness: &[f64]) -> Vec<Bot> {
    fitness
        .iter()
        .enumerate()
        .map(|(i, &strength)| {
            let mut bot = Bot::new(format!("bot{i}"), random_genome(i as u64));
            bot.strength = strength;
            bot
        })
        .collect()
}

/// Single-neuron genome whose weights are all `value`.
fn constant_genome(value: f32) -> Network {
    let neuron = Neuron::new(vec![value; 5], Activation::Identity).unwrap();
    Network::new(vec![Layer::new(vec![neuron]).unwrap()]).unwrap()
}

fn report(breeder_mean: f64, best_fitness: f64) -> GenerationReport {
    GenerationReport {
        breeder_mean,
        best_fitness,
        population_mean: 0.0,
        breeder_diversity: 0.0,
        breeders: 2,
        offspring: 4,
        dropped: 0,
        mutated_weights: 0,
    }
}

#[test]
fn test_rank_is_descending_and_stable() {
    let bots = population(&[3.0, 9.0, 1.0, 9.0]);
    assert_eq!(selection::rank(&bots).unwrap(), vec![1, 3, 0, 2]);
}

#[test]
fn test_select_top_two_keeps_tie_order() {
    let bots = population(&[3.0, 9.0, 1.0, 9.0]);
    let best = selection::select(&bots, 2).unwrap();

    assert_eq!(best, vec![1, 3]);
    assert!(best.iter().all(|&i| bots[i].fitness() == 9.0));
    assert_eq!(selection::mean_fitness(&bots, &best), 9.0);
}

#[test]
fn test_selection_rejects_bad_input() {
    let bots = population(&[1.0, f64::NAN, 2.0]);
    assert!(matches!(
        selection::rank(&bots),
        Err(Error::NanFitness { index: 1 })
    ));

    let bots = population(&[1.0, 2.0]);
    assert!(matches!(selection::select(&bots, 0), Err(Error::NoBreeders)));
    assert!(matches!(
        selection::select(&bots, 3),
        Err(Error::SelectCountExceedsPopulation {
            requested: 3,
            available: 2
        })
    ));

    let empty: Vec<Bot> = Vec::new();
    assert!(matches!(
        selection::rank(&empty),
        Err(Error::EmptyPopulation)
    ));
}

#[test]
fn test_mating_schedule_is_balanced() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let schedule = MatingSchedule::build(3, 9, Remainder::Truncate, &mut rng).unwrap();

        assert_eq!(schedule.len(), 9);
        assert_eq!(schedule.lead_counts(3), vec![3, 3, 3]);
        assert!(schedule.pairs().iter().all(|&(a, b)| a != b && b < 3));
        assert_eq!(schedule.dropped(), 0);
    }
}

#[test]
fn test_mating_schedule_truncates_remainder() {
    let mut rng = StdRng::seed_from_u64(1);
    let schedule = MatingSchedule::build(3, 10, Remainder::Truncate, &mut rng).unwrap();

    assert_eq!(schedule.len(), 9);
    assert_eq!(schedule.dropped(), 1);
}

#[test]
fn test_mating_schedule_fills_remainder() {
    let mut rng = StdRng::seed_from_u64(2);
    let schedule = MatingSchedule::build(3, 11, Remainder::Fill, &mut rng).unwrap();

    assert_eq!(schedule.len(), 11);
    assert_eq!(schedule.lead_counts(3), vec![4, 4, 3]);
    assert_eq!(schedule.dropped(), 0);
}

#[test]
fn test_mating_partners_are_uniform() {
    let mut rng = StdRng::seed_from_u64(3);
    let schedule = MatingSchedule::build(4, 4000, Remainder::Truncate, &mut rng).unwrap();

    let mut partners = [[0usize; 4]; 4];
    for &(a, b) in schedule.pairs() {
        partners[a][b] += 1;
    }
    for (first, row) in partners.iter().enumerate() {
        assert_eq!(row[first], 0);
        for (partner, &count) in row.iter().enumerate() {
            if partner != first {
                // 1000 draws over 3 partners
                assert!(count > 250 && count < 420, "{first}->{partner}: {count}");
            }
        }
    }
}

#[test]
fn test_mating_schedule_rejects_degenerate_sizes() {
    let mut rng = StdRng::seed_from_u64(4);
    assert!(matches!(
        MatingSchedule::build(0, 5, Remainder::Truncate, &mut rng),
        Err(Error::NoBreeders)
    ));
    assert!(matches!(
        MatingSchedule::build(1, 5, Remainder::Truncate, &mut rng),
        Err(Error::SingleBreeder)
    ));
    assert!(matches!(
        MatingSchedule::build(3, 0, Remainder::Truncate, &mut rng),
        Err(Error::EmptyNextGeneration)
    ));
}

#[test]
fn test_generation_failure_leaves_population_untouched() {
    let mut rng = StdRng::seed_from_u64(5);
    let bots = population(&[3.0, 9.0, 1.0, 9.0]);
    let before = bots.clone();

    let err = run_generation(&bots, &GenerationConfig::new(0, 4), &mut rng).unwrap_err();
    assert!(matches!(err, Error::NoBreeders));
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(bots, before);

    let err = run_generation(&bots, &GenerationConfig::new(1, 4), &mut rng).unwrap_err();
    assert!(matches!(err, Error::SingleBreeder));

    let err = run_generation(&bots, &GenerationConfig::new(2, 0), &mut rng).unwrap_err();
    assert!(matches!(err, Error::EmptyNextGeneration));

    let empty: Vec<Bot> = Vec::new();
    let err = run_generation(&empty, &GenerationConfig::new(2, 4), &mut rng).unwrap_err();
    assert!(matches!(err, Error::EmptyPopulation));
}

#[test]
fn test_run_generation_produces_offspring_and_report() {
    let mut rng = StdRng::seed_from_u64(6);
    let bots = population(&[1.0, 6.0, 2.0, 5.0, 4.0, 3.0]);
    let before = bots.clone();

    let generation = run_generation(&bots, &GenerationConfig::new(3, 9), &mut rng).unwrap();

    assert_eq!(generation.offspring.len(), 9);
    for child in &generation.offspring {
        assert_eq!(child.topology(), bots[0].genome.topology());
    }

    let report = &generation.report;
    assert_eq!(report.breeder_mean, 5.0);
    assert_eq!(report.best_fitness, 6.0);
    assert_eq!(report.population_mean, 3.5);
    assert_eq!(report.breeders, 3);
    assert_eq!(report.offspring, 9);
    assert_eq!(report.dropped, 0);
    assert!(report.breeder_diversity > 0.0);

    assert_eq!(bots, before);
}

#[test]
fn test_run_generation_reports_truncation() {
    let mut rng = StdRng::seed_from_u64(7);
    let bots = population(&[1.0, 2.0, 3.0, 4.0]);

    let generation = run_generation(&bots, &GenerationConfig::new(3, 10), &mut rng).unwrap();
    assert_eq!(generation.offspring.len(), 9);
    assert_eq!(generation.report.dropped, 1);

    let mut config = GenerationConfig::new(3, 10);
    config.remainder = Remainder::Fill;
    let generation = run_generation(&bots, &config, &mut rng).unwrap();
    assert_eq!(generation.offspring.len(), 10);
}

#[test]
fn test_only_breeders_pass_on_genes() {
    let mut rng = StdRng::seed_from_u64(8);
    let mut bots = vec![
        Bot::new("weak", constant_genome(100.0)),
        Bot::new("strong", constant_genome(1.0)),
        Bot::new("stronger", constant_genome(2.0)),
    ];
    bots[1].strength = 10.0;
    bots[2].strength = 20.0;

    let mut config = GenerationConfig::new(2, 6);
    config.mutation_rate = 0.0;
    let generation = run_generation(&bots, &config, &mut rng).unwrap();

    for child in &generation.offspring {
        assert!(
            child
                .to_flat_vector()
                .iter()
                .all(|&w| w == 1.0 || w == 2.0)
        );
    }
}

#[test]
fn test_offspring_do_not_alias_parents() {
    let mut rng = StdRng::seed_from_u64(9);
    let bots = population(&[1.0, 2.0, 3.0]);
    let snapshots: Vec<Vec<f32>> = bots.iter().map(|b| b.genome.to_flat_vector()).collect();

    let mut generation = run_generation(&bots, &GenerationConfig::new(2, 4), &mut rng).unwrap();
    for child in &mut generation.offspring {
        child.mutate_rate(1.0, MutationKind::Redraw(WeightRange::default()), &mut rng);
    }

    for (bot, snapshot) in bots.iter().zip(&snapshots) {
        assert_eq!(&bot.genome.to_flat_vector(), snapshot);
    }
}

#[test]
fn test_mismatched_breeders_fail_crossover() {
    let mut rng = StdRng::seed_from_u64(10);
    let mut bots = population(&[1.0, 2.0]);
    bots[0].genome = constant_genome(0.5);

    let err = run_generation(&bots, &GenerationConfig::new(2, 2), &mut rng).unwrap_err();
    assert!(matches!(err, Error::TopologyMismatch));
}

#[test]
fn test_bot_mating_and_naming() {
    let mut rng = StdRng::seed_from_u64(11);
    let bots = Bot::brood(3, vec![random_genome(1), random_genome(2)]);

    assert_eq!(bots[0].name, "gen3_0");
    assert_eq!(bots[1].name, "gen3_1");
    assert_eq!(bots[0].strength, 0.0);

    let child = bots[0]
        .mate_with(&bots[1], CrossoverKind::Neuron, 0.1, MutationKind::default(), &mut rng)
        .unwrap();
    assert_eq!(child.strength, 0.0);
    assert_eq!(child.genome.topology(), bots[0].genome.topology());
}

#[test]
fn test_engine_bootstrap_and_advance() {
    let params = Params {
        population_size: 10,
        select_count: 3,
        ..Params::default()
    };
    let mut engine = EvolutionEngine::new(params, 42).unwrap();

    let genomes = engine.bootstrap().unwrap();
    assert_eq!(genomes.len(), 10);
    for genome in &genomes {
        assert_eq!(genome.input_arity(), 8);
        assert_eq!(genome.topology().layer_sizes, vec![4]);
    }

    let mut bots = Bot::brood(engine.generation(), genomes);
    for (i, bot) in bots.iter_mut().enumerate() {
        bot.strength = i as f64;
    }

    let next = engine.advance(&bots).unwrap();
    // 10 / 3 leaves one pair out
    assert_eq!(next.offspring.len(), 9);
    assert_eq!(next.report.breeder_mean, 8.0);
    assert_eq!(engine.generation(), 2);
    assert_eq!(engine.history().len(), 1);
    assert_eq!(engine.history().latest().map(|(g, _)| *g), Some(1));
}

#[test]
fn test_engine_is_reproducible() {
    let run = |seed| {
        let mut engine = EvolutionEngine::new(Params::default(), seed).unwrap();
        let mut bots = Bot::brood(1, engine.bootstrap().unwrap());
        for (i, bot) in bots.iter_mut().enumerate() {
            bot.strength = (i % 7) as f64;
        }
        let next = engine.advance(&bots).unwrap();
        next.offspring
            .iter()
            .map(Network::to_flat_vector)
            .collect::<Vec<_>>()
    };

    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
}

#[test]
fn test_engine_rejects_invalid_params() {
    let params = Params {
        select_count: 1,
        ..Params::default()
    };
    assert!(matches!(
        EvolutionEngine::new(params, 0),
        Err(Error::SingleBreeder)
    ));
}

#[test]
fn test_history_is_bounded() {
    let mut history = History::new(3);
    for generation in 1..=5 {
        history.record(generation, report(f64::from(generation), f64::from(generation) * 2.0));
    }

    assert_eq!(history.len(), 3);
    assert_eq!(history.breeder_means(), vec![3.0, 4.0, 5.0]);
    assert_eq!(history.mean_of_breeder_means(), 4.0);
    assert_eq!(history.best_ever(), Some(10.0));
    assert_eq!(History::default().best_ever(), None);
}

#[test]
fn test_bot_json_validates_genome() {
    let bot = population(&[3.0]).remove(0);
    let json = serde_json::to_string(&bot).unwrap();
    let restored: Bot = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, bot);

    let hollow = r#"{"name":"bot0","genome":{"layers":[]},"strength":0.0}"#;
    assert!(serde_json::from_str::<Bot>(hollow).is_err());
}
