//! Headless gembots runner: evolves bot brains against a one-hot gem sensor.

use std::path::PathBuf;

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gembots::Params;
use gembots::brain::{Network, evaluate_all};
use gembots::evolution::{Bot, EvolutionEngine};

/// Headless gem-hunting run: evolves bot brains against a stand-in host.
#[derive(Debug, Parser)]
#[command(name = "gembots", version, about)]
struct Args {
    /// JSON parameter file; defaults are used when omitted.
    #[arg(long)]
    params: Option<PathBuf>,
    /// Number of generations to evolve.
    #[arg(long, default_value_t = 50)]
    generations: u32,
    /// Turns simulated per generation.
    #[arg(long, default_value_t = 100)]
    turns: u32,
    /// Seed for both the engine and the stand-in host.
    #[arg(long, default_value_t = 0x5EED_6E45)]
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let params = match &args.params {
        Some(path) => Params::load_from_file(path)?,
        None => Params::default(),
    };

    info!(
        input_arity = params.input_arity,
        population = params.population_size,
        breeders = params.select_count,
        "starting evolution"
    );

    let mut engine = EvolutionEngine::new(params, args.seed)?;
    let mut host_rng = StdRng::seed_from_u64(args.seed.rotate_left(32));
    let mut bots = Bot::brood(engine.generation(), engine.bootstrap()?);

    for _ in 0..args.generations {
        play(&mut bots, engine.params().input_arity, args.turns, &mut host_rng)?;
        let next = engine.advance(&bots)?;
        if next.offspring.is_empty() {
            warn!("no offspring produced, stopping");
            break;
        }
        bots = Bot::brood(engine.generation(), next.offspring);
    }

    if let Some(best) = engine.history().best_ever() {
        info!(
            best,
            mean_of_breeder_means = engine.history().mean_of_breeder_means(),
            "evolution finished"
        );
    }
    Ok(())
}

/// Stand-in for the grid world: each turn every bot senses the direction of a
/// gem as a one-hot vector and scores when its strongest output points there.
fn play(
    bots: &mut [Bot],
    input_arity: usize,
    turns: u32,
    rng: &mut StdRng,
) -> gembots::Result<()> {
    if input_arity == 0 {
        return Ok(());
    }
    for _ in 0..turns {
        let direction = rng.random_range(0..input_arity);
        let mut sensed = vec![0.0; input_arity];
        sensed[direction] = 1.0;
        let inputs = vec![sensed; bots.len()];

        let genomes: Vec<&Network> = bots.iter().map(|bot| &bot.genome).collect();
        let actions = evaluate_all(&genomes, &inputs)?;
        for (bot, action) in bots.iter_mut().zip(actions) {
            let action = action?;
            if strongest(&action) == Some(direction % action.len()) {
                bot.strength += 1.0;
            }
        }
    }
    Ok(())
}

fn strongest(action: &[f32]) -> Option<usize> {
    action
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
}
