use std::env;
use std::sync::Arc;

use box_heuristic::config::{RunConfig, USAGE};
use box_heuristic::{load_level, HeuristicEngine, HeuristicError, UNREACHABLE_COST};
use tracing::{error, info};

fn run(config: RunConfig) -> Result<(), HeuristicError> {
    info!(path = %config.level_path.display(), strategy = ?config.strategy, "loading level");
    let level = load_level(&config.level_path)?;

    let engine = Arc::new(HeuristicEngine::with_options(level.grid, config.options)?);
    let evaluator = config.strategy.build(engine.clone());

    let assignment = engine.assign(&level.initial);
    for pair in assignment.pairs() {
        info!(
            box_cell = %pair.box_cell,
            goal = %pair.goal,
            distance = pair.distance,
            "assigned"
        );
    }

    let h = evaluator.h(&level.initial);
    let f = evaluator.f(&level.initial);
    if h == UNREACHABLE_COST {
        println!("{}: unreachable", evaluator);
    } else {
        println!("{}: h = {}, f = {}", evaluator, h, f);
    }
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("box_heuristic=info".parse().expect("static directive")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = match RunConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            eprintln!("{}", USAGE);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(config) {
        error!("{}", e);
        std::process::exit(1);
    }
}
