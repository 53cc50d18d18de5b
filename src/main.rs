use std::{env, process, thread, time::Instant};

use log::{error, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use probe_nn::{train_loop, IdxStore, Network, Result, RunConfig, StepReport};

// Usage:
//   probe-nn [config.json]
// Logging follows RUST_LOG, e.g. RUST_LOG=info.
fn main() {
    env_logger::init();

    if let Err(e) = run(env::args().nth(1)) {
        error!("{e}");
        process::exit(1);
    }
}

fn run(config_path: Option<String>) -> Result<()> {
    let config = match config_path {
        Some(path) => RunConfig::load_json(&path)?,
        None => RunConfig::default(),
    };

    let seed = config.seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut network = match config.resume.as_deref() {
        Some(path) => match Network::load(path) {
            Ok(network) => {
                info!("resumed network from {path}");
                network
            }
            Err(e) => {
                warn!("could not resume from {path} ({e}), starting from a fresh network");
                fresh_network(&config, seed)?
            }
        },
        None => fresh_network(&config, seed)?,
    };

    if let Some(path) = config.initial_output.as_deref() {
        network.save(path)?;
    }

    let mut store = IdxStore::open(&config.images, &config.labels)?;

    info!(
        "starting: {} iterations over {} parameters",
        config.iterations,
        network.topology().parameter_count()
    );
    let started = Instant::now();

    let (tx, rx) = std::sync::mpsc::channel::<StepReport>();
    let mut train_config = config.train_config();
    train_config.progress_tx = Some(tx);

    let last = thread::scope(|s| {
        s.spawn(move || {
            for report in rx {
                log_report(&report);
            }
        });
        // Dropping the config closes the channel so the logger thread ends.
        let train_config = train_config;
        train_loop(&mut network, &mut store, &mut rng, &train_config)
    })?;

    if let Some(report) = last {
        info!("last cost {:.6} after {} steps", report.cost, report.iteration + 1);
    }
    info!("done ({:.1}s)", started.elapsed().as_secs_f64());

    network.save(&config.output)?;
    info!("saved network to {}", config.output);
    network.destroy();
    Ok(())
}

fn log_report(report: &StepReport) {
    let output: Vec<String> = report.output.iter().map(|v| format!("{v:.6}")).collect();
    info!(
        "[{}/{}] expected: {}, output: {} ({:.3}s, cost {:.6}, picked {})",
        report.iteration + 1,
        report.total_iterations,
        report.label,
        output.join(" "),
        report.elapsed_ms as f64 / 1000.0,
        report.cost,
        report.predicted,
    );
}

fn fresh_network(config: &RunConfig, seed: u64) -> Result<Network> {
    let mut network = Network::new(config.topology.clone())?;
    network.fill_random(seed);
    info!("initialized {:?} from seed {seed}", config.topology);
    Ok(network)
}

fn clock_seed() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
