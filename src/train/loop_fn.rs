use std::sync::atomic::Ordering;

use rand::Rng;

use crate::data::example::ExampleSource;
use crate::error::{NetError, Result};
use crate::network::network::Network;
use crate::train::step_report::StepReport;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::train_step;

/// Trains `network` for `config.iterations` steps and returns the report of
/// the **last completed step**, or `None` if no step ran.
///
/// Each step draws one example index uniformly from `source` using `rng`.
///
/// # Early termination
/// The loop stops between steps if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Errors
/// The first failing read or step ends the run and is returned as-is.
pub fn train_loop<S, R>(
    network: &mut Network,
    source: &mut S,
    rng: &mut R,
    config: &TrainConfig,
) -> Result<Option<StepReport>>
where
    S: ExampleSource + ?Sized,
    R: Rng + ?Sized,
{
    if config.iterations > 0 && source.is_empty() {
        return Err(NetError::shape("example source is empty"));
    }

    let mut last = None;

    for iteration in 0..config.iterations {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                log::debug!("stop requested before step {iteration}");
                break;
            }
        }

        let index = rng.gen_range(0..source.len());
        let example = source.example(index)?;

        let mut report = train_step(network, &example, iteration, config)?;
        report.index = Some(index);

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(report.clone()).is_err() {
                last = Some(report);
                break;
            }
        }
        last = Some(report);
    }

    Ok(last)
}
