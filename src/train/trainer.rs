use std::time::Instant;

use crate::data::example::Example;
use crate::error::{NetError, Result};
use crate::loss::SquaredError;
use crate::network::forward::evaluate;
use crate::network::network::Network;
use crate::network::param::visit_order;
use crate::train::probe::{Direction, Probe};
use crate::train::step_report::{argmax, StepReport};
use crate::train::step_size::StepSize;
use crate::train::train_config::TrainConfig;

/// Runs one coordinate-search step on a single example.
///
/// Every weight and then every bias is probed once at `origin ± step` and
/// left on the side with the lower cost. No gradients are computed; each
/// probe costs one forward pass, so a step performs `2 * P + 1` passes for
/// `P` parameters.
///
/// The network is borrowed mutably for the whole step. On error the
/// parameters already visited keep their committed values and the one
/// being probed is restored.
pub fn train_step(
    network: &mut Network,
    example: &Example,
    iteration: usize,
    config: &TrainConfig,
) -> Result<StepReport> {
    let t_start = Instant::now();

    if example.input.len() != network.input_count() {
        return Err(NetError::shape(format!(
            "example has {} inputs, network expects {}",
            example.input.len(),
            network.input_count()
        )));
    }

    let expected = config
        .target
        .expected(example.label, iteration, network.output_count())?;
    let step = config.schedule.step_size(iteration, config.iterations);

    let mut negative_commits = 0;
    let mut positive_commits = 0;

    let topology = network.topology().clone();
    for param in visit_order(&topology) {
        let probe = Probe::new(network, param, step);
        let (direction, cost) = probe.run(network, |net: &Network| {
            Ok(SquaredError::cost(&evaluate(&example.input, net)?, &expected))
        })?;

        log::trace!("{param} -> {direction:?} (cost {cost})");
        match direction {
            Direction::Negative => negative_commits += 1,
            Direction::Positive => positive_commits += 1,
        }
    }

    let output = evaluate(&example.input, network)?;
    let cost = SquaredError::cost(&output, &expected);
    let predicted = argmax(&output);

    log::debug!(
        "step {iteration}/{}: label={} step={step} cost={cost} predicted={predicted} \
         negative={negative_commits} positive={positive_commits}",
        config.iterations,
        example.label,
    );

    Ok(StepReport {
        iteration,
        total_iterations: config.iterations,
        index: None,
        label: example.label,
        step,
        output,
        cost,
        predicted,
        negative_commits,
        positive_commits,
        elapsed_ms: t_start.elapsed().as_millis() as u64,
    })
}
