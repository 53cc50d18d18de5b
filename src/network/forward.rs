use crate::error::{NetError, Result};
use crate::network::network::Network;

/// Forward pass: feeds `input` through every transition in order and returns
/// the last transition's neurons.
///
/// Purely affine; no activation is applied between transitions. The network
/// is only read. Intermediate layers live only for the duration of the call.
///
/// Fails with `NetError::Shape` if `input.len()` differs from the network's
/// input count.
pub fn evaluate(input: &[f32], network: &Network) -> Result<Vec<f32>> {
    if input.len() != network.input_count() {
        return Err(NetError::shape(format!(
            "input has {} values, network expects {}",
            input.len(),
            network.input_count()
        )));
    }

    let mut transitions = network.transitions().iter();
    let first = match transitions.next() {
        Some(t) => t.feed_from(input),
        None => return Err(NetError::shape("network has no transitions")),
    };

    Ok(transitions.fold(first, |current, t| t.feed_from(&current)))
}
