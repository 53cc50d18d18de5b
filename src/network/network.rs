use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::error::{NetError, Result};
use crate::layers::transition::Transition;
use crate::network::forward::evaluate;
use crate::network::param::{self, Param};
use crate::network::topology::Topology;

/// A fully-connected affine network: the topology plus one `Transition` per
/// layer boundary.
///
/// The network exclusively owns its parameters. It is mutated only through
/// `&mut self`, so a training step holding the mutable borrow cannot be
/// observed half-way by anyone else.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    topology: Topology,
    transitions: Vec<Transition>,
}

impl Network {
    /// Builds a zero-valued network for `topology`.
    pub fn new(topology: Topology) -> Result<Network> {
        topology.validate()?;
        let transitions = (0..topology.transitions())
            .map(|i| Transition::zeros(topology.layer_size(i), topology.prev_layer_size(i)))
            .collect();
        Ok(Network { topology, transitions })
    }

    /// Builds a zero-valued network from raw topology arguments, checking that
    /// `hidden_layer_count` agrees with `hidden_sizes`.
    pub fn create(
        inputs: usize,
        outputs: usize,
        hidden_layer_count: usize,
        hidden_sizes: &[usize],
    ) -> Result<Network> {
        Network::new(Topology::with_layer_count(
            inputs,
            outputs,
            hidden_layer_count,
            hidden_sizes,
        )?)
    }

    /// Assembles a network from already-populated transitions, checking every
    /// shape against the topology.
    pub fn from_parts(topology: Topology, transitions: Vec<Transition>) -> Result<Network> {
        topology.validate()?;
        if transitions.len() != topology.transitions() {
            return Err(NetError::shape(format!(
                "expected {} transitions, got {}",
                topology.transitions(),
                transitions.len()
            )));
        }
        for (i, t) in transitions.iter().enumerate() {
            let (size, input_size) = (topology.layer_size(i), topology.prev_layer_size(i));
            let rows_ok = t.weights.rows == size && t.weights.data.len() == size;
            let cols_ok = t.weights.cols == input_size
                && t.weights.data.iter().all(|row| row.len() == input_size);
            if !rows_ok || !cols_ok || t.biases.len() != size {
                return Err(NetError::shape(format!(
                    "transition {i} must be {size}x{input_size} with {size} biases"
                )));
            }
        }
        Ok(Network { topology, transitions })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn input_count(&self) -> usize {
        self.topology.inputs
    }

    pub fn output_count(&self) -> usize {
        self.topology.outputs
    }

    pub fn weight(&self, layer: usize, neuron: usize, source: usize) -> f32 {
        self.transitions[layer].weights.data[neuron][source]
    }

    pub fn bias(&self, layer: usize, neuron: usize) -> f32 {
        self.transitions[layer].biases[neuron]
    }

    /// Reads the parameter at `p`. Panics if `p` is outside the topology.
    pub fn param(&self, p: Param) -> f32 {
        match p {
            Param::Weight { layer, neuron, source } => self.weight(layer, neuron, source),
            Param::Bias { layer, neuron } => self.bias(layer, neuron),
        }
    }

    /// Mutable access to the parameter at `p`. Panics if `p` is outside the topology.
    pub fn param_mut(&mut self, p: Param) -> &mut f32 {
        match p {
            Param::Weight { layer, neuron, source } => {
                &mut self.transitions[layer].weights.data[neuron][source]
            }
            Param::Bias { layer, neuron } => &mut self.transitions[layer].biases[neuron],
        }
    }

    /// All parameter addresses in training order: every weight, then every bias.
    pub fn params(&self) -> impl Iterator<Item = Param> + '_ {
        param::visit_order(&self.topology)
    }

    /// Sets every bias to `value` and draws every weight from `[0, 1)`.
    ///
    /// Biases and weights are deliberately treated differently here; use
    /// `fill_random` for a fully random start.
    pub fn fill_constant<R: Rng + ?Sized>(&mut self, value: f32, rng: &mut R) {
        for t in &mut self.transitions {
            t.biases.iter_mut().for_each(|b| *b = value);
            t.weights.fill_uniform(rng);
        }
    }

    /// Seeds a fresh generator and draws every weight and bias from `[0, 1)`.
    pub fn fill_random(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.fill_random_with(&mut rng);
    }

    /// Draws every weight and bias from `[0, 1)` using the given generator.
    pub fn fill_random_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for t in &mut self.transitions {
            for b in t.biases.iter_mut() {
                *b = rng.gen::<f32>();
            }
            t.weights.fill_uniform(rng);
        }
    }

    /// Runs `input` through every transition. See [`evaluate`].
    pub fn forward(&self, input: &[f32]) -> Result<Vec<f32>> {
        evaluate(input, self)
    }

    /// Releases all parameter storage, last transition first.
    ///
    /// The network is consumed, so it cannot be used or destroyed again:
    ///
    /// ```compile_fail
    /// use probe_nn::Network;
    ///
    /// let net = Network::create(2, 1, 0, &[]).unwrap();
    /// net.destroy();
    /// net.forward(&[0.0, 0.0]).unwrap();
    /// ```
    pub fn destroy(mut self) {
        while let Some(t) = self.transitions.pop() {
            drop(t);
        }
        log::trace!("released network {:?}", self.topology);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::matrix::Matrix;

    #[test]
    fn create_allocates_expected_scalar_counts() {
        let net = Network::create(784, 10, 2, &[16, 16]).unwrap();

        let weights: usize = net.transitions().iter().map(|t| t.weights.len()).sum();
        let biases: usize = net.transitions().iter().map(|t| t.biases.len()).sum();

        assert_eq!(weights, 784 * 16 + 16 * 16 + 16 * 10);
        assert_eq!(biases, 16 + 16 + 10);
        assert!(net.params().all(|p| net.param(p) == 0.0));
    }

    #[test]
    fn shapes_match_topology() {
        let net = Network::create(5, 3, 2, &[4, 6]).unwrap();
        let topo = net.topology();
        for (i, t) in net.transitions().iter().enumerate() {
            assert_eq!(t.biases.len(), topo.layer_size(i));
            assert_eq!(t.weights.data.len(), topo.layer_size(i));
            assert!(t.weights.data.iter().all(|row| row.len() == topo.prev_layer_size(i)));
        }
    }

    #[test]
    fn create_rejects_bad_topology() {
        assert!(matches!(Network::create(0, 10, 0, &[]), Err(NetError::Shape(_))));
        assert!(matches!(Network::create(4, 2, 1, &[]), Err(NetError::Shape(_))));
        assert!(matches!(Network::create(4, 2, 1, &[0]), Err(NetError::Shape(_))));
    }

    #[test]
    fn fill_constant_sets_biases_and_randomizes_weights() {
        let mut net = Network::create(6, 2, 1, &[3]).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        net.fill_constant(0.25, &mut rng);

        for t in net.transitions() {
            assert!(t.biases.iter().all(|&b| b == 0.25));
            assert!(t.weights.data.iter().flatten().all(|&w| (0.0..1.0).contains(&w)));
        }
        let distinct = net.transitions()[0].weights.data[0]
            .iter()
            .any(|&w| w != net.transitions()[0].weights.data[0][0]);
        assert!(distinct);
    }

    #[test]
    fn fill_random_is_reproducible_per_seed() {
        let mut a = Network::create(4, 2, 1, &[3]).unwrap();
        let mut b = Network::create(4, 2, 1, &[3]).unwrap();
        let mut c = Network::create(4, 2, 1, &[3]).unwrap();
        a.fill_random(42);
        b.fill_random(42);
        c.fill_random(43);

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.params().all(|p| (0.0..1.0).contains(&a.param(p))));
    }

    #[test]
    fn param_mut_edits_single_scalar() {
        let mut net = Network::create(2, 2, 0, &[]).unwrap();
        let p = Param::Weight { layer: 0, neuron: 1, source: 0 };
        *net.param_mut(p) = 3.0;
        *net.param_mut(Param::Bias { layer: 0, neuron: 0 }) = -1.0;

        assert_eq!(net.weight(0, 1, 0), 3.0);
        assert_eq!(net.bias(0, 0), -1.0);
        assert_eq!(net.params().filter(|&q| net.param(q) != 0.0).count(), 2);
    }

    #[test]
    fn from_parts_rejects_ragged_rows() {
        let topology = Topology::new(2, 1, vec![]).unwrap();
        let mut t = Transition::zeros(1, 2);
        t.weights = Matrix { rows: 1, cols: 2, data: vec![vec![0.0]] };
        assert!(matches!(Network::from_parts(topology, vec![t]), Err(NetError::Shape(_))));
    }

    #[test]
    fn destroy_consumes_network() {
        let net = Network::create(3, 2, 1, &[4]).unwrap();
        net.destroy();
    }
}
