use crate::error::Result;
use crate::network::network::Network;
use crate::network::param::Param;

/// Which side of the original value a probe kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Negative,
    Positive,
}

/// Where a probe is in its measure-then-commit cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProbeState {
    Unmodified,
    ProbedNegative { neg_cost: f32 },
    ProbedPositive { neg_cost: f32, pos_cost: f32 },
    Committed { direction: Direction, cost: f32 },
}

/// Two-sided probe of a single parameter.
///
/// The parameter is set to `origin - step`, measured, set to `origin + step`,
/// measured, and finally left at whichever side measured lower. The positive
/// side wins ties. Each side is written from `origin` directly, so the
/// committed value is exactly the one that was measured.
#[derive(Debug, Clone)]
pub struct Probe {
    param: Param,
    origin: f32,
    step: f32,
    state: ProbeState,
}

impl Probe {
    pub fn new(network: &Network, param: Param, step: f32) -> Probe {
        Probe {
            param,
            origin: network.param(param),
            step,
            state: ProbeState::Unmodified,
        }
    }

    pub fn param(&self) -> Param {
        self.param
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    /// Advances by one state, writing the parameter and calling `measure` as
    /// needed. Does nothing once committed.
    pub fn advance<F>(&mut self, network: &mut Network, measure: &mut F) -> Result<ProbeState>
    where
        F: FnMut(&Network) -> Result<f32>,
    {
        self.state = match self.state {
            ProbeState::Unmodified => {
                *network.param_mut(self.param) = self.origin - self.step;
                let neg_cost = measure(network)?;
                ProbeState::ProbedNegative { neg_cost }
            }
            ProbeState::ProbedNegative { neg_cost } => {
                *network.param_mut(self.param) = self.origin + self.step;
                let pos_cost = measure(network)?;
                ProbeState::ProbedPositive { neg_cost, pos_cost }
            }
            ProbeState::ProbedPositive { neg_cost, pos_cost } => {
                if neg_cost < pos_cost {
                    *network.param_mut(self.param) = self.origin - self.step;
                    ProbeState::Committed { direction: Direction::Negative, cost: neg_cost }
                } else {
                    ProbeState::Committed { direction: Direction::Positive, cost: pos_cost }
                }
            }
            committed @ ProbeState::Committed { .. } => committed,
        };
        Ok(self.state)
    }

    /// Drives the probe to its committed state and returns the kept side and
    /// its cost.
    ///
    /// If `measure` fails the parameter is restored to its original value.
    pub fn run<F>(mut self, network: &mut Network, mut measure: F) -> Result<(Direction, f32)>
    where
        F: FnMut(&Network) -> Result<f32>,
    {
        loop {
            match self.advance(network, &mut measure) {
                Ok(ProbeState::Committed { direction, cost }) => return Ok((direction, cost)),
                Ok(_) => {}
                Err(e) => {
                    *network.param_mut(self.param) = self.origin;
                    return Err(e);
                }
            }
        }
    }
}
