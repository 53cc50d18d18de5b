//! Binary model files.
//!
//! Layout, little-endian, no padding and no version tag:
//!
//! ```text
//! u32            inputs
//! u32            outputs
//! u32            hidden layer count (L)
//! u32[L]         hidden layer sizes
//! for i in 0..=L, for j in 0..layer_size(i):
//!     f32[prev_layer_size(i)]   weights[i][j]
//! for i in 0..=L:
//!     f32[layer_size(i)]        biases[i]
//! ```
//!
//! Floats are copied bit-for-bit, so `decode(&encode(n))` reproduces `n` exactly.

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::error::{NetError, Result};
use crate::layers::transition::Transition;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::network::topology::Topology;

const WORD: usize = 4;

/// Encodes `network` into a fresh buffer.
pub fn encode(network: &Network) -> Vec<u8> {
    let topology = network.topology();
    let words = 3 + topology.hidden_layer_count() + topology.parameter_count();
    let mut buf = Vec::with_capacity(words * WORD);

    // Topology validation guarantees every size fits in a u32.
    let header = [topology.inputs, topology.outputs, topology.hidden_layer_count()];
    for &word in header.iter().chain(&topology.hidden) {
        buf.extend_from_slice(&(word as u32).to_le_bytes());
    }

    for t in network.transitions() {
        for row in &t.weights.data {
            for &w in row {
                buf.extend_from_slice(&w.to_le_bytes());
            }
        }
    }
    for t in network.transitions() {
        for &b in &t.biases {
            buf.extend_from_slice(&b.to_le_bytes());
        }
    }
    buf
}

/// Writes `network` to `writer` in file order.
pub fn encode_into<W: Write>(network: &Network, writer: &mut W) -> Result<()> {
    writer.write_all(&encode(network))?;
    Ok(())
}

/// Rebuilds a network from bytes produced by [`encode`].
///
/// Fails with `NetError::Format` when the stream ends before a required
/// field, when the header declares a zero size, or when bytes remain after
/// the last bias.
pub fn decode(bytes: &[u8]) -> Result<Network> {
    let mut reader = Reader { bytes, pos: 0 };

    let inputs = reader.u32("input count")?;
    let outputs = reader.u32("output count")?;
    let layers = reader.u32("hidden layer count")?;
    let hidden = (0..layers)
        .map(|i| reader.u32(&format!("hidden layer {i} size")))
        .collect::<Result<Vec<_>>>()?;

    let topology = Topology::new(inputs, outputs, hidden)
        .map_err(|e| NetError::format(format!("invalid header: {e}")))?;

    let params = topology
        .checked_parameter_count()
        .ok_or_else(|| NetError::format("declared parameter count overflows"))?;
    let needed = params
        .checked_mul(WORD)
        .ok_or_else(|| NetError::format("declared parameter count overflows"))?;
    if reader.remaining() < needed {
        return Err(NetError::format(format!(
            "header declares {params} parameters ({needed} bytes) but only {} bytes follow",
            reader.remaining()
        )));
    }

    let mut weights = Vec::with_capacity(topology.transitions());
    for i in 0..topology.transitions() {
        let rows = (0..topology.layer_size(i))
            .map(|j| reader.f32s(topology.prev_layer_size(i), &format!("weights[{i}][{j}]")))
            .collect::<Result<Vec<_>>>()?;
        weights.push(Matrix::from_rows(rows));
    }

    let mut transitions = Vec::with_capacity(topology.transitions());
    for (i, weights) in weights.into_iter().enumerate() {
        let biases = reader.f32s(topology.layer_size(i), &format!("biases[{i}]"))?;
        transitions.push(Transition { weights, biases });
    }

    if reader.remaining() != 0 {
        return Err(NetError::format(format!(
            "{} trailing bytes after the last bias",
            reader.remaining()
        )));
    }

    Network::from_parts(topology, transitions)
}

impl Network {
    /// Writes the binary model file at `path`, replacing any existing file.
    pub fn save(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        encode_into(self, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Reads a binary model file previously written by `save`.
    pub fn load(path: &str) -> Result<Network> {
        let bytes = std::fs::read(path)?;
        decode(&bytes)
    }
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn word(&mut self, field: &str) -> Result<[u8; WORD]> {
        let end = self.pos + WORD;
        let Some(chunk) = self.bytes.get(self.pos..end) else {
            return Err(NetError::format(format!(
                "stream ends at byte {} while reading {field}",
                self.bytes.len()
            )));
        };
        self.pos = end;
        Ok([chunk[0], chunk[1], chunk[2], chunk[3]])
    }

    fn u32(&mut self, field: &str) -> Result<usize> {
        Ok(u32::from_le_bytes(self.word(field)?) as usize)
    }

    fn f32s(&mut self, n: usize, field: &str) -> Result<Vec<f32>> {
        (0..n)
            .map(|_| Ok(f32::from_le_bytes(self.word(field)?)))
            .collect()
    }
}
