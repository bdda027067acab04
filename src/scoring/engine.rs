//! Fixed-topology feed-forward scoring engine (6 -> 16 -> 4).
//!
//! Weights are drawn once from a uniform distribution over [-0.5, 0.5] with
//! zero biases and are never trained. Two engines built from different random
//! draws generally disagree; a single engine always returns the same output for
//! the same input.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{FeatureVector, HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};
use crate::error::{Error, Result};

const WEIGHT_RANGE: f64 = 0.5;

/// Dense-layer parameters. Rows are the receiving unit, columns the input.
#[derive(Debug, Clone, PartialEq)]
pub struct Weights {
    pub hidden: [[f64; INPUT_SIZE]; HIDDEN_SIZE],
    pub hidden_bias: [f64; HIDDEN_SIZE],
    pub output: [[f64; HIDDEN_SIZE]; OUTPUT_SIZE],
    pub output_bias: [f64; OUTPUT_SIZE],
}

impl Weights {
    /// Samples every weight from U(-0.5, 0.5); biases start at zero.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut hidden = [[0.0; INPUT_SIZE]; HIDDEN_SIZE];
        for row in hidden.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.gen_range(-WEIGHT_RANGE..=WEIGHT_RANGE);
            }
        }

        let mut output = [[0.0; HIDDEN_SIZE]; OUTPUT_SIZE];
        for row in output.iter_mut() {
            for w in row.iter_mut() {
                *w = rng.gen_range(-WEIGHT_RANGE..=WEIGHT_RANGE);
            }
        }

        Self {
            hidden,
            hidden_bias: [0.0; HIDDEN_SIZE],
            output,
            output_bias: [0.0; OUTPUT_SIZE],
        }
    }
}

fn relu(x: f64) -> f64 {
    x.max(0.0)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn copy_layer<const R: usize, const C: usize>(
    layer: &'static str,
    rows: &[Vec<f64>],
) -> Result<[[f64; C]; R]> {
    let shape_error = |cols: usize| Error::WeightShape {
        layer,
        rows: rows.len(),
        cols,
        expected_rows: R,
        expected_cols: C,
    };

    if rows.len() != R {
        return Err(shape_error(rows.first().map_or(0, Vec::len)));
    }

    let mut out = [[0.0; C]; R];
    for (dst, src) in out.iter_mut().zip(rows) {
        if src.len() != C {
            return Err(shape_error(src.len()));
        }
        dst.copy_from_slice(src);
    }
    Ok(out)
}

fn copy_bias<const N: usize>(layer: &'static str, bias: &[f64]) -> Result<[f64; N]> {
    bias.try_into().map_err(|_| Error::WeightShape {
        layer,
        rows: 1,
        cols: bias.len(),
        expected_rows: 1,
        expected_cols: N,
    })
}

#[derive(Debug, Clone)]
pub struct ScoringEngine {
    weights: Weights,
}

impl ScoringEngine {
    /// Builds an engine from operating-system entropy.
    pub fn new() -> Self {
        Self::from_rng(&mut StdRng::from_entropy())
    }

    /// Builds an engine whose weights are reproducible from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn from_rng<R: Rng>(rng: &mut R) -> Self {
        Self {
            weights: Weights::random(rng),
        }
    }

    pub fn from_weights(weights: Weights) -> Self {
        Self { weights }
    }

    /// Builds an engine from dynamically sized matrices, checking every shape.
    pub fn from_layers(
        hidden: &[Vec<f64>],
        hidden_bias: &[f64],
        output: &[Vec<f64>],
        output_bias: &[f64],
    ) -> Result<Self> {
        Ok(Self::from_weights(Weights {
            hidden: copy_layer::<HIDDEN_SIZE, INPUT_SIZE>("hidden", hidden)?,
            hidden_bias: copy_bias::<HIDDEN_SIZE>("hidden_bias", hidden_bias)?,
            output: copy_layer::<OUTPUT_SIZE, HIDDEN_SIZE>("output", output)?,
            output_bias: copy_bias::<OUTPUT_SIZE>("output_bias", output_bias)?,
        }))
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Runs one forward pass: ReLU hidden layer, sigmoid per output unit.
    pub fn forward(&self, input: &FeatureVector) -> [f64; OUTPUT_SIZE] {
        let w = &self.weights;

        let mut hidden = [0.0; HIDDEN_SIZE];
        for (h, (row, bias)) in hidden.iter_mut().zip(w.hidden.iter().zip(&w.hidden_bias)) {
            let z: f64 = row.iter().zip(input).map(|(a, b)| a * b).sum::<f64>() + bias;
            *h = relu(z);
        }

        let mut out = [0.0; OUTPUT_SIZE];
        for (o, (row, bias)) in out.iter_mut().zip(w.output.iter().zip(&w.output_bias)) {
            let z: f64 = row.iter().zip(&hidden).map(|(a, b)| a * b).sum::<f64>() + bias;
            *o = sigmoid(z);
        }
        out
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}
