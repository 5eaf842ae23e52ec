//! Saved policies and the metadata needed to rebuild their environments.
use crate::base::Policy;
use anyhow::{Context, Result};
use ndarray::{Array1, Array2, Axis};
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

/// Multilayer perceptron with ReLU hidden activations and a tanh output,
/// matching the continuous-control actors this crate evaluates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Mlp {
    ws: Vec<Array2<f32>>,
    bs: Vec<Array1<f32>>,
}

impl Mlp {
    /// Creates a network from explicit weights and biases.
    ///
    /// `ws[i]` has shape `(out_dim, in_dim)` for layer `i`.
    pub fn new(ws: Vec<Array2<f32>>, bs: Vec<Array1<f32>>) -> Self {
        assert_eq!(ws.len(), bs.len());
        assert!(!ws.is_empty());
        Self { ws, bs }
    }

    /// Zero-initialized network with the given layer widths.
    pub fn zeros(dims: &[usize]) -> Self {
        let ws = dims
            .windows(2)
            .map(|w| Array2::zeros((w[1], w[0])))
            .collect();
        let bs = dims[1..].iter().map(|&d| Array1::zeros(d)).collect();
        Self::new(ws, bs)
    }

    /// Input width of the network.
    pub fn input_dim(&self) -> usize {
        self.ws[0].ncols()
    }

    fn forward(&self, obs: &Array1<f32>) -> Array1<f32> {
        let n_layers = self.ws.len();
        let mut x = obs.clone();
        for (i, (w, b)) in self.ws.iter().zip(self.bs.iter()).enumerate() {
            x = w.dot(&x) + b;
            if i + 1 < n_layers {
                x.mapv_inplace(|y| y.max(0.0));
            } else {
                x.mapv_inplace(f32::tanh);
            }
        }
        x
    }
}

impl Policy for Mlp {
    fn sample(&mut self, obs: &Array2<f32>) -> Array2<f32> {
        let mut act = Array2::zeros((obs.nrows(), self.bs[self.bs.len() - 1].len()));
        for (i, row) in obs.axis_iter(Axis(0)).enumerate() {
            act.row_mut(i).assign(&self.forward(&row.to_owned()));
        }
        act
    }
}

/// Environment description stored alongside a policy.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtifactMeta {
    /// Observation width the policy was trained against, wrappers included.
    pub observation_dim: usize,

    /// Action width.
    pub action_dim: usize,

    /// Whether the training environment normalized observations and rewards.
    pub normalized_env: bool,
}

/// A policy together with its [`ArtifactMeta`], serialized with bincode.
#[derive(Serialize, Deserialize)]
pub struct PolicyArtifact {
    /// Environment description.
    pub meta: ArtifactMeta,

    policy: Mlp,
}

impl PolicyArtifact {
    /// Bundles a policy with its metadata.
    pub fn new(meta: ArtifactMeta, policy: Mlp) -> Self {
        Self { meta, policy }
    }

    /// Loads an artifact from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("failed to open policy artifact {:?}", path))?;
        let artifact = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("failed to deserialize policy artifact {:?}", path))?;
        Ok(artifact)
    }

    /// Saves the artifact to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("failed to create policy artifact {:?}", path))?;
        bincode::serialize_into(BufWriter::new(file), self)
            .with_context(|| format!("failed to serialize policy artifact {:?}", path))?;
        Ok(())
    }

    /// Consumes the artifact, returning the policy.
    pub fn into_policy(self) -> Mlp {
        self.policy
    }
}

#[cfg(test)]
mod tests {
    use super::Mlp;
    use crate::base::Policy;
    use ndarray::Array2;

    #[test]
    fn zero_network_outputs_zero_actions() {
        let mut mlp = Mlp::zeros(&[24, 64, 4]);
        assert_eq!(mlp.input_dim(), 24);
        let act = mlp.sample(&Array2::ones((2, 24)));
        assert_eq!(act.dim(), (2, 4));
        assert!(act.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn actions_are_bounded_by_tanh() {
        let ws = vec![Array2::from_elem((4, 24), 3.0)];
        let bs = vec![ndarray::Array1::from_elem(4, 1.0)];
        let mut mlp = Mlp::new(ws, bs);
        let act = mlp.sample(&Array2::ones((1, 24)));
        assert!(act.iter().all(|&x| x.abs() <= 1.0));
    }
}
