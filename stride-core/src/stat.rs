//! Running mean and variance of batched samples.
use ndarray::{Array1, Array2, Axis};

/// Per-dimension running mean/variance estimate, updated batch-wise with the
/// parallel moments algorithm.
#[derive(Clone, Debug)]
pub struct RunningMeanStd {
    mean: Array1<f64>,
    var: Array1<f64>,
    count: f64,
}

impl RunningMeanStd {
    /// A fresh estimate over vectors of the given width.
    pub fn new(dim: usize) -> Self {
        Self {
            mean: Array1::zeros(dim),
            var: Array1::ones(dim),
            // Small initial count so the first batch dominates.
            count: 1e-4,
        }
    }

    /// Folds a batch of rows into the estimate.
    pub fn update(&mut self, batch: &Array2<f32>) {
        let batch_count = batch.nrows() as f64;
        if batch_count == 0.0 {
            return;
        }
        let batch = batch.mapv(|v| v as f64);
        let batch_mean = batch.mean_axis(Axis(0)).unwrap();
        let batch_var = batch.var_axis(Axis(0), 0.0);
        self.update_from_moments(&batch_mean, &batch_var, batch_count);
    }

    fn update_from_moments(
        &mut self,
        batch_mean: &Array1<f64>,
        batch_var: &Array1<f64>,
        batch_count: f64,
    ) {
        let delta = batch_mean - &self.mean;
        let tot_count = self.count + batch_count;

        let new_mean = &self.mean + &(&delta * (batch_count / tot_count));
        let m_a = &self.var * self.count;
        let m_b = batch_var * batch_count;
        let m_2 = m_a + m_b + delta.mapv(|d| d * d) * (self.count * batch_count / tot_count);

        self.mean = new_mean;
        self.var = m_2 / tot_count;
        self.count = tot_count;
    }

    /// Per-dimension mean.
    pub fn mean(&self) -> &Array1<f64> {
        &self.mean
    }

    /// Per-dimension variance.
    pub fn var(&self) -> &Array1<f64> {
        &self.var
    }

    /// Effective sample count.
    pub fn count(&self) -> f64 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::RunningMeanStd;
    use ndarray::array;

    #[test]
    fn batched_updates_match_direct_moments() {
        let mut rms = RunningMeanStd::new(2);
        rms.update(&array![[1.0f32, 10.0], [2.0, 20.0]]);
        rms.update(&array![[3.0f32, 30.0], [4.0, 40.0]]);

        // Direct moments of the concatenated samples [1..4] and [10..40].
        assert!((rms.mean()[0] - 2.5).abs() < 1e-3);
        assert!((rms.mean()[1] - 25.0).abs() < 1e-2);
        assert!((rms.var()[0] - 1.25).abs() < 1e-2);
        assert!((rms.var()[1] - 125.0).abs() < 1e-1);
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut rms = RunningMeanStd::new(3);
        let before = rms.count();
        rms.update(&ndarray::Array2::zeros((0, 3)));
        assert_eq!(rms.count(), before);
    }
}
