//! Statistical Features Computation

use serde::{Deserialize, Serialize};

/// Descriptive statistics for a signal
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticalFeatures {
    /// Mean value
    pub mean: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean absolute change between consecutive samples
    pub rate_of_change: f64,
    /// Number of samples
    pub count: usize,
}

impl StatisticalFeatures {
    /// Compute statistical features from a slice of values
    pub fn compute(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let min = values.iter().copied().fold(f64::MAX, f64::min);
        let max = values.iter().copied().fold(f64::MIN, f64::max);

        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        let rate_of_change = if values.len() >= 2 {
            values.windows(2).map(|w| (w[1] - w[0]).abs()).sum::<f64>() / (n - 1.0)
        } else {
            0.0
        };

        Self {
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
            rate_of_change,
            count: values.len(),
        }
    }

    /// Population standard deviation, 0 for fewer than two samples
    pub fn pstdev(values: &[f64]) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        Self::compute(values).std_dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_computation() {
        let stats = StatisticalFeatures::compute(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        assert!((stats.mean - 3.0).abs() < 0.001);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.count, 5);
    }

    #[test]
    fn test_std_dev_computation() {
        let stats = StatisticalFeatures::compute(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.std_dev - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_rate_of_change() {
        let stats = StatisticalFeatures::compute(&[0.0, 2.0, 1.0]);
        assert!((stats.rate_of_change - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_values() {
        let stats = StatisticalFeatures::compute(&[]);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.count, 0);
        assert_eq!(StatisticalFeatures::pstdev(&[3.0]), 0.0);
    }
}
