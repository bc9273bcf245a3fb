/// Reductions over `f64` samples. Empty input yields `None` rather than a
/// fabricated zero.
pub struct StatsHelper;

impl StatsHelper {
    pub fn sum(samples: &[f64]) -> Option<f64> {
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum())
    }

    pub fn mean(samples: &[f64]) -> Option<f64> {
        Self::sum(samples).map(|total| total / samples.len() as f64)
    }

    pub fn max(samples: &[f64]) -> Option<f64> {
        samples.iter().copied().reduce(f64::max)
    }

    /// Maximum over the samples that do not exceed `ceiling`.
    pub fn max_at_most(samples: &[f64], ceiling: f64) -> Option<f64> {
        samples
            .iter()
            .copied()
            .filter(|&value| value <= ceiling)
            .reduce(f64::max)
    }
}
