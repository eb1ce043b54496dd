//! Empirical distributions and summary statistics over integer samples
//! (game lengths, capital at a horizon).
//!
//! All functions are pure: samples in, counts or scalars out.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use ruinlab_core::Capital;

/// Counts of each distinct sample value, ordered by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmpiricalDistribution<K: Ord> {
    counts: BTreeMap<K, usize>,
    total: usize,
}

impl<K: Ord + Copy> EmpiricalDistribution<K> {
    pub fn from_samples<I: IntoIterator<Item = K>>(samples: I) -> Self {
        let mut counts = BTreeMap::new();
        let mut total = 0;
        for k in samples {
            *counts.entry(k).or_insert(0) += 1;
            total += 1;
        }
        Self { counts, total }
    }

    /// Number of samples.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count(&self, k: K) -> usize {
        self.counts.get(&k).copied().unwrap_or(0)
    }

    /// Relative frequency of `k`; 0.0 for an empty distribution.
    pub fn probability(&self, k: K) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(k) as f64 / self.total as f64
    }

    /// Distinct observed values in ascending order.
    pub fn support(&self) -> impl Iterator<Item = K> + '_ {
        self.counts.keys().copied()
    }

    /// `(value, relative frequency)` pairs in ascending value order.
    pub fn pmf(&self) -> Vec<(K, f64)> {
        let total = self.total as f64;
        self.counts
            .iter()
            .map(|(&k, &c)| (k, c as f64 / total))
            .collect()
    }

    /// Most frequent value and its count. Ties go to the smaller value.
    pub fn mode(&self) -> Option<(K, usize)> {
        self.top_k(1).into_iter().next()
    }

    /// The `n` most frequent values, by count descending then value ascending.
    pub fn top_k(&self, n: usize) -> Vec<(K, usize)> {
        let mut entries: Vec<(K, usize)> = self.counts.iter().map(|(&k, &c)| (k, c)).collect();
        entries.sort_by(|x, y| y.1.cmp(&x.1).then(x.0.cmp(&y.0)));
        entries.truncate(n);
        entries
    }

    pub fn min(&self) -> Option<K> {
        self.counts.keys().next().copied()
    }

    pub fn max(&self) -> Option<K> {
        self.counts.keys().next_back().copied()
    }
}

/// Distribution of A's capital across horizon samples.
pub fn capital_distribution(samples: &[Capital]) -> EmpiricalDistribution<Capital> {
    EmpiricalDistribution::from_samples(samples.iter().copied())
}

/// Location and spread of a sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation (divides by n).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl SampleSummary {
    /// Returns `None` for an empty sample.
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let n = sorted.len() as f64;
        let mean = sorted.iter().sum::<f64>() / n;
        let variance = sorted.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;

        Some(Self {
            count: sorted.len(),
            mean,
            median: percentile_sorted(&sorted, 50.0),
            std_dev: variance.sqrt(),
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }

    /// Convenience for integer samples.
    pub fn from_integers<T: Copy + Into<i128>>(samples: &[T]) -> Option<Self> {
        let values: Vec<f64> = samples
            .iter()
            .map(|&v| {
                let wide: i128 = v.into();
                wide as f64
            })
            .collect();
        Self::from_samples(&values)
    }
}

/// Percentile of an unsorted sample using linear interpolation.
pub fn percentile(samples: &[f64], p: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    Some(percentile_sorted(&sorted, p))
}

/// Percentile of a sorted slice using linear interpolation.
fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n == 1 {
        return sorted[0];
    }
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (n - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = rank - lo as f64;
    sorted[lo] * (1.0 - frac) + sorted[hi] * frac
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_and_probabilities() {
        let d = EmpiricalDistribution::from_samples(vec![49i64, 51, 51, 51, 49, 47]);
        assert_eq!(d.total(), 6);
        assert_eq!(d.count(51), 3);
        assert_eq!(d.count(50), 0);
        assert!((d.probability(49) - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(d.support().collect::<Vec<_>>(), vec![47, 49, 51]);
        assert_eq!(d.min(), Some(47));
        assert_eq!(d.max(), Some(51));
    }

    #[test]
    fn capital_distribution_of_horizon_samples() {
        let d = capital_distribution(&[49, 51, 51, 49, 51]);
        assert!((d.probability(51) - 0.6).abs() < 1e-12);
        assert_eq!(d.mode(), Some((51, 3)));
    }

    #[test]
    fn pmf_sums_to_one() {
        let d = EmpiricalDistribution::from_samples(vec![3u64, 5, 5, 7, 9, 9, 9]);
        let total: f64 = d.pmf().iter().map(|(_, p)| p).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(d.pmf()[0].0, 3);
    }

    #[test]
    fn mode_breaks_ties_by_smaller_value() {
        let d = EmpiricalDistribution::from_samples(vec![4i64, 2, 4, 2, 9]);
        assert_eq!(d.mode(), Some((2, 2)));
        assert_eq!(d.top_k(2), vec![(2, 2), (4, 2)]);
        assert_eq!(d.top_k(10).len(), 3);
    }

    #[test]
    fn empty_distribution() {
        let d: EmpiricalDistribution<i64> = EmpiricalDistribution::from_samples(Vec::new());
        assert!(d.is_empty());
        assert_eq!(d.probability(1), 0.0);
        assert_eq!(d.mode(), None);
        assert_eq!(d.min(), None);
    }

    #[test]
    fn summary_matches_hand_computation() {
        let s = SampleSummary::from_samples(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(s.count, 8);
        assert!((s.mean - 5.0).abs() < 1e-12);
        assert!((s.std_dev - 2.0).abs() < 1e-12);
        assert!((s.median - 4.5).abs() < 1e-12);
        assert_eq!(s.min, 2.0);
        assert_eq!(s.max, 9.0);
    }

    #[test]
    fn summary_of_integers() {
        let s = SampleSummary::from_integers(&[1i64, 2, 3]).unwrap();
        assert!((s.mean - 2.0).abs() < 1e-12);
        let s = SampleSummary::from_integers(&[10u64, 30]).unwrap();
        assert!((s.median - 20.0).abs() < 1e-12);
    }

    #[test]
    fn summary_of_empty_is_none() {
        assert!(SampleSummary::from_samples(&[]).is_none());
        assert!(percentile(&[], 50.0).is_none());
    }

    #[test]
    fn percentiles_interpolate() {
        let v = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(percentile(&v, 0.0), Some(1.0));
        assert_eq!(percentile(&v, 100.0), Some(5.0));
        assert_eq!(percentile(&v, 50.0), Some(3.0));
        assert!((percentile(&v, 10.0).unwrap() - 1.4).abs() < 1e-12);
    }
}
