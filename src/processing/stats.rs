//! Field statistics: min/max range finding and the 256-bin intensity histogram.

use rayon::prelude::*;

use crate::processing::field::{Range, ScalarField};

/// Number of histogram bins, one per 8-bit intensity.
pub const BINS: usize = 256;

/// Scan a field for its minimum and maximum, starting from `seed`.
///
/// Comparisons are strict, so NaN never replaces a bound. A field with no
/// finite values (or none beyond the seeds) returns the seed untouched.
pub fn min_max(field: &ScalarField, seed: Range) -> Range {
    let mut range = seed;
    for &value in field.data() {
        if value < range.min {
            range.min = value;
        }
        if range.max < value {
            range.max = value;
        }
    }
    range
}

/// First sample that fell outside the histogram's bin range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutOfRange {
    pub position: usize,
    pub value: f32,
    pub bin: i64,
}

/// Intensity histogram of a scaled field.
///
/// Samples are binned by truncation toward zero. Out-of-range finite samples
/// are clamped into the edge bins and counted. NaN samples stay out of the
/// bins but still count toward the total sample weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    counts: [u64; BINS],
    clamped: usize,
    non_finite: usize,
    first_out_of_range: Option<OutOfRange>,
}

impl Histogram {
    fn empty() -> Self {
        Self {
            counts: [0; BINS],
            clamped: 0,
            non_finite: 0,
            first_out_of_range: None,
        }
    }

    /// Histogram from explicit bin counts.
    pub fn from_counts(counts: [u64; BINS]) -> Self {
        Self {
            counts,
            ..Self::empty()
        }
    }

    /// Bin every sample of a scaled (nominally 0-255) field.
    pub fn from_scaled(scaled: &ScalarField) -> Self {
        scaled
            .data()
            .par_iter()
            .enumerate()
            .fold(Self::empty, |mut hist, (position, &value)| {
                hist.push(position, value);
                hist
            })
            .reduce(Self::empty, Self::merge)
    }

    fn push(&mut self, position: usize, value: f32) {
        if value.is_nan() {
            self.non_finite += 1;
            return;
        }
        let bin = value as i64;
        let index = if (0..BINS as i64).contains(&bin) {
            bin as usize
        } else {
            self.clamped += 1;
            let anomaly = OutOfRange { position, value, bin };
            match self.first_out_of_range {
                Some(prev) if prev.position <= position => {}
                _ => self.first_out_of_range = Some(anomaly),
            }
            bin.clamp(0, BINS as i64 - 1) as usize
        };
        self.counts[index] += 1;
    }

    fn merge(mut self, other: Self) -> Self {
        for (a, b) in self.counts.iter_mut().zip(other.counts.iter()) {
            *a += b;
        }
        self.clamped += other.clamped;
        self.non_finite += other.non_finite;
        self.first_out_of_range = match (self.first_out_of_range, other.first_out_of_range) {
            (Some(a), Some(b)) => Some(if b.position < a.position { b } else { a }),
            (a, b) => a.or(b),
        };
        self
    }

    pub fn counts(&self) -> &[u64; BINS] {
        &self.counts
    }

    /// Number of samples that landed in a bin.
    pub fn binned(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Every sample seen, NaN included: the width x height of the field.
    pub fn total(&self) -> u64 {
        self.binned() + self.non_finite as u64
    }

    /// Finite samples that had to be clamped into an edge bin.
    pub fn clamped(&self) -> usize {
        self.clamped
    }

    /// NaN samples left out of the histogram.
    pub fn non_finite(&self) -> usize {
        self.non_finite
    }

    pub fn first_out_of_range(&self) -> Option<OutOfRange> {
        self.first_out_of_range
    }

    /// Otsu's threshold: the bin that maximises between-class variance.
    ///
    /// Background is every bin `<= t`. Ties keep the lowest `t`. Returns 0
    /// when no split leaves mass on both sides. NaN samples weigh on the
    /// foreground side of every split without adding to its intensity sum.
    pub fn otsu_threshold(&self) -> u8 {
        let total = self.total();

        let mut sum = 0.0f32;
        for (t, &count) in self.counts.iter().enumerate() {
            sum += (t as u64 * count) as f32;
        }

        let mut sum_b = 0.0f32;
        let mut w_b = 0u64;
        let mut var_max = 0.0f32;
        let mut threshold = 0u8;

        for (t, &count) in self.counts.iter().enumerate() {
            w_b += count;
            if w_b == 0 {
                continue;
            }

            let w_f = total - w_b;
            if w_f == 0 {
                break;
            }

            sum_b += (t as u64 * count) as f32;

            let m_b = sum_b / w_b as f32;
            let m_f = (sum - sum_b) / w_f as f32;

            let var_between = w_b as f32 * w_f as f32 * (m_b - m_f) * (m_b - m_f);
            if var_between > var_max {
                var_max = var_between;
                threshold = t as u8;
            }
        }

        threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(values: Vec<f32>) -> ScalarField {
        let n = values.len();
        ScalarField::new(values, n, 1).unwrap()
    }

    #[test]
    fn min_max_includes_seed() {
        let range = min_max(&field(vec![0.2, 0.6, 0.4]), Range::default());
        assert_eq!(range, Range::new(0.0, 0.6));
    }

    #[test]
    fn min_max_skips_nan() {
        let range = min_max(&field(vec![f32::NAN, -0.5, f32::NAN, 0.25]), Range::default());
        assert_eq!(range, Range::new(-0.5, 0.25));
    }

    #[test]
    fn min_max_all_nan_returns_seed() {
        let seed = Range::new(0.0, 0.0);
        assert_eq!(min_max(&field(vec![f32::NAN; 4]), seed), seed);
    }

    #[test]
    fn histogram_truncates() {
        let hist = Histogram::from_scaled(&field(vec![0.0, 0.99, 1.0, 254.7, 255.0]));
        assert_eq!(hist.counts()[0], 2);
        assert_eq!(hist.counts()[1], 1);
        assert_eq!(hist.counts()[254], 1);
        assert_eq!(hist.counts()[255], 1);
        assert_eq!(hist.total(), 5);
        assert_eq!(hist.clamped(), 0);
    }

    #[test]
    fn histogram_clamps_and_reports() {
        let hist = Histogram::from_scaled(&field(vec![10.0, 300.0, -2.5, 256.0]));
        assert_eq!(hist.clamped(), 3);
        assert_eq!(hist.counts()[255], 2);
        assert_eq!(hist.counts()[0], 1);
        let first = hist.first_out_of_range().unwrap();
        assert_eq!(first.position, 1);
        assert_eq!(first.bin, 300);
    }

    #[test]
    fn histogram_small_negatives_truncate_to_zero() {
        let hist = Histogram::from_scaled(&field(vec![-0.5]));
        assert_eq!(hist.clamped(), 0);
        assert_eq!(hist.counts()[0], 1);
    }

    #[test]
    fn histogram_skips_nan() {
        let hist = Histogram::from_scaled(&field(vec![f32::NAN, 12.0]));
        assert_eq!(hist.non_finite(), 1);
        assert_eq!(hist.binned(), 1);
        assert_eq!(hist.total(), 2);
    }

    #[test]
    fn otsu_counts_nan_samples_in_total() {
        let nan = f32::NAN;
        let hist = Histogram::from_scaled(&field(vec![10.0, 20.0, 30.0, 200.0, nan, nan, nan, nan]));
        assert_eq!(hist.total(), 8);
        // With the four NaN samples weighing in, only the 200 bin splits off.
        assert_eq!(hist.otsu_threshold(), 200);
    }

    #[test]
    fn otsu_without_nan_splits_lower() {
        let hist = Histogram::from_scaled(&field(vec![10.0, 20.0, 30.0, 200.0]));
        assert_eq!(hist.otsu_threshold(), 30);
    }

    #[test]
    fn otsu_single_bin_is_zero() {
        let mut counts = [0u64; BINS];
        counts[128] = 10;
        assert_eq!(Histogram::from_counts(counts).otsu_threshold(), 0);
    }

    #[test]
    fn otsu_empty_is_zero() {
        assert_eq!(Histogram::from_counts([0; BINS]).otsu_threshold(), 0);
    }

    #[test]
    fn otsu_splits_bimodal() {
        let mut counts = [0u64; BINS];
        counts[20] = 50;
        counts[25] = 30;
        counts[200] = 40;
        counts[210] = 60;
        assert_eq!(Histogram::from_counts(counts).otsu_threshold(), 25);
    }
}
