// src/processing/pipeline.rs
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::processing::field::{Mask, PixelBuffer, Range, ScalarField};
use crate::processing::indices::{IndexCalculator, InfrablueNdvi};
use crate::processing::normalize::normalize;
use crate::processing::score::vegetation_score;
use crate::processing::stats::{min_max, Histogram};
use crate::processing::threshold::{build_mask, check_histogram};
use crate::utils::rgba::{mask_to_rgba, scaled_to_rgba};

/// Which intermediate field to export as an image.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Export {
    /// Min/max scaled NDVI as greyscale
    #[default]
    Ndvi,
    /// Binary vegetation mask
    Mask,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PipelineOptions {
    /// Emit per-stage diagnostics (range, threshold, pixel counts, score)
    pub debug: bool,
    /// Fail instead of clamping when a scaled sample falls outside 0-255
    pub strict_histogram: bool,
}

/// Every intermediate of one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub ndvi_raw: ScalarField,
    pub range: Range,
    pub scaled: ScalarField,
    pub histogram: Histogram,
    pub threshold: u8,
    pub mask: Mask,
    pub score: f32,
}

impl PipelineOutput {
    /// RGBA bytes of the requested visualization.
    pub fn visualization(&self, export: Export) -> Vec<u8> {
        match export {
            Export::Ndvi => scaled_to_rgba(&self.scaled),
            Export::Mask => mask_to_rgba(&self.mask),
        }
    }

    pub fn report(&self, input: Option<String>) -> Report {
        let (width, height) = self.ndvi_raw.shape();
        Report {
            input,
            width,
            height,
            min: self.range.min,
            max: self.range.max,
            threshold: self.threshold,
            score: self.score,
            vegetation_pixels: self.mask.vegetation_count(),
            clamped_samples: self.histogram.clamped(),
            non_finite_samples: self.histogram.non_finite(),
            error: None,
        }
    }
}

/// Machine-readable summary of a run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub input: Option<String>,
    pub width: usize,
    pub height: usize,
    pub min: f32,
    pub max: f32,
    pub threshold: u8,
    pub score: f32,
    pub vegetation_pixels: usize,
    pub clamped_samples: usize,
    pub non_finite_samples: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Report {
    /// Report for a run the pipeline could not finish; nothing counts as vegetation.
    pub fn failed(input: Option<String>, shape: (usize, usize), err: &Error) -> Self {
        let range = match err {
            Error::DegenerateRange { min, max } => Range::new(*min, *max),
            _ => Range::default(),
        };
        Self {
            input,
            width: shape.0,
            height: shape.1,
            min: range.min,
            max: range.max,
            threshold: 0,
            score: 0.0,
            vegetation_pixels: 0,
            clamped_samples: 0,
            non_finite_samples: 0,
            error: Some(err.to_string()),
        }
    }
}

/// NDVI -> range -> normalize -> Otsu -> mask -> score, on a dedicated thread pool.
pub struct Pipeline {
    threads: usize,
    pool: ThreadPool,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(threads: Option<usize>, options: PipelineOptions) -> Result<Self> {
        let threads = threads.filter(|&n| n > 0).unwrap_or_else(num_cpus::get);
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;

        Ok(Self {
            threads,
            pool,
            options,
        })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn run(&self, image: &PixelBuffer<'_>) -> Result<PipelineOutput> {
        self.pool.install(|| self.run_stages(image))
    }

    fn run_stages(&self, image: &PixelBuffer<'_>) -> Result<PipelineOutput> {
        let verbose = self.options.debug;
        let calculator = InfrablueNdvi;
        let ndvi_raw = calculator.calculate(image)?;

        let range = min_max(&ndvi_raw, Range::default());
        if verbose {
            debug!("{} calculated: min {:.6}, max {:.6}", calculator.name(), range.min, range.max);
        }

        let scaled = normalize(&ndvi_raw, range)?;

        let histogram = Histogram::from_scaled(&scaled);
        if self.options.strict_histogram {
            check_histogram(&histogram)?;
        } else if let Some(anomaly) = histogram.first_out_of_range() {
            warn!(
                "{} scaled samples outside 0-255 were clamped (first: {} at position {})",
                histogram.clamped(),
                anomaly.value,
                anomaly.position
            );
        }
        if verbose && histogram.non_finite() > 0 {
            debug!("{} NaN samples kept out of the histogram bins", histogram.non_finite());
        }

        let threshold = histogram.otsu_threshold();
        let mask = build_mask(&scaled, threshold)?;
        let score = vegetation_score(&ndvi_raw, &mask)?;

        if verbose {
            debug!("Otsu threshold: {threshold}");
            debug!("{} of {} pixels classified as vegetation", mask.vegetation_count(), ndvi_raw.len());
            debug!("Total vegetation index: {score:.6}");
        }

        Ok(PipelineOutput {
            ndvi_raw,
            range,
            scaled,
            histogram,
            threshold,
            mask,
            score,
        })
    }
}
