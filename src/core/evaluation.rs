//! Fabricated evaluation artifacts for the results screen.
//!
//! The samples and the confusion matrix are produced independently. The matrix
//! is a fixed literal and is not derived from any threshold over the samples,
//! so the two panels do not agree with each other.

use crate::prng::RandomSource;

pub const NORMAL_SAMPLES: usize = 40;
pub const ANOMALY_SAMPLES: usize = 40;

/// Closed range `[low, high]` a label's reconstruction errors are drawn from.
///
/// Draws use a unit value in `[0, 1)`, but `f32` rounding can land on `high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ErrorBand {
    pub low: f32,
    pub high: f32,
}

impl ErrorBand {
    pub fn contains(&self, x: f32) -> bool {
        x >= self.low && x <= self.high
    }

    fn draw(&self, rng: &mut impl RandomSource) -> f32 {
        rng.gen_range_f32(self.low, self.high).abs()
    }
}

pub const NORMAL_BAND: ErrorBand = ErrorBand {
    low: 0.02,
    high: 0.04,
};

pub const ANOMALY_BAND: ErrorBand = ErrorBand {
    low: 0.06,
    high: 0.11,
};

/// Literal matrix shown after every completed run, `[[TN, FP], [FN, TP]]`.
pub const RESULT_MATRIX: ConfusionMatrix = ConfusionMatrix([[180, 20], [15, 25]]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SampleLabel {
    Normal,
    Anomaly,
}

impl SampleLabel {
    pub fn label(self) -> &'static str {
        match self {
            SampleLabel::Normal => "normal",
            SampleLabel::Anomaly => "anomaly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationSample {
    pub index: usize,
    pub reconstruction_error: f32,
    pub label: SampleLabel,
}

/// Draw the 80 samples: 40 normal (indices 0..40) then 40 anomaly (40..80).
pub fn synthesize_samples(rng: &mut impl RandomSource) -> Vec<EvaluationSample> {
    let mut out = Vec::with_capacity(NORMAL_SAMPLES + ANOMALY_SAMPLES);
    for _ in 0..NORMAL_SAMPLES {
        out.push(EvaluationSample {
            index: out.len(),
            reconstruction_error: NORMAL_BAND.draw(rng),
            label: SampleLabel::Normal,
        });
    }
    for _ in 0..ANOMALY_SAMPLES {
        out.push(EvaluationSample {
            index: out.len(),
            reconstruction_error: ANOMALY_BAND.draw(rng),
            label: SampleLabel::Anomaly,
        });
    }
    out
}

/// Rows are the true class (normal, anomaly); columns the predicted class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionMatrix(pub [[u32; 2]; 2]);

impl ConfusionMatrix {
    pub fn tn(&self) -> u32 {
        self.0[0][0]
    }

    pub fn fp(&self) -> u32 {
        self.0[0][1]
    }

    pub fn fn_(&self) -> u32 {
        self.0[1][0]
    }

    pub fn tp(&self) -> u32 {
        self.0[1][1]
    }

    pub fn total(&self) -> u32 {
        self.tn() + self.fp() + self.fn_() + self.tp()
    }

    /// Anomaly precision. The denominator is floored at 1 so an empty matrix reads 0.
    pub fn precision(&self) -> f32 {
        self.tp() as f32 / (self.fp() + self.tp()).max(1) as f32
    }

    /// Anomaly recall. The denominator is floored at 1 so an empty matrix reads 0.
    pub fn recall(&self) -> f32 {
        self.tp() as f32 / (self.fn_() + self.tp()).max(1) as f32
    }

    pub fn accuracy(&self) -> f32 {
        match self.total() {
            0 => 0.0,
            total => (self.tn() + self.tp()) as f32 / total as f32,
        }
    }

    pub fn metrics(&self) -> Metrics {
        Metrics {
            precision: self.precision(),
            recall: self.recall(),
            accuracy: self.accuracy(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metrics {
    pub precision: f32,
    pub recall: f32,
    pub accuracy: f32,
}

/// Everything the results screen shows.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationReport {
    pub samples: Vec<EvaluationSample>,
    pub matrix: ConfusionMatrix,
}

impl EvaluationReport {
    /// Synthesize the artifacts of a completed run.
    pub fn synthesize(rng: &mut impl RandomSource) -> Self {
        Self {
            samples: synthesize_samples(rng),
            matrix: RESULT_MATRIX,
        }
    }

    pub fn metrics(&self) -> Metrics {
        self.matrix.metrics()
    }
}
