//! Screen copy and chart inputs that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! page inventory and the chart series on the host.

use aedemo::evaluation::{EvaluationSample, SampleLabel};
use aedemo::trainer::EpochRecord;
use aedemo::view::View;

pub const APP_TITLE: &str = "Autoencoder Anomaly Detector";
pub const APP_SUBTITLE: &str = "Network Intrusion Detection System";
pub const BRAND_MARK: &str = "AE";

pub const LANDING_TAGLINE: &str = "Network Anomaly Detection Demo";
pub const LANDING_INTRO: &str = "This interactive demonstration showcases how a 1D-CNN autoencoder \
can detect network intrusions by learning patterns from normal traffic. Anomalies are identified \
through reconstruction error analysis.";

pub const LANDING_FEATURES: [&str; 4] = [
    "Train exclusively on normal network traffic patterns",
    "Use 1D Convolutional Neural Networks for feature extraction",
    "Detect anomalies via reconstruction error thresholding",
    "Visualize loss curves, MAE distributions, and model performance",
];

pub const QUICK_START: [&str; 4] = [
    "Upload KDDTest+ dataset or sample CSV",
    "Review preprocessed data and features",
    "Train the autoencoder model",
    "Analyze results and performance metrics",
];

pub const SIMULATION_NOTE: &str = "This demo simulates training on the client-side for \
demonstration purposes. Production systems would use Python/TensorFlow backends.";

pub const UPLOAD_HINT: &str = "Upload your CSV file or download a sample to test";
pub const UPLOAD_EMPTY: &str = "No CSV loaded yet";
pub const UPLOAD_EMPTY_HINT: &str =
    "Upload a KDDTest+ dataset or use the sample to get started";
pub const UPLOAD_OK: &str = "Dataset loaded successfully!";
pub const UPLOAD_REJECTED: &str = "Could not read a header row from that file";
pub const UPLOAD_NEXT: &str = "Next: Preprocess";

pub const MAE_CAPTION: &str = "Reconstruction error histogram showing separation between normal \
and anomalous samples. A threshold is applied to classify new data.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchTone {
    Input,
    Layer,
    Connector,
    Output,
    Footnote,
}

impl ArchTone {
    pub fn class(self) -> &'static str {
        match self {
            ArchTone::Input => "arch-line input",
            ArchTone::Layer => "arch-line layer",
            ArchTone::Connector => "arch-line connector",
            ArchTone::Output => "arch-line output",
            ArchTone::Footnote => "arch-line footnote",
        }
    }
}

/// Model diagram shown under the preprocessing steps. Display only.
pub const ARCHITECTURE: [(ArchTone, &str); 16] = [
    (ArchTone::Input, "Input: (n_samples, n_features)"),
    (ArchTone::Connector, "│"),
    (ArchTone::Layer, "Conv1D(32, kernel=7) → ReLU"),
    (ArchTone::Layer, "MaxPooling1D(2)"),
    (ArchTone::Connector, "│"),
    (ArchTone::Layer, "Conv1D(16, kernel=7) → ReLU"),
    (ArchTone::Layer, "MaxPooling1D(2)"),
    (ArchTone::Connector, "│ ← Bottleneck"),
    (ArchTone::Layer, "UpSampling1D(2)"),
    (ArchTone::Layer, "Conv1D(16, kernel=7) → ReLU"),
    (ArchTone::Connector, "│"),
    (ArchTone::Layer, "UpSampling1D(2)"),
    (ArchTone::Layer, "Conv1D(1, kernel=7) → Linear"),
    (ArchTone::Connector, "│"),
    (ArchTone::Output, "Output: Reconstructed Input"),
    (ArchTone::Footnote, "Loss: MAE | Optimizer: Adam"),
];

pub const IMPLEMENTATION_NOTES: [(&str, &str); 4] = [
    (
        "Architecture",
        "This 1D-CNN autoencoder uses convolutional layers for hierarchical feature extraction, \
with a bottleneck design to force dimensionality reduction and improve anomaly detection sensitivity.",
    ),
    (
        "Training",
        "The model is trained exclusively on normal traffic patterns using Mean Absolute Error (MAE) \
loss. This allows it to learn what \"normal\" looks like.",
    ),
    (
        "Detection",
        "Anomalies are identified when reconstruction error exceeds a threshold. The threshold is \
typically set using percentiles of the training error distribution.",
    ),
    (
        "Production Deployment",
        "The frontend simulation uses client-side computation. Real systems use Python/TensorFlow \
backends with REST APIs for model training and inference.",
    ),
];

pub const FOOTER: [&str; 3] = [
    "1D-CNN Autoencoder for Network Anomaly Detection",
    "Educational Demo | Adaptable for Production Use with Backend Integration",
    "Built with Rust, Leptos and WebAssembly",
];

pub const TRAIN_COLOR: &str = "#06b6d4";
pub const VAL_COLOR: &str = "#10b981";
pub const NORMAL_COLOR: &str = "#06b6d4";
pub const ANOMALY_COLOR: &str = "#fb7185";

/// Subtitle under each screen's heading, if it has one.
pub fn view_subtitle(view: View) -> Option<&'static str> {
    match view {
        View::Landing => Some(LANDING_TAGLINE),
        View::Upload => Some(UPLOAD_HINT),
        View::Preprocess => Some("Applied transformations:"),
        View::Train => None,
        View::Results => Some("Model performance on test dataset"),
    }
}

pub fn nav_class(active: View, target: View) -> &'static str {
    if active == target {
        "nav-btn active"
    } else {
        "nav-btn"
    }
}

/// CSS width for the progress bar fill.
pub fn progress_width(progress: u8) -> String {
    format!("{}%", progress.min(100))
}

/// Metrics are shown with three decimals.
pub fn metric_text(value: f32) -> String {
    format!("{value:.3}")
}

/// Only `.csv` files are offered by the picker; anything else gets a status hint.
pub fn looks_like_csv(file_name: &str) -> bool {
    file_name.to_ascii_lowercase().ends_with(".csv")
}

/// Train and validation curves, in epoch order.
pub struct LossSeries {
    pub train: Vec<f32>,
    pub val: Vec<f32>,
    pub max: f32,
}

pub fn loss_series(history: &[EpochRecord]) -> LossSeries {
    let train: Vec<f32> = history.iter().map(|r| r.train_loss).collect();
    let val: Vec<f32> = history.iter().map(|r| r.val_loss).collect();
    let max = train
        .iter()
        .chain(val.iter())
        .copied()
        .fold(0.0f32, f32::max);
    LossSeries { train, val, max }
}

/// One bar per sample, in sample order, coloured by its label.
pub fn mae_bars(samples: &[EvaluationSample]) -> Vec<(f32, &'static str)> {
    samples
        .iter()
        .map(|s| {
            let color = match s.label {
                SampleLabel::Normal => NORMAL_COLOR,
                SampleLabel::Anomaly => ANOMALY_COLOR,
            };
            (s.reconstruction_error, color)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use aedemo::evaluation::EvaluationReport;
    use aedemo::prng::Prng;

    #[test]
    fn landing_inventory_is_stable() {
        assert_eq!(LANDING_FEATURES.len(), 4);
        assert_eq!(QUICK_START.len(), 4);
        for s in LANDING_FEATURES.iter().chain(QUICK_START.iter()) {
            assert!(!s.trim().is_empty());
        }
        assert_eq!(FOOTER.len(), 3);
    }

    #[test]
    fn header_and_flow_labels_match_the_screen() {
        assert_eq!(BRAND_MARK, "AE");
        assert_eq!(UPLOAD_NEXT, "Next: Preprocess");
        assert_eq!(APP_TITLE, "Autoencoder Anomaly Detector");
    }

    #[test]
    fn architecture_starts_at_input_and_ends_with_footnote() {
        assert_eq!(ARCHITECTURE[0].0, ArchTone::Input);
        assert_eq!(ARCHITECTURE[ARCHITECTURE.len() - 1].0, ArchTone::Footnote);
        assert_eq!(
            ARCHITECTURE.iter().filter(|(t, _)| *t == ArchTone::Output).count(),
            1
        );
    }

    #[test]
    fn nav_marks_only_the_active_view() {
        assert_eq!(nav_class(View::Upload, View::Upload), "nav-btn active");
        assert_eq!(nav_class(View::Upload, View::Results), "nav-btn");
    }

    #[test]
    fn progress_width_is_capped() {
        assert_eq!(progress_width(0), "0%");
        assert_eq!(progress_width(40), "40%");
        assert_eq!(progress_width(250), "100%");
    }

    #[test]
    fn metrics_render_with_three_decimals() {
        let m = aedemo::evaluation::RESULT_MATRIX.metrics();
        assert_eq!(metric_text(m.precision), "0.556");
        assert_eq!(metric_text(m.recall), "0.625");
        assert_eq!(metric_text(m.accuracy), "0.854");
    }

    #[test]
    fn csv_check_ignores_case() {
        assert!(looks_like_csv("KDDTest+.CSV"));
        assert!(looks_like_csv("sample.csv"));
        assert!(!looks_like_csv("sample.csv.txt"));
    }

    #[test]
    fn loss_series_tracks_history() {
        let history: Vec<EpochRecord> = (1..=3).map(EpochRecord::for_epoch).collect();
        let s = loss_series(&history);
        assert_eq!(s.train.len(), 3);
        assert_eq!(s.val.len(), 3);
        assert!((s.max - 0.6).abs() < 1e-6);

        let empty = loss_series(&[]);
        assert!(empty.train.is_empty());
        assert_eq!(empty.max, 0.0);
    }

    #[test]
    fn mae_bars_follow_sample_order_and_label() {
        let report = EvaluationReport::synthesize(&mut Prng::new(3));
        let bars = mae_bars(&report.samples);
        assert_eq!(bars.len(), 80);
        assert!(bars[..40].iter().all(|(_, c)| *c == NORMAL_COLOR));
        assert!(bars[40..].iter().all(|(_, c)| *c == ANOMALY_COLOR));
        assert_eq!(bars[7].0, report.samples[7].reconstruction_error);
    }
}
