//! The five fixed screens of the demo and the navigation inventory.

use core::fmt;
use core::str::FromStr;

use crate::error::DemoError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum View {
    #[default]
    Landing,
    Upload,
    Preprocess,
    Train,
    Results,
}

impl View {
    /// Stable lowercase identifier, also accepted by [`View::from_str`].
    pub fn label(self) -> &'static str {
        match self {
            View::Landing => "landing",
            View::Upload => "upload",
            View::Preprocess => "preprocess",
            View::Train => "train",
            View::Results => "results",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            View::Landing => "1D-CNN Autoencoder",
            View::Upload => "Upload Dataset",
            View::Preprocess => "Data Preprocessing",
            View::Train => "Training Progress",
            View::Results => "Results & Analysis",
        }
    }

    pub fn all() -> &'static [View] {
        &[
            View::Landing,
            View::Upload,
            View::Preprocess,
            View::Train,
            View::Results,
        ]
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for View {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::all()
            .iter()
            .copied()
            .find(|v| v.label() == s)
            .ok_or_else(|| DemoError::InvalidView(s.to_string()))
    }
}

/// One entry of the header navigation bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub view: View,
}

/// Header navigation. Preprocess and Train are only reachable through the flow buttons.
pub const NAV_ITEMS: [NavItem; 3] = [
    NavItem {
        label: "Home",
        view: View::Landing,
    },
    NavItem {
        label: "Upload",
        view: View::Upload,
    },
    NavItem {
        label: "Results",
        view: View::Results,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_round_trip_through_from_str() {
        for v in View::all() {
            assert_eq!(v.label().parse::<View>(), Ok(*v));
        }
    }

    #[test]
    fn unknown_label_is_invalid_view() {
        assert_eq!(
            "settings".parse::<View>(),
            Err(DemoError::InvalidView("settings".to_string()))
        );
        // Labels are exact; no case folding.
        assert!("Train".parse::<View>().is_err());
    }

    #[test]
    fn nav_bar_skips_flow_only_views() {
        let views: Vec<View> = NAV_ITEMS.iter().map(|n| n.view).collect();
        assert_eq!(views, vec![View::Landing, View::Upload, View::Results]);
        assert!(!views.contains(&View::Train));
    }
}
