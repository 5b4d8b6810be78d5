//! Per-browser display preferences.

use expapp_shared::types::CurrencyCode;
use serde::{Deserialize, Serialize};

/// Colour theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme.
    #[default]
    Light,
    /// Dark theme.
    Dark,
}

/// Display preferences. Not part of the demo dataset, so seeding never touches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Colour theme.
    #[serde(default)]
    pub theme: Theme,
    /// Currency amounts are shown in, when it differs from the company's.
    #[serde(default)]
    pub display_currency: Option<CurrencyCode>,
    /// Show the demo notice when the app loads.
    #[serde(default = "default_show_demo_notice")]
    pub show_demo_notice: bool,
}

fn default_show_demo_notice() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            display_currency: None,
            show_demo_notice: default_show_demo_notice(),
        }
    }
}
