//! The demo notice printed when an application front-end starts.

use expapp_shared::config::DemoConfig;

use crate::models::Preferences;

/// Title line of the notice.
pub const DEMO_NOTICE_TITLE: &str = "Demo Version Notice";

/// Body of the notice.
pub const DEMO_NOTICE: &str = "This is a demo version of the Expense Management App. \
Some backend features may not work because all data lives in cookies on this machine. \
It is for demonstration purposes only.";

/// Returns true if the notice should be shown on this load.
///
/// Both the deployment (`demo.show_notice`) and the user's preference can
/// switch it off.
#[must_use]
pub const fn should_show(config: &DemoConfig, prefs: &Preferences) -> bool {
    config.show_notice && prefs.show_demo_notice
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(true, true, true)]
    #[case(true, false, false)]
    #[case(false, true, false)]
    #[case(false, false, false)]
    fn test_should_show(#[case] config: bool, #[case] pref: bool, #[case] expected: bool) {
        let config = DemoConfig { show_notice: config };
        let prefs = Preferences {
            show_demo_notice: pref,
            ..Preferences::default()
        };
        assert_eq!(should_show(&config, &prefs), expected);
    }

    #[test]
    fn test_shown_by_default() {
        assert!(should_show(&DemoConfig::default(), &Preferences::default()));
    }
}
