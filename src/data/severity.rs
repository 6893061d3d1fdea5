//! Status text classification.
//!
//! Reporters send free-form status strings. This module maps any such string
//! onto a small set of [`Severity`] classes by case-insensitive substring
//! matching, plus an independent [`StatusIcon`] lookup for presentation.

use serde::Serialize;

/// Normalized health class of a single component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Operational,
    Degraded,
    Outage,
    Maintenance,
    Unknown,
}

impl Severity {
    /// Classify a status string. Total: unmatched text is [`Severity::Unknown`].
    ///
    /// Rules are checked in order and the first match wins:
    ///
    /// 1. "operational" or "online" → `Operational`
    /// 2. "outage" without "partial" → `Outage`
    /// 3. "partial" or "degraded" → `Degraded`
    /// 4. "maintenance" → `Maintenance`
    /// 5. anything else → `Unknown`
    pub fn classify(status: &str) -> Self {
        let status = status.to_lowercase();

        if is_up(&status) {
            Severity::Operational
        } else if is_full_outage(&status) {
            Severity::Outage
        } else if is_degraded(&status) {
            Severity::Degraded
        } else if status.contains("maintenance") {
            Severity::Maintenance
        } else {
            Severity::Unknown
        }
    }

    /// Presentation tone for this class.
    pub fn tone(&self) -> Tone {
        match self {
            Severity::Operational => Tone::Cyan,
            Severity::Outage => Tone::Red,
            Severity::Degraded => Tone::Amber,
            Severity::Maintenance => Tone::Blue,
            Severity::Unknown => Tone::Gray,
        }
    }

    /// Short label for tables and exports.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Operational => "Operational",
            Severity::Degraded => "Degraded",
            Severity::Outage => "Outage",
            Severity::Maintenance => "Maintenance",
            Severity::Unknown => "Unknown",
        }
    }
}

/// "Partial Outage" must not count as a full outage.
pub fn is_full_outage(lowercase_status: &str) -> bool {
    lowercase_status.contains("outage") && !lowercase_status.contains("partial")
}

/// Whether a status takes the whole system down to a major outage.
///
/// Wider than the `Outage` class: reporters say "Offline" or
/// "Error Fetching" for a component that is down, and those must raise the
/// overall status even though they classify as `Unknown`. Checked before the
/// "online" rule, so "Online after outage" still counts.
pub fn signals_outage(status: &str) -> bool {
    let status = status.to_lowercase();
    status.contains("offline") || is_full_outage(&status) || status.contains("error")
}

fn is_up(lowercase_status: &str) -> bool {
    lowercase_status.contains("operational") || lowercase_status.contains("online")
}

fn is_degraded(lowercase_status: &str) -> bool {
    lowercase_status.contains("partial") || lowercase_status.contains("degraded")
}

/// Color family used to style a status. Opaque to classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Cyan,
    Red,
    Amber,
    Blue,
    Gray,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Cyan => "cyan",
            Tone::Red => "red",
            Tone::Amber => "amber",
            Tone::Blue => "blue",
            Tone::Gray => "gray",
        }
    }
}

/// Icon shown next to a status.
///
/// Chosen independently of [`Severity`]: "offline", "error" and "failed" get
/// the blocked icon even though they classify as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusIcon {
    Check,
    Warning,
    Blocked,
    Wrench,
    Question,
}

impl StatusIcon {
    pub fn for_status(status: &str) -> Self {
        let status = status.to_lowercase();

        if is_up(&status) {
            StatusIcon::Check
        } else if is_degraded(&status) {
            StatusIcon::Warning
        } else if ["offline", "error", "failed", "outage"]
            .iter()
            .any(|k| status.contains(k))
        {
            StatusIcon::Blocked
        } else if status.contains("maintenance") {
            StatusIcon::Wrench
        } else {
            StatusIcon::Question
        }
    }

    /// Single-character glyph for terminal output.
    pub fn glyph(&self) -> &'static str {
        match self {
            StatusIcon::Check => "✓",
            StatusIcon::Warning => "!",
            StatusIcon::Blocked => "✗",
            StatusIcon::Wrench => "⚙",
            StatusIcon::Question => "?",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_examples() {
        assert_eq!(Severity::classify("Operational"), Severity::Operational);
        assert_eq!(Severity::classify("Online"), Severity::Operational);
        assert_eq!(Severity::classify("Major Outage"), Severity::Outage);
        assert_eq!(Severity::classify("Partial Outage"), Severity::Degraded);
        assert_eq!(Severity::classify("Degraded Performance"), Severity::Degraded);
        assert_eq!(Severity::classify("Under Maintenance"), Severity::Maintenance);
        assert_eq!(Severity::classify(""), Severity::Unknown);
        assert_eq!(Severity::classify("Idle"), Severity::Unknown);
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert_eq!(Severity::classify("ONLINE"), Severity::Operational);
        assert_eq!(Severity::classify("pArTiAl OuTaGe"), Severity::Degraded);
        assert_eq!(Severity::classify("MAINTENANCE"), Severity::Maintenance);
    }

    #[test]
    fn test_partial_always_beats_outage() {
        for s in [
            "partial outage",
            "outage (partial)",
            "Outage: partially restored",
            "PARTIALOUTAGE",
        ] {
            assert_eq!(Severity::classify(s), Severity::Degraded, "{s}");
        }
    }

    #[test]
    fn test_operational_rule_wins_first() {
        // Rule 1 runs before the outage rule.
        assert_eq!(
            Severity::classify("Online after outage"),
            Severity::Operational
        );
        assert_eq!(
            Severity::classify("Operational, maintenance soon"),
            Severity::Operational
        );
    }

    #[test]
    fn test_outage_beats_maintenance() {
        assert_eq!(
            Severity::classify("Outage during maintenance"),
            Severity::Outage
        );
    }

    #[test]
    fn test_offline_and_error_classify_unknown_but_signal_outage() {
        assert_eq!(Severity::classify("Offline"), Severity::Unknown);
        assert_eq!(Severity::classify("Error Fetching"), Severity::Unknown);
        assert_eq!(Severity::classify("Offline").tone(), Tone::Gray);

        assert!(signals_outage("Offline"));
        assert!(signals_outage("Error Fetching"));
        assert!(signals_outage("API Error (502)"));
        assert!(signals_outage("Major Outage"));
    }

    #[test]
    fn test_outage_signal_excludes_partial_and_healthy() {
        assert!(!signals_outage("Partial Outage"));
        assert!(!signals_outage("Online"));
        assert!(!signals_outage("Degraded Performance"));
        assert!(!signals_outage("Maintenance"));
        assert!(!signals_outage("Failed to Fetch"));
        assert!(!signals_outage(""));
    }

    #[test]
    fn test_tones() {
        assert_eq!(Severity::Operational.tone().as_str(), "cyan");
        assert_eq!(Severity::Outage.tone().as_str(), "red");
        assert_eq!(Severity::Degraded.tone().as_str(), "amber");
        assert_eq!(Severity::Maintenance.tone().as_str(), "blue");
        assert_eq!(Severity::Unknown.tone().as_str(), "gray");
    }

    #[test]
    fn test_icons() {
        assert_eq!(StatusIcon::for_status("Online"), StatusIcon::Check);
        assert_eq!(StatusIcon::for_status("Partial Outage"), StatusIcon::Warning);
        assert_eq!(StatusIcon::for_status("Major Outage"), StatusIcon::Blocked);
        assert_eq!(StatusIcon::for_status("Offline"), StatusIcon::Blocked);
        assert_eq!(StatusIcon::for_status("Failed to Fetch"), StatusIcon::Blocked);
        assert_eq!(StatusIcon::for_status("API Error (502)"), StatusIcon::Blocked);
        assert_eq!(StatusIcon::for_status("Maintenance"), StatusIcon::Wrench);
        assert_eq!(StatusIcon::for_status("Idle"), StatusIcon::Question);
        assert_eq!(StatusIcon::for_status(""), StatusIcon::Question);
    }
}
