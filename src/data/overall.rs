//! System-wide status derived from every component's severity.

use serde::Serialize;

use super::severity::{signals_outage, Severity, StatusIcon};

/// Overall health of the whole system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    AllOperational,
    PartialDisruption,
    MajorOutage,
    /// No component has been reported yet.
    AwaitingData,
}

impl OverallStatus {
    /// Reduce a set of status strings to one overall status.
    ///
    /// Any status that [signals an outage](signals_outage), including
    /// "Offline" and "Error" text, wins and stops the scan. Otherwise any
    /// `Degraded` gives `PartialDisruption`. `Maintenance` and `Unknown`
    /// never raise severity. An empty input is `AwaitingData`.
    pub fn resolve<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen_any = false;
        let mut degraded = false;

        for status in statuses {
            seen_any = true;
            if signals_outage(status) {
                return OverallStatus::MajorOutage;
            }
            if Severity::classify(status) == Severity::Degraded {
                degraded = true;
            }
        }

        Self::settle(seen_any, degraded)
    }

    /// Reduction over already-classified severities.
    ///
    /// Only `Outage` counts as an outage here, since the status text is gone.
    /// Prefer [`OverallStatus::resolve`] when the raw statuses are at hand.
    pub fn from_severities<I>(severities: I) -> Self
    where
        I: IntoIterator<Item = Severity>,
    {
        let mut seen_any = false;
        let mut degraded = false;

        for severity in severities {
            seen_any = true;
            match severity {
                Severity::Outage => return OverallStatus::MajorOutage,
                Severity::Degraded => degraded = true,
                Severity::Operational | Severity::Maintenance | Severity::Unknown => {}
            }
        }

        Self::settle(seen_any, degraded)
    }

    fn settle(seen_any: bool, degraded: bool) -> Self {
        if !seen_any {
            OverallStatus::AwaitingData
        } else if degraded {
            OverallStatus::PartialDisruption
        } else {
            OverallStatus::AllOperational
        }
    }

    /// Banner text.
    pub fn headline(&self) -> &'static str {
        match self {
            OverallStatus::AllOperational => "All Systems Operational",
            OverallStatus::PartialDisruption => "Partial Service Disruption",
            OverallStatus::MajorOutage => "Major Service Outage",
            OverallStatus::AwaitingData => "Awaiting Status Data",
        }
    }

    /// The component severity this status is styled as.
    pub fn styled_as(&self) -> Severity {
        match self {
            OverallStatus::AllOperational => Severity::Operational,
            OverallStatus::PartialDisruption => Severity::Degraded,
            OverallStatus::MajorOutage => Severity::Outage,
            OverallStatus::AwaitingData => Severity::Maintenance,
        }
    }

    pub fn icon(&self) -> StatusIcon {
        match self {
            OverallStatus::AllOperational => StatusIcon::Check,
            OverallStatus::PartialDisruption => StatusIcon::Warning,
            OverallStatus::MajorOutage => StatusIcon::Blocked,
            OverallStatus::AwaitingData => StatusIcon::Question,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_awaiting_data() {
        let none: [&str; 0] = [];
        assert_eq!(OverallStatus::resolve(none), OverallStatus::AwaitingData);
        assert_eq!(
            OverallStatus::AwaitingData.styled_as(),
            Severity::Maintenance
        );
    }

    #[test]
    fn test_outage_wins_regardless_of_position() {
        let a = [Severity::Operational, Severity::Degraded, Severity::Outage];
        let b = [Severity::Outage, Severity::Operational, Severity::Degraded];
        assert_eq!(OverallStatus::from_severities(a), OverallStatus::MajorOutage);
        assert_eq!(OverallStatus::from_severities(b), OverallStatus::MajorOutage);
    }

    #[test]
    fn test_outage_short_circuits() {
        let mut visited = 0;
        let severities = [Severity::Outage, Severity::Degraded, Severity::Operational]
            .into_iter()
            .inspect(|_| visited += 1);
        assert_eq!(
            OverallStatus::from_severities(severities),
            OverallStatus::MajorOutage
        );
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_degraded_is_partial_disruption() {
        assert_eq!(
            OverallStatus::resolve(["Online", "Partial Outage", "Maintenance"]),
            OverallStatus::PartialDisruption
        );
    }

    #[test]
    fn test_maintenance_and_unknown_do_not_elevate() {
        assert_eq!(
            OverallStatus::resolve(["Online", "Maintenance", "Idle", ""]),
            OverallStatus::AllOperational
        );
        assert_eq!(
            OverallStatus::resolve(["Maintenance"]),
            OverallStatus::AllOperational
        );
    }

    #[test]
    fn test_offline_and_error_are_major_outage() {
        assert_eq!(
            OverallStatus::resolve(["Online", "Offline"]),
            OverallStatus::MajorOutage
        );
        assert_eq!(
            OverallStatus::resolve(["Partial Outage", "Error Fetching"]),
            OverallStatus::MajorOutage
        );
        assert_eq!(
            OverallStatus::resolve(["Online after outage"]),
            OverallStatus::MajorOutage
        );
    }

    #[test]
    fn test_resolve_short_circuits_on_offline() {
        let mut visited = 0;
        let statuses = ["Offline", "Partial Outage", "Online"]
            .into_iter()
            .inspect(|_| visited += 1);
        assert_eq!(OverallStatus::resolve(statuses), OverallStatus::MajorOutage);
        assert_eq!(visited, 1);
    }

    #[test]
    fn test_all_outage_is_major_outage() {
        assert_eq!(
            OverallStatus::resolve(["Major Outage", "outage", "Total OUTAGE"]),
            OverallStatus::MajorOutage
        );
    }

    #[test]
    fn test_presentation() {
        assert_eq!(
            OverallStatus::MajorOutage.headline(),
            "Major Service Outage"
        );
        assert_eq!(OverallStatus::MajorOutage.styled_as(), Severity::Outage);
        assert_eq!(
            OverallStatus::PartialDisruption.icon(),
            StatusIcon::Warning
        );
    }
}
