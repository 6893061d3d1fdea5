//! Render-ready status summary.
//!
//! A [`Board`] is what every presentation surface (HTML page, JSON endpoint,
//! terminal dashboard) consumes: the overall status plus each group's
//! components, already classified.

use serde::Serialize;
use statusboard_types::{Component, Group, Snapshot};

use super::overall::OverallStatus;
use super::severity::{Severity, StatusIcon};

/// One classified component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub name: String,
    pub status: String,
    pub severity: Severity,
    pub icon: StatusIcon,
    /// Set only for websites.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Entry {
    fn from_component(group: Group, component: &Component) -> Self {
        Self {
            name: component.display_name().to_string(),
            status: component.status.clone(),
            severity: Severity::classify(&component.status),
            icon: StatusIcon::for_status(&component.status),
            url: match group {
                Group::Websites => component.url.clone(),
                _ => None,
            },
        }
    }
}

/// The classified entries of one group, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub group: Group,
    pub title: &'static str,
    pub entries: Vec<Entry>,
}

/// Complete classified view of a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    pub overall: OverallStatus,
    pub headline: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated_utc: Option<String>,
    /// Always four groups, in [`Group::ALL`] order.
    pub groups: Vec<GroupView>,
}

impl Board {
    /// Classify every component of a snapshot.
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let groups: Vec<GroupView> = Group::ALL
            .into_iter()
            .map(|group| GroupView {
                group,
                title: group.title(),
                entries: snapshot
                    .group(group)
                    .iter()
                    .map(|c| Entry::from_component(group, c))
                    .collect(),
            })
            .collect();

        let overall = OverallStatus::resolve(
            groups
                .iter()
                .flat_map(|g| g.entries.iter().map(|e| e.status.as_str())),
        );

        Self {
            overall,
            headline: overall.headline(),
            last_updated_utc: snapshot.last_updated_utc.clone(),
            groups,
        }
    }

    /// The "no report received yet" state.
    pub fn is_awaiting_data(&self) -> bool {
        self.overall == OverallStatus::AwaitingData
    }

    /// All entries across groups, in display order.
    pub fn entries(&self) -> impl Iterator<Item = (Group, &Entry)> {
        self.groups
            .iter()
            .flat_map(|g| g.entries.iter().map(move |e| (g.group, e)))
    }

    /// Entries of one group.
    pub fn group(&self, group: Group) -> &[Entry] {
        self.groups
            .iter()
            .find(|g| g.group == group)
            .map(|g| g.entries.as_slice())
            .unwrap_or(&[])
    }

    /// Number of entries with the given severity.
    pub fn count(&self, severity: Severity) -> usize {
        self.entries().filter(|(_, e)| e.severity == severity).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::from_snapshot(&Snapshot::default())
    }
}
