//! Snapshot - the single current status document.

use crate::{Component, Group};

/// The complete, current status of every monitored component.
///
/// A snapshot is replaced in full on every ingestion; there is no partial
/// update and no history. Components keep their input order inside each group.
///
/// # Example
///
/// ```rust
/// use statusboard_types::{Component, Group, Snapshot};
///
/// let mut snapshot = Snapshot::default();
/// snapshot.bots.push(Component::named("Bot1", "Online"));
///
/// assert_eq!(snapshot.group(Group::Bots).len(), 1);
/// assert!(snapshot.group(Group::Websites).is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Snapshot {
    /// Producer-supplied RFC 3339 timestamp of when the report was taken.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub last_updated_utc: Option<String>,

    pub bots: Vec<Component>,
    pub websites: Vec<Component>,
    pub discord_services: Vec<Component>,
    pub custom_services: Vec<Component>,
}

impl Snapshot {
    /// Create a builder for constructing snapshots.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::new()
    }

    /// Components of one group, in input order.
    pub fn group(&self, group: Group) -> &[Component] {
        match group {
            Group::Bots => &self.bots,
            Group::Websites => &self.websites,
            Group::DiscordServices => &self.discord_services,
            Group::CustomServices => &self.custom_services,
        }
    }

    /// Mutable access to one group.
    pub fn group_mut(&mut self, group: Group) -> &mut Vec<Component> {
        match group {
            Group::Bots => &mut self.bots,
            Group::Websites => &mut self.websites,
            Group::DiscordServices => &mut self.discord_services,
            Group::CustomServices => &mut self.custom_services,
        }
    }

    /// Every component across all groups, in [`Group::ALL`] order.
    pub fn components(&self) -> impl Iterator<Item = (Group, &Component)> {
        Group::ALL
            .into_iter()
            .flat_map(move |g| self.group(g).iter().map(move |c| (g, c)))
    }

    /// True when no group holds any component.
    ///
    /// The timestamp is ignored: a snapshot with a timestamp but no
    /// components is still "no data".
    pub fn is_empty(&self) -> bool {
        Group::ALL.into_iter().all(|g| self.group(g).is_empty())
    }

    /// Number of components across all groups.
    pub fn len(&self) -> usize {
        Group::ALL.into_iter().map(|g| self.group(g).len()).sum()
    }
}

/// Builder for constructing `Snapshot` instances.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the report timestamp.
    pub fn last_updated_utc(mut self, ts: impl Into<String>) -> Self {
        self.snapshot.last_updated_utc = Some(ts.into());
        self
    }

    /// Stamp the report with the current UTC time.
    #[cfg(feature = "chrono")]
    pub fn updated_now(self) -> Self {
        self.last_updated_utc(chrono::Utc::now().to_rfc3339())
    }

    /// Append a bot, identified by label.
    pub fn bot(self, label: impl Into<String>, status: impl Into<String>) -> Self {
        self.component(Group::Bots, Component::labelled(label, status))
    }

    /// Append a website with the URL it was probed at.
    pub fn website(
        self,
        label: impl Into<String>,
        status: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        self.component(
            Group::Websites,
            Component::labelled(label, status).with_url(url),
        )
    }

    /// Append a Discord service.
    pub fn discord_service(self, name: impl Into<String>, status: impl Into<String>) -> Self {
        self.component(Group::DiscordServices, Component::named(name, status))
    }

    /// Append a custom service.
    pub fn custom_service(self, name: impl Into<String>, status: impl Into<String>) -> Self {
        self.component(Group::CustomServices, Component::named(name, status))
    }

    /// Append a pre-built component to a group.
    pub fn component(mut self, group: Group, component: Component) -> Self {
        self.snapshot.group_mut(group).push(component);
        self
    }

    /// Build the snapshot.
    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}
