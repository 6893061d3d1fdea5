//! Components and the fixed set of groups they belong to.

/// Display name used when a component carries neither a label nor a name.
pub const UNNAMED_COMPONENT: &str = "Unnamed Component";

/// One of the four component collections in a snapshot.
///
/// The order of [`Group::ALL`] is the display order and the order in which
/// components are concatenated for overall status resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Group {
    Bots,
    Websites,
    DiscordServices,
    CustomServices,
}

impl Group {
    /// All groups, in display order.
    pub const ALL: [Group; 4] = [
        Group::Bots,
        Group::Websites,
        Group::DiscordServices,
        Group::CustomServices,
    ];

    /// The top-level JSON key holding this group.
    pub fn wire_key(&self) -> &'static str {
        match self {
            Group::Bots => "bots",
            Group::Websites => "websites",
            Group::DiscordServices => "discord_services",
            Group::CustomServices => "custom_services",
        }
    }

    /// Human-readable section title.
    pub fn title(&self) -> &'static str {
        match self {
            Group::Bots => "Bots",
            Group::Websites => "Websites",
            Group::DiscordServices => "Discord Services",
            Group::CustomServices => "Other Services",
        }
    }

    /// Look a group up by its wire key.
    pub fn from_wire_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|g| g.wire_key() == key)
    }
}

/// A single monitored unit: a bot, a website, a Discord service or a custom service.
///
/// `status` is free-form text ("Operational", "Partial Outage", ...). It is
/// never validated here; classification happens on the reading side.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Component {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,

    /// Preferred over `name` for display when both are present.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub label: Option<String>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub status: String,

    /// Only meaningful for websites.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub url: Option<String>,
}

impl Component {
    /// Create a component identified by `name`.
    pub fn named(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Create a component identified by `label`.
    pub fn labelled(label: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            status: status.into(),
            ..Self::default()
        }
    }

    /// Attach a URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Label if present, else name, else [`UNNAMED_COMPONENT`].
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(UNNAMED_COMPONENT)
    }
}
