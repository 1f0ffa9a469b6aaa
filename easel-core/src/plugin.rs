use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A Plugin is a display recipe: where its data comes from, how fresh it
/// must be kept, and the markup used to render it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plugin {
    /// Stable identifier
    pub id: String,

    /// Instance UUID, assigned on creation
    #[serde(default)]
    pub uuid: String,

    /// Human-readable name
    #[serde(default)]
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// How the cached data is kept current
    #[serde(default)]
    pub refresh_strategy: RefreshStrategy,

    /// Minutes after which polled data counts as outdated (polling only)
    #[serde(default)]
    pub staleness_minutes: Option<u32>,

    /// Endpoint polled for fresh data (required for the polling strategy)
    #[serde(default)]
    pub polling_url: Option<String>,

    /// HTTP verb used when polling
    #[serde(default)]
    pub polling_verb: PollingVerb,

    /// Raw header block, one `Name: Value` pair per line
    #[serde(default)]
    pub polling_header: Option<String>,

    /// Raw request body, sent only for POST polls
    #[serde(default)]
    pub polling_body: Option<String>,

    /// Last successfully fetched payload
    #[serde(default)]
    pub data_payload: Option<serde_json::Value>,

    /// When the payload was last replaced; written only together with it
    #[serde(default)]
    pub data_payload_updated_at: Option<DateTime<Utc>>,

    /// Inline template source; takes precedence over `render_markup_view`
    #[serde(default)]
    pub render_markup: Option<String>,

    /// Which template dialect `render_markup` is written in
    #[serde(default)]
    pub markup_language: MarkupLanguage,

    /// Reference to an externally defined view, consulted when no inline
    /// markup is set
    #[serde(default)]
    pub render_markup_view: Option<String>,

    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Refresh strategies for plugin data.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RefreshStrategy {
    /// Easel polls the configured endpoint when the payload goes stale
    #[default]
    Polling,
    /// Payload is pushed in from outside; freshness is delivery-driven
    Webhook,
    /// Payload never changes; no fetch is ever issued
    Static,
}

impl RefreshStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            RefreshStrategy::Polling => "polling",
            RefreshStrategy::Webhook => "webhook",
            RefreshStrategy::Static => "static",
        }
    }
}

/// HTTP verbs supported for polling.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PollingVerb {
    #[default]
    Get,
    Post,
}

impl PollingVerb {
    pub fn as_str(&self) -> &'static str {
        match self {
            PollingVerb::Get => "get",
            PollingVerb::Post => "post",
        }
    }
}

/// Template dialects for inline render markup.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MarkupLanguage {
    #[default]
    Liquid,
    Html,
}

impl MarkupLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarkupLanguage::Liquid => "liquid",
            MarkupLanguage::Html => "html",
        }
    }
}

impl Plugin {
    /// Create a plugin with a fresh UUID and empty cache state.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            uuid: uuid::Uuid::new_v4().to_string(),
            name: String::new(),
            description: String::new(),
            refresh_strategy: RefreshStrategy::default(),
            staleness_minutes: None,
            polling_url: None,
            polling_verb: PollingVerb::default(),
            polling_header: None,
            polling_body: None,
            data_payload: None,
            data_payload_updated_at: None,
            render_markup: None,
            markup_language: MarkupLanguage::default(),
            render_markup_view: None,
            created_at: Some(Utc::now()),
            updated_at: None,
        }
    }

    /// Whether the cached payload is due for a refresh, evaluated against
    /// an explicit clock. Pure: no I/O, no side effects.
    ///
    /// Webhook plugins are fresh only while an externally delivered update
    /// is under an hour old; Easel never initiates fetches for them. Every
    /// other strategy is stale until a payload exists and a positive
    /// staleness threshold is configured, then goes stale once the
    /// threshold elapses.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        if self.refresh_strategy == RefreshStrategy::Webhook {
            return match self.data_payload_updated_at {
                // Exactly one hour old counts as stale.
                Some(updated) => updated <= now - Duration::hours(1),
                None => true,
            };
        }

        let Some(updated) = self.data_payload_updated_at else {
            return true;
        };
        let minutes = match self.staleness_minutes {
            Some(m) if m > 0 => m,
            _ => return true,
        };

        updated + Duration::minutes(i64::from(minutes)) <= now
    }

    /// Convenience wrapper over [`Plugin::is_stale_at`] using the current time.
    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    /// Parse the raw `polling_header` block into ordered (name, value)
    /// pairs. Lines that do not split into a name and a value are ignored.
    pub fn polling_headers(&self) -> Vec<(String, String)> {
        let Some(block) = self.polling_header.as_deref() else {
            return Vec::new();
        };

        let mut pairs = Vec::new();
        for line in block.trim().lines() {
            if let Some((name, value)) = line.split_once(':') {
                let name = name.trim();
                if !name.is_empty() {
                    pairs.push((name.to_string(), value.trim().to_string()));
                }
            }
        }
        pairs
    }

    /// Whether this plugin is configured for polling fetches at all.
    pub fn is_pollable(&self) -> bool {
        self.refresh_strategy == RefreshStrategy::Polling && self.polling_url.is_some()
    }
}
