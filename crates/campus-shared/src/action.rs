//! Planned data-retrieval actions and their results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Query parameters for a data-access call
pub type QueryParams = BTreeMap<String, String>;

/// A record returned by the data-access capability
pub type Record = Value;

/// Retrieval tools, one per logical endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Schedules,
    Menus,
    Buses,
    Events,
    Updates,
    /// Full FAQ listing
    Faqs,
    /// Free-text FAQ search
    FaqSearch,
}

impl Tool {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Menus => "menus",
            Self::Buses => "buses",
            Self::Events => "events",
            Self::Updates => "updates",
            Self::Faqs => "faqs",
            Self::FaqSearch => "faq_search",
        }
    }

    /// Logical path on the data-access capability
    pub fn path(&self) -> &'static str {
        match self {
            Self::Schedules => "schedules",
            Self::Menus => "menus",
            Self::Buses => "buses",
            Self::Events => "events",
            Self::Updates => "updates",
            Self::Faqs => "faqs",
            Self::FaqSearch => "faqs/search",
        }
    }
}

impl std::fmt::Display for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One planned retrieval. Never mutated after planning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub tool: Tool,
    pub params: QueryParams,
}

impl Action {
    pub fn new(tool: Tool) -> Self {
        Self {
            tool,
            params: QueryParams::new(),
        }
    }

    pub fn with_param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.params.insert(key.to_string(), value.into());
        self
    }

    /// Add the parameter only when a value is present
    pub fn with_opt_param(self, key: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with_param(key, v),
            None => self,
        }
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }
}

/// Which tier produced the data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    Live,
    Fallback,
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Fallback => write!(f, "fallback"),
        }
    }
}

/// Outcome of one action.
///
/// `success == false` implies `data == None` and `error == Some(..)`.
/// `success == true` with `source == Fallback` means the live call failed
/// and fixture data was served instead. Build through the constructors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action: Tool,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<Record>>,
    pub source: DataSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    pub fn live(action: Tool, data: Vec<Record>) -> Self {
        Self {
            action,
            success: true,
            data: Some(data),
            source: DataSource::Live,
            error: None,
        }
    }

    pub fn fallback(action: Tool, data: Vec<Record>) -> Self {
        Self {
            action,
            success: true,
            data: Some(data),
            source: DataSource::Fallback,
            error: None,
        }
    }

    /// Both tiers failed
    pub fn failed(action: Tool, error: impl Into<String>) -> Self {
        Self {
            action,
            success: false,
            data: None,
            source: DataSource::Fallback,
            error: Some(error.into()),
        }
    }

    pub fn records(&self) -> &[Record] {
        self.data.as_deref().unwrap_or(&[])
    }

    /// Served from fixtures or failed outright
    pub fn is_degraded(&self) -> bool {
        !self.success || self.source == DataSource::Fallback
    }
}
