//! Data structures for parsing the hardening policy TOML.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A hardening policy for one wrapped agent.
#[derive(Debug, Clone, Deserialize)]
pub struct HardeningPolicy {
    /// Wrapped agent metadata (name, binary, config variable)
    pub agent: AgentSection,

    /// Environment flags exported on every launch
    #[serde(default)]
    pub env: BTreeMap<String, String>,

    /// Restricted models catalog settings
    pub catalog: CatalogSection,

    /// Security configuration overlaid on the user's configuration
    pub config: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AgentSection {
    pub name: String,

    /// Path of the agent executable relative to the installation root
    pub binary: String,

    /// Variable carrying the agent's inline JSON configuration
    pub config_env: String,

    #[serde(default)]
    pub reinstall_hint: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSection {
    /// Path of the filtered catalog relative to the installation root
    pub path: String,

    /// Variable pointing the agent at the filtered catalog
    pub path_env: String,

    /// Base URL of the upstream catalog service
    pub source_url: String,

    pub allowed_providers: Vec<String>,
}
