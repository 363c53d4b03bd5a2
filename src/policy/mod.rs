//! Hardening policy for the wrapped agent.
//!
//! The policy is a TOML file compiled into the binaries. It is the single
//! source of every value the launcher enforces and the catalog filter applies.
//!
//! # Example
//!
//! ```toml
//! [agent]
//! name = "opencode"
//! binary = "node_modules/.bin/opencode"
//! config_env = "OPENCODE_CONFIG_CONTENT"
//!
//! [env]
//! OPENCODE_DISABLE_SHARE = "true"
//!
//! [catalog]
//! path = "models/models.json"
//! path_env = "OPENCODE_MODELS_PATH"
//! source_url = "https://models.dev"
//! allowed_providers = ["gitlab"]
//!
//! [config]
//! share = "disabled"
//! ```

pub mod definition;
pub mod loader;

pub use definition::{AgentSection, CatalogSection, HardeningPolicy};
