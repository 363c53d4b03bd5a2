//! Loading and validation of the embedded hardening policy.

use super::definition::HardeningPolicy;
use crate::error::{OpenduoError, Result};
use std::path::Path;

impl HardeningPolicy {
    /// Load the OpenCode hardening policy compiled into the binary
    pub fn load() -> Result<Self> {
        Self::from_toml(include_str!("../../policy/opencode.toml"))
    }

    /// Parse and validate a policy from TOML source
    pub fn from_toml(content: &str) -> Result<Self> {
        let policy: HardeningPolicy = toml::from_str(content)?;
        validate_policy(&policy)?;
        Ok(policy)
    }

    /// Human-readable reinstall advice, if the policy carries one
    pub fn reinstall_hint(&self) -> Option<&str> {
        self.agent.reinstall_hint.as_deref()
    }
}

/// Validate that a policy is complete and cannot be bypassed by the launch environment
fn validate_policy(policy: &HardeningPolicy) -> Result<()> {
    if policy.agent.name.is_empty() {
        return Err(OpenduoError::InvalidPolicy(
            "agent name cannot be empty".to_string(),
        ));
    }
    if policy.agent.binary.is_empty() || !Path::new(&policy.agent.binary).is_relative() {
        return Err(OpenduoError::InvalidPolicy(format!(
            "agent binary '{}' must be a non-empty relative path",
            policy.agent.binary
        )));
    }
    if policy.catalog.path.is_empty() || !Path::new(&policy.catalog.path).is_relative() {
        return Err(OpenduoError::InvalidPolicy(format!(
            "catalog path '{}' must be a non-empty relative path",
            policy.catalog.path
        )));
    }

    for name in [&policy.agent.config_env, &policy.catalog.path_env] {
        if name.is_empty() {
            return Err(OpenduoError::InvalidPolicy(
                "environment variable names cannot be empty".to_string(),
            ));
        }
        // Both are computed at launch; a fixed [env] value would silently shadow them
        if policy.env.contains_key(name) {
            return Err(OpenduoError::InvalidPolicy(format!(
                "'{}' is computed at launch and cannot appear in [env]",
                name
            )));
        }
    }
    if policy.agent.config_env == policy.catalog.path_env {
        return Err(OpenduoError::InvalidPolicy(format!(
            "'{}' cannot carry both the config and the catalog path",
            policy.agent.config_env
        )));
    }

    for (key, value) in &policy.env {
        if key.is_empty() || key.contains('=') {
            return Err(OpenduoError::InvalidPolicy(format!(
                "invalid environment variable name '{}'",
                key
            )));
        }
        if value.is_empty() {
            return Err(OpenduoError::InvalidPolicy(format!(
                "environment flag '{}' cannot be empty",
                key
            )));
        }
    }

    if policy.catalog.allowed_providers.is_empty() {
        return Err(OpenduoError::InvalidPolicy(
            "allowed_providers cannot be empty".to_string(),
        ));
    }
    if policy.catalog.source_url.is_empty() {
        return Err(OpenduoError::InvalidPolicy(
            "catalog source_url cannot be empty".to_string(),
        ));
    }
    if policy.config.is_empty() {
        return Err(OpenduoError::InvalidPolicy(
            "security [config] cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const MINIMAL: &str = r#"
        [agent]
        name = "opencode"
        binary = "bin/opencode"
        config_env = "AGENT_CONFIG"

        [env]
        AGENT_NO_SHARE = "true"

        [catalog]
        path = "models/models.json"
        path_env = "AGENT_MODELS_PATH"
        source_url = "https://models.example"
        allowed_providers = ["gitlab"]

        [config]
        share = "disabled"
    "#;

    #[test]
    fn test_load_embedded_policy() {
        let policy = HardeningPolicy::load().unwrap();
        assert_eq!(policy.agent.name, "opencode");
        assert_eq!(policy.agent.binary, "node_modules/.bin/opencode");
        assert_eq!(policy.agent.config_env, "OPENCODE_CONFIG_CONTENT");
        assert_eq!(policy.reinstall_hint(), Some("brew reinstall openduo"));
    }

    #[test]
    fn test_embedded_env_flags() {
        let policy = HardeningPolicy::load().unwrap();
        assert_eq!(policy.env.get("OPENCODE_DISABLE_SHARE").unwrap(), "true");
        assert_eq!(
            policy.env.get("OPENCODE_DISABLE_MODELS_FETCH").unwrap(),
            "true"
        );
        assert_eq!(policy.env.get("OPENCODE_DISABLE_AUTOUPDATE").unwrap(), "true");
        assert_eq!(policy.catalog.path_env, "OPENCODE_MODELS_PATH");
    }

    #[test]
    fn test_embedded_security_config() {
        let policy = HardeningPolicy::load().unwrap();
        assert_eq!(policy.config.get("share"), Some(&json!("disabled")));
        assert_eq!(
            policy.config.get("small_model"),
            Some(&json!("gitlab/duo-chat-haiku-4-5"))
        );
        assert_eq!(
            policy.config.get("enabled_providers"),
            Some(&json!(["gitlab"]))
        );
        assert_eq!(policy.config.get("autoupdate"), Some(&json!(false)));
    }

    #[test]
    fn test_embedded_catalog_allow_list() {
        let policy = HardeningPolicy::load().unwrap();
        assert_eq!(policy.catalog.allowed_providers, vec!["gitlab"]);
        assert_eq!(policy.catalog.source_url, "https://models.dev");
        assert_eq!(policy.catalog.path, "models/models.json");
    }

    #[test]
    fn test_minimal_policy_parses() {
        let policy = HardeningPolicy::from_toml(MINIMAL).unwrap();
        assert_eq!(policy.agent.binary, "bin/opencode");
        assert!(policy.reinstall_hint().is_none());
    }

    #[test]
    fn test_rejects_absolute_binary() {
        let toml = MINIMAL.replace("bin/opencode", "/usr/bin/opencode");
        let err = HardeningPolicy::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("relative path"));
    }

    #[test]
    fn test_rejects_config_env_in_fixed_env() {
        let toml = MINIMAL.replace("AGENT_NO_SHARE", "AGENT_CONFIG");
        let err = HardeningPolicy::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("computed at launch"));
    }

    #[test]
    fn test_rejects_empty_allow_list() {
        let toml = MINIMAL.replace(r#"["gitlab"]"#, "[]");
        let err = HardeningPolicy::from_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("allowed_providers"));
    }

    #[test]
    fn test_rejects_empty_flag_value() {
        let toml = MINIMAL.replace(r#"AGENT_NO_SHARE = "true""#, r#"AGENT_NO_SHARE = """#);
        assert!(HardeningPolicy::from_toml(&toml).is_err());
    }

    #[test]
    fn test_rejects_missing_config_section() {
        let toml = MINIMAL.replace("[config]\n        share = \"disabled\"", "");
        assert!(matches!(
            HardeningPolicy::from_toml(&toml),
            Err(OpenduoError::PolicyParse(_))
        ));
    }
}
