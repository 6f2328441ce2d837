// File: src/config.rs
// Purpose: Tenant configuration parsing from rusty-rules.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::rules::EntityRules;
use crate::tenant::{AgeBandValidator, NameInitialValidator, OverlayTenant, TenantId};

/// Validation configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Rule maps composed onto the built-in defaults for every tenant
    #[serde(default)]
    pub defaults: EntityRules,

    #[serde(default, rename = "tenant")]
    pub tenants: Vec<TenantConfig>,
}

/// One `[[tenant]]` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TenantConfig {
    pub id: TenantId,

    #[serde(default = "default_tenant_name")]
    pub name: String,

    #[serde(default)]
    pub strategy: Strategy,

    /// Required first letter for `name-initial` (default: 'S')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<char>,

    /// Lower age bound for `age-band` (default: 20)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_age: Option<u8>,

    /// Upper age bound for `age-band` (default: 40)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_age: Option<u8>,

    /// Rule maps composed after the strategy's own rules
    #[serde(default)]
    pub rules: EntityRules,
}

/// Struct-level behaviour of a configured tenant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Rule overlay only, no struct-level checks
    #[default]
    RulesOnly,
    NameInitial,
    AgeBand,
}

fn default_tenant_name() -> String {
    "tenant".to_string()
}

impl TenantConfig {
    /// Builds the tenant validator described by this entry.
    pub fn build(&self) -> OverlayTenant {
        let rules = self.rules.clone();
        match self.strategy {
            Strategy::RulesOnly => OverlayTenant::rules_only(&self.name, rules),
            Strategy::NameInitial => {
                let mut base = NameInitialValidator::default();
                if let Some(initial) = self.initial {
                    base.initial = initial;
                }
                OverlayTenant::with_base(&self.name, base, rules)
            }
            Strategy::AgeBand => {
                let mut base = AgeBandValidator::default();
                if let Some(min_age) = self.min_age {
                    base.min_age = min_age;
                }
                if let Some(max_age) = self.max_age {
                    base.max_age = max_age;
                }
                OverlayTenant::with_base(&self.name, base, rules)
            }
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means built-in defaults only
        if !path.exists() {
            tracing::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        let config = Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        tracing::info!(
            "Loaded {} tenant(s) from {:?}",
            config.tenants.len(),
            path
        );
        Ok(config)
    }

    /// Parse configuration from TOML text; blank text gives the default config
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from default path (./rusty-rules.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("rusty-rules.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tenant::TenantValidator;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"
        [defaults.User]
        LastName = "max=30"

        [[tenant]]
        id = 1
        name = "tenant-a"
        strategy = "name-initial"
        initial = "S"

        [tenant.rules.User]
        Phone = "required"

        [[tenant]]
        id = 2
        name = "tenant-b"
        strategy = "age-band"
        min_age = 21

        [[tenant]]
        id = 3
    "#;

    #[test]
    fn test_empty_config() {
        let config = Config::parse("  \n").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.tenants.is_empty());
    }

    #[test]
    fn test_parse_tenants() {
        let config = Config::parse(SAMPLE).unwrap();

        assert_eq!(config.defaults["User"].get("LastName"), Some("max=30"));
        assert_eq!(config.tenants.len(), 3);

        let a = &config.tenants[0];
        assert_eq!(a.id, TenantId(1));
        assert_eq!(a.strategy, Strategy::NameInitial);
        assert_eq!(a.initial, Some('S'));
        assert_eq!(a.rules["User"].get("Phone"), Some("required"));

        let b = &config.tenants[1];
        assert_eq!(b.strategy, Strategy::AgeBand);
        assert_eq!(b.min_age, Some(21));
        assert_eq!(b.max_age, None);

        let c = &config.tenants[2];
        assert_eq!(c.name, "tenant");
        assert_eq!(c.strategy, Strategy::RulesOnly);
        assert!(c.rules.is_empty());
    }

    #[test]
    fn test_build_merges_strategy_rules() {
        let config = Config::parse(SAMPLE).unwrap();

        let a = config.tenants[0].build();
        assert_eq!(a.name(), "tenant-a");
        assert_eq!(a.rules()["User"].get("Phone"), Some("e164,required"));

        let c = config.tenants[2].build();
        assert!(c.rules().is_empty());
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let err = Config::parse("[[tenant]]\nid = 1\nstrategy = \"vip\"\n").unwrap_err();
        assert!(err.to_string().contains("vip"));
    }

    #[test]
    fn test_round_trip() {
        let config = Config::parse(SAMPLE).unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(Config::parse(&text).unwrap(), config);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.tenants.len(), 3);
    }

    #[test]
    fn test_load_missing_and_invalid_files() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("rusty-rules.toml");
        assert_eq!(Config::load(&missing).unwrap(), Config::default());

        fs::write(&missing, "[[tenant]]\nname = \"no id\"\n").unwrap();
        let err = Config::load(&missing).unwrap_err();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
