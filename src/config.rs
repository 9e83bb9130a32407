//! Optional YAML configuration for the role heuristics.
//!
//! The keyword tables in [`RoleRules`] default to the values the feedback
//! exports were built around; a config file can override any of them without
//! touching code, e.g.
//!
//! ```yaml
//! rules:
//!   rating_keywords: ["rating", "score"]
//!   frequency_column: "study centre"
//! ```

use std::{fs::File, io::BufReader, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::roles::RoleRules;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub rules: RoleRules,
}

impl ReportConfig {
    pub fn load(path: &Path) -> Result<ReportConfig> {
        let file = File::open(path).with_context(|| format!("Opening config file {path:?}"))?;
        serde_yaml::from_reader(BufReader::new(file))
            .with_context(|| format!("Parsing config file {path:?}"))
    }

    /// Loads the config when a path is given, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<ReportConfig> {
        match path {
            Some(path) => ReportConfig::load(path),
            None => Ok(ReportConfig::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::DEFAULT_FREQUENCY_COLUMN;

    #[test]
    fn partial_override_keeps_remaining_defaults() {
        let config: ReportConfig = serde_yaml::from_str(
            "rules:\n  rating_keywords: [\"score\"]\n",
        )
        .expect("parse config");
        assert_eq!(config.rules.rating_keywords, vec!["score".to_string()]);
        assert_eq!(config.rules.frequency_column, DEFAULT_FREQUENCY_COLUMN);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_yaml::from_str::<ReportConfig>("rules:\n  ratings: [\"x\"]\n");
        assert!(parsed.is_err());
    }

    #[test]
    fn empty_config_is_all_defaults() {
        let config: ReportConfig = serde_yaml::from_str("{}").expect("parse config");
        assert_eq!(config, ReportConfig::default());
    }
}
