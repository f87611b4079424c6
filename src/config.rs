use anyhow::Result;
use serde::Deserialize;
use std::{collections::HashMap, env};

use crate::error::MetricsError;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub metrics: MetricsOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MetricsOptions {
    /// Prefix joined to every metric name with `_`. Empty means no prefix.
    pub namespace: String,
    pub const_labels: HashMap<String, String>,
}

impl MetricsOptions {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            const_labels: HashMap::new(),
        }
    }

    pub fn with_const_label(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.const_labels.insert(key.into(), value.into());
        self
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            metrics: MetricsOptions {
                namespace: env::var("METRICS_NAMESPACE").unwrap_or_default(),
                const_labels: parse_const_labels(
                    &env::var("METRICS_CONST_LABELS").unwrap_or_default(),
                )?,
            },
        })
    }
}

/// Parse `key=value` pairs separated by commas, e.g. `service=api,env=prod`.
pub fn parse_const_labels(raw: &str) -> crate::error::Result<HashMap<String, String>> {
    let mut labels = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').ok_or_else(|| {
            MetricsError::InvalidConfig(format!("constant label '{}' is not key=value", pair))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(MetricsError::InvalidConfig(format!(
                "constant label '{}' has an empty name",
                pair
            )));
        }
        labels.insert(key.to_string(), value.trim().to_string());
    }
    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_label_pairs() {
        let labels = parse_const_labels("service=api, env = prod ,").unwrap();
        assert_eq!(labels.len(), 2);
        assert_eq!(labels["service"], "api");
        assert_eq!(labels["env"], "prod");
    }

    #[test]
    fn test_empty_input_yields_no_labels() {
        assert!(parse_const_labels("").unwrap().is_empty());
        assert!(parse_const_labels(" , ").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_malformed_pairs() {
        assert!(matches!(
            parse_const_labels("service"),
            Err(MetricsError::InvalidConfig(_))
        ));
        assert!(matches!(
            parse_const_labels("=api"),
            Err(MetricsError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_options_builder_collects_labels() {
        let options = MetricsOptions::new("shop").with_const_label("service", "checkout");
        assert_eq!(options.namespace, "shop");
        assert_eq!(options.const_labels.get("service").map(String::as_str), Some("checkout"));
    }
}
