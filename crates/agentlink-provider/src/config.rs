//! Provider settings and their resolution
//!
//! Settings come from three layers, later layers winning:
//!
//! 1. an optional TOML file,
//! 2. `FRONTEGG_*` environment variables,
//! 3. values set explicitly in the provider block.
//!
//! Empty strings count as unset at every layer.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::error::Result;

pub const ENV_PREFIX: &str = "FRONTEGG";
pub const DEFAULT_REGION: &str = "eu";
pub const DEFAULT_SOURCE_API_TIMEOUT: i64 = 3000;

/// Region code to API base URL
pub const REGIONS: [(&str, &str); 6] = [
    ("stg", "https://api.stg.frontegg.com"),
    ("eu", "https://api.frontegg.com"),
    ("us", "https://api.us.frontegg.com"),
    ("au", "https://api.au.frontegg.com"),
    ("ca", "https://api.ca.frontegg.com"),
    ("uk", "https://api.uk.frontegg.com"),
];

pub fn region_url(region: &str) -> Option<&'static str> {
    REGIONS
        .iter()
        .find(|(code, _)| *code == region)
        .map(|(_, url)| *url)
}

pub fn valid_regions() -> Vec<&'static str> {
    REGIONS.iter().map(|(code, _)| *code).collect()
}

/// Provider block as written by the user
#[derive(Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub region: Option<String>,
    pub base_url: Option<String>,
    pub client_id: Option<String>,
    pub secret: Option<String>,
    pub application_name: Option<String>,
    pub sources: Vec<SourceSettings>,
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("region", &self.region)
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .field("application_name", &self.application_name)
            .field("sources", &self.sources)
            .finish()
    }
}

/// A source to find or create while configuring the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    pub name: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub source_url: String,
    #[serde(default = "default_source_api_timeout")]
    pub api_timeout: i64,
    #[serde(default)]
    pub schema_file: Option<PathBuf>,
}

impl SourceSettings {
    pub fn new(
        name: impl Into<String>,
        source_type: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_type: source_type.into(),
            source_url: source_url.into(),
            api_timeout: DEFAULT_SOURCE_API_TIMEOUT,
            schema_file: None,
        }
    }

    pub fn with_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_file = Some(path.into());
        self
    }
}

fn default_source_api_timeout() -> i64 {
    DEFAULT_SOURCE_API_TIMEOUT
}

/// Settings after layering and validation
#[derive(Clone, PartialEq)]
pub struct ResolvedSettings {
    pub base_url: String,
    pub client_id: String,
    pub secret: String,
    pub application_name: Option<String>,
    pub sources: Vec<SourceSettings>,
}

impl fmt::Debug for ResolvedSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedSettings")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .field("application_name", &self.application_name)
            .field("sources", &self.sources)
            .finish()
    }
}

/// Layers file, environment and explicit settings
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    env_prefix: String,
    file: Option<PathBuf>,
    environment: Option<HashMap<String, String>>,
}

impl SettingsLoader {
    pub fn new() -> Self {
        Self {
            env_prefix: ENV_PREFIX.to_string(),
            file: None,
            environment: None,
        }
    }

    /// Read defaults from a TOML file; a missing file is not an error
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Use this map instead of the process environment
    pub fn with_environment(mut self, vars: HashMap<String, String>) -> Self {
        self.environment = Some(vars);
        self
    }

    /// Merge all layers into one settings value
    pub fn load(&self, explicit: &ProviderSettings) -> Result<ProviderSettings> {
        let mut builder = Config::builder();

        if let Some(path) = &self.file {
            builder = builder.add_source(File::from(path.clone()).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix(&self.env_prefix)
                .ignore_empty(true)
                .source(self.environment.clone().map(|vars| vars.into_iter().collect())),
        );

        builder = builder
            .set_override_option("region", non_empty(&explicit.region))?
            .set_override_option("base_url", non_empty(&explicit.base_url))?
            .set_override_option("client_id", non_empty(&explicit.client_id))?
            .set_override_option("secret", non_empty(&explicit.secret))?
            .set_override_option("application_name", non_empty(&explicit.application_name))?;

        let mut settings: ProviderSettings = builder.build()?.try_deserialize()?;
        if !explicit.sources.is_empty() {
            settings.sources = explicit.sources.clone();
        }
        Ok(settings)
    }
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

impl ProviderSettings {
    /// Validate layered settings and pick the API base URL
    ///
    /// Every problem is reported, not just the first.
    pub fn resolve(&self) -> std::result::Result<ResolvedSettings, Diagnostics> {
        let mut diags = Diagnostics::new();

        let base_url = match non_empty(&self.base_url) {
            Some(url) => Some(url),
            None => {
                let region = non_empty(&self.region).unwrap_or_else(|| DEFAULT_REGION.to_string());
                match region_url(&region) {
                    Some(url) => Some(url.to_string()),
                    None => {
                        diags.add_attribute_error(
                            "region",
                            "Invalid Frontegg Region",
                            format!(
                                "The region '{region}' is not valid. Valid regions are: {}",
                                valid_regions().join(", ")
                            ),
                        );
                        None
                    }
                }
            }
        };

        let client_id = non_empty(&self.client_id);
        if client_id.is_none() {
            diags.add_attribute_error(
                "client_id",
                "Missing Frontegg Client ID",
                "The provider requires a client_id to authenticate with the Frontegg API. \
                 Set the client_id value in the provider configuration or use the \
                 FRONTEGG_CLIENT_ID environment variable.",
            );
        }

        let secret = non_empty(&self.secret);
        if secret.is_none() {
            diags.add_attribute_error(
                "secret",
                "Missing Frontegg Secret",
                "The provider requires a secret to authenticate with the Frontegg API. \
                 Set the secret value in the provider configuration or use the \
                 FRONTEGG_SECRET environment variable.",
            );
        }

        match (base_url, client_id, secret) {
            (Some(base_url), Some(client_id), Some(secret)) if !diags.has_error() => {
                Ok(ResolvedSettings {
                    base_url,
                    client_id,
                    secret,
                    application_name: non_empty(&self.application_name),
                    sources: self.sources.clone(),
                })
            }
            _ => Err(diags),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> ProviderSettings {
        ProviderSettings {
            client_id: Some("id".to_string()),
            secret: Some("secret".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_region_is_eu() {
        let resolved = creds().resolve().unwrap();
        assert_eq!(resolved.base_url, "https://api.frontegg.com");
    }

    #[test]
    fn test_region_mapping() {
        for (region, url) in [
            ("stg", "https://api.stg.frontegg.com"),
            ("us", "https://api.us.frontegg.com"),
            ("au", "https://api.au.frontegg.com"),
            ("ca", "https://api.ca.frontegg.com"),
            ("uk", "https://api.uk.frontegg.com"),
        ] {
            let settings = ProviderSettings {
                region: Some(region.to_string()),
                ..creds()
            };
            assert_eq!(settings.resolve().unwrap().base_url, url);
        }
    }

    #[test]
    fn test_base_url_wins_over_region() {
        let settings = ProviderSettings {
            region: Some("nowhere".to_string()),
            base_url: Some("http://localhost:8080".to_string()),
            ..creds()
        };
        assert_eq!(settings.resolve().unwrap().base_url, "http://localhost:8080");
    }

    #[test]
    fn test_all_problems_reported() {
        let settings = ProviderSettings {
            region: Some("mars".to_string()),
            secret: Some(String::new()),
            ..Default::default()
        };
        let diags = settings.resolve().unwrap_err();

        let attributes: Vec<_> = diags
            .iter()
            .filter_map(|d| d.attribute.as_deref())
            .collect();
        assert_eq!(attributes, vec!["region", "client_id", "secret"]);

        let region = diags.iter().next().unwrap();
        assert_eq!(
            region.detail,
            "The region 'mars' is not valid. Valid regions are: stg, eu, us, au, ca, uk"
        );
    }

    #[test]
    fn test_source_api_timeout_defaults() {
        let source: SourceSettings = serde_json::from_value(serde_json::json!({
            "name": "orders",
            "type": "REST",
            "source_url": "https://orders.example.com"
        }))
        .unwrap();
        assert_eq!(source.api_timeout, 3000);
        assert!(source.schema_file.is_none());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", creds());
        assert!(!rendered.contains("\"secret\""));
        assert!(rendered.contains("<redacted>"));
    }
}
