//! Loader for run configuration with YAML + environment overlays.
//!
//! Every setting has a default, so a missing `pickastock.yaml` is fine: the
//! defaults reproduce the fixed EPF report. Sources merge in this order,
//! later ones winning:
//!
//! 1. built-in defaults,
//! 2. YAML files / inline snippets, in the order they were attached,
//! 3. `PICKASTOCK__`-prefixed environment variables (`__` separates nested
//!    keys, e.g. `PICKASTOCK__OUTPUT__PDF_PATH`).
//!
//! String values may reference environment variables as `$VAR` or `${VAR}`;
//! they are expanded after merging.
use config::{Config, ConfigError, Environment, File};
use pickastock_common::observability::LogFormat;
use pickastock_common::{
    PaginationMode, DEFAULT_MAX_PAGES, DEFAULT_WAIT_TIMEOUT_SECS, SEARCH_URL, TARGET_NAME,
};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Name of the configuration file the binary looks for by default.
pub const DEFAULT_CONFIG_FILE: &str = "pickastock.yaml";

#[derive(thiserror::Error, Debug)]
pub enum ConfigLoadError {
    #[error(transparent)]
    Source(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PickastockConfig {
    pub search_url: String,
    pub target_name: String,
    pub max_pages: u32,
    pub wait_timeout_secs: u64,
    pub pagination: PaginationMode,
    pub browser: BrowserSettings,
    pub output: OutputSettings,
    pub log: LogSettings,
}

impl Default for PickastockConfig {
    fn default() -> Self {
        Self {
            search_url: SEARCH_URL.into(),
            target_name: TARGET_NAME.into(),
            max_pages: DEFAULT_MAX_PAGES,
            wait_timeout_secs: DEFAULT_WAIT_TIMEOUT_SECS,
            pagination: PaginationMode::default(),
            browser: BrowserSettings::default(),
            output: OutputSettings::default(),
            log: LogSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// WebDriver endpoint (chromedriver listens on 9515 by default).
    pub webdriver_url: String,
    pub headless: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            webdriver_url: "http://localhost:9515".into(),
            headless: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub html_path: PathBuf,
    pub pdf_path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            html_path: PathBuf::from("data.html"),
            pdf_path: PathBuf::from("results.pdf"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
}

impl PickastockConfig {
    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.max_pages == 0 {
            return Err(ConfigLoadError::Invalid(
                "max_pages must be at least 1".into(),
            ));
        }
        if self.wait_timeout_secs == 0 {
            return Err(ConfigLoadError::Invalid(
                "wait_timeout_secs must be at least 1".into(),
            ));
        }
        if self.target_name.trim().is_empty() {
            return Err(ConfigLoadError::Invalid("target_name is empty".into()));
        }
        self.parsed_search_url()?;
        Url::parse(&self.browser.webdriver_url).map_err(|e| {
            ConfigLoadError::Invalid(format!(
                "webdriver_url `{}`: {e}",
                self.browser.webdriver_url
            ))
        })?;
        Ok(())
    }

    pub fn parsed_search_url(&self) -> Result<Url, ConfigLoadError> {
        Url::parse(&self.search_url).map_err(|e| {
            ConfigLoadError::Invalid(format!("search_url `{}`: {e}", self.search_url))
        })
    }

    pub fn wait_timeout(&self) -> Duration {
        Duration::from_secs(self.wait_timeout_secs)
    }
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hides the `config` crate wiring (YAML + env overrides).
pub struct PickastockConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for PickastockConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl PickastockConfigLoader {
    /// Start from the built-in defaults.
    ///
    /// ```
    /// use pickastock_config::PickastockConfigLoader;
    ///
    /// let config = PickastockConfigLoader::new().load().expect("defaults load");
    ///
    /// assert_eq!(config.max_pages, 10);
    /// assert_eq!(config.target_name, "EMPLOYEES PROVIDENT FUND BOARD");
    /// assert_eq!(config.output.pdf_path.to_str(), Some("results.pdf"));
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is silently skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use pickastock_common::PaginationMode;
    /// use pickastock_config::PickastockConfigLoader;
    ///
    /// let cfg = PickastockConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// max_pages: 3
    /// pagination: reload
    /// browser:
    ///   headless: false
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.max_pages, 3);
    /// assert_eq!(cfg.pagination, PaginationMode::Reload);
    /// assert!(!cfg.browser.headless);
    /// assert_eq!(cfg.browser.webdriver_url, "http://localhost:9515");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder, merge `PICKASTOCK__` environment overrides on top,
    /// expand `${VAR}` placeholders, and validate the result.
    pub fn load(self) -> Result<PickastockConfig, ConfigLoadError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("PICKASTOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: PickastockConfig =
            serde_json::from_value(v).map_err(|e| ConfigLoadError::Invalid(e.to_string()))?;
        typed.validate()?;

        Ok(typed)
    }
}
