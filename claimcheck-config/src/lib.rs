//! Loader for Claimcheck configuration with YAML + environment overlays.
//!
//! Sources are merged in this order, later ones winning:
//!
//! 1. built-in defaults (every field is optional),
//! 2. YAML files and inline snippets, in the order they were attached,
//! 3. `CLAIMCHECK__`-prefixed environment variables, `__` separating levels
//!    (`CLAIMCHECK__SERVICE__BASE_URL=http://fact.example:8000`).
//!
//! After merging, `${VAR}` placeholders inside string values are expanded
//! from the process environment. Unknown variables are left untouched.
//!
//! ```yaml
//! service:
//!   base_url: "http://localhost:8000"
//!   detect_path: "detect"
//!   timeout_secs: 30
//!   retries: 0
//! checker:
//!   stale_policy: last_completed   # or latest_submitted
//! logging:
//!   format: text                   # or json
//!   dir: "~/.local/share/claimcheck"
//!   filter: "info"
//!   stderr: false
//! ```
use claimcheck_common::{DEFAULT_SERVICE_URL, LogFormat};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Default file name looked up in the working directory by the binary.
pub const DEFAULT_CONFIG_FILE: &str = "claimcheck.yaml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClaimcheckConfig {
    pub service: ServiceConfig,
    pub checker: CheckerConfig,
    pub logging: LoggingConfig,
}

/// Where and how to reach the verification service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub base_url: String,
    pub detect_path: String,
    pub timeout_secs: u64,
    pub retries: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            detect_path: "detect".to_string(),
            timeout_secs: 30,
            retries: 0,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    pub stale_policy: StalePolicySetting,
}

/// What to do with a response whose submission has been superseded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicySetting {
    /// Whatever completes last is shown.
    #[default]
    LastCompleted,
    /// Only the most recent submission may write the display.
    LatestSubmitted,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    pub dir: Option<PathBuf>,
    pub filter: String,
    pub stderr: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Text,
            dir: None,
            filter: "info".to_string(),
            stderr: false,
        }
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
pub struct ClaimcheckConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    files: Vec<(PathBuf, bool)>,
    snippets: Vec<String>,
}

impl Default for ClaimcheckConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimcheckConfigLoader {
    /// Start with no files attached; only defaults and `CLAIMCHECK__` env apply.
    ///
    /// ```
    /// use claimcheck_config::ClaimcheckConfigLoader;
    ///
    /// let config = ClaimcheckConfigLoader::new()
    ///     .with_yaml_str("service:\n  timeout_secs: 5")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.service.timeout_secs, 5);
    /// assert_eq!(config.service.detect_path, "detect");
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
            files: Vec::new(),
            snippets: Vec::new(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format inferred by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), true));
        self
    }

    /// Attach a file that is skipped silently when absent.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.files.push((path.as_ref().to_path_buf(), false));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use claimcheck_config::{ClaimcheckConfigLoader, StalePolicySetting};
    ///
    /// let cfg = ClaimcheckConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// checker:
    ///   stale_policy: latest_submitted
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.checker.stale_policy, StalePolicySetting::LatestSubmitted);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.snippets.push(yaml.to_string());
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly typed config.
    ///
    /// ```
    /// use claimcheck_config::ClaimcheckConfigLoader;
    ///
    /// unsafe { std::env::set_var("FACT_HOST", "fact.example"); }
    ///
    /// let config = ClaimcheckConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// service:
    ///   base_url: "http://${FACT_HOST}:9000"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// assert_eq!(config.service.base_url, "http://fact.example:9000");
    ///
    /// unsafe { std::env::remove_var("FACT_HOST"); }
    /// ```
    pub fn load(self) -> Result<ClaimcheckConfig, ConfigError> {
        let mut builder = self.builder;
        for (path, required) in &self.files {
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }
        for yaml in &self.snippets {
            builder = builder.add_source(File::from_str(yaml, config::FileFormat::Yaml));
        }
        builder = builder.add_source(
            Environment::with_prefix("CLAIMCHECK")
                .separator("__")
                .try_parsing(true),
        );

        let cfg = builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: ClaimcheckConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("FOO", Some("bar"), || {
            let mut v = json!("prefix-${FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars([("HOST", Some("fact.local")), ("PORT", Some("8000"))], || {
            let mut v = json!([
                "http://$HOST",
                { "url": "${HOST}:${PORT}" },
                42,
                true,
                null
            ]);
            expand_env_in_value(&mut v);
            assert_eq!(
                v,
                json!(["http://fact.local", { "url": "fact.local:8000" }, 42, true, null])
            );
        });
    }

    #[test]
    fn expands_through_nested_variables() {
        temp_env::with_vars(
            [
                ("BAZ", Some("qux")),
                ("BAR", Some("mid-${BAZ}")),
                ("FOO", Some("start-${BAR}-end")),
            ],
            || {
                let mut v = json!("X=${FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars([("A", Some("${B}")), ("B", Some("${A}"))], || {
            let mut v = json!("x=${A}-y");
            expand_env_in_value(&mut v);
            let s = v.as_str().unwrap();
            assert!(s.starts_with("x=") && s.ends_with("-y"));
            assert!(s.contains("${"));
        });
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${CLAIMCHECK_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${CLAIMCHECK_DOES_NOT_EXIST}"));
    }

    #[test]
    fn empty_sources_yield_defaults() {
        let cfg = ClaimcheckConfigLoader::new().load().unwrap();
        assert_eq!(cfg.service.base_url, DEFAULT_SERVICE_URL);
        assert_eq!(cfg.service.retries, 0);
        assert_eq!(cfg.checker.stale_policy, StalePolicySetting::LastCompleted);
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn unknown_stale_policy_is_rejected() {
        let err = ClaimcheckConfigLoader::new()
            .with_yaml_str("checker:\n  stale_policy: whenever")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("whenever"));
    }
}
