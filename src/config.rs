//! Configuration loading and merging.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable overriding the user config location.
pub const CONFIG_ENV: &str = "SLURMIFY_CONFIG";

/// File name of the per-directory config.
pub const PROJECT_CONFIG: &str = ".slurmify.toml";

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("error: required flags {0} are missing")]
    MissingRequired(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

/// Partial job settings from one source (config file or command line).
///
/// Unset fields fall through to lower-precedence sources.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Directory for generated `.sbatch` files.
    pub output_dir: Option<PathBuf>,
    /// Directory for scheduler stdout/stderr logs.
    pub logs_dir: Option<PathBuf>,
    pub partition: Option<String>,
    pub account: Option<String>,
    /// Generic resource request, e.g. `gpu:1`.
    pub gres: Option<String>,
    pub cpus: Option<u32>,
    pub mem: Option<String>,
    pub time: Option<String>,
    /// Address for begin/end/fail notifications.
    pub email: Option<String>,
    pub job_prefix: Option<String>,
    /// Environment module loaded before the command runs.
    pub module: Option<String>,
    pub audit: AuditConfig,
}

/// Audit logging configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AuditConfig {
    /// Enable audit logging.
    pub enabled: bool,
    /// Path to audit log file.
    pub path: Option<PathBuf>,
}

/// Resolved, read-only job parameters for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub logs_dir: PathBuf,
    pub partition: String,
    pub account: String,
    pub gres: Option<String>,
    pub cpus: u32,
    pub mem: String,
    pub time: String,
    pub email: Option<String>,
    pub job_prefix: String,
    pub module: Option<String>,
}

impl Settings {
    /// Load file-based settings, later sources overriding earlier ones:
    /// user config, project config in `cwd`, then `explicit`.
    pub fn load(cwd: Option<&Path>, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = Settings::default();

        if let Some(user) = Self::user_config_path() {
            if user.exists() {
                settings = Self::from_file(&user)?;
            }
        }

        if let Some(cwd) = cwd {
            let project = cwd.join(PROJECT_CONFIG);
            if project.exists() {
                settings.merge(Self::from_file(&project)?);
            }
        }

        // Explicitly requested files must exist
        if let Some(path) = explicit {
            settings.merge(Self::from_file(path)?);
        }

        Ok(settings)
    }

    /// Parse settings from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get user config path.
    /// Respects SLURMIFY_CONFIG env var for testing.
    fn user_config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        dirs::config_dir().map(|d| d.join("slurmify").join("config.toml"))
    }

    /// Merge another source into this one (other takes precedence).
    pub fn merge(&mut self, other: Settings) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.output_dir, other.output_dir);
        take(&mut self.logs_dir, other.logs_dir);
        take(&mut self.partition, other.partition);
        take(&mut self.account, other.account);
        take(&mut self.gres, other.gres);
        take(&mut self.cpus, other.cpus);
        take(&mut self.mem, other.mem);
        take(&mut self.time, other.time);
        take(&mut self.email, other.email);
        take(&mut self.job_prefix, other.job_prefix);
        take(&mut self.module, other.module);

        if other.audit.enabled {
            self.audit.enabled = true;
            if other.audit.path.is_some() {
                self.audit.path = other.audit.path;
            }
        }
    }

    /// Audit log destination, if auditing is enabled.
    pub fn audit_path(&self) -> Option<&Path> {
        if self.audit.enabled {
            self.audit.path.as_deref()
        } else {
            None
        }
    }
}

impl Config {
    /// Fill in defaults and check required parameters.
    pub fn resolve(input: Option<PathBuf>, settings: Settings) -> Result<Self, ConfigError> {
        let account = non_empty(settings.account);

        let mut missing = Vec::new();
        if input.is_none() {
            missing.push("-I (Input)");
        }
        if account.is_none() {
            missing.push("-A (Account)");
        }
        let (Some(input), Some(account)) = (input, account) else {
            return Err(ConfigError::MissingRequired(missing.join(" and ")));
        };

        let cpus = settings.cpus.unwrap_or(1);
        if cpus == 0 {
            return Err(ConfigError::InvalidValue {
                field: "cpus",
                reason: "must be at least 1".to_string(),
            });
        }

        let job_prefix = non_empty(settings.job_prefix).unwrap_or_else(|| "job".to_string());
        if job_prefix.contains('/') {
            return Err(ConfigError::InvalidValue {
                field: "job_prefix",
                reason: format!("'{job_prefix}' must not contain '/'"),
            });
        }

        Ok(Config {
            input,
            output_dir: settings.output_dir.unwrap_or_else(|| PathBuf::from("./Sbatch")),
            logs_dir: settings.logs_dir.unwrap_or_else(|| PathBuf::from("./Logs")),
            partition: non_empty(settings.partition).unwrap_or_else(|| "standard".to_string()),
            account,
            gres: non_empty(settings.gres),
            cpus,
            mem: non_empty(settings.mem).unwrap_or_else(|| "4G".to_string()),
            time: non_empty(settings.time).unwrap_or_else(|| "01:00:00".to_string()),
            email: non_empty(settings.email),
            job_prefix,
            module: non_empty(settings.module),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
