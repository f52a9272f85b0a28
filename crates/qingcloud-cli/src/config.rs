//! Credentials and default zone, read once per invocation.

use std::fmt;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use qingcloud::{QingCloudError, debug};
use serde::Deserialize;

pub const ACCESS_KEY_ID: &str = "qy_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "qy_secret_access_key";
pub const ZONE: &str = "zone";

/// File names searched in the home directory when `--config` is absent.
pub const DEFAULT_CONFIG_NAMES: [&str; 3] = [".qingcloud.yaml", ".qingcloud.yml", ".qingcloud.json"];

pub const DEMO_CONFIG: &str = "qy_access_key_id: 'QYACCESSKEYIDEXAMPLE'\n\
                               qy_secret_access_key: 'SECRETACCESSKEY'\n\
                               zone: 'pek3'\n";

/// Raw contents of a configuration file; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub qy_access_key_id: Option<String>,
    #[serde(default)]
    pub qy_secret_access_key: Option<String>,
    #[serde(default)]
    pub zone: Option<String>,
}

/// Configuration loader with file I/O operations.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a config file. JSON (.json) and YAML (.yaml/.yml) are chosen by
    /// extension; anything else tries JSON, then YAML.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ConfigFile, QingCloudError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| QingCloudError::from_io_error(e, "config loading"))?;
        if content.trim().is_empty() {
            return Ok(ConfigFile::default());
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match extension.to_lowercase().as_str() {
            "json" => serde_json::from_str(&content)
                .map_err(|e| QingCloudError::from_parse_error(e, "JSON config parsing")),
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .map_err(|e| QingCloudError::from_parse_error(e, "YAML config parsing")),
            _ => serde_json::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| {
                    QingCloudError::from_parse_error(e, "config parsing (tried both JSON and YAML)")
                }),
        }
    }

    /// First default config file present in `home`.
    pub fn find_in(home: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| home.join(name))
            .find(|path| path.is_file())
    }

    pub fn default_path() -> Option<PathBuf> {
        BaseDirs::new().and_then(|dirs| Self::find_in(dirs.home_dir()))
    }

    /// Reads `explicit` if given (it must exist), else the default file in
    /// the home directory if there is one, else an empty configuration.
    pub fn load(explicit: Option<&Path>) -> Result<ConfigFile, QingCloudError> {
        match explicit {
            Some(path) => {
                debug!("Using config file from the flag: {}", path.display());
                Self::from_path(path)
            }
            None => match Self::default_path() {
                Some(path) => {
                    debug!("Using config file {}", path.display());
                    Self::from_path(path)
                }
                None => {
                    debug!("No config file found, relying on the environment");
                    Ok(ConfigFile::default())
                }
            },
        }
    }
}

/// Resolved settings handed to the dispatcher.
#[derive(Clone, PartialEq)]
pub struct Config {
    pub access_key_id: String,
    pub secret_access_key: String,
    /// May be empty; the dispatcher validates it.
    pub zone: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("zone", &self.zone)
            .finish()
    }
}

impl Config {
    /// Layers file values, then environment variables (upper-cased keys),
    /// then `zone_override` for the zone.
    pub fn resolve<F>(
        file: ConfigFile,
        env: F,
        zone_override: Option<&str>,
    ) -> Result<Self, QingCloudError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str, file_value: Option<String>| {
            env(&key.to_uppercase())
                .filter(|value| !value.is_empty())
                .or(file_value.filter(|value| !value.is_empty()))
        };

        let access_key_id =
            lookup(ACCESS_KEY_ID, file.qy_access_key_id).ok_or_else(|| missing(ACCESS_KEY_ID))?;
        let secret_access_key = lookup(SECRET_ACCESS_KEY, file.qy_secret_access_key)
            .ok_or_else(|| missing(SECRET_ACCESS_KEY))?;
        let zone = match zone_override.filter(|zone| !zone.is_empty()) {
            Some(zone) => zone.to_string(),
            None => lookup(ZONE, file.zone).unwrap_or_default(),
        };

        Ok(Config {
            access_key_id,
            secret_access_key,
            zone,
        })
    }

    /// Loads the config file and resolves it against the process environment.
    pub fn load(explicit: Option<&Path>, zone_override: Option<&str>) -> Result<Self, QingCloudError> {
        let file = ConfigLoader::load(explicit)?;
        Self::resolve(file, |key| std::env::var(key).ok(), zone_override)
    }
}

fn missing(key: &str) -> QingCloudError {
    QingCloudError::ConfigurationMissing {
        key: key.to_string(),
    }
}
