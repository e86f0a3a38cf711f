//! Configuration types for the dynip updater
//!
//! Two JSON documents live in the configuration directory:
//!
//! - `aws_config.json`: session parameters, passed verbatim to the provider
//! - `hosted_zone_config.json`: which zone and record set to update
//!
//! ```json
//! {
//!   "target_hosted_zone_name": "example.com.",
//!   "target_record_set_name": "home.example.com.",
//!   "target_record_set_type": "A",
//!   "target_record_set_ttl": 300
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default configuration directory, relative to the working directory
pub const DEFAULT_CONFIG_DIR: &str = "./.config";

/// File name of the session parameters document
pub const SESSION_CONFIG_FILENAME: &str = "aws_config.json";

/// File name of the record descriptor document
pub const RECORD_CONFIG_FILENAME: &str = "hosted_zone_config.json";

/// Locations of the two configuration documents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    dir: PathBuf,
}

impl ConfigPaths {
    /// Use the given directory as the configuration base
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the session parameters document
    pub fn session_config(&self) -> PathBuf {
        self.dir.join(SESSION_CONFIG_FILENAME)
    }

    /// Path of the record descriptor document
    pub fn record_config(&self) -> PathBuf {
        self.dir.join(RECORD_CONFIG_FILENAME)
    }

    /// Base directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIG_DIR)
    }
}

/// Which DNS record to point at the public address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RecordDescriptor {
    /// Hosted zone name, fully qualified with trailing dot (e.g. "example.com.")
    pub target_hosted_zone_name: String,

    /// Record set name, fully qualified (e.g. "home.example.com.")
    pub target_record_set_name: String,

    /// Record type
    #[serde(default = "default_record_type")]
    pub target_record_set_type: String,

    /// Time-to-live in seconds
    #[serde(default = "default_record_ttl")]
    pub target_record_set_ttl: u32,
}

impl RecordDescriptor {
    /// Create a descriptor with the default type and TTL
    pub fn new(zone_name: impl Into<String>, record_name: impl Into<String>) -> Self {
        Self {
            target_hosted_zone_name: zone_name.into(),
            target_record_set_name: record_name.into(),
            target_record_set_type: default_record_type(),
            target_record_set_ttl: default_record_ttl(),
        }
    }

    /// Set the record type
    pub fn with_record_type(mut self, record_type: impl Into<String>) -> Self {
        self.target_record_set_type = record_type.into();
        self
    }

    /// Set the TTL
    pub fn with_ttl(mut self, ttl: u32) -> Self {
        self.target_record_set_ttl = ttl;
        self
    }

    /// Validate the descriptor
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.target_hosted_zone_name.is_empty() {
            return Err(crate::Error::config("target_hosted_zone_name cannot be empty"));
        }
        if self.target_record_set_name.is_empty() {
            return Err(crate::Error::config("target_record_set_name cannot be empty"));
        }
        if self.target_record_set_type.is_empty() {
            return Err(crate::Error::config("target_record_set_type cannot be empty"));
        }
        if self.target_record_set_ttl == 0 {
            return Err(crate::Error::config("target_record_set_ttl must be > 0"));
        }
        Ok(())
    }
}

fn default_record_type() -> String {
    "A".to_string()
}

fn default_record_ttl() -> u32 {
    300
}

/// Provider session parameters
///
/// The keys are whatever the provider's session constructor accepts; the
/// core never interprets them.
///
/// # Security
///
/// Values are credentials. The Debug implementation prints keys only.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionParameters(BTreeMap<String, String>);

impl SessionParameters {
    /// Create from a key/value map
    pub fn new(params: BTreeMap<String, String>) -> Self {
        Self(params)
    }

    /// Look up a parameter
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate over parameter names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for SessionParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.0.keys().map(|k| (k, "<REDACTED>")))
            .finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SessionParameters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Load the session parameters document
pub fn load_session_parameters(path: impl AsRef<Path>) -> crate::Result<SessionParameters> {
    read_json(path.as_ref())
}

/// Load and validate the record descriptor document
pub fn load_record_descriptor(path: impl AsRef<Path>) -> crate::Result<RecordDescriptor> {
    let descriptor: RecordDescriptor = read_json(path.as_ref())?;
    descriptor.validate()?;
    Ok(descriptor)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> crate::Result<T> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        crate::Error::config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        crate::Error::config(format!("Failed to parse {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_config_paths_default() {
        let paths = ConfigPaths::default();
        assert_eq!(paths.dir(), Path::new("./.config"));
        assert_eq!(
            paths.record_config(),
            Path::new("./.config").join("hosted_zone_config.json")
        );
        assert_eq!(
            paths.session_config(),
            Path::new("./.config").join("aws_config.json")
        );
    }

    #[test]
    fn test_record_descriptor_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            RECORD_CONFIG_FILENAME,
            r#"{"target_hosted_zone_name": "example.com.", "target_record_set_name": "home.example.com."}"#,
        );

        let descriptor = load_record_descriptor(&path).unwrap();
        assert_eq!(descriptor, RecordDescriptor::new("example.com.", "home.example.com."));
        assert_eq!(descriptor.target_record_set_type, "A");
        assert_eq!(descriptor.target_record_set_ttl, 300);
    }

    #[test]
    fn test_record_descriptor_explicit_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            RECORD_CONFIG_FILENAME,
            r#"{
                "target_hosted_zone_name": "example.com.",
                "target_record_set_name": "vpn.example.com.",
                "target_record_set_type": "A",
                "target_record_set_ttl": 60
            }"#,
        );

        let descriptor = load_record_descriptor(&path).unwrap();
        assert_eq!(descriptor.target_record_set_name, "vpn.example.com.");
        assert_eq!(descriptor.target_record_set_ttl, 60);
    }

    #[test]
    fn test_record_descriptor_missing_required_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            RECORD_CONFIG_FILENAME,
            r#"{"target_hosted_zone_name": "example.com."}"#,
        );

        let err = load_record_descriptor(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains("target_record_set_name"));
    }

    #[test]
    fn test_record_descriptor_unknown_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            RECORD_CONFIG_FILENAME,
            r#"{"target_hosted_zone_name": "a.", "target_record_set_name": "b.a.", "ttl": 5}"#,
        );

        assert!(matches!(
            load_record_descriptor(&path),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_record_descriptor_zero_ttl_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            RECORD_CONFIG_FILENAME,
            r#"{"target_hosted_zone_name": "a.", "target_record_set_name": "b.a.", "target_record_set_ttl": 0}"#,
        );

        assert!(matches!(
            load_record_descriptor(&path),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, SESSION_CONFIG_FILENAME, "{not json");

        let err = load_session_parameters(&path).unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
        assert!(err.to_string().contains(SESSION_CONFIG_FILENAME));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths::new(dir.path());

        assert!(matches!(
            load_record_descriptor(paths.record_config()),
            Err(crate::Error::Config(_))
        ));
        assert!(matches!(
            load_session_parameters(paths.session_config()),
            Err(crate::Error::Config(_))
        ));
    }

    #[test]
    fn test_session_parameters_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            SESSION_CONFIG_FILENAME,
            r#"{"aws_access_key_id": "AKIDEXAMPLE", "region_name": "eu-west-1"}"#,
        );

        let params = load_session_parameters(&path).unwrap();
        assert_eq!(params.get("region_name"), Some("eu-west-1"));
        assert_eq!(params.keys().collect::<Vec<_>>(), ["aws_access_key_id", "region_name"]);
    }

    #[test]
    fn test_session_parameters_debug_redacts_values() {
        let params: SessionParameters =
            [("aws_secret_access_key", "wJalrXUtnFEMI/K7MDENG")].into_iter().collect();

        let debug_str = format!("{:?}", params);
        assert!(debug_str.contains("aws_secret_access_key"));
        assert!(!debug_str.contains("wJalrXUtnFEMI"));
    }
}
