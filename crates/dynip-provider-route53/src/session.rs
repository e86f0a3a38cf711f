//! Mapping of session parameters onto the AWS SDK config loader

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, ConfigLoader};
use aws_sdk_route53::config::{Credentials, Region};
use dynip_core::{Error, Result, SessionParameters};
use serde::Deserialize;

/// Region used when neither the session nor the environment names one
///
/// Route 53 is a global service; any commercial-partition region reaches it.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Name reported by the static credentials provider
const CREDENTIALS_SOURCE: &str = "dynip-session-config";

/// Recognised session parameters, named after boto3's `Session` arguments
#[derive(Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionSettings {
    pub aws_access_key_id: Option<String>,
    /// ⚠️ NEVER log this value
    pub aws_secret_access_key: Option<String>,
    /// ⚠️ NEVER log this value
    pub aws_session_token: Option<String>,
    pub region_name: Option<String>,
    pub profile_name: Option<String>,
}

impl std::fmt::Debug for SessionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = |v: &Option<String>| v.as_ref().map(|_| "<REDACTED>");
        f.debug_struct("SessionSettings")
            .field("aws_access_key_id", &self.aws_access_key_id)
            .field("aws_secret_access_key", &redacted(&self.aws_secret_access_key))
            .field("aws_session_token", &redacted(&self.aws_session_token))
            .field("region_name", &self.region_name)
            .field("profile_name", &self.profile_name)
            .finish()
    }
}

impl SessionSettings {
    /// Interpret raw session parameters
    pub fn from_parameters(params: &SessionParameters) -> Result<Self> {
        let value = serde_json::to_value(params)
            .map_err(|e| Error::config(format!("Invalid session parameters: {}", e)))?;
        let settings: Self = serde_json::from_value(value)
            .map_err(|e| Error::config(format!("Invalid session parameters: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(_), None) => {
                return Err(Error::config(
                    "aws_access_key_id is set but aws_secret_access_key is missing",
                ));
            }
            (None, Some(_)) => {
                return Err(Error::config(
                    "aws_secret_access_key is set but aws_access_key_id is missing",
                ));
            }
            _ => {}
        }

        if self.aws_session_token.is_some() && self.aws_access_key_id.is_none() {
            return Err(Error::config(
                "aws_session_token requires aws_access_key_id and aws_secret_access_key",
            ));
        }

        Ok(())
    }

    /// Static credentials, if the session carries a key pair
    pub fn static_credentials(&self) -> Option<Credentials> {
        let access_key_id = self.aws_access_key_id.as_ref()?;
        let secret_access_key = self.aws_secret_access_key.as_ref()?;

        Some(Credentials::new(
            access_key_id,
            secret_access_key,
            self.aws_session_token.clone(),
            None,
            CREDENTIALS_SOURCE,
        ))
    }

    /// SDK config loader for these settings
    pub fn loader(&self) -> ConfigLoader {
        let region = RegionProviderChain::first_try(self.region_name.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::new(DEFAULT_REGION));

        let mut loader = aws_config::defaults(BehaviorVersion::latest()).region(region);

        if let Some(profile) = &self.profile_name {
            loader = loader.profile_name(profile);
        }
        if let Some(credentials) = self.static_credentials() {
            loader = loader.credentials_provider(credentials);
        }

        loader
    }
}
