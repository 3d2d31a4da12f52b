/*
    Copyright 2025 MydriaTech AB

    Licensed under the Apache License 2.0 with Free world makers exception
    1.0.0 (the "License"); you may not use this file except in compliance with
    the License. You should have obtained a copy of the License with the source
    or binary distribution in file named

        LICENSE-Apache-2.0-with-FWM-Exception-1.0.0

    Unless required by applicable law or agreed to in writing, software
    distributed under the License is distributed on an "AS IS" BASIS,
    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
    See the License for the specific language governing permissions and
    limitations under the License.
*/

//! Parsing of application configuration.

mod access_level_config;
mod policy_config;

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use config::FileFormat;
use config::builder::BuilderState;
use config::builder::DefaultState;
use serde::Deserialize;
use serde::Serialize;

pub use self::access_level_config::AccessLevelConfig;
pub use self::policy_config::PolicyConfig;

/// Package name reported by Cargo at build time.
const CARGO_PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Static trait for tracking implementations.
trait AppConfigDefaults {
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError>;
}

/**
Application configration root.

The application name defaults to the Rust package name, but can be overridden
with the environment variable `APP_NAME`.

Configuration will be loaded from

1. the file `{application name}.json` in the current working directory.
2. environment variable overrides in the form
   `{APPLICATION_NAME}_SECTION_CONFIGKEYWITHOUTSPACES`. Access level lists
   are comma separated.
 */
#[derive(Debug, Deserialize, Serialize)]
pub struct AppConfig {
    /// Selection of permission policies and special actions.
    pub policy: PolicyConfig,
    /// Mapping of actions to record access levels.
    pub accesslevels: AccessLevelConfig,

    /// Lower case application name. Ignored when loading configuration.
    #[serde(skip_deserializing)]
    app_name: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            policy: PolicyConfig::default(),
            accesslevels: AccessLevelConfig::default(),
            app_name: CARGO_PKG_NAME.to_owned(),
        }
    }
}

impl AppConfig {
    /// The application name defaults to the Rust package name, but can be
    /// overridden with the environment variable `APP_NAME`.
    fn read_app_name_lowercase(cargo_pkg_name: &str) -> String {
        std::env::var("APP_NAME")
            .map_err(|e| {
                log::debug!(
                    "Environment variable APP_NAME: {e:?} -> Default app name '{cargo_pkg_name}' will be used."
                );
            })
            .ok()
            .map(|value| value.to_lowercase())
            .unwrap_or(cargo_pkg_name.to_owned())
    }

    /// Lower case application name.
    pub fn app_name_lowercase(&self) -> &str {
        &self.app_name
    }

    fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let config_builder = Config::builder();
        let config_builder = PolicyConfig::set_defaults(config_builder, "policy")?;
        AccessLevelConfig::set_defaults(config_builder, "accesslevels")
    }

    /** Creates a new instance pre-populated with defaults, an optional
    configurations file and environment variable overrides.

    Use `env!("CARGO_PKG_NAME")` as `cargo_pkg_name`.
    */
    pub fn new(cargo_pkg_name: &str) -> Result<Self, ConfigError> {
        let app_name = Self::read_app_name_lowercase(cargo_pkg_name);
        let config_filename = app_name.to_owned() + ".json";
        let config_env_prefix = &app_name.to_uppercase();
        let conf_file = std::env::current_dir()
            .map_err(|e| ConfigError::Foreign(Box::new(e)))?
            .join(config_filename);
        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "Will load '{}' configuration if present.",
                conf_file.display()
            );
        }
        let config = Self::builder_with_defaults()?
            .add_source(File::from(conf_file).required(false))
            .add_source(
                Environment::with_prefix(config_env_prefix)
                    .try_parsing(true)
                    .separator("_")
                    .list_separator(",")
                    .with_list_parse_key("accesslevels.create")
                    .with_list_parse_key("accesslevels.read")
                    .with_list_parse_key("accesslevels.update")
                    .with_list_parse_key("accesslevels.delete"),
            )
            .build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.app_name = app_name;
        app_config.log_loaded();
        Ok(app_config)
    }

    /// Creates a new instance from defaults overridden by a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config = Self::builder_with_defaults()?
            .add_source(File::from_str(json, FileFormat::Json))
            .build()?;
        let mut app_config: AppConfig = config.try_deserialize()?;
        app_config.app_name = CARGO_PKG_NAME.to_owned();
        app_config.log_loaded();
        Ok(app_config)
    }

    fn log_loaded(&self) {
        log::info!("Running with configuration: {self:?}");
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "Running with configuration: {}",
                serde_json::to_string(&self).unwrap_or_default()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let app_config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(app_config.policy.record_policy(), "records");
        assert_eq!(app_config.policy.deposit_policy(), "deposits");
        assert_eq!(app_config.policy.superuser_action(), "superuser-access");
        assert_eq!(app_config.policy.admin_action(), "admin-access");
        assert!(app_config.accesslevels.create.is_empty());
        assert_eq!(app_config.accesslevels.read, vec!["metadata_curator"]);
        assert_eq!(app_config.accesslevels.update, vec!["metadata_curator"]);
        assert!(app_config.accesslevels.delete.is_empty());
        assert_eq!(app_config.app_name_lowercase(), "portcullis_core");
    }

    #[test]
    fn overrides() {
        let app_config = AppConfig::from_json_str(
            r#"{
                "policy": {"record": "custom-records", "adminaction": "root"},
                "accesslevels": {"read": ["metadata_curator", "metadata_reader"]}
            }"#,
        )
        .unwrap();
        assert_eq!(app_config.policy.record_policy(), "custom-records");
        assert_eq!(app_config.policy.deposit_policy(), "deposits");
        assert_eq!(app_config.policy.admin_action(), "root");
        assert_eq!(
            app_config.accesslevels.read,
            vec!["metadata_curator", "metadata_reader"]
        );
        assert_eq!(app_config.accesslevels.update, vec!["metadata_curator"]);
    }

    #[test]
    fn missing_config_file_is_optional() {
        let app_config = AppConfig::new("portcullis_test_without_file").unwrap();
        assert_eq!(app_config.policy.record_policy(), "records");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(AppConfig::from_json_str("{").is_err());
    }
}
