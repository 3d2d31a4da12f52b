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

//! Parsing of configuration for permission policy selection.

use config::ConfigBuilder;
use config::ConfigError;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;

/// Selection of permission policies and special actions.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PolicyConfig {
    /// Name of the policy for published records.
    record: String,
    /// Name of the policy for deposits.
    deposit: String,
    /// Name of the superuser action.
    superuseraction: String,
    /// Name of the administrator action.
    adminaction: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            record: "records".to_owned(),
            deposit: "deposits".to_owned(),
            superuseraction: "superuser-access".to_owned(),
            adminaction: "admin-access".to_owned(),
        }
    }
}

impl AppConfigDefaults for PolicyConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError> {
        let defaults = Self::default();
        config_builder
            .set_default(prefix.to_string() + "." + "record", defaults.record)?
            .set_default(prefix.to_string() + "." + "deposit", defaults.deposit)?
            .set_default(
                prefix.to_string() + "." + "superuseraction",
                defaults.superuseraction,
            )?
            .set_default(prefix.to_string() + "." + "adminaction", defaults.adminaction)
    }
}

impl PolicyConfig {
    /// Name of the policy for published records. Defaults to `records`.
    pub fn record_policy(&self) -> &str {
        &self.record
    }

    /// Name of the policy for deposits. Defaults to `deposits`.
    pub fn deposit_policy(&self) -> &str {
        &self.deposit
    }

    /// Name of the superuser action. Defaults to `superuser-access`.
    pub fn superuser_action(&self) -> &str {
        &self.superuseraction
    }

    /// Name of the administrator action. Defaults to `admin-access`.
    pub fn admin_action(&self) -> &str {
        &self.adminaction
    }
}
