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

//! Parsing of configuration for record access levels.

use config::ConfigBuilder;
use config::ConfigError;
use config::builder::BuilderState;
use serde::Deserialize;
use serde::Serialize;

use super::AppConfigDefaults;
use crate::authz::Action;

/// Access levels granting each action.
///
/// A user listed with the `person` scheme under one of the levels of an
/// action in the record's `internal.access_levels` may perform the action.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AccessLevelConfig {
    /// Levels granting `create`.
    pub create: Vec<String>,
    /// Levels granting `read`. Searches are filtered by these levels.
    pub read: Vec<String>,
    /// Levels granting `update`.
    pub update: Vec<String>,
    /// Levels granting `delete`.
    pub delete: Vec<String>,
}

impl Default for AccessLevelConfig {
    fn default() -> Self {
        Self {
            create: vec![],
            read: vec![Self::METADATA_CURATOR.to_owned()],
            update: vec![Self::METADATA_CURATOR.to_owned()],
            delete: vec![],
        }
    }
}

impl AppConfigDefaults for AccessLevelConfig {
    /// Provide defaults for this part of the configuration
    fn set_defaults<T: BuilderState>(
        config_builder: ConfigBuilder<T>,
        prefix: &str,
    ) -> Result<ConfigBuilder<T>, ConfigError> {
        let defaults = Self::default();
        config_builder
            .set_default(prefix.to_string() + "." + "create", defaults.create)?
            .set_default(prefix.to_string() + "." + "read", defaults.read)?
            .set_default(prefix.to_string() + "." + "update", defaults.update)?
            .set_default(prefix.to_string() + "." + "delete", defaults.delete)
    }
}

impl AccessLevelConfig {
    /// Access level of curators.
    pub const METADATA_CURATOR: &'static str = "metadata_curator";

    /// Levels granting the `action`. Actions without levels get none.
    pub fn levels_for(&self, action: Action) -> &[String] {
        match action {
            Action::Create => &self.create,
            Action::Read => &self.read,
            Action::Update => &self.update,
            Action::Delete => &self.delete,
            Action::Search | Action::ReadFiles | Action::UpdateFiles => &[],
        }
    }
}
