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

//! Registry of named permission policies.

use super::PermissionPolicy;
use super::policy::deposits_policy;
use super::policy::records_policy;
use crate::conf::AppConfig;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::map::Entry;
use portcullis_dbp::access::PermissionError;
use portcullis_dbp::access::PermissionErrorKind;
use std::sync::Arc;

/// Registry of named permission policies.
///
/// Comes with the built-in `records` and `deposits` policies. Registering a
/// policy under an existing name replaces it.
pub struct PolicyRegistry {
    policies: SkipMap<String, Arc<PermissionPolicy>>,
}

impl PolicyRegistry {
    /// Return a new instance with the built-in policies.
    pub fn new(app_config: &AppConfig) -> Arc<Self> {
        let registry = Self {
            policies: SkipMap::default(),
        };
        registry.register(records_policy(app_config));
        registry.register(deposits_policy(app_config));
        Arc::new(registry)
    }

    /// Register the `policy` under its name.
    pub fn register(&self, policy: PermissionPolicy) {
        let name = policy.name().to_owned();
        if self.policies.contains_key(&name) {
            log::info!("Replacing permission policy '{name}'.");
        } else {
            log::debug!("Registered permission policy '{name}'.");
        }
        self.policies.insert(name, Arc::new(policy));
    }

    /// Return the policy registered under `name`.
    pub fn get(&self, name: &str) -> Result<Arc<PermissionPolicy>, PermissionError> {
        self.policies
            .get(name)
            .as_ref()
            .map(Entry::value)
            .map(Arc::clone)
            .ok_or_else(|| {
                PermissionErrorKind::UnknownPolicy
                    .error_with_msg(format!("No permission policy named '{name}'."))
            })
    }

    /// Names of all registered policies, in order.
    pub fn names(&self) -> Vec<String> {
        self.policies
            .iter()
            .map(|entry| entry.key().to_owned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::Action;
    use crate::authz::Generator;
    use crate::authz::generators::AnyUser;

    #[test]
    fn built_in_policies() {
        let registry = PolicyRegistry::new(&AppConfig::default());
        assert_eq!(registry.names(), ["deposits", "records"]);
        assert_eq!(registry.get("records").unwrap().name(), "records");
        assert_eq!(
            registry.get("missing").unwrap_err().kind(),
            &PermissionErrorKind::UnknownPolicy
        );
    }

    #[test]
    fn last_registration_wins() {
        let registry = PolicyRegistry::new(&AppConfig::default());
        registry.register(
            PermissionPolicy::builder("records")
                .with_action(Action::Delete, vec![Generator::context_free(AnyUser)])
                .build(),
        );
        let policy = registry.get("records").unwrap();
        assert_eq!(policy.generators(Action::Delete)[0].name(), "AnyUser");
        assert_eq!(policy.generators(Action::Read)[0].name(), "Disable");
    }
}
