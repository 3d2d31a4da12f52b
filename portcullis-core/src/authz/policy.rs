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

//! Action policies: which generators guard which action.

mod deposits_policy;
mod records_policy;

pub use self::deposits_policy::DEPOSITS_POLICY;
pub use self::deposits_policy::deposits_policy;
pub use self::records_policy::RECORDS_POLICY;
pub use self::records_policy::records_policy;

use super::Action;
use super::Generator;
use super::generators::Disable;
use portcullis_dbp::access::PermissionError;
use std::collections::BTreeMap;

/** Named mapping from each [Action] to an ordered list of [Generator]s.

Actions the policy does not configure are disabled. Policies may declare
labels: alternative action names resolved by [Self::action_for()].

Create a new instance with [Self::builder()].
*/
#[derive(Debug)]
pub struct PermissionPolicy {
    name: String,
    generators: BTreeMap<Action, Vec<Generator>>,
    labels: BTreeMap<String, Action>,
    disabled: Vec<Generator>,
}

impl PermissionPolicy {
    /// Start building a policy named `name`.
    pub fn builder(name: &str) -> PermissionPolicyBuilder {
        PermissionPolicyBuilder {
            name: name.to_owned(),
            generators: BTreeMap::new(),
            labels: BTreeMap::new(),
        }
    }

    /// Name of the policy.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Generators of the `action`, or [Disable] if not configured.
    pub fn generators(&self, action: Action) -> &[Generator] {
        self.generators
            .get(&action)
            .map(Vec::as_slice)
            .unwrap_or(&self.disabled)
    }

    /// Return `true` if the policy configures the `action`.
    pub fn is_configured(&self, action: Action) -> bool {
        self.generators.contains_key(&action)
    }

    /// Resolve an action name or label of this policy.
    pub fn action_for(&self, name: &str) -> Result<Action, PermissionError> {
        match self.labels.get(name) {
            Some(action) => Ok(*action),
            None => name.parse(),
        }
    }
}

/// Builder of [PermissionPolicy].
pub struct PermissionPolicyBuilder {
    name: String,
    generators: BTreeMap<Action, Vec<Generator>>,
    labels: BTreeMap<String, Action>,
}

impl PermissionPolicyBuilder {
    /// Guard the `action` with the `generators`, replacing earlier ones.
    pub fn with_action(mut self, action: Action, generators: Vec<Generator>) -> Self {
        self.generators.insert(action, generators);
        self
    }

    /// Resolve `label` as the `action`.
    pub fn with_label(mut self, label: &str, action: Action) -> Self {
        self.labels.insert(label.to_owned(), action);
        self
    }

    /// Return the policy.
    pub fn build(self) -> PermissionPolicy {
        if log::log_enabled!(log::Level::Debug) {
            let disabled = Action::ALL
                .iter()
                .filter(|action| !self.generators.contains_key(action))
                .map(Action::as_str)
                .collect::<Vec<_>>();
            if !disabled.is_empty() {
                log::debug!(
                    "Policy '{}' disables unconfigured actions {disabled:?}.",
                    self.name
                );
            }
        }
        PermissionPolicy {
            name: self.name,
            generators: self.generators,
            labels: self.labels,
            disabled: vec![Generator::context_free(Disable)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::generators::AnyUser;
    use portcullis_dbp::access::PermissionErrorKind;

    #[test]
    fn unconfigured_actions_are_disabled() {
        let policy = PermissionPolicy::builder("tiny")
            .with_action(Action::Read, vec![Generator::context_free(AnyUser)])
            .build();
        assert_eq!(policy.name(), "tiny");
        assert!(policy.is_configured(Action::Read));
        assert_eq!(policy.generators(Action::Read)[0].name(), "AnyUser");
        assert!(!policy.is_configured(Action::Delete));
        let delete = policy.generators(Action::Delete);
        assert_eq!(delete.len(), 1);
        assert_eq!(delete[0].name(), "Disable");
        let debug = format!("{policy:?}");
        assert!(debug.contains("tiny"));
        assert!(debug.contains("AnyUser"));
    }

    #[test]
    fn labels_and_names() {
        let policy = PermissionPolicy::builder("tiny")
            .with_label("object-read", Action::ReadFiles)
            .build();
        assert_eq!(policy.action_for("object-read").unwrap(), Action::ReadFiles);
        assert_eq!(policy.action_for("update").unwrap(), Action::Update);
        assert_eq!(policy.action_for("list").unwrap(), Action::Search);
        assert_eq!(
            policy.action_for("bogus").unwrap_err().kind(),
            &PermissionErrorKind::UnknownAction
        );
    }
}
