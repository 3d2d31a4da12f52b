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

//! System process access.

use super::ContextFreeGenerator;
use crate::authz::Identity;
use crate::conf::AppConfig;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::dbp::RecordStore;
use portcullis_dbp::dbp::facades::RecordStoreFacades;

/// Allow the system process role.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcess;

impl SystemProcess {
    /// Allow the system process role, unless the identity also holds the
    /// `superuser_action` directly, through its user id or through a role.
    pub fn without_admin(superuser_action: &str) -> ExcludeActionHolders<Self> {
        ExcludeActionHolders::new(Self, superuser_action).with_name("SystemProcessWithoutAdmin")
    }

    /// Like [Self::without_admin()] for the configured superuser action.
    pub fn without_admin_from(app_config: &AppConfig) -> ExcludeActionHolders<Self> {
        Self::without_admin(app_config.policy.superuser_action())
    }
}

impl ContextFreeGenerator for SystemProcess {
    fn name(&self) -> &str {
        "SystemProcess"
    }

    fn needs(&self, _store: &RecordStore) -> NeedSet {
        NeedSet::from([Need::system_process()])
    }

    fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        identity
            .provides_need(&Need::system_process())
            .then_some(FilterClause::MatchAll)
    }
}

/** Decorator excluding every holder of an action from the inner generator.

Holders are identities providing the action need itself, the user need of a
user assigned the action or the role need of a role assigned the action.
Assignments are read from the record store on each evaluation. When they
can't be read, the wildcard any-user need is excluded instead.
*/
pub struct ExcludeActionHolders<G> {
    inner: G,
    action: String,
    name: String,
}

impl<G: ContextFreeGenerator> ExcludeActionHolders<G> {
    /// Return a new instance.
    pub fn new(inner: G, action: &str) -> Self {
        let name = format!("{}Excluding({action})", inner.name());
        Self {
            inner,
            action: action.to_owned(),
            name,
        }
    }

    /// Override the name used in logs and errors.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_owned();
        self
    }

    fn action_holders(&self, store: &RecordStore) -> NeedSet {
        let grants = store.action_grant_facade();
        let users = grants.users_with_action(&self.action);
        let roles = grants.roles_with_action(&self.action);
        match (users, roles) {
            (Ok(users), Ok(roles)) => users
                .into_iter()
                .map(Need::user)
                .chain(roles.iter().map(String::as_str).map(Need::role))
                .chain([Need::action(&self.action)])
                .collect(),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!(
                    "{}: Unable to read holders of action '{}'. Excluding everyone: {e}",
                    self.name,
                    self.action
                );
                NeedSet::from([Need::any_user()])
            }
        }
    }
}

impl<G: ContextFreeGenerator> ContextFreeGenerator for ExcludeActionHolders<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn needs(&self, store: &RecordStore) -> NeedSet {
        self.inner.needs(store)
    }

    fn excludes(&self, store: &RecordStore) -> NeedSet {
        let mut excludes = self.inner.excludes(store);
        excludes.extend(self.action_holders(store));
        excludes
    }

    fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        self.inner.query_filter(identity)
    }
}
