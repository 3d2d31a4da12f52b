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

//! Permission factories bound to a policy and a record store.

use super::Action;
use super::Identity;
use super::Permission;
use super::PermissionPolicy;
use super::PolicyRegistry;
use super::Resource;
use crate::conf::AppConfig;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::PermissionError;
use portcullis_dbp::dbp::RecordStore;
use std::sync::Arc;

/** Creates [Permission]s from a [PermissionPolicy].

The policy is resolved once, when the factory is created.
*/
pub struct PermissionFactory {
    policy: Arc<PermissionPolicy>,
    store: RecordStore,
}

impl PermissionFactory {
    /// Return a new instance using the `policy`.
    pub fn new(policy: Arc<PermissionPolicy>, store: RecordStore) -> Self {
        log::info!("Permissions use policy '{}'.", policy.name());
        Self { policy, store }
    }

    /// Return a new instance for published records using the configured
    /// record policy.
    pub fn for_records(
        app_config: &AppConfig,
        registry: &PolicyRegistry,
        store: RecordStore,
    ) -> Result<Self, PermissionError> {
        Ok(Self::new(
            registry.get(app_config.policy.record_policy())?,
            store,
        ))
    }

    /// Return a new instance for deposits using the configured deposit
    /// policy.
    pub fn for_deposits(
        app_config: &AppConfig,
        registry: &PolicyRegistry,
        store: RecordStore,
    ) -> Result<Self, PermissionError> {
        Ok(Self::new(
            registry.get(app_config.policy.deposit_policy())?,
            store,
        ))
    }

    /// The resolved policy.
    pub fn policy(&self) -> &PermissionPolicy {
        &self.policy
    }

    /// Resolve an action name or a label of the policy.
    pub fn action(&self, name: &str) -> Result<Action, PermissionError> {
        self.policy.action_for(name)
    }

    /// The permission to perform `action` on `resource`.
    pub fn permission<'a>(&'a self, action: Action, resource: Resource<'a>) -> Permission<'a> {
        Permission::new(
            action,
            self.policy.generators(action),
            resource,
            &self.store,
        )
    }

    /// The permission to perform the named action on `resource`.
    pub fn permission_by_name<'a>(
        &'a self,
        action: &str,
        resource: Resource<'a>,
    ) -> Result<Permission<'a>, PermissionError> {
        Ok(self.permission(self.action(action)?, resource))
    }

    /// See [Permission::needs()].
    pub fn needs(&self, action: &str, resource: Resource) -> Result<NeedSet, PermissionError> {
        self.permission_by_name(action, resource)?.needs()
    }

    /// See [Permission::excludes()].
    pub fn excludes(&self, action: &str, resource: Resource) -> Result<NeedSet, PermissionError> {
        self.permission_by_name(action, resource)?.excludes()
    }

    /// See [Permission::query_filter()].
    pub fn query_filter(
        &self,
        action: &str,
        identity: &Identity,
    ) -> Result<FilterClause, PermissionError> {
        Ok(self
            .permission_by_name(action, Resource::None)?
            .query_filter(identity))
    }

    /// Permission to search.
    pub fn search_permission(&self) -> Permission<'_> {
        self.permission(Action::Search, Resource::None)
    }

    /// Permission to create.
    pub fn create_permission<'a>(&'a self, resource: Resource<'a>) -> Permission<'a> {
        self.permission(Action::Create, resource)
    }

    /// Permission to read.
    pub fn read_permission<'a>(&'a self, resource: Resource<'a>) -> Permission<'a> {
        self.permission(Action::Read, resource)
    }

    /// Permission to update.
    pub fn update_permission<'a>(&'a self, resource: Resource<'a>) -> Permission<'a> {
        self.permission(Action::Update, resource)
    }

    /// Permission to delete.
    pub fn delete_permission<'a>(&'a self, resource: Resource<'a>) -> Permission<'a> {
        self.permission(Action::Delete, resource)
    }

    /// Permission to read files.
    pub fn read_files_permission<'a>(&'a self, resource: Resource<'a>) -> Permission<'a> {
        self.permission(Action::ReadFiles, resource)
    }

    /// Permission to update files.
    pub fn update_files_permission<'a>(&'a self, resource: Resource<'a>) -> Permission<'a> {
        self.permission(Action::UpdateFiles, resource)
    }
}
