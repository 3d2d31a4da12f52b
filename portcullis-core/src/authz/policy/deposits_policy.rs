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

//! Built-in policy for deposits.

use super::PermissionPolicy;
use crate::authz::Action;
use crate::authz::Generator;
use crate::authz::generators::*;
use crate::conf::AppConfig;

/// Name of the built-in policy for deposits.
pub const DEPOSITS_POLICY: &str = "deposits";

/// Policy for deposits: drafts only their owners work with.
///
/// Any authenticated user may create a deposit. Only administrators delete
/// them.
pub fn deposits_policy(app_config: &AppConfig) -> PermissionPolicy {
    let owners = || vec![Generator::record(DepositOwners)];
    let files_owners = || vec![Generator::bucket_record(DepositOwners)];
    PermissionPolicy::builder(DEPOSITS_POLICY)
        .with_action(Action::Search, owners())
        .with_action(
            Action::Create,
            vec![Generator::context_free(AuthenticatedUser)],
        )
        .with_action(Action::Read, owners())
        .with_action(Action::Update, owners())
        .with_action(
            Action::Delete,
            vec![Generator::context_free(Admin::new(
                app_config.policy.admin_action(),
            ))],
        )
        .with_action(Action::ReadFiles, files_owners())
        .with_action(Action::UpdateFiles, files_owners())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::Identity;
    use crate::authz::Permission;
    use crate::authz::Resource;
    use portcullis_dbp::access::FilterClause;
    use portcullis_dbp::access::Need;
    use portcullis_dbp::access::RecordDocument;
    use portcullis_dbp_mem::InMemoryRecordStore;
    use serde_json::json;

    #[test]
    fn deposit_owners_only() {
        let policy = deposits_policy(&AppConfig::default());
        assert_eq!(policy.name(), DEPOSITS_POLICY);
        let store = InMemoryRecordStore::new().as_record_store();
        let deposit = RecordDocument::new(json!({
            "_access": {"metadata_restricted": false},
            "deposits": {"owners": [1]}
        }));
        for action in [Action::Read, Action::Update] {
            let permission = Permission::new(
                action,
                policy.generators(action),
                Resource::Record(&deposit),
                &store,
            );
            assert!(permission.allows(&Identity::authenticated(1)).unwrap());
            assert!(!permission.allows(&Identity::authenticated(2)).unwrap());
            assert!(!permission.allows(&Identity::anonymous()).unwrap());
        }
        let search = Permission::new(
            Action::Search,
            policy.generators(Action::Search),
            Resource::None,
            &store,
        );
        assert_eq!(
            search.query_filter(&Identity::authenticated(1)),
            FilterClause::term("deposits.owners", 1)
        );
        assert_eq!(
            search.query_filter(&Identity::anonymous()),
            FilterClause::MatchNone
        );
    }

    #[test]
    fn create_and_delete() {
        let policy = deposits_policy(&AppConfig::default());
        let store = InMemoryRecordStore::new().as_record_store();
        let create = Permission::new(
            Action::Create,
            policy.generators(Action::Create),
            Resource::None,
            &store,
        );
        assert!(create.allows(&Identity::authenticated(1)).unwrap());
        assert!(!create.allows(&Identity::anonymous()).unwrap());
        let delete = Permission::new(
            Action::Delete,
            policy.generators(Action::Delete),
            Resource::None,
            &store,
        );
        assert!(!delete.allows(&Identity::authenticated(1)).unwrap());
        assert!(
            delete
                .allows(&Identity::authenticated(1).with_need(Need::action("admin-access")))
                .unwrap()
        );
    }
}
