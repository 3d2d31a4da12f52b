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

//! Aggregation of generators into a permission.

use super::Action;
use super::Generator;
use super::Identity;
use super::Resource;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::PermissionError;
use portcullis_dbp::access::PermissionErrorKind;
use portcullis_dbp::dbp::RecordStore;

/** The permission to perform an action on a resource.

Combines the [Generator]s configured for the action:

* needs: union of the generators' needs. An identity must provide at least
  one of them.
* excludes: union of the generators' excludes. An identity providing any of
  them is denied, regardless of the needs.
* query filter: the generators' filters combined with OR, minus everything
  selected by their exclusion filters. Without any filter nothing matches.

Nothing is cached: every call evaluates the generators again.
*/
pub struct Permission<'a> {
    action: Action,
    generators: &'a [Generator],
    resource: Resource<'a>,
    store: &'a RecordStore,
}

impl<'a> Permission<'a> {
    /// Return a new instance.
    pub fn new(
        action: Action,
        generators: &'a [Generator],
        resource: Resource<'a>,
        store: &'a RecordStore,
    ) -> Self {
        Self {
            action,
            generators,
            resource,
            store,
        }
    }

    /// The action this permission guards.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The target of the action.
    pub fn resource(&self) -> &Resource<'a> {
        &self.resource
    }

    /// Needs of which an identity must provide at least one.
    pub fn needs(&self) -> Result<NeedSet, PermissionError> {
        let mut needs = NeedSet::new();
        for generator in self.generators {
            needs.extend(generator.needs(&self.resource, self.store)?);
        }
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{} on {}: needs {:?}",
                self.action,
                self.resource,
                needs.iter().map(ToString::to_string).collect::<Vec<_>>()
            );
        }
        Ok(needs)
    }

    /// Needs that deny an identity regardless of [Self::needs()].
    pub fn excludes(&self) -> Result<NeedSet, PermissionError> {
        let mut excludes = NeedSet::new();
        for generator in self.generators {
            excludes.extend(generator.excludes(&self.resource, self.store)?);
        }
        if log::log_enabled!(log::Level::Trace) {
            log::trace!(
                "{} on {}: excludes {:?}",
                self.action,
                self.resource,
                excludes.iter().map(ToString::to_string).collect::<Vec<_>>()
            );
        }
        Ok(excludes)
    }

    /// Search filter selecting the documents the `identity` may access.
    pub fn query_filter(&self, identity: &Identity) -> FilterClause {
        let grants = self
            .generators
            .iter()
            .filter_map(|generator| generator.query_filter(identity))
            .collect::<Vec<_>>();
        let filter = if grants.is_empty() {
            FilterClause::MatchNone
        } else {
            let exclusions = self
                .generators
                .iter()
                .filter_map(|generator| generator.exclusion_filter(identity, self.store))
                .collect::<Vec<_>>();
            FilterClause::all_of([
                FilterClause::any_of(grants),
                FilterClause::any_of(exclusions).negate(),
            ])
        };
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("{} for {identity}: query filter {filter}", self.action);
        }
        filter
    }

    /// Return `true` if the `identity` provides at least one of the needs and
    /// none of the excludes.
    pub fn allows(&self, identity: &Identity) -> Result<bool, PermissionError> {
        Ok(identity.provides_any(&self.needs()?) && !identity.provides_any(&self.excludes()?))
    }

    /// Error out with [PermissionErrorKind::Unauthorized] unless the
    /// `identity` is allowed.
    pub fn assert_allows(&self, identity: &Identity) -> Result<(), PermissionError> {
        if self.allows(identity)? {
            Ok(())
        } else {
            let msg = format!(
                "Identity '{identity}' is not allowed to {} {}.",
                self.action, self.resource
            );
            log::info!("{msg}");
            Err(PermissionErrorKind::Unauthorized.error_with_msg(msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::authz::generators::test_utils::empty_store;
    use crate::authz::generators::test_utils::initialize_env_logger;
    use crate::authz::generators::*;
    use crate::conf::AccessLevelConfig;
    use crate::conf::AppConfig;
    use portcullis_dbp::access::Bucket;
    use portcullis_dbp::access::Need;
    use portcullis_dbp::access::RecordDocument;
    use portcullis_dbp_mem::InMemoryRecordStore;
    use proptest::prelude::*;
    use serde_json::Value;
    use serde_json::json;

    const SUPERUSER_ACTION: &str = "superuser-access";

    fn identities() -> Vec<Identity> {
        vec![
            Identity::anonymous(),
            Identity::authenticated(1),
            Identity::system_process(),
            Identity::authenticated(1).with_need(Need::action("admin-access")),
        ]
    }

    #[test]
    fn no_needs_denies_everyone() {
        initialize_env_logger();
        let store = empty_store();
        let record = RecordDocument::new(json!({"owners": []}));
        let generators = [Generator::record(RecordOwners)];
        for resource in [Resource::None, Resource::Record(&record)] {
            let permission = Permission::new(Action::Update, &generators, resource, &store);
            assert!(permission.needs().unwrap().is_empty());
            for identity in identities() {
                assert!(!permission.allows(&identity).unwrap());
            }
        }
        let permission = Permission::new(Action::Update, &[], Resource::None, &store);
        assert!(permission.needs().unwrap().is_empty());
        assert_eq!(
            permission.query_filter(&Identity::authenticated(1)),
            FilterClause::MatchNone
        );
    }

    #[test]
    fn excludes_dominate() {
        initialize_env_logger();
        let store = empty_store();
        let generators = [
            Generator::context_free(AnyUser),
            Generator::context_free(SystemProcess),
            Generator::context_free(Admin::default()),
            Generator::context_free(Disable),
        ];
        let permission = Permission::new(Action::Read, &generators, Resource::None, &store);
        assert!(permission.needs().unwrap().contains(&Need::any_user()));
        for identity in identities() {
            assert!(!permission.allows(&identity).unwrap());
            assert_eq!(permission.query_filter(&identity), FilterClause::MatchNone);
            let e = permission.assert_allows(&identity).unwrap_err();
            assert_eq!(e.kind(), &PermissionErrorKind::Unauthorized);
        }
    }

    #[test]
    fn owner_round_trip() {
        initialize_env_logger();
        let store = empty_store();
        let record = RecordDocument::new(json!({"owners": [1]}));
        let generators = [Generator::record(RecordOwners)];
        let permission =
            Permission::new(Action::Update, &generators, Resource::Record(&record), &store);
        assert_eq!(permission.needs().unwrap(), NeedSet::from([Need::user(1)]));
        assert!(permission.allows(&Identity::authenticated(1)).unwrap());
        assert!(!permission.allows(&Identity::authenticated(2)).unwrap());
        assert!(permission.assert_allows(&Identity::authenticated(1)).is_ok());
        let search = Permission::new(Action::Search, &generators, Resource::None, &store);
        assert_eq!(
            search.query_filter(&Identity::authenticated(1)),
            FilterClause::term("owners", 1)
        );
        assert_eq!(
            search.query_filter(&Identity::anonymous()),
            FilterClause::MatchNone
        );
    }

    #[test]
    fn none_context_defaults() {
        let store = empty_store();
        let public = [Generator::record(IfPublic::any_user_if_public())];
        let owners = [Generator::record(RecordOwners)];
        assert_eq!(
            Permission::new(Action::Search, &public, Resource::None, &store)
                .needs()
                .unwrap(),
            NeedSet::from([Need::any_user()])
        );
        assert!(
            Permission::new(Action::Search, &owners, Resource::None, &store)
                .needs()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn mismatched_generator_shape_is_an_error() {
        let store = empty_store();
        let bucket = Bucket::new("b1");
        let generators = [
            Generator::context_free(AnyUser),
            Generator::record(RecordOwners),
        ];
        let permission =
            Permission::new(Action::ReadFiles, &generators, Resource::Bucket(&bucket), &store);
        assert_eq!(
            permission.needs().unwrap_err().kind(),
            &PermissionErrorKind::UnknownGeneratorContext
        );
        assert!(permission.allows(&Identity::anonymous()).is_err());
    }

    #[test]
    fn ambiguous_bucket_owner_denies() {
        let inmem = InMemoryRecordStore::new();
        for id in ["r1", "r2"] {
            inmem
                .insert_record(RecordDocument::new(json!({"id": id, "owners": [1]})))
                .unwrap();
            inmem.link_bucket("shared", id);
        }
        let store = inmem.as_record_store();
        let bucket = Bucket::new("shared");
        let generators = [Generator::bucket_record(RecordOwners)];
        let permission =
            Permission::new(Action::UpdateFiles, &generators, Resource::Bucket(&bucket), &store);
        assert!(permission.needs().unwrap().is_empty());
        assert!(!permission.allows(&Identity::authenticated(1)).unwrap());
    }

    #[test]
    fn superusers_excluded_from_search() {
        let inmem = InMemoryRecordStore::new();
        inmem.grant_action_to_role(SUPERUSER_ACTION, "admins");
        let store = inmem.as_record_store();
        let generators = [
            Generator::context_free(SystemProcess::without_admin(SUPERUSER_ACTION)),
            Generator::record(RecordOwners),
        ];
        let permission = Permission::new(Action::Search, &generators, Resource::None, &store);
        assert_eq!(
            permission.query_filter(&Identity::system_process()),
            FilterClause::MatchAll
        );
        let superuser = Identity::system_process().with_need(Need::role("admins"));
        assert_eq!(permission.query_filter(&superuser), FilterClause::MatchNone);
        assert!(!permission.allows(&superuser).unwrap());
    }

    #[test]
    fn array_shaped_records_agree_with_filter() {
        let store = empty_store();
        let identity = Identity::authenticated(3);
        let cases = [
            (
                Generator::record(IfPublic::any_user_if_public()),
                json!({"_access": {"metadata_restricted": [false]}}),
            ),
            (
                Generator::record(IfPublic::any_user_if_public()),
                json!({"_access": [{"metadata_restricted": false}]}),
            ),
            (
                Generator::record(IfPublic::any_user_if_public_files()),
                json!({
                    "_access": {"metadata_restricted": false, "files_restricted": false},
                    "access_right": ["open"]
                }),
            ),
            (
                Generator::record(AllowedByAccessLevel::new(
                    Action::Read,
                    &AccessLevelConfig::default(),
                )),
                json!({"internal": {"access_levels": {"metadata_curator": [
                    {"scheme": ["person"], "id": 3}
                ]}}}),
            ),
        ];
        for (generator, document) in cases {
            let record = RecordDocument::new(document);
            let generators = [generator];
            let allowed = Permission::new(Action::Read, &generators, Resource::Record(&record), &store)
                .allows(&identity)
                .unwrap();
            let selected = Permission::new(Action::Search, &generators, Resource::None, &store)
                .query_filter(&identity)
                .matches(record.as_json());
            assert!(allowed, "{generators:?} on {}", record.as_json());
            assert!(selected, "{generators:?} on {}", record.as_json());
        }
    }

    fn user_id() -> impl Strategy<Value = Value> {
        prop_oneof![(1i64..4).prop_map(Value::from), "[a-c]".prop_map(Value::from)]
    }

    /// Optionally wrap the value in an array, which search engines index the
    /// same way.
    fn maybe_wrapped(value: impl Strategy<Value = Value>) -> impl Strategy<Value = Value> {
        (value, any::<bool>())
            .prop_map(|(value, wrap)| if wrap { json!([value]) } else { value })
    }

    fn restriction_flag() -> impl Strategy<Value = Value> {
        prop_oneof![
            maybe_wrapped(prop_oneof![Just(json!(true)), Just(json!(false))]),
            Just(json!("false")),
            Just(json!([true, false])),
            Just(Value::Null),
        ]
    }

    fn access_right() -> impl Strategy<Value = Value> {
        prop_oneof![
            maybe_wrapped(prop_oneof![Just(json!("open")), Just(json!("closed"))]),
            Just(json!({"value": "open"})),
            Just(Value::Null),
        ]
    }

    fn access_level_entry() -> impl Strategy<Value = Value> {
        (
            maybe_wrapped(prop_oneof![Just(json!("person")), Just(json!("orcid"))]),
            maybe_wrapped(user_id()),
        )
            .prop_map(|(scheme, id)| json!({"scheme": scheme, "id": id}))
    }

    fn record() -> impl Strategy<Value = RecordDocument> {
        (
            proptest::collection::vec(user_id(), 0..3),
            proptest::collection::vec(user_id(), 0..3),
            restriction_flag(),
            restriction_flag(),
            access_right(),
            any::<bool>(),
            proptest::collection::vec(access_level_entry(), 0..3),
        )
            .prop_map(
                |(
                    owners,
                    deposit_owners,
                    metadata_restricted,
                    files_restricted,
                    access_right,
                    wrap_access,
                    curators,
                )| {
                    let access = json!({
                        "metadata_restricted": metadata_restricted,
                        "files_restricted": files_restricted
                    });
                    let access = if wrap_access { json!([access]) } else { access };
                    RecordDocument::new(json!({
                        "owners": owners,
                        "deposits": {"owners": deposit_owners},
                        "_access": access,
                        "access_right": access_right,
                        "internal": {"access_levels": {"metadata_curator": curators}}
                    }))
                },
            )
    }

    /// Identities always provide the wildcard any-user need and up to two
    /// user ids.
    fn identity() -> impl Strategy<Value = Identity> {
        (
            proptest::collection::vec(
                prop_oneof![(1i64..4).prop_map(Need::user), "[a-c]".prop_map(Need::user)],
                0..3,
            ),
            any::<bool>(),
            any::<bool>(),
            any::<bool>(),
        )
            .prop_map(|(users, system_process, admin_role, superuser)| {
                let mut needs = vec![Need::any_user()];
                if !users.is_empty() {
                    needs.push(Need::authenticated_user());
                }
                needs.extend(users);
                if system_process {
                    needs.push(Need::system_process());
                }
                if admin_role {
                    needs.push(Need::role("admins"));
                }
                if superuser {
                    needs.push(Need::action(SUPERUSER_ACTION));
                }
                Identity::from_needs(needs)
            })
    }

    /// Generators with a search filter that selects exactly the records
    /// their needs and excludes allow.
    fn filterable_generators() -> Vec<Generator> {
        vec![
            Generator::context_free(AnyUser),
            Generator::context_free(Disable),
            Generator::context_free(SystemProcess),
            Generator::context_free(SystemProcess::without_admin_from(&AppConfig::default())),
            Generator::record(RecordOwners),
            Generator::record(DepositOwners),
            Generator::record(IfPublic::any_user_if_public()),
            Generator::record(IfPublic::any_user_if_public_files()),
            Generator::record(AllowedByAccessLevel::new(
                Action::Read,
                &AccessLevelConfig::default(),
            )),
        ]
    }

    proptest! {
        /// A record is selected by the search filter exactly when the
        /// identity is allowed to read it.
        #[test]
        fn query_filter_agrees_with_needs(
            record in record(),
            identity in identity(),
            picks in proptest::collection::vec(0usize..9, 0..4),
        ) {
            let inmem = InMemoryRecordStore::new();
            inmem.grant_action_to_user(SUPERUSER_ACTION, 1);
            inmem.grant_action_to_role(SUPERUSER_ACTION, "admins");
            let store = inmem.as_record_store();
            let available = filterable_generators();
            let generators = picks
                .iter()
                .map(|pick| available[*pick].clone())
                .collect::<Vec<_>>();
            let allowed = Permission::new(Action::Read, &generators, Resource::Record(&record), &store)
                .allows(&identity)
                .unwrap();
            let selected = Permission::new(Action::Search, &generators, Resource::None, &store)
                .query_filter(&identity)
                .matches(record.as_json());
            prop_assert_eq!(allowed, selected, "identity={} generators={:?}", identity, generators);
        }
    }
}
