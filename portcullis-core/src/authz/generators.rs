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

/*!
Generators: composable predicate units of a permission.

Each generator contributes needs, excludes and a search filter for one
authorization concern. Generators come in three shapes, depending on what they
need to know about the target of the permission check:

| Shape | Receives | Example |
|---|---|---|
| [ContextFreeGenerator] | nothing | [AnyUser], [Admin] |
| [RecordGenerator] | the record, or `None` when searching | [RecordOwners] |
| [BucketGenerator] | the bucket, or `None` when searching | [BucketRecord] |

[Generator] wraps one of the shapes. A [super::Permission] dispatches each
generator with the resource it was created for, and fails with
[PermissionErrorKind::UnknownGeneratorContext] when the shapes don't fit.

Generators are immutable and shared between requests.
*/

mod access_level;
mod admin;
mod any_user;
mod bucket_record;
mod disable;
mod if_public;
mod owners;
mod system_process;

pub use self::access_level::AllowedByAccessLevel;
pub use self::admin::Admin;
pub use self::any_user::AnyUser;
pub use self::any_user::AuthenticatedUser;
pub use self::bucket_record::BucketRecord;
pub use self::disable::Disable;
pub use self::if_public::IfPublic;
pub use self::if_public::is_files_restricted;
pub use self::if_public::is_metadata_restricted;
pub use self::owners::DepositOwners;
pub use self::owners::RecordOwners;
pub use self::system_process::ExcludeActionHolders;
pub use self::system_process::SystemProcess;

use super::Identity;
use super::Resource;
use portcullis_dbp::access::Bucket;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::PermissionError;
use portcullis_dbp::access::PermissionErrorKind;
use portcullis_dbp::access::RecordDocument;
use portcullis_dbp::dbp::RecordStore;
use std::fmt;
use std::sync::Arc;

/// Generator that does not depend on the target of the permission check.
pub trait ContextFreeGenerator: Send + Sync {
    /// Name for logging and error messages.
    fn name(&self) -> &str;

    /// Needs granting access.
    fn needs(&self, store: &RecordStore) -> NeedSet;

    /// Needs denying access regardless of [Self::needs()].
    fn excludes(&self, _store: &RecordStore) -> NeedSet {
        NeedSet::new()
    }

    /// Filter selecting documents the `identity` may see through this
    /// generator. `None` contributes nothing.
    fn query_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        None
    }
}

/// Generator that depends on the record being accessed.
///
/// `record` is `None` when there is no single target, like when searching.
pub trait RecordGenerator: Send + Sync {
    /// Name for logging and error messages.
    fn name(&self) -> &str;

    /// Needs granting access.
    fn needs(&self, record: Option<&RecordDocument>) -> NeedSet;

    /// Needs denying access regardless of [Self::needs()].
    fn excludes(&self, _record: Option<&RecordDocument>) -> NeedSet {
        NeedSet::new()
    }

    /// Filter selecting documents the `identity` may see through this
    /// generator. `None` contributes nothing.
    fn query_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        None
    }

    /// Filter selecting documents where [Self::excludes()] would deny the
    /// `identity`.
    fn exclusion_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        None
    }
}

/// Generator that depends on the bucket being accessed.
///
/// `bucket` is `None` when there is no single target, like when searching.
pub trait BucketGenerator: Send + Sync {
    /// Name for logging and error messages.
    fn name(&self) -> &str;

    /// Needs granting access.
    fn needs(&self, bucket: Option<&Bucket>, store: &RecordStore) -> NeedSet;

    /// Needs denying access regardless of [Self::needs()].
    fn excludes(&self, _bucket: Option<&Bucket>, _store: &RecordStore) -> NeedSet {
        NeedSet::new()
    }

    /// Filter selecting documents the `identity` may see through this
    /// generator. `None` contributes nothing.
    fn query_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        None
    }

    /// Filter selecting documents where [Self::excludes()] would deny the
    /// `identity`.
    fn exclusion_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        None
    }
}

/// A generator of one of the supported shapes.
#[derive(Clone)]
pub enum Generator {
    /// See [ContextFreeGenerator].
    ContextFree(Arc<dyn ContextFreeGenerator>),
    /// See [RecordGenerator].
    Record(Arc<dyn RecordGenerator>),
    /// See [BucketGenerator].
    Bucket(Arc<dyn BucketGenerator>),
}

impl Generator {
    /// Wrap a [ContextFreeGenerator].
    pub fn context_free(generator: impl ContextFreeGenerator + 'static) -> Self {
        Self::ContextFree(Arc::new(generator))
    }

    /// Wrap a [RecordGenerator].
    pub fn record(generator: impl RecordGenerator + 'static) -> Self {
        Self::Record(Arc::new(generator))
    }

    /// Wrap a [BucketGenerator].
    pub fn bucket(generator: impl BucketGenerator + 'static) -> Self {
        Self::Bucket(Arc::new(generator))
    }

    /// Evaluate a [RecordGenerator] against the record owning a bucket.
    ///
    /// See [BucketRecord].
    pub fn bucket_record(generator: impl RecordGenerator + 'static) -> Self {
        Self::bucket(BucketRecord::new(Arc::new(generator)))
    }

    /// Name of the wrapped generator.
    pub fn name(&self) -> &str {
        match self {
            Self::ContextFree(generator) => generator.name(),
            Self::Record(generator) => generator.name(),
            Self::Bucket(generator) => generator.name(),
        }
    }

    /// Needs of the wrapped generator for the `resource`.
    pub fn needs(
        &self,
        resource: &Resource,
        store: &RecordStore,
    ) -> Result<NeedSet, PermissionError> {
        match (self, *resource) {
            (Self::ContextFree(generator), _) => Ok(generator.needs(store)),
            (Self::Record(generator), Resource::None) => Ok(generator.needs(None)),
            (Self::Record(generator), Resource::Record(record)) => {
                Ok(generator.needs(Some(record)))
            }
            (Self::Bucket(generator), Resource::None) => Ok(generator.needs(None, store)),
            (Self::Bucket(generator), Resource::Bucket(bucket)) => {
                Ok(generator.needs(Some(bucket), store))
            }
            _ => Err(self.unsupported(resource)),
        }
    }

    /// Excludes of the wrapped generator for the `resource`.
    pub fn excludes(
        &self,
        resource: &Resource,
        store: &RecordStore,
    ) -> Result<NeedSet, PermissionError> {
        match (self, *resource) {
            (Self::ContextFree(generator), _) => Ok(generator.excludes(store)),
            (Self::Record(generator), Resource::None) => Ok(generator.excludes(None)),
            (Self::Record(generator), Resource::Record(record)) => {
                Ok(generator.excludes(Some(record)))
            }
            (Self::Bucket(generator), Resource::None) => Ok(generator.excludes(None, store)),
            (Self::Bucket(generator), Resource::Bucket(bucket)) => {
                Ok(generator.excludes(Some(bucket), store))
            }
            _ => Err(self.unsupported(resource)),
        }
    }

    /// Search filter of the wrapped generator for the `identity`.
    pub fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        match self {
            Self::ContextFree(generator) => generator.query_filter(identity),
            Self::Record(generator) => generator.query_filter(identity),
            Self::Bucket(generator) => generator.query_filter(identity),
        }
    }

    /// Search filter of documents where the wrapped generator's excludes
    /// deny the `identity`.
    ///
    /// Context free excludes apply to every document, so any overlap with
    /// what the identity provides excludes everything.
    pub fn exclusion_filter(
        &self,
        identity: &Identity,
        store: &RecordStore,
    ) -> Option<FilterClause> {
        match self {
            Self::ContextFree(generator) => identity
                .provides_any(&generator.excludes(store))
                .then_some(FilterClause::MatchAll),
            Self::Record(generator) => generator.exclusion_filter(identity),
            Self::Bucket(generator) => generator.exclusion_filter(identity),
        }
    }

    fn unsupported(&self, resource: &Resource) -> PermissionError {
        let shape = match self {
            Self::ContextFree(_) => "context free",
            Self::Record(_) => "record",
            Self::Bucket(_) => "bucket",
        };
        PermissionErrorKind::UnknownGeneratorContext.error_with_msg(format!(
            "Generator '{}' is a {shape} generator and can't be evaluated for a {} resource.",
            self.name(),
            resource.shape()
        ))
    }
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}


#[cfg(test)]
mod tests {
    use super::test_utils::empty_store;
    use super::*;
    use portcullis_dbp::access::Need;
    use serde_json::json;

    #[test]
    fn shape_dispatch() {
        let store = empty_store();
        let record = RecordDocument::new(json!({"owners": [1]}));
        let bucket = Bucket::new("b1");
        let any_user = Generator::context_free(AnyUser);
        let owners = Generator::record(RecordOwners);
        let bucket_owners = Generator::bucket_record(RecordOwners);

        for resource in [
            Resource::None,
            Resource::Record(&record),
            Resource::Bucket(&bucket),
        ] {
            assert_eq!(
                any_user.needs(&resource, &store).unwrap(),
                NeedSet::from([Need::any_user()])
            );
        }
        assert_eq!(
            owners.needs(&Resource::Record(&record), &store).unwrap(),
            NeedSet::from([Need::user(1)])
        );
        assert!(owners.needs(&Resource::None, &store).unwrap().is_empty());
        assert!(bucket_owners.needs(&Resource::None, &store).unwrap().is_empty());
    }

    #[test]
    fn wrong_shape_fails_loudly() {
        let store = empty_store();
        let record = RecordDocument::new(json!({"owners": [1]}));
        let bucket = Bucket::new("b1");
        let e = Generator::record(RecordOwners)
            .needs(&Resource::Bucket(&bucket), &store)
            .unwrap_err();
        assert_eq!(e.kind(), &PermissionErrorKind::UnknownGeneratorContext);
        let e = Generator::bucket_record(RecordOwners)
            .excludes(&Resource::Record(&record), &store)
            .unwrap_err();
        assert_eq!(e.kind(), &PermissionErrorKind::UnknownGeneratorContext);
    }

    #[test]
    fn context_free_exclusion_filter() {
        let store = empty_store();
        let disable = Generator::context_free(Disable);
        assert_eq!(
            disable.exclusion_filter(&crate::authz::Identity::anonymous(), &store),
            Some(FilterClause::MatchAll)
        );
        assert_eq!(
            Generator::context_free(AnyUser)
                .exclusion_filter(&crate::authz::Identity::anonymous(), &store),
            None
        );
    }
}
