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

//! Conditional access to public records.

use super::RecordGenerator;
use crate::authz::Identity;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::RecordDocument;

/** Allow any user unless the record is restricted.

The restriction predicate and the search filter selecting unrestricted records
are supplied at construction. Without a record (searching) any user is
allowed and the filter does the restricting.
*/
#[derive(Clone, Copy)]
pub struct IfPublic {
    name: &'static str,
    is_restricted: fn(&RecordDocument) -> bool,
    public_filter: fn() -> FilterClause,
}

impl IfPublic {
    /// Return a new instance.
    pub fn new(
        name: &'static str,
        is_restricted: fn(&RecordDocument) -> bool,
        public_filter: fn() -> FilterClause,
    ) -> Self {
        Self {
            name,
            is_restricted,
            public_filter,
        }
    }

    /// Allow any user to access records with public metadata.
    pub fn any_user_if_public() -> Self {
        Self::new("AnyUserIfPublic", is_metadata_restricted, || {
            FilterClause::term("_access.metadata_restricted", false)
        })
    }

    /// Allow any user to access files of open access records with public
    /// metadata and files.
    pub fn any_user_if_public_files() -> Self {
        Self::new("AnyUserIfPublicFiles", is_files_restricted, || {
            FilterClause::all_of([
                FilterClause::term("_access.metadata_restricted", false),
                FilterClause::term("_access.files_restricted", false),
                FilterClause::term("access_right", RecordDocument::OPEN_ACCESS_RIGHT),
            ])
        })
    }
}

impl RecordGenerator for IfPublic {
    fn name(&self) -> &str {
        self.name
    }

    fn needs(&self, record: Option<&RecordDocument>) -> NeedSet {
        match record {
            Some(record) if (self.is_restricted)(record) => NeedSet::new(),
            _ => NeedSet::from([Need::any_user()]),
        }
    }

    fn query_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        Some((self.public_filter)())
    }
}

/// Return `true` unless the record's metadata is explicitly public.
pub fn is_metadata_restricted(record: &RecordDocument) -> bool {
    record.is_metadata_restricted()
}

/// Return `true` unless the record is open access with public metadata and
/// public files.
pub fn is_files_restricted(record: &RecordDocument) -> bool {
    record.is_metadata_restricted() || !record.is_open_access() || record.is_files_restricted()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(metadata_restricted: bool, files_restricted: bool, open: bool) -> RecordDocument {
        let access_right = if open { "open" } else { "closed" };
        RecordDocument::new(json!({
            "_access": {
                "metadata_restricted": metadata_restricted,
                "files_restricted": files_restricted
            },
            "access_right": access_right
        }))
    }

    #[test]
    fn files_truth_table() {
        // (metadata restricted, files restricted, open access) => files restricted
        let table = [
            ((false, false, true), false),
            ((false, false, false), true),
            ((false, true, true), true),
            ((false, true, false), true),
            ((true, false, true), true),
            ((true, false, false), true),
            ((true, true, true), true),
            ((true, true, false), true),
        ];
        let generator = IfPublic::any_user_if_public_files();
        let filter = generator.query_filter(&Identity::anonymous()).unwrap();
        for ((metadata, files, open), restricted) in table {
            let record = record(metadata, files, open);
            assert_eq!(
                is_files_restricted(&record),
                restricted,
                "metadata={metadata} files={files} open={open}"
            );
            assert_eq!(generator.needs(Some(&record)).is_empty(), restricted);
            assert_eq!(filter.matches(record.as_json()), !restricted);
        }
    }

    #[test]
    fn metadata_restriction() {
        let generator = IfPublic::any_user_if_public();
        let filter = generator.query_filter(&Identity::anonymous()).unwrap();
        let public = record(false, true, false);
        let restricted = record(true, false, true);
        assert_eq!(
            generator.needs(Some(&public)),
            NeedSet::from([Need::any_user()])
        );
        assert!(generator.needs(Some(&restricted)).is_empty());
        assert!(filter.matches(public.as_json()));
        assert!(!filter.matches(restricted.as_json()));
        let incomplete = RecordDocument::new(json!({"title": "No access section"}));
        assert!(generator.needs(Some(&incomplete)).is_empty());
        assert!(!filter.matches(incomplete.as_json()));
    }

    #[test]
    fn no_record_allows_any_user() {
        for generator in [
            IfPublic::any_user_if_public(),
            IfPublic::any_user_if_public_files(),
        ] {
            assert_eq!(generator.needs(None), NeedSet::from([Need::any_user()]));
        }
    }
}
