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

//! Access granted through record access levels.

use super::RecordGenerator;
use crate::authz::Action;
use crate::authz::Identity;
use crate::conf::AccessLevelConfig;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::RecordDocument;

/** Allow users listed under the record's access levels for an action.

Records list users per access level under `internal.access_levels.<level>` as
`{"scheme": "person", "id": <user id>}`. Which levels grant which action is
configured in [AccessLevelConfig].

The search filter selects records where the identity is listed under one of
the levels granting `read`, independent of the action.
*/
#[derive(Debug, Clone)]
pub struct AllowedByAccessLevel {
    name: String,
    levels: Vec<String>,
    read_levels: Vec<String>,
}

impl AllowedByAccessLevel {
    const ACCESS_LEVELS_PATH: &'static str = "internal.access_levels";

    /// Return a new instance for the `action` with the configured levels.
    pub fn new(action: Action, access_levels: &AccessLevelConfig) -> Self {
        Self {
            name: format!("AllowedByAccessLevel({action})"),
            levels: access_levels.levels_for(action).to_vec(),
            read_levels: access_levels.levels_for(Action::Read).to_vec(),
        }
    }
}

impl RecordGenerator for AllowedByAccessLevel {
    fn name(&self) -> &str {
        &self.name
    }

    fn needs(&self, record: Option<&RecordDocument>) -> NeedSet {
        let Some(record) = record else {
            return NeedSet::new();
        };
        self.levels
            .iter()
            .flat_map(|level| record.access_level_ids(level, RecordDocument::PERSON_SCHEME))
            .map(Need::user)
            .collect()
    }

    fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        let ids = identity
            .user_needs()
            .map(|need| need.value().to_json())
            .collect::<Vec<_>>();
        if ids.is_empty() || self.read_levels.is_empty() {
            return None;
        }
        Some(FilterClause::any_of(self.read_levels.iter().flat_map(|level| {
            let path = format!("{}.{level}", Self::ACCESS_LEVELS_PATH);
            ids.iter()
                .map(|id| {
                    FilterClause::nested(
                        &path,
                        FilterClause::all_of([
                            FilterClause::term(
                                &format!("{path}.scheme"),
                                RecordDocument::PERSON_SCHEME,
                            ),
                            FilterClause::term(&format!("{path}.id"), id.clone()),
                        ]),
                    )
                })
                .collect::<Vec<_>>()
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record() -> RecordDocument {
        RecordDocument::new(json!({
            "internal": {"access_levels": {
                "metadata_curator": [
                    {"scheme": "person", "id": 3},
                    {"scheme": "orcid", "id": 4}
                ],
                "metadata_reader": [{"scheme": "person", "id": 5}]
            }}
        }))
    }

    #[test]
    fn levels_per_action() {
        let levels = AccessLevelConfig::default();
        let record = record();
        assert_eq!(
            AllowedByAccessLevel::new(Action::Read, &levels).needs(Some(&record)),
            NeedSet::from([Need::user(3)])
        );
        assert_eq!(
            AllowedByAccessLevel::new(Action::Update, &levels).needs(Some(&record)),
            NeedSet::from([Need::user(3)])
        );
        for action in [Action::Create, Action::Delete, Action::ReadFiles] {
            assert!(
                AllowedByAccessLevel::new(action, &levels)
                    .needs(Some(&record))
                    .is_empty()
            );
        }
        assert!(
            AllowedByAccessLevel::new(Action::Read, &levels)
                .needs(None)
                .is_empty()
        );
    }

    #[test]
    fn filter_matches_person_entries() {
        let levels = AccessLevelConfig {
            read: vec!["metadata_curator".to_owned(), "metadata_reader".to_owned()],
            ..AccessLevelConfig::default()
        };
        let generator = AllowedByAccessLevel::new(Action::Read, &levels);
        let record = record();
        for (id, expected) in [(3, true), (4, false), (5, true), (6, false)] {
            let filter = generator
                .query_filter(&Identity::authenticated(id))
                .unwrap();
            assert_eq!(filter.matches(record.as_json()), expected, "id={id}");
        }
        assert!(generator.query_filter(&Identity::anonymous()).is_none());
    }

    #[test]
    fn filter_query_dsl() {
        let generator = AllowedByAccessLevel::new(Action::Read, &AccessLevelConfig::default());
        let filter = generator
            .query_filter(&Identity::authenticated(3))
            .unwrap();
        assert_eq!(
            filter.to_query(),
            json!({"nested": {
                "path": "internal.access_levels.metadata_curator",
                "query": {"bool": {"filter": [
                    {"term": {"internal.access_levels.metadata_curator.scheme": "person"}},
                    {"term": {"internal.access_levels.metadata_curator.id": 3}}
                ]}}
            }})
        );
    }
}
