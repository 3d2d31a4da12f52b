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

//! Record document with a restrictive accessor contract.

use super::NeedValue;
use super::values_at;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/** A record as stored in the record store: a JSON document.

Every accessor resolves a nested path with [values_at()], flattening arrays
like search engines do, and returns a well-defined value when the path is
missing or holds an unexpected type. Restriction flags default to
restricted and the access right defaults to "not open", so incomplete
documents never grant more than complete ones.
*/
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordDocument {
    document: Value,
}

impl From<Value> for RecordDocument {
    fn from(document: Value) -> Self {
        Self { document }
    }
}

impl RecordDocument {
    /// The scheme of access level entries that identify local users.
    pub const PERSON_SCHEME: &'static str = "person";
    /// The access right value of open records.
    pub const OPEN_ACCESS_RIGHT: &'static str = "open";

    /// Return a new instance.
    pub fn new(document: Value) -> Self {
        Self::from(document)
    }

    /// Return the raw document.
    pub fn as_json(&self) -> &Value {
        &self.document
    }

    /// Resolve a dotted path. Returns `None` if any segment is missing.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(&self.document, |value, segment| value.get(segment))
    }

    /// Record identifier, when present as string or integer.
    pub fn id(&self) -> Option<String> {
        self.get_path("id").and_then(NeedValue::from_json).map(|id| id.to_string())
    }

    /// Ids of the record's owners.
    pub fn owners(&self) -> Vec<NeedValue> {
        self.ids_at("owners")
    }

    /// Ids of the owners of the record's deposit.
    pub fn deposit_owners(&self) -> Vec<NeedValue> {
        self.ids_at("deposits.owners")
    }

    /// `_access.metadata_restricted`, `true` unless explicitly `false`.
    pub fn is_metadata_restricted(&self) -> bool {
        self.flag_or_restricted("_access.metadata_restricted")
    }

    /// `_access.files_restricted`, `true` unless explicitly `false`.
    pub fn is_files_restricted(&self) -> bool {
        self.flag_or_restricted("_access.files_restricted")
    }

    /// The first string `access_right` value.
    pub fn access_right(&self) -> Option<&str> {
        values_at(&self.document, "access_right")
            .into_iter()
            .find_map(Value::as_str)
    }

    /// Return `true` only if an `access_right` value is exactly `open`.
    pub fn is_open_access(&self) -> bool {
        values_at(&self.document, "access_right")
            .into_iter()
            .any(|value| value.as_str() == Some(Self::OPEN_ACCESS_RIGHT))
    }

    /// Ids of the entries under `internal.access_levels.<level>` with the
    /// requested `scheme`.
    ///
    /// Each entry is evaluated on its own: the scheme and the id must be
    /// found in the same entry.
    pub fn access_level_ids(&self, level: &str, scheme: &str) -> Vec<NeedValue> {
        let path = format!("internal.access_levels.{level}");
        values_at(&self.document, &path)
            .into_iter()
            .filter(|entry| {
                values_at(entry, "scheme")
                    .into_iter()
                    .any(|value| value.as_str() == Some(scheme))
            })
            .flat_map(|entry| values_at(entry, "id"))
            .filter_map(NeedValue::from_json)
            .collect()
    }

    fn ids_at(&self, path: &str) -> Vec<NeedValue> {
        values_at(&self.document, path)
            .into_iter()
            .filter_map(NeedValue::from_json)
            .collect()
    }

    /// Unrestricted only if a value at `path` is `false`, the same condition
    /// a term filter on `false` selects.
    fn flag_or_restricted(&self, path: &str) -> bool {
        !values_at(&self.document, path)
            .into_iter()
            .any(|value| value == &Value::Bool(false))
    }
}
