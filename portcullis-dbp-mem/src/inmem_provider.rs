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

//! Ephemeral in-memory implementation of [RecordStore].

mod inmem_facades;

use self::inmem_facades::InMemProviderFacades;
use crossbeam_skiplist::SkipMap;
use crossbeam_skiplist::SkipSet;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::NeedValue;
use portcullis_dbp::access::PermissionError;
use portcullis_dbp::access::PermissionErrorKind;
use portcullis_dbp::access::RecordDocument;
use portcullis_dbp::dbp::RecordStore;
use std::sync::Arc;

/// Ephemeral in-memory implementation of [RecordStore].
pub struct InMemoryRecordStore {
    records: SkipMap<String, RecordDocument>,
    record_ids_by_bucket: SkipMap<String, SkipSet<String>>,
    users_by_action: SkipMap<String, SkipSet<NeedValue>>,
    roles_by_action: SkipMap<String, SkipSet<String>>,
}

impl InMemoryRecordStore {
    /// Return a new instance.
    pub fn new() -> Arc<Self> {
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("Using in-mem record store.");
        }
        Arc::new(Self {
            records: SkipMap::default(),
            record_ids_by_bucket: SkipMap::default(),
            users_by_action: SkipMap::default(),
            roles_by_action: SkipMap::default(),
        })
    }

    /// Get [RecordStore] instance.
    pub fn as_record_store(self: &Arc<Self>) -> RecordStore {
        RecordStore::new(Arc::new(InMemProviderFacades::new(self)))
    }

    /// Store the record under its `id` and return the id.
    ///
    /// An existing record with the same id is replaced.
    pub fn insert_record(&self, record: RecordDocument) -> Result<String, PermissionError> {
        let id = record.id().ok_or_else(|| {
            PermissionErrorKind::MalformedRecord
                .error_with_msg("Record must have an 'id' to be stored.")
        })?;
        self.records.insert(id.to_owned(), record);
        Ok(id)
    }

    /// Return the record with the requested `id`.
    pub fn record_by_id(&self, id: &str) -> Option<RecordDocument> {
        self.records.get(id).map(|entry| entry.value().clone())
    }

    /// Register the bucket as file storage of the record.
    pub fn link_bucket(&self, bucket_id: &str, record_id: &str) {
        self.record_ids_by_bucket
            .get_or_insert_with(bucket_id.to_owned(), SkipSet::default)
            .value()
            .insert(record_id.to_owned());
    }

    /// Assign the `action` directly to a user.
    pub fn grant_action_to_user(&self, action: &str, user_id: impl Into<NeedValue>) {
        self.users_by_action
            .get_or_insert_with(action.to_owned(), SkipSet::default)
            .value()
            .insert(user_id.into());
    }

    /// Assign the `action` to a role.
    pub fn grant_action_to_role(&self, action: &str, role: &str) {
        self.roles_by_action
            .get_or_insert_with(action.to_owned(), SkipSet::default)
            .value()
            .insert(role.to_owned());
    }

    /// Return all stored records selected by the `filter`, ordered by id.
    pub fn search(&self, filter: &FilterClause) -> Vec<RecordDocument> {
        self.records
            .iter()
            .filter(|entry| filter.matches(entry.value().as_json()))
            .map(|entry| entry.value().clone())
            .collect()
    }

    /// Records linked to the bucket. Dangling links are ignored.
    fn records_by_bucket(&self, bucket_id: &str) -> Vec<RecordDocument> {
        self.record_ids_by_bucket
            .get(bucket_id)
            .map(|entry| {
                entry
                    .value()
                    .iter()
                    .filter_map(|record_id| {
                        let record = self.record_by_id(record_id.value());
                        if record.is_none() {
                            log::debug!(
                                "Bucket '{bucket_id}' links to missing record '{}'.",
                                record_id.value()
                            );
                        }
                        record
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    fn users_with_action(&self, action: &str) -> Vec<NeedValue> {
        self.users_by_action
            .get(action)
            .map(|entry| entry.value().iter().map(|e| e.value().clone()).collect())
            .unwrap_or_default()
    }

    fn roles_with_action(&self, action: &str) -> Vec<String> {
        self.roles_by_action
            .get(action)
            .map(|entry| entry.value().iter().map(|e| e.value().clone()).collect())
            .unwrap_or_default()
    }
}
