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

//! Evaluation of record generators for buckets.

use super::BucketGenerator;
use super::RecordGenerator;
use crate::authz::Identity;
use portcullis_dbp::access::Bucket;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::RecordDocument;
use portcullis_dbp::dbp::RecordStore;
use portcullis_dbp::dbp::facades::RecordStoreFacades;
use std::sync::Arc;

/** Decorator evaluating a [RecordGenerator] against the record owning a
bucket.

The bucket is resolved through the record store. Unless exactly one record
owns the bucket, the generator contributes no needs and no excludes. Without
a bucket (searching) the inner generator is evaluated without a record.
*/
pub struct BucketRecord {
    inner: Arc<dyn RecordGenerator>,
    name: String,
}

impl BucketRecord {
    /// Return a new instance.
    pub fn new(inner: Arc<dyn RecordGenerator>) -> Self {
        let name = format!("BucketRecord({})", inner.name());
        Self { inner, name }
    }

    /// Resolve the bucket to its single owning record.
    fn owning_record(&self, bucket: &Bucket, store: &RecordStore) -> Option<RecordDocument> {
        match store.bucket_facade().records_by_bucket(bucket.id()) {
            Ok(mut records) if records.len() == 1 => records.pop(),
            Ok(records) => {
                log::debug!(
                    "{}: Bucket '{}' has {} owning records. Denying.",
                    self.name,
                    bucket.id(),
                    records.len()
                );
                None
            }
            Err(e) => {
                log::warn!(
                    "{}: Unable to resolve bucket '{}'. Denying: {e}",
                    self.name,
                    bucket.id()
                );
                None
            }
        }
    }
}

impl BucketGenerator for BucketRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn needs(&self, bucket: Option<&Bucket>, store: &RecordStore) -> NeedSet {
        match bucket {
            None => self.inner.needs(None),
            Some(bucket) => self
                .owning_record(bucket, store)
                .map(|record| self.inner.needs(Some(&record)))
                .unwrap_or_default(),
        }
    }

    fn excludes(&self, bucket: Option<&Bucket>, store: &RecordStore) -> NeedSet {
        match bucket {
            None => self.inner.excludes(None),
            Some(bucket) => self
                .owning_record(bucket, store)
                .map(|record| self.inner.excludes(Some(&record)))
                .unwrap_or_default(),
        }
    }

    fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        self.inner.query_filter(identity)
    }

    fn exclusion_filter(&self, identity: &Identity) -> Option<FilterClause> {
        self.inner.exclusion_filter(identity)
    }
}
