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

//! Ephemeral in-memory implementation of [BucketFacade].

use crate::InMemoryRecordStore;
use portcullis_dbp::access::PermissionError;
use portcullis_dbp::access::RecordDocument;
use portcullis_dbp::dbp::facades::BucketFacade;
use std::sync::Arc;

/// Ephemeral in-memory specific record store code
pub struct InMemBucketFacade {
    inmem_provider: Arc<InMemoryRecordStore>,
}

impl InMemBucketFacade {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryRecordStore>) -> Self {
        Self {
            inmem_provider: Arc::clone(inmem_provider),
        }
    }
}

impl BucketFacade for InMemBucketFacade {
    fn records_by_bucket(&self, bucket_id: &str) -> Result<Vec<RecordDocument>, PermissionError> {
        Ok(self.inmem_provider.records_by_bucket(bucket_id))
    }
}
