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

//! Ephemeral in-memory specific record store code.

mod inmem_action_grant_facade;
mod inmem_bucket_facade;

pub use self::inmem_action_grant_facade::*;
pub use self::inmem_bucket_facade::*;
use super::InMemoryRecordStore;
use portcullis_dbp::dbp::facades::*;
use std::sync::Arc;

/// Ephemeral in-memory specific record store code.
pub struct InMemProviderFacades {
    action_grant_facade: InMemActionGrantFacade,
    bucket_facade: InMemBucketFacade,
}

impl InMemProviderFacades {
    /// Return a new instance.
    pub fn new(inmem_provider: &Arc<InMemoryRecordStore>) -> Self {
        Self {
            action_grant_facade: InMemActionGrantFacade::new(inmem_provider),
            bucket_facade: InMemBucketFacade::new(inmem_provider),
        }
    }
}

impl RecordStoreFacades for InMemProviderFacades {
    fn action_grant_facade(&self) -> &dyn ActionGrantFacade {
        &self.action_grant_facade
    }

    fn bucket_facade(&self) -> &dyn BucketFacade {
        &self.bucket_facade
    }
}
