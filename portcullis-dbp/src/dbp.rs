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

//! Record store provider abstraction

pub mod facades;

use self::facades::*;
use std::sync::Arc;

/// The record store as seen by the permission engine.
///
/// Implementation logic is abstracted by [RecordStoreFacades] for related
/// operations.
pub struct RecordStore {
    facades: Arc<dyn RecordStoreFacades>,
}

impl RecordStore {
    /// Return a new instance.
    pub fn new(record_store_facades: Arc<dyn RecordStoreFacades>) -> Self {
        Self {
            facades: record_store_facades,
        }
    }
}

impl RecordStoreFacades for RecordStore {
    fn action_grant_facade(&self) -> &dyn ActionGrantFacade {
        self.facades.action_grant_facade()
    }

    fn bucket_facade(&self) -> &dyn BucketFacade {
        self.facades.bucket_facade()
    }
}
