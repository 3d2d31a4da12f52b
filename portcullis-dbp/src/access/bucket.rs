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

//! Storage bucket handle.

use std::fmt;

/// Opaque handle of a storage bucket holding the files of (at most) one
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Bucket {
    id: String,
}

impl Bucket {
    /// Return a new instance.
    pub fn new(id: &str) -> Self {
        Self { id: id.to_owned() }
    }

    /// Bucket identifier used for lookups in the record store.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bucket;{}", self.id)
    }
}
