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

//! Administrator access.

use super::ContextFreeGenerator;
use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::dbp::RecordStore;

/// Allow identities holding the administrator action need.
///
/// Contributes no search filter: administrators search through the other
/// generators of the action.
#[derive(Debug, Clone)]
pub struct Admin {
    action_need: Need,
}

impl Default for Admin {
    fn default() -> Self {
        Self::new(Self::DEFAULT_ACTION)
    }
}

impl Admin {
    /// Default name of the administrator action.
    pub const DEFAULT_ACTION: &'static str = "admin-access";

    /// Return a new instance requiring the named action need.
    pub fn new(action: &str) -> Self {
        Self {
            action_need: Need::action(action),
        }
    }
}

impl ContextFreeGenerator for Admin {
    fn name(&self) -> &str {
        "Admin"
    }

    fn needs(&self, _store: &RecordStore) -> NeedSet {
        NeedSet::from([self.action_need.clone()])
    }
}
