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

//! Record store facade for assignments of actions to users and roles.

use crate::access::NeedValue;
use crate::access::PermissionError;

/// Record store facade for assignments of actions to users and roles.
pub trait ActionGrantFacade: Send + Sync {
    /// Return the ids of users directly assigned the `action`.
    fn users_with_action(&self, action: &str) -> Result<Vec<NeedValue>, PermissionError>;

    /// Return the names of roles assigned the `action`.
    fn roles_with_action(&self, action: &str) -> Result<Vec<String>, PermissionError>;
}
