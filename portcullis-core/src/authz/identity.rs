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

//! The subject of a permission check.

use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::NeedValue;
use std::fmt;

/// The evaluating subject: the set of [Need]s it provides.
///
/// Identities are created per request by the authentication layer. The
/// permission engine only reads them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    provides: NeedSet,
}

impl Identity {
    /// An identity providing exactly the `provides` needs.
    pub fn from_needs(provides: impl IntoIterator<Item = Need>) -> Self {
        Self {
            provides: provides.into_iter().collect(),
        }
    }

    /// An unauthenticated visitor.
    pub fn anonymous() -> Self {
        Self::from_needs([Need::any_user()])
    }

    /// An authenticated user.
    pub fn authenticated(user_id: impl Into<NeedValue>) -> Self {
        Self::from_needs([
            Need::any_user(),
            Need::authenticated_user(),
            Need::user(user_id),
        ])
    }

    /// The system's own background processes.
    pub fn system_process() -> Self {
        Self::from_needs([Need::any_user(), Need::system_process()])
    }

    /// Return a copy that also provides `need`.
    pub fn with_need(mut self, need: Need) -> Self {
        self.provides.insert(need);
        self
    }

    /// The needs this identity provides.
    pub fn provides(&self) -> &NeedSet {
        &self.provides
    }

    /// Return `true` if this identity provides `need`.
    pub fn provides_need(&self, need: &Need) -> bool {
        self.provides.contains(need)
    }

    /// Return `true` if this identity provides at least one of the `needs`.
    pub fn provides_any(&self, needs: &NeedSet) -> bool {
        !self.provides.is_disjoint(needs)
    }

    /// The [Need]s identifying a user. Usually at most one.
    pub fn user_needs(&self) -> impl Iterator<Item = &Need> {
        self.provides.iter().filter(|need| need.is_user())
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let provides = self
            .provides
            .iter()
            .map(Need::to_string)
            .collect::<Vec<_>>()
            .join(",");
        write!(f, "[{provides}]")
    }
}
