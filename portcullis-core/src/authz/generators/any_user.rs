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

//! Wildcard generators.

use super::ContextFreeGenerator;
use crate::authz::Identity;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::dbp::RecordStore;

/// Allow any user, including anonymous ones.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnyUser;

impl ContextFreeGenerator for AnyUser {
    fn name(&self) -> &str {
        "AnyUser"
    }

    fn needs(&self, _store: &RecordStore) -> NeedSet {
        NeedSet::from([Need::any_user()])
    }

    fn query_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        Some(FilterClause::MatchAll)
    }
}

/// Allow any authenticated user.
///
/// The search filter does not depend on authentication, so anonymous
/// searches are filtered by the other generators of the action.
#[derive(Debug, Default, Clone, Copy)]
pub struct AuthenticatedUser;

impl ContextFreeGenerator for AuthenticatedUser {
    fn name(&self) -> &str {
        "AuthenticatedUser"
    }

    fn needs(&self, _store: &RecordStore) -> NeedSet {
        NeedSet::from([Need::authenticated_user()])
    }

    fn query_filter(&self, _identity: &Identity) -> Option<FilterClause> {
        Some(FilterClause::MatchAll)
    }
}
