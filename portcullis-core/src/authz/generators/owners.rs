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

//! Ownership based access.

use super::RecordGenerator;
use crate::authz::Identity;
use portcullis_dbp::access::FilterClause;
use portcullis_dbp::access::Need;
use portcullis_dbp::access::NeedSet;
use portcullis_dbp::access::NeedValue;
use portcullis_dbp::access::RecordDocument;

/// Allow the owners of the record.
#[derive(Debug, Default, Clone, Copy)]
pub struct RecordOwners;

impl RecordOwners {
    const OWNERS_FIELD: &'static str = "owners";
}

impl RecordGenerator for RecordOwners {
    fn name(&self) -> &str {
        "RecordOwners"
    }

    fn needs(&self, record: Option<&RecordDocument>) -> NeedSet {
        record
            .map(|record| user_needs(record.owners()))
            .unwrap_or_default()
    }

    fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        owner_filter(Self::OWNERS_FIELD, identity)
    }
}

/// Allow the owners of the deposit of the record.
#[derive(Debug, Default, Clone, Copy)]
pub struct DepositOwners;

impl DepositOwners {
    const OWNERS_FIELD: &'static str = "deposits.owners";
}

impl RecordGenerator for DepositOwners {
    fn name(&self) -> &str {
        "DepositOwners"
    }

    fn needs(&self, record: Option<&RecordDocument>) -> NeedSet {
        record
            .map(|record| user_needs(record.deposit_owners()))
            .unwrap_or_default()
    }

    fn query_filter(&self, identity: &Identity) -> Option<FilterClause> {
        owner_filter(Self::OWNERS_FIELD, identity)
    }
}

fn user_needs(ids: Vec<NeedValue>) -> NeedSet {
    ids.into_iter().map(Need::user).collect()
}

/// Term filter on any of the identity's user ids, if it has one.
fn owner_filter(field: &str, identity: &Identity) -> Option<FilterClause> {
    let terms = identity
        .user_needs()
        .map(|need| FilterClause::term(field, need.value().to_json()))
        .collect::<Vec<_>>();
    (!terms.is_empty()).then(|| FilterClause::any_of(terms))
}
