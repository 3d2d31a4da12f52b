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

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod dbp;
pub mod access {
    //! Access control objects shared between the engine and record stores.

    mod bucket;
    mod filter_clause;
    mod json_path;
    mod need;
    mod permission_error;
    mod record_document;

    pub use self::bucket::Bucket;
    pub use self::filter_clause::FilterClause;
    pub use self::json_path::values_at;
    pub use self::need::Need;
    pub use self::need::NeedKind;
    pub use self::need::NeedSet;
    pub use self::need::NeedValue;
    pub use self::permission_error::PermissionError;
    pub use self::permission_error::PermissionErrorKind;
    pub use self::record_document::RecordDocument;
}
