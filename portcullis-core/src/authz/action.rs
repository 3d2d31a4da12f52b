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

//! Actions subject to permission checks.

use portcullis_dbp::access::PermissionError;
use portcullis_dbp::access::PermissionErrorKind;
use std::fmt;
use std::str::FromStr;

/// The closed set of actions a [super::PermissionPolicy] configures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Action {
    /// Create a new record.
    Create,
    /// Search or list records. No single target.
    Search,
    /// Read a record's metadata.
    Read,
    /// Read the files in a record's bucket.
    ReadFiles,
    /// Update a record's metadata.
    Update,
    /// Update the files in a record's bucket.
    UpdateFiles,
    /// Delete a record.
    Delete,
}

impl Action {
    /// All actions.
    pub const ALL: [Action; 7] = [
        Self::Create,
        Self::Search,
        Self::Read,
        Self::ReadFiles,
        Self::Update,
        Self::UpdateFiles,
        Self::Delete,
    ];

    /// Canonical name of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Search => "search",
            Self::Read => "read",
            Self::ReadFiles => "read_files",
            Self::Update => "update",
            Self::UpdateFiles => "update_files",
            Self::Delete => "delete",
        }
    }

    /// Return `true` for actions on a record's files, which are evaluated
    /// against the record's bucket.
    pub fn is_files_action(&self) -> bool {
        matches!(self, Self::ReadFiles | Self::UpdateFiles)
    }
}

impl FromStr for Action {
    type Err = PermissionError;

    /// Parse a canonical action name. `list` is accepted for [Action::Search].
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "create" => Ok(Self::Create),
            "search" | "list" => Ok(Self::Search),
            "read" => Ok(Self::Read),
            "read_files" => Ok(Self::ReadFiles),
            "update" => Ok(Self::Update),
            "update_files" => Ok(Self::UpdateFiles),
            "delete" => Ok(Self::Delete),
            _ => Err(PermissionErrorKind::UnknownAction
                .error_with_msg(format!("Action '{value}' is unknown."))),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
