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

//! Permission engine errors.

use std::error::Error;
use std::fmt;

/// Cause of error.
///
/// Except for [Self::Unauthorized], all kinds are configuration or wiring
/// problems that are surfaced right away. Missing or ambiguous data is never an
/// error: it resolves to deny.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionErrorKind {
    /// General failure. See message for details.
    Unspecified,
    /// The action name is not part of the policy's action enumeration.
    UnknownAction,
    /// A generator was dispatched with a resource shape it does not support.
    UnknownGeneratorContext,
    /// The configured policy name is not registered.
    UnknownPolicy,
    /// A lookup in the record store failed.
    StoreFailure,
    /// The record document lacks data required by the operation.
    MalformedRecord,
    /// The identity is not allowed to perform the action.
    Unauthorized,
}

impl PermissionErrorKind {
    /// Create a new instance with an error message.
    pub fn error_with_msg<S: AsRef<str>>(self, msg: S) -> PermissionError {
        PermissionError {
            kind: self,
            msg: Some(msg.as_ref().to_string()),
        }
    }

    /// Create a new instance without an error message.
    pub fn error(self) -> PermissionError {
        PermissionError {
            kind: self,
            msg: None,
        }
    }
}

impl fmt::Display for PermissionErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/** Permission engine error.

Create a new instance via [PermissionErrorKind].
*/
#[derive(Debug)]
pub struct PermissionError {
    kind: PermissionErrorKind,
    msg: Option<String>,
}

impl PermissionError {
    /// Return the type of error.
    pub fn kind(&self) -> &PermissionErrorKind {
        &self.kind
    }
}

impl fmt::Display for PermissionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(msg) = &self.msg {
            write!(f, "{} {}", self.kind, msg)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}

impl AsRef<PermissionError> for PermissionError {
    fn as_ref(&self) -> &PermissionError {
        self
    }
}

impl Error for PermissionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_kind_and_message() {
        let e = PermissionErrorKind::UnknownAction.error_with_msg("Action 'bogus' is unknown.");
        assert_eq!(e.kind(), &PermissionErrorKind::UnknownAction);
        assert_eq!(e.to_string(), "UnknownAction Action 'bogus' is unknown.");
        assert_eq!(
            PermissionErrorKind::UnknownPolicy.error().to_string(),
            "UnknownPolicy"
        );
    }
}
