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

//! Credentials held by identities and required by permissions.

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;
use std::fmt;

/// Ordered set of [Need]s.
pub type NeedSet = BTreeSet<Need>;

/// The kind of assertion a [Need] makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeedKind {
    /// The identity is a specific user (the "id" need).
    User,
    /// The identity is member of a named role.
    Role,
    /// The identity is allowed a named action.
    Action,
    /// Roles assigned by the system, like the any-user wildcard.
    SystemRole,
}

impl NeedKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::User => "id",
            Self::Role => "role",
            Self::Action => "action",
            Self::SystemRole => "system_role",
        }
    }
}

/// Value of a [Need].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NeedValue {
    /// Numeric value, typically a user id.
    Int(i64),
    /// Textual value.
    Str(String),
}

impl NeedValue {
    /// Return the value as it would appear in a stored document.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Int(value) => Value::from(*value),
            Self::Str(value) => Value::from(value.as_str()),
        }
    }

    /// Convert a document value into a [NeedValue].
    ///
    /// Only integers and strings are accepted. Anything else yields `None`
    /// and will never grant access.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => number.as_i64().map(Self::Int),
            Value::String(value) => Some(Self::Str(value.to_owned())),
            _ => None,
        }
    }
}

impl From<i64> for NeedValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for NeedValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u32> for NeedValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for NeedValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for NeedValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl fmt::Display for NeedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
        }
    }
}

/// An opaque credential: "is user 7", "has the admin-access action", ...
///
/// Two needs of the same kind and value are interchangeable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Need {
    kind: NeedKind,
    value: NeedValue,
}

impl Need {
    /// Name of the system role held by every identity, including anonymous.
    pub const ANY_USER: &'static str = "any_user";
    /// Name of the system role held by every authenticated identity.
    pub const AUTHENTICATED_USER: &'static str = "authenticated_user";
    /// Name of the system role held by the system's own processes.
    pub const SYSTEM_PROCESS: &'static str = "system_process";

    /// Return a new instance.
    pub fn new(kind: NeedKind, value: impl Into<NeedValue>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// Need identifying a specific user.
    pub fn user(id: impl Into<NeedValue>) -> Self {
        Self::new(NeedKind::User, id)
    }

    /// Need for membership in a role.
    pub fn role(name: &str) -> Self {
        Self::new(NeedKind::Role, name)
    }

    /// Need for being allowed an action.
    pub fn action(name: &str) -> Self {
        Self::new(NeedKind::Action, name)
    }

    /// Need for a system assigned role.
    pub fn system_role(name: &str) -> Self {
        Self::new(NeedKind::SystemRole, name)
    }

    /// The wildcard need held by any identity.
    pub fn any_user() -> Self {
        Self::system_role(Self::ANY_USER)
    }

    /// The wildcard need held by authenticated identities.
    pub fn authenticated_user() -> Self {
        Self::system_role(Self::AUTHENTICATED_USER)
    }

    /// The need held by system processes.
    pub fn system_process() -> Self {
        Self::system_role(Self::SYSTEM_PROCESS)
    }

    /// Return the kind of this need.
    pub fn kind(&self) -> NeedKind {
        self.kind
    }

    /// Return the value of this need.
    pub fn value(&self) -> &NeedValue {
        &self.value
    }

    /// Return `true` if this need identifies a user.
    pub fn is_user(&self) -> bool {
        self.kind == NeedKind::User
    }
}

impl fmt::Display for Need {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.value)
    }
}
