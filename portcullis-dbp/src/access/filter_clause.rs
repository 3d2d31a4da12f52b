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

//! Search filter clauses.

use super::values_at;
use serde_json::Value;
use serde_json::json;
use std::fmt;

/** Search-time filter restricting results to permitted documents.

The clause is opaque to the search layer: render it with [Self::to_query()]
and pass the JSON verbatim. Combine clauses with [Self::any_of()],
[Self::all_of()] and [Self::negate()], which keep the tree simplified.

[Self::matches()] evaluates the clause against a single JSON document with the
same semantics as the search engine: dotted field paths, arrays are flattened
and `Nested` clauses are evaluated per element.
*/
#[derive(Debug, Clone, PartialEq)]
pub enum FilterClause {
    /// Matches every document.
    MatchAll,
    /// Matches no document.
    MatchNone,
    /// Field equals value. For array fields, any element equals value.
    Term {
        /// Dotted field path.
        field: String,
        /// Value to compare with.
        value: Value,
    },
    /// At least one object under `path` matches `clause` on its own.
    ///
    /// Field paths inside `clause` include `path` as prefix.
    Nested {
        /// Dotted path of the array of objects.
        path: String,
        /// Clause evaluated for each object.
        clause: Box<FilterClause>,
    },
    /// All clauses match.
    And(Vec<FilterClause>),
    /// At least one clause matches.
    Or(Vec<FilterClause>),
    /// The clause does not match.
    Not(Box<FilterClause>),
}

impl FilterClause {
    /// Term equality clause.
    pub fn term(field: &str, value: impl Into<Value>) -> Self {
        Self::Term {
            field: field.to_owned(),
            value: value.into(),
        }
    }

    /// Nested clause over the objects under `path`.
    pub fn nested(path: &str, clause: FilterClause) -> Self {
        Self::Nested {
            path: path.to_owned(),
            clause: Box::new(clause),
        }
    }

    /// Disjunction of `clauses`.
    ///
    /// An empty disjunction matches nothing.
    pub fn any_of(clauses: impl IntoIterator<Item = FilterClause>) -> Self {
        let mut flattened = vec![];
        for clause in clauses {
            match clause {
                Self::MatchAll => return Self::MatchAll,
                Self::MatchNone => {}
                Self::Or(inner) => flattened.extend(inner),
                clause => flattened.push(clause),
            }
        }
        match flattened.len() {
            0 => Self::MatchNone,
            1 => flattened.remove(0),
            _ => Self::Or(flattened),
        }
    }

    /// Conjunction of `clauses`.
    ///
    /// An empty conjunction matches everything.
    pub fn all_of(clauses: impl IntoIterator<Item = FilterClause>) -> Self {
        let mut flattened = vec![];
        for clause in clauses {
            match clause {
                Self::MatchNone => return Self::MatchNone,
                Self::MatchAll => {}
                Self::And(inner) => flattened.extend(inner),
                clause => flattened.push(clause),
            }
        }
        match flattened.len() {
            0 => Self::MatchAll,
            1 => flattened.remove(0),
            _ => Self::And(flattened),
        }
    }

    /// Negation of this clause.
    pub fn negate(self) -> Self {
        match self {
            Self::MatchAll => Self::MatchNone,
            Self::MatchNone => Self::MatchAll,
            Self::Not(inner) => *inner,
            clause => Self::Not(Box::new(clause)),
        }
    }

    /// Return `true` if `document` would be selected by this clause.
    pub fn matches(&self, document: &Value) -> bool {
        self.matches_in_scope(document, "")
    }

    fn matches_in_scope(&self, document: &Value, scope: &str) -> bool {
        match self {
            Self::MatchAll => true,
            Self::MatchNone => false,
            Self::Term { field, value } => {
                values_at(document, Self::relative_path(field, scope))
                    .into_iter()
                    .any(|candidate| candidate == value)
            }
            Self::Nested { path, clause } => {
                values_at(document, Self::relative_path(path, scope))
                    .into_iter()
                    .any(|element| clause.matches_in_scope(element, path))
            }
            Self::And(clauses) => clauses
                .iter()
                .all(|clause| clause.matches_in_scope(document, scope)),
            Self::Or(clauses) => clauses
                .iter()
                .any(|clause| clause.matches_in_scope(document, scope)),
            Self::Not(clause) => !clause.matches_in_scope(document, scope),
        }
    }

    /// Strip the nested `scope` prefix from a field path.
    fn relative_path<'a>(field: &'a str, scope: &str) -> &'a str {
        if scope.is_empty() {
            return field;
        }
        field
            .strip_prefix(scope)
            .and_then(|rest| rest.strip_prefix('.'))
            .unwrap_or(field)
    }

    /// Render the clause in the search engine's query DSL.
    pub fn to_query(&self) -> Value {
        match self {
            Self::MatchAll => json!({"match_all": {}}),
            Self::MatchNone => json!({"match_none": {}}),
            Self::Term { field, value } => json!({"term": {field.as_str(): value}}),
            Self::Nested { path, clause } => json!({
                "nested": {"path": path, "query": clause.to_query()}
            }),
            Self::And(clauses) => json!({
                "bool": {"filter": clauses.iter().map(Self::to_query).collect::<Vec<_>>()}
            }),
            Self::Or(clauses) => json!({
                "bool": {
                    "should": clauses.iter().map(Self::to_query).collect::<Vec<_>>(),
                    "minimum_should_match": 1
                }
            }),
            Self::Not(clause) => json!({"bool": {"must_not": [clause.to_query()]}}),
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_query())
    }
}
