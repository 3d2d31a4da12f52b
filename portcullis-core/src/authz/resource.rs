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

//! The target of a permission check.

use portcullis_dbp::access::Bucket;
use portcullis_dbp::access::RecordDocument;
use std::fmt;

/// The target of a permission check.
#[derive(Debug, Clone, Copy)]
pub enum Resource<'a> {
    /// No single target, like when searching.
    None,
    /// A record.
    Record(&'a RecordDocument),
    /// The storage bucket of a record's files.
    Bucket(&'a Bucket),
}

impl Resource<'_> {
    /// Name of the resource shape, for messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Record(_) => "record",
            Self::Bucket(_) => "bucket",
        }
    }
}

impl<'a> From<&'a RecordDocument> for Resource<'a> {
    fn from(record: &'a RecordDocument) -> Self {
        Self::Record(record)
    }
}

impl<'a> From<&'a Bucket> for Resource<'a> {
    fn from(bucket: &'a Bucket) -> Self {
        Self::Bucket(bucket)
    }
}

impl<'a> From<Option<&'a RecordDocument>> for Resource<'a> {
    fn from(record: Option<&'a RecordDocument>) -> Self {
        record.map_or(Self::None, Self::Record)
    }
}

impl fmt::Display for Resource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Record(record) => write!(
                f,
                "record;{}",
                record.id().unwrap_or_else(|| "?".to_string())
            ),
            Self::Bucket(bucket) => write!(f, "{bucket}"),
        }
    }
}
