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

//! Built-in policy for published records.

use super::PermissionPolicy;
use crate::authz::Action;
use crate::authz::Generator;
use crate::authz::generators::*;
use crate::conf::AppConfig;

/// Name of the built-in policy for published records.
pub const RECORDS_POLICY: &str = "records";

/** Policy for published records.

* Public records can be read and searched by anyone. Owners and users with a
  granting access level can read, search and update their records.
* Files of open access records with public metadata and files can be read by
  anyone. Owners can read and update the files of their records.
* Records are created by publishing deposits, so `create` is disabled.
* Only administrators delete records.
*/
pub fn records_policy(app_config: &AppConfig) -> PermissionPolicy {
    let levels = &app_config.accesslevels;
    let read = || {
        vec![
            Generator::record(IfPublic::any_user_if_public()),
            Generator::record(RecordOwners),
            Generator::record(AllowedByAccessLevel::new(Action::Read, levels)),
        ]
    };
    PermissionPolicy::builder(RECORDS_POLICY)
        .with_action(Action::Search, read())
        .with_action(Action::Create, vec![Generator::context_free(Disable)])
        .with_action(Action::Read, read())
        .with_action(
            Action::Update,
            vec![
                Generator::record(RecordOwners),
                Generator::record(AllowedByAccessLevel::new(Action::Update, levels)),
            ],
        )
        .with_action(
            Action::Delete,
            vec![Generator::context_free(Admin::new(
                app_config.policy.admin_action(),
            ))],
        )
        .with_action(
            Action::ReadFiles,
            vec![
                Generator::bucket_record(IfPublic::any_user_if_public_files()),
                Generator::bucket_record(RecordOwners),
            ],
        )
        .with_action(
            Action::UpdateFiles,
            vec![Generator::bucket_record(RecordOwners)],
        )
        .with_label("bucket-update", Action::UpdateFiles)
        .with_label("bucket-read", Action::ReadFiles)
        .with_label("object-read", Action::ReadFiles)
        .build()
}
