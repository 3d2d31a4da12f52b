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

//! Record permission engine.

mod action;
mod factories;
pub mod generators;
mod identity;
mod permission;
pub mod policy;
mod policy_registry;
mod resource;

pub use self::action::Action;
pub use self::factories::PermissionFactory;
pub use self::generators::Generator;
pub use self::identity::Identity;
pub use self::permission::Permission;
pub use self::policy::PermissionPolicy;
pub use self::policy_registry::PolicyRegistry;
pub use self::resource::Resource;
