// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Operator configuration for API composition: per-surface transport settings, authentication
//! strategies, custom permissions and custom fields.

mod auth;
mod custom_fields;
mod error;
mod loader;
mod model;
mod permission;

pub use auth::{AuthenticationStrategy, NATIVE_AUTH_STRATEGY_NAME};
pub use custom_fields::{CUSTOM_FIELD_ENTITIES, CustomFieldConfig, CustomFieldType, CustomFields};
pub use error::{ConfigurationError, is_graphql_name};
pub use loader::{
    DEFAULT_CONFIG_FILE, load_config, load_config_from_file, load_config_from_str,
    normalize_api_path,
};
pub use model::{
    ApiOptions, AuthOptions, DEFAULT_MAX_SELECTION_DEPTH, StorefrontConfig, SurfaceOptions,
};
pub use permission::{PermissionDefinition, default_permissions};
