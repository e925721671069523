// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use api_config::PermissionDefinition;
use schema_model::{SchemaDocument, type_normalization::enum_type_definition};
use tracing::debug;

pub const PERMISSION_ENUM: &str = "Permission";

/// The members of the `Permission` enum: built-in permissions followed by custom ones, each
/// name appearing once.
pub fn permission_members(
    built_in: &[PermissionDefinition],
    custom: &[PermissionDefinition],
) -> Vec<(String, String)> {
    let mut members: Vec<(String, String)> = vec![];
    for (name, description) in built_in.iter().chain(custom).flat_map(|d| d.members()) {
        if !members.iter().any(|(existing, _)| existing == &name) {
            members.push((name, description));
        }
    }
    members
}

/// (Re)define the `Permission` enum.
pub fn generate_permission_enum(
    schema: SchemaDocument,
    built_in: &[PermissionDefinition],
    custom: &[PermissionDefinition],
) -> SchemaDocument {
    let members = permission_members(built_in, custom);
    debug!(count = members.len(), "Generated permissions");

    schema.replacing_type(enum_type_definition(
        PERMISSION_ENUM,
        Some("Permissions for administrators and customers"),
        members.iter().map(|(name, description)| {
            (
                name.as_str(),
                Some(description.as_str()).filter(|d| !d.is_empty()),
            )
        }),
    ))
}
