// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Merging of two definitions of the same type.
//!
//! There are two flavours:
//! - [MergeMode::Combine] is used when the base type definition files are merged. Several files
//!   may each declare `type Query { ... }`; identical redeclarations of a field are tolerated, but a
//!   field declared with two different types is a conflict.
//! - [MergeMode::Extend] is used for `extend type ...` definitions. Every element an extension
//!   contributes must be new.

use async_graphql_parser::{
    Positioned,
    types::{FieldDefinition, InputValueDefinition, TypeDefinition, TypeKind},
};
use async_graphql_value::Name;

use crate::{error::SchemaError, type_normalization::kind_name};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    Combine,
    Extend,
}

/// Merge `other` into `base`, returning the merged definition.
pub fn merge_type_definitions(
    base: TypeDefinition,
    other: TypeDefinition,
    mode: MergeMode,
) -> Result<TypeDefinition, SchemaError> {
    let type_name = base.name.node.to_string();

    let TypeDefinition {
        extend,
        description,
        name,
        mut directives,
        kind,
    } = base;

    let first = kind_name(&kind);
    let second = kind_name(&other.kind);

    let kind = match (kind, other.kind) {
        (TypeKind::Scalar, TypeKind::Scalar) => TypeKind::Scalar,
        (TypeKind::Object(mut base_object), TypeKind::Object(other_object)) => {
            merge_names(&mut base_object.implements, other_object.implements);
            merge_fields(
                &type_name,
                &mut base_object.fields,
                other_object.fields,
                mode,
            )?;
            TypeKind::Object(base_object)
        }
        (TypeKind::Interface(mut base_interface), TypeKind::Interface(other_interface)) => {
            merge_names(&mut base_interface.implements, other_interface.implements);
            merge_fields(
                &type_name,
                &mut base_interface.fields,
                other_interface.fields,
                mode,
            )?;
            TypeKind::Interface(base_interface)
        }
        (TypeKind::Union(mut base_union), TypeKind::Union(other_union)) => {
            for member in other_union.members {
                let exists = base_union
                    .members
                    .iter()
                    .any(|m| m.node == member.node);
                match (exists, mode) {
                    (false, _) => base_union.members.push(member),
                    (true, MergeMode::Combine) => {}
                    (true, MergeMode::Extend) => {
                        return Err(SchemaError::DuplicateUnionMember {
                            type_name,
                            member: member.node.to_string(),
                        });
                    }
                }
            }
            TypeKind::Union(base_union)
        }
        (TypeKind::Enum(mut base_enum), TypeKind::Enum(other_enum)) => {
            for value in other_enum.values {
                let exists = base_enum
                    .values
                    .iter()
                    .any(|v| v.node.value.node == value.node.value.node);
                match (exists, mode) {
                    (false, _) => base_enum.values.push(value),
                    (true, MergeMode::Combine) => {}
                    (true, MergeMode::Extend) => {
                        return Err(SchemaError::DuplicateEnumValue {
                            type_name,
                            value: value.node.value.node.to_string(),
                        });
                    }
                }
            }
            TypeKind::Enum(base_enum)
        }
        (TypeKind::InputObject(mut base_input), TypeKind::InputObject(other_input)) => {
            merge_input_values(&type_name, &mut base_input.fields, other_input.fields, mode)?;
            TypeKind::InputObject(base_input)
        }
        _ => {
            return Err(SchemaError::KindMismatch {
                type_name,
                first: first.to_string(),
                second: second.to_string(),
            });
        }
    };

    directives.extend(other.directives);

    Ok(TypeDefinition {
        extend,
        description: description.or(other.description),
        name,
        directives,
        kind,
    })
}

fn merge_names(base: &mut Vec<Positioned<Name>>, other: Vec<Positioned<Name>>) {
    for name in other {
        if !base.iter().any(|n| n.node == name.node) {
            base.push(name);
        }
    }
}

fn merge_fields(
    type_name: &str,
    base: &mut Vec<Positioned<FieldDefinition>>,
    other: Vec<Positioned<FieldDefinition>>,
    mode: MergeMode,
) -> Result<(), SchemaError> {
    for field in other {
        let existing = base
            .iter()
            .find(|f| f.node.name.node == field.node.name.node);

        match existing {
            None => base.push(field),
            Some(existing) => {
                check_redeclaration(
                    type_name,
                    field.node.name.node.as_str(),
                    existing.node.ty.node.to_string(),
                    field.node.ty.node.to_string(),
                    mode,
                )?;
            }
        }
    }
    Ok(())
}

fn merge_input_values(
    type_name: &str,
    base: &mut Vec<Positioned<InputValueDefinition>>,
    other: Vec<Positioned<InputValueDefinition>>,
    mode: MergeMode,
) -> Result<(), SchemaError> {
    for field in other {
        let existing = base
            .iter()
            .find(|f| f.node.name.node == field.node.name.node);

        match existing {
            None => base.push(field),
            Some(existing) => {
                check_redeclaration(
                    type_name,
                    field.node.name.node.as_str(),
                    existing.node.ty.node.to_string(),
                    field.node.ty.node.to_string(),
                    mode,
                )?;
            }
        }
    }
    Ok(())
}

fn check_redeclaration(
    type_name: &str,
    field_name: &str,
    first: String,
    second: String,
    mode: MergeMode,
) -> Result<(), SchemaError> {
    match mode {
        MergeMode::Extend => Err(SchemaError::DuplicateField {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
        }),
        MergeMode::Combine if first == second => Ok(()),
        MergeMode::Combine => Err(SchemaError::ConflictingFieldType {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
            first,
            second,
        }),
    }
}
