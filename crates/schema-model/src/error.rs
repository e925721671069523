// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Type '{0}' is defined more than once")]
    DuplicateType(String),

    #[error("Directive '@{0}' is defined more than once")]
    DuplicateDirective(String),

    #[error("Field '{field_name}' is defined more than once on '{type_name}'")]
    DuplicateField {
        type_name: String,
        field_name: String,
    },

    #[error("Field '{type_name}.{field_name}' is declared as both '{first}' and '{second}'")]
    ConflictingFieldType {
        type_name: String,
        field_name: String,
        first: String,
        second: String,
    },

    #[error("Enum value '{value}' is defined more than once on '{type_name}'")]
    DuplicateEnumValue { type_name: String, value: String },

    #[error("Type '{member}' is included more than once in union '{type_name}'")]
    DuplicateUnionMember { type_name: String, member: String },

    #[error("Cannot merge {second} '{type_name}' into an existing {first}")]
    KindMismatch {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("Cannot extend type '{0}' because it is not defined")]
    ExtensionTargetMissing(String),

    #[error("Unknown type '{type_name}' referenced by '{referenced_by}'")]
    UnknownType {
        type_name: String,
        referenced_by: String,
    },

    #[error("Unknown directive '@{directive}' used on '{used_on}'")]
    UnknownDirective { directive: String, used_on: String },

    #[error("'{type_name}' implements '{interface}', which is not an interface")]
    NotAnInterface { type_name: String, interface: String },

    #[error("Schema has no query root type '{0}'")]
    MissingQueryRoot(String),
}
