// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Helpers to construct and inspect `async_graphql_parser` type definitions.
//!
//! Generated definitions carry no source position, so everything built here uses
//! `Pos::default()`.

use async_graphql_parser::{
    Pos, Positioned,
    types::{
        BaseType, EnumType, EnumValueDefinition, FieldDefinition, InputObjectType,
        InputValueDefinition, ObjectType, Type, TypeDefinition, TypeKind,
    },
};
use async_graphql_value::Name;

pub fn default_positioned<T>(value: T) -> Positioned<T> {
    Positioned::new(value, Pos::default())
}

pub fn default_positioned_name(value: &str) -> Positioned<Name> {
    default_positioned(Name::new(value))
}

fn description(value: Option<&str>) -> Option<Positioned<String>> {
    value.map(|d| default_positioned(d.to_string()))
}

/// A named type such as `String` or `Order!`
pub fn named_type(name: &str, nullable: bool) -> Type {
    Type {
        base: BaseType::Named(Name::new(name)),
        nullable,
    }
}

/// A list type such as `[Order!]!`
pub fn list_type(element_type: &str, element_nullable: bool, nullable: bool) -> Type {
    Type {
        base: BaseType::List(Box::new(named_type(element_type, element_nullable))),
        nullable,
    }
}

/// The same type with the outermost non-null marker removed.
pub fn nullable(typ: &Type) -> Type {
    Type {
        base: typ.base.clone(),
        nullable: true,
    }
}

/// The name of the innermost type (`Order` for `[Order!]!`)
pub fn underlying_type(typ: &Type) -> &Name {
    match &typ.base {
        BaseType::Named(name) => name,
        BaseType::List(inner) => underlying_type(inner),
    }
}

pub fn is_list(typ: &Type) -> bool {
    matches!(typ.base, BaseType::List(_))
}

pub fn field_definition(
    name: &str,
    ty: Type,
    field_description: Option<&str>,
) -> Positioned<FieldDefinition> {
    default_positioned(FieldDefinition {
        description: description(field_description),
        name: default_positioned_name(name),
        arguments: vec![],
        ty: default_positioned(ty),
        directives: vec![],
    })
}

pub fn input_value_definition(
    name: &str,
    ty: Type,
    value_description: Option<&str>,
) -> Positioned<InputValueDefinition> {
    default_positioned(InputValueDefinition {
        description: description(value_description),
        name: default_positioned_name(name),
        ty: default_positioned(ty),
        default_value: None,
        directives: vec![],
    })
}

pub fn object_type_definition(
    name: &str,
    type_description: Option<&str>,
    fields: Vec<Positioned<FieldDefinition>>,
) -> TypeDefinition {
    TypeDefinition {
        extend: false,
        description: description(type_description),
        name: default_positioned_name(name),
        directives: vec![],
        kind: TypeKind::Object(ObjectType {
            implements: vec![],
            fields,
        }),
    }
}

pub fn input_object_type_definition(
    name: &str,
    type_description: Option<&str>,
    fields: Vec<Positioned<InputValueDefinition>>,
) -> TypeDefinition {
    TypeDefinition {
        extend: false,
        description: description(type_description),
        name: default_positioned_name(name),
        directives: vec![],
        kind: TypeKind::InputObject(InputObjectType { fields }),
    }
}

/// An enum whose members are `(name, description)` pairs, in the given order.
pub fn enum_type_definition<'a>(
    name: &str,
    type_description: Option<&str>,
    values: impl IntoIterator<Item = (&'a str, Option<&'a str>)>,
) -> TypeDefinition {
    TypeDefinition {
        extend: false,
        description: description(type_description),
        name: default_positioned_name(name),
        directives: vec![],
        kind: TypeKind::Enum(EnumType {
            values: values
                .into_iter()
                .map(|(value, value_description)| {
                    default_positioned(EnumValueDefinition {
                        description: description(value_description),
                        value: default_positioned_name(value),
                        directives: vec![],
                    })
                })
                .collect(),
        }),
    }
}

pub fn scalar_type_definition(name: &str, type_description: Option<&str>) -> TypeDefinition {
    TypeDefinition {
        extend: false,
        description: description(type_description),
        name: default_positioned_name(name),
        directives: vec![],
        kind: TypeKind::Scalar,
    }
}

/// Deal with variants of `TypeDefinition` to give a uniform view suitable for composition
pub trait TypeDefinitionIntrospection {
    fn name(&self) -> &str;
    fn kind(&self) -> &'static str;
    fn fields(&self) -> Option<&Vec<Positioned<FieldDefinition>>>;
    fn interfaces(&self) -> Option<&Vec<Positioned<Name>>>;
    fn enum_values(&self) -> Option<&Vec<Positioned<EnumValueDefinition>>>;
    fn input_fields(&self) -> Option<&Vec<Positioned<InputValueDefinition>>>;

    fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields()?
            .iter()
            .map(|f| &f.node)
            .find(|f| f.name.node.as_str() == name)
    }

    fn input_field(&self, name: &str) -> Option<&InputValueDefinition> {
        self.input_fields()?
            .iter()
            .map(|f| &f.node)
            .find(|f| f.name.node.as_str() == name)
    }

    fn implements(&self, interface: &str) -> bool {
        self.interfaces()
            .map(|interfaces| interfaces.iter().any(|i| i.node.as_str() == interface))
            .unwrap_or(false)
    }
}

impl TypeDefinitionIntrospection for TypeDefinition {
    fn name(&self) -> &str {
        self.name.node.as_str()
    }

    fn kind(&self) -> &'static str {
        kind_name(&self.kind)
    }

    fn fields(&self) -> Option<&Vec<Positioned<FieldDefinition>>> {
        match &self.kind {
            TypeKind::Object(value) => Some(&value.fields),
            TypeKind::Interface(value) => Some(&value.fields),
            _ => None,
        }
    }

    fn interfaces(&self) -> Option<&Vec<Positioned<Name>>> {
        match &self.kind {
            TypeKind::Object(value) => Some(&value.implements),
            TypeKind::Interface(value) => Some(&value.implements),
            _ => None,
        }
    }

    fn enum_values(&self) -> Option<&Vec<Positioned<EnumValueDefinition>>> {
        match &self.kind {
            TypeKind::Enum(value) => Some(&value.values),
            _ => None,
        }
    }

    fn input_fields(&self) -> Option<&Vec<Positioned<InputValueDefinition>>> {
        match &self.kind {
            TypeKind::InputObject(value) => Some(&value.fields),
            _ => None,
        }
    }
}

pub fn kind_name(kind: &TypeKind) -> &'static str {
    match kind {
        TypeKind::Scalar => "scalar",
        TypeKind::Object(_) => "type",
        TypeKind::Interface(_) => "interface",
        TypeKind::Union(_) => "union",
        TypeKind::Enum(_) => "enum",
        TypeKind::InputObject(_) => "input",
    }
}
