// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_graphql_parser::{
    Positioned,
    types::{
        ConstDirective, DirectiveDefinition, FieldDefinition, InputObjectType,
        InputValueDefinition, InterfaceType, ObjectType, SchemaDefinition, ServiceDocument, Type,
        TypeDefinition, TypeKind, TypeSystemDefinition,
    },
};
use async_graphql_value::Name;
use indexmap::IndexMap;

use crate::{
    BUILT_IN_DIRECTIVES, BUILT_IN_SCALARS, MUTATION_ROOT_TYPENAME, QUERY_ROOT_TYPENAME,
    error::SchemaError,
    merge::{MergeMode, merge_type_definitions},
    printer::{print_directive_definition, print_schema_definition, print_type_definition},
    type_normalization::{
        TypeDefinitionIntrospection, default_positioned, default_positioned_name, underlying_type,
    },
};

/// A resolved schema: every type is defined exactly once and extensions have been folded into
/// the types they extend.
///
/// Types and directive definitions keep their insertion order, which makes printing (and
/// therefore composition as a whole) deterministic: base definitions first, in file order,
/// followed by plugin contributions in registration order and then generated types.
#[derive(Debug, Clone, Default)]
pub struct SchemaDocument {
    schema_definition: Option<SchemaDefinition>,
    directive_definitions: IndexMap<String, DirectiveDefinition>,
    type_definitions: IndexMap<String, TypeDefinition>,
}

impl SchemaDocument {
    /// Build a schema from a parsed document (the equivalent of `buildSchema`).
    pub fn from_service_document(document: ServiceDocument) -> Result<Self, SchemaError> {
        Self::default().extend(document)
    }

    /// Fold a parsed document into this schema (the equivalent of `extendSchema`).
    ///
    /// New definitions are added before extensions are applied, so an `extend type` may refer to
    /// a type defined further down in the same document. Redefining an existing type or
    /// directive is an error.
    pub fn extend(self, document: ServiceDocument) -> Result<Self, SchemaError> {
        let (extensions, definitions): (Vec<_>, Vec<_>) = document
            .definitions
            .into_iter()
            .partition(|definition| match definition {
                TypeSystemDefinition::Schema(schema) => schema.node.extend,
                TypeSystemDefinition::Type(typ) => typ.node.extend,
                TypeSystemDefinition::Directive(_) => false,
            });

        let mut schema = self;
        for definition in definitions.into_iter().chain(extensions) {
            schema = match definition {
                TypeSystemDefinition::Schema(definition) => {
                    schema.with_schema_definition(definition.node)?
                }
                TypeSystemDefinition::Type(definition) => {
                    if definition.node.extend {
                        schema.extending_type(definition.node)?
                    } else {
                        schema.with_type(definition.node)?
                    }
                }
                TypeSystemDefinition::Directive(definition) => {
                    schema.with_directive_definition(definition.node)?
                }
            };
        }

        Ok(schema)
    }

    fn with_schema_definition(mut self, definition: SchemaDefinition) -> Result<Self, SchemaError> {
        match (self.schema_definition.as_mut(), definition.extend) {
            (None, _) => {
                self.schema_definition = Some(SchemaDefinition {
                    extend: false,
                    ..definition
                });
            }
            (Some(existing), true) => {
                existing.directives.extend(definition.directives);
                existing.query = existing.query.take().or(definition.query);
                existing.mutation = existing.mutation.take().or(definition.mutation);
                existing.subscription = existing.subscription.take().or(definition.subscription);
            }
            (Some(_), false) => return Err(SchemaError::DuplicateType("schema".to_string())),
        }
        Ok(self)
    }

    pub fn with_directive_definition(
        mut self,
        definition: DirectiveDefinition,
    ) -> Result<Self, SchemaError> {
        let name = definition.name.node.to_string();
        if self.directive_definitions.contains_key(&name) {
            return Err(SchemaError::DuplicateDirective(name));
        }
        self.directive_definitions.insert(name, definition);
        Ok(self)
    }

    /// Add a new type. Fails if a type with the same name already exists.
    pub fn with_type(mut self, definition: TypeDefinition) -> Result<Self, SchemaError> {
        let name = definition.name.node.to_string();
        if self.type_definitions.contains_key(&name) {
            return Err(SchemaError::DuplicateType(name));
        }
        self.type_definitions.insert(
            name,
            TypeDefinition {
                extend: false,
                ..definition
            },
        );
        Ok(self)
    }

    /// Add a type unless one with the same name already exists (in which case the existing one
    /// wins).
    pub fn with_type_if_absent(mut self, definition: TypeDefinition) -> Self {
        let name = definition.name.node.to_string();
        self.type_definitions.entry(name).or_insert(definition);
        self
    }

    /// Add a type, replacing (in place) any existing type with the same name.
    pub fn replacing_type(mut self, definition: TypeDefinition) -> Self {
        let name = definition.name.node.to_string();
        self.type_definitions.insert(name, definition);
        self
    }

    /// Merge an extension into the existing type with the same name.
    pub fn extending_type(mut self, extension: TypeDefinition) -> Result<Self, SchemaError> {
        let name = extension.name.node.to_string();
        let existing = self
            .type_definitions
            .get_mut(&name)
            .ok_or_else(|| SchemaError::ExtensionTargetMissing(name.clone()))?;

        *existing = merge_type_definitions(existing.clone(), extension, MergeMode::Extend)?;
        Ok(self)
    }

    /// Append a field to an object or interface type. Fails if the type is missing, is of another
    /// kind, or already has a field with that name.
    pub fn with_field(
        self,
        type_name: &str,
        field: Positioned<FieldDefinition>,
    ) -> Result<Self, SchemaError> {
        let kind = match self.get_type(type_name).map(|td| &td.kind) {
            Some(TypeKind::Interface(_)) => {
                TypeKind::Interface(InterfaceType {
                    implements: vec![],
                    fields: vec![field],
                })
            }
            _ => TypeKind::Object(ObjectType {
                implements: vec![],
                fields: vec![field],
            }),
        };
        self.extending_type(extension_of(type_name, kind))
    }

    /// Append a field to an input object type.
    pub fn with_input_field(
        self,
        type_name: &str,
        field: Positioned<InputValueDefinition>,
    ) -> Result<Self, SchemaError> {
        self.extending_type(extension_of(
            type_name,
            TypeKind::InputObject(InputObjectType {
                fields: vec![field],
            }),
        ))
    }

    /// Append an argument to a field of an object type. Fails if the argument already exists.
    pub fn with_field_argument(
        mut self,
        type_name: &str,
        field_name: &str,
        argument: Positioned<InputValueDefinition>,
    ) -> Result<Self, SchemaError> {
        let field = self
            .type_definitions
            .get_mut(type_name)
            .and_then(|td| match &mut td.kind {
                TypeKind::Object(object) => Some(&mut object.fields),
                TypeKind::Interface(interface) => Some(&mut interface.fields),
                _ => None,
            })
            .and_then(|fields| {
                fields
                    .iter_mut()
                    .find(|f| f.node.name.node.as_str() == field_name)
            })
            .ok_or_else(|| SchemaError::ExtensionTargetMissing(format!("{type_name}.{field_name}")))?;

        if field
            .node
            .arguments
            .iter()
            .any(|a| a.node.name.node == argument.node.name.node)
        {
            return Err(SchemaError::DuplicateField {
                type_name: format!("{type_name}.{field_name}"),
                field_name: argument.node.name.node.to_string(),
            });
        }

        field.node.arguments.push(argument);
        Ok(self)
    }

    pub fn query_type_name(&self) -> &str {
        self.schema_definition
            .as_ref()
            .and_then(|s| s.query.as_ref())
            .map(|name| name.node.as_str())
            .unwrap_or(QUERY_ROOT_TYPENAME)
    }

    pub fn mutation_type_name(&self) -> &str {
        self.schema_definition
            .as_ref()
            .and_then(|s| s.mutation.as_ref())
            .map(|name| name.node.as_str())
            .unwrap_or(MUTATION_ROOT_TYPENAME)
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.type_definitions.get(name)
    }

    pub fn has_type(&self, name: &str) -> bool {
        self.type_definitions.contains_key(name)
    }

    pub fn type_definitions(&self) -> impl Iterator<Item = &TypeDefinition> {
        self.type_definitions.values()
    }

    pub fn get_directive_definition(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directive_definitions.get(name)
    }

    pub fn directive_definitions(&self) -> impl Iterator<Item = &DirectiveDefinition> {
        self.directive_definitions.values()
    }

    /// Check that every referenced type and directive is defined and that a query root exists.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let query_type_name = self.query_type_name();
        if !self.has_type(query_type_name) {
            return Err(SchemaError::MissingQueryRoot(query_type_name.to_string()));
        }

        if let Some(schema_definition) = &self.schema_definition {
            for root in [&schema_definition.mutation, &schema_definition.subscription]
                .into_iter()
                .flatten()
            {
                self.check_type_reference(&root.node, "schema")?;
            }
        }

        for directive in self.directive_definitions.values() {
            let referenced_by = format!("@{}", directive.name.node);
            self.check_input_values(&directive.arguments, &referenced_by)?;
        }

        for definition in self.type_definitions.values() {
            let type_name = definition.name.node.as_str();
            self.check_directives(&definition.directives, type_name)?;

            match &definition.kind {
                TypeKind::Scalar => {}
                TypeKind::Object(_) | TypeKind::Interface(_) => {
                    for interface in definition.interfaces().into_iter().flatten() {
                        match self.get_type(interface.node.as_str()) {
                            Some(td) if matches!(td.kind, TypeKind::Interface(_)) => {}
                            Some(_) => {
                                return Err(SchemaError::NotAnInterface {
                                    type_name: type_name.to_string(),
                                    interface: interface.node.to_string(),
                                });
                            }
                            None => {
                                return Err(SchemaError::UnknownType {
                                    type_name: interface.node.to_string(),
                                    referenced_by: type_name.to_string(),
                                });
                            }
                        }
                    }
                    for field in definition.fields().into_iter().flatten() {
                        let referenced_by = format!("{type_name}.{}", field.node.name.node);
                        self.check_type(&field.node.ty.node, &referenced_by)?;
                        self.check_input_values(&field.node.arguments, &referenced_by)?;
                        self.check_directives(&field.node.directives, &referenced_by)?;
                    }
                }
                TypeKind::Union(union) => {
                    for member in &union.members {
                        self.check_type_reference(&member.node, type_name)?;
                    }
                }
                TypeKind::Enum(enum_type) => {
                    for value in &enum_type.values {
                        let used_on = format!("{type_name}.{}", value.node.value.node);
                        self.check_directives(&value.node.directives, &used_on)?;
                    }
                }
                TypeKind::InputObject(input) => {
                    self.check_input_values(&input.fields, type_name)?;
                }
            }
        }

        Ok(())
    }

    fn check_input_values(
        &self,
        values: &[Positioned<InputValueDefinition>],
        referenced_by: &str,
    ) -> Result<(), SchemaError> {
        for value in values {
            let referenced_by = format!("{referenced_by}.{}", value.node.name.node);
            self.check_type(&value.node.ty.node, &referenced_by)?;
            self.check_directives(&value.node.directives, &referenced_by)?;
        }
        Ok(())
    }

    fn check_type(&self, typ: &Type, referenced_by: &str) -> Result<(), SchemaError> {
        self.check_type_reference(underlying_type(typ), referenced_by)
    }

    fn check_type_reference(&self, name: &Name, referenced_by: &str) -> Result<(), SchemaError> {
        if BUILT_IN_SCALARS.contains(&name.as_str()) || self.has_type(name.as_str()) {
            Ok(())
        } else {
            Err(SchemaError::UnknownType {
                type_name: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
        }
    }

    fn check_directives(
        &self,
        directives: &[Positioned<ConstDirective>],
        used_on: &str,
    ) -> Result<(), SchemaError> {
        for directive in directives {
            let name = directive.node.name.node.as_str();
            if !BUILT_IN_DIRECTIVES.contains(&name) && !self.directive_definitions.contains_key(name)
            {
                return Err(SchemaError::UnknownDirective {
                    directive: name.to_string(),
                    used_on: used_on.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Print the schema as SDL: the schema definition (if any), then directive definitions, then
    /// types, each in insertion order.
    pub fn to_sdl(&self) -> String {
        let mut parts = vec![];
        if let Some(schema_definition) = &self.schema_definition {
            parts.push(print_schema_definition(schema_definition));
        }
        parts.extend(
            self.directive_definitions
                .values()
                .map(print_directive_definition),
        );
        parts.extend(self.type_definitions.values().map(print_type_definition));

        let mut sdl = parts.join("\n\n");
        sdl.push('\n');
        sdl
    }

    pub fn to_service_document(&self) -> ServiceDocument {
        let mut definitions = vec![];
        if let Some(schema_definition) = &self.schema_definition {
            definitions.push(TypeSystemDefinition::Schema(default_positioned(
                schema_definition.clone(),
            )));
        }
        definitions.extend(
            self.directive_definitions
                .values()
                .map(|d| TypeSystemDefinition::Directive(default_positioned(d.clone()))),
        );
        definitions.extend(
            self.type_definitions
                .values()
                .map(|t| TypeSystemDefinition::Type(default_positioned(t.clone()))),
        );
        ServiceDocument { definitions }
    }
}

fn extension_of(type_name: &str, kind: TypeKind) -> TypeDefinition {
    TypeDefinition {
        extend: true,
        description: None,
        name: default_positioned_name(type_name),
        directives: vec![],
        kind,
    }
}
