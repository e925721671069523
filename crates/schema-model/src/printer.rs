// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Printing of schema definitions back to SDL text.
//!
//! The output is meant to be parsed again (by the transport layer, or by our own base-schema
//! build after the loader merged several files), so it sticks to the plain GraphQL grammar:
//! block-string descriptions, two-space indentation, one definition per paragraph.

use std::fmt::Write;

use async_graphql_parser::{
    Positioned,
    types::{
        ConstDirective, DirectiveDefinition, FieldDefinition, InputValueDefinition,
        SchemaDefinition, TypeDefinition, TypeKind, TypeSystemDefinition,
    },
};
use async_graphql_value::Name;
use heck::ToShoutySnakeCase;

const INDENT: &str = "  ";

pub fn print_type_system_definition(definition: &TypeSystemDefinition) -> String {
    match definition {
        TypeSystemDefinition::Schema(schema) => print_schema_definition(&schema.node),
        TypeSystemDefinition::Type(typ) => print_type_definition(&typ.node),
        TypeSystemDefinition::Directive(directive) => print_directive_definition(&directive.node),
    }
}

pub fn print_schema_definition(schema: &SchemaDefinition) -> String {
    let mut out = String::new();
    if schema.extend {
        out.push_str("extend ");
    }
    out.push_str("schema");
    out.push_str(&print_directives(&schema.directives));
    out.push_str(" {\n");
    for (operation, name) in [
        ("query", &schema.query),
        ("mutation", &schema.mutation),
        ("subscription", &schema.subscription),
    ] {
        if let Some(name) = name {
            let _ = writeln!(out, "{INDENT}{operation}: {}", name.node);
        }
    }
    out.push('}');
    out
}

pub fn print_directive_definition(directive: &DirectiveDefinition) -> String {
    let mut out = print_description(directive.description.as_ref(), "");
    let _ = write!(out, "directive @{}", directive.name.node);
    out.push_str(&print_arguments(&directive.arguments));
    if directive.is_repeatable {
        out.push_str(" repeatable");
    }
    let locations = directive
        .locations
        .iter()
        .map(|location| format!("{:?}", location.node).to_shouty_snake_case())
        .collect::<Vec<_>>()
        .join(" | ");
    let _ = write!(out, " on {locations}");
    out
}

pub fn print_type_definition(definition: &TypeDefinition) -> String {
    let mut out = print_description(definition.description.as_ref(), "");
    if definition.extend {
        out.push_str("extend ");
    }

    let name = &definition.name.node;
    let directives = print_directives(&definition.directives);

    match &definition.kind {
        TypeKind::Scalar => {
            let _ = write!(out, "scalar {name}{directives}");
        }
        TypeKind::Object(object) => {
            let _ = write!(
                out,
                "type {name}{}{directives}",
                print_implements(&object.implements)
            );
            out.push_str(&print_fields(&object.fields));
        }
        TypeKind::Interface(interface) => {
            let _ = write!(
                out,
                "interface {name}{}{directives}",
                print_implements(&interface.implements)
            );
            out.push_str(&print_fields(&interface.fields));
        }
        TypeKind::Union(union) => {
            let _ = write!(out, "union {name}{directives}");
            if !union.members.is_empty() {
                let members = union
                    .members
                    .iter()
                    .map(|m| m.node.as_str())
                    .collect::<Vec<_>>()
                    .join(" | ");
                let _ = write!(out, " = {members}");
            }
        }
        TypeKind::Enum(enum_type) => {
            let _ = write!(out, "enum {name}{directives}");
            if !enum_type.values.is_empty() {
                out.push_str(" {\n");
                for value in &enum_type.values {
                    out.push_str(&print_description(value.node.description.as_ref(), INDENT));
                    let _ = writeln!(
                        out,
                        "{INDENT}{}{}",
                        value.node.value.node,
                        print_directives(&value.node.directives)
                    );
                }
                out.push('}');
            }
        }
        TypeKind::InputObject(input) => {
            let _ = write!(out, "input {name}{directives}");
            if !input.fields.is_empty() {
                out.push_str(" {\n");
                for field in &input.fields {
                    out.push_str(&print_description(field.node.description.as_ref(), INDENT));
                    let _ = writeln!(out, "{INDENT}{}", print_input_value(&field.node));
                }
                out.push('}');
            }
        }
    }

    out
}

fn print_fields(fields: &[Positioned<FieldDefinition>]) -> String {
    if fields.is_empty() {
        return String::new();
    }

    let mut out = String::from(" {\n");
    for field in fields {
        let field = &field.node;
        out.push_str(&print_description(field.description.as_ref(), INDENT));
        let _ = writeln!(
            out,
            "{INDENT}{}{}: {}{}",
            field.name.node,
            print_arguments(&field.arguments),
            field.ty.node,
            print_directives(&field.directives)
        );
    }
    out.push('}');
    out
}

fn print_arguments(arguments: &[Positioned<InputValueDefinition>]) -> String {
    if arguments.is_empty() {
        return String::new();
    }

    let arguments = arguments
        .iter()
        .map(|argument| {
            let mut out = String::new();
            if let Some(description) = &argument.node.description {
                out.push_str(&print_inline_description(&description.node));
            }
            out.push_str(&print_input_value(&argument.node));
            out
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!("({arguments})")
}

fn print_input_value(value: &InputValueDefinition) -> String {
    let mut out = format!("{}: {}", value.name.node, value.ty.node);
    if let Some(default_value) = &value.default_value {
        let _ = write!(out, " = {}", default_value.node);
    }
    out.push_str(&print_directives(&value.directives));
    out
}

fn print_implements(implements: &[Positioned<Name>]) -> String {
    if implements.is_empty() {
        return String::new();
    }

    let names = implements
        .iter()
        .map(|name| name.node.as_str())
        .collect::<Vec<_>>()
        .join(" & ");
    format!(" implements {names}")
}

fn print_directives(directives: &[Positioned<ConstDirective>]) -> String {
    directives
        .iter()
        .map(|directive| {
            let directive = &directive.node;
            let mut out = format!(" @{}", directive.name.node);
            if !directive.arguments.is_empty() {
                let arguments = directive
                    .arguments
                    .iter()
                    .map(|(name, value)| format!("{}: {}", name.node, value.node))
                    .collect::<Vec<_>>()
                    .join(", ");
                let _ = write!(out, "({arguments})");
            }
            out
        })
        .collect()
}

fn print_description(description: Option<&Positioned<String>>, indent: &str) -> String {
    match description {
        Some(description) => {
            let text = escape_block_string(&description.node);
            if text.contains('\n') || text.ends_with('"') {
                let mut out = format!("{indent}\"\"\"\n");
                for line in text.lines() {
                    let _ = writeln!(out, "{indent}{line}");
                }
                let _ = writeln!(out, "{indent}\"\"\"");
                out
            } else {
                format!("{indent}\"\"\"{text}\"\"\"\n")
            }
        }
        None => String::new(),
    }
}

fn print_inline_description(description: &str) -> String {
    let text = escape_block_string(description).replace('\n', " ");
    format!("\"\"\"{}\"\"\" ", text.trim_end_matches('"'))
}

fn escape_block_string(text: &str) -> String {
    text.replace("\"\"\"", "\\\"\"\"")
}

#[cfg(test)]
mod tests {
    use async_graphql_parser::parse_schema;

    use super::*;

    fn reprint(sdl: &str) -> String {
        parse_schema(sdl)
            .unwrap()
            .definitions
            .iter()
            .map(print_type_system_definition)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    #[test]
    fn prints_object_with_arguments_and_directives() {
        let printed = reprint(
            r#"
            type Query {
                products(options: ProductListOptions, take: Int = 10): ProductList!
                hello: String @upper
            }
            "#,
        );

        assert_eq!(
            printed,
            "type Query {\n  products(options: ProductListOptions, take: Int = 10): ProductList!\n  hello: String @upper\n}"
        );
    }

    #[test]
    fn prints_descriptions_as_block_strings() {
        let printed = reprint(
            r#"
            "A customer order"
            type Order implements Node {
                "The order code"
                code: String!
            }
            "#,
        );

        assert_eq!(
            printed,
            "\"\"\"A customer order\"\"\"\ntype Order implements Node {\n  \"\"\"The order code\"\"\"\n  code: String!\n}"
        );
    }

    #[test]
    fn prints_directive_definitions() {
        let printed = reprint("directive @upper(force: Boolean) on FIELD_DEFINITION | OBJECT");

        assert_eq!(
            printed,
            "directive @upper(force: Boolean) on FIELD_DEFINITION | OBJECT"
        );
    }

    #[test]
    fn printed_output_parses_again() {
        let original = r#"
            """
            Multi-line
            description
            """
            enum SortOrder { ASC DESC }
            union SearchResult = Product | Collection
            input StringOperators { eq: String in: [String!] }
            scalar DateTime
            interface Node { id: ID! }
            schema { query: Query mutation: Mutation }
        "#;

        let printed = reprint(original);
        assert_eq!(reprint(&printed), printed);
    }
}
