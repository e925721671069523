// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_resolver::{
    FieldResolver, FieldResolverRegistration, GuardedResolver, PropertyResolver, ResolverContext,
    ResolverError, ResolverSet,
};
use common::ApiSurface;
use indexmap::IndexMap;
use schema_builder::stages::permission::PERMISSION_ENUM;
use schema_model::{SchemaDocument, type_normalization::TypeDefinitionIntrospection};
use serde_json::Value;
use tracing::debug;

use crate::{
    contributions::ResolvedContribution,
    directive_registry::DirectiveRegistry,
    error::{ApiBuildError, ConflictError},
};

/// The resolver installed for a field: guard, then directives, then the contributed resolver.
pub struct ResolvedField {
    /// `None` for fields resolved from the parent value, which only have a resolver because a
    /// directive wraps them.
    pub contributor: Option<String>,
    pub allow: Vec<String>,
    pub directives: Vec<String>,
    pub resolver: Arc<dyn FieldResolver>,
}

/// Resolvers of one surface, addressable by type and field name.
#[derive(Default)]
pub struct ResolverMap {
    types: IndexMap<String, IndexMap<String, ResolvedField>>,
}

impl ResolverMap {
    pub fn get(&self, type_name: &str, field_name: &str) -> Option<&ResolvedField> {
        self.types.get(type_name)?.get(field_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ResolvedField)> {
        self.types.iter().flat_map(|(type_name, fields)| {
            fields
                .iter()
                .map(move |(field_name, field)| (type_name.as_str(), field_name.as_str(), field))
        })
    }

    pub fn len(&self) -> usize {
        self.types.values().map(IndexMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the field in `context`, falling back to the parent's property when the field has
    /// no resolver.
    pub async fn resolve(&self, context: &ResolverContext<'_>) -> Result<Value, ResolverError> {
        match self.get(context.type_name, context.field_name) {
            Some(field) => field.resolver.resolve(context).await,
            None => PropertyResolver.resolve(context).await,
        }
    }

    fn insert(&mut self, type_name: &str, field_name: &str, field: ResolvedField) {
        self.types
            .entry(type_name.to_string())
            .or_default()
            .insert(field_name.to_string(), field);
    }
}

struct PendingField {
    contributor: Option<String>,
    allow: Vec<String>,
    resolver: Arc<dyn FieldResolver>,
}

/// Merge the base resolvers with every plugin's resolvers, in plugin order, and install the
/// guard and directive chain for each field.
pub(crate) fn aggregate_resolvers(
    surface: ApiSurface,
    base: Option<&Arc<dyn ResolverSet>>,
    contributions: &[ResolvedContribution],
    schema: &SchemaDocument,
    directives: &DirectiveRegistry,
) -> Result<ResolverMap, ApiBuildError> {
    let permissions: Vec<&str> = schema
        .get_type(PERMISSION_ENUM)
        .and_then(|permission| permission.enum_values())
        .into_iter()
        .flatten()
        .map(|value| value.node.value.node.as_str())
        .collect();

    let sets = base
        .map(|base| (base.name().to_string(), base))
        .into_iter()
        .chain(contributions.iter().flat_map(|contribution| {
            contribution
                .resolvers
                .iter()
                .map(|set| (contribution.plugin.clone(), set))
        }));

    let mut pending: IndexMap<(String, String), PendingField> = IndexMap::new();

    for (contributor, set) in sets {
        for FieldResolverRegistration {
            type_name,
            field_name,
            allow,
            resolver,
        } in set.resolvers()
        {
            let key = (type_name, field_name);

            if let Some(existing) = pending.get(&key) {
                return Err(ConflictError::DuplicateResolver {
                    type_name: key.0,
                    field_name: key.1,
                    first: existing.contributor.clone().unwrap_or_default(),
                    second: contributor,
                    surface,
                }
                .into());
            }

            if schema
                .get_type(&key.0)
                .and_then(|typ| typ.field(&key.1))
                .is_none()
            {
                return Err(ApiBuildError::UnknownResolverField {
                    surface,
                    contributor,
                    type_name: key.0,
                    field_name: key.1,
                });
            }

            if let Some(permission) = allow
                .iter()
                .find(|permission| !permissions.contains(&permission.as_str()))
            {
                return Err(ApiBuildError::UnknownPermission {
                    surface,
                    contributor,
                    type_name: key.0,
                    field_name: key.1,
                    permission: permission.clone(),
                });
            }

            debug!(type_name = %key.0, field_name = %key.1, contributor = %contributor, "Registered resolver");
            pending.insert(
                key,
                PendingField {
                    contributor: Some(contributor.clone()),
                    allow,
                    resolver,
                },
            );
        }
    }

    // Fields without a resolver still get one when a directive has to wrap them
    for typ in schema.type_definitions() {
        for field in typ.fields().into_iter().flatten() {
            let key = (typ.name().to_string(), field.node.name.node.to_string());
            let has_directive = field
                .node
                .directives
                .iter()
                .any(|d| directives.get(d.node.name.node.as_str()).is_some());

            if has_directive && !pending.contains_key(&key) {
                pending.insert(
                    key,
                    PendingField {
                        contributor: None,
                        allow: vec![],
                        resolver: Arc::new(PropertyResolver),
                    },
                );
            }
        }
    }

    let mut resolvers = ResolverMap::default();
    for ((type_name, field_name), field) in pending {
        let applied: Vec<String> = schema
            .get_type(&type_name)
            .and_then(|typ| typ.field(&field_name))
            .map(|definition| {
                definition
                    .directives
                    .iter()
                    .map(|d| d.node.name.node.to_string())
                    .filter(|name| directives.get(name).is_some())
                    .collect()
            })
            .unwrap_or_default();

        let resolver = applied.iter().fold(field.resolver, |resolver, name| {
            match directives.get(name) {
                Some(directive) => directive.wrap(resolver),
                None => resolver,
            }
        });

        resolvers.insert(
            &type_name,
            &field_name,
            ResolvedField {
                contributor: field.contributor,
                resolver: Arc::new(GuardedResolver::new(field.allow.clone(), resolver)),
                allow: field.allow,
                directives: applied,
            },
        );
    }

    Ok(resolvers)
}
