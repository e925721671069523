// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_resolver::SchemaDirective;
use common::ApiSurface;
use indexmap::IndexMap;
use tracing::debug;

use crate::{contributions::ResolvedContribution, error::ConflictError};

pub struct DirectiveRegistration {
    pub name: String,
    pub owning_plugin: String,
    pub implementation: Arc<dyn SchemaDirective>,
}

/// Directive implementations of one surface, keyed by directive name.
pub struct DirectiveRegistry {
    surface: ApiSurface,
    registrations: IndexMap<String, DirectiveRegistration>,
}

impl DirectiveRegistry {
    pub fn new(surface: ApiSurface) -> Self {
        Self {
            surface,
            registrations: IndexMap::new(),
        }
    }

    /// Register `implementation` under `name`. A name already owned by another plugin is a
    /// conflict; a plugin registering the same name again replaces its earlier implementation.
    pub fn register(
        &mut self,
        name: &str,
        owning_plugin: &str,
        implementation: Arc<dyn SchemaDirective>,
    ) -> Result<(), ConflictError> {
        if let Some(existing) = self.registrations.get(name)
            && existing.owning_plugin != owning_plugin
        {
            return Err(ConflictError::DuplicateDirective {
                directive: name.to_string(),
                first_plugin: existing.owning_plugin.clone(),
                second_plugin: owning_plugin.to_string(),
                surface: self.surface,
            });
        }

        debug!(directive = name, plugin = owning_plugin, surface = %self.surface, "Registering schema directive");
        self.registrations.insert(
            name.to_string(),
            DirectiveRegistration {
                name: name.to_string(),
                owning_plugin: owning_plugin.to_string(),
                implementation,
            },
        );
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn SchemaDirective>> {
        self.registrations.get(name).map(|r| &r.implementation)
    }

    pub fn owner(&self, name: &str) -> Option<&str> {
        self.registrations.get(name).map(|r| r.owning_plugin.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registrations.keys().map(String::as_str)
    }

    pub fn registrations(&self) -> impl Iterator<Item = &DirectiveRegistration> {
        self.registrations.values()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

/// Register the directives of every contribution, in plugin order.
pub(crate) fn collect_schema_directives(
    contributions: &[ResolvedContribution],
    surface: ApiSurface,
) -> Result<DirectiveRegistry, ConflictError> {
    let mut registry = DirectiveRegistry::new(surface);
    for contribution in contributions {
        for (name, implementation) in &contribution.directives {
            registry.register(name, &contribution.plugin, implementation.clone())?;
        }
    }
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use api_resolver::FieldResolver;

    use super::*;

    struct Identity;

    impl SchemaDirective for Identity {
        fn wrap(&self, resolver: Arc<dyn FieldResolver>) -> Arc<dyn FieldResolver> {
            resolver
        }
    }

    fn contribution(plugin: &str, directives: &[&str]) -> ResolvedContribution {
        ResolvedContribution {
            plugin: plugin.to_string(),
            schema: None,
            resolvers: vec![],
            directives: directives
                .iter()
                .map(|name| {
                    (
                        name.to_string(),
                        Arc::new(Identity) as Arc<dyn SchemaDirective>,
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn distinct_names_are_merged() {
        let registry = collect_schema_directives(
            &[
                contribution("UpperPlugin", &["upper"]),
                contribution("CachePlugin", &["cacheControl", "private"]),
            ],
            ApiSurface::Shop,
        )
        .unwrap();

        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["upper", "cacheControl", "private"]
        );
        assert_eq!(registry.owner("private"), Some("CachePlugin"));
    }

    #[test]
    fn same_name_from_two_plugins_conflicts() {
        let result = collect_schema_directives(
            &[
                contribution("UpperPlugin", &["upper"]),
                contribution("ShoutPlugin", &["upper"]),
            ],
            ApiSurface::Admin,
        );

        let Err(error) = result else {
            panic!("expected a conflict");
        };
        assert_eq!(
            error.to_string(),
            "Conflicting schema directive \"upper\" in the admin API, defined in UpperPlugin and ShoutPlugin"
        );
    }

    #[test]
    fn same_plugin_may_register_again() {
        let mut registry = DirectiveRegistry::new(ApiSurface::Shop);
        registry
            .register("upper", "UpperPlugin", Arc::new(Identity))
            .unwrap();
        registry
            .register("upper", "UpperPlugin", Arc::new(Identity))
            .unwrap();

        assert_eq!(registry.len(), 1);
    }
}
