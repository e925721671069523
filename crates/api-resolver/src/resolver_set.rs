// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use crate::field_resolver::FieldResolver;

/// A resolver for one type+field, with the permissions its guard requires.
#[derive(Clone)]
pub struct FieldResolverRegistration {
    pub type_name: String,
    pub field_name: String,
    pub allow: Vec<String>,
    pub resolver: Arc<dyn FieldResolver>,
}

impl FieldResolverRegistration {
    pub fn new(type_name: &str, field_name: &str, resolver: Arc<dyn FieldResolver>) -> Self {
        Self {
            type_name: type_name.to_string(),
            field_name: field_name.to_string(),
            allow: vec![],
            resolver,
        }
    }

    pub fn allow(mut self, permissions: &[&str]) -> Self {
        self.allow = permissions.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// A named group of field resolvers, such as the base module or the resolvers a plugin
/// contributes to one surface.
pub trait ResolverSet: Send + Sync {
    fn name(&self) -> &str;

    /// Registrations in declaration order.
    fn resolvers(&self) -> Vec<FieldResolverRegistration>;
}

/// A [ResolverSet] holding a fixed list of registrations.
#[derive(Clone)]
pub struct ResolverModule {
    name: String,
    registrations: Vec<FieldResolverRegistration>,
}

impl ResolverModule {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            registrations: vec![],
        }
    }

    pub fn with(mut self, registration: FieldResolverRegistration) -> Self {
        self.registrations.push(registration);
        self
    }
}

impl ResolverSet for ResolverModule {
    fn name(&self) -> &str {
        &self.name
    }

    fn resolvers(&self) -> Vec<FieldResolverRegistration> {
        self.registrations.clone()
    }
}
