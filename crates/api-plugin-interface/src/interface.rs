// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_resolver::{ResolverSet, SchemaDirective};
use common::ApiSurface;
use indexmap::IndexMap;

use crate::contribution::Contribution;

pub type DirectiveMap = IndexMap<String, Arc<dyn SchemaDirective>>;

/// A plugin's contribution to one surface. Every part is optional.
#[derive(Default)]
pub struct ApiExtension {
    /// SDL merged into the surface's schema.
    pub schema: Option<Contribution<String>>,
    /// Resolver sets, in the order they should be registered.
    pub resolvers: Vec<Arc<dyn ResolverSet>>,
    /// Directive implementations keyed by directive name.
    pub schema_directives: Option<Contribution<DirectiveMap>>,
}

impl ApiExtension {
    pub fn with_schema(mut self, schema: impl Into<Contribution<String>>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    pub fn with_resolvers(mut self, resolvers: Arc<dyn ResolverSet>) -> Self {
        self.resolvers.push(resolvers);
        self
    }

    pub fn with_schema_directives(
        mut self,
        directives: impl Into<Contribution<DirectiveMap>>,
    ) -> Self {
        self.schema_directives = Some(directives.into());
        self
    }
}

/// A plugin registered with the server. Plugins are composed in registration order.
pub trait ApiPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn shop_api_extensions(&self) -> Option<ApiExtension> {
        None
    }

    fn admin_api_extensions(&self) -> Option<ApiExtension> {
        None
    }

    fn api_extensions(&self, surface: ApiSurface) -> Option<ApiExtension> {
        match surface {
            ApiSurface::Shop => self.shop_api_extensions(),
            ApiSurface::Admin => self.admin_api_extensions(),
        }
    }
}
