// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_graphql_parser::types::ExecutableDocument;
use common::ApiSurface;
use schema_model::SchemaDocument;
use serde_json::Value;

use crate::{
    directive_registry::DirectiveRegistry,
    execution_plugin::{ExecutionPlugin, apply_execution_plugins},
    resolver_aggregator::ResolverMap,
    validation::{ValidationError, ValidationRule, validate_operation},
};

/// Everything the transport layer needs to serve one surface. Not modified once built.
pub struct ApiConfiguration {
    pub surface: ApiSurface,
    /// Mount path, starting with `/`.
    pub path: String,
    pub schema: SchemaDocument,
    /// The schema printed as SDL.
    pub type_defs: String,
    pub resolvers: ResolverMap,
    pub directives: DirectiveRegistry,
    pub validation_rules: Vec<Arc<dyn ValidationRule>>,
    pub plugins: Vec<Arc<dyn ExecutionPlugin>>,
    pub debug: bool,
    pub playground: bool,
    pub introspection: bool,
}

impl ApiConfiguration {
    pub fn validate_operation(&self, query: &str) -> Result<ExecutableDocument, ValidationError> {
        validate_operation(&self.validation_rules, query)
    }

    pub fn finalize_response(&self, response: Value) -> Value {
        apply_execution_plugins(&self.plugins, response)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }
}
