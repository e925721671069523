// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use async_trait::async_trait;
use serde_json::Value;

use crate::{context::ResolverContext, error::ResolverError};

/// Computes the value of one schema field.
#[async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(&self, context: &ResolverContext<'_>) -> Result<Value, ResolverError>;
}

/// A resolver backed by a synchronous function.
pub struct FnResolver<F>(F);

impl<F> FnResolver<F>
where
    F: Fn(&ResolverContext<'_>) -> Result<Value, ResolverError> + Send + Sync,
{
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

#[async_trait]
impl<F> FieldResolver for FnResolver<F>
where
    F: Fn(&ResolverContext<'_>) -> Result<Value, ResolverError> + Send + Sync,
{
    async fn resolve(&self, context: &ResolverContext<'_>) -> Result<Value, ResolverError> {
        (self.0)(context)
    }
}

/// Resolves a field to the same-named property of the parent value, as GraphQL does for fields
/// without a resolver of their own.
pub struct PropertyResolver;

#[async_trait]
impl FieldResolver for PropertyResolver {
    async fn resolve(&self, context: &ResolverContext<'_>) -> Result<Value, ResolverError> {
        Ok(context
            .parent
            .get(context.field_name)
            .cloned()
            .unwrap_or(Value::Null))
    }
}
