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

/// Implementation of a schema directive.
///
/// For every field annotated with the directive, the field's resolver is replaced with the one
/// returned by [SchemaDirective::wrap]. The guard still runs first.
pub trait SchemaDirective: Send + Sync {
    fn wrap(&self, resolver: Arc<dyn FieldResolver>) -> Arc<dyn FieldResolver>;
}
