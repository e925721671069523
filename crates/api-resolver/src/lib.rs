// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Field-level resolution: the resolver and directive capabilities contributed by the base
//! module and plugins, and the guard that authorizes a field before its resolver runs.

mod context;
mod directive;
mod error;
mod field_resolver;
mod guard;
mod resolver_set;

pub use context::{RequestContext, ResolverContext};
pub use directive::SchemaDirective;
pub use error::ResolverError;
pub use field_resolver::{FieldResolver, FnResolver, PropertyResolver};
pub use guard::{GuardedResolver, permission};
pub use resolver_set::{FieldResolverRegistration, ResolverModule, ResolverSet};
