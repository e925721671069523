// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Assembly of a ready-to-serve API configuration for each surface.
//!
//! [ApiModuleFactory::build] loads the surface's type definitions, runs the schema pipeline with
//! the plugins' contributions, registers their directives and resolvers, and packages everything
//! with the surface's transport settings.

mod configuration;
mod contributions;
mod directive_registry;
pub mod error;
mod execution_plugin;
mod factory;
mod resolver_aggregator;
mod validation;

pub use configuration::ApiConfiguration;
pub use directive_registry::{DirectiveRegistration, DirectiveRegistry};
pub use error::{ApiBuildError, ConflictError};
pub use execution_plugin::{ExecutionCollaborators, ExecutionPlugin, apply_execution_plugins};
pub use factory::ApiModuleFactory;
pub use resolver_aggregator::{ResolvedField, ResolverMap};
pub use validation::{MaxSelectionDepth, ValidationError, ValidationRule, validate_operation};
