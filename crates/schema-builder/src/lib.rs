// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Composition of a surface's schema: loading the base type definitions, building the base schema
//! and running the ordered transform pipeline over it.

mod base;
pub mod error;
pub mod loader;
mod pipeline;
pub mod stages;

pub use base::{BASE_SCHEMA_CONTRIBUTOR, build_base_schema};
pub use error::{CompositionError, LoadError};
pub use loader::{TypeDefinitionLoader, normalize_separators};
pub use pipeline::{PipelineContext, run_pipeline, stage_names};
pub use stages::extensions::SchemaExtension;
