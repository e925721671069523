// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! The in-memory representation of a composed GraphQL schema.
//!
//! A [SchemaDocument] is built once from the merged base type definitions and then threaded by
//! value through every composition stage. Each stage consumes the document it is given and returns
//! a new one, so no two stages ever observe a partially rewritten schema.

pub mod document;
pub mod error;
pub mod merge;
pub mod printer;
pub mod type_normalization;

pub use document::SchemaDocument;
pub use error::SchemaError;

pub const QUERY_ROOT_TYPENAME: &str = "Query";
pub const MUTATION_ROOT_TYPENAME: &str = "Mutation";
pub const SUBSCRIPTION_ROOT_TYPENAME: &str = "Subscription";

pub const BUILT_IN_SCALARS: [&str; 5] = ["Int", "Float", "String", "Boolean", "ID"];

/// Directives every GraphQL server understands without a definition in the document.
pub const BUILT_IN_DIRECTIVES: [&str; 5] = ["deprecated", "specifiedBy", "skip", "include", "oneOf"];
