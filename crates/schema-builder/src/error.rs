// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use schema_model::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Type path '{0}' does not exist")]
    PathNotFound(String),

    #[error("Type path '{0}' does not match any schema file")]
    NoMatchingFiles(String),

    #[error("Failed to read '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema document '{file}': {message}")]
    InvalidDocument { file: PathBuf, message: String },

    #[error("Schema document '{file}' conflicts with previously loaded documents: {source}")]
    InvalidMergedDocument {
        file: PathBuf,
        #[source]
        source: SchemaError,
    },
}

#[derive(Error, Debug)]
pub enum CompositionError {
    #[error("Failed to parse schema from {contributor}: {message}")]
    Unparsable { contributor: String, message: String },

    #[error("Type '{type_name}' is defined by both {first} and {second}")]
    DuplicateType {
        type_name: String,
        first: String,
        second: String,
    },

    #[error("Invalid schema contributed by {contributor}: {source}")]
    InvalidContribution {
        contributor: String,
        #[source]
        source: SchemaError,
    },

    #[error("Schema transform '{stage}' failed: {source}")]
    InvalidStage {
        stage: &'static str,
        #[source]
        source: SchemaError,
    },

    #[error("Composed schema is invalid: {0}")]
    InvalidSchema(#[source] SchemaError),
}
