// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Loading of the base type definitions.
//!
//! Every type path is resolved to a sorted list of files. The files are read concurrently and
//! parsed one by one (so a syntax error points at its file), then merged into a single document.

use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use async_graphql_parser::{
    parse_schema,
    types::{DirectiveDefinition, TypeDefinition, TypeSystemDefinition},
};
use futures::future::try_join_all;
use schema_model::{
    SchemaError,
    merge::{MergeMode, merge_type_definitions},
    printer::{print_directive_definition, print_type_system_definition},
    type_normalization::default_positioned,
};
use tracing::{debug, instrument};
use wildmatch::WildMatch;

use crate::error::LoadError;

const SCHEMA_FILE_EXTENSIONS: [&str; 2] = ["graphql", "gql"];

/// Replace the host separator with `/`. Patterns and the paths they are matched against are
/// always compared in this form.
pub fn normalize_separators(path: &str, separator: char) -> String {
    if separator == '/' {
        path.to_string()
    } else {
        path.split(separator).collect::<Vec<_>>().join("/")
    }
}

pub struct TypeDefinitionLoader {
    root: PathBuf,
}

impl TypeDefinitionLoader {
    /// Relative type paths are resolved against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load all files found at `type_paths` and merge them into one SDL document.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn merge_types_by_paths(&self, type_paths: &[String]) -> Result<String, LoadError> {
        let mut files: Vec<PathBuf> = vec![];
        for type_path in type_paths {
            let normalized = normalize_separators(type_path, MAIN_SEPARATOR);
            for file in self.resolve(&normalized).await? {
                if !files.contains(&file) {
                    files.push(file);
                }
            }
        }
        debug!(count = files.len(), "Resolved schema files");

        let contents = try_join_all(files.into_iter().map(|file| async move {
            match tokio::fs::read_to_string(&file).await {
                Ok(content) => Ok((file, content)),
                Err(source) => Err(LoadError::Io { path: file, source }),
            }
        }))
        .await?;

        let mut merged = OrderedDefinitions::default();
        for (file, content) in contents {
            let document = parse_schema(&content).map_err(|e| LoadError::InvalidDocument {
                file: file.clone(),
                message: e.to_string(),
            })?;
            merged
                .add_all(document.definitions)
                .map_err(|source| LoadError::InvalidMergedDocument { file, source })?;
        }

        Ok(merged.print())
    }

    async fn resolve(&self, type_path: &str) -> Result<Vec<PathBuf>, LoadError> {
        let path = self.root.join(type_path);

        if type_path.contains(['*', '?']) {
            let pattern = normalize_separators(&path.to_string_lossy(), MAIN_SEPARATOR);
            let base = wildcard_base(&pattern);
            let recursive = pattern.contains("**");
            let depth = pattern.split('/').count();
            let matchers: Vec<WildMatch> = zero_depth_variants(&pattern)
                .iter()
                .map(|variant| WildMatch::new(variant))
                .collect();

            let files: Vec<_> = collect_schema_files(Path::new(&base), |_| true)
                .await?
                .into_iter()
                .filter(|file| {
                    let file = normalize_separators(&file.to_string_lossy(), MAIN_SEPARATOR);
                    matchers.iter().any(|matcher| matcher.matches(&file))
                        && (recursive || file.split('/').count() == depth)
                })
                .collect();

            if files.is_empty() {
                return Err(LoadError::NoMatchingFiles(type_path.to_string()));
            }
            return Ok(files);
        }

        match tokio::fs::metadata(&path).await {
            Ok(metadata) if metadata.is_dir() => {
                let files = collect_schema_files(&path, has_schema_extension).await?;
                if files.is_empty() {
                    return Err(LoadError::NoMatchingFiles(type_path.to_string()));
                }
                Ok(files)
            }
            Ok(_) => Ok(vec![path]),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(LoadError::PathNotFound(type_path.to_string()))
            }
            Err(source) => Err(LoadError::Io { path, source }),
        }
    }
}

/// The pattern itself plus every variant with some `**/` segments removed, so that `**` also
/// matches zero directories (`schema/**/*.graphql` matches `schema/top.graphql`).
fn zero_depth_variants(pattern: &str) -> Vec<String> {
    let mut variants = vec![pattern.to_string()];
    let mut index = 0;
    while index < variants.len() {
        let variant = variants[index].clone();
        for (position, _) in variant.match_indices("**/") {
            let shorter = format!("{}{}", &variant[..position], &variant[position + 3..]);
            if !variants.contains(&shorter) {
                variants.push(shorter);
            }
        }
        index += 1;
    }
    variants
}

/// The leading directories of a wildcard pattern, up to the first component with a wildcard.
fn wildcard_base(pattern: &str) -> String {
    let components: Vec<_> = pattern
        .split('/')
        .take_while(|component| !component.contains(['*', '?']))
        .collect();

    match components.as_slice() {
        [] => ".".to_string(),
        [""] => "/".to_string(),
        components => components.join("/"),
    }
}

fn has_schema_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SCHEMA_FILE_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// All files under `dir` (recursively) accepted by `filter`, sorted by path.
async fn collect_schema_files(
    dir: &Path,
    filter: impl Fn(&Path) -> bool,
) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = vec![];
    let mut pending = vec![dir.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(source) => return Err(LoadError::Io { path: dir, source }),
        };

        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| LoadError::Io {
                path: dir.clone(),
                source,
            })?
        {
            let path = entry.path();
            let file_type = entry.file_type().await.map_err(|source| LoadError::Io {
                path: path.clone(),
                source,
            })?;

            if file_type.is_dir() {
                pending.push(path);
            } else if filter(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Definitions merged across files, in first-seen order.
///
/// Same-named types are combined field-wise. Extensions are kept as they are, after all
/// definitions, and applied when the base schema is built.
#[derive(Default)]
struct OrderedDefinitions {
    others: Vec<TypeSystemDefinition>,
    directives: Vec<DirectiveDefinition>,
    types: Vec<TypeDefinition>,
    extensions: Vec<TypeSystemDefinition>,
}

impl OrderedDefinitions {
    fn add_all(
        &mut self,
        definitions: Vec<TypeSystemDefinition>,
    ) -> Result<(), SchemaError> {
        for definition in definitions {
            match definition {
                TypeSystemDefinition::Type(typ) if !typ.node.extend => {
                    self.add_type(typ.node)?;
                }
                TypeSystemDefinition::Directive(directive) => {
                    self.add_directive(directive.node)?;
                }
                TypeSystemDefinition::Schema(schema) if !schema.node.extend => {
                    self.others.push(TypeSystemDefinition::Schema(schema));
                }
                extension => self.extensions.push(extension),
            }
        }
        Ok(())
    }

    fn add_type(&mut self, definition: TypeDefinition) -> Result<(), SchemaError> {
        let existing = self
            .types
            .iter_mut()
            .find(|t| t.name.node == definition.name.node);

        match existing {
            Some(existing) => {
                *existing =
                    merge_type_definitions(existing.clone(), definition, MergeMode::Combine)?;
            }
            None => self.types.push(definition),
        }
        Ok(())
    }

    fn add_directive(&mut self, definition: DirectiveDefinition) -> Result<(), SchemaError> {
        let existing = self
            .directives
            .iter()
            .find(|d| d.name.node == definition.name.node);

        match existing {
            Some(existing)
                if print_directive_definition(existing)
                    == print_directive_definition(&definition) =>
            {
                Ok(())
            }
            Some(_) => Err(SchemaError::DuplicateDirective(
                definition.name.node.to_string(),
            )),
            None => {
                self.directives.push(definition);
                Ok(())
            }
        }
    }

    fn print(self) -> String {
        self.others
            .into_iter()
            .chain(
                self.directives
                    .into_iter()
                    .map(|d| TypeSystemDefinition::Directive(default_positioned(d))),
            )
            .chain(
                self.types
                    .into_iter()
                    .map(|t| TypeSystemDefinition::Type(default_positioned(t))),
            )
            .chain(self.extensions)
            .map(|definition| print_type_system_definition(&definition))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
