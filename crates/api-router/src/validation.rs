// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::HashMap, sync::Arc};

use async_graphql_parser::{
    Positioned, parse_query,
    types::{ExecutableDocument, FragmentDefinition, Selection, SelectionSet},
};
use async_graphql_value::Name;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{0}")]
    QueryParsingFailed(String),

    #[error("Fragment definition '{0}' not found")]
    FragmentDefinitionNotFound(String),

    #[error("Selection set too deep: depth {depth} exceeds the maximum of {max_depth}")]
    SelectionSetTooDeep { depth: usize, max_depth: usize },

    #[error("{message}")]
    Rejected { rule: String, message: String },
}

/// A check run against every incoming operation before execution.
pub trait ValidationRule: Send + Sync {
    fn name(&self) -> &str;

    fn validate(&self, document: &ExecutableDocument) -> Result<(), ValidationError>;
}

/// Rejects operations whose fields nest deeper than the limit.
pub struct MaxSelectionDepth {
    max_depth: usize,
}

impl MaxSelectionDepth {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl ValidationRule for MaxSelectionDepth {
    fn name(&self) -> &str {
        "MaxSelectionDepth"
    }

    fn validate(&self, document: &ExecutableDocument) -> Result<(), ValidationError> {
        for (_, operation) in document.operations.iter() {
            let depth = selection_set_depth(
                &operation.node.selection_set.node,
                &document.fragments,
                &mut vec![],
            )?;

            if depth > self.max_depth {
                return Err(ValidationError::SelectionSetTooDeep {
                    depth,
                    max_depth: self.max_depth,
                });
            }
        }
        Ok(())
    }
}

/// Depth of the deepest field. Fragments count at the depth they are spread at, and a fragment
/// already being expanded is not expanded again.
fn selection_set_depth(
    selection_set: &SelectionSet,
    fragments: &HashMap<Name, Positioned<FragmentDefinition>>,
    expanding: &mut Vec<Name>,
) -> Result<usize, ValidationError> {
    let mut max_depth = 0;

    for selection in &selection_set.items {
        let depth = match &selection.node {
            Selection::Field(field) => {
                1 + selection_set_depth(&field.node.selection_set.node, fragments, expanding)?
            }
            Selection::InlineFragment(fragment) => {
                selection_set_depth(&fragment.node.selection_set.node, fragments, expanding)?
            }
            Selection::FragmentSpread(spread) => {
                let name = &spread.node.fragment_name.node;
                if expanding.contains(name) {
                    0
                } else {
                    let fragment = fragments.get(name).ok_or_else(|| {
                        ValidationError::FragmentDefinitionNotFound(name.to_string())
                    })?;

                    expanding.push(name.clone());
                    let depth =
                        selection_set_depth(&fragment.node.selection_set.node, fragments, expanding);
                    expanding.pop();
                    depth?
                }
            }
        };
        max_depth = max_depth.max(depth);
    }

    Ok(max_depth)
}

/// Parse `query` and run every rule over it, stopping at the first failure.
pub fn validate_operation(
    rules: &[Arc<dyn ValidationRule>],
    query: &str,
) -> Result<ExecutableDocument, ValidationError> {
    let document =
        parse_query(query).map_err(|e| ValidationError::QueryParsingFailed(e.to_string()))?;

    for rule in rules {
        rule.validate(&document)?;
    }
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(max_depth: usize) -> Vec<Arc<dyn ValidationRule>> {
        vec![Arc::new(MaxSelectionDepth::new(max_depth))]
    }

    #[test]
    fn depth_counts_nested_fields() {
        let query = "{ activeOrder { lines { productVariant { name } } } }";

        assert!(validate_operation(&rules(4), query).is_ok());
        assert_eq!(
            validate_operation(&rules(3), query).err(),
            Some(ValidationError::SelectionSetTooDeep {
                depth: 4,
                max_depth: 3
            })
        );
    }

    #[test]
    fn fragments_count_where_they_are_spread() {
        let query = r#"
            query { activeOrder { ...OrderDetail } }
            fragment OrderDetail on Order { lines { ... on OrderLine { quantity } } }
        "#;

        assert!(validate_operation(&rules(3), query).is_ok());
        assert!(validate_operation(&rules(2), query).is_err());
    }

    #[test]
    fn cyclic_and_missing_fragments() {
        let cyclic = r#"
            { a { ...A } }
            fragment A on T { b { ...A } }
        "#;
        assert!(validate_operation(&rules(2), cyclic).is_ok());

        assert_eq!(
            validate_operation(&rules(5), "{ a { ...Missing } }").err(),
            Some(ValidationError::FragmentDefinitionNotFound(
                "Missing".to_string()
            ))
        );
    }

    #[test]
    fn syntax_errors_are_reported() {
        assert!(matches!(
            validate_operation(&rules(5), "{ a { b }"),
            Err(ValidationError::QueryParsingFailed(_))
        ));
    }
}
