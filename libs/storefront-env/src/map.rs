// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::BTreeMap, sync::Arc};

use crate::{EnvError, Environment};

/// Values held in memory, layered over an optional base environment.
///
/// Keys defined here shadow the base, so `MapEnvironment::layered_over(Arc::new(SystemEnvironment))`
/// applies command line overrides on top of the process environment.
#[derive(Clone, Default)]
pub struct MapEnvironment {
    values: BTreeMap<String, String>,
    base: Option<Arc<dyn Environment>>,
}

impl MapEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layered_over(base: Arc<dyn Environment>) -> Self {
        Self {
            values: BTreeMap::new(),
            base: Some(base),
        }
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    /// Add a `KEY=VALUE` assignment. The value may be empty, the key may not.
    pub fn with_assignment(self, assignment: &str) -> Result<Self, EnvError> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => Ok(self.with(key.trim(), value)),
            _ => Err(EnvError::InvalidAssignment(assignment.to_string())),
        }
    }
}

impl Environment for MapEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| self.base.as_ref().and_then(|base| base.get(key)))
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MapEnvironment {
    fn from(values: [(&str, &str); N]) -> Self {
        values
            .into_iter()
            .fold(Self::new(), |env, (key, value)| env.with(key, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_values_shadow_the_base() {
        let base = MapEnvironment::from([("MODE", "prod"), ("DEPTH", "12")]);
        let env = MapEnvironment::layered_over(Arc::new(base)).with("MODE", "dev");

        assert_eq!(env.get("MODE").as_deref(), Some("dev"));
        assert_eq!(env.get("DEPTH").as_deref(), Some("12"));
        assert_eq!(env.get("MISSING"), None);
    }

    #[test]
    fn assignments() {
        let env = MapEnvironment::new()
            .with_assignment("STOREFRONT_SHOP_API_PATH=/store")
            .and_then(|env| env.with_assignment("EMPTY="))
            .unwrap();

        assert_eq!(env.get("STOREFRONT_SHOP_API_PATH").as_deref(), Some("/store"));
        assert_eq!(env.get("EMPTY").as_deref(), Some(""));

        for invalid in ["NO_VALUE", "=value", ""] {
            assert!(matches!(
                MapEnvironment::new().with_assignment(invalid),
                Err(EnvError::InvalidAssignment(_))
            ));
        }
    }
}
