// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Access to environment-provided settings.
//!
//! Composition reads a handful of overrides (deployment mode, API paths, selection depth) from the
//! process environment. Going through [Environment] instead of `std::env` lets tests and embedders
//! supply their own values.

mod map;

pub use map::MapEnvironment;

pub trait Environment: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    fn enabled(&self, key: &str, default_value: bool) -> Result<bool, EnvError> {
        match self.get(key) {
            Some(value) => match value.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" | "enabled" | "enable" => Ok(true),
                "false" | "0" | "no" | "off" | "disabled" | "disable" => Ok(false),
                _ => Err(EnvError::InvalidBoolean {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(default_value),
        }
    }

    /// Parse a positive integer setting, `None` when the key is unset.
    fn get_usize(&self, key: &str) -> Result<Option<usize>, EnvError> {
        match self.get(key) {
            Some(value) => match value.trim().parse::<usize>() {
                Ok(v) if v > 0 => Ok(Some(v)),
                _ => Err(EnvError::InvalidNumber {
                    key: key.to_string(),
                    value,
                }),
            },
            None => Ok(None),
        }
    }

    fn get_or_else(&self, key: &str, default_value: &str) -> String {
        self.get(key).unwrap_or(default_value.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EnvError {
    #[error(
        "Invalid value for {key}: {value}. Expected true, 1, yes, on, enabled, enable OR false, 0, no, off, disabled, disable"
    )]
    InvalidBoolean { key: String, value: String },

    #[error("Invalid value for {key}: {value}. Expected a positive integer")]
    InvalidNumber { key: String, value: String },

    #[error("Invalid environment assignment '{0}'. Expected KEY=VALUE")]
    InvalidAssignment(String),

    #[error("Invalid env value {env_value} for {env_key}: {message}")]
    InvalidEnum {
        env_key: &'static str,
        env_value: String,
        message: String,
    },
}

pub struct SystemEnvironment;

impl Environment for SystemEnvironment {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_spellings() {
        let env = MapEnvironment::from([("A", "on"), ("B", "Disabled"), ("C", "maybe")]);

        assert!(env.enabled("A", false).unwrap());
        assert!(!env.enabled("B", true).unwrap());
        assert!(env.enabled("MISSING", true).unwrap());
        assert!(matches!(
            env.enabled("C", true),
            Err(EnvError::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn positive_numbers_only() {
        let env = MapEnvironment::from([("DEPTH", "12"), ("ZERO", "0"), ("TEXT", "deep")]);

        assert_eq!(env.get_usize("DEPTH").unwrap(), Some(12));
        assert_eq!(env.get_usize("MISSING").unwrap(), None);
        assert!(env.get_usize("ZERO").is_err());
        assert!(env.get_usize("TEXT").is_err());
    }
}
