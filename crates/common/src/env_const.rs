// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use storefront_env::{EnvError, Environment};

use crate::ApiSurface;

pub const STOREFRONT_LOG: &str = "STOREFRONT_LOG";

pub const STOREFRONT_DEPLOYMENT_MODE: &str = "STOREFRONT_DEPLOYMENT_MODE"; // "dev" or "prod" (default)
pub const STOREFRONT_INTROSPECTION: &str = "STOREFRONT_INTROSPECTION";
pub const STOREFRONT_MAX_SELECTION_DEPTH: &str = "STOREFRONT_MAX_SELECTION_DEPTH";

pub const STOREFRONT_SHOP_API_PATH: &str = "STOREFRONT_SHOP_API_PATH";
pub const STOREFRONT_ADMIN_API_PATH: &str = "STOREFRONT_ADMIN_API_PATH";

#[derive(Debug, PartialEq)]
pub enum DeploymentMode {
    Dev,
    Prod,
}

pub fn get_deployment_mode(env: &dyn Environment) -> Result<DeploymentMode, EnvError> {
    match env.get(STOREFRONT_DEPLOYMENT_MODE).as_deref() {
        Some("dev") => Ok(DeploymentMode::Dev),
        Some("prod") | None => Ok(DeploymentMode::Prod),
        Some(other) => Err(EnvError::InvalidEnum {
            env_key: STOREFRONT_DEPLOYMENT_MODE,
            env_value: other.to_string(),
            message: "Must be one of 'dev' or 'prod'".to_string(),
        }),
    }
}

pub fn is_production(env: &dyn Environment) -> bool {
    matches!(
        get_deployment_mode(env),
        Ok(DeploymentMode::Prod) | Err(_)
    )
}

/// Environment override for the mount path of a surface.
pub fn get_api_path_override(env: &dyn Environment, surface: ApiSurface) -> Option<String> {
    match surface {
        ApiSurface::Shop => env.get(STOREFRONT_SHOP_API_PATH),
        ApiSurface::Admin => env.get(STOREFRONT_ADMIN_API_PATH),
    }
}

pub fn introspection_enabled(env: &dyn Environment, default_value: bool) -> Result<bool, EnvError> {
    env.enabled(STOREFRONT_INTROSPECTION, default_value)
}

pub fn get_max_selection_depth(env: &dyn Environment) -> Result<Option<usize>, EnvError> {
    env.get_usize(STOREFRONT_MAX_SELECTION_DEPTH)
}
