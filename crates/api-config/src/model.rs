// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::ApiSurface;

use crate::{
    auth::AuthenticationStrategy, custom_fields::CustomFields, permission::PermissionDefinition,
};

pub const DEFAULT_MAX_SELECTION_DEPTH: usize = 10;

/// Transport and schema-source settings of one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceOptions {
    /// Mount path, without leading or trailing slashes
    pub path: String,
    pub type_paths: Vec<String>,
    pub debug: bool,
    pub playground: bool,
    pub introspection: bool,
    pub max_selection_depth: usize,
}

impl SurfaceOptions {
    pub fn default_for(surface: ApiSurface) -> Self {
        Self {
            path: format!("{surface}-api"),
            type_paths: vec![
                "schema/common/*.graphql".to_string(),
                format!("schema/{surface}/*.graphql"),
            ],
            debug: false,
            playground: false,
            introspection: true,
            max_selection_depth: DEFAULT_MAX_SELECTION_DEPTH,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiOptions {
    pub shop: SurfaceOptions,
    pub admin: SurfaceOptions,
}

impl ApiOptions {
    pub fn for_surface(&self, surface: ApiSurface) -> &SurfaceOptions {
        match surface {
            ApiSurface::Shop => &self.shop,
            ApiSurface::Admin => &self.admin,
        }
    }
}

impl Default for ApiOptions {
    fn default() -> Self {
        Self {
            shop: SurfaceOptions::default_for(ApiSurface::Shop),
            admin: SurfaceOptions::default_for(ApiSurface::Admin),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuthOptions {
    pub shop_strategies: Vec<AuthenticationStrategy>,
    pub admin_strategies: Vec<AuthenticationStrategy>,
    pub custom_permissions: Vec<PermissionDefinition>,
}

impl AuthOptions {
    pub fn strategies_for(&self, surface: ApiSurface) -> &[AuthenticationStrategy] {
        match surface {
            ApiSurface::Shop => &self.shop_strategies,
            ApiSurface::Admin => &self.admin_strategies,
        }
    }
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            shop_strategies: vec![AuthenticationStrategy::native()],
            admin_strategies: vec![AuthenticationStrategy::native()],
            custom_permissions: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorefrontConfig {
    pub api: ApiOptions,
    pub auth: AuthOptions,
    pub custom_fields: CustomFields,
}
