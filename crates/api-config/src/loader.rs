// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{collections::BTreeMap, path::Path};

use common::ApiSurface;
use serde::Deserialize;
use tracing::debug;

use crate::{
    auth::AuthenticationStrategy,
    custom_fields::{CustomFieldConfig, CustomFieldType, CustomFields},
    error::ConfigurationError,
    model::{ApiOptions, AuthOptions, StorefrontConfig, SurfaceOptions},
    permission::PermissionDefinition,
};

pub const DEFAULT_CONFIG_FILE: &str = "storefront.toml";

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ConfigSer {
    pub api: Option<ApiSer>,
    pub auth: Option<AuthSer>,
    #[serde(rename = "custom-fields")]
    pub custom_fields: Option<BTreeMap<String, Vec<CustomFieldSer>>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ApiSer {
    pub shop: Option<SurfaceSer>,
    pub admin: Option<SurfaceSer>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct SurfaceSer {
    pub path: Option<String>,
    #[serde(rename = "type-paths")]
    pub type_paths: Option<Vec<String>>,
    pub debug: Option<bool>,
    pub playground: Option<bool>,
    pub introspection: Option<bool>,
    #[serde(rename = "max-selection-depth")]
    pub max_selection_depth: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct AuthSer {
    #[serde(rename = "shop-strategies")]
    pub shop_strategies: Option<Vec<AuthenticationStrategySer>>,
    #[serde(rename = "admin-strategies")]
    pub admin_strategies: Option<Vec<AuthenticationStrategySer>>,
    #[serde(rename = "custom-permissions")]
    pub custom_permissions: Option<Vec<PermissionSer>>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct AuthenticationStrategySer {
    pub name: String,
    pub input: String,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct PermissionSer {
    pub name: String,
    pub description: Option<String>,
    pub crud: Option<bool>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct CustomFieldSer {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: CustomFieldType,
    pub list: Option<bool>,
    pub nullable: Option<bool>,
    pub public: Option<bool>,
    pub internal: Option<bool>,
    pub readonly: Option<bool>,
    pub description: Option<String>,
}

impl TryFrom<ConfigSer> for StorefrontConfig {
    type Error = ConfigurationError;

    fn try_from(config: ConfigSer) -> Result<Self, Self::Error> {
        let api = config.api.unwrap_or_default();

        Ok(StorefrontConfig {
            api: ApiOptions {
                shop: surface_options(api.shop, ApiSurface::Shop)?,
                admin: surface_options(api.admin, ApiSurface::Admin)?,
            },
            auth: config
                .auth
                .map(AuthOptions::try_from)
                .transpose()?
                .unwrap_or_default(),
            custom_fields: CustomFields::new(
                config
                    .custom_fields
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(entity, fields)| {
                        (entity, fields.into_iter().map(CustomFieldConfig::from).collect())
                    }),
            )?,
        })
    }
}

fn surface_options(
    config: Option<SurfaceSer>,
    surface: ApiSurface,
) -> Result<SurfaceOptions, ConfigurationError> {
    let defaults = SurfaceOptions::default_for(surface);
    let config = config.unwrap_or_default();

    let path = match config.path {
        Some(path) => normalize_api_path(&path)?,
        None => defaults.path,
    };

    Ok(SurfaceOptions {
        path,
        type_paths: config.type_paths.unwrap_or(defaults.type_paths),
        debug: config.debug.unwrap_or(defaults.debug),
        playground: config.playground.unwrap_or(defaults.playground),
        introspection: config.introspection.unwrap_or(defaults.introspection),
        max_selection_depth: config
            .max_selection_depth
            .unwrap_or(defaults.max_selection_depth),
    })
}

/// Strip surrounding slashes; the mount path is always rendered as `/{path}`.
pub fn normalize_api_path(path: &str) -> Result<String, ConfigurationError> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ConfigurationError::InvalidApiPath(path.to_string()));
    }
    Ok(trimmed.to_string())
}

impl TryFrom<AuthSer> for AuthOptions {
    type Error = ConfigurationError;

    fn try_from(config: AuthSer) -> Result<Self, Self::Error> {
        Ok(AuthOptions {
            shop_strategies: strategies(config.shop_strategies, ApiSurface::Shop)?,
            admin_strategies: strategies(config.admin_strategies, ApiSurface::Admin)?,
            custom_permissions: config
                .custom_permissions
                .unwrap_or_default()
                .into_iter()
                .map(PermissionDefinition::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

fn strategies(
    config: Option<Vec<AuthenticationStrategySer>>,
    surface: ApiSurface,
) -> Result<Vec<AuthenticationStrategy>, ConfigurationError> {
    let Some(config) = config else {
        return Ok(vec![AuthenticationStrategy::native()]);
    };

    let mut strategies: Vec<AuthenticationStrategy> = vec![];
    for strategy in config {
        if strategies.iter().any(|s| s.name() == strategy.name) {
            return Err(ConfigurationError::DuplicateAuthenticationStrategy {
                surface,
                name: strategy.name,
            });
        }
        strategies.push(AuthenticationStrategy::new(&strategy.name, &strategy.input)?);
    }
    Ok(strategies)
}

impl TryFrom<PermissionSer> for PermissionDefinition {
    type Error = ConfigurationError;

    fn try_from(config: PermissionSer) -> Result<Self, Self::Error> {
        let description = config.description.unwrap_or_default();
        if config.crud.unwrap_or(false) {
            PermissionDefinition::crud(&config.name, &description)
        } else {
            PermissionDefinition::new(&config.name, &description)
        }
    }
}

impl From<CustomFieldSer> for CustomFieldConfig {
    fn from(config: CustomFieldSer) -> Self {
        let defaults = CustomFieldConfig::new(&config.name, config.field_type);
        CustomFieldConfig {
            list: config.list.unwrap_or(defaults.list),
            nullable: config.nullable.unwrap_or(defaults.nullable),
            public: config.public.unwrap_or(defaults.public),
            internal: config.internal.unwrap_or(defaults.internal),
            readonly: config.readonly.unwrap_or(defaults.readonly),
            description: config.description,
            ..defaults
        }
    }
}

pub fn load_config_from_str(
    toml_str: &str,
    path: &Path,
) -> Result<StorefrontConfig, ConfigurationError> {
    let config: ConfigSer = toml::from_str(toml_str).map_err(|e| ConfigurationError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.try_into()
}

pub fn load_config_from_file(path: &Path) -> Result<StorefrontConfig, ConfigurationError> {
    let toml_str = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    load_config_from_str(&toml_str, path)
}

/// Load the configuration at `path`, or the defaults if there is no such file.
pub fn load_config(path: &Path) -> Result<StorefrontConfig, ConfigurationError> {
    if !path.exists() {
        debug!(path = %path.display(), "No configuration file, using defaults");
        return Ok(StorefrontConfig::default());
    }

    debug!(path = %path.display(), "Loading configuration");
    load_config_from_file(path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::permission::PermissionDefinition;

    use super::*;

    fn test_config_path(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("src/test-configs")
            .join(format!("{}.toml", name))
    }

    fn load_test_config(name: &str) -> Result<StorefrontConfig, ConfigurationError> {
        load_config_from_file(&test_config_path(name))
    }

    #[test]
    fn test_load_empty_config() {
        let config = load_test_config("empty").unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_load_missing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert_eq!(config, StorefrontConfig::default());
    }

    #[test]
    fn test_load_full_config() {
        let config = load_test_config("full").unwrap();

        assert_eq!(config.api.shop.path, "store");
        assert_eq!(config.api.shop.type_paths, vec!["schema/shop.graphql"]);
        assert!(config.api.admin.playground);
        assert_eq!(config.api.admin.max_selection_depth, 15);
        assert_eq!(config.api.admin.path, "admin-api");

        assert_eq!(
            config
                .auth
                .shop_strategies
                .iter()
                .map(|s| s.name())
                .collect::<Vec<_>>(),
            vec!["native", "google"]
        );
        assert_eq!(config.auth.admin_strategies, vec![AuthenticationStrategy::native()]);
        assert_eq!(
            config.auth.custom_permissions,
            vec![
                PermissionDefinition::new("ManageLoyaltyPoints", "Manage loyalty points").unwrap(),
                PermissionDefinition::crud("Wishlist", "wishlists").unwrap(),
            ]
        );

        let entities: Vec<_> = config.custom_fields.entities().map(|(e, _)| e).collect();
        assert_eq!(entities, vec!["Customer", "Order"]);

        let order_fields = config.custom_fields.for_entity("Order");
        assert_eq!(order_fields[0].name, "giftMessage");
        assert_eq!(order_fields[0].field_type, CustomFieldType::Text);
        assert!(order_fields[1].internal);
        assert!(!order_fields[1].nullable);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(matches!(
            load_test_config("unknown-key"),
            Err(ConfigurationError::Parse { .. })
        ));
    }

    #[test]
    fn test_duplicate_strategies_are_rejected() {
        let result = load_config_from_str(
            r#"
            [auth]
            admin-strategies = [
                { name = "native", input = "input A { a: String }" },
                { name = "native", input = "input B { b: String }" },
            ]
            "#,
            Path::new(DEFAULT_CONFIG_FILE),
        );

        assert!(matches!(
            result,
            Err(ConfigurationError::DuplicateAuthenticationStrategy {
                surface: ApiSurface::Admin,
                ..
            })
        ));
    }

    #[test]
    fn test_api_paths_are_normalized() {
        assert_eq!(normalize_api_path("/shop-api/").unwrap(), "shop-api");
        assert!(matches!(
            normalize_api_path("/"),
            Err(ConfigurationError::InvalidApiPath(_))
        ));
    }
}
