// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use api_config::{
    DEFAULT_CONFIG_FILE, PermissionDefinition, StorefrontConfig, load_config_from_str,
};
use api_plugin_interface::{ApiExtension, ApiPlugin, Contribution, DirectiveMap};
use api_resolver::{
    FieldResolver, FieldResolverRegistration, FnResolver, RequestContext, ResolverContext,
    ResolverError, ResolverModule, SchemaDirective,
};
use api_router::{
    ApiBuildError, ApiConfiguration, ApiModuleFactory, ConflictError, ExecutionPlugin,
};
use common::ApiSurface;
use schema_builder::{CompositionError, LoadError};
use schema_model::type_normalization::TypeDefinitionIntrospection;
use serde_json::{Map, Value, json};
use storefront_env::MapEnvironment;
use test_log::test;

type ExtensionFn = Box<dyn Fn(ApiSurface) -> Option<ApiExtension> + Send + Sync>;

struct TestPlugin {
    name: &'static str,
    extensions: ExtensionFn,
}

impl ApiPlugin for TestPlugin {
    fn name(&self) -> &str {
        self.name
    }

    fn shop_api_extensions(&self) -> Option<ApiExtension> {
        (self.extensions)(ApiSurface::Shop)
    }

    fn admin_api_extensions(&self) -> Option<ApiExtension> {
        (self.extensions)(ApiSurface::Admin)
    }
}

fn plugin(
    name: &'static str,
    extensions: impl Fn(ApiSurface) -> Option<ApiExtension> + Send + Sync + 'static,
) -> Arc<dyn ApiPlugin> {
    Arc::new(TestPlugin {
        name,
        extensions: Box::new(extensions),
    })
}

struct Upper;

struct UpperResolver(Arc<dyn FieldResolver>);

#[async_trait::async_trait]
impl FieldResolver for UpperResolver {
    async fn resolve(&self, context: &ResolverContext<'_>) -> Result<Value, ResolverError> {
        Ok(match self.0.resolve(context).await? {
            Value::String(s) => Value::String(s.to_uppercase()),
            other => other,
        })
    }
}

impl SchemaDirective for Upper {
    fn wrap(&self, resolver: Arc<dyn FieldResolver>) -> Arc<dyn FieldResolver> {
        Arc::new(UpperResolver(resolver))
    }
}

fn upper_directive() -> DirectiveMap {
    DirectiveMap::from_iter([(
        "upper".to_string(),
        Arc::new(Upper) as Arc<dyn SchemaDirective>,
    )])
}

fn constant_resolvers(name: &str, type_name: &str, fields: &[&str]) -> Arc<ResolverModule> {
    Arc::new(fields.iter().fold(ResolverModule::new(name), |module, field| {
        module.with(FieldResolverRegistration::new(
            type_name,
            field,
            Arc::new(FnResolver::new(|context| Ok(json!(context.field_name)))),
        ))
    }))
}

fn schema_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests")
}

fn factory(config: StorefrontConfig) -> ApiModuleFactory {
    ApiModuleFactory::new(config, schema_root()).with_environment(Arc::new(MapEnvironment::new()))
}

fn config(toml: &str) -> StorefrontConfig {
    load_config_from_str(toml, Path::new(DEFAULT_CONFIG_FILE)).unwrap()
}

fn field_names(api: &ApiConfiguration, type_name: &str) -> Vec<String> {
    let typ = api.schema.get_type(type_name).unwrap();
    typ.fields()
        .map(|fields| fields.iter().map(|f| f.node.name.node.to_string()).collect())
        .or_else(|| {
            typ.input_fields()
                .map(|fields| fields.iter().map(|f| f.node.name.node.to_string()).collect())
        })
        .unwrap_or_default()
}

fn enum_members(api: &ApiConfiguration, type_name: &str) -> Vec<String> {
    api.schema
        .get_type(type_name)
        .and_then(|typ| typ.enum_values())
        .unwrap()
        .iter()
        .map(|value| value.node.value.node.to_string())
        .collect()
}

async fn resolve(api: &ApiConfiguration, type_name: &str, field_name: &str) -> Value {
    let arguments = Map::new();
    api.resolvers
        .resolve(&ResolverContext {
            type_name,
            field_name,
            arguments: &arguments,
            parent: &Value::Null,
            request: &RequestContext::anonymous(),
        })
        .await
        .unwrap()
}

const CUSTOM_FIELDS: &str = r#"
[custom-fields]
Order = [
    { name = "giftMessage", type = "text" },
    { name = "internalRef", type = "string", public = false },
]
OrderLine = [{ name = "engraving", type = "string" }]
Customer = [{ name = "newsletter", type = "boolean" }]
"#;

#[test(tokio::test)]
async fn zero_plugins_and_zero_custom_fields() {
    let factory = factory(StorefrontConfig::default());

    for api in factory.build_all().await.unwrap() {
        for type_name in [
            "SortOrder",
            "LogicalOperator",
            "StringOperators",
            "DateOperators",
            "ErrorCode",
            "Permission",
            "AuthenticationInput",
            "NativeAuthInput",
        ] {
            assert!(
                api.schema.has_type(type_name),
                "{type_name} missing from the {} API",
                api.surface
            );
        }
        assert_eq!(
            enum_members(&api, "ErrorCode"),
            vec!["UNKNOWN_ERROR", "NATIVE_AUTH_STRATEGY_ERROR"]
        );
        assert!(api.directives.is_empty());
    }

    let admin = factory.build(ApiSurface::Admin).await.unwrap();
    assert!(admin.schema.has_type("OrderListOptions"));
    assert!(admin.schema.has_type("OrderFilterParameter"));
}

#[test(tokio::test)]
async fn composition_is_deterministic() {
    let build = || async {
        factory(config(CUSTOM_FIELDS))
            .with_plugin(plugin("ReviewsPlugin", |_| {
                Some(ApiExtension::default().with_schema(
                    "type Review { id: ID! body: String! }\nextend type Query { reviews: [Review!]! }"
                        .to_string(),
                ))
            }))
            .with_plugin(plugin("WishlistPlugin", |_| {
                Some(ApiExtension::default().with_schema(Contribution::factory(|| {
                    "type Wishlist { id: ID! }\nextend type Query { wishlist: Wishlist }".to_string()
                })))
            }))
            .build_all()
            .await
            .unwrap()
    };

    let first = build().await;
    let second = build().await;
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.type_defs, b.type_defs);
    }

    // Plugin types follow the base types, in plugin order
    let names: Vec<_> = first[0].schema.type_definitions().map(|t| t.name()).collect();
    let position = |name: &str| names.iter().position(|n| *n == name).unwrap();
    assert!(position("Query") < position("Review"));
    assert!(position("Review") < position("Wishlist"));
}

#[test(tokio::test)]
async fn custom_fields_appear_once_on_their_entity() {
    let config = config(CUSTOM_FIELDS);
    let expected: Vec<(String, Vec<String>)> = config
        .custom_fields
        .entities()
        .map(|(entity, fields)| {
            (
                entity.to_string(),
                fields.iter().map(|f| f.name.clone()).collect(),
            )
        })
        .collect();

    let admin = factory(config).build(ApiSurface::Admin).await.unwrap();

    for (entity, fields) in expected {
        let entity_fields = field_names(&admin, &entity);
        assert_eq!(
            entity_fields.iter().filter(|f| *f == "customFields").count(),
            1,
            "{entity}.customFields"
        );

        let custom_fields = field_names(&admin, &format!("{entity}CustomFields"));
        for field in fields {
            assert_eq!(
                custom_fields.iter().filter(|f| **f == field).count(),
                1,
                "{entity}CustomFields.{field}"
            );
        }
    }

    assert!(field_names(&admin, "ModifyOrderInput").contains(&"customFields".to_string()));
}

#[test(tokio::test)]
async fn shop_hides_non_public_custom_fields() {
    let shop = factory(config(CUSTOM_FIELDS))
        .build(ApiSurface::Shop)
        .await
        .unwrap();

    assert_eq!(field_names(&shop, "OrderCustomFields"), vec!["giftMessage"]);
    assert_eq!(
        field_names(&shop, "RegisterCustomerCustomFieldsInput"),
        vec!["newsletter"]
    );

    let add_item = shop
        .schema
        .get_type("Mutation")
        .and_then(|mutation| mutation.field("addItemToOrder"))
        .unwrap();
    assert!(
        add_item
            .arguments
            .iter()
            .any(|a| a.node.name.node.as_str() == "customFields")
    );
}

#[test(tokio::test)]
async fn admin_only_server_config_fields() {
    let factory = factory(StorefrontConfig::default());

    let admin = factory.build(ApiSurface::Admin).await.unwrap();
    assert!(field_names(&admin, "ServerConfig").contains(&"customFieldConfig".to_string()));
    assert_eq!(
        field_names(&admin, "CustomFields").len(),
        api_config::CUSTOM_FIELD_ENTITIES.len()
    );
    assert_eq!(
        field_names(&admin, "UpdateActiveAdministratorInput"),
        vec!["firstName", "customFields"]
    );

    let shop = factory.build(ApiSurface::Shop).await.unwrap();
    for type_name in [
        "ServerConfig",
        "CustomFields",
        "CustomFieldConfig",
        "UpdateActiveAdministratorInput",
    ] {
        assert!(!shop.schema.has_type(type_name), "{type_name} in the shop API");
    }
}

#[test(tokio::test)]
async fn plugin_error_results_get_error_codes() {
    let shop = factory(StorefrontConfig::default())
        .with_plugin(plugin("StockPlugin", |surface| {
            (surface == ApiSurface::Shop).then(|| {
                ApiExtension::default().with_schema(
                    r#"
                    type InsufficientStockError implements ErrorResult {
                      errorCode: ErrorCode!
                      message: String!
                      quantityAvailable: Int!
                    }
                    "#
                    .to_string(),
                )
            })
        }))
        .build(ApiSurface::Shop)
        .await
        .unwrap();

    assert_eq!(
        enum_members(&shop, "ErrorCode"),
        vec![
            "UNKNOWN_ERROR",
            "NATIVE_AUTH_STRATEGY_ERROR",
            "INSUFFICIENT_STOCK_ERROR"
        ]
    );
}

#[test(tokio::test)]
async fn permission_enum_is_the_union() {
    let api = factory(config(
        r#"
        [auth]
        custom-permissions = [
            { name = "ManageLoyaltyPoints", description = "Manage loyalty points" },
            { name = "ReadCatalog", description = "Duplicate of a built-in" },
        ]
        "#,
    ))
    .with_built_in_permissions(vec![
        PermissionDefinition::new("ReadCatalog", "Read the catalog").unwrap(),
        PermissionDefinition::new("UpdateOrder", "Update orders").unwrap(),
    ])
    .build(ApiSurface::Admin)
    .await
    .unwrap();

    assert_eq!(
        enum_members(&api, "Permission"),
        vec!["ReadCatalog", "UpdateOrder", "ManageLoyaltyPoints"]
    );
}

#[test(tokio::test)]
async fn directive_conflicts_are_per_surface() {
    let upper_on = |surface: ApiSurface| {
        move |s: ApiSurface| {
            (s == surface).then(|| ApiExtension::default().with_schema_directives(upper_directive()))
        }
    };

    let same_surface = factory(StorefrontConfig::default())
        .with_plugin(plugin("UpperPlugin", upper_on(ApiSurface::Shop)))
        .with_plugin(plugin("ShoutPlugin", upper_on(ApiSurface::Shop)));

    let error = same_surface.build(ApiSurface::Shop).await.err().unwrap();
    assert!(matches!(
        &error,
        ApiBuildError::Conflict(ConflictError::DuplicateDirective {
            directive,
            first_plugin,
            second_plugin,
            surface: ApiSurface::Shop,
        }) if directive == "upper" && first_plugin == "UpperPlugin" && second_plugin == "ShoutPlugin"
    ));
    assert!(error.to_string().contains("UpperPlugin"));
    assert!(error.to_string().contains("ShoutPlugin"));
    // The admin API has no contribution from either plugin
    assert!(same_surface.build(ApiSurface::Admin).await.is_ok());

    let different_surfaces = factory(StorefrontConfig::default())
        .with_plugin(plugin("UpperPlugin", upper_on(ApiSurface::Shop)))
        .with_plugin(plugin("ShoutPlugin", upper_on(ApiSurface::Admin)));
    let apis = different_surfaces.build_all().await.unwrap();
    assert_eq!(apis[0].directives.owner("upper"), Some("UpperPlugin"));
    assert_eq!(apis[1].directives.owner("upper"), Some("ShoutPlugin"));
}

#[test(tokio::test)]
async fn resolver_conflicts() {
    let base = constant_resolvers("ShopResolvers", "Query", &["activeOrder", "me"]);

    let disjoint = factory(StorefrontConfig::default())
        .with_base_resolvers(ApiSurface::Shop, base.clone())
        .with_plugin(plugin("CustomerPlugin", |_| {
            Some(ApiExtension::default().with_resolvers(constant_resolvers(
                "CustomerResolver",
                "Query",
                &["activeCustomer"],
            )))
        }))
        .with_plugin(plugin("OrderPlugin", |_| {
            Some(ApiExtension::default().with_resolvers(constant_resolvers(
                "OrderResolver",
                "Order",
                &["code", "total"],
            )))
        }));
    let shop = disjoint.build(ApiSurface::Shop).await.unwrap();
    assert_eq!(shop.resolvers.len(), 5);
    assert_eq!(
        shop.resolvers
            .get("Order", "total")
            .and_then(|field| field.contributor.as_deref()),
        Some("OrderPlugin")
    );

    let shadowing = factory(StorefrontConfig::default())
        .with_base_resolvers(ApiSurface::Shop, base)
        .with_plugin(plugin("OrderPlugin", |_| {
            Some(ApiExtension::default().with_resolvers(constant_resolvers(
                "OrderResolver",
                "Query",
                &["activeOrder"],
            )))
        }));
    assert!(matches!(
        shadowing.build(ApiSurface::Shop).await,
        Err(ApiBuildError::Conflict(ConflictError::DuplicateResolver { first, second, .. }))
            if first == "ShopResolvers" && second == "OrderPlugin"
    ));
}

#[test(tokio::test)]
async fn directives_wrap_plugin_resolvers() {
    let factory = factory(StorefrontConfig::default()).with_plugin(plugin(
        "SchemaDirectivePlugin",
        |_| {
            Some(
                ApiExtension::default()
                    .with_schema(
                        "directive @upper on FIELD_DEFINITION\nextend type Query { hello: String @upper }"
                            .to_string(),
                    )
                    .with_resolvers(constant_resolvers("HelloResolver", "Query", &["hello"]))
                    .with_schema_directives(Contribution::factory(upper_directive)),
            )
        },
    ));

    for api in factory.build_all().await.unwrap() {
        assert_eq!(resolve(&api, "Query", "hello").await, json!("HELLO"));
        assert!(api.type_defs.contains("hello: String @upper"));
    }
}

#[test(tokio::test)]
async fn plugin_type_redefinitions_name_both_plugins() {
    let review = |_: ApiSurface| {
        Some(ApiExtension::default().with_schema("type Review { id: ID! }".to_string()))
    };

    let result = factory(StorefrontConfig::default())
        .with_plugin(plugin("ReviewsPlugin", review))
        .with_plugin(plugin("RatingsPlugin", review))
        .build(ApiSurface::Shop)
        .await;

    assert!(matches!(
        result,
        Err(ApiBuildError::Composition {
            surface: ApiSurface::Shop,
            source: CompositionError::DuplicateType { type_name, first, second },
        }) if type_name == "Review" && first == "ReviewsPlugin" && second == "RatingsPlugin"
    ));
}

#[test(tokio::test)]
async fn missing_type_paths_fail_the_surface() {
    let result = factory(config(
        r#"
        [api.shop]
        type-paths = ["missing/*.graphql"]
        "#,
    ))
    .build(ApiSurface::Shop)
    .await;

    let Err(error) = result else {
        panic!("expected a load error");
    };
    assert!(matches!(
        &error,
        ApiBuildError::Load {
            surface: ApiSurface::Shop,
            source: LoadError::NoMatchingFiles(_)
        }
    ));
    assert!(error.to_string().contains("shop API"));
}

struct Operator;

impl ExecutionPlugin for Operator {
    fn name(&self) -> &str {
        "OperatorPlugin"
    }
}

#[test(tokio::test)]
async fn transport_settings() {
    let config = config(
        r#"
        [api.admin]
        playground = true
        debug = true
        "#,
    );

    let dev = ApiModuleFactory::new(config.clone(), schema_root())
        .with_environment(Arc::new(MapEnvironment::from([
            ("STOREFRONT_DEPLOYMENT_MODE", "dev"),
            ("STOREFRONT_SHOP_API_PATH", "/store/"),
            ("STOREFRONT_MAX_SELECTION_DEPTH", "2"),
        ])))
        .with_execution_plugin(Arc::new(Operator));

    let shop = dev.build(ApiSurface::Shop).await.unwrap();
    assert_eq!(shop.path, "/store");
    assert_eq!(
        shop.plugin_names(),
        vec![
            "IdCodecPlugin",
            "TranslateErrorsPlugin",
            "AssetInterceptorPlugin",
            "OperatorPlugin"
        ]
    );
    assert!(shop.validate_operation("{ me { id } }").is_ok());
    assert!(
        shop.validate_operation("{ activeOrder { customer { id } } }")
            .is_err()
    );

    let admin = dev.build(ApiSurface::Admin).await.unwrap();
    assert_eq!(admin.path, "/admin-api");
    assert!(admin.playground);
    assert!(admin.debug);

    // Production never serves the playground
    let prod = factory(config).build(ApiSurface::Admin).await.unwrap();
    assert!(!prod.playground);
    assert!(prod.introspection);
}
