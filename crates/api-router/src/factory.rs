// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{path::PathBuf, sync::Arc};

use api_config::{
    PermissionDefinition, StorefrontConfig, SurfaceOptions, default_permissions, normalize_api_path,
};
use api_plugin_interface::ApiPlugin;
use api_resolver::ResolverSet;
use common::{
    ApiSurface,
    env_const::{
        DeploymentMode, get_api_path_override, get_deployment_mode, get_max_selection_depth,
        introspection_enabled,
    },
};
use schema_builder::{
    PipelineContext, SchemaExtension, TypeDefinitionLoader, build_base_schema, run_pipeline,
};
use storefront_env::{EnvError, Environment, SystemEnvironment};
use tracing::{debug, info, instrument};

use crate::{
    configuration::ApiConfiguration,
    contributions::resolve_contributions,
    directive_registry::collect_schema_directives,
    error::ApiBuildError,
    execution_plugin::{ExecutionCollaborators, ExecutionPlugin},
    resolver_aggregator::aggregate_resolvers,
    validation::{MaxSelectionDepth, ValidationRule},
};

/// Builds the [ApiConfiguration] of each surface from the configuration and the registered
/// plugins.
pub struct ApiModuleFactory {
    config: StorefrontConfig,
    root: PathBuf,
    plugins: Vec<Arc<dyn ApiPlugin>>,
    shop_resolvers: Option<Arc<dyn ResolverSet>>,
    admin_resolvers: Option<Arc<dyn ResolverSet>>,
    built_in_permissions: Vec<PermissionDefinition>,
    collaborators: ExecutionCollaborators,
    execution_plugins: Vec<Arc<dyn ExecutionPlugin>>,
    validation_rules: Vec<Arc<dyn ValidationRule>>,
    env: Arc<dyn Environment>,
}

impl ApiModuleFactory {
    /// Type paths in `config` are resolved against `root`.
    pub fn new(config: StorefrontConfig, root: impl Into<PathBuf>) -> Self {
        Self {
            config,
            root: root.into(),
            plugins: vec![],
            shop_resolvers: None,
            admin_resolvers: None,
            built_in_permissions: default_permissions(),
            collaborators: ExecutionCollaborators::default(),
            execution_plugins: vec![],
            validation_rules: vec![],
            env: Arc::new(SystemEnvironment),
        }
    }

    /// Plugins are composed in the order they are added.
    pub fn with_plugin(mut self, plugin: Arc<dyn ApiPlugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// The resolvers of the core API, registered ahead of any plugin resolvers.
    pub fn with_base_resolvers(mut self, surface: ApiSurface, resolvers: Arc<dyn ResolverSet>) -> Self {
        match surface {
            ApiSurface::Shop => self.shop_resolvers = Some(resolvers),
            ApiSurface::Admin => self.admin_resolvers = Some(resolvers),
        }
        self
    }

    pub fn with_built_in_permissions(mut self, permissions: Vec<PermissionDefinition>) -> Self {
        self.built_in_permissions = permissions;
        self
    }

    pub fn with_collaborators(mut self, collaborators: ExecutionCollaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    /// An operator-supplied plugin, run after the collaborators.
    pub fn with_execution_plugin(mut self, plugin: Arc<dyn ExecutionPlugin>) -> Self {
        self.execution_plugins.push(plugin);
        self
    }

    /// An operator-supplied rule, run after the selection depth check.
    pub fn with_validation_rule(mut self, rule: Arc<dyn ValidationRule>) -> Self {
        self.validation_rules.push(rule);
        self
    }

    pub fn with_environment(mut self, env: Arc<dyn Environment>) -> Self {
        self.env = env;
        self
    }

    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn build(&self, surface: ApiSurface) -> Result<ApiConfiguration, ApiBuildError> {
        let options = self.surface_options(surface)?;

        let type_defs = TypeDefinitionLoader::new(&self.root)
            .merge_types_by_paths(&options.type_paths)
            .await
            .map_err(|source| ApiBuildError::Load { surface, source })?;
        let base_schema = build_base_schema(&type_defs)
            .map_err(|source| ApiBuildError::Composition { surface, source })?;

        let contributions = resolve_contributions(&self.plugins, surface);
        debug!(count = contributions.len(), "Resolved plugin contributions");

        // Conflicting directives abort the build before any schema work is done
        let directives = collect_schema_directives(&contributions, surface)?;

        let extensions: Vec<SchemaExtension> = contributions
            .iter()
            .filter_map(|contribution| {
                let sdl = contribution.schema.as_ref()?;
                Some(SchemaExtension::new(&contribution.plugin, sdl))
            })
            .collect();

        let schema = run_pipeline(
            base_schema,
            &PipelineContext {
                surface,
                extensions: &extensions,
                custom_fields: &self.config.custom_fields,
                authentication_strategies: self.config.auth.strategies_for(surface),
                built_in_permissions: &self.built_in_permissions,
                custom_permissions: &self.config.auth.custom_permissions,
            },
        )
        .map_err(|source| ApiBuildError::Composition { surface, source })?;

        let resolvers = aggregate_resolvers(
            surface,
            self.base_resolvers(surface),
            &contributions,
            &schema,
            &directives,
        )?;

        let depth_rule: Arc<dyn ValidationRule> =
            Arc::new(MaxSelectionDepth::new(options.max_selection_depth));
        let validation_rules: Vec<Arc<dyn ValidationRule>> = std::iter::once(depth_rule)
            .chain(self.validation_rules.iter().cloned())
            .collect();

        let plugins: Vec<Arc<dyn ExecutionPlugin>> = self
            .collaborators
            .ordered()
            .into_iter()
            .chain(self.execution_plugins.iter().cloned())
            .collect();

        info!(
            path = %options.path,
            resolvers = resolvers.len(),
            directives = directives.len(),
            "Composed API"
        );

        Ok(ApiConfiguration {
            surface,
            path: format!("/{}", options.path),
            type_defs: schema.to_sdl(),
            schema,
            resolvers,
            directives,
            validation_rules,
            plugins,
            debug: options.debug,
            playground: options.playground,
            introspection: options.introspection,
        })
    }

    /// Build the shop API, then the admin API.
    pub async fn build_all(&self) -> Result<Vec<ApiConfiguration>, ApiBuildError> {
        let mut configurations = vec![];
        for surface in ApiSurface::ALL {
            configurations.push(self.build(surface).await?);
        }
        Ok(configurations)
    }

    fn base_resolvers(&self, surface: ApiSurface) -> Option<&Arc<dyn ResolverSet>> {
        match surface {
            ApiSurface::Shop => self.shop_resolvers.as_ref(),
            ApiSurface::Admin => self.admin_resolvers.as_ref(),
        }
    }

    /// The configured options of `surface` with environment overrides applied.
    fn surface_options(&self, surface: ApiSurface) -> Result<SurfaceOptions, ApiBuildError> {
        let env = self.env.as_ref();
        let env_error = |source: EnvError| ApiBuildError::Environment { surface, source };

        let mut options = self.config.api.for_surface(surface).clone();

        if let Some(path) = get_api_path_override(env, surface) {
            options.path = normalize_api_path(&path)
                .map_err(|source| ApiBuildError::Configuration { surface, source })?;
        }
        options.introspection =
            introspection_enabled(env, options.introspection).map_err(env_error)?;
        if let Some(depth) = get_max_selection_depth(env).map_err(env_error)? {
            options.max_selection_depth = depth;
        }
        if get_deployment_mode(env).map_err(env_error)? == DeploymentMode::Prod {
            options.playground = false;
        }

        Ok(options)
    }
}
