// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use api_plugin_interface::{ApiPlugin, DirectiveMap};
use api_resolver::ResolverSet;
use common::ApiSurface;
use tracing::debug;

/// A plugin's contribution to one surface, with factories already invoked.
pub(crate) struct ResolvedContribution {
    pub plugin: String,
    pub schema: Option<String>,
    pub resolvers: Vec<Arc<dyn ResolverSet>>,
    pub directives: DirectiveMap,
}

/// Contributions of the plugins to `surface`, in registration order. Plugins without a
/// contribution to the surface are skipped.
pub(crate) fn resolve_contributions(
    plugins: &[Arc<dyn ApiPlugin>],
    surface: ApiSurface,
) -> Vec<ResolvedContribution> {
    plugins
        .iter()
        .filter_map(|plugin| {
            let extension = plugin.api_extensions(surface)?;
            debug!(plugin = plugin.name(), %surface, "Resolving plugin contribution");

            Some(ResolvedContribution {
                plugin: plugin.name().to_string(),
                schema: extension.schema.map(|schema| schema.resolve()),
                resolvers: extension.resolvers,
                directives: extension
                    .schema_directives
                    .map(|directives| directives.resolve())
                    .unwrap_or_default(),
            })
        })
        .collect()
}
