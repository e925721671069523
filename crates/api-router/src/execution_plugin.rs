// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use serde_json::Value;

/// A cross-cutting step of request execution, such as re-encoding IDs in responses.
///
/// Composition only decides the order; what a plugin does with a response is its own concern.
pub trait ExecutionPlugin: Send + Sync {
    fn name(&self) -> &str;

    fn transform_response(&self, response: Value) -> Value {
        response
    }
}

/// Pass the response through every plugin, in order.
pub fn apply_execution_plugins(plugins: &[Arc<dyn ExecutionPlugin>], response: Value) -> Value {
    plugins
        .iter()
        .fold(response, |response, plugin| plugin.transform_response(response))
}

/// The execution plugins every surface installs ahead of operator-supplied ones.
#[derive(Clone)]
pub struct ExecutionCollaborators {
    pub id_codec: Arc<dyn ExecutionPlugin>,
    pub translate_errors: Arc<dyn ExecutionPlugin>,
    pub asset_interceptor: Arc<dyn ExecutionPlugin>,
}

impl ExecutionCollaborators {
    pub fn ordered(&self) -> Vec<Arc<dyn ExecutionPlugin>> {
        vec![
            self.id_codec.clone(),
            self.translate_errors.clone(),
            self.asset_interceptor.clone(),
        ]
    }
}

/// Stands in for a collaborator that has not been provided, leaving responses untouched.
struct Passthrough(&'static str);

impl ExecutionPlugin for Passthrough {
    fn name(&self) -> &str {
        self.0
    }
}

impl Default for ExecutionCollaborators {
    fn default() -> Self {
        Self {
            id_codec: Arc::new(Passthrough("IdCodecPlugin")),
            translate_errors: Arc::new(Passthrough("TranslateErrorsPlugin")),
            asset_interceptor: Arc::new(Passthrough("AssetInterceptorPlugin")),
        }
    }
}
