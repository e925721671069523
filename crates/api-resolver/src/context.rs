// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::{Map, Value};

/// What the transport layer established about the caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub authenticated: bool,
    pub permissions: Vec<String>,
}

impl RequestContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(permissions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            authenticated: true,
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

/// The field being resolved, along with its arguments, the parent value and the request.
#[derive(Debug)]
pub struct ResolverContext<'a> {
    pub type_name: &'a str,
    pub field_name: &'a str,
    pub arguments: &'a Map<String, Value>,
    pub parent: &'a Value,
    pub request: &'a RequestContext,
}

impl<'a> ResolverContext<'a> {
    pub fn argument(&self, name: &str) -> Option<&'a Value> {
        self.arguments.get(name)
    }
}
