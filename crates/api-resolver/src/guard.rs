// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{
    context::{RequestContext, ResolverContext},
    error::ResolverError,
    field_resolver::FieldResolver,
};

/// Permissions with a meaning for the guard itself.
pub mod permission {
    pub const PUBLIC: &str = "Public";
    pub const AUTHENTICATED: &str = "Authenticated";
    pub const OWNER: &str = "Owner";
    pub const SUPER_ADMIN: &str = "SuperAdmin";
}

/// Runs before a field's resolver and rejects the request unless it satisfies the allow list.
///
/// - an empty list or `Public` lets anyone through
/// - everything else requires an authenticated request
/// - `Authenticated` and `Owner` are satisfied by authentication alone (ownership is checked by
///   the resolver itself)
/// - `SuperAdmin` holders pass every guard
/// - otherwise the request must hold at least one of the listed permissions
pub struct GuardedResolver {
    allow: Vec<String>,
    inner: Arc<dyn FieldResolver>,
}

impl GuardedResolver {
    pub fn new(allow: Vec<String>, inner: Arc<dyn FieldResolver>) -> Self {
        Self { allow, inner }
    }

    pub fn allow(&self) -> &[String] {
        &self.allow
    }

    pub fn is_allowed(&self, request: &RequestContext) -> bool {
        let allows = |permission: &str| self.allow.iter().any(|p| p == permission);

        if self.allow.is_empty() || allows(permission::PUBLIC) {
            return true;
        }
        if !request.authenticated {
            return false;
        }

        allows(permission::AUTHENTICATED)
            || allows(permission::OWNER)
            || request.has_permission(permission::SUPER_ADMIN)
            || self.allow.iter().any(|p| request.has_permission(p))
    }
}

#[async_trait]
impl FieldResolver for GuardedResolver {
    async fn resolve(&self, context: &ResolverContext<'_>) -> Result<Value, ResolverError> {
        if !self.is_allowed(context.request) {
            debug!(
                type_name = context.type_name,
                field_name = context.field_name,
                "Guard rejected request"
            );
            return Err(ResolverError::Forbidden {
                type_name: context.type_name.to_string(),
                field_name: context.field_name.to_string(),
            });
        }

        self.inner.resolve(context).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Map, json};

    use crate::field_resolver::FnResolver;

    use super::*;

    fn guarded(allow: &[&str]) -> GuardedResolver {
        GuardedResolver::new(
            allow.iter().map(|p| p.to_string()).collect(),
            Arc::new(FnResolver::new(|_| Ok(json!("ok")))),
        )
    }

    async fn resolve(
        resolver: &GuardedResolver,
        request: &RequestContext,
    ) -> Result<Value, ResolverError> {
        let arguments = Map::new();
        resolver
            .resolve(&ResolverContext {
                type_name: "Query",
                field_name: "orders",
                arguments: &arguments,
                parent: &Value::Null,
                request,
            })
            .await
    }

    #[tokio::test]
    async fn public_fields() {
        let anonymous = RequestContext::anonymous();

        assert_eq!(resolve(&guarded(&[]), &anonymous).await, Ok(json!("ok")));
        assert_eq!(
            resolve(&guarded(&["Public", "ReadOrder"]), &anonymous).await,
            Ok(json!("ok"))
        );
    }

    #[tokio::test]
    async fn permissions_are_checked() {
        let guard = guarded(&["ReadOrder", "UpdateOrder"]);

        assert!(matches!(
            resolve(&guard, &RequestContext::anonymous()).await,
            Err(ResolverError::Forbidden { .. })
        ));
        assert!(matches!(
            resolve(&guard, &RequestContext::authenticated(["ReadCatalog"])).await,
            Err(ResolverError::Forbidden { .. })
        ));
        assert_eq!(
            resolve(&guard, &RequestContext::authenticated(["UpdateOrder"])).await,
            Ok(json!("ok"))
        );
        assert_eq!(
            resolve(&guard, &RequestContext::authenticated(["SuperAdmin"])).await,
            Ok(json!("ok"))
        );
    }

    #[test]
    fn authentication_alone_satisfies_owner() {
        let no_permissions = RequestContext::authenticated(Vec::<String>::new());

        assert!(guarded(&["Owner"]).is_allowed(&no_permissions));
        assert!(guarded(&["Authenticated"]).is_allowed(&no_permissions));
        assert!(!guarded(&["Owner"]).is_allowed(&RequestContext::anonymous()));
    }
}
