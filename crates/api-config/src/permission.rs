// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::error::{ConfigurationError, is_graphql_name};

const CRUD_ACTIONS: [(&str, &str); 4] = [
    ("Create", "create"),
    ("Read", "read"),
    ("Update", "update"),
    ("Delete", "delete"),
];

/// A permission, or (with `crud`) a family of Create/Read/Update/Delete permissions.
#[derive(Debug, Clone, PartialEq)]
pub struct PermissionDefinition {
    pub name: String,
    pub description: String,
    pub crud: bool,
}

impl PermissionDefinition {
    pub fn new(name: &str, description: &str) -> Result<Self, ConfigurationError> {
        Self::validated(name, description, false)
    }

    pub fn crud(name: &str, description: &str) -> Result<Self, ConfigurationError> {
        Self::validated(name, description, true)
    }

    fn validated(name: &str, description: &str, crud: bool) -> Result<Self, ConfigurationError> {
        if !is_graphql_name(name) {
            return Err(ConfigurationError::InvalidPermission(name.to_string()));
        }
        Ok(Self {
            name: name.to_string(),
            description: description.to_string(),
            crud,
        })
    }

    /// The `(enum member, description)` pairs this definition contributes to the `Permission` enum.
    pub fn members(&self) -> Vec<(String, String)> {
        if self.crud {
            CRUD_ACTIONS
                .iter()
                .map(|(prefix, verb)| {
                    (
                        format!("{prefix}{}", self.name),
                        format!("Grants permission to {verb} {}", self.description),
                    )
                })
                .collect()
        } else {
            vec![(self.name.clone(), self.description.clone())]
        }
    }
}

const SIMPLE_PERMISSIONS: [(&str, &str); 5] = [
    ("Authenticated", "Authenticated means simply that the user is logged in"),
    ("SuperAdmin", "SuperAdmin has unrestricted access to all operations"),
    ("Owner", "Owner means the user owns this entity, e.g. a Customer's own Order"),
    ("Public", "Public means any unauthenticated user may perform the operation"),
    ("UpdateGlobalSettings", "Grants permission to update GlobalSettings"),
];

const CRUD_PERMISSIONS: [(&str, &str); 22] = [
    ("Catalog", "Products, Facets, Assets, Collections & Tags"),
    (
        "Settings",
        "PaymentMethods, ShippingMethods, TaxCategories, TaxRates, Zones, Countries, System & GlobalSettings",
    ),
    ("Administrator", "Administrator"),
    ("Asset", "Asset"),
    ("Channel", "Channel"),
    ("Collection", "Collection"),
    ("Country", "Country"),
    ("Customer", "Customer"),
    ("CustomerGroup", "CustomerGroup"),
    ("Facet", "Facet"),
    ("Order", "Order"),
    ("PaymentMethod", "PaymentMethod"),
    ("Product", "Product"),
    ("Promotion", "Promotion"),
    ("Seller", "Seller"),
    ("ShippingMethod", "ShippingMethod"),
    ("StockLocation", "StockLocation"),
    ("System", "system"),
    ("Tag", "Tag"),
    ("TaxCategory", "TaxCategory"),
    ("TaxRate", "TaxRate"),
    ("Zone", "Zone"),
];

/// The permissions every installation has, before any custom ones are configured.
pub fn default_permissions() -> Vec<PermissionDefinition> {
    let simple = SIMPLE_PERMISSIONS
        .iter()
        .map(|(name, description)| PermissionDefinition {
            name: name.to_string(),
            description: description.to_string(),
            crud: false,
        });
    let crud = CRUD_PERMISSIONS
        .iter()
        .map(|(name, description)| PermissionDefinition {
            name: name.to_string(),
            description: description.to_string(),
            crud: true,
        });
    simple.chain(crud).collect()
}
