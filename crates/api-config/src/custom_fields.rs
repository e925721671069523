// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use common::ApiSurface;
use serde::Deserialize;

use crate::error::{ConfigurationError, is_graphql_name};

/// Entities that accept custom fields, in the order they are presented in generated types.
pub const CUSTOM_FIELD_ENTITIES: [&str; 28] = [
    "Address",
    "Administrator",
    "Asset",
    "Channel",
    "Collection",
    "Customer",
    "CustomerGroup",
    "Facet",
    "FacetValue",
    "Fulfillment",
    "GlobalSettings",
    "Order",
    "OrderLine",
    "PaymentMethod",
    "Product",
    "ProductOption",
    "ProductOptionGroup",
    "ProductVariant",
    "Promotion",
    "Region",
    "Seller",
    "ServerConfig",
    "ShippingMethod",
    "StockLocation",
    "TaxCategory",
    "TaxRate",
    "User",
    "Zone",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CustomFieldType {
    #[serde(rename = "string")]
    String,
    #[serde(rename = "localeString")]
    LocaleString,
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "localeText")]
    LocaleText,
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "datetime")]
    DateTime,
    #[serde(rename = "ID")]
    Id,
}

impl CustomFieldType {
    /// The GraphQL scalar a value of this type is exposed as.
    pub fn graphql_type_name(&self) -> &'static str {
        match self {
            CustomFieldType::String
            | CustomFieldType::LocaleString
            | CustomFieldType::Text
            | CustomFieldType::LocaleText => "String",
            CustomFieldType::Int => "Int",
            CustomFieldType::Float => "Float",
            CustomFieldType::Boolean => "Boolean",
            CustomFieldType::DateTime => "DateTime",
            CustomFieldType::Id => "ID",
        }
    }

    pub fn is_localized(&self) -> bool {
        matches!(
            self,
            CustomFieldType::LocaleString | CustomFieldType::LocaleText
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomFieldConfig {
    pub name: String,
    pub field_type: CustomFieldType,
    pub list: bool,
    pub nullable: bool,
    /// Exposed on the shop API
    pub public: bool,
    /// Not exposed on any API
    pub internal: bool,
    pub readonly: bool,
    pub description: Option<String>,
}

impl CustomFieldConfig {
    pub fn new(name: &str, field_type: CustomFieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            list: false,
            nullable: true,
            public: true,
            internal: false,
            readonly: false,
            description: None,
        }
    }

    pub fn is_visible_on(&self, surface: ApiSurface) -> bool {
        !self.internal && (self.public || !surface.is_public())
    }

    pub fn is_writable_on(&self, surface: ApiSurface) -> bool {
        self.is_visible_on(surface) && !self.readonly
    }
}

/// Custom field definitions keyed by entity name.
///
/// Entities are kept in [CUSTOM_FIELD_ENTITIES] order and fields in configuration order, so that
/// generated types come out the same on every run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomFields {
    entities: Vec<(String, Vec<CustomFieldConfig>)>,
}

impl CustomFields {
    /// Validate and order custom field definitions. Entities without fields are dropped.
    pub fn new(
        entities: impl IntoIterator<Item = (String, Vec<CustomFieldConfig>)>,
    ) -> Result<Self, ConfigurationError> {
        let mut entities: Vec<_> = entities
            .into_iter()
            .filter(|(_, fields)| !fields.is_empty())
            .collect();

        for (entity, fields) in &entities {
            if !CUSTOM_FIELD_ENTITIES.contains(&entity.as_str()) {
                return Err(ConfigurationError::UnknownEntity(entity.clone()));
            }
            for (index, field) in fields.iter().enumerate() {
                if !is_graphql_name(&field.name) {
                    return Err(ConfigurationError::InvalidName {
                        context: "custom field",
                        name: field.name.clone(),
                    });
                }
                if fields[..index].iter().any(|f| f.name == field.name) {
                    return Err(ConfigurationError::DuplicateCustomField {
                        entity: entity.clone(),
                        field: field.name.clone(),
                    });
                }
            }
        }

        entities.sort_by_key(|(entity, _)| {
            CUSTOM_FIELD_ENTITIES
                .iter()
                .position(|known| known == entity)
        });
        Ok(Self { entities })
    }

    pub fn for_entity(&self, entity: &str) -> &[CustomFieldConfig] {
        self.entities
            .iter()
            .find(|(name, _)| name == entity)
            .map(|(_, fields)| fields.as_slice())
            .unwrap_or(&[])
    }

    /// Entities with at least one custom field.
    pub fn entities(&self) -> impl Iterator<Item = (&str, &[CustomFieldConfig])> {
        self.entities
            .iter()
            .map(|(entity, fields)| (entity.as_str(), fields.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
