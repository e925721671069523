// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Injection of configured custom fields.
//!
//! Given `Order = [{ name = "giftMessage", type = "text" }]`, the order entity is exposed as
//!
//! ```graphql
//! type OrderCustomFields {
//!   giftMessage: String
//! }
//!
//! extend type Order {
//!   customFields: OrderCustomFields
//! }
//! ```
//!
//! and the create/update inputs, filter and sort parameters of the entity are extended to match.

use api_config::{CUSTOM_FIELD_ENTITIES, CustomFieldConfig, CustomFields};
use async_graphql_parser::{
    Positioned,
    types::{FieldDefinition, InputValueDefinition, TypeDefinition},
};
use common::ApiSurface;
use schema_model::{
    SchemaDocument, SchemaError,
    type_normalization::{
        TypeDefinitionIntrospection, field_definition, input_object_type_definition,
        input_value_definition, list_type, named_type, object_type_definition, underlying_type,
    },
};
use tracing::debug;

use crate::{
    error::CompositionError,
    stages::{
        JSON_SCALAR, StageResultExt,
        list_options::{SORT_ORDER_ENUM, filter_operators_for, is_sortable},
        with_json_scalar,
    },
};

const CUSTOM_FIELDS: &str = "customFields";

pub const ORDER_LINE_CUSTOM_FIELDS_INPUT: &str = "OrderLineCustomFieldsInput";

/// Mutations that add or adjust an order line, and so accept order line custom fields.
const ORDER_LINE_MUTATIONS: [&str; 4] = [
    "addItemToOrder",
    "adjustOrderLine",
    "addItemToDraftOrder",
    "adjustDraftOrderLine",
];

/// Inputs describing an order line, and so accept order line custom fields.
const ORDER_LINE_INPUTS: [&str; 5] = [
    "AddItemInput",
    "OrderLineInput",
    "AdjustOrderLineInput",
    "AddItemToDraftOrderInput",
    "AdjustDraftOrderLineInput",
];

fn output_field(config: &CustomFieldConfig) -> Positioned<FieldDefinition> {
    let type_name = config.field_type.graphql_type_name();
    let ty = if config.list {
        list_type(type_name, false, true)
    } else {
        named_type(type_name, true)
    };
    field_definition(&config.name, ty, config.description.as_deref())
}

/// With `keep_required`, a non-nullable custom field becomes a required input.
fn input_field(config: &CustomFieldConfig, keep_required: bool) -> Positioned<InputValueDefinition> {
    let type_name = config.field_type.graphql_type_name();
    let nullable = !keep_required || config.nullable;
    let ty = if config.list {
        list_type(type_name, false, nullable)
    } else {
        named_type(type_name, nullable)
    };
    input_value_definition(&config.name, ty, config.description.as_deref())
}

fn input_type(
    name: &str,
    fields: &[&CustomFieldConfig],
    keep_required: bool,
) -> TypeDefinition {
    input_object_type_definition(
        name,
        None,
        fields.iter().map(|f| input_field(f, keep_required)).collect(),
    )
}

fn custom_fields_input_value(type_name: &str) -> Positioned<InputValueDefinition> {
    input_value_definition(CUSTOM_FIELDS, named_type(type_name, true), None)
}

/// Add the custom fields of every configured entity to its output, input, filter and sort types.
pub fn add_graphql_custom_fields(
    schema: SchemaDocument,
    custom_fields: &CustomFields,
    surface: ApiSurface,
) -> Result<SchemaDocument, CompositionError> {
    const STAGE: &str = "custom fields";

    let mut schema = schema;
    for (entity, fields) in custom_fields.entities() {
        debug!(entity, count = fields.len(), "Adding custom fields");
        schema = add_entity_custom_fields(schema, entity, fields, surface).in_stage(STAGE)?;
    }
    Ok(schema)
}

fn add_entity_custom_fields(
    schema: SchemaDocument,
    entity: &str,
    fields: &[CustomFieldConfig],
    surface: ApiSurface,
) -> Result<SchemaDocument, SchemaError> {
    let visible: Vec<&CustomFieldConfig> =
        fields.iter().filter(|f| f.is_visible_on(surface)).collect();
    let localized: Vec<&CustomFieldConfig> = visible
        .iter()
        .copied()
        .filter(|f| f.field_type.is_localized())
        .collect();
    let writable: Vec<&CustomFieldConfig> = visible
        .iter()
        .copied()
        .filter(|f| !f.readonly && !f.field_type.is_localized())
        .collect();
    let writable_localized: Vec<&CustomFieldConfig> =
        localized.iter().copied().filter(|f| !f.readonly).collect();

    let mut schema = schema;

    if schema.has_type(entity) {
        if visible.is_empty() {
            schema = with_json_scalar(schema).with_field(
                entity,
                field_definition(CUSTOM_FIELDS, named_type(JSON_SCALAR, true), None),
            )?;
        } else {
            let type_name = format!("{entity}CustomFields");
            schema = schema
                .with_type(object_type_definition(
                    &type_name,
                    None,
                    visible.iter().map(|f| output_field(f)).collect(),
                ))?
                .with_field(
                    entity,
                    field_definition(CUSTOM_FIELDS, named_type(&type_name, true), None),
                )?;
        }
    }

    let translation = format!("{entity}Translation");
    if !localized.is_empty() && schema.has_type(&translation) {
        let type_name = format!("{entity}TranslationCustomFields");
        schema = schema
            .with_type(object_type_definition(
                &type_name,
                None,
                localized.iter().map(|f| output_field(f)).collect(),
            ))?
            .with_field(
                &translation,
                field_definition(CUSTOM_FIELDS, named_type(&type_name, true), None),
            )?;
    }

    let translation_input = format!("{entity}TranslationInput");
    if !writable_localized.is_empty() && schema.has_type(&translation_input) {
        let type_name = format!("{entity}TranslationInputCustomFields");
        schema = schema
            .with_type(input_type(&type_name, &writable_localized, false))?
            .with_input_field(&translation_input, custom_fields_input_value(&type_name))?;
    }

    if !writable.is_empty() {
        let create_input = format!("Create{entity}Input");
        if schema.has_type(&create_input) {
            let type_name = format!("Create{entity}CustomFieldsInput");
            schema = schema
                .with_type(input_type(&type_name, &writable, true))?
                .with_input_field(&create_input, custom_fields_input_value(&type_name))?;
        }

        let update_input = format!("Update{entity}Input");
        if schema.has_type(&update_input) {
            let type_name = format!("Update{entity}CustomFieldsInput");
            schema = schema
                .with_type(input_type(&type_name, &writable, false))?
                .with_input_field(&update_input, custom_fields_input_value(&type_name))?;
        }
    }

    let filter_parameter = format!("{entity}FilterParameter");
    if schema.has_type(&filter_parameter) {
        for field in visible.iter().filter(|f| !f.list) {
            if let Some(operators) = filter_operators_for(field.field_type.graphql_type_name()) {
                schema = schema.with_input_field(
                    &filter_parameter,
                    input_value_definition(&field.name, named_type(operators, true), None),
                )?;
            }
        }
    }

    let sort_fields: Vec<_> = visible
        .iter()
        .filter(|f| !f.list && is_sortable(f.field_type.graphql_type_name()))
        .map(|f| input_value_definition(&f.name, named_type(SORT_ORDER_ENUM, true), None))
        .collect();
    let sort_parameter = format!("{entity}SortParameter");
    if schema.has_type(&sort_parameter) {
        for field in sort_fields {
            schema = schema.with_input_field(&sort_parameter, field)?;
        }
    } else if !sort_fields.is_empty() && schema.has_type(&filter_parameter) {
        // The entity is listable but had nothing to sort by until now
        schema = with_sort_parameter(schema, &filter_parameter, &sort_parameter, sort_fields)?;
    }

    Ok(schema)
}

/// Define `sort_parameter` and offer it on every list options input filtering by
/// `filter_parameter`.
fn with_sort_parameter(
    schema: SchemaDocument,
    filter_parameter: &str,
    sort_parameter: &str,
    fields: Vec<Positioned<InputValueDefinition>>,
) -> Result<SchemaDocument, SchemaError> {
    let options_types: Vec<String> = schema
        .type_definitions()
        .filter(|td| {
            td.input_field("filter")
                .is_some_and(|f| underlying_type(&f.ty.node).as_str() == filter_parameter)
                && td.input_field("sort").is_none()
        })
        .map(|td| td.name().to_string())
        .collect();

    let mut schema =
        schema.with_type(input_object_type_definition(sort_parameter, None, fields))?;
    for options_type in options_types {
        schema = schema.with_input_field(
            &options_type,
            input_value_definition("sort", named_type(sort_parameter, true), None),
        )?;
    }
    Ok(schema)
}

/// Accept order line custom fields wherever an order line is added or adjusted.
pub fn add_order_line_custom_fields_input(
    schema: SchemaDocument,
    order_line_fields: &[CustomFieldConfig],
    surface: ApiSurface,
) -> Result<SchemaDocument, CompositionError> {
    const STAGE: &str = "order line custom fields";

    let writable: Vec<&CustomFieldConfig> = order_line_fields
        .iter()
        .filter(|f| f.is_writable_on(surface) && !f.field_type.is_localized())
        .collect();
    if writable.is_empty() {
        return Ok(schema);
    }

    let mut schema = schema
        .with_type(input_type(ORDER_LINE_CUSTOM_FIELDS_INPUT, &writable, false))
        .in_stage(STAGE)?;

    let mutation_type_name = schema.mutation_type_name().to_string();
    let mutations: Vec<&str> = ORDER_LINE_MUTATIONS
        .into_iter()
        .filter(|name| {
            schema
                .get_type(&mutation_type_name)
                .and_then(|mutation| mutation.field(name))
                .is_some()
        })
        .collect();

    for mutation in mutations {
        schema = schema
            .with_field_argument(
                &mutation_type_name,
                mutation,
                custom_fields_input_value(ORDER_LINE_CUSTOM_FIELDS_INPUT),
            )
            .in_stage(STAGE)?;
    }

    for input in ORDER_LINE_INPUTS {
        if schema.has_type(input) {
            schema = schema
                .with_input_field(input, custom_fields_input_value(ORDER_LINE_CUSTOM_FIELDS_INPUT))
                .in_stage(STAGE)?;
        }
    }

    Ok(schema)
}

/// Accept order custom fields when an order is modified.
pub fn add_modify_order_custom_fields(
    schema: SchemaDocument,
    order_fields: &[CustomFieldConfig],
    surface: ApiSurface,
) -> Result<SchemaDocument, CompositionError> {
    const STAGE: &str = "modify order custom fields";
    const MODIFY_ORDER_INPUT: &str = "ModifyOrderInput";
    const UPDATE_ORDER_CUSTOM_FIELDS_INPUT: &str = "UpdateOrderCustomFieldsInput";

    let writable: Vec<&CustomFieldConfig> = order_fields
        .iter()
        .filter(|f| f.is_writable_on(surface) && !f.field_type.is_localized())
        .collect();
    if writable.is_empty() || !schema.has_type(MODIFY_ORDER_INPUT) {
        return Ok(schema);
    }

    schema
        .with_type_if_absent(input_type(UPDATE_ORDER_CUSTOM_FIELDS_INPUT, &writable, false))
        .with_input_field(
            MODIFY_ORDER_INPUT,
            custom_fields_input_value(UPDATE_ORDER_CUSTOM_FIELDS_INPUT),
        )
        .in_stage(STAGE)
}

/// Describe the custom field configuration of every entity through `ServerConfig`.
pub fn add_server_config_custom_fields(
    schema: SchemaDocument,
    custom_fields: &CustomFields,
) -> Result<SchemaDocument, CompositionError> {
    const STAGE: &str = "server config custom fields";
    const SERVER_CONFIG: &str = "ServerConfig";
    const CUSTOM_FIELD_CONFIG: &str = "CustomFieldConfig";
    const CUSTOM_FIELDS_TYPE: &str = "CustomFields";

    let custom_field_config = object_type_definition(
        CUSTOM_FIELD_CONFIG,
        Some("The configuration of a single custom field"),
        vec![
            field_definition("name", named_type("String", false), None),
            field_definition("type", named_type("String", false), None),
            field_definition("list", named_type("Boolean", false), None),
            field_definition("nullable", named_type("Boolean", false), None),
            field_definition("public", named_type("Boolean", false), None),
            field_definition("internal", named_type("Boolean", false), None),
            field_definition("readonly", named_type("Boolean", false), None),
            field_definition("description", named_type("String", true), None),
        ],
    );

    // Every entity gets an entry, so clients can rely on the shape regardless of configuration
    let entity_fields = CUSTOM_FIELD_ENTITIES
        .iter()
        .map(|entity| field_definition(entity, list_type(CUSTOM_FIELD_CONFIG, false, false), None))
        .collect();

    let schema = schema
        .with_type_if_absent(custom_field_config)
        .with_type(object_type_definition(CUSTOM_FIELDS_TYPE, None, entity_fields))
        .in_stage(STAGE)?;

    debug!(
        entities = custom_fields.entities().count(),
        "Adding server config custom fields"
    );

    let field = field_definition("customFieldConfig", named_type(CUSTOM_FIELDS_TYPE, false), None);
    if schema.has_type(SERVER_CONFIG) {
        schema.with_field(SERVER_CONFIG, field).in_stage(STAGE)
    } else {
        schema
            .with_type(object_type_definition(SERVER_CONFIG, None, vec![field]))
            .in_stage(STAGE)
    }
}

/// Let the active administrator update their own custom fields.
pub fn add_active_administrator_custom_fields(
    schema: SchemaDocument,
    administrator_fields: &[CustomFieldConfig],
) -> Result<SchemaDocument, CompositionError> {
    const STAGE: &str = "active administrator custom fields";
    const UPDATE_ACTIVE_ADMINISTRATOR_INPUT: &str = "UpdateActiveAdministratorInput";
    const UPDATE_ADMINISTRATOR_CUSTOM_FIELDS_INPUT: &str = "UpdateAdministratorCustomFieldsInput";

    let writable: Vec<&CustomFieldConfig> = administrator_fields
        .iter()
        .filter(|f| f.is_writable_on(ApiSurface::Admin) && !f.field_type.is_localized())
        .collect();

    let (schema, type_name) = if writable.is_empty() {
        (with_json_scalar(schema), JSON_SCALAR)
    } else {
        (
            schema.with_type_if_absent(input_type(
                UPDATE_ADMINISTRATOR_CUSTOM_FIELDS_INPUT,
                &writable,
                false,
            )),
            UPDATE_ADMINISTRATOR_CUSTOM_FIELDS_INPUT,
        )
    };

    let field = custom_fields_input_value(type_name);
    if schema.has_type(UPDATE_ACTIVE_ADMINISTRATOR_INPUT) {
        schema
            .with_input_field(UPDATE_ACTIVE_ADMINISTRATOR_INPUT, field)
            .in_stage(STAGE)
    } else {
        schema
            .with_type(input_object_type_definition(
                UPDATE_ACTIVE_ADMINISTRATOR_INPUT,
                None,
                vec![field],
            ))
            .in_stage(STAGE)
    }
}

/// Let customers provide their public custom fields when registering.
pub fn add_register_customer_custom_fields_input(
    schema: SchemaDocument,
    customer_fields: &[CustomFieldConfig],
) -> Result<SchemaDocument, CompositionError> {
    const STAGE: &str = "register customer custom fields";
    const REGISTER_CUSTOMER_INPUT: &str = "RegisterCustomerInput";
    const REGISTER_CUSTOMER_CUSTOM_FIELDS_INPUT: &str = "RegisterCustomerCustomFieldsInput";

    let writable: Vec<&CustomFieldConfig> = customer_fields
        .iter()
        .filter(|f| f.is_writable_on(ApiSurface::Shop) && !f.field_type.is_localized())
        .collect();
    if writable.is_empty() || !schema.has_type(REGISTER_CUSTOMER_INPUT) {
        return Ok(schema);
    }

    schema
        .with_type(input_type(REGISTER_CUSTOMER_CUSTOM_FIELDS_INPUT, &writable, false))
        .and_then(|schema| {
            schema.with_input_field(
                REGISTER_CUSTOMER_INPUT,
                custom_fields_input_value(REGISTER_CUSTOMER_CUSTOM_FIELDS_INPUT),
            )
        })
        .in_stage(STAGE)
}

#[cfg(test)]
mod tests {
    use api_config::CustomFieldType;
    use schema_model::printer::print_type_definition;

    use crate::{build_base_schema, stages::list_options::generate_list_options};

    use super::*;

    const BASE: &str = r#"
        interface PaginatedList { items: [Order!]! totalItems: Int! }
        type Order { id: ID! code: String! }
        type OrderList implements PaginatedList { items: [Order!]! totalItems: Int! }
        type OrderLine { id: ID! quantity: Int! }
        type Product { id: ID! }
        type ProductTranslation { name: String! }
        input ProductTranslationInput { name: String }
        input CreateOrderInput { code: String! }
        input UpdateOrderInput { id: ID! }
        input ModifyOrderInput { orderId: ID! }
        input AddItemInput { productVariantId: ID! }
        input RegisterCustomerInput { emailAddress: String! }
        input UpdateActiveAdministratorInput { firstName: String }
        type Query { orders: OrderList! }
        type Mutation {
            addItemToOrder(productVariantId: ID!, quantity: Int!): Order
            adjustOrderLine(orderLineId: ID!, quantity: Int!): Order
        }
    "#;

    fn base() -> SchemaDocument {
        generate_list_options(build_base_schema(BASE).unwrap()).unwrap()
    }

    fn print(schema: &SchemaDocument, type_name: &str) -> String {
        print_type_definition(schema.get_type(type_name).unwrap())
    }

    fn custom_fields() -> CustomFields {
        let mut gift_message = CustomFieldConfig::new("giftMessage", CustomFieldType::Text);
        gift_message.nullable = false;
        let mut staff_note = CustomFieldConfig::new("staffNote", CustomFieldType::String);
        staff_note.public = false;
        let mut warehouse_id = CustomFieldConfig::new("warehouseId", CustomFieldType::Id);
        warehouse_id.internal = true;
        let mut tags = CustomFieldConfig::new("tags", CustomFieldType::String);
        tags.list = true;

        CustomFields::new(vec![
            (
                "Order".to_string(),
                vec![gift_message, staff_note, warehouse_id, tags],
            ),
            (
                "Product".to_string(),
                vec![CustomFieldConfig::new("subtitle", CustomFieldType::LocaleString)],
            ),
            (
                "OrderLine".to_string(),
                vec![CustomFieldConfig::new("engraving", CustomFieldType::String)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn admin_sees_non_public_fields() {
        let schema =
            add_graphql_custom_fields(base(), &custom_fields(), ApiSurface::Admin).unwrap();

        assert_eq!(
            print(&schema, "OrderCustomFields"),
            "type OrderCustomFields {\n  giftMessage: String\n  staffNote: String\n  tags: [String!]\n}"
        );
        assert_eq!(
            print(&schema, "CreateOrderCustomFieldsInput"),
            "input CreateOrderCustomFieldsInput {\n  giftMessage: String!\n  staffNote: String\n  tags: [String!]\n}"
        );
        assert_eq!(
            print(&schema, "UpdateOrderCustomFieldsInput"),
            "input UpdateOrderCustomFieldsInput {\n  giftMessage: String\n  staffNote: String\n  tags: [String!]\n}"
        );
        assert_eq!(
            schema
                .get_type("Order")
                .unwrap()
                .field("customFields")
                .unwrap()
                .ty
                .node
                .to_string(),
            "OrderCustomFields"
        );

        let filter = schema.get_type("OrderFilterParameter").unwrap();
        assert!(filter.input_field("giftMessage").is_some());
        assert!(filter.input_field("tags").is_none());
        assert!(filter.input_field("warehouseId").is_none());
        let sort = schema.get_type("OrderSortParameter").unwrap();
        assert!(sort.input_field("staffNote").is_some());
    }

    #[test]
    fn shop_hides_non_public_fields() {
        let schema = add_graphql_custom_fields(base(), &custom_fields(), ApiSurface::Shop).unwrap();

        assert_eq!(
            print(&schema, "OrderCustomFields"),
            "type OrderCustomFields {\n  giftMessage: String\n  tags: [String!]\n}"
        );
    }

    #[test]
    fn localized_fields_go_through_translations() {
        let schema =
            add_graphql_custom_fields(base(), &custom_fields(), ApiSurface::Admin).unwrap();

        assert_eq!(
            print(&schema, "ProductTranslationCustomFields"),
            "type ProductTranslationCustomFields {\n  subtitle: String\n}"
        );
        assert!(
            schema
                .get_type("ProductTranslationInput")
                .unwrap()
                .input_field("customFields")
                .is_some()
        );
        // Translatable fields are still readable from the entity itself
        assert!(schema.has_type("ProductCustomFields"));
    }

    #[test]
    fn sortable_custom_fields_create_the_sort_parameter() {
        let base = build_base_schema(
            r#"
            interface PaginatedList { items: [Seller!]! totalItems: Int! }
            type Seller { approved: Boolean! }
            type SellerList implements PaginatedList { items: [Seller!]! totalItems: Int! }
            type Query { sellers: SellerList! }
            "#,
        )
        .unwrap();
        let base = generate_list_options(base).unwrap();
        assert!(!base.has_type("SellerSortParameter"));

        let custom_fields = CustomFields::new(vec![(
            "Seller".to_string(),
            vec![CustomFieldConfig::new("rating", CustomFieldType::Int)],
        )])
        .unwrap();
        let schema = add_graphql_custom_fields(base, &custom_fields, ApiSurface::Shop).unwrap();

        assert_eq!(
            print(&schema, "SellerSortParameter"),
            "input SellerSortParameter {\n  rating: SortOrder\n}"
        );
        assert_eq!(
            schema
                .get_type("SellerListOptions")
                .and_then(|options| options.input_field("sort"))
                .map(|sort| sort.ty.node.to_string()),
            Some("SellerSortParameter".to_string())
        );
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn entities_without_visible_fields_get_json() {
        let mut hidden = CustomFieldConfig::new("legacyId", CustomFieldType::Int);
        hidden.internal = true;
        let custom_fields = CustomFields::new(vec![("Order".to_string(), vec![hidden])]).unwrap();

        let schema = add_graphql_custom_fields(base(), &custom_fields, ApiSurface::Admin).unwrap();

        assert!(schema.has_type("JSON"));
        assert!(!schema.has_type("OrderCustomFields"));
        assert_eq!(
            schema
                .get_type("Order")
                .unwrap()
                .field("customFields")
                .unwrap()
                .ty
                .node
                .to_string(),
            "JSON"
        );
    }

    #[test]
    fn order_line_custom_fields_input() {
        let fields = custom_fields();
        let schema = add_order_line_custom_fields_input(
            base(),
            fields.for_entity("OrderLine"),
            ApiSurface::Shop,
        )
        .unwrap();

        let mutation = schema.get_type("Mutation").unwrap();
        for name in ["addItemToOrder", "adjustOrderLine"] {
            let argument = mutation
                .field(name)
                .unwrap()
                .arguments
                .iter()
                .find(|a| a.node.name.node.as_str() == "customFields")
                .unwrap();
            assert_eq!(argument.node.ty.node.to_string(), ORDER_LINE_CUSTOM_FIELDS_INPUT);
        }
        assert!(
            schema
                .get_type("AddItemInput")
                .unwrap()
                .input_field("customFields")
                .is_some()
        );

        let unchanged = add_order_line_custom_fields_input(base(), &[], ApiSurface::Shop).unwrap();
        assert_eq!(unchanged.to_sdl(), base().to_sdl());
    }

    #[test]
    fn modify_order_reuses_update_input() {
        let fields = custom_fields();
        let schema = add_graphql_custom_fields(base(), &fields, ApiSurface::Admin).unwrap();
        let schema =
            add_modify_order_custom_fields(schema, fields.for_entity("Order"), ApiSurface::Admin)
                .unwrap();

        assert_eq!(
            schema
                .get_type("ModifyOrderInput")
                .unwrap()
                .input_field("customFields")
                .unwrap()
                .ty
                .node
                .to_string(),
            "UpdateOrderCustomFieldsInput"
        );
    }

    #[test]
    fn server_config_lists_every_entity() {
        let schema = add_server_config_custom_fields(base(), &custom_fields()).unwrap();

        let custom_fields_type = schema.get_type("CustomFields").unwrap();
        assert_eq!(
            custom_fields_type.fields().unwrap().len(),
            CUSTOM_FIELD_ENTITIES.len()
        );
        assert_eq!(
            print(&schema, "ServerConfig"),
            "type ServerConfig {\n  customFieldConfig: CustomFields!\n}"
        );
    }

    #[test]
    fn active_administrator_falls_back_to_json() {
        let schema = add_active_administrator_custom_fields(base(), &[]).unwrap();
        assert_eq!(
            print(&schema, "UpdateActiveAdministratorInput"),
            "input UpdateActiveAdministratorInput {\n  firstName: String\n  customFields: JSON\n}"
        );

        let schema = add_active_administrator_custom_fields(
            base(),
            &[CustomFieldConfig::new("signature", CustomFieldType::Text)],
        )
        .unwrap();
        assert_eq!(
            print(&schema, "UpdateAdministratorCustomFieldsInput"),
            "input UpdateAdministratorCustomFieldsInput {\n  signature: String\n}"
        );
    }

    #[test]
    fn register_customer_takes_public_writable_fields() {
        let mut private = CustomFieldConfig::new("creditLimit", CustomFieldType::Float);
        private.public = false;
        let mut readonly = CustomFieldConfig::new("memberSince", CustomFieldType::DateTime);
        readonly.readonly = true;
        let fields = vec![
            CustomFieldConfig::new("newsletter", CustomFieldType::Boolean),
            private,
            readonly,
        ];

        let schema = add_register_customer_custom_fields_input(base(), &fields).unwrap();
        assert_eq!(
            print(&schema, "RegisterCustomerCustomFieldsInput"),
            "input RegisterCustomerCustomFieldsInput {\n  newsletter: Boolean\n}"
        );
        assert!(
            schema
                .get_type("RegisterCustomerInput")
                .unwrap()
                .input_field("customFields")
                .is_some()
        );
    }
}
