//! JSON forms of descriptors and mirror documents

mod support;

use cim_domain_mirror::{
    mirror_document_schema, DescriptorMirrorFactory, DescriptorTable, DomainRegistry,
    JsonMirrorFactory, MessageLinks, MermaidRenderer, MirrorDocument, MirrorError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use support::*;

#[test]
fn scanner_json_builds_a_linked_model() -> anyhow::Result<()> {
    let descriptors = json!({
        "com.shop.order.Order": {
            "typeName": "com.shop.order.Order",
            "capabilities": ["AGGREGATE_ROOT"],
            "fields": [
                {
                    "name": "lines",
                    "typeRef": {
                        "kind": "named",
                        "name": "java.util.List",
                        "arguments": [{ "kind": "named", "name": "com.shop.order.Line" }]
                    }
                }
            ]
        },
        "com.shop.order.Line": {
            "typeName": "com.shop.order.Line",
            "capabilities": ["ENTITY"],
            "methods": [
                {
                    "name": "ship",
                    "accessLevel": "PUBLIC",
                    "publishedEventTypeNames": ["com.shop.order.Shipped"]
                }
            ]
        },
        "com.shop.order.Shipped": {
            "typeName": "com.shop.order.Shipped",
            "capabilities": ["DOMAIN_EVENT"]
        },
        "com.shop.order.OrderRepository": {
            "typeName": "com.shop.order.OrderRepository",
            "capabilities": ["REPOSITORY"],
            "managedAggregateTypeName": "com.shop.order.Order"
        }
    });

    let table: DescriptorTable = serde_json::from_value(descriptors)?;
    let registry = DomainRegistry::new();
    registry.initialize(&DescriptorMirrorFactory::new(table, ["com.shop.order"]))?;

    let model = registry.model()?;
    let order = model.aggregate_root_mirror_for("com.shop.order.Order")?;
    let shipped = model.domain_event_mirror_for("com.shop.order.Shipped")?;
    assert!(order.publishes(&shipped));
    assert_eq!(
        order.repository().map(|r| r.type_name.clone()),
        Some("com.shop.order.OrderRepository".to_string())
    );
    Ok(())
}

#[test]
fn shop_model_survives_document_round_trip() -> anyhow::Result<()> {
    let model = shop_model();
    let json = model.to_document().to_json_pretty()?;
    let restored = MirrorDocument::from_json(&json)?.into_model();

    assert_eq!(restored.len(), model.len());
    assert_eq!(restored.bounded_context_packages(), model.bounded_context_packages());
    assert_eq!(restored.all_type_mirrors(), model.all_type_mirrors());

    let order = restored.aggregate_root_mirror_for(ORDER_AGGREGATE)?;
    let shipped = restored.domain_event_mirror_for(ORDER_SHIPPED)?;
    assert!(order.publishes(&shipped));
    Ok(())
}

#[test]
fn document_tags_mirror_variants() -> anyhow::Result<()> {
    let document = shop_model().to_document();
    let value = serde_json::to_value(&document)?;

    let repository = &value["typeMirrors"][SHIPPING_REPOSITORY];
    assert_eq!(repository["mirrorType"], "RepositoryMirror");
    assert_eq!(repository["managedAggregateTypeName"], ORDER_AGGREGATE);

    let enum_mirror = &value["typeMirrors"][ORDER_STATUS];
    assert_eq!(enum_mirror["mirrorType"], "EnumMirror");
    assert_eq!(enum_mirror["enumValues"], json!(["OPEN", "SHIPPED", "CANCELLED"]));
    Ok(())
}

#[test]
fn json_factory_initializes_registry() -> anyhow::Result<()> {
    let json = shop_model().to_document().to_json()?;
    let registry = DomainRegistry::new();
    registry.initialize(&JsonMirrorFactory::from_json(&json)?)?;

    assert_eq!(registry.repository_mirror_for(ORDER_AGGREGATE)?.type_name, SHIPPING_REPOSITORY);
    assert_eq!(
        registry.bounded_context_packages()?,
        vec![ORDER.to_string(), SHIPPING.to_string(), CUSTOMER.to_string()]
    );
    Ok(())
}

#[test]
fn malformed_documents_are_rejected() {
    let json = r#"{"typeMirrors": {"x": {"typeName": "x", "mirrorType": "Bogus"}}}"#;
    let err = MirrorDocument::from_json(json).unwrap_err();
    assert!(matches!(err, MirrorError::SerializationError(_)));
}

#[test]
fn schema_lists_mirror_definitions() -> anyhow::Result<()> {
    let schema = serde_json::to_value(mirror_document_schema())?;
    let definitions = schema["definitions"].as_object().expect("schema definitions");
    assert!(definitions.contains_key("DomainTypeMirror"));
    assert!(definitions.contains_key("FieldMirror"));
    Ok(())
}

#[test]
fn shop_diagram_links_contexts() {
    let model = shop_model();
    let mermaid = MermaidRenderer::new().render_model(&model);

    assert!(mermaid.contains("subgraph com_shop_shipping[\"com.shop.shipping\"]"));
    assert!(mermaid.contains(
        "com_shop_shipping_ShippingRepository -->|manages| com_shop_order_OrderAggregate"
    ));
    for edge in [
        "com_shop_order_OrderLine ==>|publishes| com_shop_order_OrderShipped",
        "com_shop_shipping_ShippingService -.->|listens| com_shop_order_OrderShipped",
        "com_shop_order_OrderAggregate ==>|processes| com_shop_order_PlaceOrder",
    ] {
        assert!(mermaid.contains(edge), "missing edge {edge}");
    }
}
