//! Shared shop domain used by the integration tests
//!
//! ```mermaid
//! graph TD
//!     O[OrderAggregate] -->|lines| L[OrderLine]
//!     L -->|next| L
//!     L -->|price| M[Money]
//!     O -->|customer| C[Customer]
//!     R[ShippingRepository] -->|manages| O
//!     S[ShippingService] -->|repository| R
//! ```

#![allow(dead_code)]

use cim_domain_mirror::{
    AccessLevel, Capability, DescriptorMirrorFactory, DescriptorTable, DomainModel,
    DomainMirrorFactory, FieldDescriptor, MethodDescriptor, MirrorConfig, TypeDescriptor, TypeRef,
};

pub const ORDER: &str = "com.shop.order";
pub const SHIPPING: &str = "com.shop.shipping";
pub const CUSTOMER: &str = "com.shop.customer";

pub const ORDER_AGGREGATE: &str = "com.shop.order.OrderAggregate";
pub const ORDER_ID: &str = "com.shop.order.OrderId";
pub const ORDER_LINE: &str = "com.shop.order.OrderLine";
pub const MONEY: &str = "com.shop.order.Money";
pub const ORDER_STATUS: &str = "com.shop.order.OrderStatus";
pub const ORDER_PLACED: &str = "com.shop.order.OrderPlaced";
pub const ORDER_SHIPPED: &str = "com.shop.order.OrderShipped";
pub const PAYMENT_RECEIVED: &str = "com.shop.order.PaymentReceived";
pub const ORDER_COMMAND: &str = "com.shop.order.OrderCommand";
pub const PLACE_ORDER: &str = "com.shop.order.PlaceOrder";
pub const ORDER_SUMMARY: &str = "com.shop.order.OrderSummary";
pub const ORDER_QUERIES: &str = "com.shop.order.OrderQueries";

pub const SHIPPING_REPOSITORY: &str = "com.shop.shipping.ShippingRepository";
pub const SHIPPING_SERVICE: &str = "com.shop.shipping.ShippingService";
pub const CARRIER_GATEWAY: &str = "com.shop.shipping.CarrierGateway";

pub const CUSTOMER_AGGREGATE: &str = "com.shop.customer.Customer";
pub const CUSTOMER_ID: &str = "com.shop.customer.CustomerId";

const STRING: &str = "java.lang.String";

fn getter(name: &str, returns: &str) -> MethodDescriptor {
    MethodDescriptor::new(name).returning(TypeRef::named(returns))
}

fn identity(type_name: &str) -> TypeDescriptor {
    TypeDescriptor::new(type_name)
        .with_capability(Capability::Identity)
        .with_field(FieldDescriptor::new("value", TypeRef::named(STRING)).final_field())
        .with_method(getter("getValue", STRING))
}

/// Every descriptor of the shop domain, including plain library types
pub fn shop_descriptors() -> Vec<TypeDescriptor> {
    vec![
        TypeDescriptor::new(STRING),
        TypeDescriptor::new("java.math.BigDecimal"),
        identity(ORDER_ID),
        identity(CUSTOMER_ID),
        TypeDescriptor::new(MONEY)
            .with_capability(Capability::ValueObject)
            .with_field(
                FieldDescriptor::new("amount", TypeRef::named("java.math.BigDecimal"))
                    .public()
                    .final_field(),
            ),
        TypeDescriptor::new(ORDER_STATUS)
            .with_capability(Capability::Enum)
            .with_enum_constants(["OPEN", "SHIPPED", "CANCELLED"]),
        TypeDescriptor::new(CUSTOMER_AGGREGATE)
            .with_capability(Capability::AggregateRoot)
            .with_field(FieldDescriptor::new("id", TypeRef::named(CUSTOMER_ID)).final_field())
            .with_method(getter("getId", CUSTOMER_ID)),
        TypeDescriptor::new(ORDER_LINE)
            .with_capability(Capability::Entity)
            .with_field(FieldDescriptor::new("price", TypeRef::named(MONEY)))
            .with_field(FieldDescriptor::new("next", TypeRef::optional(TypeRef::named(ORDER_LINE))))
            .with_field(FieldDescriptor::new("order", TypeRef::named(ORDER_AGGREGATE)))
            .with_method(MethodDescriptor::new("ship").publishing(ORDER_SHIPPED))
            .with_method(
                MethodDescriptor::new("onPayment")
                    .with_parameter("event", TypeRef::named(PAYMENT_RECEIVED))
                    .listening_to(PAYMENT_RECEIVED),
            ),
        TypeDescriptor::new(ORDER_AGGREGATE)
            .with_capability(Capability::AggregateRoot)
            .with_identity_type(ORDER_ID)
            .with_field(FieldDescriptor::new("id", TypeRef::named(ORDER_ID)).final_field())
            .with_field(FieldDescriptor::new("lines", TypeRef::list(TypeRef::named(ORDER_LINE))))
            .with_field(FieldDescriptor::new("status", TypeRef::named(ORDER_STATUS)))
            .with_field(FieldDescriptor::new("customer", TypeRef::named(CUSTOMER_AGGREGATE)))
            .with_field(
                FieldDescriptor::new("version", TypeRef::named("long")).concurrency_version(),
            )
            .with_method(getter("getId", ORDER_ID))
            .with_method(
                MethodDescriptor::new("place")
                    .with_parameter("command", TypeRef::named(PLACE_ORDER))
                    .publishing(ORDER_PLACED),
            ),
        TypeDescriptor::new(ORDER_PLACED).with_capability(Capability::DomainEvent),
        TypeDescriptor::new(ORDER_SHIPPED).with_capability(Capability::DomainEvent),
        TypeDescriptor::new(PAYMENT_RECEIVED).with_capability(Capability::DomainEvent),
        TypeDescriptor::new(ORDER_COMMAND)
            .abstract_type()
            .with_capability(Capability::DomainCommand)
            .targeting_aggregate(ORDER_ID),
        TypeDescriptor::new(PLACE_ORDER)
            .with_capability(Capability::DomainCommand)
            .extending(ORDER_COMMAND),
        TypeDescriptor::new(ORDER_SUMMARY).with_capability(Capability::ReadModel),
        TypeDescriptor::new(ORDER_QUERIES)
            .with_capability(Capability::QueryHandler)
            .providing(ORDER_SUMMARY),
        TypeDescriptor::new(SHIPPING_REPOSITORY)
            .with_capability(Capability::Repository)
            .managing(ORDER_AGGREGATE),
        TypeDescriptor::new(CARRIER_GATEWAY).with_capability(Capability::OutboundService),
        TypeDescriptor::new(SHIPPING_SERVICE)
            .with_capability(Capability::DomainService)
            .with_field(FieldDescriptor::new("repository", TypeRef::named(SHIPPING_REPOSITORY)))
            .with_field(FieldDescriptor::new("carrier", TypeRef::named(CARRIER_GATEWAY)))
            .with_method(
                MethodDescriptor::new("dispatch")
                    .with_parameter("event", TypeRef::named(ORDER_SHIPPED))
                    .listening_to(ORDER_SHIPPED),
            )
            .with_method(MethodDescriptor::new("audit").with_access(AccessLevel::Private)),
    ]
}

pub fn shop_table() -> DescriptorTable {
    DescriptorTable::from_descriptors(shop_descriptors()).expect("shop descriptors are valid")
}

pub fn shop_packages() -> Vec<&'static str> {
    vec![ORDER, SHIPPING, CUSTOMER]
}

pub fn shop_factory() -> DescriptorMirrorFactory {
    DescriptorMirrorFactory::new(shop_table(), shop_packages())
}

pub fn shop_model() -> DomainModel {
    shop_model_with_config(MirrorConfig::default())
}

pub fn shop_model_with_config(config: MirrorConfig) -> DomainModel {
    let factory = shop_factory();
    let mirrors = factory.type_mirrors().expect("shop mirrors build");
    DomainModel::assemble_with_config(mirrors, factory.bounded_context_packages(), config)
}
