// Copyright 2025 Cowboy AI, LLC.

//! Raw type descriptors
//!
//! The input shape produced by an external scanner (reflection, static
//! analysis, a build plugin). Descriptors describe what a type *declares*;
//! the builders in [`crate::builder`] turn them into mirrors.

mod table;

pub use table::DescriptorTable;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::mirror::{AccessLevel, AssertionMirror, WildcardBoundType};

/// Marker capability a type implements directly
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Capability {
    /// Aggregate root marker
    AggregateRoot,
    /// Entity marker
    Entity,
    /// Value object marker
    ValueObject,
    /// Language-level enum
    Enum,
    /// Identity marker
    Identity,
    /// Domain service marker
    DomainService,
    /// Repository marker
    Repository,
    /// Domain event marker
    DomainEvent,
    /// Domain command marker
    DomainCommand,
    /// Read model marker
    ReadModel,
    /// Application service marker
    ApplicationService,
    /// Query handler marker
    QueryHandler,
    /// Outbound service marker
    OutboundService,
    /// Generic service kind marker
    ServiceKind,
}

/// Declared shape of a type use (field type, parameter, return type)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    /// A class or interface, possibly parameterised
    Named {
        /// Raw type name
        name: String,
        /// Type arguments
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        arguments: Vec<TypeRef>,
    },
    /// An array of a component type
    Array {
        /// Component type
        component: Box<TypeRef>,
    },
    /// A wildcard type argument
    Wildcard {
        /// Bound direction
        bound: WildcardBoundType,
        /// Bound types; empty for an unbounded `?`
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bounds: Vec<TypeRef>,
    },
    /// A type variable
    Variable {
        /// Variable name (`T`)
        name: String,
        /// Declared bounds; empty means `Object`
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        bounds: Vec<TypeRef>,
    },
}

impl TypeRef {
    /// A non-generic named type
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named {
            name: name.into(),
            arguments: Vec::new(),
        }
    }

    /// A parameterised named type
    pub fn generic(name: impl Into<String>, arguments: Vec<TypeRef>) -> Self {
        TypeRef::Named {
            name: name.into(),
            arguments,
        }
    }

    /// An array of `component`
    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array {
            component: Box::new(component),
        }
    }

    /// `? extends bound`
    pub fn extends(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            bound: WildcardBoundType::Upper,
            bounds: vec![bound],
        }
    }

    /// `? super bound`
    pub fn super_of(bound: TypeRef) -> Self {
        TypeRef::Wildcard {
            bound: WildcardBoundType::Lower,
            bounds: vec![bound],
        }
    }

    /// Unbounded `?`
    pub fn any() -> Self {
        TypeRef::Wildcard {
            bound: WildcardBoundType::Upper,
            bounds: Vec::new(),
        }
    }

    /// Type variable with bounds
    pub fn variable(name: impl Into<String>, bounds: Vec<TypeRef>) -> Self {
        TypeRef::Variable {
            name: name.into(),
            bounds,
        }
    }

    /// `java.util.Optional<inner>`
    pub fn optional(inner: TypeRef) -> Self {
        Self::generic("java.util.Optional", vec![inner])
    }

    /// `java.util.List<inner>`
    pub fn list(inner: TypeRef) -> Self {
        Self::generic("java.util.List", vec![inner])
    }

    /// `java.util.Set<inner>`
    pub fn set(inner: TypeRef) -> Self {
        Self::generic("java.util.Set", vec![inner])
    }
}

/// Declared field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field name
    pub name: String,
    /// Declared type
    pub type_ref: TypeRef,
    /// Declared visibility
    #[serde(default)]
    pub access_level: AccessLevel,
    /// Static field
    #[serde(default)]
    pub is_static: bool,
    /// Final field
    #[serde(default)]
    pub is_final: bool,
    /// Assertions on the element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<AssertionMirror>,
    /// Assertions on the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_assertions: Vec<AssertionMirror>,
    /// Carries the concurrency-version marker
    #[serde(default)]
    pub concurrency_version: bool,
}

impl FieldDescriptor {
    /// A private, non-static, modifiable field
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            access_level: AccessLevel::Private,
            is_static: false,
            is_final: false,
            assertions: Vec::new(),
            container_assertions: Vec::new(),
            concurrency_version: false,
        }
    }

    /// Set visibility
    pub fn with_access(mut self, access_level: AccessLevel) -> Self {
        self.access_level = access_level;
        self
    }

    /// Public field
    pub fn public(self) -> Self {
        self.with_access(AccessLevel::Public)
    }

    /// Final field
    pub fn final_field(mut self) -> Self {
        self.is_final = true;
        self
    }

    /// Static field
    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Add an element assertion
    pub fn with_assertion(mut self, assertion: AssertionMirror) -> Self {
        self.assertions.push(assertion);
        self
    }

    /// Add a container assertion
    pub fn with_container_assertion(mut self, assertion: AssertionMirror) -> Self {
        self.container_assertions.push(assertion);
        self
    }

    /// Mark as concurrency version field
    pub fn concurrency_version(mut self) -> Self {
        self.concurrency_version = true;
        self
    }
}

/// Declared method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParameterDescriptor {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub type_ref: TypeRef,
    /// Assertions on the element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<AssertionMirror>,
    /// Assertions on the container
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_assertions: Vec<AssertionMirror>,
}

impl ParameterDescriptor {
    /// A parameter without assertions
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            assertions: Vec::new(),
            container_assertions: Vec::new(),
        }
    }
}

/// Declared method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodDescriptor {
    /// Method name
    pub name: String,
    /// Declared visibility
    #[serde(default)]
    pub access_level: AccessLevel,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    /// Return type, `None` for void
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<TypeRef>,
    /// Static method
    #[serde(default)]
    pub is_static: bool,
    /// Events declared as published
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub published_event_type_names: Vec<String>,
    /// Event declared as listened to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listened_event_type_name: Option<String>,
}

impl MethodDescriptor {
    /// A public, void, parameterless method
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access_level: AccessLevel::Public,
            parameters: Vec::new(),
            return_type: None,
            is_static: false,
            published_event_type_names: Vec::new(),
            listened_event_type_name: None,
        }
    }

    /// Set visibility
    pub fn with_access(mut self, access_level: AccessLevel) -> Self {
        self.access_level = access_level;
        self
    }

    /// Append a parameter
    pub fn with_parameter(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.parameters.push(ParameterDescriptor::new(name, type_ref));
        self
    }

    /// Set the return type
    pub fn returning(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    /// Declare a published event
    pub fn publishing(mut self, event_type_name: impl Into<String>) -> Self {
        self.published_event_type_names.push(event_type_name.into());
        self
    }

    /// Declare the listened event
    pub fn listening_to(mut self, event_type_name: impl Into<String>) -> Self {
        self.listened_event_type_name = Some(event_type_name.into());
        self
    }

    /// Static method
    pub fn static_method(mut self) -> Self {
        self.is_static = true;
        self
    }
}

/// Declared type, keyed by its fully-qualified name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TypeDescriptor {
    /// Fully-qualified type name
    pub type_name: String,
    /// Marker capabilities implemented directly
    #[serde(default)]
    pub capabilities: Vec<Capability>,
    /// Abstract type or interface
    #[serde(default)]
    pub is_abstract: bool,
    /// Direct superclass
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_type_name: Option<String>,
    /// Directly implemented interfaces
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interface_type_names: Vec<String>,
    /// Declared fields
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    /// Declared methods
    #[serde(default)]
    pub methods: Vec<MethodDescriptor>,
    /// Identity type an entity declares
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identity_type_name: Option<String>,
    /// Aggregate root a repository manages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub managed_aggregate_type_name: Option<String>,
    /// Read model a query handler provides
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provided_read_model_type_name: Option<String>,
    /// Identity type of the aggregate a command targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate_target_identity_type_name: Option<String>,
    /// Domain service a command targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_service_target_type_name: Option<String>,
    /// Enum constants in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_constants: Vec<String>,
}

impl TypeDescriptor {
    /// An empty concrete type
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            capabilities: Vec::new(),
            is_abstract: false,
            super_type_name: None,
            interface_type_names: Vec::new(),
            fields: Vec::new(),
            methods: Vec::new(),
            identity_type_name: None,
            managed_aggregate_type_name: None,
            provided_read_model_type_name: None,
            aggregate_target_identity_type_name: None,
            domain_service_target_type_name: None,
            enum_constants: Vec::new(),
        }
    }

    /// Add a capability
    pub fn with_capability(mut self, capability: Capability) -> Self {
        if !self.capabilities.contains(&capability) {
            self.capabilities.push(capability);
        }
        self
    }

    /// Abstract type
    pub fn abstract_type(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Set the direct superclass
    pub fn extending(mut self, super_type_name: impl Into<String>) -> Self {
        self.super_type_name = Some(super_type_name.into());
        self
    }

    /// Add a directly implemented interface
    pub fn implementing(mut self, interface_type_name: impl Into<String>) -> Self {
        self.interface_type_names.push(interface_type_name.into());
        self
    }

    /// Append a field
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a method
    pub fn with_method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }

    /// Declare the entity identity type
    pub fn with_identity_type(mut self, identity_type_name: impl Into<String>) -> Self {
        self.identity_type_name = Some(identity_type_name.into());
        self
    }

    /// Declare the managed aggregate of a repository
    pub fn managing(mut self, aggregate_type_name: impl Into<String>) -> Self {
        self.managed_aggregate_type_name = Some(aggregate_type_name.into());
        self
    }

    /// Declare the read model of a query handler
    pub fn providing(mut self, read_model_type_name: impl Into<String>) -> Self {
        self.provided_read_model_type_name = Some(read_model_type_name.into());
        self
    }

    /// Declare the aggregate a command targets, by identity type
    pub fn targeting_aggregate(mut self, identity_type_name: impl Into<String>) -> Self {
        self.aggregate_target_identity_type_name = Some(identity_type_name.into());
        self
    }

    /// Declare the domain service a command targets
    pub fn targeting_service(mut self, service_type_name: impl Into<String>) -> Self {
        self.domain_service_target_type_name = Some(service_type_name.into());
        self
    }

    /// Set enum constants
    pub fn with_enum_constants<I, S>(mut self, constants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_constants = constants.into_iter().map(Into::into).collect();
        self
    }

    /// Implements `capability` directly
    pub fn has_capability(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    /// Package part of the type name (`com.shop.order` for `com.shop.order.Order`)
    pub fn package_name(&self) -> &str {
        self.type_name
            .rsplit_once('.')
            .map(|(package, _)| package)
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_methods() {
        let descriptor = TypeDescriptor::new("com.shop.order.Order")
            .with_capability(Capability::AggregateRoot)
            .with_capability(Capability::AggregateRoot)
            .extending("com.shop.BaseAggregate")
            .implementing("com.shop.Auditable")
            .with_identity_type("com.shop.order.OrderId")
            .with_field(
                FieldDescriptor::new("id", TypeRef::named("com.shop.order.OrderId")).final_field(),
            )
            .with_method(
                MethodDescriptor::new("ship")
                    .publishing("com.shop.order.OrderShipped"),
            );

        assert_eq!(descriptor.capabilities, vec![Capability::AggregateRoot]);
        assert!(descriptor.has_capability(Capability::AggregateRoot));
        assert!(!descriptor.has_capability(Capability::Entity));
        assert_eq!(descriptor.package_name(), "com.shop.order");
        assert!(descriptor.fields[0].is_final);
        assert_eq!(
            descriptor.methods[0].published_event_type_names,
            vec!["com.shop.order.OrderShipped".to_string()]
        );
    }

    #[test]
    fn test_type_ref_deserializes_from_tagged_json() {
        let json = r#"{
            "kind": "named",
            "name": "java.util.List",
            "arguments": [
                {
                    "kind": "wildcard",
                    "bound": "UPPER",
                    "bounds": [ { "kind": "named", "name": "com.shop.OrderLine" } ]
                }
            ]
        }"#;
        let type_ref: TypeRef = serde_json::from_str(json).unwrap();
        assert_eq!(
            type_ref,
            TypeRef::list(TypeRef::extends(TypeRef::named("com.shop.OrderLine")))
        );
    }

    #[test]
    fn test_package_name_of_unqualified_type() {
        assert_eq!(TypeDescriptor::new("int").package_name(), "");
    }
}
