// Copyright 2025 Cowboy AI, LLC.

//! # CIM Domain Mirror
//!
//! Structural metadata for Domain-Driven Design (DDD) types in the Composable
//! Information Machine.
//!
//! Types tagged with DDD roles are described once, by a scanner, as raw
//! descriptors. This crate turns those descriptors into mirrors and answers
//! questions about the domain:
//! - **Classification**: every type gets exactly one [`DomainType`]
//! - **Mirrors**: fields, methods, identity and variant metadata per type
//! - **Linked views**: aggregate roots, repositories, events, commands and
//!   services resolved against each other by name
//! - **Containment**: aggregates answer event/command questions over
//!   everything they hold, cycles included
//! - **Bounded contexts**: live partitions of the model by package prefix
//! - **Registry**: a process-wide, initialize-once entry point
//!
//! ## Flow
//!
//! ```mermaid
//! graph LR
//!     S[Scanner] --> D[DescriptorTable]
//!     D --> B[DescriptorMirrorFactory]
//!     B --> R[DomainRegistry]
//!     J[JsonMirrorFactory] --> R
//!     R --> M[DomainModel]
//!     M --> V[Linked views]
//!     M --> C[BoundedContextMirror]
//! ```
//!
//! ## Example
//!
//! ```
//! use cim_domain_mirror::{
//!     Capability, DescriptorMirrorFactory, DescriptorTable, DomainRegistry, TypeDescriptor,
//! };
//!
//! let table = DescriptorTable::from_descriptors([
//!     TypeDescriptor::new("com.shop.order.Order").with_capability(Capability::AggregateRoot),
//!     TypeDescriptor::new("com.shop.order.OrderShipped").with_capability(Capability::DomainEvent),
//! ])
//! .unwrap();
//!
//! let registry = DomainRegistry::new();
//! registry
//!     .initialize(&DescriptorMirrorFactory::new(table, ["com.shop.order"]))
//!     .unwrap();
//!
//! let model = registry.model().unwrap();
//! let context = model.bounded_context("com.shop.order").unwrap();
//! assert_eq!(context.aggregate_roots().len(), 1);
//! assert_eq!(context.domain_events().len(), 1);
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod classifier;
pub mod codec;
pub mod config;
pub mod descriptor;
pub mod diagram;
pub mod domain_type;
pub mod errors;
pub mod mirror;
pub mod model;
pub mod registry;

pub use builder::{
    ContainableTypeBuilder, DescriptorMirrorFactory, DomainTypeMirrorBuilder, FieldMirrorBuilder,
    MethodMirrorBuilder,
};
pub use classifier::{classify, TypeClassifier};
pub use codec::{mirror_document_schema, JsonMirrorFactory, MirrorDocument};
pub use config::{CommandMatching, ContainerConventions, MirrorConfig};
pub use descriptor::{
    Capability, DescriptorTable, FieldDescriptor, MethodDescriptor, ParameterDescriptor,
    TypeDescriptor, TypeRef,
};
pub use diagram::{DiagramEdge, MermaidRenderer};
pub use domain_type::DomainType;
pub use errors::{MirrorError, MirrorResult};
pub use mirror::{
    AccessLevel, AssertedContainableTypeMirror, AssertionMirror, AssertionType, CommandPayload,
    ContainerKind, DomainTypeMirror, EntityPayload, EnumPayload, FieldKind, FieldMirror,
    MethodMirror, MirrorKind, ParamMirror, QueryHandlerPayload, RepositoryPayload,
    ResolvedGenericTypeMirror, ServiceReferences, WildcardBoundType, WildcardMirror,
};
pub use model::{
    filter, AggregateRootMirror, ApplicationServiceMirror, BoundedContextMirror,
    CollectingVisitor, ContainmentWalker, DomainCommandMirror, DomainEventMirror, DomainModel,
    DomainObjectMirror, DomainObjectVisitor, DomainServiceMirror, EntityMirror, EnumMirror,
    IdentityMirror, MessageLinks, MirrorView, OutboundServiceMirror, QueryHandlerMirror,
    ReadModelMirror, RepositoryMirror, ServiceKindMirror, ServiceMirror, TypeMirror,
    TypeMirrorRef, ValueObjectMirror,
};
pub use registry::{BoundedContextSnapshot, Domain, DomainMirrorFactory, DomainRegistry};
