// Copyright 2025 Cowboy AI, LLC.

//! Mirror data types
//!
//! Plain, serializable metadata describing introspected types. Mirrors hold
//! cross-references by type name only; [`crate::model::DomainModel`] turns
//! those names into linked views.

pub mod assertion;
pub mod containable;
pub mod field;
pub mod generic_type;
pub mod method;
pub mod type_mirror;

pub use assertion::{AssertionMirror, AssertionType};
pub use containable::{AssertedContainableTypeMirror, ContainerKind};
pub use field::{AccessLevel, FieldKind, FieldMirror};
pub use generic_type::{
    ResolvedGenericTypeMirror, WildcardBoundType, WildcardMirror, OBJECT_TYPE_NAME,
};
pub use method::{MethodMirror, ParamMirror};
pub use type_mirror::{
    CommandPayload, DomainTypeMirror, EntityPayload, EnumPayload, MirrorKind,
    QueryHandlerPayload, RepositoryPayload, ServiceReferences,
};
