// Copyright 2025 Cowboy AI, LLC.

//! Container-aware type descriptions

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::assertion::AssertionMirror;
use super::generic_type::ResolvedGenericTypeMirror;
use crate::domain_type::DomainType;

/// Container shape wrapping the element type (inside an optional Optional)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContainerKind {
    /// Bare element
    #[default]
    None,
    /// Ordered collection
    List,
    /// Set collection
    Set,
    /// Collection that is neither list nor set
    Collection,
    /// Stream
    Stream,
    /// Array
    Array,
}

impl ContainerKind {
    /// List, set and plain collections
    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            ContainerKind::List | ContainerKind::Set | ContainerKind::Collection
        )
    }

    /// Any multi-valued container
    pub fn is_multi_valued(&self) -> bool {
        !matches!(self, ContainerKind::None)
    }
}

/// A possibly container-wrapped type with its declared assertions
///
/// `type_name` and `domain_type` describe the contained element, never the
/// container. `Optional` may wrap any other container; the other container
/// kinds are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssertedContainableTypeMirror {
    /// Element type name
    pub type_name: String,
    /// Classification of the element type
    pub domain_type: DomainType,
    /// Assertions on the element
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assertions: Vec<AssertionMirror>,
    /// Wrapped in an Optional
    #[serde(default)]
    pub has_optional_container: bool,
    /// Collection, stream or array container
    #[serde(default)]
    pub container: ContainerKind,
    /// Raw name of the container (`java.util.List`), `None` for bare elements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container_type_name: Option<String>,
    /// Assertions on the container itself
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub container_assertions: Vec<AssertionMirror>,
    /// The declared type, fully resolved
    pub resolved_generic_type: ResolvedGenericTypeMirror,
}

impl AssertedContainableTypeMirror {
    /// A bare, unasserted element type
    pub fn simple(type_name: impl Into<String>, domain_type: DomainType) -> Self {
        let type_name = type_name.into();
        Self {
            resolved_generic_type: ResolvedGenericTypeMirror::simple(type_name.clone()),
            type_name,
            domain_type,
            assertions: Vec::new(),
            has_optional_container: false,
            container: ContainerKind::None,
            container_type_name: None,
            container_assertions: Vec::new(),
        }
    }

    /// Wrapped in list, set or plain collection
    pub fn has_collection_container(&self) -> bool {
        self.container.is_collection()
    }

    /// Wrapped in a list
    pub fn has_list_container(&self) -> bool {
        self.container == ContainerKind::List
    }

    /// Wrapped in a set
    pub fn has_set_container(&self) -> bool {
        self.container == ContainerKind::Set
    }

    /// Wrapped in a stream
    pub fn has_stream_container(&self) -> bool {
        self.container == ContainerKind::Stream
    }

    /// Array of the element type
    pub fn is_array(&self) -> bool {
        self.container == ContainerKind::Array
    }

    /// Element may be absent (Optional) or the value is multi-valued
    pub fn is_container(&self) -> bool {
        self.has_optional_container || self.container.is_multi_valued()
    }
}
