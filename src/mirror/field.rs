// Copyright 2025 Cowboy AI, LLC.

//! Field mirrors and their structural classification

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::containable::AssertedContainableTypeMirror;
use crate::domain_type::DomainType;

/// Declared visibility of a field or method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessLevel {
    /// Visible everywhere
    Public,
    /// Visible to subclasses and the package
    Protected,
    /// Visible to the declaring type only
    #[default]
    Private,
    /// Visible within the package
    Package,
}

/// Structural category of a field, decided by its element's domain type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    /// Anything that is not a domain object
    Basic,
    /// ValueObject, Identity or Enum
    ValueReference,
    /// Entity
    EntityReference,
    /// AggregateRoot
    AggregateRootReference,
}

impl FieldKind {
    /// Categorise a domain type
    pub fn of(domain_type: DomainType) -> Self {
        match domain_type {
            DomainType::ValueObject | DomainType::Identity | DomainType::Enum => {
                FieldKind::ValueReference
            }
            DomainType::Entity => FieldKind::EntityReference,
            DomainType::AggregateRoot => FieldKind::AggregateRootReference,
            _ => FieldKind::Basic,
        }
    }
}

/// Mirror of a single field (own or inherited) of a domain type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FieldMirror {
    /// Field name
    pub name: String,
    /// Field type with container shape
    #[serde(rename = "type")]
    pub field_type: AssertedContainableTypeMirror,
    /// Type declaring the field (a supertype for inherited fields)
    pub declared_by_type_name: String,
    /// Declared visibility
    pub access_level: AccessLevel,
    /// Not final
    pub modifiable: bool,
    /// Public field or public getter
    pub public_readable: bool,
    /// Public non-final field or public setter
    pub public_writeable: bool,
    /// Identity field of its entity
    #[serde(default)]
    pub is_identity_field: bool,
    /// Static field
    #[serde(default)]
    pub is_static: bool,
    /// Shadowed by a field of the same name in a subclass
    #[serde(default)]
    pub is_hidden: bool,
}

impl FieldMirror {
    /// Structural category of this field
    pub fn kind(&self) -> FieldKind {
        FieldKind::of(self.field_type.domain_type)
    }

    /// Element type name
    pub fn type_name(&self) -> &str {
        &self.field_type.type_name
    }

    /// Element domain type
    pub fn domain_type(&self) -> DomainType {
        self.field_type.domain_type
    }

    /// Basic (non-domain) field
    pub fn is_basic(&self) -> bool {
        self.kind() == FieldKind::Basic
    }

    /// Reference to a value-like type
    pub fn is_value_reference(&self) -> bool {
        self.kind() == FieldKind::ValueReference
    }

    /// Reference to an entity
    pub fn is_entity_reference(&self) -> bool {
        self.kind() == FieldKind::EntityReference
    }

    /// Reference to an aggregate root
    pub fn is_aggregate_root_reference(&self) -> bool {
        self.kind() == FieldKind::AggregateRootReference
    }

    /// Candidate for an exposed value: readable from outside and per instance
    pub fn is_exposed(&self) -> bool {
        self.public_readable && !self.is_static
    }
}
