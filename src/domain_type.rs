// Copyright 2025 Cowboy AI, LLC.

//! Domain type tags assigned to every introspected type

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The classification tag of an introspected type
///
/// Every type handed to the classifier receives exactly one tag.
/// `NonDomain` is the catch-all for types carrying no marker capability.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainType {
    /// Aggregate root (consistency boundary, also an entity)
    AggregateRoot,
    /// Entity (has identity)
    Entity,
    /// Immutable value object
    ValueObject,
    /// Identity value of an entity
    Identity,
    /// Enumeration used as a value
    Enum,
    /// Domain event
    DomainEvent,
    /// Domain command
    DomainCommand,
    /// Domain service
    DomainService,
    /// Repository managing one aggregate
    Repository,
    /// Read model returned by query handlers
    ReadModel,
    /// Application service
    ApplicationService,
    /// Generic service kind
    ServiceKind,
    /// Query handler (query client)
    QueryHandler,
    /// Outbound service
    OutboundService,
    /// Not a domain type
    NonDomain,
}

impl DomainType {
    /// All tags in classification precedence order
    pub const ALL: [DomainType; 15] = [
        DomainType::AggregateRoot,
        DomainType::Entity,
        DomainType::ValueObject,
        DomainType::Enum,
        DomainType::Identity,
        DomainType::DomainService,
        DomainType::Repository,
        DomainType::DomainEvent,
        DomainType::DomainCommand,
        DomainType::ReadModel,
        DomainType::ApplicationService,
        DomainType::QueryHandler,
        DomainType::OutboundService,
        DomainType::ServiceKind,
        DomainType::NonDomain,
    ];

    /// Domain objects live inside aggregates and have containment structure
    pub fn is_domain_object(&self) -> bool {
        matches!(
            self,
            DomainType::AggregateRoot
                | DomainType::Entity
                | DomainType::ValueObject
                | DomainType::Identity
                | DomainType::Enum
        )
    }

    /// Value-like types are referenced by value (ValueObject, Identity, Enum)
    pub fn is_value_like(&self) -> bool {
        matches!(
            self,
            DomainType::ValueObject | DomainType::Identity | DomainType::Enum
        )
    }

    /// Entity-like types carry an identity (Entity, AggregateRoot)
    pub fn is_entity_like(&self) -> bool {
        matches!(self, DomainType::Entity | DomainType::AggregateRoot)
    }

    /// Service kinds answer publish/listen/process queries over their own methods only
    pub fn is_service_kind(&self) -> bool {
        matches!(
            self,
            DomainType::DomainService
                | DomainType::Repository
                | DomainType::ApplicationService
                | DomainType::ServiceKind
                | DomainType::QueryHandler
                | DomainType::OutboundService
        )
    }

    /// Events and commands
    pub fn is_message(&self) -> bool {
        matches!(self, DomainType::DomainEvent | DomainType::DomainCommand)
    }

    /// Get a human-readable name for this domain type
    pub fn display_name(&self) -> &'static str {
        match self {
            DomainType::AggregateRoot => "Aggregate Root",
            DomainType::Entity => "Entity",
            DomainType::ValueObject => "Value Object",
            DomainType::Identity => "Identity",
            DomainType::Enum => "Enum",
            DomainType::DomainEvent => "Domain Event",
            DomainType::DomainCommand => "Domain Command",
            DomainType::DomainService => "Domain Service",
            DomainType::Repository => "Repository",
            DomainType::ReadModel => "Read Model",
            DomainType::ApplicationService => "Application Service",
            DomainType::ServiceKind => "Service Kind",
            DomainType::QueryHandler => "Query Handler",
            DomainType::OutboundService => "Outbound Service",
            DomainType::NonDomain => "Non Domain",
        }
    }
}

impl fmt::Display for DomainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
