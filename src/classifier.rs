// Copyright 2025 Cowboy AI, LLC.

//! Type classification
//!
//! Maps the marker capabilities of a type onto exactly one [`DomainType`].
//! A type may carry several markers (an aggregate root is also an entity);
//! the first tag in precedence order wins.
//!
//! ```mermaid
//! graph LR
//!     AR[AggregateRoot] --> E[Entity] --> VO[ValueObject] --> EN[Enum] --> ID[Identity]
//!     ID --> DS[DomainService] --> R[Repository] --> EV[DomainEvent] --> C[DomainCommand]
//!     C --> RM[ReadModel] --> AS[ApplicationService] --> QH[QueryHandler]
//!     QH --> OS[OutboundService] --> SK[ServiceKind] --> ND[NonDomain]
//! ```

use std::collections::BTreeSet;

use crate::descriptor::{Capability, DescriptorTable};
use crate::domain_type::DomainType;

/// Capability behind each tag, in precedence order
const PRECEDENCE: [(Capability, DomainType); 14] = [
    (Capability::AggregateRoot, DomainType::AggregateRoot),
    (Capability::Entity, DomainType::Entity),
    (Capability::ValueObject, DomainType::ValueObject),
    (Capability::Enum, DomainType::Enum),
    (Capability::Identity, DomainType::Identity),
    (Capability::DomainService, DomainType::DomainService),
    (Capability::Repository, DomainType::Repository),
    (Capability::DomainEvent, DomainType::DomainEvent),
    (Capability::DomainCommand, DomainType::DomainCommand),
    (Capability::ReadModel, DomainType::ReadModel),
    (Capability::ApplicationService, DomainType::ApplicationService),
    (Capability::QueryHandler, DomainType::QueryHandler),
    (Capability::OutboundService, DomainType::OutboundService),
    (Capability::ServiceKind, DomainType::ServiceKind),
];

/// Classify a capability set
pub fn classify(capabilities: &BTreeSet<Capability>) -> DomainType {
    PRECEDENCE
        .iter()
        .find(|(capability, _)| capabilities.contains(capability))
        .map(|(_, domain_type)| *domain_type)
        .unwrap_or(DomainType::NonDomain)
}

/// Classifies type names against a descriptor table
///
/// Capabilities are inherited: a class extending an aggregate-root base, or
/// implementing an interface that extends the entity marker, is classified
/// through its supertypes. Names missing from the table are `NonDomain`.
#[derive(Debug, Clone, Copy)]
pub struct TypeClassifier<'t> {
    table: &'t DescriptorTable,
}

impl<'t> TypeClassifier<'t> {
    /// Create a classifier over `table`
    pub fn new(table: &'t DescriptorTable) -> Self {
        Self { table }
    }

    /// Classify one type name
    pub fn classify(&self, type_name: &str) -> DomainType {
        if !self.table.contains(type_name) {
            return DomainType::NonDomain;
        }
        classify(&self.table.capabilities_of(type_name))
    }

    /// The table being classified against
    pub fn table(&self) -> &'t DescriptorTable {
        self.table
    }
}
