// Copyright 2025 Cowboy AI, LLC.

//! Bounded context partitioning by package prefix
//!
//! A bounded context is nothing but a package prefix paired with the model.
//! Every accessor re-scans the model, so results always reflect its current
//! contents.

use std::fmt;

use super::{
    AggregateRootMirror, ApplicationServiceMirror, DomainCommandMirror, DomainEventMirror,
    DomainModel, DomainServiceMirror, EntityMirror, EnumMirror, IdentityMirror, MirrorView,
    OutboundServiceMirror, QueryHandlerMirror, ReadModelMirror, RepositoryMirror,
    ServiceKindMirror, TypeMirror, TypeMirrorRef, ValueObjectMirror,
};
use crate::domain_type::DomainType;

/// Mirrors of `domain_type` whose type name starts with `package_prefix`
pub fn filter<'m>(
    model: &'m DomainModel,
    package_prefix: &str,
    domain_type: DomainType,
) -> Vec<TypeMirrorRef<'m>> {
    model
        .type_mirrors()
        .filter(|m| {
            m.mirror().domain_type() == domain_type
                && m.mirror().type_name.starts_with(package_prefix)
        })
        .collect()
}

/// Live view of the mirrors under one package prefix
#[derive(Clone, Copy)]
pub struct BoundedContextMirror<'m> {
    model: &'m DomainModel,
    package_name: &'m str,
}

impl<'m> BoundedContextMirror<'m> {
    /// Pair a package prefix with the model
    pub fn new(model: &'m DomainModel, package_name: &'m str) -> Self {
        Self { model, package_name }
    }

    /// Package prefix of this context
    pub fn package_name(&self) -> &'m str {
        self.package_name
    }

    /// Model the context belongs to
    pub fn model(&self) -> &'m DomainModel {
        self.model
    }

    /// Type name falls under this context's package
    pub fn contains(&self, type_name: &str) -> bool {
        type_name.starts_with(self.package_name)
    }

    /// Every mirror in this context, in model order
    pub fn all_type_mirrors(&self) -> Vec<TypeMirrorRef<'m>> {
        self.model
            .type_mirrors()
            .filter(|m| self.contains(&m.mirror().type_name))
            .collect()
    }

    /// Typed views of one variant in this context
    pub fn views<V: MirrorView<'m> + 'm>(&self) -> Vec<V> {
        self.model
            .views::<V>()
            .filter(|v| self.contains(&v.mirror().type_name))
            .collect()
    }

    /// Aggregate roots
    pub fn aggregate_roots(&self) -> Vec<AggregateRootMirror<'m>> {
        self.views()
    }

    /// Entities
    pub fn entities(&self) -> Vec<EntityMirror<'m>> {
        self.views()
    }

    /// Value objects
    pub fn value_objects(&self) -> Vec<ValueObjectMirror<'m>> {
        self.views()
    }

    /// Identities
    pub fn identities(&self) -> Vec<IdentityMirror<'m>> {
        self.views()
    }

    /// Enums
    pub fn enums(&self) -> Vec<EnumMirror<'m>> {
        self.views()
    }

    /// Domain events
    pub fn domain_events(&self) -> Vec<DomainEventMirror<'m>> {
        self.views()
    }

    /// Domain commands
    pub fn domain_commands(&self) -> Vec<DomainCommandMirror<'m>> {
        self.views()
    }

    /// Domain services
    pub fn domain_services(&self) -> Vec<DomainServiceMirror<'m>> {
        self.views()
    }

    /// Repositories
    pub fn repositories(&self) -> Vec<RepositoryMirror<'m>> {
        self.views()
    }

    /// Read models
    pub fn read_models(&self) -> Vec<ReadModelMirror<'m>> {
        self.views()
    }

    /// Application services
    pub fn application_services(&self) -> Vec<ApplicationServiceMirror<'m>> {
        self.views()
    }

    /// Generic service kinds
    pub fn service_kinds(&self) -> Vec<ServiceKindMirror<'m>> {
        self.views()
    }

    /// Query handlers
    pub fn query_handlers(&self) -> Vec<QueryHandlerMirror<'m>> {
        self.views()
    }

    /// Outbound services
    pub fn outbound_services(&self) -> Vec<OutboundServiceMirror<'m>> {
        self.views()
    }
}

impl PartialEq for BoundedContextMirror<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.package_name == other.package_name
    }
}

impl Eq for BoundedContextMirror<'_> {}

impl fmt::Debug for BoundedContextMirror<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedContextMirror")
            .field("package_name", &self.package_name)
            .finish()
    }
}
