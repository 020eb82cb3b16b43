// Copyright 2025 Cowboy AI, LLC.

//! Views over service kinds
//!
//! Services answer publish/listen/process queries from their own methods only.
//! References to other services are stored by name and resolved on demand; a
//! name that does not resolve is reported as a dangling reference.

use super::{AggregateRootMirror, MirrorView, ReadModelMirror, TypeMirror};
use crate::errors::MirrorResult;
use crate::mirror::{
    DomainTypeMirror, MirrorKind, QueryHandlerPayload, RepositoryPayload, ServiceReferences,
};

mirror_view! {
    /// Repository managing one aggregate root
    RepositoryMirror, Repository, shallow
}

mirror_view! {
    /// Domain service
    DomainServiceMirror, DomainService, shallow
}

mirror_view! {
    /// Application service
    ApplicationServiceMirror, ApplicationService, shallow
}

mirror_view! {
    /// Generic service kind
    ServiceKindMirror, ServiceKind, shallow
}

mirror_view! {
    /// Outbound service
    OutboundServiceMirror, OutboundService, shallow
}

mirror_view! {
    /// Query handler providing a read model
    QueryHandlerMirror, QueryHandler, shallow
}

/// References from one service to others
pub trait ServiceMirror<'m>: TypeMirror<'m> {
    /// Stored reference names
    fn service_references(&self) -> Option<&'m ServiceReferences> {
        self.mirror().kind.service_references()
    }

    /// Resolve every stored reference of the view's domain type
    fn referenced<V: MirrorView<'m>>(&self) -> MirrorResult<Vec<V>> {
        let model = self.model();
        let referencing = self.mirror().type_name.as_str();
        self.service_references()
            .map(|references| references.type_names_for(V::DOMAIN_TYPE))
            .unwrap_or_default()
            .iter()
            .map(|name| model.resolve_reference(referencing, name))
            .collect()
    }

    /// Referenced repositories
    fn referenced_repositories(&self) -> MirrorResult<Vec<RepositoryMirror<'m>>> {
        self.referenced()
    }

    /// Referenced domain services
    fn referenced_domain_services(&self) -> MirrorResult<Vec<DomainServiceMirror<'m>>> {
        self.referenced()
    }

    /// Referenced outbound services
    fn referenced_outbound_services(&self) -> MirrorResult<Vec<OutboundServiceMirror<'m>>> {
        self.referenced()
    }

    /// Referenced query handlers
    fn referenced_query_handlers(&self) -> MirrorResult<Vec<QueryHandlerMirror<'m>>> {
        self.referenced()
    }

    /// Referenced application services
    fn referenced_application_services(&self) -> MirrorResult<Vec<ApplicationServiceMirror<'m>>> {
        self.referenced()
    }

    /// Referenced generic service kinds
    fn referenced_service_kinds(&self) -> MirrorResult<Vec<ServiceKindMirror<'m>>> {
        self.referenced()
    }
}

impl<'m> ServiceMirror<'m> for RepositoryMirror<'m> {}
impl<'m> ServiceMirror<'m> for DomainServiceMirror<'m> {}
impl<'m> ServiceMirror<'m> for ApplicationServiceMirror<'m> {}
impl<'m> ServiceMirror<'m> for ServiceKindMirror<'m> {}
impl<'m> ServiceMirror<'m> for OutboundServiceMirror<'m> {}
impl<'m> ServiceMirror<'m> for QueryHandlerMirror<'m> {}

impl<'m> RepositoryMirror<'m> {
    fn payload(&self) -> Option<&'m RepositoryPayload> {
        let mirror: &'m DomainTypeMirror = self.mirror;
        match &mirror.kind {
            MirrorKind::Repository(payload) => Some(payload),
            _ => None,
        }
    }

    /// Declared name of the managed aggregate
    pub fn managed_aggregate_type_name(&self) -> Option<&'m str> {
        self.payload()?.managed_aggregate_type_name.as_deref()
    }

    /// The managed aggregate root; `None` when the name is absent or unregistered
    pub fn managed_aggregate(&self) -> Option<AggregateRootMirror<'m>> {
        let name = self.managed_aggregate_type_name()?;
        self.model.aggregate_root_mirror_for(name).ok()
    }
}

impl<'m> QueryHandlerMirror<'m> {
    fn payload(&self) -> Option<&'m QueryHandlerPayload> {
        let mirror: &'m DomainTypeMirror = self.mirror;
        match &mirror.kind {
            MirrorKind::QueryHandler(payload) => Some(payload),
            _ => None,
        }
    }

    /// Declared name of the provided read model
    pub fn provided_read_model_type_name(&self) -> Option<&'m str> {
        self.payload()?.provided_read_model_type_name.as_deref()
    }

    /// The provided read model; `None` when the name is absent or unregistered
    pub fn provided_read_model(&self) -> Option<ReadModelMirror<'m>> {
        let name = self.provided_read_model_type_name()?;
        self.model.read_model_mirror_for(name).ok()
    }
}
