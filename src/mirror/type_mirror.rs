// Copyright 2025 Cowboy AI, LLC.

//! Domain type mirror nodes
//!
//! A [`DomainTypeMirror`] carries the structure shared by every variant
//! (fields, methods, hierarchy) plus a [`MirrorKind`] payload holding the
//! variant-specific, by-name references. Nothing here needs the assembled
//! graph; queries that dereference names live on the linked views in
//! [`crate::model`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::field::FieldMirror;
use super::method::MethodMirror;
use crate::config::CommandMatching;
use crate::domain_type::DomainType;

/// Identity and concurrency metadata of entities and aggregate roots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityPayload {
    /// Name of the unambiguous identity field, if one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_field_name: Option<String>,
    /// Name of the concurrency version field, if one was found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concurrency_version_field_name: Option<String>,
    /// Identity type the entity declares, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity_type_name: Option<String>,
}

/// Constants of an enum
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct EnumPayload {
    /// Constant names in declaration order
    pub enum_values: Vec<String>,
}

/// Declared targets of a command
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct CommandPayload {
    /// Identity type of the aggregate the command is addressed to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregate_target_identity_type_name: Option<String>,
    /// Domain service the command is addressed to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_service_target_type_name: Option<String>,
}

/// Names of the service kinds a service holds references to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceReferences {
    /// Referenced repositories
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_repository_type_names: Vec<String>,
    /// Referenced domain services
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_domain_service_type_names: Vec<String>,
    /// Referenced outbound services
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_outbound_service_type_names: Vec<String>,
    /// Referenced query handlers
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_query_handler_type_names: Vec<String>,
    /// Referenced application services
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_application_service_type_names: Vec<String>,
    /// Referenced generic service kinds
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub referenced_service_kind_type_names: Vec<String>,
}

impl ServiceReferences {
    /// Stored names for one referenced domain type
    pub fn type_names_for(&self, domain_type: DomainType) -> &[String] {
        match domain_type {
            DomainType::Repository => &self.referenced_repository_type_names,
            DomainType::DomainService => &self.referenced_domain_service_type_names,
            DomainType::OutboundService => &self.referenced_outbound_service_type_names,
            DomainType::QueryHandler => &self.referenced_query_handler_type_names,
            DomainType::ApplicationService => &self.referenced_application_service_type_names,
            DomainType::ServiceKind => &self.referenced_service_kind_type_names,
            _ => &[],
        }
    }

    /// Record a referenced name under its domain type; non-service types are ignored
    pub fn record(&mut self, domain_type: DomainType, type_name: &str) {
        let names = match domain_type {
            DomainType::Repository => &mut self.referenced_repository_type_names,
            DomainType::DomainService => &mut self.referenced_domain_service_type_names,
            DomainType::OutboundService => &mut self.referenced_outbound_service_type_names,
            DomainType::QueryHandler => &mut self.referenced_query_handler_type_names,
            DomainType::ApplicationService => {
                &mut self.referenced_application_service_type_names
            }
            DomainType::ServiceKind => &mut self.referenced_service_kind_type_names,
            _ => return,
        };
        if !names.iter().any(|n| n == type_name) {
            names.push(type_name.to_string());
        }
    }

    /// No references at all
    pub fn is_empty(&self) -> bool {
        self.referenced_repository_type_names.is_empty()
            && self.referenced_domain_service_type_names.is_empty()
            && self.referenced_outbound_service_type_names.is_empty()
            && self.referenced_query_handler_type_names.is_empty()
            && self.referenced_application_service_type_names.is_empty()
            && self.referenced_service_kind_type_names.is_empty()
    }
}

/// Repository metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RepositoryPayload {
    /// Aggregate root the repository manages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_aggregate_type_name: Option<String>,
    /// Services the repository references
    pub references: ServiceReferences,
}

/// Query handler metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryHandlerPayload {
    /// Read model the handler provides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provided_read_model_type_name: Option<String>,
    /// Services the handler references
    pub references: ServiceReferences,
}

/// Variant tag and payload of a domain type mirror
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "mirrorType")]
pub enum MirrorKind {
    /// Aggregate root
    #[serde(rename = "AggregateRootMirror")]
    AggregateRoot(EntityPayload),
    /// Entity
    #[serde(rename = "EntityMirror")]
    Entity(EntityPayload),
    /// Value object
    #[serde(rename = "ValueObjectMirror")]
    ValueObject,
    /// Identity
    #[serde(rename = "IdentityMirror")]
    Identity,
    /// Enum
    #[serde(rename = "EnumMirror")]
    Enum(EnumPayload),
    /// Domain event
    #[serde(rename = "DomainEventMirror")]
    DomainEvent,
    /// Domain command
    #[serde(rename = "DomainCommandMirror")]
    DomainCommand(CommandPayload),
    /// Domain service
    #[serde(rename = "DomainServiceMirror")]
    DomainService(ServiceReferences),
    /// Repository
    #[serde(rename = "RepositoryMirror")]
    Repository(RepositoryPayload),
    /// Read model
    #[serde(rename = "ReadModelMirror")]
    ReadModel,
    /// Application service
    #[serde(rename = "ApplicationServiceMirror")]
    ApplicationService(ServiceReferences),
    /// Generic service kind
    #[serde(rename = "ServiceKindMirror")]
    ServiceKind(ServiceReferences),
    /// Query handler
    #[serde(rename = "QueryHandlerMirror")]
    QueryHandler(QueryHandlerPayload),
    /// Outbound service
    #[serde(rename = "OutboundServiceMirror")]
    OutboundService(ServiceReferences),
}

impl MirrorKind {
    /// Domain type of this variant
    pub fn domain_type(&self) -> DomainType {
        match self {
            MirrorKind::AggregateRoot(_) => DomainType::AggregateRoot,
            MirrorKind::Entity(_) => DomainType::Entity,
            MirrorKind::ValueObject => DomainType::ValueObject,
            MirrorKind::Identity => DomainType::Identity,
            MirrorKind::Enum(_) => DomainType::Enum,
            MirrorKind::DomainEvent => DomainType::DomainEvent,
            MirrorKind::DomainCommand(_) => DomainType::DomainCommand,
            MirrorKind::DomainService(_) => DomainType::DomainService,
            MirrorKind::Repository(_) => DomainType::Repository,
            MirrorKind::ReadModel => DomainType::ReadModel,
            MirrorKind::ApplicationService(_) => DomainType::ApplicationService,
            MirrorKind::ServiceKind(_) => DomainType::ServiceKind,
            MirrorKind::QueryHandler(_) => DomainType::QueryHandler,
            MirrorKind::OutboundService(_) => DomainType::OutboundService,
        }
    }

    /// Entity payload of entities and aggregate roots
    pub fn entity_payload(&self) -> Option<&EntityPayload> {
        match self {
            MirrorKind::AggregateRoot(payload) | MirrorKind::Entity(payload) => Some(payload),
            _ => None,
        }
    }

    /// References held by any service kind
    pub fn service_references(&self) -> Option<&ServiceReferences> {
        match self {
            MirrorKind::DomainService(references)
            | MirrorKind::ApplicationService(references)
            | MirrorKind::ServiceKind(references)
            | MirrorKind::OutboundService(references) => Some(references),
            MirrorKind::Repository(payload) => Some(&payload.references),
            MirrorKind::QueryHandler(payload) => Some(&payload.references),
            _ => None,
        }
    }
}

/// Mirror of one domain type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DomainTypeMirror {
    /// Fully-qualified type name, unique across the model
    pub type_name: String,
    /// Abstract type
    #[serde(default)]
    pub is_abstract: bool,
    /// Own and inherited fields, root-most supertype first
    #[serde(default)]
    pub all_fields: Vec<FieldMirror>,
    /// Own and inherited methods
    #[serde(default)]
    pub methods: Vec<MethodMirror>,
    /// Superclass chain, nearest first
    #[serde(default)]
    pub inheritance_hierarchy_type_names: Vec<String>,
    /// Every implemented interface, direct and inherited
    #[serde(default)]
    pub all_interface_type_names: Vec<String>,
    /// Variant payload
    #[serde(flatten)]
    pub kind: MirrorKind,
}

impl DomainTypeMirror {
    /// Create a mirror without fields or methods
    pub fn new(type_name: impl Into<String>, kind: MirrorKind) -> Self {
        Self {
            type_name: type_name.into(),
            is_abstract: false,
            all_fields: Vec::new(),
            methods: Vec::new(),
            inheritance_hierarchy_type_names: Vec::new(),
            all_interface_type_names: Vec::new(),
            kind,
        }
    }

    /// Domain type of this mirror
    pub fn domain_type(&self) -> DomainType {
        self.kind.domain_type()
    }

    /// Type name
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Look up a field by name; the nearest declaration wins over hidden ones
    pub fn field(&self, name: &str) -> Option<&FieldMirror> {
        self.all_fields
            .iter()
            .filter(|f| f.name == name)
            .find(|f| !f.is_hidden)
            .or_else(|| self.all_fields.iter().find(|f| f.name == name))
    }

    /// Methods with the given name
    pub fn methods_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a MethodMirror> + 'a {
        self.methods.iter().filter(move |m| m.name == name)
    }

    /// Identity field of an entity or aggregate root
    pub fn identity_field(&self) -> Option<&FieldMirror> {
        let name = self.kind.entity_payload()?.identity_field_name.as_deref()?;
        self.field(name)
    }

    /// Concurrency version field of an entity or aggregate root
    pub fn concurrency_version_field(&self) -> Option<&FieldMirror> {
        let name = self
            .kind
            .entity_payload()?
            .concurrency_version_field_name
            .as_deref()?;
        self.field(name)
    }

    fn is_identity(&self, field: &FieldMirror) -> bool {
        self.identity_field().is_some_and(|identity| {
            identity.name == field.name
                && identity.declared_by_type_name == field.declared_by_type_name
        })
    }

    fn fields_where(&self, predicate: impl Fn(&FieldMirror) -> bool) -> Vec<&FieldMirror> {
        self.all_fields
            .iter()
            .filter(|f| !self.is_identity(f) && predicate(f))
            .collect()
    }

    /// Fields of non-domain types (identity field excluded)
    pub fn basic_fields(&self) -> Vec<&FieldMirror> {
        self.fields_where(FieldMirror::is_basic)
    }

    /// Fields referencing value objects, identities and enums (identity field excluded)
    pub fn value_references(&self) -> Vec<&FieldMirror> {
        self.fields_where(FieldMirror::is_value_reference)
    }

    /// Fields referencing entities
    pub fn entity_references(&self) -> Vec<&FieldMirror> {
        self.fields_where(FieldMirror::is_entity_reference)
    }

    /// Fields referencing aggregate roots
    pub fn aggregate_root_references(&self) -> Vec<&FieldMirror> {
        self.fields_where(FieldMirror::is_aggregate_root_reference)
    }

    /// Fields exposed per instance (public-readable, non-static), in declaration order
    pub fn exposed_fields(&self) -> Vec<&FieldMirror> {
        self.all_fields
            .iter()
            .filter(|f| f.is_exposed() && !f.is_hidden)
            .collect()
    }

    /// The superclass chain contains `type_name`
    pub fn is_sub_class_of(&self, type_name: &str) -> bool {
        self.inheritance_hierarchy_type_names
            .iter()
            .any(|name| name == type_name)
    }

    /// The interface list contains `type_name`
    pub fn implements(&self, type_name: &str) -> bool {
        self.all_interface_type_names
            .iter()
            .any(|name| name == type_name)
    }

    /// Is `type_name` itself, a subclass of it, or implements it
    pub fn is_assignable_to(&self, type_name: &str) -> bool {
        self.type_name == type_name || self.is_sub_class_of(type_name) || self.implements(type_name)
    }

    /// One of this type's own methods publishes the event
    pub fn own_methods_publish(&self, event_type_name: &str) -> bool {
        self.methods.iter().any(|m| m.publishes_event(event_type_name))
    }

    /// One of this type's own methods listens to the event
    pub fn own_methods_listen_to(&self, event_type_name: &str) -> bool {
        self.methods.iter().any(|m| m.listens_to_event(event_type_name))
    }

    /// One of this type's own methods processes the command
    pub fn own_methods_process(
        &self,
        command: &DomainTypeMirror,
        matching: CommandMatching,
    ) -> bool {
        self.methods.iter().any(|m| {
            m.processes_command(
                &command.type_name,
                &command.inheritance_hierarchy_type_names,
                matching,
            )
        })
    }

    /// Distinct event names declared as published by any method
    pub fn published_event_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.methods.iter().flat_map(|m| m.published_event_type_names.iter()) {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// Distinct event names declared as listened to by any method
    pub fn listened_event_type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self.methods.iter().filter_map(|m| m.listened_event_type_name.as_deref()) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }
}
