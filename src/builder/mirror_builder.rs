// Copyright 2025 Cowboy AI, LLC.

//! Domain type mirror construction and the descriptor-backed factory

use indexmap::IndexMap;
use tracing::{debug, info};

use super::field_builder::FieldMirrorBuilder;
use super::method_builder::MethodMirrorBuilder;
use crate::classifier::TypeClassifier;
use crate::config::MirrorConfig;
use crate::descriptor::{DescriptorTable, TypeDescriptor};
use crate::domain_type::DomainType;
use crate::errors::{MirrorError, MirrorResult};
use crate::mirror::{
    CommandPayload, DomainTypeMirror, EntityPayload, EnumPayload, FieldMirror, MirrorKind,
    QueryHandlerPayload, RepositoryPayload, ServiceReferences,
};
use crate::registry::DomainMirrorFactory;

/// Builds one [`DomainTypeMirror`] per classified descriptor
#[derive(Debug, Clone, Copy)]
pub struct DomainTypeMirrorBuilder<'t> {
    table: &'t DescriptorTable,
    classifier: TypeClassifier<'t>,
    fields: FieldMirrorBuilder<'t>,
    methods: MethodMirrorBuilder<'t>,
}

impl<'t> DomainTypeMirrorBuilder<'t> {
    /// Create a builder over `table`
    pub fn new(table: &'t DescriptorTable, config: &'t MirrorConfig) -> Self {
        Self {
            table,
            classifier: TypeClassifier::new(table),
            fields: FieldMirrorBuilder::new(table, config),
            methods: MethodMirrorBuilder::new(table, config),
        }
    }

    /// Build the mirror of `type_name`; `None` for non-domain types
    pub fn build(&self, type_name: &str) -> MirrorResult<Option<DomainTypeMirror>> {
        let descriptor = self.table.get(type_name).ok_or_else(|| {
            MirrorError::InvalidDescriptor(format!("no descriptor for {type_name}"))
        })?;
        let domain_type = self.classifier.classify(type_name);
        if domain_type == DomainType::NonDomain {
            return Ok(None);
        }

        let mut all_fields = self.fields.build_all(descriptor);
        let Some(kind) = self.kind_for(domain_type, descriptor, &mut all_fields) else {
            return Ok(None);
        };

        let mirror = DomainTypeMirror {
            type_name: descriptor.type_name.clone(),
            is_abstract: descriptor.is_abstract,
            all_fields,
            methods: self.methods.build_all(descriptor),
            inheritance_hierarchy_type_names: self.table.superclass_chain(type_name),
            all_interface_type_names: self.table.all_interfaces(type_name),
            kind,
        };
        debug!(
            type_name = %mirror.type_name,
            domain_type = %domain_type,
            fields = mirror.all_fields.len(),
            methods = mirror.methods.len(),
            "Built type mirror"
        );
        Ok(Some(mirror))
    }

    /// Build mirrors for every classified descriptor in the table
    pub fn build_all(&self) -> MirrorResult<IndexMap<String, DomainTypeMirror>> {
        let mut mirrors = IndexMap::new();
        for descriptor in self.table.iter() {
            if let Some(mirror) = self.build(&descriptor.type_name)? {
                mirrors.insert(mirror.type_name.clone(), mirror);
            }
        }
        Ok(mirrors)
    }

    fn kind_for(
        &self,
        domain_type: DomainType,
        descriptor: &TypeDescriptor,
        fields: &mut [FieldMirror],
    ) -> Option<MirrorKind> {
        let kind = match domain_type {
            DomainType::AggregateRoot => {
                MirrorKind::AggregateRoot(self.entity_payload(descriptor, fields))
            }
            DomainType::Entity => MirrorKind::Entity(self.entity_payload(descriptor, fields)),
            DomainType::ValueObject => MirrorKind::ValueObject,
            DomainType::Identity => MirrorKind::Identity,
            DomainType::Enum => MirrorKind::Enum(EnumPayload {
                enum_values: descriptor.enum_constants.clone(),
            }),
            DomainType::DomainEvent => MirrorKind::DomainEvent,
            DomainType::ReadModel => MirrorKind::ReadModel,
            DomainType::DomainCommand => MirrorKind::DomainCommand(CommandPayload {
                aggregate_target_identity_type_name: self
                    .inherited(descriptor, |d| d.aggregate_target_identity_type_name.as_ref()),
                domain_service_target_type_name: self
                    .inherited(descriptor, |d| d.domain_service_target_type_name.as_ref()),
            }),
            DomainType::DomainService => MirrorKind::DomainService(service_references(fields)),
            DomainType::ApplicationService => {
                MirrorKind::ApplicationService(service_references(fields))
            }
            DomainType::ServiceKind => MirrorKind::ServiceKind(service_references(fields)),
            DomainType::OutboundService => MirrorKind::OutboundService(service_references(fields)),
            DomainType::Repository => MirrorKind::Repository(RepositoryPayload {
                managed_aggregate_type_name: self
                    .inherited(descriptor, |d| d.managed_aggregate_type_name.as_ref()),
                references: service_references(fields),
            }),
            DomainType::QueryHandler => MirrorKind::QueryHandler(QueryHandlerPayload {
                provided_read_model_type_name: self
                    .inherited(descriptor, |d| d.provided_read_model_type_name.as_ref()),
                references: service_references(fields),
            }),
            DomainType::NonDomain => return None,
        };
        Some(kind)
    }

    fn entity_payload(
        &self,
        descriptor: &TypeDescriptor,
        fields: &mut [FieldMirror],
    ) -> EntityPayload {
        let identity_type_name = self.inherited(descriptor, |d| d.identity_type_name.as_ref());

        let identity_candidates: Vec<usize> = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| {
                f.is_exposed()
                    && !f.is_hidden
                    && f.domain_type() == DomainType::Identity
                    && !f.field_type.container.is_multi_valued()
                    && identity_type_name
                        .as_deref()
                        .map_or(true, |declared| f.type_name() == declared)
            })
            .map(|(i, _)| i)
            .collect();
        let identity_field_name = match identity_candidates.as_slice() {
            [only] => {
                fields[*only].is_identity_field = true;
                Some(fields[*only].name.clone())
            }
            _ => None,
        };

        let concurrency_version_field_name = self.concurrency_version_field(descriptor);

        EntityPayload {
            identity_field_name,
            concurrency_version_field_name,
            identity_type_name,
        }
    }

    fn concurrency_version_field(&self, descriptor: &TypeDescriptor) -> Option<String> {
        let owners = super::hierarchy_root_first(self.table, descriptor);
        let mut marked = owners
            .iter()
            .flat_map(|owner| owner.fields.iter())
            .filter(|f| f.concurrency_version);
        match (marked.next(), marked.next()) {
            (Some(only), None) => Some(only.name.clone()),
            _ => None,
        }
    }

    /// First value declared along the superclass chain, starting at `descriptor`
    fn inherited(
        &self,
        descriptor: &TypeDescriptor,
        select: impl Fn(&TypeDescriptor) -> Option<&String>,
    ) -> Option<String> {
        if let Some(value) = select(descriptor) {
            return Some(value.clone());
        }
        self.table
            .superclass_chain(&descriptor.type_name)
            .iter()
            .filter_map(|name| self.table.get(name))
            .find_map(|d| select(d).cloned())
    }
}

fn service_references(fields: &[FieldMirror]) -> ServiceReferences {
    let mut references = ServiceReferences::default();
    for field in fields.iter().filter(|f| !f.is_static) {
        references.record(field.domain_type(), field.type_name());
    }
    references
}

/// [`DomainMirrorFactory`] building mirrors from a descriptor table
#[derive(Debug, Clone, Default)]
pub struct DescriptorMirrorFactory {
    table: DescriptorTable,
    bounded_context_packages: Vec<String>,
    config: MirrorConfig,
}

impl DescriptorMirrorFactory {
    /// Create a factory over `table` with default configuration
    pub fn new<I, S>(table: DescriptorTable, bounded_context_packages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table,
            bounded_context_packages: bounded_context_packages
                .into_iter()
                .map(Into::into)
                .collect(),
            config: MirrorConfig::default(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: MirrorConfig) -> Self {
        self.config = config;
        self
    }

    /// The descriptor table
    pub fn table(&self) -> &DescriptorTable {
        &self.table
    }

    /// The configuration used for building
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }
}

impl DomainMirrorFactory for DescriptorMirrorFactory {
    fn type_mirrors(&self) -> MirrorResult<IndexMap<String, DomainTypeMirror>> {
        let mirrors = DomainTypeMirrorBuilder::new(&self.table, &self.config).build_all()?;
        info!(
            descriptors = self.table.len(),
            mirrors = mirrors.len(),
            "Built domain type mirrors from descriptors"
        );
        Ok(mirrors)
    }

    fn bounded_context_packages(&self) -> Vec<String> {
        self.bounded_context_packages.clone()
    }
}
