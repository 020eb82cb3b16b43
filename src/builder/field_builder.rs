// Copyright 2025 Cowboy AI, LLC.

//! Field mirror construction, including inherited and shadowed fields

use std::collections::HashSet;

use super::hierarchy_root_first;
use super::type_builder::ContainableTypeBuilder;
use crate::config::MirrorConfig;
use crate::descriptor::{DescriptorTable, FieldDescriptor, MethodDescriptor, TypeDescriptor};
use crate::mirror::{AccessLevel, FieldMirror};

/// Builds the `all_fields` list of a type
#[derive(Debug, Clone, Copy)]
pub struct FieldMirrorBuilder<'t> {
    table: &'t DescriptorTable,
    config: &'t MirrorConfig,
    types: ContainableTypeBuilder<'t>,
}

impl<'t> FieldMirrorBuilder<'t> {
    /// Create a field builder
    pub fn new(table: &'t DescriptorTable, config: &'t MirrorConfig) -> Self {
        Self {
            table,
            config,
            types: ContainableTypeBuilder::new(table, &config.containers),
        }
    }

    /// Own and inherited fields of `descriptor`, root-most supertype first
    ///
    /// A field redeclared further down the hierarchy keeps its supertype entry,
    /// flagged as hidden.
    pub fn build_all(&self, descriptor: &TypeDescriptor) -> Vec<FieldMirror> {
        let owners = hierarchy_root_first(self.table, descriptor);
        let accessors: Vec<&MethodDescriptor> = owners
            .iter()
            .flat_map(|owner| owner.methods.iter())
            .chain(
                self.table
                    .all_interfaces(&descriptor.type_name)
                    .iter()
                    .filter_map(|name| self.table.get(name))
                    .flat_map(|interface| interface.methods.iter()),
            )
            .collect();

        let mut fields = Vec::new();
        for (depth, owner) in owners.iter().enumerate() {
            let shadowing: HashSet<&str> = owners[depth + 1..]
                .iter()
                .flat_map(|nearer| nearer.fields.iter().map(|f| f.name.as_str()))
                .collect();
            for field in &owner.fields {
                let mut mirror = self.build(owner, field, &accessors);
                mirror.is_hidden = shadowing.contains(field.name.as_str());
                fields.push(mirror);
            }
        }
        fields
    }

    /// Build a single field declared by `owner`
    pub fn build(
        &self,
        owner: &TypeDescriptor,
        field: &FieldDescriptor,
        accessors: &[&MethodDescriptor],
    ) -> FieldMirror {
        let is_public = field.access_level == AccessLevel::Public;
        FieldMirror {
            name: field.name.clone(),
            field_type: self.types.build(
                &field.type_ref,
                &field.assertions,
                &field.container_assertions,
            ),
            declared_by_type_name: owner.type_name.clone(),
            access_level: field.access_level,
            modifiable: !field.is_final,
            public_readable: is_public || self.has_getter(accessors, &field.name),
            public_writeable: (is_public && !field.is_final)
                || self.has_setter(accessors, &field.name),
            is_identity_field: false,
            is_static: field.is_static,
            is_hidden: false,
        }
    }

    fn has_getter(&self, accessors: &[&MethodDescriptor], field_name: &str) -> bool {
        accessors.iter().any(|m| {
            self.is_public_instance(m)
                && m.parameters.is_empty()
                && m.return_type.is_some()
                && self.config.is_getter_name(&m.name)
                && self.config.accessor_property(&m.name).as_deref() == Some(field_name)
        })
    }

    fn has_setter(&self, accessors: &[&MethodDescriptor], field_name: &str) -> bool {
        accessors.iter().any(|m| {
            self.is_public_instance(m)
                && m.parameters.len() == 1
                && m.return_type.is_none()
                && self.config.is_setter_name(&m.name)
                && self.config.accessor_property(&m.name).as_deref() == Some(field_name)
        })
    }

    fn is_public_instance(&self, method: &MethodDescriptor) -> bool {
        method.access_level == AccessLevel::Public && !method.is_static
    }
}
