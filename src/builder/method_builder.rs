// Copyright 2025 Cowboy AI, LLC.

//! Method mirror construction with override detection

use std::collections::HashMap;

use super::type_builder::ContainableTypeBuilder;
use crate::config::MirrorConfig;
use crate::descriptor::{DescriptorTable, MethodDescriptor, TypeDescriptor};
use crate::mirror::{MethodMirror, ParamMirror};

/// Builds the `methods` list of a type
#[derive(Debug, Clone, Copy)]
pub struct MethodMirrorBuilder<'t> {
    table: &'t DescriptorTable,
    config: &'t MirrorConfig,
    types: ContainableTypeBuilder<'t>,
}

type Signature = (String, Vec<String>);

impl<'t> MethodMirrorBuilder<'t> {
    /// Create a method builder
    pub fn new(table: &'t DescriptorTable, config: &'t MirrorConfig) -> Self {
        Self {
            table,
            config,
            types: ContainableTypeBuilder::new(table, &config.containers),
        }
    }

    /// Own and inherited methods of `descriptor`
    ///
    /// Own methods come first, then superclass methods nearest first, then
    /// interface methods. A supertype method whose name and parameter types
    /// match a nearer declaration is dropped and the nearer one is flagged
    /// `overridden`.
    pub fn build_all(&self, descriptor: &TypeDescriptor) -> Vec<MethodMirror> {
        let superclasses = self.table.superclass_chain(&descriptor.type_name);
        let interfaces = self.table.all_interfaces(&descriptor.type_name);
        let owners = std::iter::once(descriptor).chain(
            superclasses
                .iter()
                .chain(interfaces.iter())
                .filter_map(|name| self.table.get(name)),
        );

        let mut methods: Vec<MethodMirror> = Vec::new();
        let mut seen: HashMap<Signature, usize> = HashMap::new();
        for owner in owners {
            for method in &owner.methods {
                let mirror = self.build(owner, method);
                let signature = signature_of(&mirror);
                if let Some(&nearer) = seen.get(&signature) {
                    methods[nearer].overridden = true;
                    continue;
                }
                seen.insert(signature, methods.len());
                methods.push(mirror);
            }
        }
        methods
    }

    /// Build a single method declared by `owner`
    pub fn build(&self, owner: &TypeDescriptor, method: &MethodDescriptor) -> MethodMirror {
        let parameters: Vec<ParamMirror> = method
            .parameters
            .iter()
            .map(|p| ParamMirror {
                name: p.name.clone(),
                param_type: self
                    .types
                    .build(&p.type_ref, &p.assertions, &p.container_assertions),
            })
            .collect();
        let return_type = method
            .return_type
            .as_ref()
            .map(|r| self.types.build(r, &[], &[]));

        let is_getter = self.config.is_getter_name(&method.name)
            && parameters.is_empty()
            && return_type.is_some();
        let is_setter = self.config.is_setter_name(&method.name)
            && parameters.len() == 1
            && return_type.is_none();

        MethodMirror {
            name: method.name.clone(),
            declared_by_type_name: owner.type_name.clone(),
            access_level: method.access_level,
            parameters,
            return_type,
            overridden: false,
            is_static: method.is_static,
            is_getter,
            is_setter,
            published_event_type_names: method.published_event_type_names.clone(),
            listened_event_type_name: method.listened_event_type_name.clone(),
        }
    }
}

fn signature_of(method: &MethodMirror) -> Signature {
    (
        method.name.clone(),
        method
            .parameters
            .iter()
            .map(|p| p.param_type.resolved_generic_type.to_string())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::TypeRef;

    fn table() -> DescriptorTable {
        DescriptorTable::from_descriptors([
            TypeDescriptor::new("com.shop.Handler").with_method(
                MethodDescriptor::new("handle").with_parameter("c", TypeRef::named("com.shop.Cmd")),
            ),
            TypeDescriptor::new("com.shop.BaseService")
                .implementing("com.shop.Handler")
                .with_method(
                    MethodDescriptor::new("handle")
                        .with_parameter("c", TypeRef::named("com.shop.Cmd"))
                        .publishing("com.shop.Handled"),
                )
                .with_method(
                    MethodDescriptor::new("handle")
                        .with_parameter("c", TypeRef::named("com.shop.OtherCmd")),
                ),
            TypeDescriptor::new("com.shop.Service")
                .extending("com.shop.BaseService")
                .with_method(
                    MethodDescriptor::new("getName").returning(TypeRef::named("java.lang.String")),
                )
                .with_method(
                    MethodDescriptor::new("setName")
                        .with_parameter("name", TypeRef::named("java.lang.String")),
                ),
        ])
        .unwrap()
    }

    #[test]
    fn test_overridden_methods_collapse_to_nearest() {
        let table = table();
        let config = MirrorConfig::default();
        let builder = MethodMirrorBuilder::new(&table, &config);
        let methods = builder.build_all(table.get("com.shop.Service").unwrap());

        assert_eq!(methods.len(), 4);
        let handle_cmd = methods
            .iter()
            .find(|m| m.name == "handle" && m.parameter_type_names() == vec!["com.shop.Cmd"])
            .unwrap();
        assert_eq!(handle_cmd.declared_by_type_name, "com.shop.BaseService");
        assert!(handle_cmd.overridden);
        assert!(handle_cmd.publishes_event("com.shop.Handled"));

        let handle_other = methods
            .iter()
            .find(|m| m.parameter_type_names() == vec!["com.shop.OtherCmd"])
            .unwrap();
        assert!(!handle_other.overridden);
    }

    #[test]
    fn test_methods_inherited_from_superclasses_then_interfaces() {
        let table = DescriptorTable::from_descriptors([
            TypeDescriptor::new("a.Auditable")
                .with_method(MethodDescriptor::new("audit")),
            TypeDescriptor::new("a.Root")
                .implementing("a.Auditable")
                .with_method(MethodDescriptor::new("rootOp")),
            TypeDescriptor::new("a.Middle")
                .extending("a.Root")
                .with_method(MethodDescriptor::new("middleOp")),
            TypeDescriptor::new("a.Leaf")
                .extending("a.Middle")
                .with_method(MethodDescriptor::new("leafOp")),
        ])
        .unwrap();
        let config = MirrorConfig::default();
        let builder = MethodMirrorBuilder::new(&table, &config);

        let methods = builder.build_all(table.get("a.Leaf").unwrap());
        let names: Vec<&str> = methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["leafOp", "middleOp", "rootOp", "audit"]);
        let owners: Vec<&str> = methods
            .iter()
            .map(|m| m.declared_by_type_name.as_str())
            .collect();
        assert_eq!(owners, vec!["a.Leaf", "a.Middle", "a.Root", "a.Auditable"]);
    }

    #[test]
    fn test_accessor_flags() {
        let table = table();
        let config = MirrorConfig::default();
        let builder = MethodMirrorBuilder::new(&table, &config);
        let methods = builder.build_all(table.get("com.shop.Service").unwrap());

        let getter = methods.iter().find(|m| m.name == "getName").unwrap();
        assert!(getter.is_getter && !getter.is_setter);
        let setter = methods.iter().find(|m| m.name == "setName").unwrap();
        assert!(setter.is_setter && !setter.is_getter);
        let handle = methods.iter().find(|m| m.name == "handle").unwrap();
        assert!(!handle.is_getter && !handle.is_setter);
    }
}
