// Copyright 2025 Cowboy AI, LLC.

//! Declared type resolution and container unwrapping

use tracing::debug;

use crate::classifier::TypeClassifier;
use crate::config::ContainerConventions;
use crate::descriptor::{DescriptorTable, TypeRef};
use crate::mirror::{
    AssertedContainableTypeMirror, AssertionMirror, ContainerKind, ResolvedGenericTypeMirror,
    WildcardBoundType, OBJECT_TYPE_NAME,
};

/// Turns declared [`TypeRef`]s into resolved, container-aware type mirrors
#[derive(Debug, Clone, Copy)]
pub struct ContainableTypeBuilder<'t> {
    classifier: TypeClassifier<'t>,
    containers: &'t ContainerConventions,
}

impl<'t> ContainableTypeBuilder<'t> {
    /// Create a builder over `table` using the given container names
    pub fn new(table: &'t DescriptorTable, containers: &'t ContainerConventions) -> Self {
        Self {
            classifier: TypeClassifier::new(table),
            containers,
        }
    }

    /// Resolve a declared type into a generic type tree
    ///
    /// Type variables become their first bound (or `Object`); wildcards keep
    /// their bound type and record the bound direction.
    pub fn resolve(&self, type_ref: &TypeRef) -> ResolvedGenericTypeMirror {
        match type_ref {
            TypeRef::Named { name, arguments } => ResolvedGenericTypeMirror::parameterized(
                name.clone(),
                arguments.iter().map(|a| self.resolve(a)).collect(),
            ),
            TypeRef::Array { component } => self.resolve(component).as_array(),
            TypeRef::Wildcard { bound, bounds } => match bounds.first() {
                Some(first) => self.resolve(first).as_wildcard(*bound),
                None => ResolvedGenericTypeMirror::simple(OBJECT_TYPE_NAME)
                    .as_wildcard(WildcardBoundType::Upper),
            },
            TypeRef::Variable { bounds, .. } => match bounds.first() {
                Some(first) => self.resolve(first),
                None => ResolvedGenericTypeMirror::simple(OBJECT_TYPE_NAME),
            },
        }
    }

    /// Build the containable mirror of a declared type
    pub fn build(
        &self,
        type_ref: &TypeRef,
        assertions: &[AssertionMirror],
        container_assertions: &[AssertionMirror],
    ) -> AssertedContainableTypeMirror {
        let resolved_generic_type = self.resolve(type_ref);

        let mut current = type_ref;
        let mut has_optional_container = false;
        if let Some(inner) = self.optional_element(current) {
            has_optional_container = true;
            current = inner;
        }

        let (container, container_type_name, element) = self.unwrap_container(current);
        let type_name = element_name(element);
        let domain_type = self.classifier.classify(&type_name);

        debug!(
            element = %type_name,
            ?container,
            optional = has_optional_container,
            "Unwrapped declared type"
        );

        AssertedContainableTypeMirror {
            type_name,
            domain_type,
            assertions: assertions.to_vec(),
            has_optional_container,
            container,
            container_type_name,
            container_assertions: container_assertions.to_vec(),
            resolved_generic_type,
        }
    }

    fn optional_element<'r>(&self, type_ref: &'r TypeRef) -> Option<&'r TypeRef> {
        match type_ref {
            TypeRef::Named { name, arguments } if self.matches(name, |c, n| c.is_optional(n)) => {
                arguments.first()
            }
            _ => None,
        }
    }

    fn unwrap_container<'r>(
        &self,
        type_ref: &'r TypeRef,
    ) -> (ContainerKind, Option<String>, &'r TypeRef) {
        let (name, arguments) = match type_ref {
            TypeRef::Named { name, arguments } => (name, arguments),
            TypeRef::Array { component } => return (ContainerKind::Array, None, component.as_ref()),
            _ => return (ContainerKind::None, None, type_ref),
        };
        let kind = self.container_kind(name);
        if kind == ContainerKind::None {
            return (kind, None, type_ref);
        }
        // raw containers fall back to the container itself as element
        match arguments.first() {
            Some(element) => (kind, Some(name.clone()), element),
            None => (kind, Some(name.clone()), type_ref),
        }
    }

    /// Container kind of a raw type name, also recognising subtypes of convention types
    pub fn container_kind(&self, type_name: &str) -> ContainerKind {
        if self.matches(type_name, |c, n| c.is_list(n)) {
            ContainerKind::List
        } else if self.matches(type_name, |c, n| c.is_set(n)) {
            ContainerKind::Set
        } else if self.matches(type_name, |c, n| c.is_stream(n)) {
            ContainerKind::Stream
        } else if self.matches(type_name, |c, n| c.is_collection(n)) {
            ContainerKind::Collection
        } else {
            ContainerKind::None
        }
    }

    fn matches(&self, type_name: &str, is: impl Fn(&ContainerConventions, &str) -> bool) -> bool {
        if is(self.containers, type_name) {
            return true;
        }
        let table = self.classifier.table();
        if !table.contains(type_name) {
            return false;
        }
        table
            .superclass_chain(type_name)
            .iter()
            .chain(table.all_interfaces(type_name).iter())
            .any(|supertype| is(self.containers, supertype))
    }
}

/// Name of the element a (non-container) type use stands for
fn element_name(type_ref: &TypeRef) -> String {
    match type_ref {
        TypeRef::Named { name, .. } => name.clone(),
        TypeRef::Array { component } => format!("{}[]", element_name(component)),
        TypeRef::Wildcard { bounds, .. } | TypeRef::Variable { bounds, .. } => bounds
            .first()
            .map(element_name)
            .unwrap_or_else(|| OBJECT_TYPE_NAME.to_string()),
    }
}
