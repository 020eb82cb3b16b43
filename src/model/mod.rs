// Copyright 2025 Cowboy AI, LLC.

//! Assembled domain model and linked mirror views
//!
//! [`DomainModel`] owns every [`DomainTypeMirror`] keyed by type name. Mirrors
//! refer to each other by name only; a view such as [`AggregateRootMirror`]
//! pairs a mirror with the model it belongs to, so cross references resolve
//! against the current contents of the model on every call.
//!
//! ```mermaid
//! graph TD
//!     M[DomainModel] -->|owns| T[DomainTypeMirror]
//!     V[AggregateRootMirror] -->|&model| M
//!     V -->|&mirror| T
//!     B[BoundedContextMirror] -->|&model + package| M
//! ```

use indexmap::IndexMap;
use std::fmt;
use std::ops::Deref;
use tracing::{info, warn};

use crate::config::MirrorConfig;
use crate::domain_type::DomainType;
use crate::errors::{MirrorError, MirrorResult};
use crate::mirror::{DomainTypeMirror, FieldMirror};

/// Shared behaviour of every linked view
pub trait TypeMirror<'m>: Copy {
    /// Model the mirror belongs to
    fn model(&self) -> &'m DomainModel;

    /// The underlying mirror data
    fn mirror(&self) -> &'m DomainTypeMirror;

    /// Untyped view of the same mirror
    fn untyped(&self) -> TypeMirrorRef<'m> {
        TypeMirrorRef::new(self.model(), self.mirror())
    }

    /// Bounded context whose package prefix matches this type (longest prefix wins)
    fn bounded_context(&self) -> Option<BoundedContextMirror<'m>> {
        self.model().bounded_context_of(&self.mirror().type_name)
    }

    /// Mirror of a field's element type, if it is part of the model
    fn field_type_mirror(&self, field: &FieldMirror) -> Option<TypeMirrorRef<'m>> {
        self.model().type_mirror(field.type_name())
    }

    /// Nearest mirrored superclass
    fn super_type(&self) -> Option<TypeMirrorRef<'m>> {
        let model = self.model();
        self.mirror()
            .inheritance_hierarchy_type_names
            .iter()
            .find_map(|name| model.type_mirror(name))
    }

    /// Mirrors of types extending or implementing this one
    fn sub_types(&self) -> Vec<TypeMirrorRef<'m>> {
        let name = self.mirror().type_name.as_str();
        self.model()
            .type_mirrors()
            .filter(|m| m.mirror().type_name != name && m.mirror().is_assignable_to(name))
            .collect()
    }

    /// Events named as published by the own methods, resolved against the model
    ///
    /// Fails on the first name that is not a registered event.
    fn published_events(&self) -> MirrorResult<Vec<DomainEventMirror<'m>>> {
        let mirror = self.mirror();
        mirror
            .published_event_type_names()
            .into_iter()
            .map(|name| self.model().resolve_reference(&mirror.type_name, name))
            .collect()
    }

    /// Events named as listened to by the own methods, resolved against the model
    fn listened_events(&self) -> MirrorResult<Vec<DomainEventMirror<'m>>> {
        let mirror = self.mirror();
        mirror
            .listened_event_type_names()
            .into_iter()
            .map(|name| self.model().resolve_reference(&mirror.type_name, name))
            .collect()
    }

    /// Registered commands one of the own methods processes
    fn processed_commands(&self) -> Vec<DomainCommandMirror<'m>> {
        let mirror = self.mirror();
        let matching = self.model().config().command_matching;
        self.model()
            .views::<DomainCommandMirror<'m>>()
            .filter(|command| mirror.own_methods_process(command.mirror(), matching))
            .collect()
    }
}

/// A view whose variant is known statically
pub trait MirrorView<'m>: TypeMirror<'m> + Sized {
    /// Domain type every mirror behind this view has
    const DOMAIN_TYPE: DomainType;

    /// Wrap `mirror` if it has the view's domain type
    fn from_parts(model: &'m DomainModel, mirror: &'m DomainTypeMirror) -> Option<Self>;
}

/// Event and command linkage of a type
///
/// Domain objects answer deeply, over everything they contain; services,
/// messages and read models answer from their own methods only.
pub trait MessageLinks {
    /// The type (or, for domain objects, a contained one) publishes `event`
    fn publishes(&self, event: &DomainTypeMirror) -> bool;

    /// The type (or, for domain objects, a contained one) listens to `event`
    fn listens_to(&self, event: &DomainTypeMirror) -> bool;

    /// The type (or, for domain objects, a contained one) processes `command`
    fn processes(&self, command: &DomainTypeMirror) -> bool;
}

pub(crate) fn deep_publishes(
    model: &DomainModel,
    mirror: &DomainTypeMirror,
    event: &DomainTypeMirror,
) -> bool {
    ContainmentWalker::new(model).any(mirror, |m| m.own_methods_publish(&event.type_name))
}

pub(crate) fn deep_listens_to(
    model: &DomainModel,
    mirror: &DomainTypeMirror,
    event: &DomainTypeMirror,
) -> bool {
    ContainmentWalker::new(model).any(mirror, |m| m.own_methods_listen_to(&event.type_name))
}

pub(crate) fn deep_processes(
    model: &DomainModel,
    mirror: &DomainTypeMirror,
    command: &DomainTypeMirror,
) -> bool {
    let matching = model.config().command_matching;
    ContainmentWalker::new(model).any(mirror, |m| m.own_methods_process(command, matching))
}

/// Defines a linked view type for one mirror variant
macro_rules! mirror_view {
    ($(#[$meta:meta])* $view:ident, $domain_type:ident, $depth:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        pub struct $view<'m> {
            model: &'m $crate::model::DomainModel,
            mirror: &'m $crate::mirror::DomainTypeMirror,
        }

        impl<'m> $crate::model::TypeMirror<'m> for $view<'m> {
            fn model(&self) -> &'m $crate::model::DomainModel {
                self.model
            }

            fn mirror(&self) -> &'m $crate::mirror::DomainTypeMirror {
                self.mirror
            }
        }

        impl<'m> $crate::model::MirrorView<'m> for $view<'m> {
            const DOMAIN_TYPE: $crate::domain_type::DomainType =
                $crate::domain_type::DomainType::$domain_type;

            fn from_parts(
                model: &'m $crate::model::DomainModel,
                mirror: &'m $crate::mirror::DomainTypeMirror,
            ) -> Option<Self> {
                (mirror.domain_type() == Self::DOMAIN_TYPE).then_some(Self { model, mirror })
            }
        }

        impl std::ops::Deref for $view<'_> {
            type Target = $crate::mirror::DomainTypeMirror;

            fn deref(&self) -> &Self::Target {
                self.mirror
            }
        }

        impl PartialEq for $view<'_> {
            fn eq(&self, other: &Self) -> bool {
                std::ptr::eq(self.model, other.model)
                    && self.mirror.type_name == other.mirror.type_name
            }
        }

        impl Eq for $view<'_> {}

        impl std::fmt::Debug for $view<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($view))
                    .field("type_name", &self.mirror.type_name)
                    .finish()
            }
        }

        impl<'m> From<$view<'m>> for $crate::model::TypeMirrorRef<'m> {
            fn from(view: $view<'m>) -> Self {
                $crate::model::TypeMirror::untyped(&view)
            }
        }

        mirror_view!(@links $view, $depth);
    };
    (@links $view:ident, deep) => {
        impl $crate::model::MessageLinks for $view<'_> {
            fn publishes(&self, event: &$crate::mirror::DomainTypeMirror) -> bool {
                $crate::model::deep_publishes(self.model, self.mirror, event)
            }

            fn listens_to(&self, event: &$crate::mirror::DomainTypeMirror) -> bool {
                $crate::model::deep_listens_to(self.model, self.mirror, event)
            }

            fn processes(&self, command: &$crate::mirror::DomainTypeMirror) -> bool {
                $crate::model::deep_processes(self.model, self.mirror, command)
            }
        }
    };
    (@links $view:ident, shallow) => {
        impl $crate::model::MessageLinks for $view<'_> {
            fn publishes(&self, event: &$crate::mirror::DomainTypeMirror) -> bool {
                self.mirror.own_methods_publish(&event.type_name)
            }

            fn listens_to(&self, event: &$crate::mirror::DomainTypeMirror) -> bool {
                self.mirror.own_methods_listen_to(&event.type_name)
            }

            fn processes(&self, command: &$crate::mirror::DomainTypeMirror) -> bool {
                self.mirror
                    .own_methods_process(command, self.model.config().command_matching)
            }
        }
    };
}

pub mod bounded_context;
pub mod domain_objects;
pub mod messages;
pub mod services;
pub mod visitor;

pub use bounded_context::{filter, BoundedContextMirror};
pub use domain_objects::{
    AggregateRootMirror, DomainObjectMirror, EntityMirror, EnumMirror, IdentityMirror,
    ValueObjectMirror,
};
pub use messages::{DomainCommandMirror, DomainEventMirror, ReadModelMirror};
pub use services::{
    ApplicationServiceMirror, DomainServiceMirror, OutboundServiceMirror, QueryHandlerMirror,
    RepositoryMirror, ServiceKindMirror, ServiceMirror,
};
pub use visitor::{CollectingVisitor, ContainmentWalker, DomainObjectVisitor};

/// Untyped linked view of any mirror
#[derive(Clone, Copy)]
pub struct TypeMirrorRef<'m> {
    model: &'m DomainModel,
    mirror: &'m DomainTypeMirror,
}

impl<'m> TypeMirrorRef<'m> {
    /// Pair a mirror with its model
    pub fn new(model: &'m DomainModel, mirror: &'m DomainTypeMirror) -> Self {
        Self { model, mirror }
    }

    /// Typed view, if the mirror has the view's variant
    pub fn downcast<V: MirrorView<'m>>(self) -> Option<V> {
        V::from_parts(self.model, self.mirror)
    }

    /// Domain object view (aggregate root, entity, value object, identity, enum)
    pub fn as_domain_object(self) -> Option<Self> {
        self.mirror.domain_type().is_domain_object().then_some(self)
    }
}

impl<'m> TypeMirror<'m> for TypeMirrorRef<'m> {
    fn model(&self) -> &'m DomainModel {
        self.model
    }

    fn mirror(&self) -> &'m DomainTypeMirror {
        self.mirror
    }
}

impl MessageLinks for TypeMirrorRef<'_> {
    fn publishes(&self, event: &DomainTypeMirror) -> bool {
        if self.mirror.domain_type().is_domain_object() {
            deep_publishes(self.model, self.mirror, event)
        } else {
            self.mirror.own_methods_publish(&event.type_name)
        }
    }

    fn listens_to(&self, event: &DomainTypeMirror) -> bool {
        if self.mirror.domain_type().is_domain_object() {
            deep_listens_to(self.model, self.mirror, event)
        } else {
            self.mirror.own_methods_listen_to(&event.type_name)
        }
    }

    fn processes(&self, command: &DomainTypeMirror) -> bool {
        if self.mirror.domain_type().is_domain_object() {
            deep_processes(self.model, self.mirror, command)
        } else {
            self.mirror
                .own_methods_process(command, self.model.config().command_matching)
        }
    }
}

impl Deref for TypeMirrorRef<'_> {
    type Target = DomainTypeMirror;

    fn deref(&self) -> &Self::Target {
        self.mirror
    }
}

impl PartialEq for TypeMirrorRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.model, other.model) && self.mirror.type_name == other.mirror.type_name
    }
}

impl Eq for TypeMirrorRef<'_> {}

impl fmt::Debug for TypeMirrorRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeMirrorRef")
            .field("type_name", &self.mirror.type_name)
            .field("domain_type", &self.mirror.domain_type())
            .finish()
    }
}

/// The assembled, cross-referenced set of domain type mirrors
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DomainModel {
    type_mirrors: IndexMap<String, DomainTypeMirror>,
    bounded_context_packages: Vec<String>,
    config: MirrorConfig,
}

/// Named typed lookups, one per view
macro_rules! typed_lookups {
    ($($(#[$meta:meta])* $fn_name:ident => $view:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $fn_name(&self, type_name: &str) -> MirrorResult<$view<'_>> {
                self.lookup(type_name)
            }
        )*
    };
}

impl DomainModel {
    /// Assemble a model with default configuration
    pub fn assemble<I, S>(
        type_mirrors: IndexMap<String, DomainTypeMirror>,
        bounded_context_packages: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::assemble_with_config(type_mirrors, bounded_context_packages, MirrorConfig::default())
    }

    /// Assemble a model
    ///
    /// Every mirror is keyed by its own type name; references between mirrors
    /// are not validated here and resolve lazily.
    pub fn assemble_with_config<I, S>(
        type_mirrors: IndexMap<String, DomainTypeMirror>,
        bounded_context_packages: I,
        config: MirrorConfig,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut model = Self {
            type_mirrors: IndexMap::with_capacity(type_mirrors.len()),
            bounded_context_packages: Vec::new(),
            config,
        };
        for package in bounded_context_packages {
            let package = package.into();
            if !model.bounded_context_packages.contains(&package) {
                model.bounded_context_packages.push(package);
            }
        }
        for (key, mirror) in type_mirrors {
            if key != mirror.type_name {
                warn!(
                    key = %key,
                    type_name = %mirror.type_name,
                    "Re-keying mirror under its type name"
                );
            }
            if let Some(previous) = model.insert_mirror(mirror) {
                warn!(type_name = %previous.type_name, "Duplicate mirror replaced during assembly");
            }
        }
        info!(
            types = model.type_mirrors.len(),
            bounded_contexts = model.bounded_context_packages.len(),
            "Assembled domain model"
        );
        model
    }

    /// Configuration the model was assembled with
    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Every mirror keyed by type name
    pub fn all_type_mirrors(&self) -> &IndexMap<String, DomainTypeMirror> {
        &self.type_mirrors
    }

    /// Number of mirrors
    pub fn len(&self) -> usize {
        self.type_mirrors.len()
    }

    /// No mirrors
    pub fn is_empty(&self) -> bool {
        self.type_mirrors.is_empty()
    }

    /// A mirror is registered under `type_name`
    pub fn contains(&self, type_name: &str) -> bool {
        self.type_mirrors.contains_key(type_name)
    }

    /// Bounded context package prefixes in declaration order
    pub fn bounded_context_packages(&self) -> &[String] {
        &self.bounded_context_packages
    }

    /// Add or replace a mirror, returning the one it replaced
    pub fn insert_mirror(&mut self, mirror: DomainTypeMirror) -> Option<DomainTypeMirror> {
        self.type_mirrors.insert(mirror.type_name.clone(), mirror)
    }

    /// Remove a mirror, keeping the order of the others
    pub fn remove_mirror(&mut self, type_name: &str) -> Option<DomainTypeMirror> {
        self.type_mirrors.shift_remove(type_name)
    }

    /// Untyped view of one mirror
    pub fn type_mirror(&self, type_name: &str) -> Option<TypeMirrorRef<'_>> {
        self.type_mirrors
            .get(type_name)
            .map(|mirror| TypeMirrorRef::new(self, mirror))
    }

    /// Untyped views of every mirror
    pub fn type_mirrors(&self) -> impl Iterator<Item = TypeMirrorRef<'_>> + '_ {
        self.type_mirrors
            .values()
            .map(move |mirror| TypeMirrorRef::new(self, mirror))
    }

    /// Untyped views of every mirror of one domain type
    pub fn mirrors_of(
        &self,
        domain_type: DomainType,
    ) -> impl Iterator<Item = TypeMirrorRef<'_>> + '_ {
        self.type_mirrors()
            .filter(move |m| m.mirror().domain_type() == domain_type)
    }

    /// Typed views of every mirror of the view's variant
    pub fn views<'m, V: MirrorView<'m> + 'm>(&'m self) -> impl Iterator<Item = V> + 'm {
        self.type_mirrors
            .values()
            .filter_map(move |mirror| V::from_parts(self, mirror))
    }

    /// Typed lookup by name
    ///
    /// Fails with [`MirrorError::MirrorNotFound`] for unknown names and
    /// [`MirrorError::WrongMirrorType`] for names of another variant.
    pub fn lookup<'m, V: MirrorView<'m>>(&'m self, type_name: &str) -> MirrorResult<V> {
        let mirror = self
            .type_mirrors
            .get(type_name)
            .ok_or_else(|| MirrorError::not_found(V::DOMAIN_TYPE, type_name))?;
        V::from_parts(self, mirror).ok_or_else(|| MirrorError::WrongMirrorType {
            expected: V::DOMAIN_TYPE,
            actual: mirror.domain_type(),
            type_name: type_name.to_string(),
        })
    }

    /// Resolve a by-name reference held by `referencing_type`
    ///
    /// Any failure is reported as [`MirrorError::DanglingReference`].
    pub fn resolve_reference<'m, V: MirrorView<'m>>(
        &'m self,
        referencing_type: &str,
        referenced_type: &str,
    ) -> MirrorResult<V> {
        self.lookup(referenced_type)
            .map_err(|_| MirrorError::dangling(referencing_type, referenced_type, V::DOMAIN_TYPE))
    }

    typed_lookups! {
        /// Aggregate root mirror by name
        aggregate_root_mirror_for => AggregateRootMirror,
        /// Entity mirror by name
        entity_mirror_for => EntityMirror,
        /// Value object mirror by name
        value_object_mirror_for => ValueObjectMirror,
        /// Identity mirror by name
        identity_mirror_for => IdentityMirror,
        /// Enum mirror by name
        enum_mirror_for => EnumMirror,
        /// Domain event mirror by name
        domain_event_mirror_for => DomainEventMirror,
        /// Domain command mirror by name
        domain_command_mirror_for => DomainCommandMirror,
        /// Domain service mirror by name
        domain_service_mirror_for => DomainServiceMirror,
        /// Repository mirror by name
        repository_mirror_by_name => RepositoryMirror,
        /// Read model mirror by name
        read_model_mirror_for => ReadModelMirror,
        /// Application service mirror by name
        application_service_mirror_for => ApplicationServiceMirror,
        /// Service kind mirror by name
        service_kind_mirror_for => ServiceKindMirror,
        /// Query handler mirror by name
        query_handler_mirror_for => QueryHandlerMirror,
        /// Outbound service mirror by name
        outbound_service_mirror_for => OutboundServiceMirror,
    }

    /// Repository managing the given aggregate root
    pub fn repository_mirror_for(
        &self,
        aggregate_type_name: &str,
    ) -> MirrorResult<RepositoryMirror<'_>> {
        self.views::<RepositoryMirror<'_>>()
            .find(|repository| {
                repository.managed_aggregate_type_name() == Some(aggregate_type_name)
            })
            .ok_or_else(|| MirrorError::not_found(DomainType::Repository, aggregate_type_name))
    }

    /// Mirror of the type declaring `field`
    pub fn declaring_type(&self, field: &FieldMirror) -> Option<TypeMirrorRef<'_>> {
        self.type_mirror(&field.declared_by_type_name)
    }

    /// Entity or aggregate root whose identity field has the given type
    pub fn entity_for_identity(&self, identity_type_name: &str) -> Option<TypeMirrorRef<'_>> {
        self.type_mirrors().find(|m| {
            m.mirror().domain_type().is_entity_like()
                && m.mirror()
                    .identity_field()
                    .is_some_and(|f| f.type_name() == identity_type_name)
        })
    }

    /// Bounded context registered under `package_name`
    pub fn bounded_context(&self, package_name: &str) -> Option<BoundedContextMirror<'_>> {
        self.bounded_context_packages
            .iter()
            .find(|p| p.as_str() == package_name)
            .map(|p| BoundedContextMirror::new(self, p))
    }

    /// One live view per bounded context package
    pub fn bounded_contexts(&self) -> Vec<BoundedContextMirror<'_>> {
        self.bounded_context_packages
            .iter()
            .map(|p| BoundedContextMirror::new(self, p))
            .collect()
    }

    /// Bounded context with the longest package prefix of `type_name`
    pub fn bounded_context_of(&self, type_name: &str) -> Option<BoundedContextMirror<'_>> {
        self.bounded_context_packages
            .iter()
            .filter(|p| type_name.starts_with(p.as_str()))
            .max_by_key(|p| p.len())
            .map(|p| BoundedContextMirror::new(self, p))
    }
}
