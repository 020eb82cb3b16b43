// Copyright 2025 Cowboy AI, LLC.

//! Registry holding the assembled domain model
//!
//! A [`DomainRegistry`] starts empty. `initialize` asks a
//! [`DomainMirrorFactory`] for mirrors and bounded context packages, assembles
//! a [`DomainModel`] and swaps it into the slot. Readers get an
//! `Arc<DomainModel>` snapshot, so a later re-initialization never changes a
//! graph someone is already walking.
//!
//! [`Domain`] is the process-wide default registry.
//!
//! ```mermaid
//! graph LR
//!     F[DomainMirrorFactory] -->|type_mirrors| R[DomainRegistry]
//!     R -->|assemble| M[Arc DomainModel]
//!     Q[Caller] -->|model / type_mirror| R
//! ```

use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::{Arc, LazyLock};
use tracing::{info, warn};

use crate::config::MirrorConfig;
use crate::domain_type::DomainType;
use crate::errors::{MirrorError, MirrorResult};
use crate::mirror::DomainTypeMirror;
use crate::model::{BoundedContextMirror, DomainModel};

/// Source of the mirrors a registry is initialized from
#[cfg_attr(test, mockall::automock)]
pub trait DomainMirrorFactory {
    /// Every type mirror, keyed by type name
    fn type_mirrors(&self) -> MirrorResult<IndexMap<String, DomainTypeMirror>>;

    /// Package prefixes of the bounded contexts
    fn bounded_context_packages(&self) -> Vec<String>;
}

/// Bounded context that keeps the model snapshot it came from alive
#[derive(Debug, Clone)]
pub struct BoundedContextSnapshot {
    model: Arc<DomainModel>,
    package_name: String,
}

impl BoundedContextSnapshot {
    /// Package prefix of the context
    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    /// Model snapshot the context belongs to
    pub fn model(&self) -> &Arc<DomainModel> {
        &self.model
    }

    /// Linked view over the snapshot
    pub fn mirror(&self) -> BoundedContextMirror<'_> {
        BoundedContextMirror::new(&self.model, &self.package_name)
    }
}

/// Named typed lookups returning copies, one per view
macro_rules! registry_lookups {
    ($($(#[$meta:meta])* $fn_name:ident),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $fn_name(&self, type_name: &str) -> MirrorResult<DomainTypeMirror> {
                self.with_model(|model| {
                    model
                        .$fn_name(type_name)
                        .map(|view| DomainTypeMirror::clone(&view))
                })?
            }
        )*
    };
}

/// Associated functions forwarding to the default registry
macro_rules! domain_lookups {
    ($($fn_name:ident),* $(,)?) => {
        $(
            #[doc = concat!("See [`DomainRegistry::", stringify!($fn_name), "`]")]
            pub fn $fn_name(type_name: &str) -> MirrorResult<DomainTypeMirror> {
                DEFAULT_REGISTRY.$fn_name(type_name)
            }
        )*
    };
}

/// Lock-guarded slot for one assembled model
#[derive(Debug, Default)]
pub struct DomainRegistry {
    slot: RwLock<Option<Arc<DomainModel>>>,
}

impl DomainRegistry {
    /// Create an uninitialized registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and install a model with default configuration
    pub fn initialize(&self, factory: &dyn DomainMirrorFactory) -> MirrorResult<()> {
        self.initialize_with_config(factory, MirrorConfig::default())
    }

    /// Build and install a model
    ///
    /// A failing factory leaves the current model in place.
    pub fn initialize_with_config(
        &self,
        factory: &dyn DomainMirrorFactory,
        config: MirrorConfig,
    ) -> MirrorResult<()> {
        let type_mirrors = factory.type_mirrors().inspect_err(|err| {
            warn!(error = %err, "Mirror factory failed, keeping current model");
        })?;
        let model = DomainModel::assemble_with_config(
            type_mirrors,
            factory.bounded_context_packages(),
            config,
        );
        self.install(model);
        Ok(())
    }

    /// Install an already assembled model
    pub fn install(&self, model: DomainModel) {
        let types = model.len();
        let previous = self.slot.write().replace(Arc::new(model));
        info!(
            types,
            replaced = previous.is_some(),
            "Domain registry initialized"
        );
    }

    /// A model has been installed
    pub fn is_initialized(&self) -> bool {
        self.slot.read().is_some()
    }

    /// Drop the installed model
    pub fn reset(&self) {
        if self.slot.write().take().is_some() {
            info!("Domain registry reset");
        }
    }

    /// Snapshot of the installed model
    pub fn model(&self) -> MirrorResult<Arc<DomainModel>> {
        self.slot.read().clone().ok_or(MirrorError::NotInitialized)
    }

    /// Run `f` against the installed model
    pub fn with_model<R>(&self, f: impl FnOnce(&DomainModel) -> R) -> MirrorResult<R> {
        let model = self.model()?;
        Ok(f(&model))
    }

    /// Copy of one mirror; `Ok(None)` when the name is not registered
    pub fn type_mirror(&self, type_name: &str) -> MirrorResult<Option<DomainTypeMirror>> {
        self.with_model(|model| model.all_type_mirrors().get(type_name).cloned())
    }

    /// Copy of one mirror of the given domain type
    pub fn typed_mirror(
        &self,
        domain_type: DomainType,
        type_name: &str,
    ) -> MirrorResult<DomainTypeMirror> {
        let mirror = self
            .type_mirror(type_name)?
            .ok_or_else(|| MirrorError::not_found(domain_type, type_name))?;
        if mirror.domain_type() != domain_type {
            return Err(MirrorError::WrongMirrorType {
                expected: domain_type,
                actual: mirror.domain_type(),
                type_name: type_name.to_string(),
            });
        }
        Ok(mirror)
    }

    /// A mirror is registered under `type_name`
    pub fn contains(&self, type_name: &str) -> MirrorResult<bool> {
        self.with_model(|model| model.contains(type_name))
    }

    /// Package prefixes of the installed bounded contexts
    pub fn bounded_context_packages(&self) -> MirrorResult<Vec<String>> {
        self.with_model(|model| model.bounded_context_packages().to_vec())
    }

    /// Every bounded context of the installed model
    pub fn bounded_contexts(&self) -> MirrorResult<Vec<BoundedContextSnapshot>> {
        let model = self.model()?;
        Ok(model
            .bounded_context_packages()
            .iter()
            .map(|package_name| BoundedContextSnapshot {
                model: Arc::clone(&model),
                package_name: package_name.clone(),
            })
            .collect())
    }

    /// Bounded context registered under `package_name`
    pub fn bounded_context(
        &self,
        package_name: &str,
    ) -> MirrorResult<Option<BoundedContextSnapshot>> {
        let model = self.model()?;
        let registered = model
            .bounded_context_packages()
            .iter()
            .any(|p| p == package_name);
        Ok(registered.then(|| BoundedContextSnapshot {
            model,
            package_name: package_name.to_string(),
        }))
    }

    /// Copy of the repository managing `aggregate_type_name`
    pub fn repository_mirror_for(
        &self,
        aggregate_type_name: &str,
    ) -> MirrorResult<DomainTypeMirror> {
        let model = self.model()?;
        let repository = model.repository_mirror_for(aggregate_type_name)?;
        Ok(DomainTypeMirror::clone(&repository))
    }

    registry_lookups! {
        /// Copy of an aggregate root mirror
        aggregate_root_mirror_for,
        /// Copy of an entity mirror
        entity_mirror_for,
        /// Copy of a value object mirror
        value_object_mirror_for,
        /// Copy of an identity mirror
        identity_mirror_for,
        /// Copy of an enum mirror
        enum_mirror_for,
        /// Copy of a domain event mirror
        domain_event_mirror_for,
        /// Copy of a domain command mirror
        domain_command_mirror_for,
        /// Copy of a domain service mirror
        domain_service_mirror_for,
        /// Copy of a repository mirror looked up by its own name
        repository_mirror_by_name,
        /// Copy of a read model mirror
        read_model_mirror_for,
        /// Copy of an application service mirror
        application_service_mirror_for,
        /// Copy of a service kind mirror
        service_kind_mirror_for,
        /// Copy of a query handler mirror
        query_handler_mirror_for,
        /// Copy of an outbound service mirror
        outbound_service_mirror_for,
    }
}

static DEFAULT_REGISTRY: LazyLock<DomainRegistry> = LazyLock::new(DomainRegistry::new);

/// Process-wide default registry
pub struct Domain;

impl Domain {
    /// The shared registry behind the associated functions
    pub fn registry() -> &'static DomainRegistry {
        &DEFAULT_REGISTRY
    }

    /// See [`DomainRegistry::initialize`]
    pub fn initialize(factory: &dyn DomainMirrorFactory) -> MirrorResult<()> {
        DEFAULT_REGISTRY.initialize(factory)
    }

    /// See [`DomainRegistry::initialize_with_config`]
    pub fn initialize_with_config(
        factory: &dyn DomainMirrorFactory,
        config: MirrorConfig,
    ) -> MirrorResult<()> {
        DEFAULT_REGISTRY.initialize_with_config(factory, config)
    }

    /// See [`DomainRegistry::is_initialized`]
    pub fn is_initialized() -> bool {
        DEFAULT_REGISTRY.is_initialized()
    }

    /// See [`DomainRegistry::reset`]
    pub fn reset() {
        DEFAULT_REGISTRY.reset()
    }

    /// See [`DomainRegistry::model`]
    pub fn model() -> MirrorResult<Arc<DomainModel>> {
        DEFAULT_REGISTRY.model()
    }

    /// See [`DomainRegistry::type_mirror`]
    pub fn type_mirror(type_name: &str) -> MirrorResult<Option<DomainTypeMirror>> {
        DEFAULT_REGISTRY.type_mirror(type_name)
    }

    /// See [`DomainRegistry::typed_mirror`]
    pub fn typed_mirror(
        domain_type: DomainType,
        type_name: &str,
    ) -> MirrorResult<DomainTypeMirror> {
        DEFAULT_REGISTRY.typed_mirror(domain_type, type_name)
    }

    /// See [`DomainRegistry::contains`]
    pub fn contains(type_name: &str) -> MirrorResult<bool> {
        DEFAULT_REGISTRY.contains(type_name)
    }

    /// See [`DomainRegistry::bounded_context_packages`]
    pub fn bounded_context_packages() -> MirrorResult<Vec<String>> {
        DEFAULT_REGISTRY.bounded_context_packages()
    }

    /// See [`DomainRegistry::bounded_contexts`]
    pub fn bounded_contexts() -> MirrorResult<Vec<BoundedContextSnapshot>> {
        DEFAULT_REGISTRY.bounded_contexts()
    }

    /// See [`DomainRegistry::bounded_context`]
    pub fn bounded_context(package_name: &str) -> MirrorResult<Option<BoundedContextSnapshot>> {
        DEFAULT_REGISTRY.bounded_context(package_name)
    }

    /// See [`DomainRegistry::repository_mirror_for`]
    pub fn repository_mirror_for(aggregate_type_name: &str) -> MirrorResult<DomainTypeMirror> {
        DEFAULT_REGISTRY.repository_mirror_for(aggregate_type_name)
    }

    domain_lookups! {
        aggregate_root_mirror_for,
        entity_mirror_for,
        value_object_mirror_for,
        identity_mirror_for,
        enum_mirror_for,
        domain_event_mirror_for,
        domain_command_mirror_for,
        domain_service_mirror_for,
        repository_mirror_by_name,
        read_model_mirror_for,
        application_service_mirror_for,
        service_kind_mirror_for,
        query_handler_mirror_for,
        outbound_service_mirror_for,
    }
}
