// Copyright 2025 Cowboy AI, LLC.

//! JSON document form of a domain model
//!
//! A [`MirrorDocument`] carries what a [`DomainMirrorFactory`] produces plus
//! the [`MirrorConfig`] the model was assembled with, so a model can be
//! exported once and re-assembled elsewhere without the original descriptors.
//! Documents without a `config` entry assemble with the default configuration.

use indexmap::IndexMap;
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};

use crate::config::MirrorConfig;
use crate::errors::MirrorResult;
use crate::mirror::DomainTypeMirror;
use crate::model::DomainModel;
use crate::registry::DomainMirrorFactory;

/// Serializable snapshot of the mirrors and bounded contexts of a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MirrorDocument {
    /// Package prefixes of the bounded contexts
    #[serde(default)]
    pub bounded_context_packages: Vec<String>,
    /// Mirrors keyed by type name
    #[serde(default)]
    pub type_mirrors: IndexMap<String, DomainTypeMirror>,
    /// Configuration the model was assembled with
    #[serde(default)]
    pub config: MirrorConfig,
}

impl MirrorDocument {
    /// Compact JSON
    pub fn to_json(&self) -> MirrorResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON
    pub fn to_json_pretty(&self) -> MirrorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document
    pub fn from_json(json: &str) -> MirrorResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Assemble the document into a model with the recorded configuration
    pub fn into_model(self) -> DomainModel {
        let config = self.config.clone();
        self.into_model_with_config(config)
    }

    /// Assemble the document into a model, replacing the recorded configuration
    pub fn into_model_with_config(self, config: MirrorConfig) -> DomainModel {
        DomainModel::assemble_with_config(self.type_mirrors, self.bounded_context_packages, config)
    }
}

impl DomainModel {
    /// Snapshot of the model as a document
    pub fn to_document(&self) -> MirrorDocument {
        MirrorDocument {
            bounded_context_packages: self.bounded_context_packages().to_vec(),
            type_mirrors: self.all_type_mirrors().clone(),
            config: self.config().clone(),
        }
    }
}

/// [`DomainMirrorFactory`] serving a parsed [`MirrorDocument`]
#[derive(Debug, Clone, Default)]
pub struct JsonMirrorFactory {
    document: MirrorDocument,
}

impl JsonMirrorFactory {
    /// Wrap an already parsed document
    pub fn new(document: MirrorDocument) -> Self {
        Self { document }
    }

    /// Parse `json` into a factory
    pub fn from_json(json: &str) -> MirrorResult<Self> {
        MirrorDocument::from_json(json).map(Self::new)
    }

    /// The served document
    pub fn document(&self) -> &MirrorDocument {
        &self.document
    }

    /// Configuration recorded in the document
    pub fn config(&self) -> &MirrorConfig {
        &self.document.config
    }
}

impl DomainMirrorFactory for JsonMirrorFactory {
    fn type_mirrors(&self) -> MirrorResult<IndexMap<String, DomainTypeMirror>> {
        Ok(self.document.type_mirrors.clone())
    }

    fn bounded_context_packages(&self) -> Vec<String> {
        self.document.bounded_context_packages.clone()
    }
}

/// JSON schema of [`MirrorDocument`]
pub fn mirror_document_schema() -> RootSchema {
    schema_for!(MirrorDocument)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::MirrorError;
    use crate::mirror::{EntityPayload, MirrorKind, RepositoryPayload};

    fn document() -> MirrorDocument {
        let order = DomainTypeMirror::new(
            "com.shop.order.Order",
            MirrorKind::AggregateRoot(EntityPayload::default()),
        );
        let repository = DomainTypeMirror::new(
            "com.shop.order.OrderRepository",
            MirrorKind::Repository(RepositoryPayload {
                managed_aggregate_type_name: Some("com.shop.order.Order".to_string()),
                ..RepositoryPayload::default()
            }),
        );
        MirrorDocument {
            bounded_context_packages: vec!["com.shop.order".to_string()],
            type_mirrors: [order, repository]
                .into_iter()
                .map(|m| (m.type_name.clone(), m))
                .collect(),
            config: MirrorConfig::default(),
        }
    }

    #[test]
    fn test_document_json_uses_mirror_type_tag() {
        let json = document().to_json().unwrap();
        assert!(json.contains("\"mirrorType\":\"AggregateRootMirror\""));
        assert!(json.contains("\"boundedContextPackages\""));
        assert_eq!(MirrorDocument::from_json(&json).unwrap(), document());
    }

    #[test]
    fn test_model_document_round_trip_keeps_links() {
        let model = document().into_model();
        let restored = MirrorDocument::from_json(&model.to_document().to_json_pretty().unwrap())
            .unwrap()
            .into_model();
        assert_eq!(restored, model);

        let repository = restored.repository_mirror_for("com.shop.order.Order").unwrap();
        assert!(repository.managed_aggregate().is_some());
    }

    #[test]
    fn test_round_trip_keeps_config() {
        let config = MirrorConfig::default()
            .with_command_matching(crate::config::CommandMatching::InheritanceAware);
        let model = document().into_model_with_config(config.clone());

        let json = model.to_document().to_json().unwrap();
        assert!(json.contains("\"commandMatching\":\"inheritanceAware\""));
        let restored = MirrorDocument::from_json(&json).unwrap().into_model();
        assert_eq!(restored.config(), &config);

        let factory = JsonMirrorFactory::from_json(&json).unwrap();
        assert_eq!(factory.config(), &config);
    }

    #[test]
    fn test_document_without_config_uses_defaults() {
        let json = r#"{ "boundedContextPackages": ["com.shop"], "typeMirrors": {} }"#;
        let document = MirrorDocument::from_json(json).unwrap();
        assert_eq!(document.config, MirrorConfig::default());
        assert!(document.into_model().is_empty());
    }

    #[test]
    fn test_invalid_json_is_serialization_error() {
        let err = MirrorDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, MirrorError::SerializationError(_)));
    }

    #[test]
    fn test_json_factory_feeds_registry() {
        let json = document().to_json().unwrap();
        let factory = JsonMirrorFactory::from_json(&json).unwrap();
        let registry = crate::registry::DomainRegistry::new();
        registry.initialize(&factory).unwrap();
        assert_eq!(
            registry.repository_mirror_for("com.shop.order.Order").unwrap().type_name,
            "com.shop.order.OrderRepository"
        );
    }

    #[test]
    fn test_schema_describes_document() {
        let schema = serde_json::to_value(mirror_document_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("typeMirrors").is_some());
        assert!(properties.get("boundedContextPackages").is_some());
        assert!(properties.get("config").is_some());
    }
}
