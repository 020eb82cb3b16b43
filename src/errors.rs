// Copyright 2025 Cowboy AI, LLC.

//! Error types for mirror construction and graph queries

use thiserror::Error;

use crate::domain_type::DomainType;

/// Errors that can occur while building or querying domain mirrors
#[derive(Debug, Clone, Error)]
pub enum MirrorError {
    /// The registry was queried before a model was installed
    #[error("Domain mirrors not initialized: call initialize() before querying")]
    NotInitialized,

    /// A typed lookup found nothing under the requested name
    #[error("No {expected} mirror found for type {type_name}")]
    MirrorNotFound {
        /// Variant the caller asked for
        expected: DomainType,
        /// Name that was looked up
        type_name: String,
    },

    /// A typed lookup found a mirror of another variant
    #[error("Type {type_name} is mirrored as {actual}, expected {expected}")]
    WrongMirrorType {
        /// Variant the caller asked for
        expected: DomainType,
        /// Variant actually registered
        actual: DomainType,
        /// Name that was looked up
        type_name: String,
    },

    /// A by-name reference stored inside a mirror does not resolve
    #[error("{referencing_type} references {expected} {referenced_type}, which is not part of the domain model")]
    DanglingReference {
        /// Mirror holding the reference
        referencing_type: String,
        /// Name that failed to resolve
        referenced_type: String,
        /// Variant the reference should resolve to
        expected: DomainType,
    },

    /// A raw descriptor could not be turned into a mirror
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The external mirror factory failed
    #[error("Mirror factory error: {0}")]
    FactoryError(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Result type for mirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;

impl From<serde_json::Error> for MirrorError {
    fn from(err: serde_json::Error) -> Self {
        MirrorError::SerializationError(err.to_string())
    }
}

impl MirrorError {
    /// Create a not-found error for a typed lookup
    pub fn not_found(expected: DomainType, type_name: impl Into<String>) -> Self {
        MirrorError::MirrorNotFound {
            expected,
            type_name: type_name.into(),
        }
    }

    /// Create a dangling-reference error
    pub fn dangling(
        referencing_type: impl Into<String>,
        referenced_type: impl Into<String>,
        expected: DomainType,
    ) -> Self {
        MirrorError::DanglingReference {
            referencing_type: referencing_type.into(),
            referenced_type: referenced_type.into(),
            expected,
        }
    }

    /// Check if this is a missing-mirror error (absent or wrong variant)
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            MirrorError::MirrorNotFound { .. } | MirrorError::WrongMirrorType { .. }
        )
    }

    /// Check if this is an initialization-order error
    pub fn is_initialization_error(&self) -> bool {
        matches!(self, MirrorError::NotInitialized)
    }

    /// Check if this is a dangling reference inside the graph
    pub fn is_dangling_reference(&self) -> bool {
        matches!(self, MirrorError::DanglingReference { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test error creation and display messages
    ///
    /// ```mermaid
    /// graph TD
    ///     A[MirrorError] -->|Display| B[Error Message]
    ///     A -->|Clone| C[Cloned Error]
    /// ```
    #[test]
    fn test_error_display_messages() {
        assert_eq!(
            MirrorError::NotInitialized.to_string(),
            "Domain mirrors not initialized: call initialize() before querying"
        );

        let err = MirrorError::not_found(DomainType::Entity, "com.shop.order.OrderLine");
        assert_eq!(
            err.to_string(),
            "No Entity mirror found for type com.shop.order.OrderLine"
        );

        let err = MirrorError::WrongMirrorType {
            expected: DomainType::Repository,
            actual: DomainType::DomainService,
            type_name: "com.shop.PricingService".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type com.shop.PricingService is mirrored as Domain Service, expected Repository"
        );

        let err = MirrorError::dangling(
            "com.shop.CheckoutService",
            "com.shop.GoneRepository",
            DomainType::Repository,
        );
        assert_eq!(
            err.to_string(),
            "com.shop.CheckoutService references Repository com.shop.GoneRepository, which is not part of the domain model"
        );

        let err = MirrorError::InvalidDescriptor("empty type name".to_string());
        assert_eq!(err.to_string(), "Invalid descriptor: empty type name");
    }

    #[test]
    fn test_helper_method_exclusivity() {
        let not_init = MirrorError::NotInitialized;
        assert!(not_init.is_initialization_error());
        assert!(!not_init.is_not_found());
        assert!(!not_init.is_dangling_reference());

        let missing = MirrorError::not_found(DomainType::Entity, "x");
        assert!(missing.is_not_found());
        assert!(!missing.is_initialization_error());

        let wrong = MirrorError::WrongMirrorType {
            expected: DomainType::Entity,
            actual: DomainType::ValueObject,
            type_name: "x".to_string(),
        };
        assert!(wrong.is_not_found());

        let dangling = MirrorError::dangling("a", "b", DomainType::Repository);
        assert!(dangling.is_dangling_reference());
        assert!(!dangling.is_not_found());
    }

    /// Test serde_json error conversion
    #[test]
    fn test_serde_json_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let err: MirrorError = serde_err.into();
        match err {
            MirrorError::SerializationError(msg) => assert!(!msg.is_empty()),
            other => panic!("Expected SerializationError, got {other:?}"),
        }
    }

    #[test]
    fn test_error_clone() {
        let original = MirrorError::dangling("a", "b", DomainType::DomainEvent);
        assert_eq!(original.to_string(), original.clone().to_string());
    }
}
