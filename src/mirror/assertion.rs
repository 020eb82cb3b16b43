// Copyright 2025 Cowboy AI, LLC.

//! Declarative assertions attached to fields, parameters and containers

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Kind of declared constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AssertionType {
    /// Value must be null/absent
    IsNull,
    /// Value must be present
    IsNotNull,
    /// Boolean must be true
    IsTrue,
    /// Boolean must be false
    IsFalse,
    /// String or collection must be empty
    IsEmpty,
    /// String or collection must not be empty
    IsNotEmpty,
    /// String must contain non-whitespace
    IsNotBlank,
    /// String length within [param1, param2]
    HasLength,
    /// String length at most param1
    HasMaxLength,
    /// String length at least param1
    HasMinLength,
    /// Collection size within [param1, param2]
    HasSize,
    /// Collection size at most param1
    HasMaxSize,
    /// Collection size at least param1
    HasMinSize,
    /// Number within [param1, param2]
    IsInRange,
    /// Number at least param1
    IsGreaterOrEqual,
    /// Number at most param1
    IsLessOrEqual,
    /// Number strictly positive
    IsPositive,
    /// Number strictly negative
    IsNegative,
    /// Temporal value in the past
    IsPast,
    /// Temporal value in the future
    IsFuture,
    /// String matches the pattern in param1
    RegEx,
    /// String is an e-mail address
    IsValidEmail,
}

impl AssertionType {
    /// Size and length constraints apply to the whole value rather than its parts
    pub fn is_size_constraint(&self) -> bool {
        matches!(
            self,
            AssertionType::HasLength
                | AssertionType::HasMaxLength
                | AssertionType::HasMinLength
                | AssertionType::HasSize
                | AssertionType::HasMaxSize
                | AssertionType::HasMinSize
        )
    }

    /// Nullability constraints
    pub fn is_nullability_constraint(&self) -> bool {
        matches!(self, AssertionType::IsNull | AssertionType::IsNotNull)
    }
}

/// A single declared constraint
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssertionMirror {
    /// Constraint kind
    pub assertion_type: AssertionType,
    /// First parameter (lower bound, max, pattern)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param1: Option<String>,
    /// Second parameter (upper bound)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub param2: Option<String>,
    /// Message reported on violation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssertionMirror {
    /// Create an assertion without parameters
    pub fn new(assertion_type: AssertionType) -> Self {
        Self {
            assertion_type,
            param1: None,
            param2: None,
            message: None,
        }
    }

    /// Create an assertion with one parameter
    pub fn with_param(assertion_type: AssertionType, param1: impl Into<String>) -> Self {
        Self {
            param1: Some(param1.into()),
            ..Self::new(assertion_type)
        }
    }

    /// Create an assertion with a range
    pub fn with_range(
        assertion_type: AssertionType,
        param1: impl Into<String>,
        param2: impl Into<String>,
    ) -> Self {
        Self {
            param1: Some(param1.into()),
            param2: Some(param2.into()),
            ..Self::new(assertion_type)
        }
    }

    /// Attach a violation message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
