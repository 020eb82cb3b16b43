// Copyright 2025 Cowboy AI, LLC.

//! Resolved generic type trees

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Root type every unbounded type variable and wildcard resolves to
pub const OBJECT_TYPE_NAME: &str = "java.lang.Object";

/// Direction of a wildcard bound
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WildcardBoundType {
    /// `? extends T`
    Upper,
    /// `? super T`
    Lower,
}

/// Wildcard marker on a resolved generic type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WildcardMirror {
    /// Bound direction
    pub bound_type: WildcardBoundType,
}

/// A fully resolved generic type: `Map<String, List<? extends OrderLine>>`
///
/// For a wildcard the `type_name` is the bound type and `wildcard` records the
/// direction; an unbounded `?` resolves to an upper bound of [`OBJECT_TYPE_NAME`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGenericTypeMirror {
    /// Raw type name
    pub type_name: String,
    /// Resolved type arguments, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_types: Vec<ResolvedGenericTypeMirror>,
    /// Wildcard bound, when this node came from a wildcard
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<WildcardMirror>,
    /// Array of `type_name`
    #[serde(default)]
    pub is_array: bool,
}

impl ResolvedGenericTypeMirror {
    /// A plain, non-generic type
    pub fn simple(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            generic_types: Vec::new(),
            wildcard: None,
            is_array: false,
        }
    }

    /// A parameterised type
    pub fn parameterized(type_name: impl Into<String>, generic_types: Vec<Self>) -> Self {
        Self {
            generic_types,
            ..Self::simple(type_name)
        }
    }

    /// Mark this node as a wildcard bound
    pub fn as_wildcard(mut self, bound_type: WildcardBoundType) -> Self {
        self.wildcard = Some(WildcardMirror { bound_type });
        self
    }

    /// Mark this node as an array
    pub fn as_array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Depth-first iterator over every type name in the tree, this node first
    pub fn type_names(&self) -> Vec<&str> {
        let mut names = vec![self.type_name.as_str()];
        for generic in &self.generic_types {
            names.extend(generic.type_names());
        }
        names
    }
}

impl fmt::Display for ResolvedGenericTypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.wildcard {
            Some(WildcardMirror {
                bound_type: WildcardBoundType::Upper,
            }) if self.type_name == OBJECT_TYPE_NAME && self.generic_types.is_empty() => {
                return f.write_str("?");
            }
            Some(WildcardMirror {
                bound_type: WildcardBoundType::Upper,
            }) => f.write_str("? extends ")?,
            Some(WildcardMirror {
                bound_type: WildcardBoundType::Lower,
            }) => f.write_str("? super ")?,
            None => {}
        }
        f.write_str(&self.type_name)?;
        if !self.generic_types.is_empty() {
            f.write_str("<")?;
            for (i, generic) in self.generic_types.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{generic}")?;
            }
            f.write_str(">")?;
        }
        if self.is_array {
            f.write_str("[]")?;
        }
        Ok(())
    }
}
