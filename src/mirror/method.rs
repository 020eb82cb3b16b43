// Copyright 2025 Cowboy AI, LLC.

//! Method mirrors with event and command linkage

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::containable::AssertedContainableTypeMirror;
use super::field::AccessLevel;
use crate::config::CommandMatching;

/// Mirror of a method parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParamMirror {
    /// Parameter name
    pub name: String,
    /// Parameter type with container shape
    #[serde(rename = "type")]
    pub param_type: AssertedContainableTypeMirror,
}

/// Mirror of a method (own or inherited) of a domain type
///
/// Event linkage is held by name and resolved against the model on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct MethodMirror {
    /// Method name
    pub name: String,
    /// Type declaring the method
    pub declared_by_type_name: String,
    /// Declared visibility
    pub access_level: AccessLevel,
    /// Parameters in declaration order
    #[serde(default)]
    pub parameters: Vec<ParamMirror>,
    /// Return type, `None` for void
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_type: Option<AssertedContainableTypeMirror>,
    /// Overrides a method of a supertype
    #[serde(default)]
    pub overridden: bool,
    /// Static method
    #[serde(default)]
    pub is_static: bool,
    /// Syntactic getter
    #[serde(default)]
    pub is_getter: bool,
    /// Syntactic setter
    #[serde(default)]
    pub is_setter: bool,
    /// Events this method declares to publish
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub published_event_type_names: Vec<String>,
    /// Event this method declares to listen to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub listened_event_type_name: Option<String>,
}

impl MethodMirror {
    /// Declares to publish the named event
    pub fn publishes_event(&self, event_type_name: &str) -> bool {
        self.published_event_type_names
            .iter()
            .any(|name| name == event_type_name)
    }

    /// Declares to listen to the named event
    pub fn listens_to_event(&self, event_type_name: &str) -> bool {
        self.listened_event_type_name.as_deref() == Some(event_type_name)
    }

    /// Takes the command as its single parameter
    ///
    /// `command_hierarchy` is the command's superclass chain; it is only
    /// consulted with [`CommandMatching::InheritanceAware`].
    pub fn processes_command(
        &self,
        command_type_name: &str,
        command_hierarchy: &[String],
        matching: CommandMatching,
    ) -> bool {
        let [param] = self.parameters.as_slice() else {
            return false;
        };
        let param_type = param.param_type.type_name.as_str();
        match matching {
            CommandMatching::Exact => param_type == command_type_name,
            CommandMatching::InheritanceAware => {
                param_type == command_type_name
                    || command_hierarchy.iter().any(|name| name == param_type)
            }
        }
    }

    /// Returns nothing
    pub fn is_void(&self) -> bool {
        self.return_type.is_none()
    }

    /// Parameter type names in declaration order
    pub fn parameter_type_names(&self) -> Vec<&str> {
        self.parameters
            .iter()
            .map(|p| p.param_type.type_name.as_str())
            .collect()
    }
}
