// Copyright 2025 Cowboy AI, LLC.

//! Configuration for mirror building and graph queries

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// How a method parameter is matched against a command when answering `processes`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum CommandMatching {
    /// The single parameter's type name must equal the command type name
    #[default]
    Exact,
    /// A parameter typed as one of the command's supertypes also matches
    InheritanceAware,
}

/// Type names recognised as container wrappers when unwrapping field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContainerConventions {
    /// Optional wrappers
    pub optional_types: Vec<String>,
    /// Ordered collections
    pub list_types: Vec<String>,
    /// Set collections
    pub set_types: Vec<String>,
    /// Collections that are neither list nor set
    pub collection_types: Vec<String>,
    /// Lazy streams
    pub stream_types: Vec<String>,
}

impl Default for ContainerConventions {
    fn default() -> Self {
        let names = |list: &[&str]| -> Vec<String> { list.iter().map(|s| s.to_string()).collect() };
        Self {
            optional_types: names(&["java.util.Optional"]),
            list_types: names(&[
                "java.util.List",
                "java.util.ArrayList",
                "java.util.LinkedList",
                "java.util.concurrent.CopyOnWriteArrayList",
            ]),
            set_types: names(&[
                "java.util.Set",
                "java.util.HashSet",
                "java.util.LinkedHashSet",
                "java.util.SortedSet",
                "java.util.NavigableSet",
                "java.util.TreeSet",
                "java.util.EnumSet",
            ]),
            collection_types: names(&[
                "java.util.Collection",
                "java.lang.Iterable",
                "java.util.Queue",
                "java.util.Deque",
                "java.util.ArrayDeque",
            ]),
            stream_types: names(&["java.util.stream.Stream"]),
        }
    }
}

impl ContainerConventions {
    /// Check for an optional wrapper name
    pub fn is_optional(&self, type_name: &str) -> bool {
        self.optional_types.iter().any(|t| t == type_name)
    }

    /// Check for a list name
    pub fn is_list(&self, type_name: &str) -> bool {
        self.list_types.iter().any(|t| t == type_name)
    }

    /// Check for a set name
    pub fn is_set(&self, type_name: &str) -> bool {
        self.set_types.iter().any(|t| t == type_name)
    }

    /// Check for a plain collection name
    pub fn is_collection(&self, type_name: &str) -> bool {
        self.collection_types.iter().any(|t| t == type_name)
    }

    /// Check for a stream name
    pub fn is_stream(&self, type_name: &str) -> bool {
        self.stream_types.iter().any(|t| t == type_name)
    }
}

/// Mirror configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct MirrorConfig {
    /// Parameter matching used by `processes`
    pub command_matching: CommandMatching,
    /// Container wrapper names
    pub containers: ContainerConventions,
    /// Name prefixes of getter methods
    pub getter_prefixes: Vec<String>,
    /// Name prefix of setter methods
    pub setter_prefix: String,
    /// Accessor prefixes must be followed by an upper-case letter (`getTotal`, not `getaway`)
    pub capitalized_accessors: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            command_matching: CommandMatching::Exact,
            containers: ContainerConventions::default(),
            getter_prefixes: vec!["get".to_string(), "is".to_string()],
            setter_prefix: "set".to_string(),
            capitalized_accessors: true,
        }
    }
}

impl MirrorConfig {
    /// Replace the command matching mode
    pub fn with_command_matching(mut self, matching: CommandMatching) -> Self {
        self.command_matching = matching;
        self
    }

    /// Replace the container conventions
    pub fn with_containers(mut self, containers: ContainerConventions) -> Self {
        self.containers = containers;
        self
    }

    /// Replace the accessor capitalization rule
    pub fn with_capitalized_accessors(mut self, capitalized: bool) -> Self {
        self.capitalized_accessors = capitalized;
        self
    }

    /// Check a method name against the getter prefixes
    pub fn is_getter_name(&self, name: &str) -> bool {
        self.getter_prefixes
            .iter()
            .any(|prefix| self.has_accessor_prefix(name, prefix))
    }

    /// Check a method name against the setter prefix
    pub fn is_setter_name(&self, name: &str) -> bool {
        self.has_accessor_prefix(name, &self.setter_prefix)
    }

    /// Property name behind an accessor (`getTotalPrice` -> `totalPrice`)
    pub fn accessor_property(&self, name: &str) -> Option<String> {
        self.getter_prefixes
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.setter_prefix.as_str()))
            .filter(|prefix| self.has_accessor_prefix(name, prefix))
            .map(|prefix| decapitalize(&name[prefix.len()..]))
            .next()
    }

    // A bare prefix (`get`) is never an accessor
    fn has_accessor_prefix(&self, name: &str, prefix: &str) -> bool {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|first| !self.capitalized_accessors || first.is_uppercase())
    }
}

fn decapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
