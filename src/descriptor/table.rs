// Copyright 2025 Cowboy AI, LLC.

//! Descriptor table with superclass chains, interface closure and capability inheritance

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

use super::{Capability, TypeDescriptor};
use crate::errors::{MirrorError, MirrorResult};

/// Closed set of raw descriptors keyed by fully-qualified type name
///
/// Lookups over the supertype graph are cycle-safe: a malformed table whose
/// hierarchy loops back on itself terminates instead of recursing forever.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DescriptorTable {
    descriptors: IndexMap<String, TypeDescriptor>,
}

impl DescriptorTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table, rejecting duplicate or empty type names
    pub fn from_descriptors<I>(descriptors: I) -> MirrorResult<Self>
    where
        I: IntoIterator<Item = TypeDescriptor>,
    {
        let mut table = Self::new();
        for descriptor in descriptors {
            table.insert(descriptor)?;
        }
        Ok(table)
    }

    /// Add a descriptor; type names must be unique and non-empty
    pub fn insert(&mut self, descriptor: TypeDescriptor) -> MirrorResult<()> {
        if descriptor.type_name.trim().is_empty() {
            return Err(MirrorError::InvalidDescriptor(
                "type name must not be empty".to_string(),
            ));
        }
        if self.descriptors.contains_key(&descriptor.type_name) {
            return Err(MirrorError::InvalidDescriptor(format!(
                "duplicate descriptor for {}",
                descriptor.type_name
            )));
        }
        self.descriptors
            .insert(descriptor.type_name.clone(), descriptor);
        Ok(())
    }

    /// Look up a descriptor
    pub fn get(&self, type_name: &str) -> Option<&TypeDescriptor> {
        self.descriptors.get(type_name)
    }

    /// Check membership
    pub fn contains(&self, type_name: &str) -> bool {
        self.descriptors.contains_key(type_name)
    }

    /// Iterate descriptors in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.descriptors.values()
    }

    /// Number of descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// No descriptors
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Superclass chain of `type_name`, nearest first
    ///
    /// The walk continues while the superclass is described in the table; the
    /// first undescribed superclass name is included and ends the chain.
    pub fn superclass_chain(&self, type_name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::from([type_name]);
        let mut current = self.get(type_name);
        while let Some(descriptor) = current {
            let Some(super_name) = descriptor.super_type_name.as_deref() else {
                break;
            };
            if !seen.insert(super_name) {
                break;
            }
            chain.push(super_name.to_string());
            current = self.get(super_name);
        }
        chain
    }

    /// Every interface implemented directly, through super-interfaces or through superclasses
    ///
    /// Order: the type's own interfaces (breadth-first through their
    /// super-interfaces), then those contributed by each superclass.
    pub fn all_interfaces(&self, type_name: &str) -> Vec<String> {
        let mut result: Vec<String> = Vec::new();
        let mut visited: HashSet<String> = HashSet::new();
        let owners = std::iter::once(type_name.to_string()).chain(self.superclass_chain(type_name));
        for owner in owners {
            let Some(descriptor) = self.get(&owner) else {
                continue;
            };
            let mut queue: std::collections::VecDeque<String> =
                descriptor.interface_type_names.iter().cloned().collect();
            while let Some(interface) = queue.pop_front() {
                if !visited.insert(interface.clone()) {
                    continue;
                }
                if let Some(interface_descriptor) = self.get(&interface) {
                    queue.extend(interface_descriptor.interface_type_names.iter().cloned());
                    // interfaces may also be described with a "superclass" by scanners
                    if let Some(parent) = &interface_descriptor.super_type_name {
                        queue.push_back(parent.clone());
                    }
                }
                result.push(interface);
            }
        }
        result
    }

    /// Capabilities of `type_name`, including those inherited from every supertype
    pub fn capabilities_of(&self, type_name: &str) -> BTreeSet<Capability> {
        let mut capabilities = BTreeSet::new();
        let mut visited: HashSet<&str> = HashSet::new();
        let mut stack: Vec<&str> = vec![type_name];
        while let Some(name) = stack.pop() {
            if !visited.insert(name) {
                continue;
            }
            let Some(descriptor) = self.get(name) else {
                continue;
            };
            capabilities.extend(descriptor.capabilities.iter().copied());
            if let Some(super_name) = descriptor.super_type_name.as_deref() {
                stack.push(super_name);
            }
            stack.extend(descriptor.interface_type_names.iter().map(String::as_str));
        }
        capabilities
    }

    /// `type_name` is `ancestor` or has it among its supertypes
    pub fn is_assignable_to(&self, type_name: &str, ancestor: &str) -> bool {
        type_name == ancestor
            || self.superclass_chain(type_name).iter().any(|n| n == ancestor)
            || self.all_interfaces(type_name).iter().any(|n| n == ancestor)
    }
}

impl FromIterator<TypeDescriptor> for DescriptorTable {
    /// Collect descriptors; a later duplicate replaces the earlier one
    fn from_iter<T: IntoIterator<Item = TypeDescriptor>>(iter: T) -> Self {
        Self {
            descriptors: iter
                .into_iter()
                .map(|d| (d.type_name.clone(), d))
                .collect(),
        }
    }
}
