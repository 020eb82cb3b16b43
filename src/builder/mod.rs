// Copyright 2025 Cowboy AI, LLC.

//! Mirror builders
//!
//! Turn a [`DescriptorTable`] into domain type mirrors:
//!
//! ```mermaid
//! graph LR
//!     D[TypeDescriptor] --> C[TypeClassifier]
//!     D --> F[FieldMirrorBuilder]
//!     D --> M[MethodMirrorBuilder]
//!     F --> T[ContainableTypeBuilder]
//!     M --> T
//!     C --> B[DomainTypeMirrorBuilder]
//!     F --> B
//!     M --> B
//!     B --> X[DomainTypeMirror]
//! ```

pub mod field_builder;
pub mod method_builder;
pub mod mirror_builder;
pub mod type_builder;

pub use field_builder::FieldMirrorBuilder;
pub use method_builder::MethodMirrorBuilder;
pub use mirror_builder::{DescriptorMirrorFactory, DomainTypeMirrorBuilder};
pub use type_builder::ContainableTypeBuilder;

use crate::descriptor::{DescriptorTable, TypeDescriptor};

/// `descriptor` and its described superclasses, root-most first
pub(crate) fn hierarchy_root_first<'t>(
    table: &'t DescriptorTable,
    descriptor: &'t TypeDescriptor,
) -> Vec<&'t TypeDescriptor> {
    let mut owners: Vec<&TypeDescriptor> = table
        .superclass_chain(&descriptor.type_name)
        .iter()
        .filter_map(|name| table.get(name))
        .collect();
    owners.reverse();
    owners.push(descriptor);
    owners
}
