// Copyright 2025 Cowboy AI, LLC.

//! Containment traversal over domain objects
//!
//! Starting from a domain object, the walker follows entity and value
//! references (never aggregate-root references, which cross a consistency
//! boundary). Each (owner type, field name) edge is followed at most once and
//! each type is visited at most once, so self-referencing and mutually
//! referencing structures terminate.

use std::collections::HashSet;

use super::{DomainModel, TypeMirror, TypeMirrorRef};
use crate::mirror::{DomainTypeMirror, FieldMirror};

/// Observer of a containment walk
pub trait DomainObjectVisitor<'m> {
    /// Called once per distinct domain object, the start type first at depth 0
    fn visit_domain_object(&mut self, mirror: TypeMirrorRef<'m>, depth: usize);

    /// Called once per followed containment edge
    fn visit_reference(
        &mut self,
        _owner: TypeMirrorRef<'m>,
        _field: &'m FieldMirror,
        _target: TypeMirrorRef<'m>,
    ) {
    }
}

/// Depth-first containment walker
#[derive(Debug)]
pub struct ContainmentWalker<'m> {
    model: &'m DomainModel,
    visited_types: HashSet<&'m str>,
    visited_edges: HashSet<(&'m str, &'m str)>,
}

impl<'m> ContainmentWalker<'m> {
    /// Create a walker over `model`
    pub fn new(model: &'m DomainModel) -> Self {
        Self {
            model,
            visited_types: HashSet::new(),
            visited_edges: HashSet::new(),
        }
    }

    /// Walk everything reachable from `start`, reporting to `visitor`
    pub fn walk(
        mut self,
        start: &'m DomainTypeMirror,
        visitor: &mut dyn DomainObjectVisitor<'m>,
    ) {
        self.run(start, &mut |event: WalkEvent<'m>| {
            match event {
                WalkEvent::Object(mirror, depth) => visitor.visit_domain_object(mirror, depth),
                WalkEvent::Edge(owner, field, target) => {
                    visitor.visit_reference(owner, field, target)
                }
            }
            true
        });
    }

    /// Stop at the first visited domain object satisfying `predicate`
    pub fn any(
        mut self,
        start: &'m DomainTypeMirror,
        mut predicate: impl FnMut(&'m DomainTypeMirror) -> bool,
    ) -> bool {
        let mut found = false;
        self.run(start, &mut |event: WalkEvent<'m>| {
            if let WalkEvent::Object(mirror, _) = event {
                found = predicate(mirror.mirror());
            }
            !found
        });
        found
    }

    fn run(
        &mut self,
        start: &'m DomainTypeMirror,
        on_event: &mut dyn FnMut(WalkEvent<'m>) -> bool,
    ) {
        let mut stack: Vec<(&'m DomainTypeMirror, usize)> = vec![(start, 0)];
        self.visited_types.insert(start.type_name.as_str());

        while let Some((owner, depth)) = stack.pop() {
            let owner_ref = TypeMirrorRef::new(self.model, owner);
            if !on_event(WalkEvent::Object(owner_ref, depth)) {
                return;
            }

            let mut children = Vec::new();
            for field in owner.all_fields.iter().filter(|f| is_containment(f)) {
                if !self
                    .visited_edges
                    .insert((owner.type_name.as_str(), field.name.as_str()))
                {
                    continue;
                }
                let Some(target) = self.model.all_type_mirrors().get(field.type_name()) else {
                    continue;
                };
                if !target.domain_type().is_domain_object() {
                    continue;
                }
                let target_ref = TypeMirrorRef::new(self.model, target);
                if !on_event(WalkEvent::Edge(owner_ref, field, target_ref)) {
                    return;
                }
                if self.visited_types.insert(target.type_name.as_str()) {
                    children.push((target, depth + 1));
                }
            }
            // keep declaration order on the stack
            stack.extend(children.into_iter().rev());
        }
    }
}

enum WalkEvent<'m> {
    Object(TypeMirrorRef<'m>, usize),
    Edge(TypeMirrorRef<'m>, &'m FieldMirror, TypeMirrorRef<'m>),
}

fn is_containment(field: &FieldMirror) -> bool {
    !field.is_static && (field.is_entity_reference() || field.is_value_reference())
}

/// Visitor collecting visited domain objects in visit order
#[derive(Debug, Default)]
pub struct CollectingVisitor<'m> {
    /// Visited objects with their depth
    pub visited: Vec<(TypeMirrorRef<'m>, usize)>,
    /// Followed edges as (owner type, field name, target type)
    pub edges: Vec<(&'m str, &'m str, &'m str)>,
}

impl<'m> DomainObjectVisitor<'m> for CollectingVisitor<'m> {
    fn visit_domain_object(&mut self, mirror: TypeMirrorRef<'m>, depth: usize) {
        self.visited.push((mirror, depth));
    }

    fn visit_reference(
        &mut self,
        owner: TypeMirrorRef<'m>,
        field: &'m FieldMirror,
        target: TypeMirrorRef<'m>,
    ) {
        self.edges.push((
            owner.mirror().type_name.as_str(),
            field.name.as_str(),
            target.mirror().type_name.as_str(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_type::DomainType;
    use crate::mirror::{AccessLevel, AssertedContainableTypeMirror, EntityPayload, MirrorKind};
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;

    fn field(owner: &str, name: &str, type_name: &str, domain_type: DomainType) -> FieldMirror {
        FieldMirror {
            name: name.to_string(),
            field_type: AssertedContainableTypeMirror::simple(type_name, domain_type),
            declared_by_type_name: owner.to_string(),
            access_level: AccessLevel::Private,
            modifiable: true,
            public_readable: false,
            public_writeable: false,
            is_identity_field: false,
            is_static: false,
            is_hidden: false,
        }
    }

    fn entity(name: &str, kind: MirrorKind, fields: Vec<FieldMirror>) -> DomainTypeMirror {
        let mut mirror = DomainTypeMirror::new(name, kind);
        mirror.all_fields = fields;
        mirror
    }

    fn model() -> DomainModel {
        let node = "t.Node";
        let mirrors = vec![
            entity(
                "t.Tree",
                MirrorKind::AggregateRoot(EntityPayload::default()),
                vec![
                    field("t.Tree", "root", node, DomainType::Entity),
                    field("t.Tree", "other", "t.Forest", DomainType::AggregateRoot),
                ],
            ),
            entity(
                node,
                MirrorKind::Entity(EntityPayload::default()),
                vec![
                    field(node, "children", node, DomainType::Entity),
                    field(node, "parent", node, DomainType::Entity),
                    field(node, "label", "t.Label", DomainType::ValueObject),
                ],
            ),
            entity("t.Label", MirrorKind::ValueObject, vec![]),
            entity("t.Forest", MirrorKind::AggregateRoot(EntityPayload::default()), vec![]),
        ];
        let map: IndexMap<String, DomainTypeMirror> =
            mirrors.into_iter().map(|m| (m.type_name.clone(), m)).collect();
        DomainModel::assemble(map, Vec::<String>::new())
    }

    #[test]
    fn test_walk_terminates_on_self_references() {
        let model = model();
        let tree = model.all_type_mirrors().get("t.Tree").unwrap();
        let mut visitor = CollectingVisitor::default();
        ContainmentWalker::new(&model).walk(tree, &mut visitor);

        let visited: Vec<(&str, usize)> = visitor
            .visited
            .iter()
            .map(|(m, d)| (m.mirror().type_name.as_str(), *d))
            .collect();
        assert_eq!(visited, vec![("t.Tree", 0), ("t.Node", 1), ("t.Label", 2)]);
        assert_eq!(
            visitor.edges,
            vec![
                ("t.Tree", "root", "t.Node"),
                ("t.Node", "children", "t.Node"),
                ("t.Node", "parent", "t.Node"),
                ("t.Node", "label", "t.Label"),
            ]
        );
    }

    #[test]
    fn test_any_stops_at_first_match() {
        let model = model();
        let tree = model.all_type_mirrors().get("t.Tree").unwrap();
        let mut seen = Vec::new();
        let found = ContainmentWalker::new(&model).any(tree, |m| {
            seen.push(m.type_name.clone());
            m.type_name == "t.Node"
        });
        assert!(found);
        assert_eq!(seen, vec!["t.Tree".to_string(), "t.Node".to_string()]);
        assert!(!ContainmentWalker::new(&model).any(tree, |m| m.type_name == "t.Forest"));
    }
}
