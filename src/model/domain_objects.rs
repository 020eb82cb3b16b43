// Copyright 2025 Cowboy AI, LLC.

//! Views over domain objects: aggregate roots, entities and value-like types

use super::visitor::{CollectingVisitor, ContainmentWalker, DomainObjectVisitor};
use super::{MessageLinks, RepositoryMirror, TypeMirror, TypeMirrorRef};
use crate::mirror::{DomainTypeMirror, FieldMirror, MirrorKind};

mirror_view! {
    /// Aggregate root: consistency boundary, also an entity
    AggregateRootMirror, AggregateRoot, deep
}

mirror_view! {
    /// Entity living inside an aggregate
    EntityMirror, Entity, deep
}

mirror_view! {
    /// Immutable value object
    ValueObjectMirror, ValueObject, deep
}

mirror_view! {
    /// Identity value of an entity
    IdentityMirror, Identity, deep
}

mirror_view! {
    /// Enumeration used as a value
    EnumMirror, Enum, deep
}

/// Containment structure shared by all domain objects
pub trait DomainObjectMirror<'m>: TypeMirror<'m> + MessageLinks {
    /// Walk the containment structure starting here
    fn visit_contained(&self, visitor: &mut dyn DomainObjectVisitor<'m>) {
        ContainmentWalker::new(self.model()).walk(self.mirror(), visitor);
    }

    /// This object and every domain object it contains, each once, in walk order
    fn contained_domain_objects(&self) -> Vec<TypeMirrorRef<'m>> {
        let mut visitor = CollectingVisitor::default();
        self.visit_contained(&mut visitor);
        visitor.visited.into_iter().map(|(mirror, _)| mirror).collect()
    }
}

impl<'m> DomainObjectMirror<'m> for AggregateRootMirror<'m> {}
impl<'m> DomainObjectMirror<'m> for EntityMirror<'m> {}
impl<'m> DomainObjectMirror<'m> for ValueObjectMirror<'m> {}
impl<'m> DomainObjectMirror<'m> for IdentityMirror<'m> {}
impl<'m> DomainObjectMirror<'m> for EnumMirror<'m> {}

impl<'m> AggregateRootMirror<'m> {
    /// Repository managing this aggregate, if one is registered
    pub fn repository(&self) -> Option<RepositoryMirror<'m>> {
        self.model.repository_mirror_for(&self.mirror.type_name).ok()
    }

    /// Mirror of the identity field's type
    pub fn identity_type(&self) -> Option<IdentityMirror<'m>> {
        identity_type_of(self.untyped())
    }

    /// Entities contained (directly or transitively) in this aggregate
    pub fn contained_entities(&self) -> Vec<EntityMirror<'m>> {
        self.contained_domain_objects()
            .into_iter()
            .filter_map(TypeMirrorRef::downcast)
            .collect()
    }
}

impl<'m> EntityMirror<'m> {
    /// Mirror of the identity field's type
    pub fn identity_type(&self) -> Option<IdentityMirror<'m>> {
        identity_type_of(self.untyped())
    }

    /// Aggregate roots containing this entity
    pub fn aggregate_roots(&self) -> Vec<AggregateRootMirror<'m>> {
        let name = self.mirror.type_name.as_str();
        self.model
            .views::<AggregateRootMirror<'m>>()
            .filter(|root| {
                root.contained_domain_objects()
                    .iter()
                    .skip(1)
                    .any(|contained| contained.mirror().type_name == name)
            })
            .collect()
    }
}

fn identity_type_of(entity: TypeMirrorRef<'_>) -> Option<IdentityMirror<'_>> {
    let field = entity.mirror().identity_field()?;
    entity.field_type_mirror(field)?.downcast()
}

impl<'m> IdentityMirror<'m> {
    /// Identities always wrap a single value
    pub fn is_singled_valued(&self) -> bool {
        true
    }

    /// First exposed (public-readable, non-static) field
    pub fn singled_valued_field(&self) -> Option<&'m FieldMirror> {
        self.mirror.exposed_fields().into_iter().next()
    }

    /// Element type name of the single value
    pub fn value_type_name(&self) -> Option<&'m str> {
        self.singled_valued_field().map(FieldMirror::type_name)
    }

    /// Entity or aggregate root identified by this type
    pub fn entity(&self) -> Option<TypeMirrorRef<'m>> {
        self.model.entity_for_identity(&self.mirror.type_name)
    }
}

fn single_exposed(mirror: &DomainTypeMirror) -> Option<&FieldMirror> {
    match mirror.exposed_fields().as_slice() {
        [only] => Some(*only),
        _ => None,
    }
}

impl<'m> ValueObjectMirror<'m> {
    /// Exactly one exposed field
    pub fn is_singled_valued(&self) -> bool {
        self.singled_valued_field().is_some()
    }

    /// The exposed field when there is exactly one
    pub fn singled_valued_field(&self) -> Option<&'m FieldMirror> {
        single_exposed(self.mirror)
    }
}

impl<'m> EnumMirror<'m> {
    /// Exactly one exposed field
    pub fn is_singled_valued(&self) -> bool {
        self.singled_valued_field().is_some()
    }

    /// The exposed field when there is exactly one
    pub fn singled_valued_field(&self) -> Option<&'m FieldMirror> {
        single_exposed(self.mirror)
    }

    /// Constant names in declaration order
    pub fn enum_values(&self) -> &'m [String] {
        let mirror: &'m DomainTypeMirror = self.mirror;
        match &mirror.kind {
            MirrorKind::Enum(payload) => &payload.enum_values,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DomainModel;
    use crate::domain_type::DomainType;
    use crate::mirror::{
        AccessLevel, AssertedContainableTypeMirror, EntityPayload, EnumPayload, MethodMirror,
    };
    use indexmap::IndexMap;

    fn field(
        owner: &str,
        name: &str,
        type_name: &str,
        domain_type: DomainType,
        public: bool,
    ) -> FieldMirror {
        FieldMirror {
            name: name.to_string(),
            field_type: AssertedContainableTypeMirror::simple(type_name, domain_type),
            declared_by_type_name: owner.to_string(),
            access_level: if public { AccessLevel::Public } else { AccessLevel::Private },
            modifiable: false,
            public_readable: public,
            public_writeable: false,
            is_identity_field: false,
            is_static: false,
            is_hidden: false,
        }
    }

    fn publishing(owner: &str, event: &str) -> MethodMirror {
        MethodMirror {
            name: "act".to_string(),
            declared_by_type_name: owner.to_string(),
            access_level: AccessLevel::Public,
            parameters: Vec::new(),
            return_type: None,
            overridden: false,
            is_static: false,
            is_getter: false,
            is_setter: false,
            published_event_type_names: vec![event.to_string()],
            listened_event_type_name: None,
        }
    }

    fn model() -> DomainModel {
        let mut order = DomainTypeMirror::new(
            "s.Order",
            MirrorKind::AggregateRoot(EntityPayload {
                identity_field_name: Some("id".to_string()),
                ..EntityPayload::default()
            }),
        );
        order.all_fields = vec![
            field("s.Order", "id", "s.OrderId", DomainType::Identity, true),
            field("s.Order", "lines", "s.OrderLine", DomainType::Entity, false),
        ];

        let mut line =
            DomainTypeMirror::new("s.OrderLine", MirrorKind::Entity(EntityPayload::default()));
        line.methods = vec![publishing("s.OrderLine", "s.LineShipped")];

        let mut order_id = DomainTypeMirror::new("s.OrderId", MirrorKind::Identity);
        order_id.all_fields = vec![
            field("s.OrderId", "value", "java.lang.String", DomainType::NonDomain, true),
            field("s.OrderId", "extra", "java.lang.String", DomainType::NonDomain, true),
        ];

        let mut status = DomainTypeMirror::new(
            "s.Status",
            MirrorKind::Enum(EnumPayload {
                enum_values: vec!["OPEN".to_string(), "CLOSED".to_string()],
            }),
        );
        status.all_fields = vec![field("s.Status", "code", "int", DomainType::NonDomain, true)];

        let event = DomainTypeMirror::new("s.LineShipped", MirrorKind::DomainEvent);

        let map: IndexMap<String, DomainTypeMirror> = [order, line, order_id, status, event]
            .into_iter()
            .map(|m| (m.type_name.clone(), m))
            .collect();
        DomainModel::assemble(map, ["s"])
    }

    #[test]
    fn test_deep_publishes_through_contained_entity() {
        let model = model();
        let order = model.aggregate_root_mirror_for("s.Order").unwrap();
        let event = model.domain_event_mirror_for("s.LineShipped").unwrap();
        assert!(order.publishes(&event));
        assert!(!order.listens_to(&event));

        let contained: Vec<&str> = order
            .contained_domain_objects()
            .iter()
            .map(|m| m.mirror().type_name.as_str())
            .collect();
        assert_eq!(contained, vec!["s.Order", "s.OrderId", "s.OrderLine"]);
        assert_eq!(order.contained_entities().len(), 1);
    }

    #[test]
    fn test_identity_first_exposed_field_wins() {
        let model = model();
        let id = model.identity_mirror_for("s.OrderId").unwrap();
        assert!(id.is_singled_valued());
        assert_eq!(id.singled_valued_field().map(|f| f.name.as_str()), Some("value"));
        assert_eq!(id.value_type_name(), Some("java.lang.String"));
        assert_eq!(
            id.entity().map(|e| e.mirror().type_name.clone()),
            Some("s.Order".to_string())
        );

        let order = model.aggregate_root_mirror_for("s.Order").unwrap();
        assert_eq!(order.identity_type(), Some(id));
    }

    #[test]
    fn test_enum_values_and_single_value() {
        let model = model();
        let status = model.enum_mirror_for("s.Status").unwrap();
        assert_eq!(status.enum_values(), &["OPEN".to_string(), "CLOSED".to_string()]);
        assert!(status.is_singled_valued());
        assert_eq!(status.singled_valued_field().map(|f| f.name.as_str()), Some("code"));
    }

    #[test]
    fn test_entity_knows_its_aggregates() {
        let model = model();
        let line = model.entity_mirror_for("s.OrderLine").unwrap();
        let roots = line.aggregate_roots();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].type_name, "s.Order");
    }
}
