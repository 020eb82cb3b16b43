// Copyright 2025 Cowboy AI, LLC.

//! Views over events, commands and read models

use super::{
    AggregateRootMirror, ApplicationServiceMirror, DomainServiceMirror, MessageLinks, MirrorView,
    OutboundServiceMirror, QueryHandlerMirror, RepositoryMirror, ServiceKindMirror, TypeMirror,
    TypeMirrorRef,
};
use crate::mirror::{DomainTypeMirror, MirrorKind};

mirror_view! {
    /// Domain event
    DomainEventMirror, DomainEvent, shallow
}

mirror_view! {
    /// Domain command
    DomainCommandMirror, DomainCommand, shallow
}

mirror_view! {
    /// Read model returned by query handlers
    ReadModelMirror, ReadModel, shallow
}

impl<'m> DomainEventMirror<'m> {
    /// Every mirror that publishes this event
    pub fn publishers(&self) -> Vec<TypeMirrorRef<'m>> {
        let event = self.mirror;
        self.model
            .type_mirrors()
            .filter(|m| m.publishes(event))
            .collect()
    }

    /// Every mirror that listens to this event
    pub fn listeners(&self) -> Vec<TypeMirrorRef<'m>> {
        let event = self.mirror;
        self.model
            .type_mirrors()
            .filter(|m| m.listens_to(event))
            .collect()
    }

    fn publishing<V>(&self) -> Vec<V>
    where
        V: MirrorView<'m> + MessageLinks + 'm,
    {
        let event = self.mirror;
        self.model.views::<V>().filter(|v| v.publishes(event)).collect()
    }

    fn listening<V>(&self) -> Vec<V>
    where
        V: MirrorView<'m> + MessageLinks + 'm,
    {
        let event = self.mirror;
        self.model.views::<V>().filter(|v| v.listens_to(event)).collect()
    }

    /// Aggregate roots publishing this event, directly or through contained objects
    pub fn publishing_aggregate_roots(&self) -> Vec<AggregateRootMirror<'m>> {
        self.publishing()
    }

    /// Domain services publishing this event
    pub fn publishing_domain_services(&self) -> Vec<DomainServiceMirror<'m>> {
        self.publishing()
    }

    /// Repositories publishing this event
    pub fn publishing_repositories(&self) -> Vec<RepositoryMirror<'m>> {
        self.publishing()
    }

    /// Application services publishing this event
    pub fn publishing_application_services(&self) -> Vec<ApplicationServiceMirror<'m>> {
        self.publishing()
    }

    /// Query handlers publishing this event
    pub fn publishing_query_handlers(&self) -> Vec<QueryHandlerMirror<'m>> {
        self.publishing()
    }

    /// Outbound services publishing this event
    pub fn publishing_outbound_services(&self) -> Vec<OutboundServiceMirror<'m>> {
        self.publishing()
    }

    /// Generic service kinds publishing this event
    pub fn publishing_service_kinds(&self) -> Vec<ServiceKindMirror<'m>> {
        self.publishing()
    }

    /// Aggregate roots listening to this event, directly or through contained objects
    pub fn listening_aggregate_roots(&self) -> Vec<AggregateRootMirror<'m>> {
        self.listening()
    }

    /// Domain services listening to this event
    pub fn listening_domain_services(&self) -> Vec<DomainServiceMirror<'m>> {
        self.listening()
    }

    /// Repositories listening to this event
    pub fn listening_repositories(&self) -> Vec<RepositoryMirror<'m>> {
        self.listening()
    }

    /// Application services listening to this event
    pub fn listening_application_services(&self) -> Vec<ApplicationServiceMirror<'m>> {
        self.listening()
    }

    /// Query handlers listening to this event
    pub fn listening_query_handlers(&self) -> Vec<QueryHandlerMirror<'m>> {
        self.listening()
    }

    /// Outbound services listening to this event
    pub fn listening_outbound_services(&self) -> Vec<OutboundServiceMirror<'m>> {
        self.listening()
    }

    /// Generic service kinds listening to this event
    pub fn listening_service_kinds(&self) -> Vec<ServiceKindMirror<'m>> {
        self.listening()
    }
}

impl<'m> DomainCommandMirror<'m> {
    fn payload(&self) -> Option<&'m crate::mirror::CommandPayload> {
        let mirror: &'m DomainTypeMirror = self.mirror;
        match &mirror.kind {
            MirrorKind::DomainCommand(payload) => Some(payload),
            _ => None,
        }
    }

    /// Declared identity type of the targeted aggregate
    pub fn aggregate_target_identity_type_name(&self) -> Option<&'m str> {
        self.payload()?.aggregate_target_identity_type_name.as_deref()
    }

    /// Declared name of the targeted domain service
    pub fn domain_service_target_type_name(&self) -> Option<&'m str> {
        self.payload()?.domain_service_target_type_name.as_deref()
    }

    /// Aggregate root whose identity has the declared target identity type
    pub fn aggregate_target(&self) -> Option<AggregateRootMirror<'m>> {
        let identity = self.aggregate_target_identity_type_name()?;
        self.model.views::<AggregateRootMirror<'m>>().find(|root| {
            root.mirror().identity_field().is_some_and(|f| f.type_name() == identity)
                || root
                    .mirror()
                    .kind
                    .entity_payload()
                    .and_then(|p| p.identity_type_name.as_deref())
                    == Some(identity)
        })
    }

    /// The declared target domain service, if registered
    pub fn domain_service_target(&self) -> Option<DomainServiceMirror<'m>> {
        let name = self.domain_service_target_type_name()?;
        self.model.domain_service_mirror_for(name).ok()
    }

    /// Every mirror that processes this command
    pub fn processors(&self) -> Vec<TypeMirrorRef<'m>> {
        let command = self.mirror;
        self.model
            .type_mirrors()
            .filter(|m| m.processes(command))
            .collect()
    }
}

impl<'m> ReadModelMirror<'m> {
    /// Query handlers providing this read model
    pub fn providers(&self) -> Vec<QueryHandlerMirror<'m>> {
        let name = self.mirror.type_name.as_str();
        self.model
            .views::<QueryHandlerMirror<'m>>()
            .filter(|handler| handler.provided_read_model_type_name() == Some(name))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CommandMatching, MirrorConfig};
    use crate::domain_type::DomainType;
    use crate::mirror::{
        AccessLevel, AssertedContainableTypeMirror, CommandPayload, EntityPayload, FieldMirror,
        MethodMirror, ParamMirror, QueryHandlerPayload, ServiceReferences,
    };
    use crate::model::DomainModel;
    use indexmap::IndexMap;

    fn method(
        owner: &str,
        param: Option<&str>,
        publishes: Option<&str>,
        listens: Option<&str>,
    ) -> MethodMirror {
        MethodMirror {
            name: "handle".to_string(),
            declared_by_type_name: owner.to_string(),
            access_level: AccessLevel::Public,
            parameters: param
                .map(|p| ParamMirror {
                    name: "p".to_string(),
                    param_type: AssertedContainableTypeMirror::simple(p, DomainType::DomainCommand),
                })
                .into_iter()
                .collect(),
            return_type: None,
            overridden: false,
            is_static: false,
            is_getter: false,
            is_setter: false,
            published_event_type_names: publishes.map(str::to_string).into_iter().collect(),
            listened_event_type_name: listens.map(str::to_string),
        }
    }

    fn model(config: MirrorConfig) -> DomainModel {
        let mut order = DomainTypeMirror::new(
            "s.Order",
            MirrorKind::AggregateRoot(EntityPayload {
                identity_field_name: Some("id".to_string()),
                ..EntityPayload::default()
            }),
        );
        order.all_fields = vec![FieldMirror {
            name: "id".to_string(),
            field_type: AssertedContainableTypeMirror::simple("s.OrderId", DomainType::Identity),
            declared_by_type_name: "s.Order".to_string(),
            access_level: AccessLevel::Public,
            modifiable: false,
            public_readable: true,
            public_writeable: false,
            is_identity_field: true,
            is_static: false,
            is_hidden: false,
        }];
        order.methods = vec![method("s.Order", Some("s.OrderCommand"), Some("s.Placed"), None)];

        let mut place = DomainTypeMirror::new(
            "s.PlaceOrder",
            MirrorKind::DomainCommand(CommandPayload {
                aggregate_target_identity_type_name: Some("s.OrderId".to_string()),
                domain_service_target_type_name: Some("s.Pricing".to_string()),
            }),
        );
        place.inheritance_hierarchy_type_names = vec!["s.OrderCommand".to_string()];

        let mut pricing = DomainTypeMirror::new(
            "s.Pricing",
            MirrorKind::DomainService(ServiceReferences::default()),
        );
        pricing.methods = vec![method("s.Pricing", Some("s.PlaceOrder"), None, Some("s.Placed"))];

        let handler = DomainTypeMirror::new(
            "s.OrderQueries",
            MirrorKind::QueryHandler(QueryHandlerPayload {
                provided_read_model_type_name: Some("s.OrderView".to_string()),
                ..QueryHandlerPayload::default()
            }),
        );

        let mirrors = [
            order,
            place,
            pricing,
            handler,
            DomainTypeMirror::new("s.Placed", MirrorKind::DomainEvent),
            DomainTypeMirror::new("s.OrderView", MirrorKind::ReadModel),
        ];
        let map: IndexMap<String, DomainTypeMirror> =
            mirrors.into_iter().map(|m| (m.type_name.clone(), m)).collect();
        DomainModel::assemble_with_config(map, ["s"], config)
    }

    #[test]
    fn test_event_publishers_and_listeners() {
        let model = model(MirrorConfig::default());
        let placed = model.domain_event_mirror_for("s.Placed").unwrap();

        let publishers: Vec<&str> = placed
            .publishers()
            .iter()
            .map(|m| m.mirror().type_name.as_str())
            .collect();
        assert_eq!(publishers, vec!["s.Order"]);
        assert_eq!(placed.publishing_aggregate_roots().len(), 1);
        assert!(placed.publishing_domain_services().is_empty());

        assert_eq!(placed.listening_domain_services().len(), 1);
        assert!(placed.listening_aggregate_roots().is_empty());
        assert_eq!(placed.listeners().len(), 1);
    }

    #[test]
    fn test_command_targets() {
        let model = model(MirrorConfig::default());
        let place = model.domain_command_mirror_for("s.PlaceOrder").unwrap();
        assert_eq!(
            place.aggregate_target().map(|a| a.type_name.clone()),
            Some("s.Order".to_string())
        );
        assert_eq!(
            place.domain_service_target().map(|s| s.type_name.clone()),
            Some("s.Pricing".to_string())
        );
    }

    #[test]
    fn test_processors_depend_on_command_matching() {
        let exact = model(MirrorConfig::default());
        let place = exact.domain_command_mirror_for("s.PlaceOrder").unwrap();
        let names: Vec<String> = place.processors().iter().map(|m| m.type_name.clone()).collect();
        assert_eq!(names, vec!["s.Pricing".to_string()]);

        let aware = model(
            MirrorConfig::default().with_command_matching(CommandMatching::InheritanceAware),
        );
        let place = aware.domain_command_mirror_for("s.PlaceOrder").unwrap();
        let names: Vec<String> = place.processors().iter().map(|m| m.type_name.clone()).collect();
        assert_eq!(names, vec!["s.Order".to_string(), "s.Pricing".to_string()]);
    }

    #[test]
    fn test_read_model_providers() {
        let model = model(MirrorConfig::default());
        let view = model.read_model_mirror_for("s.OrderView").unwrap();
        assert_eq!(view.providers().len(), 1);
    }
}
