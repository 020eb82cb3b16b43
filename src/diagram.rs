// Copyright 2025 Cowboy AI, LLC.

//! Mermaid rendering of a domain model
//!
//! Nodes are grouped into one subgraph per bounded context and styled by
//! domain type. Edges cover containment, aggregate references, event and
//! command linkage and repository management. Only edges whose endpoints
//! are both rendered appear in the output.

use std::collections::HashSet;
use std::fmt::{self, Write};

use crate::domain_type::DomainType;
use crate::mirror::DomainTypeMirror;
use crate::model::{BoundedContextMirror, DomainModel, RepositoryMirror, TypeMirror, TypeMirrorRef};

/// Relationship drawn between two mirrors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramEdge {
    /// Entity or value held by a domain object
    Contains,
    /// Reference to another aggregate root
    References,
    /// Own method publishes an event
    Publishes,
    /// Own method listens to an event
    Listens,
    /// Own method processes a command
    Processes,
    /// Repository manages an aggregate root
    Manages,
}

impl DiagramEdge {
    fn arrow(self) -> &'static str {
        match self {
            DiagramEdge::Contains => "-->",
            DiagramEdge::References => "-.->",
            DiagramEdge::Publishes | DiagramEdge::Processes => "==>",
            DiagramEdge::Listens => "-.->",
            DiagramEdge::Manages => "-->",
        }
    }

    fn label(self) -> &'static str {
        match self {
            DiagramEdge::Contains => "contains",
            DiagramEdge::References => "references",
            DiagramEdge::Publishes => "publishes",
            DiagramEdge::Listens => "listens",
            DiagramEdge::Processes => "processes",
            DiagramEdge::Manages => "manages",
        }
    }
}

fn style_class(domain_type: DomainType) -> &'static str {
    match domain_type {
        DomainType::AggregateRoot => "aggregate",
        DomainType::Entity => "entity",
        DomainType::ValueObject | DomainType::Identity | DomainType::Enum => "valueObject",
        DomainType::DomainEvent => "event",
        DomainType::DomainCommand => "command",
        DomainType::ReadModel => "readModel",
        DomainType::Repository => "repository",
        DomainType::DomainService
        | DomainType::ApplicationService
        | DomainType::ServiceKind
        | DomainType::QueryHandler
        | DomainType::OutboundService => "service",
        DomainType::NonDomain => "nonDomain",
    }
}

const CLASS_DEFS: [(&str, &str); 8] = [
    ("aggregate", "fill:#f9f,stroke:#333,stroke-width:4px"),
    ("entity", "fill:#bbf,stroke:#333,stroke-width:2px"),
    ("valueObject", "fill:#bfb,stroke:#333,stroke-width:2px"),
    ("event", "fill:#fbf,stroke:#333,stroke-width:2px"),
    ("command", "fill:#fbb,stroke:#333,stroke-width:2px"),
    ("readModel", "fill:#bff,stroke:#333,stroke-width:2px"),
    ("repository", "fill:#ffb,stroke:#333,stroke-width:2px"),
    ("service", "fill:#eee,stroke:#333,stroke-width:2px"),
];

/// Mermaid node id for a type name
pub fn node_id(type_name: &str) -> String {
    type_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

fn simple_name(type_name: &str) -> &str {
    type_name.rsplit('.').next().unwrap_or(type_name)
}

/// Renders models and bounded contexts as Mermaid `graph TD` diagrams
#[derive(Debug, Clone, Copy)]
pub struct MermaidRenderer {
    /// Show field counts in node labels
    pub show_field_counts: bool,
}

impl Default for MermaidRenderer {
    fn default() -> Self {
        Self {
            show_field_counts: true,
        }
    }
}

impl MermaidRenderer {
    /// Renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Render every mirror of the model
    pub fn render_model(&self, model: &DomainModel) -> String {
        let mirrors: Vec<TypeMirrorRef<'_>> = model.type_mirrors().collect();
        self.render(model, &mirrors)
    }

    /// Render the mirrors of one bounded context
    pub fn render_bounded_context(&self, context: &BoundedContextMirror<'_>) -> String {
        self.render(context.model(), &context.all_type_mirrors())
    }

    /// Edges between the given mirrors, in model order
    pub fn edges<'m>(
        &self,
        model: &'m DomainModel,
        mirrors: &[TypeMirrorRef<'m>],
    ) -> Vec<(&'m str, DiagramEdge, &'m str)> {
        let rendered: HashSet<&str> = mirrors
            .iter()
            .map(|m| m.mirror().type_name.as_str())
            .collect();
        let commands: Vec<&DomainTypeMirror> = mirrors
            .iter()
            .map(|m| m.mirror())
            .filter(|m| m.domain_type() == DomainType::DomainCommand)
            .collect();
        let matching = model.config().command_matching;

        let mut edges = Vec::new();
        for view in mirrors {
            let mirror = view.mirror();
            let from = mirror.type_name.as_str();

            if mirror.domain_type().is_domain_object() {
                for field in mirror.all_fields.iter().filter(|f| !f.is_static) {
                    let relation = match field.domain_type() {
                        DomainType::AggregateRoot => DiagramEdge::References,
                        t if t == DomainType::Entity || t.is_value_like() => DiagramEdge::Contains,
                        _ => continue,
                    };
                    edges.push((from, relation, field.type_name()));
                }
            }
            for event in mirror.published_event_type_names() {
                edges.push((from, DiagramEdge::Publishes, event));
            }
            for event in mirror.listened_event_type_names() {
                edges.push((from, DiagramEdge::Listens, event));
            }
            for command in &commands {
                if mirror.own_methods_process(command, matching) {
                    edges.push((from, DiagramEdge::Processes, command.type_name.as_str()));
                }
            }
            if let Some(aggregate) = view
                .downcast::<RepositoryMirror<'m>>()
                .and_then(|repository| repository.managed_aggregate_type_name())
            {
                edges.push((from, DiagramEdge::Manages, aggregate));
            }
        }

        let mut seen = HashSet::new();
        edges.retain(|edge| {
            rendered.contains(edge.0) && rendered.contains(edge.2) && seen.insert(*edge)
        });
        edges
    }

    fn render(&self, model: &DomainModel, mirrors: &[TypeMirrorRef<'_>]) -> String {
        let mut output = String::new();
        self.write_diagram(&mut output, model, mirrors)
            .expect("writing to a String is infallible");
        output
    }

    fn write_diagram(
        &self,
        out: &mut String,
        model: &DomainModel,
        mirrors: &[TypeMirrorRef<'_>],
    ) -> fmt::Result {
        writeln!(out, "graph TD")?;
        writeln!(out, "    %% Node Styles")?;
        for (class, style) in CLASS_DEFS {
            writeln!(out, "    classDef {class} {style};")?;
        }
        writeln!(out)?;

        for context in model.bounded_contexts() {
            let members: Vec<&TypeMirrorRef<'_>> = mirrors
                .iter()
                .filter(|m| {
                    m.bounded_context().map(|bc| bc.package_name()) == Some(context.package_name())
                })
                .collect();
            if members.is_empty() {
                continue;
            }
            let package = context.package_name();
            writeln!(out, "    subgraph {}[\"{}\"]", node_id(package), package)?;
            for mirror in members {
                writeln!(out, "        {}", self.format_node(mirror.mirror()))?;
            }
            writeln!(out, "    end")?;
        }
        for mirror in mirrors.iter().filter(|m| m.bounded_context().is_none()) {
            writeln!(out, "    {}", self.format_node(mirror.mirror()))?;
        }

        writeln!(out)?;
        writeln!(out, "    %% Relationships")?;
        for (from, relation, to) in self.edges(model, mirrors) {
            writeln!(
                out,
                "    {} {}|{}| {}",
                node_id(from),
                relation.arrow(),
                relation.label(),
                node_id(to)
            )?;
        }

        writeln!(out)?;
        writeln!(out, "    %% Apply Styles")?;
        for mirror in mirrors {
            writeln!(
                out,
                "    class {} {};",
                node_id(&mirror.mirror().type_name),
                style_class(mirror.mirror().domain_type())
            )?;
        }
        Ok(())
    }

    fn format_node(&self, mirror: &DomainTypeMirror) -> String {
        let mut label = format!(
            "{}<br/><i>{}</i>",
            simple_name(&mirror.type_name),
            mirror.domain_type().display_name()
        );
        if self.show_field_counts && !mirror.all_fields.is_empty() {
            label.push_str(&format!("<br/>{} fields", mirror.all_fields.len()));
        }
        format!("{}[\"{}\"]", node_id(&mirror.type_name), label)
    }
}
