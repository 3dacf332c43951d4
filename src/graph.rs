use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use crate::names::{format_graph_name, NameParts};

/// Fallback colour for edges between a person and the viewing user.
pub const USER_EDGE_COLOR: &str = "#9CA3AF";
/// Fallback colour for person-to-person relationship edges.
pub const RELATIONSHIP_EDGE_COLOR: &str = "#999999";
/// Fallback colour for a group without one.
pub const GROUP_COLOR: &str = "#3B82F6";
/// Label of the node standing in for the viewing user.
pub const USER_NODE_LABEL: &str = "You";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub label: String,
    pub groups: Vec<String>,
    pub colors: Vec<String>,
    pub is_center: bool,
}

/// Directed edge. Two edges are the same edge when all four fields match.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub relationship_type: String,
    pub color: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SocialGraph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

// Aggregate consumed by the assembler. Soft-deleted rows are already gone
// when one of these is built.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRef {
    pub label: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeWithInverse {
    pub label: String,
    pub color: Option<String>,
    pub inverse: Option<TypeRef>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupRef {
    pub name: String,
    pub color: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphPerson {
    pub id: String,
    pub names: NameParts,
    pub groups: Vec<GroupRef>,
    pub relationship_to_user: Option<TypeWithInverse>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelationshipEdge {
    pub person_id: String,
    pub related_person_id: String,
    pub relationship_type: Option<TypeWithInverse>,
}

/// A person one hop away, with that person's own outgoing relationships.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RelatedPerson {
    pub person: GraphPerson,
    pub relationships_from: Vec<RelationshipEdge>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateRelationship {
    pub edge: RelationshipEdge,
    pub related_person: RelatedPerson,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PersonAggregate {
    pub person: GraphPerson,
    pub relationships_from: Vec<AggregateRelationship>,
}

pub fn person_to_graph_node(person: &GraphPerson, is_center: bool) -> GraphNode {
    GraphNode {
        id: person.id.clone(),
        label: format_graph_name(&person.names),
        groups: person.groups.iter().map(|g| g.name.clone()).collect(),
        colors: person
            .groups
            .iter()
            .map(|g| g.color.clone().unwrap_or_else(|| GROUP_COLOR.to_string()))
            .collect(),
        is_center,
    }
}

pub fn user_graph_node(user_node_id: &str) -> GraphNode {
    GraphNode {
        id: user_node_id.to_string(),
        label: USER_NODE_LABEL.to_string(),
        groups: Vec::new(),
        colors: Vec::new(),
        is_center: false,
    }
}

/// Zero, one or two edges between a person and the viewing user.
pub fn relationships_with_user_to_edges(
    person: &GraphPerson,
    user_node_id: &str,
) -> Vec<GraphEdge> {
    let mut edges = Vec::new();

    if let Some(to_user) = &person.relationship_to_user {
        edges.push(GraphEdge {
            source: person.id.clone(),
            target: user_node_id.to_string(),
            relationship_type: to_user.label.clone(),
            color: color_or(&to_user.color, USER_EDGE_COLOR),
        });

        if let Some(inverse) = &to_user.inverse {
            edges.push(GraphEdge {
                source: user_node_id.to_string(),
                target: person.id.clone(),
                relationship_type: inverse.label.clone(),
                color: color_or(&inverse.color, USER_EDGE_COLOR),
            });
        }
    }

    edges
}

/// Forward edge of a relationship, `None` when its type is missing.
pub fn relationship_to_edge(relationship: &RelationshipEdge) -> Option<GraphEdge> {
    let relationship_type = relationship.relationship_type.as_ref()?;
    Some(GraphEdge {
        source: relationship.person_id.clone(),
        target: relationship.related_person_id.clone(),
        relationship_type: relationship_type.label.clone(),
        color: color_or(&relationship_type.color, RELATIONSHIP_EDGE_COLOR),
    })
}

/// Edge implied by the inverse of the relationship's type, pointing back.
pub fn relationship_to_inverse_edge(relationship: &RelationshipEdge) -> Option<GraphEdge> {
    let inverse = relationship.relationship_type.as_ref()?.inverse.as_ref()?;
    Some(GraphEdge {
        source: relationship.related_person_id.clone(),
        target: relationship.person_id.clone(),
        relationship_type: inverse.label.clone(),
        color: color_or(&inverse.color, RELATIONSHIP_EDGE_COLOR),
    })
}

fn color_or(color: &Option<String>, fallback: &str) -> String {
    color.clone().unwrap_or_else(|| fallback.to_string())
}

/// Builds the one-hop social graph around `aggregate.person`.
///
/// Nodes come out as center, user, then related people in scan order. Edges
/// are deduplicated on all four fields and keep the order they were produced
/// in: user edges first, then relationship edges of the focal person, then
/// relationship edges among related people. Edges at the second level are
/// only kept when both ends are already nodes of the graph.
pub fn assemble_graph(aggregate: &PersonAggregate, user_node_id: &str) -> SocialGraph {
    let mut nodes = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    let mut edges: IndexSet<GraphEdge> = IndexSet::new();
    let mut skipped = 0usize;

    let person = &aggregate.person;
    nodes.push(person_to_graph_node(person, true));
    seen.insert(person.id.as_str());

    nodes.push(user_graph_node(user_node_id));
    seen.insert(user_node_id);

    edges.extend(relationships_with_user_to_edges(person, user_node_id));

    for relationship in &aggregate.relationships_from {
        let related = &relationship.related_person.person;
        if seen.insert(related.id.as_str()) {
            nodes.push(person_to_graph_node(related, false));
        }
        edges.extend(relationships_with_user_to_edges(related, user_node_id));
    }

    for relationship in &aggregate.relationships_from {
        skipped += push_relationship_edges(&relationship.edge, &mut edges);
    }

    for relationship in &aggregate.relationships_from {
        for nested in &relationship.related_person.relationships_from {
            if !seen.contains(nested.person_id.as_str())
                || !seen.contains(nested.related_person_id.as_str())
            {
                continue;
            }
            skipped += push_relationship_edges(nested, &mut edges);
        }
    }

    debug!(
        person_id = %person.id,
        nodes = nodes.len(),
        edges = edges.len(),
        skipped_relationships = skipped,
        "assembled social graph"
    );

    SocialGraph {
        nodes,
        edges: edges.into_iter().collect(),
    }
}

/// Returns 1 when the relationship had no type and was skipped.
fn push_relationship_edges(
    relationship: &RelationshipEdge,
    edges: &mut IndexSet<GraphEdge>,
) -> usize {
    let Some(forward) = relationship_to_edge(relationship) else {
        debug!(
            person_id = %relationship.person_id,
            related_person_id = %relationship.related_person_id,
            "relationship without a type, no edge emitted"
        );
        return 1;
    };

    edges.insert(forward);
    if let Some(inverse) = relationship_to_inverse_edge(relationship) {
        edges.insert(inverse);
    }
    0
}
