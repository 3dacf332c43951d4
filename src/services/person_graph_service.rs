use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::database::entities::{
    groups, people, person_groups, relationship_types, relationships,
};
use crate::errors::{CoreError, CoreResult};
use crate::graph::{
    assemble_graph, AggregateRelationship, GraphPerson, GroupRef, PersonAggregate, RelatedPerson,
    RelationshipEdge, SocialGraph, TypeRef, TypeWithInverse,
};

/// Node id standing in for the viewing user.
pub fn user_node_id(user_id: &str) -> String {
    format!("user-{}", user_id)
}

/// Loads a person's one-hop network from the store and turns it into a graph.
///
/// Every read skips soft-deleted rows, so the aggregate handed to the
/// assembler never contains deleted people, groups, relationships or types.
pub struct PersonGraphService {
    db: DatabaseConnection,
}

impl PersonGraphService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn build_graph(&self, person_id: &str, user_id: &str) -> CoreResult<SocialGraph> {
        let aggregate = self.load_aggregate(person_id, user_id).await?;
        Ok(assemble_graph(&aggregate, &user_node_id(user_id)))
    }

    /// Fetch the focal person, owned by `user_id`, with everything the
    /// assembler needs. Fails with not found for missing or foreign people.
    pub async fn load_aggregate(
        &self,
        person_id: &str,
        user_id: &str,
    ) -> CoreResult<PersonAggregate> {
        let person = people::Entity::find_by_id(person_id.to_string())
            .filter(people::Column::UserId.eq(user_id))
            .filter(people::Column::DeletedAt.is_null())
            .one(&self.db)
            .await?
            .ok_or_else(|| CoreError::not_found("Person", person_id))?;

        let first_level = self.live_relationships_from(&[person.id.clone()]).await?;

        let mut related_ids: Vec<String> = Vec::new();
        for (_, related) in &first_level {
            if !related_ids.contains(&related.id) {
                related_ids.push(related.id.clone());
            }
        }

        let second_level = self.live_relationships_from(&related_ids).await?;
        let mut nested_by_person: HashMap<String, Vec<relationships::Model>> = HashMap::new();
        for (relationship, _) in second_level {
            nested_by_person
                .entry(relationship.person_id.clone())
                .or_default()
                .push(relationship);
        }

        let mut type_ids: HashSet<String> = HashSet::new();
        type_ids.extend(person.relationship_to_user_id.clone());
        for (relationship, related) in &first_level {
            type_ids.extend(relationship.relationship_type_id.clone());
            type_ids.extend(related.relationship_to_user_id.clone());
        }
        for relationship in nested_by_person.values().flatten() {
            type_ids.extend(relationship.relationship_type_id.clone());
        }
        let types = self.live_types(type_ids).await?;

        let mut person_ids = related_ids;
        person_ids.push(person.id.clone());
        let mut group_map = self.live_groups(&person_ids).await?;

        let relationships_from = first_level
            .into_iter()
            .map(|(relationship, related)| {
                let nested = nested_by_person
                    .get(&related.id)
                    .map(|rels| rels.iter().map(|r| to_edge(r, &types)).collect())
                    .unwrap_or_default();
                let groups = group_map.get(&related.id).cloned().unwrap_or_default();

                AggregateRelationship {
                    edge: to_edge(&relationship, &types),
                    related_person: RelatedPerson {
                        person: to_graph_person(&related, groups, &types),
                        relationships_from: nested,
                    },
                }
            })
            .collect();

        let groups = group_map.remove(&person.id).unwrap_or_default();
        Ok(PersonAggregate {
            person: to_graph_person(&person, groups, &types),
            relationships_from,
        })
    }

    /// Non-deleted relationships leaving any of `person_ids`, paired with
    /// their related person. Relationships to deleted people are dropped.
    async fn live_relationships_from(
        &self,
        person_ids: &[String],
    ) -> CoreResult<Vec<(relationships::Model, people::Model)>> {
        if person_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rels = relationships::Entity::find()
            .filter(relationships::Column::PersonId.is_in(person_ids.iter().cloned()))
            .filter(relationships::Column::DeletedAt.is_null())
            .order_by_asc(relationships::Column::CreatedAt)
            .order_by_asc(relationships::Column::Id)
            .all(&self.db)
            .await?;

        let related_ids: HashSet<String> =
            rels.iter().map(|r| r.related_person_id.clone()).collect();
        let related: HashMap<String, people::Model> = people::Entity::find()
            .filter(people::Column::Id.is_in(related_ids))
            .filter(people::Column::DeletedAt.is_null())
            .all(&self.db)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();

        let total = rels.len();
        let live: Vec<_> = rels
            .into_iter()
            .filter_map(|r| {
                let person = related.get(&r.related_person_id)?.clone();
                Some((r, person))
            })
            .collect();

        if live.len() != total {
            debug!(
                dropped = total - live.len(),
                "relationships to deleted people left out"
            );
        }

        Ok(live)
    }

    /// Non-deleted relationship types by id, each with its non-deleted inverse.
    async fn live_types(
        &self,
        ids: HashSet<String>,
    ) -> CoreResult<HashMap<String, TypeWithInverse>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let found = relationship_types::Entity::find()
            .filter(relationship_types::Column::Id.is_in(ids))
            .filter(relationship_types::Column::DeletedAt.is_null())
            .all(&self.db)
            .await?;

        let inverse_ids: HashSet<String> =
            found.iter().filter_map(|t| t.inverse_id.clone()).collect();
        let inverses: HashMap<String, TypeRef> = if inverse_ids.is_empty() {
            HashMap::new()
        } else {
            relationship_types::Entity::find()
                .filter(relationship_types::Column::Id.is_in(inverse_ids))
                .filter(relationship_types::Column::DeletedAt.is_null())
                .all(&self.db)
                .await?
                .into_iter()
                .map(|t| {
                    (
                        t.id,
                        TypeRef {
                            label: t.label,
                            color: t.color,
                        },
                    )
                })
                .collect()
        };

        Ok(found
            .into_iter()
            .map(|t| {
                let inverse = t
                    .inverse_id
                    .as_ref()
                    .and_then(|id| inverses.get(id).cloned());
                (
                    t.id,
                    TypeWithInverse {
                        label: t.label,
                        color: t.color,
                        inverse,
                    },
                )
            })
            .collect())
    }

    /// Non-deleted groups per person, ordered by group name.
    async fn live_groups(
        &self,
        person_ids: &[String],
    ) -> CoreResult<HashMap<String, Vec<GroupRef>>> {
        let memberships = person_groups::Entity::find()
            .filter(person_groups::Column::PersonId.is_in(person_ids.iter().cloned()))
            .all(&self.db)
            .await?;
        if memberships.is_empty() {
            return Ok(HashMap::new());
        }

        let group_ids: HashSet<_> = memberships.iter().map(|m| m.group_id.clone()).collect();
        let live_groups = groups::Entity::find()
            .filter(groups::Column::Id.is_in(group_ids))
            .filter(groups::Column::DeletedAt.is_null())
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await?;

        let mut by_person: HashMap<String, Vec<GroupRef>> = HashMap::new();
        for group in &live_groups {
            for membership in memberships.iter().filter(|m| m.group_id == group.id) {
                by_person
                    .entry(membership.person_id.clone())
                    .or_default()
                    .push(GroupRef {
                        name: group.name.clone(),
                        color: group.color.clone(),
                    });
            }
        }

        Ok(by_person)
    }
}

fn to_edge(
    relationship: &relationships::Model,
    types: &HashMap<String, TypeWithInverse>,
) -> RelationshipEdge {
    RelationshipEdge {
        person_id: relationship.person_id.clone(),
        related_person_id: relationship.related_person_id.clone(),
        relationship_type: relationship
            .relationship_type_id
            .as_ref()
            .and_then(|id| types.get(id).cloned()),
    }
}

fn to_graph_person(
    person: &people::Model,
    groups: Vec<GroupRef>,
    types: &HashMap<String, TypeWithInverse>,
) -> GraphPerson {
    GraphPerson {
        id: person.id.clone(),
        names: person.name_parts(),
        groups,
        relationship_to_user: person
            .relationship_to_user_id
            .as_ref()
            .and_then(|id| types.get(id).cloned()),
    }
}
