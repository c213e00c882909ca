//! Hierarchy schema: the fixed root -> category -> entity tree shape.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

use panorama_core::EntityId;

/// One entity as declared by configuration: a column id plus its
/// display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySpec {
    /// Column id in the aligned table.
    pub id: EntityId,
    /// Display label for rendering.
    pub label: String,
}

impl EntitySpec {
    /// Creates an entity spec.
    #[must_use]
    pub fn new(id: impl Into<EntityId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One category declaration: id, label, and member entities in display
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySpec {
    /// Category node id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Member entities in display order.
    pub members: Vec<EntitySpec>,
}

impl CategorySpec {
    /// Creates a category with no members.
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            members: Vec::new(),
        }
    }

    /// Adds a member entity.
    #[must_use]
    pub fn member(mut self, id: impl Into<EntityId>, label: impl Into<String>) -> Self {
        self.members.push(EntitySpec::new(id, label));
        self
    }
}

/// The fixed tree shape: which categories exist and which entities
/// belong to which category, independent of data.
///
/// Membership is resolved into a strict partition once, at construction:
/// when overlapping configuration assigns an entity to more than one
/// category, the earliest declared category wins and the later
/// membership is dropped (logged). One entity can therefore never
/// contribute value to two sibling branches, which would break the
/// conservation invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchySchema {
    root_label: String,
    categories: Vec<CategorySpec>,
    category_of: HashMap<EntityId, String>,
}

impl HierarchySchema {
    /// Node id used for the root of every built tree.
    pub const ROOT_ID: &'static str = "root";

    /// Resolves category declarations into a partition.
    #[must_use]
    pub fn new(root_label: impl Into<String>, declared: Vec<CategorySpec>) -> Self {
        let mut category_of: HashMap<EntityId, String> = HashMap::new();
        let mut categories = Vec::with_capacity(declared.len());

        for category in declared {
            let mut resolved = CategorySpec::new(category.id.clone(), category.label.clone());
            for entity in category.members {
                match category_of.get(&entity.id) {
                    Some(winner) => {
                        warn!(
                            entity = %entity.id,
                            kept = %winner,
                            dropped = %category.id,
                            "entity declared in multiple categories, keeping earliest"
                        );
                    }
                    None => {
                        category_of.insert(entity.id.clone(), category.id.clone());
                        resolved.members.push(entity);
                    }
                }
            }
            categories.push(resolved);
        }

        Self {
            root_label: root_label.into(),
            categories,
            category_of,
        }
    }

    /// Returns the root display label.
    #[must_use]
    pub fn root_label(&self) -> &str {
        &self.root_label
    }

    /// Returns the resolved categories in declaration order.
    #[must_use]
    pub fn categories(&self) -> &[CategorySpec] {
        &self.categories
    }

    /// Returns the category owning `entity`, if the entity is in the
    /// schema.
    #[must_use]
    pub fn category_of(&self, entity: &str) -> Option<&str> {
        self.category_of.get(entity).map(String::as_str)
    }

    /// Returns every entity id in schema order.
    #[must_use]
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.categories
            .iter()
            .flat_map(|c| c.members.iter().map(|m| m.id.clone()))
            .collect()
    }

    /// Returns the number of entities in the resolved partition.
    #[must_use]
    pub fn num_entities(&self) -> usize {
        self.category_of.len()
    }
}
