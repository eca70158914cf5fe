//! Flat node-list form of a mixture tree.
//!
//! ```json
//! { "rootId": "m1",
//!   "nodes": [["m1", { "id": "m1", "ingredients": [{ "id": "e1", "mass": 40, "name": "Ethanol", "notes": "" }] }],
//!             ["e1", { "id": "ethanol" }]] }
//! ```
//!
//! A mixture node is keyed by its own id; a substance node is keyed by the id of
//! the edge pointing at it and holds the substance id.

use crate::error::{MixtureError, MixtureResult};
use crate::ingredient::{Ingredient, Item, SubstanceComponent};
use crate::mixture::Mixture;
use mx_catalog::{Catalog, SubstanceId};
use mx_core::Id;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedMixture {
    #[serde(rename = "rootId")]
    pub root_id: Id,
    pub nodes: Vec<(Id, SerializedNode)>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SerializedNode {
    Mixture(SerializedMixtureNode),
    Substance(SerializedSubstanceNode),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedMixtureNode {
    pub id: Id,
    pub ingredients: Vec<SerializedIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedSubstanceNode {
    pub id: SubstanceId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SerializedIngredient {
    pub id: Id,
    pub mass: f64,
    pub name: String,
    #[serde(default)]
    pub notes: String,
}

impl Mixture {
    pub fn to_serialized(&self) -> SerializedMixture {
        let mut nodes = Vec::new();
        push_nodes(self, &mut nodes);
        SerializedMixture {
            root_id: self.id().clone(),
            nodes,
        }
    }

    /// Rebuild a tree, resolving every substance against `catalog`.
    pub fn from_serialized(data: &SerializedMixture, catalog: &Catalog) -> MixtureResult<Self> {
        let mut index: HashMap<&Id, &SerializedNode> = HashMap::new();
        for (key, node) in &data.nodes {
            if index.insert(key, node).is_some() {
                return Err(MixtureError::DuplicateId { id: key.clone() });
            }
        }

        let mut builder = Builder {
            index,
            catalog,
            path: Vec::new(),
            seen: HashSet::new(),
        };
        if let SerializedNode::Substance(_) = builder.node(&data.root_id)? {
            return Err(MixtureError::RootNotMixture {
                id: data.root_id.clone(),
            });
        }
        let mixture = builder.mixture(&data.root_id)?;
        tracing::debug!(root = %data.root_id, nodes = data.nodes.len(), "deserialized mixture");
        Ok(mixture)
    }
}

fn push_nodes(mixture: &Mixture, nodes: &mut Vec<(Id, SerializedNode)>) {
    let ingredients = mixture
        .ingredients()
        .iter()
        .map(|ingredient| SerializedIngredient {
            id: ingredient.id.clone(),
            mass: ingredient.mass,
            name: ingredient.name.clone(),
            notes: ingredient.notes.clone(),
        })
        .collect();
    nodes.push((
        mixture.id().clone(),
        SerializedNode::Mixture(SerializedMixtureNode {
            id: mixture.id().clone(),
            ingredients,
        }),
    ));

    for ingredient in mixture.ingredients() {
        match &ingredient.item {
            Item::Substance(component) => nodes.push((
                ingredient.id.clone(),
                SerializedNode::Substance(SerializedSubstanceNode {
                    id: component.substance_id.clone(),
                }),
            )),
            Item::Mixture(nested) => push_nodes(nested, nodes),
        }
    }
}

struct Builder<'a> {
    index: HashMap<&'a Id, &'a SerializedNode>,
    catalog: &'a Catalog,
    /// Mixtures currently being built, root first
    path: Vec<&'a Id>,
    /// Every id already placed in the tree
    seen: HashSet<&'a Id>,
}

impl<'a> Builder<'a> {
    fn node(&self, id: &Id) -> MixtureResult<&'a SerializedNode> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| MixtureError::MissingNode { id: id.clone() })
    }

    fn mixture(&mut self, id: &'a Id) -> MixtureResult<Mixture> {
        if self.path.contains(&id) {
            return Err(MixtureError::Cycle { id: id.clone() });
        }
        let SerializedNode::Mixture(node) = self.node(id)? else {
            return Err(MixtureError::Malformed {
                what: format!("{id} is not a mixture node"),
            });
        };
        if &node.id != id {
            return Err(MixtureError::Malformed {
                what: format!("mixture node keyed {id} carries id {}", node.id),
            });
        }
        if !self.seen.insert(id) {
            return Err(MixtureError::DuplicateId { id: id.clone() });
        }

        self.path.push(id);
        let mut ingredients = Vec::with_capacity(node.ingredients.len());
        for edge in &node.ingredients {
            let item = match self.node(&edge.id)? {
                SerializedNode::Substance(substance) => {
                    if !self.seen.insert(&edge.id) {
                        return Err(MixtureError::DuplicateId {
                            id: edge.id.clone(),
                        });
                    }
                    self.catalog.lookup(substance.id.as_str())?;
                    Item::Substance(SubstanceComponent::new(substance.id.clone()))
                }
                SerializedNode::Mixture(_) => Item::Mixture(self.mixture(&edge.id)?),
            };
            ingredients.push(Ingredient {
                id: edge.id.clone(),
                name: edge.name.clone(),
                mass: edge.mass,
                notes: edge.notes.clone(),
                item,
            });
        }
        self.path.pop();

        Ok(Mixture::from_parts(id.clone(), ingredients))
    }
}
