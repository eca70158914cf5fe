//! The recursive composition tree.

use crate::error::{MixtureError, MixtureResult};
use crate::ingredient::{Ingredient, Item};
use mx_core::{Id, IngredientId, MixtureId, ZERO_MASS_EPSILON};

/// A node of the composition tree: an id plus an ordered list of edges.
///
/// Ids are unique across the whole tree. Cloning is a deep copy that keeps
/// every id.
#[derive(Debug, Clone, PartialEq)]
pub struct Mixture {
    id: MixtureId,
    ingredients: Vec<Ingredient>,
}

impl Default for Mixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Mixture {
    /// Empty mixture with a freshly minted id.
    pub fn new() -> Self {
        Self::with_id(Id::mint())
    }

    pub fn with_id(id: impl Into<MixtureId>) -> Self {
        Self {
            id: id.into(),
            ingredients: Vec::new(),
        }
    }

    /// Assemble a node without checking id uniqueness.
    pub(crate) fn from_parts(id: MixtureId, ingredients: Vec<Ingredient>) -> Self {
        Self { id, ingredients }
    }

    pub fn id(&self) -> &MixtureId {
        &self.id
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }

    /// Total mass [g]: sum of the active edge masses.
    pub fn mass(&self) -> f64 {
        self.ingredients.iter().map(Ingredient::active_mass).sum()
    }

    /// Whether `id` names this mixture or any edge or node below it.
    pub fn contains_id(&self, id: &str) -> bool {
        if self.id.as_str() == id {
            return true;
        }
        self.ingredients.iter().any(|ingredient| {
            ingredient.id.as_str() == id
                || ingredient
                    .item
                    .as_mixture()
                    .is_some_and(|mixture| mixture.contains_id(id))
        })
    }

    /// Every id in the tree, root first.
    pub fn ids(&self) -> Vec<&Id> {
        let mut out = vec![&self.id];
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a Id>) {
        for ingredient in &self.ingredients {
            match &ingredient.item {
                // The edge carries the sub-mixture's id.
                Item::Mixture(mixture) => {
                    out.push(&mixture.id);
                    mixture.collect_ids(out);
                }
                Item::Substance(_) => out.push(&ingredient.id),
            }
        }
    }

    /// First id of `ingredient` (edge or nested) that already occurs in `self`.
    fn clashing_id(&self, ingredient: &Ingredient) -> Option<Id> {
        let mut incoming = vec![&ingredient.id];
        if let Item::Mixture(mixture) = &ingredient.item {
            mixture.collect_ids(&mut incoming);
        }
        incoming
            .into_iter()
            .find(|id| self.contains_id(id.as_str()))
            .cloned()
    }

    /// Append an edge. Rejects negative or non-finite masses, a mixture edge
    /// whose id is not the mixture's own, and any id that already occurs in
    /// the tree.
    pub fn add_ingredient(&mut self, ingredient: Ingredient) -> MixtureResult<IngredientId> {
        if !ingredient.mass.is_finite() || ingredient.mass < 0.0 {
            return Err(MixtureError::InvalidMass {
                what: ingredient.name.clone(),
                value: ingredient.mass,
            });
        }
        if let Item::Mixture(mixture) = &ingredient.item {
            if mixture.id() != &ingredient.id {
                return Err(MixtureError::EdgeIdMismatch {
                    edge: ingredient.id.clone(),
                    mixture: mixture.id().clone(),
                });
            }
        }
        if let Some(id) = self.clashing_id(&ingredient) {
            return Err(MixtureError::DuplicateId { id });
        }
        let id = ingredient.id.clone();
        self.ingredients.push(ingredient);
        Ok(id)
    }

    /// Remove a top-level edge.
    pub fn remove_ingredient(&mut self, id: &str) -> MixtureResult<Ingredient> {
        let index = self.position(id)?;
        Ok(self.ingredients.remove(index))
    }

    /// Swap the item of a top-level edge, keeping its mass, name and notes.
    ///
    /// Returns the edge's new id: the replacement mixture's id, or a fresh one.
    pub fn replace_ingredient(&mut self, id: &str, item: Item) -> MixtureResult<IngredientId> {
        let index = self.position(id)?;
        self.check_replacement(id, &item)?;
        Ok(replace_item(&mut self.ingredients[index], item))
    }

    /// Like [`Mixture::replace_ingredient`], but finds the edge anywhere in the
    /// tree (depth-first, first match).
    pub fn replace_ingredient_component(
        &mut self,
        id: &str,
        item: Item,
    ) -> MixtureResult<IngredientId> {
        self.check_replacement(id, &item)?;
        let ingredient = self
            .ingredient_mut(id)
            .ok_or_else(|| MixtureError::IngredientNotFound { id: id.into() })?;
        Ok(replace_item(ingredient, item))
    }

    fn check_replacement(&self, id: &str, item: &Item) -> MixtureResult<()> {
        let Some(current) = self.ingredient(id) else {
            return Err(MixtureError::IngredientNotFound { id: id.into() });
        };
        // Ids under the outgoing edge are free for reuse.
        let outgoing: Vec<&Id> = match &current.item {
            Item::Mixture(mixture) => mixture.ids(),
            Item::Substance(_) => vec![&current.id],
        };
        if let Item::Mixture(incoming) = item {
            for candidate in incoming.ids() {
                if !outgoing.contains(&candidate) && self.contains_id(candidate.as_str()) {
                    return Err(MixtureError::DuplicateId {
                        id: candidate.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn position(&self, id: &str) -> MixtureResult<usize> {
        self.ingredients
            .iter()
            .position(|ingredient| ingredient.id.as_str() == id)
            .ok_or_else(|| MixtureError::IngredientNotFound { id: id.into() })
    }

    /// Depth-first lookup of an edge anywhere in the tree.
    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        for ingredient in &self.ingredients {
            if ingredient.id.as_str() == id {
                return Some(ingredient);
            }
            if let Item::Mixture(mixture) = &ingredient.item
                && let Some(found) = mixture.ingredient(id)
            {
                return Some(found);
            }
        }
        None
    }

    fn ingredient_mut(&mut self, id: &str) -> Option<&mut Ingredient> {
        for ingredient in &mut self.ingredients {
            if ingredient.id.as_str() == id {
                return Some(ingredient);
            }
            if let Item::Mixture(mixture) = &mut ingredient.item
                && let Some(found) = mixture.ingredient_mut(id)
            {
                return Some(found);
            }
        }
        None
    }

    /// Set the mass [g] of the mixture itself or of an edge found depth-first.
    ///
    /// For the mixture, children are rescaled proportionally; a massless mixture
    /// restores proportions from remembered (negative) masses. An edge set below
    /// [`ZERO_MASS_EPSILON`] stores the negative of its previous magnitude.
    pub fn set_ingredient_mass(&mut self, mass: f64, id: &str) -> MixtureResult<()> {
        if !mass.is_finite() || mass < 0.0 {
            return Err(MixtureError::InvalidMass {
                what: id.to_string(),
                value: mass,
            });
        }
        if self.id.as_str() == id {
            self.set_total_mass(mass);
            return Ok(());
        }
        let ingredient = self
            .ingredient_mut(id)
            .ok_or_else(|| MixtureError::IngredientNotFound { id: id.into() })?;
        set_edge_mass(ingredient, mass);
        Ok(())
    }

    /// Multiply the active mass of the mixture or of one edge by `factor`.
    pub fn scale_ingredient(&mut self, id: &str, factor: f64) -> MixtureResult<()> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(MixtureError::InvalidMass {
                what: format!("scale factor for {id}"),
                value: factor,
            });
        }
        let current = if self.id.as_str() == id {
            self.mass()
        } else {
            self.ingredient(id)
                .map(Ingredient::active_mass)
                .ok_or_else(|| MixtureError::IngredientNotFound { id: id.into() })?
        };
        self.set_ingredient_mass(current * factor, id)
    }

    fn set_total_mass(&mut self, mass: f64) {
        let current = self.mass();

        if current >= ZERO_MASS_EPSILON {
            if mass < ZERO_MASS_EPSILON {
                for ingredient in &mut self.ingredients {
                    set_edge_mass(ingredient, 0.0);
                }
                return;
            }
            let factor = mass / current;
            for ingredient in self.ingredients.iter_mut().filter(|i| i.mass > 0.0) {
                ingredient.mass *= factor;
            }
            return;
        }

        if mass < ZERO_MASS_EPSILON || self.ingredients.is_empty() {
            return;
        }

        let remembered: f64 = self.ingredients.iter().map(|i| i.mass.abs()).sum();
        if remembered > 0.0 {
            for ingredient in &mut self.ingredients {
                ingredient.mass = ingredient.mass.abs() / remembered * mass;
            }
        } else {
            // Nothing to restore: share equally.
            let share = mass / self.ingredients.len() as f64;
            for ingredient in &mut self.ingredients {
                ingredient.mass = share;
            }
        }
    }
}

fn replace_item(ingredient: &mut Ingredient, item: Item) -> IngredientId {
    ingredient.id = item.edge_id();
    ingredient.item = item;
    ingredient.id.clone()
}

fn set_edge_mass(ingredient: &mut Ingredient, mass: f64) {
    if mass < ZERO_MASS_EPSILON {
        ingredient.mass = -ingredient.mass.abs();
    } else {
        ingredient.mass = mass;
    }
}
