//! Ingredient edges and the items they point at.

use crate::mixture::Mixture;
use mx_catalog::SubstanceId;
use mx_core::IngredientId;

/// Stateless reference to a catalog substance. Mass lives on the edge.
#[derive(Debug, Clone, PartialEq)]
pub struct SubstanceComponent {
    pub substance_id: SubstanceId,
}

impl SubstanceComponent {
    pub fn new(substance_id: impl Into<SubstanceId>) -> Self {
        Self {
            substance_id: substance_id.into(),
        }
    }
}

/// What an ingredient edge points at.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    Substance(SubstanceComponent),
    Mixture(Mixture),
}

impl Item {
    pub fn substance(substance_id: impl Into<SubstanceId>) -> Self {
        Item::Substance(SubstanceComponent::new(substance_id))
    }

    pub fn as_mixture(&self) -> Option<&Mixture> {
        match self {
            Item::Mixture(mixture) => Some(mixture),
            Item::Substance(_) => None,
        }
    }

    pub fn as_substance(&self) -> Option<&SubstanceId> {
        match self {
            Item::Substance(component) => Some(&component.substance_id),
            Item::Mixture(_) => None,
        }
    }

    /// Id an edge pointing at this item must carry: a mixture's own id,
    /// otherwise a freshly minted one.
    pub(crate) fn edge_id(&self) -> IngredientId {
        match self {
            Item::Mixture(mixture) => mixture.id().clone(),
            Item::Substance(_) => IngredientId::mint(),
        }
    }
}

/// One edge of a mixture.
///
/// A negative `mass` is remembered proportion: the edge is currently zeroed and
/// its magnitude is restored when the owning mixture regains mass.
#[derive(Debug, Clone, PartialEq)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    /// [g]
    pub mass: f64,
    pub notes: String,
    pub item: Item,
}

impl Ingredient {
    pub fn new(item: Item, mass: f64) -> Self {
        let name = match &item {
            Item::Substance(component) => component.substance_id.to_string(),
            Item::Mixture(mixture) => mixture.id().to_string(),
        };
        Self {
            id: item.edge_id(),
            name,
            mass,
            notes: String::new(),
            item,
        }
    }

    pub fn substance(substance_id: impl Into<SubstanceId>, mass: f64) -> Self {
        Self::new(Item::substance(substance_id), mass)
    }

    pub fn mixture(mixture: Mixture, mass: f64) -> Self {
        Self::new(Item::Mixture(mixture), mass)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Mass that currently counts; remembered (negative) masses count as zero.
    pub fn active_mass(&self) -> f64 {
        self.mass.max(0.0)
    }

    pub fn is_zeroed(&self) -> bool {
        self.mass <= 0.0
    }
}
