//! Depth-first flattening of a mixture into absolute substance masses.

use crate::ingredient::Item;
use crate::mixture::Mixture;
use mx_acidbase::Solute;
use mx_catalog::{CitrusKind, SubstanceId};
use mx_core::{IngredientId, MixtureId};

/// One substance occurrence with its absolute mass in the root mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecoratedSubstance<'a> {
    pub substance_id: &'a SubstanceId,
    pub ingredient_id: &'a IngredientId,
    /// Mixture whose edge list holds the substance
    pub mixture_id: &'a MixtureId,
    /// [g]
    pub mass: f64,
    /// Citrus juice whose subtree contains the substance
    pub citrus: Option<CitrusKind>,
}

impl DecoratedSubstance<'_> {
    pub fn to_solute(&self) -> Solute {
        Solute {
            substance_id: self.substance_id.clone(),
            mass: self.mass,
            citrus: self.citrus,
        }
    }
}

struct Frame<'a> {
    mixture: &'a Mixture,
    next: usize,
    /// Absolute grams per gram of this mixture's own edge masses
    scale: f64,
    citrus: Option<CitrusKind>,
}

/// Lazy depth-first iterator over a mixture's substances.
///
/// A nested mixture's masses are scaled by `edge mass / nested total`. Nested
/// mixtures without mass are skipped.
pub struct Substances<'a> {
    stack: Vec<Frame<'a>>,
}

impl<'a> Substances<'a> {
    pub(crate) fn new(root: &'a Mixture) -> Self {
        Self {
            stack: vec![Frame {
                mixture: root,
                next: 0,
                scale: 1.0,
                citrus: CitrusKind::from_mixture_id(root.id().as_str()),
            }],
        }
    }
}

impl<'a> Iterator for Substances<'a> {
    type Item = DecoratedSubstance<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let frame = self.stack.last_mut()?;
            let mixture: &'a Mixture = frame.mixture;
            let Some(ingredient) = mixture.ingredients().get(frame.next) else {
                self.stack.pop();
                continue;
            };
            frame.next += 1;
            let (scale, citrus) = (frame.scale, frame.citrus);

            match &ingredient.item {
                Item::Substance(component) => {
                    return Some(DecoratedSubstance {
                        substance_id: &component.substance_id,
                        ingredient_id: &ingredient.id,
                        mixture_id: mixture.id(),
                        mass: ingredient.active_mass() * scale,
                        citrus,
                    });
                }
                Item::Mixture(nested) => {
                    let total = nested.mass();
                    if total <= 0.0 {
                        continue;
                    }
                    self.stack.push(Frame {
                        mixture: nested,
                        next: 0,
                        scale: scale * ingredient.active_mass() / total,
                        citrus: citrus.or_else(|| CitrusKind::from_mixture_id(nested.id().as_str())),
                    });
                }
            }
        }
    }
}

impl Mixture {
    /// Fresh depth-first walk over every substance in the tree.
    pub fn substances(&self) -> Substances<'_> {
        Substances::new(self)
    }
}
