use crate::parser::Formula;
use serde::Serialize;

/// What happened when a rule was applied to the current selection
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "formula", rename_all = "snake_case")]
pub enum ApplyOutcome {
    /// A new formula joined the inventory
    Derived(Formula),
    /// The rule worked, but the inventory already had its result
    AlreadyKnown(Formula),
    /// The selection does not fit the rule
    NotApplicable,
    NothingSelected,
}

impl ApplyOutcome {
    pub fn formula(&self) -> Option<&Formula> {
        match self {
            ApplyOutcome::Derived(f) | ApplyOutcome::AlreadyKnown(f) => Some(f),
            ApplyOutcome::NotApplicable | ApplyOutcome::NothingSelected => None,
        }
    }

    pub fn succeeded(&self) -> bool {
        self.formula().is_some()
    }
}

/// The formulas a player has established for the current customer, plus the
/// ones picked for the next rule application.
///
/// Owned by one game session. Insertion order is kept and duplicates are
/// dropped; the selection always refers to inventory positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Derivation {
    inventory: Vec<Formula>,
    selected: Vec<usize>,
}

impl Derivation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the inventory with a customer's premises
    pub fn from_premises(premises: impl IntoIterator<Item = Formula>) -> Self {
        let mut derivation = Self::new();
        for premise in premises {
            derivation.insert(premise);
        }
        derivation
    }

    /// Add `formula` unless it is already known; returns whether it was new
    pub fn insert(&mut self, formula: Formula) -> bool {
        if self.inventory.contains(&formula) {
            return false;
        }
        self.inventory.push(formula);
        true
    }

    pub fn inventory(&self) -> &[Formula] {
        &self.inventory
    }

    pub fn len(&self) -> usize {
        self.inventory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Flat membership: the only "solved" check inventory mode has
    pub fn contains(&self, target: &Formula) -> bool {
        self.inventory.contains(target)
    }

    /// Select or unselect the inventory item at `index`; false when out of range
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.inventory.len() {
            return false;
        }
        match self.selected.iter().position(|&i| i == index) {
            Some(position) => {
                self.selected.remove(position);
            }
            None => self.selected.push(index),
        }
        true
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.inventory.len() {
            return false;
        }
        if !self.selected.contains(&index) {
            self.selected.push(index);
        }
        true
    }

    pub fn deselect(&mut self, index: usize) {
        self.selected.retain(|&i| i != index);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Selected formulas, in the order they were picked
    pub fn selected(&self) -> Vec<Formula> {
        self.selected
            .iter()
            .map(|&i| self.inventory[i].clone())
            .collect()
    }

    pub fn selected_indices(&self) -> &[usize] {
        &self.selected
    }

    /// Run `rule` over the selection and record what it produced.
    ///
    /// On success the selection is cleared; on failure it is kept so the
    /// player can adjust it.
    pub fn apply_with<F>(&mut self, rule: F) -> ApplyOutcome
    where
        F: FnOnce(&[Formula]) -> Option<Formula>,
    {
        if self.selected.is_empty() {
            return ApplyOutcome::NothingSelected;
        }
        let Some(derived) = rule(&self.selected()) else {
            return ApplyOutcome::NotApplicable;
        };
        self.selected.clear();
        if self.insert(derived.clone()) {
            ApplyOutcome::Derived(derived)
        } else {
            ApplyOutcome::AlreadyKnown(derived)
        }
    }

    /// Empty the inventory and the selection
    pub fn clear(&mut self) {
        self.inventory.clear();
        self.selected.clear();
    }
}
