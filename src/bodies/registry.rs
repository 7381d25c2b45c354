//! Live set of bodies and the toggle/insertion state machine.

use bevy::prelude::*;
use thiserror::Error;

use crate::bodies::catalog::Catalog;
use crate::bodies::live::LiveBody;

/// Errors returned by registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown body: {0}")]
    UnknownBody(String),
}

/// What a successful `toggle` did to the named body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Present body switched on
    Activated,
    /// Present body switched off (or forced off because its primary is)
    Deactivated,
    /// Absent body recreated from the catalog
    Inserted,
}

/// Owns the catalog and the live set built from it.
///
/// The live set is always sorted by catalog index, holds each name at most
/// once, and never has an active dependent whose primary is absent or
/// inactive.
#[derive(Resource, Debug, Clone)]
pub struct BodyRegistry {
    catalog: Catalog,
    live: Vec<LiveBody>,
}

impl BodyRegistry {
    /// Build a registry and populate the live set from `catalog`.
    pub fn new(catalog: Catalog) -> Self {
        let mut registry = Self {
            catalog,
            live: Vec::new(),
        };
        registry.initialize();
        registry
    }

    /// Reset the live set to one fresh, active body per catalog entry.
    pub fn initialize(&mut self) {
        self.live = self.catalog.entries().iter().map(LiveBody::from).collect();
        self.check_invariants();
        debug!("registry initialized with {} bodies", self.live.len());
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Live bodies in catalog order, active or not.
    pub fn live(&self) -> &[LiveBody] {
        &self.live
    }

    pub(crate) fn live_mut(&mut self) -> &mut [LiveBody] {
        &mut self.live
    }

    pub fn get(&self, name: &str) -> Option<&LiveBody> {
        self.live.iter().find(|body| body.name() == name)
    }

    /// Whether `name` is present and active. Known bodies that are absent
    /// from the live set report `false`.
    pub fn is_active(&self, name: &str) -> Result<bool, RegistryError> {
        self.require_known(name)?;
        Ok(self.is_live_and_active(name))
    }

    /// Flip a body on or off, recreating it from the catalog if it was removed.
    ///
    /// Switching a primary off switches its dependents off; switching it on
    /// (or reinserting it) brings its dependents back with it.
    pub fn toggle(&mut self, name: &str) -> Result<ToggleOutcome, RegistryError> {
        let catalog_index = self.require_known(name)?;

        let outcome = match self.position(name) {
            Some(position) => {
                let body = &mut self.live[position];
                let active = !body.is_active();
                body.set_active(active);
                if active {
                    self.restore_dependents(name);
                } else {
                    self.deactivate_dependents(name);
                }
                self.enforce_dependencies();
                if self.is_live_and_active(name) {
                    ToggleOutcome::Activated
                } else {
                    ToggleOutcome::Deactivated
                }
            }
            None => {
                self.insert_fresh(catalog_index);
                self.restore_dependents(name);
                self.enforce_dependencies();
                ToggleOutcome::Inserted
            }
        };

        self.check_invariants();
        debug!("toggle {}: {:?}", name, outcome);
        Ok(outcome)
    }

    /// Take a body and all of its dependents out of the live set.
    ///
    /// Returns how many bodies were removed; a known body that is already
    /// absent removes nothing.
    pub fn remove(&mut self, name: &str) -> Result<usize, RegistryError> {
        self.require_known(name)?;

        let before = self.live.len();
        self.live
            .retain(|body| body.name() != name && body.entry().primary_name() != Some(name));
        let removed = before - self.live.len();

        self.check_invariants();
        debug!("removed {} bodies for {}", removed, name);
        Ok(removed)
    }

    fn require_known(&self, name: &str) -> Result<usize, RegistryError> {
        self.catalog
            .index_of(name)
            .ok_or_else(|| RegistryError::UnknownBody(name.to_string()))
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.live.iter().position(|body| body.name() == name)
    }

    fn is_live_and_active(&self, name: &str) -> bool {
        self.get(name).is_some_and(LiveBody::is_active)
    }

    fn deactivate_dependents(&mut self, primary: &str) {
        for body in &mut self.live {
            if body.entry().primary_name() == Some(primary) {
                body.set_active(false);
            }
        }
    }

    /// Activate every catalog dependent of `primary`, reinserting removed ones.
    fn restore_dependents(&mut self, primary: &str) {
        for dependent_index in self.catalog.dependent_indices(primary) {
            let dependent = &self.catalog.entries()[dependent_index].name;
            match self.position(dependent) {
                Some(position) => self.live[position].set_active(true),
                None => self.insert_fresh(dependent_index),
            }
        }
    }

    /// Insert a fresh copy of catalog entry `catalog_index` before the first
    /// live body that comes later in the catalog.
    fn insert_fresh(&mut self, catalog_index: usize) {
        let catalog = &self.catalog;
        let position = self
            .live
            .iter()
            .position(|body| {
                catalog
                    .index_of(body.name())
                    .is_some_and(|index| index > catalog_index)
            })
            .unwrap_or(self.live.len());
        self.live
            .insert(position, LiveBody::from(&catalog.entries()[catalog_index]));
    }

    /// Force off every active dependent whose primary is absent or inactive.
    fn enforce_dependencies(&mut self) {
        let orphaned: Vec<usize> = self
            .live
            .iter()
            .enumerate()
            .filter(|(_, body)| body.is_active())
            .filter_map(|(index, body)| {
                let primary = body.entry().primary_name()?;
                (!self.is_live_and_active(primary)).then_some(index)
            })
            .collect();

        for index in orphaned {
            debug!("deactivating orphaned {}", self.live[index].name());
            self.live[index].set_active(false);
        }
    }

    fn check_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        let indices: Vec<usize> = self
            .live
            .iter()
            .filter_map(|body| self.catalog.index_of(body.name()))
            .collect();
        debug_assert_eq!(indices.len(), self.live.len(), "live body outside catalog");
        // Strictly increasing also rules out duplicate names.
        debug_assert!(
            indices.windows(2).all(|pair| pair[0] < pair[1]),
            "live set out of catalog order"
        );
        debug_assert!(
            self.live.iter().all(|body| {
                !body.is_active()
                    || body
                        .entry()
                        .primary_name()
                        .is_none_or(|primary| self.is_live_and_active(primary))
            }),
            "active dependent without an active primary"
        );
    }
}
