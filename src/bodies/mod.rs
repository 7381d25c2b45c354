//! Celestial body catalog and live set
//!
//! This module owns the immutable catalog of bodies and the registry that
//! tracks which of them are currently present and active.

use bevy::prelude::*;

pub mod catalog;
pub mod live;
pub mod loader;
pub mod registry;

pub use catalog::{Catalog, Orbit};
pub use live::LiveBody;
pub use registry::BodyRegistry;

/// Plugin that builds the body registry from the configured catalog
pub struct BodiesPlugin;

impl Plugin for BodiesPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BodyRegistry::new(loader::load_catalog()));
    }
}
