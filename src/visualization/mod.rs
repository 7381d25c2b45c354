//! Visualization module
//!
//! This module renders the simulator's recorded frame with Bevy 2D meshes
//! and text, and holds the scene configuration.

use bevy::prelude::*;

pub mod canvas;
pub mod config;
pub mod frame;

pub use config::SceneConfig;
pub use frame::{DiscMaterials, present_frame, setup_canvas};

use crate::simulation::OrrerySet;

/// Plugin for presenting simulated frames
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneConfig>()
            .init_resource::<DiscMaterials>()
            .add_systems(Startup, setup_canvas)
            .add_systems(Update, present_frame.in_set(OrrerySet::Present));
    }
}
