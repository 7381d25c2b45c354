//! User interface module
//!
//! This module builds the control panel and routes button presses and
//! keyboard shortcuts into the body registry.

use bevy::prelude::*;

pub mod controls;

use crate::bodies::BodyRegistry;
use crate::simulation::OrrerySet;
use controls::{
    handle_keyboard_shortcuts, handle_reset_button, handle_toggle_buttons, refresh_button_labels,
    spawn_control_panel,
};

/// Plugin for the control panel
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_control_panel).add_systems(
            Update,
            (
                (
                    handle_toggle_buttons,
                    handle_reset_button,
                    handle_keyboard_shortcuts,
                )
                    .chain()
                    .in_set(OrrerySet::Controls),
                refresh_button_labels
                    .run_if(resource_changed::<BodyRegistry>)
                    .in_set(OrrerySet::Present),
            ),
        );
    }
}
