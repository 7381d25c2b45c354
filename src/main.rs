use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod bodies;
mod simulation;
mod ui;
mod visualization;

use bodies::BodiesPlugin;
use simulation::SimulationPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Orrery".to_string(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(BodiesPlugin);
    app.add_plugins(SimulationPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(UiPlugin);

    app.run();
}
