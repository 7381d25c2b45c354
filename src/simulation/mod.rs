//! Orbit simulation module
//!
//! This module advances every active body once per frame and records the
//! frame's drawing calls for the renderer.

use bevy::prelude::*;

pub mod orbit;
pub mod surface;

pub use orbit::{draw_frame, tick};
pub use surface::{DrawCommand, FrameBuffer, FrameLoop};

use crate::bodies::BodyRegistry;
use crate::visualization::SceneConfig;

/// Ordering of the per-frame work: user input, then the tick, then drawing.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OrrerySet {
    Controls,
    Simulate,
    Present,
}

/// Plugin for the frame loop and orbit simulation
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FrameBuffer>()
            .init_resource::<FrameLoop>()
            .configure_sets(
                Update,
                (OrrerySet::Controls, OrrerySet::Simulate, OrrerySet::Present).chain(),
            )
            .add_systems(
                Update,
                (
                    run_tick_system.run_if(frame_due),
                    redraw_paused_system
                        .run_if(is_paused.and(resource_changed::<BodyRegistry>)),
                )
                    .in_set(OrrerySet::Simulate),
            );
    }
}

fn frame_due(frame_loop: Res<FrameLoop>) -> bool {
    frame_loop.is_due()
}

fn is_paused(frame_loop: Res<FrameLoop>) -> bool {
    frame_loop.paused
}

/// System that runs one simulation tick against the frame buffer
pub fn run_tick_system(
    mut registry: ResMut<BodyRegistry>,
    scene: Res<SceneConfig>,
    mut buffer: ResMut<FrameBuffer>,
    mut frame_loop: ResMut<FrameLoop>,
) {
    frame_loop.begin_frame();
    let drawn = tick(&mut registry, &scene, &mut *buffer, &mut *frame_loop);
    if frame_loop.frames() == 1 {
        info!("first frame drawn with {} bodies", drawn);
    }
}

/// Redraw the frozen frame after a toggle or reset while paused.
pub fn redraw_paused_system(
    registry: Res<BodyRegistry>,
    scene: Res<SceneConfig>,
    mut buffer: ResMut<FrameBuffer>,
) {
    let drawn = draw_frame(&registry, &scene, &mut *buffer);
    debug!("paused redraw with {} bodies", drawn.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Catalog;

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(BodyRegistry::new(Catalog::solar_system()))
            .init_resource::<SceneConfig>()
            .add_plugins(SimulationPlugin);
        app
    }

    fn labels(app: &App) -> Vec<String> {
        app.world()
            .resource::<FrameBuffer>()
            .labels()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_paused_toggle_redraws_without_advancing() {
        let mut app = test_app();
        app.update();
        assert!(labels(&app).contains(&"Earth".to_string()));

        app.world_mut().resource_mut::<FrameLoop>().paused = true;
        app.update();
        let phase = app.world().resource::<BodyRegistry>().get("Earth").unwrap().phase();

        app.world_mut()
            .resource_mut::<BodyRegistry>()
            .toggle("Earth")
            .unwrap();
        app.update();

        let drawn = labels(&app);
        assert!(!drawn.contains(&"Earth".to_string()));
        assert!(!drawn.contains(&"Moon".to_string()));
        assert!(drawn.contains(&"Mars".to_string()));
        let registry = app.world().resource::<BodyRegistry>();
        assert_eq!(registry.get("Earth").unwrap().phase(), phase);
        assert_eq!(app.world().resource::<FrameLoop>().frames(), 1);
    }
}
