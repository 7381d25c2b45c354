//! Per-frame orbit advance and drawing

use bevy::math::DVec2;
use bevy::prelude::*;

use crate::bodies::{BodyRegistry, LiveBody, Orbit};
use crate::simulation::surface::{DrawSurface, FrameClock};
use crate::visualization::SceneConfig;

fn polar(radius: f64, angle: f64) -> DVec2 {
    DVec2::new(radius * angle.cos(), radius * angle.sin())
}

/// Where `body` sits this frame, or None if it should not be drawn.
///
/// Dependents are placed relative to their primary's current position; a
/// dependent whose primary is missing or inactive resolves to None.
pub fn resolve_position(registry: &BodyRegistry, body: &LiveBody, center: DVec2) -> Option<DVec2> {
    if !body.is_active() {
        return None;
    }
    match &body.entry().orbit {
        Orbit::Primary { orbital_radius, .. } => Some(center + polar(*orbital_radius, body.phase())),
        Orbit::Dependent {
            primary, radius, ..
        } => {
            let Some(primary_body) = registry.get(primary) else {
                debug!("{} skipped: primary {} not present", body.name(), primary);
                return None;
            };
            let primary_pos = resolve_position(registry, primary_body, center)?;
            Some(primary_pos + polar(*radius, body.phase()))
        }
    }
}

/// Clear the surface and draw the center and every active body at its
/// current phase. Nothing moves.
///
/// Returns the live-set indices of the bodies drawn.
pub fn draw_frame(
    registry: &BodyRegistry,
    scene: &SceneConfig,
    surface: &mut impl DrawSurface,
) -> Vec<usize> {
    let center = scene.center();

    surface.clear();
    surface.draw_disc(center, scene.sun_radius, &scene.sun_color);
    surface.draw_label(
        &scene.sun_name,
        scene.label_position(center, scene.sun_radius),
        scene.sun_label_font_size,
    );

    let mut drawn = Vec::new();
    for (index, body) in registry.live().iter().enumerate() {
        let Some(pos) = resolve_position(registry, body, center) else {
            continue;
        };
        let entry = body.entry();
        surface.draw_disc(pos, entry.size, &entry.color);
        surface.draw_label(
            &entry.name,
            scene.label_position(pos, entry.size),
            scene.label_font_size,
        );
        drawn.push(index);
    }
    drawn
}

/// Run one frame: draw every active body at its start-of-frame position,
/// advance the drawn bodies, then ask for the next frame.
///
/// Returns the number of bodies drawn (the central body excluded).
pub fn tick(
    registry: &mut BodyRegistry,
    scene: &SceneConfig,
    surface: &mut impl DrawSurface,
    clock: &mut impl FrameClock,
) -> usize {
    let drawn = draw_frame(registry, scene, surface);

    let live = registry.live_mut();
    for &index in &drawn {
        live[index].advance();
    }

    clock.schedule_next();
    drawn.len()
}
