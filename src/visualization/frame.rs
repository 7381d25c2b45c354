//! Turns the recorded frame into Bevy 2D entities.

use bevy::color::Srgba;
use bevy::prelude::*;
use bevy::sprite::Anchor;
use std::collections::HashMap;

use crate::simulation::{DrawCommand, FrameBuffer};
use crate::visualization::SceneConfig;
use crate::visualization::canvas::canvas_to_world;

/// Depth step between consecutive draw commands so later ones stay on top
const Z_STEP: f32 = 0.01;

/// Marker for entities that only live for one frame
#[derive(Component)]
pub struct FrameItem;

/// Shared unit circle, scaled per disc
#[derive(Resource)]
pub struct DiscMesh(pub Handle<Mesh>);

/// One material per distinct color string
#[derive(Resource, Default)]
pub struct DiscMaterials(HashMap<String, Handle<ColorMaterial>>);

impl DiscMaterials {
    fn get_or_add(
        &mut self,
        color: &str,
        materials: &mut Assets<ColorMaterial>,
    ) -> Handle<ColorMaterial> {
        self.0
            .entry(color.to_string())
            .or_insert_with(|| materials.add(ColorMaterial::from(parse_color(color))))
            .clone()
    }
}

/// Parse a hex color; unknown strings render white.
pub fn parse_color(color: &str) -> Color {
    match Srgba::hex(color) {
        Ok(srgba) => Color::Srgba(srgba),
        Err(e) => {
            warn!("unrecognized color {:?}: {}", color, e);
            Color::WHITE
        }
    }
}

pub fn setup_canvas(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    scene: Res<SceneConfig>,
) {
    commands.spawn((Camera2d, Name::new("Canvas Camera")));
    commands.insert_resource(ClearColor(scene.background));
    commands.insert_resource(DiscMesh(meshes.add(Circle::new(1.0))));
}

/// Replace last frame's entities with this frame's draw commands.
pub fn present_frame(
    mut commands: Commands,
    buffer: Res<FrameBuffer>,
    scene: Res<SceneConfig>,
    disc: Res<DiscMesh>,
    mut palette: ResMut<DiscMaterials>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    stale: Query<Entity, With<FrameItem>>,
) {
    // Paused loop: keep showing the last frame.
    if !buffer.is_changed() {
        return;
    }

    for entity in &stale {
        commands.entity(entity).despawn();
    }

    for (i, command) in buffer.commands().iter().enumerate() {
        let z = i as f32 * Z_STEP;
        match command {
            DrawCommand::Disc {
                center,
                radius,
                color,
            } => {
                let pos = canvas_to_world(*center, scene.canvas_width, scene.canvas_height);
                commands.spawn((
                    Mesh2d(disc.0.clone()),
                    MeshMaterial2d(palette.get_or_add(color, &mut materials)),
                    Transform::from_translation(pos.extend(z))
                        .with_scale(Vec3::splat(*radius as f32)),
                    FrameItem,
                ));
            }
            DrawCommand::Label {
                text,
                position,
                font_size,
            } => {
                let pos = canvas_to_world(*position, scene.canvas_width, scene.canvas_height);
                commands.spawn((
                    Text2d::new(text.clone()),
                    TextFont {
                        font_size: *font_size,
                        ..default()
                    },
                    TextColor(scene.label_color),
                    Anchor::CENTER_LEFT,
                    Transform::from_translation(pos.extend(z)),
                    FrameItem,
                ));
            }
        }
    }
}
