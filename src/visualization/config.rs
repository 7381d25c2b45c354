//! Scene configuration

use bevy::math::DVec2;
use bevy::prelude::*;

/// Canvas layout and styling for the rendered system
#[derive(Resource, Debug, Clone)]
pub struct SceneConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    pub sun_name: String,
    pub sun_color: String,
    pub sun_radius: f64,
    /// Horizontal gap between a disc's edge and its label
    pub label_gap: f64,
    pub label_font_size: f32,
    pub sun_label_font_size: f32,
    pub label_color: Color,
    pub background: Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            sun_name: "Sun".to_string(),
            sun_color: "#FFFF00".to_string(),
            sun_radius: 20.0,
            label_gap: 5.0,
            label_font_size: 10.0,
            sun_label_font_size: 12.0,
            label_color: Color::WHITE,
            background: Color::BLACK,
        }
    }
}

impl SceneConfig {
    /// System center in canvas coordinates
    pub fn center(&self) -> DVec2 {
        DVec2::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Label anchor for a disc of `radius` drawn at `position`.
    pub fn label_position(&self, position: DVec2, radius: f64) -> DVec2 {
        position + DVec2::new(radius + self.label_gap, 0.0)
    }
}
