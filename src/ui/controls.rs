//! Control panel: one add/remove button per primary body, plus reset and
//! keyboard shortcuts.

use bevy::prelude::*;
use bevy_feathers::palette;

use crate::bodies::BodyRegistry;
use crate::simulation::FrameLoop;

const BUTTON_BG_ACTIVE: Color = Color::srgba(0.08, 0.22, 0.28, 0.95);
const BUTTON_BG_INACTIVE: Color = Color::srgba(0.06, 0.12, 0.16, 0.9);
const BUTTON_FONT_SIZE: f32 = 14.0;

/// Keys 1-9 toggle the n-th primary body.
const DIGIT_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// Button bound to toggling one body
#[derive(Component)]
pub struct ToggleButton {
    pub body: String,
}

/// Text of a toggle button
#[derive(Component)]
pub struct ToggleLabel {
    pub body: String,
}

#[derive(Component)]
pub struct ResetButton;

/// Button caption for a body in the given state
pub fn button_label(name: &str, active: bool) -> String {
    if active {
        format!("Remove {}", name)
    } else {
        format!("Add {}", name)
    }
}

fn button_colors(active: bool) -> (Color, Color) {
    if active {
        (BUTTON_BG_ACTIVE, palette::LIGHT_GRAY_1)
    } else {
        (BUTTON_BG_INACTIVE, palette::LIGHT_GRAY_2)
    }
}

/// Toggle `name` and log the result; control errors never panic.
pub fn toggle_body(registry: &mut BodyRegistry, name: &str) {
    match registry.toggle(name) {
        Ok(outcome) => info!("{}: {:?}", name, outcome),
        Err(e) => warn!("toggle failed: {}", e),
    }
}

/// Name of the primary body bound to the n-th shortcut (zero-based)
pub fn shortcut_target(registry: &BodyRegistry, n: usize) -> Option<String> {
    registry
        .catalog()
        .primaries()
        .nth(n)
        .map(|entry| entry.name.clone())
}

pub fn spawn_control_panel(mut commands: Commands, registry: Res<BodyRegistry>) {
    let button_node = Node {
        padding: UiRect::axes(Val::Px(8.0), Val::Px(4.0)),
        justify_content: JustifyContent::Center,
        ..default()
    };

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            Name::new("Control Panel"),
        ))
        .with_children(|panel| {
            for entry in registry.catalog().primaries() {
                let active = registry.is_active(&entry.name).unwrap_or(false);
                let (bg, fg) = button_colors(active);
                panel
                    .spawn((
                        Button,
                        button_node.clone(),
                        BackgroundColor(bg),
                        ToggleButton {
                            body: entry.name.clone(),
                        },
                    ))
                    .with_child((
                        Text::new(button_label(&entry.name, active)),
                        TextFont {
                            font_size: BUTTON_FONT_SIZE,
                            ..default()
                        },
                        TextColor(fg),
                        ToggleLabel {
                            body: entry.name.clone(),
                        },
                    ));
            }

            panel
                .spawn((
                    Button,
                    button_node.clone(),
                    BackgroundColor(BUTTON_BG_INACTIVE),
                    ResetButton,
                ))
                .with_child((
                    Text::new("Reset"),
                    TextFont {
                        font_size: BUTTON_FONT_SIZE,
                        ..default()
                    },
                    TextColor(palette::ACCENT),
                ));
        });
}

pub fn handle_toggle_buttons(
    mut registry: ResMut<BodyRegistry>,
    buttons: Query<(&Interaction, &ToggleButton), Changed<Interaction>>,
) {
    for (interaction, button) in &buttons {
        if *interaction == Interaction::Pressed {
            toggle_body(&mut registry, &button.body);
        }
    }
}

pub fn handle_reset_button(
    mut registry: ResMut<BodyRegistry>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<ResetButton>)>,
) {
    if buttons.iter().any(|i| *i == Interaction::Pressed) {
        registry.initialize();
        info!("system reset");
    }
}

pub fn handle_keyboard_shortcuts(
    input: Res<ButtonInput<KeyCode>>,
    mut registry: ResMut<BodyRegistry>,
    mut frame_loop: ResMut<FrameLoop>,
) {
    // Space freezes the animation; toggles while paused still redraw the frame.
    if input.just_pressed(KeyCode::Space) {
        frame_loop.paused = !frame_loop.paused;
        info!("animation {}", if frame_loop.paused { "paused" } else { "resumed" });
    }

    for (n, key) in DIGIT_KEYS.iter().enumerate() {
        if input.just_pressed(*key)
            && let Some(name) = shortcut_target(&registry, n)
        {
            toggle_body(&mut registry, &name);
        }
    }
}

/// Relabel and recolor every toggle button from the registry's state.
pub fn refresh_button_labels(
    registry: Res<BodyRegistry>,
    mut buttons: Query<(&ToggleButton, &mut BackgroundColor)>,
    mut labels: Query<(&ToggleLabel, &mut Text, &mut TextColor)>,
) {
    for (button, mut bg) in &mut buttons {
        let active = registry.is_active(&button.body).unwrap_or(false);
        bg.0 = button_colors(active).0;
    }
    for (label, mut text, mut color) in &mut labels {
        let active = registry.is_active(&label.body).unwrap_or(false);
        let caption = button_label(&label.body, active);
        if text.0 != caption {
            text.0 = caption;
        }
        color.0 = button_colors(active).1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Catalog;

    #[test]
    fn test_button_label() {
        assert_eq!(button_label("Earth", true), "Remove Earth");
        assert_eq!(button_label("Earth", false), "Add Earth");
    }

    #[test]
    fn test_button_colors_follow_state() {
        assert_eq!(button_colors(true), (BUTTON_BG_ACTIVE, palette::LIGHT_GRAY_1));
        assert_eq!(button_colors(false), (BUTTON_BG_INACTIVE, palette::LIGHT_GRAY_2));
    }

    #[test]
    fn test_shortcuts_skip_dependents() {
        let registry = BodyRegistry::new(Catalog::solar_system());
        assert_eq!(shortcut_target(&registry, 0).as_deref(), Some("Mercury"));
        assert_eq!(shortcut_target(&registry, 3).as_deref(), Some("Mars"));
        assert_eq!(shortcut_target(&registry, 7).as_deref(), Some("Neptune"));
        assert_eq!(shortcut_target(&registry, 8), None);
    }

    #[test]
    fn test_toggle_body_relabels_through_registry() {
        let mut registry = BodyRegistry::new(Catalog::solar_system());
        toggle_body(&mut registry, "Earth");
        let active = registry.is_active("Earth").unwrap();
        assert_eq!(button_label("Earth", active), "Add Earth");

        // Unknown names are logged, not fatal.
        toggle_body(&mut registry, "Vulcan");
        assert!(registry.is_active("Vulcan").is_err());
    }
}
