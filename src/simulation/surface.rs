//! Seams between the simulator and the outside world: what it draws on and
//! what schedules it.

use bevy::math::DVec2;
use bevy::prelude::*;

/// Something the simulator can draw a frame on.
///
/// Positions are canvas coordinates (origin top-left, y down).
pub trait DrawSurface {
    fn clear(&mut self);
    fn draw_disc(&mut self, center: DVec2, radius: f64, color: &str);
    fn draw_label(&mut self, text: &str, position: DVec2, font_size: f32);
}

/// Something that will run the next tick, eventually.
pub trait FrameClock {
    fn schedule_next(&mut self);
}

/// One recorded drawing call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Disc {
        center: DVec2,
        radius: f64,
        color: String,
    },
    Label {
        text: String,
        position: DVec2,
        font_size: f32,
    },
}

/// Draw commands for the current frame, consumed by the renderer.
#[derive(Resource, Default, Debug)]
pub struct FrameBuffer {
    commands: Vec<DrawCommand>,
}

impl FrameBuffer {
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Names of every label drawn this frame, in draw order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            DrawCommand::Disc { .. } => None,
        })
    }
}

impl DrawSurface for FrameBuffer {
    fn clear(&mut self) {
        self.commands.clear();
    }

    fn draw_disc(&mut self, center: DVec2, radius: f64, color: &str) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color: color.to_string(),
        });
    }

    fn draw_label(&mut self, text: &str, position: DVec2, font_size: f32) {
        self.commands.push(DrawCommand::Label {
            text: text.to_string(),
            position,
            font_size,
        });
    }
}

/// Frame loop state driven by Bevy's `Update` schedule.
///
/// A tick runs only when the previous one requested it and the loop is not
/// paused.
#[derive(Resource, Debug)]
pub struct FrameLoop {
    requested: bool,
    pub paused: bool,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self {
            requested: true,
            paused: false,
            frames: 0,
        }
    }
}

impl FrameLoop {
    pub fn is_due(&self) -> bool {
        self.requested && !self.paused
    }

    /// Consume the pending request; the tick must ask again.
    pub fn begin_frame(&mut self) {
        self.requested = false;
        self.frames += 1;
    }

    /// Number of ticks started so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameClock for FrameLoop {
    fn schedule_next(&mut self) {
        self.requested = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_buffer_records_and_clears() {
        let mut buffer = FrameBuffer::default();
        buffer.draw_disc(DVec2::new(1.0, 2.0), 3.0, "#fff");
        buffer.draw_label("A", DVec2::new(4.0, 2.0), 10.0);
        assert_eq!(buffer.commands().len(), 2);
        assert_eq!(buffer.labels().collect::<Vec<_>>(), vec!["A"]);

        buffer.clear();
        assert!(buffer.commands().is_empty());
    }

    #[test]
    fn test_frame_loop_needs_reschedule() {
        let mut frame_loop = FrameLoop::default();
        assert!(frame_loop.is_due());

        frame_loop.begin_frame();
        assert!(!frame_loop.is_due());
        assert_eq!(frame_loop.frames(), 1);

        frame_loop.schedule_next();
        assert!(frame_loop.is_due());

        frame_loop.paused = true;
        assert!(!frame_loop.is_due());
    }
}
