//! The stroke-drawing surface that engines render onto.
//!
//! `Surface` is the subset of a 2-D canvas context the renderer needs: paths
//! made of `move_to`/`line_to`, stroked with a line width, a line cap and a
//! `#RRGGBBAA` style, plus rectangle clearing and state save/restore. Hosts implement it
//! over a browser canvas or a pixel buffer; [`RecordingSurface`] captures the
//! calls for inspection.

/// How the open ends of a stroked path are finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Square end flush with the endpoint. The canvas default.
    #[default]
    Butt,
    /// Half-disc of radius `line_width / 2` around the endpoint.
    Round,
}

impl LineCap {
    /// The canvas `lineCap` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

/// A 2-D stroke target with canvas-style path semantics.
///
/// `set_line_width`, `set_line_cap` and `set_stroke_style` are sticky state
/// consulted by the next `stroke`. `save`/`restore` push and pop that state.
pub trait Surface {
    /// Clears the rectangle at `(x, y)` with the given size to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Discards the current path and starts a new one.
    fn begin_path(&mut self);

    /// Starts a new subpath at `(x, y)`.
    fn move_to(&mut self, x: f64, y: f64);

    /// Extends the current subpath with a straight segment to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64);

    /// Sets the width used by subsequent strokes.
    fn set_line_width(&mut self, width: f64);

    /// Sets the cap used by subsequent strokes.
    fn set_line_cap(&mut self, cap: LineCap);

    /// Sets the stroke color, given as `#RRGGBB` or `#RRGGBBAA`.
    fn set_stroke_style(&mut self, color: &str);

    /// Strokes the current path with the current width and style.
    fn stroke(&mut self);

    /// Pushes line width, line cap and stroke style.
    fn save(&mut self);

    /// Pops the state pushed by the matching `save`.
    fn restore(&mut self);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    ClearRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    LineWidth(f64),
    LineCap(LineCap),
    StrokeStyle(String),
    Stroke,
    Save,
    Restore,
}

/// Surface that records every call in order and draws nothing.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded since creation or the last [`take`](Self::take).
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Returns and clears the recorded calls.
    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `stroke` calls recorded.
    pub fn stroke_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::ClearRect {
            x,
            y,
            width,
            height,
        });
    }

    fn begin_path(&mut self) {
        self.commands.push(DrawCommand::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.commands.push(DrawCommand::LineTo(x, y));
    }

    fn set_line_width(&mut self, width: f64) {
        self.commands.push(DrawCommand::LineWidth(width));
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.commands.push(DrawCommand::LineCap(cap));
    }

    fn set_stroke_style(&mut self, color: &str) {
        self.commands.push(DrawCommand::StrokeStyle(color.to_owned()));
    }

    fn stroke(&mut self) {
        self.commands.push(DrawCommand::Stroke);
    }

    fn save(&mut self) {
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        self.commands.push(DrawCommand::Restore);
    }
}
