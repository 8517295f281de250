//! Text rendering for the terminal.
//!
//! [`TerminalRenderer`] turns draw calls into one-line descriptions in screen
//! coordinates; the session prints them as they are produced.

use codraw_server::domain::{
    Composite, LiveSegment, Point, RoomId, Shape, ShapeGeometry, Stroke, StrokeTool, TextLabel,
};

use crate::{canvas::Renderer, view::ViewTransform};

/// Renderer that collects printable lines
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    lines: Vec<String>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the lines produced since the last call
    pub fn take_lines(&mut self) -> Vec<String> {
        std::mem::take(&mut self.lines)
    }

    /// Add a plain message line
    pub fn note(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }
}

impl Renderer for TerminalRenderer {
    fn clear(&mut self, _view: &ViewTransform) {
        self.lines.push("[canvas] cleared".to_string());
    }

    fn stroke(&mut self, stroke: &Stroke, view: &ViewTransform) {
        let tool = match stroke.tool {
            StrokeTool::Pen => "pen",
            StrokeTool::Eraser => "eraser",
        };
        let (first, last) = match (stroke.points.first(), stroke.points.last()) {
            (Some(first), Some(last)) => (*first, *last),
            _ => return,
        };
        self.lines.push(format!(
            "[stroke] {} {} size {} ({} points) {} -> {}",
            tool,
            stroke.color.as_str(),
            stroke.size.value(),
            stroke.points.len(),
            format_point(first, view),
            format_point(last, view)
        ));
    }

    fn segment(&mut self, segment: &LiveSegment, view: &ViewTransform) {
        let mode = match segment.composite {
            Composite::SourceOver => "draw",
            Composite::DestinationOut => "erase",
        };
        self.lines.push(format!(
            "[{}] {} -> {}",
            mode,
            format_point(segment.from, view),
            format_point(segment.to, view)
        ));
    }

    fn shape(&mut self, shape: &Shape, view: &ViewTransform) {
        self.lines.push(format!("[shape] {}", format_shape(shape, view)));
    }

    fn text(&mut self, text: &TextLabel, view: &ViewTransform) {
        self.lines.push(format!(
            "[text] \"{}\" {} {}px at {}",
            text.text.as_str(),
            text.color.as_str(),
            text.font_size() * view.scale,
            format_point(text.position, view)
        ));
    }

    fn shape_preview(&mut self, shape: &Shape, view: &ViewTransform) {
        self.lines
            .push(format!("[preview] {}", format_shape(shape, view)));
    }

    fn clear_preview(&mut self) {}
}

fn format_point(point: Point, view: &ViewTransform) -> String {
    let (x, y) = view.world_to_screen(point);
    format!("({:.1}, {:.1})", x, y)
}

fn format_shape(shape: &Shape, view: &ViewTransform) -> String {
    let color = shape.color.as_str();
    let size = shape.size.value();
    match shape.geometry {
        ShapeGeometry::Rect { x, y, w, h } => format!(
            "rect {} size {} at {} {:.1}x{:.1}",
            color,
            size,
            format_point(Point { x, y }, view),
            w * view.scale,
            h * view.scale
        ),
        ShapeGeometry::Circle { cx, cy, r } => format!(
            "circle {} size {} center {} r {:.1}",
            color,
            size,
            format_point(Point { x: cx, y: cy }, view),
            r * view.scale
        ),
        ShapeGeometry::Line { x1, y1, x2, y2 } => format!(
            "line {} size {} {} -> {}",
            color,
            size,
            format_point(Point { x: x1, y: y1 }, view),
            format_point(Point { x: x2, y: y2 }, view)
        ),
    }
}

/// Build the browser share link for a room from the WebSocket URL
///
/// `ws://host:port/ws` becomes `http://host:port/?room=<id>` (`wss` maps to `https`).
pub fn format_share_link(ws_url: &str, room: &RoomId) -> String {
    let (scheme, rest) = match ws_url.split_once("://") {
        Some(("wss", rest)) => ("https", rest),
        Some((_, rest)) => ("http", rest),
        None => ("http", ws_url),
    };
    let host = rest.split('/').next().unwrap_or(rest);
    format!("{}://{}/?room={}", scheme, host, room)
}

/// Format the banner shown after connecting
pub fn format_connected(room: &RoomId, share_link: &str) -> String {
    let mut output = String::new();
    output.push_str("\n============================================================\n");
    output.push_str(&format!("Room: {}\n", room));
    output.push_str(&format!("Share: {}\n", share_link));
    output.push_str("Type 'help' for commands.\n");
    output.push_str("============================================================\n");
    output
}

/// Format a summary of the local mirror
pub fn format_summary(
    room: &RoomId,
    actions: usize,
    cursors: usize,
    view: &ViewTransform,
) -> String {
    format!(
        "room {}: {} actions, {} remote cursors, zoom {:.2} offset ({:.1}, {:.1})",
        room, actions, cursors, view.scale, view.tx, view.ty
    )
}
