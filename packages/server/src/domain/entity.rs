//! エンティティ定義
//!
//! Room の履歴に積まれる `Action` と、履歴に積まれない一時的なイベント
//! （`LiveSegment`）を定義します。

use super::{
    error::ValueObjectError,
    value_object::{BrushSize, Color, Point, TextContent, finite, length},
};

// ========================================
// Stroke
// ========================================

/// フリーハンドの描画ツール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeTool {
    Pen,
    Eraser,
}

impl StrokeTool {
    /// 描画時の合成モード（消しゴムは既存ピクセルを削る）
    pub fn composite(&self) -> Composite {
        match self {
            StrokeTool::Pen => Composite::SourceOver,
            StrokeTool::Eraser => Composite::DestinationOut,
        }
    }
}

/// Canvas の合成モード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Composite {
    #[default]
    SourceOver,
    DestinationOut,
}

/// 1 回のドラッグで描かれたフリーハンド線（点列をまとめて 1 Action）
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub tool: StrokeTool,
    pub color: Color,
    pub size: BrushSize,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(
        tool: StrokeTool,
        color: Color,
        size: BrushSize,
        points: Vec<Point>,
    ) -> Result<Self, ValueObjectError> {
        if points.is_empty() {
            return Err(ValueObjectError::EmptyStroke);
        }
        Ok(Self {
            tool,
            color,
            size,
            points,
        })
    }
}

// ========================================
// Shape
// ========================================

/// 図形ツールの種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rect,
    Circle,
    Line,
}

/// 図形ごとのジオメトリ（ワールド座標）
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Rect { x: f64, y: f64, w: f64, h: f64 },
    Circle { cx: f64, cy: f64, r: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl ShapeGeometry {
    pub fn rect(x: f64, y: f64, w: f64, h: f64) -> Result<Self, ValueObjectError> {
        Ok(Self::Rect {
            x: finite(x, "x")?,
            y: finite(y, "y")?,
            w: length(w, "w")?,
            h: length(h, "h")?,
        })
    }

    pub fn circle(cx: f64, cy: f64, r: f64) -> Result<Self, ValueObjectError> {
        Ok(Self::Circle {
            cx: finite(cx, "cx")?,
            cy: finite(cy, "cy")?,
            r: length(r, "r")?,
        })
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, ValueObjectError> {
        Ok(Self::Line {
            x1: finite(x1, "x1")?,
            y1: finite(y1, "y1")?,
            x2: finite(x2, "x2")?,
            y2: finite(y2, "y2")?,
        })
    }

    /// ドラッグの始点と終点から図形を計算する
    ///
    /// - rect: 左上の角と幅・高さ（常に非負）
    /// - circle: 2 点の中点を中心、半径は `max(|dx|, |dy|) / 2`
    /// - line: 始点と終点そのもの
    pub fn from_drag(kind: ShapeKind, start: Point, end: Point) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = (end.y - start.y).abs();
        match kind {
            ShapeKind::Rect => Self::Rect {
                x: start.x.min(end.x),
                y: start.y.min(end.y),
                w: dx,
                h: dy,
            },
            ShapeKind::Circle => Self::Circle {
                cx: (start.x + end.x) / 2.0,
                cy: (start.y + end.y) / 2.0,
                r: dx.max(dy) / 2.0,
            },
            ShapeKind::Line => Self::Line {
                x1: start.x,
                y1: start.y,
                x2: end.x,
                y2: end.y,
            },
        }
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Self::Rect { .. } => ShapeKind::Rect,
            Self::Circle { .. } => ShapeKind::Circle,
            Self::Line { .. } => ShapeKind::Line,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub color: Color,
    pub size: BrushSize,
    pub geometry: ShapeGeometry,
}

// ========================================
// Text
// ========================================

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub position: Point,
    pub text: TextContent,
    pub color: Color,
    pub size: BrushSize,
}

impl TextLabel {
    /// 描画時のフォントサイズ（px、ワールド座標単位）
    pub fn font_size(&self) -> f64 {
        (self.size.value() * 6.0).max(12.0)
    }
}

// ========================================
// Action
// ========================================

/// Room の履歴に積まれる 1 操作
///
/// undo / redo はこの単位で行われる（ストロークの点単位ではない）。
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Stroke(Stroke),
    Shape(Shape),
    Text(TextLabel),
}

impl Action {
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Stroke(_) => "stroke",
            Action::Shape(_) => "shape",
            Action::Text(_) => "text",
        }
    }
}

impl From<Stroke> for Action {
    fn from(stroke: Stroke) -> Self {
        Action::Stroke(stroke)
    }
}

impl From<Shape> for Action {
    fn from(shape: Shape) -> Self {
        Action::Shape(shape)
    }
}

impl From<TextLabel> for Action {
    fn from(text: TextLabel) -> Self {
        Action::Text(text)
    }
}

// ========================================
// LiveSegment
// ========================================

/// 描画中のストロークのプレビュー用線分（履歴には積まれない）
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSegment {
    pub from: Point,
    pub to: Point,
    pub color: Color,
    pub size: BrushSize,
    pub composite: Composite,
}
