//! ポインタ入力の状態機械
//!
//! スクリーン座標のポインタ操作を、ローカル描画とサーバーへ送る [`ClientEvent`] に変換します。
//! 送信は呼び出し側が行うため、この型はトランスポートに依存しません。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - InputTranslator の状態遷移（Idle / DrawingStroke / DrawingShape / Panning / EditingText）
//!
//! ### なぜこのテストが必要か
//! - フリーハンドは移動ごとに線分を送り、確定時に 1 つの stroke にまとめる
//! - 図形はドラッグ中はプレビューのみで、確定時に 1 回だけ送る
//! - どの状態でもポインタ移動ごとにカーソル位置を送る
//!
//! ### どのような状況を想定しているか
//! - 正常系：各ツールでのドラッグ
//! - エッジケース：ポインタが領域外に出た場合、空のテキスト

use std::str::FromStr;

use codraw_server::{
    domain::{
        Action, BrushSize, Color, LiveSegment, Point, Shape, ShapeGeometry, ShapeKind, Stroke,
        StrokeTool, TextContent, TextLabel,
    },
    infrastructure::dto::websocket::{
        ClientEvent, CursorDto, SegmentDto, ShapeDto, StrokeDto, TextDto,
    },
};

use crate::canvas::{LocalCanvas, Renderer};

/// 描画ツール
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Pen,
    Eraser,
    Rect,
    Circle,
    Line,
    Text,
    Pan,
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pen" => Ok(Tool::Pen),
            "eraser" => Ok(Tool::Eraser),
            "rect" => Ok(Tool::Rect),
            "circle" => Ok(Tool::Circle),
            "line" => Ok(Tool::Line),
            "text" => Ok(Tool::Text),
            "pan" => Ok(Tool::Pan),
            other => Err(format!("unknown tool '{}'", other)),
        }
    }
}

/// 現在の色と太さ
#[derive(Debug, Clone, PartialEq)]
pub struct Brush {
    pub color: Color,
    pub size: BrushSize,
}

#[derive(Debug, Clone, PartialEq)]
enum InputState {
    Idle,
    DrawingStroke {
        tool: StrokeTool,
        points: Vec<Point>,
    },
    DrawingShape {
        kind: ShapeKind,
        start: Point,
        current: Point,
    },
    Panning {
        last: (f64, f64),
    },
    EditingText {
        position: Point,
    },
}

#[derive(Debug)]
pub struct InputTranslator {
    tool: Tool,
    brush: Brush,
    state: InputState,
}

impl InputTranslator {
    pub fn new(brush: Brush) -> Self {
        Self {
            tool: Tool::Pen,
            brush,
            state: InputState::Idle,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state == InputState::Idle
    }

    pub fn is_editing_text(&self) -> bool {
        matches!(self.state, InputState::EditingText { .. })
    }

    /// ツールを切り替える（作業中の操作は破棄）
    pub fn set_tool(&mut self, tool: Tool, renderer: &mut dyn Renderer) {
        self.reset(renderer);
        self.tool = tool;
    }

    pub fn set_color(&mut self, color: Color) {
        self.brush.color = color;
    }

    pub fn set_size(&mut self, size: BrushSize) {
        self.brush.size = size;
    }

    pub fn pointer_down(&mut self, sx: f64, sy: f64, canvas: &LocalCanvas) {
        let world = canvas.view().screen_to_world(sx, sy);
        self.state = match self.tool {
            Tool::Pen => InputState::DrawingStroke {
                tool: StrokeTool::Pen,
                points: vec![world],
            },
            Tool::Eraser => InputState::DrawingStroke {
                tool: StrokeTool::Eraser,
                points: vec![world],
            },
            Tool::Rect => Self::drag(ShapeKind::Rect, world),
            Tool::Circle => Self::drag(ShapeKind::Circle, world),
            Tool::Line => Self::drag(ShapeKind::Line, world),
            Tool::Text => InputState::EditingText { position: world },
            Tool::Pan => InputState::Panning { last: (sx, sy) },
        };
    }

    fn drag(kind: ShapeKind, start: Point) -> InputState {
        InputState::DrawingShape {
            kind,
            start,
            current: start,
        }
    }

    /// ポインタ移動。状態に関係なく最後にカーソル位置を送る
    pub fn pointer_move(
        &mut self,
        sx: f64,
        sy: f64,
        canvas: &mut LocalCanvas,
        renderer: &mut dyn Renderer,
    ) -> Vec<ClientEvent> {
        let world = canvas.view().screen_to_world(sx, sy);
        let mut events = Vec::new();

        match &mut self.state {
            InputState::DrawingStroke { tool, points } => {
                if let Some(&from) = points.last() {
                    let segment = LiveSegment {
                        from,
                        to: world,
                        color: self.brush.color.clone(),
                        size: self.brush.size,
                        composite: tool.composite(),
                    };
                    renderer.segment(&segment, canvas.view());
                    events.push(ClientEvent::Draw(SegmentDto::from(&segment)));
                }
                points.push(world);
            }
            InputState::DrawingShape {
                kind,
                start,
                current,
            } => {
                *current = world;
                let shape = Shape {
                    color: self.brush.color.clone(),
                    size: self.brush.size,
                    geometry: ShapeGeometry::from_drag(*kind, *start, world),
                };
                canvas.preview_shape(&shape, renderer);
            }
            InputState::Panning { last } => {
                let (dx, dy) = (sx - last.0, sy - last.1);
                *last = (sx, sy);
                canvas.pan(dx, dy, renderer);
            }
            InputState::Idle | InputState::EditingText { .. } => {}
        }

        // パン中はワールド座標がずれるため、更新後の変換で計算し直す
        let cursor = canvas.view().screen_to_world(sx, sy);
        events.push(ClientEvent::Cursor(CursorDto {
            x: cursor.x,
            y: cursor.y,
        }));
        events
    }

    /// ポインタを離す。ストローク・図形を確定する
    pub fn pointer_up(
        &mut self,
        canvas: &mut LocalCanvas,
        renderer: &mut dyn Renderer,
    ) -> Vec<ClientEvent> {
        if self.is_editing_text() {
            return Vec::new();
        }

        match std::mem::replace(&mut self.state, InputState::Idle) {
            InputState::DrawingStroke { tool, points } => {
                let stroke = match Stroke::new(
                    tool,
                    self.brush.color.clone(),
                    self.brush.size,
                    points,
                ) {
                    Ok(stroke) => stroke,
                    Err(e) => {
                        tracing::debug!("Discarding stroke: {}", e);
                        return Vec::new();
                    }
                };
                let event = ClientEvent::Stroke(StrokeDto::from(&stroke));
                canvas.push_local(Action::Stroke(stroke), renderer);
                vec![event]
            }
            InputState::DrawingShape {
                kind,
                start,
                current,
            } => {
                renderer.clear_preview();
                let shape = Shape {
                    color: self.brush.color.clone(),
                    size: self.brush.size,
                    geometry: ShapeGeometry::from_drag(kind, start, current),
                };
                let event = ClientEvent::Shape(ShapeDto::from(&shape));
                canvas.push_local(Action::Shape(shape), renderer);
                vec![event]
            }
            InputState::Idle | InputState::Panning { .. } | InputState::EditingText { .. } => {
                Vec::new()
            }
        }
    }

    /// ポインタが描画領域から外れた。作業中の操作は破棄して Idle に戻る
    pub fn pointer_leave(&mut self, renderer: &mut dyn Renderer) {
        self.reset(renderer);
    }

    /// 入力中のテキストを確定する。前後の空白を除いて空なら何も送らない
    pub fn commit_text(
        &mut self,
        text: String,
        canvas: &mut LocalCanvas,
        renderer: &mut dyn Renderer,
    ) -> Vec<ClientEvent> {
        let InputState::EditingText { position } = self.state else {
            return Vec::new();
        };
        self.state = InputState::Idle;

        let Ok(text) = TextContent::new(text) else {
            return Vec::new();
        };
        let label = TextLabel {
            position,
            text,
            color: self.brush.color.clone(),
            size: self.brush.size,
        };
        let event = ClientEvent::Text(TextDto::from(&label));
        canvas.push_local(Action::Text(label), renderer);
        vec![event]
    }

    pub fn cancel_text(&mut self) {
        if self.is_editing_text() {
            self.state = InputState::Idle;
        }
    }

    fn reset(&mut self, renderer: &mut dyn Renderer) {
        if matches!(self.state, InputState::DrawingShape { .. }) {
            renderer.clear_preview();
        }
        self.state = InputState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::recording::{Call, RecordingRenderer};
    use codraw_server::infrastructure::dto::websocket::{
        CompositeDto, PointDto, ShapeGeometryDto, StrokeToolDto,
    };

    fn translator() -> InputTranslator {
        InputTranslator::new(Brush {
            color: Color::new("#ff0000".to_string()).unwrap(),
            size: BrushSize::new(4.0).unwrap(),
        })
    }

    #[test]
    fn test_freehand_stroke_emits_segments_then_one_stroke() {
        // テスト項目: ペンのドラッグで移動ごとに draw が送られ、離した時に stroke が 1 つ送られる
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();

        // when (操作):
        input.pointer_down(0.0, 0.0, &canvas);
        let first = input.pointer_move(5.0, 5.0, &mut canvas, &mut renderer);
        let second = input.pointer_move(10.0, 0.0, &mut canvas, &mut renderer);
        let up = input.pointer_up(&mut canvas, &mut renderer);

        // then (期待する結果):
        assert_eq!(first.len(), 2);
        assert!(matches!(&first[0], ClientEvent::Draw(s) if s.x1 == 0.0 && s.x2 == 5.0));
        assert_eq!(first[1], ClientEvent::Cursor(CursorDto { x: 5.0, y: 5.0 }));
        assert!(matches!(&second[0], ClientEvent::Draw(s) if s.x1 == 5.0 && s.x2 == 10.0));
        assert_eq!(
            up,
            vec![ClientEvent::Stroke(StrokeDto {
                tool: StrokeToolDto::Pen,
                color: "#ff0000".to_string(),
                size: 4.0,
                points: vec![
                    PointDto { x: 0.0, y: 0.0 },
                    PointDto { x: 5.0, y: 5.0 },
                    PointDto { x: 10.0, y: 0.0 },
                ],
            })]
        );
        assert_eq!(canvas.actions().len(), 1);
        assert!(input.is_idle());
        assert!(matches!(renderer.calls.last(), Some(Call::Stroke(_))));
    }

    #[test]
    fn test_eraser_segments_use_destination_out() {
        // テスト項目: 消しゴムの線分は destination-out で送られる
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();
        input.set_tool(Tool::Eraser, &mut renderer);

        // when (操作):
        input.pointer_down(0.0, 0.0, &canvas);
        let events = input.pointer_move(1.0, 1.0, &mut canvas, &mut renderer);

        // then (期待する結果):
        let ClientEvent::Draw(segment) = &events[0] else {
            panic!("expected draw event");
        };
        assert_eq!(segment.composite, CompositeDto::DestinationOut);
    }

    #[test]
    fn test_shape_drag_previews_then_emits_once() {
        // テスト項目: 図形のドラッグ中はプレビューのみで、離した時に shape が 1 回送られる
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();
        input.set_tool(Tool::Rect, &mut renderer);

        // when (操作):
        input.pointer_down(10.0, 20.0, &canvas);
        let moved = input.pointer_move(4.0, 5.0, &mut canvas, &mut renderer);
        let up = input.pointer_up(&mut canvas, &mut renderer);

        // then (期待する結果):
        assert_eq!(moved, vec![ClientEvent::Cursor(CursorDto { x: 4.0, y: 5.0 })]);
        assert!(renderer.calls.contains(&Call::ShapePreview(ShapeGeometry::Rect {
            x: 4.0,
            y: 5.0,
            w: 6.0,
            h: 15.0
        })));
        assert_eq!(
            up,
            vec![ClientEvent::Shape(ShapeDto {
                color: "#ff0000".to_string(),
                size: 4.0,
                geometry: ShapeGeometryDto::Rect {
                    x: 4.0,
                    y: 5.0,
                    w: 6.0,
                    h: 15.0
                },
            })]
        );
        assert_eq!(canvas.actions().len(), 1);
    }

    #[test]
    fn test_text_commit_and_empty_text() {
        // テスト項目: テキストは確定時に送られ、空白のみの場合は送られない
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();
        input.set_tool(Tool::Text, &mut renderer);

        // when (操作):
        input.pointer_down(3.0, 4.0, &canvas);
        let blank = input.commit_text("   ".to_string(), &mut canvas, &mut renderer);
        input.pointer_down(3.0, 4.0, &canvas);
        let up = input.pointer_up(&mut canvas, &mut renderer);
        let committed = input.commit_text(" hello ".to_string(), &mut canvas, &mut renderer);

        // then (期待する結果):
        assert!(blank.is_empty());
        assert!(up.is_empty());
        assert_eq!(
            committed,
            vec![ClientEvent::Text(TextDto {
                x: 3.0,
                y: 4.0,
                text: "hello".to_string(),
                color: "#ff0000".to_string(),
                size: 4.0,
            })]
        );
        assert_eq!(canvas.actions().len(), 1);
    }

    #[test]
    fn test_pan_moves_view_without_emitting_drawings() {
        // テスト項目: パン中の移動は表示だけを動かし、カーソル以外は送らない
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();
        input.set_tool(Tool::Pan, &mut renderer);

        // when (操作):
        input.pointer_down(0.0, 0.0, &canvas);
        let events = input.pointer_move(20.0, 10.0, &mut canvas, &mut renderer);
        let up = input.pointer_up(&mut canvas, &mut renderer);

        // then (期待する結果):
        assert_eq!(canvas.view().tx, 20.0);
        assert_eq!(canvas.view().ty, 10.0);
        assert_eq!(events, vec![ClientEvent::Cursor(CursorDto { x: 0.0, y: 0.0 })]);
        assert!(up.is_empty());
        assert!(canvas.actions().is_empty());
    }

    #[test]
    fn test_pointer_leave_discards_in_progress_work() {
        // テスト項目: 描画中にポインタが外れると作業は破棄され、離しても何も送られない
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();
        input.set_tool(Tool::Circle, &mut renderer);
        input.pointer_down(0.0, 0.0, &canvas);
        input.pointer_move(10.0, 10.0, &mut canvas, &mut renderer);

        // when (操作):
        input.pointer_leave(&mut renderer);
        let up = input.pointer_up(&mut canvas, &mut renderer);

        // then (期待する結果):
        assert!(input.is_idle());
        assert!(up.is_empty());
        assert!(canvas.actions().is_empty());
        assert_eq!(renderer.calls.last(), Some(&Call::ClearPreview));
    }

    #[test]
    fn test_cursor_uses_world_coordinates() {
        // テスト項目: ズーム中のカーソル位置はワールド座標で送られる
        // given (前提条件):
        let mut input = translator();
        let mut canvas = LocalCanvas::new();
        let mut renderer = RecordingRenderer::default();
        canvas.zoom_at(2.0, 0.0, 0.0, &mut renderer);

        // when (操作):
        let events = input.pointer_move(10.0, 8.0, &mut canvas, &mut renderer);

        // then (期待する結果):
        assert_eq!(events, vec![ClientEvent::Cursor(CursorDto { x: 5.0, y: 4.0 })]);
    }

    #[test]
    fn test_parse_tool() {
        // テスト項目: ツール名のパース
        // given / when / then:
        assert_eq!("circle".parse::<Tool>(), Ok(Tool::Circle));
        assert!("brush".parse::<Tool>().is_err());
    }
}
