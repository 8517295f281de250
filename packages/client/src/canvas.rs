//! ローカルキャンバス
//!
//! サーバー上の Room の履歴をミラーし、[`Renderer`] を通して描画します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LocalCanvas::apply() / push_local() / redraw()
//!
//! ### なぜこのテストが必要か
//! - init / rebuild は全体の再描画、stroke などは差分描画という使い分けを保証する
//! - draw（線分）は描画されるが履歴には残らない
//!
//! ### どのような状況を想定しているか
//! - 正常系：各サーバーイベントの適用
//! - 異常系：不正なペイロードを含むイベント

use std::collections::BTreeMap;

use codraw_server::{
    domain::{Action, LiveSegment, Point, Shape, Stroke, TextLabel, ValueObjectError},
    infrastructure::dto::websocket::{ActionDto, ServerEvent},
};

use crate::view::ViewTransform;

/// 描画先の抽象化
///
/// 座標はすべてワールド座標で渡される。スクリーン座標への変換には `view` を使う。
pub trait Renderer {
    /// 画面全体を消去
    fn clear(&mut self, view: &ViewTransform);
    fn stroke(&mut self, stroke: &Stroke, view: &ViewTransform);
    /// 描画中の線分（プレビュー）
    fn segment(&mut self, segment: &LiveSegment, view: &ViewTransform);
    fn shape(&mut self, shape: &Shape, view: &ViewTransform);
    fn text(&mut self, text: &TextLabel, view: &ViewTransform);
    /// ドラッグ中の図形のプレビュー
    fn shape_preview(&mut self, shape: &Shape, view: &ViewTransform);
    fn clear_preview(&mut self);
}

/// Room の履歴のローカルミラー
#[derive(Debug, Default)]
pub struct LocalCanvas {
    actions: Vec<Action>,
    view: ViewTransform,
    /// 他の参加者のカーソル（接続 ID → ワールド座標）
    cursors: BTreeMap<String, Point>,
}

impl LocalCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn view(&self) -> &ViewTransform {
        &self.view
    }

    pub fn cursors(&self) -> &BTreeMap<String, Point> {
        &self.cursors
    }

    /// サーバーから届いたイベントを適用する
    ///
    /// 不正なペイロードを含むイベントは何も変更せずにエラーを返す。
    pub fn apply(
        &mut self,
        event: ServerEvent,
        renderer: &mut dyn Renderer,
    ) -> Result<(), ValueObjectError> {
        match event {
            // init は参加直後にだけ届く。前の Room のカーソルは捨てる
            ServerEvent::Init(actions) => {
                self.actions = decode_actions(actions)?;
                self.cursors.clear();
                self.redraw(renderer);
            }
            ServerEvent::Rebuild(actions) => {
                self.actions = decode_actions(actions)?;
                self.redraw(renderer);
            }
            ServerEvent::Clear => {
                self.actions.clear();
                renderer.clear(&self.view);
            }
            ServerEvent::Stroke(stroke) => {
                self.push_local(Stroke::try_from(stroke)?.into(), renderer)
            }
            ServerEvent::Shape(shape) => self.push_local(Shape::try_from(shape)?.into(), renderer),
            ServerEvent::Text(text) => {
                self.push_local(TextLabel::try_from(text)?.into(), renderer)
            }
            ServerEvent::Draw(segment) => {
                let segment = LiveSegment::try_from(segment)?;
                renderer.segment(&segment, &self.view);
            }
            ServerEvent::Cursor(cursor) => {
                let position = Point::new(cursor.x, cursor.y)?;
                self.cursors.insert(cursor.id, position);
            }
            ServerEvent::CursorLeft(left) => {
                self.cursors.remove(&left.id);
            }
        }
        Ok(())
    }

    /// 自分の操作を楽観的に追加して描画する（サーバーからの確認は待たない）
    pub fn push_local(&mut self, action: Action, renderer: &mut dyn Renderer) {
        render_action(&action, &self.view, renderer);
        self.actions.push(action);
    }

    /// 履歴全体を最初から描き直す
    pub fn redraw(&self, renderer: &mut dyn Renderer) {
        renderer.clear(&self.view);
        for action in &self.actions {
            render_action(action, &self.view, renderer);
        }
    }

    pub fn pan(&mut self, dx: f64, dy: f64, renderer: &mut dyn Renderer) {
        self.view.pan(dx, dy);
        self.redraw(renderer);
    }

    pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64, renderer: &mut dyn Renderer) {
        self.view.zoom_at(factor, sx, sy);
        self.redraw(renderer);
    }

    /// 図形のドラッグ中プレビューを描き直す
    pub fn preview_shape(&self, shape: &Shape, renderer: &mut dyn Renderer) {
        renderer.clear_preview();
        renderer.shape_preview(shape, &self.view);
    }
}

fn decode_actions(actions: Vec<ActionDto>) -> Result<Vec<Action>, ValueObjectError> {
    actions.into_iter().map(Action::try_from).collect()
}

fn render_action(action: &Action, view: &ViewTransform, renderer: &mut dyn Renderer) {
    match action {
        Action::Stroke(stroke) => renderer.stroke(stroke, view),
        Action::Shape(shape) => renderer.shape(shape, view),
        Action::Text(text) => renderer.text(text, view),
    }
}
