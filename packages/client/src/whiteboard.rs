//! ネットワークに依存しないクライアント状態
//!
//! ローカルキャンバス、入力の状態機械、ターミナル出力をまとめ、
//! 受信フレームと入力コマンドをそれぞれ処理します。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - Whiteboard::apply_frame() / Whiteboard::execute()
//!
//! ### なぜこのテストが必要か
//! - コマンドが正しいクライアントイベントに変換されることを保証
//! - clear / undo / redo はローカルでは適用せず、サーバーからの通知を待つ
//!
//! ### どのような状況を想定しているか
//! - 正常系：コマンドによる描画、サーバーフレームの適用
//! - 異常系：不正な JSON の受信

use codraw_server::{
    domain::RoomId,
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
};

use crate::{
    canvas::LocalCanvas,
    command::{Command, HELP},
    formatter::{TerminalRenderer, format_summary},
    input::{Brush, InputTranslator},
};

/// コマンド実行の結果
#[derive(Debug, Default, PartialEq)]
pub struct Outcome {
    /// サーバーへ送るイベント（順番どおり）
    pub events: Vec<ClientEvent>,
    /// 参加先の Room が変わった
    pub joined: Option<RoomId>,
    pub quit: bool,
}

impl Outcome {
    fn send(events: Vec<ClientEvent>) -> Self {
        Self {
            events,
            ..Self::default()
        }
    }
}

pub struct Whiteboard {
    room: RoomId,
    canvas: LocalCanvas,
    input: InputTranslator,
    renderer: TerminalRenderer,
}

impl Whiteboard {
    pub fn new(room: RoomId, brush: Brush) -> Self {
        Self {
            room,
            canvas: LocalCanvas::new(),
            input: InputTranslator::new(brush),
            renderer: TerminalRenderer::new(),
        }
    }

    pub fn room(&self) -> &RoomId {
        &self.room
    }

    pub fn canvas(&self) -> &LocalCanvas {
        &self.canvas
    }

    /// 出力待ちの行を取り出す
    pub fn take_output(&mut self) -> Vec<String> {
        self.renderer.take_lines()
    }

    /// サーバーから届いたテキストフレームを適用する
    pub fn apply_frame(&mut self, text: &str) {
        let event = match serde_json::from_str::<ServerEvent>(text) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Ignoring malformed frame: {}", e);
                return;
            }
        };

        let name = event.name();
        if let Err(e) = self.canvas.apply(event, &mut self.renderer) {
            tracing::warn!("Ignoring invalid '{}' event: {}", name, e);
        }
    }

    /// 入力コマンドを実行する
    pub fn execute(&mut self, command: Command) -> Outcome {
        let canvas = &mut self.canvas;
        let renderer = &mut self.renderer;

        match command {
            Command::Tool(tool) => self.input.set_tool(tool, renderer),
            Command::Color(color) => self.input.set_color(color),
            Command::Size(size) => self.input.set_size(size),
            Command::Down(x, y) => self.input.pointer_down(x, y, canvas),
            Command::Move(x, y) => {
                return Outcome::send(self.input.pointer_move(x, y, canvas, renderer));
            }
            Command::Up => return Outcome::send(self.input.pointer_up(canvas, renderer)),
            Command::Leave => self.input.pointer_leave(renderer),
            Command::Type(text) => {
                if !self.input.is_editing_text() {
                    renderer.note("no text being edited (use 'tool text' and 'down x y')");
                }
                return Outcome::send(self.input.commit_text(text, canvas, renderer));
            }
            Command::Cancel => self.input.cancel_text(),
            Command::Pan(dx, dy) => canvas.pan(dx, dy, renderer),
            Command::Zoom { factor, x, y } => canvas.zoom_at(factor, x, y, renderer),
            // 送信者にも届く clear / rebuild で反映される
            Command::Clear => return Outcome::send(vec![ClientEvent::Clear]),
            Command::Undo => return Outcome::send(vec![ClientEvent::Undo]),
            Command::Redo => return Outcome::send(vec![ClientEvent::Redo]),
            Command::Join(room) => {
                self.input.pointer_leave(renderer);
                self.room = room.clone();
                return Outcome {
                    events: vec![ClientEvent::Join(room.to_string())],
                    joined: Some(room),
                    quit: false,
                };
            }
            Command::Show => {
                let summary = format_summary(
                    &self.room,
                    canvas.actions().len(),
                    canvas.cursors().len(),
                    canvas.view(),
                );
                renderer.note(&summary);
            }
            Command::Help => renderer.note(HELP),
            Command::Quit => {
                return Outcome {
                    quit: true,
                    ..Outcome::default()
                };
            }
        }
        Outcome::default()
    }
}
