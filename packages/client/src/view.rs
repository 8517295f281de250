//! 表示変換（パン・ズーム）
//!
//! `screen = world * scale + (tx, ty)`。変換は各クライアントのローカル状態で、
//! サーバーには送られない。

use codraw_server::domain::Point;

pub const MIN_SCALE: f64 = 0.25;
pub const MAX_SCALE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub scale: f64,
    pub tx: f64,
    pub ty: f64,
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            tx: 0.0,
            ty: 0.0,
        }
    }
}

impl ViewTransform {
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Point {
        Point {
            x: (sx - self.tx) / self.scale,
            y: (sy - self.ty) / self.scale,
        }
    }

    pub fn world_to_screen(&self, point: Point) -> (f64, f64) {
        (
            point.x * self.scale + self.tx,
            point.y * self.scale + self.ty,
        )
    }

    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.tx += dx;
        self.ty += dy;
    }

    /// ポインタ位置 `(sx, sy)` の下にあるワールド座標を固定したまま拡大縮小する
    pub fn zoom_at(&mut self, factor: f64, sx: f64, sy: f64) {
        let anchor = self.screen_to_world(sx, sy);
        self.scale = (self.scale * factor).clamp(MIN_SCALE, MAX_SCALE);
        self.tx = sx - anchor.x * self.scale;
        self.ty = sy - anchor.y * self.scale;
    }
}
