//! 値オブジェクト定義
//!
//! クライアントから届く値はすべてここで検証されます。
//! 生成に成功した値オブジェクトは常に不変条件を満たします。

use std::fmt;

use super::error::ValueObjectError;

pub const ROOM_ID_MAX_LEN: usize = 64;
pub const COLOR_MAX_LEN: usize = 32;
pub const BRUSH_SIZE_MAX: f64 = 200.0;
pub const TEXT_MAX_CHARS: usize = 1000;

// ========================================
// RoomId
// ========================================

/// Room の識別子
///
/// ASCII 英数字、`-`、`_` のみ（1〜64 文字）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.is_empty() {
            return Err(ValueObjectError::EmptyRoomId);
        }
        let len = value.chars().count();
        if len > ROOM_ID_MAX_LEN {
            return Err(ValueObjectError::RoomIdTooLong(len));
        }
        if let Some(c) = value
            .chars()
            .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        {
            return Err(ValueObjectError::InvalidRoomIdCharacter(c));
        }
        Ok(Self(value))
    }

    /// Factory 専用（生成済みの値は検証不要）
    pub(super) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// ConnectionId
// ========================================

/// WebSocket 接続の識別子（サーバー側で採番）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyConnectionId);
        }
        Ok(Self(value))
    }

    pub(super) fn new_unchecked(value: String) -> Self {
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ========================================
// Timestamp
// ========================================

/// Unix タイムスタンプ（ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

// ========================================
// Geometry
// ========================================

/// Check that a coordinate is finite.
pub fn finite(value: f64, field: &'static str) -> Result<f64, ValueObjectError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValueObjectError::NonFiniteCoordinate(field))
    }
}

/// Check that a length (width, height, radius) is finite and non-negative.
pub fn length(value: f64, field: &'static str) -> Result<f64, ValueObjectError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ValueObjectError::InvalidLength(field))
    }
}

/// ワールド座標上の点
///
/// パン・ズームに依存しない座標系。表示変換はクライアントのみが持つ。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Result<Self, ValueObjectError> {
        Ok(Self {
            x: finite(x, "x")?,
            y: finite(y, "y")?,
        })
    }
}

// ========================================
// Color / BrushSize / TextContent
// ========================================

/// CSS カラー文字列（例: `#ff0000`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Color(String);

impl Color {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::EmptyColor);
        }
        if value.len() > COLOR_MAX_LEN {
            return Err(ValueObjectError::ColorTooLong(value.len()));
        }
        if value.chars().any(char::is_control) {
            return Err(ValueObjectError::InvalidColorCharacter);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Color {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ブラシの太さ（ワールド座標単位）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSize(f64);

impl BrushSize {
    pub fn new(value: f64) -> Result<Self, ValueObjectError> {
        if value.is_finite() && value > 0.0 && value <= BRUSH_SIZE_MAX {
            Ok(Self(value))
        } else {
            Err(ValueObjectError::InvalidBrushSize(value))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for BrushSize {
    type Error = ValueObjectError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// テキストの内容（前後の空白は除去される）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextContent(String);

impl TextContent {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let value = value.trim().to_string();
        if value.is_empty() {
            return Err(ValueObjectError::EmptyText);
        }
        let chars = value.chars().count();
        if chars > TEXT_MAX_CHARS {
            return Err(ValueObjectError::TextTooLong(chars));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for TextContent {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_id_accepts_generated_style_code() {
        // テスト項目: 英数字のみの Room ID が生成できる
        // given (前提条件):
        let value = "abc123".to_string();

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(result.unwrap().as_str(), "abc123");
    }

    #[test]
    fn test_room_id_rejects_empty_and_invalid_characters() {
        // テスト項目: 空文字列や不正な文字を含む Room ID はエラーになる
        // given (前提条件):
        let empty = String::new();
        let with_slash = "room/1".to_string();

        // when (操作):
        let empty_result = RoomId::new(empty);
        let slash_result = RoomId::new(with_slash);

        // then (期待する結果):
        assert_eq!(empty_result, Err(ValueObjectError::EmptyRoomId));
        assert_eq!(
            slash_result,
            Err(ValueObjectError::InvalidRoomIdCharacter('/'))
        );
    }

    #[test]
    fn test_room_id_rejects_too_long() {
        // テスト項目: 65 文字以上の Room ID はエラーになる
        // given (前提条件):
        let value = "a".repeat(ROOM_ID_MAX_LEN + 1);

        // when (操作):
        let result = RoomId::new(value);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::RoomIdTooLong(ROOM_ID_MAX_LEN + 1))
        );
    }

    #[test]
    fn test_point_rejects_non_finite_coordinates() {
        // テスト項目: NaN や無限大の座標は拒否される
        // given (前提条件):
        let nan = f64::NAN;
        let inf = f64::INFINITY;

        // when (操作):
        let nan_result = Point::new(nan, 0.0);
        let inf_result = Point::new(0.0, inf);

        // then (期待する結果):
        assert_eq!(nan_result, Err(ValueObjectError::NonFiniteCoordinate("x")));
        assert_eq!(inf_result, Err(ValueObjectError::NonFiniteCoordinate("y")));
        assert!(Point::new(-10.5, 3.0).is_ok());
    }

    #[test]
    fn test_length_rejects_negative() {
        // テスト項目: 負の長さは拒否され、0 は許可される
        // given / when (操作):
        let negative = length(-1.0, "w");
        let zero = length(0.0, "w");

        // then (期待する結果):
        assert_eq!(negative, Err(ValueObjectError::InvalidLength("w")));
        assert_eq!(zero, Ok(0.0));
    }

    #[test]
    fn test_color_validation() {
        // テスト項目: カラー文字列の検証（空、長すぎる、制御文字）
        // given (前提条件):
        let ok = "#ff0000".to_string();
        let blank = "   ".to_string();
        let long = "#".repeat(COLOR_MAX_LEN + 1);
        let control = "#ff\n00".to_string();

        // when / then:
        assert_eq!(Color::new(ok).unwrap().as_str(), "#ff0000");
        assert_eq!(Color::new(blank), Err(ValueObjectError::EmptyColor));
        assert_eq!(
            Color::new(long),
            Err(ValueObjectError::ColorTooLong(COLOR_MAX_LEN + 1))
        );
        assert_eq!(
            Color::new(control),
            Err(ValueObjectError::InvalidColorCharacter)
        );
    }

    #[test]
    fn test_brush_size_bounds() {
        // テスト項目: ブラシサイズは (0, 200] の範囲のみ許可される
        // given / when / then:
        assert!(BrushSize::new(4.0).is_ok());
        assert!(BrushSize::new(BRUSH_SIZE_MAX).is_ok());
        assert!(BrushSize::new(0.0).is_err());
        assert!(BrushSize::new(-2.0).is_err());
        assert!(BrushSize::new(f64::NAN).is_err());
        assert!(BrushSize::new(BRUSH_SIZE_MAX + 1.0).is_err());
    }

    #[test]
    fn test_text_content_is_trimmed_and_non_empty() {
        // テスト項目: テキストはトリムされ、空白のみの場合はエラーになる
        // given (前提条件):
        let padded = "  hello  ".to_string();
        let blank = " \n\t ".to_string();

        // when (操作):
        let padded_result = TextContent::new(padded);
        let blank_result = TextContent::new(blank);

        // then (期待する結果):
        assert_eq!(padded_result.unwrap().as_str(), "hello");
        assert_eq!(blank_result, Err(ValueObjectError::EmptyText));
    }
}
