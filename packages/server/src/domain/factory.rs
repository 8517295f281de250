//! ID の生成

use rand::Rng;
use uuid::Uuid;

use super::value_object::{ConnectionId, RoomId};

const ROOM_CODE_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ROOM_CODE_LEN: usize = 6;

/// RoomId Factory
///
/// 共有リンク用の 6 文字の英小文字・数字コードを生成する。
pub struct RoomIdFactory;

impl RoomIdFactory {
    pub fn generate() -> RoomId {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// 乱数源を指定して生成（各文字は一様に選ばれる）
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> RoomId {
        let code: String = (0..ROOM_CODE_LEN)
            .map(|_| ROOM_CODE_ALPHABET[rng.gen_range(0..ROOM_CODE_ALPHABET.len())] as char)
            .collect();
        RoomId::new_unchecked(code)
    }
}

/// ConnectionId Factory
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    pub fn generate() -> ConnectionId {
        ConnectionId::new_unchecked(Uuid::new_v4().to_string())
    }
}
