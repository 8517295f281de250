//! Room 集約
//!
//! 1 つの Room が持つ履歴（`actions`）と redo スタック、接続中のメンバーを管理します。
//!
//! ## 不変条件
//!
//! - `redo` が空でないのは、最後の追加・クリア以降に undo が行われた場合のみ
//! - Stroke / Shape / Text の追加とクリアは必ず `redo` を空にする
//! - undo / redo は Action 単位でのみ行われる

use super::{
    entity::Action,
    error::RoomError,
    value_object::{ConnectionId, RoomId, Timestamp},
};

/// Room ごとの上限値
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomLimits {
    /// 履歴に保持できる Action 数（redo に移った分も含めて超えない）
    pub max_actions: usize,
    /// 同時に参加できる接続数
    pub max_members: usize,
}

impl Default for RoomLimits {
    fn default() -> Self {
        Self {
            max_actions: 10_000,
            max_members: 64,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub created_at: Timestamp,
    /// 確定済みの履歴（古い順）
    pub actions: Vec<Action>,
    /// undo された Action（末尾が次に redo される）
    pub redo: Vec<Action>,
    /// 参加中の接続（参加順）
    pub members: Vec<ConnectionId>,
    limits: RoomLimits,
}

impl Room {
    pub fn new(id: RoomId, created_at: Timestamp) -> Self {
        Self::with_limits(id, created_at, RoomLimits::default())
    }

    pub fn with_limits(id: RoomId, created_at: Timestamp, limits: RoomLimits) -> Self {
        Self {
            id,
            created_at,
            actions: Vec::new(),
            redo: Vec::new(),
            members: Vec::new(),
            limits,
        }
    }

    pub fn limits(&self) -> RoomLimits {
        self.limits
    }

    /// 接続を Room に参加させ、現在の履歴スナップショットを返す
    ///
    /// 既に参加済みの接続はそのままスナップショットだけを返す。
    pub fn join(&mut self, connection_id: ConnectionId) -> Result<Vec<Action>, RoomError> {
        if !self.is_member(&connection_id) {
            if self.members.len() >= self.limits.max_members {
                return Err(RoomError::MemberCapacityExceeded(self.limits.max_members));
            }
            self.members.push(connection_id);
        }
        Ok(self.snapshot())
    }

    /// 接続を Room から外す。参加していなかった場合は `false`
    pub fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        let before = self.members.len();
        self.members.retain(|id| id != connection_id);
        self.members.len() != before
    }

    pub fn is_member(&self, connection_id: &ConnectionId) -> bool {
        self.members.contains(connection_id)
    }

    /// 指定した接続以外のメンバー
    pub fn members_except(&self, connection_id: &ConnectionId) -> Vec<ConnectionId> {
        self.members
            .iter()
            .filter(|id| *id != connection_id)
            .cloned()
            .collect()
    }

    /// 履歴の末尾に Action を追加する（redo は破棄される）
    pub fn append(&mut self, action: Action) -> Result<(), RoomError> {
        if self.actions.len() >= self.limits.max_actions {
            return Err(RoomError::HistoryCapacityExceeded(self.limits.max_actions));
        }
        self.actions.push(action);
        self.redo.clear();
        Ok(())
    }

    pub fn clear(&mut self) {
        self.actions.clear();
        self.redo.clear();
    }

    /// 最後の Action を redo スタックへ移す
    ///
    /// 履歴が空の場合は何もせず `None` を返す（ブロードキャストも不要）。
    pub fn undo(&mut self) -> Option<Vec<Action>> {
        let action = self.actions.pop()?;
        self.redo.push(action);
        Some(self.snapshot())
    }

    /// redo スタックの末尾を履歴へ戻す
    pub fn redo(&mut self) -> Option<Vec<Action>> {
        let action = self.redo.pop()?;
        self.actions.push(action);
        Some(self.snapshot())
    }

    pub fn snapshot(&self) -> Vec<Action> {
        self.actions.clone()
    }
}
