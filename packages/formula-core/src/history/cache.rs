use crate::constants::MAX_TRACKED_USERS;
use crate::history::UserId;
use std::collections::{HashMap, VecDeque};

/// ユーザーごとの直近クエリを保持するキャッシュ
///
/// 保持するユーザー数は max_users まで。上限を超えると最初に登録された
/// ユーザーから削除する。既存ユーザーのクエリ更新では順序は変わらない
/// （最終利用順ではなく登録順）。
#[derive(Debug, Clone)]
pub struct HistoryCache {
    queries: HashMap<UserId, String>,
    order: VecDeque<UserId>, // 登録順
    max_users: usize,
}

impl HistoryCache {
    pub fn new(max_users: usize) -> Self {
        Self {
            queries: HashMap::new(),
            order: VecDeque::new(),
            max_users,
        }
    }

    /// ユーザーのクエリを記録する
    pub fn record(&mut self, user_id: UserId, query: impl Into<String>) {
        let query = query.into();

        if let Some(stored) = self.queries.get_mut(&user_id) {
            *stored = query;
            return;
        }

        self.order.push_back(user_id);
        self.queries.insert(user_id, query);

        // 一度の記録で削除するのは最大1件
        if self.order.len() > self.max_users
            && let Some(oldest) = self.order.pop_front()
        {
            self.queries.remove(&oldest);
            tracing::debug!(user_id = oldest, "evicted oldest user from history");
        }
    }

    /// ユーザーの直近のクエリを返す。記録がなければ None
    pub fn last_query(&self, user_id: UserId) -> Option<&str> {
        self.queries.get(&user_id).map(String::as_str)
    }

    pub fn contains(&self, user_id: UserId) -> bool {
        self.queries.contains_key(&user_id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_users
    }
}

impl Default for HistoryCache {
    fn default() -> Self {
        Self::new(MAX_TRACKED_USERS)
    }
}
