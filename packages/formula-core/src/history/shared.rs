use crate::history::{HistoryCache, UserId};
use parking_lot::Mutex;

/// 複数のリクエストから共有する HistoryCache
///
/// 記録処理（存在確認・追加・削除）は一つのロック区間で完結する
#[derive(Debug, Default)]
pub struct SharedHistory {
    inner: Mutex<HistoryCache>,
}

impl SharedHistory {
    pub fn new(max_users: usize) -> Self {
        Self {
            inner: Mutex::new(HistoryCache::new(max_users)),
        }
    }

    pub fn record(&self, user_id: UserId, query: impl Into<String>) {
        self.inner.lock().record(user_id, query);
    }

    pub fn last_query(&self, user_id: UserId) -> Option<String> {
        self.inner.lock().last_query(user_id).map(str::to_owned)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}
