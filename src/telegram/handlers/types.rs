//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::UserId;

use crate::storage::db::DbPool;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub db_pool: Arc<DbPool>,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(db_pool: Arc<DbPool>) -> Self {
        Self { db_pool }
    }
}

/// Sender id as stored in the database.
///
/// Returns `None` when the Telegram id does not fit in an i64. Callers must
/// skip the update in that case rather than substitute a default: user_id 0
/// is the seeded main admin row, so a fallback id would grant admin access.
pub fn sender_id(id: UserId) -> Option<i64> {
    i64::try_from(id.0).ok()
}
