//! Server state shared by every connection handler.

use std::sync::Arc;

use crate::domain::ConnectionRepository;

/// Default depth of each connection's outbound queue
pub const DEFAULT_OUTBOX_CAPACITY: usize = 256;

/// Shared application state
///
/// Handlers receive the registry through this state instead of a global,
/// so tests can run several independent servers in one process.
pub struct AppState {
    /// Repository（接続とルーム参加情報のレジストリ）
    pub repository: Arc<dyn ConnectionRepository>,
    /// Capacity of the outbound queue created for each connection
    pub outbox_capacity: usize,
}

impl AppState {
    pub fn new(repository: Arc<dyn ConnectionRepository>, outbox_capacity: usize) -> Self {
        Self {
            repository,
            // mpsc::channel panics on zero capacity
            outbox_capacity: outbox_capacity.max(1),
        }
    }
}
