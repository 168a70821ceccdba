use std::sync::Arc;

use service::notify::NotificationDispatcher;
use service::storage::KvStore;

#[derive(Clone)]
pub struct ServerState {
    pub store: Arc<KvStore>,
    pub dispatcher: Arc<NotificationDispatcher>,
}
