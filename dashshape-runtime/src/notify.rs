use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Created,
    Updated,
    Deleted,
    Refreshed,
}

/// Typed "data changed" notification. Pages holding results derived from `source_id`
/// should re-run their pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataChanged {
    pub source_id: String,
    pub kind: ChangeKind,
}

impl DataChanged {
    pub fn new<S: Into<String>>(source_id: S, kind: ChangeKind) -> Self {
        Self {
            source_id: source_id.into(),
            kind,
        }
    }
}

/// Publish/subscribe channel for data change notifications.
///
/// Receivers that fall more than the channel capacity behind observe
/// `RecvError::Lagged` and should treat it as "refresh everything".
#[derive(Debug, Clone)]
pub struct ChangeNotifier {
    sender: broadcast::Sender<DataChanged>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl ChangeNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DataChanged> {
        self.sender.subscribe()
    }

    /// Number of subscribers that will see the event. 0 when nobody is listening.
    pub fn publish(&self, event: DataChanged) -> usize {
        log::debug!("Publishing {:?} for source '{}'", event.kind, event.source_id);
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
