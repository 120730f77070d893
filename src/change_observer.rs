use tokio::sync::broadcast;

/// Emits one unit per observable state change.
pub trait ChangeObserver {
    fn observe(&self) -> broadcast::Receiver<()>;
}
