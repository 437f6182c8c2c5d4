use crate::dialog::{DialogId, Status, StopReason};
use bytes::Bytes;
use tokio::sync::mpsc::UnboundedSender;

/// Out-of-band notifications emitted about a dialog's lifecycle (spec §6).
#[derive(Debug, Clone)]
pub enum DialogEvent {
    Start,
    Status(Status),
    TargetUpdate,
    Stop(StopReason),
}

/// Out-of-band notifications about the SDP session carried by a dialog.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Start { local_sdp: Bytes, remote_sdp: Bytes },
    Update { local_sdp: Bytes, remote_sdp: Bytes },
    Stop,
}

/// Delivers `dialog_update`/`session_update` callbacks to the owning
/// application handler, synchronously, from the Call's serialized context
/// (spec §5 "Ordering guarantees").
pub trait DialogNotifier: Send + Sync {
    fn dialog_update(&self, id: &DialogId, event: DialogEvent);
    fn session_update(&self, id: &DialogId, event: SessionEvent);
}

/// A notification routed through a [`ChannelNotifier`].
#[derive(Debug, Clone)]
pub enum Notification {
    Dialog(DialogId, DialogEvent),
    Session(DialogId, SessionEvent),
}

/// Forwards notifications over an unbounded channel, generalizing the
/// `DialogStateSender` pattern already used to plumb dialog state out to
/// application tasks.
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(sender: UnboundedSender<Notification>) -> Self {
        Self { sender }
    }
}

impl DialogNotifier for ChannelNotifier {
    fn dialog_update(&self, id: &DialogId, event: DialogEvent) {
        if self
            .sender
            .send(Notification::Dialog(id.clone(), event))
            .is_err()
        {
            tracing::debug!(dialog = %id, "dialog_update: notifier channel closed, dropping event");
        }
    }

    fn session_update(&self, id: &DialogId, event: SessionEvent) {
        if self
            .sender
            .send(Notification::Session(id.clone(), event))
            .is_err()
        {
            tracing::debug!(dialog = %id, "session_update: notifier channel closed, dropping event");
        }
    }
}
