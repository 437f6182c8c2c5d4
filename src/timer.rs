use crate::dialog::DialogId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

/// Which of the two timers armed per dialog (spec §4.6) this handle/event
/// refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    Retrans,
    Timeout,
}

/// Opaque handle to an armed timer.
///
/// Carries a generation (`epoch`) so a fire event that raced a cancellation
/// can be recognized as stale by the dispatcher (spec §5 "Cancellation",
/// §9 "Timers").
#[derive(Debug, Clone)]
pub struct TimerHandle {
    pub dialog_id: DialogId,
    pub kind: TimerKind,
    pub(crate) epoch: u64,
    pub(crate) cancel: CancellationToken,
}

impl TimerHandle {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

/// Delivered to the timer dispatcher (C8) when an armed timer fires.
#[derive(Debug, Clone)]
pub struct TimerEvent {
    pub dialog_id: DialogId,
    pub kind: TimerKind,
    pub epoch: u64,
}

/// Schedules one-shot, cancellable callbacks keyed by `(dialog_id, kind)`.
///
/// `cancel_timer` is idempotent and tolerates a timer that already fired but
/// whose event has not yet been dispatched — the dispatcher is responsible
/// for discarding such stale events by comparing `TimerHandle::epoch`.
pub trait TimerService: Send + Sync {
    fn start_timer(&self, duration: Duration, kind: TimerKind, dialog_id: DialogId) -> TimerHandle;
    fn cancel_timer(&self, handle: &TimerHandle);
}

/// `tokio::time`-backed [`TimerService`]. Every armed timer is its own
/// `tokio::task`, torn down via a per-handle [`CancellationToken`] — the same
/// primitive the surrounding stack already uses for dialog-scoped
/// cancellation.
pub struct TokioTimerService {
    fired_tx: UnboundedSender<TimerEvent>,
    epoch: AtomicU64,
}

impl TokioTimerService {
    pub fn new(fired_tx: UnboundedSender<TimerEvent>) -> Self {
        Self {
            fired_tx,
            epoch: AtomicU64::new(0),
        }
    }
}

impl TimerService for TokioTimerService {
    fn start_timer(&self, duration: Duration, kind: TimerKind, dialog_id: DialogId) -> TimerHandle {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst);
        let cancel = CancellationToken::new();
        let handle = TimerHandle {
            dialog_id: dialog_id.clone(),
            kind,
            epoch,
            cancel: cancel.clone(),
        };

        let fired_tx = self.fired_tx.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(duration) => {
                    let _ = fired_tx.send(TimerEvent { dialog_id, kind, epoch });
                }
            }
        });

        handle
    }

    fn cancel_timer(&self, handle: &TimerHandle) {
        handle.cancel.cancel();
    }
}
