//! Timer dispatcher (C8, spec §4.6): maps fired timer events back into
//! state-machine inputs.

use super::machine::{reason_for_timeout, status_update, Collaborators};
use super::{Dialog, Status, StopReason};
use crate::call::Call;
use crate::error::Result;
use crate::timer::{TimerEvent, TimerKind};
use crate::transport::ResendOptions;

/// Dispatches one fired `TimerEvent` against `dialog` (spec §4.6).
///
/// Stale events — a fire that raced a cancellation, or a `retrans` fire
/// that arrives in a status other than `accepted_uas` — are logged and
/// dropped, returning the dialog unchanged.
pub async fn dispatch_timer_event(
    event: TimerEvent,
    dialog: Dialog,
    call: &mut Call,
    collab: &Collaborators<'_>,
) -> Result<Dialog> {
    if is_stale(&event, &dialog) {
        tracing::debug!(dialog = %dialog.id, kind = ?event.kind, "stale timer event, dropping");
        return Ok(dialog);
    }

    match event.kind {
        TimerKind::Retrans => handle_retrans_fire(dialog, call, collab).await,
        TimerKind::Timeout => handle_timeout_fire(dialog, call, collab),
    }
}

fn is_stale(event: &TimerEvent, dialog: &Dialog) -> bool {
    let handle = match event.kind {
        TimerKind::Retrans => dialog.retrans_timer.as_ref(),
        TimerKind::Timeout => dialog.timeout_timer.as_ref(),
    };
    match handle {
        Some(h) => h.epoch() != event.epoch,
        None => true,
    }
}

async fn handle_retrans_fire(
    dialog: Dialog,
    call: &mut Call,
    collab: &Collaborators<'_>,
) -> Result<Dialog> {
    if !matches!(dialog.status, Status::AcceptedUas) {
        tracing::debug!(dialog = %dialog.id, "retrans timer fired outside accepted_uas, dropping");
        return Ok(dialog);
    }

    let Some(response) = dialog.invite_resp.clone() else {
        tracing::debug!(dialog = %dialog.id, "retrans timer fired with no stored response, dropping");
        return Ok(dialog);
    };

    let sent = collab
        .transport
        .resend_response(&response, &dialog.id, ResendOptions::default())
        .await;

    match sent {
        Ok(()) => {
            let mut dialog = dialog;
            let period = dialog.next_retrans.min(collab.config.t2);
            let handle = collab
                .timers
                .start_timer(period, TimerKind::Retrans, dialog.id.clone());
            dialog.retrans_timer = Some(handle);
            dialog.next_retrans = (dialog.next_retrans * 2).min(collab.config.t2);
            crate::call::store(dialog.clone(), call);
            Ok(dialog)
        }
        Err(err) => {
            tracing::warn!(dialog = %dialog.id, error = %err, "retransmission failed, stopping dialog");
            status_update(Status::Stop(StopReason::AckTimeout), dialog, call, collab)
        }
    }
}

fn handle_timeout_fire(dialog: Dialog, call: &mut Call, collab: &Collaborators<'_>) -> Result<Dialog> {
    let reason = reason_for_timeout(&dialog);
    status_update(Status::Stop(reason), dialog, call, collab)
}
