use super::{normalize_stop_reason, route, session, target};
use super::{decrement_dialog_counter, Dialog, Status, StopReason};
use crate::call::{store, Call};
use crate::config::DialogLayerConfig;
use crate::error::Result;
use crate::notifier::{DialogEvent, DialogNotifier, SessionEvent};
use crate::sdp::SdpOfferAnswer;
use crate::timer::{TimerKind, TimerService};
use crate::transport::TransportHint;
use std::time::Instant;

/// The collaborators a single `status_update`/timer dispatch needs:
/// notifications out, timers, the transport hint used by route update, and
/// the SDP comparator used by session update. Bundled so call sites don't
/// carry five separate parameters (spec §9 "Notifications": injected so C5
/// stays testable).
pub struct Collaborators<'a> {
    pub notifier: &'a dyn DialogNotifier,
    pub timers: &'a dyn TimerService,
    pub transport: &'a dyn TransportHint,
    pub sdp: &'a dyn SdpOfferAnswer,
    pub config: &'a DialogLayerConfig,
}

/// Drives a dialog's `status` transition (spec §4.2).
///
/// Internally calls into route/target/session update (C4) and the store
/// (C6) — the caller only needs to pass the `Call` the dialog lives in.
pub fn status_update(
    new_status: Status,
    mut dialog: Dialog,
    call: &mut Call,
    collab: &Collaborators<'_>,
) -> Result<Dialog> {
    let old_status = dialog.status.clone();

    // Invariant 3: once stopped, no further mutation except removal.
    if old_status.is_stop() {
        return Ok(dialog);
    }

    if matches!(old_status, Status::Init) {
        collab.notifier.dialog_update(&dialog.id, DialogEvent::Start);
    }

    if let Some(handle) = dialog.retrans_timer.take() {
        collab.timers.cancel_timer(&handle);
    }
    if let Some(handle) = dialog.timeout_timer.take() {
        collab.timers.cancel_timer(&handle);
    }

    dialog.updated = Instant::now();

    let new_status = if let Status::Stop(reason) = new_status {
        let normalized = normalize_stop_reason(reason);
        dialog.stop_reason = Some(normalized);
        collab
            .notifier
            .dialog_update(&dialog.id, DialogEvent::Stop(normalized));
        Status::Stop(normalized)
    } else {
        if new_status != old_status {
            collab
                .notifier
                .dialog_update(&dialog.id, DialogEvent::Status(new_status.clone()));
        }
        let handle =
            collab
                .timers
                .start_timer(collab.config.t_dialog, TimerKind::Timeout, dialog.id.clone());
        dialog.timeout_timer = Some(handle);
        new_status
    };

    if dialog.media_started && matches!(new_status, Status::Bye | Status::Stop(_)) {
        collab.notifier.session_update(&dialog.id, SessionEvent::Stop);
        dialog.media_started = false;
    }

    if matches!(
        new_status,
        Status::ProceedingUac | Status::ProceedingUas | Status::AcceptedUac | Status::AcceptedUas
    ) {
        route::update_route(&mut dialog, collab.transport);
        target::update_target(&mut dialog, collab.notifier)?;
        session::update_session(&mut dialog, collab.notifier, collab.sdp);
    }

    if matches!(new_status, Status::AcceptedUas) {
        let handle = collab
            .timers
            .start_timer(collab.config.t1, TimerKind::Retrans, dialog.id.clone());
        dialog.retrans_timer = Some(handle);
        dialog.next_retrans = collab.config.t1 * 2;
    }

    if matches!(new_status, Status::Confirmed) {
        session::update_session(&mut dialog, collab.notifier, collab.sdp);
        dialog.invite_req = None;
        dialog.invite_resp = None;
        dialog.invite_class = None;
    }

    dialog.status = new_status.clone();

    if matches!(new_status, Status::Stop(_)) {
        decrement_dialog_counter();
    }

    store(dialog.clone(), call);
    Ok(dialog)
}

pub(crate) fn reason_for_timeout(dialog: &Dialog) -> StopReason {
    match dialog.status {
        Status::AcceptedUac | Status::AcceptedUas => StopReason::AckTimeout,
        _ => StopReason::Timeout,
    }
}
