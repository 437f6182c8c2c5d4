use super::Dialog;
use crate::notifier::{DialogNotifier, SessionEvent};
use crate::sdp::{Party, SdpOfferAnswer};

/// Commits a pending offer/answer pair into `local_sdp`/`remote_sdp`,
/// emitting `session_update(start)` or `session_update(update)` as needed
/// (spec §4.5). A no-op unless both `sdp_offer` and `sdp_answer` are set.
pub fn update_session(dialog: &mut Dialog, notifier: &dyn DialogNotifier, sdp_cmp: &dyn SdpOfferAnswer) {
    let (Some(offer), Some(answer)) = (dialog.sdp_offer.clone(), dialog.sdp_answer.clone()) else {
        return;
    };

    let (local_sdp, remote_sdp) = match (offer.party, answer.party) {
        (Party::Local, Party::Remote) => (offer.sdp, answer.sdp),
        (Party::Remote, Party::Local) => (answer.sdp, offer.sdp),
        _ => {
            tracing::warn!(
                dialog = %dialog.id,
                "session update: offer/answer both from the same party, discarding"
            );
            dialog.sdp_offer = None;
            dialog.sdp_answer = None;
            return;
        }
    };

    if !dialog.media_started {
        notifier.session_update(
            &dialog.id,
            SessionEvent::Start {
                local_sdp: local_sdp.clone(),
                remote_sdp: remote_sdp.clone(),
            },
        );
    } else {
        let local_changed = dialog
            .local_sdp
            .as_ref()
            .map(|s| !sdp_cmp.sdp_eq(s, &local_sdp))
            .unwrap_or(true);
        let remote_changed = dialog
            .remote_sdp
            .as_ref()
            .map(|s| !sdp_cmp.sdp_eq(s, &remote_sdp))
            .unwrap_or(true);

        if local_changed || remote_changed {
            notifier.session_update(
                &dialog.id,
                SessionEvent::Update {
                    local_sdp: local_sdp.clone(),
                    remote_sdp: remote_sdp.clone(),
                },
            );
        }
    }

    dialog.local_sdp = Some(local_sdp);
    dialog.remote_sdp = Some(remote_sdp);
    dialog.media_started = true;
    dialog.sdp_offer = None;
    dialog.sdp_answer = None;
}
