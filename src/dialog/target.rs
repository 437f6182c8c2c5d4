use super::{Dialog, Role};
use crate::error::Result;
use crate::notifier::{DialogEvent, DialogNotifier};
use rsip::prelude::ToTypedHeader;
use std::time::Instant;

/// Target update (spec §4.4): adopts the single Contact on each side when
/// unambiguous, latches `early`, sets `answered` on the first final
/// response, and keeps the in-flight INVITE exchange's stored Contact
/// current so a later final response reflects it.
pub fn update_target(dialog: &mut Dialog, notifier: &dyn DialogNotifier) -> Result<()> {
    let (Some(req), Some(resp)) = (dialog.invite_req.clone(), dialog.invite_resp.clone()) else {
        return Ok(());
    };

    let (remote_contacts, local_contacts) = match dialog.role {
        Role::Uac => (contacts_of(&resp.headers), contacts_of(&req.headers)),
        Role::Uas | Role::Proxy => (contacts_of(&req.headers), contacts_of(&resp.headers)),
    };

    let previous_remote = dialog.remote_target.clone();
    let sentinel = super::sentinel_remote_target();

    match remote_contacts.as_slice() {
        [one] => {
            let mut uri = one.clone();
            if dialog.secure {
                uri.scheme = Some(rsip::Scheme::Sips);
            }
            dialog.remote_target = uri;
        }
        other => {
            tracing::warn!(
                dialog = %dialog.id,
                count = other.len(),
                "target update: expected exactly one remote Contact, retaining previous"
            );
        }
    }

    match local_contacts.as_slice() {
        [one] => {
            dialog.local_target = one.clone();
        }
        other => {
            tracing::warn!(
                dialog = %dialog.id,
                count = other.len(),
                "target update: expected exactly one local Contact, retaining previous"
            );
        }
    }

    let code = resp.status_code.code();
    dialog.early = dialog.early && (100..200).contains(&code);

    if dialog.answered.is_none() && code >= 200 {
        dialog.answered = Some(Instant::now());
    }

    if dialog.remote_target != previous_remote && previous_remote != sentinel {
        notifier.dialog_update(&dialog.id, DialogEvent::TargetUpdate);
    }

    if code < 200 {
        if let Some(stored_req) = dialog.invite_req.as_mut() {
            match dialog.invite_class {
                Some(Role::Uas) => patch_contact(stored_req, &dialog.remote_target),
                Some(Role::Uac) => patch_contact(stored_req, &dialog.local_target),
                _ => {}
            }
        }
    }

    Ok(())
}

fn contacts_of(headers: &rsip::Headers) -> Vec<rsip::Uri> {
    headers
        .iter()
        .filter_map(|h| match h {
            rsip::Header::Contact(c) => c.typed().ok().map(|t| t.uri),
            _ => None,
        })
        .collect()
}

fn patch_contact(req: &mut rsip::Request, uri: &rsip::Uri) {
    let contact = rsip::typed::Contact {
        display_name: None,
        uri: uri.clone(),
        params: vec![],
    };
    req.headers.unique_push(rsip::Header::Contact(contact.into()));
}
