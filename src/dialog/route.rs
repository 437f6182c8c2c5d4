use super::{Dialog, Role};
use crate::transport::TransportHint;
use rsip::prelude::ToTypedHeader;

/// Builds `route_set` from Record-Route headers the first time a dialog is
/// answered; a no-op afterwards (spec §4.3).
pub fn update_route(dialog: &mut Dialog, transport: &dyn TransportHint) {
    if dialog.answered.is_some() {
        return;
    }

    let mut hops = match dialog.role {
        Role::Uac => {
            let mut hops = dialog
                .invite_resp
                .as_ref()
                .map(|r| record_route_uris(&r.headers))
                .unwrap_or_default();
            hops.reverse();
            hops
        }
        Role::Uas | Role::Proxy => dialog
            .invite_req
            .as_ref()
            .map(|r| record_route_uris(&r.headers))
            .unwrap_or_default(),
    };

    if let Some(first) = hops.first() {
        if transport.is_local(&dialog.app_id, first) {
            hops.remove(0);
        }
    }

    dialog.route_set = hops;
}

fn record_route_uris(headers: &rsip::Headers) -> Vec<rsip::Uri> {
    headers
        .iter()
        .filter_map(|h| match h {
            rsip::Header::RecordRoute(rr) => rr.typed().ok(),
            _ => None,
        })
        .flat_map(|typed| typed.uris().into_iter().map(|n| n.uri).collect::<Vec<_>>())
        .collect()
}
