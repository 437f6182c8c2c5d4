use super::{
    increment_dialog_counter, sentinel_remote_target, tag_of, Dialog, DialogId, Role, Status,
};
use crate::config::DialogLayerConfig;
use crate::error::Result;
use rsip::prelude::{HeadersExt, ToTypedHeader, UntypedHeader};
use std::time::Instant;

/// Creates a fresh dialog from the establishing request/response pair
/// (spec §4.1).
///
/// `transport_is_tls` is supplied by the caller (the transaction layer
/// already knows whether the connection this exchange arrived on is TLS;
/// that fact, combined with the Request-URI scheme, determines `secure`,
/// which is write-once per invariant 5).
pub fn create(
    role: Role,
    app_id: impl Into<String>,
    req: &rsip::Request,
    resp: &rsip::Response,
    transport_is_tls: bool,
    config: &DialogLayerConfig,
) -> Result<Dialog> {
    let id = DialogId::try_from_response(role, resp)?;

    let cseq = req.cseq_header()?.seq()?;
    let (local_seq, remote_seq) = match role {
        Role::Uac => (cseq, 0),
        Role::Uas | Role::Proxy => (0, cseq),
    };

    let from = req.from_header()?.typed()?;
    let to = req.to_header()?.typed()?;
    let caller_tag = tag_of(&from.params).unwrap_or_default();

    let (local_uri, remote_uri) = match role {
        Role::Uac => (from.uri.clone(), to.uri.clone()),
        Role::Uas | Role::Proxy => (to.uri.clone(), from.uri.clone()),
    };

    let secure = matches!(req.uri.scheme, Some(rsip::Scheme::Sips)) && transport_is_tls;

    let now = Instant::now();

    Ok(Dialog {
        id,
        role,
        app_id: app_id.into(),
        call_id: req.call_id_header()?.value().to_string(),

        created: now,
        updated: now,
        answered: None,

        status: Status::Init,

        local_seq,
        remote_seq,

        local_uri,
        remote_uri,

        local_target: sentinel_remote_target(),
        remote_target: sentinel_remote_target(),

        route_set: Vec::new(),

        secure,
        early: true,
        caller_tag,

        local_sdp: None,
        remote_sdp: None,
        media_started: false,
        sdp_offer: None,
        sdp_answer: None,

        invite_req: Some(req.clone()),
        invite_resp: Some(resp.clone()),
        invite_class: Some(role),
        ack_req: None,

        retrans_timer: None,
        timeout_timer: None,
        next_retrans: config.t1,

        stop_reason: None,
        subs: Vec::new(),
    })
    .inspect(|_| increment_dialog_counter())
}
