//! The SIP dialog record and its state machine (spec §3, §4).

mod create;
mod machine;
mod route;
mod session;
mod subscription;
mod target;
pub mod timers;

#[cfg(test)]
mod tests;

pub use create::create;
pub use machine::status_update;
pub use subscription::{find_sub, store_sub, Subscription, SubscriptionStatus};

use crate::error::Result;
use crate::timer::TimerHandle;
use bytes::Bytes;
use rsip::prelude::{HeadersExt, ToTypedHeader, UntypedHeader};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{Duration, Instant};

static DIALOG_COUNTER: AtomicI64 = AtomicI64::new(0);

/// The process-wide dialog counter (spec §5 "Shared resources"). Safe under
/// concurrent Calls because it is a single monotone atomic.
pub fn dialog_count() -> i64 {
    DIALOG_COUNTER.load(Ordering::SeqCst)
}

fn increment_dialog_counter() {
    DIALOG_COUNTER.fetch_add(1, Ordering::SeqCst);
}

fn decrement_dialog_counter() {
    DIALOG_COUNTER.fetch_sub(1, Ordering::SeqCst);
}

/// Which of the three SIP roles created this dialog (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Uac,
    Uas,
    Proxy,
}

/// Opaque dialog identifier: a pure function of role + establishing
/// response (invariant 1). `local_tag`/`remote_tag` are already swapped by
/// role at construction time, so comparisons never need to know the role.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DialogId {
    pub call_id: String,
    pub local_tag: String,
    pub remote_tag: String,
}

impl DialogId {
    pub fn new(
        role: Role,
        call_id: impl Into<String>,
        from_tag: impl Into<String>,
        to_tag: impl Into<String>,
    ) -> Self {
        let call_id = call_id.into();
        let from_tag = from_tag.into();
        let to_tag = to_tag.into();
        match role {
            Role::Uac => Self {
                call_id,
                local_tag: from_tag,
                remote_tag: to_tag,
            },
            Role::Uas | Role::Proxy => Self {
                call_id,
                local_tag: to_tag,
                remote_tag: from_tag,
            },
        }
    }

    /// Derives a `DialogId` from the establishing response, per invariant 1:
    /// re-deriving it from the same `(role, response)` always yields the
    /// same value.
    pub fn try_from_response(role: Role, resp: &rsip::Response) -> Result<Self> {
        let call_id = resp.call_id_header()?.value().to_string();
        let from = resp.from_header()?.typed()?;
        let to = resp.to_header()?.typed()?;
        let from_tag = tag_of(&from.params).unwrap_or_default();
        let to_tag = tag_of(&to.params).unwrap_or_default();
        Ok(Self::new(role, call_id, from_tag, to_tag))
    }
}

impl std::fmt::Display for DialogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};local={};remote={}", self.call_id, self.local_tag, self.remote_tag)
    }
}

pub(crate) fn tag_of(params: &[rsip::Param]) -> Option<String> {
    params.iter().find_map(|p| match p {
        rsip::Param::Tag(t) => Some(t.to_string()),
        _ => None,
    })
}

/// Dialog lifecycle status (spec §3). `Stop` is a payload-carrying terminal
/// state; keep pattern matches on it total so "any stop reason" branches
/// stay trivial (spec §9 "Status representation").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Init,
    ProceedingUac,
    ProceedingUas,
    AcceptedUac,
    AcceptedUas,
    Confirmed,
    Bye,
    Stop(StopReason),
}

impl Status {
    pub fn is_stop(&self) -> bool {
        matches!(self, Status::Stop(_))
    }
}

/// Normalized termination reason (spec §4.2, P5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    Busy,
    Cancelled,
    ServiceUnavailable,
    Declined,
    Timeout,
    AckTimeout,
    /// A SIP status code with no dedicated reason, passed through unchanged.
    Code(u16),
}

/// `normalize_reason(486)=busy`, `(487)=cancelled`, `(503)=service_unavailable`,
/// `(603)=declined`; any other code passes through unchanged (P5).
pub fn normalize_reason(code: u16) -> StopReason {
    match code {
        486 => StopReason::Busy,
        487 => StopReason::Cancelled,
        503 => StopReason::ServiceUnavailable,
        603 => StopReason::Declined,
        other => StopReason::Code(other),
    }
}

pub(crate) fn normalize_stop_reason(reason: StopReason) -> StopReason {
    match reason {
        StopReason::Code(code) => normalize_reason(code),
        other => other,
    }
}

/// Sentinel `remote_target` used before the first real Contact is learned
/// (spec §4.4 edge case, scenario 4): a `target_update` notification is
/// suppressed the first time the sentinel is replaced.
pub fn sentinel_remote_target() -> rsip::Uri {
    rsip::Uri::try_from("sip:invalid.invalid").expect("sentinel URI is well-formed")
}

/// A SIP dialog (spec §3). Mutated by replacement: every operation in §4
/// takes a `Dialog` by value (or `&mut`) and returns/leaves the next
/// revision, matching the "values replaced in place" design note (§9) —
/// safe here because a Call's dialogs are only ever touched from one
/// serialized context at a time (spec §5).
#[derive(Debug, Clone)]
pub struct Dialog {
    pub id: DialogId,
    pub role: Role,
    pub app_id: String,
    pub call_id: String,

    pub created: Instant,
    pub updated: Instant,
    pub answered: Option<Instant>,

    pub status: Status,

    pub local_seq: u32,
    pub remote_seq: u32,

    pub local_uri: rsip::Uri,
    pub remote_uri: rsip::Uri,

    pub local_target: rsip::Uri,
    pub remote_target: rsip::Uri,

    pub route_set: Vec<rsip::Uri>,

    pub secure: bool,
    pub early: bool,
    pub caller_tag: String,

    pub local_sdp: Option<Bytes>,
    pub remote_sdp: Option<Bytes>,
    pub media_started: bool,
    pub sdp_offer: Option<crate::sdp::SdpSlot>,
    pub sdp_answer: Option<crate::sdp::SdpSlot>,

    pub invite_req: Option<rsip::Request>,
    pub invite_resp: Option<rsip::Response>,
    pub invite_class: Option<Role>,
    pub ack_req: Option<rsip::Request>,

    pub retrans_timer: Option<TimerHandle>,
    pub timeout_timer: Option<TimerHandle>,
    pub next_retrans: Duration,

    pub stop_reason: Option<StopReason>,
    pub subs: Vec<Subscription>,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Init => write!(f, "init"),
            Status::ProceedingUac => write!(f, "proceeding_uac"),
            Status::ProceedingUas => write!(f, "proceeding_uas"),
            Status::AcceptedUac => write!(f, "accepted_uac"),
            Status::AcceptedUas => write!(f, "accepted_uas"),
            Status::Confirmed => write!(f, "confirmed"),
            Status::Bye => write!(f, "bye"),
            Status::Stop(reason) => write!(f, "stop({:?})", reason),
        }
    }
}
