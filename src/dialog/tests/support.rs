use crate::dialog::DialogId;
use crate::notifier::{DialogEvent, DialogNotifier, SessionEvent};
use crate::timer::{TimerHandle, TimerKind, TimerService};
use crate::transport::{ResendOptions, TransportHint, TransportSendError};
use rsip::headers::*;
use rsip::{Request, Response, StatusCode, Uri};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, Once};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

static TRACING_INIT: Once = Once::new();

/// Installs a `tracing_subscriber` once per test binary run (subsequent
/// calls are no-ops), matching the corpus convention of initializing a
/// `fmt` subscriber up front so `tracing::debug!`/`warn!` call sites in the
/// state machine and timer dispatcher are visible when a test is run with
/// `cargo test -- --nocapture`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(tracing::Level::DEBUG)
            .try_init();
    });
}

/// Builds an INVITE request with the given tags/Call-ID and, optionally, a
/// chain of Record-Route headers (nearest proxy first, i.e. top of the
/// list as it appears on the wire).
pub fn invite_request(from_tag: &str, to_tag: &str, call_id: &str, record_route: &[&str]) -> Request {
    init_tracing();
    let mut headers: Vec<rsip::Header> = vec![
        Via::new("SIP/2.0/UDP alice.example.com:5060;branch=z9hG4bKnashds").into(),
        CSeq::new("1 INVITE").into(),
        From::new(&format!("Alice <sip:alice@example.com>;tag={}", from_tag)).into(),
        to_header(to_tag),
        CallId::new(call_id).into(),
        Contact::new("<sip:alice@alice.example.com:5060>").into(),
        MaxForwards::new("70").into(),
    ];
    for hop in record_route.iter() {
        headers.push(RecordRoute::new(&format!("<{}>", hop)).into());
    }
    Request {
        method: rsip::Method::Invite,
        uri: Uri::try_from("sip:bob@example.com:5060").unwrap(),
        headers: headers.into(),
        version: rsip::Version::V2,
        body: Vec::new(),
    }
}

fn to_header(to_tag: &str) -> rsip::Header {
    if to_tag.is_empty() {
        To::new("Bob <sip:bob@example.com>").into()
    } else {
        To::new(&format!("Bob <sip:bob@example.com>;tag={}", to_tag)).into()
    }
}

/// Builds a response establishing/advancing the dialog, with a single
/// Contact and an optional chain of Record-Route headers (same ordering
/// convention as [`invite_request`]).
pub fn response(
    status: StatusCode,
    from_tag: &str,
    to_tag: &str,
    call_id: &str,
    contact: &str,
    record_route: &[&str],
) -> Response {
    let mut headers: Vec<rsip::Header> = vec![
        Via::new("SIP/2.0/UDP alice.example.com:5060;branch=z9hG4bKnashds").into(),
        CSeq::new("1 INVITE").into(),
        From::new(&format!("Alice <sip:alice@example.com>;tag={}", from_tag)).into(),
        To::new(&format!("Bob <sip:bob@example.com>;tag={}", to_tag)).into(),
        CallId::new(call_id).into(),
        Contact::new(&format!("<{}>", contact)).into(),
    ];
    for hop in record_route.iter() {
        headers.push(RecordRoute::new(&format!("<{}>", hop)).into());
    }
    Response {
        status_code: status,
        version: rsip::Version::V2,
        headers: headers.into(),
        body: Vec::new(),
    }
}

/// Records every notification delivered to it, in order, for assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    pub dialog_events: Mutex<Vec<DialogEvent>>,
    pub session_events: Mutex<Vec<SessionEvent>>,
}

impl DialogNotifier for RecordingNotifier {
    fn dialog_update(&self, _id: &DialogId, event: DialogEvent) {
        self.dialog_events.lock().unwrap().push(event);
    }

    fn session_update(&self, _id: &DialogId, event: SessionEvent) {
        self.session_events.lock().unwrap().push(event);
    }
}

/// A [`TimerService`] that never actually schedules anything: `start_timer`
/// records the requested `(kind, duration)` and hands back a handle with a
/// fresh epoch, so tests can drive timer fires deterministically instead of
/// waiting on real time.
#[derive(Default)]
pub struct ManualTimerService {
    pub armed: Mutex<Vec<(TimerKind, Duration)>>,
    pub cancellations: Mutex<u32>,
    epoch: AtomicU64,
}

impl TimerService for ManualTimerService {
    fn start_timer(&self, duration: Duration, kind: TimerKind, dialog_id: DialogId) -> TimerHandle {
        self.armed.lock().unwrap().push((kind, duration));
        TimerHandle {
            dialog_id,
            kind,
            epoch: self.epoch.fetch_add(1, Ordering::SeqCst),
            cancel: CancellationToken::new(),
        }
    }

    fn cancel_timer(&self, _handle: &TimerHandle) {
        *self.cancellations.lock().unwrap() += 1;
    }
}

/// A [`TransportHint`] whose `is_local` and `resend_response` behavior is
/// fixed at construction time.
pub struct MockTransport {
    local: Vec<String>,
    resend_result: Mutex<Box<dyn FnMut() -> Result<(), TransportSendError> + Send>>,
}

impl MockTransport {
    pub fn new(local: &[&str]) -> Self {
        Self {
            local: local.iter().map(|s| s.to_string()).collect(),
            resend_result: Mutex::new(Box::new(|| Ok(()))),
        }
    }

    pub fn always_fail(local: &[&str]) -> Self {
        Self {
            local: local.iter().map(|s| s.to_string()).collect(),
            resend_result: Mutex::new(Box::new(|| Err(TransportSendError("no route".into())))),
        }
    }
}

#[async_trait::async_trait]
impl TransportHint for MockTransport {
    fn is_local(&self, _app_id: &str, uri: &rsip::Uri) -> bool {
        self.local.iter().any(|l| l == &uri.to_string())
    }

    async fn resend_response(
        &self,
        _response: &rsip::Response,
        _dialog_id: &DialogId,
        _opts: ResendOptions,
    ) -> Result<(), TransportSendError> {
        (self.resend_result.lock().unwrap())()
    }
}
