use crate::dialog::DialogId;

/// Options accompanying a response retransmission attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResendOptions {
    pub attempt: u32,
}

/// Transport-level send failure, surfaced to the retransmission handler
/// (spec §4.6, §7 "Transport send failure").
#[derive(Debug, Clone)]
pub struct TransportSendError(pub String);

impl std::fmt::Display for TransportSendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transport send failed: {}", self.0)
    }
}

impl std::error::Error for TransportSendError {}

/// Narrow interface onto the transport collaborator (spec §6).
///
/// Genuinely external: no default implementation is provided, since
/// determining "is this URI one of our listening addresses" and resending a
/// buffered response both require the transport layer's connection/listener
/// state, which is out of scope for the dialog layer (spec §1).
#[async_trait::async_trait]
pub trait TransportHint: Send + Sync {
    fn is_local(&self, app_id: &str, uri: &rsip::Uri) -> bool;

    async fn resend_response(
        &self,
        response: &rsip::Response,
        dialog_id: &DialogId,
        opts: ResendOptions,
    ) -> std::result::Result<(), TransportSendError>;
}
