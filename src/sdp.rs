use bytes::Bytes;

/// Which side of the dialog an offer/answer slot (spec §3) originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Party {
    Local,
    Remote,
}

/// The SIP message that carried an SDP body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdpSource {
    Request,
    Response,
    Ack,
}

/// A pending SDP offer or answer, tagged with where it came from.
#[derive(Debug, Clone)]
pub struct SdpSlot {
    pub party: Party,
    pub source: SdpSource,
    pub sdp: Bytes,
}

/// SDP equality "that considers version/content" (spec §4.5), left pluggable
/// so this crate does not need to depend on an SDP parser itself (SDP
/// parsing is out of scope per spec §1).
pub trait SdpOfferAnswer: Send + Sync {
    fn sdp_eq(&self, a: &[u8], b: &[u8]) -> bool;
}

/// Default comparator: exact byte equality. A caller with an SDP parser
/// (e.g. `sdp-rs`) can supply a comparator that ignores origin line
/// version bumps that don't change the actual media description.
#[derive(Debug, Default, Clone, Copy)]
pub struct ByteEqSdp;

impl SdpOfferAnswer for ByteEqSdp {
    fn sdp_eq(&self, a: &[u8], b: &[u8]) -> bool {
        a == b
    }
}
