//! SIP dialog layer: RFC 3261 dialog state machine, route/target/session
//! updates, and retransmission/timeout timers.
//!
//! This crate is the subsystem that tracks the lifecycle of a logical
//! end-to-end relationship between two user agents established by an
//! INVITE transaction. It deliberately knows nothing about SIP message
//! parsing/serialization, transport-level send/receive, transaction
//! matching, or SDP parsing — those are consumed through the narrow
//! collaborator traits in [`transport`] and [`sdp`], and through the
//! `rsip` types passed in by the caller.
//!
//! ```rust,no_run
//! use rsipstack_dialog::call::Call;
//! use rsipstack_dialog::config::DialogLayerConfig;
//! use rsipstack_dialog::dialog::{self, Role};
//!
//! # fn example(req: &rsip::Request, resp: &rsip::Response) -> rsipstack_dialog::error::Result<()> {
//! let config = DialogLayerConfig::default();
//! let dialog = dialog::create(Role::Uac, "my-app", req, resp, false, &config)?;
//! let mut call = Call::new();
//! rsipstack_dialog::call::store(dialog, &mut call);
//! # Ok(())
//! # }
//! ```

pub mod call;
pub mod config;
pub mod dialog;
pub mod error;
pub mod notifier;
pub mod sdp;
pub mod timer;
pub mod transport;

pub use call::Call;
pub use config::DialogLayerConfig;
pub use dialog::{Dialog, DialogId, Role, Status, StopReason};
pub use error::{Error, Result};
