use super::support::{invite_request, response};
use crate::config::DialogLayerConfig;
use crate::dialog::{self, Role, Status};
use rsip::StatusCode;
use serial_test::serial;

#[test]
#[serial]
fn uac_assigns_local_seq_and_swaps_uris() {
    let config = DialogLayerConfig::default();
    let req = invite_request("a", "", "call-1", &[]);
    let resp = response(StatusCode::OK, "a", "b", "call-1", "sip:bob@bob.example.com:5060", &[]);

    let dialog = dialog::create(Role::Uac, "app", &req, &resp, false, &config).unwrap();

    assert_eq!(dialog.local_seq, 1);
    assert_eq!(dialog.remote_seq, 0);
    assert_eq!(dialog.status, Status::Init);
    assert!(dialog.early);
    assert!(!dialog.media_started);
    assert_eq!(dialog.id.local_tag, "a");
    assert_eq!(dialog.id.remote_tag, "b");
}

#[test]
#[serial]
fn uas_assigns_remote_seq_and_swaps_uris() {
    let config = DialogLayerConfig::default();
    let req = invite_request("a", "", "call-2", &[]);
    let resp = response(StatusCode::OK, "a", "b", "call-2", "sip:bob@bob.example.com:5060", &[]);

    let dialog = dialog::create(Role::Uas, "app", &req, &resp, false, &config).unwrap();

    assert_eq!(dialog.local_seq, 0);
    assert_eq!(dialog.remote_seq, 1);
    assert_eq!(dialog.id.local_tag, "b");
    assert_eq!(dialog.id.remote_tag, "a");
}

#[test]
#[serial]
fn secure_requires_sips_scheme_and_tls_transport() {
    let config = DialogLayerConfig::default();
    let mut req = invite_request("a", "", "call-3", &[]);
    req.uri = rsip::Uri::try_from("sips:bob@example.com:5061").unwrap();
    let resp = response(StatusCode::OK, "a", "b", "call-3", "sip:bob@bob.example.com:5060", &[]);

    let not_tls = dialog::create(Role::Uac, "app", &req, &resp, false, &config).unwrap();
    assert!(!not_tls.secure);

    let with_tls = dialog::create(Role::Uac, "app", &req, &resp, true, &config).unwrap();
    assert!(with_tls.secure);
}

// `DIALOG_COUNTER` (src/dialog/mod.rs) is a single process-wide static shared
// by every test that calls `dialog::create`/`status_update` across this
// binary, which `cargo test` runs concurrently by default. `#[serial]` pins
// this test (and every other test in this crate that touches the counter)
// to the same default lock so no interleaving `create`/stop transition can
// land between the `before` read and the final assertion.
#[test]
#[serial]
fn dialog_counter_increments_on_create() {
    let config = DialogLayerConfig::default();
    let req = invite_request("a", "", "call-counter", &[]);
    let resp = response(StatusCode::OK, "a", "b", "call-counter", "sip:bob@bob.example.com:5060", &[]);

    let before = dialog::dialog_count();
    let _dialog = dialog::create(Role::Uac, "app", &req, &resp, false, &config).unwrap();
    assert_eq!(dialog::dialog_count(), before + 1);
}
