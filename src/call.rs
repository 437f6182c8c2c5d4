//! Call-scoped dialog store (spec §4.7, C6).

use crate::dialog::{Dialog, DialogId, Status};

/// Hint the store leaves for the outer scheduler after a `store()` call
/// (spec §9 "Head-fast-path"): observed only on the head-position path, it
/// is how the caller decides whether to compact or hibernate a Call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HibernateHint {
    #[default]
    None,
    DialogStop,
    DialogConfirmed,
}

/// An ordered collection of dialogs belonging to one Call (spec §3), with
/// MRU-style insertion and terminal removal.
#[derive(Debug, Clone, Default)]
pub struct Call {
    dialogs: Vec<Dialog>,
    pub hibernate: HibernateHint,
}

impl Call {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dialogs(&self) -> &[Dialog] {
        &self.dialogs
    }

    pub fn len(&self) -> usize {
        self.dialogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dialogs.is_empty()
    }
}

/// Linear lookup by `DialogId` (§4.7 `find`).
pub fn find<'a>(id: &DialogId, call: &'a Call) -> Option<&'a Dialog> {
    call.dialogs.iter().find(|d| &d.id == id)
}

/// Inserts or updates `dialog` in `call`, applying the head-fast-path
/// described in §4.7: the common case is that the dialog just touched by
/// `status_update` is already at the head of the list, so that path is
/// checked first and short-circuits the general search.
pub fn store(dialog: Dialog, call: &mut Call) {
    call.hibernate = HibernateHint::None;

    if let Some(head) = call.dialogs.first() {
        if head.id == dialog.id {
            if matches!(dialog.status, Status::Stop(_)) {
                call.dialogs.remove(0);
                call.hibernate = HibernateHint::DialogStop;
            } else if matches!(dialog.status, Status::Confirmed) {
                call.dialogs[0] = dialog;
                call.hibernate = HibernateHint::DialogConfirmed;
            } else {
                call.dialogs[0] = dialog;
            }
            return;
        }
    }

    match call.dialogs.iter().position(|d| d.id == dialog.id) {
        Some(idx) => {
            if matches!(dialog.status, Status::Stop(_)) {
                call.dialogs.remove(idx);
            } else if matches!(dialog.status, Status::Confirmed) {
                call.dialogs[idx] = dialog;
                call.hibernate = HibernateHint::DialogConfirmed;
            } else {
                call.dialogs[idx] = dialog;
            }
        }
        None => {
            if !matches!(dialog.status, Status::Stop(_)) {
                call.dialogs.insert(0, dialog);
            }
        }
    }
}
