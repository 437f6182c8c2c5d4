/// Status of a `Subscription` sub-record (spec §3 "Subscription").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionStatus {
    Pending,
    Active,
    Terminated(crate::dialog::StopReason),
}

impl SubscriptionStatus {
    pub fn is_terminated(&self) -> bool {
        matches!(self, SubscriptionStatus::Terminated(_))
    }
}

/// An event subscription attached to a dialog (e.g. a SUBSCRIBE/NOTIFY
/// relationship), identified by `event_id` within its owning dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subscription {
    pub event_id: String,
    pub status: SubscriptionStatus,
}

/// Finds a subscription by event id within a dialog's `subs` list (C7,
/// mirrors `find` in §4.7). Linear scan — `subs` is expected to stay small.
pub fn find_sub<'a>(event_id: &str, subs: &'a [Subscription]) -> Option<&'a Subscription> {
    subs.iter().find(|s| s.event_id == event_id)
}

/// Stores a subscription into a dialog's `subs` list (C7, mirrors `store`
/// in §4.7): same head-fast-path as the Call-scoped dialog store, applied
/// at sub-list granularity. A terminated sub is removed rather than kept.
pub fn store_sub(sub: Subscription, subs: &mut Vec<Subscription>) {
    let terminated = sub.status.is_terminated();

    if let Some(first) = subs.first() {
        if first.event_id == sub.event_id {
            if terminated {
                subs.remove(0);
            } else {
                subs[0] = sub;
            }
            return;
        }
    }

    match subs.iter().position(|s| s.event_id == sub.event_id) {
        Some(idx) => {
            if terminated {
                subs.remove(idx);
            } else {
                subs[idx] = sub;
            }
        }
        None => {
            if !terminated {
                subs.insert(0, sub);
            }
        }
    }
}
