use std::time::Duration;

/// Call-scoped configuration constants for the dialog layer (spec §6).
///
/// `t_dialog` defaults to 32 seconds, matching the dialog inactivity timer
/// used by nksip's Erlang dialog layer rather than being derived from
/// `t1`/`t2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayerConfig {
    /// Base retransmission interval (SIP `T1`).
    pub t1: Duration,
    /// Retransmission ceiling (SIP `T2`).
    pub t2: Duration,
    /// Dialog inactivity timeout armed on every non-terminal status update.
    pub t_dialog: Duration,
}

impl Default for DialogLayerConfig {
    fn default() -> Self {
        Self {
            t1: Duration::from_millis(500),
            t2: Duration::from_secs(4),
            t_dialog: Duration::from_secs(32),
        }
    }
}

impl DialogLayerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_t1(mut self, t1: Duration) -> Self {
        self.t1 = t1;
        self
    }

    pub fn with_t2(mut self, t2: Duration) -> Self {
        self.t2 = t2;
        self
    }

    pub fn with_t_dialog(mut self, t_dialog: Duration) -> Self {
        self.t_dialog = t_dialog;
        self
    }
}
