// src/zap/approval.rs
//! Zapper allowance state machine
//!
//! The dialog never decides on its own that the zapper is approved: it asks
//! for an approval, then waits for the allowance re-check to confirm it.
//!
//! ```text
//!   Unknown --Checked(false)--> Required --Requested--> Required (in flight)
//!      |                           ^                         |
//!      |                           +--------Failed-----------+
//!      +--Checked(true)--> Approved <--Checked(true)---------+
//!   any --AssetChanged--> Unknown
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ApprovalState {
    #[default]
    Unknown,
    Required,
    Approved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalEvent {
    /// Allowance lookup finished
    Checked { approved: bool },
    /// User asked for an approval transaction
    Requested,
    /// Approval transaction or its re-check failed
    Failed,
    /// Selected asset changed; the old allowance no longer applies
    AssetChanged,
}

/// What the confirm button does right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmMode {
    Approve,
    Proceed,
}

impl ConfirmMode {
    pub fn label(&self) -> &'static str {
        match self {
            ConfirmMode::Approve => "Approve",
            ConfirmMode::Proceed => "Let's go",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApprovalTracker {
    state: ApprovalState,
    in_flight: bool,
}

impl ApprovalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ApprovalState {
        self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn is_approved(&self) -> bool {
        self.state == ApprovalState::Approved
    }

    pub fn confirm_mode(&self) -> ConfirmMode {
        if self.is_approved() {
            ConfirmMode::Proceed
        } else {
            ConfirmMode::Approve
        }
    }

    pub fn button_label(&self) -> &'static str {
        if self.in_flight {
            "Approving..."
        } else {
            self.confirm_mode().label()
        }
    }

    /// Apply an event and return the resulting state
    pub fn handle(&mut self, event: ApprovalEvent) -> ApprovalState {
        match event {
            ApprovalEvent::Checked { approved } => {
                self.in_flight = false;
                self.state = if approved {
                    ApprovalState::Approved
                } else {
                    ApprovalState::Required
                };
            }
            ApprovalEvent::Requested => {
                if self.state != ApprovalState::Approved {
                    self.in_flight = true;
                    self.state = ApprovalState::Required;
                }
            }
            ApprovalEvent::Failed => {
                self.in_flight = false;
                if self.state != ApprovalState::Approved {
                    self.state = ApprovalState::Required;
                }
            }
            ApprovalEvent::AssetChanged => {
                self.in_flight = false;
                self.state = ApprovalState::Unknown;
            }
        }
        self.state
    }
}
