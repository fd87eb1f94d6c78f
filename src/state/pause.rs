use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Global pause switches. They apply to every pool.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, JsonSchema)]
pub struct PauseState {
    pub claim_paused: bool,
    pub withdraw_paused: bool,
}

impl PauseState {
    /// `None` when neither flag has loaded. A single missing flag reads as not paused.
    pub fn from_flags(claim_paused: Option<bool>, withdraw_paused: Option<bool>) -> Option<Self> {
        if claim_paused.is_none() && withdraw_paused.is_none() {
            return None;
        }
        Some(PauseState {
            claim_paused: claim_paused.unwrap_or(false),
            withdraw_paused: withdraw_paused.unwrap_or(false),
        })
    }

    pub fn status(&self) -> PoolStatus {
        PoolStatus::derive(self.claim_paused, self.withdraw_paused)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PoolStatus {
    BothPaused,
    ClaimPaused,
    WithdrawPaused,
    Active,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum StatusTone {
    Danger,
    Warning,
    Success,
}

impl PoolStatus {
    pub fn derive(claim_paused: bool, withdraw_paused: bool) -> Self {
        if claim_paused && withdraw_paused {
            PoolStatus::BothPaused
        } else if claim_paused {
            PoolStatus::ClaimPaused
        } else if withdraw_paused {
            PoolStatus::WithdrawPaused
        } else {
            PoolStatus::Active
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PoolStatus::BothPaused => "both paused",
            PoolStatus::ClaimPaused => "claim paused",
            PoolStatus::WithdrawPaused => "withdraw paused",
            PoolStatus::Active => "active",
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            PoolStatus::BothPaused => StatusTone::Danger,
            PoolStatus::ClaimPaused | PoolStatus::WithdrawPaused => StatusTone::Warning,
            PoolStatus::Active => StatusTone::Success,
        }
    }
}
