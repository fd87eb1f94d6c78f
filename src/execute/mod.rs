// src/execute/mod.rs
pub mod admin;
pub mod lifecycle;
pub mod stake;

pub use admin::{prepare_add_pool, prepare_pause, AddPoolForm};
pub use lifecycle::{ActionController, ActionOutcome, ActionPhase};
pub use stake::{prepare_claim, prepare_deposit, prepare_unstake, prepare_withdraw, Preconditions};

use crate::query::ReadTag;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Deposit,
    Unstake,
    Withdraw,
    Claim,
    PauseClaim,
    UnpauseClaim,
    PauseWithdraw,
    UnpauseWithdraw,
    AddPool,
}

const POSITION_READS: &[ReadTag] = &[
    ReadTag::StakingBalance,
    ReadTag::WithdrawAmount,
    ReadTag::PendingReward,
    ReadTag::UserInfo,
    ReadTag::PoolInfo,
];

const POSITION_AND_WALLET_READS: &[ReadTag] = &[
    ReadTag::StakingBalance,
    ReadTag::WithdrawAmount,
    ReadTag::PendingReward,
    ReadTag::UserInfo,
    ReadTag::PoolInfo,
    ReadTag::WalletBalance,
];

impl ActionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::Deposit => "deposit",
            ActionKind::Unstake => "unstake",
            ActionKind::Withdraw => "withdraw",
            ActionKind::Claim => "claim",
            ActionKind::PauseClaim => "pause_claim",
            ActionKind::UnpauseClaim => "unpause_claim",
            ActionKind::PauseWithdraw => "pause_withdraw",
            ActionKind::UnpauseWithdraw => "unpause_withdraw",
            ActionKind::AddPool => "add_pool",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Deposit => "Deposit",
            ActionKind::Unstake => "Unstake request",
            ActionKind::Withdraw => "Withdraw",
            ActionKind::Claim => "Claim reward",
            ActionKind::PauseClaim => "Pause claim",
            ActionKind::UnpauseClaim => "Unpause claim",
            ActionKind::PauseWithdraw => "Pause withdraw",
            ActionKind::UnpauseWithdraw => "Unpause withdraw",
            ActionKind::AddPool => "Add pool",
        }
    }

    /// Reads that go stale once this action's transaction succeeds.
    pub fn invalidates(&self) -> &'static [ReadTag] {
        match self {
            ActionKind::Deposit | ActionKind::Withdraw => POSITION_AND_WALLET_READS,
            ActionKind::Unstake => POSITION_READS,
            ActionKind::Claim => &[ReadTag::PendingReward, ReadTag::UserInfo],
            ActionKind::PauseClaim
            | ActionKind::UnpauseClaim
            | ActionKind::PauseWithdraw
            | ActionKind::UnpauseWithdraw => &[ReadTag::PauseState],
            ActionKind::AddPool => &[ReadTag::PoolLength],
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(
            self,
            ActionKind::PauseClaim
                | ActionKind::UnpauseClaim
                | ActionKind::PauseWithdraw
                | ActionKind::UnpauseWithdraw
                | ActionKind::AddPool
        )
    }
}
