use cosmwasm_std::{Addr, Uint256};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::config::NATIVE_TOKEN_ADDRESS;

/// `pool(pid)` result, in contract order.
pub type RawPool = (Addr, Uint256, Uint256, Uint256, Uint256, Uint256, Uint256);
/// `user(pid, address)` result.
pub type RawUser = (Uint256, Uint256, Uint256);
/// `withdrawAmount(pid, address)` result: requested, then withdrawable.
pub type RawWithdrawAmount = (Uint256, Uint256);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct PoolInfo {
    pub stake_token_address: Addr,
    pub pool_weight: Uint256,
    pub last_reward_block: Uint256,
    pub acc_reward_per_share: Uint256,
    pub total_staked: Uint256,
    pub min_deposit_amount: Uint256,
    pub unstake_locked_blocks: Uint256,
}

impl PoolInfo {
    pub fn from_raw(raw: Option<RawPool>) -> Option<Self> {
        let (
            stake_token_address,
            pool_weight,
            last_reward_block,
            acc_reward_per_share,
            total_staked,
            min_deposit_amount,
            unstake_locked_blocks,
        ) = raw?;

        Some(PoolInfo {
            stake_token_address,
            pool_weight,
            last_reward_block,
            acc_reward_per_share,
            total_staked,
            min_deposit_amount,
            unstake_locked_blocks,
        })
    }

    pub fn is_native(&self) -> bool {
        self.stake_token_address.as_str().eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
    }
}

/// A wallet's position in one pool. Unstake requests are not listed per
/// request; `WithdrawAmount` carries their totals.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default, JsonSchema)]
pub struct UserInfo {
    pub staked_amount: Uint256,
    pub finished_reward_amount: Uint256,
    pub pending_reward_amount: Uint256,
}

impl UserInfo {
    pub fn from_raw(raw: Option<RawUser>) -> Option<Self> {
        let (staked_amount, finished_reward_amount, pending_reward_amount) = raw?;
        Some(UserInfo {
            staked_amount,
            finished_reward_amount,
            pending_reward_amount,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
pub struct WithdrawAmount {
    pub requested: Uint256,
    pub withdrawable: Uint256,
}

impl WithdrawAmount {
    /// Clamps `withdrawable` to `requested` so `locked` stays non-negative.
    pub fn from_raw(raw: Option<RawWithdrawAmount>) -> Option<Self> {
        let (requested, withdrawable) = raw?;
        Some(WithdrawAmount {
            requested,
            withdrawable: withdrawable.min(requested),
        })
    }

    pub fn locked(&self) -> Uint256 {
        self.requested.saturating_sub(self.withdrawable)
    }
}
