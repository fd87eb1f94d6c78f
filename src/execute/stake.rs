use cosmwasm_std::Uint256;

use crate::amount::parse_amount;
use crate::error::ClientError;
use crate::msg::{ExecuteMsg, WriteCall};
use crate::state::{PauseState, WithdrawAmount};

/// Cached reads a user action is checked against before submission. These
/// are client-side guards only; the contract has the final say.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Preconditions {
    pub pause: Option<PauseState>,
    pub pending_reward: Option<Uint256>,
    pub staking_balance: Option<Uint256>,
    pub withdraw: Option<WithdrawAmount>,
}

impl Preconditions {
    fn claim_paused(&self) -> bool {
        self.pause.map(|p| p.claim_paused).unwrap_or(false)
    }

    fn withdraw_paused(&self) -> bool {
        self.pause.map(|p| p.withdraw_paused).unwrap_or(false)
    }
}

pub fn prepare_deposit(amount: &str, decimals: u32) -> Result<WriteCall, ClientError> {
    let value = parse_amount(amount, decimals)?;
    Ok(WriteCall::payable(ExecuteMsg::DepositEth {}, value))
}

pub fn prepare_unstake(
    pid: u64,
    amount: &str,
    decimals: u32,
    pre: &Preconditions,
) -> Result<WriteCall, ClientError> {
    if amount.trim().is_empty() {
        return Err(ClientError::EmptyAmount);
    }
    if pre.staking_balance.unwrap_or_default().is_zero() {
        return Err(ClientError::NoStakedBalance);
    }
    let amount = parse_amount(amount, decimals)?;
    Ok(WriteCall::new(ExecuteMsg::Unstake { pid, amount }))
}

pub fn prepare_withdraw(pid: u64, pre: &Preconditions) -> Result<WriteCall, ClientError> {
    if pre.withdraw_paused() {
        return Err(ClientError::WithdrawPaused);
    }
    let withdrawable = pre.withdraw.map(|w| w.withdrawable).unwrap_or_default();
    if withdrawable.is_zero() {
        return Err(ClientError::NothingToWithdraw);
    }
    Ok(WriteCall::new(ExecuteMsg::Withdraw { pid }))
}

pub fn prepare_claim(pid: u64, pre: &Preconditions) -> Result<WriteCall, ClientError> {
    if pre.claim_paused() {
        return Err(ClientError::ClaimPaused);
    }
    if pre.pending_reward.unwrap_or_default().is_zero() {
        return Err(ClientError::NothingToClaim);
    }
    Ok(WriteCall::new(ExecuteMsg::Claim { pid }))
}
