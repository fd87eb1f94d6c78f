use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Uint256};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ClientConfigMsg {
    pub stake_contract: String,
    pub chain_id: u64,
    pub token_decimals: Option<u32>,
    pub display_decimals: Option<u32>,
}

/// View functions read from the stake contract and from ERC-20 tokens.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum QueryMsg {
    Pool { pid: u64 },
    User { pid: u64, user: Addr },
    WithdrawAmount { pid: u64, user: Addr },
    PendingMetaNode { pid: u64, user: Addr },
    StakingBalance { pid: u64, user: Addr },
    ClaimPaused {},
    WithdrawPaused {},
    PoolLength {},
    Symbol {},
    BalanceOf { account: Addr },
}

impl QueryMsg {
    pub fn function_name(&self) -> &'static str {
        match self {
            QueryMsg::Pool { .. } => "pool",
            QueryMsg::User { .. } => "user",
            QueryMsg::WithdrawAmount { .. } => "withdrawAmount",
            QueryMsg::PendingMetaNode { .. } => "pendingMetaNode",
            QueryMsg::StakingBalance { .. } => "stakingBalance",
            QueryMsg::ClaimPaused {} => "claimPaused",
            QueryMsg::WithdrawPaused {} => "withdrawPaused",
            QueryMsg::PoolLength {} => "poolLength",
            QueryMsg::Symbol {} => "symbol",
            QueryMsg::BalanceOf { .. } => "balanceOf",
        }
    }
}

/// Mutating functions of the stake contract.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum ExecuteMsg {
    #[serde(rename = "depositETH")]
    DepositEth {},
    Unstake {
        pid: u64,
        amount: Uint256,
    },
    Withdraw {
        pid: u64,
    },
    Claim {
        pid: u64,
    },
    AddPool {
        st_token_address: Addr,
        pool_weight: Uint256,
        min_deposit_amount: Uint256,
        unstake_locked_blocks: Uint256,
        with_update: bool,
    },
    PauseClaim {},
    UnpauseClaim {},
    PauseWithdraw {},
    UnpauseWithdraw {},
}

impl ExecuteMsg {
    pub fn function_name(&self) -> &'static str {
        match self {
            ExecuteMsg::DepositEth {} => "depositETH",
            ExecuteMsg::Unstake { .. } => "unstake",
            ExecuteMsg::Withdraw { .. } => "withdraw",
            ExecuteMsg::Claim { .. } => "claim",
            ExecuteMsg::AddPool { .. } => "addPool",
            ExecuteMsg::PauseClaim {} => "pauseClaim",
            ExecuteMsg::UnpauseClaim {} => "unpauseClaim",
            ExecuteMsg::PauseWithdraw {} => "pauseWithdraw",
            ExecuteMsg::UnpauseWithdraw {} => "unpauseWithdraw",
        }
    }
}

/// A write call ready to hand to the wallet. `value` is the native amount
/// attached to payable functions.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct WriteCall {
    pub msg: ExecuteMsg,
    pub value: Option<Uint256>,
}

impl WriteCall {
    pub fn new(msg: ExecuteMsg) -> Self {
        WriteCall { msg, value: None }
    }

    pub fn payable(msg: ExecuteMsg, value: Uint256) -> Self {
        WriteCall { msg, value: Some(value) }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, JsonSchema)]
pub struct TxHash(pub String);

impl std::fmt::Display for TxHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub status: ReceiptStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{from_slice, to_vec};

    #[test]
    fn messages_use_abi_names_on_the_wire() {
        let json = to_vec(&ExecuteMsg::DepositEth {}).unwrap();
        assert_eq!(String::from_utf8(json).unwrap(), r#"{"depositETH":{}}"#);

        let json = to_vec(&QueryMsg::PendingMetaNode { pid: 2, user: Addr::unchecked("0xabc") }).unwrap();
        assert_eq!(
            String::from_utf8(json).unwrap(),
            r#"{"pendingMetaNode":{"pid":2,"user":"0xabc"}}"#
        );

        let msg: ExecuteMsg = from_slice(br#"{"unstake":{"pid":1,"amount":"500"}}"#).unwrap();
        assert_eq!(msg, ExecuteMsg::Unstake { pid: 1, amount: Uint256::from(500u128) });
        assert_eq!(msg.function_name(), "unstake");
    }
}
