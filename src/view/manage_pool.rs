use cosmwasm_std::{Addr, Event, Uint256};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::amount::format_amount;
use crate::chain::ChainSession;
use crate::contracts::{erc20_address, ERC20_ABI, STAKE_ABI};
use crate::error::ClientError;
use crate::feedback::Feedback;
use crate::msg::QueryMsg;
use crate::query::{refetch_tagged, FetchStatus, ReadQuery, ReadTag, Refetch};
use crate::state::{ClientConfig, PauseState, PoolInfo, PoolStatus, RawPool};

pub const UNKNOWN: &str = "unknown";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ManagePoolView {
    pub pid: u64,
    pub loaded: bool,
    pub is_native: bool,
    pub stake_token_address: Option<String>,
    pub token_symbol: String,
    pub token_balance: String,
    pub pool_weight: String,
    pub last_reward_block: String,
    pub acc_reward_per_share: String,
    pub total_staked: String,
    pub min_deposit: String,
    pub unstake_locked_blocks: String,
    pub status: PoolStatus,
    pub status_label: String,
}

/// Admin-side card for one pool: pool parameters plus the staking token's
/// symbol and the admin's balance of it.
pub struct ManagePoolCard {
    pid: u64,
    decimals: u32,
    places: u32,
    pool: ReadQuery<RawPool>,
    claim_paused: ReadQuery<bool>,
    withdraw_paused: ReadQuery<bool>,
    token_symbol: Option<ReadQuery<String>>,
    token_balance: Option<ReadQuery<Uint256>>,
}

impl ManagePoolCard {
    pub fn new(pid: u64, config: &ClientConfig) -> Self {
        let contract = config.stake_contract.clone();
        ManagePoolCard {
            pid,
            decimals: config.token_decimals,
            places: config.display_decimals,
            pool: ReadQuery::new(ReadTag::PoolInfo, contract.clone(), &STAKE_ABI, QueryMsg::Pool { pid }),
            claim_paused: ReadQuery::new(ReadTag::PauseState, contract.clone(), &STAKE_ABI, QueryMsg::ClaimPaused {}),
            withdraw_paused: ReadQuery::new(ReadTag::PauseState, contract, &STAKE_ABI, QueryMsg::WithdrawPaused {}),
            token_symbol: None,
            token_balance: None,
        }
    }

    pub fn pid(&self) -> u64 {
        self.pid
    }

    pub fn pool_info(&self) -> Option<PoolInfo> {
        PoolInfo::from_raw(self.pool.safe_data())
    }

    pub fn pause_state(&self) -> Option<PauseState> {
        PauseState::from_flags(self.claim_paused.safe_data(), self.withdraw_paused.safe_data())
    }

    pub fn mount(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        self.refresh(&[ReadTag::PoolInfo, ReadTag::PauseState, ReadTag::TokenInfo], session, feedback);
    }

    pub fn refresh(&mut self, tags: &[ReadTag], session: &ChainSession, feedback: &mut Feedback) {
        let reads: Vec<&mut dyn Refetch> = vec![
            &mut self.pool as &mut dyn Refetch,
            &mut self.claim_paused as &mut dyn Refetch,
            &mut self.withdraw_paused as &mut dyn Refetch,
        ];
        refetch_tagged(reads, tags, session, feedback);

        if tags.contains(&ReadTag::PoolInfo) || tags.contains(&ReadTag::TokenInfo) {
            self.load_token(session, feedback);
        }
    }

    /// Native pools show the network's ERC-20 staking token.
    fn token_address(&self, session: &ChainSession) -> Result<Option<Addr>, ClientError> {
        let pool = match self.pool_info() {
            Some(pool) => pool,
            None => return Ok(None),
        };
        if !pool.is_native() {
            return Ok(Some(pool.stake_token_address));
        }
        let chain_id = session.chain_id().ok_or(ClientError::ProviderUnavailable)?;
        erc20_address(chain_id).map(Some)
    }

    fn load_token(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        let token = match self.token_address(session) {
            Ok(token) => token,
            Err(err) => {
                feedback.log(
                    Event::new("read")
                        .add_attribute("query", "token_address")
                        .add_attribute("outcome", "error")
                        .add_attribute("error", err.to_string()),
                );
                None
            }
        };
        let token = match token {
            Some(token) => token,
            None => {
                self.token_symbol = None;
                self.token_balance = None;
                return;
            }
        };

        let mut symbol = ReadQuery::new(ReadTag::TokenInfo, token.clone(), &ERC20_ABI, QueryMsg::Symbol {});
        symbol.refetch(session, feedback);
        self.token_symbol = Some(symbol);

        self.token_balance = session.account().cloned().map(|account| {
            let mut balance = ReadQuery::new(
                ReadTag::TokenInfo,
                token,
                &ERC20_ABI,
                QueryMsg::BalanceOf { account },
            );
            balance.refetch(session, feedback);
            balance
        });
    }

    pub fn render(&self) -> ManagePoolView {
        let fmt = |value: Option<Uint256>| format_amount(value, self.decimals, self.places);
        let pool = self.pool_info();
        let status = self.pause_state().unwrap_or_default().status();
        let int = |value: Option<Uint256>| value.unwrap_or_default().to_string();

        let token_symbol = self
            .token_symbol
            .as_ref()
            .and_then(|q| q.safe_data())
            .unwrap_or_else(|| UNKNOWN.to_string());
        let token_balance = match &self.token_balance {
            Some(q) if q.status() == FetchStatus::Loaded => fmt(q.safe_data()),
            _ => UNKNOWN.to_string(),
        };

        ManagePoolView {
            pid: self.pid,
            loaded: pool.is_some(),
            is_native: pool.as_ref().map(|p| p.is_native()).unwrap_or(false),
            stake_token_address: pool.as_ref().map(|p| p.stake_token_address.to_string()),
            token_symbol,
            token_balance,
            pool_weight: int(pool.as_ref().map(|p| p.pool_weight)),
            last_reward_block: int(pool.as_ref().map(|p| p.last_reward_block)),
            acc_reward_per_share: int(pool.as_ref().map(|p| p.acc_reward_per_share)),
            total_staked: fmt(pool.as_ref().map(|p| p.total_staked)),
            min_deposit: fmt(pool.as_ref().map(|p| p.min_deposit_amount)),
            unstake_locked_blocks: int(pool.as_ref().map(|p| p.unstake_locked_blocks)),
            status,
            status_label: status.label().to_string(),
        }
    }
}
