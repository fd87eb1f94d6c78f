// src/testing.rs
//! In-memory chain that behaves like the deployed stake contract, for tests.
use std::cell::RefCell;
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

use cosmwasm_std::{to_binary, Addr, Binary, StdError, StdResult, Uint256};

use crate::chain::{ChainReader, ChainSession, ChainWriter};
use crate::contracts::erc20::SEPOLIA_CHAIN_ID;
use crate::error::SubmitError;
use crate::msg::{ExecuteMsg, QueryMsg, Receipt, ReceiptStatus, TxHash, WriteCall};
use crate::state::{PoolInfo, NATIVE_TOKEN_ADDRESS};

pub const STAKE_CONTRACT: &str = "0x01A01E8B862F10a3907D0fC7f47eBF5d34190341";
pub const TOKEN_CONTRACT: &str = "0xC9653895302caD170124887666456606934495F0";
pub const USER: &str = "0x1111111111111111111111111111111111111111";
pub const ADMIN: &str = "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa";
pub const ETH: u128 = 1_000_000_000_000_000_000;

#[derive(Clone, Debug, Default)]
struct Position {
    staked: Uint256,
    finished: Uint256,
    pending: Uint256,
    requested: Uint256,
    withdrawable: Uint256,
}

#[derive(Debug)]
struct SentTx {
    from: Addr,
    call: WriteCall,
}

#[derive(Debug, Default)]
struct MockState {
    pools: Vec<PoolInfo>,
    positions: HashMap<(u64, Addr), Position>,
    native_balances: HashMap<Addr, Uint256>,
    token_symbols: HashMap<Addr, String>,
    token_balances: HashMap<(Addr, Addr), Uint256>,
    claim_paused: bool,
    withdraw_paused: bool,
    failing_queries: HashSet<&'static str>,
    send_errors: VecDeque<SubmitError>,
    sent: HashMap<TxHash, SentTx>,
    receipts: HashMap<TxHash, Receipt>,
    writes: Vec<String>,
    queries: usize,
}

/// Encodes a view result the way a host hands it over.
pub fn encode_result<R: serde::Serialize>(value: &R) -> StdResult<Binary> {
    to_binary(value)
}

fn u(n: u128) -> Uint256 {
    Uint256::from(n)
}

impl MockState {
    fn position(&mut self, pid: u64, user: &Addr) -> &mut Position {
        self.positions.entry((pid, user.clone())).or_default()
    }

    fn query(&mut self, contract: &Addr, msg: &QueryMsg) -> StdResult<Binary> {
        self.queries += 1;
        if self.failing_queries.contains(msg.function_name()) {
            return Err(StdError::generic_err(format!("execution reverted: {}", msg.function_name())));
        }
        if contract.as_str() != STAKE_CONTRACT {
            return self.query_token(contract, msg);
        }
        match msg {
            QueryMsg::Pool { pid } => {
                let pool = self
                    .pools
                    .get(*pid as usize)
                    .ok_or_else(|| StdError::generic_err("execution reverted: invalid pid"))?;
                encode_result(&(
                    pool.stake_token_address.clone(),
                    pool.pool_weight,
                    pool.last_reward_block,
                    pool.acc_reward_per_share,
                    pool.total_staked,
                    pool.min_deposit_amount,
                    pool.unstake_locked_blocks,
                ))
            }
            QueryMsg::User { pid, user } => {
                let p = self.position(*pid, user).clone();
                encode_result(&(p.staked, p.finished, p.pending))
            }
            QueryMsg::WithdrawAmount { pid, user } => {
                let p = self.position(*pid, user).clone();
                encode_result(&(p.requested, p.withdrawable))
            }
            QueryMsg::PendingMetaNode { pid, user } => encode_result(&self.position(*pid, user).pending),
            QueryMsg::StakingBalance { pid, user } => encode_result(&self.position(*pid, user).staked),
            QueryMsg::ClaimPaused {} => encode_result(&self.claim_paused),
            QueryMsg::WithdrawPaused {} => encode_result(&self.withdraw_paused),
            QueryMsg::PoolLength {} => encode_result(&Uint256::from(self.pools.len() as u128)),
            _ => Err(StdError::generic_err("function not found on stake contract")),
        }
    }

    fn query_token(&self, contract: &Addr, msg: &QueryMsg) -> StdResult<Binary> {
        match msg {
            QueryMsg::Symbol {} => {
                let symbol = self
                    .token_symbols
                    .get(contract)
                    .ok_or_else(|| StdError::generic_err("execution reverted"))?;
                encode_result(symbol)
            }
            QueryMsg::BalanceOf { account } => encode_result(
                &self
                    .token_balances
                    .get(&(contract.clone(), account.clone()))
                    .copied()
                    .unwrap_or_default(),
            ),
            _ => Err(StdError::generic_err("function not found on token")),
        }
    }

    fn send(&mut self, from: &Addr, call: &WriteCall) -> Result<TxHash, SubmitError> {
        self.writes.push(call.msg.function_name().to_string());
        if let Some(err) = self.send_errors.pop_front() {
            return Err(err);
        }
        let tx_hash = TxHash(format!("0x{:064x}", self.writes.len()));
        self.sent.insert(tx_hash.clone(), SentTx { from: from.clone(), call: call.clone() });
        Ok(tx_hash)
    }

    /// Executes a sent transaction the way the contract would. `false` means revert.
    fn apply(&mut self, tx: &SentTx) -> bool {
        let from = tx.from.clone();
        let admin_call = matches!(
            tx.call.msg,
            ExecuteMsg::AddPool { .. }
                | ExecuteMsg::PauseClaim {}
                | ExecuteMsg::UnpauseClaim {}
                | ExecuteMsg::PauseWithdraw {}
                | ExecuteMsg::UnpauseWithdraw {}
        );
        if admin_call && from.as_str() != ADMIN {
            return false;
        }

        match &tx.call.msg {
            ExecuteMsg::DepositEth {} => {
                let value = tx.call.value.unwrap_or_default();
                let balance = self.native_balances.get(&from).copied().unwrap_or_default();
                if self.pools.is_empty() || value.is_zero() || value > balance {
                    return false;
                }
                self.native_balances.insert(from.clone(), balance - value);
                self.pools[0].total_staked += value;
                self.position(0, &from).staked += value;
            }
            ExecuteMsg::Unstake { pid, amount } => {
                let position = self.position(*pid, &from);
                if *amount > position.staked {
                    return false;
                }
                position.staked -= *amount;
                position.requested += *amount;
                if let Some(pool) = self.pools.get_mut(*pid as usize) {
                    pool.total_staked -= *amount;
                }
            }
            ExecuteMsg::Withdraw { pid } => {
                if self.withdraw_paused {
                    return false;
                }
                let position = self.position(*pid, &from);
                let amount = position.withdrawable;
                position.requested -= amount;
                position.withdrawable = Uint256::zero();
                *self.native_balances.entry(from).or_default() += amount;
            }
            ExecuteMsg::Claim { pid } => {
                if self.claim_paused {
                    return false;
                }
                let position = self.position(*pid, &from);
                position.finished += position.pending;
                position.pending = Uint256::zero();
            }
            ExecuteMsg::AddPool {
                st_token_address,
                pool_weight,
                min_deposit_amount,
                unstake_locked_blocks,
                ..
            } => {
                self.pools.push(PoolInfo {
                    stake_token_address: st_token_address.clone(),
                    pool_weight: *pool_weight,
                    last_reward_block: Uint256::zero(),
                    acc_reward_per_share: Uint256::zero(),
                    total_staked: Uint256::zero(),
                    min_deposit_amount: *min_deposit_amount,
                    unstake_locked_blocks: *unstake_locked_blocks,
                });
            }
            ExecuteMsg::PauseClaim {} => self.claim_paused = true,
            ExecuteMsg::UnpauseClaim {} => self.claim_paused = false,
            ExecuteMsg::PauseWithdraw {} => self.withdraw_paused = true,
            ExecuteMsg::UnpauseWithdraw {} => self.withdraw_paused = false,
        }
        true
    }
}

/// Shared handle to the simulated chain. Providers and wallets handed out by
/// it all see the same state.
#[derive(Clone, Default)]
pub struct MockChain {
    state: Rc<RefCell<MockState>>,
}

impl MockChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// One native pool (pid 0) and a funded `USER`.
    pub fn with_native_pool() -> Self {
        let chain = MockChain::new();
        chain.add_pool(PoolInfo {
            stake_token_address: Addr::unchecked(NATIVE_TOKEN_ADDRESS),
            pool_weight: u(500),
            last_reward_block: u(6_000_000),
            acc_reward_per_share: u(0),
            total_staked: u(0),
            min_deposit_amount: u(ETH / 1000),
            unstake_locked_blocks: u(10),
        });
        chain.set_native_balance(USER, u(10 * ETH));
        chain
    }

    pub fn add_pool(&self, pool: PoolInfo) {
        self.state.borrow_mut().pools.push(pool);
    }

    pub fn set_native_balance(&self, account: &str, amount: Uint256) {
        self.state.borrow_mut().native_balances.insert(Addr::unchecked(account), amount);
    }

    pub fn native_balance_of(&self, account: &str) -> Uint256 {
        self.state
            .borrow()
            .native_balances
            .get(&Addr::unchecked(account))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_token(&self, token: &str, symbol: &str) {
        self.state
            .borrow_mut()
            .token_symbols
            .insert(Addr::unchecked(token), symbol.to_string());
    }

    pub fn set_token_balance(&self, token: &str, account: &str, amount: Uint256) {
        self.state
            .borrow_mut()
            .token_balances
            .insert((Addr::unchecked(token), Addr::unchecked(account)), amount);
    }

    /// Sets a stake directly, keeping the pool total in line.
    pub fn set_staked(&self, pid: u64, user: &str, amount: Uint256) {
        let mut state = self.state.borrow_mut();
        let previous = std::mem::replace(&mut state.position(pid, &Addr::unchecked(user)).staked, amount);
        if let Some(pool) = state.pools.get_mut(pid as usize) {
            pool.total_staked = pool.total_staked - previous + amount;
        }
    }

    pub fn accrue_reward(&self, pid: u64, user: &str, amount: Uint256) {
        self.state.borrow_mut().position(pid, &Addr::unchecked(user)).pending += amount;
    }

    /// Ends the lock period for everything `user` has requested.
    pub fn unlock(&self, pid: u64, user: &str) {
        let mut state = self.state.borrow_mut();
        let position = state.position(pid, &Addr::unchecked(user));
        position.withdrawable = position.requested;
    }

    pub fn set_paused(&self, claim: bool, withdraw: bool) {
        let mut state = self.state.borrow_mut();
        state.claim_paused = claim;
        state.withdraw_paused = withdraw;
    }

    pub fn fail_query(&self, function: &'static str) {
        self.state.borrow_mut().failing_queries.insert(function);
    }

    pub fn fail_next_send(&self, err: SubmitError) {
        self.state.borrow_mut().send_errors.push_back(err);
    }

    /// Mines a sent transaction: applies it and publishes its receipt.
    pub fn finalize(&self, tx_hash: &TxHash) -> Receipt {
        let mut state = self.state.borrow_mut();
        let applied = match state.sent.remove(tx_hash) {
            Some(tx) => state.apply(&tx),
            None => false,
        };
        let status = if applied { ReceiptStatus::Success } else { ReceiptStatus::Reverted };
        let receipt = Receipt { tx_hash: tx_hash.clone(), status };
        state.receipts.insert(tx_hash.clone(), receipt.clone());
        receipt
    }

    /// Mines a sent transaction as reverted without touching state.
    pub fn revert(&self, tx_hash: &TxHash) -> Receipt {
        let mut state = self.state.borrow_mut();
        state.sent.remove(tx_hash);
        let receipt = Receipt { tx_hash: tx_hash.clone(), status: ReceiptStatus::Reverted };
        state.receipts.insert(tx_hash.clone(), receipt.clone());
        receipt
    }

    pub fn write_count(&self) -> usize {
        self.state.borrow().writes.len()
    }

    pub fn writes(&self) -> Vec<String> {
        self.state.borrow().writes.clone()
    }

    pub fn query_count(&self) -> usize {
        self.state.borrow().queries
    }

    pub fn provider(&self) -> MockProvider {
        MockProvider { state: self.state.clone() }
    }

    pub fn wallet(&self, account: &str) -> MockWallet {
        MockWallet { state: self.state.clone(), account: Addr::unchecked(account) }
    }

    pub fn read_only_session(&self) -> ChainSession {
        ChainSession::new(Some(Box::new(self.provider())), None)
    }

    pub fn session(&self, account: &str) -> ChainSession {
        ChainSession::new(Some(Box::new(self.provider())), Some(Box::new(self.wallet(account))))
    }
}

pub struct MockProvider {
    state: Rc<RefCell<MockState>>,
}

impl ChainReader for MockProvider {
    fn chain_id(&self) -> u64 {
        SEPOLIA_CHAIN_ID
    }

    fn call(&self, contract: &Addr, msg: &QueryMsg) -> StdResult<Binary> {
        self.state.borrow_mut().query(contract, msg)
    }

    fn native_balance(&self, account: &Addr) -> StdResult<Uint256> {
        let mut state = self.state.borrow_mut();
        state.queries += 1;
        if state.failing_queries.contains("balance") {
            return Err(StdError::generic_err("rpc unavailable"));
        }
        Ok(state.native_balances.get(account).copied().unwrap_or_default())
    }

    fn receipt(&self, tx_hash: &TxHash) -> StdResult<Option<Receipt>> {
        Ok(self.state.borrow().receipts.get(tx_hash).cloned())
    }
}

pub struct MockWallet {
    state: Rc<RefCell<MockState>>,
    account: Addr,
}

impl ChainWriter for MockWallet {
    fn account(&self) -> &Addr {
        &self.account
    }

    fn chain_id(&self) -> u64 {
        SEPOLIA_CHAIN_ID
    }

    fn send(&self, _contract: &Addr, call: &WriteCall) -> Result<TxHash, SubmitError> {
        self.state.borrow_mut().send(&self.account, call)
    }
}
