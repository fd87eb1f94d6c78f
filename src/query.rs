// src/query.rs
use std::marker::PhantomData;

use cosmwasm_std::{from_binary, Addr, Binary, Event, StdResult, Uint256};
use serde::de::DeserializeOwned;

use crate::chain::{ChainSession, ContractInstance};
use crate::contracts::Abi;
use crate::error::ClientError;
use crate::feedback::Feedback;
use crate::msg::QueryMsg;

/// Names a read so a finished transaction can invalidate it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReadTag {
    PoolInfo,
    UserInfo,
    WithdrawAmount,
    PendingReward,
    StakingBalance,
    PauseState,
    PoolLength,
    WalletBalance,
    TokenInfo,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Something a view can refetch when one of its tags is invalidated.
pub trait Refetch {
    fn tag(&self) -> ReadTag;

    /// Returns whether the read succeeded. Disabled reads do nothing.
    fn refetch(&mut self, session: &ChainSession, feedback: &mut Feedback) -> bool;
}

/// Refetches every read whose tag is in `tags`. A failing read does not stop
/// the others.
pub fn refetch_tagged(reads: Vec<&mut dyn Refetch>, tags: &[ReadTag], session: &ChainSession, feedback: &mut Feedback) {
    for read in reads {
        if tags.contains(&read.tag()) {
            read.refetch(session, feedback);
        }
    }
}

fn log_read_failure(feedback: &mut Feedback, query: &str, err: &ClientError) {
    feedback.log(
        Event::new("read")
            .add_attribute("query", query)
            .add_attribute("outcome", "error")
            .add_attribute("error", err.to_string()),
    );
}

/// A view call whose result is decoded as `T`. Raw bytes are kept as the
/// chain returned them; `T` only matters at decode time.
pub struct ReadQuery<T> {
    tag: ReadTag,
    contract: Addr,
    abi: &'static Abi,
    msg: QueryMsg,
    enabled: bool,
    data: Option<Binary>,
    status: FetchStatus,
    error: Option<ClientError>,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> ReadQuery<T> {
    pub fn new(tag: ReadTag, contract: Addr, abi: &'static Abi, msg: QueryMsg) -> Self {
        ReadQuery {
            tag,
            contract,
            abi,
            msg,
            enabled: true,
            data: None,
            status: FetchStatus::Idle,
            error: None,
            _marker: PhantomData,
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Points the read at a new contract or arguments. Cached data belongs to
    /// the old call, so it is dropped.
    pub fn retarget(&mut self, contract: Addr, msg: QueryMsg) {
        if self.contract != contract || self.msg != msg {
            self.contract = contract;
            self.msg = msg;
            self.data = None;
            self.error = None;
            self.status = FetchStatus::Idle;
        }
    }

    pub fn msg(&self) -> &QueryMsg {
        &self.msg
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn error(&self) -> Option<&ClientError> {
        self.error.as_ref()
    }

    pub fn data(&self) -> Option<&Binary> {
        self.data.as_ref()
    }

    /// Starts a fetch. Hosts that resolve reads asynchronously pair this with
    /// `resolve`.
    pub fn begin(&mut self) {
        self.status = FetchStatus::Loading;
    }

    /// Stores a read result. On failure the previous data is kept.
    pub fn resolve(&mut self, result: Result<Binary, ClientError>, feedback: &mut Feedback) -> bool {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
                self.status = FetchStatus::Loaded;
                true
            }
            Err(err) => {
                log_read_failure(feedback, self.msg.function_name(), &err);
                self.error = Some(err);
                self.status = FetchStatus::Failed;
                false
            }
        }
    }

    pub fn decoded(&self) -> StdResult<Option<T>> {
        self.data.as_ref().map(|data| from_binary::<T>(data)).transpose()
    }

    /// The decoded value, or `None` if nothing has loaded or it does not decode.
    pub fn safe_data(&self) -> Option<T> {
        self.decoded().ok().flatten()
    }
}

impl<T: DeserializeOwned> Refetch for ReadQuery<T> {
    fn tag(&self) -> ReadTag {
        self.tag
    }

    fn refetch(&mut self, session: &ChainSession, feedback: &mut Feedback) -> bool {
        if !self.enabled {
            return false;
        }
        self.begin();
        let instance = ContractInstance::derive(&self.contract, self.abi, session);
        let result = match instance.read {
            Some(read) => read.read(&self.msg),
            None => Err(ClientError::ProviderUnavailable),
        };
        self.resolve(result, feedback)
    }
}

/// Native-currency balance of the connected account.
pub struct BalanceQuery {
    enabled: bool,
    balance: Option<Uint256>,
    status: FetchStatus,
}

impl Default for BalanceQuery {
    fn default() -> Self {
        BalanceQuery { enabled: true, balance: None, status: FetchStatus::Idle }
    }
}

impl BalanceQuery {
    pub fn balance(&self) -> Option<Uint256> {
        self.balance
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Refetch for BalanceQuery {
    fn tag(&self) -> ReadTag {
        ReadTag::WalletBalance
    }

    fn refetch(&mut self, session: &ChainSession, feedback: &mut Feedback) -> bool {
        let account = match session.account() {
            Some(account) if self.enabled => account.clone(),
            _ => {
                self.balance = None;
                self.status = FetchStatus::Idle;
                return false;
            }
        };
        self.status = FetchStatus::Loading;
        let result = match session.provider() {
            Some(provider) => provider.native_balance(&account).map_err(ClientError::from),
            None => Err(ClientError::ProviderUnavailable),
        };
        match result {
            Ok(balance) => {
                self.balance = Some(balance);
                self.status = FetchStatus::Loaded;
                true
            }
            Err(err) => {
                log_read_failure(feedback, "balance", &err);
                self.status = FetchStatus::Failed;
                false
            }
        }
    }
}
