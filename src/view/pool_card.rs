use cosmwasm_std::{Addr, Uint256};
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::amount::format_amount;
use crate::chain::{ChainSession, ContractInstance};
use crate::contracts::STAKE_ABI;
use crate::error::ClientError;
use crate::execute::{
    prepare_claim, prepare_deposit, prepare_unstake, prepare_withdraw, ActionController, ActionKind,
    ActionOutcome, Preconditions,
};
use crate::feedback::Feedback;
use crate::msg::{QueryMsg, Receipt, TxHash};
use crate::query::{refetch_tagged, ReadQuery, ReadTag, Refetch};
use crate::state::{
    ClientConfig, PauseState, PoolInfo, PoolStatus, RawPool, RawUser, RawWithdrawAmount, StatusTone,
    UserInfo, WithdrawAmount,
};

/// Placeholder account for user-scoped reads while no wallet is connected.
/// Those reads are disabled in that state.
const NO_ACCOUNT: &str = "0x0000000000000000000000000000000000000000";

const ALL_READS: &[ReadTag] = &[
    ReadTag::PoolInfo,
    ReadTag::UserInfo,
    ReadTag::WithdrawAmount,
    ReadTag::PendingReward,
    ReadTag::StakingBalance,
    ReadTag::PauseState,
];

fn stake_read<T: DeserializeOwned>(contract: &Addr, tag: ReadTag, msg: QueryMsg) -> ReadQuery<T> {
    ReadQuery::new(tag, contract.clone(), &STAKE_ABI, msg)
}

/// Everything the host needs to draw one pool card.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct PoolCardView {
    pub pid: u64,
    pub loaded: bool,
    pub is_native: bool,
    pub status: PoolStatus,
    pub status_label: String,
    pub status_tone: StatusTone,
    pub total_staked: String,
    pub min_deposit: String,
    pub unstake_locked_blocks: String,
    pub staked: String,
    pub pending_reward: String,
    pub finished_reward: String,
    pub requested: String,
    pub withdrawable: String,
    pub locked: String,
    pub has_withdraw_request: bool,
    pub is_depositing: bool,
    pub is_claiming: bool,
    pub is_unstaking: bool,
    pub is_withdrawing: bool,
    pub deposit_disabled: bool,
    pub claim_disabled: bool,
    pub unstake_disabled: bool,
    pub withdraw_disabled: bool,
}

/// One pool as seen by the connected user: reads, the four user actions, and
/// the inputs the user typed.
pub struct PoolCard {
    pid: u64,
    contract: Addr,
    decimals: u32,
    places: u32,
    connected: bool,
    pub deposit_input: String,
    pub unstake_input: String,
    pool: ReadQuery<RawPool>,
    user: ReadQuery<RawUser>,
    withdraw_amount: ReadQuery<RawWithdrawAmount>,
    pending_reward: ReadQuery<Uint256>,
    staking_balance: ReadQuery<Uint256>,
    claim_paused: ReadQuery<bool>,
    withdraw_paused: ReadQuery<bool>,
    deposit: ActionController,
    claim: ActionController,
    unstake: ActionController,
    withdraw: ActionController,
}

impl PoolCard {
    pub fn new(pid: u64, config: &ClientConfig) -> Self {
        let contract = config.stake_contract.clone();
        let nobody = Addr::unchecked(NO_ACCOUNT);

        PoolCard {
            pid,
            decimals: config.token_decimals,
            places: config.display_decimals,
            connected: false,
            deposit_input: String::new(),
            unstake_input: String::new(),
            pool: stake_read(&contract, ReadTag::PoolInfo, QueryMsg::Pool { pid }),
            user: stake_read(&contract, ReadTag::UserInfo, QueryMsg::User { pid, user: nobody.clone() })
                .enabled(false),
            withdraw_amount: stake_read(
                &contract,
                ReadTag::WithdrawAmount,
                QueryMsg::WithdrawAmount { pid, user: nobody.clone() },
            )
            .enabled(false),
            pending_reward: stake_read(
                &contract,
                ReadTag::PendingReward,
                QueryMsg::PendingMetaNode { pid, user: nobody.clone() },
            )
            .enabled(false),
            staking_balance: stake_read(
                &contract,
                ReadTag::StakingBalance,
                QueryMsg::StakingBalance { pid, user: nobody },
            )
            .enabled(false),
            claim_paused: stake_read(&contract, ReadTag::PauseState, QueryMsg::ClaimPaused {}).enabled(false),
            withdraw_paused: stake_read(&contract, ReadTag::PauseState, QueryMsg::WithdrawPaused {}).enabled(false),
            deposit: ActionController::new(ActionKind::Deposit),
            claim: ActionController::new(ActionKind::Claim),
            unstake: ActionController::new(ActionKind::Unstake),
            withdraw: ActionController::new(ActionKind::Withdraw),
            contract,
        }
    }

    pub fn pid(&self) -> u64 {
        self.pid
    }

    /// Re-points user-scoped reads at the current wallet.
    pub fn sync_session(&mut self, session: &ChainSession) {
        let pid = self.pid;
        let account = session.account().cloned();
        self.connected = account.is_some();
        let user = account.unwrap_or_else(|| Addr::unchecked(NO_ACCOUNT));
        let contract = self.contract.clone();

        self.user.retarget(contract.clone(), QueryMsg::User { pid, user: user.clone() });
        self.withdraw_amount
            .retarget(contract.clone(), QueryMsg::WithdrawAmount { pid, user: user.clone() });
        self.pending_reward
            .retarget(contract.clone(), QueryMsg::PendingMetaNode { pid, user: user.clone() });
        self.staking_balance.retarget(contract, QueryMsg::StakingBalance { pid, user });

        let connected = self.connected;
        self.user.set_enabled(connected);
        self.withdraw_amount.set_enabled(connected);
        self.pending_reward.set_enabled(connected);
        self.staking_balance.set_enabled(connected);
        self.claim_paused.set_enabled(connected);
        self.withdraw_paused.set_enabled(connected);
    }

    pub fn mount(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        self.sync_session(session);
        self.refresh(ALL_READS, session, feedback);
    }

    pub fn refresh(&mut self, tags: &[ReadTag], session: &ChainSession, feedback: &mut Feedback) {
        let reads: Vec<&mut dyn Refetch> = vec![
            &mut self.pool as &mut dyn Refetch,
            &mut self.user as &mut dyn Refetch,
            &mut self.withdraw_amount as &mut dyn Refetch,
            &mut self.pending_reward as &mut dyn Refetch,
            &mut self.staking_balance as &mut dyn Refetch,
            &mut self.claim_paused as &mut dyn Refetch,
            &mut self.withdraw_paused as &mut dyn Refetch,
        ];
        refetch_tagged(reads, tags, session, feedback);
    }

    pub fn pool_info(&self) -> Option<PoolInfo> {
        PoolInfo::from_raw(self.pool.safe_data())
    }

    pub fn user_info(&self) -> Option<UserInfo> {
        UserInfo::from_raw(self.user.safe_data())
    }

    pub fn withdraw_info(&self) -> Option<WithdrawAmount> {
        WithdrawAmount::from_raw(self.withdraw_amount.safe_data())
    }

    pub fn pause_state(&self) -> Option<PauseState> {
        PauseState::from_flags(self.claim_paused.safe_data(), self.withdraw_paused.safe_data())
    }

    fn pending_reward_amount(&self) -> Option<Uint256> {
        self.pending_reward
            .safe_data()
            .or_else(|| self.user_info().map(|u| u.pending_reward_amount))
    }

    pub fn preconditions(&self) -> Preconditions {
        Preconditions {
            pause: self.pause_state(),
            pending_reward: self.pending_reward_amount(),
            staking_balance: self.staking_balance.safe_data(),
            withdraw: self.withdraw_info(),
        }
    }

    pub fn controller(&self, kind: ActionKind) -> Option<&ActionController> {
        match kind {
            ActionKind::Deposit => Some(&self.deposit),
            ActionKind::Claim => Some(&self.claim),
            ActionKind::Unstake => Some(&self.unstake),
            ActionKind::Withdraw => Some(&self.withdraw),
            _ => None,
        }
    }

    pub fn deposit(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Result<TxHash, ClientError> {
        let prepared = prepare_deposit(&self.deposit_input, self.decimals);
        let instance = ContractInstance::derive(&self.contract, &STAKE_ABI, session);
        self.deposit.submit(instance.write.as_ref(), prepared, feedback)
    }

    pub fn claim(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Result<TxHash, ClientError> {
        let prepared = prepare_claim(self.pid, &self.preconditions());
        let instance = ContractInstance::derive(&self.contract, &STAKE_ABI, session);
        self.claim.submit(instance.write.as_ref(), prepared, feedback)
    }

    pub fn unstake(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Result<TxHash, ClientError> {
        let prepared = prepare_unstake(self.pid, &self.unstake_input, self.decimals, &self.preconditions());
        let instance = ContractInstance::derive(&self.contract, &STAKE_ABI, session);
        self.unstake.submit(instance.write.as_ref(), prepared, feedback)
    }

    pub fn withdraw(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Result<TxHash, ClientError> {
        let prepared = prepare_withdraw(self.pid, &self.preconditions());
        let instance = ContractInstance::derive(&self.contract, &STAKE_ABI, session);
        self.withdraw.submit(instance.write.as_ref(), prepared, feedback)
    }

    fn controllers_mut(&mut self) -> [&mut ActionController; 4] {
        [&mut self.deposit, &mut self.claim, &mut self.unstake, &mut self.withdraw]
    }

    /// Routes a receipt to whichever action is waiting on it and refetches
    /// what that action invalidated. Returns the invalidated tags so the
    /// caller can refresh reads it owns, such as the wallet balance.
    pub fn on_receipt(
        &mut self,
        receipt: &Receipt,
        session: &ChainSession,
        feedback: &mut Feedback,
    ) -> Vec<ReadTag> {
        let mut outcome = None;
        for controller in self.controllers_mut() {
            if let Some(done) = controller.on_receipt(receipt, feedback) {
                outcome = Some(done);
                break;
            }
        }
        self.apply_outcome(outcome, session, feedback)
    }

    /// Polls the provider for every pending action.
    pub fn poll(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Vec<ReadTag> {
        let instance = ContractInstance::derive(&self.contract, &STAKE_ABI, session);
        let mut outcomes = vec![];
        for controller in self.controllers_mut() {
            if let Some(done) = controller.poll(instance.read.as_ref(), feedback) {
                outcomes.push(done);
            }
        }

        let mut tags = vec![];
        for outcome in outcomes {
            for tag in self.apply_outcome(Some(outcome), session, feedback) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    fn apply_outcome(
        &mut self,
        outcome: Option<ActionOutcome>,
        session: &ChainSession,
        feedback: &mut Feedback,
    ) -> Vec<ReadTag> {
        match outcome {
            Some(ActionOutcome::Succeeded(tags)) => {
                self.refresh(tags, session, feedback);
                tags.to_vec()
            }
            _ => vec![],
        }
    }

    pub fn render(&self) -> PoolCardView {
        let fmt = |value: Option<Uint256>| format_amount(value, self.decimals, self.places);
        let pool = self.pool_info();
        let user = self.user_info();
        let withdraw = self.withdraw_info();
        let pause = self.pause_state().unwrap_or_default();
        let status = pause.status();
        let pending_reward = self.pending_reward_amount();
        let withdrawable = withdraw.map(|w| w.withdrawable);

        PoolCardView {
            pid: self.pid,
            loaded: pool.is_some(),
            is_native: pool.as_ref().map(|p| p.is_native()).unwrap_or(false),
            status,
            status_label: status.label().to_string(),
            status_tone: status.tone(),
            total_staked: fmt(pool.as_ref().map(|p| p.total_staked)),
            min_deposit: fmt(pool.as_ref().map(|p| p.min_deposit_amount)),
            unstake_locked_blocks: pool
                .as_ref()
                .map(|p| p.unstake_locked_blocks.to_string())
                .unwrap_or_else(|| "0".to_string()),
            staked: fmt(self.staking_balance.safe_data().or_else(|| user.as_ref().map(|u| u.staked_amount))),
            pending_reward: fmt(pending_reward),
            finished_reward: fmt(user.as_ref().map(|u| u.finished_reward_amount)),
            requested: fmt(withdraw.map(|w| w.requested)),
            withdrawable: fmt(withdrawable),
            locked: fmt(withdraw.map(|w| w.locked())),
            has_withdraw_request: withdraw.map(|w| !w.requested.is_zero()).unwrap_or(false),
            is_depositing: self.deposit.is_busy(),
            is_claiming: self.claim.is_busy(),
            is_unstaking: self.unstake.is_busy(),
            is_withdrawing: self.withdraw.is_busy(),
            deposit_disabled: !self.connected || self.deposit_input.trim().is_empty() || self.deposit.is_busy(),
            claim_disabled: !self.connected
                || pause.claim_paused
                || pending_reward.unwrap_or_default().is_zero()
                || self.claim.is_busy(),
            unstake_disabled: !self.connected
                || self.unstake_input.trim().is_empty()
                || self.staking_balance.safe_data().unwrap_or_default().is_zero()
                || self.unstake.is_busy(),
            withdraw_disabled: !self.connected
                || pause.withdraw_paused
                || withdrawable.unwrap_or_default().is_zero()
                || self.withdraw.is_busy(),
        }
    }
}
