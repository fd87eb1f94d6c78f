use cosmwasm_std::{Addr, Uint256};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::chain::{ChainSession, ContractInstance};
use crate::contracts::STAKE_ABI;
use crate::error::ClientError;
use crate::execute::{prepare_add_pool, prepare_pause, ActionController, ActionKind, ActionOutcome, AddPoolForm};
use crate::feedback::Feedback;
use crate::msg::{QueryMsg, Receipt, TxHash};
use crate::query::{refetch_tagged, ReadQuery, ReadTag, Refetch};
use crate::state::{ClientConfig, PauseState, PoolStatus};

use super::manage_pool::{ManagePoolCard, ManagePoolView};
use super::{pool_count, sync_len};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct AdminView {
    pub pool_length: u64,
    pub claim_paused: bool,
    pub withdraw_paused: bool,
    pub status: PoolStatus,
    pub claim_pause_busy: bool,
    pub withdraw_pause_busy: bool,
    pub add_pool_busy: bool,
    pub form_open: bool,
    pub pools: Vec<ManagePoolView>,
}

/// Admin page: global pause switches, the add-pool form and one manage card
/// per pool.
pub struct AdminPanel {
    config: ClientConfig,
    pool_length: ReadQuery<Uint256>,
    claim_paused: ReadQuery<bool>,
    withdraw_paused: ReadQuery<bool>,
    pause_claim: ActionController,
    unpause_claim: ActionController,
    pause_withdraw: ActionController,
    unpause_withdraw: ActionController,
    add_pool: ActionController,
    pub form: AddPoolForm,
    pub form_open: bool,
    cards: Vec<ManagePoolCard>,
}

impl AdminPanel {
    pub fn new(config: &ClientConfig) -> Self {
        let contract: &Addr = &config.stake_contract;
        AdminPanel {
            config: config.clone(),
            pool_length: ReadQuery::new(ReadTag::PoolLength, contract.clone(), &STAKE_ABI, QueryMsg::PoolLength {}),
            claim_paused: ReadQuery::new(ReadTag::PauseState, contract.clone(), &STAKE_ABI, QueryMsg::ClaimPaused {}),
            withdraw_paused: ReadQuery::new(
                ReadTag::PauseState,
                contract.clone(),
                &STAKE_ABI,
                QueryMsg::WithdrawPaused {},
            ),
            pause_claim: ActionController::new(ActionKind::PauseClaim),
            unpause_claim: ActionController::new(ActionKind::UnpauseClaim),
            pause_withdraw: ActionController::new(ActionKind::PauseWithdraw),
            unpause_withdraw: ActionController::new(ActionKind::UnpauseWithdraw),
            add_pool: ActionController::new(ActionKind::AddPool),
            form: AddPoolForm::default(),
            form_open: false,
            cards: vec![],
        }
    }

    pub fn mount(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        self.refresh(&[ReadTag::PoolLength, ReadTag::PauseState], session, feedback);
    }

    pub fn refresh(&mut self, tags: &[ReadTag], session: &ChainSession, feedback: &mut Feedback) {
        let reads: Vec<&mut dyn Refetch> = vec![
            &mut self.pool_length as &mut dyn Refetch,
            &mut self.claim_paused as &mut dyn Refetch,
            &mut self.withdraw_paused as &mut dyn Refetch,
        ];
        refetch_tagged(reads, tags, session, feedback);

        for card in self.cards.iter_mut() {
            card.refresh(tags, session, feedback);
        }
        if tags.contains(&ReadTag::PoolLength) {
            self.sync_cards(session, feedback);
        }
    }

    fn sync_cards(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        let count = self.pool_length();
        let config = &self.config;
        let added = sync_len(&mut self.cards, count, |pid| ManagePoolCard::new(pid, config));
        for card in self.cards.iter_mut().filter(|c| added.contains(&c.pid())) {
            card.mount(session, feedback);
        }
    }

    pub fn pool_length(&self) -> u64 {
        pool_count(self.pool_length.safe_data())
    }

    pub fn pause_state(&self) -> PauseState {
        PauseState::from_flags(self.claim_paused.safe_data(), self.withdraw_paused.safe_data()).unwrap_or_default()
    }

    pub fn cards(&self) -> &[ManagePoolCard] {
        &self.cards
    }

    pub fn controller(&self, kind: ActionKind) -> Option<&ActionController> {
        match kind {
            ActionKind::PauseClaim => Some(&self.pause_claim),
            ActionKind::UnpauseClaim => Some(&self.unpause_claim),
            ActionKind::PauseWithdraw => Some(&self.pause_withdraw),
            ActionKind::UnpauseWithdraw => Some(&self.unpause_withdraw),
            ActionKind::AddPool => Some(&self.add_pool),
            _ => None,
        }
    }

    fn controller_mut(&mut self, kind: ActionKind) -> Option<&mut ActionController> {
        match kind {
            ActionKind::PauseClaim => Some(&mut self.pause_claim),
            ActionKind::UnpauseClaim => Some(&mut self.unpause_claim),
            ActionKind::PauseWithdraw => Some(&mut self.pause_withdraw),
            ActionKind::UnpauseWithdraw => Some(&mut self.unpause_withdraw),
            ActionKind::AddPool => Some(&mut self.add_pool),
            _ => None,
        }
    }

    /// Submits one of the four pause switches.
    pub fn set_pause(
        &mut self,
        kind: ActionKind,
        session: &ChainSession,
        feedback: &mut Feedback,
    ) -> Result<TxHash, ClientError> {
        let prepared = prepare_pause(kind);
        let instance = ContractInstance::derive(&self.config.stake_contract, &STAKE_ABI, session);
        match self.controller_mut(kind) {
            Some(controller) => controller.submit(instance.write.as_ref(), prepared, feedback),
            None => Err(ClientError::UnknownFunction { abi: STAKE_ABI.name, function: kind.name() }),
        }
    }

    /// Pauses claims if they are running, resumes them otherwise.
    pub fn toggle_claim_pause(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Result<TxHash, ClientError> {
        let kind = if self.pause_state().claim_paused {
            ActionKind::UnpauseClaim
        } else {
            ActionKind::PauseClaim
        };
        self.set_pause(kind, session, feedback)
    }

    pub fn toggle_withdraw_pause(
        &mut self,
        session: &ChainSession,
        feedback: &mut Feedback,
    ) -> Result<TxHash, ClientError> {
        let kind = if self.pause_state().withdraw_paused {
            ActionKind::UnpauseWithdraw
        } else {
            ActionKind::PauseWithdraw
        };
        self.set_pause(kind, session, feedback)
    }

    pub fn open_form(&mut self) {
        self.form_open = true;
    }

    pub fn close_form(&mut self) {
        self.form_open = false;
    }

    pub fn submit_add_pool(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Result<TxHash, ClientError> {
        let prepared = prepare_add_pool(&self.form, self.config.token_decimals);
        let instance = ContractInstance::derive(&self.config.stake_contract, &STAKE_ABI, session);
        self.add_pool.submit(instance.write.as_ref(), prepared, feedback)
    }

    fn controllers_mut(&mut self) -> [&mut ActionController; 5] {
        [
            &mut self.pause_claim,
            &mut self.unpause_claim,
            &mut self.pause_withdraw,
            &mut self.unpause_withdraw,
            &mut self.add_pool,
        ]
    }

    pub fn on_receipt(&mut self, receipt: &Receipt, session: &ChainSession, feedback: &mut Feedback) -> Vec<ReadTag> {
        let mut done = None;
        for controller in self.controllers_mut() {
            if let Some(outcome) = controller.on_receipt(receipt, feedback) {
                done = Some((controller.kind(), outcome));
                break;
            }
        }
        match done {
            Some((kind, outcome)) => self.apply_outcome(kind, outcome, session, feedback),
            None => vec![],
        }
    }

    pub fn poll(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Vec<ReadTag> {
        let instance = ContractInstance::derive(&self.config.stake_contract, &STAKE_ABI, session);
        let mut finished = vec![];
        for controller in self.controllers_mut() {
            if let Some(outcome) = controller.poll(instance.read.as_ref(), feedback) {
                finished.push((controller.kind(), outcome));
            }
        }

        let mut tags = vec![];
        for (kind, outcome) in finished {
            for tag in self.apply_outcome(kind, outcome, session, feedback) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }

    fn apply_outcome(
        &mut self,
        kind: ActionKind,
        outcome: ActionOutcome,
        session: &ChainSession,
        feedback: &mut Feedback,
    ) -> Vec<ReadTag> {
        let tags = match outcome {
            ActionOutcome::Succeeded(tags) => tags,
            ActionOutcome::Reverted => return vec![],
        };
        if kind == ActionKind::AddPool {
            self.form.reset();
            self.form_open = false;
        }
        self.refresh(tags, session, feedback);
        tags.to_vec()
    }

    pub fn render(&self) -> AdminView {
        let pause = self.pause_state();
        AdminView {
            pool_length: self.pool_length(),
            claim_paused: pause.claim_paused,
            withdraw_paused: pause.withdraw_paused,
            status: pause.status(),
            claim_pause_busy: self.pause_claim.is_busy() || self.unpause_claim.is_busy(),
            withdraw_pause_busy: self.pause_withdraw.is_busy() || self.unpause_withdraw.is_busy(),
            add_pool_busy: self.add_pool.is_busy(),
            form_open: self.form_open,
            pools: self.cards.iter().map(|c| c.render()).collect(),
        }
    }
}
