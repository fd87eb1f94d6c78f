use cosmwasm_std::Event;

use crate::chain::{ReadContract, WriteContract};
use crate::error::{ClientError, SubmitError};
use crate::feedback::Feedback;
use crate::msg::{Receipt, ReceiptStatus, TxHash, WriteCall};
use crate::query::ReadTag;

use super::ActionKind;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionPhase {
    Idle,
    Submitting,
    Pending { tx_hash: TxHash },
    Succeeded,
    Failed,
}

impl ActionPhase {
    fn name(&self) -> &'static str {
        match self {
            ActionPhase::Idle => "idle",
            ActionPhase::Submitting => "submitting",
            ActionPhase::Pending { .. } => "pending",
            ActionPhase::Succeeded => "succeeded",
            ActionPhase::Failed => "failed",
        }
    }
}

/// How a pending transaction ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Reads to refetch.
    Succeeded(&'static [ReadTag]),
    Reverted,
}

/// Drives one action kind through submit, pending and its terminal state.
#[derive(Debug)]
pub struct ActionController {
    kind: ActionKind,
    busy: bool,
    phase: ActionPhase,
}

impl ActionController {
    pub fn new(kind: ActionKind) -> Self {
        ActionController { kind, busy: false, phase: ActionPhase::Idle }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn phase(&self) -> &ActionPhase {
        &self.phase
    }

    pub fn tx_hash(&self) -> Option<&TxHash> {
        match &self.phase {
            ActionPhase::Pending { tx_hash } => Some(tx_hash),
            _ => None,
        }
    }

    fn enter(&mut self, phase: ActionPhase, feedback: &mut Feedback) {
        let mut event = Event::new("stake_action")
            .add_attribute("action", self.kind.name())
            .add_attribute("phase", phase.name());
        if let ActionPhase::Pending { tx_hash } = &phase {
            event = event.add_attribute("tx_hash", tx_hash.to_string());
        }
        feedback.log(event);
        self.phase = phase;
    }

    fn cleanup(&mut self, feedback: &mut Feedback) {
        self.busy = false;
        self.enter(ActionPhase::Idle, feedback);
    }

    /// Sends `prepared` through the wallet and waits for the hash. Hosts with
    /// an async wallet call `begin_submit` and `on_submitted` themselves.
    pub fn submit(
        &mut self,
        contract: Option<&WriteContract>,
        prepared: Result<WriteCall, ClientError>,
        feedback: &mut Feedback,
    ) -> Result<TxHash, ClientError> {
        let call = self.begin_submit(contract, prepared, feedback)?;
        let sent = match contract {
            Some(contract) => contract.send(&call),
            None => Err(SubmitError::new(None, ClientError::WalletNotConnected.to_string())),
        };
        self.on_submitted(sent, feedback)
    }

    /// Checks `prepared` and claims the controller. On success the controller
    /// is busy and `Submitting`, and the caller owns sending the returned call.
    /// Precondition failures are reported and leave the controller idle; a busy
    /// controller refuses outright.
    pub fn begin_submit(
        &mut self,
        contract: Option<&WriteContract>,
        prepared: Result<WriteCall, ClientError>,
        feedback: &mut Feedback,
    ) -> Result<WriteCall, ClientError> {
        if self.busy {
            feedback.log(
                Event::new("stake_action")
                    .add_attribute("action", self.kind.name())
                    .add_attribute("phase", "rejected")
                    .add_attribute("error", "in flight"),
            );
            return Err(ClientError::ActionInFlight(self.kind.name()));
        }

        let checked = prepared.and_then(|call| {
            let contract = contract.ok_or(ClientError::WalletNotConnected)?;
            contract.check(&call)?;
            Ok(call)
        });
        let call = match checked {
            Ok(call) => call,
            Err(err) => {
                feedback.error(err.to_string());
                feedback.log(
                    Event::new("stake_action")
                        .add_attribute("action", self.kind.name())
                        .add_attribute("phase", "rejected")
                        .add_attribute("error", err.to_string()),
                );
                return Err(err);
            }
        };

        self.busy = true;
        self.enter(ActionPhase::Submitting, feedback);
        Ok(call)
    }

    /// Takes the wallet's answer for the call handed out by `begin_submit`.
    pub fn on_submitted(
        &mut self,
        sent: Result<TxHash, SubmitError>,
        feedback: &mut Feedback,
    ) -> Result<TxHash, ClientError> {
        if self.phase != ActionPhase::Submitting {
            return Err(ClientError::NotSubmitting(self.kind.name()));
        }

        match sent {
            Ok(tx_hash) => {
                self.enter(ActionPhase::Pending { tx_hash: tx_hash.clone() }, feedback);
                feedback.info(format!(
                    "{} transaction submitted, waiting for confirmation...",
                    self.kind.label()
                ));
                Ok(tx_hash)
            }
            Err(submit_err) => {
                let err = ClientError::from(submit_err);
                match &err {
                    ClientError::Cancelled => feedback.info("User cancelled the operation"),
                    ClientError::Submission(msg) if !msg.is_empty() => {
                        feedback.error(format!("{} failed: {}", self.kind.label(), msg))
                    }
                    _ => feedback.error(format!("{} failed: unknown error", self.kind.label())),
                }
                self.enter(ActionPhase::Failed, feedback);
                self.cleanup(feedback);
                Err(err)
            }
        }
    }

    /// Applies a receipt if it belongs to this controller's pending transaction.
    pub fn on_receipt(&mut self, receipt: &Receipt, feedback: &mut Feedback) -> Option<ActionOutcome> {
        if self.tx_hash() != Some(&receipt.tx_hash) {
            return None;
        }

        let outcome = match receipt.status {
            ReceiptStatus::Success => {
                self.enter(ActionPhase::Succeeded, feedback);
                feedback.success(format!("{} succeeded", self.kind.label()));
                ActionOutcome::Succeeded(self.kind.invalidates())
            }
            ReceiptStatus::Reverted => {
                self.enter(ActionPhase::Failed, feedback);
                feedback.error(format!("{} failed", self.kind.label()));
                ActionOutcome::Reverted
            }
        };
        self.cleanup(feedback);
        Some(outcome)
    }

    /// Asks the provider for the pending transaction's receipt. There is no
    /// timeout; a transaction stays pending until the network finalizes it.
    pub fn poll(&mut self, contract: Option<&ReadContract>, feedback: &mut Feedback) -> Option<ActionOutcome> {
        let tx_hash = self.tx_hash()?.clone();
        let contract = contract?;
        match contract.receipt(&tx_hash) {
            Ok(Some(receipt)) => self.on_receipt(&receipt, feedback),
            Ok(None) => None,
            Err(err) => {
                feedback.log(
                    Event::new("read")
                        .add_attribute("query", "receipt")
                        .add_attribute("outcome", "error")
                        .add_attribute("error", err.to_string()),
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::ContractInstance;
    use crate::contracts::STAKE_ABI;
    use crate::feedback::NoticeLevel;
    use crate::msg::ExecuteMsg;
    use crate::testing::{MockChain, STAKE_CONTRACT, USER};
    use cosmwasm_std::Addr;

    fn claim_call() -> Result<WriteCall, ClientError> {
        Ok(WriteCall::new(ExecuteMsg::Claim { pid: 0 }))
    }

    #[test]
    fn walks_submit_pending_success() {
        let chain = MockChain::with_native_pool();
        let session = chain.session(USER);
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Claim);

        let tx_hash = controller.submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap();
        assert!(controller.is_busy());
        assert_eq!(controller.tx_hash(), Some(&tx_hash));
        assert_eq!(feedback.last_notice().unwrap().level, NoticeLevel::Info);

        // not final yet
        assert_eq!(controller.poll(instance.read.as_ref(), &mut feedback), None);
        assert!(controller.is_busy());

        chain.finalize(&tx_hash);
        let outcome = controller.poll(instance.read.as_ref(), &mut feedback).unwrap();
        assert_eq!(outcome, ActionOutcome::Succeeded(&[ReadTag::PendingReward, ReadTag::UserInfo]));
        assert!(!controller.is_busy());
        assert_eq!(controller.phase(), &ActionPhase::Idle);
        assert_eq!(controller.tx_hash(), None);
        assert_eq!(feedback.last_notice().unwrap().level, NoticeLevel::Success);

        let phases: Vec<_> = feedback
            .events()
            .iter()
            .map(|e| e.attributes[1].value.clone())
            .collect();
        assert_eq!(phases, vec!["submitting", "pending", "succeeded", "idle"]);
    }

    #[test]
    fn busy_controller_refuses_second_submit() {
        let chain = MockChain::with_native_pool();
        let session = chain.session(USER);
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Claim);

        controller.submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap();
        let second = controller.submit(instance.write.as_ref(), claim_call(), &mut feedback);
        assert_eq!(second, Err(ClientError::ActionInFlight("claim")));
        assert_eq!(chain.write_count(), 1);
    }

    #[test]
    fn split_submit_claims_the_controller_before_sending() {
        let chain = MockChain::with_native_pool();
        let session = chain.session(USER);
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let write = instance.write.as_ref();
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Claim);

        let call = controller.begin_submit(write, claim_call(), &mut feedback).unwrap();
        assert!(controller.is_busy());
        assert_eq!(controller.phase(), &ActionPhase::Submitting);

        // a second click while the wallet prompt is still open
        let second = controller.begin_submit(write, claim_call(), &mut feedback);
        assert_eq!(second, Err(ClientError::ActionInFlight("claim")));
        assert_eq!(chain.write_count(), 0);

        let sent = write.unwrap().send(&call);
        let tx_hash = controller.on_submitted(sent, &mut feedback).unwrap();
        assert_eq!(chain.write_count(), 1);
        assert_eq!(controller.tx_hash(), Some(&tx_hash));

        // a stray wallet answer does not disturb the pending transaction
        let stray = controller.on_submitted(Ok(TxHash("0xstray".to_string())), &mut feedback);
        assert_eq!(stray, Err(ClientError::NotSubmitting("claim")));
        assert_eq!(controller.tx_hash(), Some(&tx_hash));
    }

    #[test]
    fn split_submit_failure_returns_to_idle() {
        let chain = MockChain::with_native_pool();
        let session = chain.session(USER);
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Claim);

        assert_eq!(
            controller.on_submitted(Ok(TxHash("0x01".to_string())), &mut feedback),
            Err(ClientError::NotSubmitting("claim"))
        );
        assert_eq!(controller.phase(), &ActionPhase::Idle);

        controller.begin_submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap();
        let err = controller.on_submitted(Err(SubmitError::new(Some(4001), "User rejected")), &mut feedback);
        assert_eq!(err, Err(ClientError::Cancelled));
        assert!(!controller.is_busy());
        assert_eq!(controller.phase(), &ActionPhase::Idle);
        assert_eq!(feedback.last_notice().unwrap().message, "User cancelled the operation");
        assert!(controller.begin_submit(instance.write.as_ref(), claim_call(), &mut feedback).is_ok());
    }

    #[test]
    fn revert_clears_without_invalidation() {
        let chain = MockChain::with_native_pool();
        let session = chain.session(USER);
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Claim);

        let tx_hash = controller.submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap();
        let other = Receipt { tx_hash: TxHash("0xother".to_string()), status: ReceiptStatus::Success };
        assert_eq!(controller.on_receipt(&other, &mut feedback), None);
        assert!(controller.is_busy());

        let receipt = Receipt { tx_hash, status: ReceiptStatus::Reverted };
        assert_eq!(controller.on_receipt(&receipt, &mut feedback), Some(ActionOutcome::Reverted));
        assert!(!controller.is_busy());
        assert_eq!(feedback.last_notice().unwrap().message, "Claim reward failed");
    }

    #[test]
    fn send_failures_are_classified() {
        let chain = MockChain::with_native_pool();
        let session = chain.session(USER);
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Claim);

        chain.fail_next_send(SubmitError { code: Some(4001), message: None });
        let err = controller.submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap_err();
        assert_eq!(err, ClientError::Cancelled);
        assert_eq!(feedback.last_notice().unwrap().level, NoticeLevel::Info);
        assert!(!controller.is_busy());

        chain.fail_next_send(SubmitError::new(Some(-32000), "insufficient funds"));
        controller.submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap_err();
        let notice = feedback.last_notice().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.message, "Claim reward failed: insufficient funds");

        chain.fail_next_send(SubmitError::default());
        controller.submit(instance.write.as_ref(), claim_call(), &mut feedback).unwrap_err();
        assert_eq!(feedback.last_notice().unwrap().message, "Claim reward failed: unknown error");
        assert_eq!(controller.phase(), &ActionPhase::Idle);
    }

    #[test]
    fn precondition_failure_never_sets_busy() {
        let chain = MockChain::with_native_pool();
        let session = chain.read_only_session();
        let instance = ContractInstance::derive(&Addr::unchecked(STAKE_CONTRACT), &STAKE_ABI, &session);
        let mut feedback = Feedback::new();
        let mut controller = ActionController::new(ActionKind::Deposit);

        let err = controller.submit(instance.write.as_ref(), Err(ClientError::EmptyAmount), &mut feedback);
        assert_eq!(err, Err(ClientError::EmptyAmount));
        let err = controller.submit(instance.write.as_ref(), claim_call(), &mut feedback);
        assert_eq!(err, Err(ClientError::WalletNotConnected));
        assert!(!controller.is_busy());
        assert_eq!(feedback.notices().len(), 2);
        assert_eq!(chain.write_count(), 0);
    }
}
