// src/error.rs
use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ClientError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("please enter an amount")]
    EmptyAmount,

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid contract address: {0}")]
    InvalidAddress(String),

    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    #[error("wallet not connected or contract instance not ready")]
    WalletNotConnected,

    #[error("no provider available for the current network")]
    ProviderUnavailable,

    #[error("no rewards to claim")]
    NothingToClaim,

    #[error("no funds available to withdraw")]
    NothingToWithdraw,

    #[error("no staked balance")]
    NoStakedBalance,

    #[error("claiming is paused")]
    ClaimPaused,

    #[error("withdrawing is paused")]
    WithdrawPaused,

    #[error("unsupported network chain id: {0}")]
    UnsupportedNetwork(u64),

    #[error("function {function} is not callable this way on {abi}")]
    UnknownFunction { abi: &'static str, function: &'static str },

    #[error("{0} is already in progress")]
    ActionInFlight(&'static str),

    #[error("{0} has no submission in progress")]
    NotSubmitting(&'static str),

    #[error("user cancelled the operation")]
    Cancelled,

    #[error("{0}")]
    Submission(String),
}

impl ClientError {
    /// Input and precondition failures: the user can fix these in the form.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ClientError::EmptyAmount
                | ClientError::InvalidAmount(_)
                | ClientError::InvalidAddress(_)
                | ClientError::InvalidNumber { .. }
                | ClientError::NothingToClaim
                | ClientError::NothingToWithdraw
                | ClientError::NoStakedBalance
                | ClientError::ClaimPaused
                | ClientError::WithdrawPaused
        )
    }
}

/// Failure reported by the wallet when signing or broadcasting a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct SubmitError {
    pub code: Option<i64>,
    pub message: Option<String>,
}

pub const USER_REJECTED_CODE: i64 = 4001;

impl SubmitError {
    pub fn new(code: Option<i64>, message: impl Into<String>) -> Self {
        SubmitError { code, message: Some(message.into()) }
    }

    pub fn is_user_rejection(&self) -> bool {
        if self.code == Some(USER_REJECTED_CODE) {
            return true;
        }
        match &self.message {
            Some(msg) => msg.contains("User rejected") || msg.contains("User denied"),
            None => false,
        }
    }
}

impl From<SubmitError> for ClientError {
    fn from(err: SubmitError) -> Self {
        if err.is_user_rejection() {
            ClientError::Cancelled
        } else {
            ClientError::Submission(err.message.unwrap_or_default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_matches_code_or_message() {
        assert!(SubmitError { code: Some(4001), message: None }.is_user_rejection());
        assert!(SubmitError::new(None, "MetaMask Tx Signature: User denied transaction signature.")
            .is_user_rejection());
        assert!(SubmitError::new(Some(-32000), "User rejected the request.").is_user_rejection());
        assert!(!SubmitError::new(Some(-32603), "insufficient funds for gas").is_user_rejection());
        assert!(!SubmitError::default().is_user_rejection());
    }

    #[test]
    fn submit_error_converts_by_class() {
        let cancelled: ClientError = SubmitError { code: Some(4001), message: None }.into();
        assert_eq!(cancelled, ClientError::Cancelled);

        let failed: ClientError = SubmitError::new(None, "nonce too low").into();
        assert_eq!(failed, ClientError::Submission("nonce too low".to_string()));
        assert!(!failed.is_validation());
        assert!(ClientError::EmptyAmount.is_validation());
    }

    #[test]
    fn environment_failures_are_not_validation() {
        assert!(ClientError::ClaimPaused.is_validation());
        assert!(ClientError::InvalidNumber { field: "pool_weight", value: "x".to_string() }.is_validation());
        assert!(!ClientError::UnsupportedNetwork(1).is_validation());
        assert!(!ClientError::ProviderUnavailable.is_validation());
        assert!(!ClientError::WalletNotConnected.is_validation());
        assert!(!ClientError::UnknownFunction { abi: "ERC20", function: "poolLength" }.is_validation());
        assert!(!ClientError::ActionInFlight("claim").is_validation());
    }
}
