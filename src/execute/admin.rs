use cosmwasm_std::Uint256;

use crate::amount::parse_amount;
use crate::error::ClientError;
use crate::msg::{ExecuteMsg, WriteCall};
use crate::state::validate_address;

use super::ActionKind;

/// Input fields of the add-pool form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddPoolForm {
    pub token_address: String,
    pub pool_weight: String,
    pub min_deposit: String,
    pub unlock_blocks: String,
}

impl Default for AddPoolForm {
    fn default() -> Self {
        AddPoolForm {
            token_address: String::new(),
            pool_weight: "100".to_string(),
            min_deposit: "0.001".to_string(),
            unlock_blocks: "10".to_string(),
        }
    }
}

impl AddPoolForm {
    pub fn reset(&mut self) {
        *self = AddPoolForm::default();
    }
}

fn parse_integer(field: &'static str, value: &str) -> Result<Uint256, ClientError> {
    let trimmed = value.trim();
    let valid = !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit());
    if !valid {
        return Err(ClientError::InvalidNumber { field, value: value.to_string() });
    }
    trimmed
        .parse::<Uint256>()
        .map_err(|_| ClientError::InvalidNumber { field, value: value.to_string() })
}

pub fn prepare_add_pool(form: &AddPoolForm, decimals: u32) -> Result<WriteCall, ClientError> {
    let st_token_address = validate_address(&form.token_address)?;
    let pool_weight = parse_integer("pool_weight", &form.pool_weight)?;
    let min_deposit_amount = parse_amount(&form.min_deposit, decimals)?;
    let unstake_locked_blocks = parse_integer("unlock_blocks", &form.unlock_blocks)?;

    Ok(WriteCall::new(ExecuteMsg::AddPool {
        st_token_address,
        pool_weight,
        min_deposit_amount,
        unstake_locked_blocks,
        with_update: false,
    }))
}

/// The write call for one of the four global pause switches.
pub fn prepare_pause(kind: ActionKind) -> Result<WriteCall, ClientError> {
    let msg = match kind {
        ActionKind::PauseClaim => ExecuteMsg::PauseClaim {},
        ActionKind::UnpauseClaim => ExecuteMsg::UnpauseClaim {},
        ActionKind::PauseWithdraw => ExecuteMsg::PauseWithdraw {},
        ActionKind::UnpauseWithdraw => ExecuteMsg::UnpauseWithdraw {},
        other => {
            return Err(ClientError::UnknownFunction {
                abi: "MetaNodeStake",
                function: other.name(),
            })
        }
    };
    Ok(WriteCall::new(msg))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_defaults_build_a_call() {
        let form = AddPoolForm {
            token_address: "0xC9653895302caD170124887666456606934495F0".to_string(),
            ..Default::default()
        };
        let call = prepare_add_pool(&form, 18).unwrap();
        match call.msg {
            ExecuteMsg::AddPool { pool_weight, min_deposit_amount, unstake_locked_blocks, with_update, .. } => {
                assert_eq!(pool_weight, Uint256::from(100u128));
                assert_eq!(min_deposit_amount, Uint256::from(1_000_000_000_000_000u128));
                assert_eq!(unstake_locked_blocks, Uint256::from(10u128));
                assert!(!with_update);
            }
            other => panic!("unexpected call {:?}", other),
        }
    }

    #[test]
    fn form_validation() {
        let mut form = AddPoolForm::default();
        assert!(matches!(prepare_add_pool(&form, 18), Err(ClientError::InvalidAddress(_))));

        form.token_address = "0xC9653895302caD170124887666456606934495F0".to_string();
        form.pool_weight = "ten".to_string();
        assert_eq!(
            prepare_add_pool(&form, 18),
            Err(ClientError::InvalidNumber { field: "pool_weight", value: "ten".to_string() })
        );

        form.pool_weight = "100".to_string();
        form.unlock_blocks = "1.5".to_string();
        assert!(matches!(
            prepare_add_pool(&form, 18),
            Err(ClientError::InvalidNumber { field: "unlock_blocks", .. })
        ));

        form.reset();
        assert_eq!(form, AddPoolForm::default());
    }

    #[test]
    fn pause_calls() {
        assert_eq!(prepare_pause(ActionKind::PauseClaim).unwrap().msg, ExecuteMsg::PauseClaim {});
        assert_eq!(prepare_pause(ActionKind::UnpauseWithdraw).unwrap().msg, ExecuteMsg::UnpauseWithdraw {});
        assert!(prepare_pause(ActionKind::Deposit).is_err());
    }
}
