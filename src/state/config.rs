use cosmwasm_std::{from_slice, Addr, StdResult};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ClientError;
use crate::msg::ClientConfigMsg;

/// Stake token address of the native-currency pool.
pub const NATIVE_TOKEN_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

pub const DEFAULT_TOKEN_DECIMALS: u32 = 18;
pub const DEFAULT_DISPLAY_DECIMALS: u32 = 4;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct ClientConfig {
    pub stake_contract: Addr,
    pub chain_id: u64,
    pub token_decimals: u32,
    pub display_decimals: u32,
}

impl ClientConfig {
    pub fn from_msg(msg: ClientConfigMsg) -> Result<Self, ClientError> {
        let stake_contract = validate_address(&msg.stake_contract)?;
        let token_decimals = msg.token_decimals.unwrap_or(DEFAULT_TOKEN_DECIMALS);
        if token_decimals > 38 {
            return Err(ClientError::InvalidNumber {
                field: "token_decimals",
                value: token_decimals.to_string(),
            });
        }
        // the default shrinks to fit coarse tokens; an explicit value must fit
        let display_decimals = match msg.display_decimals {
            Some(places) if places > token_decimals => {
                return Err(ClientError::InvalidNumber {
                    field: "display_decimals",
                    value: places.to_string(),
                })
            }
            Some(places) => places,
            None => DEFAULT_DISPLAY_DECIMALS.min(token_decimals),
        };

        Ok(ClientConfig {
            stake_contract,
            chain_id: msg.chain_id,
            token_decimals,
            display_decimals,
        })
    }

    pub fn from_json(data: &[u8]) -> Result<Self, ClientError> {
        let msg: StdResult<ClientConfigMsg> = from_slice(data);
        ClientConfig::from_msg(msg?)
    }
}

/// Accepts `0x` followed by 40 hex digits.
pub fn validate_address(input: &str) -> Result<Addr, ClientError> {
    let trimmed = input.trim();
    let valid = trimmed.len() == 42
        && trimmed.starts_with("0x")
        && trimmed[2..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ClientError::InvalidAddress(input.to_string()));
    }
    Ok(Addr::unchecked(trimmed))
}
