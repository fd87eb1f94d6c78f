use cosmwasm_std::Addr;

use super::{nonpayable, view, Abi};
use crate::error::ClientError;

pub const MAINNET_CHAIN_ID: u64 = 1;
pub const SEPOLIA_CHAIN_ID: u64 = 11155111;
pub const BASE_CHAIN_ID: u64 = 8453;
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

// Staking token deployed per network. Only the Sepolia LINK token for now.
const TOKEN_ADDRESSES: &[(u64, &str)] = &[
    (SEPOLIA_CHAIN_ID, "0xC9653895302caD170124887666456606934495F0"),
];

pub static ERC20_ABI: Abi = Abi {
    name: "ERC20",
    functions: &[
        view("name"),
        view("symbol"),
        view("decimals"),
        view("totalSupply"),
        view("balanceOf"),
        view("allowance"),
        nonpayable("transfer"),
        nonpayable("approve"),
        nonpayable("transferFrom"),
    ],
};

/// Token address for `chain_id`. There is no fallback network.
pub fn erc20_address(chain_id: u64) -> Result<Addr, ClientError> {
    TOKEN_ADDRESSES
        .iter()
        .find(|(id, _)| *id == chain_id)
        .map(|(_, addr)| Addr::unchecked(*addr))
        .ok_or(ClientError::UnsupportedNetwork(chain_id))
}

pub fn network_name(chain_id: u64) -> String {
    match chain_id {
        MAINNET_CHAIN_ID => "Ethereum Mainnet".to_string(),
        SEPOLIA_CHAIN_ID => "Sepolia Testnet".to_string(),
        BASE_CHAIN_ID => "Base Mainnet".to_string(),
        BASE_SEPOLIA_CHAIN_ID => "Base Sepolia Testnet".to_string(),
        other => format!("Network ID: {}", other),
    }
}
