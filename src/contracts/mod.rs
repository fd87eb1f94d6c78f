// src/contracts/mod.rs

pub mod erc20;
pub mod stake;

pub use erc20::{erc20_address, network_name, ERC20_ABI};
pub use stake::STAKE_ABI;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StateMutability {
    View,
    NonPayable,
    Payable,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbiFunction {
    pub name: &'static str,
    pub mutability: StateMutability,
}

/// The callable surface of a contract, as far as this client uses it.
#[derive(Debug, PartialEq, Eq)]
pub struct Abi {
    pub name: &'static str,
    pub functions: &'static [AbiFunction],
}

impl Abi {
    pub fn function(&self, name: &str) -> Option<&AbiFunction> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn is_view(&self, name: &str) -> bool {
        matches!(self.function(name), Some(f) if f.mutability == StateMutability::View)
    }

    pub fn is_write(&self, name: &str) -> bool {
        matches!(self.function(name), Some(f) if f.mutability != StateMutability::View)
    }

    pub fn is_payable(&self, name: &str) -> bool {
        matches!(self.function(name), Some(f) if f.mutability == StateMutability::Payable)
    }
}

pub(crate) const fn view(name: &'static str) -> AbiFunction {
    AbiFunction { name, mutability: StateMutability::View }
}

pub(crate) const fn nonpayable(name: &'static str) -> AbiFunction {
    AbiFunction { name, mutability: StateMutability::NonPayable }
}

pub(crate) const fn payable(name: &'static str) -> AbiFunction {
    AbiFunction { name, mutability: StateMutability::Payable }
}
