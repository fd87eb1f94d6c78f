// src/state/mod.rs

pub mod config;
pub mod pause;
pub mod pool;

pub use config::{validate_address, ClientConfig, NATIVE_TOKEN_ADDRESS};
pub use pause::{PauseState, PoolStatus, StatusTone};
pub use pool::{PoolInfo, RawPool, RawUser, RawWithdrawAmount, UserInfo, WithdrawAmount};
