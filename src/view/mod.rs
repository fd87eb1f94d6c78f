// src/view/mod.rs
pub mod admin;
pub mod home;
pub mod manage_pool;
pub mod pool_card;

pub use admin::{AdminPanel, AdminView};
pub use home::{HomePage, HomeView};
pub use manage_pool::{ManagePoolCard, ManagePoolView, UNKNOWN};
pub use pool_card::{PoolCard, PoolCardView};

use cosmwasm_std::Uint256;

/// Number of pool ids to show for a `poolLength` result. Ids are `0..count`.
pub(crate) fn pool_count(length: Option<Uint256>) -> u64 {
    length
        .and_then(|len| len.to_string().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Grows or shrinks `items` to `count` entries, building new ones by pid.
/// Returns the pids that were added.
pub(crate) fn sync_len<T>(items: &mut Vec<T>, count: u64, mut build: impl FnMut(u64) -> T) -> Vec<u64> {
    let current = items.len() as u64;
    if count < current {
        items.truncate(count as usize);
        return vec![];
    }
    let added: Vec<u64> = (current..count).collect();
    for pid in &added {
        items.push(build(*pid));
    }
    added
}
