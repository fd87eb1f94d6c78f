use cosmwasm_std::Uint256;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::amount::format_amount;
use crate::chain::ChainSession;
use crate::contracts::{network_name, STAKE_ABI};
use crate::feedback::Feedback;
use crate::msg::{QueryMsg, Receipt};
use crate::query::{refetch_tagged, BalanceQuery, ReadQuery, ReadTag, Refetch};
use crate::state::ClientConfig;

use super::pool_card::{PoolCard, PoolCardView};
use super::{pool_count, sync_len};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct HomeView {
    pub connected: bool,
    pub account: Option<String>,
    pub network_name: Option<String>,
    pub balance: String,
    pub pool_ids: Vec<u64>,
    pub pools: Vec<PoolCardView>,
}

/// Landing page: wallet summary and one card per pool.
pub struct HomePage {
    config: ClientConfig,
    pool_length: ReadQuery<Uint256>,
    balance: BalanceQuery,
    cards: Vec<PoolCard>,
}

impl HomePage {
    pub fn new(config: &ClientConfig) -> Self {
        HomePage {
            config: config.clone(),
            pool_length: ReadQuery::new(
                ReadTag::PoolLength,
                config.stake_contract.clone(),
                &STAKE_ABI,
                QueryMsg::PoolLength {},
            ),
            balance: BalanceQuery::default(),
            cards: vec![],
        }
    }

    pub fn mount(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        self.refresh(&[ReadTag::PoolLength, ReadTag::WalletBalance], session, feedback);
    }

    /// Call after the wallet connects, disconnects or switches account.
    pub fn on_session_change(&mut self, session: &ChainSession, feedback: &mut Feedback) {
        self.balance.refetch(session, feedback);
        for card in self.cards.iter_mut() {
            card.mount(session, feedback);
        }
    }

    pub fn refresh(&mut self, tags: &[ReadTag], session: &ChainSession, feedback: &mut Feedback) {
        let reads: Vec<&mut dyn Refetch> = vec![
            &mut self.pool_length as &mut dyn Refetch,
            &mut self.balance as &mut dyn Refetch,
        ];
        refetch_tagged(reads, tags, session, feedback);

        if tags.contains(&ReadTag::PoolLength) {
            let count = pool_count(self.pool_length.safe_data());
            let config = &self.config;
            let added = sync_len(&mut self.cards, count, |pid| PoolCard::new(pid, config));
            for card in self.cards.iter_mut().filter(|c| added.contains(&c.pid())) {
                card.mount(session, feedback);
            }
        }
    }

    pub fn pool_ids(&self) -> Vec<u64> {
        self.cards.iter().map(|c| c.pid()).collect()
    }

    pub fn card(&self, pid: u64) -> Option<&PoolCard> {
        self.cards.iter().find(|c| c.pid() == pid)
    }

    pub fn card_mut(&mut self, pid: u64) -> Option<&mut PoolCard> {
        self.cards.iter_mut().find(|c| c.pid() == pid)
    }

    pub fn balance(&self) -> Option<Uint256> {
        self.balance.balance()
    }

    /// Hands a receipt to the card waiting on it. The wallet balance lives
    /// here, so it is refetched when the card's action invalidates it.
    pub fn on_receipt(&mut self, receipt: &Receipt, session: &ChainSession, feedback: &mut Feedback) -> Vec<ReadTag> {
        let mut tags = vec![];
        for card in self.cards.iter_mut() {
            tags = card.on_receipt(receipt, session, feedback);
            if !tags.is_empty() {
                break;
            }
        }
        self.refresh_wallet(&tags, session, feedback);
        tags
    }

    pub fn poll(&mut self, session: &ChainSession, feedback: &mut Feedback) -> Vec<ReadTag> {
        let mut tags = vec![];
        for card in self.cards.iter_mut() {
            for tag in card.poll(session, feedback) {
                if !tags.contains(&tag) {
                    tags.push(tag);
                }
            }
        }
        self.refresh_wallet(&tags, session, feedback);
        tags
    }

    fn refresh_wallet(&mut self, tags: &[ReadTag], session: &ChainSession, feedback: &mut Feedback) {
        if tags.contains(&ReadTag::WalletBalance) {
            self.balance.refetch(session, feedback);
        }
    }

    pub fn render(&self, session: &ChainSession) -> HomeView {
        let balance = format_amount(self.balance.balance(), self.config.token_decimals, self.config.display_decimals);
        HomeView {
            connected: session.is_connected(),
            account: session.account().map(|a| a.to_string()),
            network_name: session.chain_id().map(network_name),
            balance: format!("{} ETH", balance),
            pool_ids: self.pool_ids(),
            pools: self.cards.iter().map(|c| c.render()).collect(),
        }
    }
}
