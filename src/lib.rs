// src/lib.rs
pub use crate::chain::{ChainReader, ChainSession, ChainWriter};
pub use crate::error::{ClientError, SubmitError};
pub use crate::feedback::{Feedback, Notice, NoticeLevel};
pub use crate::msg::{ClientConfigMsg, ExecuteMsg, QueryMsg, Receipt, ReceiptStatus, TxHash, WriteCall};
pub use crate::state::ClientConfig;
pub use crate::theme::{ThemeMode, ThemeService};
pub use crate::view::{AdminPanel, HomePage, ManagePoolCard, PoolCard};

pub mod amount;
pub mod chain;
pub mod contracts;
pub mod error;
pub mod execute;
pub mod feedback;
pub mod msg;
pub mod query;
pub mod state;
pub mod theme;
pub mod view;

#[cfg(test)]
pub mod testing;
