// src/chain.rs
use cosmwasm_std::{Addr, Binary, StdResult, Uint256};

use crate::contracts::Abi;
use crate::error::{ClientError, SubmitError};
use crate::msg::{QueryMsg, Receipt, TxHash, WriteCall};

/// Read access to a node for the active network.
pub trait ChainReader {
    fn chain_id(&self) -> u64;

    /// Calls a view function. The result is the JSON-encoded return value.
    fn call(&self, contract: &Addr, msg: &QueryMsg) -> StdResult<Binary>;

    fn native_balance(&self, account: &Addr) -> StdResult<Uint256>;

    /// `None` while the transaction is not final.
    fn receipt(&self, tx_hash: &TxHash) -> StdResult<Option<Receipt>>;
}

/// A connected wallet able to sign and broadcast.
pub trait ChainWriter {
    fn account(&self) -> &Addr;

    fn chain_id(&self) -> u64;

    fn send(&self, contract: &Addr, call: &WriteCall) -> Result<TxHash, SubmitError>;
}

/// Provider and wallet as currently reported by the wallet-connection layer.
/// Either side may be missing.
#[derive(Default)]
pub struct ChainSession {
    provider: Option<Box<dyn ChainReader>>,
    wallet: Option<Box<dyn ChainWriter>>,
}

impl ChainSession {
    pub fn new(provider: Option<Box<dyn ChainReader>>, wallet: Option<Box<dyn ChainWriter>>) -> Self {
        ChainSession { provider, wallet }
    }

    pub fn connect_wallet(&mut self, wallet: Box<dyn ChainWriter>) {
        self.wallet = Some(wallet);
    }

    pub fn disconnect_wallet(&mut self) {
        self.wallet = None;
    }

    pub fn set_provider(&mut self, provider: Option<Box<dyn ChainReader>>) {
        self.provider = provider;
    }

    pub fn provider(&self) -> Option<&dyn ChainReader> {
        self.provider.as_deref()
    }

    pub fn wallet(&self) -> Option<&dyn ChainWriter> {
        self.wallet.as_deref()
    }

    pub fn account(&self) -> Option<&Addr> {
        self.wallet().map(|w| w.account())
    }

    pub fn is_connected(&self) -> bool {
        self.wallet.is_some()
    }

    /// Network reported by the wallet, falling back to the provider's.
    pub fn chain_id(&self) -> Option<u64> {
        self.wallet()
            .map(|w| w.chain_id())
            .or_else(|| self.provider().map(|p| p.chain_id()))
    }
}

/// Read and write handles for one contract. Derived from the session on every
/// use, so a changed address, ABI, network or wallet is always picked up.
pub struct ContractInstance<'a> {
    pub read: Option<ReadContract<'a>>,
    pub write: Option<WriteContract<'a>>,
}

pub struct ReadContract<'a> {
    address: Addr,
    abi: &'static Abi,
    provider: &'a dyn ChainReader,
}

pub struct WriteContract<'a> {
    address: Addr,
    abi: &'static Abi,
    wallet: &'a dyn ChainWriter,
}

impl<'a> ContractInstance<'a> {
    pub fn derive(address: &Addr, abi: &'static Abi, session: &'a ChainSession) -> Self {
        let read = session.provider().map(|provider| ReadContract {
            address: address.clone(),
            abi,
            provider,
        });
        let write = session.wallet().map(|wallet| WriteContract {
            address: address.clone(),
            abi,
            wallet,
        });
        ContractInstance { read, write }
    }

    pub fn can_read(&self) -> bool {
        self.read.is_some()
    }

    pub fn can_write(&self) -> bool {
        self.write.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.can_write()
    }
}

impl<'a> ReadContract<'a> {
    pub fn address(&self) -> &Addr {
        &self.address
    }

    pub fn read(&self, msg: &QueryMsg) -> Result<Binary, ClientError> {
        let function = msg.function_name();
        if !self.abi.is_view(function) {
            return Err(ClientError::UnknownFunction { abi: self.abi.name, function });
        }
        Ok(self.provider.call(&self.address, msg)?)
    }

    pub fn receipt(&self, tx_hash: &TxHash) -> StdResult<Option<Receipt>> {
        self.provider.receipt(tx_hash)
    }

    pub fn native_balance(&self, account: &Addr) -> StdResult<Uint256> {
        self.provider.native_balance(account)
    }
}

impl<'a> WriteContract<'a> {
    pub fn address(&self) -> &Addr {
        &self.address
    }

    pub fn account(&self) -> &Addr {
        self.wallet.account()
    }

    /// Checks the call against the ABI before anything reaches the wallet.
    pub fn check(&self, call: &WriteCall) -> Result<(), ClientError> {
        let function = call.msg.function_name();
        let callable = self.abi.is_write(function)
            && (call.value.is_none() || self.abi.is_payable(function));
        if !callable {
            return Err(ClientError::UnknownFunction { abi: self.abi.name, function });
        }
        Ok(())
    }

    pub fn send(&self, call: &WriteCall) -> Result<TxHash, SubmitError> {
        self.wallet.send(&self.address, call)
    }
}
