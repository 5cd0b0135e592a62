use soroban_sdk::{token, Address, Env};

use crate::storage_types::CrowdfundingError;

/// Narrow view of the token ledger that custodies pledged funds.
///
/// Implementations report a failed transfer as `TransferFailed` and leave
/// their own balances untouched in that case.
pub trait TokenCapability {
    /// Pulls `amount` from `from` into the contract. Needs a prior allowance.
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), CrowdfundingError>;

    /// Pays `amount` out of the contract to `to`.
    fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), CrowdfundingError>;

    /// Balance the contract currently holds.
    fn balance_held(&self) -> i128;
}

/// `TokenCapability` backed by a Soroban token contract.
pub struct LedgerToken {
    env: Env,
    address: Address,
}

impl LedgerToken {
    pub fn new(env: &Env, address: &Address) -> Self {
        Self {
            env: env.clone(),
            address: address.clone(),
        }
    }

    fn client(&self) -> token::Client<'_> {
        token::Client::new(&self.env, &self.address)
    }
}

impl TokenCapability for LedgerToken {
    fn transfer_in(&self, from: &Address, amount: i128) -> Result<(), CrowdfundingError> {
        let this = self.env.current_contract_address();
        match self.client().try_transfer_from(&this, from, &this, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(CrowdfundingError::TransferFailed),
        }
    }

    fn transfer_out(&self, to: &Address, amount: i128) -> Result<(), CrowdfundingError> {
        let this = self.env.current_contract_address();
        match self.client().try_transfer(&this, to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(CrowdfundingError::TransferFailed),
        }
    }

    fn balance_held(&self) -> i128 {
        self.client().balance(&self.env.current_contract_address())
    }
}
