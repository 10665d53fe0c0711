//! Shared types for the utility-asset, instrument and conversion-registry pallets.
//!
//! The registry never touches ledger storage directly. It holds two handles,
//! [`UtilityLedger`] and [`InstrumentLedger`], and every privileged call carries
//! the identity of the principal making it so the ledger can check its own
//! stored role (factory / instrument authority) before mutating anything.

#![cfg_attr(not(feature = "std"), no_std)]

use sp_runtime::{DispatchError, DispatchResult};
use sp_std::vec::Vec;

/// Fixed-point amount, 18 fractional decimal places.
pub type Balance = u128;

/// Sequential identifier of an issued instrument.
pub type InstrumentId = u32;

/// Decimal places shared by every ledger.
pub const DECIMALS: u8 = 18;

/// One whole token in base units.
pub const UNIT: Balance = 1_000_000_000_000_000_000;

/// Returns `pct` percent of `amount`, truncating. `None` on overflow.
pub fn percent_of(amount: Balance, pct: u8) -> Option<Balance> {
    amount.checked_mul(Balance::from(pct))?.checked_div(100)
}

/// Handle onto the whitelist-gated utility asset (AAT).
pub trait UtilityLedger<AccountId> {
    fn balance_of(who: &AccountId) -> Balance;

    fn total_supply() -> Balance;

    /// Mints `amount` to `to`. `caller` must be the ledger's minting authority.
    fn mint(caller: &AccountId, to: &AccountId, amount: Balance) -> DispatchResult;

    /// Burns `amount` from `from`. `caller` must be the ledger's minting authority.
    fn burn(caller: &AccountId, from: &AccountId, amount: Balance) -> DispatchResult;
}

/// Creation parameters for a new instrument.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct InstrumentParams<AccountId> {
    pub name: Vec<u8>,
    pub symbol: Vec<u8>,
    /// Total supply in base units.
    pub total_supply: Balance,
    /// Share of `total_supply` credited to `custody_wallet`.
    pub locked_pct: u8,
    pub custody_wallet: AccountId,
    /// Receives the remainder of the supply.
    pub holder: AccountId,
}

/// Handle onto the asset-backed instrument ledgers (AST).
pub trait InstrumentLedger<AccountId> {
    /// Issues a new instrument whose privileged operations are reserved to `authority`.
    fn issue(
        authority: &AccountId,
        params: InstrumentParams<AccountId>,
    ) -> Result<InstrumentId, DispatchError>;

    /// Supply fixed at creation. `None` for an unknown instrument.
    fn issued_supply(id: InstrumentId) -> Option<Balance>;

    /// Circulating supply (issued minus burned). `None` for an unknown instrument.
    fn total_supply(id: InstrumentId) -> Option<Balance>;

    fn balance_of(id: InstrumentId, who: &AccountId) -> Balance;

    /// Moves `amount` between two holders on behalf of the instrument authority.
    fn move_held(
        caller: &AccountId,
        id: InstrumentId,
        from: &AccountId,
        to: &AccountId,
        amount: Balance,
    ) -> DispatchResult;

    /// Burns `amount` held by `from`. `caller` must be the instrument authority.
    fn burn(caller: &AccountId, id: InstrumentId, from: &AccountId, amount: Balance)
        -> DispatchResult;
}
