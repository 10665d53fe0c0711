#![cfg_attr(not(feature = "std"), no_std)]
// Storage getters are kept for the read API until the runtime API lands
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Asset Instruments Pallet
//!
//! Hosts one fungible ledger per asset-backed instrument (AST). Instruments are
//! only created through [`InstrumentLedger::issue`], which records the issuing
//! authority. Name, symbol and issued supply are immutable afterwards.
//!
//! Holders move instruments with ordinary, non-whitelisted transfers. Burning
//! and moving funds on someone else's behalf are reserved to the authority.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::DispatchError;
use sp_std::prelude::*;
use tokenization_primitives::{
    percent_of, Balance, InstrumentId, InstrumentLedger, InstrumentParams, DECIMALS,
};

pub use pallet::*;
pub use weights::WeightInfo;

pub mod weights;

#[cfg(test)]
mod mock;

#[cfg(test)]
mod tests;

#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "runtime::asset-instruments";

/// Immutable metadata plus the circulating supply of one instrument.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct InstrumentDetails<AccountId> {
    pub name: BoundedVec<u8, ConstU32<64>>,
    pub symbol: BoundedVec<u8, ConstU32<16>>,
    pub decimals: u8,
    /// Fixed at creation.
    pub issued_supply: Balance,
    /// Issued minus burned; always equals the sum of balances.
    pub supply: Balance,
    /// Only account allowed to burn or move held balances.
    pub authority: AccountId,
    pub custody_wallet: AccountId,
    pub holder: AccountId,
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Identifier handed to the next issued instrument
    #[pallet::storage]
    #[pallet::getter(fn next_instrument_id)]
    pub type NextInstrumentId<T> = StorageValue<_, InstrumentId, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn instrument)]
    pub type Instruments<T: Config> =
        StorageMap<_, Blake2_128Concat, InstrumentId, InstrumentDetails<T::AccountId>, OptionQuery>;

    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        InstrumentId,
        Blake2_128Concat,
        T::AccountId,
        Balance,
        ValueQuery,
    >;

    /// Remaining delegated spend limit, keyed by (instrument, owner, spender).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageNMap<
        _,
        (
            NMapKey<Blake2_128Concat, InstrumentId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
            NMapKey<Blake2_128Concat, T::AccountId>,
        ),
        Balance,
        ValueQuery,
    >;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// New instrument created and its supply split between custody and holder
        Issued {
            instrument: InstrumentId,
            authority: T::AccountId,
            issued_supply: Balance,
            custody_wallet: T::AccountId,
            locked: Balance,
            holder: T::AccountId,
            held: Balance,
        },
        Transferred {
            instrument: InstrumentId,
            from: T::AccountId,
            to: T::AccountId,
            amount: Balance,
        },
        Approval {
            instrument: InstrumentId,
            owner: T::AccountId,
            spender: T::AccountId,
            amount: Balance,
        },
        Burned { instrument: InstrumentId, from: T::AccountId, amount: Balance },
    }

    #[pallet::error]
    pub enum Error<T> {
        UnknownInstrument,
        /// Caller is not the instrument's authority
        CallerNotAuthority,
        InsufficientBalance,
        InsufficientAllowance,
        /// Locked percentage above 100
        InvalidAllocation,
        NameTooLong,
        SymbolTooLong,
        /// Instrument identifiers are exhausted
        NoAvailableInstrumentId,
        Overflow,
    }

    #[pallet::hooks]
    impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
        #[cfg(feature = "try-runtime")]
        fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
            Self::do_try_state()
        }
    }

    #[pallet::call]
    impl<T: Config> Pallet<T> {
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::transfer())]
        pub fn transfer(
            origin: OriginFor<T>,
            instrument: InstrumentId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::ensure_exists(instrument)?;
            Self::do_transfer(instrument, &sender, &to, amount)
        }

        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(
            origin: OriginFor<T>,
            instrument: InstrumentId,
            spender: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::ensure_exists(instrument)?;

            Allowances::<T>::insert((instrument, &owner, &spender), amount);
            Self::deposit_event(Event::Approval { instrument, owner, spender, amount });
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            instrument: InstrumentId,
            from: T::AccountId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_exists(instrument)?;
            let remaining = Allowances::<T>::get((instrument, &from, &spender))
                .checked_sub(amount)
                .ok_or(Error::<T>::InsufficientAllowance)?;

            Self::do_transfer(instrument, &from, &to, amount)?;
            Allowances::<T>::insert((instrument, &from, &spender), remaining);
            Ok(())
        }
    }
}

impl<T: Config> Pallet<T> {
    fn ensure_exists(instrument: InstrumentId) -> DispatchResult {
        ensure!(Instruments::<T>::contains_key(instrument), Error::<T>::UnknownInstrument);
        Ok(())
    }

    fn ensure_authority(
        instrument: InstrumentId,
        who: &T::AccountId,
    ) -> Result<InstrumentDetails<T::AccountId>, DispatchError> {
        let details = Instruments::<T>::get(instrument).ok_or(Error::<T>::UnknownInstrument)?;
        ensure!(&details.authority == who, Error::<T>::CallerNotAuthority);
        Ok(details)
    }

    fn credit(instrument: InstrumentId, who: &T::AccountId, amount: Balance) -> DispatchResult {
        Balances::<T>::try_mutate(instrument, who, |balance| {
            *balance = balance.checked_add(amount).ok_or(Error::<T>::Overflow)?;
            Ok(())
        })
    }

    pub(crate) fn do_transfer(
        instrument: InstrumentId,
        from: &T::AccountId,
        to: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        let from_balance = Balances::<T>::get(instrument, from)
            .checked_sub(amount)
            .ok_or(Error::<T>::InsufficientBalance)?;

        if from != to {
            let to_balance = Balances::<T>::get(instrument, to)
                .checked_add(amount)
                .ok_or(Error::<T>::Overflow)?;
            Balances::<T>::insert(instrument, from, from_balance);
            Balances::<T>::insert(instrument, to, to_balance);
        }

        Self::deposit_event(Event::Transferred {
            instrument,
            from: from.clone(),
            to: to.clone(),
            amount,
        });
        Ok(())
    }

    /// For every instrument the balances add up to the circulating supply,
    /// which never exceeds the issued supply.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        for (instrument, details) in Instruments::<T>::iter() {
            let sum = Balances::<T>::iter_prefix_values(instrument)
                .try_fold(0 as Balance, |acc, balance| acc.checked_add(balance))
                .ok_or(sp_runtime::TryRuntimeError::Other("instrument balance sum overflows"))?;
            ensure!(
                sum == details.supply,
                sp_runtime::TryRuntimeError::Other("instrument balances differ from supply")
            );
            ensure!(
                details.supply <= details.issued_supply,
                sp_runtime::TryRuntimeError::Other("instrument supply exceeds issued supply")
            );
        }
        Ok(())
    }
}

impl<T: Config> InstrumentLedger<T::AccountId> for Pallet<T> {
    fn issue(
        authority: &T::AccountId,
        params: InstrumentParams<T::AccountId>,
    ) -> Result<InstrumentId, DispatchError> {
        ensure!(params.locked_pct <= 100, Error::<T>::InvalidAllocation);
        let name: BoundedVec<u8, ConstU32<64>> =
            params.name.try_into().map_err(|_| Error::<T>::NameTooLong)?;
        let symbol: BoundedVec<u8, ConstU32<16>> =
            params.symbol.try_into().map_err(|_| Error::<T>::SymbolTooLong)?;

        let locked =
            percent_of(params.total_supply, params.locked_pct).ok_or(Error::<T>::Overflow)?;
        let held = params.total_supply.saturating_sub(locked);

        let instrument = NextInstrumentId::<T>::get();
        let next = instrument.checked_add(1).ok_or(Error::<T>::NoAvailableInstrumentId)?;

        Self::credit(instrument, &params.custody_wallet, locked)?;
        Self::credit(instrument, &params.holder, held)?;
        Instruments::<T>::insert(
            instrument,
            InstrumentDetails {
                name,
                symbol,
                decimals: DECIMALS,
                issued_supply: params.total_supply,
                supply: params.total_supply,
                authority: authority.clone(),
                custody_wallet: params.custody_wallet.clone(),
                holder: params.holder.clone(),
            },
        );
        NextInstrumentId::<T>::put(next);

        log::debug!(
            target: LOG_TARGET,
            "issued instrument {} ({} locked, {} held)",
            instrument,
            locked,
            held
        );
        Self::deposit_event(Event::Issued {
            instrument,
            authority: authority.clone(),
            issued_supply: params.total_supply,
            custody_wallet: params.custody_wallet,
            locked,
            holder: params.holder,
            held,
        });
        Ok(instrument)
    }

    fn issued_supply(id: InstrumentId) -> Option<Balance> {
        Instruments::<T>::get(id).map(|details| details.issued_supply)
    }

    fn total_supply(id: InstrumentId) -> Option<Balance> {
        Instruments::<T>::get(id).map(|details| details.supply)
    }

    fn balance_of(id: InstrumentId, who: &T::AccountId) -> Balance {
        Balances::<T>::get(id, who)
    }

    fn move_held(
        caller: &T::AccountId,
        id: InstrumentId,
        from: &T::AccountId,
        to: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Self::ensure_authority(id, caller)?;
        Self::do_transfer(id, from, to, amount)
    }

    fn burn(
        caller: &T::AccountId,
        id: InstrumentId,
        from: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        let mut details = Self::ensure_authority(id, caller)?;
        let balance = Balances::<T>::get(id, from)
            .checked_sub(amount)
            .ok_or(Error::<T>::InsufficientBalance)?;
        details.supply = details.supply.checked_sub(amount).ok_or(Error::<T>::Overflow)?;

        Balances::<T>::insert(id, from, balance);
        Instruments::<T>::insert(id, details);
        Self::deposit_event(Event::Burned { instrument: id, from: from.clone(), amount });
        Ok(())
    }
}
