#![cfg_attr(not(feature = "std"), no_std)]
// Storage getters are kept for the read API until the runtime API lands
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Conversion Registry Pallet
//!
//! Issues asset-backed instruments (AST) pegged to the utility asset (AAT) by a
//! fixed ratio and drives their redemption.
//!
//! ## Overview
//!
//! The registry owns no balances. It reaches both ledgers through the
//! [`UtilityLedger`] and [`InstrumentLedger`] handles and acts on them as its
//! own pallet account, which must be the utility ledger's minting authority.
//!
//! - `create_instrument` issues a new instrument, splitting its supply between
//!   the asset-locked (custody) wallet and the utility ledger account, and
//!   mints the matching utility allocation to the pool wallet.
//! - `burn_aat` burns the caller's utility asset and moves the instrument
//!   amount it buys from the utility ledger's holding into the current
//!   asset-locked wallet.
//! - `burn_ast_token` finalizes an instrument once the current asset-locked
//!   wallet holds at least 99% of its issued supply, burning that balance.
//!
//! Changing the asset-locked wallet redirects later redemptions and
//! finalizations. Balances already settled in the previous wallet stay there.
//!
//! Each instrument walks `Issued -> PartiallyRedeemed -> Finalized`. Records
//! are never removed.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, PalletId};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::{traits::AccountIdConversion, DispatchError};
use sp_std::prelude::*;
use tokenization_primitives::{
    percent_of, Balance, InstrumentId, InstrumentLedger, InstrumentParams, UtilityLedger, UNIT,
};

pub use conversion::Ratio;
pub use pallet::*;
pub use weights::WeightInfo;

pub mod conversion;
pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "runtime::conversion-registry";

/// Where an instrument stands in its redemption lifecycle.
#[derive(
    Clone, Copy, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen, Default,
)]
pub enum RedemptionPhase {
    #[default]
    Issued,
    /// At least one `burn_aat` went through
    PartiallyRedeemed,
    /// Custody balance burnt; no further redemption
    Finalized,
}

/// Conversion terms and redemption bookkeeping of one instrument.
#[derive(Clone, Encode, Decode, PartialEq, Eq, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct ConversionRecord<AccountId> {
    /// Fixed at creation
    pub ratio: Ratio,
    pub locked_pct: u8,
    pub aat_pct: u8,
    /// Instrument amount credited to custody at creation
    pub locked_allocation: Balance,
    /// Asset-locked wallet at creation time. Redemption uses the current one.
    pub custody_wallet: AccountId,
    /// Utility asset minted to the pool wallet for this instrument
    pub aat_minted: Balance,
    /// Cumulative utility asset burnt through `burn_aat`
    pub aat_burned: Balance,
    pub phase: RedemptionPhase,
}

/// Supply figures returned alongside a balance by `ast_token_balance`.
#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub struct InstrumentSupply {
    pub issued_supply: Balance,
    pub supply: Balance,
}

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Derives the registry account that acts on both ledgers.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        /// Handle onto the utility asset (AAT).
        type UtilityAsset: UtilityLedger<Self::AccountId>;

        /// Handle onto the instrument ledgers (AST).
        type Instruments: InstrumentLedger<Self::AccountId>;

        /// Upper bound on the number of instruments the registry tracks.
        #[pallet::constant]
        type MaxInstruments: Get<u32>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    #[pallet::storage]
    #[pallet::getter(fn owner)]
    pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Receives the utility asset minted on instrument creation
    #[pallet::storage]
    #[pallet::getter(fn pool_wallet)]
    pub type PoolWallet<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Custody wallet credited by creation and redemption, and burnt on finalization
    #[pallet::storage]
    #[pallet::getter(fn asset_locked_wallet)]
    pub type AssetLockedWallet<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Utility ledger account holding the AAT-side allocation of every instrument.
    /// Bound once.
    #[pallet::storage]
    #[pallet::getter(fn utility_asset)]
    pub type UtilityAssetAccount<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Created instruments in creation order
    #[pallet::storage]
    pub type InstrumentList<T: Config> =
        StorageValue<_, BoundedVec<InstrumentId, T::MaxInstruments>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn conversion_record)]
    pub type ConversionRecords<T: Config> =
        StorageMap<_, Blake2_128Concat, InstrumentId, ConversionRecord<T::AccountId>, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Utility ledger account bound for all conversions
        UtilityAssetBound { account: T::AccountId },
        /// Instrument issued and its utility allocation minted to the pool
        InstrumentCreated {
            instrument: InstrumentId,
            ratio: Ratio,
            issued_supply: Balance,
            locked_allocation: Balance,
            custody_wallet: T::AccountId,
            pool_wallet: T::AccountId,
            aat_minted: Balance,
        },
        /// Utility asset burnt and the bought instrument amount moved to custody
        AatBurned {
            who: T::AccountId,
            instrument: InstrumentId,
            aat_amount: Balance,
            ast_amount: Balance,
        },
        /// Custody balance burnt; the instrument is fully redeemed
        InstrumentFinalized { instrument: InstrumentId, burned: Balance },
        PoolWalletChanged { old_wallet: Option<T::AccountId>, new_wallet: T::AccountId },
        AssetLockedWalletChanged { old_wallet: Option<T::AccountId>, new_wallet: T::AccountId },
        OwnerChanged { old_owner: Option<T::AccountId>, new_owner: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the registry owner
        NotOwner,
        UtilityAssetAlreadyBound,
        UtilityAssetNotBound,
        PoolWalletNotSet,
        AssetLockedWalletNotSet,
        /// Ratio must be non-zero
        InvalidRatio,
        ZeroSupply,
        /// Locked and AAT percentages must add up to 100
        InvalidAllocation,
        TooManyInstruments,
        UnknownInstrument,
        /// Instrument has already been finalized
        InstrumentFinalized,
        /// Redemption would release more than the utility ledger still holds
        InsufficientHeldBalance,
        /// Custody holds less than 99% of the issued supply
        RedemptionThresholdNotMet,
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
        /// Bind the utility ledger account. Can only happen once.
        #[pallet::call_index(0)]
        #[pallet::weight(T::WeightInfo::set_utility_asset())]
        pub fn set_utility_asset(origin: OriginFor<T>, account: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;
            ensure!(!UtilityAssetAccount::<T>::exists(), Error::<T>::UtilityAssetAlreadyBound);

            UtilityAssetAccount::<T>::put(&account);
            log::info!(target: LOG_TARGET, "utility asset bound to {:?}", account);
            Self::deposit_event(Event::UtilityAssetBound { account });
            Ok(())
        }

        /// Issue a new instrument of `total_supply` whole units.
        ///
        /// `locked_pct` of the supply goes to the asset-locked wallet and the rest
        /// to the utility ledger account. The pool wallet receives
        /// `total_supply * 1000 / ratio` whole units of utility asset.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::create_instrument())]
        pub fn create_instrument(
            origin: OriginFor<T>,
            name: Vec<u8>,
            symbol: Vec<u8>,
            total_supply: Balance,
            ratio: Ratio,
            locked_pct: u8,
            aat_pct: u8,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            ensure!(ratio > 0, Error::<T>::InvalidRatio);
            ensure!(total_supply > 0, Error::<T>::ZeroSupply);
            ensure!(
                u16::from(locked_pct) + u16::from(aat_pct) == 100,
                Error::<T>::InvalidAllocation
            );
            let holder = UtilityAssetAccount::<T>::get().ok_or(Error::<T>::UtilityAssetNotBound)?;
            let pool_wallet = PoolWallet::<T>::get().ok_or(Error::<T>::PoolWalletNotSet)?;
            let custody_wallet =
                AssetLockedWallet::<T>::get().ok_or(Error::<T>::AssetLockedWalletNotSet)?;
            ensure!(
                (InstrumentList::<T>::decode_len().unwrap_or(0) as u32) < T::MaxInstruments::get(),
                Error::<T>::TooManyInstruments
            );

            let issued_supply = total_supply.checked_mul(UNIT).ok_or(Error::<T>::Overflow)?;
            let locked_allocation =
                percent_of(issued_supply, locked_pct).ok_or(Error::<T>::Overflow)?;
            let aat_minted =
                conversion::pool_allocation(total_supply, ratio).ok_or(Error::<T>::Overflow)?;

            let registry = Self::account_id();
            let instrument = T::Instruments::issue(
                &registry,
                InstrumentParams {
                    name,
                    symbol,
                    total_supply: issued_supply,
                    locked_pct,
                    custody_wallet: custody_wallet.clone(),
                    holder,
                },
            )?;
            InstrumentList::<T>::try_mutate(|list| list.try_push(instrument))
                .map_err(|_| Error::<T>::TooManyInstruments)?;
            T::UtilityAsset::mint(&registry, &pool_wallet, aat_minted)?;

            ConversionRecords::<T>::insert(
                instrument,
                ConversionRecord {
                    ratio,
                    locked_pct,
                    aat_pct,
                    locked_allocation,
                    custody_wallet: custody_wallet.clone(),
                    aat_minted,
                    aat_burned: 0,
                    phase: RedemptionPhase::Issued,
                },
            );

            log::info!(
                target: LOG_TARGET,
                "instrument {} created at ratio {}, {} AAT minted to pool",
                instrument,
                ratio,
                aat_minted
            );
            Self::deposit_event(Event::InstrumentCreated {
                instrument,
                ratio,
                issued_supply,
                locked_allocation,
                custody_wallet,
                pool_wallet,
                aat_minted,
            });
            Ok(())
        }

        /// Burn `aat_amount` of the caller's utility asset and move the instrument
        /// amount it buys from the utility ledger's holding into custody.
        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::burn_aat())]
        pub fn burn_aat(
            origin: OriginFor<T>,
            aat_amount: Balance,
            instrument: InstrumentId,
        ) -> DispatchResult {
            let who = ensure_signed(origin)?;
            let mut record =
                ConversionRecords::<T>::get(instrument).ok_or(Error::<T>::UnknownInstrument)?;
            ensure!(record.phase != RedemptionPhase::Finalized, Error::<T>::InstrumentFinalized);
            let holder = UtilityAssetAccount::<T>::get().ok_or(Error::<T>::UtilityAssetNotBound)?;
            let custody_wallet =
                AssetLockedWallet::<T>::get().ok_or(Error::<T>::AssetLockedWalletNotSet)?;

            let ast_amount = conversion::instrument_amount(aat_amount, record.ratio)
                .ok_or(Error::<T>::Overflow)?;
            ensure!(
                T::Instruments::balance_of(instrument, &holder) >= ast_amount,
                Error::<T>::InsufficientHeldBalance
            );
            record.aat_burned =
                record.aat_burned.checked_add(aat_amount).ok_or(Error::<T>::Overflow)?;

            let registry = Self::account_id();
            T::UtilityAsset::burn(&registry, &who, aat_amount)?;
            T::Instruments::move_held(&registry, instrument, &holder, &custody_wallet, ast_amount)?;

            if aat_amount > 0 {
                record.phase = RedemptionPhase::PartiallyRedeemed;
            }
            ConversionRecords::<T>::insert(instrument, record);

            log::debug!(
                target: LOG_TARGET,
                "{:?} burnt {} AAT for {} of instrument {}",
                who,
                aat_amount,
                ast_amount,
                instrument
            );
            Self::deposit_event(Event::AatBurned { who, instrument, aat_amount, ast_amount });
            Ok(())
        }

        /// Burn the current asset-locked wallet's balance of `instrument` once it
        /// holds at least 99% of the issued supply. Retry after further `burn_aat` calls if the
        /// threshold is not met yet.
        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::burn_ast_token())]
        pub fn burn_ast_token(origin: OriginFor<T>, instrument: InstrumentId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;
            let mut record =
                ConversionRecords::<T>::get(instrument).ok_or(Error::<T>::UnknownInstrument)?;
            let issued_supply =
                T::Instruments::issued_supply(instrument).ok_or(Error::<T>::UnknownInstrument)?;

            let custody_wallet =
                AssetLockedWallet::<T>::get().ok_or(Error::<T>::AssetLockedWalletNotSet)?;

            let custody = T::Instruments::balance_of(instrument, &custody_wallet);
            ensure!(
                conversion::meets_redemption_threshold(custody, issued_supply),
                Error::<T>::RedemptionThresholdNotMet
            );

            T::Instruments::burn(&Self::account_id(), instrument, &custody_wallet, custody)?;
            record.phase = RedemptionPhase::Finalized;
            ConversionRecords::<T>::insert(instrument, record);

            log::info!(
                target: LOG_TARGET,
                "instrument {} finalized, {} burnt from {:?}",
                instrument,
                custody,
                custody_wallet
            );
            Self::deposit_event(Event::InstrumentFinalized { instrument, burned: custody });
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::set_pool_wallet())]
        pub fn set_pool_wallet(origin: OriginFor<T>, wallet: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            let old_wallet = PoolWallet::<T>::get();
            PoolWallet::<T>::put(&wallet);
            Self::deposit_event(Event::PoolWalletChanged { old_wallet, new_wallet: wallet });
            Ok(())
        }

        /// Change the custody wallet for every later creation, redemption and
        /// finalization. Settled balances are not moved.
        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::set_asset_locked_wallet())]
        pub fn set_asset_locked_wallet(
            origin: OriginFor<T>,
            wallet: T::AccountId,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            let old_wallet = AssetLockedWallet::<T>::get();
            AssetLockedWallet::<T>::put(&wallet);
            Self::deposit_event(Event::AssetLockedWalletChanged { old_wallet, new_wallet: wallet });
            Ok(())
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::transfer_ownership())]
        pub fn transfer_ownership(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            let old_owner = Owner::<T>::get();
            Owner::<T>::put(&new_owner);
            log::info!(target: LOG_TARGET, "registry ownership moved to {:?}", new_owner);
            Self::deposit_event(Event::OwnerChanged { old_owner, new_owner });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        pub owner: Option<T::AccountId>,
        pub pool_wallet: Option<T::AccountId>,
        pub asset_locked_wallet: Option<T::AccountId>,
        /// Utility ledger account, if bound at genesis
        pub utility_asset: Option<T::AccountId>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            if let Some(ref owner) = self.owner {
                Owner::<T>::put(owner);
            }
            if let Some(ref wallet) = self.pool_wallet {
                PoolWallet::<T>::put(wallet);
            }
            if let Some(ref wallet) = self.asset_locked_wallet {
                AssetLockedWallet::<T>::put(wallet);
            }
            if let Some(ref account) = self.utility_asset {
                UtilityAssetAccount::<T>::put(account);
            }
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Account the registry acts as on both ledgers.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    fn ensure_owner(who: &T::AccountId) -> DispatchResult {
        ensure!(Owner::<T>::get().as_ref() == Some(who), Error::<T>::NotOwner);
        Ok(())
    }

    fn record(instrument: InstrumentId) -> Result<ConversionRecord<T::AccountId>, DispatchError> {
        ConversionRecords::<T>::get(instrument).ok_or_else(|| Error::<T>::UnknownInstrument.into())
    }

    /// Stored ratio of `instrument`.
    pub fn aat_conversion(instrument: InstrumentId) -> Result<Ratio, DispatchError> {
        Ok(Self::record(instrument)?.ratio)
    }

    /// Utility asset needed to redeem the whole locked allocation.
    pub fn aat_burn_amount(instrument: InstrumentId) -> Result<Balance, DispatchError> {
        let record = Self::record(instrument)?;
        conversion::utility_amount(record.locked_allocation, record.ratio)
            .ok_or_else(|| Error::<T>::Overflow.into())
    }

    /// `(instrument amount bought by aat_amount, locked allocation)`.
    ///
    /// The second figure is the instrument's fixed redemption target and does
    /// not depend on `aat_amount`.
    pub fn ast_conversion_amount(
        instrument: InstrumentId,
        aat_amount: Balance,
    ) -> Result<(Balance, Balance), DispatchError> {
        let record = Self::record(instrument)?;
        let ast_amount = conversion::instrument_amount(aat_amount, record.ratio)
            .ok_or(Error::<T>::Overflow)?;
        Ok((ast_amount, record.locked_allocation))
    }

    pub fn get_instruments() -> Vec<InstrumentId> {
        InstrumentList::<T>::get().into_inner()
    }

    pub fn instrument_count() -> u32 {
        InstrumentList::<T>::decode_len().unwrap_or(0) as u32
    }

    /// Supply figures of `instrument` and the balance `who` holds of it.
    pub fn ast_token_balance(
        instrument: InstrumentId,
        who: &T::AccountId,
    ) -> Result<(InstrumentSupply, Balance), DispatchError> {
        let issued_supply =
            T::Instruments::issued_supply(instrument).ok_or(Error::<T>::UnknownInstrument)?;
        let supply =
            T::Instruments::total_supply(instrument).ok_or(Error::<T>::UnknownInstrument)?;
        let balance = T::Instruments::balance_of(instrument, who);
        Ok((InstrumentSupply { issued_supply, supply }, balance))
    }

    pub fn redemption_phase(instrument: InstrumentId) -> Option<RedemptionPhase> {
        ConversionRecords::<T>::get(instrument).map(|record| record.phase)
    }

    /// Every listed instrument has a record backed by a live instrument, and the
    /// phase agrees with the amount burnt so far.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let listed = InstrumentList::<T>::get();
        ensure!(
            listed.len() == ConversionRecords::<T>::iter_keys().count(),
            sp_runtime::TryRuntimeError::Other("instrument list and records disagree")
        );
        for instrument in listed {
            let record = ConversionRecords::<T>::get(instrument)
                .ok_or(sp_runtime::TryRuntimeError::Other("listed instrument without record"))?;
            ensure!(
                T::Instruments::issued_supply(instrument).is_some(),
                sp_runtime::TryRuntimeError::Other("record without instrument")
            );
            match record.phase {
                RedemptionPhase::Issued => ensure!(
                    record.aat_burned == 0,
                    sp_runtime::TryRuntimeError::Other("issued instrument with burnt AAT")
                ),
                RedemptionPhase::PartiallyRedeemed => ensure!(
                    record.aat_burned > 0,
                    sp_runtime::TryRuntimeError::Other("redeemed instrument without burnt AAT")
                ),
                RedemptionPhase::Finalized => {}
            }
        }
        Ok(())
    }
}
