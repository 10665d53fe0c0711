#![cfg_attr(not(feature = "std"), no_std)]
// Storage getters are kept for the read API until the runtime API lands
#![allow(deprecated)]
#![allow(clippy::let_unit_value)]

//! # Utility Token Pallet
//!
//! Fungible utility asset (AAT) whose transfers are gated by an owner-managed
//! authorization list. Supply is managed by a single minting authority, the
//! *factory*, which the owner can reassign. In a wired runtime the factory is
//! the conversion registry's pallet account, which mints to the pool wallet on
//! instrument creation and burns on redemption.
//!
//! Mint and burn do not consult the authorization list; only `transfer` and
//! `transfer_from` do, and they require both parties to be authorized.

use frame_support::{dispatch::DispatchResult, ensure, pallet_prelude::*, PalletId};
use frame_system::{ensure_signed, pallet_prelude::*};
use sp_runtime::traits::AccountIdConversion;
use sp_std::prelude::*;
use tokenization_primitives::{Balance, UtilityLedger};

pub use pallet::*;
pub use weights::WeightInfo;

pub mod weights;

#[cfg(test)]
mod mock;


#[cfg(feature = "runtime-benchmarks")]
mod benchmarking;

/// The current storage version.
const STORAGE_VERSION: StorageVersion = StorageVersion::new(1);

pub const LOG_TARGET: &str = "runtime::utility-token";

#[frame_support::pallet]
pub mod pallet {
    use super::*;

    #[pallet::config]
    pub trait Config: frame_system::Config {
        type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

        /// Derives the ledger's own account, which holds instrument allocations.
        #[pallet::constant]
        type PalletId: Get<PalletId>;

        type WeightInfo: WeightInfo;
    }

    #[pallet::pallet]
    #[pallet::storage_version(STORAGE_VERSION)]
    pub struct Pallet<T>(_);

    /// Token name (e.g., "Asset Access Token")
    #[pallet::storage]
    #[pallet::getter(fn token_name)]
    pub type TokenName<T> = StorageValue<_, BoundedVec<u8, ConstU32<64>>, ValueQuery>;

    /// Token symbol (e.g., "AAT")
    #[pallet::storage]
    #[pallet::getter(fn token_symbol)]
    pub type TokenSymbol<T> = StorageValue<_, BoundedVec<u8, ConstU32<16>>, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn decimals)]
    pub type Decimals<T> = StorageValue<_, u8, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn total_supply)]
    pub type TotalSupply<T> = StorageValue<_, Balance, ValueQuery>;

    #[pallet::storage]
    #[pallet::getter(fn balance_of)]
    pub type Balances<T: Config> =
        StorageMap<_, Blake2_128Concat, T::AccountId, Balance, ValueQuery>;

    /// Remaining delegated spend limit, keyed by (owner, spender).
    #[pallet::storage]
    #[pallet::getter(fn allowance)]
    pub type Allowances<T: Config> = StorageDoubleMap<
        _,
        Blake2_128Concat,
        T::AccountId,
        Blake2_128Concat,
        T::AccountId,
        Balance,
        ValueQuery,
    >;

    /// Accounts allowed to send and receive transfers
    #[pallet::storage]
    #[pallet::getter(fn is_authorized)]
    pub type Whitelist<T: Config> = StorageMap<_, Blake2_128Concat, T::AccountId, bool, ValueQuery>;

    /// Manages the whitelist, the factory role and ownership itself
    #[pallet::storage]
    #[pallet::getter(fn owner)]
    pub type Owner<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    /// Sole account allowed to mint and burn
    #[pallet::storage]
    #[pallet::getter(fn factory)]
    pub type Factory<T: Config> = StorageValue<_, T::AccountId, OptionQuery>;

    #[pallet::event]
    #[pallet::generate_deposit(pub(super) fn deposit_event)]
    pub enum Event<T: Config> {
        /// Tokens transferred from one account to another
        Transferred { from: T::AccountId, to: T::AccountId, amount: Balance },
        /// Delegated spend limit set to `amount`
        Approval { owner: T::AccountId, spender: T::AccountId, amount: Balance },
        /// New tokens minted by the factory
        Minted { to: T::AccountId, amount: Balance },
        /// Tokens destroyed by the factory
        Burned { from: T::AccountId, amount: Balance },
        /// Account added to whitelist
        Whitelisted { account: T::AccountId },
        /// Account removed from whitelist
        RemovedFromWhitelist { account: T::AccountId },
        /// Minting authority reassigned
        FactoryChanged { old_factory: Option<T::AccountId>, new_factory: T::AccountId },
        /// Ownership transferred
        OwnerChanged { old_owner: Option<T::AccountId>, new_owner: T::AccountId },
    }

    #[pallet::error]
    pub enum Error<T> {
        /// Caller is not the owner
        NotOwner,
        /// Caller is not the minting authority
        NotFactory,
        /// Sender or receiver is not on the whitelist
        NotWhitelisted,
        InsufficientBalance,
        InsufficientAllowance,
        /// Decrease exceeds the current allowance
        AllowanceUnderflow,
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
        pub fn transfer(origin: OriginFor<T>, to: T::AccountId, amount: Balance) -> DispatchResult {
            let sender = ensure_signed(origin)?;
            Self::do_transfer(&sender, &to, amount)
        }

        /// Spend `amount` of `from`'s balance against the caller's allowance.
        #[pallet::call_index(1)]
        #[pallet::weight(T::WeightInfo::transfer_from())]
        pub fn transfer_from(
            origin: OriginFor<T>,
            from: T::AccountId,
            to: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let spender = ensure_signed(origin)?;
            Self::ensure_authorized(&from, &to)?;
            let remaining = Allowances::<T>::get(&from, &spender)
                .checked_sub(amount)
                .ok_or(Error::<T>::InsufficientAllowance)?;

            Self::do_transfer(&from, &to, amount)?;
            Allowances::<T>::insert(&from, &spender, remaining);
            Ok(())
        }

        #[pallet::call_index(2)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn approve(
            origin: OriginFor<T>,
            spender: T::AccountId,
            amount: Balance,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            Self::set_allowance(owner, spender, amount);
            Ok(())
        }

        #[pallet::call_index(3)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn increase_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: Balance,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let amount = Allowances::<T>::get(&owner, &spender)
                .checked_add(delta)
                .ok_or(Error::<T>::Overflow)?;
            Self::set_allowance(owner, spender, amount);
            Ok(())
        }

        #[pallet::call_index(4)]
        #[pallet::weight(T::WeightInfo::approve())]
        pub fn decrease_allowance(
            origin: OriginFor<T>,
            spender: T::AccountId,
            delta: Balance,
        ) -> DispatchResult {
            let owner = ensure_signed(origin)?;
            let amount = Allowances::<T>::get(&owner, &spender)
                .checked_sub(delta)
                .ok_or(Error::<T>::AllowanceUnderflow)?;
            Self::set_allowance(owner, spender, amount);
            Ok(())
        }

        #[pallet::call_index(5)]
        #[pallet::weight(T::WeightInfo::mint())]
        pub fn mint(origin: OriginFor<T>, to: T::AccountId, amount: Balance) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_mint(&caller, &to, amount)
        }

        #[pallet::call_index(6)]
        #[pallet::weight(T::WeightInfo::burn())]
        pub fn burn(origin: OriginFor<T>, from: T::AccountId, amount: Balance) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::do_burn(&caller, &from, amount)
        }

        /// Add or remove `account` from the whitelist. Idempotent.
        #[pallet::call_index(7)]
        #[pallet::weight(T::WeightInfo::set_authorized())]
        pub fn set_authorized(
            origin: OriginFor<T>,
            account: T::AccountId,
            authorized: bool,
        ) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            if authorized {
                Whitelist::<T>::insert(&account, true);
                Self::deposit_event(Event::Whitelisted { account });
            } else {
                Whitelist::<T>::remove(&account);
                Self::deposit_event(Event::RemovedFromWhitelist { account });
            }
            Ok(())
        }

        #[pallet::call_index(8)]
        #[pallet::weight(T::WeightInfo::set_factory())]
        pub fn set_factory(origin: OriginFor<T>, new_factory: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            let old_factory = Factory::<T>::get();
            Factory::<T>::put(&new_factory);
            log::info!(target: LOG_TARGET, "minting authority reassigned to {:?}", new_factory);
            Self::deposit_event(Event::FactoryChanged { old_factory, new_factory });
            Ok(())
        }

        /// Hand ownership to `new_owner`, who is whitelisted as part of the call.
        #[pallet::call_index(9)]
        #[pallet::weight(T::WeightInfo::transfer_ownership())]
        pub fn transfer_ownership(origin: OriginFor<T>, new_owner: T::AccountId) -> DispatchResult {
            let caller = ensure_signed(origin)?;
            Self::ensure_owner(&caller)?;

            let old_owner = Owner::<T>::get();
            Owner::<T>::put(&new_owner);
            Self::deposit_event(Event::OwnerChanged { old_owner, new_owner: new_owner.clone() });

            Whitelist::<T>::insert(&new_owner, true);
            Self::deposit_event(Event::Whitelisted { account: new_owner });
            Ok(())
        }
    }

    #[pallet::genesis_config]
    #[derive(frame_support::DefaultNoBound)]
    pub struct GenesisConfig<T: Config> {
        /// Initial owner (will be whitelisted by default)
        pub owner: Option<T::AccountId>,
        /// Initial minting authority
        pub factory: Option<T::AccountId>,
        pub token_name: Vec<u8>,
        pub token_symbol: Vec<u8>,
        pub decimals: u8,
        /// Accounts to whitelist at genesis
        pub whitelisted_accounts: Vec<T::AccountId>,
        /// Initial balances (account, amount)
        pub initial_balances: Vec<(T::AccountId, Balance)>,
    }

    #[pallet::genesis_build]
    impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
        fn build(&self) {
            let name: BoundedVec<u8, ConstU32<64>> =
                self.token_name.clone().try_into().expect("Token name too long (max 64 bytes)");
            TokenName::<T>::put(name);

            let symbol: BoundedVec<u8, ConstU32<16>> =
                self.token_symbol.clone().try_into().expect("Token symbol too long (max 16 bytes)");
            TokenSymbol::<T>::put(symbol);

            Decimals::<T>::put(self.decimals);

            if let Some(ref owner) = self.owner {
                Owner::<T>::put(owner);
                Whitelist::<T>::insert(owner, true);
            }

            if let Some(ref factory) = self.factory {
                Factory::<T>::put(factory);
            }

            for account in &self.whitelisted_accounts {
                Whitelist::<T>::insert(account, true);
            }

            let mut total: Balance = 0;
            for (account, amount) in &self.initial_balances {
                Balances::<T>::mutate(account, |bal| {
                    *bal = bal.checked_add(*amount).expect("Genesis balance overflow")
                });
                total = total.checked_add(*amount).expect("Genesis total supply overflow");
            }
            TotalSupply::<T>::put(total);
        }
    }
}

impl<T: Config> Pallet<T> {
    /// Account representing the utility asset itself.
    pub fn account_id() -> T::AccountId {
        T::PalletId::get().into_account_truncating()
    }

    fn ensure_owner(who: &T::AccountId) -> DispatchResult {
        ensure!(Owner::<T>::get().as_ref() == Some(who), Error::<T>::NotOwner);
        Ok(())
    }

    fn ensure_factory(who: &T::AccountId) -> DispatchResult {
        ensure!(Factory::<T>::get().as_ref() == Some(who), Error::<T>::NotFactory);
        Ok(())
    }

    fn ensure_authorized(from: &T::AccountId, to: &T::AccountId) -> DispatchResult {
        ensure!(Whitelist::<T>::get(from), Error::<T>::NotWhitelisted);
        ensure!(Whitelist::<T>::get(to), Error::<T>::NotWhitelisted);
        Ok(())
    }

    fn set_allowance(owner: T::AccountId, spender: T::AccountId, amount: Balance) {
        Allowances::<T>::insert(&owner, &spender, amount);
        Self::deposit_event(Event::Approval { owner, spender, amount });
    }

    pub(crate) fn do_transfer(
        from: &T::AccountId,
        to: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Self::ensure_authorized(from, to)?;
        let from_balance =
            Balances::<T>::get(from).checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;

        if from != to {
            let to_balance =
                Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;
            Balances::<T>::insert(from, from_balance);
            Balances::<T>::insert(to, to_balance);
        }

        Self::deposit_event(Event::Transferred { from: from.clone(), to: to.clone(), amount });
        Ok(())
    }

    pub(crate) fn do_mint(
        caller: &T::AccountId,
        to: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Self::ensure_factory(caller)?;
        let supply = TotalSupply::<T>::get().checked_add(amount).ok_or(Error::<T>::Overflow)?;
        let balance = Balances::<T>::get(to).checked_add(amount).ok_or(Error::<T>::Overflow)?;

        TotalSupply::<T>::put(supply);
        Balances::<T>::insert(to, balance);
        Self::deposit_event(Event::Minted { to: to.clone(), amount });
        Ok(())
    }

    pub(crate) fn do_burn(
        caller: &T::AccountId,
        from: &T::AccountId,
        amount: Balance,
    ) -> DispatchResult {
        Self::ensure_factory(caller)?;
        let balance =
            Balances::<T>::get(from).checked_sub(amount).ok_or(Error::<T>::InsufficientBalance)?;
        // Every balance is bounded by the supply, so this only trips on corrupted state.
        let supply = TotalSupply::<T>::get().checked_sub(amount).ok_or(Error::<T>::Overflow)?;

        Balances::<T>::insert(from, balance);
        TotalSupply::<T>::put(supply);
        Self::deposit_event(Event::Burned { from: from.clone(), amount });
        Ok(())
    }

    /// Sum of all balances must equal the total supply.
    #[cfg(any(feature = "try-runtime", test))]
    pub fn do_try_state() -> Result<(), sp_runtime::TryRuntimeError> {
        let sum = Balances::<T>::iter_values()
            .try_fold(0 as Balance, |acc, balance| acc.checked_add(balance))
            .ok_or(sp_runtime::TryRuntimeError::Other("balance sum overflows"))?;
        ensure!(
            sum == TotalSupply::<T>::get(),
            sp_runtime::TryRuntimeError::Other("sum of balances differs from total supply")
        );
        Ok(())
    }
}

impl<T: Config> UtilityLedger<T::AccountId> for Pallet<T> {
    fn balance_of(who: &T::AccountId) -> Balance {
        Balances::<T>::get(who)
    }

    fn total_supply() -> Balance {
        TotalSupply::<T>::get()
    }

    fn mint(caller: &T::AccountId, to: &T::AccountId, amount: Balance) -> DispatchResult {
        Self::do_mint(caller, to, amount)
    }

    fn burn(caller: &T::AccountId, from: &T::AccountId, amount: Balance) -> DispatchResult {
        Self::do_burn(caller, from, amount)
    }
}
