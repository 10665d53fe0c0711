//! Benchmarking setup for pallet-conversion-registry
//!
//! The runtime must make the registry account the utility ledger's minting
//! authority, as the mock does; creation mints through it.

use super::*;

#[allow(unused)]
use crate::Pallet as ConversionRegistry;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

/// Binds owner, wallets and utility ledger account. Returns the owner.
fn wire<T: Config>() -> T::AccountId {
    let owner: T::AccountId = whitelisted_caller();
    Owner::<T>::put(&owner);
    PoolWallet::<T>::put(account::<T::AccountId>("pool", 0, 0));
    AssetLockedWallet::<T>::put(account::<T::AccountId>("custody", 0, 0));
    UtilityAssetAccount::<T>::put(account::<T::AccountId>("utility", 0, 0));
    owner
}

fn create<T: Config>(owner: &T::AccountId, locked_pct: u8) -> InstrumentId {
    Pallet::<T>::create_instrument(
        RawOrigin::Signed(owner.clone()).into(),
        b"ASTToken".to_vec(),
        b"AST".to_vec(),
        100_000,
        7533,
        locked_pct,
        100 - locked_pct,
    )
    .expect("registry is wired");
    Pallet::<T>::instrument_count() - 1
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn set_utility_asset() {
        let owner: T::AccountId = whitelisted_caller();
        let ledger: T::AccountId = account("utility", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), ledger.clone());

        assert_eq!(UtilityAssetAccount::<T>::get(), Some(ledger));
    }

    #[benchmark]
    fn create_instrument() {
        let owner = wire::<T>();

        #[extrinsic_call]
        _(
            RawOrigin::Signed(owner),
            b"ASTToken".to_vec(),
            b"AST".to_vec(),
            100_000,
            7533,
            50,
            50,
        );

        assert_eq!(Pallet::<T>::instrument_count(), 1);
    }

    #[benchmark]
    fn burn_aat() {
        let owner = wire::<T>();
        let instrument = create::<T>(&owner, 50);
        let pool: T::AccountId = account("pool", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(pool), 1_000 * UNIT, instrument);

        assert_eq!(
            Pallet::<T>::redemption_phase(instrument),
            Some(RedemptionPhase::PartiallyRedeemed)
        );
    }

    #[benchmark]
    fn burn_ast_token() {
        let owner = wire::<T>();
        // Fully locked, so custody already meets the threshold
        let instrument = create::<T>(&owner, 100);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), instrument);

        assert_eq!(Pallet::<T>::redemption_phase(instrument), Some(RedemptionPhase::Finalized));
    }

    #[benchmark]
    fn set_pool_wallet() {
        let owner: T::AccountId = whitelisted_caller();
        let wallet: T::AccountId = account("wallet", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), wallet.clone());

        assert_eq!(PoolWallet::<T>::get(), Some(wallet));
    }

    #[benchmark]
    fn set_asset_locked_wallet() {
        let owner: T::AccountId = whitelisted_caller();
        let wallet: T::AccountId = account("wallet", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), wallet.clone());

        assert_eq!(AssetLockedWallet::<T>::get(), Some(wallet));
    }

    #[benchmark]
    fn transfer_ownership() {
        let owner: T::AccountId = whitelisted_caller();
        let new_owner: T::AccountId = account("new_owner", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), new_owner.clone());

        assert_eq!(Owner::<T>::get(), Some(new_owner));
    }

    impl_benchmark_test_suite!(ConversionRegistry, crate::mock::new_test_ext(), crate::mock::Test);
}
