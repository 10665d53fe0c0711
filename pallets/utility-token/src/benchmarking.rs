//! Benchmarking setup for pallet-utility-token

use super::*;

#[allow(unused)]
use crate::Pallet as UtilityToken;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: Balance = 1_000_000;

        Whitelist::<T>::insert(&caller, true);
        Whitelist::<T>::insert(&recipient, true);
        Balances::<T>::insert(&caller, 10_000_000);
        TotalSupply::<T>::put(10_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn transfer_from() {
        let spender: T::AccountId = whitelisted_caller();
        let holder: T::AccountId = account("holder", 0, 0);
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: Balance = 1_000_000;

        Whitelist::<T>::insert(&holder, true);
        Whitelist::<T>::insert(&recipient, true);
        Balances::<T>::insert(&holder, 10_000_000);
        TotalSupply::<T>::put(10_000_000);
        Allowances::<T>::insert(&holder, &spender, amount);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender.clone()), holder.clone(), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
        assert_eq!(Allowances::<T>::get(&holder, &spender), 0);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), spender.clone(), 1_000_000);

        assert_eq!(Allowances::<T>::get(&caller, &spender), 1_000_000);
    }

    #[benchmark]
    fn mint() {
        let factory: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let amount: Balance = 1_000_000;
        Factory::<T>::put(&factory);

        #[extrinsic_call]
        _(RawOrigin::Signed(factory), recipient.clone(), amount);

        assert_eq!(Balances::<T>::get(&recipient), amount);
    }

    #[benchmark]
    fn burn() {
        let factory: T::AccountId = whitelisted_caller();
        let holder: T::AccountId = account("holder", 0, 0);
        Factory::<T>::put(&factory);
        Balances::<T>::insert(&holder, 1_000_000);
        TotalSupply::<T>::put(1_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(factory), holder.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(&holder), 0);
    }

    #[benchmark]
    fn set_authorized() {
        let owner: T::AccountId = whitelisted_caller();
        let account: T::AccountId = account("account", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), account.clone(), true);

        assert!(Whitelist::<T>::get(&account));
    }

    #[benchmark]
    fn set_factory() {
        let owner: T::AccountId = whitelisted_caller();
        let factory: T::AccountId = account("factory", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), factory.clone());

        assert_eq!(Factory::<T>::get(), Some(factory));
    }

    #[benchmark]
    fn transfer_ownership() {
        let owner: T::AccountId = whitelisted_caller();
        let new_owner: T::AccountId = account("owner", 0, 0);
        Owner::<T>::put(&owner);

        #[extrinsic_call]
        _(RawOrigin::Signed(owner), new_owner.clone());

        assert_eq!(Owner::<T>::get(), Some(new_owner));
    }

    impl_benchmark_test_suite!(UtilityToken, crate::mock::new_test_ext(), crate::mock::Test);
}
