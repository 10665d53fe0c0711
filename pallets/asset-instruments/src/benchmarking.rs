//! Benchmarking setup for pallet-asset-instruments

use super::*;

#[allow(unused)]
use crate::Pallet as AssetInstruments;
use frame_benchmarking::v2::*;
use frame_system::RawOrigin;

fn issue_to<T: Config>(custody: &T::AccountId) -> InstrumentId {
    let authority: T::AccountId = account("authority", 0, 0);
    let holder: T::AccountId = account("holder", 0, 0);
    let params = InstrumentParams {
        name: sp_std::vec![b'n'; 64],
        symbol: sp_std::vec![b's'; 16],
        total_supply: 10_000_000,
        locked_pct: 50,
        custody_wallet: custody.clone(),
        holder,
    };
    <Pallet<T> as InstrumentLedger<T::AccountId>>::issue(&authority, params)
        .expect("benchmark instrument issues")
}

#[benchmarks]
mod benchmarks {
    use super::*;

    #[benchmark]
    fn transfer() {
        let caller: T::AccountId = whitelisted_caller();
        let recipient: T::AccountId = account("recipient", 0, 0);
        let instrument = issue_to::<T>(&caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), instrument, recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(instrument, &recipient), 1_000_000);
    }

    #[benchmark]
    fn approve() {
        let caller: T::AccountId = whitelisted_caller();
        let spender: T::AccountId = account("spender", 0, 0);
        let instrument = issue_to::<T>(&caller);

        #[extrinsic_call]
        _(RawOrigin::Signed(caller.clone()), instrument, spender.clone(), 1_000_000);

        assert_eq!(Allowances::<T>::get((instrument, &caller, &spender)), 1_000_000);
    }

    #[benchmark]
    fn transfer_from() {
        let spender: T::AccountId = whitelisted_caller();
        let custody: T::AccountId = account("custody", 0, 0);
        let recipient: T::AccountId = account("recipient", 0, 0);
        let instrument = issue_to::<T>(&custody);
        Allowances::<T>::insert((instrument, &custody, &spender), 1_000_000);

        #[extrinsic_call]
        _(RawOrigin::Signed(spender), instrument, custody.clone(), recipient.clone(), 1_000_000);

        assert_eq!(Balances::<T>::get(instrument, &recipient), 1_000_000);
    }

    impl_benchmark_test_suite!(AssetInstruments, crate::mock::new_test_ext(), crate::mock::Test);
}
