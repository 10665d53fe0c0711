//! Weights for pallet-conversion-registry.
//!
//! Hand-set until the benchmarks in `benchmarking.rs` are run against a
//! reference machine. The ledger calls made through the handles are counted
//! with the registry's own reads and writes.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn set_utility_asset() -> Weight;
    fn create_instrument() -> Weight;
    fn burn_aat() -> Weight;
    fn burn_ast_token() -> Weight;
    fn set_pool_wallet() -> Weight;
    fn set_asset_locked_wallet() -> Weight;
    fn transfer_ownership() -> Weight;
}

impl WeightInfo for () {
    fn set_utility_asset() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn create_instrument() -> Weight {
        // Registry config x5, instrument ledger x4 writes, pool mint x3 reads / 2 writes
        Weight::from_parts(40_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(10, 9))
    }
    fn burn_aat() -> Weight {
        Weight::from_parts(30_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(9, 5))
    }
    fn burn_ast_token() -> Weight {
        Weight::from_parts(25_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(5, 3))
    }
    fn set_pool_wallet() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn set_asset_locked_wallet() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn transfer_ownership() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
}
