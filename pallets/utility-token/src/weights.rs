//! Weights for pallet-utility-token.
//!
//! Hand-set until the benchmarks in `benchmarking.rs` are run against a
//! reference machine. Each entry charges a flat execution cost plus the
//! storage reads/writes of the call.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn transfer() -> Weight;
    fn transfer_from() -> Weight;
    fn approve() -> Weight;
    fn mint() -> Weight;
    fn burn() -> Weight;
    fn set_authorized() -> Weight;
    fn set_factory() -> Weight;
    fn transfer_ownership() -> Weight;
}

impl WeightInfo for () {
    fn transfer() -> Weight {
        // Whitelist x2, Balances x2
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(4, 2))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(5, 3))
    }
    fn approve() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn mint() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(3, 2))
    }
    fn burn() -> Weight {
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(3, 2))
    }
    fn set_authorized() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn set_factory() -> Weight {
        Weight::from_parts(7_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(2, 1))
    }
    fn transfer_ownership() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 2))
    }
}
