//! Weights for pallet-asset-instruments.

use frame_support::{
    traits::Get,
    weights::{constants::RocksDbWeight, Weight},
};

pub trait WeightInfo {
    fn transfer() -> Weight;
    fn approve() -> Weight;
    fn transfer_from() -> Weight;
}

impl WeightInfo for () {
    fn transfer() -> Weight {
        // Instruments, Balances x2
        Weight::from_parts(10_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(3, 2))
    }
    fn approve() -> Weight {
        Weight::from_parts(8_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(1, 1))
    }
    fn transfer_from() -> Weight {
        Weight::from_parts(12_000_000, 0).saturating_add(RocksDbWeight::get().reads_writes(4, 3))
    }
}
