use crate as pallet_asset_instruments;
use frame_support::derive_impl;
use sp_runtime::{traits::IdentityLookup, BuildStorage};
use tokenization_primitives::{Balance, InstrumentId, InstrumentLedger, InstrumentParams, UNIT};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        AssetInstruments: pallet_asset_instruments,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
}

impl pallet_asset_instruments::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

/// Plays the registry: the only account allowed to burn.
pub const AUTHORITY: u64 = 1;
pub const CUSTODY: u64 = 2;
/// Stands in for the utility ledger's own account.
pub const HOLDER: u64 = 3;
pub const ALICE: u64 = 4;
pub const BOB: u64 = 5;

pub const SUPPLY: Balance = 10_000 * UNIT;

pub fn new_test_ext() -> sp_io::TestExternalities {
    let t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}

pub fn params(total_supply: Balance, locked_pct: u8) -> InstrumentParams<u64> {
    InstrumentParams {
        name: b"ASTToken".to_vec(),
        symbol: b"AST".to_vec(),
        total_supply,
        locked_pct,
        custody_wallet: CUSTODY,
        holder: HOLDER,
    }
}

/// Issues the 10 000-unit, 50/50 instrument most tests start from.
pub fn issue_default() -> InstrumentId {
    <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(SUPPLY, 50))
        .expect("default instrument issues")
}
