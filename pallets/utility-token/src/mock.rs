use crate as pallet_utility_token;
use frame_support::{derive_impl, parameter_types, PalletId};
use sp_runtime::{traits::IdentityLookup, BuildStorage};
use tokenization_primitives::{Balance, UNIT};

type Block = frame_system::mocking::MockBlock<Test>;

// Configure a mock runtime to test the pallet.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        UtilityToken: pallet_utility_token,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
}

pub const OWNER: u64 = 1;
pub const FACTORY: u64 = 2;
pub const ALICE: u64 = 3;
pub const BOB: u64 = 4;
/// Never whitelisted at genesis.
pub const EVE: u64 = 5;

pub const ALICE_BALANCE: Balance = 1_000 * UNIT;
pub const BOB_BALANCE: Balance = 500 * UNIT;

parameter_types! {
    pub const UtilityPalletId: PalletId = PalletId(*b"py/utila");
}

impl pallet_utility_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type PalletId = UtilityPalletId;
    type WeightInfo = ();
}

// Build genesis storage according to the mock runtime.
pub fn new_test_ext() -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_utility_token::GenesisConfig::<Test> {
        owner: Some(OWNER),
        factory: Some(FACTORY),
        token_name: b"Asset Access Token".to_vec(),
        token_symbol: b"AAT".to_vec(),
        decimals: 18,
        whitelisted_accounts: vec![ALICE, BOB],
        initial_balances: vec![(ALICE, ALICE_BALANCE), (BOB, BOB_BALANCE)],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
