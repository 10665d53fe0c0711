use crate as pallet_conversion_registry;
use frame_support::{derive_impl, parameter_types, PalletId};
use sp_runtime::{traits::IdentityLookup, BuildStorage};

type Block = frame_system::mocking::MockBlock<Test>;

// Both real ledgers sit behind the registry's handles.
frame_support::construct_runtime!(
    pub enum Test {
        System: frame_system,
        UtilityToken: pallet_utility_token,
        AssetInstruments: pallet_asset_instruments,
        ConversionRegistry: pallet_conversion_registry,
    }
);

#[derive_impl(frame_system::config_preludes::TestDefaultConfig)]
impl frame_system::Config for Test {
    type Block = Block;
    type AccountId = u64;
    type Lookup = IdentityLookup<Self::AccountId>;
}

parameter_types! {
    pub const UtilityPalletId: PalletId = PalletId(*b"py/utila");
    pub const RegistryPalletId: PalletId = PalletId(*b"py/convr");
    pub const MaxInstruments: u32 = 4;
}

impl pallet_utility_token::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type PalletId = UtilityPalletId;
    type WeightInfo = ();
}

impl pallet_asset_instruments::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type WeightInfo = ();
}

impl pallet_conversion_registry::Config for Test {
    type RuntimeEvent = RuntimeEvent;
    type PalletId = RegistryPalletId;
    type UtilityAsset = UtilityToken;
    type Instruments = AssetInstruments;
    type MaxInstruments = MaxInstruments;
    type WeightInfo = ();
}

pub const OWNER: u64 = 1;
pub const POOL: u64 = 2;
pub const CUSTODY: u64 = 3;
pub const ALICE: u64 = 4;
pub const BOB: u64 = 5;
/// Replacement wallet used by the setter tests.
pub const NEW_WALLET: u64 = 6;

/// Registry fully wired: owner, both wallets and the utility ledger bound.
pub fn new_test_ext() -> sp_io::TestExternalities {
    test_ext_with(pallet_conversion_registry::GenesisConfig::<Test> {
        owner: Some(OWNER),
        pool_wallet: Some(POOL),
        asset_locked_wallet: Some(CUSTODY),
        utility_asset: Some(UtilityToken::account_id()),
    })
}

/// Registry with an owner only, as right after deployment.
pub fn unbound_test_ext() -> sp_io::TestExternalities {
    test_ext_with(pallet_conversion_registry::GenesisConfig::<Test> {
        owner: Some(OWNER),
        ..Default::default()
    })
}

pub fn test_ext_with(
    registry: pallet_conversion_registry::GenesisConfig<Test>,
) -> sp_io::TestExternalities {
    let mut t = frame_system::GenesisConfig::<Test>::default().build_storage().unwrap();

    pallet_utility_token::GenesisConfig::<Test> {
        owner: Some(OWNER),
        factory: Some(ConversionRegistry::account_id()),
        token_name: b"Asset Access Token".to_vec(),
        token_symbol: b"AAT".to_vec(),
        decimals: 18,
        whitelisted_accounts: vec![POOL, ALICE, BOB],
        initial_balances: vec![],
    }
    .assimilate_storage(&mut t)
    .unwrap();

    registry.assimilate_storage(&mut t).unwrap();

    let mut ext = sp_io::TestExternalities::new(t);
    ext.execute_with(|| System::set_block_number(1));
    ext
}
