use crate::{mock::*, Error, Event};
use frame_support::{assert_noop, assert_ok};
use tokenization_primitives::{InstrumentLedger, UNIT};

fn issued_supply(id: u32) -> Option<u128> {
    <AssetInstruments as InstrumentLedger<u64>>::issued_supply(id)
}

fn supply(id: u32) -> Option<u128> {
    <AssetInstruments as InstrumentLedger<u64>>::total_supply(id)
}

// ============================================================================
// Issuance
// ============================================================================

#[test]
fn issue_sets_immutable_metadata() {
    new_test_ext().execute_with(|| {
        let id = issue_default();
        let details = AssetInstruments::instrument(id).expect("instrument exists");

        assert_eq!(details.name.to_vec(), b"ASTToken".to_vec());
        assert_eq!(details.symbol.to_vec(), b"AST".to_vec());
        assert_eq!(details.decimals, 18);
        assert_eq!(details.issued_supply, SUPPLY);
        assert_eq!(details.authority, AUTHORITY);
        assert_eq!(details.custody_wallet, CUSTODY);
        assert_eq!(details.holder, HOLDER);
    });
}

#[test]
fn issue_splits_supply_between_custody_and_holder() {
    new_test_ext().execute_with(|| {
        let id = issue_default();

        assert_eq!(AssetInstruments::balance_of(id, CUSTODY), 5_000 * UNIT);
        assert_eq!(AssetInstruments::balance_of(id, HOLDER), 5_000 * UNIT);
        assert_eq!(supply(id), Some(SUPPLY));

        System::assert_last_event(
            Event::Issued {
                instrument: id,
                authority: AUTHORITY,
                issued_supply: SUPPLY,
                custody_wallet: CUSTODY,
                locked: 5_000 * UNIT,
                holder: HOLDER,
                held: 5_000 * UNIT,
            }
            .into(),
        );
    });
}

#[test]
fn issue_rounds_locked_share_down() {
    new_test_ext().execute_with(|| {
        let id = <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(999, 33))
            .unwrap();

        // 999 * 33 / 100 = 329.67 -> 329; the holder gets the rest
        assert_eq!(AssetInstruments::balance_of(id, CUSTODY), 329);
        assert_eq!(AssetInstruments::balance_of(id, HOLDER), 670);
        assert_ok!(AssetInstruments::do_try_state());
    });
}

#[test]
fn issue_handles_full_and_empty_lock() {
    new_test_ext().execute_with(|| {
        let all_locked =
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(SUPPLY, 100))
                .unwrap();
        assert_eq!(AssetInstruments::balance_of(all_locked, CUSTODY), SUPPLY);
        assert_eq!(AssetInstruments::balance_of(all_locked, HOLDER), 0);

        let none_locked =
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(SUPPLY, 0))
                .unwrap();
        assert_eq!(AssetInstruments::balance_of(none_locked, CUSTODY), 0);
        assert_eq!(AssetInstruments::balance_of(none_locked, HOLDER), SUPPLY);
    });
}

#[test]
fn instrument_ids_are_sequential_and_ledgers_independent() {
    new_test_ext().execute_with(|| {
        let first = issue_default();
        let second =
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(2 * SUPPLY, 50))
                .unwrap();

        assert_eq!((first, second), (0, 1));
        assert_eq!(AssetInstruments::next_instrument_id(), 2);

        assert_ok!(AssetInstruments::transfer(RuntimeOrigin::signed(CUSTODY), first, ALICE, UNIT));
        assert_eq!(AssetInstruments::balance_of(first, ALICE), UNIT);
        assert_eq!(AssetInstruments::balance_of(second, ALICE), 0);
        assert_eq!(AssetInstruments::balance_of(second, CUSTODY), SUPPLY);
    });
}

#[test]
fn issue_rejects_invalid_parameters() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(SUPPLY, 101)),
            Error::<Test>::InvalidAllocation
        );

        let mut long_name = params(SUPPLY, 50);
        long_name.name = vec![b'n'; 65];
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, long_name),
            Error::<Test>::NameTooLong
        );

        let mut long_symbol = params(SUPPLY, 50);
        long_symbol.symbol = vec![b's'; 17];
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, long_symbol),
            Error::<Test>::SymbolTooLong
        );

        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(u128::MAX, 50)),
            Error::<Test>::Overflow
        );
    });
}

#[test]
fn issue_fails_when_identifiers_are_exhausted() {
    new_test_ext().execute_with(|| {
        crate::NextInstrumentId::<Test>::put(u32::MAX);
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::issue(&AUTHORITY, params(SUPPLY, 50)),
            Error::<Test>::NoAvailableInstrumentId
        );
    });
}

// ============================================================================
// Burn
// ============================================================================

#[test]
fn burn_works_when_called_by_authority() {
    new_test_ext().execute_with(|| {
        let id = issue_default();

        assert_ok!(<AssetInstruments as InstrumentLedger<u64>>::burn(
            &AUTHORITY,
            id,
            &CUSTODY,
            5_000 * UNIT
        ));

        assert_eq!(AssetInstruments::balance_of(id, CUSTODY), 0);
        assert_eq!(supply(id), Some(5_000 * UNIT));
        // Issued supply is a creation-time fact and does not move
        assert_eq!(issued_supply(id), Some(SUPPLY));
        System::assert_last_event(
            Event::Burned { instrument: id, from: CUSTODY, amount: 5_000 * UNIT }.into(),
        );
        assert_ok!(AssetInstruments::do_try_state());
    });
}

#[test]
fn burn_fails_for_non_authority() {
    new_test_ext().execute_with(|| {
        let id = issue_default();

        for caller in [CUSTODY, HOLDER, ALICE] {
            assert_noop!(
                <AssetInstruments as InstrumentLedger<u64>>::burn(&caller, id, &CUSTODY, 10 * UNIT),
                Error::<Test>::CallerNotAuthority
            );
        }
    });
}

#[test]
fn burn_fails_with_insufficient_balance() {
    new_test_ext().execute_with(|| {
        let id = issue_default();
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::burn(
                &AUTHORITY,
                id,
                &CUSTODY,
                5_000 * UNIT + 1
            ),
            Error::<Test>::InsufficientBalance
        );
    });
}

#[test]
fn privileged_calls_reject_unknown_instrument() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::burn(&AUTHORITY, 7, &CUSTODY, 0),
            Error::<Test>::UnknownInstrument
        );
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::move_held(
                &AUTHORITY, 7, &HOLDER, &CUSTODY, 0
            ),
            Error::<Test>::UnknownInstrument
        );
        assert_eq!(supply(7), None);
        assert_eq!(issued_supply(7), None);
    });
}

// ============================================================================
// Held-balance movement
// ============================================================================

#[test]
fn move_held_is_reserved_to_authority() {
    new_test_ext().execute_with(|| {
        let id = issue_default();

        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::move_held(
                &HOLDER, id, &HOLDER, &CUSTODY, UNIT
            ),
            Error::<Test>::CallerNotAuthority
        );

        assert_ok!(<AssetInstruments as InstrumentLedger<u64>>::move_held(
            &AUTHORITY, id, &HOLDER, &CUSTODY, UNIT
        ));
        assert_eq!(AssetInstruments::balance_of(id, HOLDER), 5_000 * UNIT - UNIT);
        assert_eq!(AssetInstruments::balance_of(id, CUSTODY), 5_000 * UNIT + UNIT);
    });
}

#[test]
fn move_held_cannot_exceed_held_balance() {
    new_test_ext().execute_with(|| {
        let id = issue_default();
        assert_noop!(
            <AssetInstruments as InstrumentLedger<u64>>::move_held(
                &AUTHORITY,
                id,
                &HOLDER,
                &CUSTODY,
                5_000 * UNIT + 1
            ),
            Error::<Test>::InsufficientBalance
        );
    });
}

// ============================================================================
// Ordinary transfers
// ============================================================================

#[test]
fn transfer_needs_no_whitelist() {
    new_test_ext().execute_with(|| {
        let id = issue_default();

        assert_ok!(AssetInstruments::transfer(
            RuntimeOrigin::signed(CUSTODY),
            id,
            ALICE,
            100 * UNIT
        ));
        assert_ok!(AssetInstruments::transfer(RuntimeOrigin::signed(ALICE), id, BOB, 40 * UNIT));

        assert_eq!(AssetInstruments::balance_of(id, ALICE), 60 * UNIT);
        assert_eq!(AssetInstruments::balance_of(id, BOB), 40 * UNIT);
        System::assert_last_event(
            Event::Transferred { instrument: id, from: ALICE, to: BOB, amount: 40 * UNIT }.into(),
        );
        assert_ok!(AssetInstruments::do_try_state());
    });
}

#[test]
fn transfer_fails_with_insufficient_balance() {
    new_test_ext().execute_with(|| {
        let id = issue_default();
        assert_noop!(
            AssetInstruments::transfer(RuntimeOrigin::signed(ALICE), id, BOB, 1),
            Error::<Test>::InsufficientBalance
        );
    });
}

#[test]
fn transfer_fails_for_unknown_instrument() {
    new_test_ext().execute_with(|| {
        assert_noop!(
            AssetInstruments::transfer(RuntimeOrigin::signed(CUSTODY), 3, ALICE, 0),
            Error::<Test>::UnknownInstrument
        );
    });
}

#[test]
fn approve_and_transfer_from_work() {
    new_test_ext().execute_with(|| {
        let id = issue_default();

        assert_ok!(AssetInstruments::approve(RuntimeOrigin::signed(CUSTODY), id, ALICE, 30 * UNIT));
        assert_eq!(AssetInstruments::allowance((id, CUSTODY, ALICE)), 30 * UNIT);

        assert_ok!(AssetInstruments::transfer_from(
            RuntimeOrigin::signed(ALICE),
            id,
            CUSTODY,
            BOB,
            20 * UNIT
        ));
        assert_eq!(AssetInstruments::allowance((id, CUSTODY, ALICE)), 10 * UNIT);
        assert_eq!(AssetInstruments::balance_of(id, BOB), 20 * UNIT);

        assert_noop!(
            AssetInstruments::transfer_from(
                RuntimeOrigin::signed(ALICE),
                id,
                CUSTODY,
                BOB,
                11 * UNIT
            ),
            Error::<Test>::InsufficientAllowance
        );
    });
}

#[test]
fn allowances_are_scoped_per_instrument() {
    new_test_ext().execute_with(|| {
        let first = issue_default();
        let second = issue_default();

        assert_ok!(AssetInstruments::approve(RuntimeOrigin::signed(CUSTODY), first, ALICE, UNIT));
        assert_noop!(
            AssetInstruments::transfer_from(
                RuntimeOrigin::signed(ALICE),
                second,
                CUSTODY,
                ALICE,
                UNIT
            ),
            Error::<Test>::InsufficientAllowance
        );
    });
}
