//! Tests for the party domain: balance updater algebra, khatta semantics,
//! and the party-level recording methods.

use core_kernel::Money;
use proptest::prelude::*;
use rust_decimal_macros::dec;

use domain_party::{
    apply_delta, khatta_after_invoice, BalanceDelta, LedgerStatus, Party, PartyKind,
};

fn money(d: rust_decimal::Decimal) -> Money {
    Money::new(d)
}

mod balance_updater {
    use super::*;

    #[test]
    fn invoice_delta_moves_both_sides() {
        let state = apply_delta(
            Money::zero(),
            Money::zero(),
            &BalanceDelta::invoice(money(dec!(100)), money(dec!(40))),
        );

        assert_eq!(state.total_payable, money(dec!(100)));
        assert_eq!(state.total_paid, money(dec!(40)));
        assert_eq!(state.remaining, money(dec!(60)));
        assert_eq!(state.status, LedgerStatus::Payable);
    }

    #[test]
    fn payment_delta_only_moves_paid_side() {
        let state = apply_delta(
            money(dec!(100)),
            money(dec!(40)),
            &BalanceDelta::payment(money(dec!(60))),
        );

        assert_eq!(state.total_payable, money(dec!(100)));
        assert_eq!(state.total_paid, money(dec!(100)));
        assert_eq!(state.remaining, Money::zero());
        assert_eq!(state.status, LedgerStatus::Paid);
    }

    #[test]
    fn overpayment_is_paid_not_payable() {
        let state = apply_delta(
            money(dec!(50)),
            Money::zero(),
            &BalanceDelta::payment(money(dec!(80))),
        );

        assert_eq!(state.remaining, money(dec!(-30)));
        assert_eq!(state.status, LedgerStatus::Paid);
    }

    #[test]
    fn zero_remaining_is_paid() {
        assert_eq!(LedgerStatus::from_remaining(Money::zero()), LedgerStatus::Paid);
    }

    proptest! {
        #[test]
        fn remaining_is_always_payable_minus_paid(
            payable in -10_000i64..10_000,
            paid in -10_000i64..10_000,
            owed_delta in 0i64..10_000,
            paid_delta in 0i64..10_000,
        ) {
            let state = apply_delta(
                Money::from_units(payable),
                Money::from_units(paid),
                &BalanceDelta {
                    amount_owed: Money::from_units(owed_delta),
                    amount_paid: Money::from_units(paid_delta),
                },
            );

            prop_assert_eq!(state.remaining, state.total_payable - state.total_paid);
            let payable_status = state.status == LedgerStatus::Payable;
            prop_assert_eq!(payable_status, state.remaining.is_positive());
        }

        #[test]
        fn delta_application_is_additive(
            owed in 0i64..1_000,
            paid in 0i64..1_000,
        ) {
            // Applying one combined delta equals applying its parts in sequence.
            let combined = apply_delta(
                Money::zero(),
                Money::zero(),
                &BalanceDelta {
                    amount_owed: Money::from_units(owed),
                    amount_paid: Money::from_units(paid),
                },
            );
            let first = apply_delta(
                Money::zero(),
                Money::zero(),
                &BalanceDelta::invoice(Money::from_units(owed), Money::zero()),
            );
            let second = apply_delta(
                first.total_payable,
                first.total_paid,
                &BalanceDelta::payment(Money::from_units(paid)),
            );

            prop_assert_eq!(combined, second);
        }
    }
}

mod khatta {
    use super::*;

    #[test]
    fn shortfall_is_carried() {
        assert_eq!(
            khatta_after_invoice(money(dec!(100)), money(dec!(40))),
            money(dec!(60))
        );
    }

    #[test]
    fn full_payment_resets_to_zero() {
        assert_eq!(
            khatta_after_invoice(money(dec!(100)), money(dec!(100))),
            Money::zero()
        );
        assert_eq!(
            khatta_after_invoice(money(dec!(100)), money(dec!(120))),
            Money::zero()
        );
    }

    #[test]
    fn khatta_overwrites_instead_of_accumulating() {
        let mut party = Party::new(PartyKind::Customer, "Asha", "0300-1234567", "Asha Traders", "cash");

        party.record_invoice(money(dec!(100)), money(dec!(40)));
        assert_eq!(party.khatta, money(dec!(60)));

        // A second short-paid invoice replaces the carry, it does not add.
        party.record_invoice(money(dec!(50)), money(dec!(30)));
        assert_eq!(party.khatta, money(dec!(20)));

        // A fully paid invoice clears it.
        party.record_invoice(money(dec!(10)), money(dec!(10)));
        assert_eq!(party.khatta, Money::zero());
    }
}

mod party_recording {
    use super::*;

    #[test]
    fn record_invoice_updates_all_ledger_fields() {
        let mut party = Party::new(PartyKind::Customer, "Asha", "0300-1234567", "Asha Traders", "cash")
            .with_account_balance(money(dec!(500)));

        party.record_invoice(money(dec!(100)), money(dec!(40)));

        assert_eq!(party.total_payable, money(dec!(100)));
        assert_eq!(party.total_paid, money(dec!(40)));
        assert_eq!(party.remaining, money(dec!(60)));
        assert_eq!(party.status, LedgerStatus::Payable);
        assert_eq!(party.khatta, money(dec!(60)));
        // Account balance drops by the amount actually paid.
        assert_eq!(party.account_balance, money(dec!(460)));
    }

    #[test]
    fn record_payment_settles_the_balance() {
        let mut party = Party::new(PartyKind::Vendor, "Bilal", "0301-7654321", "Bilal & Sons", "credit");
        party.record_invoice(money(dec!(100)), money(dec!(40)));

        party.record_payment(money(dec!(60)));

        assert_eq!(party.total_paid, money(dec!(100)));
        assert_eq!(party.remaining, Money::zero());
        assert_eq!(party.status, LedgerStatus::Paid);
        // Standalone payments do not touch the account balance or khatta.
        assert_eq!(party.account_balance, Money::zero());
        assert_eq!(party.khatta, money(dec!(60)));
    }

    #[test]
    fn new_party_starts_settled() {
        let party = Party::new(PartyKind::Customer, "Asha", "0300-1234567", "Asha Traders", "cash");
        assert_eq!(party.status, LedgerStatus::Paid);
        assert!(party.remaining.is_zero());
    }
}

mod serialization {
    use super::*;

    #[test]
    fn status_uses_wire_strings() {
        assert_eq!(serde_json::to_string(&LedgerStatus::Paid).unwrap(), "\"PAID\"");
        assert_eq!(
            serde_json::to_string(&LedgerStatus::Payable).unwrap(),
            "\"PAYABLE\""
        );
    }

    #[test]
    fn kind_parses_from_storage_tag() {
        assert_eq!("customer".parse::<PartyKind>().unwrap(), PartyKind::Customer);
        assert_eq!("vendor".parse::<PartyKind>().unwrap(), PartyKind::Vendor);
        assert!("supplier".parse::<PartyKind>().is_err());
    }
}
