//! Tests for the billing domain types and request validation
//!
//! The end-to-end processor flows (which need storage adapters) are
//! exercised in `infra_db/tests/ledger_flow_tests.rs` against the in-memory
//! adapters.

use core_kernel::{Money, PartyId};
use rust_decimal_macros::dec;

use domain_billing::{
    BillingError, CreateInvoiceRequest, Invoice, InvoiceLine, InvoiceLineRequest, InvoiceType,
    PaymentSlipId,
};
use domain_inventory::Product;
use domain_party::PartyKind;

fn line_request(product: &Product, quantity: i64) -> InvoiceLineRequest {
    InvoiceLineRequest {
        product_id: product.id,
        quantity,
    }
}

fn sales_request(customer_id: PartyId, lines: Vec<InvoiceLineRequest>) -> CreateInvoiceRequest {
    CreateInvoiceRequest {
        invoice_type: InvoiceType::Sales,
        customer_id: Some(customer_id),
        vendor_id: None,
        products: lines,
        total_amount: Money::new(dec!(100)),
        paid_amount: Money::new(dec!(40)),
    }
}

mod invoice_type {
    use super::*;

    #[test]
    fn maps_to_the_trading_party_kind() {
        assert_eq!(InvoiceType::Sales.party_kind(), PartyKind::Customer);
        assert_eq!(InvoiceType::Purchase.party_kind(), PartyKind::Vendor);
    }

    #[test]
    fn parses_wire_tags() {
        assert_eq!("sales".parse::<InvoiceType>().unwrap(), InvoiceType::Sales);
        assert_eq!(
            "purchase".parse::<InvoiceType>().unwrap(),
            InvoiceType::Purchase
        );
        assert!(matches!(
            "refund".parse::<InvoiceType>(),
            Err(BillingError::UnknownInvoiceType(_))
        ));
    }
}

mod counterparty_validation {
    use super::*;

    #[test]
    fn accepts_a_customer_on_a_sales_invoice() {
        let customer_id = PartyId::new();
        let request = sales_request(customer_id, vec![]);
        assert_eq!(request.counterparty_id().unwrap(), customer_id);
    }

    #[test]
    fn rejects_both_counterparties() {
        let mut request = sales_request(PartyId::new(), vec![]);
        request.vendor_id = Some(PartyId::new());
        assert!(matches!(
            request.counterparty_id(),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn rejects_neither_counterparty() {
        let mut request = sales_request(PartyId::new(), vec![]);
        request.customer_id = None;
        assert!(matches!(
            request.counterparty_id(),
            Err(BillingError::Validation(_))
        ));
    }

    #[test]
    fn rejects_kind_mismatch() {
        let mut request = sales_request(PartyId::new(), vec![]);
        request.invoice_type = InvoiceType::Purchase;
        assert!(matches!(
            request.counterparty_id(),
            Err(BillingError::Validation(_))
        ));
    }
}

mod invoice {
    use super::*;

    #[test]
    fn paid_flag_derives_from_amounts() {
        let short = Invoice::new(
            InvoiceType::Sales,
            PartyId::new(),
            "Asha",
            vec![],
            Money::new(dec!(100)),
            Money::new(dec!(40)),
        );
        assert!(!short.paid);
        assert_eq!(short.outstanding(), Money::new(dec!(60)));

        let settled = Invoice::new(
            InvoiceType::Sales,
            PartyId::new(),
            "Asha",
            vec![],
            Money::new(dec!(100)),
            Money::new(dec!(100)),
        );
        assert!(settled.paid);

        let overpaid = Invoice::new(
            InvoiceType::Sales,
            PartyId::new(),
            "Asha",
            vec![],
            Money::new(dec!(100)),
            Money::new(dec!(120)),
        );
        assert!(overpaid.paid);
        assert!(overpaid.outstanding().is_negative());
    }

    #[test]
    fn lines_snapshot_the_product() {
        let product = Product::new("P-001", "Widget", "A widget", Money::new(dec!(50)), 10);
        let line = InvoiceLine::snapshot(&product, 2);

        assert_eq!(line.product_id, product.id);
        assert_eq!(line.product_name, "Widget");
        assert_eq!(line.description, "A widget");
        assert_eq!(line.unit_price, Money::new(dec!(50)));
        assert_eq!(line.line_total(), Money::new(dec!(100)));
    }

    #[test]
    fn line_request_helper_matches_product() {
        let product = Product::new("P-001", "Widget", "A widget", Money::new(dec!(50)), 10);
        let request = line_request(&product, 3);
        assert_eq!(request.product_id, product.id);
        assert_eq!(request.quantity, 3);
    }
}

mod slip_ids {
    use super::*;

    #[test]
    fn first_slip_is_101() {
        assert_eq!(PaymentSlipId::FIRST.value(), 101);
    }

    #[test]
    fn next_increments() {
        assert_eq!(PaymentSlipId::FIRST.next(), PaymentSlipId::new(102));
        assert!(PaymentSlipId::new(102) > PaymentSlipId::FIRST);
    }

    #[test]
    fn serializes_as_a_bare_number() {
        let json = serde_json::to_string(&PaymentSlipId::new(105)).unwrap();
        assert_eq!(json, "105");
    }
}

mod error_messages {
    use super::*;

    // The display strings double as the HTTP error messages, so they are
    // pinned here.
    #[test]
    fn not_found_messages_name_the_entity() {
        let err = BillingError::PartyNotFound {
            kind: PartyKind::Customer,
            id: PartyId::new(),
        };
        assert_eq!(err.to_string(), "Customer not found");

        let err = BillingError::PartyNotFound {
            kind: PartyKind::Vendor,
            id: PartyId::new(),
        };
        assert_eq!(err.to_string(), "Vendor not found");

        let product = Product::new("P-001", "Widget", "A widget", Money::new(dec!(1)), 0);
        let err = BillingError::ProductNotFound(product.id);
        assert!(err.to_string().starts_with("Product with ID "));
        assert!(err.is_not_found());
    }
}
