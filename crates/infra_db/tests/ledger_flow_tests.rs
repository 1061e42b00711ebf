//! End-to-end ledger flows through the processors over the in-memory
//! adapters: the happy-path scenarios, failure atomicity, and concurrency.

use std::sync::Arc;

use core_kernel::{Money, PartyId, ProductId};
use rust_decimal_macros::dec;

use domain_billing::{
    BillingError, BillingPort, EntityLockRegistry, InvoiceProcessor, InvoiceType,
    PaymentProcessor, PaymentSlipId,
};
use domain_inventory::ProductPort;
use domain_party::{LedgerStatus, PartyKind, PartyPort};
use infra_db::{InMemoryBillingStore, InMemoryPartyStore, InMemoryProductStore};
use test_utils::{TestInvoiceRequestBuilder, TestPartyBuilder, TestProductBuilder};

struct Harness {
    parties: Arc<InMemoryPartyStore>,
    products: Arc<InMemoryProductStore>,
    billing: Arc<InMemoryBillingStore>,
    invoices: InvoiceProcessor,
    payments: Arc<PaymentProcessor>,
}

fn harness() -> Harness {
    let parties = Arc::new(InMemoryPartyStore::new());
    let products = Arc::new(InMemoryProductStore::new());
    let billing = Arc::new(InMemoryBillingStore::new());
    let locks = Arc::new(EntityLockRegistry::new());

    let invoices = InvoiceProcessor::new(
        parties.clone(),
        products.clone(),
        billing.clone(),
        locks.clone(),
    );
    let payments = Arc::new(PaymentProcessor::new(
        parties.clone(),
        billing.clone(),
        locks,
    ));

    Harness {
        parties,
        products,
        billing,
        invoices,
        payments,
    }
}

fn money(units: i64) -> Money {
    Money::from_units(units)
}

#[tokio::test]
async fn sales_invoice_then_settling_payment() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();
    let product = TestProductBuilder::new().build();
    h.products.insert(&product).await.unwrap();

    // Sales invoice: price 50 x 2, total 100, paid 40.
    let invoice = h
        .invoices
        .create_invoice(
            TestInvoiceRequestBuilder::sales(customer.id)
                .with_line(product.id, 2)
                .with_total(money(100))
                .with_paid(money(40))
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(invoice.total_amount, money(100));
    assert_eq!(invoice.paid_amount, money(40));
    assert!(!invoice.paid);
    assert_eq!(invoice.party_name, customer.name);
    assert_eq!(invoice.lines.len(), 1);
    assert_eq!(invoice.lines[0].unit_price, Money::new(dec!(50)));

    let after_invoice = h.parties.get(customer.id).await.unwrap();
    assert_eq!(after_invoice.total_payable, money(100));
    assert_eq!(after_invoice.total_paid, money(40));
    assert_eq!(after_invoice.remaining, money(60));
    assert_eq!(after_invoice.status, LedgerStatus::Payable);
    assert_eq!(after_invoice.khatta, money(60));
    assert_eq!(after_invoice.account_balance, money(-40));

    let stocked = h.products.get(product.id).await.unwrap();
    assert_eq!(stocked.quantity, 8);

    // Settle with a payment of 60.
    let receipt = h
        .payments
        .pay(PartyKind::Customer, customer.id, money(60))
        .await
        .unwrap();

    assert_eq!(receipt.party.total_paid, money(100));
    assert_eq!(receipt.party.remaining, Money::zero());
    assert_eq!(receipt.party.status, LedgerStatus::Paid);
    assert_eq!(receipt.payment.slip_id, PaymentSlipId::FIRST);
    assert_eq!(receipt.payment.paid_amount, money(60));

    let settled = h.parties.get(customer.id).await.unwrap();
    assert_eq!(settled.status, LedgerStatus::Paid);

    let payments = h.billing.list_payments().await.unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0].party_kind, PartyKind::Customer);
}

#[tokio::test]
async fn purchase_invoice_receives_stock_and_books_against_the_vendor() {
    let h = harness();

    let vendor = TestPartyBuilder::vendor().build();
    h.parties.insert(&vendor).await.unwrap();
    let product = TestProductBuilder::new().with_quantity(3).build();
    h.products.insert(&product).await.unwrap();

    let invoice = h
        .invoices
        .create_invoice(
            TestInvoiceRequestBuilder::purchase(vendor.id)
                .with_line(product.id, 5)
                .with_total(money(250))
                .with_paid(money(250))
                .build(),
        )
        .await
        .unwrap();

    assert!(invoice.paid);

    let stocked = h.products.get(product.id).await.unwrap();
    assert_eq!(stocked.quantity, 8);

    let after = h.parties.get(vendor.id).await.unwrap();
    assert_eq!(after.total_payable, money(250));
    assert_eq!(after.total_paid, money(250));
    assert_eq!(after.status, LedgerStatus::Paid);
    assert_eq!(after.khatta, Money::zero());
}

#[tokio::test]
async fn sales_can_oversell_into_negative_stock() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();
    let product = TestProductBuilder::new().with_quantity(1).build();
    h.products.insert(&product).await.unwrap();

    h.invoices
        .create_invoice(
            TestInvoiceRequestBuilder::sales(customer.id)
                .with_line(product.id, 4)
                .with_total(money(200))
                .with_paid(money(200))
                .build(),
        )
        .await
        .unwrap();

    assert_eq!(h.products.get(product.id).await.unwrap().quantity, -3);
}

#[tokio::test]
async fn invoice_lines_keep_their_price_snapshot() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();
    let product = TestProductBuilder::new().with_price(Money::new(dec!(50))).build();
    h.products.insert(&product).await.unwrap();

    let invoice = h
        .invoices
        .create_invoice(
            TestInvoiceRequestBuilder::sales(customer.id)
                .with_line(product.id, 2)
                .build(),
        )
        .await
        .unwrap();

    // Reprice the product after the fact.
    let mut repriced = h.products.get(product.id).await.unwrap();
    repriced.price = Money::new(dec!(80));
    h.products.update(&repriced).await.unwrap();

    let stored = h.billing.get_invoice(invoice.id).await.unwrap();
    assert_eq!(stored.lines[0].unit_price, Money::new(dec!(50)));
}

#[tokio::test]
async fn missing_product_aborts_without_any_mutation() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();
    let product = TestProductBuilder::new().build();
    h.products.insert(&product).await.unwrap();

    let err = h
        .invoices
        .create_invoice(
            TestInvoiceRequestBuilder::sales(customer.id)
                .with_line(product.id, 2)
                .with_line(ProductId::new(), 1)
                .build(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, BillingError::ProductNotFound(_)));

    // Nothing moved: balances, stock, and the invoice list are untouched.
    let untouched = h.parties.get(customer.id).await.unwrap();
    assert_eq!(untouched.total_payable, Money::zero());
    assert_eq!(untouched.total_paid, Money::zero());
    assert_eq!(h.products.get(product.id).await.unwrap().quantity, 10);
    assert!(h.billing.list_invoices(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_counterparty_aborts_the_invoice() {
    let h = harness();

    let product = TestProductBuilder::new().build();
    h.products.insert(&product).await.unwrap();

    let err = h
        .invoices
        .create_invoice(
            TestInvoiceRequestBuilder::sales(PartyId::new())
                .with_line(product.id, 1)
                .build(),
        )
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Customer not found");
    assert_eq!(h.products.get(product.id).await.unwrap().quantity, 10);
}

#[tokio::test]
async fn vendor_id_on_a_sales_invoice_is_rejected() {
    let h = harness();

    let vendor = TestPartyBuilder::vendor().build();
    h.parties.insert(&vendor).await.unwrap();

    let mut request = TestInvoiceRequestBuilder::purchase(vendor.id).build();
    request.invoice_type = InvoiceType::Sales;

    let err = h.invoices.create_invoice(request).await.unwrap_err();
    assert!(matches!(err, BillingError::Validation(_)));
}

#[tokio::test]
async fn a_customer_cannot_take_a_vendor_payment() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();

    let err = h
        .payments
        .pay(PartyKind::Vendor, customer.id, money(10))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Vendor not found");
}

#[tokio::test]
async fn non_positive_payment_amounts_are_rejected() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();

    for amount in [Money::zero(), money(-5)] {
        let err = h
            .payments
            .pay(PartyKind::Customer, customer.id, amount)
            .await
            .unwrap_err();
        assert!(matches!(err, BillingError::Validation(_)));
    }

    assert!(h.billing.list_payments().await.unwrap().is_empty());
}

#[tokio::test]
async fn slip_ids_are_sequential_across_customer_and_vendor_payments() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    let vendor = TestPartyBuilder::vendor().build();
    h.parties.insert(&customer).await.unwrap();
    h.parties.insert(&vendor).await.unwrap();

    let first = h
        .payments
        .pay(PartyKind::Customer, customer.id, money(10))
        .await
        .unwrap();
    let second = h
        .payments
        .pay(PartyKind::Vendor, vendor.id, money(20))
        .await
        .unwrap();
    let third = h
        .payments
        .pay(PartyKind::Customer, customer.id, money(30))
        .await
        .unwrap();

    assert_eq!(first.payment.slip_id, PaymentSlipId::new(101));
    assert_eq!(second.payment.slip_id, PaymentSlipId::new(102));
    assert_eq!(third.payment.slip_id, PaymentSlipId::new(103));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_payments_settle_exactly_and_get_distinct_slips() {
    let h = harness();

    let vendor = TestPartyBuilder::vendor().build();
    h.parties.insert(&vendor).await.unwrap();

    let mut tasks = Vec::new();
    for _ in 0..2 {
        let payments = h.payments.clone();
        let vendor_id = vendor.id;
        tasks.push(tokio::spawn(async move {
            payments.pay(PartyKind::Vendor, vendor_id, money(10)).await
        }));
    }

    let mut slips = Vec::new();
    for task in tasks {
        let receipt = task.await.unwrap().unwrap();
        slips.push(receipt.payment.slip_id);
    }

    slips.sort();
    slips.dedup();
    assert_eq!(slips.len(), 2, "slip ids must be distinct");

    let settled = h.parties.get(vendor.id).await.unwrap();
    assert_eq!(settled.total_paid, money(20));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn many_concurrent_payments_neither_lose_updates_nor_reuse_slips() {
    let h = harness();

    let vendor = TestPartyBuilder::vendor().build();
    h.parties.insert(&vendor).await.unwrap();

    const WRITERS: i64 = 16;
    let mut tasks = Vec::new();
    for _ in 0..WRITERS {
        let payments = h.payments.clone();
        let vendor_id = vendor.id;
        tasks.push(tokio::spawn(async move {
            payments.pay(PartyKind::Vendor, vendor_id, money(5)).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let settled = h.parties.get(vendor.id).await.unwrap();
    assert_eq!(settled.total_paid, money(5 * WRITERS));

    let mut slips: Vec<i64> = h
        .billing
        .list_payments()
        .await
        .unwrap()
        .iter()
        .map(|p| p.slip_id.value())
        .collect();
    slips.sort_unstable();
    let expected: Vec<i64> = (101..101 + WRITERS).collect();
    assert_eq!(slips, expected);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_invoices_against_one_product_keep_stock_exact() {
    let h = harness();

    let customer = TestPartyBuilder::customer().build();
    h.parties.insert(&customer).await.unwrap();
    let product = TestProductBuilder::new().with_quantity(100).build();
    h.products.insert(&product).await.unwrap();

    let invoices = Arc::new(h.invoices);
    let mut tasks = Vec::new();
    for _ in 0..10 {
        let invoices = invoices.clone();
        let request = TestInvoiceRequestBuilder::sales(customer.id)
            .with_line(product.id, 3)
            .with_total(money(150))
            .with_paid(money(150))
            .build();
        tasks.push(tokio::spawn(async move {
            invoices.create_invoice(request).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(h.products.get(product.id).await.unwrap().quantity, 70);

    let settled = h.parties.get(customer.id).await.unwrap();
    assert_eq!(settled.total_payable, money(1500));
    assert_eq!(settled.total_paid, money(1500));
    assert_eq!(settled.status, LedgerStatus::Paid);
}

#[tokio::test]
async fn deleting_a_party_leaves_invoice_snapshots_readable() {
    let h = harness();

    let customer = TestPartyBuilder::customer().with_name("Asha").build();
    h.parties.insert(&customer).await.unwrap();
    let product = TestProductBuilder::new().build();
    h.products.insert(&product).await.unwrap();

    let invoice = h
        .invoices
        .create_invoice(
            TestInvoiceRequestBuilder::sales(customer.id)
                .with_line(product.id, 1)
                .build(),
        )
        .await
        .unwrap();

    h.parties.delete(customer.id).await.unwrap();

    let stored = h.billing.get_invoice(invoice.id).await.unwrap();
    assert_eq!(stored.party_name, "Asha");
}
