//! Behavior tests for the in-memory adapters: CRUD semantics, list
//! ordering/filtering, the slip allocator, and the unique-slip backstop.

use core_kernel::{Money, PartyId, PaymentId, ProductId};
use rust_decimal_macros::dec;

use domain_billing::{BillingPort, Invoice, InvoiceType, Payment, PaymentSlipId};
use domain_inventory::ProductPort;
use domain_party::{PartyKind, PartyPort};
use infra_db::{InMemoryBillingStore, InMemoryPartyStore, InMemoryProductStore};
use test_utils::{PartyFixtures, ProductFixtures, TestPartyBuilder};

#[tokio::test]
async fn party_crud_round_trip() {
    let store = InMemoryPartyStore::new();
    let mut party = TestPartyBuilder::customer().build();

    store.insert(&party).await.unwrap();
    assert_eq!(store.get(party.id).await.unwrap(), party);

    party.name = "Renamed".to_string();
    store.update(&party).await.unwrap();
    assert_eq!(store.get(party.id).await.unwrap().name, "Renamed");

    store.delete(party.id).await.unwrap();
    assert!(store.get(party.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn party_list_filters_by_kind() {
    let store = InMemoryPartyStore::new();
    store.insert(&PartyFixtures::customer()).await.unwrap();
    store.insert(&PartyFixtures::customer()).await.unwrap();
    store.insert(&PartyFixtures::vendor()).await.unwrap();

    assert_eq!(store.list(PartyKind::Customer).await.unwrap().len(), 2);
    assert_eq!(store.list(PartyKind::Vendor).await.unwrap().len(), 1);
}

#[tokio::test]
async fn party_update_of_unknown_id_is_not_found() {
    let store = InMemoryPartyStore::new();
    let party = TestPartyBuilder::customer().build();
    assert!(store.update(&party).await.unwrap_err().is_not_found());
    assert!(store.delete(PartyId::new()).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn duplicate_party_insert_conflicts() {
    let store = InMemoryPartyStore::new();
    let party = TestPartyBuilder::customer().build();
    store.insert(&party).await.unwrap();
    assert!(store.insert(&party).await.unwrap_err().is_conflict());
}

#[tokio::test]
async fn product_crud_round_trip() {
    let store = InMemoryProductStore::new();
    let mut product = ProductFixtures::widget();

    store.insert(&product).await.unwrap();
    product.price = Money::new(dec!(75));
    store.update(&product).await.unwrap();
    assert_eq!(
        store.get(product.id).await.unwrap().price,
        Money::new(dec!(75))
    );

    store.delete(product.id).await.unwrap();
    assert!(store.get(product.id).await.unwrap_err().is_not_found());
    assert!(store
        .get(ProductId::new())
        .await
        .unwrap_err()
        .is_not_found());
}

#[tokio::test]
async fn invoice_listing_is_newest_first_and_filterable() {
    let store = InMemoryBillingStore::new();

    let sales = Invoice::new(
        InvoiceType::Sales,
        PartyId::new(),
        "Asha",
        vec![],
        Money::new(dec!(100)),
        Money::new(dec!(100)),
    );
    let purchase = Invoice::new(
        InvoiceType::Purchase,
        PartyId::new(),
        "Bilal",
        vec![],
        Money::new(dec!(200)),
        Money::new(dec!(0)),
    );

    store.insert_invoice(&sales).await.unwrap();
    store.insert_invoice(&purchase).await.unwrap();

    let all = store.list_invoices(None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].id, purchase.id, "newest first");

    let only_sales = store.list_invoices(Some(InvoiceType::Sales)).await.unwrap();
    assert_eq!(only_sales.len(), 1);
    assert_eq!(only_sales[0].id, sales.id);

    assert!(store
        .get_invoice(sales.id)
        .await
        .unwrap()
        .lines
        .is_empty());
}

#[tokio::test]
async fn slip_allocation_starts_at_101_and_increments() {
    let store = InMemoryBillingStore::new();

    assert_eq!(store.allocate_slip_id().await.unwrap(), PaymentSlipId::FIRST);
    assert_eq!(
        store.allocate_slip_id().await.unwrap(),
        PaymentSlipId::new(102)
    );
    assert_eq!(
        store.allocate_slip_id().await.unwrap(),
        PaymentSlipId::new(103)
    );
}

#[tokio::test]
async fn duplicate_slip_insert_is_a_conflict() {
    let store = InMemoryBillingStore::new();
    let slip = store.allocate_slip_id().await.unwrap();

    let first = Payment::new(
        PartyKind::Customer,
        PartyId::new(),
        slip,
        Money::new(dec!(10)),
    );
    let second = Payment::new(
        PartyKind::Vendor,
        PartyId::new(),
        slip,
        Money::new(dec!(20)),
    );

    store.insert_payment(&first).await.unwrap();
    let err = store.insert_payment(&second).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn payments_are_retrievable_by_id_and_listed_in_slip_order() {
    let store = InMemoryBillingStore::new();

    let mut inserted = Vec::new();
    for amount in [10, 20, 30] {
        let slip = store.allocate_slip_id().await.unwrap();
        let payment = Payment::new(
            PartyKind::Customer,
            PartyId::new(),
            slip,
            Money::from_units(amount),
        );
        store.insert_payment(&payment).await.unwrap();
        inserted.push(payment);
    }

    let listed = store.list_payments().await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed.windows(2).all(|w| w[0].slip_id < w[1].slip_id));

    let fetched = store.get_payment(inserted[1].id).await.unwrap();
    assert_eq!(fetched.paid_amount, Money::from_units(20));

    assert!(store
        .get_payment(PaymentId::new())
        .await
        .unwrap_err()
        .is_not_found());
}
