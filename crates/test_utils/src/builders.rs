//! Test data builders
//!
//! Builders with sensible defaults so tests only spell out the fields under
//! test.

use core_kernel::{Money, PartyId, ProductId};
use domain_billing::{CreateInvoiceRequest, InvoiceLineRequest, InvoiceType};
use domain_inventory::Product;
use domain_party::{Party, PartyKind};
use rust_decimal_macros::dec;

/// Builder for test parties
pub struct TestPartyBuilder {
    kind: PartyKind,
    name: String,
    mobile_no: String,
    company: String,
    cash_type: String,
    account_balance: Money,
}

impl TestPartyBuilder {
    /// A customer named "Asha" with no starting balance
    pub fn customer() -> Self {
        Self {
            kind: PartyKind::Customer,
            name: "Asha".to_string(),
            mobile_no: "0300-1234567".to_string(),
            company: "Asha Traders".to_string(),
            cash_type: "cash".to_string(),
            account_balance: Money::zero(),
        }
    }

    /// A vendor named "Bilal" with no starting balance
    pub fn vendor() -> Self {
        Self {
            kind: PartyKind::Vendor,
            name: "Bilal".to_string(),
            mobile_no: "0301-7654321".to_string(),
            company: "Bilal & Sons".to_string(),
            cash_type: "credit".to_string(),
            account_balance: Money::zero(),
        }
    }

    /// Sets the name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the starting account balance
    pub fn with_account_balance(mut self, balance: Money) -> Self {
        self.account_balance = balance;
        self
    }

    /// Builds the party
    pub fn build(self) -> Party {
        Party::new(
            self.kind,
            self.name,
            self.mobile_no,
            self.company,
            self.cash_type,
        )
        .with_account_balance(self.account_balance)
    }
}

/// Builder for test products
pub struct TestProductBuilder {
    code: String,
    name: String,
    description: String,
    price: Money,
    quantity: i64,
}

impl TestProductBuilder {
    /// A product priced 50 with ten in stock
    pub fn new() -> Self {
        Self {
            code: "WID-001".to_string(),
            name: "Widget".to_string(),
            description: "A standard widget".to_string(),
            price: Money::new(dec!(50)),
            quantity: 10,
        }
    }

    /// Sets the display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the unit price
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Sets the stock level
    pub fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Builds the product
    pub fn build(self) -> Product {
        Product::new(
            self.code,
            self.name,
            self.description,
            self.price,
            self.quantity,
        )
    }
}

impl Default for TestProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for invoice creation requests
pub struct TestInvoiceRequestBuilder {
    invoice_type: InvoiceType,
    customer_id: Option<PartyId>,
    vendor_id: Option<PartyId>,
    products: Vec<InvoiceLineRequest>,
    total_amount: Money,
    paid_amount: Money,
}

impl TestInvoiceRequestBuilder {
    /// A sales invoice for the given customer: total 100, paid 40
    pub fn sales(customer_id: PartyId) -> Self {
        Self {
            invoice_type: InvoiceType::Sales,
            customer_id: Some(customer_id),
            vendor_id: None,
            products: Vec::new(),
            total_amount: Money::new(dec!(100)),
            paid_amount: Money::new(dec!(40)),
        }
    }

    /// A purchase invoice for the given vendor: total 100, paid 40
    pub fn purchase(vendor_id: PartyId) -> Self {
        Self {
            invoice_type: InvoiceType::Purchase,
            customer_id: None,
            vendor_id: Some(vendor_id),
            products: Vec::new(),
            total_amount: Money::new(dec!(100)),
            paid_amount: Money::new(dec!(40)),
        }
    }

    /// Adds a product line
    pub fn with_line(mut self, product_id: ProductId, quantity: i64) -> Self {
        self.products.push(InvoiceLineRequest {
            product_id,
            quantity,
        });
        self
    }

    /// Sets the invoice total
    pub fn with_total(mut self, total: Money) -> Self {
        self.total_amount = total;
        self
    }

    /// Sets the amount paid up front
    pub fn with_paid(mut self, paid: Money) -> Self {
        self.paid_amount = paid;
        self
    }

    /// Builds the request
    pub fn build(self) -> CreateInvoiceRequest {
        CreateInvoiceRequest {
            invoice_type: self.invoice_type,
            customer_id: self.customer_id,
            vendor_id: self.vendor_id,
            products: self.products,
            total_amount: self.total_amount,
            paid_amount: self.paid_amount,
        }
    }
}
