//! Inventory Domain - Products and stock levels
//!
//! Products carry a unit price and an integer stock count. Sales invoices
//! issue stock, purchase invoices receive it. There is deliberately no floor
//! on the quantity: overselling records a negative stock level instead of
//! rejecting the invoice.

pub mod ports;
pub mod product;

pub use ports::ProductPort;
pub use product::Product;
