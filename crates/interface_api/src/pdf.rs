//! Invoice PDF rendering
//!
//! Produces the downloadable invoice document: header, counterparty block,
//! item table with per-line totals, and the total/paid footer. Layout is
//! fixed-position text on a single A4 page; long invoices keep writing
//! lines, matching the layout the previous renderer produced.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use domain_billing::Invoice;
use domain_party::Party;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 18.0;
const ROW_STEP_MM: f32 = 7.0;

// Table column x-positions.
const COL_NAME: f32 = MARGIN_MM;
const COL_DESCRIPTION: f32 = 58.0;
const COL_QUANTITY: f32 = 112.0;
const COL_PRICE: f32 = 140.0;
const COL_TOTAL: f32 = 168.0;

struct Page {
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    y: f32,
}

impl Page {
    fn labelled(&mut self, label: &str, value: &str) {
        self.layer
            .use_text(label, 12.0, Mm(MARGIN_MM), Mm(self.y), &self.bold);
        self.layer
            .use_text(value, 12.0, Mm(MARGIN_MM + 32.0), Mm(self.y), &self.regular);
        self.y -= ROW_STEP_MM;
    }

    fn table_row(&mut self, font_size: f32, font: &IndirectFontRef, cells: [&str; 5]) {
        let columns = [COL_NAME, COL_DESCRIPTION, COL_QUANTITY, COL_PRICE, COL_TOTAL];
        for (x, text) in columns.into_iter().zip(cells) {
            self.layer.use_text(text, font_size, Mm(x), Mm(self.y), font);
        }
        self.y -= ROW_STEP_MM;
    }
}

/// Renders an invoice to PDF bytes
///
/// The party is optional: when the counterparty has been deleted, the
/// document falls back to the name snapshot stored on the invoice.
pub fn render_invoice(
    invoice: &Invoice,
    party: Option<&Party>,
) -> Result<Vec<u8>, printpdf::Error> {
    let (doc, page_index, layer_index) =
        PdfDocument::new("Invoice", Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    let mut page = Page {
        layer: doc.get_page(page_index).get_layer(layer_index),
        regular,
        bold,
        y: PAGE_HEIGHT_MM - 30.0,
    };

    // Title
    page.layer
        .use_text("Invoice", 28.0, Mm(88.0), Mm(page.y), &page.bold);
    page.y -= 2.0 * ROW_STEP_MM;

    // Invoice information
    page.labelled("Invoice ID:", &invoice.id.short());
    page.labelled("Date:", &invoice.created_at.format("%d/%m/%Y").to_string());

    // Counterparty information
    let kind_label = invoice.party_kind().label();
    let name = party.map_or(invoice.party_name.as_str(), |p| p.name.as_str());
    page.labelled(&format!("{kind_label}:"), name);
    if let Some(party) = party {
        page.labelled("Mobile No:", &party.mobile_no);
        page.labelled("Company:", &party.company);
        page.labelled("Cash Type:", &party.cash_type);
    }
    page.y -= ROW_STEP_MM;

    // Item table
    page.layer
        .use_text("Items:", 12.0, Mm(MARGIN_MM), Mm(page.y), &page.bold);
    page.y -= ROW_STEP_MM;

    let bold = page.bold.clone();
    page.table_row(
        11.0,
        &bold,
        ["Name", "Description", "Quantity", "Price", "Total Amount"],
    );

    let regular = page.regular.clone();
    for line in &invoice.lines {
        let quantity = format!("{:02}", line.quantity);
        let price = line.unit_price.to_string();
        let total = line.line_total().to_string();
        page.table_row(
            10.0,
            &regular,
            [
                line.product_name.as_str(),
                line.description.as_str(),
                quantity.as_str(),
                price.as_str(),
                total.as_str(),
            ],
        );
    }
    page.y -= ROW_STEP_MM;

    // Totals
    let totals_x = COL_PRICE;
    page.layer.use_text(
        format!("Total Amount: {}", invoice.total_amount),
        12.0,
        Mm(totals_x),
        Mm(page.y),
        &page.bold,
    );
    page.y -= ROW_STEP_MM;
    page.layer.use_text(
        format!("Paid Amount: {}", invoice.paid_amount),
        12.0,
        Mm(totals_x),
        Mm(page.y),
        &page.bold,
    );

    doc.save_to_bytes()
}
