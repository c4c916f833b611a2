//! # Invoice Documents
//!
//! Builds the printable layout for a committed bill. The PDF rasteriser
//! itself lives with the frontend; this module produces everything it
//! consumes - resolved names, formatted amounts, the table layout and the
//! `{billNumber}.pdf` filename - so the rendering layer holds no business
//! knowledge at all.
//!
//! ## Document Layout
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │ CloudLedger                                   │  header
//! │ Invoice                                       │
//! │                                               │
//! │ Bill No: INV-20260807-0001                    │  metadata
//! │ Customer: Asha Traders                        │
//! │ Phone: 9845000000                             │
//! │ Date: 07/08/2026                              │
//! │ Payment Type: cash                            │
//! │                                               │
//! │ Item            Qty       Price       Total   │  line-item table
//! │ ───────────────────────────────────────────   │
//! │ Notebook A5       3        ₹100        ₹300   │
//! │ ───────────────────────────────────────────   │
//! │                              Total: ₹300      │  total row
//! └───────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::config::LedgerConfig;
use crate::store::Ledger;
use cloudledger_core::{Bill, Money, PaymentType};

/// One laid-out invoice line: the bill item joined with its resolved name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceLine {
    /// Product name resolved against the current catalog at render time.
    /// Deleted products render as an empty name; their price and quantity
    /// come from the bill's own snapshot and are unaffected.
    pub name: String,
    pub quantity: i64,
    pub unit_price_paise: i64,
    pub line_total_paise: i64,
}

/// A fully resolved, render-ready invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDocument {
    /// Business name shown in the header.
    pub business_name: String,

    pub bill_number: String,
    pub customer_name: String,
    pub customer_phone: String,

    /// Bill date formatted dd/MM/yyyy.
    pub date: String,

    pub payment_type: PaymentType,
    pub lines: Vec<InvoiceLine>,
    pub total_paise: i64,

    pub is_gst_bill: bool,
    pub gst_number: Option<String>,
    pub total_gst_paise: Option<i64>,
}

impl InvoiceDocument {
    /// Builds the document for a committed bill, resolving product names
    /// against the ledger's current catalog.
    pub fn from_bill(bill: &Bill, ledger: &Ledger, config: &LedgerConfig) -> Self {
        let lines = bill
            .items
            .iter()
            .map(|item| InvoiceLine {
                name: ledger
                    .product(&item.product_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                quantity: item.quantity,
                unit_price_paise: item.unit_price_paise,
                line_total_paise: item.subtotal_paise,
            })
            .collect();

        InvoiceDocument {
            business_name: config.business_name.clone(),
            bill_number: bill.bill_number.clone(),
            customer_name: bill.customer_name.clone(),
            customer_phone: bill.customer_phone.clone(),
            date: bill.date.format("%d/%m/%Y").to_string(),
            payment_type: bill.payment_type,
            lines,
            total_paise: bill.total_paise,
            is_gst_bill: bill.is_gst_bill,
            gst_number: bill.gst_number.clone(),
            total_gst_paise: bill.total_gst_paise,
        }
    }

    /// Download filename for the rendered PDF.
    pub fn filename(&self) -> String {
        format!("{}.pdf", self.bill_number)
    }

    /// Lays the document out as plain text - the same table the PDF shows.
    pub fn render_text(&self) -> String {
        let mut out = String::new();

        out.push_str(&format!("{}\n", self.business_name));
        out.push_str("Invoice\n\n");

        out.push_str(&format!("Bill No: {}\n", self.bill_number));
        out.push_str(&format!("Customer: {}\n", self.customer_name));
        out.push_str(&format!("Phone: {}\n", self.customer_phone));
        out.push_str(&format!("Date: {}\n", self.date));
        out.push_str(&format!("Payment Type: {}\n", payment_label(self.payment_type)));
        if let Some(gstin) = &self.gst_number {
            out.push_str(&format!("GSTIN: {}\n", gstin));
        }
        out.push('\n');

        out.push_str(&format!(
            "{:<36}{:>5}{:>14}{:>14}\n",
            "Item", "Qty", "Price", "Total"
        ));
        out.push_str(&format!("{}\n", "-".repeat(69)));
        for line in &self.lines {
            out.push_str(&format!(
                "{:<36}{:>5}{:>14}{:>14}\n",
                line.name,
                line.quantity,
                Money::from_paise(line.unit_price_paise).to_string(),
                Money::from_paise(line.line_total_paise).to_string(),
            ));
        }
        out.push_str(&format!("{}\n", "-".repeat(69)));

        if let Some(gst_paise) = self.total_gst_paise {
            out.push_str(&format!("GST: {}\n", Money::from_paise(gst_paise)));
        }
        out.push_str(&format!("Total: {}\n", Money::from_paise(self.total_paise)));

        out
    }
}

fn payment_label(payment_type: PaymentType) -> &'static str {
    match payment_type {
        PaymentType::Online => "online",
        PaymentType::Cash => "cash",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::{BillLine, BillRequest};
    use chrono::{TimeZone, Utc};
    use cloudledger_core::{BillItem, Product};

    fn test_product(id: &str, name: &str, price_paise: i64) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            category: "General".to_string(),
            price_paise,
            stock: 10,
            reorder_point: 5,
            gst_rate_bps: None,
        }
    }

    fn committed_bill(ledger: &mut Ledger, config: &LedgerConfig) -> Bill {
        ledger
            .create_bill(
                BillRequest {
                    customer_name: "Asha Traders".to_string(),
                    customer_phone: "9845000000".to_string(),
                    payment_type: PaymentType::Cash,
                    is_gst_bill: false,
                    gst_number: None,
                    bill_number: Some("INV-20260807-0001".to_string()),
                    lines: vec![BillLine {
                        product_id: "p1".to_string(),
                        quantity: 3,
                        unit_price_override_paise: None,
                    }],
                },
                config,
            )
            .unwrap()
    }

    #[test]
    fn test_document_resolves_names_and_filename() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", "Notebook A5", 10000)).unwrap();

        let bill = committed_bill(&mut ledger, &config);
        let doc = InvoiceDocument::from_bill(&bill, &ledger, &config);

        assert_eq!(doc.business_name, "CloudLedger");
        assert_eq!(doc.filename(), "INV-20260807-0001.pdf");
        assert_eq!(doc.lines.len(), 1);
        assert_eq!(doc.lines[0].name, "Notebook A5");
        assert_eq!(doc.lines[0].line_total_paise, 30000);
        assert_eq!(doc.total_paise, 30000);
    }

    #[test]
    fn test_deleted_product_renders_empty_name() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", "Notebook A5", 10000)).unwrap();

        let bill = committed_bill(&mut ledger, &config);
        ledger.delete_product("p1").unwrap();

        let doc = InvoiceDocument::from_bill(&bill, &ledger, &config);
        assert_eq!(doc.lines[0].name, "");
        // The snapshot is untouched by the deletion
        assert_eq!(doc.lines[0].unit_price_paise, 10000);
    }

    #[test]
    fn test_render_text_layout() {
        let mut ledger = Ledger::new();
        let config = LedgerConfig::default();
        ledger.add_product(test_product("p1", "Notebook A5", 10000)).unwrap();

        let bill = committed_bill(&mut ledger, &config);
        let text = InvoiceDocument::from_bill(&bill, &ledger, &config).render_text();

        assert!(text.starts_with("CloudLedger\nInvoice\n"));
        assert!(text.contains("Bill No: INV-20260807-0001"));
        assert!(text.contains("Customer: Asha Traders"));
        assert!(text.contains("Payment Type: cash"));
        assert!(text.contains("Notebook A5"));
        assert!(text.contains("₹300"));
        assert!(text.contains("Total: ₹300"));
        assert!(!text.contains("GSTIN"));
    }

    #[test]
    fn test_render_text_gst_bill_with_fixed_date() {
        // Built by hand so the date is deterministic
        let bill = Bill {
            id: "bill-1".to_string(),
            bill_number: "INV-20260115-0042".to_string(),
            customer_name: "Asha Traders".to_string(),
            customer_phone: "9845000000".to_string(),
            items: vec![BillItem {
                product_id: "p1".to_string(),
                quantity: 1,
                unit_price_paise: 100000,
                subtotal_paise: 100000,
                gst_paise: Some(18000),
            }],
            total_paise: 118000,
            date: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
            payment_type: PaymentType::Online,
            is_gst_bill: true,
            gst_number: Some("29ABCDE1234F1Z5".to_string()),
            total_gst_paise: Some(18000),
        };

        let ledger = Ledger::new();
        let config = LedgerConfig::default();
        let doc = InvoiceDocument::from_bill(&bill, &ledger, &config);

        assert_eq!(doc.date, "15/01/2026");
        let text = doc.render_text();
        assert!(text.contains("Date: 15/01/2026"));
        assert!(text.contains("Payment Type: online"));
        assert!(text.contains("GSTIN: 29ABCDE1234F1Z5"));
        assert!(text.contains("GST: ₹180"));
        assert!(text.contains("Total: ₹1,180"));
    }
}
