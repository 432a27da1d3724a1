//! Checkout Demo
//!
//! Walks a full counter sale over the bundled showroom catalog: filter the
//! catalog, select the first match, apply a discount, take a cash payment,
//! and hand the finalized record to a host that prints it.
//!
//! Run with: `cargo run --example checkout -- --query sofá --discount 10 --tendered 1000`

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tabled::{Table, Tabled};

use balcao::prelude::*;

/// Arguments for the checkout demo.
#[derive(Debug, Parser)]
struct CheckoutArgs {
    /// Free-text catalog query
    #[clap(short, long, default_value = "")]
    query: String,

    /// Discount percentage to request
    #[clap(short, long, default_value_t = 10.0)]
    discount: f64,

    /// Cash tendered by the customer; omit to pay by PIX
    #[clap(short, long)]
    tendered: Option<String>,

    /// Run with the administrative discount ceiling
    #[clap(short, long)]
    admin: bool,

    /// Catalog fixture file; defaults to the bundled showroom
    #[clap(short, long)]
    fixture: Option<PathBuf>,
}

/// A catalog row for display.
#[derive(Tabled)]
struct ItemRow {
    id: String,
    model: String,
    category: String,
    price: String,
}

/// Host that prints the finalized record instead of persisting it.
#[derive(Debug, Default)]
struct PrintingHost;

#[expect(clippy::print_stdout, reason = "Example code")]
impl CheckoutHost for PrintingHost {
    fn finalize_sale(&mut self, record: SaleRecord) {
        match serde_norway::to_string(&record) {
            Ok(yaml) => println!("\nFinalized sale:\n{yaml}"),
            Err(err) => println!("\nFinalized sale (unserializable: {err})"),
        }
    }

    fn close(&mut self) {
        println!("(host asked to close the checkout)");
    }
}

/// Checkout Demo
#[expect(clippy::print_stdout, reason = "Example code")]
pub fn main() -> Result<()> {
    let args = CheckoutArgs::parse();

    let catalog = match &args.fixture {
        Some(path) => load_catalog(path)?,
        None => showroom()?,
    };

    let role = if args.admin {
        Role::Administrative
    } else {
        Role::Standard
    };
    let session = SessionContext::new(role, Some("vera".to_string()));
    let mut checkout = Checkout::new(catalog, session);

    let rows: Vec<ItemRow> = checkout
        .filter(&args.query)
        .map(|item| ItemRow {
            id: item.id.clone(),
            model: item.model.clone(),
            category: item.category.clone().unwrap_or_default(),
            price: item.price.to_string(),
        })
        .collect();

    println!("Matches for {:?}:\n{}", args.query, Table::new(&rows));

    let first = rows
        .first()
        .ok_or_else(|| anyhow!("no catalog item matches {:?}", args.query))?;
    let selected = first.id.clone();

    checkout.select_product(&selected);
    checkout.set_customer_name("Maria da Silva");
    checkout.set_customer_tax_id("12345678901");
    checkout.set_customer_phone("11912345678");
    checkout.set_discount_percent(args.discount);

    if let Some(tendered) = &args.tendered {
        checkout.set_payment_method("Dinheiro".parse::<PaymentMethod>()?);
        checkout.set_amount_tendered(tendered);
    } else {
        checkout.set_payment_method(PaymentMethod::Pix);
    }

    let totals = checkout.totals()?;

    println!(
        "\nSelected {selected}: base {}, discount {}% ({}), net {}",
        totals.base_price(),
        totals.discount_applied(),
        totals.discount_value(),
        totals.net_total(),
    );

    if checkout.discount_capped() {
        println!("note: the requested discount exceeds the role ceiling and was capped");
    }

    let mut host = PrintingHost;

    match checkout.submit(&mut host) {
        Ok(()) => {
            let change = totals.change_due();
            println!("change due: {change}");
        }
        Err(err) => println!("sale rejected: {err}"),
    }

    Ok(())
}
