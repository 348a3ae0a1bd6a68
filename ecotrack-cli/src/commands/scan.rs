//! Scan command - look up a product by barcode

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use ecotrack_core::domain::or_not_available;
use ecotrack_core::Product;

use super::{get_context, text_or_prompt, Deadline};
use crate::output;

#[derive(Serialize)]
struct ScanOutput {
    product: Product,
    /// Server confirmation when `--save` was given
    #[serde(skip_serializing_if = "Option::is_none")]
    saved: Option<String>,
}

pub async fn run(barcode: Option<String>, save: bool, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let barcode = text_or_prompt(barcode, "Código de barras")?;

    let mut scanner = ctx.product_scanner();
    let lookup = {
        let _deadline = Deadline::arm(
            scanner.view().cancellation_token(),
            ctx.config.request_timeout,
        );
        let spinner = output::spinner("Buscando producto...", json);
        let lookup = scanner.lookup(&barcode).await;
        spinner.finish_and_clear();
        lookup
    };

    let saved = match (&lookup, save) {
        (Ok(product), true) => {
            let mut favorites = ctx.favorites();
            let _deadline = Deadline::arm(
                favorites.action().cancellation_token(),
                ctx.config.request_timeout,
            );
            Some(favorites.add(&product.barcode).await)
        }
        _ => None,
    };

    if json {
        let result = lookup.and_then(|product| {
            Ok(ScanOutput {
                product,
                saved: saved.transpose()?,
            })
        });
        return output::print_envelope(result);
    }

    let product = lookup?;
    print_product(&product);

    match saved {
        Some(Ok(message)) => output::success(&message),
        Some(Err(e)) => {
            output::error(&e.to_string());
            std::process::exit(1);
        }
        None => {}
    }
    Ok(())
}

fn print_product(product: &Product) {
    println!("{}", product.name.bold());
    println!();

    let mut table = output::create_table();
    table.add_row(vec!["Código de barras", product.barcode.as_str()]);
    table.add_row(vec!["Nutri-Score", or_not_available(&product.nutriscore)]);
    table.add_row(vec!["Eco-Score", or_not_available(&product.ecoscore)]);
    table.add_row(vec!["Categoría", or_not_available(&product.category)]);
    println!("{}", table);
    println!();
}
