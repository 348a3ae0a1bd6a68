//! Favorites command - list, add and remove saved products

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use ecotrack_core::domain::or_not_available;
use ecotrack_core::services::{FavoritesController, RemoveOutcome};

use super::{get_context, text_or_prompt, Deadline, PromptConfirmer};
use crate::output;

#[derive(Subcommand)]
pub enum FavoritesCommands {
    /// List saved products
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Save a product by barcode
    Add {
        barcode: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a saved product
    Remove {
        barcode: Option<String>,
        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub async fn run(command: Option<FavoritesCommands>) -> Result<()> {
    let ctx = get_context()?;
    let mut favorites = ctx.favorites();
    let _deadline = Deadline::arm(
        favorites.list().cancellation_token(),
        ctx.config.request_timeout,
    );

    match command.unwrap_or(FavoritesCommands::List { json: false }) {
        FavoritesCommands::List { json } => {
            let spinner = output::spinner("Cargando favoritos...", json);
            let result = favorites.load().await;
            spinner.finish_and_clear();

            if json {
                return output::print_envelope(result);
            }
            result?;
            print_list(&favorites);
        }
        FavoritesCommands::Add { barcode, json } => {
            let barcode = text_or_prompt(barcode, "Código de barras")?;
            let _deadline = Deadline::arm(
                favorites.action().cancellation_token(),
                ctx.config.request_timeout,
            );
            let spinner = output::spinner("Guardando...", json);
            let result = favorites.add(&barcode).await;
            spinner.finish_and_clear();

            if json {
                return output::print_envelope(result);
            }
            output::success(&result?);
        }
        FavoritesCommands::Remove {
            barcode,
            force,
            json,
        } => {
            let barcode = text_or_prompt(barcode, "Código de barras")?;
            let confirmer = PromptConfirmer { force: force || json };
            let _deadline = Deadline::arm(
                favorites.action().cancellation_token(),
                ctx.config.request_timeout,
            );
            let result = favorites.remove(&barcode, &confirmer).await;

            if json {
                return output::print_envelope(result);
            }
            match result? {
                RemoveOutcome::Removed { message } => output::success(&message),
                RemoveOutcome::Declined => println!("{}", "Cancelado".dimmed()),
            }
        }
    }

    Ok(())
}

fn print_list(favorites: &FavoritesController) {
    let entries = favorites.entries();
    if entries.is_empty() {
        output::info("No tienes productos favoritos guardados.");
        return;
    }

    let title = match favorites.session().display_name() {
        Some(name) => format!("Favoritos de {}", name),
        None => "Favoritos".to_string(),
    };
    println!("{}", title.bold());
    println!();

    let mut table = output::create_table();
    table.set_header(vec![
        "Código de barras",
        "Nombre",
        "Nutri-Score",
        "Eco-Score",
        "Categoría",
    ]);
    for entry in entries {
        table.add_row(vec![
            entry.barcode.as_str(),
            entry.name.as_str(),
            or_not_available(&entry.nutriscore),
            or_not_available(&entry.ecoscore),
            or_not_available(&entry.category),
        ]);
    }
    println!("{}", table);
}
