//! Emissions command - CO2 totals per region and year

use anyhow::Result;
use colored::Colorize;
use dialoguer::Select;

use ecotrack_core::services::AVAILABLE_YEARS;
use ecotrack_core::EmissionsQuery;

use super::{get_context, interactive, text_or_prompt, Deadline};
use crate::output;

pub async fn run(year: Option<String>, region: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let year = match year {
        Some(y) => y,
        None if interactive() => {
            let idx = Select::new()
                .with_prompt("Año")
                .items(&AVAILABLE_YEARS)
                .default(0)
                .interact()?;
            AVAILABLE_YEARS[idx].to_string()
        }
        None => String::new(),
    };
    let region = text_or_prompt(region, "Región")?;
    let query = EmissionsQuery::new(year, region);

    let mut controller = ctx.emissions();
    let _deadline = Deadline::arm(
        controller.view().cancellation_token(),
        ctx.config.request_timeout,
    );
    let spinner = output::spinner("Consultando emisiones...", json);
    let result = controller.query(&query).await;
    spinner.finish_and_clear();

    if json {
        return output::print_envelope(result);
    }

    let record = result?;
    println!(
        "{}",
        format!("Emisiones de CO2 en {} ({})", record.region, record.year).bold()
    );
    println!();

    let mut table = output::create_table();
    let total = record.total_or_no_data();
    table.add_row(vec!["Total", total.as_str()]);
    if let Some(source) = &record.source {
        table.add_row(vec!["Fuente", source.as_str()]);
    }
    println!("{}", table);
    Ok(())
}
