//! Status command - show the session and probe the API

use anyhow::Result;
use colored::Colorize;

use super::{get_context, Deadline};
use crate::output;

pub async fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let mut home = ctx.home();
    let _deadline = Deadline::arm(home.view().cancellation_token(), ctx.config.request_timeout);
    let spinner = output::spinner("Comprobando el servidor...", json);
    let result = home.load().await;
    spinner.finish_and_clear();

    if json {
        return output::print_envelope(result);
    }

    println!("{}", "Ecotrack".bold());
    println!();

    let mut table = output::create_table();
    let session = home.session();
    let user = match (session.display_name(), session.user_id()) {
        (Some(name), Some(id)) => format!("{} (id {})", name, id),
        _ => "Sin sesión".to_string(),
    };
    table.add_row(vec!["Usuario", user.as_str()]);
    table.add_row(vec!["Servidor", ctx.config.api_base_url.as_str()]);

    let server = match &result {
        Ok(loaded) => loaded
            .api_message
            .clone()
            .unwrap_or_else(|| "Disponible".to_string()),
        Err(e) => e.to_string(),
    };
    table.add_row(vec!["Estado", server.as_str()]);
    println!("{}", table);

    if result.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
