//! Logout command - forget the stored session

use anyhow::Result;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;
    let was_logged_in = ctx.session().is_authenticated();
    let result = ctx.login().logout();

    if json {
        return output::print_envelope(result);
    }

    result?;
    if was_logged_in {
        output::success("Sesión cerrada.");
    } else {
        output::info("No había ninguna sesión iniciada.");
    }
    Ok(())
}
