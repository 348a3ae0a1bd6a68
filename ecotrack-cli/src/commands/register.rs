//! Register command - create an account

use anyhow::Result;
use colored::Colorize;

use ecotrack_core::RegistrationForm;

use super::{get_context, password_or_prompt, text_or_prompt, Deadline};
use crate::output;

pub async fn run(
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    json: bool,
) -> Result<()> {
    let ctx = get_context()?;
    let form = RegistrationForm::new(
        text_or_prompt(username, "Nombre de usuario")?,
        text_or_prompt(email, "Email")?,
        password_or_prompt(password)?,
    );

    let mut controller = ctx.register();
    let _deadline = Deadline::arm(
        controller.view().cancellation_token(),
        ctx.config.request_timeout,
    );
    let spinner = output::spinner("Registrando...", json);
    let result = controller.submit(&form).await;
    spinner.finish_and_clear();

    if json {
        return output::print_envelope(result);
    }

    let registered = result?;
    output::success(
        registered
            .message
            .as_deref()
            .unwrap_or("Usuario registrado exitosamente."),
    );
    println!(
        "{}",
        format!("Inicia sesión con 'eco login' ({}).", registered.next).dimmed()
    );
    Ok(())
}
