//! Login command - start a session

use anyhow::Result;

use ecotrack_core::LoginForm;

use super::{get_context, password_or_prompt, text_or_prompt, Deadline};
use crate::output;

pub async fn run(username: Option<String>, password: Option<String>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let form = LoginForm::new(
        text_or_prompt(username, "Nombre de usuario")?,
        password_or_prompt(password)?,
    );

    let mut controller = ctx.login();
    let _deadline = Deadline::arm(
        controller.view().cancellation_token(),
        ctx.config.request_timeout,
    );
    let spinner = output::spinner("Iniciando sesión...", json);
    let result = controller.submit(&form).await;
    spinner.finish_and_clear();

    if json {
        return output::print_envelope(result);
    }

    let logged_in = result?;
    let name = logged_in.session.display_name().unwrap_or(form.username.as_str());
    output::success(&format!("Bienvenido, {}.", name));
    Ok(())
}
