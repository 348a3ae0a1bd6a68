//! Open command - resolve an app path to its page

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;

use ecotrack_core::{OperationResult, Route};

use super::get_context;
use crate::output;

#[derive(Serialize)]
struct Resolved {
    route: Route,
    title: &'static str,
    /// Where the user actually lands after the login gate
    landing: Route,
    command: Option<&'static str>,
}

/// CLI command that renders a page
fn command_for(route: &Route) -> Option<&'static str> {
    match route {
        Route::Home => Some("eco status"),
        Route::Register => Some("eco register"),
        Route::Login => Some("eco login"),
        Route::ScanProduct => Some("eco scan <código>"),
        Route::Favorites => Some("eco favorites"),
        Route::Emissions => Some("eco emissions --year <año> --region <región>"),
        Route::NotFound(_) => None,
    }
}

pub fn run(path: &str, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let route = Route::from_path(path);
    let landing = if route.requires_session() && !ctx.session().is_authenticated() {
        Route::Login
    } else {
        route.clone()
    };
    let resolved = Resolved {
        title: route.title(),
        command: command_for(&landing),
        route,
        landing,
    };

    if json {
        let envelope = match &resolved.route {
            Route::NotFound(_) => OperationResult::fail(resolved.route.title()),
            _ => OperationResult::ok(resolved),
        };
        println!("{}", serde_json::to_string_pretty(&envelope)?);
        return Ok(());
    }

    if let Route::NotFound(path) = &resolved.route {
        output::error(&format!("{}: {}", resolved.title, path));
        let known: Vec<String> = Route::all().iter().map(|r| r.path().to_string()).collect();
        eprintln!("{}", format!("Páginas: {}", known.join(", ")).dimmed());
        std::process::exit(1);
    }

    println!("{}", resolved.title.bold());
    if resolved.landing != resolved.route {
        output::warning("Debes iniciar sesión para ver esta página.");
    }
    if let Some(command) = resolved.command {
        println!("{}", format!("Usa '{}'.", command).dimmed());
    }
    Ok(())
}
