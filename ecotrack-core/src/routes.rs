//! Navigable routes
//!
//! Controllers name the page to show next with a `Route`; front ends map
//! routes to whatever rendering they do.

use std::fmt;

use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page, `/`
    Home,
    Register,
    Login,
    ScanProduct,
    Favorites,
    Emissions,
    /// Anything else, with the path that was asked for
    NotFound(String),
}

impl Route {
    /// Resolve a path. Query strings, fragments and trailing slashes are ignored.
    pub fn from_path(path: &str) -> Self {
        let bare = path.split(&['?', '#'][..]).next().unwrap_or("");
        let trimmed = bare.trim_end_matches('/');

        match trimmed {
            "" => Route::Home,
            "/register" => Route::Register,
            "/login" => Route::Login,
            "/scan-product" => Route::ScanProduct,
            "/favorites" => Route::Favorites,
            "/emissions" => Route::Emissions,
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Register => "/register",
            Route::Login => "/login",
            Route::ScanProduct => "/scan-product",
            Route::Favorites => "/favorites",
            Route::Emissions => "/emissions",
            Route::NotFound(path) => path,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Bienvenido a Ecotrack",
            Route::Register => "Registrarse en Ecotrack",
            Route::Login => "Iniciar Sesión en Ecotrack",
            Route::ScanProduct => "Escanear o Buscar Producto",
            Route::Favorites => "Mis Productos Favoritos",
            Route::Emissions => "Consulta de Emisiones de CO2",
            Route::NotFound(_) => "Página no encontrada",
        }
    }

    /// Views that refuse to load without a session
    pub fn requires_session(&self) -> bool {
        matches!(self, Route::ScanProduct | Route::Favorites)
    }

    /// Every known route, in navigation order
    pub fn all() -> [Route; 6] {
        [
            Route::Home,
            Route::Register,
            Route::Login,
            Route::ScanProduct,
            Route::Favorites,
            Route::Emissions,
        ]
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.path())
    }
}
