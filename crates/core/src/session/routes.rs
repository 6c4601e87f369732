//! Route table and access guard.

use tracing::debug;

use super::auth::AuthState;

/// Login page; anonymous users are sent here.
pub const LOGIN_PATH: &str = "/";

/// Product list; signed-in users are sent here.
pub const PRODUCTS_PATH: &str = "/products";

/// A page of the admin front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/`
    Login,
    /// `/register`
    Register,
    /// `/products`
    ProductList,
    /// `/products/create`
    ProductCreate,
    /// `/products/:id`
    ProductView(String),
    /// `/products/:id/edit`
    ProductEdit(String),
    /// Anything else.
    NotFound,
}

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Only signed-out users (login, registration).
    PublicOnly,
    /// Only signed-in users.
    Protected,
    /// Everyone.
    Open,
}

/// Outcome of guarding a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Show the page.
    Render,
    /// Navigate to the given path instead.
    Redirect(&'static str),
}

impl Route {
    /// Matches a browser path. Query strings and fragments are ignored, as
    /// are repeated or trailing slashes.
    #[must_use]
    pub fn resolve(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Self::Login,
            ["register"] => Self::Register,
            ["products"] => Self::ProductList,
            ["products", "create"] => Self::ProductCreate,
            ["products", id] => Self::ProductView((*id).to_string()),
            ["products", id, "edit"] => Self::ProductEdit((*id).to_string()),
            _ => Self::NotFound,
        }
    }

    /// Canonical path of the route, `None` for [`Route::NotFound`].
    #[must_use]
    pub fn path(&self) -> Option<String> {
        match self {
            Self::Login => Some(LOGIN_PATH.to_string()),
            Self::Register => Some("/register".to_string()),
            Self::ProductList => Some(PRODUCTS_PATH.to_string()),
            Self::ProductCreate => Some(format!("{PRODUCTS_PATH}/create")),
            Self::ProductView(id) => Some(format!("{PRODUCTS_PATH}/{id}")),
            Self::ProductEdit(id) => Some(format!("{PRODUCTS_PATH}/{id}/edit")),
            Self::NotFound => None,
        }
    }

    /// Access rule for the route.
    #[must_use]
    pub const fn access(&self) -> Access {
        match self {
            Self::Login | Self::Register => Access::PublicOnly,
            Self::ProductList
            | Self::ProductCreate
            | Self::ProductView(_)
            | Self::ProductEdit(_) => Access::Protected,
            Self::NotFound => Access::Open,
        }
    }
}

/// Zero-based list page from the `page` query parameter of `path`.
///
/// Leading digits are read and anything after them ignored; a missing,
/// negative or unreadable value is page 0.
#[must_use]
pub fn page_param(path: &str) -> usize {
    let path = path.split('#').next().unwrap_or_default();
    let Some((_, query)) = path.split_once('?') else {
        return 0;
    };

    let Some(value) = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(key, value)| (key == "page").then_some(value))
    else {
        return 0;
    };

    let value = value.trim_start();
    let value = value.strip_prefix('+').unwrap_or(value);
    let digits: String = value.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Path of a product list page, as written back to the address bar.
#[must_use]
pub fn products_page_path(page: usize) -> String {
    format!("{PRODUCTS_PATH}?page={page}")
}

/// Decides whether `route` renders for the current session.
#[must_use]
pub fn guard(route: &Route, auth: &AuthState) -> RouteDecision {
    let decision = match (route.access(), auth.is_authenticated()) {
        (Access::PublicOnly, true) => RouteDecision::Redirect(PRODUCTS_PATH),
        (Access::Protected, false) => RouteDecision::Redirect(LOGIN_PATH),
        _ => RouteDecision::Render,
    };

    if let RouteDecision::Redirect(to) = decision {
        debug!(?route, to, "navigation redirected");
    }
    decision
}
