//! Client session state and the route guard built on it.
//!
//! The session is a plain flag plus the user and token handed out at login;
//! nothing here verifies the token.

pub mod auth;
pub mod routes;

pub use auth::{AuthState, StoredSession, User};
pub use routes::{
    Access, LOGIN_PATH, PRODUCTS_PATH, Route, RouteDecision, guard, page_param, products_page_path,
};
