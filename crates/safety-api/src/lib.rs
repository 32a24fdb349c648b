pub mod admin;
pub mod auth;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod location;
pub mod middleware;
pub mod routes;
pub mod sos;
pub mod state;
pub mod submissions;

pub use error::ApiError;
pub use routes::router;
pub use state::{AppState, AppStateInner};
