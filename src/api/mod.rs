pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;


pub use error::{ApiError, ValidationIssue};
pub use routes::create_router;
pub use server::start_api_server;
pub use state::AppState;
