// Authentication module
// Credential login, JWT issuance/verification, bearer-token middleware
// and login rate limiting

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod rate_limit;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::login_handler;
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, LoginResponse, User};
pub use rate_limit::{LoginRateLimiter, RateDecision};
pub use service::AuthService;
