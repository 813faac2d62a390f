//! Account registry and login service for keygate.
//!
//! This crate is the first consumer of [`keygate_credential`]: it keeps
//! registered accounts in process memory, authenticates them through the
//! credential manager, limits login attempts per principal, and resolves
//! bearer tokens back to accounts. It deliberately stops short of HTTP
//! routing and durable persistence — those belong to the surrounding
//! application.

mod account;
mod error;
mod limiter;
mod service;
mod store;

pub use account::Account;
pub use error::{AccountError, AccountResult};
pub use limiter::LoginRateLimiter;
pub use service::AuthService;
pub use store::AccountStore;
