//! Client library for the BrontoBoard scheduling API.
//!
//! This crate is everything a BrontoBoard frontend needs short of rendering:
//! - `client` — HTTP transport to the remote API, with session injection
//! - `session` — the durable session-token slot (survives restarts)
//! - `store` — in-memory state stores (auth, board, calendar)
//!
//! Local collections in the stores are caches of server state, not the
//! source of truth.

pub mod client;
pub mod error;
pub mod model;
pub mod protocol;
pub mod session;
pub mod store;

pub use client::ApiClient;
pub use error::{BrontoError, BrontoResult};
pub use model::{Assignment, Board, Calendar, CalendarDay, Class, OfficeHours, User};
pub use session::SessionStore;
pub use store::{AuthState, AuthStore, BoardStore, CalendarStore};
