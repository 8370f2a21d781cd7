//! In-memory state stores mediating between a frontend and the remote API.
//!
//! Every store action follows the same pattern: validate preconditions,
//! clear the error and flag loading, call the transport, reconcile the
//! local collections with the server's answer, clear the loading flag,
//! then surface success or failure. Loads replace collections wholesale;
//! creates and deletes adjust them incrementally.
//!
//! `error` and `is_loading` are shared per store instance, not per
//! operation. Methods take `&mut self`, so two operations cannot overlap
//! on one instance; callers juggling several instances over the same
//! durable token slot get last-writer-wins on that slot.

mod auth;
mod board;
mod calendar;

pub use auth::{AuthState, AuthStore};
pub use board::BoardStore;
pub use calendar::CalendarStore;
