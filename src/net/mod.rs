//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Configured bind address
//!     → listener.rs (parse, bind, report local address)
//!     → HttpServer::run (accept loop, one task per connection)
//! ```

pub mod listener;

pub use listener::{bind, ListenerError};
