//! Nectar Application - command routing and request execution
//!
//! This crate holds the command router, the wire protocol it speaks
//! with the rendering surface, the selection transition rules, and the
//! request executor. External capabilities (storage, HTTP transport,
//! name prompting, the view) are reached through the port traits in
//! [`ports`].

pub mod error;
pub mod execute_request;
pub mod ports;
pub mod protocol;
pub mod router;
pub mod selection;

pub use error::{ApplicationError, ApplicationResult};
pub use execute_request::{RequestExecutor, SendInput};
pub use protocol::{Command, ViewPush};
pub use router::Router;
pub use selection::{Selection, SelectionDirective, SelectionUpdate};
