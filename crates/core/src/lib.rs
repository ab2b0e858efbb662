//! Domain model for the mercboard commission marketplace.
//!
//! Everything in this crate is pure: types, the commission and karma-report
//! state machines, the authorization guard, and input validation.  All I/O
//! (the backend HTTP contract, the chat platform, the health surface) lives
//! in the `mercboard-client` and `mercboard-bot` crates.

pub mod commission;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod report;
pub mod settings;
pub mod stats;

pub use commission::{Commission, CommissionStatus, CommissionType, UserRef};
pub use error::CoreError;
pub use identity::ActingIdentity;
pub use lifecycle::CommissionAction;
pub use report::{KarmaReport, ReportStatus, ReportType};
