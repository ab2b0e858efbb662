//! Chat front end for the mercboard commission backend.
//!
//! Exposes the command dispatcher, the chat-gateway boundary, the
//! connection state, and the operator health surface so integration tests
//! and the binary entrypoint can both access them.  The chat platform SDK
//! itself stays outside this crate: it resolves the acting identity, builds
//! a [`command::Command`], and hands both to the dispatcher through the
//! [`adapter`] boundary.

pub mod adapter;
pub mod command;
pub mod config;
pub mod dispatcher;
pub mod gateway;
pub mod reply;
pub mod routes;
pub mod state;
