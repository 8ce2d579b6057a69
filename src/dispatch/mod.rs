//! Dispatch module for the polled chord loop
//!
//! Provides the debounced dispatcher and the retry helper it wraps
//! clipboard I/O in.

mod dispatcher;
mod retry;

pub use dispatcher::Dispatcher;
