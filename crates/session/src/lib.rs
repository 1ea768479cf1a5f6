//! Session crate for the 5-digit combination sieve.
//!
//! This crate contains the session value that coordinates generation, the
//! core filter stage, rule compilation, ranking, sequential elimination,
//! and the optional external trap-ranking hook.

pub mod session;

pub use session::{Session, SessionRequest};
