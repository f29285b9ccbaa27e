//! API Routes
//!
//! Route handlers organized by collection.

pub mod goals;
pub mod habits;
pub mod health;
pub mod journal;
pub mod summary;
pub mod tasks;
