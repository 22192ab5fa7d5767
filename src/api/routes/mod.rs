//! API Routes
//!
//! Route handlers organized by functionality.

pub mod health;
pub mod leaderboards;
pub mod players;
pub mod seasons;
pub mod teams;
