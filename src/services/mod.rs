//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own the dashboard data and the session store so route
//! handlers can stay focused on query parsing and status mapping.

pub mod database;
pub mod mill;
pub mod process;
pub mod session;
pub mod stockpile;
