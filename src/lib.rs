//! Backend for the ore tracking dashboard: chart-ready mock data for
//! stockpile filling, mill feed and throughput, process delays, and
//! database connection settings.

pub mod chart;
pub mod config;
pub mod routes;
pub mod series;
pub mod services;
pub mod state;
pub mod views;
