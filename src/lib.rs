//! Baseball statistics service
//!
//! Stores position player and pitcher statistics in SQLite, bulk-loads them
//! from FanGraphs-style CSV exports and serves them over a JSON HTTP API.

pub mod config;
pub mod database;
pub mod errors;
pub mod ingestor;
pub mod models;
pub mod repositories;
pub mod web;
