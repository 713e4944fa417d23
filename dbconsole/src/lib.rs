//! dbconsole library
//!
//! A simulated database console: a login form, record operation forms and
//! an activity log, backed by an in-memory store behind artificial latency.

pub mod app;
pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod services;
pub mod storage;
pub mod ui;
