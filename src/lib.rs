#![doc(test(attr(deny(warnings))))]

//! RupeeWise keeps a personal income and expense ledger split across a Home
//! and a School context, with summaries, report exports and optional
//! AI-generated spending advice.

pub mod advice;
pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod report;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("RupeeWise tracing initialized.");
    });
}
