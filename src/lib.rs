// src/lib.rs

//! Linkhub Crawler Library
//!
//! Scrapes forum boards, skips posts it has already handled, and registers
//! what is new with the linkhub API.

pub mod error;
pub mod extract;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
