//! orderscan - patient order management with PDF identity extraction.
//!
//! Orders (patient name and date of birth) are kept in SQLite behind an HTTP
//! API with an audit trail. Orders can also be created from an uploaded PDF:
//! the extraction pipeline reads embedded text, falls back to OCR for
//! scanned pages and recovers the patient's identity heuristically.

pub mod cli;
pub mod config;
pub mod extraction;
pub mod models;
pub mod ocr;
pub mod repository;
pub mod schema;
pub mod server;
pub mod services;
