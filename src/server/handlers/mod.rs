//! HTTP request handlers for the web server.

mod errors;
mod logs;
mod orders;
mod upload;

pub use logs::{health, list_logs};
pub use orders::{create_order, delete_order, get_order, list_orders, update_order};
pub use upload::upload_pdf;
