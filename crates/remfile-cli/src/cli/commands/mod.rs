//! CLI command handlers, one per file.

mod cat;
mod hash;
mod resolve;
mod unzip;
mod validate;

pub use cat::run_cat;
pub use hash::run_hash;
pub use resolve::run_resolve;
pub use unzip::run_unzip;
pub use validate::run_validate;
