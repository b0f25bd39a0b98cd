//! This module handles conversion between tasks and their persisted text representation
//!
//! A document is an array of flat records, one per task:
//! ```text
//! [
//!   {
//!     "name": "Pay rent",
//!     "dueDate": "2025-03-01",
//!     "category": "BOULOT",
//!     "done": false,
//!     "urgent": false
//!   }
//! ]
//! ```
//! This is the format files written by earlier versions of this program used, which is why the parser also accepts
//! the string escapes they could contain, even though the builder only ever escapes `\` and `"`.

mod parser;
pub use parser::{decode, decode_list};
mod builder;
pub use builder::{encode, encode_list};

/// The only pattern due dates are written and read with (`yyyy-MM-dd`)
pub const DATE_FORMAT: &str = "%Y-%m-%d";
