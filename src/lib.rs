//! This crate manages a personal to-do list, persisted to a single file.
//!
//! A [`TaskList`] holds [`Task`]s, and presents them urgent ones first, then by due date.
//!
//! The [`codec`] module converts tasks to and from their text representation, and the [`persistence`] module stores
//! this representation into a file, optionally encrypted with a passphrase (see [`crypto`]). \
//! Front ends only need these public operations, and the [`Settings`](config::Settings) they are configured with.

mod error;
pub use error::{DecodeError, Error, Result};

mod category;
pub use category::Category;
mod task;
pub use task::Task;
mod task_list;
pub use task_list::TaskList;

pub mod codec;
pub mod crypto;
pub mod persistence;
pub use persistence::PersistenceService;

pub mod config;
pub use config::Settings;
pub mod utils;
