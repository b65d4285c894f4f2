//! Windows command-line quoting.
//!
//! [`quote`](quote::quote) joins an argument vector into the single string a
//! Windows process is created with, escaped so that the child's C runtime
//! splits it back into the same arguments. [`split`](split::split) is that
//! splitting rule. [`Launch`] carries the command line and the console
//! detachment decision to [`spawn`](spawn::spawn).

pub mod config;
pub mod error;
pub mod launch;
pub mod name;
pub mod quote;
pub mod spawn;
pub mod split;

pub use error::LaunchError;
pub use launch::{should_detach, Launch, Prepared, Stdio, DETACHED_PROCESS};
pub use name::display_name;
pub use quote::{quote, quote_arg};
pub use split::split;
