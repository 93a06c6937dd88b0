//! # CLI Module
//!
//! Command implementations behind the `spottobee` binary. The binary parses arguments and
//! hands over to one of these:
//!
//! - [`reconfigure`] - asks for every setting and rewrites the configuration file
//! - [`load_or_create`] - loads the configuration, creating it interactively when missing
//! - [`convert`] - converts each input (CSV file or playlist URL) in command-line order
//!
//! ## Input handling
//!
//! ```text
//! https://open.spotify.com/...  -> fetch tracks -> cover -> <name>.csv -> .xautopf
//! anything else (a CSV path)    ------------------------------------------> .xautopf
//! ```
//!
//! A playlist that cannot be fetched is reported and skipped. Missing API credentials stop
//! the remaining inputs, since every further URL would fail the same way. An input CSV
//! without the expected columns ends the run.
//!
//! The interactive prompts are written against `BufRead`/`Write` (see [`Prompter`]) so they
//! can be driven without a terminal.

mod configure;
mod convert;

pub use configure::Prompter;
pub use configure::load_or_create;
pub use configure::prompt_settings;
pub use configure::reconfigure;
pub use convert::convert;
pub use convert::convert_csv;
pub use convert::convert_remote;
