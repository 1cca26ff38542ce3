//! Clipboard profiles: parsing, validation, persistence and signed links.
//!
//! Profiles are plain text files (`<name>.conf`) with one `<Key> <value>`
//! directive per line. Sizes accept binary unit suffixes (`10M`), durations
//! accept whole days (`7d`) or `h`/`m`/`s` composites (`1h30m`).

pub mod codec;
pub mod error;
pub mod link;
pub mod literal;
pub mod loader;
pub mod schema;
pub mod store;
pub mod validate;

pub use {
    codec::{RawConfig, load_config, load_raw_config, render_config},
    error::{Error, Result},
    literal::{LiteralError, format_duration, format_size, parse_duration, parse_size},
    loader::{load_config_from_file, write_file},
    schema::{Config, DEFAULT_PORT, collapse_server_addr, expand_server_addr},
    store::{ConfigStore, default_cert_file, default_key_file, extract_clipboard},
    validate::validate,
};
