//! Embedded skeleton and built-in themes.
//!
//! Both are YAML assets compiled into the binary from `./config/`. Every
//! getter parses a fresh copy, so callers may mutate the result freely.

mod skeleton;
mod themes;

pub use skeleton::get_skeleton;
pub use themes::{get_theme, get_themes};
