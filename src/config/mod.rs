//! User configuration.
//!
//! Consolidates configuration from tiers with field-by-field YAML merging:
//! 1. **Defaults** - built into [`Config::default`]
//! 2. **Project** - `$CWD/quant-theme/config.yaml`
//! 3. **User** - `~/.quant-theme/config.yaml`
//! 4. **Environment** - variables listed below
//!
//! ## Environment Variables
//! - `QUANT_THEME_CONFIG_PATH` - Explicit config file (replaces project and user tiers)
//! - `QUANT_THEME_USER_DIR` - User config dir (default: `~/.quant-theme`)
//! - `QUANT_THEME_PROJECT_DIR` - Project config dir (default: `./quant-theme`)
//! - `QUANT_THEME_THEME` - Default theme
//! - `QUANT_THEME_OUTPUT` - Default output format (`json` or `yaml`)

mod loader;
mod merge;
mod types;

pub use loader::{CONFIG_FILE_NAME, ConfigLoader, ConfigPaths, ConfigTier};
pub use merge::{deep_merge, deep_merge_all, update};
pub use types::*;
