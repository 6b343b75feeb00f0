//! Quant Theme Library
//!
//! Theming and templating for financial charts: a named theme and user
//! overrides are merged onto a base skeleton to produce a configuration a
//! plotting library can consume directly.

pub mod cli;
pub mod config;
pub mod error;
pub mod figure;
pub mod format;
pub mod logging;
pub mod options;
pub mod template;
pub mod theming;

pub use error::{ErrorCode, ThemeError, ThemeResult};
pub use figure::{Figure, get_base_layout, strip_figure};
pub use options::{Hovermode, Legend, TemplateOptions, ThemeSpec};
pub use template::{Template, get_template, make_additions, make_colors, make_layout, make_traces};
pub use theming::{get_skeleton, get_theme, get_themes};
