//! Configuration for frontplate.
//!
//! The only configuration file is the user's `config.toml`:
//!
//! - `global` - the [`Config`] structure, its location and loading rules
//! - `parser` - generic TOML parsing with path-aware errors
//!
//! # Location
//!
//! 1. `--config <path>` on the command line
//! 2. `FRONTPLATE_CONFIG` environment variable
//! 3. `~/.frontplate/config.toml`
//!
//! # Example
//!
//! ```rust,no_run
//! use frontplate::config::Config;
//! use frontplate::templating::TemplatesDirProvider;
//!
//! let config = Config::load()?.with_vault("/home/sam/notes");
//! if let Some(dir) = config.templates_dir() {
//!     println!("Templates live in {}", dir.display());
//! }
//! # Ok::<(), frontplate::core::FrontplateError>(())
//! ```

mod global;
mod parser;

pub use global::{CONFIG_ENV_VAR, Config};
pub use parser::parse_config;
