//! Declare css/js requirements while a page renders, resolve them afterwards.
//!
//! Rendering code calls [`Requires::declare_files`] or
//! [`Requires::declare_block`] and embeds the returned placeholder tokens in
//! the page. Once the whole body exists, [`Requires::resolve`] strips the
//! tokens and inserts one bundle of `<link>`/`<script>` tags per group and
//! kind before the group's destination marker (`</head>`, `</body>`, ...).
//!
//! Per-request state lives in a [`RequestContext`] owned by the caller, so
//! nothing outlives the request that declared it.
//!
//! # Module Structure
//!
//! | Module     | Purpose                                              |
//! |------------|------------------------------------------------------|
//! | `asset`    | Asset kinds, requirements, paths, bundling           |
//! | `config`   | `requires.toml` loading and validation               |
//! | `registry` | Per-request context and placeholder tokens           |
//! | `template` | `{% requires %}` / `{% requireblock %}` directives   |
//! | `logger`   | `log!` / `debug!` macros                             |

pub mod asset;
pub mod config;
mod declare;
mod engine;
pub mod error;
pub mod logger;
pub mod registry;
mod resolve;
pub mod template;

pub use asset::{AssetKind, Bundler, MinifyBundler, Requirement};
pub use config::{MissingMarker, RequiresConfig};
pub use engine::Requires;
pub use error::{BoxError, RequiresError};
pub use registry::RequestContext;
pub use template::{TemplateError, expand};
