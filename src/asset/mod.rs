//! Asset requirements: kinds, path resolution, rendering and bundling.

mod bundle;
mod kind;
pub mod minify;
pub mod path;
mod requirement;

pub use bundle::Bundler;
pub use kind::AssetKind;
pub use minify::MinifyBundler;
pub use requirement::Requirement;
