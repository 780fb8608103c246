//! Configuration section definitions.
//!
//! Each module corresponds to a section in `requires.toml`:
//!
//! | Module       | TOML Section          | Purpose                              |
//! |--------------|-----------------------|--------------------------------------|
//! | `site`       | `[site]`              | Static asset root                    |
//! | `asset_type` | `[css]`, `[js]`       | Templates, tokens, paths, markers    |
//! | `compress`   | `[compress]`          | Bundling of compressible assets      |
//! | `resolve`    | `[resolve]`           | Resolution pass policies             |

mod asset_type;
mod compress;
mod resolve;
mod site;

pub use asset_type::{AssetTypeConfig, AssetTypeFields, URL_SLOT};
pub use compress::CompressConfig;
pub use resolve::{MissingMarker, ResolveConfig};
pub use site::SiteConfig;
