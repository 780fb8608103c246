//! The shared engine: configuration, bundler and token cache.

use std::fmt;
use std::sync::Arc;

use crate::asset::{Bundler, MinifyBundler};
use crate::config::RequiresConfig;
use crate::registry::token::TokenCache;

/// Declares and resolves asset requirements.
///
/// One engine serves every request of a process; per-request state lives in
/// [`RequestContext`](crate::RequestContext).
///
/// # Example
///
/// ```ignore
/// let requires = Requires::new(RequiresConfig::default());
/// let mut ctx = RequestContext::new();
///
/// let head = requires.declare_files(&mut ctx, "default", &["site.css"])?;
/// let body = requires.declare_files(&mut ctx, "default", &["app.js"])?;
/// let html = format!("<html><head>{head}</head><body>{body}</body></html>");
///
/// let html = requires.resolve(&mut ctx, &html)?;
/// ```
pub struct Requires {
    config: Arc<RequiresConfig>,
    bundler: Option<Box<dyn Bundler>>,
    tokens: TokenCache,
}

impl Requires {
    /// Create an engine. With `[compress] enable = true` the built-in
    /// [`MinifyBundler`] is installed.
    pub fn new(config: RequiresConfig) -> Self {
        Self::from_shared(Arc::new(config))
    }

    /// Create an engine from an already shared config.
    pub fn from_shared(config: Arc<RequiresConfig>) -> Self {
        let bundler: Option<Box<dyn Bundler>> = if config.compress.enable {
            Some(Box::new(MinifyBundler::new(config.compress.minify)))
        } else {
            None
        };
        Self {
            config,
            bundler,
            tokens: TokenCache::new(),
        }
    }

    /// Replace the bundler used for compressible markup.
    ///
    /// Takes effect regardless of `[compress] enable`.
    pub fn with_bundler(mut self, bundler: impl Bundler + 'static) -> Self {
        self.bundler = Some(Box::new(bundler));
        self
    }

    /// Remove any bundler.
    pub fn without_bundler(mut self) -> Self {
        self.bundler = None;
        self
    }

    pub fn config(&self) -> &RequiresConfig {
        &self.config
    }

    pub(crate) fn bundler(&self) -> Option<&dyn Bundler> {
        self.bundler.as_deref()
    }

    pub(crate) fn tokens(&self) -> &TokenCache {
        &self.tokens
    }
}

impl Default for Requires {
    fn default() -> Self {
        Self::new(RequiresConfig::default())
    }
}

impl fmt::Debug for Requires {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Requires")
            .field("config", &self.config)
            .field("bundler", &self.bundler.is_some())
            .field("tokens", &self.tokens)
            .finish()
    }
}
