//! Built-in bundler: minifies inline blocks.
//!
//! Uses oxc for JavaScript and lightningcss for CSS. File tags pass through
//! unchanged, as do blocks that fail to parse.

use std::sync::LazyLock;

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::parser::Parser;
use oxc::span::SourceType;
use regex::{Captures, Regex};

use super::{AssetKind, Bundler};
use crate::debug;
use crate::error::BoxError;

static STYLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<style>(.*?)</style>").unwrap());
static SCRIPT_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<script>(.*?)</script>").unwrap());

/// Minify JavaScript source code.
///
/// Whitespace and comments only: inline scripts share the page's global
/// scope, so names are never mangled and nothing is tree-shaken.
pub fn minify_js(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
    if !ret.errors.is_empty() {
        return None;
    }
    let code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .build(&ret.program)
        .code;
    Some(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Option<String> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default()).ok()?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .ok()?;
    Some(result.code)
}

fn minify_block(kind: AssetKind, source: &str) -> Option<String> {
    match kind {
        AssetKind::Css => minify_css(source),
        AssetKind::Js => minify_js(source),
    }
}

/// Bundler that minifies the bodies of inline `<style>`/`<script>` blocks.
#[derive(Debug, Clone, Copy)]
pub struct MinifyBundler {
    minify: bool,
}

impl MinifyBundler {
    pub const fn new(minify: bool) -> Self {
        Self { minify }
    }
}

impl Default for MinifyBundler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Bundler for MinifyBundler {
    fn bundle(&self, kind: AssetKind, markup: &str) -> Result<String, BoxError> {
        if !self.minify {
            return Ok(markup.to_string());
        }
        let (pattern, open, close) = match kind {
            AssetKind::Css => (&*STYLE_BLOCK, "<style>", "</style>"),
            AssetKind::Js => (&*SCRIPT_BLOCK, "<script>", "</script>"),
        };
        let out = pattern.replace_all(markup, |caps: &Captures| {
            match minify_block(kind, &caps[1]) {
                Some(min) => format!("{open}{min}{close}"),
                None => {
                    debug!("bundle"; "left unparseable {} block as-is", kind);
                    caps[0].to_string()
                }
            }
        });
        Ok(out.into_owned())
    }
}
