//! Resolution pass: replace tokens with tags, once per response.

use std::borrow::Cow;

use rustc_hash::FxHashSet;

use crate::asset::{AssetKind, Requirement};
use crate::config::MissingMarker;
use crate::engine::Requires;
use crate::error::RequiresError;
use crate::registry::{GroupRequirements, RequestContext};
use crate::{debug, log};

/// Rendered tags of one (kind, group), split by bundling eligibility.
#[derive(Debug, Default)]
struct Bundle {
    compressible: String,
    remote: String,
}

impl Requires {
    /// Rewrite `html`: strip every token and insert the rendered tags before
    /// each group's destination marker.
    ///
    /// Empties `ctx`, so resolving the same context again returns the input
    /// unchanged.
    pub fn resolve(&self, ctx: &mut RequestContext, html: &str) -> Result<String, RequiresError> {
        if ctx.is_empty() {
            return Ok(html.to_string());
        }

        let mut html = html.to_string();
        for kind in AssetKind::ALL {
            for (group, reqs) in ctx.groups() {
                html = self.resolve_group(&html, kind, group, reqs)?;
            }
        }

        ctx.clear();
        Ok(html)
    }

    /// Middleware-style hook: resolve a response body and drop the context.
    ///
    /// Bodies that are not HTML pass through untouched.
    pub fn process_response(
        &self,
        mut ctx: RequestContext,
        content_type: Option<&str>,
        body: Vec<u8>,
    ) -> Result<Vec<u8>, RequiresError> {
        if ctx.is_empty() || !is_html(content_type) {
            return Ok(body);
        }
        let html = String::from_utf8_lossy(&body);
        let out = self.resolve(&mut ctx, &html)?;
        Ok(out.into_bytes())
    }

    fn resolve_group(
        &self,
        html: &str,
        kind: AssetKind,
        group: &str,
        reqs: &GroupRequirements,
    ) -> Result<String, RequiresError> {
        let asset = self.config().asset(kind);
        let pattern = self.tokens().get(kind, &asset.token, group)?;

        // Collect indices in text order while removing the tokens.
        let mut indices = Vec::new();
        let html = pattern.replace_all(html, |caps: &regex::Captures| {
            indices.push(caps["index"].to_string());
            ""
        });

        let bundle = self.render(kind, group, reqs.get(kind), &indices)?;
        let markup = self.finish(kind, bundle)?;
        if markup.is_empty() {
            return Ok(html.into_owned());
        }

        self.insert(html, kind, group, &markup)
    }

    /// Render each referenced requirement once, in token order.
    fn render(
        &self,
        kind: AssetKind,
        group: &str,
        list: &[Requirement],
        indices: &[String],
    ) -> Result<Bundle, RequiresError> {
        let dangling = |index: usize| RequiresError::DanglingToken {
            kind,
            group: group.to_string(),
            index,
        };

        let mut bundle = Bundle::default();
        let mut rendered = FxHashSet::default();
        for raw in indices {
            let index: usize = raw.parse().map_err(|_| dangling(usize::MAX))?;
            let requirement = list.get(index).ok_or_else(|| dangling(index))?;
            if !rendered.insert(index) {
                continue;
            }
            let tag = requirement.render(self.config());
            if requirement.is_compressible() {
                bundle.compressible.push_str(&tag);
            } else {
                bundle.remote.push_str(&tag);
            }
        }
        Ok(bundle)
    }

    /// Run the compressible part through the bundler; remote tags go first.
    fn finish(&self, kind: AssetKind, bundle: Bundle) -> Result<String, RequiresError> {
        let Bundle {
            compressible,
            mut remote,
        } = bundle;

        let compressible = match self.bundler() {
            Some(bundler) if !compressible.is_empty() => bundler
                .bundle(kind, &compressible)
                .map_err(|source| RequiresError::Bundle { kind, source })?,
            _ => compressible,
        };

        remote.push_str(&compressible);
        Ok(remote)
    }

    /// Insert `markup` before the first occurrence of the group's marker.
    fn insert(
        &self,
        html: Cow<'_, str>,
        kind: AssetKind,
        group: &str,
        markup: &str,
    ) -> Result<String, RequiresError> {
        let asset = self.config().asset(kind);
        let marker = asset.destination(group);
        let Some(pos) = marker.and_then(|m| html.find(m)) else {
            let err = match marker {
                Some(marker) => RequiresError::MissingMarker {
                    kind,
                    group: group.to_string(),
                    marker: marker.to_string(),
                },
                None => RequiresError::NoDestination {
                    kind,
                    group: group.to_string(),
                },
            };
            return match self.config().resolve.missing_marker {
                MissingMarker::Skip => Ok(html.into_owned()),
                MissingMarker::Warn => {
                    log!("warning"; "{}, dropping its tags", err);
                    Ok(html.into_owned())
                }
                MissingMarker::Error => Err(err),
            };
        };

        debug!("resolve"; "{} group `{}` inserted at byte {}", kind, group, pos);
        let mut out = String::with_capacity(html.len() + markup.len());
        out.push_str(&html[..pos]);
        out.push_str(markup);
        out.push_str(&html[pos..]);
        Ok(out)
    }
}

/// Whether a response of this content type should be rewritten.
///
/// A missing content type is treated as HTML.
fn is_html(content_type: Option<&str>) -> bool {
    content_type.is_none_or(|ct| {
        let mime = ct.split(';').next().unwrap_or(ct).trim();
        mime.eq_ignore_ascii_case("text/html") || mime.eq_ignore_ascii_case("application/xhtml+xml")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RequiresConfig;
    use crate::error::BoxError;

    fn page(head: &str, body: &str) -> String {
        format!("<html><head><title>t</title>{head}</head><body><p>hi</p>{body}</body></html>")
    }

    #[test]
    fn test_resolve_inserts_before_markers() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();

        let head = requires.declare_files(&mut ctx, "default", &["site.css"]).unwrap();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();

        let out = requires.resolve(&mut ctx, &page(&head, &body)).unwrap();
        assert_eq!(
            out,
            "<html><head><title>t</title>\t<link href='/static/css/site.css' rel='stylesheet'>\n</head>\
             <body><p>hi</p>\t<script src='/static/js/app.js'></script>\n</body></html>"
        );
    }

    #[test]
    fn test_scan_order_is_kept() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        requires
            .declare_files(&mut ctx, "default", &["zero.js", "one.js", "two.js"])
            .unwrap();

        let body = "@@@JS:default:2@@@<div>@@@JS:default:0@@@</div>@@@JS:default:1@@@";
        let out = requires.resolve(&mut ctx, &page("", body)).unwrap();

        let two = out.find("two.js").unwrap();
        let zero = out.find("zero.js").unwrap();
        let one = out.find("one.js").unwrap();
        assert!(two < zero && zero < one);
        assert!(!out.contains("@@@"));
        assert!(out.ends_with("<script src='/static/js/one.js'></script>\n</body></html>"));
        assert!(out.contains("<div></div>"));
    }

    #[test]
    fn test_duplicate_file_rendered_once() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let a = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();
        let b = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();

        let out = requires.resolve(&mut ctx, &page("", &format!("{a}{b}{a}"))).unwrap();
        assert_eq!(out.matches("app.js").count(), 1);
    }

    #[test]
    fn test_remote_tags_come_first() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let body = requires
            .declare_files(
                &mut ctx,
                "default",
                &["local.js", "https://cdn.example.com/lib.js"],
            )
            .unwrap();

        let out = requires.resolve(&mut ctx, &page("", &body)).unwrap();
        let remote = out.find("https://cdn.example.com/lib.js").unwrap();
        let local = out.find("/static/js/local.js").unwrap();
        assert!(remote < local);
    }

    #[test]
    fn test_bundler_sees_only_compressible() {
        let requires = Requires::default().with_bundler(
            |kind: AssetKind, markup: &str| -> Result<String, BoxError> {
                assert!(!markup.contains("cdn.example.com"));
                Ok(format!("<!-- {kind} bundle -->{}", markup.len()))
            },
        );
        let mut ctx = RequestContext::new();
        let body = requires
            .declare_files(&mut ctx, "default", &["a.js", "http://cdn.example.com/b.js"])
            .unwrap();

        let out = requires.resolve(&mut ctx, &page("", &body)).unwrap();
        assert!(out.contains("\t<script src='http://cdn.example.com/b.js'></script>\n<!-- js bundle -->"));
    }

    #[test]
    fn test_bundler_error_propagates() {
        let requires = Requires::default().with_bundler(
            |_: AssetKind, _: &str| -> Result<String, BoxError> { Err("boom".into()) },
        );
        let mut ctx = RequestContext::new();
        let body = requires.declare_files(&mut ctx, "default", &["a.js"]).unwrap();

        let err = requires.resolve(&mut ctx, &page("", &body)).unwrap_err();
        assert!(matches!(err, RequiresError::Bundle { kind: AssetKind::Js, .. }));
    }

    #[test]
    fn test_compress_minifies_blocks() {
        let mut config = RequiresConfig::default();
        config.compress.enable = true;
        let requires = Requires::new(config);
        let mut ctx = RequestContext::new();

        let head = requires
            .declare_block(&mut ctx, "default", "style", "base", "body {\n  margin: 0;\n}")
            .unwrap();
        let out = requires.resolve(&mut ctx, &page(&head, "")).unwrap();
        assert!(out.contains("\t<style>body{margin:0}</style>\n</head>"));
    }

    #[test]
    fn test_marker_survives_and_first_occurrence_used() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();

        let html = format!("<body>{body}</body><template></body></template>");
        let out = requires.resolve(&mut ctx, &html).unwrap();
        assert_eq!(
            out,
            "<body>\t<script src='/static/js/app.js'></script>\n</body><template></body></template>"
        );
    }

    #[test]
    fn test_resolve_is_process_once() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();
        let html = page("", &body);

        let first = requires.resolve(&mut ctx, &html).unwrap();
        assert!(first.contains("app.js"));
        assert!(ctx.is_empty());

        // the context is spent: the raw page comes back untouched
        let second = requires.resolve(&mut ctx, &html).unwrap();
        assert_eq!(second, html);
    }

    #[test]
    fn test_empty_context_is_noop() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let html = "<body>@@@JS:default:0@@@</body>";
        assert_eq!(requires.resolve(&mut ctx, html).unwrap(), html);
    }

    #[test]
    fn test_groups_go_to_their_markers() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let head = requires.declare_files(&mut ctx, "inhead", &["modernizr.js"]).unwrap();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();

        let out = requires.resolve(&mut ctx, &page(&head, &body)).unwrap();
        assert!(out.contains("modernizr.js'></script>\n</head>"));
        assert!(out.contains("app.js'></script>\n</body>"));
    }

    #[test]
    fn test_missing_marker_policies() {
        let fragment = |requires: &Requires| {
            let mut ctx = RequestContext::new();
            let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();
            requires.resolve(&mut ctx, &format!("<div>{body}</div>"))
        };

        let mut config = RequiresConfig::default();
        config.resolve.missing_marker = MissingMarker::Skip;
        assert_eq!(fragment(&Requires::new(config.clone())).unwrap(), "<div></div>");

        config.resolve.missing_marker = MissingMarker::Warn;
        assert_eq!(fragment(&Requires::new(config.clone())).unwrap(), "<div></div>");

        config.resolve.missing_marker = MissingMarker::Error;
        let err = fragment(&Requires::new(config)).unwrap_err();
        assert!(matches!(err, RequiresError::MissingMarker { ref marker, .. } if marker == "</body>"));
    }

    #[test]
    fn test_group_without_destination() {
        let mut config = RequiresConfig::default();
        config.resolve.missing_marker = MissingMarker::Error;
        let requires = Requires::new(config);
        let mut ctx = RequestContext::new();
        let head = requires.declare_files(&mut ctx, "inhead", &["print.css"]).unwrap();

        let err = requires.resolve(&mut ctx, &page(&head, "")).unwrap_err();
        assert!(matches!(
            err,
            RequiresError::NoDestination { kind: AssetKind::Css, ref group } if group == "inhead"
        ));
    }

    #[test]
    fn test_dangling_token() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();

        let err = requires
            .resolve(&mut ctx, "<body>@@@JS:default:5@@@</body>")
            .unwrap_err();
        assert!(matches!(err, RequiresError::DanglingToken { index: 5, .. }));
    }

    #[test]
    fn test_token_without_index_is_an_error() {
        let mut config = RequiresConfig::default();
        config.js.token = "@@@JS:<GROUP>@@@".into();
        let requires = Requires::new(config);
        let mut ctx = RequestContext::new();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();

        let err = requires.resolve(&mut ctx, &page("", &body)).unwrap_err();
        assert!(matches!(err, RequiresError::TokenSlot { kind: AssetKind::Js, .. }));
    }

    #[test]
    fn test_process_response() {
        let requires = Requires::default();

        let mut ctx = RequestContext::new();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();
        let html = page("", &body);
        let out = requires
            .process_response(ctx, Some("text/html; charset=utf-8"), html.clone().into_bytes())
            .unwrap();
        assert!(String::from_utf8(out).unwrap().contains("/static/js/app.js"));

        let mut ctx = RequestContext::new();
        let body = requires.declare_files(&mut ctx, "default", &["app.js"]).unwrap();
        let json = format!("{{\"html\": \"{body}\"}}");
        let out = requires
            .process_response(ctx, Some("application/json"), json.clone().into_bytes())
            .unwrap();
        assert_eq!(out, json.into_bytes());
    }

    #[test]
    fn test_is_html() {
        assert!(is_html(None));
        assert!(is_html(Some("text/html")));
        assert!(is_html(Some("TEXT/HTML; charset=utf-8")));
        assert!(!is_html(Some("text/css")));
        assert!(!is_html(Some("application/json")));
    }
}
