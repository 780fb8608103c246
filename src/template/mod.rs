//! Template directives that declare requirements.
//!
//! Expands two directives in template text, standing in for the template
//! tags of the surrounding web framework:
//!
//! ```text
//! {% requires [group] file.js other.css ... %}
//! {% requireblock script|style name=<id> [group=<group>] %} ... {% endrequireblock %}
//! ```
//!
//! For `requires`, the first argument is a group name when it has no `.`.
//! Each directive is replaced by its contribution: placeholder tokens, or for
//! incremental requests the rendered block.

mod args;

pub use args::TagArgs;

use std::sync::LazyLock;

use regex::{Captures, Regex};
use thiserror::Error;

use crate::engine::Requires;
use crate::error::RequiresError;
use crate::log;
use crate::registry::RequestContext;

/// Group used when a directive names none.
pub const DEFAULT_GROUP: &str = "default";

static DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)\{%\s*requireblock\b(?P<block_args>.*?)%\}(?P<body>.*?)\{%\s*endrequireblock\s*%\}|\{%\s*requires\b(?P<args>.*?)%\}",
    )
    .unwrap()
});

/// Errors raised while expanding directives.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("line {line}: {source}")]
    Requires {
        line: usize,
        #[source]
        source: RequiresError,
    },
}

/// A parsed directive.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Directive<'a> {
    Files {
        group: String,
        files: Vec<String>,
    },
    Block {
        group: String,
        blocktype: String,
        name: String,
        content: &'a str,
    },
}

impl Directive<'_> {
    /// Short description used when no request context is bound.
    fn describe(&self) -> String {
        match self {
            Self::Files { files, .. } => files.join(" "),
            Self::Block {
                blocktype, name, ..
            } => format!("{blocktype} block `{name}`"),
        }
    }
}

/// Expand every directive in `source`.
///
/// Without a request context each directive is logged and contributes
/// nothing; syntax and declaration errors are returned with their line.
pub fn expand(
    requires: &Requires,
    mut ctx: Option<&mut RequestContext>,
    source: &str,
) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;

    for caps in DIRECTIVE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        let line = line_of(source, whole.start());
        out.push_str(&source[last..whole.start()]);
        last = whole.end();

        let directive = parse(&caps, line)?;
        let Some(ctx) = ctx.as_deref_mut() else {
            log!("error"; "line {}: no request context bound, ignoring {}", line, directive.describe());
            continue;
        };

        let contribution = match directive {
            Directive::Files { group, files } => {
                requires.declare_files(ctx, &group, files.as_slice())
            }
            Directive::Block {
                group,
                blocktype,
                name,
                content,
            } => requires.declare_block(ctx, &group, &blocktype, &name, content),
        }
        .map_err(|source| TemplateError::Requires { line, source })?;
        out.push_str(&contribution);
    }

    out.push_str(&source[last..]);
    Ok(out)
}

fn parse<'a>(caps: &Captures<'a>, line: usize) -> Result<Directive<'a>, TemplateError> {
    let syntax = |message: String| TemplateError::Syntax { line, message };

    if let Some(raw) = caps.name("args") {
        let mut files: Vec<String> = raw
            .as_str()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        if files.is_empty() {
            return Err(syntax("`requires` needs at least one file".into()));
        }
        let group = if files[0].contains('.') {
            DEFAULT_GROUP.to_string()
        } else {
            files.remove(0)
        };
        if files.is_empty() {
            return Err(syntax(format!("`requires {group}` needs at least one file")));
        }
        return Ok(Directive::Files { group, files });
    }

    let raw = caps.name("block_args").map_or("", |m| m.as_str());
    let content = caps.name("body").map_or("", |m| m.as_str());
    let args = TagArgs::parse(raw);

    let Some(blocktype) = args.positional().first() else {
        return Err(syntax(
            "`requireblock` needs a block type (`script` or `style`)".into(),
        ));
    };
    let Some(name) = args.get("name") else {
        return Err(syntax(format!("`requireblock {blocktype}` needs `name=...`")));
    };

    Ok(Directive::Block {
        group: args.get("group").unwrap_or(DEFAULT_GROUP).to_string(),
        blocktype: blocktype.clone(),
        name: name.to_string(),
        content,
    })
}

/// 1-based line number of byte offset `pos`.
fn line_of(source: &str, pos: usize) -> usize {
    source[..pos].bytes().filter(|&b| b == b'\n').count() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_files() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();

        let out = expand(
            &requires,
            Some(&mut ctx),
            "<head>{% requires site.css %}</head>{% requires inhead modernizr.js %}",
        )
        .unwrap();
        assert_eq!(out, "<head>@@@CSS:default:0@@@</head>@@@JS:inhead:0@@@");
        assert_eq!(ctx.len(), 2);
    }

    #[test]
    fn test_expand_block() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();

        let source = "<body>{% requireblock script name=\"boot\" group=inhead %}\nboot();\n{% endrequireblock %}</body>";
        let out = expand(&requires, Some(&mut ctx), source).unwrap();
        assert_eq!(out, "<body>@@@JS:inhead:0@@@</body>");

        let reqs = ctx.group("inhead").unwrap();
        assert_eq!(
            reqs.get(crate::asset::AssetKind::Js)[0],
            crate::asset::Requirement::block(crate::asset::AssetKind::Js, "boot", "\nboot();\n")
        );
    }

    #[test]
    fn test_expand_then_resolve() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let source = "<html><head>{% requires site.css %}</head>\n<body>\n{% requires app.js site.css %}\n\
                      {% requireblock style name=hl %}.hl{color:red}{% endrequireblock %}\n</body></html>";

        let html = expand(&requires, Some(&mut ctx), source).unwrap();
        let out = requires.resolve(&mut ctx, &html).unwrap();

        assert_eq!(out.matches("site.css").count(), 1);
        assert!(out.contains("\t<link href='/static/css/site.css' rel='stylesheet'>\n\t<style>.hl{color:red}</style>\n</head>"));
        assert!(out.contains("\t<script src='/static/js/app.js'></script>\n</body>"));
    }

    #[test]
    fn test_missing_context_contributes_nothing() {
        let requires = Requires::default();
        let out = expand(&requires, None, "<p>{% requires app.js %}</p>").unwrap();
        assert_eq!(out, "<p></p>");
    }

    #[test]
    fn test_syntax_errors() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();

        let err = expand(&requires, Some(&mut ctx), "\n\n{% requires %}").unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { line: 3, .. }));

        let err = expand(&requires, Some(&mut ctx), "{% requires footer %}").unwrap_err();
        assert!(err.to_string().contains("requires footer"));

        let err = expand(
            &requires,
            Some(&mut ctx),
            "{% requireblock script %}x{% endrequireblock %}",
        )
        .unwrap_err();
        assert!(err.to_string().contains("name="));

        let err = expand(
            &requires,
            Some(&mut ctx),
            "{% requireblock name=x %}x{% endrequireblock %}",
        )
        .unwrap_err();
        assert!(matches!(err, TemplateError::Syntax { line: 1, .. }));
    }

    #[test]
    fn test_unknown_blocktype_is_surfaced() {
        let requires = Requires::default();
        let mut ctx = RequestContext::new();
        let err = expand(
            &requires,
            Some(&mut ctx),
            "line\n{% requireblock template name=x %}x{% endrequireblock %}",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            TemplateError::Requires {
                line: 2,
                source: RequiresError::UnknownBlockType(_)
            }
        ));
    }

    #[test]
    fn test_incremental_block_inline() {
        let requires = Requires::default();
        let mut ctx = RequestContext::incremental();
        let out = expand(
            &requires,
            Some(&mut ctx),
            "<div>{% requireblock script name=tip %}tip();{% endrequireblock %}</div>",
        )
        .unwrap();
        assert_eq!(out, "<div>\t<script>tip();</script>\n</div>");
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_text_without_directives() {
        let requires = Requires::default();
        let source = "<p>{% other %} 100% {%</p>";
        assert_eq!(expand(&requires, None, source).unwrap(), source);
    }
}
