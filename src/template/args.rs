//! Directive argument parsing.

use rustc_hash::FxHashMap;

/// Arguments of a directive: `key=value` pairs and bare flags.
///
/// `'script name="init" defer'` => positional `["script", "defer"]`,
/// named `{name: init}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagArgs {
    positional: Vec<String>,
    named: FxHashMap<String, String>,
}

impl TagArgs {
    pub fn parse(raw: &str) -> Self {
        let mut args = Self::default();
        for part in raw.split_whitespace() {
            match part.split_once('=') {
                Some((key, value)) => {
                    args.named.insert(key.to_string(), unquote(value).to_string());
                }
                None => args.positional.push(part.to_string()),
            }
        }
        args
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.named.get(key).map(String::as_str)
    }
}

/// Strip one pair of matching quotes.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
