//! Classification and resolution of required file names.
//!
//! - Absolute names (URL scheme or leading `/`) are emitted literally.
//! - Remote names (`http://`, `https://`, protocol-relative `//`) are also
//!   excluded from bundling.
//! - Relative names are joined onto `static_root` and the path-table sub path.

use url::Url;

/// Whether `name` carries a URL scheme (`https:`, `data:`, ...).
fn has_scheme(name: &str) -> bool {
    Url::parse(name).is_ok()
}

/// Whether `name` is emitted as-is instead of being resolved.
pub fn is_absolute(name: &str) -> bool {
    name.starts_with('/') || has_scheme(name)
}

/// Whether `name` lives on another host.
pub fn is_remote(name: &str) -> bool {
    if name.starts_with("//") {
        return true;
    }
    Url::parse(name).is_ok_and(|url| matches!(url.scheme(), "http" | "https"))
}

/// Join `root`, `subpath` and `filename` with single slashes between them.
///
/// # Examples
/// ```ignore
/// join_url("/static/", "js/", "app.js")  -> "/static/js/app.js"
/// join_url("/static", "js", "app.js")    -> "/static/js/app.js"
/// join_url("", "", "app.js")             -> "app.js"
/// ```
pub fn join_url(root: &str, subpath: &str, filename: &str) -> String {
    let mut url = String::with_capacity(root.len() + subpath.len() + filename.len() + 2);
    url.push_str(root);
    for part in [subpath, filename] {
        if part.is_empty() {
            continue;
        }
        match (url.ends_with('/'), part.starts_with('/')) {
            (true, true) => url.push_str(&part[1..]),
            (false, false) if !url.is_empty() => {
                url.push('/');
                url.push_str(part);
            }
            _ => url.push_str(part),
        }
    }
    url
}
