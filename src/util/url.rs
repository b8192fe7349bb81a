use url::Url;

/// Resolves `uri` against an optional base URI.
///
/// Absolute URIs, empty URIs, and URIs with no usable base are returned
/// unchanged. If the base does not parse, `uri` is returned as-is.
///
/// # Examples
///
/// ```
/// use syndication::util::complete_uri;
///
/// assert_eq!(
///     complete_uri(Some("http://example.com/a/"), "b.html"),
///     "http://example.com/a/b.html"
/// );
/// assert_eq!(complete_uri(None, "b.html"), "b.html");
/// ```
pub fn complete_uri(base: Option<&str>, uri: &str) -> String {
    if uri.is_empty() {
        return String::new();
    }
    if Url::parse(uri).is_ok() {
        return uri.to_string();
    }
    let Some(base) = base.filter(|b| !b.is_empty()) else {
        return uri.to_string();
    };
    match Url::parse(base).and_then(|b| b.join(uri)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            tracing::debug!(base = %base, uri = %uri, error = %e, "Cannot resolve relative URI");
            uri.to_string()
        }
    }
}

/// Whether `link` starts with an `http://` or `https://` scheme.
pub fn is_http_url(link: &str) -> bool {
    link.starts_with("http://") || link.starts_with("https://")
}

/// Joins a relative item link onto the channel link, adding a `/` between
/// them when neither side has one.
pub fn join_to_channel_link(channel_link: &str, link: &str) -> String {
    if channel_link.is_empty() {
        return link.to_string();
    }
    if channel_link.ends_with('/') || link.starts_with('/') {
        format!("{}{}", channel_link, link)
    } else {
        format!("{}/{}", channel_link, link)
    }
}
