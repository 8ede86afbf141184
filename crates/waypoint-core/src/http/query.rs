//! Query building against a base URL.

/// Appends `params` to the query of `base`, percent-encoding values.
///
/// Existing query pairs on `base` are kept. Returns `None` if `base` is not an absolute URL.
pub fn with_query(base: &str, params: &[(&str, &str)]) -> Option<String> {
    let mut url = url::Url::parse(base).ok()?;
    {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in params {
            pairs.append_pair(k, v);
        }
    }
    Some(url.to_string())
}
