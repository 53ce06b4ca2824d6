//! Query-string composition.

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Query arguments for a call.
///
/// Keys are unique; the ordered map keeps the composed query string
/// deterministic.
pub type QueryArgs = BTreeMap<String, String>;

/// Build [`QueryArgs`] from borrowed pairs.
///
/// ```
/// use fluiddb_core::util::query::query_args;
///
/// let args = query_args(&[("returnDescription", "True")]);
/// assert_eq!(args.get("returnDescription").map(String::as_str), Some("True"));
/// ```
pub fn query_args(pairs: &[(&str, &str)]) -> QueryArgs {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

/// Encode arguments as `key=value` pairs joined by `&`.
///
/// Values are form-urlencoded as UTF-8 (space becomes `+`). Keys are
/// written as given. Returns an empty string for an empty map.
///
/// ```
/// use fluiddb_core::util::query::{encode_query, query_args};
///
/// let args = query_args(&[("query", "has fluiddb/users/username"), ("format", "json")]);
/// assert_eq!(
///     encode_query(&args),
///     "format=json&query=has+fluiddb%2Fusers%2Fusername"
/// );
/// ```
pub fn encode_query(args: &QueryArgs) -> String {
    args.iter()
        .map(|(key, value)| {
            let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
            format!("{key}={encoded}")
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Append the encoded arguments to `url`, adding `?` only when non-empty.
pub fn append_query(url: &str, args: &QueryArgs) -> String {
    if args.is_empty() {
        return url.to_string();
    }
    format!("{url}?{}", encode_query(args))
}
