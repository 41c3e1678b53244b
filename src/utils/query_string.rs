use urlencoding::encode;

/// Percent-encode `pairs` into `k=v&k=v`, keeping their order and empty values.
pub fn build_query_string<K: AsRef<str>, V: AsRef<str>>(pairs: &[(K, V)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k.as_ref()), encode(v.as_ref())))
        .collect::<Vec<_>>()
        .join("&")
}
