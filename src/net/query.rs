use url::form_urlencoded::byte_serialize;

/// Turns `(name, value)` pairs into `k1=v1&k2=v2`, percent-encoding each value.
///
/// Pairs are emitted in the given order. Names are expected to be plain
/// ASCII parameter names and are not encoded.
pub fn encode_query<K, V>(params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), byte_serialize(v.as_ref().as_bytes()).collect::<String>()))
        .collect::<Vec<_>>()
        .join("&")
}
