/// 32-bit polynomial string hash over UTF-16 code units, wrapping like a signed
/// 32-bit integer at every step.
pub fn variant_hash(identifier: &str) -> i32 {
    identifier.encode_utf16().fold(0i32, |hash, unit| {
        hash.wrapping_mul(31).wrapping_add(i32::from(unit))
    })
}

/// Bucket index for `identifier` across `buckets` slots.
pub fn bucket_index(identifier: &str, buckets: usize) -> Option<usize> {
    if buckets == 0 {
        return None;
    }
    let magnitude = variant_hash(identifier).unsigned_abs() as usize;
    Some(magnitude % buckets)
}

/// Sticky A/B assignment. The same identifier and variant list always yield the same
/// variant; an empty list yields an empty string.
pub fn assign_variant<'a, S: AsRef<str>>(identifier: &str, variants: &'a [S]) -> &'a str {
    bucket_index(identifier, variants.len())
        .map(|index| variants[index].as_ref())
        .unwrap_or("")
}
