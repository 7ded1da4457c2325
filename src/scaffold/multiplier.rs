//! Emmet-style repetition suffixes.
//!
//! A selector ending in `*N` asks for N copies of its element: `li.item*5`
//! produces five `<li class="item">` and one stripped `li.item` rule. The
//! suffix must be trailing — a literal `*` anywhere else (universal selector,
//! `*=` operator inside brackets) never reads as a multiplier — and the base
//! in front of it must be non-empty, so the bare universal selector `*` is
//! left alone.

/// Split a trailing `*N` suffix off the selector, if one is present.
fn split(selector: &str) -> Option<(&str, usize)> {
    let (base, digits) = selector.rsplit_once('*')?;
    if base.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = digits.parse().ok()?;
    Some((base, count))
}

/// How many elements the selector asks for. `1` without a suffix; `0` is
/// legal and yields nothing.
pub fn extract(selector: &str) -> usize {
    split(selector).map_or(1, |(_, count)| count)
}

/// The selector without its `*N` suffix. Already-bare selectors pass
/// through unchanged.
pub fn strip(selector: &str) -> &str {
    split(selector).map_or(selector, |(base, _)| base)
}
