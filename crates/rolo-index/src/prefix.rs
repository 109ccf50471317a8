//! Prefix enumeration
//!
//! Splits on `char` boundaries so multi-byte names ("张三") yield "张" and
//! "张三" rather than slicing through a code point.

/// All non-empty prefixes of `field`, shortest first.
///
/// An empty field yields nothing.
///
/// ```rust
/// use rolo_index::prefixes;
///
/// assert_eq!(prefixes("138").collect::<Vec<_>>(), vec!["1", "13", "138"]);
/// assert_eq!(prefixes("").count(), 0);
/// ```
pub fn prefixes(field: &str) -> impl Iterator<Item = &str> + '_ {
    field
        .char_indices()
        .map(move |(start, ch)| &field[..start + ch.len_utf8()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_prefixes() {
        let all: Vec<_> = prefixes("abc").collect();
        assert_eq!(all, vec!["a", "ab", "abc"]);
    }

    #[test]
    fn multibyte_prefixes_respect_char_boundaries() {
        let all: Vec<_> = prefixes("张三丰").collect();
        assert_eq!(all, vec!["张", "张三", "张三丰"]);
    }

    #[test]
    fn empty_field_has_no_prefixes() {
        assert_eq!(prefixes("").count(), 0);
    }
}
