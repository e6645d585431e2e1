//! Whitespace-aware joining of translated text fragments.
//!
//! Adjacent inline elements translate to separate fragments; concatenating
//! them naively would fuse `hello` and `world` into `helloworld`. The joiner
//! inserts a single space only where both sides of a boundary are
//! non-whitespace, so block separators (which are `\n`-wrapped) never pick up
//! stray spaces and existing spaces are never doubled.

/// Characters that count as a whitespace boundary between fragments.
const LIKE_WHITESPACE: [char; 2] = [' ', '\n'];

/// Joins an ordered sequence of fragments into one string.
///
/// A single space separator is inserted before a fragment only when the
/// accumulator is non-empty, the fragment is non-empty, and neither the
/// accumulator's last character nor the fragment's first character is a
/// whitespace boundary. Fragments are never reordered or trimmed; a fragment
/// containing only whitespace participates in boundary checks with its own
/// first and last character.
///
/// # Example
///
/// ```rust
/// use fictex_core::join::join_fragments;
///
/// assert_eq!(join_fragments(["hello", "world"]), "hello world");
/// assert_eq!(join_fragments(["hello ", "world"]), "hello world");
/// assert_eq!(join_fragments(["\n", "x", "\n"]), "\nx\n");
/// ```
pub fn join_fragments<I>(fragments: I) -> String
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut result = String::new();

    for fragment in fragments {
        let fragment = fragment.as_ref();

        let tail_bounded = result
            .chars()
            .next_back()
            .is_none_or(|c| LIKE_WHITESPACE.contains(&c));
        let head_bounded = fragment
            .chars()
            .next()
            .is_none_or(|c| LIKE_WHITESPACE.contains(&c));

        if !tail_bounded && !head_bounded {
            result.push(' ');
        }

        result.push_str(fragment);
    }

    result
}
