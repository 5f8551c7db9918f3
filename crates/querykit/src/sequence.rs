//! Contiguous slice containment

/// True when `needle` occurs as a contiguous run inside `haystack`.
/// An empty needle is contained in anything.
pub fn contains_slice<T: PartialEq>(needle: &[T], haystack: &[T]) -> bool {
    if needle.is_empty() {
        return true;
    }
    if needle.len() > haystack.len() {
        return false;
    }
    haystack.windows(needle.len()).any(|window| window == needle)
}
