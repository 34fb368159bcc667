/// Maximum number of characters kept from an episode title
pub const MAX_TITLE_LENGTH: usize = 50;

/// Turn arbitrary text into a filename fragment.
///
/// Only ASCII letters, digits and whitespace survive; whitespace runs become a
/// single `.` and leading/trailing whitespace is dropped.
pub fn sanitize_fragment(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    kept.split_whitespace().collect::<Vec<_>>().join(".")
}

/// Sanitize an episode title and cut it to [`MAX_TITLE_LENGTH`] characters
pub fn sanitize_title(title: &str) -> String {
    let fragment = sanitize_fragment(title);

    if fragment.len() <= MAX_TITLE_LENGTH {
        return fragment;
    }

    // Fragment is pure ASCII at this point, byte slicing is safe
    fragment[..MAX_TITLE_LENGTH].to_string()
}
