//! String-distance primitives used by the similar-names check.

/// Levenshtein distance between two strings over Unicode code points
/// (insert, delete, substitute, each cost 1).
///
/// Returns `None` when either input is empty: an empty name carries no
/// signal, so the pair is skipped rather than scored.
pub fn levenshtein(a: &str, b: &str) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() || b.is_empty() {
        return None;
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, x) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    Some(prev[b.len()])
}

/// Normalizes a stop name before distance comparison: lowercase, then
/// remove only the FIRST space.
///
/// Removing a single space (not all whitespace) is inherited from the
/// upstream dataset tooling; changing it would change which name pairs
/// clear the similarity threshold, so it stays.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase().replacen(' ', "", 1)
}
