//! Word-boundary snapping for text splits.
//!
//! Maps a raw character offset (from a caret position resolved by the UI)
//! to the nearest offset that falls on a word boundary, so a text split
//! never bisects a word. Returns `None` when no acceptable cut point
//! exists near the offset.

/// Characters treated as word boundaries.
///
/// A hyphen is a boundary with special handling: the cut lands immediately
/// after it, so the hyphen stays with the left half.
fn is_boundary(c: char) -> bool {
    matches!(c, ' ' | '-' | '\n' | '\r' | '\t')
}

/// Snap a raw character offset inside `text` to the nearest word boundary.
///
/// Offsets count characters, not bytes; callers pass caret offsets as the
/// rendering layer reports them. Preference order:
///
/// 1. Offsets at the very start or end of the text are rejected.
/// 2. Just after a hyphen: keep the offset.
/// 3. On a hyphen: move right past it.
/// 4. Just after another boundary: move left onto it.
/// 5. On another boundary: keep the offset.
/// 6. Mid-word: scan both directions for the nearest boundary, nearer
///    side wins, ties go left. Rejected if neither direction has one.
///
/// Any candidate that would produce an empty half is rejected.
pub fn snap(text: &str, index: usize) -> Option<usize> {
    let chars: Vec<char> = text.chars().collect();
    let len = chars.len();

    // Cannot split at the very start or end.
    if index == 0 || index >= len {
        return None;
    }

    if chars[index - 1] == '-' {
        return Some(index);
    }

    if chars[index] == '-' {
        let candidate = index + 1;
        return if candidate >= len - 1 {
            None
        } else {
            Some(candidate)
        };
    }

    if is_boundary(chars[index - 1]) {
        let candidate = index - 1;
        return if candidate == 0 { None } else { Some(candidate) };
    }

    if is_boundary(chars[index]) {
        return if index >= len - 1 { None } else { Some(index) };
    }

    // Mid-word: nearest boundary on either side, ties favor the left.
    let left = (0..index).rev().find(|&i| is_boundary(chars[i]));
    let right = (index..len).find(|&i| is_boundary(chars[i]));

    let boundary = match (left, right) {
        (None, None) => return None,
        (Some(l), None) => l,
        (None, Some(r)) => r,
        (Some(l), Some(r)) => {
            let left_dist = index - l;
            let right_dist = r - index;
            if left_dist <= right_dist {
                l
            } else {
                r
            }
        }
    };

    let candidate = if chars[boundary] == '-' {
        boundary + 1
    } else {
        boundary
    };

    if candidate == 0 || candidate >= len - 1 {
        None
    } else {
        Some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_start_and_end() {
        assert_eq!(snap(" x", 0), None);
        assert_eq!(snap("hello world", 11), None);
        assert_eq!(snap("hello world", 20), None);
        assert_eq!(snap("", 0), None);
    }

    #[test]
    fn rejects_when_no_boundary_exists() {
        // Two characters, both ends excluded.
        assert_eq!(snap("ab", 1), None);
        assert_eq!(snap("unbroken", 4), None);
    }

    #[test]
    fn offset_on_space_is_kept() {
        assert_eq!(snap("hello world", 5), Some(5));
    }

    #[test]
    fn offset_after_space_moves_left_onto_it() {
        assert_eq!(snap("hello world", 6), Some(5));
    }

    #[test]
    fn offset_after_hyphen_is_kept() {
        assert_eq!(snap("a-b", 2), Some(2));
        assert_eq!(snap("twenty-one more", 7), Some(7));
    }

    #[test]
    fn offset_on_hyphen_moves_right_past_it() {
        assert_eq!(snap("twenty-one more", 6), Some(7));
        // Past-the-hyphen candidate would leave an empty right half.
        assert_eq!(snap("ab-c", 2), None);
    }

    #[test]
    fn mid_word_picks_nearer_boundary() {
        //         0123456789
        // text = "aa bbbb cc"
        // Offset 4 is mid-"bbbb": left boundary at 2 (dist 2), right at 7
        // (dist 3), so the left space wins.
        assert_eq!(snap("aa bbbb cc", 4), Some(2));
        // Offset 6: left dist 4, right dist 1, right space wins.
        assert_eq!(snap("aa bbbb cc", 6), Some(7));
    }

    #[test]
    fn mid_word_tie_favors_left() {
        // "aa bbb cc": offset 4 is the middle 'b', with spaces at 2 and 6
        // both two characters away. The tie goes left.
        assert_eq!(snap("aa bbb cc", 4), Some(2));
        // One step right of center the right space is strictly nearer.
        assert_eq!(snap("aa bbb cc", 5), Some(6));
    }

    #[test]
    fn mid_word_hyphen_boundary_cuts_after_it() {
        //         0123456789
        // text = "re-align it": offset 4 is mid-"align", left boundary is
        // the hyphen at 2 (dist 2), right space at 8 (dist 4). Candidate
        // is one past the hyphen.
        assert_eq!(snap("re-align it", 4), Some(3));
    }

    #[test]
    fn newline_and_tab_are_boundaries() {
        assert_eq!(snap("one\ntwo", 3), Some(3));
        assert_eq!(snap("one\ttwo", 4), Some(3));
    }

    #[test]
    fn multibyte_text_counts_characters() {
        // "héllo wörld": caret offsets are character counts even though
        // the byte layout differs.
        assert_eq!(snap("héllo wörld", 5), Some(5));
        assert_eq!(snap("héllo wörld", 6), Some(5));
    }

    #[test]
    fn candidate_touching_edges_is_rejected() {
        // Boundary at index 1 would leave a single leading character; the
        // step-4 move-left still allows it as long as it is not offset 0.
        assert_eq!(snap("a bc", 2), Some(1));
        // But a candidate of exactly 0 is rejected.
        assert_eq!(snap(" ab", 1), None);
    }
}
