//! Membership operations on a user's favorite list. The list keeps insertion
//! order and never holds the same novel id twice.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Remove `novel_id` if present, otherwise append it.
pub fn toggle(favorites: &mut Vec<String>, novel_id: &str) -> Toggle {
    if remove(favorites, novel_id) {
        Toggle::Removed
    } else {
        favorites.push(novel_id.to_string());
        Toggle::Added
    }
}

/// Returns whether anything was removed.
pub fn remove(favorites: &mut Vec<String>, novel_id: &str) -> bool {
    let before = favorites.len();
    favorites.retain(|id| id != novel_id);
    favorites.len() != before
}

/// Add a pending intent to a freshly loaded list. Returns whether the list
/// changed.
pub fn merge_pending(favorites: &mut Vec<String>, novel_id: &str) -> bool {
    if favorites.iter().any(|id| id == novel_id) {
        false
    } else {
        favorites.push(novel_id.to_string());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn should_toggle_off_and_back_on() {
        let mut favorites = list(&["n1", "n2"]);

        assert_eq!(toggle(&mut favorites, "n2"), Toggle::Removed);
        assert_eq!(favorites, list(&["n1"]));

        assert_eq!(toggle(&mut favorites, "n2"), Toggle::Added);
        assert_eq!(favorites, list(&["n1", "n2"]));
    }

    #[test]
    fn should_keep_order_of_others_on_double_toggle() {
        let original = list(&["n1", "n2", "n3"]);
        let mut favorites = original.clone();

        toggle(&mut favorites, "n9");
        toggle(&mut favorites, "n9");
        assert_eq!(favorites, original);

        toggle(&mut favorites, "n2");
        assert_eq!(favorites, list(&["n1", "n3"]));
    }

    #[test]
    fn should_not_duplicate_pending_intent() {
        let mut favorites = list(&["n5"]);
        assert!(!merge_pending(&mut favorites, "n5"));
        assert_eq!(favorites, list(&["n5"]));

        assert!(merge_pending(&mut favorites, "n6"));
        assert_eq!(favorites, list(&["n5", "n6"]));
    }

    #[test]
    fn should_report_remove() {
        let mut favorites = list(&["n1"]);
        assert!(!remove(&mut favorites, "n2"));
        assert!(remove(&mut favorites, "n1"));
        assert!(favorites.is_empty());
    }
}
