use chrono::{Local, NaiveDate};
use uuid::Uuid;

pub const CHAPTER_PREFIX: char = 'c';
pub const NOVEL_PREFIX: char = 'n';

/// A record id: one letter naming the collection, then random hex.
pub fn new_id(prefix: char) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}{}", &suffix[..12])
}

#[inline]
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_prefix_ids() {
        let id = new_id(CHAPTER_PREFIX);
        assert!(id.starts_with('c'));
        assert_eq!(id.len(), 13);
        assert_ne!(id, new_id(CHAPTER_PREFIX));
    }
}
