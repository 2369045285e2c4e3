use std::str::FromStr;

use anyhow::bail;

/// Comma separated genre tags, kept in the order given.
#[derive(Clone, Debug, PartialEq)]
#[repr(transparent)]
pub struct GenreList(pub Vec<String>);

impl FromStr for GenreList {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut genres: Vec<String> = vec![];
        for genre in s.split(',').map(str::trim).filter(|g| !g.is_empty()) {
            if !genres.iter().any(|g| g.eq_ignore_ascii_case(genre)) {
                genres.push(genre.to_string());
            }
        }

        if genres.is_empty() {
            bail!("expected at least one genre (ex: Fantasy, Drama)");
        }

        Ok(GenreList(genres))
    }
}
