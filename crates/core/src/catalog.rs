//! Listing helpers over already fetched collections. The store only
//! supports equality filters, so searching and ranking happen here.

use std::{collections::HashSet, str::FromStr};

use crate::{
    data::{Chapter, Novel, Role, User},
    error::ParseError,
};

/// Novels need a rating or more than this many views to be ranked.
pub const LEADERBOARD_MIN_VIEWS: u64 = 100;

/// How many ranked novels the leaderboard keeps.
pub const LEADERBOARD_SIZE: usize = 10;

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub genre: Option<String>,
    pub favorites_only: bool,
}

/// Reader search: text matches title or description, best rated first.
pub fn search<'a>(novels: &'a [Novel], query: &SearchQuery, favorites: &[String]) -> Vec<&'a Novel> {
    let text = query.text.as_deref().map(str::to_lowercase);

    let mut found = novels
        .iter()
        .filter(|n| !query.favorites_only || favorites.contains(&n.id))
        .filter(|n| match text.as_deref() {
            Some(text) => {
                n.title.to_lowercase().contains(text) || n.description.to_lowercase().contains(text)
            }
            None => true,
        })
        .filter(|n| match query.genre.as_deref() {
            Some(genre) => n.has_genre(genre),
            None => true,
        })
        .collect::<Vec<_>>();

    found.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    found
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TitleOrder {
    #[default]
    Title,
    RatingAsc,
    RatingDesc,
}

impl FromStr for TitleOrder {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(TitleOrder::Title),
            "rating-asc" => Ok(TitleOrder::RatingAsc),
            "rating-desc" => Ok(TitleOrder::RatingDesc),
            _ => Err(ParseError::UnknownOrdering(s.to_string())),
        }
    }
}

/// Manager dashboard listing: filter by name and genre, then order.
pub fn manager_list<'a>(
    novels: &'a [Novel],
    name: Option<&str>,
    genre: Option<&str>,
    order: TitleOrder,
) -> Vec<&'a Novel> {
    let name = name.map(str::to_lowercase);

    let mut found = novels
        .iter()
        .filter(|n| match name.as_deref() {
            Some(name) => n.title.to_lowercase().contains(name),
            None => true,
        })
        .filter(|n| genre.map_or(true, |g| n.has_genre(g)))
        .collect::<Vec<_>>();

    match order {
        TitleOrder::Title => found.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase())),
        TitleOrder::RatingAsc => found.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        TitleOrder::RatingDesc => found.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }

    found
}

/// Every genre once, in the order first seen.
pub fn genres(novels: &[Novel]) -> Vec<&str> {
    let mut seen = HashSet::new();
    novels
        .iter()
        .flat_map(|n| n.genres.iter())
        .map(String::as_str)
        .filter(|g| seen.insert(*g))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ranking {
    #[default]
    Views,
    Rating,
    Chapters,
}

impl FromStr for Ranking {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "views" => Ok(Ranking::Views),
            "rating" | "rate" => Ok(Ranking::Rating),
            "chapters" => Ok(Ranking::Chapters),
            _ => Err(ParseError::UnknownOrdering(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked<'a> {
    pub novel: &'a Novel,
    pub views: u64,
    pub chapters: u32,
}

/// Views and chapter count come from the novel record, falling back to the
/// chapter collection when the record lacks them.
pub fn leaderboard<'a>(novels: &'a [Novel], chapters: &[Chapter], ranking: Ranking) -> Vec<Ranked<'a>> {
    let mut ranked = novels
        .iter()
        .map(|novel| {
            let related = move || chapters.iter().filter(move |c| c.novel_id == novel.id);
            Ranked {
                novel,
                views: novel.views.unwrap_or_else(|| related().map(|c| c.views).sum()),
                chapters: novel
                    .total_chapters
                    .unwrap_or_else(|| related().count() as u32),
            }
        })
        .filter(|r| r.novel.rating > 0.0 || r.views > LEADERBOARD_MIN_VIEWS)
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| match ranking {
        Ranking::Views => b.views.cmp(&a.views),
        Ranking::Rating => b.novel.rating.total_cmp(&a.novel.rating),
        Ranking::Chapters => b.chapters.cmp(&a.chapters),
    });
    ranked.truncate(LEADERBOARD_SIZE);

    ranked
}

/// Admin user table: substring search over name and email, optional role.
pub fn search_users<'a>(users: &'a [User], text: Option<&str>, role: Option<Role>) -> Vec<&'a User> {
    let text = text.map(str::to_lowercase);

    users
        .iter()
        .filter(|u| match text.as_deref() {
            Some(text) => {
                u.user_name.to_lowercase().contains(text) || u.email.to_lowercase().contains(text)
            }
            None => true,
        })
        .filter(|u| role.map_or(true, |r| u.role == r))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn novel(id: &str, title: &str, rating: f32, genres: &[&str]) -> Novel {
        let mut novel = Novel::new(title.to_string(), String::from("someone"));
        novel.id = id.to_string();
        novel.rating = rating;
        novel.genres = genres.iter().map(|g| g.to_string()).collect();
        novel
    }

    fn chapter(novel_id: &str, views: u64) -> Chapter {
        Chapter {
            id: format!("{novel_id}-{views}"),
            novel_id: novel_id.to_string(),
            chapter_number: 1,
            title: String::new(),
            content: String::new(),
            views,
            created_at: None,
            previous: None,
            next: None,
        }
    }

    #[test]
    fn should_search_title_and_description() {
        let mut a = novel("n1", "Dragon Road", 3.0, &["Fantasy"]);
        a.description = String::from("A long trip.");
        let mut b = novel("n2", "Quiet Sea", 4.5, &["Drama"]);
        b.description = String::from("Dragons sleep below.");
        let c = novel("n3", "Other", 5.0, &["Fantasy"]);
        let novels = vec![a, b, c];

        let query = SearchQuery {
            text: Some(String::from("DRAGON")),
            ..Default::default()
        };
        let ids = search(&novels, &query, &[]).iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["n2", "n1"]);

        let query = SearchQuery {
            genre: Some(String::from("Fantasy")),
            favorites_only: true,
            ..Default::default()
        };
        let favorites = vec![String::from("n1")];
        let ids = search(&novels, &query, &favorites).iter().map(|n| n.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["n1"]);
    }

    #[test]
    fn should_order_manager_list() {
        let novels = vec![
            novel("n1", "beta", 2.0, &[]),
            novel("n2", "Alpha", 4.0, &[]),
            novel("n3", "gamma", 1.0, &["Horror"]),
        ];

        let titles = |order| {
            manager_list(&novels, None, None, order)
                .iter()
                .map(|n| n.title.clone())
                .collect::<Vec<_>>()
        };
        assert_eq!(titles(TitleOrder::Title), vec!["Alpha", "beta", "gamma"]);
        assert_eq!(titles(TitleOrder::RatingAsc), vec!["gamma", "beta", "Alpha"]);
        assert_eq!(titles(TitleOrder::RatingDesc), vec!["Alpha", "beta", "gamma"]);

        let found = manager_list(&novels, Some("MM"), Some("Horror"), TitleOrder::Title);
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn should_list_genres_once_in_first_seen_order() {
        let novels = vec![
            novel("n1", "a", 0.0, &["Fantasy", "Drama"]),
            novel("n2", "b", 0.0, &["Drama", "Horror"]),
        ];
        assert_eq!(genres(&novels), vec!["Fantasy", "Drama", "Horror"]);
    }

    #[test]
    fn should_rank_with_chapter_fallbacks() {
        let mut popular = novel("n1", "Popular", 0.0, &[]);
        popular.views = None;
        popular.total_chapters = None;
        let mut rated = novel("n2", "Rated", 4.0, &[]);
        rated.views = Some(50);
        rated.total_chapters = Some(12);
        let unranked = novel("n3", "Unranked", 0.0, &[]);

        let novels = vec![popular, rated, unranked];
        let chapters = vec![chapter("n1", 80), chapter("n1", 70)];

        let board = leaderboard(&novels, &chapters, Ranking::Views);
        let ids = board.iter().map(|r| r.novel.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec!["n1", "n2"]);
        assert_eq!(board[0].views, 150);
        assert_eq!(board[0].chapters, 2);

        let board = leaderboard(&novels, &chapters, Ranking::Chapters);
        assert_eq!(board[0].novel.id, "n2");
    }

    #[test]
    fn should_keep_only_the_top_novels() {
        let novels = (1..=12)
            .map(|i| {
                let mut novel = novel(&format!("n{i}"), "Ranked", 1.0, &[]);
                novel.views = Some(i * 10);
                novel
            })
            .collect::<Vec<_>>();

        let board = leaderboard(&novels, &[], Ranking::Views);
        assert_eq!(board.len(), LEADERBOARD_SIZE);
        assert_eq!(board[0].novel.id, "n12");
        assert_eq!(board[LEADERBOARD_SIZE - 1].novel.id, "n3");
    }

    #[test]
    fn should_filter_users() {
        let mut alice = User::new("alice".into(), "alice@example.com".into(), String::new(), Role::Admin);
        alice.id = String::from("1");
        let bob = User::new("bob".into(), "bob@mail.org".into(), String::new(), Role::Reader);
        let users = vec![alice, bob];

        assert_eq!(search_users(&users, Some("MAIL.ORG"), None).len(), 1);
        assert_eq!(search_users(&users, None, Some(Role::Admin))[0].user_name, "alice");
        assert_eq!(search_users(&users, None, None).len(), 2);
    }
}
