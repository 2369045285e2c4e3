use log::info;
use novelhub_core::{
    catalog::{self, Ranking, SearchQuery, TitleOrder},
    prelude::*,
    validate::validate_novel,
};
use novelhub_store::{Collection, DataStore, DataStoreExt};

use crate::{
    ids::{new_id, today, NOVEL_PREFIX},
    App, Error, Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct NovelDetail {
    pub novel: Novel,
    /// In reading order.
    pub chapters: Vec<Chapter>,
    pub is_favorite: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub novel: Novel,
    pub views: u64,
    pub chapters: u32,
}

impl<S: DataStore> App<S> {
    pub fn novels(&self) -> Result<Vec<Novel>> {
        Ok(self.store.fetch_all(Collection::Novels, &[])?)
    }

    pub fn novel(&self, novel_id: &str) -> Result<NovelDetail> {
        let novel: Novel = self
            .store
            .fetch(Collection::Novels, novel_id)?
            .ok_or_else(|| Error::not_found(Collection::Novels, novel_id))?;
        let chapters = self.chapters_of(novel_id)?;
        let is_favorite = self.current_user().map_or(false, |u| u.is_favorite(novel_id));

        Ok(NovelDetail {
            novel,
            chapters,
            is_favorite,
        })
    }

    /// Reader search. Favorites-only searches match nothing when logged out.
    pub fn search(&self, query: &SearchQuery) -> Result<Vec<Novel>> {
        let novels = self.novels()?;
        let favorites = self.current_user().map(|u| u.favorites.as_slice()).unwrap_or_default();

        Ok(catalog::search(&novels, query, favorites)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn genres(&self) -> Result<Vec<String>> {
        let novels = self.novels()?;
        Ok(catalog::genres(&novels).into_iter().map(String::from).collect())
    }

    pub fn manager_novels(&self, name: Option<&str>, genre: Option<&str>, order: TitleOrder) -> Result<Vec<Novel>> {
        let novels = self.novels()?;
        Ok(catalog::manager_list(&novels, name, genre, order)
            .into_iter()
            .cloned()
            .collect())
    }

    pub fn leaderboard(&self, ranking: Ranking) -> Result<Vec<Standing>> {
        let novels = self.novels()?;
        let chapters: Vec<Chapter> = self.store.fetch_all(Collection::Chapters, &[])?;

        Ok(catalog::leaderboard(&novels, &chapters, ranking)
            .into_iter()
            .map(|ranked| Standing {
                novel: ranked.novel.clone(),
                views: ranked.views,
                chapters: ranked.chapters,
            })
            .collect())
    }

    /// The novel gets a fresh id, zeroed counters and today's dates. The
    /// session user, if any, is recorded as the uploader.
    pub fn create_novel(&mut self, mut novel: Novel) -> Result<Novel> {
        let existing = self.novels()?;
        novel.id = String::new();
        validate_novel(&novel, &existing)?;

        let today = today();
        novel.id = new_id(NOVEL_PREFIX);
        novel.title = novel.title.trim().to_string();
        novel.views = Some(novel.views.unwrap_or_default());
        novel.total_chapters = Some(novel.total_chapters.unwrap_or_default());
        novel.uploader = self.current_user().map(|u| u.id.clone());
        novel.created_at = Some(today);
        novel.updated_at = Some(today);

        let novel = self.store.insert(Collection::Novels, &novel)?;
        info!("created novel '{}' ({})", novel.title, novel.id);
        Ok(novel)
    }

    /// Full replace. Creation metadata missing from `novel` is carried over
    /// from the stored record.
    pub fn update_novel(&mut self, mut novel: Novel) -> Result<Novel> {
        let current: Novel = self
            .store
            .fetch(Collection::Novels, &novel.id)?
            .ok_or_else(|| Error::not_found(Collection::Novels, &novel.id))?;

        let existing = self.novels()?;
        validate_novel(&novel, &existing)?;

        novel.title = novel.title.trim().to_string();
        novel.created_at = novel.created_at.or(current.created_at);
        novel.uploader = novel.uploader.or(current.uploader);
        novel.views = novel.views.or(current.views);
        novel.total_chapters = novel.total_chapters.or(current.total_chapters);
        novel.updated_at = Some(today());

        let id = novel.id.clone();
        let novel = self.store.put(Collection::Novels, &id, &novel)?;
        info!("updated novel '{}' ({id})", novel.title);
        Ok(novel)
    }

    /// Chapters of the novel are left in place.
    pub fn delete_novel(&mut self, novel_id: &str) -> Result<()> {
        self.store.delete(Collection::Novels, novel_id)?;
        info!("deleted novel '{novel_id}'");
        Ok(())
    }
}
