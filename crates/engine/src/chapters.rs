use log::{debug, info, warn};
use novelhub_core::{prelude::*, sequence};
use novelhub_store::{Collection, DataStore, DataStoreExt};

use crate::{
    ids::{new_id, today, CHAPTER_PREFIX},
    App, Error, Result,
};

/// A chapter with its neighbours by number.
#[derive(Debug, Clone, PartialEq)]
pub struct ChapterView {
    pub chapter: Chapter,
    pub previous: Option<Chapter>,
    pub next: Option<Chapter>,
}

impl From<Navigation<'_>> for ChapterView {
    fn from(navigation: Navigation<'_>) -> Self {
        ChapterView {
            chapter: navigation.chapter.clone(),
            previous: navigation.previous.cloned(),
            next: navigation.next.cloned(),
        }
    }
}

impl<S: DataStore> App<S> {
    /// A novel's chapters in reading order.
    pub fn chapters_of(&self, novel_id: &str) -> Result<Vec<Chapter>> {
        let mut chapters = self.fetch_chapters(novel_id)?;
        chapters.sort_by_key(|c| c.chapter_number);
        Ok(chapters)
    }

    pub fn read_chapter(&self, chapter_id: &str) -> Result<ChapterView> {
        let chapter: Chapter = self
            .store
            .fetch(Collection::Chapters, chapter_id)?
            .ok_or_else(|| Error::not_found(Collection::Chapters, chapter_id))?;

        let mut siblings = self.fetch_chapters(&chapter.novel_id)?;
        if !siblings.iter().any(|c| c.id == chapter.id) {
            siblings.push(chapter);
        }

        sequence::navigate(&siblings, chapter_id)
            .map(ChapterView::from)
            .ok_or_else(|| Error::not_found(Collection::Chapters, chapter_id))
    }

    /// Append a chapter to a novel.
    ///
    /// Two writes: the current tail's `nextChapterId` is pointed at the new
    /// id, then the chapter is created. They are not atomic. If the second
    /// fails the tail is left pointing at nothing and the error names it.
    pub fn create_chapter(&mut self, novel_id: &str, draft: NewChapter) -> Result<Chapter> {
        let chapters = self.fetch_chapters(novel_id)?;
        let plan = sequence::plan_chapter(novel_id, &chapters, draft, new_id(CHAPTER_PREFIX), today())?;

        if let Some(patch) = &plan.tail_patch {
            self.store
                .patch_with(Collection::Chapters, &patch.chapter_id, &patch.links)?;
            debug!("linked '{}' to '{}'", patch.chapter_id, plan.chapter.id);
        }

        match self.store.insert(Collection::Chapters, &plan.chapter) {
            Ok(chapter) => {
                info!(
                    "created chapter {} '{}' of '{novel_id}'",
                    chapter.chapter_number, chapter.title
                );
                Ok(chapter)
            }
            Err(source) => match plan.tail_patch {
                Some(patch) => {
                    warn!("chapter '{}' now links to a missing chapter", patch.chapter_id);
                    Err(Error::PartialWrite {
                        tail_id: patch.chapter_id,
                        source,
                    })
                }
                None => Err(source.into()),
            },
        }
    }

    /// Rewrite stored links to follow chapter numbers. Returns the ids of
    /// the chapters that were patched.
    pub fn relink(&mut self, novel_id: &str) -> Result<Vec<String>> {
        let chapters = self.fetch_chapters(novel_id)?;
        let patches = sequence::relink(&chapters);

        let mut patched = Vec::with_capacity(patches.len());
        for patch in patches {
            self.store
                .patch_with(Collection::Chapters, &patch.chapter_id, &patch.links)?;
            patched.push(patch.chapter_id);
        }

        info!("relinked '{novel_id}', {} chapters patched", patched.len());
        Ok(patched)
    }

    fn fetch_chapters(&self, novel_id: &str) -> Result<Vec<Chapter>> {
        Ok(self
            .store
            .fetch_all(Collection::Chapters, &[("novelId", novel_id)])?)
    }
}
