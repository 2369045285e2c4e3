//! Chapter ordering.
//!
//! The chapter number is the source of truth for reading order. The stored
//! `prevChapterId`/`nextChapterId` links are kept up to date on creation and
//! can be rebuilt from the numbers with [`relink`].

use chrono::NaiveDate;
use log::{debug, warn};

use crate::{
    data::{Chapter, Links},
    error::ValidationErrors,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChapter {
    pub number: u32,
    pub title: String,
    pub content: String,
}

/// A pending partial update of one chapter's links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkPatch {
    pub chapter_id: String,
    pub links: Links,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChapterPlan {
    /// The record to create, links already assigned.
    pub chapter: Chapter,
    /// Applied to the previous tail before the new record is created.
    pub tail_patch: Option<LinkPatch>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Navigation<'a> {
    pub chapter: &'a Chapter,
    pub previous: Option<&'a Chapter>,
    pub next: Option<&'a Chapter>,
}

fn of_novel<'a>(chapters: &'a [Chapter], novel_id: &'a str) -> impl Iterator<Item = &'a Chapter> {
    chapters.iter().filter(move |c| c.novel_id == novel_id)
}

/// The chapter with the highest number. On ties the first one wins.
pub fn tail(chapters: &[Chapter]) -> Option<&Chapter> {
    chapters.iter().fold(None, |best: Option<&Chapter>, c| match best {
        Some(b) if b.chapter_number >= c.chapter_number => Some(b),
        _ => Some(c),
    })
}

/// Chapters in reading order. Equal numbers keep their fetched order.
pub fn ordered(chapters: &[Chapter]) -> Vec<&Chapter> {
    let mut ordered = chapters.iter().collect::<Vec<_>>();
    ordered.sort_by_key(|c| c.chapter_number);
    ordered
}

pub fn validate_new_chapter(chapters: &[Chapter], draft: &NewChapter) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if chapters.iter().any(|c| c.chapter_number == draft.number) {
        errors.add("chapterNumber", "Chapter number already exists");
    }

    if draft.title.trim().is_empty() {
        errors.add("title", "Chapter title is required");
    } else if chapters.iter().any(|c| c.has_title(&draft.title)) {
        errors.add("title", "Chapter title already exists");
    }

    errors.into_result()
}

/// Work out the record and the tail patch for a new chapter of `novel_id`.
///
/// `chapters` is the novel's full chapter list as fetched from the store.
/// The new chapter is appended after the current tail even when its number
/// is lower than the tail's; that case is logged since the stored links then
/// disagree with the numbering until [`relink`] runs.
pub fn plan_chapter(
    novel_id: &str,
    chapters: &[Chapter],
    draft: NewChapter,
    id: String,
    today: NaiveDate,
) -> Result<ChapterPlan, ValidationErrors> {
    let existing = of_novel(chapters, novel_id).cloned().collect::<Vec<_>>();
    validate_new_chapter(&existing, &draft)?;

    let tail = tail(&existing);
    if let Some(tail) = tail {
        if draft.number < tail.chapter_number {
            warn!(
                "chapter {} of '{novel_id}' is linked after chapter {}, links are out of order until relinked",
                draft.number, tail.chapter_number
            );
        }
    }

    let chapter = Chapter {
        id: id.clone(),
        novel_id: novel_id.to_string(),
        chapter_number: draft.number,
        title: draft.title.trim().to_string(),
        content: draft.content,
        views: 0,
        created_at: Some(today),
        previous: tail.map(|t| t.id.clone()),
        next: None,
    };

    let tail_patch = tail.map(|t| LinkPatch {
        chapter_id: t.id.clone(),
        links: Links::next(Some(id)),
    });

    debug!("planned chapter '{}' after {:?}", chapter.id, chapter.previous);
    Ok(ChapterPlan { chapter, tail_patch })
}

/// Patches that make the stored links match the number order. Chapters
/// whose links already match are left out, as are fields that already
/// hold the right value.
pub fn relink(chapters: &[Chapter]) -> Vec<LinkPatch> {
    let ordered = ordered(chapters);
    let mut patches = vec![];

    for (i, chapter) in ordered.iter().enumerate() {
        let previous = i.checked_sub(1).map(|p| ordered[p].id.clone());
        let next = ordered.get(i + 1).map(|n| n.id.clone());

        let links = Links {
            previous: (chapter.previous != previous).then_some(previous),
            next: (chapter.next != next).then_some(next),
        };

        if !links.is_empty() {
            patches.push(LinkPatch {
                chapter_id: chapter.id.clone(),
                links,
            });
        }
    }

    patches
}

/// Find a chapter and its neighbours by number within the same novel.
pub fn navigate<'a>(chapters: &'a [Chapter], chapter_id: &str) -> Option<Navigation<'a>> {
    let chapter = chapters.iter().find(|c| c.id == chapter_id)?;
    let mut related = of_novel(chapters, &chapter.novel_id).collect::<Vec<_>>();
    related.sort_by_key(|c| c.chapter_number);
    let index = related.iter().position(|c| c.id == chapter_id)?;

    Some(Navigation {
        chapter,
        previous: index.checked_sub(1).map(|i| related[i]),
        next: related.get(index + 1).copied(),
    })
}
