use novelhub_core::prelude::*;
use novelhub_engine::{ChapterView, NovelDetail};

pub fn novel_row(novel: &Novel) {
    println!(
        "{:<14} {:<32} {:>4.1}  {:<10} {}",
        novel.id,
        novel.title,
        novel.rating,
        novel.status.to_string(),
        novel.genres.join(", ")
    );
}

pub fn novel_detail(detail: &NovelDetail) {
    let novel = &detail.novel;
    let marker = if detail.is_favorite { " [favorite]" } else { "" };

    println!("{}{marker}", novel.title);
    println!("by {} | {} | rated {:.1}", novel.author, novel.status, novel.rating);
    if !novel.genres.is_empty() {
        println!("genres: {}", novel.genres.join(", "));
    }
    if let Some(cover) = &novel.cover {
        println!("cover: {cover}");
    }
    if !novel.description.is_empty() {
        println!("\n{}", novel.description);
    }

    println!("\n{} chapters", detail.chapters.len());
    for chapter in &detail.chapters {
        println!("  {:>4}. {} ({})", chapter.chapter_number, chapter.title, chapter.id);
    }
}

pub fn chapter(view: &ChapterView) {
    let chapter = &view.chapter;
    println!("Chapter {}: {}\n", chapter.chapter_number, chapter.title);
    println!("{}\n", chapter.content);

    if let Some(previous) = &view.previous {
        println!("previous: {} ({})", previous.title, previous.id);
    }
    if let Some(next) = &view.next {
        println!("next: {} ({})", next.title, next.id);
    }
}

pub fn user_row(user: &User) {
    println!("{:<10} {:<20} {:<28} {}", user.id, user.user_name, user.email, user.role);
}
