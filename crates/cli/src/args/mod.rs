pub mod genres;
