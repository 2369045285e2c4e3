pub use crate::data::*;
pub use crate::error::{ParseError, ValidationErrors};
pub use crate::favorites::Toggle;
pub use crate::policy::{Access, Policy};
pub use crate::sequence::{ChapterPlan, LinkPatch, Navigation, NewChapter};
