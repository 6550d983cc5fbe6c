pub mod content;
mod ids;
mod level;
mod scope;

pub use content::{
    Checklist, ChecklistItem, ContentItem, ContentLibrary, InterviewQuestion, Quiz, QuizQuestion,
    Resource,
};
pub use ids::{ItemId, Slug};
pub use level::{Difficulty, Level, Tier};
pub use scope::Scope;
