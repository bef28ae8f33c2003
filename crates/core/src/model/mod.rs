mod catalog;
mod ids;
mod progress;
mod score;

pub use catalog::{Case, Catalog, CatalogError, Category, Choice, Question, Section};
pub use ids::{CaseId, ChoiceId, QuestionId, SectionId};
pub use progress::{CategoryProgress, ProgressRecord, ProgressTable};
pub use score::{Score, SelectionMap};
