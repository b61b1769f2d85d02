//! Transmissible representations of entities, as seen by API clients.

mod answer;
mod question;
mod section;

pub use answer::AnswerDto;
pub use question::QuestionDto;
pub use section::SectionDto;
