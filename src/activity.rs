mod content;
mod fetch;
mod params;
mod payload;
mod prompt;
mod quiz;
mod view;

pub use content::{ContentBatch, Letter, ParseLetterError, QuizQuestion, VocabularyItem};
pub use fetch::{ContentRequester, HttpResponse, RequestError, Transport, UreqTransport};
pub use params::{effective_level, Mode, Register, RequestParameters, ADVANCED_LEVEL};
pub use payload::{Content, GenerateRequest, GenerationConfig, Part};
pub use prompt::{build_prompt, response_schema};
pub use quiz::{QuestionResult, QuizPhase, QuizSession};
pub use view::{ActivityView, RequestTicket};
