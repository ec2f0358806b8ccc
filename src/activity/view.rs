use super::{
    content::{ContentBatch, Letter},
    fetch::{ContentRequester, RequestError, Transport},
    params::{Mode, RequestParameters},
    quiz::QuizSession,
};
use crate::menu::{back_path, page_title, Route};

/// Identifies one request started by [`ActivityView::begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
    mode: Mode,
}

/// State of one activity page: the selected mode, loaded content, the last
/// error and the quiz session.
///
/// Every request is tagged with a generation number; a response that arrives
/// after a newer request began is dropped instead of overwriting fresh state.
#[derive(Debug, Default)]
pub struct ActivityView {
    category: Option<String>,
    level: Option<String>,
    mode: Option<Mode>,
    loading: bool,
    content: Option<ContentBatch>,
    error: Option<RequestError>,
    quiz: QuizSession,
    generation: u64,
}

impl ActivityView {
    pub fn new(category: Option<&str>, level: Option<&str>) -> Self {
        Self {
            category: category.map(str::to_string),
            level: level.map(str::to_string),
            ..Self::default()
        }
    }

    /// Views for anything but an activity route have no parameters, so every
    /// request from them fails with [`RequestError::InvalidParameters`].
    pub fn for_route(route: &Route) -> Self {
        match route {
            Route::Activity { category, level } => {
                Self::new(Some(category.as_str()), Some(level.as_str()))
            }
            _ => Self::default(),
        }
    }

    /// Clears content, error and quiz state and hands out the ticket the
    /// response must be completed with.
    pub fn begin(
        &mut self,
        mode: Mode,
    ) -> Result<(RequestTicket, RequestParameters), RequestError> {
        let params = match (self.category.as_deref(), self.level.as_deref()) {
            (Some(category), Some(level)) => RequestParameters::new(category, level, mode),
            _ => Err(RequestError::InvalidParameters(String::from(
                "activity type or level is missing",
            ))),
        };

        let params = match params {
            Ok(params) => params,
            Err(e) => {
                self.error = Some(e.clone());
                return Err(e);
            }
        };

        self.generation += 1;
        self.mode = Some(mode);
        self.loading = true;
        self.content = None;
        self.error = None;
        self.quiz.clear();

        Ok((
            RequestTicket {
                generation: self.generation,
                mode,
            },
            params,
        ))
    }

    /// Applies a response. Returns `false` and changes nothing when `ticket`
    /// belongs to a superseded request.
    pub fn complete(
        &mut self,
        ticket: RequestTicket,
        result: Result<ContentBatch, RequestError>,
    ) -> bool {
        if ticket.generation != self.generation {
            log::debug!(
                "discarding stale {} response: request {} was superseded by {}",
                ticket.mode,
                ticket.generation,
                self.generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(batch) => {
                if let ContentBatch::Exercises(questions) = &batch {
                    self.quiz.reset(questions.clone());
                }
                self.content = Some(batch);
            }
            Err(e) => self.error = Some(e),
        }

        true
    }

    /// Requests `mode` content and applies the result.
    pub fn load<T: Transport>(
        &mut self,
        requester: &ContentRequester<T>,
        mode: Mode,
    ) -> Result<(), RequestError> {
        let (ticket, params) = self.begin(mode)?;
        let result = requester.request(&params);
        self.complete(ticket, result);

        match &self.error {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    /// Fetches a fresh batch for the current mode.
    pub fn reload<T: Transport>(
        &mut self,
        requester: &ContentRequester<T>,
    ) -> Result<(), RequestError> {
        let mode = self.mode.ok_or_else(|| {
            RequestError::InvalidParameters(String::from("no content has been loaded yet"))
        })?;
        self.load(requester, mode)
    }

    pub fn record_answer(&mut self, index: usize, letter: Letter) -> bool {
        self.quiz.record_answer(index, letter)
    }

    pub fn reveal(&mut self) -> bool {
        self.quiz.reveal()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn content(&self) -> Option<&ContentBatch> {
        self.content.as_ref()
    }

    pub fn error(&self) -> Option<&RequestError> {
        self.error.as_ref()
    }

    pub fn quiz(&self) -> &QuizSession {
        &self.quiz
    }

    pub fn title(&self) -> String {
        page_title(self.category(), self.level())
    }

    pub fn back_path(&self) -> &'static str {
        back_path(self.category())
    }
}
