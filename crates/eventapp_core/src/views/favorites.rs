use super::{LoadState, Notice, NoticeSlot};
use crate::error::AppError;
use crate::models::Event;
use crate::navigator::{NavCommand, Screen};

pub struct FavoritesView {
    state: LoadState<Event>,
    pub notice: NoticeSlot,
}

impl Default for FavoritesView {
    fn default() -> Self {
        Self::new()
    }
}

impl FavoritesView {
    pub fn new() -> Self {
        Self {
            state: LoadState::Loading,
            notice: NoticeSlot::default(),
        }
    }

    pub fn state(&self) -> &LoadState<Event> {
        &self.state
    }

    /// Resolved events for the latest membership snapshot.
    pub fn apply_events(&mut self, events: Vec<Event>) {
        self.state = LoadState::Ready(events);
    }

    pub fn apply_error(&mut self, err: AppError) {
        self.state = LoadState::Failed(err.to_string());
        self.notice.set(Notice::from(&err));
    }

    pub fn apply(&mut self, result: Result<Vec<Event>, AppError>) {
        match result {
            Ok(events) => self.apply_events(events),
            Err(e) => self.apply_error(e),
        }
    }

    pub fn open_details(&self, event: &Event) -> NavCommand {
        NavCommand::Push(Screen::EventDetails(event.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_then_events() {
        let mut view = FavoritesView::new();
        assert!(view.state().is_loading());
        view.apply(Err(AppError::not_signed_in()));
        assert!(matches!(view.state(), LoadState::Failed(_)));
        assert!(view.notice.take().is_some());
        view.apply(Ok(Vec::new()));
        assert_eq!(view.state(), &LoadState::Ready(Vec::new()));
    }
}
