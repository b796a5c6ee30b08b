use super::{Notice, NoticeSlot};
use crate::error::AppError;
use crate::ids::EventId;
use crate::models::{format_date, parse_date, Event, EventDraft, EventPatch};
use crate::navigator::NavCommand;
use chrono::NaiveDate;

/// Field values shared by the add and edit screens.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    pub location: String,
    pub date: Option<NaiveDate>,
}

impl EventForm {
    pub fn from_event(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            description: event.description.clone(),
            location: event.location.clone(),
            date: event.date,
        }
    }

    /// Accepts `YYYY-MM-DD`; anything else clears the date.
    pub fn set_date_text(&mut self, text: &str) {
        self.date = parse_date(text);
    }

    pub fn date_text(&self) -> String {
        self.date.map(format_date).unwrap_or_default()
    }

    pub fn draft(&self) -> EventDraft {
        EventDraft {
            name: self.name.clone(),
            description: self.description.clone(),
            location: self.location.clone(),
            date: self.date,
        }
    }
}

pub struct AddEventView {
    pub form: EventForm,
    submitting: bool,
    pub notice: NoticeSlot,
}

impl AddEventView {
    /// Date starts at `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            form: EventForm {
                date: Some(today),
                ..Default::default()
            },
            submitting: false,
            notice: NoticeSlot::default(),
        }
    }

    pub fn today() -> Self {
        Self::new(chrono::Local::now().date_naive())
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Draft to submit, or `None` while a submission is already running.
    pub fn begin_submit(&mut self) -> Option<EventDraft> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.form.draft())
    }

    pub fn finish(&mut self, result: Result<EventId, AppError>) -> Option<NavCommand> {
        self.submitting = false;
        match result {
            Ok(id) => {
                log::debug!("add event: created {}", id);
                self.notice.set(Notice::success("Event added successfully!"));
                Some(NavCommand::Back)
            }
            Err(e) => {
                self.notice.set(Notice::from(&e));
                None
            }
        }
    }
}

pub struct EditEventView {
    original: Event,
    pub form: EventForm,
    submitting: bool,
    pub notice: NoticeSlot,
}

impl EditEventView {
    pub fn new(event: Event) -> Self {
        Self {
            form: EventForm::from_event(&event),
            original: event,
            submitting: false,
            notice: NoticeSlot::default(),
        }
    }

    pub fn event(&self) -> &Event {
        &self.original
    }

    /// Only fields that differ from the loaded event. Clearing the date is not expressible, so
    /// an empty date is left unchanged.
    pub fn patch(&self) -> EventPatch {
        let changed = |now: &str, before: &str| (now != before).then(|| now.to_string());
        EventPatch {
            name: changed(&self.form.name, &self.original.name),
            description: changed(&self.form.description, &self.original.description),
            location: changed(&self.form.location, &self.original.location),
            date: self.form.date.filter(|d| Some(*d) != self.original.date),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin_submit(&mut self) -> Option<EventPatch> {
        if self.submitting {
            return None;
        }
        self.submitting = true;
        Some(self.patch())
    }

    pub fn finish(&mut self, result: Result<(), AppError>) -> Option<NavCommand> {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.notice.set(Notice::success("Event updated successfully!"));
                Some(NavCommand::Back)
            }
            Err(e) => {
                self.notice.set(Notice::from_error(&e, Some("Error updating event: ")));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::UserId;
    use crate::views::NoticeKind;
    use pretty_assertions::assert_eq;

    fn event() -> Event {
        Event {
            id: EventId::parse("ev1").unwrap(),
            name: "Meetup".into(),
            description: "d".into(),
            location: "Park".into(),
            date: parse_date("2024-05-01"),
            creator_id: UserId::parse("alice").unwrap(),
            creator_email: None,
        }
    }

    #[test]
    fn add_defaults_to_today_and_navigates_back_on_success() {
        let today = parse_date("2024-06-10").unwrap();
        let mut view = AddEventView::new(today);
        assert_eq!(view.form.date_text(), "2024-06-10");
        view.form.name = "Meetup".into();
        let draft = view.begin_submit().unwrap();
        assert_eq!(draft.missing_fields(), vec!["description", "location"]);
        assert!(view.begin_submit().is_none());
        assert_eq!(view.finish(Ok(EventId::parse("ev1").unwrap())), Some(NavCommand::Back));
        assert_eq!(view.notice.take().map(|n| n.kind), Some(NoticeKind::Success));
    }

    #[test]
    fn add_validation_failure_keeps_form() {
        let mut view = AddEventView::new(parse_date("2024-06-10").unwrap());
        view.begin_submit();
        assert_eq!(view.finish(Err(AppError::validation(vec!["name"]))), None);
        assert!(!view.is_submitting());
        assert_eq!(view.notice.take().map(|n| n.title), Some("Validation Error".to_string()));
    }

    #[test]
    fn edit_patch_holds_only_changes() {
        let mut view = EditEventView::new(event());
        assert!(view.patch().is_empty());
        view.form.location = "Hall".into();
        view.form.set_date_text("2024-05-02");
        assert_eq!(
            view.patch(),
            EventPatch {
                location: Some("Hall".into()),
                date: parse_date("2024-05-02"),
                ..Default::default()
            }
        );
        view.form.set_date_text("not a date");
        assert_eq!(view.patch().date, None);
    }

    #[test]
    fn edit_remote_failure_is_prefixed() {
        let mut view = EditEventView::new(event());
        view.begin_submit();
        assert_eq!(view.finish(Err(AppError::Remote("quota".into()))), None);
        assert_eq!(
            view.notice.take().map(|n| n.message),
            Some("Error updating event: quota".to_string())
        );
    }
}
