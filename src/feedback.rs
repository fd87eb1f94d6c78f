// src/feedback.rs
use cosmwasm_std::Event;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A user-visible notification. Rendering it as a toast is up to the host.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Collects notices for the user and events for the host's log.
#[derive(Debug, Default)]
pub struct Feedback {
    notices: Vec<Notice>,
    events: Vec<Event>,
}

impl Feedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Info, message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(NoticeLevel::Error, message.into());
    }

    fn push(&mut self, level: NoticeLevel, message: String) {
        self.notices.push(Notice { level, message });
    }

    pub fn log(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}
