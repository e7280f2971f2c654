//! One log call on its way through a facade handler

use super::attr::Attr;
use super::level::FacadeLevel;
use chrono::{DateTime, Utc};
use std::panic::Location;

/// A single facade log call: time, level, message and call-site attributes.
///
/// `Record::new` is `#[track_caller]`, so the recorded location is the code
/// that logged, however many `#[track_caller]` frames sit in between.
#[derive(Debug, Clone)]
pub struct Record {
    pub time: DateTime<Utc>,
    pub level: FacadeLevel,
    pub message: String,
    pub attrs: Vec<Attr>,
    pub location: &'static Location<'static>,
}

impl Record {
    #[track_caller]
    pub fn new(level: FacadeLevel, message: impl Into<String>) -> Self {
        Self {
            time: Utc::now(),
            level,
            message: message.into(),
            attrs: Vec::new(),
            location: Location::caller(),
        }
    }

    #[must_use]
    pub fn with_attrs(mut self, attrs: impl IntoIterator<Item = Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    #[must_use]
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }

    pub fn add_attr(&mut self, attr: Attr) {
        self.attrs.push(attr);
    }
}
