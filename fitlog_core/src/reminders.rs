//! Reminder store.

use crate::gateway::Gateway;
use crate::{
    timestamp, Collection, Error, IdStrategy, Reminder, Result, DEFAULT_REMINDER_MESSAGE,
};
use chrono::NaiveDateTime;

/// Document name of the reminders collection
pub const REMINDERS: &str = "reminders";

pub struct ReminderStore<G: Gateway> {
    gateway: G,
    ids: IdStrategy,
    reminders: Collection<Reminder>,
}

impl<G: Gateway> ReminderStore<G> {
    pub fn open(gateway: G, ids: IdStrategy) -> Self {
        let reminders: Collection<Reminder> = gateway.load(REMINDERS);
        tracing::debug!("Opened reminder store with {} reminders", reminders.len());
        Self {
            gateway,
            ids,
            reminders,
        }
    }

    pub fn all(&self) -> &[Reminder] {
        self.reminders.records()
    }

    /// Schedule a reminder; a blank or absent date is a validation error
    pub fn add(&mut self, date: Option<&str>, message: Option<String>) -> Result<Reminder> {
        let date = date
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| Error::missing_field("date"))?;

        let date = timestamp::canonicalize(date)?;
        let mut reminders = self.reminders.clone();
        let reminder = Reminder {
            id: reminders.assign_id(self.ids),
            date,
            message: message.unwrap_or_else(|| DEFAULT_REMINDER_MESSAGE.to_string()),
        };

        reminders.push(reminder.clone());
        self.gateway.save(REMINDERS, &reminders)?;
        self.reminders = reminders;

        tracing::info!("Added reminder {} for {}", reminder.id, reminder.date);
        Ok(reminder)
    }

    /// Reminders strictly after `now`, soonest first
    pub fn upcoming(&self, now: NaiveDateTime) -> Result<Vec<Reminder>> {
        let mut upcoming = Vec::new();
        for reminder in self.reminders.records() {
            let due = timestamp::parse(&reminder.date)?;
            if due > now {
                upcoming.push((due, reminder.clone()));
            }
        }

        upcoming.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(upcoming.into_iter().map(|(_, r)| r).collect())
    }
}
