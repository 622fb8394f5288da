//! Change notifications for views that show screenings or seat counts.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::models::{Booking, Screening};
use crate::scheduling::Availability;

const CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScheduleEvent {
    ScreeningSaved { screening: Screening },
    ScreeningDeleted { id: Uuid },
    BookingCreated { booking: Booking, availability: Availability },
    BookingDeleted { id: Uuid, screening_id: Uuid },
}

impl ScheduleEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ScreeningSaved { .. } => "screening_saved",
            Self::ScreeningDeleted { .. } => "screening_deleted",
            Self::BookingCreated { .. } => "booking_created",
            Self::BookingDeleted { .. } => "booking_deleted",
        }
    }
}

/// Fan-out of [`ScheduleEvent`]s to every subscriber. Publishing with no
/// subscribers is not an error.
#[derive(Debug, Clone)]
pub struct Notifier {
    sender: broadcast::Sender<ScheduleEvent>,
}

impl Default for Notifier {
    fn default() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }
}

impl Notifier {
    pub fn publish(&self, event: ScheduleEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::trace!(receivers, "schedule event published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ScheduleEvent> {
        self.sender.subscribe()
    }
}
