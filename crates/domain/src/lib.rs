pub mod booking_slots;
mod date;
mod notification;
mod reminder;
mod reservation;
mod resource;
mod shared;
mod timespan;

pub use notification::Notification;
pub use reminder::{reminders_for_reservation, Reminder, ReminderKind, ReminderStatus};
pub use reservation::{Reservation, ReservationStatus};
pub use resource::{Resource, ResourceType};
pub use shared::entity::{Entity, ID};
pub use timespan::{InvalidTimeSpan, TimeSpan};
