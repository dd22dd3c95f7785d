//! Polling client: keeps a timestamped history of aggregator batches and
//! derives the day's summary and threshold alerts from it.

mod accumulator;
mod alerts;
mod history;
mod render;
mod store;
mod summary;

pub use accumulator::{Accumulator, Session, SessionHandle};
pub use alerts::{check_alerts, AlertEvent, AlertLog, AlertType, Thresholds};
pub use history::{HistoryEntry, HistoryLog};
pub use render::render_dashboard;
pub use store::{FileHistoryStore, HistoryStore, MemoryHistoryStore};
pub use summary::{day_key, summarize_day};
