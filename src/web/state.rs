use chrono::Duration;
use std::sync::Arc;

use crate::coords::GeodeticPosition;
use crate::predict::PassScanner;
use crate::tracker::Tracker;

#[derive(Clone)]
pub struct AppState {
    pub tracker: Arc<Tracker>,
    /// Site used when a request does not name one.
    pub station: Option<GeodeticPosition>,
    pub scanner: PassScanner,
    pub default_step: Duration,
}
