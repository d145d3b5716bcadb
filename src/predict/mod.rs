mod pass_scanner;
mod types;

pub use pass_scanner::{LookAngleSource, PassScanner, ScanOutcome, ScanRequest, WindowFolder};
pub use types::{SampleInstant, TrailingWindow, VisibilityReport, VisibilityWindow, WindowClosure};
