//! State machine behind the photo region of a personality block.
//!
//! The controller never touches the DOM, the network or a timer. The Yew update
//! layer feeds it events (activation, file chosen, transmission finished,
//! timeout, settle delay elapsed) and acts on what it answers. Every event
//! carries the [`AttemptId`] it belongs to; events of a superseded attempt are
//! dropped, which is what keeps late network responses and stale timers from
//! touching the record.
//!
//! ```text
//! Idle ──activate──▶ AwaitingSelection ──file chosen──▶ Uploading
//!  ▲                     │ dismissed/rejected              │ outcome / timeout
//!  │                     ▼                                 ▼
//!  └──────settle──── Failed ◀──────── error ──────── Succeeded / Failed
//! ```

use std::fmt;
use std::mem;

use common::model::personality::PhotoSink;
use common::model::upload::{UploadError, UploadOutcome};

use super::{Notifier, Severity};

/// Pause between an upload settling and the photo region reflecting it.
///
/// Dropping the loader the moment the response lands makes the region flash
/// before the new background has painted.
pub const SETTLE_DELAY_MS: u32 = 500;

/// How the photo region is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoVisualState {
    /// No background, no loader.
    Empty,
    /// Loader shown, background cleared.
    Loading,
    /// Background set to the record's photo URL.
    Loaded,
}

impl PhotoVisualState {
    pub fn for_photo(photo: &str) -> Self {
        if photo.is_empty() {
            PhotoVisualState::Empty
        } else {
            PhotoVisualState::Loaded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AttemptId(u64);

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    /// The file picker is open.
    AwaitingSelection(AttemptId),
    /// A file is in flight. `restore` is the look to fall back to on failure.
    Uploading {
        attempt: AttemptId,
        restore: PhotoVisualState,
    },
    /// The photo has been written; waiting out the settle delay.
    Succeeded(AttemptId),
    /// Waiting out the settle delay before reverting and reporting `error`.
    Failed {
        attempt: AttemptId,
        error: UploadError,
        restore: PhotoVisualState,
    },
}

impl UploadPhase {
    fn attempt(&self) -> Option<AttemptId> {
        match self {
            UploadPhase::Idle => None,
            UploadPhase::AwaitingSelection(attempt) | UploadPhase::Succeeded(attempt) => {
                Some(*attempt)
            }
            UploadPhase::Uploading { attempt, .. } | UploadPhase::Failed { attempt, .. } => {
                Some(*attempt)
            }
        }
    }
}

#[derive(Debug)]
pub struct PhotoUploadController {
    phase: UploadPhase,
    visual: PhotoVisualState,
    last_attempt: u64,
    disposed: bool,
}

impl PhotoUploadController {
    /// Starts idle, showing `photo` if the record already has one.
    pub fn new(photo: &str) -> Self {
        Self {
            phase: UploadPhase::Idle,
            visual: PhotoVisualState::for_photo(photo),
            last_attempt: 0,
            disposed: false,
        }
    }

    pub fn phase(&self) -> &UploadPhase {
        &self.phase
    }

    pub fn visual(&self) -> PhotoVisualState {
        self.visual
    }

    /// The attempt whose file picker is currently open.
    pub fn awaiting_selection(&self) -> Option<AttemptId> {
        match self.phase {
            UploadPhase::AwaitingSelection(attempt) => Some(attempt),
            _ => None,
        }
    }

    /// User activated the photo region.
    ///
    /// Returns the attempt to open the file picker for, or `None` when an upload
    /// is in flight or settling. Activating again while the picker is open starts
    /// a fresh attempt that supersedes the old one.
    pub fn activate(&mut self) -> Option<AttemptId> {
        if self.disposed {
            return None;
        }
        match self.phase {
            UploadPhase::Idle | UploadPhase::AwaitingSelection(_) => {
                self.last_attempt += 1;
                let attempt = AttemptId(self.last_attempt);
                self.phase = UploadPhase::AwaitingSelection(attempt);
                Some(attempt)
            }
            _ => None,
        }
    }

    /// A file was chosen: show the loader. Must be called before transmission.
    ///
    /// Returns `true` when the caller should start transmitting.
    pub fn begin_upload(&mut self, attempt: AttemptId) -> bool {
        if self.disposed || self.awaiting_selection() != Some(attempt) {
            return false;
        }
        self.phase = UploadPhase::Uploading {
            attempt,
            restore: self.visual,
        };
        self.visual = PhotoVisualState::Loading;
        true
    }

    /// The picker was dismissed or the chosen file rejected.
    ///
    /// Returns `true` when a settle for `attempt` must be scheduled.
    pub fn selection_failed(&mut self, attempt: AttemptId, error: UploadError) -> bool {
        if self.disposed || self.awaiting_selection() != Some(attempt) {
            return false;
        }
        self.phase = UploadPhase::Failed {
            attempt,
            error,
            restore: self.visual,
        };
        true
    }

    /// Transmission finished. On a usable outcome the URL goes to `photo`; any
    /// other result leaves `photo` untouched.
    ///
    /// Returns `true` when a settle for `attempt` must be scheduled.
    pub fn complete(
        &mut self,
        attempt: AttemptId,
        result: Result<UploadOutcome, UploadError>,
        photo: &mut dyn PhotoSink,
    ) -> bool {
        let Some(restore) = self.uploading(attempt) else {
            return false;
        };
        self.phase = match result.and_then(UploadOutcome::into_photo_url) {
            Ok(url) => {
                photo.set_photo(url);
                UploadPhase::Succeeded(attempt)
            }
            Err(error) => UploadPhase::Failed {
                attempt,
                error,
                restore,
            },
        };
        true
    }

    /// The upload of `attempt` exceeded `after_ms`. Whatever the transmission
    /// resolves with later is ignored.
    ///
    /// Returns `true` when a settle for `attempt` must be scheduled.
    pub fn time_out(&mut self, attempt: AttemptId, after_ms: u32) -> bool {
        let Some(restore) = self.uploading(attempt) else {
            return false;
        };
        self.phase = UploadPhase::Failed {
            attempt,
            error: UploadError::TimedOut(after_ms),
            restore,
        };
        true
    }

    /// The settle delay of `attempt` elapsed: commit the visual state, report a
    /// failure through `notifier`, and go back to idle.
    ///
    /// Returns `true` when the photo region must be redrawn.
    pub fn settle(&mut self, attempt: AttemptId, notifier: &dyn Notifier) -> bool {
        if self.disposed || self.phase.attempt() != Some(attempt) {
            return false;
        }
        match mem::replace(&mut self.phase, UploadPhase::Idle) {
            UploadPhase::Succeeded(_) => {
                self.visual = PhotoVisualState::Loaded;
                true
            }
            UploadPhase::Failed { error, restore, .. } => {
                self.visual = restore;
                notifier.notify(&error.to_string(), Severity::Error);
                true
            }
            other => {
                self.phase = other;
                false
            }
        }
    }

    /// The block is going away. Every later event is ignored.
    pub fn dispose(&mut self) {
        self.disposed = true;
        self.phase = UploadPhase::Idle;
    }

    fn uploading(&self, attempt: AttemptId) -> Option<PhotoVisualState> {
        match self.phase {
            UploadPhase::Uploading {
                attempt: current,
                restore,
            } if !self.disposed && current == attempt => Some(restore),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use common::model::personality::PersonalityData;
    use common::model::upload::DEFAULT_UPLOAD_ERROR;

    use super::*;

    #[derive(Default)]
    struct RecordingNotifier {
        seen: RefCell<Vec<(String, Severity)>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: &str, severity: Severity) {
            self.seen.borrow_mut().push((message.to_string(), severity));
        }
    }

    impl RecordingNotifier {
        fn messages(&self) -> Vec<String> {
            self.seen.borrow().iter().map(|(m, _)| m.clone()).collect()
        }
    }

    fn outcome(json: &str) -> Result<UploadOutcome, UploadError> {
        Ok(serde_json::from_str(json).unwrap())
    }

    fn uploading(controller: &mut PhotoUploadController) -> AttemptId {
        let attempt = controller.activate().unwrap();
        assert!(controller.begin_upload(attempt));
        attempt
    }

    #[test]
    fn initial_visual_follows_the_record() {
        assert_eq!(PhotoUploadController::new("").visual(), PhotoVisualState::Empty);
        assert_eq!(
            PhotoUploadController::new("https://example.com/a.png").visual(),
            PhotoVisualState::Loaded
        );
    }

    #[test]
    fn loader_shows_before_transmission_resolves() {
        let mut controller = PhotoUploadController::new("");
        let mut data = PersonalityData::default();
        let notifier = RecordingNotifier::default();

        let attempt = controller.activate().unwrap();
        assert_eq!(controller.phase(), &UploadPhase::AwaitingSelection(attempt));
        assert_eq!(controller.visual(), PhotoVisualState::Empty);

        assert!(controller.begin_upload(attempt));
        assert_eq!(controller.visual(), PhotoVisualState::Loading);

        assert!(controller.complete(attempt, Err(UploadError::Transmission("offline".into())), &mut data));
        assert_eq!(controller.visual(), PhotoVisualState::Loading);

        assert!(controller.settle(attempt, &notifier));
        assert_eq!(controller.visual(), PhotoVisualState::Empty);
    }

    #[test]
    fn success_writes_photo_then_loads_after_settle() {
        let mut controller = PhotoUploadController::new("");
        let mut data = PersonalityData::default();
        let notifier = RecordingNotifier::default();
        let attempt = uploading(&mut controller);

        let settling = controller.complete(
            attempt,
            outcome(r#"{"success":true,"file":{"url":"https://example.com/a.png"}}"#),
            &mut data,
        );

        assert!(settling);
        assert_eq!(data.photo, "https://example.com/a.png");
        assert_eq!(controller.visual(), PhotoVisualState::Loading);
        assert_eq!(controller.phase(), &UploadPhase::Succeeded(attempt));

        assert!(controller.settle(attempt, &notifier));
        assert_eq!(controller.visual(), PhotoVisualState::Loaded);
        assert_eq!(controller.phase(), &UploadPhase::Idle);
        assert!(notifier.messages().is_empty());
    }

    #[test]
    fn failed_upload_keeps_previous_photo_and_look() {
        let mut controller = PhotoUploadController::new("https://example.com/old.png");
        let mut data = PersonalityData {
            photo: "https://example.com/old.png".into(),
            ..Default::default()
        };
        let notifier = RecordingNotifier::default();
        let attempt = uploading(&mut controller);

        controller.complete(attempt, Err(UploadError::Transmission("Network error".into())), &mut data);
        controller.settle(attempt, &notifier);

        assert_eq!(data.photo, "https://example.com/old.png");
        assert_eq!(controller.visual(), PhotoVisualState::Loaded);
        assert_eq!(notifier.messages(), vec!["Network error".to_string()]);
        assert_eq!(notifier.seen.borrow()[0].1, Severity::Error);
    }

    #[test]
    fn malformed_success_is_a_failure() {
        for body in [r#"{"success":true,"file":{}}"#, r#"{"success":true}"#, r#"{"success":false}"#] {
            let mut controller = PhotoUploadController::new("");
            let mut data = PersonalityData::default();
            let notifier = RecordingNotifier::default();
            let attempt = uploading(&mut controller);

            controller.complete(attempt, outcome(body), &mut data);
            controller.settle(attempt, &notifier);

            assert_eq!(data.photo, "", "{body}");
            assert_eq!(notifier.messages(), vec![DEFAULT_UPLOAD_ERROR.to_string()], "{body}");
            assert_eq!(controller.visual(), PhotoVisualState::Empty);
        }
    }

    #[test]
    fn activation_is_ignored_while_uploading_or_settling() {
        let mut controller = PhotoUploadController::new("");
        let mut data = PersonalityData::default();
        let notifier = RecordingNotifier::default();
        let attempt = uploading(&mut controller);

        assert_eq!(controller.activate(), None);

        controller.complete(attempt, outcome(r#"{"success":1,"file":{"url":"/a.png"}}"#), &mut data);
        assert_eq!(controller.activate(), None);

        controller.settle(attempt, &notifier);
        assert!(controller.activate().is_some());
    }

    #[test]
    fn reopening_the_picker_supersedes_the_old_attempt() {
        let mut controller = PhotoUploadController::new("");
        let first = controller.activate().unwrap();
        let second = controller.activate().unwrap();

        assert_ne!(first, second);
        assert!(!controller.begin_upload(first));
        assert!(controller.begin_upload(second));
    }

    #[test]
    fn dismissed_picker_reports_and_keeps_visual() {
        let mut controller = PhotoUploadController::new("https://example.com/a.png");
        let notifier = RecordingNotifier::default();
        let attempt = controller.activate().unwrap();

        assert!(controller.selection_failed(attempt, UploadError::Selection("No file selected".into())));
        assert_eq!(controller.visual(), PhotoVisualState::Loaded);
        assert!(controller.settle(attempt, &notifier));

        assert_eq!(notifier.messages(), vec!["No file selected".to_string()]);
        assert_eq!(controller.phase(), &UploadPhase::Idle);
        assert_eq!(controller.visual(), PhotoVisualState::Loaded);
    }

    #[test]
    fn late_response_after_timeout_is_dropped() {
        let mut controller = PhotoUploadController::new("");
        let mut data = PersonalityData::default();
        let notifier = RecordingNotifier::default();
        let attempt = uploading(&mut controller);

        assert!(controller.time_out(attempt, 30_000));
        assert!(!controller.complete(
            attempt,
            outcome(r#"{"success":1,"file":{"url":"/late.png"}}"#),
            &mut data
        ));
        controller.settle(attempt, &notifier);

        assert_eq!(data.photo, "");
        assert_eq!(notifier.messages(), vec!["Image upload timed out after 30000 ms".to_string()]);
    }

    #[test]
    fn stale_settle_does_nothing() {
        let mut controller = PhotoUploadController::new("");
        let mut data = PersonalityData::default();
        let notifier = RecordingNotifier::default();

        let first = uploading(&mut controller);
        controller.complete(first, outcome(r#"{"success":1,"file":{"url":"/a.png"}}"#), &mut data);
        assert!(controller.settle(first, &notifier));

        let second = controller.activate().unwrap();
        assert!(!controller.settle(first, &notifier));
        assert_eq!(controller.phase(), &UploadPhase::AwaitingSelection(second));
    }

    #[test]
    fn disposed_controller_ignores_everything() {
        let mut controller = PhotoUploadController::new("");
        let mut data = PersonalityData::default();
        let notifier = RecordingNotifier::default();
        let attempt = uploading(&mut controller);

        controller.dispose();

        assert!(!controller.complete(
            attempt,
            outcome(r#"{"success":1,"file":{"url":"/a.png"}}"#),
            &mut data
        ));
        assert!(!controller.settle(attempt, &notifier));
        assert_eq!(controller.activate(), None);
        assert_eq!(data.photo, "");
        assert!(notifier.messages().is_empty());
    }
}
