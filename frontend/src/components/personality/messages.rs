use common::model::upload::{UploadError, UploadOutcome};

use super::photo::AttemptId;

#[derive(Clone)]
pub enum Msg {
    ActivatePhoto,
    PhotoFileSelected(web_sys::File),
    PhotoSelectionCancelled,
    PhotoUploadFinished {
        attempt: AttemptId,
        result: Result<UploadOutcome, UploadError>,
    },
    PhotoUploadTimedOut(AttemptId),
    PhotoSettled(AttemptId),
}
