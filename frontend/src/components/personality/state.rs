//! Runtime state of a personality block.
//!
//! Text fields live in the DOM while the user edits: the record is projected
//! into the regions once after the first render and read back from them on
//! save. The photo lives in the record and is only ever written by the upload
//! controller.

use gloo_timers::callback::Timeout;
use yew::NodeRef;

use common::model::config::PersonalityConfig;
use common::model::personality::{PersonalityData, TextField};

use super::helpers::{region_text, set_region_text, ToastNotifier};
use super::photo::{HttpUploader, PhotoUploadController};
use super::props::PersonalityProps;

pub struct PersonalityBlock {
    /// The block's record. Text fields are stale between saves.
    pub data: PersonalityData,

    pub config: PersonalityConfig,

    pub controller: PhotoUploadController,

    pub uploader: HttpUploader,

    pub notifier: ToastNotifier,

    /// One contenteditable region per text field, in `TextField::ALL` order.
    pub regions: Vec<(TextField, NodeRef)>,

    pub photo_ref: NodeRef,

    /// Hidden `<input type="file">` used as the picker.
    pub file_input_ref: NodeRef,

    /// Pending settle delay. Dropping it cancels the timer.
    pub settle_timer: Option<Timeout>,

    /// Pending upload timeout. Dropping it cancels the timer.
    pub upload_timer: Option<Timeout>,

    /// Guards the one-time projection of the record into the regions.
    pub populated: bool,

    /// `save_request` value of the last save performed.
    pub last_save_request: u32,
}

impl PersonalityBlock {
    pub fn new(props: &PersonalityProps) -> Self {
        Self {
            controller: PhotoUploadController::new(&props.data.photo),
            uploader: HttpUploader::new(props.config.uploader()),
            notifier: ToastNotifier,
            regions: TextField::ALL
                .iter()
                .map(|&field| (field, NodeRef::default()))
                .collect(),
            photo_ref: NodeRef::default(),
            file_input_ref: NodeRef::default(),
            settle_timer: None,
            upload_timer: None,
            populated: false,
            last_save_request: props.save_request,
            data: props.data.clone(),
            config: props.config.clone(),
        }
    }

    /// Writes non-empty record fields into their regions. Empty fields stay
    /// untouched so the placeholder shows.
    pub fn populate_regions(&mut self) {
        if self.populated {
            return;
        }
        self.populated = true;
        for (field, node_ref) in &self.regions {
            if let Some(text) = self.data.initial_text(*field) {
                set_region_text(node_ref, text);
            }
        }
    }

    /// Reads every region back into the record and returns it.
    pub fn save(&mut self) -> &PersonalityData {
        let regions = &self.regions;
        self.data.materialize(|field| {
            regions
                .iter()
                .find(|(f, _)| *f == field)
                .and_then(|(_, node_ref)| region_text(node_ref))
        })
    }

    /// Stops the upload flow and cancels pending timers.
    pub fn dispose(&mut self) {
        self.controller.dispose();
        self.settle_timer = None;
        self.upload_timer = None;
    }
}
