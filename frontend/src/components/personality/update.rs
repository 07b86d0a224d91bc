//! Update function for the personality block.
//!
//! Every message is an event of the photo upload flow. The controller decides
//! what each event means; this module performs the side effects it asks for:
//! opening the picker, spawning the transmission, and arming the timeout and
//! settle timers. Timers are kept as `Timeout` handles on the block so they die
//! with it.

use gloo_timers::callback::Timeout;
use js_sys::Date;
use web_sys::File;
use yew::platform::spawn_local;
use yew::prelude::*;

use common::model::upload::UploadError;

use super::helpers::open_file_picker;
use super::messages::Msg;
use super::photo::{AttemptId, SETTLE_DELAY_MS};
use super::state::PersonalityBlock;

/// Central update function for the block.
///
/// Returns `true` only when the photo region's look changed.
pub fn update(block: &mut PersonalityBlock, ctx: &Context<PersonalityBlock>, msg: Msg) -> bool {
    match msg {
        Msg::ActivatePhoto => {
            match block.controller.activate() {
                Some(attempt) => {
                    if !open_file_picker(&block.file_input_ref) {
                        gloo_console::error!("photo upload: file input is not mounted");
                    }
                    gloo_console::log!(format!("photo upload {attempt}: awaiting selection"));
                }
                None => gloo_console::log!("photo upload: busy, activation ignored"),
            }
            false
        }
        Msg::PhotoFileSelected(file) => {
            let Some(attempt) = block.controller.awaiting_selection() else {
                return false;
            };
            if let Err(error) = block.uploader.accept(&file) {
                fail_selection(block, ctx, attempt, error);
                return false;
            }
            // The loader must be up before the request leaves.
            if !block.controller.begin_upload(attempt) {
                return false;
            }
            start_transmission(block, ctx, attempt, file);
            true
        }
        Msg::PhotoSelectionCancelled => {
            if let Some(attempt) = block.controller.awaiting_selection() {
                let error = UploadError::Selection("No file selected".to_string());
                fail_selection(block, ctx, attempt, error);
            }
            false
        }
        Msg::PhotoUploadFinished { attempt, result } => {
            if let Err(error) = &result {
                gloo_console::error!(format!("photo upload {attempt}: {error}"));
            }
            if block.controller.complete(attempt, result, &mut block.data) {
                block.upload_timer = None;
                schedule_settle(block, ctx, attempt);
            }
            false
        }
        Msg::PhotoUploadTimedOut(attempt) => {
            let after_ms = block.config.upload_timeout_ms;
            if block.controller.time_out(attempt, after_ms) {
                gloo_console::error!(format!("photo upload {attempt}: no answer after {after_ms} ms"));
                block.upload_timer = None;
                schedule_settle(block, ctx, attempt);
            }
            false
        }
        Msg::PhotoSettled(attempt) => {
            block.settle_timer = None;
            block.controller.settle(attempt, &block.notifier)
        }
    }
}

fn fail_selection(
    block: &mut PersonalityBlock,
    ctx: &Context<PersonalityBlock>,
    attempt: AttemptId,
    error: UploadError,
) {
    gloo_console::log!(format!("photo upload {attempt}: selection failed: {error}"));
    if block.controller.selection_failed(attempt, error) {
        schedule_settle(block, ctx, attempt);
    }
}

fn start_transmission(
    block: &mut PersonalityBlock,
    ctx: &Context<PersonalityBlock>,
    attempt: AttemptId,
    file: File,
) {
    let uploader = block.uploader.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let started = Date::now();
        let result = uploader.upload(file).await;
        gloo_console::log!(format!(
            "photo upload {attempt}: answered after {:.0} ms",
            Date::now() - started
        ));
        link.send_message(Msg::PhotoUploadFinished { attempt, result });
    });

    let link = ctx.link().clone();
    block.upload_timer = Some(Timeout::new(block.config.upload_timeout_ms, move || {
        link.send_message(Msg::PhotoUploadTimedOut(attempt))
    }));
}

fn schedule_settle(block: &mut PersonalityBlock, ctx: &Context<PersonalityBlock>, attempt: AttemptId) {
    let link = ctx.link().clone();
    block.settle_timer = Some(Timeout::new(SETTLE_DELAY_MS, move || {
        link.send_message(Msg::PhotoSettled(attempt))
    }));
}
