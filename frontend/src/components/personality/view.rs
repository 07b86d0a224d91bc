//! View rendering for the personality block.
//!
//! Layout: an aside column with the photo and its two captions, and a main
//! column with name, description and link. Text regions are contenteditable
//! `div`s rendered without children. Their content is owned by the browser and
//! only touched by `populate_regions` and `save`, so re-renders never clobber
//! what the user typed. Placeholders are drawn by CSS from `data-placeholder`.

use web_sys::{Event, KeyboardEvent};
use yew::html::Scope;
use yew::prelude::*;

use common::model::personality::TextField;

use super::helpers::{is_activation_key, photo_background, selected_file};
use super::messages::Msg;
use super::photo::PhotoVisualState;
use super::state::PersonalityBlock;
use super::styles::{self, HostClasses};

pub fn view(block: &PersonalityBlock, ctx: &Context<PersonalityBlock>) -> Html {
    let link = ctx.link();
    let classes = &ctx.props().classes;

    html! {
        <div class={classes!(classes.block.clone(), styles::WRAPPER)}>
            <div class={styles::PHOTO_COLUMN}>
                { build_photo(block, link, classes) }
                { build_regions(block, classes, true) }
            </div>
            <div class={styles::MAIN_COLUMN}>
                { build_regions(block, classes, false) }
            </div>
            { build_file_input(block, link) }
        </div>
    }
}

/// The clickable photo region. Its look is the controller's visual state.
fn build_photo(block: &PersonalityBlock, link: &Scope<PersonalityBlock>, classes: &HostClasses) -> Html {
    let visual = block.controller.visual();
    let class = match visual {
        PhotoVisualState::Loading => classes!(styles::PHOTO, classes.loader.clone()),
        _ => classes!(styles::PHOTO),
    };
    let style = match visual {
        PhotoVisualState::Loaded if block.data.has_photo() => Some(photo_background(&block.data.photo)),
        _ => None,
    };

    html! {
        <div
            class={class}
            style={style}
            ref={block.photo_ref.clone()}
            role="button"
            tabindex="0"
            aria-busy={(visual == PhotoVisualState::Loading).to_string()}
            onclick={link.callback(|_: MouseEvent| Msg::ActivatePhoto)}
            onkeydown={link.batch_callback(|e: KeyboardEvent| {
                if is_activation_key(&e.key()) {
                    e.prevent_default();
                    vec![Msg::ActivatePhoto]
                } else {
                    vec![]
                }
            })}
        />
    }
}

/// Caption regions when `captions` is set, otherwise the main column regions.
fn build_regions(block: &PersonalityBlock, classes: &HostClasses, captions: bool) -> Html {
    block
        .regions
        .iter()
        .filter(|(field, _)| field.is_caption() == captions)
        .map(|(field, node_ref)| build_region(block, classes, *field, node_ref.clone()))
        .collect::<Html>()
}

fn build_region(block: &PersonalityBlock, classes: &HostClasses, field: TextField, node_ref: NodeRef) -> Html {
    html! {
        <div
            key={field.key()}
            class={classes!(classes.input.clone(), styles::field_class(field))}
            ref={node_ref}
            contenteditable="true"
            data-field={field.key()}
            data-placeholder={block.config.placeholder(field).to_string()}
        />
    }
}

fn build_file_input(block: &PersonalityBlock, link: &Scope<PersonalityBlock>) -> Html {
    html! {
        <input
            type="file"
            class={styles::FILE_INPUT}
            hidden={true}
            accept={block.uploader.accept_types().to_string()}
            ref={block.file_input_ref.clone()}
            onchange={link.callback(|e: Event| match selected_file(&e) {
                Some(file) => Msg::PhotoFileSelected(file),
                None => Msg::PhotoSelectionCancelled,
            })}
            oncancel={link.callback(|_: Event| Msg::PhotoSelectionCancelled)}
        />
    }
}
