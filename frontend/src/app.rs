//! Demo host page: a minimal stand-in for a block editor.
//!
//! It lists personality blocks, adds new ones from the toolbox button, and on
//! "Save" collects every block's record, dropping blocks that report empty.
//! The saved document is printed below the blocks and to the console.

use serde_json::json;
use uuid::Uuid;
use yew::virtual_dom::AttrValue;
use yew::{html, Component, Context, Html};

use common::model::config::PersonalityConfig;
use common::model::personality::PersonalityData;

use crate::components::personality::photo::Severity;
use crate::components::personality::{show_toast, PersonalityBlock, TOOLBOX};

const UPLOAD_ENDPOINT: &str = "/api/uploads/image";

pub enum Msg {
    AddBlock,
    SaveAll,
    BlockSaved(Uuid, Option<PersonalityData>),
}

struct BlockEntry {
    id: Uuid,
    data: PersonalityData,
    /// Result of the current save round, once reported.
    saved: Option<Option<PersonalityData>>,
}

pub struct App {
    blocks: Vec<BlockEntry>,
    config: PersonalityConfig,
    save_request: u32,
    output: Option<String>,
}

impl App {
    fn new_block(data: PersonalityData) -> BlockEntry {
        BlockEntry {
            id: Uuid::new_v4(),
            data,
            saved: None,
        }
    }

    /// Builds the saved document once every block has answered.
    fn finish_save(&mut self) {
        if self.blocks.iter().any(|b| b.saved.is_none()) {
            return;
        }

        let total = self.blocks.len();
        self.blocks.retain(|b| matches!(b.saved, Some(Some(_))));
        let (summary, severity) = save_summary(self.blocks.len(), total - self.blocks.len());
        show_toast(&summary, severity);

        let saved: Vec<_> = self
            .blocks
            .iter_mut()
            .filter_map(|b| {
                let data = b.saved.take().flatten()?;
                b.data = data.clone();
                Some(json!({ "id": b.id, "type": "personality", "data": data }))
            })
            .collect();

        match serde_json::to_string_pretty(&json!({ "blocks": saved })) {
            Ok(document) => {
                gloo_console::log!(document.clone());
                self.output = Some(document);
            }
            Err(err) => gloo_console::error!(format!("could not serialize document: {err}")),
        }
    }
}

/// Toast text for a finished save round.
fn save_summary(saved: usize, dropped: usize) -> (String, Severity) {
    let plural = |n: usize| if n == 1 { "" } else { "s" };
    match (saved, dropped) {
        (0, 0) => ("Nothing to save".to_string(), Severity::Info),
        (0, d) => (format!("Dropped {d} empty block{}", plural(d)), Severity::Info),
        (s, 0) => (format!("Saved {s} block{}", plural(s)), Severity::Success),
        (s, d) => (
            format!("Saved {s} block{}, dropped {d} empty", plural(s)),
            Severity::Success,
        ),
    }
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            blocks: vec![Self::new_block(PersonalityData::default())],
            config: PersonalityConfig {
                endpoint: UPLOAD_ENDPOINT.to_string(),
                ..PersonalityConfig::default()
            },
            save_request: 0,
            output: None,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::AddBlock => {
                self.blocks.push(Self::new_block(PersonalityData::default()));
                true
            }
            Msg::SaveAll => {
                for block in &mut self.blocks {
                    block.saved = None;
                }
                if self.blocks.is_empty() {
                    self.finish_save();
                } else {
                    self.save_request += 1;
                }
                true
            }
            Msg::BlockSaved(id, data) => {
                if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
                    block.saved = Some(data);
                }
                self.finish_save();
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let blocks = self
            .blocks
            .iter()
            .map(|block| {
                let id = block.id;
                html! {
                    <PersonalityBlock
                        key={id.to_string()}
                        data={block.data.clone()}
                        config={self.config.clone()}
                        save_request={self.save_request}
                        on_save={link.callback(move |data| Msg::BlockSaved(id, data))}
                    />
                }
            })
            .collect::<Html>();

        html! {
            <div class="editor">
                { blocks }
                <div class="editor-toolbar">
                    <button class="icon-btn" title={TOOLBOX.title} onclick={link.callback(|_| Msg::AddBlock)}>
                        { Html::from_html_unchecked(AttrValue::from(TOOLBOX.icon)) }
                        <span class="icon-label">{ TOOLBOX.title }</span>
                    </button>
                    <button class="icon-btn" onclick={link.callback(|_| Msg::SaveAll)}>
                        <span class="icon-label">{ "Save" }</span>
                    </button>
                </div>
                {
                    match &self.output {
                        Some(document) => html! { <pre class="editor-output">{ document.clone() }</pre> },
                        None => html! {},
                    }
                }
            </div>
        }
    }
}
