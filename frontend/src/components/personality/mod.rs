//! Personality block: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export the types a host needs (`PersonalityBlock`, `PersonalityProps`,
//!   `HostClasses`, `TOOLBOX`).
//! - Project the record into the editable regions after the first render.
//! - Save when the host bumps `save_request`, reporting `None` for blank blocks.
//! - Dispose of the upload flow when the block is destroyed.

use yew::prelude::*;

mod helpers;
mod messages;
pub mod photo;
mod props;
mod state;
mod styles;
mod update;
mod view;

pub use helpers::show_toast;
pub use messages::Msg;
pub use props::PersonalityProps;
pub use state::PersonalityBlock;
pub use styles::HostClasses;

/// Toolbox entry the host editor lists the block under.
pub struct Toolbox {
    pub icon: &'static str,
    pub title: &'static str,
}

pub const TOOLBOX: Toolbox = Toolbox {
    icon: r#"<svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2"><circle cx="12" cy="8" r="4"/><path d="M4 21c0-4.4 3.6-8 8-8s8 3.6 8 8"/></svg>"#,
    title: "Personality",
};

impl Component for PersonalityBlock {
    type Message = Msg;
    type Properties = PersonalityProps;

    fn create(ctx: &Context<Self>) -> Self {
        PersonalityBlock::new(ctx.props())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.save_request != self.last_save_request {
            self.last_save_request = props.save_request;
            let data = self.save();
            let saved = data.validate().then(|| data.clone());
            props.on_save.emit(saved);
        }
        false
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.populate_regions();
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.dispose();
    }
}
