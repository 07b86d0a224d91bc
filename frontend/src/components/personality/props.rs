//! Properties through which the host editor drives a personality block.

use yew::prelude::*;

use common::model::config::PersonalityConfig;
use common::model::personality::PersonalityData;

use super::styles::HostClasses;

#[derive(Properties, PartialEq, Clone)]
pub struct PersonalityProps {
    /// Record the block is rendered from. Only read when the block is created.
    #[prop_or_default]
    pub data: PersonalityData,

    #[prop_or_default]
    pub config: PersonalityConfig,

    #[prop_or_default]
    pub classes: HostClasses,

    /// Save counter. Every change makes the block read its regions back into the
    /// record and report it through `on_save`.
    #[prop_or_default]
    pub save_request: u32,

    /// Receives the saved record, or `None` when every field is empty and the
    /// host should drop the block.
    #[prop_or_default]
    pub on_save: Callback<Option<PersonalityData>>,
}
