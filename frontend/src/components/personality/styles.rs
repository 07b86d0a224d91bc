//! CSS class names used by the block.
//!
//! `HostClasses` are owned by the host editor and passed in through props; the
//! constants below belong to this block and are styled in `styles/personality.css`.

use common::model::personality::TextField;

pub const WRAPPER: &str = "cdx-personality";
pub const MAIN_COLUMN: &str = "cdx-personality__main";
pub const PHOTO_COLUMN: &str = "cdx-personality__aside";
pub const PHOTO: &str = "cdx-personality__photo";
pub const FILE_INPUT: &str = "cdx-personality__file";

/// Class names the host editor provides to every block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostClasses {
    pub block: String,
    pub input: String,
    pub loader: String,
}

impl Default for HostClasses {
    fn default() -> Self {
        Self {
            block: "cdx-block".to_string(),
            input: "cdx-input".to_string(),
            loader: "cdx-loader".to_string(),
        }
    }
}

pub fn field_class(field: TextField) -> &'static str {
    match field {
        TextField::Name => "cdx-personality__name",
        TextField::Description => "cdx-personality__description",
        TextField::Link => "cdx-personality__link",
        TextField::PhotoCaption => "cdx-personality__caption",
        TextField::PhotoSubCaption => "cdx-personality__sub-caption",
    }
}
