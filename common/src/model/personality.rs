use serde::{Deserialize, Serialize};

/// The persisted record of a personality block.
///
/// Text fields are the user's edits as read back from the editable regions at
/// save time. `photo` is owned by the upload flow and only changes when an
/// upload succeeds (see [`PhotoSink`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalityData {
    pub name: String,
    pub description: String,
    pub link: String,
    /// URL of the uploaded photo, empty until an upload succeeds.
    pub photo: String,
    pub photo_caption: String,
    pub photo_sub_caption: String,
}

/// The editable text regions of the block, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Name,
    Description,
    Link,
    PhotoCaption,
    PhotoSubCaption,
}

impl TextField {
    pub const ALL: [TextField; 5] = [
        TextField::Name,
        TextField::Description,
        TextField::Link,
        TextField::PhotoCaption,
        TextField::PhotoSubCaption,
    ];

    /// Serialized key of the field in the saved record.
    pub fn key(self) -> &'static str {
        match self {
            TextField::Name => "name",
            TextField::Description => "description",
            TextField::Link => "link",
            TextField::PhotoCaption => "photoCaption",
            TextField::PhotoSubCaption => "photoSubCaption",
        }
    }

    /// Whether the region sits under the photo rather than in the main column.
    pub fn is_caption(self) -> bool {
        matches!(self, TextField::PhotoCaption | TextField::PhotoSubCaption)
    }
}

/// Narrow write access to the photo URL of a record.
///
/// The upload controller receives this instead of the whole record, so the only
/// thing an upload can ever change is the photo.
pub trait PhotoSink {
    fn set_photo(&mut self, url: String);
}

impl PhotoSink for PersonalityData {
    fn set_photo(&mut self, url: String) {
        self.photo = url;
    }
}

impl PersonalityData {
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Name => &self.name,
            TextField::Description => &self.description,
            TextField::Link => &self.link,
            TextField::PhotoCaption => &self.photo_caption,
            TextField::PhotoSubCaption => &self.photo_sub_caption,
        }
    }

    fn text_mut(&mut self, field: TextField) -> &mut String {
        match field {
            TextField::Name => &mut self.name,
            TextField::Description => &mut self.description,
            TextField::Link => &mut self.link,
            TextField::PhotoCaption => &mut self.photo_caption,
            TextField::PhotoSubCaption => &mut self.photo_sub_caption,
        }
    }

    /// Text to pre-populate a region with at render time.
    ///
    /// Returns `None` for empty fields so the region stays empty and its
    /// placeholder shows.
    pub fn initial_text(&self, field: TextField) -> Option<&str> {
        let text = self.text(field);
        (!text.is_empty()).then_some(text)
    }

    /// Reads every text region through `read`, trims the result and stores it.
    ///
    /// A region that cannot be read counts as empty. `photo` is left untouched.
    pub fn materialize<F>(&mut self, mut read: F) -> &Self
    where
        F: FnMut(TextField) -> Option<String>,
    {
        for field in TextField::ALL {
            let value = read(field)
                .map(|text| text.trim().to_string())
                .unwrap_or_default();
            *self.text_mut(field) = value;
        }
        self
    }

    pub fn has_photo(&self) -> bool {
        !self.photo.is_empty()
    }

    /// True when at least one of the six fields carries content.
    ///
    /// Hosts use a `false` result to drop blocks the user left blank.
    pub fn validate(&self) -> bool {
        self.has_photo() || TextField::ALL.iter().any(|&f| !self.text(f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn regions(name: &str) -> impl FnMut(TextField) -> Option<String> + '_ {
        move |field| match field {
            TextField::Name => Some(name.to_string()),
            _ => Some(String::new()),
        }
    }

    #[test]
    fn save_trims_and_defaults_text_fields() {
        let mut data = PersonalityData {
            photo: "https://example.com/old.png".into(),
            description: "stale".into(),
            ..Default::default()
        };

        data.materialize(regions("  Alice  "));

        assert_eq!(data.name, "Alice");
        assert_eq!(data.description, "");
        assert_eq!(data.link, "");
        assert_eq!(data.photo_caption, "");
        assert_eq!(data.photo_sub_caption, "");
        assert_eq!(data.photo, "https://example.com/old.png");
    }

    #[test]
    fn unreadable_region_is_saved_as_empty() {
        let mut data = PersonalityData {
            link: "https://example.com".into(),
            ..Default::default()
        };
        data.materialize(|field| (field != TextField::Link).then(|| "x".to_string()));
        assert_eq!(data.link, "");
        assert_eq!(data.name, "x");
    }

    #[test]
    fn saving_twice_without_edits_is_stable() {
        let mut data = PersonalityData::default();
        let dom = |field: TextField| Some(format!("  {}\n", field.key()));

        let first = data.materialize(dom).clone();
        let second = data.materialize(dom).clone();

        assert_eq!(first, second);
        assert_eq!(second.photo_caption, "photoCaption");
    }

    #[test]
    fn validate_requires_any_content() {
        assert!(!PersonalityData::default().validate());

        let photo_only = PersonalityData {
            photo: "x".into(),
            ..Default::default()
        };
        assert!(photo_only.validate());

        let caption_only = PersonalityData {
            photo_sub_caption: "c".into(),
            ..Default::default()
        };
        assert!(caption_only.validate());
    }

    #[test]
    fn initial_text_skips_empty_fields() {
        let data = PersonalityData {
            name: "Ada".into(),
            ..Default::default()
        };
        assert_eq!(data.initial_text(TextField::Name), Some("Ada"));
        assert_eq!(data.initial_text(TextField::Link), None);
    }

    #[test]
    fn serializes_with_camel_case_keys_and_tolerates_missing_ones() {
        let data: PersonalityData =
            serde_json::from_str(r#"{"name":"Ada","photoCaption":"at work"}"#).unwrap();
        assert_eq!(data.name, "Ada");
        assert_eq!(data.photo_caption, "at work");
        assert_eq!(data.photo, "");

        let json = serde_json::to_value(&data).unwrap();
        for field in TextField::ALL {
            assert!(json.get(field.key()).is_some(), "missing {}", field.key());
        }
        assert_eq!(json["photoSubCaption"], "");
    }

    #[test]
    fn photo_sink_only_touches_photo() {
        let mut data = PersonalityData {
            name: "Ada".into(),
            ..Default::default()
        };
        data.set_photo("https://example.com/a.png".into());
        assert_eq!(data.photo, "https://example.com/a.png");
        assert_eq!(data.name, "Ada");
    }
}
