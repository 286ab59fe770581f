use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeVariant {
    Default,
    Destructive,
}

/// Toast-style notification returned alongside a result for the page to display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn success(title: &str, description: &str) -> Self {
        Self {
            variant: NoticeVariant::Default,
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    pub fn failure(title: &str, description: &str) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}
