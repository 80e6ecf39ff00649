use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Funny,
    Motivational,
    Encouraging,
}

/// A display string from one of the static message tables.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Message {
    pub id: &'static str,
    pub text: &'static str,
    pub kind: MessageKind,
}

impl Message {
    pub const fn new(id: &'static str, text: &'static str, kind: MessageKind) -> Self {
        Self { id, text, kind }
    }
}
