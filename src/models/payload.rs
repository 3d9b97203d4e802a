use chrono::{DateTime, Utc};
use serde::Serialize;

/// Body POSTed to the chat webhook. Always carries exactly one embed.
#[derive(Debug, Serialize)]
pub struct NotificationPayload {
    pub username: String,
    pub embeds: [Embed; 1],
}

impl NotificationPayload {
    pub fn new(username: impl Into<String>, embed: Embed) -> Self {
        Self {
            username: username.into(),
            embeds: [embed],
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub author: EmbedAuthor,
    pub fields: Vec<EmbedField>,
    pub footer: EmbedFooter,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct EmbedAuthor {
    pub name: String,
    pub url: String,
    pub icon_url: String,
}

#[derive(Debug, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
}

impl EmbedField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct EmbedFooter {
    pub text: String,
}
