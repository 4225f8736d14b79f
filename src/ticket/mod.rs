// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Ticket image generation.
//!
//! [`layout`] decides where every string goes, [`render`] paints the plan
//! into a 1200x700 RGBA image and encodes it as PNG.

pub mod layout;
pub mod measure;
pub mod render;

pub use render::{Ticket, TicketRenderer};

/// Errors while producing a ticket image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("Font error: {0}")]
    Font(String),

    #[error("Rasterization failed: {0}")]
    Raster(String),

    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Fixed event copy printed on every ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketText {
    pub title: String,
    pub subtitle: String,
    pub details: [String; 2],
    pub footer: String,
    pub adults_label: String,
    pub kids_label: String,
    /// Confirmation sentence; `{places}` is replaced by the place count.
    pub message_template: String,
}

impl Default for TicketText {
    fn default() -> Self {
        Self {
            title: "Bridget's Birthday Party".to_string(),
            subtitle: "Admission ticket".to_string(),
            details: [
                "Saturday, 14 March 2026 · 17:00".to_string(),
                "Salón Arcoíris, Calle Mayor 12".to_string(),
            ],
            footer: "Show this ticket at the entrance".to_string(),
            adults_label: "Adults".to_string(),
            kids_label: "Kids".to_string(),
            message_template: "We have reserved {places} place(s) for you.".to_string(),
        }
    }
}

impl TicketText {
    /// Confirmation sentence for `places` reserved places.
    pub fn message_for(&self, places: u32) -> String {
        self.message_template
            .replace("{places}", &places.to_string())
    }
}
