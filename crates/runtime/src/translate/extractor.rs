//! Raw observation to text blocks.
use nle_core::{RawObservation, decode_latin1};
use tracing::debug;

use super::compass::normalize_compass;
use crate::api::{DescriptionService, Result, TextField};

/// The five text blocks rendered for one observation.
///
/// Blocks are newline separated and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextFields {
    /// Visible tiles, compass words normalized.
    pub vision: String,
    pub message: String,
    pub status: String,
    /// One "<key>: <item>" line per inventory slot.
    pub inventory: String,
    pub cursor: String,
}

impl TextFields {
    pub fn vision_lines(&self) -> impl Iterator<Item = &str> {
        self.vision.split('\n')
    }
}

/// Renders every text block of `observation`.
///
/// Nothing is cached across calls; each field costs one service round trip.
pub async fn extract(
    service: &dyn DescriptionService,
    observation: &RawObservation,
) -> Result<TextFields> {
    let mut fields = TextFields::default();

    for field in TextField::ALL {
        let text = decode_latin1(&service.describe(field, observation).await?);
        match field {
            TextField::Glyphs => fields.vision = normalize_compass(&text),
            TextField::Message => fields.message = text,
            TextField::Blstats => fields.status = text,
            TextField::Inventory => fields.inventory = text,
            TextField::Cursor => fields.cursor = text,
        }
    }

    debug!(
        vision_lines = fields.vision.lines().count(),
        message = %fields.message,
        "Extracted text fields"
    );

    Ok(fields)
}
