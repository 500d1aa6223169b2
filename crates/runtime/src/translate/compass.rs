//! Compass-word normalization for vision text.
use nle_core::CompassDirection;

/// Splits every concatenated primary/diagonal pair ("eastnortheast") into two
/// words ("east northeast").
///
/// Applying it twice yields the same text as applying it once.
pub fn normalize_compass(vision: &str) -> String {
    let mut text = vision.to_string();
    for primary in CompassDirection::PRIMARY {
        for secondary in CompassDirection::SECONDARY {
            let joined = format!("{}{}", primary.as_str(), secondary.as_str());
            if text.contains(&joined) {
                let spaced = format!("{} {}", primary.as_str(), secondary.as_str());
                text = text.replace(&joined, &spaced);
            }
        }
    }
    text
}
