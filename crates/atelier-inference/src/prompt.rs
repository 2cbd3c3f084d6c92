//! Prompt construction for artwork description generation.
//!
//! Each description style maps to a fixed persona instruction; the final
//! prompt combines the persona, the client's brief description, and the
//! target word count. Pure functions, no side effects.

use atelier_core::models::{DescriptionRequest, Style};

/// Returns the persona instruction for a description style.
///
/// The table is total over [`Style`]; the professional default for
/// unrecognized client input is applied at parse time, before lookup.
pub fn persona_instruction(style: Style) -> &'static str {
    match style {
        Style::Professional => {
            "You are an art curator writing professional artwork descriptions."
        }
        Style::Technical => {
            "You are a conservator documenting artworks with technical precision, \
             attentive to materials, process, and surface."
        }
        Style::Poetic => "You are a poet describing artworks in lyrical, evocative language.",
        Style::Philosophical => {
            "You are a philosopher reflecting on the questions an artwork raises \
             about perception, meaning, and existence."
        }
        Style::Scientific => {
            "You are a scientist examining an artwork through the lens of optics, \
             perception, and material analysis."
        }
        Style::Abstract => {
            "You are an abstract thinker describing artworks through pure form, \
             color, and rhythm rather than literal subject matter."
        }
    }
}

/// Generates the vision-model prompt for a validated description request.
///
/// The brief description is interpolated as received; the validator only
/// guarantees it is non-blank.
pub fn describe_prompt(request: &DescriptionRequest) -> String {
    format!(
        "{} Based on the image and this brief description: \"{}\", create a polished, \
         detailed artwork description in this voice. Focus on the visual elements, \
         technique, color palette, composition, and emotional impact. \
         Aim for approximately {} words.",
        persona_instruction(request.style),
        request.short_description,
        request.word_count
    )
}
