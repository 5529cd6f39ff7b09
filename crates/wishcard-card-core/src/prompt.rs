//! Prompt synthesis
//!
//! Pure composition of the generation prompt from a validated request and the
//! taxonomy tables. Identical input always yields byte-identical output; no
//! randomness, no external state.

use wishcard_types::CardRequest;

use crate::taxonomy::PromptTaxonomy;

/// The physical-card product photography scene framing every prompt
const SCENE_PREAMBLE: &str = "professional greeting card photography, beautiful physical greeting card standing propped up on a light wooden table, depth-of-field bokeh background with soft blurred celebration elements, dramatic soft studio lighting, high-end stationery product photography";

/// Closing quality descriptor tags
const QUALITY_TAGS: &str = "ultra-detailed, photorealistic, 8K quality, professional photography, perfect composition, beautiful color harmony, premium greeting card, award-winning design, highly detailed illustration, crisp sharp focus on card text";

/// Appended when the output must carry the free-tier mark
pub const WATERMARK_DIRECTIVE: &str =
    " Include a small subtle \"WishCard\" watermark in the bottom-right corner.";

/// Compose the generation prompt for a validated request
///
/// Unknown occasions degrade to a generic celebration phrase embedding the
/// literal occasion name; they never fail.
pub fn build_prompt(taxonomy: &PromptTaxonomy, request: &CardRequest) -> String {
    let background = match taxonomy.occasion_theme(&request.occasion) {
        Some(theme) => theme.to_string(),
        None => format!(
            "beautiful {} themed watercolor background with soft bokeh light orbs, flowers, and celebratory decorations",
            request.occasion
        ),
    };

    let style = taxonomy.style_descriptor(request.style);
    let color = taxonomy.color_descriptor(request.color);

    let effects = request
        .effects
        .iter()
        .map(|effect| taxonomy.effect_clause(*effect))
        .collect::<Vec<_>>()
        .join(", ");

    let mut text_block = format!(
        "The card features the text \"{}\" in {color}, flowing elegant calligraphic script font, large and prominent",
        request.message
    );
    if !effects.is_empty() {
        text_block.push_str(", ");
        text_block.push_str(&effects);
    }
    if let Some(recipient) = non_empty(request.recipient.as_deref()) {
        text_block.push_str(&format!(
            ". Above it in smaller elegant italic script: \"To {recipient}\""
        ));
    }
    if let Some(sender) = non_empty(request.sender.as_deref()) {
        text_block.push_str(&format!(
            ". Below in smaller delicate script: \"From: {sender}\""
        ));
    }

    let mut prompt = format!(
        "{SCENE_PREAMBLE}. The card has a {background}. {style}. {text_block}. \
         All text must be beautifully legible, perfectly centered, harmoniously integrated. {QUALITY_TAGS}."
    );

    if request.add_watermark {
        prompt.push_str(WATERMARK_DIRECTIVE);
    }

    prompt
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wishcard_types::{CardRequest, CardStyle, FontFace, TextColor, TextEffect, TextPosition};

    fn request(occasion: &str, message: &str) -> CardRequest {
        CardRequest {
            occasion: occasion.to_string(),
            message: message.to_string(),
            recipient: None,
            sender: None,
            style: CardStyle::default(),
            font: FontFace::default(),
            color: TextColor::default(),
            position: TextPosition::default(),
            effects: Vec::new(),
            add_watermark: false,
        }
    }

    #[test]
    fn test_prompt_is_deterministic() {
        let taxonomy = PromptTaxonomy::builtin();
        let req = request("birthday", "Happy 40th, Sam!");
        assert_eq!(build_prompt(&taxonomy, &req), build_prompt(&taxonomy, &req));
    }

    #[test]
    fn test_unknown_occasion_embeds_literal_name() {
        let taxonomy = PromptTaxonomy::builtin();
        let req = request("quinceañera", "Felicidades!");
        let prompt = build_prompt(&taxonomy, &req);
        assert!(!prompt.is_empty());
        assert!(prompt.contains("quinceañera"));
        assert!(prompt.contains("themed watercolor background"));
    }

    #[test]
    fn test_watermark_directive_toggles() {
        let taxonomy = PromptTaxonomy::builtin();
        let mut req = request("sympathy", "Thinking of you");
        req.add_watermark = true;
        let with = build_prompt(&taxonomy, &req);
        assert!(with.contains("Thinking of you"));
        assert!(with.contains(WATERMARK_DIRECTIVE.trim()));

        req.add_watermark = false;
        let without = build_prompt(&taxonomy, &req);
        assert!(without.contains("Thinking of you"));
        assert!(!without.contains("WishCard"));
    }

    #[test]
    fn test_effects_join_in_supplied_order() {
        let taxonomy = PromptTaxonomy::builtin();
        let mut req = request("birthday", "Cheers!");
        req.effects = vec![TextEffect::Sparkle, TextEffect::Glow];
        let prompt = build_prompt(&taxonomy, &req);
        let sparkle = prompt.find(taxonomy.effect_clause(TextEffect::Sparkle)).unwrap();
        let glow = prompt.find(taxonomy.effect_clause(TextEffect::Glow)).unwrap();
        assert!(sparkle < glow);
    }

    #[test]
    fn test_recipient_and_sender_clauses_only_when_non_empty() {
        let taxonomy = PromptTaxonomy::builtin();
        let mut req = request("wedding", "Congratulations!");
        req.recipient = Some("Rosa & Lee".to_string());
        req.sender = Some("  ".to_string());
        let prompt = build_prompt(&taxonomy, &req);
        assert!(prompt.contains("\"To Rosa & Lee\""));
        assert!(!prompt.contains("From:"));
    }

    #[test]
    fn test_known_occasion_uses_table_theme() {
        let taxonomy = PromptTaxonomy::builtin();
        let req = request("Just Sold", "123 Main St");
        let prompt = build_prompt(&taxonomy, &req);
        assert!(prompt.contains("sold sign"));
    }
}
