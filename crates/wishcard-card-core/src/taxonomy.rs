//! Prompt taxonomy tables
//!
//! The descriptive text behind every prompt: occasion background themes,
//! style descriptors, text color materials, and effect clauses. Held as an
//! explicit versioned value handed to the synthesizer so the mapping can be
//! tested and extended independently of the synthesis itself.

use std::collections::HashMap;

use wishcard_types::{CardStyle, TextColor, TextEffect};

/// Occasion-specific background themes, keyed by lowercase occasion label
const OCCASION_THEMES: &[(&str, &str)] = &[
    ("birthday", "soft pastel rainbow watercolor background with delicate bokeh light orbs, colorful balloons, gold star confetti, curling ribbons and streamers, small hearts, magical celebration atmosphere"),
    ("wedding", "elegant ivory and blush rose petal background with soft golden bokeh, white roses, pearl accents, romantic candlelight glow, luxurious satin texture"),
    ("anniversary", "deep romantic burgundy and rose gold background with soft bokeh, red roses, golden sparkles, elegant lace pattern, warm candlelight atmosphere"),
    ("christmas", "rich deep green and red background with golden bokeh lights, Christmas ornaments, pine branches, snowflakes, warm festive glow, holly berries"),
    ("graduation", "navy blue and gold academic background with subtle bokeh, laurel wreath, stars, diploma scroll accents, celebratory confetti"),
    ("thank you", "warm peach and cream watercolor background with soft floral accents, small flowers, gentle bokeh, gratitude and warmth atmosphere"),
    ("get well", "soft mint and lavender watercolor background with daisies, gentle bokeh light, warm healing sunshine rays, delicate flower petals"),
    ("new year", "deep midnight blue background with gold and silver fireworks, bokeh sparkles, champagne bubbles, confetti, celebratory atmosphere"),
    ("valentine", "deep romantic red and pink background with golden bokeh, red and pink roses, heart shapes, velvet texture, passion and love atmosphere"),
    ("easter", "bright pastel spring background with colorful easter eggs, bunnies, spring flowers, soft sunshine, joyful atmosphere"),
    ("mother's day", "soft pink and lilac floral background with carnations, roses, gentle bokeh, warm loving atmosphere, elegant script"),
    ("just sold", "professional real estate background with blurred modern luxury home key in hand, sold sign, bokeh city lights, success and celebration atmosphere"),
    ("business thank you", "clean professional corporate background with geometric patterns, navy blue and gold accents, premium stationery feel"),
    ("work anniversary", "professional office celebration background with balloons, confetti, clean modern desk setting, success atmosphere"),
    ("new job", "dynamic modern background with upward momentum arrows, bright future lighting, clean professional desk, success atmosphere"),
    // Baby & kids
    ("baby shower", "soft pastel blue and pink watercolor background with clouds, stars, cute animals, gentle bokeh, sweet atmosphere"),
    ("new baby", "soft dreamy clouds and moon background, gentle lullaby atmosphere, pastel yellow and mint green, baby rattle accents"),
    ("first birthday", "bright colorful fun background with number one balloon, confetti, cake, primary colors, joyful atmosphere"),
    // Sympathy
    ("sympathy", "peaceful serene nature background with still water, white lilies, soft misty light, gentle comfort atmosphere, muted calming colors"),
    ("pet sympathy", "soft rainbow bridge background with clouds, paw prints in sand, gentle golden hour light, peaceful memory atmosphere"),
    // Religious & cultural
    ("baptism", "pure white and gold background with dove, cross, water droplets, soft heavenly light, sacred atmosphere"),
    ("bar mitzvah", "deep royal blue and silver background with star of david, torah scroll, celebratory bokeh, elegant tradition"),
    ("eid", "deep emerald green and gold background with crescent moon, intricate geometric patterns, lanterns, festive night atmosphere"),
    ("diwali", "vibrant orange and purple background with diya oil lamps, rangoli patterns, golden sparkles, festival of lights atmosphere"),
    ("hanukkah", "classic blue and silver background with menorah, dreidel, gelt coins, warm candlelight, family celebration"),
    // Realtor & business
    ("open house", "modern bright real estate background with 'welcome' sign, front door key, sunlight, inviting atmosphere"),
    ("referral thank you", "premium gold and black professional background with handshake icon, success, gratitude, corporate luxury"),
    ("market update", "modern infographic style background with upward trend line, city skyline, professional blue tones, business data"),
];

/// Versioned lookup tables consumed by the prompt synthesizer
///
/// The occasion table is open (unknown occasions fall back at synthesis time);
/// the style, color, and effect lookups are total over their enums.
#[derive(Debug, Clone)]
pub struct PromptTaxonomy {
    version: u32,
    occasion_themes: HashMap<&'static str, &'static str>,
}

impl PromptTaxonomy {
    /// The built-in taxonomy shipped with this release
    pub fn builtin() -> Self {
        Self {
            version: 1,
            occasion_themes: OCCASION_THEMES.iter().copied().collect(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Background theme for an occasion, case-insensitive; `None` for
    /// occasions outside the table
    pub fn occasion_theme(&self, occasion: &str) -> Option<&'static str> {
        self.occasion_themes
            .get(occasion.to_lowercase().as_str())
            .copied()
    }

    /// Visual quality descriptor for a card style
    pub fn style_descriptor(&self, style: CardStyle) -> &'static str {
        match style {
            CardStyle::Modern => "clean contemporary design, vibrant gradient tones, sharp modern aesthetic",
            CardStyle::Classic => "timeless elegant design, ornate decorative borders, refined classical aesthetic",
            CardStyle::Playful => "whimsical fun design, bright cheerful saturated colors, illustrated charm",
            CardStyle::Elegant => "sophisticated luxury design, rich deep tones, gold foil accents, premium feel",
            CardStyle::Minimalist => "clean minimal design, generous white space, single refined accent color",
        }
    }

    /// Material quality descriptor for a text color
    pub fn color_descriptor(&self, color: TextColor) -> &'static str {
        match color {
            TextColor::Gold => "shimmering 24k gold metallic foil, embossed gold script with warm light reflection",
            TextColor::White => "crisp bright white text with subtle inner glow and soft shadow",
            TextColor::Black => "deep charcoal black text with sharp precision and subtle shadow",
            TextColor::Pink => "rose gold metallic pink text with warm shimmer",
            TextColor::Blue => "deep sapphire blue text with subtle metallic sheen",
            TextColor::Green => "rich emerald green text with natural depth and subtle glow",
        }
    }

    /// Descriptive clause for a text effect
    pub fn effect_clause(&self, effect: TextEffect) -> &'static str {
        match effect {
            TextEffect::Glow => "with radiant soft glow halo around letters",
            TextEffect::Shadow => "with elegant long drop shadow",
            TextEffect::Gradient => "with beautiful gradient color sweep across letters",
            TextEffect::Sparkle => "surrounded by tiny sparkle stars and glitter accents",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_occasion_lookup_is_case_insensitive() {
        let taxonomy = PromptTaxonomy::builtin();
        assert_eq!(
            taxonomy.occasion_theme("Birthday"),
            taxonomy.occasion_theme("birthday")
        );
        assert!(taxonomy.occasion_theme("birthday").is_some());
    }

    #[test]
    fn test_unknown_occasion_misses() {
        let taxonomy = PromptTaxonomy::builtin();
        assert!(taxonomy.occasion_theme("quinceañera").is_none());
    }

    #[test]
    fn test_multi_word_occasions_present() {
        let taxonomy = PromptTaxonomy::builtin();
        for occasion in ["just sold", "mother's day", "pet sympathy", "bar mitzvah"] {
            assert!(taxonomy.occasion_theme(occasion).is_some(), "missing: {occasion}");
        }
    }

    #[test]
    fn test_builtin_version() {
        assert_eq!(PromptTaxonomy::builtin().version(), 1);
    }
}
