/// Shortcode to glyph table: the gitmoji set plus a few common extras.
/// Sorted by code so lookups can binary search.
static EMOJI: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("-1", "👎"),
    ("adhesive_bandage", "🩹"),
    ("alembic", "⚗️"),
    ("alien", "👽"),
    ("ambulance", "🚑️"),
    ("apple", "🍎"),
    ("arrow_down", "⬇️"),
    ("arrow_up", "⬆️"),
    ("art", "🎨"),
    ("bento", "🍱"),
    ("bookmark", "🔖"),
    ("boom", "💥"),
    ("bricks", "🧱"),
    ("bug", "🐛"),
    ("building_construction", "🏗️"),
    ("bulb", "💡"),
    ("busts_in_silhouette", "👥"),
    ("camera_flash", "📸"),
    ("card_file_box", "🗃️"),
    ("chart_with_upwards_trend", "📈"),
    ("check_mark", "✔️"),
    ("checkered_flag", "🏁"),
    ("children_crossing", "🚸"),
    ("clown_face", "🤡"),
    ("coffin", "⚰️"),
    ("construction", "🚧"),
    ("construction_worker", "👷"),
    ("dizzy", "💫"),
    ("egg", "🥚"),
    ("fire", "🔥"),
    ("globe_with_meridians", "🌐"),
    ("goal_net", "🥅"),
    ("green_heart", "💚"),
    ("hammer", "🔨"),
    ("heavy_check_mark", "✔️"),
    ("heavy_minus_sign", "➖"),
    ("heavy_plus_sign", "➕"),
    ("iphone", "📱"),
    ("label", "🏷️"),
    ("lipstick", "💄"),
    ("lock", "🔒️"),
    ("loud_sound", "🔊"),
    ("mag", "🔍️"),
    ("memo", "📝"),
    ("money_with_wings", "💸"),
    ("monocle_face", "🧐"),
    ("mute", "🔇"),
    ("necktie", "👔"),
    ("new", "🆕"),
    ("package", "📦️"),
    ("page_facing_up", "📄"),
    ("passport_control", "🛂"),
    ("pencil", "📝"),
    ("pencil2", "✏️"),
    ("penguin", "🐧"),
    ("poop", "💩"),
    ("pushpin", "📌"),
    ("recycle", "♻️"),
    ("rewind", "⏪️"),
    ("robot", "🤖"),
    ("rocket", "🚀"),
    ("rotating_light", "🚨"),
    ("safety_vest", "🦺"),
    ("see_no_evil", "🙈"),
    ("seedling", "🌱"),
    ("sparkles", "✨"),
    ("speech_balloon", "💬"),
    ("stethoscope", "🩺"),
    ("tada", "🎉"),
    ("technologist", "🧑‍💻"),
    ("test_tube", "🧪"),
    ("thread", "🧵"),
    ("triangular_flag_on_post", "🚩"),
    ("truck", "🚚"),
    ("twisted_rightwards_arrows", "🔀"),
    ("wastebasket", "🗑️"),
    ("wheelchair", "♿️"),
    ("white_check_mark", "✅"),
    ("wrench", "🔧"),
    ("zap", "⚡️"),
];

/// Glyph for a shortcode given without its colons, e.g. `bug`
pub fn glyph(code: &str) -> Option<&'static str> {
    EMOJI
        .binary_search_by(|(candidate, _)| candidate.cmp(&code))
        .ok()
        .map(|idx| EMOJI[idx].1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_and_unique() {
        for pair in EMOJI.windows(2) {
            assert!(pair[0].0 < pair[1].0, "{} must sort before {}", pair[0].0, pair[1].0);
        }
    }

    #[test]
    fn test_known_codes() {
        assert_eq!(glyph("bug"), Some("🐛"));
        assert_eq!(glyph("sparkles"), Some("✨"));
        assert_eq!(glyph("+1"), Some("👍"));
        assert_eq!(glyph("zap"), Some("⚡️"));
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        assert_eq!(glyph("not_an_emoji"), None);
        assert_eq!(glyph("BUG"), None);
        assert_eq!(glyph(""), None);
    }
}
