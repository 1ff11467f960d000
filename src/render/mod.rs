mod highlight;

pub use highlight::{highlight, render_instructions};

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{Recipe, SearchHit};

/// Display constants for one card variant.
///
/// The grid and the compact slider intentionally disagree on truncation
/// length and time clamps; keep them as separate presets.
#[derive(Debug, Clone, Copy)]
pub struct CardPreset {
    pub description_chars: usize,
    pub time_divisor: usize,
    pub min_minutes: usize,
    pub max_minutes: usize,
    pub fallback_description: &'static str,
    review_base: usize,
    review_span: usize,
}

/// Full-size cards in the paginated grid.
pub const GRID_CARD: CardPreset = CardPreset {
    description_chars: 120,
    time_divisor: 10,
    min_minutes: 15,
    max_minutes: 120,
    fallback_description: "Delicious recipe.",
    review_base: 5,
    review_span: 100,
};

/// Compact cards in the popular slider.
pub const COMPACT_CARD: CardPreset = CardPreset {
    description_chars: 100,
    time_divisor: 12,
    min_minutes: 15,
    max_minutes: 90,
    fallback_description: "Delicious and easy to make.",
    review_base: 10,
    review_span: 50,
};

const DAY_PANEL_DESCRIPTION_CHARS: usize = 200;
const DEFAULT_MINUTES: usize = 30;

/// Coarse difficulty bucket derived from instruction text length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_instructions(instructions: Option<&str>) -> Self {
        let len = instructions.map_or(0, |text| text.chars().count());
        if len > 500 {
            Difficulty::Hard
        } else if len > 250 {
            Difficulty::Medium
        } else {
            Difficulty::Easy
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

/// Minutes estimate for a card, clamped to the preset's range.
/// Missing or empty instructions fall back to a flat 30.
pub fn estimated_minutes(instructions: Option<&str>, preset: &CardPreset) -> usize {
    match instructions {
        Some(text) if !text.is_empty() => {
            (text.chars().count() / preset.time_divisor)
                .clamp(preset.min_minutes, preset.max_minutes)
        }
        _ => DEFAULT_MINUTES,
    }
}

/// Truncated instruction preview for a card.
pub fn description(instructions: Option<&str>, preset: &CardPreset) -> String {
    match instructions {
        Some(text) if !text.is_empty() => {
            let truncated: String = text.chars().take(preset.description_chars).collect();
            format!("{truncated}...")
        }
        _ => preset.fallback_description.to_string(),
    }
}

/// Decorative review count derived from the recipe id.
/// Hashing instead of rolling a random number keeps card snapshots stable.
pub fn review_count(id: &str, preset: &CardPreset) -> usize {
    preset.review_base + (fnv1a(id.as_bytes()) as usize % preset.review_span)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    hash
}

/// Detail-page URL, optionally carrying the originating search keyword.
pub fn detail_url(id: &str, query: Option<&str>) -> String {
    match query.filter(|q| !q.is_empty()) {
        Some(q) => format!(
            "/recipe.html?id={}&q={}",
            urlencoding::encode(id),
            urlencoding::encode(q)
        ),
        None => format!("/recipe.html?id={}", urlencoding::encode(id)),
    }
}

/// Format minutes the way the cards display them.
pub fn format_time(minutes: usize) -> String {
    if minutes < 60 {
        return format!("{minutes} mins");
    }
    let hours = minutes / 60;
    let mins = minutes % 60;
    if mins > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{hours}h")
    }
}

/// Full-size card for the paginated grid.
pub fn grid_card(recipe: &Recipe, placeholder: &str) -> String {
    let instructions = recipe.instructions.as_deref();
    let difficulty = Difficulty::from_instructions(instructions);
    let minutes = estimated_minutes(instructions, &GRID_CARD);
    let desc = description(instructions, &GRID_CARD);
    let reviews = review_count(&recipe.id, &GRID_CARD);
    let image = recipe.image.as_deref().unwrap_or(placeholder);

    format!(
        concat!(
            "<a class=\"recipe-card\" href=\"{href}\">\n",
            "    <img src=\"{image}\" alt=\"{alt}\" loading=\"lazy\" data-fallback-src=\"{placeholder}\" />\n",
            "    <span class=\"difficulty-badge {difficulty}\">{difficulty}</span>\n",
            "    <div class=\"recipe-info\">\n",
            "        <span class=\"recipe-time\">{time}</span>\n",
            "        <h3>{title}</h3>\n",
            "        <p class=\"recipe-author\">By NomNom Chef</p>\n",
            "        <p class=\"recipe-category\">{category} \u{2022} {area}</p>\n",
            "        <p class=\"recipe-desc\">{desc}</p>\n",
            "        <div class=\"recipe-reviews\">\n",
            "            <div class=\"stars\">\u{2605}\u{2605}\u{2605}\u{2605}\u{2605}</div>\n",
            "            <span>({reviews})</span>\n",
            "        </div>\n",
            "    </div>\n",
            "</a>\n",
        ),
        href = encode_double_quoted_attribute(&detail_url(&recipe.id, None)),
        image = encode_double_quoted_attribute(image),
        alt = encode_double_quoted_attribute(&recipe.title),
        placeholder = encode_double_quoted_attribute(placeholder),
        difficulty = difficulty.as_str(),
        time = format_time(minutes),
        title = encode_text(&recipe.title),
        category = encode_text(&recipe.category),
        area = encode_text(&recipe.area),
        desc = encode_text(&desc),
        reviews = reviews,
    )
}

/// Compact card for the popular slider. Search hits carry no instructions,
/// so those cards land on the preset fallbacks.
pub fn compact_card(recipe: &Recipe, placeholder: &str) -> String {
    let instructions = recipe.instructions.as_deref();
    let difficulty = Difficulty::from_instructions(instructions);
    let minutes = estimated_minutes(instructions, &COMPACT_CARD);
    let desc = description(instructions, &COMPACT_CARD);
    let reviews = review_count(&recipe.id, &COMPACT_CARD);
    let image = recipe.image.as_deref().unwrap_or(placeholder);

    format!(
        concat!(
            "<a class=\"recipe-card\" href=\"{href}\">\n",
            "    <img src=\"{image}\" alt=\"{alt}\" loading=\"lazy\" data-fallback-src=\"{placeholder}\" />\n",
            "    <span class=\"difficulty-badge {difficulty}\">{difficulty}</span>\n",
            "    <div class=\"recipe-info\">\n",
            "        <span class=\"recipe-time\">{time}</span>\n",
            "        <h3>{title}</h3>\n",
            "        <p class=\"recipe-author\">By {area} Chef</p>\n",
            "        <p class=\"recipe-desc\">{desc}</p>\n",
            "        <div class=\"recipe-reviews\">\n",
            "            <div class=\"stars\">\u{2605}\u{2605}\u{2605}\u{2605}\u{2605}</div>\n",
            "            <span>({reviews})</span>\n",
            "        </div>\n",
            "    </div>\n",
            "</a>\n",
        ),
        href = encode_double_quoted_attribute(&detail_url(&recipe.id, None)),
        image = encode_double_quoted_attribute(image),
        alt = encode_double_quoted_attribute(&recipe.title),
        placeholder = encode_double_quoted_attribute(placeholder),
        difficulty = difficulty.as_str(),
        time = format_time(minutes),
        title = encode_text(&recipe.title),
        area = encode_text(&recipe.area),
        desc = encode_text(&desc),
        reviews = reviews,
    )
}

/// Sidebar panel for the recipe of the day.
pub fn day_panel(recipe: &Recipe, placeholder: &str) -> String {
    let desc = match recipe.instructions.as_deref() {
        Some(text) if !text.is_empty() => {
            let truncated: String = text.chars().take(DAY_PANEL_DESCRIPTION_CHARS).collect();
            format!("{truncated}...")
        }
        _ => "Delicious recipe. Click to view more details.".to_string(),
    };
    let image = recipe.image.as_deref().unwrap_or(placeholder);

    format!(
        concat!(
            "<a class=\"recipe-of-the-day\" href=\"{href}\">\n",
            "    <img src=\"{image}\" alt=\"{alt}\" data-fallback-src=\"{placeholder}\" />\n",
            "    <h3>{title}</h3>\n",
            "    <p class=\"recipe-author\">By {area} Chef</p>\n",
            "    <p class=\"recipe-desc\">{desc}</p>\n",
            "</a>\n",
        ),
        href = encode_double_quoted_attribute(&detail_url(&recipe.id, None)),
        image = encode_double_quoted_attribute(image),
        alt = encode_double_quoted_attribute(&recipe.title),
        placeholder = encode_double_quoted_attribute(placeholder),
        title = encode_text(&recipe.title),
        area = encode_text(&recipe.area),
        desc = encode_text(&desc),
    )
}

/// One row of the live suggestion dropdown.
pub fn suggestion_item(hit: &SearchHit, query: &str, placeholder: &str) -> String {
    let image = hit.image.as_deref().unwrap_or(placeholder);
    let match_pct = (hit.score * 100.0).round() as i64;

    format!(
        concat!(
            "<a class=\"search-result-item\" href=\"{href}\">\n",
            "    <img src=\"{image}\" alt=\"{alt}\" class=\"search-result-image\" />\n",
            "    <div class=\"search-result-info\">\n",
            "        <h4 class=\"search-result-title\">{title}</h4>\n",
            "        <p class=\"search-result-meta\">{category} \u{2022} {area}</p>\n",
            "        <p class=\"search-result-score\">Match: {match_pct}%</p>\n",
            "    </div>\n",
            "</a>\n",
        ),
        href = encode_double_quoted_attribute(&detail_url(&hit.id, Some(query))),
        image = encode_double_quoted_attribute(image),
        alt = encode_double_quoted_attribute(&hit.title),
        title = encode_text(&hit.title),
        category = encode_text(&hit.category),
        area = encode_text(&hit.area),
        match_pct = match_pct,
    )
}

/// The whole dropdown body for a set of hits.
pub fn suggestion_list(hits: &[SearchHit], query: &str, placeholder: &str) -> String {
    if hits.is_empty() {
        return no_results_fragment("No results found");
    }
    hits.iter()
        .map(|hit| suggestion_item(hit, query, placeholder))
        .collect()
}

pub fn no_results_fragment(message: &str) -> String {
    format!(
        "<div class=\"search-no-results\">{}</div>",
        encode_text(message)
    )
}
