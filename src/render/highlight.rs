use html_escape::encode_text;

/// Wrap case-insensitive matches of `keyword` in `<mark>`, escaping all text.
/// The matched text keeps its original casing.
pub fn highlight(text: &str, keyword: &str) -> String {
    if keyword.is_empty() || text.is_empty() {
        return encode_text(text).into_owned();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let key: Vec<char> = keyword.chars().collect();

    let mut out = String::with_capacity(text.len());
    let mut plain_start = 0;
    let mut i = 0;

    while i + key.len() <= chars.len() {
        if matches_at(&chars, i, &key) {
            let start = chars[i].0;
            let end = chars
                .get(i + key.len())
                .map_or(text.len(), |(offset, _)| *offset);
            out.push_str(&encode_text(&text[plain_start..start]));
            out.push_str("<mark>");
            out.push_str(&encode_text(&text[start..end]));
            out.push_str("</mark>");
            plain_start = end;
            i += key.len();
        } else {
            i += 1;
        }
    }

    out.push_str(&encode_text(&text[plain_start..]));
    out
}

fn matches_at(chars: &[(usize, char)], at: usize, key: &[char]) -> bool {
    chars[at..at + key.len()]
        .iter()
        .zip(key)
        .all(|((_, a), b)| a.to_lowercase().eq(b.to_lowercase()))
}

/// Render instruction text as paragraph fragments with optional highlighting.
///
/// CRLF is normalized, blank lines are dropped, and lines beginning with a
/// "STEP <n> - <title>" shaped header are bolded before per-line highlighting.
pub fn render_instructions(instructions: Option<&str>, keyword: Option<&str>) -> String {
    let text = match instructions {
        Some(text) if !text.is_empty() => text,
        _ => return "<p>Cooking instructions not available.</p>".to_string(),
    };

    let keyword = keyword.unwrap_or("");
    let normalized = text.replace("\r\n", "\n");

    normalized
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if is_step_header(line) {
                format!("<p><strong>{}</strong></p>", highlight(line, keyword))
            } else {
                format!("<p>{}</p>", highlight(line, keyword))
            }
        })
        .collect()
}

/// True for lines shaped like "STEP 1 - Sear the beef".
/// Accepts a hyphen, en dash, em dash or colon as the separator.
fn is_step_header(line: &str) -> bool {
    let Some(rest) = strip_prefix_ignore_ascii_case(line, "STEP") else {
        return false;
    };
    let after_space = rest.trim_start();
    if after_space.len() == rest.len() {
        // "STEPx" without whitespace is not a header
        return false;
    }
    let after_digits = after_space.trim_start_matches(|c: char| c.is_ascii_digit());
    if after_digits.len() == after_space.len() {
        return false;
    }
    let mut tail = after_digits.trim_start().chars();
    matches!(tail.next(), Some('-' | '\u{2013}' | '\u{2014}' | ':'))
        && !tail.as_str().trim().is_empty()
}

fn strip_prefix_ignore_ascii_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    if s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
    {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}
