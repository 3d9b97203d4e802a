pub const ELLIPSIS: char = '…';

/// Keeps the first `keep` characters and appends an ellipsis if anything was cut.
pub fn excerpt(text: &str, keep: usize) -> String {
    match text.char_indices().nth(keep) {
        Some((cut, _)) => {
            let mut out = text[..cut].to_string();
            out.push(ELLIPSIS);
            out
        }
        None => text.to_string(),
    }
}

/// Fits `text` into `max` characters, ellipsis included.
pub fn clamp(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        excerpt(text, max.saturating_sub(1))
    }
}

/// Joins as many leading `lines` as fit in `max` characters. Lines that do not fit are
/// dropped whole and counted, together with the `hidden` ones, in a `trailer` line.
pub fn fit_lines<F>(lines: &[String], hidden: usize, max: usize, trailer: F) -> String
where
    F: Fn(usize) -> String,
{
    for keep in (0..=lines.len()).rev() {
        let dropped = hidden + lines.len() - keep;
        let mut kept: Vec<String> = lines[..keep].to_vec();
        if dropped > 0 {
            kept.push(trailer(dropped));
        }

        let text = kept.join("\n");
        if text.chars().count() <= max {
            return text;
        }
    }

    clamp(&trailer(hidden + lines.len()), max)
}

pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

pub fn short_sha(sha: &str) -> &str {
    match sha.char_indices().nth(7) {
        Some((cut, _)) => &sha[..cut],
        None => sha,
    }
}
