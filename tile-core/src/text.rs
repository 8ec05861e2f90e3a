use crate::error::Result;
use crate::metrics::{Metrics, TextStyle};

/// Repair the one mis-decoded character found in source documents.
pub fn normalize(text: &str) -> String {
    text.replace("Â°", "°")
}

/// Greedy word wrap to `max_width` pixels. A single word wider than the
/// limit stays on a line of its own.
pub fn wrap<M: Metrics + ?Sized>(
    text: &str,
    style: TextStyle,
    max_width: i32,
    metrics: &M,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };
        if metrics.text_extent(&candidate, style)?.width <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current = word.to_string();
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    Ok(lines)
}

/// Distance between baselines of consecutive lines.
pub fn line_pitch(style: TextStyle) -> i32 {
    (style.size as f64 * 1.2).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Face, MonospaceMetrics};

    #[test]
    fn normalize_repairs_degree_sign() {
        assert_eq!(normalize("Turn 90Â° left"), "Turn 90° left");
        assert_eq!(normalize("plain"), "plain");
    }

    #[test]
    fn wrap_breaks_on_width() {
        // 10px font: 6px per character.
        let style = TextStyle::new(Face::TitilliumSemiBold, 10);
        let m = MonospaceMetrics::default();
        let lines = wrap("aaa bbb ccc", style, 42, &m).unwrap();
        assert_eq!(lines, vec!["aaa bbb", "ccc"]);
        let lines = wrap("extraordinarily long", style, 30, &m).unwrap();
        assert_eq!(lines, vec!["extraordinarily", "long"]);
        assert!(wrap("   ", style, 30, &m).unwrap().is_empty());
    }
}
