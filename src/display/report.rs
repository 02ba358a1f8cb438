//! Report formatting utilities for terminal output

/// Format a percentage already rounded by the money engine
///
/// The value is printed at whatever precision it was rounded to, so a
/// `percent_decimals` setting of 4 shows four places.
pub fn format_percentage(pct: f64) -> String {
    // Avoid printing "-0%"
    let pct = if pct == 0.0 { 0.0 } else { pct };
    format!("{}%", pct)
}

/// Create a simple bar chart representation
pub fn format_bar(value: f64, max_value: f64, width: usize) -> String {
    if max_value <= 0.0 || value <= 0.0 {
        return " ".repeat(width);
    }

    let filled = ((value / max_value) * width as f64).round() as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Truncate to `max_len` characters with an ellipsis
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".chars().take(max_len).collect()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(12.5), "12.5%");
        assert_eq!(format_percentage(66.67), "66.67%");
        assert_eq!(format_percentage(100.0), "100%");
        assert_eq!(format_percentage(0.0), "0%");
        assert_eq!(format_percentage(-25.0), "-25%");
        assert_eq!(format_percentage(-0.0), "0%");
        assert_eq!(format_percentage(33.3333), "33.3333%");
    }

    #[test]
    fn test_format_bar() {
        let bar = format_bar(50.0, 100.0, 10);
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
        assert_eq!(format_bar(0.0, 100.0, 4), "    ");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "He...");
        assert_eq!(truncate("Hi", 5), "Hi");
        assert_eq!(truncate("Educación", 7), "Educ...");
    }
}
