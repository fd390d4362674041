use ratatui::prelude::*;

/// Rect of `percent_x` by `percent_y` centered inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Hint line spans: keys in the accent color, descriptions muted.
pub fn hint_spans(hint: &str) -> Vec<Span<'_>> {
    let mut spans = Vec::new();
    for (index, part) in hint.split("  ").enumerate() {
        if index > 0 {
            spans.push(Span::raw("  "));
        }
        match part.split_once(' ') {
            Some((key, description)) => {
                spans.push(Span::styled(key, crate::theme::key_style()));
                spans.push(Span::styled(format!(" {description}"), crate::theme::text_muted()));
            }
            None => spans.push(Span::styled(part, crate::theme::text_muted())),
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_the_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 50, area);
        assert_eq!((popup.width, popup.height), (60, 20));
        assert_eq!((popup.x, popup.y), (20, 10));
    }

    #[test]
    fn hint_keys_are_split_from_descriptions() {
        let spans = hint_spans("Esc back  Enter submit");
        let text: Vec<_> = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, ["Esc", " back", "  ", "Enter", " submit"]);
    }
}
