use crate::input::CursorPos;
use crate::ui::span::{SpanLine, WrapMode};
use crate::ui::style::Color;

pub fn lines_to_json(lines: &[SpanLine], cursor: Option<CursorPos>) -> serde_json::Value {
    let cursor = cursor.map(|c| {
        serde_json::json!({
            "row": c.row,
            "col": c.col,
        })
    });

    let lines = lines
        .iter()
        .map(|line| {
            serde_json::Value::Array(
                line.iter()
                    .map(|span| {
                        serde_json::json!({
                            "text": span.text,
                            "wrap_mode": match span.wrap_mode {
                                WrapMode::NoWrap => "no_wrap",
                                WrapMode::Wrap => "wrap",
                            },
                            "style": {
                                "color": span.style.color.map(color_to_json),
                                "background": span.style.background.map(color_to_json),
                                "bold": span.style.bold,
                                "italic": span.style.italic,
                            }
                        })
                    })
                    .collect(),
            )
        })
        .collect::<Vec<_>>();

    serde_json::json!({
        "cursor": cursor,
        "lines": lines,
    })
}

fn color_to_json(color: Color) -> serde_json::Value {
    let name = match color {
        Color::DarkGrey => "dark_grey",
        Color::Green => "green",
        Color::Yellow => "yellow",
        Color::Blue => "blue",
        Color::Magenta => "magenta",
        Color::Cyan => "cyan",
        Color::White => "white",
    };
    serde_json::json!(name)
}

#[cfg(test)]
mod tests {
    use super::lines_to_json;
    use crate::input::CursorPos;
    use crate::ui::span::Span;
    use crate::ui::style::{Color, Style};

    #[test]
    fn encodes_spans_and_cursor() {
        let lines = vec![vec![
            Span::new("1 → ").no_wrap(),
            Span::styled("Hello", Style::new().color(Color::Cyan).bold()),
        ]];
        let json = lines_to_json(&lines, Some(CursorPos { col: 3, row: 0 }));
        assert_eq!(json["cursor"]["col"], 3);
        assert_eq!(json["lines"][0][0]["wrap_mode"], "no_wrap");
        assert_eq!(json["lines"][0][1]["style"]["color"], "cyan");
        assert_eq!(json["lines"][0][1]["style"]["bold"], true);
    }
}
