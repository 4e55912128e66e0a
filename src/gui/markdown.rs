//! Minimal markdown rendering for dashboard text blocks.
//! Supports `#`-headings, `*` bullets, `**bold**`, `*italic*` and `` `code` ``.

use egui::RichText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Heading(u8),
    Bullet,
    Paragraph,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
}

/// Split a line into its kind and the remaining text.
pub fn classify(line: &str) -> (LineKind, &str) {
    let trimmed = line.trim();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
        return (LineKind::Heading(hashes as u8), trimmed[hashes..].trim());
    }
    if let Some(rest) = trimmed
        .strip_prefix("* ")
        .or_else(|| trimmed.strip_prefix("- "))
    {
        return (LineKind::Bullet, rest.trim());
    }
    (LineKind::Paragraph, trimmed)
}

/// Parse inline emphasis markers into styled spans.
pub fn inline_spans(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let (mut bold, mut italic, mut code) = (false, false, false);
    let mut chars = text.chars().peekable();

    let mut flush = |current: &mut String, bold: bool, italic: bool, code: bool| {
        if !current.is_empty() {
            spans.push(Span {
                text: std::mem::take(current),
                bold,
                italic,
                code,
            });
        }
    };

    while let Some(ch) = chars.next() {
        match ch {
            '`' => {
                flush(&mut current, bold, italic, code);
                code = !code;
            }
            '*' if !code => {
                flush(&mut current, bold, italic, code);
                if chars.peek() == Some(&'*') {
                    chars.next();
                    bold = !bold;
                } else {
                    italic = !italic;
                }
            }
            _ => current.push(ch),
        }
    }
    flush(&mut current, bold, italic, code);
    spans
}

fn heading_size(level: u8) -> f32 {
    match level {
        1 => 28.0,
        2 => 22.0,
        3 => 18.0,
        _ => 15.0,
    }
}

/// Draw one markdown block.
pub fn show_markdown(ui: &mut egui::Ui, markdown: &str) {
    for line in markdown.lines() {
        if line.trim().is_empty() {
            ui.add_space(6.0);
            continue;
        }

        let (kind, text) = classify(line);
        let (size, strong) = match kind {
            LineKind::Heading(level) => (heading_size(level), true),
            LineKind::Bullet | LineKind::Paragraph => (14.0, false),
        };

        if let LineKind::Heading(_) = kind {
            ui.add_space(8.0);
        }

        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 0.0;
            if kind == LineKind::Bullet {
                ui.label(RichText::new("  •  ").size(size));
            }
            for span in inline_spans(text) {
                let mut rich = RichText::new(span.text).size(size);
                if strong || span.bold {
                    rich = rich.strong();
                }
                if span.italic {
                    rich = rich.italics();
                }
                if span.code {
                    rich = rich.code();
                }
                ui.label(rich);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, bold: bool, italic: bool) -> Span {
        Span {
            text: text.into(),
            bold,
            italic,
            code: false,
        }
    }

    #[test]
    fn classifies_lines() {
        assert_eq!(
            classify("# 📦 Superstore Sales Dashboard"),
            (LineKind::Heading(1), "📦 Superstore Sales Dashboard")
        );
        assert_eq!(classify("### ✅ Key Takeaways").0, LineKind::Heading(3));
        assert_eq!(classify("* *Discount* (0 – 0.8)"), (LineKind::Bullet, "*Discount* (0 – 0.8)"));
        assert_eq!(classify("#hashtag").0, LineKind::Paragraph);
    }

    #[test]
    fn parses_bold_and_italic() {
        assert_eq!(
            inline_spans("**Technology** drives revenue *and* margin"),
            vec![
                span("Technology", true, false),
                span(" drives revenue ", false, false),
                span("and", false, true),
                span(" margin", false, false),
            ]
        );
    }

    #[test]
    fn code_spans_keep_asterisks() {
        let spans = inline_spans("from `a*b.csv`.");
        assert_eq!(spans.len(), 3);
        assert_eq!(spans[1].text, "a*b.csv");
        assert!(spans[1].code);
        assert!(!spans[1].italic);
    }
}
