use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Word-wrap `text` to `width` display columns.
///
/// Explicit newlines always break. Words wider than the line are split
/// mid-word. An empty input yields a single empty line.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_w = 0;

        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let word_w = word.width();
            let sep = usize::from(line_w > 0);

            if line_w + sep + word_w <= width {
                if sep == 1 {
                    line.push(' ');
                }
                line.push_str(word);
                line_w += sep + word_w;
                continue;
            }

            if line_w > 0 {
                lines.push(std::mem::take(&mut line));
                line_w = 0;
            }

            if word_w <= width {
                line.push_str(word);
                line_w = word_w;
                continue;
            }

            for c in word.chars() {
                let cw = c.width().unwrap_or(0);
                if line_w + cw > width && line_w > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_w = 0;
                }
                line.push(c);
                line_w += cw;
            }
        }
        lines.push(line);
    }

    lines
}

/// Pad `text` with spaces up to `width` display columns.
pub fn pad_to(text: &str, width: usize) -> String {
    let w = text.width();
    if w >= width {
        text.to_string()
    } else {
        format!("{}{}", text, " ".repeat(width - w))
    }
}
