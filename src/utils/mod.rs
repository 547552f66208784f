use scraper::{ElementRef, Node};

const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "dd", "div", "dl", "dt", "figcaption", "figure",
    "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p",
    "pre", "section", "table", "tr", "ul",
];

/// Visible text of an element with `<br>` and block boundaries turned into
/// line breaks. `script` and `style` contents are dropped entirely.
pub fn render_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    render_children(element, &mut out);
    out
}

fn render_children(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => push_collapsed(out, text),
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    render_element(child, out);
                }
            }
            _ => {}
        }
    }
}

fn render_element(element: ElementRef<'_>, out: &mut String) {
    let name = element.value().name();
    match name {
        "br" => out.push('\n'),
        "script" | "style" | "noscript" | "template" => {}
        _ => {
            let block = BLOCK_TAGS.contains(&name);
            if block {
                break_line(out);
            }
            render_children(element, out);
            if block {
                break_line(out);
            }
        }
    }
}

fn break_line(out: &mut String) {
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
}

// Source whitespace renders as a single space, as in a browser.
fn push_collapsed(out: &mut String, text: &str) {
    let mut pending_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            pending_space = true;
        } else {
            if pending_space && !out.is_empty() && !out.ends_with('\n') && !out.ends_with(' ') {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        }
    }
    if pending_space && !out.is_empty() && !out.ends_with('\n') && !out.ends_with(' ') {
        out.push(' ');
    }
}

/// Trim every line, collapse runs of blank lines to a single blank line and
/// trim the whole text.
pub fn normalize_lyrics(raw: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = false;

    for line in raw.lines().map(str::trim) {
        if line.is_empty() {
            if !blank_run && !lines.is_empty() {
                lines.push("");
            }
            blank_run = true;
        } else {
            lines.push(line);
            blank_run = false;
        }
    }

    while lines.last() == Some(&"") {
        lines.pop();
    }

    lines.join("\n")
}

/// Split `text` into pieces of at most `size` characters.
pub fn chunk_text(text: &str, size: usize) -> Vec<String> {
    let size = size.max(1);
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(size)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn render(html: &str) -> String {
        let doc = Html::parse_document(html);
        let selector = Selector::parse("div").unwrap();
        let el = doc.select(&selector).next().unwrap();
        render_text(el)
    }

    #[test]
    fn test_br_becomes_newline() {
        assert_eq!(render("<div>one<br>two<br/>three</div>"), "one\ntwo\nthree");
    }

    #[test]
    fn test_script_is_dropped() {
        let text = render("<div>sing<script>alert('x')</script> along</div>");
        assert!(!text.contains("alert"));
        assert_eq!(text, "sing along");
    }

    #[test]
    fn test_blocks_are_separated() {
        let text = render("<div><p>verse one</p><p>verse two</p></div>");
        assert_eq!(normalize_lyrics(&text), "verse one\nverse two");
    }

    #[test]
    fn test_inline_markup_keeps_words_together() {
        let text = render("<div>Is this the <a href=\"/x\">real life</a>?<br>Is this <i>just</i> fantasy?</div>");
        assert_eq!(text, "Is this the real life?\nIs this just fantasy?");
    }

    #[test]
    fn test_normalize_collapses_blank_runs() {
        assert_eq!(normalize_lyrics("\n\n a \n\n\n\n b\n  \n\t\nc\n\n"), "a\n\nb\n\nc");
    }

    #[test]
    fn test_chunk_text_respects_char_boundaries() {
        let chunks = chunk_text("ééééé", 2);
        assert_eq!(chunks, vec!["éé", "éé", "é"]);
        assert!(chunk_text("", 10).is_empty());
    }
}
