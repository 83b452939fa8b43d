use scraper::{ElementRef, Html};

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "footer", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "td", "th", "tr", "ul",
];

/// Reduces untrusted creative markup to its visible text. Inline elements
/// join their neighbours directly; whitespace in the source and block
/// boundaries become a single space.
pub fn visible_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut raw = String::new();
    collect_text(fragment.root_element(), &mut raw);
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if matches!(name, "script" | "style") {
            continue;
        }
        let block = BLOCK_ELEMENTS.contains(&name);
        if block {
            out.push(' ');
        }
        collect_text(child, out);
        if block {
            out.push(' ');
        }
    }
}

pub fn overflows(text: &str, capacity: usize) -> bool {
    text.chars().count() > capacity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_collapses_whitespace() {
        let text = visible_text("<div>\n  <b>Try</b>   <i>CommendAI</i>\n today</div>");
        assert_eq!(text, "Try CommendAI today");
    }

    #[test]
    fn script_text_is_dropped_and_malformed_markup_survives() {
        let text = visible_text("<p>Sale</p><script>alert(1)</script><p><span>now");
        assert_eq!(text, "Sale now");
    }

    #[test]
    fn inline_elements_do_not_add_spaces() {
        assert_eq!(visible_text("<b>Commend</b>AI"), "CommendAI");
        assert_eq!(visible_text("<p>Commend<i>AI</i> rocks</p>"), "CommendAI rocks");
    }

    #[test]
    fn block_boundaries_separate_words() {
        assert_eq!(visible_text("<div>Top</div><div>picks</div>"), "Top picks");
        assert_eq!(visible_text("line<br>break"), "line break");
    }

    #[test]
    fn overflow_counts_characters_not_bytes() {
        assert!(!overflows("日本語", 3));
        assert!(overflows("日本語!", 3));
    }
}
