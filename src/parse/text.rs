use scraper::ElementRef;

/// All text below `element`, concatenated in document order and left untrimmed.
pub fn text_of(element: ElementRef) -> String {
    element.text().collect()
}

/// The cell's markup with each line break turned into `\n`, keeping multi-line menus intact.
pub fn lines_of(element: ElementRef) -> String {
    // html5ever serializes every <br/> variant as <br>
    element.inner_html().replace("<br>", "\n")
}

/// The `n`th element child (1-based), counting every element the way `:nth-child` does.
pub fn nth_child(element: ElementRef, n: usize) -> Option<ElementRef> {
    n.checked_sub(1)
        .and_then(|i| element.children().filter_map(ElementRef::wrap).nth(i))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    fn first<'a>(html: &'a Html, css: &str) -> ElementRef<'a> {
        html.select(&Selector::parse(css).unwrap()).next().unwrap()
    }

    #[test]
    fn test_lines_of() {
        let html = Html::parse_fragment("<table><tr><td>밥<br/><br>국<BR />김치</td></tr></table>");
        assert_eq!(lines_of(first(&html, "td")), "밥\n\n국\n김치");
    }

    #[test]
    fn test_text_of_keeps_whitespace() {
        let html = Html::parse_fragment("<p> a <b>b</b> </p>");
        assert_eq!(text_of(first(&html, "p")), " a b ");
    }

    #[test]
    fn test_nth_child_counts_every_element() {
        let html = Html::parse_fragment("<table><tr><th>x</th>\n<td>1</td><td>2</td></tr></table>");
        let row = first(&html, "tr");
        assert_eq!(nth_child(row, 1).unwrap().value().name(), "th");
        assert_eq!(text_of(nth_child(row, 3).unwrap()), "2");
        assert!(nth_child(row, 0).is_none());
        assert!(nth_child(row, 4).is_none());
    }
}
