// src/utils/dom.rs

//! Small queries over parsed documents that `scraper` does not offer directly.

use scraper::{ElementRef, Selector};

/// All text below an element, whitespace-trimmed.
pub fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Alt texts of every icon below an element, in document order.
pub fn icon_alts(element: &ElementRef, icon: &Selector) -> Vec<String> {
    element
        .select(icon)
        .filter_map(|img| img.value().attr("alt"))
        .map(|alt| alt.trim().to_string())
        .collect()
}

/// First following sibling element matching `selector`.
pub fn next_sibling_matching<'a>(
    element: &ElementRef<'a>,
    selector: &Selector,
) -> Option<ElementRef<'a>> {
    element
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| selector.matches(sibling))
}

/// Nearest ancestor element matching `selector`.
pub fn enclosing<'a>(element: &ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|ancestor| selector.matches(ancestor))
}
