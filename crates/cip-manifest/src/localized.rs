use crate::element::Element;

/// Language used when the preferred one is missing.
pub const FALLBACK_LANG: &str = "en";

/// Text of every `tag` element in the best-fitting language, joined with
/// `separator` in document order.
///
/// Best fit: an element whose `lang` equals `preferred` wins outright. Until
/// then an element in `fallback` is remembered, and failing that the first
/// language seen. Elements without a `lang` attribute match a `None`
/// preference. Returns `None` when no element has the tag.
pub fn pick_localized(
    elements: &[Element],
    tag: &str,
    preferred: Option<&str>,
    fallback: &str,
    separator: &str,
) -> Option<String> {
    let tagged = || elements.iter().filter(move |e| e.tag == tag);

    let mut best: Option<Option<&str>> = None;
    for element in tagged() {
        let lang = element.lang.as_deref();
        if lang == preferred {
            best = Some(lang);
            break;
        }
        if lang == Some(fallback) {
            best = Some(lang);
            continue;
        }
        if best.is_none() {
            best = Some(lang);
        }
    }

    let best = best?;
    let texts: Vec<&str> = tagged()
        .filter(|e| e.lang.as_deref() == best)
        .map(|e| e.text.as_deref().unwrap_or_default())
        .collect();

    Some(texts.join(separator))
}

impl Element {
    /// [`pick_localized`] over this element's children with the English fallback.
    pub fn localized(&self, tag: &str, preferred: Option<&str>, separator: &str) -> Option<String> {
        pick_localized(&self.children, tag, preferred, FALLBACK_LANG, separator)
    }
}
