use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};

/// URL schemes allowed in generated links and images
const SAFE_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// Whether `url` is relative or uses one of [`SAFE_SCHEMES`].
///
/// Whitespace and control characters are ignored when reading the scheme,
/// the same way browsers do.
pub fn is_safe_url(url: &str) -> bool {
    let cleaned: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match cleaned.split_once(':') {
        Some((scheme, _)) if !scheme.contains(&['/', '?', '#'][..]) => SAFE_SCHEMES
            .iter()
            .any(|safe| scheme.eq_ignore_ascii_case(safe)),
        _ => true,
    }
}

/// `url` when it is safe to put in an `href`/`src`/`action`, otherwise `None`
pub fn safe_url(url: String) -> Option<String> {
    is_safe_url(&url).then_some(url)
}

/// Render Markdown to HTML.
///
/// Raw HTML in the source is emitted as escaped text, never as markup, and
/// link or image targets with an unsafe scheme are blanked.
pub fn to_html(source: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);

    let parser = Parser::new_ext(source, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if !is_safe_url(&dest_url) => Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::Borrowed(""),
            title,
            id,
        }),
        other => other,
    });

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
