use crate::registry::Registry;
use page_kit_core::Page;

/// HTML-escape a string for text or attribute context
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Options that differ between preview and build
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Adds the preview badge and the SSE reload script
    pub preview: bool,
}

/// Generate the complete HTML document for a page.
///
/// Shared between preview and build so what you see in preview is what
/// gets written out.
pub fn render_page(page: &Page, registry: &Registry, options: RenderOptions) -> String {
    let blocks_html: String = page
        .blocks
        .iter()
        .filter_map(|block| {
            let html = registry.render_html(&block.type_tag, block.config.clone())?;
            Some(format!(
                r#"<div class="block" data-block-id="{}" data-block-type="{}">{}</div>"#,
                html_escape(&block.id),
                html_escape(&block.type_tag),
                html
            ))
        })
        .collect::<Vec<_>>()
        .join("\n");

    let description_meta = page
        .site
        .description
        .as_deref()
        .map(|d| format!(r#"<meta name="description" content="{}">"#, html_escape(d)))
        .unwrap_or_default();

    let preview_badge = if options.preview {
        r#"<div class="preview-badge">PREVIEW MODE - Live Reload Active</div>"#
    } else {
        ""
    };

    let reload_script = if options.preview {
        r#"<script>
        const eventSource = new EventSource('/_reload');
        eventSource.onmessage = () => location.reload();
        eventSource.onerror = () => eventSource.close();
    </script>"#
    } else {
        ""
    };

    let footer_text = if options.preview {
        "Generated by page-kit • Press Ctrl+C to stop preview"
    } else {
        "Generated by page-kit"
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {description_meta}
    <style>
        :root {{ --accent: {accent}; }}
{stylesheet}
    </style>
</head>
<body class="{theme}">
    {preview_badge}
    <main class="page">
{blocks_html}
    </main>
    <footer class="site-footer">{footer_text}</footer>
    {reload_script}
</body>
</html>
"#,
        title = html_escape(&page.site.title),
        description_meta = description_meta,
        accent = html_escape(&page.site.accent_color),
        stylesheet = STYLESHEET,
        theme = page.site.theme.css_class(),
        preview_badge = preview_badge,
        blocks_html = blocks_html,
        footer_text = footer_text,
        reload_script = reload_script,
    )
}

const STYLESHEET: &str = r#"
        * { box-sizing: border-box; }
        body {
            margin: 0;
            font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
            background: #f8f9fa;
            color: #1a1a1a;
            line-height: 1.6;
        }
        body.theme-dark { background: #121212; color: #ffffff; }
        .page { max-width: 1200px; margin: 0 auto; padding: 2rem 1rem; }
        .block { margin-bottom: 4rem; }
        .hero { text-align: center; margin-bottom: 3rem; }
        .hero h2 { font-size: clamp(2.5rem, 5vw, 3.5rem); font-weight: 800; margin: 0 0 1rem; }
        .subtitle, .muted { color: #666666; }
        .theme-dark .subtitle, .theme-dark .muted { color: #a6a6a6; }
        .grid { display: grid; gap: 2rem; }
        .grid.two { grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); }
        .grid.three { grid-template-columns: repeat(auto-fit, minmax(260px, 1fr)); }
        .card {
            display: block;
            background: #ffffff;
            color: inherit;
            text-decoration: none;
            border-radius: 16px;
            padding: 2rem;
            margin-bottom: 2rem;
            box-shadow: 0 8px 24px rgba(0, 0, 0, 0.12);
            transition: transform 0.3s ease-in-out, box-shadow 0.3s ease-in-out;
        }
        .card:hover { transform: translateY(-8px); box-shadow: 0 16px 32px rgba(0, 0, 0, 0.15); }
        .theme-dark .card { background: #1a1a1a; }
        .progress { height: 8px; border-radius: 4px; background: #d9d9d9; overflow: hidden; }
        .progress .fill { height: 100%; background: var(--accent); transition: width 1s ease-in-out; }
        .experience { background: #f8f9fa; border-radius: 8px; padding: 1.5rem; }
        .theme-dark .experience { background: #262626; }
        .education { text-align: center; }
        .contact { text-align: center; margin-top: 4rem; }
        .chips { display: flex; flex-wrap: wrap; gap: 0.5rem; }
        .chip { background: #d9d9d9; color: #333333; border-radius: 16px; padding: 0.25rem 0.75rem; }
        .theme-dark .chip { background: #4d4d4d; color: #ffffff; }
        .button, button {
            display: inline-block;
            background: var(--accent);
            color: #ffffff;
            border: none;
            border-radius: 8px;
            padding: 0.75rem 2rem;
            font-weight: 600;
            text-decoration: none;
            cursor: pointer;
        }
        .button.outlined { background: transparent; color: var(--accent); border: 1px solid var(--accent); }
        .block-form { display: flex; flex-direction: column; gap: 1.5rem; }
        .block-form label { display: flex; flex-direction: column; gap: 0.5rem; color: #4d4d4d; font-weight: 500; }
        .block-form input, .block-form textarea {
            font: inherit;
            padding: 0.75rem;
            border: 2px solid #a6a6a6;
            border-radius: 8px;
        }
        .block-form .actions { display: flex; gap: 1rem; }
        .price { font-weight: 500; }
        .card-media { width: 100%; height: 240px; object-fit: cover; border-radius: 8px; }
        .preview-badge {
            position: fixed;
            top: 1rem;
            right: 1rem;
            background: var(--accent);
            color: #ffffff;
            padding: 0.5rem 1rem;
            border-radius: 8px;
            font-size: 0.85rem;
            z-index: 10;
        }
        .site-footer { text-align: center; padding: 2rem; color: #808080; font-size: 0.85rem; }"#;

#[cfg(test)]
mod tests {
    use super::*;
    use page_kit_core::Theme;
    use serde_json::json;

    fn sample_page() -> Page {
        let mut page = Page::new("My <Site>");
        page.place(
            "AboutScreenComponent",
            json!({"title": "Hello", "subtitle": "World"}),
        );
        page.place("NotARealType", json!({}));
        page.place("DevExperienceAboutComponent", json!({"name": "Dev"}));
        page
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>&'\""), "&lt;b&gt;&amp;&#x27;&quot;");
        assert_eq!(html_escape("plain"), "plain");
    }

    #[test]
    fn test_render_page_skips_unknown_blocks() {
        let registry = Registry::builtin();
        let page = sample_page();
        let html = render_page(&page, &registry, RenderOptions::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>My &lt;Site&gt;</title>"));
        assert!(html.contains("Hello"));
        assert!(html.contains("Dev"));
        assert!(html.contains(r#"data-block-type="AboutScreenComponent""#));
        assert!(!html.contains("NotARealType"));
        assert_eq!(html.matches(r#"class="block""#).count(), 2);
    }

    #[test]
    fn test_render_page_keeps_block_order() {
        let registry = Registry::builtin();
        let html = render_page(&sample_page(), &registry, RenderOptions::default());
        let about = html.find("AboutScreenComponent").unwrap();
        let dev = html.find("DevExperienceAboutComponent").unwrap();
        assert!(about < dev);
    }

    #[test]
    fn test_preview_and_theme() {
        let registry = Registry::builtin();
        let mut page = sample_page();
        page.site.theme = Theme::Dark;

        let built = render_page(&page, &registry, RenderOptions::default());
        assert!(built.contains(r#"<body class="theme-dark">"#));
        assert!(!built.contains("/_reload"));

        let preview = render_page(&page, &registry, RenderOptions { preview: true });
        assert!(preview.contains("/_reload"));
        assert!(preview.contains("preview-badge\">"));
    }
}
