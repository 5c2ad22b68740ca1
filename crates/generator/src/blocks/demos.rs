use super::render_typed;
use crate::markdown::safe_url;
use crate::registry::{ComponentDescriptor, Icon};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "DemosComponent",
    display_name: "Demo Gallery",
    icon: Icon::Collections,
    render,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DemosConfig {
    pub demos: Vec<Demo>,
    /// Where the add-demo form posts; the form is inert without one
    pub endpoint: Option<String>,
    /// Prefilled value of the form's date field
    #[serde(rename = "defaultDate")]
    pub default_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Demo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub date: String,
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, demos)
}

pub fn demos(config: DemosConfig) -> impl IntoView {
    let action = config.endpoint.and_then(safe_url);
    let default_date = config.default_date;

    let cards = config
        .demos
        .into_iter()
        .map(|demo| {
            let href = safe_url(demo.url.clone());
            view! {
                <article class="card demo">
                    <h4>{demo.title}</h4>
                    <p>{demo.description}</p>
                    <p class="muted">"URL: "<a href=href>{demo.url}</a></p>
                    <p class="muted">"Date: "{demo.date}</p>
                </article>
            }
        })
        .collect_view();

    view! {
        <section class="demos">
            <div class="card">
                <h3>"Add New Demo"</h3>
                <form class="block-form" method="post" action=action>
                    <label>"Title"<input type="text" name="title" required=true/></label>
                    <label>"Description"<textarea name="description" rows="4" required=true></textarea></label>
                    <label>"URL"<input type="url" name="url" required=true/></label>
                    <label>"Date"<input type="date" name="date" value=default_date required=true/></label>
                    <button type="submit">"Add Demo"</button>
                </form>
            </div>
            <div class="demo-list">{cards}</div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lists_demos() {
        let config: DemosConfig = serde_json::from_value(json!({
            "demos": [
                {"id": "1", "title": "Ray Tracer", "url": "https://example.com/rt", "date": "2024-01-02"}
            ]
        }))
        .unwrap();

        let html = demos(config).to_html();
        assert!(html.contains("Ray Tracer"));
        assert!(html.contains("https://example.com/rt"));
        assert!(html.contains("2024-01-02"));
        assert!(html.contains("Add New Demo"));
    }

    #[test]
    fn test_form_posts_to_endpoint() {
        let config = DemosConfig {
            endpoint: Some("/api/demos".to_string()),
            ..Default::default()
        };

        let html = demos(config).to_html();
        assert!(html.contains(r#"action="/api/demos""#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let payload = json!({
            "demos": [{"title": "Ray Tracer", "date": "2024-01-02"}]
        });
        let first = render(payload.clone()).unwrap().to_html();
        let second = render(payload).unwrap().to_html();
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_date_prefills_form() {
        let config: DemosConfig =
            serde_json::from_value(json!({"defaultDate": "2024-05-06"})).unwrap();
        let html = demos(config).to_html();
        assert!(html.contains(r#"value="2024-05-06""#));
    }

    #[test]
    fn test_unsafe_demo_url_is_not_linked() {
        let config: DemosConfig = serde_json::from_value(json!({
            "endpoint": "javascript:alert(1)",
            "demos": [{"title": "Sneaky", "url": "javascript:alert(2)"}]
        }))
        .unwrap();

        let html = demos(config).to_html();
        assert!(html.contains("Sneaky"));
        assert!(!html.contains(r#"href="javascript"#));
        assert!(!html.contains(r#"action="javascript"#));
    }
}
