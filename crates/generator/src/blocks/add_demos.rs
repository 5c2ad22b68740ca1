use super::render_typed;
use crate::markdown::safe_url;
use crate::registry::{ComponentDescriptor, Icon};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "AddDemosComponent",
    display_name: "Add Demo Form",
    icon: Icon::AddBox,
    render,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddDemosConfig {
    pub endpoint: String,
    /// Target of the cancel link
    pub cancel_href: String,
}

impl Default for AddDemosConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/demos/add".to_string(),
            cancel_href: "/demos".to_string(),
        }
    }
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, add_demos)
}

pub fn add_demos(config: AddDemosConfig) -> impl IntoView {
    let action = safe_url(config.endpoint);
    let cancel_href = safe_url(config.cancel_href);

    view! {
        <section class="add-demos">
            <h2>"Add New Demo"</h2>
            <div class="card">
                <form class="block-form" method="post" action=action>
                    <label>"Title"<input type="text" name="title"/></label>
                    <label>"Description"<textarea name="description" rows="4"></textarea></label>
                    <label>"Demo URL"<input type="url" name="demoUrl"/></label>
                    <label>"Github URL"<input type="url" name="githubUrl"/></label>
                    <label>"Preview Image URL"<input type="url" name="previewImage"/></label>
                    <div class="actions">
                        <button type="submit">"Save Demo"</button>
                        <a class="button outlined" href=cancel_href>"Cancel"</a>
                    </div>
                </form>
            </div>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_overrides_endpoint() {
        let config: AddDemosConfig =
            serde_json::from_value(json!({"endpoint": "/submit", "cancelHref": "/"})).unwrap();

        let html = add_demos(config).to_html();
        assert!(html.contains(r#"action="/submit""#));
        assert!(html.contains(r#"name="githubUrl""#));
        assert!(html.contains("Save Demo"));
    }
}
