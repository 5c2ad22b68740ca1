use super::render_typed;
use crate::markdown::safe_url;
use crate::registry::{ComponentDescriptor, Icon};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "AddProjectComponent",
    display_name: "Add Project Form",
    icon: Icon::AddBox,
    render,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AddProjectConfig {
    pub endpoint: String,
}

impl Default for AddProjectConfig {
    fn default() -> Self {
        Self {
            endpoint: "/api/portfolio".to_string(),
        }
    }
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, add_project)
}

pub fn add_project(config: AddProjectConfig) -> impl IntoView {
    let action = safe_url(config.endpoint);

    view! {
        <section class="add-project">
            <h2>"Add New Project"</h2>
            <div class="card">
                <form class="block-form" method="post" action=action>
                    <label>"Project Title"<input type="text" name="title" required=true/></label>
                    <label>"Project Description"<textarea name="description" rows="4" required=true></textarea></label>
                    <label>"Image URL"<input type="url" name="imageSrc" required=true/></label>
                    <label>"Project URL"<input type="url" name="url" required=true/></label>
                    <button type="submit">"Add Project"</button>
                </form>
            </div>
        </section>
    }
}
