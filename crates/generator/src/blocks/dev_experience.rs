use super::render_typed;
use crate::registry::{ComponentDescriptor, Icon};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "DevExperienceAboutComponent",
    display_name: "Developer Profile",
    icon: Icon::Person,
    render,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DevExperienceConfig {
    pub name: String,
    pub position: String,
    pub years_of_experience: f64,
    pub skills: Vec<String>,
    pub technologies: Vec<String>,
    pub description: String,
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, dev_experience)
}

fn chips(labels: Vec<String>) -> impl IntoView {
    labels
        .into_iter()
        .map(|label| view! { <span class="chip">{label}</span> })
        .collect_view()
}

fn experience_line(years: f64) -> String {
    format!("Full Stack Developer with {} years of experience", years)
}

pub fn dev_experience(config: DevExperienceConfig) -> impl IntoView {
    let experience = experience_line(config.years_of_experience);

    view! {
        <section class="dev-experience">
            <div class="card">
                <h2>{config.name}</h2>
                <h3>{config.position}</h3>
                <p class="lead">{experience}</p>
                <p>{config.description}</p>
                <div class="grid two">
                    <div>
                        <h4>"Technical Skills"</h4>
                        <div class="chips">{chips(config.skills)}</div>
                    </div>
                    <div>
                        <h4>"Technologies"</h4>
                        <div class="chips">{chips(config.technologies)}</div>
                    </div>
                </div>
            </div>
        </section>
    }
}
