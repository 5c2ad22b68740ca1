use super::render_typed;
use crate::registry::{ComponentDescriptor, Icon};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "AboutScreenComponent",
    display_name: "About Screen",
    icon: Icon::Api,
    render,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AboutScreenConfig {
    pub title: String,
    pub subtitle: String,
    pub description: String,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: String,
    /// Percentage, clamped to 0..=100 when drawn
    pub level: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, about_screen)
}

fn skill_width(level: f64) -> String {
    format!("width: {:.0}%", level.clamp(0.0, 100.0))
}

pub fn about_screen(config: AboutScreenConfig) -> impl IntoView {
    let AboutScreenConfig {
        title,
        subtitle,
        description,
        skills,
        experiences,
        education,
        contact,
    } = config;

    let skills = skills
        .into_iter()
        .map(|skill| {
            let width = skill_width(skill.level);
            view! {
                <div class="skill">
                    <h4>{skill.name}</h4>
                    <div class="progress">
                        <div class="fill" style=width></div>
                    </div>
                </div>
            }
        })
        .collect_view();

    let experiences = experiences
        .into_iter()
        .map(|exp| {
            let role_line = format!("{} • {}", exp.role, exp.duration);
            view! {
                <div class="experience">
                    <h4>{exp.company}</h4>
                    <p class="muted">{role_line}</p>
                    <p>{exp.description}</p>
                </div>
            }
        })
        .collect_view();

    let education = education
        .into_iter()
        .map(|edu| {
            view! {
                <div class="education">
                    <h4>{edu.degree}</h4>
                    <p>{edu.school}</p>
                    <p class="muted">{edu.year}</p>
                </div>
            }
        })
        .collect_view();

    let mailto = format!("mailto:{}", contact.email);

    view! {
        <section class="about-screen">
            <header class="hero">
                <h2>{title}</h2>
                <p class="subtitle">{subtitle}</p>
            </header>
            <div class="grid two">
                <div class="card">
                    <h3>"About Me"</h3>
                    <p>{description}</p>
                </div>
                <div class="card">
                    <h3>"Skills"</h3>
                    {skills}
                </div>
            </div>
            <div class="card">
                <h3>"Experience"</h3>
                <div class="grid two">{experiences}</div>
            </div>
            <div class="card">
                <h3>"Education"</h3>
                <div class="grid three">{education}</div>
            </div>
            <footer class="contact">
                <h3>"Get in Touch"</h3>
                <p>{contact.email}</p>
                <p>{contact.phone}</p>
                <p>{contact.location}</p>
                <a class="button" href=mailto>"Contact Me"</a>
            </footer>
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_width_is_clamped() {
        assert_eq!(skill_width(85.0), "width: 85%");
        assert_eq!(skill_width(140.0), "width: 100%");
        assert_eq!(skill_width(-3.0), "width: 0%");
    }

    #[test]
    fn test_renders_sections() {
        let config = AboutScreenConfig {
            title: "Ada".to_string(),
            skills: vec![Skill {
                name: "Rust".to_string(),
                level: 90.0,
            }],
            experiences: vec![Experience {
                company: "Analytical Engines".to_string(),
                role: "Engineer".to_string(),
                duration: "1842".to_string(),
                description: String::new(),
            }],
            ..Default::default()
        };

        let html = about_screen(config).to_html();
        assert!(html.contains("Ada"));
        assert!(html.contains("Rust"));
        assert!(html.contains("width: 90%"));
        assert!(html.contains("Analytical Engines"));
        assert!(html.contains("Engineer • 1842"));
    }

    #[test]
    fn test_text_is_escaped() {
        let config = AboutScreenConfig {
            title: "<script>alert(1)</script>".to_string(),
            ..Default::default()
        };

        let html = about_screen(config).to_html();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
