use super::render_typed;
use crate::markdown::{self, safe_url};
use crate::registry::{ComponentDescriptor, Icon};
use chrono::NaiveDate;
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "BlogGridComponent",
    display_name: "Blog Grid",
    icon: Icon::Article,
    render,
};

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BlogGridConfig {
    pub posts: Vec<Post>,
    /// Prefix for post links; a card links to `{post_base_path}/{slug}`
    pub post_base_path: String,
}

impl Default for BlogGridConfig {
    fn default() -> Self {
        Self {
            posts: Vec::new(),
            post_base_path: "/blog".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Post {
    pub slug: String,
    pub frontmatter: Frontmatter,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    pub title: String,
    pub date: String,
    pub tagline: String,
    /// Markdown
    pub preview: String,
    pub image: String,
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, blog_grid)
}

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

/// "March 4, 2024" for ISO dates, anything else as written
fn display_date(date: &str) -> String {
    match parse_date(date) {
        Some(d) => d.format("%B %-d, %Y").to_string(),
        None => date.to_string(),
    }
}

/// Newest first; posts without a readable date keep their order at the end
fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| {
        let a = parse_date(&a.frontmatter.date);
        let b = parse_date(&b.frontmatter.date);
        match (a, b) {
            (Some(a), Some(b)) => b.cmp(&a),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        }
    });
}

fn post_href(base: &str, slug: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), slug)
}

pub fn blog_grid(config: BlogGridConfig) -> impl IntoView {
    let mut posts = config.posts;
    sort_posts(&mut posts);

    let cards = posts
        .into_iter()
        .map(|post| {
            let href = safe_url(post_href(&config.post_base_path, &post.slug));
            let date = display_date(&post.frontmatter.date);
            let preview = markdown::to_html(&post.frontmatter.preview);
            let image = safe_url(post.frontmatter.image).filter(|src| !src.is_empty());
            let alt = post.frontmatter.title.clone();
            let media = image.map(|src| view! { <img class="card-media" src=src alt=alt/> });

            view! {
                <a class="card blog-card" href=href>
                    {media}
                    <div class="card-content">
                        <h3>{post.frontmatter.title}</h3>
                        <p class="muted">{date}</p>
                        <p>{post.frontmatter.tagline}</p>
                        <div class="preview" inner_html=preview></div>
                    </div>
                </a>
            }
        })
        .collect_view();

    view! {
        <section class="blog-grid">
            <div class="grid three">{cards}</div>
        </section>
    }
}
