use super::render_typed;
use crate::markdown::safe_url;
use crate::registry::{ComponentDescriptor, Icon};
use leptos::prelude::*;
use serde::Deserialize;
use serde_json::Value;

pub const DESCRIPTOR: ComponentDescriptor = ComponentDescriptor {
    type_tag: "MenuDemoScreenComponent",
    display_name: "Menu",
    icon: Icon::RestaurantMenu,
    render,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    pub items: Vec<MenuItem>,
    pub endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub category: String,
}

fn render(config: Value) -> Result<AnyView, serde_json::Error> {
    render_typed(config, menu_demo)
}

/// Menu items grouped by category, categories in first-seen order
fn group_by_category(items: Vec<MenuItem>) -> Vec<(String, Vec<MenuItem>)> {
    let mut groups: Vec<(String, Vec<MenuItem>)> = Vec::new();
    for item in items {
        match groups.iter_mut().find(|(category, _)| *category == item.category) {
            Some((_, members)) => members.push(item),
            None => groups.push((item.category.clone(), vec![item])),
        }
    }
    groups
}

pub fn menu_demo(config: MenuConfig) -> impl IntoView {
    let action = config.endpoint.and_then(safe_url);
    let groups = group_by_category(config.items)
        .into_iter()
        .map(|(category, items)| {
            let heading = if category.is_empty() {
                "Other".to_string()
            } else {
                category
            };
            let items = items
                .into_iter()
                .map(|item| {
                    let price = format!("Price: ${}", item.price);
                    view! {
                        <article class="card menu-item">
                            <h4>{item.name}</h4>
                            <p>{item.description}</p>
                            <p class="price">{price}</p>
                        </article>
                    }
                })
                .collect_view();
            view! {
                <div class="menu-category">
                    <h3>{heading}</h3>
                    {items}
                </div>
            }
        })
        .collect_view();

    view! {
        <section class="menu-demo">
            <h2>"Menu Demo Screen"</h2>
            <div class="card form-card">
                <form class="block-form" method="post" action=action>
                    <label>"Item Name"<input type="text" name="name" required=true/></label>
                    <label>"Description"<textarea name="description" rows="3" required=true></textarea></label>
                    <label>"Price"<input type="text" name="price" required=true/></label>
                    <label>"Category"<input type="text" name="category" required=true/></label>
                    <button type="submit">"Add Item"</button>
                </form>
            </div>
            {groups}
        </section>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, category: &str) -> MenuItem {
        MenuItem {
            name: name.to_string(),
            category: category.to_string(),
            price: "4.50".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let groups = group_by_category(vec![
            item("Soup", "Starters"),
            item("Steak", "Mains"),
            item("Bread", "Starters"),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, "Starters");
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, "Mains");
    }

    #[test]
    fn test_renders_prices_and_uncategorised() {
        let config = MenuConfig {
            items: vec![item("Tea", "")],
            endpoint: None,
        };

        let html = menu_demo(config).to_html();
        assert!(html.contains("Tea"));
        assert!(html.contains("Price: $4.50"));
        assert!(html.contains("Other"));
    }
}
