//! HTML screens: landing, category browse, and entry detail.
//!
//! Each screen is a pure function of its inputs. The page shell (header,
//! navigation, footer) always renders; only the main region goes through
//! [`render_boundary`].

use maud::{DOCTYPE, Markup, PreEscaped, html};

use super::boundary::render_boundary;
use super::error::ViewError;
use super::menus;
use super::state::{Phase, ScreenState};
use crate::domains::catalog::{CategoryKey, Entry};

/// Statistics shown on the detail screen, by upstream name.
pub const DETAIL_STATS: [(&str, &str); 4] = [
    ("hp", "Health Points"),
    ("attack", "Attack"),
    ("defense", "Defense"),
    ("speed", "Speed"),
];

pub const NOT_AVAILABLE: &str = "not available";
pub const LOADING: &str = "Loading...";

const STYLES: &str = r#"
body { margin: 0; font-family: system-ui, sans-serif; display: flex; flex-direction: column; min-height: 100vh; }
header { background: #ef4444; color: #fff; padding: 1rem; text-align: center; }
header nav a { color: #fff; padding: 0 1rem; text-decoration: none; }
main { flex-grow: 1; padding: 1rem; }
footer { background: #1f2937; color: #d1d5db; padding: 0.75rem; text-align: center; font-size: 0.85rem; }
.grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(10rem, 1fr)); gap: 1rem; }
.card { display: block; background: #fff; border-radius: 0.5rem; box-shadow: 0 1px 4px rgba(0,0,0,.15); color: inherit; text-decoration: none; }
.card img, .card .no-image { width: 100%; height: 8rem; object-fit: contain; background: #e5e7eb; }
.card-body { padding: 0.5rem; text-align: center; }
.fallback, .notice { padding: 1rem; }
"#;

/// Inputs for the category screen.
#[derive(Debug, Clone, Copy)]
pub struct CategoryView<'a> {
    /// Category segment exactly as it appeared in the URL.
    pub raw_key: &'a str,
    /// Parsed key, `None` when the segment is not a known category.
    pub key: Option<CategoryKey>,
    /// Currently selected sub-filter value.
    pub filter: Option<&'a str>,
    pub state: &'a ScreenState<Vec<Entry>>,
}

/// Full page with `main` rendered inside the boundary.
pub fn render_page<F>(site_name: &str, title: &str, main: F) -> Markup
where
    F: FnOnce() -> Result<Markup, ViewError>,
{
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " | Pokédex" }
                style { (PreEscaped(STYLES)) }
            }
            body {
                (header())
                main { (render_boundary(main)) }
                (footer(site_name))
            }
        }
    }
}

fn header() -> Markup {
    html! {
        header {
            h1 { "Pokédex" }
            nav {
                a href="/" { "Home" }
                @for key in CategoryKey::ALL {
                    a href=(format!("/category/{}", key.as_str())) { (key.label()) }
                }
            }
        }
    }
}

fn footer(site_name: &str) -> Markup {
    html! {
        footer {
            (site_name) " · data from PokeAPI"
        }
    }
}

/// Landing screen.
pub fn home() -> Result<Markup, ViewError> {
    Ok(html! {
        section.home {
            h2 { "Welcome to the Pokédex" }
            p { "Explore the Pokémon collection by category." }
        }
    })
}

/// Category browse screen.
pub fn category(view: &CategoryView<'_>) -> Result<Markup, ViewError> {
    let heading = view.key.map(|k| k.label()).unwrap_or(view.raw_key);

    let body = match view.key {
        None => html! { p.notice { "Unknown category." } },
        Some(key) => {
            let results = category_results(view.state)?;
            html! {
                (filter_menu(key, view.filter))
                (results)
            }
        }
    };

    Ok(html! {
        section.category {
            h2 { "Category: " (heading) }
            (body)
        }
    })
}

fn filter_menu(key: CategoryKey, selected: Option<&str>) -> Markup {
    html! {
        form.filters method="get" action=(format!("/category/{}", key.as_str())) {
            select name="filter" onchange="this.form.submit()" {
                option value="" { (menus::prompt(key)) }
                @for option in menus::options(key) {
                    option value=(option.value) selected[selected == Some(option.value)] {
                        (option.label)
                    }
                }
            }
            noscript { button type="submit" { "Show" } }
        }
    }
}

fn category_results(state: &ScreenState<Vec<Entry>>) -> Result<Markup, ViewError> {
    match state.phase() {
        Phase::Idle => Ok(html! { p.notice { "Choose a filter to list entries." } }),
        Phase::Loading => Ok(loading()),
        Phase::Loaded => match (state.result(), state.error()) {
            (_, Some(_)) => Ok(html! { p.notice { "Could not load entries." } }),
            (Some(entries), None) if entries.is_empty() => {
                Ok(html! { p.notice { "No entries match this filter." } })
            }
            (Some(entries), None) => Ok(entry_grid(entries)),
            (None, None) => Err(ViewError::inconsistent(
                "category loaded without result or error",
            )),
        },
    }
}

/// Grid of entry cards.
pub fn entry_grid(entries: &[Entry]) -> Markup {
    html! {
        div.grid {
            @for entry in entries {
                (entry_card(entry))
            }
        }
    }
}

fn entry_card(entry: &Entry) -> Markup {
    html! {
        a.card href=(format!("/pokemon/{}", entry.id)) {
            (sprite(entry))
            div.card-body {
                h3 { (entry.name) }
                p { "ID: " (entry.id) }
            }
        }
    }
}

fn sprite(entry: &Entry) -> Markup {
    html! {
        @if let Some(url) = &entry.image_url {
            img src=(url) alt=(entry.name);
        } @else {
            div.no-image { "No image" }
        }
    }
}

/// Entry detail screen.
pub fn entry_detail(state: &ScreenState<Entry>) -> Result<Markup, ViewError> {
    match state.phase() {
        Phase::Idle | Phase::Loading => Ok(loading()),
        Phase::Loaded => match (state.result(), state.error()) {
            (_, Some(_)) => Ok(html! { p.notice { "Could not load this Pokémon." } }),
            (Some(entry), None) => Ok(detail(entry)),
            (None, None) => Err(ViewError::inconsistent(
                "entry loaded without result or error",
            )),
        },
    }
}

fn detail(entry: &Entry) -> Markup {
    html! {
        section.detail {
            h2 { (entry.name) }
            (sprite(entry))
            ul {
                li { "ID: " (entry.id) }
                li { "Type: " (entry.type_list()) }
                @for (stat, label) in DETAIL_STATS {
                    li {
                        (label) ": "
                        @match entry.stat(stat) {
                            Some(value) => { (value) }
                            None => { span.missing { (NOT_AVAILABLE) } }
                        }
                    }
                }
            }
        }
    }
}

fn loading() -> Markup {
    html! { p.notice { (LOADING) } }
}
