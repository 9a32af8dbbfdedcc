pub mod articles;
pub mod awards;
pub mod contact;
pub mod others;
pub mod presentations;
pub mod profile;
pub mod publications;
pub mod works;

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::notion::Page;
use crate::props::{get_prop, get_text, Properties, Scalar};

/// `{category, text}`: Profile, Articles, Contact, Others, Works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub category: Option<String>,
    pub text: String,
}

/// `{fitst, text}`: Publications, Awards.
///
/// The `fitst` spelling is what the site templates read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(rename = "fitst")]
    pub first: Option<bool>,
    pub text: String,
}

/// `{category, fitst, text}`: Presentations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationEntry {
    pub category: Option<String>,
    #[serde(rename = "fitst")]
    pub first: Option<bool>,
    pub text: String,
}

pub fn build_link(url: &str, label: &str) -> String {
    format!("<a href={} target='_blank'>{}</a>", url, label)
}

/// A link whenever the url is set, else the bare label, else nothing.
///
/// A link without a label shows the url itself.
pub fn link_or_label(url: Option<&Scalar>, label: Option<&Scalar>) -> Option<String> {
    let url = url.filter(|u| u.is_truthy());
    let label = label.filter(|l| l.is_truthy());
    match (url, label) {
        (Some(url), Some(label)) => Some(build_link(&url.to_string(), &label.to_string())),
        (Some(url), None) => {
            let url = url.to_string();
            Some(build_link(&url, &url))
        }
        (None, label) => label.map(Scalar::to_string),
    }
}

/// Display line built from optional fragments.
///
/// `lead` appends as-is, `push` appends after a `", "` separator. `None` is
/// skipped either way.
#[derive(Debug, Default)]
pub struct Line(String);

impl Line {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lead(&mut self, value: Option<impl ToString>) -> &mut Self {
        if let Some(v) = value {
            self.0.push_str(&v.to_string());
        }
        self
    }

    pub fn push(&mut self, value: Option<impl ToString>) -> &mut Self {
        if let Some(v) = value {
            self.0.push_str(", ");
            self.0.push_str(&v.to_string());
        }
        self
    }

    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.0)
    }
}

/// Property value, dropped when falsy.
pub fn field(props: &Properties, key: &str) -> Option<Scalar> {
    get_prop(props, key).filter(Scalar::is_truthy)
}

/// Checkbox value; `None` only when the column does not exist.
pub fn flag(props: &Properties, key: &str) -> Option<bool> {
    get_prop(props, key).map(|v| v.as_bool().unwrap_or_else(|| v.is_truthy()))
}

pub fn category(props: &Properties) -> Option<String> {
    get_text(props, "Category")
}

/// Stable sort, newest first. Rows without a usable year go last.
pub fn sort_by_year<T>(items: &mut [T], year: impl Fn(&T) -> Option<&Scalar>) {
    items.sort_by_key(|item| Reverse(year(item).map_or(0, Scalar::year_key)));
}

/// Stable sort by position of `category` in `order`; unlisted categories go last.
pub fn sort_by_priority(entries: &mut [Entry], order: &[&str]) {
    entries.sort_by_key(|e| {
        e.category
            .as_deref()
            .and_then(|c| order.iter().position(|o| *o == c))
            .unwrap_or(order.len())
    });
}

/// Rows holding just `Text` and `Category`; rows without text are dropped.
fn text_entries(pages: &[Page]) -> Vec<Entry> {
    pages
        .iter()
        .filter_map(|page| {
            let Some(text) = field(&page.properties, "Text") else {
                debug!("row {} has no text, skipped", page.id);
                return None;
            };
            Some(Entry {
                category: category(&page.properties),
                text: text.to_string(),
            })
        })
        .collect()
}


// ── Tests ──
