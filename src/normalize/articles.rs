use crate::notion::Page;
use crate::props::{Properties, Scalar};

use super::{category, field, link_or_label, sort_by_year, Entry, Line};

struct Article {
    url: Option<Scalar>,
    title: Option<Scalar>,
    medium: Option<Scalar>,
    year: Option<Scalar>,
    category: Option<String>,
}

impl Article {
    fn from_props(props: &Properties) -> Self {
        Self {
            url: field(props, "URL"),
            title: field(props, "Title"),
            medium: field(props, "Medium"),
            year: field(props, "Year"),
            category: category(props),
        }
    }
}

pub fn normalize(pages: &[Page]) -> Vec<Entry> {
    let mut items: Vec<Article> = pages
        .iter()
        .map(|p| Article::from_props(&p.properties))
        .collect();
    sort_by_year(&mut items, |d| d.year.as_ref());

    items
        .into_iter()
        .map(|d| Entry {
            text: Line::new()
                .lead(link_or_label(d.url.as_ref(), d.title.as_ref()))
                .push(d.medium)
                .push(d.year)
                .finish(),
            category: d.category,
        })
        .collect()
}
