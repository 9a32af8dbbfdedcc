use crate::notion::Page;
use crate::props::{Properties, Scalar};

use super::{category, field, flag, link_or_label, sort_by_year, Line, PresentationEntry};

const INVITED_PREFIX: &str = "<b>(Invited)</b> ";

struct Presentation {
    invited: bool,
    author: Option<Scalar>,
    url: Option<Scalar>,
    title: Option<Scalar>,
    event: Option<Scalar>,
    kind: Option<Scalar>,
    country: Option<Scalar>,
    year: Option<Scalar>,
    category: Option<String>,
    first: Option<bool>,
}

impl Presentation {
    fn from_props(props: &Properties) -> Self {
        Self {
            invited: flag(props, "Invited").unwrap_or(false),
            author: field(props, "Author"),
            url: field(props, "URL"),
            title: field(props, "Title"),
            event: field(props, "Event"),
            kind: field(props, "Type"),
            country: field(props, "Country"),
            year: field(props, "Year"),
            category: category(props),
            first: flag(props, "First"),
        }
    }
}

pub fn normalize(pages: &[Page]) -> Vec<PresentationEntry> {
    let mut items: Vec<Presentation> = pages
        .iter()
        .map(|p| Presentation::from_props(&p.properties))
        .collect();
    sort_by_year(&mut items, |d| d.year.as_ref());

    items
        .into_iter()
        .map(|d| {
            let text = Line::new()
                .lead(d.invited.then_some(INVITED_PREFIX))
                .lead(d.author)
                .push(link_or_label(d.url.as_ref(), d.title.as_ref()))
                .push(d.event)
                .push(d.kind)
                .push(d.country)
                .push(d.year)
                .finish();
            PresentationEntry {
                category: d.category,
                first: d.first,
                text,
            }
        })
        .collect()
}
