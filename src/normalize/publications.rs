use crate::notion::Page;
use crate::props::{Properties, Scalar};

use super::{field, flag, link_or_label, sort_by_year, Line, RankedEntry};

struct Publication {
    author: Option<Scalar>,
    url: Option<Scalar>,
    title: Option<Scalar>,
    journal: Option<Scalar>,
    volume: Option<Scalar>,
    issue: Option<Scalar>,
    year: Option<Scalar>,
    pages: Option<Scalar>,
    first: Option<bool>,
}

impl Publication {
    fn from_props(props: &Properties) -> Self {
        Self {
            author: field(props, "Author"),
            url: field(props, "URL"),
            title: field(props, "Title"),
            journal: field(props, "Journal"),
            volume: field(props, "Volume"),
            issue: field(props, "Issue"),
            year: field(props, "Year"),
            pages: field(props, "Pages"),
            first: flag(props, "First"),
        }
    }
}

/// Author, title/link, journal, volume, issue, year, pages; newest first.
pub fn normalize(pages: &[Page]) -> Vec<RankedEntry> {
    let mut items: Vec<Publication> = pages
        .iter()
        .map(|p| Publication::from_props(&p.properties))
        .collect();
    sort_by_year(&mut items, |d| d.year.as_ref());

    items
        .into_iter()
        .map(|d| {
            let text = Line::new()
                .lead(d.author)
                .push(link_or_label(d.url.as_ref(), d.title.as_ref()))
                .push(d.journal)
                .push(d.volume)
                .push(d.issue)
                .push(d.year)
                .push(d.pages)
                .finish();
            RankedEntry {
                first: d.first,
                text,
            }
        })
        .collect()
}
