use crate::notion::Page;
use crate::props::{Properties, Scalar};

use super::{field, flag, link_or_label, sort_by_year, Line, RankedEntry};

struct Award {
    url: Option<Scalar>,
    award: Option<Scalar>,
    author: Option<Scalar>,
    title: Option<Scalar>,
    year: Option<Scalar>,
    first: Option<bool>,
}

impl Award {
    fn from_props(props: &Properties) -> Self {
        Self {
            url: field(props, "URL"),
            award: field(props, "Award"),
            author: field(props, "Author"),
            title: field(props, "Title"),
            year: field(props, "Year"),
            first: flag(props, "First"),
        }
    }
}

pub fn normalize(pages: &[Page]) -> Vec<RankedEntry> {
    let mut items: Vec<Award> = pages
        .iter()
        .map(|p| Award::from_props(&p.properties))
        .collect();
    sort_by_year(&mut items, |d| d.year.as_ref());

    items
        .into_iter()
        .map(|d| RankedEntry {
            text: Line::new()
                .lead(link_or_label(d.url.as_ref(), d.award.as_ref()))
                .push(d.author)
                .push(d.title)
                .push(d.year)
                .finish(),
            first: d.first,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::test_support::*;
    use serde_json::json;

    #[test]
    fn award_line() {
        let rows = pages(vec![
            json!({
                "Award": title("Best Student Paper"),
                "Author": rich("A. Smith"),
                "Title": rich("Paper"),
                "Year": number(2019)
            }),
            json!({
                "URL": url("https://award.example"),
                "Award": title("Young Researcher Award"),
                "Year": number(2022),
                "First": checkbox(true)
            }),
        ]);
        let out = normalize(&rows);
        assert_eq!(
            out[0].text,
            "<a href=https://award.example target='_blank'>Young Researcher Award</a>, 2022"
        );
        assert_eq!(out[0].first, Some(true));
        assert_eq!(out[1].text, "Best Student Paper, A. Smith, Paper, 2019");
        assert_eq!(out[1].first, None);
    }
}
