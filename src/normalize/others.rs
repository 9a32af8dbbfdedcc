use crate::notion::Page;

use super::{category, field, link_or_label, Entry, Line};

pub fn normalize(pages: &[Page]) -> Vec<Entry> {
    pages
        .iter()
        .map(|page| {
            let props = &page.properties;
            let url = field(props, "URL");
            let title = field(props, "Title");
            Entry {
                category: category(props),
                text: Line::new()
                    .lead(link_or_label(url.as_ref(), title.as_ref()))
                    .push(field(props, "Comment"))
                    .finish(),
            }
        })
        .collect()
}
