use crate::notion::Page;

use super::{category, field, link_or_label, Entry};

pub fn normalize(pages: &[Page]) -> Vec<Entry> {
    pages
        .iter()
        .map(|page| {
            let props = &page.properties;
            let url = field(props, "URL");
            let name = field(props, "Name");
            Entry {
                category: category(props),
                text: link_or_label(url.as_ref(), name.as_ref()).unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::test_support::*;
    use serde_json::json;

    #[test]
    fn works_in_input_order() {
        let rows = pages(vec![
            json!({ "Name": title("typeset-rs"), "URL": url("https://github.com/x/typeset-rs"), "Category": select("Software") }),
            json!({ "Name": title("Dataset v2"), "Category": select("Data") }),
            json!({ "URL": url("https://orphan.example") }),
        ]);
        let out = normalize(&rows);
        assert_eq!(
            out[0].text,
            "<a href=https://github.com/x/typeset-rs target='_blank'>typeset-rs</a>"
        );
        assert_eq!(out[1].text, "Dataset v2");
        assert_eq!(
            out[2].text,
            "<a href=https://orphan.example target='_blank'>https://orphan.example</a>"
        );
        assert_eq!(out[2].category, None);
    }

    #[test]
    fn empty_only_without_url_and_name() {
        let rows = pages(vec![json!({ "Category": select("Software") })]);
        assert_eq!(normalize(&rows)[0].text, "");
    }
}
