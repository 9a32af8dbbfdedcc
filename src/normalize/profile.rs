use crate::notion::Page;

use super::{sort_by_priority, text_entries, Entry};

/// Display order of profile sections: summary, affiliation, career, links.
pub const PROFILE_CATEGORY_ORDER: &[&str] = &["略歴", "所属", "経歴", "リンク"];

pub fn normalize(pages: &[Page]) -> Vec<Entry> {
    let mut entries = text_entries(pages);
    sort_by_priority(&mut entries, PROFILE_CATEGORY_ORDER);
    entries
}
