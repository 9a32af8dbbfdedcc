use crate::notion::Page;

use super::{sort_by_priority, text_entries, Entry};

/// No contact category is ranked, so rows keep their creation order.
pub const CONTACT_CATEGORY_ORDER: &[&str] = &[];

pub fn normalize(pages: &[Page]) -> Vec<Entry> {
    let mut entries = text_entries(pages);
    sort_by_priority(&mut entries, CONTACT_CATEGORY_ORDER);
    entries
}
