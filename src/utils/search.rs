/// Anything listed in a searchable register: a person's name plus an id.
pub trait Searchable {
    fn display_name(&self) -> &str;
    fn identifier(&self) -> &str;
}

/// Entries whose name or identifier contains `query`, ignoring case.
///
/// Original order is kept. Only the empty query returns every entry; the
/// query is matched as typed, surrounding spaces included.
pub fn filter_by_query<'a, T: Searchable>(records: &'a [T], query: &str) -> Vec<&'a T> {
    if query.is_empty() {
        return records.iter().collect();
    }
    let needle = query.to_lowercase();

    records
        .iter()
        .filter(|record| {
            record.display_name().to_lowercase().contains(&needle)
                || record.identifier().to_lowercase().contains(&needle)
        })
        .collect()
}
