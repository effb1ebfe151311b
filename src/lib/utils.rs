use core::hash::Hash;
use csv::StringRecord;
use im::HashMap;

pub trait OrDefault<K, V> {
    fn get_or_default(&self, item: &K) -> V;
}

impl<K, V> OrDefault<K, V> for HashMap<K, V>
where
    K: Eq + PartialEq + Hash + Clone,
    V: Default + Clone,
{
    fn get_or_default(&self, item: &K) -> V {
        match self.get(item) {
            Some(v) => v.clone(),
            None => V::default(),
        }
    }
}

/// Number of fields in a record, not counting trailing empty ones. `P001;` has one field.
pub fn field_count(record: &StringRecord) -> usize {
    record
        .iter()
        .enumerate()
        .filter(|(_, field)| !field.is_empty())
        .last()
        .map_or(0, |(last, _)| last + 1)
}

/// Trimmed field, or an empty string when the record is too short.
pub fn field<'a>(record: &'a StringRecord, idx: usize) -> &'a str {
    record.get(idx).map_or("", str::trim)
}

/// Splits a raw line on `;` into trimmed fields. A blank line is a single empty field.
pub fn split_line(line: &str) -> StringRecord {
    line.split(';').map(str::trim).collect()
}
