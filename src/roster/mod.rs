use std::collections::HashMap;
use std::hash::Hash;

pub mod students;
pub mod teachers;

/// Index raw records by some key for the one-hop joins of the roster build.
fn index_by<K, R, F>(records: Vec<R>, key: F) -> HashMap<K, R>
where
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    records
        .into_iter()
        .map(|record| (key(&record), record))
        .collect()
}
