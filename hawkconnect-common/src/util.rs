use crate::model::Id;

/// Joins ids with `,` and no whitespace, the list format the server expects.
#[must_use]
pub fn join_ids<Marker>(ids: &[Id<Marker>]) -> String {
    let mut joined = String::new();
    for (index, id) in ids.iter().enumerate() {
        if index > 0 {
            joined.push(',');
        }
        joined.push_str(&id.to_string());
    }
    joined
}
