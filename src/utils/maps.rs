use crate::auth::context::SealContext;

/// Structural equality over seal context maps: identical key sets and, per
/// key, either both values absent or both present and equal. Independent of
/// map iteration order.
pub fn seal_contexts_equal(this: &SealContext, that: &SealContext) -> bool {
    if this.len() != that.len() {
        return false;
    }
    for (key, this_value) in this {
        match that.get(key) {
            None => return false, // key not present
            Some(that_value) => match (this_value, that_value) {
                (None, None) => continue, // both absent ok
                (Some(a), Some(b)) if a == b => continue,
                // either but not both absent, or differing values
                _ => return false,
            },
        }
    }
    true
}
