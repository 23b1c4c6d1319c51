//! Skeleton builder.

use core_types::{ClassResult, MemberKey};
use indexmap::IndexMap;

use crate::body::ClassBody;
use crate::classifier::Classifier;
use crate::descriptor::Skeleton;
use crate::directives::is_reserved;

/// Build the root skeleton of a class body.
///
/// Directive entries and names in `shared` are left out; every other entry
/// is classified, nested objects recursively.
pub fn build_skeleton<V>(
    classifier: &mut Classifier<'_>,
    body: &ClassBody,
    shared: &IndexMap<String, V>,
) -> ClassResult<Skeleton> {
    let mut skeleton = Skeleton::new();
    for (name, value) in body.iter() {
        if is_reserved(name) || shared.contains_key(name) {
            continue;
        }
        let descriptor = classifier.classify(name, value)?;
        skeleton.insert(MemberKey::parse(name), descriptor);
    }
    Ok(skeleton)
}
