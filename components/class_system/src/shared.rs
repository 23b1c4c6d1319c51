//! Shared-state merger.
//!
//! Shared members are objects or arrays stored once on the class prototype
//! and observed by every instance. A class starts from its parent's shared
//! set and layers the names its own `Shared` directive declares.

use core_types::{ClassError, ClassResult, MemberKey, Value};
use indexmap::IndexMap;
use log::trace;

use crate::body::ClassBody;
use crate::descriptor::Skeleton;

/// Shared members by name
pub type SharedMembers = IndexMap<String, Value>;

/// Compute the shared set a child inherits from `parent_shared`.
///
/// A member the body does not redeclare is shared with the parent by
/// reference. A redeclared array replaces the parent's; a redeclared object
/// is overlaid onto a deep copy of the parent's.
pub fn inherit(class_path: &str, parent_shared: &SharedMembers, body: &ClassBody) -> ClassResult<SharedMembers> {
    let mut shared = SharedMembers::with_capacity(parent_shared.len());
    for (name, parent_value) in parent_shared {
        let value = match body.get(name) {
            None => parent_value.clone(),
            Some(child_value) => match (parent_value, child_value) {
                (Value::Array(_), Value::Array(_)) => child_value.clone(),
                (Value::Object(_), Value::Object(_)) => {
                    let merged = parent_value.deep_copy();
                    overlay(&merged, child_value);
                    merged
                }
                _ => {
                    return Err(ClassError::InvalidOverride(format!(
                        "shared members of different types must not override each other: {}::{} ({} -> {})",
                        class_path,
                        name,
                        parent_value.type_name(),
                        child_value.type_name()
                    )))
                }
            },
        };
        trace!(
            "{}: shared member {} {}",
            class_path,
            name,
            if body.contains(name) { "redeclared" } else { "inherited" }
        );
        shared.insert(name.clone(), value);
    }
    Ok(shared)
}

/// Add the names of a `Shared` directive to `shared`.
///
/// `parent_skeleton` is the parent's compiled skeleton, if the class has a
/// parent.
pub fn declare(
    class_path: &str,
    shared: &mut SharedMembers,
    names: &[String],
    body: &ClassBody,
    parent_skeleton: Option<&Skeleton>,
) -> ClassResult<()> {
    for name in names {
        let value = body.get(name).ok_or_else(|| {
            ClassError::InvalidDirective(format!("'Shared' member is not in class: {}::{}", class_path, name))
        })?;
        if !value.is_object() && !value.is_array() {
            return Err(ClassError::InvalidMember(format!(
                "only objects and arrays can be made 'Shared': {}::{} is {}",
                class_path,
                name,
                value.type_name()
            )));
        }
        if parent_skeleton.map_or(false, |skeleton| skeleton.contains_key(&MemberKey::parse(name))) {
            return Err(ClassError::VisibilityConflict(format!(
                "instance member from parent class may not become 'Shared' in descendant: {}::{}",
                class_path, name
            )));
        }
        if shared.contains_key(name) {
            return Err(ClassError::DuplicateDefinition(format!(
                "member is already 'Shared' in parent class: {}::{}",
                class_path, name
            )));
        }
        shared.insert(name.clone(), value.clone());
    }
    Ok(())
}

/// Fail if an instance member hides a shared one
pub fn check_visibility(class_path: &str, shared: &SharedMembers, skeleton: &Skeleton) -> ClassResult<()> {
    match shared
        .keys()
        .find(|name| skeleton.contains_key(&MemberKey::parse(name)))
    {
        Some(name) => Err(ClassError::VisibilityConflict(format!(
            "'Shared' class member is hidden by member from instance: {}::{}",
            class_path, name
        ))),
        None => Ok(()),
    }
}

/// Write every entry of `source` into `target`, merging nested objects
/// present on both sides.
fn overlay(target: &Value, source: &Value) {
    for (key, value) in source.entries() {
        match target.get(&key) {
            Some(existing) if existing.is_object() && value.is_object() => overlay(&existing, &value),
            _ => target.set(&key, value),
        }
    }
}
