//! Composition engine.
//!
//! Merges an already compiled skeleton (a parent's or a mixin's) into the
//! skeleton of the class being defined. The child's own descriptors always
//! take precedence; what the child lacks is copied in.

use core_types::{ClassError, ClassResult, MemberKey};
use log::trace;

use crate::descriptor::{MemberDescriptor, Skeleton};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Single inheritance: the child's reference table starts as a copy of
    /// the parent's, so indices carry over unchanged
    Extend,
    /// Mixin: the mixin's table was appended at `offset`
    Implement { offset: usize },
}

/// Merge a parent skeleton into `child` with extension semantics.
///
/// A parent method overridden by the child is retained under the alias
/// `"<parent_name>$<member>"`. Returns the aliases created, in order.
pub fn extend(
    child_path: &str,
    child: &mut Skeleton,
    parent_name: &str,
    parent: &Skeleton,
) -> ClassResult<Vec<MemberKey>> {
    let mut aliases = Vec::new();
    merge(child_path, child, parent_name, parent, true, Mode::Extend, &mut aliases)?;
    for alias in &aliases {
        trace!("{}: parent implementation kept as {}", child_path, alias);
    }
    Ok(aliases)
}

/// Merge a mixin skeleton into `child`.
///
/// `offset` is the length of the child's reference table at the moment the
/// mixin's table was appended to it. No aliases are created.
pub fn implement(
    child_path: &str,
    child: &mut Skeleton,
    mixin_name: &str,
    mixin: &Skeleton,
    offset: usize,
) -> ClassResult<()> {
    trace!("{}: implementing {} at reference offset {}", child_path, mixin_name, offset);
    let mut aliases = Vec::new();
    merge(
        child_path,
        child,
        mixin_name,
        mixin,
        true,
        Mode::Implement { offset },
        &mut aliases,
    )
}

fn merge(
    child_path: &str,
    child: &mut Skeleton,
    parent_name: &str,
    parent: &Skeleton,
    is_root: bool,
    mode: Mode,
    aliases: &mut Vec<MemberKey>,
) -> ClassResult<()> {
    for (key, parent_descriptor) in parent {
        let Some(child_descriptor) = child.get_mut(key) else {
            let copied = copy_descriptor(child_path, parent_name, parent_descriptor, mode, aliases)?;
            child.insert(key.clone(), copied);
            continue;
        };

        if is_root && child_descriptor.is_callable() != parent_descriptor.is_callable() {
            // a null slot may become a method, nothing else may change sides
            let widens_placeholder =
                child_descriptor.is_callable() && parent_descriptor.is_null_placeholder();
            if !widens_placeholder {
                return Err(ClassError::InvalidOverride(format!(
                    "a method from parent must not become something else in child: {}::{}",
                    child_path, key
                )));
            }
        }

        match parent_descriptor {
            MemberDescriptor::ReferenceFunction(_) => {
                if !is_root || mode != Mode::Extend {
                    continue;
                }
                let alias = MemberKey::alias(parent_name, key.to_string());
                if child.contains_key(&alias) {
                    return Err(ClassError::DuplicateDefinition(format!(
                        "function already exists in child: {}::{}",
                        child_path, alias
                    )));
                }
                child.insert(alias.clone(), parent_descriptor.clone());
                aliases.push(alias);
            }
            MemberDescriptor::Nested(parent_nested) => match child_descriptor {
                MemberDescriptor::Nested(child_nested) => {
                    merge(child_path, child_nested, parent_name, parent_nested, false, mode, aliases)?
                }
                other => {
                    return Err(ClassError::InvalidOverride(format!(
                        "an object from parent must not become {} in child: {}::{}",
                        other.kind_name(),
                        child_path,
                        key
                    )))
                }
            },
            _ => {}
        }
    }
    Ok(())
}

/// Descriptor for a member the child does not declare
fn copy_descriptor(
    child_path: &str,
    parent_name: &str,
    descriptor: &MemberDescriptor,
    mode: Mode,
    aliases: &mut Vec<MemberKey>,
) -> ClassResult<MemberDescriptor> {
    Ok(match (descriptor, mode) {
        (MemberDescriptor::Nested(parent_nested), _) => {
            let mut nested = Skeleton::new();
            merge(child_path, &mut nested, parent_name, parent_nested, false, mode, aliases)?;
            MemberDescriptor::Nested(nested)
        }
        (other, Mode::Implement { offset }) => other.shifted(offset),
        (other, Mode::Extend) => other.clone(),
    })
}
