//! Method patching.

use core_types::{ClassError, ClassResult, Instance, MemberKey, Value};
use log::trace;

/// Replace a method implementation with another one already present on the
/// instance's prototype.
///
/// `declaring_class` is the short name of the class whose body performs the
/// patch, which may sit anywhere in the inheritance chain. When a descendant
/// has overridden `method`, the declaring class's own implementation lives
/// under an alias; the first live alias `"<Name>$<method>"` found scanning
/// from the declaring class toward the most derived class is the slot that
/// gets replaced, otherwise the plain `method` slot is.
///
/// The slot at `new_method` is cleared to `null` so that an ancestor
/// patching the same method later does not pick it up again. Returns the
/// name of the overwritten slot. The prototype is shared, so the patch
/// applies to every instance of the class.
pub fn patch(instance: &Instance, declaring_class: &str, method: &str, new_method: &str) -> ClassResult<String> {
    let prototype = instance.prototype();
    let ancestors = prototype.ancestor_names();
    let start = ancestors
        .iter()
        .position(|name| name == declaring_class)
        .ok_or_else(|| {
            ClassError::MissingDependency(format!(
                "{} is not in the inheritance chain of {}",
                declaring_class,
                instance.class_path()
            ))
        })?;

    let target = prototype
        .override_chain(method)
        .iter()
        .filter(|owner| ancestors[start..].contains(*owner))
        .map(|owner| MemberKey::alias(owner.as_str(), method))
        .find(|alias| prototype.is_live(alias))
        .unwrap_or_else(|| MemberKey::plain(method));

    let replacement_key = MemberKey::parse(new_method);
    let replacement = prototype.get(&replacement_key).unwrap_or(Value::Null);
    prototype.set(target.clone(), replacement);
    prototype.set(replacement_key, Value::Null);

    trace!(
        "{}: patched {} with {} (declared by {})",
        instance.class_path(),
        target,
        new_method,
        declaring_class
    );
    Ok(target.to_string())
}
