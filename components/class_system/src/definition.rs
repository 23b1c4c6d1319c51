//! Compiled class metadata.

use core_types::{ClassError, ClassResult, MemberKey};
use indexmap::IndexMap;

use crate::body::ClassBody;
use crate::classifier::Classifier;
use crate::compose;
use crate::config::ClassConfig;
use crate::descriptor::Skeleton;
use crate::directives::Directives;
use crate::references::ReferenceTable;
use crate::shared::{self, SharedMembers};
use crate::skeleton::build_skeleton;

/// Everything the registry knows about one defined class: what descendants
/// inherit from and what its constructor was built from.
#[derive(Debug, Clone)]
pub struct ClassDefinition {
    path: String,
    name: String,
    parent_path: Option<String>,
    mixin_paths: Vec<String>,
    implemented: Vec<String>,
    is_abstract: bool,
    skeleton: Skeleton,
    references: ReferenceTable,
    shared: SharedMembers,
    ancestor_paths: Vec<String>,
    ancestor_names: Vec<String>,
    override_chains: IndexMap<String, Vec<String>>,
    class_body: ClassBody,
    own_references_count: usize,
}

impl ClassDefinition {
    /// Compile a class body against the classes already in `sources`.
    ///
    /// The parent is merged first, then every mixin in declaration order.
    pub(crate) fn compile(
        path: &str,
        body: ClassBody,
        config: &ClassConfig,
        sources: &IndexMap<String, ClassDefinition>,
    ) -> ClassResult<Self> {
        let name = class_name(path).to_string();
        let directives = Directives::parse(path, &body)?;

        let parent = match &directives.extends {
            Some(parent_path) => Some(sources.get(parent_path).ok_or_else(|| {
                ClassError::MissingDependency(format!(
                    "parent class not found: \"{}\" (extended by {})",
                    parent_path, path
                ))
            })?),
            None => None,
        };

        let (ancestor_paths, ancestor_names, mut references, mut implemented, mut shared) = match parent {
            Some(parent) => {
                if parent.ancestor_names.contains(&name) {
                    return Err(ClassError::DuplicateDefinition(format!(
                        "duplicate name in inheritance chain: '{}' in {}",
                        name, path
                    )));
                }
                let mut ancestor_paths = parent.ancestor_paths.clone();
                ancestor_paths.push(path.to_string());
                let mut ancestor_names = parent.ancestor_names.clone();
                ancestor_names.push(name.clone());
                (
                    ancestor_paths,
                    ancestor_names,
                    parent.references.clone(),
                    parent.implemented.clone(),
                    shared::inherit(path, &parent.shared, &body)?,
                )
            }
            None => (
                vec![path.to_string()],
                vec![name.clone()],
                ReferenceTable::new(),
                Vec::new(),
                SharedMembers::new(),
            ),
        };

        shared::declare(
            path,
            &mut shared,
            &directives.shared,
            &body,
            parent.map(|p| &p.skeleton),
        )?;

        let inherited_references = references.len();
        let mut skeleton = {
            let mut classifier = Classifier::new(path, config, &mut references);
            build_skeleton(&mut classifier, &body, &shared)?
        };

        if let Some(parent) = parent {
            compose::extend(path, &mut skeleton, &parent.name, &parent.skeleton)?;
        }

        let own_references_count = references.len() - inherited_references;

        for mixin_path in &directives.implements {
            let mixin = sources.get(mixin_path).ok_or_else(|| {
                ClassError::MissingDependency(format!(
                    "Implements: class not found - \"{}\" ({})",
                    mixin_path, path
                ))
            })?;
            if !mixin.shared.is_empty() {
                return Err(ClassError::InvalidMixin(format!(
                    "classes with 'Shared' can not be used as mixin: {} <- {}",
                    path, mixin_path
                )));
            }
            if implemented.contains(mixin_path) {
                return Err(ClassError::DuplicateDefinition(format!(
                    "class {} already implements {}",
                    path, mixin_path
                )));
            }
            if mixin
                .skeleton
                .contains_key(&MemberKey::parse(&config.after_init_member))
            {
                return Err(ClassError::InvalidMixin(format!(
                    "classes with `{}` hook can not be used as mixin: {} <- {}",
                    config.after_init_member, path, mixin_path
                )));
            }

            implemented.push(mixin_path.clone());
            let offset = references.append(&mixin.references);
            compose::implement(path, &mut skeleton, mixin_path, &mixin.skeleton, offset)?;
        }

        shared::check_visibility(path, &shared, &skeleton)?;
        let override_chains = override_chains(&skeleton, &ancestor_names);

        Ok(ClassDefinition {
            path: path.to_string(),
            name,
            parent_path: directives.extends,
            mixin_paths: directives.implements,
            implemented,
            is_abstract: directives.is_abstract,
            skeleton,
            references,
            shared,
            ancestor_paths,
            ancestor_names,
            override_chains,
            class_body: body,
            own_references_count,
        })
    }

    /// Full dot-separated path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Last segment of the path
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the parent class
    pub fn parent_path(&self) -> Option<&str> {
        self.parent_path.as_deref()
    }

    /// Mixins declared by this class, in declaration order
    pub fn mixin_paths(&self) -> &[String] {
        &self.mixin_paths
    }

    /// Every mixin implemented by this class or an ancestor
    pub fn implemented(&self) -> &[String] {
        &self.implemented
    }

    /// Whether the class is abstract
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// The compiled skeleton
    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    /// The reference table the skeleton indexes into
    pub fn references(&self) -> &ReferenceTable {
        &self.references
    }

    /// Shared members by name
    pub fn shared(&self) -> &SharedMembers {
        &self.shared
    }

    /// Paths of the inheritance chain, root first, ending with this class
    pub fn ancestor_paths(&self) -> &[String] {
        &self.ancestor_paths
    }

    /// Short names of the inheritance chain, root first
    pub fn ancestor_names(&self) -> &[String] {
        &self.ancestor_names
    }

    /// For each method with retained ancestor implementations, the classes
    /// owning an alias, root first
    pub fn override_chains(&self) -> &IndexMap<String, Vec<String>> {
        &self.override_chains
    }

    /// The body the class was defined from
    pub fn class_body(&self) -> &ClassBody {
        &self.class_body
    }

    /// References contributed by the class body itself, excluding those
    /// copied from the parent and mixins
    pub fn own_references_count(&self) -> usize {
        self.own_references_count
    }

    /// Number of ancestors; 0 for a root class
    pub fn hierarchy_index(&self) -> usize {
        self.ancestor_paths.len() - 1
    }
}

/// Last segment of a dot-separated class path
pub fn class_name(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

fn override_chains(skeleton: &Skeleton, ancestor_names: &[String]) -> IndexMap<String, Vec<String>> {
    let mut chains: IndexMap<String, Vec<String>> = IndexMap::new();
    for key in skeleton.keys() {
        if let MemberKey::Alias { class_name, member } = key {
            chains.entry(member.clone()).or_default().push(class_name.clone());
        }
    }
    for chain in chains.values_mut() {
        chain.sort_by_key(|name| {
            ancestor_names
                .iter()
                .position(|ancestor| ancestor == name)
                .unwrap_or(usize::MAX)
        });
    }
    chains
}
