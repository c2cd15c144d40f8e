use std::collections::BTreeSet;
use std::fmt;

use crate::core_api::{CoreError, CoreErrorCode, SectionError};
use crate::lookup::Registries;
use crate::node::{Document, Node};
use crate::subject::Subject;

pub type SectionHandler = fn(&SectionInput<'_>, &mut dyn Subject) -> Result<(), SectionError>;

/// What a handler sees of the document while restoring one section.
pub struct SectionInput<'a> {
    pub key: &'static str,
    pub node: &'a Node,
    pub document: &'a Document,
    pub registries: &'a Registries,
}

impl<'a> SectionInput<'a> {
    /// A root-level key that must accompany this section. A present `null`
    /// is returned as is and fails when coerced.
    pub fn companion(&self, key: &str) -> Result<&'a Node, SectionError> {
        self.document
            .get(key)
            .ok_or_else(|| SectionError::RequiredSectionMissing(key.to_string()))
    }

    /// A root-level key that may accompany this section.
    pub fn optional_companion(&self, key: &str) -> Option<&'a Node> {
        self.document.get(key)
    }
}

#[derive(Clone, Copy)]
pub struct SectionDescriptor {
    pub key: &'static str,
    pub required: bool,
    /// Whether a present `null` value is skipped like an absent key.
    pub null_as_absent: bool,
    /// Keys whose sections must already be applied when this one runs.
    pub after: &'static [&'static str],
    pub handler: SectionHandler,
}

impl SectionDescriptor {
    pub const fn required(key: &'static str, handler: SectionHandler) -> Self {
        Self {
            key,
            required: true,
            null_as_absent: false,
            after: &[],
            handler,
        }
    }

    pub const fn optional(key: &'static str, handler: SectionHandler) -> Self {
        Self {
            key,
            required: false,
            null_as_absent: false,
            after: &[],
            handler,
        }
    }

    pub const fn null_as_absent(mut self) -> Self {
        self.null_as_absent = true;
        self
    }

    /// The section node to restore, or `None` when the section counts as
    /// absent from `document`.
    pub fn lookup<'d>(&self, document: &'d Document) -> Option<&'d Node> {
        document
            .get(self.key)
            .filter(|node| !(self.null_as_absent && node.is_null()))
    }

    pub const fn after(mut self, keys: &'static [&'static str]) -> Self {
        self.after = keys;
        self
    }
}

impl fmt::Debug for SectionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SectionDescriptor")
            .field("key", &self.key)
            .field("required", &self.required)
            .field("null_as_absent", &self.null_as_absent)
            .field("after", &self.after)
            .finish_non_exhaustive()
    }
}

/// The fixed, ordered catalogue of sections. Never mutated after
/// construction.
#[derive(Debug, Clone)]
pub struct SectionRegistry {
    descriptors: Vec<SectionDescriptor>,
}

impl SectionRegistry {
    pub fn new(descriptors: Vec<SectionDescriptor>) -> Result<Self, CoreError> {
        let registry = Self { descriptors };
        registry.validate()?;
        Ok(registry)
    }

    pub fn descriptors(&self) -> &[SectionDescriptor] {
        &self.descriptors
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.descriptors.iter().map(|d| d.key)
    }

    pub fn get(&self, key: &str) -> Option<&SectionDescriptor> {
        self.descriptors.iter().find(|d| d.key == key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.descriptors.iter().position(|d| d.key == key)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.descriptors.is_empty() {
            return Err(CoreError::new(
                CoreErrorCode::InvalidRegistry,
                "section registry must contain at least one section",
            ));
        }

        let mut seen = BTreeSet::new();
        for descriptor in &self.descriptors {
            for dependency in descriptor.after {
                if !seen.contains(dependency) {
                    return Err(CoreError::new(
                        CoreErrorCode::InvalidRegistry,
                        format!(
                            "section `{}` must run after `{}`, which is not declared before it",
                            descriptor.key, dependency
                        ),
                    ));
                }
            }
            if !seen.insert(descriptor.key) {
                return Err(CoreError::new(
                    CoreErrorCode::InvalidRegistry,
                    format!("duplicate section key `{}`", descriptor.key),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &SectionInput<'_>, _: &mut dyn Subject) -> Result<(), SectionError> {
        Ok(())
    }

    #[test]
    fn rejects_empty_registry() {
        let err = SectionRegistry::new(Vec::new()).expect_err("empty registry");
        assert_eq!(err.code, CoreErrorCode::InvalidRegistry);
    }

    #[test]
    fn rejects_duplicate_keys() {
        let err = SectionRegistry::new(vec![
            SectionDescriptor::required("a", noop),
            SectionDescriptor::optional("a", noop),
        ])
        .expect_err("duplicate keys");
        assert!(err.message.contains("duplicate section key `a`"));
    }

    #[test]
    fn rejects_dependencies_declared_later() {
        let err = SectionRegistry::new(vec![
            SectionDescriptor::optional("autocast", noop).after(&["book"]),
            SectionDescriptor::required("book", noop),
        ])
        .expect_err("dependency after dependent");
        assert!(err.message.contains("`autocast` must run after `book`"));
    }

    #[test]
    fn accepts_ordered_dependencies() {
        let registry = SectionRegistry::new(vec![
            SectionDescriptor::required("book", noop),
            SectionDescriptor::optional("autocast", noop).after(&["book"]),
        ])
        .expect("valid registry");
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec!["book", "autocast"]);
        assert_eq!(registry.position("autocast"), Some(1));
    }

    #[test]
    fn null_counts_as_absent_only_when_declared() {
        let document = Document::from_json_str(r#"{"ge": null, "states": null}"#)
            .expect("valid document");
        let tolerant = SectionDescriptor::optional("ge", noop).null_as_absent();
        let strict = SectionDescriptor::optional("states", noop);

        assert_eq!(tolerant.lookup(&document), None);
        assert_eq!(strict.lookup(&document), Some(&Node::Null));
        assert_eq!(SectionDescriptor::optional("emotes", noop).lookup(&document), None);
    }
}
