//! Named tags that categorise a log call independently of its level.

use std::fmt;
use std::sync::Arc;

/// Immutable, named marker with optional references to other markers.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    name: Arc<str>,
    references: Arc<[Marker]>,
}

impl Marker {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self {
            name: Arc::from(name.as_ref()),
            references: Arc::from(Vec::new()),
        }
    }

    /// Return a copy of this marker that also refers to `reference`.
    pub fn with_reference(&self, reference: Marker) -> Self {
        let mut references = self.references.to_vec();
        references.push(reference);
        Self {
            name: Arc::clone(&self.name),
            references: Arc::from(references),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn references(&self) -> &[Marker] {
        &self.references
    }

    /// Return `true` if this marker is named `name` or refers, directly or
    /// transitively, to a marker that is.
    pub fn contains(&self, name: &str) -> bool {
        &*self.name == name || self.references.iter().any(|m| m.contains(name))
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.references.is_empty() {
            f.write_str(" [ ")?;
            for (i, reference) in self.references.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{reference}")?;
            }
            f.write_str(" ]")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Marker({self})")
    }
}
