//! Shadow DOM
//!
//! Shadow root holding the named surfaces (`part`s) an element renders.

use crate::NodeId;

/// A rendered surface exposed through the `part` attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub id: NodeId,
    pub part: &'static str,
    pub inert: bool,
    pub hidden: bool,
    pub text: String,
}

/// Shadow root
#[derive(Debug, Clone)]
pub struct ShadowRoot {
    pub host: NodeId,
    surfaces: Vec<Surface>,
}

impl ShadowRoot {
    /// Create a new shadow root
    pub fn new(host: NodeId) -> Self {
        Self {
            host,
            surfaces: Vec::new(),
        }
    }

    /// Add a surface; an existing surface with the same part is kept
    pub fn attach(&mut self, id: NodeId, part: &'static str) -> &mut Surface {
        let index = match self.surfaces.iter().position(|s| s.part == part) {
            Some(index) => index,
            None => {
                self.surfaces.push(Surface {
                    id,
                    part,
                    inert: false,
                    hidden: false,
                    text: String::new(),
                });
                self.surfaces.len() - 1
            }
        };
        &mut self.surfaces[index]
    }

    /// Remove a surface by part name
    pub fn detach(&mut self, part: &str) -> Option<Surface> {
        let index = self.surfaces.iter().position(|s| s.part == part)?;
        Some(self.surfaces.remove(index))
    }

    pub fn part(&self, part: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|s| s.part == part)
    }

    pub fn part_mut(&mut self, part: &str) -> Option<&mut Surface> {
        self.surfaces.iter_mut().find(|s| s.part == part)
    }

    /// Set `inert` on a surface. Missing surfaces are ignored.
    pub fn set_inert(&mut self, part: &str, inert: bool) {
        if let Some(surface) = self.part_mut(part) {
            surface.inert = inert;
        }
    }

    pub fn is_inert(&self, part: &str) -> bool {
        self.part(part).map(|s| s.inert).unwrap_or(false)
    }

    pub fn surfaces(&self) -> &[Surface] {
        &self.surfaces
    }

    /// Whether `id` is one of this root's surfaces
    pub fn contains(&self, id: NodeId) -> bool {
        self.surfaces.iter().any(|s| s.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shadow_root() {
        let mut shadow = ShadowRoot::new(NodeId(1));
        shadow.attach(NodeId(2), "presentation").text = "Select".into();
        shadow.attach(NodeId(3), "dropdown");

        assert_eq!(shadow.surfaces().len(), 2);
        assert_eq!(shadow.part("presentation").unwrap().text, "Select");
        assert!(shadow.contains(NodeId(3)));
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut shadow = ShadowRoot::new(NodeId(1));
        shadow.attach(NodeId(2), "search");
        shadow.attach(NodeId(9), "search");

        assert_eq!(shadow.surfaces().len(), 1);
        assert_eq!(shadow.part("search").unwrap().id, NodeId(2));
        assert!(shadow.detach("search").is_some());
        assert!(shadow.detach("search").is_none());
    }

    #[test]
    fn test_inert() {
        let mut shadow = ShadowRoot::new(NodeId(1));
        shadow.attach(NodeId(2), "dropdown");
        shadow.set_inert("dropdown", true);
        shadow.set_inert("missing", true);

        assert!(shadow.is_inert("dropdown"));
        assert!(!shadow.is_inert("missing"));
    }
}
