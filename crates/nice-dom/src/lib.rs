//! nice-dom - Host DOM primitives
//!
//! The slice of a DOM host environment a form-associated custom element
//! needs: light-DOM children, mutation observation, element internals,
//! shadow surfaces, document listeners and a frame-driven event loop.

mod node;
mod light_dom;
mod document;
pub mod observer;
pub mod forms;
pub mod custom_elements;
pub mod shadow;
pub mod event_loop;

pub use node::{SourceNode, SourceKind, OptionSource, OptGroupSource, OptionFlag};
pub use light_dom::LightDom;
pub use document::{Document, EventType, ListenerHandle, NodeIds};
pub use observer::{MutationObserver, MutationObserverInit, MutationRecord, MutationType};
pub use forms::{ElementInternals, CustomStateSet, FormControl, FormData, ValidityState, ValidityFlags};
pub use custom_elements::{CustomElementRegistry, CustomElementDefinition, CustomElementOptions, CustomElementError};
pub use shadow::{ShadowRoot, Surface};
pub use event_loop::{EventLoop, TimerId, FrameId};

/// Node identifier, unique within a [`Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The document node
    pub const ROOT: NodeId = NodeId(0);
    /// Placeholder for nodes not yet inserted into a tree
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Whether this id refers to an inserted node
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }
}
