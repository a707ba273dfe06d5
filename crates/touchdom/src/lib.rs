mod document;
pub mod selector;
#[cfg(feature = "web")]
pub mod web;

pub use document::{
    Dispatched, ElementData, ElementId, MemoryDocument, StyleElement, TouchDispatch,
};
