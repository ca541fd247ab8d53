//! [`Dom`] on top of [`web_sys`].

use crate::dom::{invariant_violation, Dom};
use tracing::{error, trace};
use wasm_bindgen::JsCast;

/// Renders into a browser document.
///
/// Exceptions thrown by the browser are [invariant violations](`invariant_violation`).
#[derive(Debug, Clone)]
pub struct WebDom {
	document: web_sys::Document,
}
impl WebDom {
	#[must_use]
	pub fn new(document: web_sys::Document) -> Self {
		Self { document }
	}

	#[must_use]
	pub fn document(&self) -> &web_sys::Document {
		&self.document
	}
}

impl Dom for WebDom {
	type Node = web_sys::Node;

	fn create_comment(&self, data: &str) -> web_sys::Node {
		self.document.create_comment(data).into()
	}

	fn create_text_node(&self, data: &str) -> web_sys::Node {
		self.document.create_text_node(data).into()
	}

	fn create_element(&self, namespace: Option<&str>, name: &str) -> web_sys::Node {
		let element = match namespace {
			Some(namespace) => self.document.create_element_ns(Some(namespace), name),
			None => self.document.create_element(name),
		};
		match element {
			Ok(element) => element.into(),
			Err(error) => {
				error!("Failed to create element <{}> (namespace {:?}): {:?}", name, namespace, error);
				invariant_violation("Failed to create element.")
			}
		}
	}

	fn set_attribute(&self, element: &web_sys::Node, name: &str, value: &str) {
		let element = match element.dyn_ref::<web_sys::Element>() {
			Some(element) => element,
			None => invariant_violation(&format!("Tried to set attribute {:?} on non-element {:?}.", name, element)),
		};
		if let Err(error) = element.set_attribute(name, value) {
			error!("Failed to set attribute {:?}: {:?}", name, error);
			invariant_violation("Failed to set attribute.")
		}
	}

	fn set_data(&self, node: &web_sys::Node, data: &str) {
		match node.dyn_ref::<web_sys::CharacterData>() {
			Some(character_data) => character_data.set_data(data),
			None => invariant_violation(&format!("Tried to set data of {:?}, which is not character data.", node)),
		}
	}

	fn insert_before(&self, parent: &web_sys::Node, node: &web_sys::Node, reference: Option<&web_sys::Node>) {
		trace!(?parent, ?node, ?reference, "Inserting node.");
		if let Err(error) = parent.insert_before(node, reference) {
			error!("Failed to insert node: {:?}", error);
			invariant_violation("Failed to insert node.")
		}
	}

	fn remove_child(&self, parent: &web_sys::Node, node: &web_sys::Node) {
		trace!(?parent, ?node, "Removing node.");
		if let Err(error) = parent.remove_child(node) {
			error!("Failed to remove node: {:?}", error);
			invariant_violation("Failed to remove node.")
		}
	}

	fn next_sibling(&self, node: &web_sys::Node) -> Option<web_sys::Node> {
		node.next_sibling()
	}

	fn parent_node(&self, node: &web_sys::Node) -> Option<web_sys::Node> {
		node.parent_node()
	}
}
