//! The DOM mutation helper that morphs and templates render through.

use core::fmt::Debug;
use tracing::error;
use wasm_bindgen::throw_str;

/// Node creation and tree mutation as needed by morphs and templates.
///
/// Implementations are handles to a document. All methods take `&self`, since the same helper is shared by
/// every morph rendering into that document through their common [`Frame`](`crate::morph::Frame`).
///
/// # Failure
///
/// There is no error channel. A mutation that can't be carried out means that some caller broke a precondition,
/// so implementations must fail loudly through [`invariant_violation`] (or equivalent) instead of reporting it.
pub trait Dom: 'static {
	/// A cheaply cloneable reference to a node in this document.
	///
	/// Equality is node identity.
	type Node: Clone + PartialEq + Debug + 'static;

	fn create_comment(&self, data: &str) -> Self::Node;
	fn create_text_node(&self, data: &str) -> Self::Node;

	/// Creates an element in `namespace`, or an HTML element if that's [`None`].
	fn create_element(&self, namespace: Option<&str>, name: &str) -> Self::Node;

	fn set_attribute(&self, element: &Self::Node, name: &str, value: &str);

	/// Replaces the data of a text or comment node.
	fn set_data(&self, node: &Self::Node, data: &str);

	/// Inserts `node` into `parent` right before `reference`, or as last child if `reference` is [`None`].
	///
	/// If `node` already has a parent, it is moved rather than copied.
	fn insert_before(&self, parent: &Self::Node, node: &Self::Node, reference: Option<&Self::Node>);

	fn remove_child(&self, parent: &Self::Node, node: &Self::Node);

	fn next_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
	fn parent_node(&self, node: &Self::Node) -> Option<Self::Node>;
}

/// Logs `message` and aborts the current operation.
///
/// This panics with debug assertions enabled or outside of WebAssembly, and throws into JavaScript otherwise.
#[track_caller]
pub fn invariant_violation(message: &str) -> ! {
	error!("Invariant violation: {}", message);
	if cfg!(debug_assertions) || !cfg!(target_arch = "wasm32") {
		panic!("lignin-morph: {}", message)
	} else {
		throw_str(message)
	}
}
