//! A headless [`Dom`], for rendering outside of browsers and for tests.

use crate::dom::{invariant_violation, Dom};
use core::{cell::RefCell, fmt::Write as _};
use tracing::trace;

/// Handle of a node in a [`MemoryDom`].
///
/// Only meaningful for the [`MemoryDom`] that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
enum Kind {
	Element {
		namespace: Option<String>,
		name: String,
		attributes: Vec<(String, String)>,
	},
	Text(String),
	Comment(String),
}

#[derive(Debug)]
struct NodeData {
	kind: Kind,
	parent: Option<NodeId>,
	first_child: Option<NodeId>,
	last_child: Option<NodeId>,
	previous_sibling: Option<NodeId>,
	next_sibling: Option<NodeId>,
}
impl NodeData {
	fn new(kind: Kind) -> Self {
		Self {
			kind,
			parent: None,
			first_child: None,
			last_child: None,
			previous_sibling: None,
			next_sibling: None,
		}
	}
}

/// An arena of nodes with DOM-like parent and sibling links.
///
/// Nodes are never freed. Removed nodes stay valid and can be inserted again.
#[derive(Debug, Default)]
pub struct MemoryDom {
	nodes: RefCell<Vec<NodeData>>,
}
impl MemoryDom {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	fn push(&self, kind: Kind) -> NodeId {
		let mut nodes = self.nodes.borrow_mut();
		nodes.push(NodeData::new(kind));
		NodeId(nodes.len() - 1)
	}

	/// The children of `parent`, in order.
	#[must_use]
	pub fn child_nodes(&self, parent: NodeId) -> Vec<NodeId> {
		let nodes = self.nodes.borrow();
		let mut children = Vec::new();
		let mut child = nodes[parent.0].first_child;
		while let Some(current) = child {
			children.push(current);
			child = nodes[current.0].next_sibling;
		}
		children
	}

	/// The data of a text or comment node.
	#[must_use]
	pub fn data(&self, node: NodeId) -> Option<String> {
		match &self.nodes.borrow()[node.0].kind {
			Kind::Text(data) | Kind::Comment(data) => Some(data.clone()),
			Kind::Element { .. } => None,
		}
	}

	#[must_use]
	pub fn is_comment(&self, node: NodeId) -> bool {
		matches!(self.nodes.borrow()[node.0].kind, Kind::Comment(_))
	}

	#[must_use]
	pub fn namespace(&self, element: NodeId) -> Option<String> {
		match &self.nodes.borrow()[element.0].kind {
			Kind::Element { namespace, .. } => namespace.clone(),
			Kind::Text(_) | Kind::Comment(_) => None,
		}
	}

	/// Serializes the children of `node`.
	#[must_use]
	pub fn inner_html(&self, node: NodeId) -> String {
		let nodes = self.nodes.borrow();
		let mut html = String::new();
		serialize_children(&nodes, node, &mut html);
		html
	}

	/// Serializes `node` including itself.
	#[must_use]
	pub fn outer_html(&self, node: NodeId) -> String {
		let nodes = self.nodes.borrow();
		let mut html = String::new();
		serialize(&nodes, node, &mut html);
		html
	}
}

fn serialize_children(nodes: &[NodeData], parent: NodeId, html: &mut String) {
	let mut child = nodes[parent.0].first_child;
	while let Some(current) = child {
		serialize(nodes, current, html);
		child = nodes[current.0].next_sibling;
	}
}

fn serialize(nodes: &[NodeData], node: NodeId, html: &mut String) {
	match &nodes[node.0].kind {
		Kind::Element { name, attributes, .. } => {
			html.push('<');
			html.push_str(name);
			for (name, value) in attributes {
				write!(html, " {}=\"{}\"", name, escape(value)).unwrap_or_else(|_| invariant_violation("Writing to a `String` failed."));
			}
			html.push('>');
			serialize_children(nodes, node, html);
			html.push_str("</");
			html.push_str(name);
			html.push('>');
		}
		Kind::Text(data) => html.push_str(&escape(data)),
		Kind::Comment(data) => {
			html.push_str("<!--");
			html.push_str(data);
			html.push_str("-->");
		}
	}
}

fn escape(text: &str) -> String {
	text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn detach(nodes: &mut [NodeData], node: NodeId) {
	let data = &mut nodes[node.0];
	let (parent, previous, next) = (data.parent.take(), data.previous_sibling.take(), data.next_sibling.take());
	let parent = match parent {
		Some(parent) => parent,
		None => return,
	};

	match previous {
		Some(previous) => nodes[previous.0].next_sibling = next,
		None => nodes[parent.0].first_child = next,
	}
	match next {
		Some(next) => nodes[next.0].previous_sibling = previous,
		None => nodes[parent.0].last_child = previous,
	}
}

impl Dom for MemoryDom {
	type Node = NodeId;

	fn create_comment(&self, data: &str) -> NodeId {
		self.push(Kind::Comment(data.to_owned()))
	}

	fn create_text_node(&self, data: &str) -> NodeId {
		self.push(Kind::Text(data.to_owned()))
	}

	fn create_element(&self, namespace: Option<&str>, name: &str) -> NodeId {
		self.push(Kind::Element {
			namespace: namespace.map(ToOwned::to_owned),
			name: name.to_owned(),
			attributes: Vec::new(),
		})
	}

	fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
		match &mut self.nodes.borrow_mut()[element.0].kind {
			Kind::Element { attributes, .. } => match attributes.iter_mut().find(|(existing, _)| existing == name) {
				Some((_, existing)) => *existing = value.to_owned(),
				None => attributes.push((name.to_owned(), value.to_owned())),
			},
			Kind::Text(_) | Kind::Comment(_) => invariant_violation(&format!("Tried to set attribute {:?} on non-element {:?}.", name, element)),
		}
	}

	fn set_data(&self, node: &NodeId, data: &str) {
		match &mut self.nodes.borrow_mut()[node.0].kind {
			Kind::Text(existing) | Kind::Comment(existing) => *existing = data.to_owned(),
			Kind::Element { .. } => invariant_violation(&format!("Tried to set data of element {:?}.", node)),
		}
	}

	fn insert_before(&self, parent: &NodeId, node: &NodeId, reference: Option<&NodeId>) {
		let (parent, node, reference) = (*parent, *node, reference.copied());
		trace!(?parent, ?node, ?reference, "Inserting node.");
		let mut nodes = self.nodes.borrow_mut();

		if !matches!(nodes[parent.0].kind, Kind::Element { .. }) {
			invariant_violation(&format!("Tried to insert into non-element {:?}.", parent))
		}
		if let Some(reference) = reference {
			if nodes[reference.0].parent != Some(parent) {
				invariant_violation(&format!("Reference node {:?} is not a child of {:?}.", reference, parent))
			}
		}
		let mut ancestor = Some(parent);
		while let Some(current) = ancestor {
			if current == node {
				invariant_violation(&format!("Tried to insert {:?} into its own subtree.", node))
			}
			ancestor = nodes[current.0].parent;
		}
		if reference == Some(node) {
			return;
		}

		detach(&mut nodes, node);

		let previous = match reference {
			Some(reference) => nodes[reference.0].previous_sibling,
			None => nodes[parent.0].last_child,
		};
		{
			let data = &mut nodes[node.0];
			data.parent = Some(parent);
			data.previous_sibling = previous;
			data.next_sibling = reference;
		}
		match previous {
			Some(previous) => nodes[previous.0].next_sibling = Some(node),
			None => nodes[parent.0].first_child = Some(node),
		}
		match reference {
			Some(reference) => nodes[reference.0].previous_sibling = Some(node),
			None => nodes[parent.0].last_child = Some(node),
		}
	}

	fn remove_child(&self, parent: &NodeId, node: &NodeId) {
		trace!(?parent, ?node, "Removing node.");
		let mut nodes = self.nodes.borrow_mut();
		if nodes[node.0].parent != Some(*parent) {
			invariant_violation(&format!("{:?} is not a child of {:?}.", node, parent))
		}
		detach(&mut nodes, *node)
	}

	fn next_sibling(&self, node: &NodeId) -> Option<NodeId> {
		self.nodes.borrow()[node.0].next_sibling
	}

	fn parent_node(&self, node: &NodeId) -> Option<NodeId> {
		self.nodes.borrow()[node.0].parent
	}
}
