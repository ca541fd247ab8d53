//! Static [`lignin`] trees as [`Template`]s.

use crate::{
	bounds::{Bounds, ConcreteBounds},
	dom::Dom,
	morph::{Frame, Site},
	template::{RenderResult, Template},
};
use hashbrown::HashSet;
use lignin::{Node, ThreadBound};
use tracing::{error, trace, trace_span, warn};

const MATHML: &str = "http://www.w3.org/1998/Math/MathML";
const SVG: &str = "http://www.w3.org/2000/svg";

/// Renders a fixed VDOM tree.
///
/// Only static content is materialized: DOM bindings, event bindings, custom element `is` options and remnant sites
/// are skipped with a warning or error.
#[derive(Clone, Copy)]
pub struct VdomTemplate {
	vdom: Node<'static, ThreadBound>,
	depth_limit: usize,
}
impl VdomTemplate {
	#[must_use]
	pub fn new(vdom: Node<'static, ThreadBound>, depth_limit: usize) -> Self {
		Self { vdom, depth_limit }
	}
}

impl<D: Dom> Template<D> for VdomTemplate {
	fn evaluate(&self, site: &Site<D>, next_sibling: Option<&D::Node>) -> Box<dyn RenderResult<D>> {
		let span = trace_span!("Evaluating VDOM template", parent = ?site.parent(), ?next_sibling, depth_limit = self.depth_limit);
		let _enter = span.enter();

		let dom = site.dom();
		let mut top_level = Vec::new();
		materialize(dom, &self.vdom, site.parent(), next_sibling, &mut top_level, self.depth_limit);

		let bounds = match (top_level.first(), top_level.last()) {
			(Some(first), Some(last)) => ConcreteBounds::new(site.parent().clone(), first.clone(), last.clone()),
			_ => {
				trace!("No top-level nodes. Inserting placeholder.");
				let placeholder = dom.create_comment("");
				dom.insert_before(site.parent(), &placeholder, next_sibling);
				ConcreteBounds::new(site.parent().clone(), placeholder.clone(), placeholder)
			}
		};
		Box::new(VdomResult { bounds })
	}
}

struct VdomResult<N> {
	bounds: ConcreteBounds<N>,
}
impl<D: Dom> RenderResult<D> for VdomResult<D::Node> {
	fn rerender(&mut self, _frame: &Frame<D>) {
		trace!("Static VDOM. Nothing to patch.");
	}
}
impl<N: Clone + PartialEq + core::fmt::Debug> Bounds for VdomResult<N> {
	type Node = N;

	fn parent_element(&self) -> N {
		self.bounds.parent_element()
	}

	fn first_node(&self) -> Option<N> {
		self.bounds.first_node()
	}

	fn last_node(&self) -> Option<N> {
		self.bounds.last_node()
	}
}

/// Inserts `vdom` into `parent` before `next_sibling`, pushing the created top-level nodes onto `created`.
fn materialize<D: Dom>(
	dom: &D,
	vdom: &Node<'static, ThreadBound>,
	parent: &D::Node,
	next_sibling: Option<&D::Node>,
	created: &mut Vec<D::Node>,
	depth_limit: usize,
) {
	if depth_limit == 0 {
		return error!("Depth limit reached");
	}

	match *vdom {
		Node::Comment { comment, dom_binding } => {
			let span = trace_span!("Creating comment", comment);
			let _enter = span.enter();
			if dom_binding.is_some() {
				warn!("DOM bindings are not supported. Ignoring.");
			}
			let node = dom.create_comment(comment);
			dom.insert_before(parent, &node, next_sibling);
			created.push(node);
		}

		Node::Text { text, dom_binding } => {
			let span = trace_span!("Creating text node", text.len = text.len());
			let _enter = span.enter();
			if dom_binding.is_some() {
				warn!("DOM bindings are not supported. Ignoring.");
			}
			let node = dom.create_text_node(text);
			dom.insert_before(parent, &node, next_sibling);
			created.push(node);
		}

		Node::HtmlElement { element, dom_binding } => {
			let span = trace_span!("Creating HTML element", name = element.name);
			let _enter = span.enter();
			if dom_binding.is_some() {
				warn!("DOM bindings are not supported. Ignoring.");
			}
			created.push(materialize_element(dom, None, element, parent, next_sibling, depth_limit));
		}

		Node::MathMlElement { element, dom_binding } => {
			let span = trace_span!("Creating MathML element", name = element.name);
			let _enter = span.enter();
			if dom_binding.is_some() {
				warn!("DOM bindings are not supported. Ignoring.");
			}
			created.push(materialize_element(dom, Some(MATHML), element, parent, next_sibling, depth_limit));
		}

		Node::SvgElement { element, dom_binding } => {
			let span = trace_span!("Creating SVG element", name = element.name);
			let _enter = span.enter();
			if dom_binding.is_some() {
				warn!("DOM bindings are not supported. Ignoring.");
			}
			created.push(materialize_element(dom, Some(SVG), element, parent, next_sibling, depth_limit));
		}

		Node::Memoized { state_key, content } => {
			let span = trace_span!("Creating memoized", state_key);
			let _enter = span.enter();
			materialize(dom, content, parent, next_sibling, created, depth_limit - 1)
		}

		Node::Multi(nodes) => {
			let span = trace_span!("Creating multi", "nodes.len()" = nodes.len());
			let _enter = span.enter();
			for node in nodes {
				materialize(dom, node, parent, next_sibling, created, depth_limit - 1)
			}
		}

		Node::Keyed(reorderable_fragments) => {
			let span = trace_span!("Creating keyed", "reorderable_fragments.len()" = reorderable_fragments.len());
			let _enter = span.enter();

			debug_assert_eq!(
				reorderable_fragments.len(),
				reorderable_fragments.iter().map(|rf| rf.dom_key).collect::<HashSet<_>>().len(),
				"Duplicate `ReorderableFragment::dom_key` encountered"
			);

			for reorderable_fragment in reorderable_fragments {
				let span = trace_span!("Creating keyed fragment", dom_key = reorderable_fragment.dom_key);
				let _enter = span.enter();
				materialize(dom, &reorderable_fragment.content, parent, next_sibling, created, depth_limit - 1)
			}
		}

		Node::RemnantSite(_) => error!("`RemnantSite`s can't be materialized. Skipping."),
	}
}

fn materialize_element<D: Dom>(
	dom: &D,
	namespace: Option<&str>,
	element: &lignin::Element<'static, ThreadBound>,
	parent: &D::Node,
	next_sibling: Option<&D::Node>,
	depth_limit: usize,
) -> D::Node {
	let &lignin::Element {
		name,
		creation_options,
		attributes,
		ref content,
		event_bindings,
	} = element;

	if creation_options.is().is_some() {
		warn!("Custom element `is` creation options are not supported. Ignoring.");
	}
	if !event_bindings.is_empty() {
		warn!("{} event binding(s) are not supported. Ignoring.", event_bindings.len());
	}

	let node = dom.create_element(namespace, name);
	for lignin::Attribute { name, value } in attributes {
		dom.set_attribute(&node, name, value);
	}

	// Children go in before the element is attached.
	// Childless elements may skip the `depth_limit` check one level down.
	if !matches!(content, Node::Multi(nodes) if nodes.is_empty()) {
		let mut children = Vec::new();
		materialize(dom, content, &node, None, &mut children, depth_limit - 1);
	}

	dom.insert_before(parent, &node, next_sibling);
	node
}
