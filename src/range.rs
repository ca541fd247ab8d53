//! Stateless algorithms over [`Bounds`].
//!
//! These only ever touch the nodes reachable from the bounds they are given,
//! since the parent container is shared with sibling regions.

use crate::{
	bounds::{Bounds, SingleNodeBounds},
	dom::{invariant_violation, Dom},
	morph::Site,
	template::{RenderResult, TemplateRef},
};
use tracing::{trace, trace_span};

/// Removes every node in `bounds` from its parent.
///
/// Returns the sibling that followed the removed range, if any, which is where replacement content should go.
///
/// # Panics
///
/// Iff `bounds` is malformed, i.e. its last node isn't reached by walking siblings from its first node.
/// Nodes up to the end of the parent have been removed at that point.
pub fn clear<D: Dom, B: Bounds<Node = D::Node> + ?Sized>(dom: &D, bounds: &B) -> Option<D::Node> {
	let parent = bounds.parent_element();
	let (first, last) = match (bounds.first_node(), bounds.last_node()) {
		(Some(first), Some(last)) => (first, last),
		(None, None) => {
			trace!("Nothing to clear.");
			return None;
		}
		(first, last) => invariant_violation(&format!("Malformed bounds: first node {:?}, last node {:?}", first, last)),
	};

	let span = trace_span!("Clearing bounds", ?parent, ?first, ?last);
	let _enter = span.enter();

	let mut node = first;
	let mut removed = 0_usize;
	loop {
		let next = dom.next_sibling(&node);
		dom.remove_child(&parent, &node);
		removed += 1;

		if node == last {
			trace!("Removed {} node(s).", removed);
			return next;
		}

		node = match next {
			Some(next) => next,
			None => invariant_violation(&format!(
				"Malformed bounds: Ran out of siblings in {:?} before reaching last node {:?}",
				parent, last
			)),
		};
	}
}

/// Moves (not copies) the nodes in `bounds` into `parent`, right before the first node of `reference`.
///
/// Without a `reference` (or if it has no nodes), they are moved to the end of `parent`. Their order is preserved.
///
/// # Panics
///
/// Iff `bounds` is malformed, like [`clear`].
pub fn insert_bounds_before<D: Dom, B: Bounds<Node = D::Node> + ?Sized>(
	dom: &D,
	parent: &D::Node,
	bounds: &B,
	reference: Option<&dyn Bounds<Node = D::Node>>,
) {
	let (first, last) = match (bounds.first_node(), bounds.last_node()) {
		(Some(first), Some(last)) => (first, last),
		(None, None) => {
			trace!("Nothing to move.");
			return;
		}
		(first, last) => invariant_violation(&format!("Malformed bounds: first node {:?}, last node {:?}", first, last)),
	};
	let next_sibling = reference.and_then(|reference| reference.first_node());

	let span = trace_span!("Moving bounds", ?parent, ?first, ?last, ?next_sibling);
	let _enter = span.enter();

	let mut node = first;
	loop {
		// Has to be read before the move.
		let next = dom.next_sibling(&node);
		dom.insert_before(parent, &node, next_sibling.as_ref());

		if node == last {
			return;
		}

		node = match next {
			Some(next) => next,
			None => invariant_violation(&format!("Malformed bounds: Ran out of siblings before reaching last node {:?}", last)),
		};
	}
}

/// Replaces the nodes in `bounds` with one empty comment, which is returned as new [`SingleNodeBounds`].
pub fn clear_with_comment<D: Dom, B: Bounds<Node = D::Node> + ?Sized>(dom: &D, bounds: &B) -> SingleNodeBounds<D::Node> {
	let parent = bounds.parent_element();
	let next_sibling = clear(dom, bounds);
	let comment = dom.create_comment("");
	dom.insert_before(&parent, &comment, next_sibling.as_ref());
	trace!(?comment, "Placed placeholder.");
	SingleNodeBounds::new(parent, comment)
}

/// Replaces the nodes in `bounds` with a fresh evaluation of `template` at their former position.
pub fn render_into_bounds<D: Dom, B: Bounds<Node = D::Node> + ?Sized>(
	template: &TemplateRef<D>,
	bounds: &B,
	site: &Site<D>,
) -> Box<dyn RenderResult<D>> {
	let span = trace_span!("Rendering into bounds");
	let _enter = span.enter();

	let next_sibling = clear(site.dom(), bounds);
	template.evaluate(site, next_sibling.as_ref())
}
