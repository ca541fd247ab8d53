//! Tracked runs of sibling nodes.

use crate::dom::invariant_violation;
use core::fmt::Debug;

/// A contiguous run of sibling nodes under one parent, from [`first_node`](`Bounds::first_node`) to
/// [`last_node`](`Bounds::last_node`) inclusive.
///
/// The nodes aren't owned. Both ends are either present or absent; if absent, the bounds refer to a position at
/// the end of [`parent_element`](`Bounds::parent_element`) without any existing anchor.
///
/// Don't use a [`Bounds`] after its nodes were cleared.
pub trait Bounds {
	type Node: Clone + PartialEq + Debug;

	fn parent_element(&self) -> Self::Node;
	fn first_node(&self) -> Option<Self::Node>;
	fn last_node(&self) -> Option<Self::Node>;
}

/// Two-endpoint [`Bounds`], fixed at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcreteBounds<N> {
	parent: N,
	extent: Option<(N, N)>,
}
impl<N: Clone + PartialEq + Debug> ConcreteBounds<N> {
	/// `last` must be reachable from `first` through next-sibling links under `parent`.
	#[must_use]
	pub fn new(parent: N, first: N, last: N) -> Self {
		Self { parent, extent: Some((first, last)) }
	}

	/// Bounds without nodes, anchored at the end of `parent`.
	#[must_use]
	pub fn unanchored(parent: N) -> Self {
		Self { parent, extent: None }
	}

	/// Copies the current extent of `bounds`.
	///
	/// # Panics
	///
	/// Iff `bounds` reports exactly one of its endpoints.
	#[must_use]
	pub fn snapshot<B: Bounds<Node = N> + ?Sized>(bounds: &B) -> Self {
		let extent = match (bounds.first_node(), bounds.last_node()) {
			(Some(first), Some(last)) => Some((first, last)),
			(None, None) => None,
			(first, last) => invariant_violation(&format!("Malformed bounds: first node {:?}, last node {:?}", first, last)),
		};
		Self { parent: bounds.parent_element(), extent }
	}
}
impl<N: Clone + PartialEq + Debug> Bounds for ConcreteBounds<N> {
	type Node = N;

	fn parent_element(&self) -> N {
		self.parent.clone()
	}

	fn first_node(&self) -> Option<N> {
		self.extent.as_ref().map(|(first, _)| first.clone())
	}

	fn last_node(&self) -> Option<N> {
		self.extent.as_ref().map(|(_, last)| last.clone())
	}
}

/// [`Bounds`] around exactly one node.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleNodeBounds<N> {
	parent: N,
	node: N,
}
impl<N> SingleNodeBounds<N> {
	#[must_use]
	pub fn new(parent: N, node: N) -> Self {
		Self { parent, node }
	}

	#[must_use]
	pub fn node(&self) -> &N {
		&self.node
	}
}
impl<N: Clone + PartialEq + Debug> Bounds for SingleNodeBounds<N> {
	type Node = N;

	fn parent_element(&self) -> N {
		self.parent.clone()
	}

	fn first_node(&self) -> Option<N> {
		Some(self.node.clone())
	}

	fn last_node(&self) -> Option<N> {
		Some(self.node.clone())
	}
}
