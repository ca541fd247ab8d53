//! Bookkeeping for regions that may currently render nothing.
//!
//! Once a region has rendered at least once, it always occupies at least one node: Either its content, or a
//! placeholder comment standing in for it. Rendering logic embedding an [`Emptyable`] therefore always has a
//! stable sibling to anchor new content against.

use crate::{
	bounds::{Bounds, ConcreteBounds, SingleNodeBounds},
	dom::{invariant_violation, Dom},
	morph::Site,
	range::{clear, clear_with_comment},
};
use core::fmt::{self, Debug, Formatter};
use tracing::{trace, trace_span};

/// The coarse state of an [`Emptyable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
	/// Nothing was rendered yet.
	Appending,
	/// Rendered, but without content. A placeholder comment marks the position.
	Empty,
	/// Rendered content is being tracked.
	HasContent,
}

#[derive(Debug)]
enum State<N> {
	Appending,
	Empty(SingleNodeBounds<N>),
	HasContent(ConcreteBounds<N>),
}

#[derive(Debug)]
enum Event<N> {
	InsertContent(ConcreteBounds<N>),
	/// `anchor` only matters while appending. Otherwise the placeholder takes the place of the cleared content.
	BecomeEmpty { anchor: Option<N> },
}

impl<N: Clone + PartialEq + Debug + 'static> State<N> {
	fn phase(&self) -> Phase {
		match self {
			State::Appending => Phase::Appending,
			State::Empty(_) => Phase::Empty,
			State::HasContent(_) => Phase::HasContent,
		}
	}

	/// Carries out the DOM mutation for `event` and returns the state to switch to, or [`None`] to stay.
	///
	/// `self` is left untouched, so an aborted mutation doesn't lose track of the current nodes.
	fn transition<D: Dom<Node = N>>(&self, event: Event<N>, site: &Site<D>) -> Option<Self> {
		let span = trace_span!("Transition", from = ?self.phase(), ?event);
		let _enter = span.enter();

		let dom = site.dom();
		let next = match (self, event) {
			(State::Appending, Event::InsertContent(bounds)) => State::HasContent(bounds),
			(State::Appending, Event::BecomeEmpty { anchor }) => {
				let placeholder = dom.create_comment("");
				dom.insert_before(site.parent(), &placeholder, anchor.as_ref());
				State::Empty(SingleNodeBounds::new(site.parent().clone(), placeholder))
			}

			(State::Empty(placeholder), Event::InsertContent(bounds)) => {
				clear(dom, placeholder);
				State::HasContent(bounds)
			}
			(State::Empty(_), Event::BecomeEmpty { .. }) => {
				trace!("Already empty.");
				return None;
			}

			(State::HasContent(previous), Event::InsertContent(bounds)) => {
				clear(dom, previous);
				State::HasContent(bounds)
			}
			(State::HasContent(previous), Event::BecomeEmpty { .. }) => State::Empty(clear_with_comment(dom, previous)),
		};

		trace!(to = ?next.phase());
		Some(next)
	}
}

/// The empty/content state machine of a content-bearing morph, as a component to embed.
///
/// Transitions: `Appending -> Empty | HasContent`, then freely between `Empty` and `HasContent`.
pub struct Emptyable<D: Dom> {
	state: State<D::Node>,
}
impl<D: Dom> Debug for Emptyable<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Emptyable").field("state", &self.state).finish()
	}
}
impl<D: Dom> Default for Emptyable<D> {
	fn default() -> Self {
		Self::new()
	}
}
impl<D: Dom> Emptyable<D> {
	#[must_use]
	pub fn new() -> Self {
		Self { state: State::Appending }
	}

	#[must_use]
	pub fn phase(&self) -> Phase {
		self.state.phase()
	}

	/// The first occupied node (which is the placeholder while empty), or [`None`] while appending.
	#[must_use]
	pub fn first_node(&self) -> Option<D::Node> {
		match &self.state {
			State::Appending => None,
			State::Empty(placeholder) => Some(placeholder.node().clone()),
			State::HasContent(bounds) => bounds.first_node(),
		}
	}

	/// The last occupied node (which is the placeholder while empty), or [`None`] while appending.
	#[must_use]
	pub fn last_node(&self) -> Option<D::Node> {
		match &self.state {
			State::Appending => None,
			State::Empty(placeholder) => Some(placeholder.node().clone()),
			State::HasContent(bounds) => bounds.last_node(),
		}
	}

	/// The node right after the occupied ones.
	#[must_use]
	pub fn next_sibling(&self, dom: &D) -> Option<D::Node> {
		self.last_node().and_then(|last| dom.next_sibling(&last))
	}

	/// The node new content should be rendered before.
	///
	/// That's [`None`] while appending, the placeholder while empty and otherwise the first current content node.
	#[must_use]
	pub fn next_sibling_for_content(&self) -> Option<D::Node> {
		self.first_node()
	}

	/// Call after rendering new content in front of the node [`next_sibling_for_content`](`Emptyable::next_sibling_for_content`)
	/// returned.
	///
	/// Clears the placeholder or the previous content, then tracks `bounds`.
	///
	/// # Panics
	///
	/// Iff `bounds` contains no nodes. A region without content must [`did_become_empty`](`Emptyable::did_become_empty`) instead.
	pub fn did_insert_content<B: Bounds<Node = D::Node> + ?Sized>(&mut self, site: &Site<D>, bounds: &B) {
		let bounds = ConcreteBounds::snapshot(bounds);
		if bounds.first_node().is_none() {
			invariant_violation("Inserted content must contain at least one node.")
		}
		self.apply(Event::InsertContent(bounds), site)
	}

	/// Call after the content collapsed to nothing.
	///
	/// Replaces current content with a placeholder. Coming from [`Phase::Appending`], the placeholder is appended
	/// at the end of the parent. Does nothing if already [`Phase::Empty`].
	pub fn did_become_empty(&mut self, site: &Site<D>) {
		self.apply(Event::BecomeEmpty { anchor: None }, site)
	}

	/// Like [`did_become_empty`](`Emptyable::did_become_empty`) while appending, but places the placeholder before `next_sibling`.
	///
	/// # Panics
	///
	/// Iff not [`Phase::Appending`].
	pub fn did_append_empty(&mut self, site: &Site<D>, next_sibling: Option<D::Node>) {
		if self.phase() != Phase::Appending {
			invariant_violation("Tried to append an already appended region.")
		}
		self.apply(Event::BecomeEmpty { anchor: next_sibling }, site)
	}

	/// Call after content patched itself in place and may now occupy different nodes. Does not touch the DOM.
	///
	/// # Panics
	///
	/// Iff not [`Phase::HasContent`], or if `bounds` contains no nodes.
	pub fn did_resize_content<B: Bounds<Node = D::Node> + ?Sized>(&mut self, bounds: &B) {
		let bounds = ConcreteBounds::snapshot(bounds);
		if bounds.first_node().is_none() {
			invariant_violation("Resized content must contain at least one node.")
		}
		match &mut self.state {
			State::HasContent(current) => {
				if *current != bounds {
					trace!(from = ?current, to = ?bounds, "Content resized.");
					*current = bounds
				}
			}
			State::Appending | State::Empty(_) => invariant_violation("Only tracked content can be resized."),
		}
	}

	fn apply(&mut self, event: Event<D::Node>, site: &Site<D>) {
		if let Some(next) = self.state.transition(event, site) {
			self.state = next
		}
	}
}
