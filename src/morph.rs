//! The lifecycle contract shared by all renderable units, and how they are constructed.

use crate::{
	bounds::{Bounds, ConcreteBounds},
	dom::Dom,
};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use tracing::{trace, trace_span};

/// The environment morphs render in. Grants access to the DOM helper.
pub struct Frame<D> {
	dom: D,
}
impl<D: Dom> Frame<D> {
	#[must_use]
	pub fn new(dom: D) -> Self {
		Self { dom }
	}

	#[must_use]
	pub fn dom(&self) -> &D {
		&self.dom
	}
}
impl<D: Debug> Debug for Frame<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Frame").field("dom", &self.dom).finish()
	}
}

/// Where a morph lives: The container its nodes go into and the [`Frame`] it renders in.
///
/// A morph is bound to its site for its whole lifetime. It doesn't own the parent container.
pub struct Site<D: Dom> {
	parent: D::Node,
	frame: Rc<Frame<D>>,
}
impl<D: Dom> Site<D> {
	#[must_use]
	pub fn new(parent: D::Node, frame: Rc<Frame<D>>) -> Self {
		Self { parent, frame }
	}

	#[must_use]
	pub fn parent(&self) -> &D::Node {
		&self.parent
	}

	#[must_use]
	pub fn frame(&self) -> &Rc<Frame<D>> {
		&self.frame
	}

	#[must_use]
	pub fn dom(&self) -> &D {
		self.frame.dom()
	}
}
impl<D: Dom> Clone for Site<D> {
	fn clone(&self) -> Self {
		Self {
			parent: self.parent.clone(),
			frame: Rc::clone(&self.frame),
		}
	}
}
impl<D: Dom> Debug for Site<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Site").field("parent", &self.parent).finish_non_exhaustive()
	}
}

/// A unit of renderable content.
///
/// # Lifecycle
///
/// 1. [`append`](`Morph::append`) exactly once, during the first render.
/// 2. [`update`](`Morph::update`) on each later render pass.
/// 3. [`destroy`](`Morph::destroy`) when an ancestor removes the morph's region.
///
/// Calls never overlap, and [`update`](`Morph::update`) or [`destroy`](`Morph::destroy`) before
/// [`append`](`Morph::append`) is a programming error that implementations should fail on loudly.
pub trait Morph<D: Dom> {
	/// Renders for the first time, before [`stack.next_sibling()`](`ElementStack::next_sibling`),
	/// and pushes the resulting nodes onto `stack`.
	fn append(&mut self, stack: &mut dyn ElementStack<D::Node>);

	/// Determines without outside help whether the content changed and applies the minimal DOM mutation, if any.
	fn update(&mut self);

	/// Releases the morph while an ancestor clears its region.
	///
	/// # Bulk clear precondition
	///
	/// The default implementation does nothing: Whoever destroys a morph must remove that morph's nodes
	/// (usually by [`clear`](`crate::range::clear`)ing an enclosing [`Bounds`]) as part of the same operation.
	/// Destroying a morph on its own leaves its nodes in the document.
	///
	/// Morphs holding nodes outside their own region must override this, and must tolerate being destroyed twice.
	fn destroy(&mut self) {}
}

/// Constructs a morph for one call site from its [`Site`].
pub type Constructor<D, M> = Box<dyn FnOnce(Site<D>) -> M>;

/// Two-phase construction, parameterised by call-site options.
///
/// See [`initialize_morph`].
pub trait Specialize<D: Dom>: Morph<D> + Sized + 'static {
	/// Call-site configuration.
	type Options;

	/// Picks the constructor for morphs configured by `options`.
	fn specialize(options: &Self::Options) -> Constructor<D, Self>;

	/// Called right after construction.
	fn init(&mut self, _options: Self::Options) {}
}

/// Specializes `M` for `options`, constructs it at `parent` in `frame` and [`init`](`Specialize::init`)s it.
pub fn initialize_morph<D: Dom, M: Specialize<D>>(options: M::Options, parent: D::Node, frame: Rc<Frame<D>>) -> M {
	let span = trace_span!("Initializing morph", morph = core::any::type_name::<M>(), ?parent);
	let _enter = span.enter();

	let constructor = M::specialize(&options);
	let mut morph = constructor(Site::new(parent, frame));
	morph.init(options);
	morph
}

/// Receives the nodes morphs produce while they are appended.
pub trait ElementStack<N: Clone + PartialEq + Debug> {
	/// The node that appended content goes before, or [`None`] to append at the end of the parent.
	fn next_sibling(&self) -> Option<N>;

	/// Records the nodes a morph has just appended.
	fn push_bounds(&mut self, bounds: &dyn Bounds<Node = N>);
}

/// An [`ElementStack`] appending before a fixed anchor, which remembers every pushed region.
#[derive(Debug, Clone)]
pub struct NodeStack<N> {
	next_sibling: Option<N>,
	pushed: Vec<ConcreteBounds<N>>,
}
impl<N> NodeStack<N> {
	/// Appends at the end of the parent.
	#[must_use]
	pub fn new() -> Self {
		Self::before(None)
	}

	#[must_use]
	pub fn before(next_sibling: Option<N>) -> Self {
		Self {
			next_sibling,
			pushed: Vec::new(),
		}
	}

	/// The regions pushed so far, in order.
	#[must_use]
	pub fn pushed(&self) -> &[ConcreteBounds<N>] {
		&self.pushed
	}
}
impl<N> Default for NodeStack<N> {
	fn default() -> Self {
		Self::new()
	}
}
impl<N: Clone + PartialEq + Debug> ElementStack<N> for NodeStack<N> {
	fn next_sibling(&self) -> Option<N> {
		self.next_sibling.clone()
	}

	fn push_bounds(&mut self, bounds: &dyn Bounds<Node = N>) {
		let bounds = ConcreteBounds::snapshot(bounds);
		trace!(?bounds, "Pushed bounds.");
		self.pushed.push(bounds);
	}
}
