//! Content rendered outside of its logical position.

use crate::{
	bounds::{Bounds, ConcreteBounds},
	dom::{invariant_violation, Dom},
	emptyable::{Emptyable, Phase},
	morph::{Constructor, ElementStack, Morph, Site, Specialize},
	range::clear,
	template::{Evaluation, TemplateRef},
};
use core::fmt::{self, Debug, Formatter};
use tracing::{trace, trace_span, warn};

/// Options of a [`WormholeMorph`].
pub struct Wormhole<D: Dom> {
	/// The container the content is rendered into.
	pub destination: D::Node,
	pub template: TemplateRef<D>,
}

struct Remote<D: Dom> {
	evaluation: Evaluation<D>,
	/// Snapshot of the result's extent under the destination, refreshed after each render.
	bounds: ConcreteBounds<D::Node>,
}
impl<D: Dom> Remote<D> {
	fn track(evaluation: Evaluation<D>, destination: &D::Node) -> Self {
		let bounds = extent(&evaluation, destination);
		Self { evaluation, bounds }
	}
}

fn extent<D: Dom>(evaluation: &Evaluation<D>, destination: &D::Node) -> ConcreteBounds<D::Node> {
	let result = evaluation.result();
	match (result.first_node(), result.last_node()) {
		(Some(first), Some(last)) => ConcreteBounds::new(destination.clone(), first, last),
		_ => invariant_violation("Wormhole content must contain at least one node."),
	}
}

/// A morph whose template renders into another container.
///
/// Its own region only holds a placeholder. Since the remote nodes aren't removed along with that region,
/// [`destroy`](`Morph::destroy`) clears them explicitly.
pub struct WormholeMorph<D: Dom> {
	site: Site<D>,
	content: Emptyable<D>,
	destination: Site<D>,
	template: Option<TemplateRef<D>>,
	remote: Option<Remote<D>>,
}
impl<D: Dom> Debug for WormholeMorph<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("WormholeMorph")
			.field("site", &self.site)
			.field("content", &self.content)
			.field("destination", &self.destination)
			.field("remote", &self.remote_bounds())
			.finish_non_exhaustive()
	}
}
impl<D: Dom> WormholeMorph<D> {
	/// The template is set by [`init`](`Specialize::init`).
	#[must_use]
	pub fn new(site: Site<D>, destination: D::Node) -> Self {
		let destination = Site::new(destination, site.frame().clone());
		Self {
			site,
			content: Emptyable::new(),
			destination,
			template: None,
			remote: None,
		}
	}

	#[must_use]
	pub fn destination(&self) -> &D::Node {
		self.destination.parent()
	}

	/// The nodes rendered into the destination, unless destroyed.
	#[must_use]
	pub fn remote_bounds(&self) -> Option<&ConcreteBounds<D::Node>> {
		self.remote.as_ref().map(|remote| &remote.bounds)
	}

	/// Renders into `destination` from now on.
	///
	/// The current remote nodes are cleared and the template is evaluated again at the end of `destination`,
	/// so the new result knows where it lives.
	pub fn relocate(&mut self, destination: D::Node) {
		let span = trace_span!("Relocating wormhole", from = ?self.destination.parent(), to = ?destination);
		let _enter = span.enter();

		self.destination = Site::new(destination, self.site.frame().clone());
		if let Some(remote) = self.remote.take() {
			clear(self.site.dom(), &remote.bounds);
			let template = remote.evaluation.template().clone();
			let result = template.evaluate(&self.destination, None);
			self.remote = Some(Remote::track(Evaluation::new(template, result), self.destination.parent()));
		} else {
			trace!("Destroyed or not yet appended. Nothing to move.");
		}
	}

	fn assert_appended(&self, operation: &str) {
		if self.content.phase() == Phase::Appending {
			invariant_violation(&format!("`WormholeMorph::{}` called before `append`.", operation))
		}
	}
}
impl<D: Dom> Bounds for WormholeMorph<D> {
	type Node = D::Node;

	fn parent_element(&self) -> D::Node {
		self.site.parent().clone()
	}

	fn first_node(&self) -> Option<D::Node> {
		self.content.first_node()
	}

	fn last_node(&self) -> Option<D::Node> {
		self.content.last_node()
	}
}
impl<D: Dom> Morph<D> for WormholeMorph<D> {
	fn append(&mut self, stack: &mut dyn ElementStack<D::Node>) {
		let template = match &self.template {
			Some(template) => template.clone(),
			None => invariant_violation("`WormholeMorph` appended without template. Use `initialize_morph`."),
		};

		self.content.did_append_empty(&self.site, stack.next_sibling());

		let span = trace_span!("Rendering through wormhole", destination = ?self.destination.parent());
		let _enter = span.enter();
		let result = template.evaluate(&self.destination, None);
		self.remote = Some(Remote::track(Evaluation::new(template, result), self.destination.parent()));

		stack.push_bounds(&*self)
	}

	fn update(&mut self) {
		self.assert_appended("update");
		match &mut self.remote {
			Some(remote) => {
				remote.evaluation.result_mut().rerender(self.site.frame());
				remote.bounds = extent(&remote.evaluation, self.destination.parent());
			}
			None => warn!("Updated a destroyed `WormholeMorph`. Ignoring."),
		}
	}

	fn destroy(&mut self) {
		self.assert_appended("destroy");
		match self.remote.take() {
			Some(remote) => {
				let span = trace_span!("Clearing wormhole content", destination = ?self.destination.parent());
				let _enter = span.enter();
				clear(self.site.dom(), &remote.bounds);
			}
			None => trace!("Already destroyed."),
		}
	}
}
impl<D: Dom> Specialize<D> for WormholeMorph<D> {
	type Options = Wormhole<D>;

	fn specialize(options: &Wormhole<D>) -> Constructor<D, Self> {
		let destination = options.destination.clone();
		Box::new(move |site| Self::new(site, destination))
	}

	fn init(&mut self, options: Wormhole<D>) {
		self.template = Some(options.template);
	}
}
