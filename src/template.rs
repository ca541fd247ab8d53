//! Morphs owning one nested template evaluation.

use crate::{
	bounds::Bounds,
	dom::{invariant_violation, Dom},
	emptyable::{Emptyable, Phase},
	morph::{Constructor, ElementStack, Frame, Morph, Site, Specialize},
};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use tracing::{trace, trace_span};

/// Something that can render itself into a [`Site`].
pub trait Template<D: Dom> {
	/// Renders before `next_sibling` (or at the end of the site's parent) and returns a handle to the result.
	///
	/// The result must occupy at least one node.
	fn evaluate(&self, site: &Site<D>, next_sibling: Option<&D::Node>) -> Box<dyn RenderResult<D>>;
}

/// Templates are compared by identity. See [`same_template`].
pub type TemplateRef<D> = Rc<dyn Template<D>>;

/// Whether `a` and `b` are the same template instance.
#[must_use]
pub fn same_template<D: Dom>(a: &TemplateRef<D>, b: &TemplateRef<D>) -> bool {
	// Vtable pointers aren't reliable for this, so only the data pointers are compared.
	Rc::as_ptr(a).cast::<()>() == Rc::as_ptr(b).cast::<()>()
}

/// The outcome of [`Template::evaluate`], which knows its own extent.
pub trait RenderResult<D: Dom>: Bounds<Node = D::Node> {
	/// Patches the rendered nodes in place for changed input.
	fn rerender(&mut self, frame: &Frame<D>);
}

/// A [`RenderResult`] together with the template it came from.
pub struct Evaluation<D: Dom> {
	template: TemplateRef<D>,
	result: Box<dyn RenderResult<D>>,
}
impl<D: Dom> Evaluation<D> {
	#[must_use]
	pub fn new(template: TemplateRef<D>, result: Box<dyn RenderResult<D>>) -> Self {
		Self { template, result }
	}

	#[must_use]
	pub fn template(&self) -> &TemplateRef<D> {
		&self.template
	}

	#[must_use]
	pub fn result(&self) -> &dyn RenderResult<D> {
		&*self.result
	}

	pub fn result_mut(&mut self) -> &mut dyn RenderResult<D> {
		&mut *self.result
	}
}
impl<D: Dom> Debug for Evaluation<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("Evaluation")
			.field("template", &Rc::as_ptr(&self.template).cast::<()>())
			.field("first_node", &self.result.first_node())
			.field("last_node", &self.result.last_node())
			.finish()
	}
}

/// How a [`TemplateMorph`] picks its template on each render pass.
pub enum Selection<D: Dom> {
	/// Always the same template, which is then patched in place.
	Fixed(TemplateRef<D>),
	/// One of two branches. [`None`] renders nothing.
	Conditional {
		condition: Rc<dyn Fn() -> bool>,
		consequent: Option<TemplateRef<D>>,
		alternative: Option<TemplateRef<D>>,
	},
	/// Anything else. [`None`] renders nothing.
	Dynamic(Rc<dyn Fn() -> Option<TemplateRef<D>>>),
}
impl<D: Dom> Clone for Selection<D> {
	fn clone(&self) -> Self {
		match self {
			Selection::Fixed(template) => Selection::Fixed(Rc::clone(template)),
			Selection::Conditional {
				condition,
				consequent,
				alternative,
			} => Selection::Conditional {
				condition: Rc::clone(condition),
				consequent: consequent.clone(),
				alternative: alternative.clone(),
			},
			Selection::Dynamic(select) => Selection::Dynamic(Rc::clone(select)),
		}
	}
}
impl<D: Dom> Selection<D> {
	fn into_selector(self) -> Box<dyn FnMut() -> Option<TemplateRef<D>>> {
		match self {
			Selection::Fixed(template) => Box::new(move || Some(Rc::clone(&template))),
			Selection::Conditional {
				condition,
				consequent,
				alternative,
			} => Box::new(move || if condition() { consequent.clone() } else { alternative.clone() }),
			Selection::Dynamic(select) => Box::new(move || select()),
		}
	}
}

/// A morph rendering whichever template its [`Selection`] currently picks, or a placeholder if there is none.
///
/// Re-rendering the same template patches its result in place, while a different template replaces it.
pub struct TemplateMorph<D: Dom> {
	site: Site<D>,
	content: Emptyable<D>,
	last_result: Option<Evaluation<D>>,
	select: Box<dyn FnMut() -> Option<TemplateRef<D>>>,
}
impl<D: Dom> Debug for TemplateMorph<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("TemplateMorph")
			.field("site", &self.site)
			.field("content", &self.content)
			.field("last_result", &self.last_result)
			.finish_non_exhaustive()
	}
}
impl<D: Dom> TemplateMorph<D> {
	#[must_use]
	pub fn new(site: Site<D>, selection: Selection<D>) -> Self {
		Self {
			site,
			content: Emptyable::new(),
			last_result: None,
			select: selection.into_selector(),
		}
	}

	#[must_use]
	pub fn site(&self) -> &Site<D> {
		&self.site
	}

	#[must_use]
	pub fn phase(&self) -> Phase {
		self.content.phase()
	}

	#[must_use]
	pub fn last_result(&self) -> Option<&Evaluation<D>> {
		self.last_result.as_ref()
	}

	/// The node right after this morph's nodes.
	#[must_use]
	pub fn next_sibling(&self) -> Option<D::Node> {
		self.last_node().and_then(|last| self.site.dom().next_sibling(&last))
	}

	/// Where replacement content goes.
	#[must_use]
	pub fn next_sibling_for_content(&self) -> Option<D::Node> {
		match &self.last_result {
			Some(evaluation) => evaluation.result.first_node(),
			None => self.content.next_sibling_for_content(),
		}
	}

	/// Evaluates `template` before `next_sibling` and adopts the result as this morph's content.
	pub fn append_template(&mut self, template: TemplateRef<D>, next_sibling: Option<&D::Node>) {
		let span = trace_span!("Appending template", ?next_sibling);
		let _enter = span.enter();

		let result = template.evaluate(&self.site, next_sibling);
		let evaluation = self.last_result.insert(Evaluation::new(template, result));
		self.content.did_insert_content(&self.site, &*evaluation.result);
	}

	/// Renders `template`, reusing the last result if it came from the same template.
	pub fn update_template(&mut self, template: TemplateRef<D>) {
		let reusable = match &self.last_result {
			Some(evaluation) => same_template(&evaluation.template, &template),
			None => false,
		};

		if reusable {
			let span = trace_span!("Rerendering template in place");
			let _enter = span.enter();
			if let Some(evaluation) = &mut self.last_result {
				evaluation.result.rerender(self.site.frame());
				self.content.did_resize_content(&*evaluation.result);
			}
		} else {
			let span = trace_span!("Replacing template", previous = self.last_result.is_some());
			let _enter = span.enter();
			let next_sibling = self.next_sibling_for_content();
			self.append_template(template, next_sibling.as_ref());
		}
	}

	/// Replaces the content with a placeholder and drops the last result.
	pub fn did_become_empty(&mut self) {
		self.content.did_become_empty(&self.site);
		self.last_result = None;
	}

	fn assert_appended(&self, operation: &str) {
		if self.content.phase() == Phase::Appending {
			invariant_violation(&format!("`TemplateMorph::{}` called before `append`.", operation))
		}
	}
}
impl<D: Dom> Bounds for TemplateMorph<D> {
	type Node = D::Node;

	fn parent_element(&self) -> D::Node {
		self.site.parent().clone()
	}

	fn first_node(&self) -> Option<D::Node> {
		match &self.last_result {
			Some(evaluation) => evaluation.result.first_node(),
			None => self.content.first_node(),
		}
	}

	fn last_node(&self) -> Option<D::Node> {
		match &self.last_result {
			Some(evaluation) => evaluation.result.last_node(),
			None => self.content.last_node(),
		}
	}
}
impl<D: Dom> Morph<D> for TemplateMorph<D> {
	fn append(&mut self, stack: &mut dyn ElementStack<D::Node>) {
		if self.content.phase() != Phase::Appending {
			invariant_violation("`TemplateMorph::append` called twice.")
		}

		let next_sibling = stack.next_sibling();
		match (self.select)() {
			Some(template) => self.append_template(template, next_sibling.as_ref()),
			None => {
				trace!("Nothing selected. Appending placeholder.");
				self.content.did_append_empty(&self.site, next_sibling)
			}
		}
		stack.push_bounds(self)
	}

	fn update(&mut self) {
		self.assert_appended("update");
		match (self.select)() {
			Some(template) => self.update_template(template),
			None => self.did_become_empty(),
		}
	}

	fn destroy(&mut self) {
		self.assert_appended("destroy");
		if self.last_result.take().is_some() {
			trace!("Released last result.");
		}
	}
}
impl<D: Dom> Specialize<D> for TemplateMorph<D> {
	type Options = Selection<D>;

	fn specialize(selection: &Selection<D>) -> Constructor<D, Self> {
		let selection = selection.clone();
		Box::new(move |site| Self::new(site, selection))
	}
}
