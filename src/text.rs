//! Plain text content.

use crate::{
	bounds::{Bounds, SingleNodeBounds},
	dom::{invariant_violation, Dom},
	emptyable::{Emptyable, Phase},
	morph::{Constructor, ElementStack, Morph, Site, Specialize},
};
use core::fmt::{self, Debug, Formatter};
use std::rc::Rc;
use tracing::{trace, trace_span};

/// Provides the current text of a [`TextMorph`].
pub type TextSource = Rc<dyn Fn() -> String>;

/// A morph rendering a string as one text node. An empty string renders only a placeholder.
pub struct TextMorph<D: Dom> {
	site: Site<D>,
	content: Emptyable<D>,
	source: TextSource,
	/// The rendered text, or [`None`] while empty.
	text: Option<String>,
}
impl<D: Dom> Debug for TextMorph<D> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("TextMorph")
			.field("site", &self.site)
			.field("content", &self.content)
			.field("text.len()", &self.text.as_ref().map(String::len))
			.finish_non_exhaustive()
	}
}
impl<D: Dom> TextMorph<D> {
	#[must_use]
	pub fn new(site: Site<D>, source: TextSource) -> Self {
		Self {
			site,
			content: Emptyable::new(),
			source,
			text: None,
		}
	}

	#[must_use]
	pub fn phase(&self) -> Phase {
		self.content.phase()
	}

	#[must_use]
	pub fn next_sibling(&self) -> Option<D::Node> {
		self.content.next_sibling(self.site.dom())
	}

	fn insert_text(&mut self, text: String, next_sibling: Option<&D::Node>) {
		log_text("Inserting text node", &text);
		let dom = self.site.dom();
		let node = dom.create_text_node(&text);
		dom.insert_before(self.site.parent(), &node, next_sibling);
		self.content.did_insert_content(&self.site, &SingleNodeBounds::new(self.site.parent().clone(), node));
		self.text = Some(text);
	}
}
impl<D: Dom> Bounds for TextMorph<D> {
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
impl<D: Dom> Morph<D> for TextMorph<D> {
	fn append(&mut self, stack: &mut dyn ElementStack<D::Node>) {
		if self.content.phase() != Phase::Appending {
			invariant_violation("`TextMorph::append` called twice.")
		}

		let next_sibling = stack.next_sibling();
		let text = (self.source)();
		if text.is_empty() {
			self.content.did_append_empty(&self.site, next_sibling)
		} else {
			self.insert_text(text, next_sibling.as_ref())
		}
		stack.push_bounds(&*self)
	}

	fn update(&mut self) {
		if self.content.phase() == Phase::Appending {
			invariant_violation("`TextMorph::update` called before `append`.")
		}

		let text = (self.source)();
		if self.text.as_deref().unwrap_or_default() == text {
			return trace!("Text unchanged.");
		}

		let span = trace_span!("Updating text", was_empty = self.text.is_none(), is_empty = text.is_empty());
		let _enter = span.enter();
		if text.is_empty() {
			self.content.did_become_empty(&self.site);
			self.text = None;
		} else if self.text.is_some() {
			let node = match self.content.first_node() {
				Some(node) => node,
				None => invariant_violation("Rendered text without a text node."),
			};
			log_text("Patching text node", &text);
			self.site.dom().set_data(&node, &text);
			self.text = Some(text);
		} else {
			let next_sibling = self.content.next_sibling_for_content();
			self.insert_text(text, next_sibling.as_ref())
		}
	}

	fn destroy(&mut self) {
		if self.content.phase() == Phase::Appending {
			invariant_violation("`TextMorph::destroy` called before `append`.")
		}
	}
}
impl<D: Dom> Specialize<D> for TextMorph<D> {
	type Options = TextSource;

	fn specialize(source: &TextSource) -> Constructor<D, Self> {
		let source = Rc::clone(source);
		Box::new(move |site| Self::new(site, source))
	}
}

fn log_text(message: &str, text: &str) {
	if cfg!(feature = "dangerous-logging") {
		trace!(text, "{}", message)
	} else {
		trace!(text.len = text.len(), "{}", message)
	}
}
