use lignin_morph::{
	bounds::{Bounds, ConcreteBounds},
	emptyable::Phase,
	memory::{MemoryDom, NodeId},
	morph::{initialize_morph, Morph, NodeStack},
	template::{same_template, Selection, TemplateMorph, TemplateRef},
};
use std::{
	cell::{Cell, RefCell},
	rc::Rc,
};

use text_template_::{Document, TextTemplate};

fn fixed(template: Rc<TextTemplate>) -> Selection<MemoryDom> {
	Selection::Fixed(template)
}

fn dynamic(current: &Rc<RefCell<Option<TemplateRef<MemoryDom>>>>) -> Selection<MemoryDom> {
	let current = Rc::clone(current);
	Selection::Dynamic(Rc::new(move || current.borrow().clone()))
}

#[test]
fn same_template_is_rerendered_in_place() {
	let document = Document::new();
	let template = TextTemplate::new(&["a", "b"]);
	let mut morph = TemplateMorph::new(document.site(), fixed(template.clone()));

	morph.append(&mut NodeStack::<NodeId>::new());
	let children = document.children();
	assert_eq!(document.html(), "ab");
	assert_eq!(morph.phase(), Phase::HasContent);

	morph.update();
	morph.update();

	assert_eq!(template.evaluations(), 1);
	assert_eq!(template.rerenders(), 2);
	assert_eq!(document.children(), children);
}

#[test]
fn switching_templates_replaces_nodes() {
	let document = Document::new();
	let before = document.append_text("[");
	let after = document.append_text("]");
	let first: TemplateRef<MemoryDom> = TextTemplate::new(&["1", "1"]);
	let second = TextTemplate::new(&["2"]);
	let current = Rc::new(RefCell::new(Some(first)));
	let mut morph = TemplateMorph::new(document.site(), dynamic(&current));

	morph.append(&mut NodeStack::before(Some(after)));
	assert_eq!(document.html(), "[11]");

	*current.borrow_mut() = Some(second.clone() as TemplateRef<MemoryDom>);
	morph.update();

	assert_eq!(document.html(), "[2]");
	assert_eq!(second.evaluations(), 1);
	let children = document.children();
	assert_eq!(children.len(), 3);
	assert_eq!(children[0], before);
	assert_eq!(children[2], after);
	assert_eq!(morph.first_node(), Some(children[1]));
	assert_eq!(morph.next_sibling(), Some(after));
	let last_template: TemplateRef<MemoryDom> = second;
	assert!(same_template(morph.last_result().unwrap().template(), &last_template));
}

#[test]
fn nothing_selected_renders_placeholder_until_content() {
	let document = Document::new();
	let after = document.append_text("after");
	let current = Rc::new(RefCell::new(None));
	let mut morph = TemplateMorph::new(document.site(), dynamic(&current));
	let mut stack = NodeStack::before(Some(after));

	morph.append(&mut stack);

	assert_eq!(morph.phase(), Phase::Empty);
	assert_eq!(document.html(), "<!---->after");
	assert!(morph.last_result().is_none());
	let placeholder = document.children()[0];
	assert_eq!(stack.pushed(), &[ConcreteBounds::new(document.body, placeholder, placeholder)]);

	let template = TextTemplate::new(&["x"]);
	*current.borrow_mut() = Some(template.clone() as TemplateRef<MemoryDom>);
	morph.update();

	assert_eq!(morph.phase(), Phase::HasContent);
	assert_eq!(document.html(), "xafter");

	*current.borrow_mut() = None;
	morph.update();

	assert_eq!(morph.phase(), Phase::Empty);
	assert_eq!(document.html(), "<!---->after");
	assert!(morph.last_result().is_none());

	*current.borrow_mut() = Some(template.clone() as TemplateRef<MemoryDom>);
	morph.update();

	// The last result was dropped while empty, so this evaluates again.
	assert_eq!(template.evaluations(), 2);
	assert_eq!(document.html(), "xafter");
}

#[test]
fn conditional_selection_through_initialize_morph() {
	let document = Document::new();
	let flag = Rc::new(Cell::new(true));
	let yes = TextTemplate::new(&["yes"]);
	let condition: Rc<dyn Fn() -> bool> = {
		let flag = Rc::clone(&flag);
		Rc::new(move || flag.get())
	};

	let mut morph = initialize_morph::<MemoryDom, TemplateMorph<MemoryDom>>(
		Selection::Conditional {
			condition,
			consequent: Some(yes.clone() as TemplateRef<MemoryDom>),
			alternative: None,
		},
		document.body,
		Rc::clone(&document.frame),
	);
	morph.append(&mut NodeStack::<NodeId>::new());
	assert_eq!(document.html(), "yes");

	flag.set(false);
	morph.update();
	assert_eq!(document.html(), "<!---->");

	flag.set(true);
	morph.update();
	assert_eq!(document.html(), "yes");
	assert_eq!(yes.evaluations(), 2);
	assert_eq!(yes.rerenders(), 0);

	morph.update();
	assert_eq!(yes.rerenders(), 1);
}

#[test]
fn resized_results_are_fully_cleared_on_switch() {
	let document = Document::new();
	let after = document.append_text("|");
	let growing: TemplateRef<MemoryDom> = TextTemplate::growing(&["g"]);
	let current = Rc::new(RefCell::new(Some(growing)));
	let mut morph = TemplateMorph::new(document.site(), dynamic(&current));

	morph.append(&mut NodeStack::before(Some(after)));
	morph.update();
	morph.update();
	assert_eq!(document.html(), "g++|");
	assert_eq!(morph.next_sibling(), Some(after));

	*current.borrow_mut() = Some(TextTemplate::new(&["s"]) as TemplateRef<MemoryDom>);
	morph.update();

	assert_eq!(document.html(), "s|");
}

#[test]
fn append_pushes_own_bounds() {
	let document = Document::new();
	let mut morph = TemplateMorph::new(document.site(), fixed(TextTemplate::new(&["a", "b", "c"])));
	let mut stack = NodeStack::<NodeId>::new();

	morph.append(&mut stack);

	let children: Vec<NodeId> = document.children();
	assert_eq!(stack.pushed(), &[ConcreteBounds::new(document.body, children[0], children[2])]);
	assert_eq!(morph.parent_element(), document.body);
}

#[test]
fn destroy_leaves_nodes_for_the_ancestor() {
	let document = Document::new();
	let mut morph = TemplateMorph::new(document.site(), fixed(TextTemplate::new(&["a"])));
	morph.append(&mut NodeStack::<NodeId>::new());

	morph.destroy();

	assert_eq!(document.html(), "a");
	assert!(morph.last_result().is_none());
}

#[test]
#[should_panic(expected = "called before `append`")]
fn update_before_append() {
	let document = Document::new();
	let mut morph = TemplateMorph::new(document.site(), fixed(TextTemplate::new(&["a"])));

	morph.update();
}

#[test]
#[should_panic(expected = "called twice")]
fn append_twice() {
	let document = Document::new();
	let mut morph = TemplateMorph::new(document.site(), fixed(TextTemplate::new(&["a"])));

	morph.append(&mut NodeStack::<NodeId>::new());
	morph.append(&mut NodeStack::<NodeId>::new());
}
