use lignin_morph::{
	bounds::Bounds,
	emptyable::Phase,
	memory::{MemoryDom, NodeId},
	morph::{initialize_morph, Morph, NodeStack},
	text::{TextMorph, TextSource},
};
use std::{cell::RefCell, rc::Rc};

use text_template_::Document;

fn source(text: &Rc<RefCell<String>>) -> TextSource {
	let text = Rc::clone(text);
	Rc::new(move || text.borrow().clone())
}

#[test]
fn text_is_patched_in_place() {
	let document = Document::new();
	let text = Rc::new(RefCell::new("Hello".to_string()));
	let mut morph = TextMorph::new(document.site(), source(&text));

	morph.append(&mut NodeStack::<NodeId>::new());
	let node = morph.first_node().unwrap();
	assert_eq!(document.html(), "Hello");

	*text.borrow_mut() = "World".to_string();
	morph.update();

	assert_eq!(document.html(), "World");
	assert_eq!(morph.first_node(), Some(node));
	assert_eq!(document.dom().data(node).as_deref(), Some("World"));
}

#[test]
fn empty_text_renders_placeholder() {
	let document = Document::new();
	let after = document.append_text("after");
	let text = Rc::new(RefCell::new(String::new()));
	let mut morph = TextMorph::new(document.site(), source(&text));
	let mut stack = NodeStack::before(Some(after));

	morph.append(&mut stack);

	assert_eq!(morph.phase(), Phase::Empty);
	assert_eq!(document.html(), "<!---->after");
	assert_eq!(stack.pushed().len(), 1);
	assert_eq!(morph.next_sibling(), Some(after));

	*text.borrow_mut() = "now".to_string();
	morph.update();
	assert_eq!(morph.phase(), Phase::HasContent);
	assert_eq!(document.html(), "nowafter");

	text.borrow_mut().clear();
	morph.update();
	assert_eq!(morph.phase(), Phase::Empty);
	assert_eq!(document.html(), "<!---->after");
}

#[test]
fn unchanged_text_keeps_nodes() {
	let document = Document::new();
	let text = Rc::new(RefCell::new("same".to_string()));
	let mut morph = initialize_morph::<MemoryDom, TextMorph<MemoryDom>>(source(&text), document.body, Rc::clone(&document.frame));

	morph.append(&mut NodeStack::<NodeId>::new());
	let children = document.children();
	morph.update();

	assert_eq!(document.children(), children);
	assert_eq!(document.html(), "same");
}

#[test]
#[should_panic(expected = "called before `append`")]
fn update_before_append() {
	let document = Document::new();
	let mut morph = TextMorph::new(document.site(), source(&Rc::new(RefCell::new(String::new()))));

	morph.update();
}
