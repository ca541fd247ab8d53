#![cfg(target_arch = "wasm32")]

use lignin::{Node, ThreadBound};
use lignin_morph::{
	morph::{Frame, Morph, NodeStack, Site},
	template::{Selection, TemplateMorph, TemplateRef},
	text::TextMorph,
	vdom::VdomTemplate,
	web::WebDom,
};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{window, Element, HtmlBodyElement};

wasm_bindgen_test_configure!(run_in_browser);

static mut LOG_INITIALIZED: bool = false;

fn container() -> (Site<WebDom>, Element) {
	unsafe {
		if !LOG_INITIALIZED {
			tracing_wasm::set_as_global_default();
			LOG_INITIALIZED = true;
		}
	}

	let document = window().unwrap().document().unwrap();
	let body = document.body().unwrap().dyn_into::<HtmlBodyElement>().unwrap();
	let container = document.create_element("div").unwrap();
	body.append_child(&container).unwrap();

	let frame = Rc::new(Frame::new(WebDom::new(document)));
	(Site::new(container.clone().into(), frame), container)
}

const HELLO: Node<'static, ThreadBound> = Node::Text {
	text: "Hello lignin-morph!",
	dom_binding: None,
};
const BYE: Node<'static, ThreadBound> = Node::Comment {
	comment: "bye",
	dom_binding: None,
};

#[wasm_bindgen_test]
fn switch_and_empty() {
	let (site, container) = container();
	let hello: TemplateRef<WebDom> = Rc::new(VdomTemplate::new(HELLO, 10));
	let bye: TemplateRef<WebDom> = Rc::new(VdomTemplate::new(BYE, 10));
	let current = Rc::new(RefCell::new(Some(hello)));
	let selection = {
		let current = Rc::clone(&current);
		Selection::Dynamic(Rc::new(move || current.borrow().clone()))
	};
	let mut morph = TemplateMorph::new(site, selection);

	morph.append(&mut NodeStack::<web_sys::Node>::new());
	assert_eq!(container.inner_html(), "Hello lignin-morph!");

	*current.borrow_mut() = Some(bye);
	morph.update();
	assert_eq!(container.inner_html(), "<!--bye-->");

	*current.borrow_mut() = None;
	morph.update();
	assert_eq!(container.inner_html(), "<!---->");
}

#[wasm_bindgen_test]
fn text() {
	let (site, container) = container();
	let text = Rc::new(RefCell::new("before".to_string()));
	let source = {
		let text = Rc::clone(&text);
		Rc::new(move || text.borrow().clone())
	};
	let mut morph = TextMorph::new(site, source);

	morph.append(&mut NodeStack::<web_sys::Node>::new());
	assert_eq!(container.inner_html(), "before");

	*text.borrow_mut() = "after".to_string();
	morph.update();
	assert_eq!(container.inner_html(), "after");
}
