use lignin_morph::{dom::Dom, memory::MemoryDom};

#[test]
fn insert_moves_existing_nodes() {
	let dom = MemoryDom::new();
	let left = dom.create_element(None, "left");
	let right = dom.create_element(None, "right");
	let text = dom.create_text_node("t");

	dom.insert_before(&left, &text, None);
	dom.insert_before(&right, &text, None);

	assert_eq!(dom.child_nodes(left), vec![]);
	assert_eq!(dom.child_nodes(right), vec![text]);
	assert_eq!(dom.parent_node(&text), Some(right));
	assert_eq!(dom.next_sibling(&text), None);
}

#[test]
fn serialization() {
	let dom = MemoryDom::new();
	let root = dom.create_element(None, "p");
	let comment = dom.create_comment("c");
	let text = dom.create_text_node("a\"b");
	dom.set_attribute(&root, "title", "\"q\"");
	dom.insert_before(&root, &text, None);
	dom.insert_before(&root, &comment, Some(&text));

	assert_eq!(dom.outer_html(root), "<p title=\"&quot;q&quot;\"><!--c-->a&quot;b</p>");

	dom.set_data(&text, "z");
	assert_eq!(dom.inner_html(root), "<!--c-->z");
	assert_eq!(dom.data(comment).as_deref(), Some("c"));
	assert_eq!(dom.data(root), None);
}

#[test]
#[should_panic(expected = "is not a child of")]
fn remove_from_wrong_parent() {
	let dom = MemoryDom::new();
	let parent = dom.create_element(None, "div");
	let stray = dom.create_text_node("stray");

	dom.remove_child(&parent, &stray);
}

#[test]
#[should_panic(expected = "its own subtree")]
fn insert_into_own_subtree() {
	let dom = MemoryDom::new();
	let outer = dom.create_element(None, "div");
	let inner = dom.create_element(None, "span");
	dom.insert_before(&outer, &inner, None);

	dom.insert_before(&inner, &outer, None);
}
