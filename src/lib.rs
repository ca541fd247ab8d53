#![doc(html_root_url = "https://docs.rs/lignin-morph/0.0.1")]
#![warn(clippy::pedantic)]

pub use lignin;

#[cfg(doctest)]
pub mod readme {
	doc_comment::doctest!("../README.md");
}

pub mod bounds;
pub mod dom;
pub mod emptyable;
pub mod memory;
pub mod morph;
pub mod range;
pub mod template;
pub mod text;
pub mod vdom;
pub mod web;
pub mod wormhole;
