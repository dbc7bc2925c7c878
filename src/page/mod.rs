// src/page/mod.rs
// =============================================================================
// The page the results are shown on.
//
// - dom: a minimal node tree for the result list
// - buttons: the language button bar and click resolution
// - document: the Page itself (input, buttons, label, results)
// =============================================================================

mod buttons;
mod document;
mod dom;

pub use buttons::LanguageButtons;
pub use document::Page;
pub use dom::{Element, Node};
