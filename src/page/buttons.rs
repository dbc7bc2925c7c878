// src/page/buttons.rs
// =============================================================================
// The language button bar.
//
// The buttons are kept as HTML markup, the same markup that ends up in the
// exported page. A "click" is resolved by parsing that markup with the
// `scraper` crate and reading the `data-language` attribute of the button
// that was hit.
//
// Clicking anything that is not a button with a data-language attribute
// resolves to None, which the topic controller treats as a no-op.
// =============================================================================

use scraper::{Html, Selector};

pub const DEFAULT_BUTTONS: &str = r#"<div id="language-buttons">
  <button class="btn" data-language="javascript">JavaScript</button>
  <button class="btn" data-language="typescript">TypeScript</button>
  <button class="btn" data-language="html">HTML</button>
  <button class="btn" data-language="css">CSS</button>
  <button class="btn" data-language="python">Python</button>
  <button class="btn" data-language="rust">Rust</button>
  <button class="btn" data-language="go">Go</button>
</div>"#;

#[derive(Debug, Clone)]
pub struct LanguageButtons {
    markup: String,
}

impl LanguageButtons {
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: markup.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    // Resolves a click on the button labelled `clicked` to its data-language
    // value
    //
    // A button matches when its visible text or its data-language value
    // equals `clicked` (ignoring ASCII case). Returns None when no button
    // matches, or when the matching button has no (or an empty)
    // data-language attribute.
    pub fn target_language(&self, clicked: &str) -> Option<String> {
        let clicked = clicked.trim();
        let fragment = Html::parse_fragment(&self.markup);

        // Constant selector, known to be valid
        let selector = Selector::parse("button").unwrap();

        let button = fragment.select(&selector).find(|button| {
            let text: String = button.text().collect();
            text.trim().eq_ignore_ascii_case(clicked)
                || button
                    .value()
                    .attr("data-language")
                    .is_some_and(|lang| lang.eq_ignore_ascii_case(clicked))
        })?;

        button
            .value()
            .attr("data-language")
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
    }

    // The data-language values in button order
    pub fn languages(&self) -> Vec<String> {
        let fragment = Html::parse_fragment(&self.markup);
        let selector = Selector::parse("button[data-language]").unwrap();

        fragment
            .select(&selector)
            .filter_map(|button| button.value().attr("data-language"))
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for LanguageButtons {
    fn default() -> Self {
        Self::new(DEFAULT_BUTTONS)
    }
}
