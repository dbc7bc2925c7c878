// src/page/document.rs
// =============================================================================
// The page: the one piece of mutable state in the program.
//
// It has four parts, each named after the element id it is exported as:
// - username:          the text input of the search form
// - language-buttons:  the button bar (see buttons.rs)
// - repo-search-term:  the label showing what was searched for
// - repos-container:   the result list
//
// Only the session mutates a Page. Everything that decides WHAT to show
// (controllers, renderer) is pure and lives elsewhere.
// =============================================================================

use crate::page::buttons::LanguageButtons;
use crate::page::dom::{escape, Node};
use crate::render::{Paint, NO_REPOSITORIES};

#[derive(Debug, Clone, Default)]
pub struct Page {
    input: String,
    buttons: LanguageButtons,
    label: String,
    results: Vec<Node>,
}

impl Page {
    pub fn new(buttons: LanguageButtons) -> Self {
        Self {
            buttons,
            ..Self::default()
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    // Replaces the text typed into the username field
    pub fn type_input(&mut self, text: &str) {
        self.input = text.to_string();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    pub fn buttons(&self) -> &LanguageButtons {
        &self.buttons
    }

    #[cfg(test)]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[cfg(test)]
    pub fn results(&self) -> &[Node] {
        &self.results
    }

    // Item elements currently in the result list (text nodes excluded)
    pub fn item_count(&self) -> usize {
        self.results.iter().filter(|n| n.as_element().is_some()).count()
    }

    pub fn results_text(&self) -> String {
        self.results.iter().map(Node::text_content).collect()
    }

    pub fn clear_results(&mut self) {
        self.results.clear();
    }

    // Applies a render result to the container
    //
    // Empty replaces the whole container with the message and leaves the
    // label alone. List always clears first, so at most one list is ever
    // shown no matter what was there before.
    pub fn paint(&mut self, paint: Paint) {
        match paint {
            Paint::Empty => {
                self.results = vec![Node::text(NO_REPOSITORIES)];
            }
            Paint::List { label, items } => {
                self.clear_results();
                self.label = label;
                self.results.extend(items);
            }
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();

        out.push_str("<form id=\"user-form\">\n");
        out.push_str(&format!(
            "  <input id=\"username\" type=\"text\" value=\"{}\">\n",
            escape(&self.input)
        ));
        out.push_str("</form>\n");

        out.push_str(self.buttons.markup());
        out.push('\n');

        out.push_str(&format!(
            "<h3>Showing repositories for: <span id=\"repo-search-term\">{}</span></h3>\n",
            escape(&self.label)
        ));

        out.push_str("<div id=\"repos-container\">");
        for node in &self.results {
            node.write_html(&mut out);
        }
        out.push_str("</div>\n");

        out
    }

    // Plain-text view of the label and result list for the terminal
    pub fn to_terminal(&self) -> String {
        let mut out = String::new();

        if !self.label.is_empty() {
            out.push_str(&format!("📂 Showing repositories for: {}\n", self.label));
        }

        if self.item_count() == 0 {
            let text = self.results_text();
            if !text.is_empty() {
                out.push_str(&format!("   {}\n", text));
            }
            return out;
        }

        for node in &self.results {
            let Some(item) = node.as_element() else {
                continue;
            };
            let title = item.children.first().map(Node::text_content).unwrap_or_default();

            let status = if node.find_by_class("icon-danger").is_some() {
                let count = item.children.get(1).map(Node::text_content).unwrap_or_default();
                format!("❌ {}", count)
            } else {
                "✅".to_string()
            };

            out.push_str(&format!("   {:<60} {}\n", title, status));
            if let Some(href) = item.attribute("href") {
                out.push_str(&format!("      {}\n", href));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render, RenderOptions};
    use crate::test_support::record;
    use scraper::{Html, Selector};

    fn options() -> RenderOptions {
        RenderOptions {
            linkable: true,
            detail_page: "./single-repo.html".to_string(),
        }
    }

    #[test]
    fn test_paint_empty_shows_message() {
        let mut page = Page::default();
        page.paint(render(&[record("a", "b", 1)], "a", &options()));
        page.paint(render(&[], "nobody", &options()));

        assert_eq!(page.results_text(), "No repositories found.");
        assert_eq!(page.item_count(), 0);
        // The label still shows the previous search
        assert_eq!(page.label(), "a");
    }

    #[test]
    fn test_paint_list_replaces_previous_list() {
        let mut page = Page::default();
        page.paint(render(&[record("a", "b", 1), record("a", "c", 0)], "a", &options()));
        page.paint(render(&[record("x", "y", 0)], "x", &options()));

        assert_eq!(page.item_count(), 1);
        assert_eq!(page.label(), "x");
    }

    #[test]
    fn test_paint_list_replaces_message() {
        let mut page = Page::default();
        page.paint(render(&[], "a", &options()));
        page.paint(render(&[record("x", "y", 0)], "x", &options()));

        assert_eq!(page.results().len(), 1);
        assert_eq!(page.results_text(), "x/y");
    }

    #[test]
    fn test_repaint_after_clear_is_identical() {
        let records = vec![record("a", "b", 3), record("c", "d", 0), record("e", "f", 1)];
        let mut page = Page::default();

        page.paint(render(&records, "term", &options()));
        let first = page.results().to_vec();
        let first_html = page.to_html();

        page.clear_results();
        assert!(page.results().is_empty());

        page.paint(render(&records, "term", &options()));
        assert_eq!(page.results(), first.as_slice());
        assert_eq!(page.to_html(), first_html);
    }

    #[test]
    fn test_html_export_structure() {
        let records = vec![record("octocat", "hello", 2), record("octocat", "world", 0)];
        let mut page = Page::default();
        page.paint(render(&records, "octocat", &options()));

        let html = Html::parse_fragment(&page.to_html());
        let items = Selector::parse("#repos-container > .list-item").unwrap();
        let titles: Vec<String> = html
            .select(&items)
            .map(|item| item.select(&Selector::parse("span").unwrap()).next().unwrap().text().collect())
            .collect();
        assert_eq!(titles, vec!["octocat/hello", "octocat/world"]);

        let danger = Selector::parse("#repos-container .icon-danger").unwrap();
        let success = Selector::parse("#repos-container .icon-success").unwrap();
        assert_eq!(html.select(&danger).count(), 1);
        assert_eq!(html.select(&success).count(), 1);

        let label = Selector::parse("#repo-search-term").unwrap();
        let label_text: String = html.select(&label).next().unwrap().text().collect();
        assert_eq!(label_text, "octocat");

        let link = Selector::parse("a.list-item").unwrap();
        let href = html.select(&link).next().unwrap().value().attr("href");
        assert_eq!(href, Some("./single-repo.html?repo=octocat/hello"));
    }

    #[test]
    fn test_html_export_escapes_input() {
        let mut page = Page::default();
        page.type_input("\"><script>");

        let html = Html::parse_fragment(&page.to_html());
        let input = Selector::parse("#username").unwrap();
        let value = html.select(&input).next().unwrap().value().attr("value");
        assert_eq!(value, Some("\"><script>"));
        assert_eq!(html.select(&Selector::parse("script").unwrap()).count(), 0);
    }

    #[test]
    fn test_terminal_view() {
        let mut page = Page::default();
        page.paint(render(&[record("a", "b", 2), record("c", "d", 0)], "a", &options()));

        let text = page.to_terminal();
        assert!(text.contains("Showing repositories for: a"));
        assert!(text.contains("❌ 2 issue(s)"));
        assert!(text.contains("✅"));
        assert!(text.contains("./single-repo.html?repo=a/b"));
    }
}
