// src/render.rs
// =============================================================================
// Turns a list of repositories into the nodes of the result list.
//
// This is a pure function: it never touches the page. It returns a Paint
// value describing what the results container should show, and the page
// applies it (see Page::paint).
//
// Each item looks like this (user searches):
//
//   <a class="list-item ..." href="./single-repo.html?repo=octocat/hello">
//     <span>octocat/hello</span>
//     <span class="flex-row align-center">
//       <i class="fas fa-times status-icon icon-danger"></i>3 issue(s)
//     </span>
//   </a>
//
// Topic searches use a plain <div> instead of the link.
// =============================================================================

use crate::github::RepositoryRecord;
use crate::page::{Element, Node};

pub const NO_REPOSITORIES: &str = "No repositories found.";

const ITEM_CLASSES: &str = "list-item flex-row justify-space-between align-center";
const STATUS_CLASSES: &str = "flex-row align-center";
const DANGER_ICON: &str = "fas fa-times status-icon icon-danger";
const SUCCESS_ICON: &str = "fas fa-check-square status-icon icon-success";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Wrap each item in a link to the detail page
    pub linkable: bool,
    /// Detail page path; the link appends `?repo=owner/name`
    pub detail_page: String,
}

// What the results container should show after a successful search
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paint {
    /// Replace the container with the "No repositories found." message
    Empty,
    /// Clear the container, set the search-term label, append the items
    List { label: String, items: Vec<Node> },
}

pub fn render(records: &[RepositoryRecord], search_term: &str, options: &RenderOptions) -> Paint {
    if records.is_empty() {
        return Paint::Empty;
    }

    // Input order is kept as-is: GitHub already sorted the results
    let items = records
        .iter()
        .map(|record| render_item(record, options))
        .collect();

    Paint::List {
        label: search_term.to_string(),
        items,
    }
}

fn render_item(record: &RepositoryRecord, options: &RenderOptions) -> Node {
    let repo_name = record.display_name();

    let container = if options.linkable {
        Element::new("a")
            .class(ITEM_CLASSES)
            .attr("href", format!("{}?repo={}", options.detail_page, repo_name))
    } else {
        Element::new("div").class(ITEM_CLASSES)
    };

    let title = Element::new("span").child(Node::text(repo_name));

    container
        .child(title.into())
        .child(render_status(record.open_issues_count))
        .into()
}

// Red cross plus the count when there are open issues, a check mark otherwise
fn render_status(open_issues: u64) -> Node {
    let status = Element::new("span").class(STATUS_CLASSES);

    if open_issues > 0 {
        status
            .child(Element::new("i").class(DANGER_ICON).into())
            .child(Node::text(format!("{} issue(s)", open_issues)))
            .into()
    } else {
        status.child(Element::new("i").class(SUCCESS_ICON).into()).into()
    }
}
