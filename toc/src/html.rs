//! HTML serialization of a rendered table of contents

use crate::tree::{ListChild, ListNode, TocLink};
use crate::widget::{ListKind, TocView};

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Serialize a view as a `<nav>` element
///
/// # Returns
/// * `String` - The markup: toggle markup first, then the content list
pub fn view_to_html(view: &TocView) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "<nav role=\"{}\" aria-label=\"{}\" class=\"{}\">\n",
        escape_html(&view.role),
        escape_html(&view.aria_label),
        escape_html(&view.class_name)
    ));

    if let Some(toggle) = &view.toggle {
        // Collaborator markup is trusted as-is
        output.push_str(toggle);
        output.push('\n');
    }

    if let Some(content) = &view.content {
        output.push_str("<ul class=\"content\">\n");
        write_children(&mut output, content, view.kind, 1);
        output.push_str("</ul>\n");
    }

    output.push_str("</nav>\n");
    output
}

fn write_children(output: &mut String, list: &ListNode, kind: ListKind, depth: usize) {
    let indent = "  ".repeat(depth);
    for child in &list.children {
        match child {
            ListChild::Item(link) => {
                output.push_str(&indent);
                write_item(output, link, kind);
            }
            ListChild::List(nested) => {
                output.push_str(&format!("{}<ul>\n", indent));
                write_children(output, nested, kind, depth + 1);
                output.push_str(&format!("{}</ul>\n", indent));
            }
        }
    }
}

fn write_item(output: &mut String, link: &TocLink, kind: ListKind) {
    let href = escape_html(&link.href());
    let text = escape_html(&link.text);
    match kind {
        ListKind::Headings => {
            let lvl = link.level.map(|l| l.get()).unwrap_or(1);
            output.push_str(&format!(
                "<li data-lvl=\"{}\"><a href=\"{}\">{}</a></li>\n",
                lvl, href, text
            ));
        }
        ListKind::Items | ListKind::Empty => {
            output.push_str(&format!(
                "<li><a class=\"toc-item\" data-dest=\"{}\" href=\"{}\">{}</a></li>\n",
                escape_html(&link.id),
                href,
                text
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }
}
