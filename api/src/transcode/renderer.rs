//! Post renderer
//!
//! Renders a post and its attachments to the HTML used as an entry summary.

use super::activity::{ActivityFeed, ActivityItem, Attachment};

/// Render the HTML summary for one post.
///
/// Starts from the post's own content (already HTML) and appends one block
/// per attachment in order. Attachment fields are inserted as-is.
pub fn render_post(item: &ActivityItem) -> String {
    let mut html = item.object.content.clone();

    for attachment in &item.object.attachments {
        render_attachment(&mut html, attachment);
    }

    html
}

fn render_attachment(html: &mut String, attachment: &Attachment) {
    match attachment.object_type.as_str() {
        "article" => {
            if !html.is_empty() {
                html.push_str("<br><hr>");
            }
            html.push_str(&format!(
                "<p><b>{}</b> [<a href='{}'>link</a>]</p>",
                attachment.display_name, attachment.url
            ));
            html.push_str(&format!(
                "<p style='white-space: pre-wrap'>{}</p>",
                attachment.content
            ));
        }
        "photo" => {
            html.push_str(&format!(
                "<p>Attachment: <a href='{}'>photo</a></p>",
                attachment.url
            ));
        }
        other => {
            html.push_str(&format!(
                "<p><i>Attachment unhandled: '{}'</i></p>",
                other
            ));
        }
    }
}

/// Render a standalone HTML page with every post of a feed, one `div` each.
pub fn render_preview_page(feed: &ActivityFeed) -> String {
    let mut buf = String::new();

    buf.push_str("<!doctype html><meta charset=utf-8>\n");
    buf.push_str("<head>\n");
    buf.push_str(&format!("<title>{}</title>\n", feed.title));
    buf.push_str("</head>\n");

    for item in &feed.items {
        buf.push_str(&format!("<div class=post>{}</div>\n", render_post(item)));
    }

    buf
}
