//! Server-side HTML rendering
//!
//! Each page has a builder here. Pages with an HTMX fragment render the
//! fragment on its own for `RenderMode::Partial` and wrap it in the full
//! document for `RenderMode::Full`.

mod polls;
mod search;

pub use polls::{detail, index, results};
pub use search::search;

const HTMX_SRC: &str = "https://unpkg.com/htmx.org@1.9.12";

/// Escape text for HTML element content and quoted attributes
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Wrap body markup in the site document
fn layout(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <script src=\"{HTMX_SRC}\"></script>\n\
         </head>\n\
         <body>\n\
         <nav><a href=\"/polls/\">Polls</a> | <a href=\"/polls/search/\">Search</a></nav>\n\
         {body}\n\
         </body>\n\
         </html>\n",
        title = escape(title),
    )
}

/// Error paragraph shared by the detail and search pages
fn error_message(message: &str) -> String {
    format!("<p class=\"error\"><strong>{}</strong></p>\n", escape(message))
}
