//! Search page and its results fragment

use super::{error_message, escape, layout};
use quickpoll_common::polls::{RenderMode, SearchOutcome, View};
use tracing::debug;

pub fn search(mode: RenderMode, outcome: &SearchOutcome) -> String {
    debug!(template = View::Search.template(mode), "Rendering search");

    let fragment = search_results(outcome);
    match mode {
        RenderMode::Partial => fragment,
        RenderMode::Full => {
            let text = match outcome {
                SearchOutcome::Idle => "",
                SearchOutcome::Invalid { raw, .. } => raw.as_str(),
                SearchOutcome::Results { query, .. } => query.text(),
            };
            let body = format!(
                "<h1>Search polls</h1>\n\
                 <form action=\"/polls/search/\" method=\"get\">\n\
                 <input type=\"search\" name=\"search_text\" value=\"{value}\" \
                 placeholder=\"Search polls...\" \
                 hx-get=\"/polls/search/\" \
                 hx-trigger=\"input changed delay:300ms, search\" \
                 hx-target=\"#search-results\">\n\
                 </form>\n\
                 <div id=\"search-results\">\n{fragment}</div>",
                value = escape(text),
            );
            layout("Search polls", &body)
        }
    }
}

fn search_results(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Idle => String::new(),
        SearchOutcome::Invalid { error, .. } => error_message(&error.to_string()),
        SearchOutcome::Results { questions, .. } if questions.is_empty() => {
            "<p>No polls match your search.</p>\n".to_string()
        }
        SearchOutcome::Results { questions, .. } => {
            let mut out = String::from("<ul>\n");
            for question in questions {
                out.push_str(&format!(
                    "<li><a href=\"/polls/{}/\">{}</a></li>\n",
                    question.id,
                    escape(&question.question_text)
                ));
            }
            out.push_str("</ul>\n");
            out
        }
    }
}
