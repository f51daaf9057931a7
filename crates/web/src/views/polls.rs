//! Index, detail and results pages

use super::{error_message, escape, layout};
use quickpoll_common::db::models::{Choice, Question};
use quickpoll_common::polls::listing::IndexListing;
use quickpoll_common::polls::{Page, RenderMode, View};
use tracing::debug;

pub fn index(mode: RenderMode, listing: &IndexListing) -> String {
    debug!(template = View::Index.template(mode), "Rendering index");

    let fragment = index_results(&listing.question_list);
    match mode {
        RenderMode::Partial => fragment,
        RenderMode::Full => layout(
            "Polls",
            &format!("<h1>Polls</h1>\n<div id=\"question-list\">\n{fragment}</div>"),
        ),
    }
}

fn index_results(page: &Page<Question>) -> String {
    if page.is_empty() {
        return "<p>No polls are available.</p>\n".to_string();
    }

    let mut out = String::from("<ul>\n");
    for question in &page.items {
        out.push_str(&format!(
            "<li><a href=\"/polls/{}/\">{}</a></li>\n",
            question.id,
            escape(&question.question_text)
        ));
    }
    out.push_str("</ul>\n");

    if page.is_paginated() {
        out.push_str("<nav class=\"pagination\">\n");
        if let Some(previous) = page.previous_page_number() {
            out.push_str(&page_link(previous, "previous"));
        }
        out.push_str(&format!(
            "<span class=\"current\">Page {} of {}.</span>\n",
            page.number, page.num_pages
        ));
        if let Some(next) = page.next_page_number() {
            out.push_str(&page_link(next, "next"));
        }
        out.push_str("</nav>\n");
    }

    out
}

fn page_link(number: u64, label: &str) -> String {
    format!(
        "<a href=\"/polls/?page={number}\" hx-get=\"/polls/?page={number}\" \
         hx-target=\"#question-list\" hx-push-url=\"true\">{label}</a>\n"
    )
}

pub fn detail(question: &Question, choices: &[Choice], error: Option<&str>) -> String {
    let mut body = format!(
        "<form action=\"/polls/{}/vote/\" method=\"post\">\n<fieldset>\n<legend><h1>{}</h1></legend>\n",
        question.id,
        escape(&question.question_text)
    );

    if let Some(message) = error {
        body.push_str(&error_message(message));
    }

    for (n, choice) in choices.iter().enumerate() {
        body.push_str(&format!(
            "<input type=\"radio\" name=\"choice\" id=\"choice{n}\" value=\"{id}\">\n\
             <label for=\"choice{n}\">{text}</label><br>\n",
            n = n + 1,
            id = choice.id,
            text = escape(&choice.choice_text),
        ));
    }

    body.push_str("</fieldset>\n<input type=\"submit\" value=\"Vote\">\n</form>");
    layout(&question.question_text, &body)
}

pub fn results(question: &Question, choices: &[Choice]) -> String {
    let mut body = format!("<h1>{}</h1>\n<ul>\n", escape(&question.question_text));

    for choice in choices {
        let plural = if choice.votes == 1 { "" } else { "s" };
        body.push_str(&format!(
            "<li>{} -- {} vote{}</li>\n",
            escape(&choice.choice_text),
            choice.votes,
            plural
        ));
    }

    body.push_str(&format!(
        "</ul>\n<a href=\"/polls/{}/\">Vote again?</a>",
        question.id
    ));
    layout(&question.question_text, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use quickpoll_common::polls::Paginator;

    fn question(id: i32, text: &str) -> Question {
        Question {
            id,
            question_text: text.to_string(),
            pub_date: Utc::now(),
        }
    }

    fn choice(id: i32, text: &str, votes: i32) -> Choice {
        Choice {
            id,
            question_id: 1,
            choice_text: text.to_string(),
            votes,
        }
    }

    fn listing(page: Page<Question>) -> IndexListing {
        IndexListing {
            page_obj: page.clone(),
            question_list: page,
        }
    }

    #[test]
    fn test_empty_index_message() {
        let page = Paginator::new(2, 0).page(1, Vec::new());
        let html = index(RenderMode::Full, &listing(page));
        assert!(html.contains("No polls are available."));
    }

    #[test]
    fn test_partial_index_is_fragment_only() {
        let page = Paginator::new(2, 3).page(1, vec![question(3, "Newest"), question(2, "Older")]);
        let html = index(RenderMode::Partial, &listing(page));
        assert!(!html.contains("<html"));
        assert!(html.contains("<a href=\"/polls/3/\">Newest</a>"));
        assert!(html.contains("Page 1 of 2."));
        assert!(html.contains("/polls/?page=2"));
    }

    #[test]
    fn test_detail_with_error() {
        let html = detail(
            &question(1, "What's up?"),
            &[choice(10, "Not much", 0), choice(11, "The sky", 0)],
            Some("You didn't select a choice."),
        );
        assert!(html.contains("action=\"/polls/1/vote/\""));
        assert!(html.contains("value=\"10\""));
        assert!(html.contains("<p class=\"error\"><strong>You didn&#x27;t select a choice.</strong></p>"));
    }

    #[test]
    fn test_results_pluralizes_votes() {
        let html = results(
            &question(1, "Q"),
            &[choice(10, "One", 1), choice(11, "Many", 3)],
        );
        assert!(html.contains("One -- 1 vote</li>"));
        assert!(html.contains("Many -- 3 votes</li>"));
        assert!(html.contains("Vote again?"));
    }
}
