//! HTML fragments for the gallery page
//!
//! Every value coming from a photo record is escaped before it lands in
//! markup. Card images are deferred: the URL goes into `data-src` until the
//! lazy loader reveals it.

use chrono::{DateTime, Utc};
use common::html::escape_html;
use common::models::Photo;

use crate::tags::{TagFilter, TagVocabulary};

/// Card date, e.g. `March 5, 2024`
pub fn card_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

/// Detail date with time, e.g. `March 5, 2024 10:20`
pub fn detail_date(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y %H:%M").to_string()
}

/// Tag chips; empty when the photo has no tags
pub fn render_tags(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let chips: String = tags
        .iter()
        .map(|tag| format!("<span class=\"tag\">{}</span>", escape_html(tag)))
        .collect();

    format!("<div class=\"tags\">{}</div>", chips)
}

/// One photo card; `revealed` cards carry a real `src`
pub fn render_card(position: usize, photo: &Photo, revealed: bool) -> String {
    let url = escape_html(&photo.image_url);
    let source = if revealed {
        format!("src=\"{}\"", url)
    } else {
        format!("data-src=\"{}\"", url)
    };

    let description = photo
        .description
        .as_deref()
        .map(|d| format!("<p class=\"photo-card-description\">{}</p>", escape_html(d)))
        .unwrap_or_default();

    let date = photo
        .created_at
        .as_ref()
        .map(|at| format!("<p class=\"photo-card-date\">{}</p>", card_date(at)))
        .unwrap_or_default();

    format!(
        "<article class=\"photo-card\" data-index=\"{}\">\
         <img class=\"photo-card-image\" {} alt=\"{}\" loading=\"lazy\">\
         <div class=\"photo-card-content\">\
         <h3 class=\"photo-card-title\">{}</h3>{}{}{}\
         </div></article>",
        position,
        source,
        escape_html(&photo.title),
        escape_html(&photo.title),
        description,
        render_tags(&photo.tags),
        date
    )
}

/// Filter bar: "All" plus one button per tag, the active one marked
pub fn render_filters(vocabulary: &TagVocabulary, active: &TagFilter) -> String {
    let mut buttons = vec![filter_button("all", "All", *active == TagFilter::All)];

    for tag in vocabulary.tags() {
        let selected = matches!(active, TagFilter::Tag(current) if current.trim() == tag);
        buttons.push(filter_button(tag, tag, selected));
    }

    buttons.concat()
}

fn filter_button(key: &str, label: &str, active: bool) -> String {
    let class = if active { "tag-btn active" } else { "tag-btn" };
    format!(
        "<button class=\"{}\" data-tag=\"{}\">{}</button>",
        class,
        escape_html(key),
        escape_html(label)
    )
}
