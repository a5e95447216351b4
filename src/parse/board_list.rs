use std::sync::OnceLock;

use regex::Regex;
use scraper::{ElementRef, Html};
use serde::Serialize;
use utoipa::ToSchema;

use super::text::{nth_child, text_of};
use crate::static_selector;

/// One row of the meal board: a week's menu post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct BoardPost {
    pub id: i64,
    pub title: String,
    // YYYY-MM-DD as printed on the board
    #[serde(rename = "date")]
    pub published: String,
}

impl BoardPost {
    /// Posts in document order. Rows whose link carries no numeric `idx` are left out.
    pub fn list_from_html_element(element: ElementRef) -> Vec<Self> {
        static_selector!(ROW_SELECTOR <- "table.board_list > tbody > tr");
        static_selector!(ANCHOR_SELECTOR <- "a");
        static ID_RE: OnceLock<Regex> = OnceLock::new();
        let id_re = ID_RE.get_or_init(|| Regex::new(r"idx=([0-9]+)&").expect("regex should be valid"));

        let mut posts = vec![];
        for row in element.select(&ROW_SELECTOR) {
            let Some(cell) = nth_child(row, 2) else {
                continue;
            };
            // the first link carries the id, but a title may be split over several
            let href = cell
                .select(&ANCHOR_SELECTOR)
                .next()
                .and_then(|a| a.value().attr("href"))
                .unwrap_or_default();
            let Some(id) = id_re
                .captures(href)
                .and_then(|caps| caps[1].parse::<i64>().ok())
            else {
                continue;
            };
            posts.push(Self {
                id,
                title: cell.select(&ANCHOR_SELECTOR).map(text_of).collect(),
                published: nth_child(row, 4).map(text_of).unwrap_or_default(),
            });
        }
        posts
    }

    pub fn list_from_document(text: &str) -> Vec<Self> {
        let document = Html::parse_document(text);
        Self::list_from_html_element(document.root_element())
    }

    /// The year segment of the publish date.
    pub fn year(&self) -> Option<i32> {
        self.published.split('-').next()?.trim().parse().ok()
    }
}
