use scraper::{ElementRef, Html};
use serde::Serialize;
use utoipa::ToSchema;

use super::text::{nth_child, text_of};
use crate::static_selector;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ScheduleEntry {
    pub period: String,
    pub content: String,
}

impl ScheduleEntry {
    pub fn list_from_html_element(element: ElementRef) -> Vec<Self> {
        static_selector!(ROW_SELECTOR <- "div.info > table > tbody > tr");
        element
            .select(&ROW_SELECTOR)
            .skip(1) // header
            .map(|row| Self {
                period: nth_child(row, 1).map(text_of).unwrap_or_default(),
                content: nth_child(row, 2).map(text_of).unwrap_or_default(),
            })
            .collect()
    }

    pub fn list_from_document(text: &str) -> Vec<Self> {
        let document = Html::parse_document(text);
        Self::list_from_html_element(document.root_element())
    }
}
