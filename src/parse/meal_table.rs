//! Reads a week of meals out of a menu post.
//!
//! The post is a single `table.cont_c` with one column per weekday. Nothing about
//! the table is validated: every field is read from a fixed position, and a
//! position that does not exist on the page reads as an empty string. If the
//! university changes the layout the result is wrong or blank data, not an
//! error, so the coordinates below are the only thing to update.
use scraper::{ElementRef, Html};
use serde::Serialize;
use utoipa::ToSchema;

use super::text::{lines_of, nth_child, text_of};
use crate::static_selector;

pub const DAYS_PER_WEEK: usize = 5;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DietItem {
    #[serde(rename = "diet")]
    pub description: String,
    pub calorie: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Lunch {
    pub a: DietItem,
    pub b: DietItem,
    pub c: DietItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Dinner {
    pub a: DietItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct DayMeal {
    #[serde(rename = "day")]
    pub weekday_label: String,
    pub date: String,
    pub lunch: Lunch,
    pub dinner: Dinner,
}

#[derive(Clone, Copy, Debug)]
enum Section {
    Head,
    Body,
}

/// Where a field sits for the first weekday. Rows and columns are 1-based like
/// `:nth-child`; the column moves right by one for each following weekday.
#[derive(Clone, Copy, Debug)]
struct Cell {
    section: Section,
    row: usize,
    column: usize,
}

impl Cell {
    const fn head(row: usize, column: usize) -> Self {
        Self {
            section: Section::Head,
            row,
            column,
        }
    }

    const fn body(row: usize, column: usize) -> Self {
        Self {
            section: Section::Body,
            row,
            column,
        }
    }

    const fn below(self) -> Self {
        Self {
            row: self.row + 1,
            ..self
        }
    }

    fn locate<'a>(self, table: ElementRef<'a>, day: usize) -> Option<ElementRef<'a>> {
        static_selector!(HEAD_SELECTOR <- "thead");
        static_selector!(BODY_SELECTOR <- "tbody");
        let (section, cell_tag) = match self.section {
            Section::Head => (table.select(&HEAD_SELECTOR).next()?, "th"),
            Section::Body => (table.select(&BODY_SELECTOR).next()?, "td"),
        };
        let row = nth_child(section, self.row).filter(|r| r.value().name() == "tr")?;
        nth_child(row, self.column + day).filter(|c| c.value().name() == cell_tag)
    }

    fn text(self, table: Option<ElementRef>, day: usize) -> String {
        table
            .and_then(|t| self.locate(t, day))
            .map(text_of)
            .unwrap_or_default()
    }

    /// A menu cell: its lines, plus the calorie printed in the row underneath.
    fn diet(self, table: Option<ElementRef>, day: usize) -> DietItem {
        DietItem {
            description: table
                .and_then(|t| self.locate(t, day))
                .map(lines_of)
                .unwrap_or_default(),
            calorie: self.below().text(table, day),
        }
    }
}

const WEEKDAY_LABEL: Cell = Cell::head(1, 2);
const DATE: Cell = Cell::head(2, 3);
const LUNCH_A: Cell = Cell::body(1, 3);
const LUNCH_B: Cell = Cell::body(3, 2);
const LUNCH_C: Cell = Cell::body(5, 2);
const DINNER_A: Cell = Cell::body(7, 3);

impl DayMeal {
    /// Always five days, Monday first, whatever the page holds.
    pub fn week_from_html_element(element: ElementRef) -> Vec<Self> {
        static_selector!(TABLE_SELECTOR <- "table.cont_c");
        let table = element.select(&TABLE_SELECTOR).next();
        if table.is_none() {
            log::warn!("menu post has no table.cont_c, returning an empty week");
        }

        (0..DAYS_PER_WEEK)
            .map(|day| Self {
                weekday_label: WEEKDAY_LABEL.text(table, day),
                date: DATE.text(table, day),
                lunch: Lunch {
                    a: LUNCH_A.diet(table, day),
                    b: LUNCH_B.diet(table, day),
                    c: LUNCH_C.diet(table, day),
                },
                dinner: Dinner {
                    a: DINNER_A.diet(table, day),
                },
            })
            .collect()
    }

    pub fn week_from_document(text: &str) -> Vec<Self> {
        let document = Html::parse_document(text);
        Self::week_from_html_element(document.root_element())
    }
}
