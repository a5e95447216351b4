mod board_list;
mod meal_table;
mod schedule;
pub(crate) mod static_selector;
mod text;

pub use board_list::BoardPost;
pub use meal_table::{DayMeal, DietItem, Dinner, Lunch, DAYS_PER_WEEK};
pub use schedule::ScheduleEntry;
