use url::Url;

use crate::{error::Error, Result};

pub const SKHU_URL: &str = "http://skhu.ac.kr/";

const MEAL_LIST: &str = "uni_zelkova/uni_zelkova_4_3_list.aspx";
const MEAL_BOARD: &str = "uni_zelkova/uni_zelkova_4_3_view.aspx?idx=";
const SCHEDULES: &str = "calendar/calendar_list_1.aspx";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

/// Addresses of the pages we scrape, relative to the university homepage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Site {
    base: Url,
}

impl Default for Site {
    fn default() -> Self {
        Self {
            base: Url::parse(SKHU_URL).expect("base url should be valid"),
        }
    }
}

impl Site {
    pub fn new(base: &str) -> Result<Self> {
        let mut base = Url::parse(base)
            .map_err(|e| Error::invalid(format!("base url {base:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(Error::invalid(format!("{base} cannot be a base url")));
        }
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &str {
        self.base.as_str()
    }

    pub fn meal_list(&self) -> String {
        format!("{}{MEAL_LIST}", self.base)
    }

    pub fn meal_board(&self, id: i64) -> String {
        format!("{}{MEAL_BOARD}{id}", self.base)
    }

    /// The current month's schedule when `month` is `None`.
    pub fn schedules(&self, month: Option<YearMonth>) -> String {
        match month {
            Some(YearMonth { year, month }) => {
                format!("{}{SCHEDULES}?strYear={year}&strMonth={month}", self.base)
            }
            None => format!("{}{SCHEDULES}", self.base),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_addresses() {
        let site = Site::default();
        assert_eq!(
            site.meal_list(),
            "http://skhu.ac.kr/uni_zelkova/uni_zelkova_4_3_list.aspx"
        );
        assert_eq!(
            site.meal_board(389),
            "http://skhu.ac.kr/uni_zelkova/uni_zelkova_4_3_view.aspx?idx=389"
        );
        assert_eq!(
            site.schedules(Some(YearMonth { year: 2020, month: 9 })),
            "http://skhu.ac.kr/calendar/calendar_list_1.aspx?strYear=2020&strMonth=9"
        );
    }

    #[test]
    fn test_new_appends_slash() {
        let site = Site::new("http://mirror.example.com/skhu").unwrap();
        assert_eq!(site.base(), "http://mirror.example.com/skhu/");
        assert_eq!(
            site.meal_list(),
            "http://mirror.example.com/skhu/uni_zelkova/uni_zelkova_4_3_list.aspx"
        );
        assert!(Site::new("not a url").is_err());
    }
}
