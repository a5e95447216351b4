//! Maps "which week" questions onto the board post that answers them.
use std::sync::OnceLock;

use chrono::{DateTime, Datelike, Days, FixedOffset, Months, NaiveDate, TimeZone, Weekday};
use regex::Regex;
use tracing::{instrument, Level};

use crate::{
    error::{Context, Error},
    fetch::{fetch_text, Fetch, Site, YearMonth},
    parse::{BoardPost, DayMeal, ScheduleEntry, DAYS_PER_WEEK},
    Result,
};

/// Menus are published for Seoul; it has had no daylight saving since 1988.
pub fn seoul() -> FixedOffset {
    FixedOffset::east_opt(9 * 3600).expect("+09:00 should be a valid offset")
}

/// Builds a calendar date leniently: a day or month past the end rolls into the
/// following month or year, and 0 means the last day or month before.
fn rolled_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let january = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let first = match month.checked_sub(1) {
        Some(months) => january.checked_add_months(Months::new(months))?,
        None => january.checked_sub_months(Months::new(1))?,
    };
    match day.checked_sub(1) {
        Some(days) => first.checked_add_days(Days::new(u64::from(days))),
        None => first.checked_sub_days(Days::new(1)),
    }
}

/// The validity window written into a post title, e.g. "(12/2-12/6)".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
}

impl DateRange {
    /// `None` when the title holds no "MM-DD ~ MM-DD" range or the post has no year.
    /// "11/25-11/31" is read as running through December 1st.
    pub fn from_post(post: &BoardPost) -> Option<Self> {
        static RANGE_RE: OnceLock<Regex> = OnceLock::new();
        let range_re = RANGE_RE.get_or_init(|| {
            Regex::new(r"([0-9]{1,2})[^0-9]{1,2}([0-9]{1,2})[^0-9]{1,2}([0-9]{1,2})[^0-9]{1,2}([0-9]{1,2})[^0-9]?")
                .expect("regex should be valid")
        });
        let year = post.year()?;
        let caps = range_re.captures(&post.title)?;
        let mut numbers = [0u32; 4];
        for (n, group) in numbers.iter_mut().zip(caps.iter().skip(1)) {
            *n = group?.as_str().parse().ok()?;
        }
        let [start_month, start_day, end_month, end_day] = numbers;

        let start = rolled_date(year, start_month, start_day)?.and_hms_opt(0, 0, 0)?;
        let end = rolled_date(year, end_month, end_day)?.and_hms_micro_opt(23, 59, 59, 999_999)?;
        Some(Self {
            start: seoul().from_local_datetime(&start).single()?,
            end: seoul().from_local_datetime(&end).single()?,
        })
    }

    /// Both bounds are exclusive.
    pub fn contains(&self, now: DateTime<FixedOffset>) -> bool {
        self.end > now && self.start < now
    }
}

/// What the caller asked for on the meal endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MealRequest {
    CurrentWeek,
    Weekday(i64),
    Post(i64),
    PostWeekday(i64, i64),
}

impl MealRequest {
    /// Absent parameters and "0" both mean "not given".
    pub fn from_params(id: Option<&str>, day: Option<&str>) -> Result<Self> {
        let parse = |value: Option<&str>| -> Result<i64> {
            value
                .map_or(Ok(0), |v| v.parse())
                .map_err(|_| Error::invalid("use integers only"))
        };
        let (id, day) = (parse(id)?, parse(day)?);
        Ok(match (id, day) {
            (0, 0) => Self::CurrentWeek,
            (0, day) => Self::Weekday(day),
            (id, 0) => Self::Post(id),
            (id, day) => Self::PostWeekday(id, day),
        })
    }
}

fn weekday_index(day: i64) -> Result<usize> {
    match usize::try_from(day) {
        Ok(day @ 1..=DAYS_PER_WEEK) => Ok(day - 1),
        _ => Err(Error::not_found(format!(
            "no meals are served on weekday {day}"
        ))),
    }
}

/// The scraping pipeline for one university site, over any way of fetching pages.
#[derive(Debug)]
pub struct Skhu<F> {
    fetcher: F,
    site: Site,
}

impl<F: Fetch> Skhu<F> {
    pub fn new(fetcher: F, site: Site) -> Self {
        Self { fetcher, site }
    }

    #[instrument(skip(self), level = Level::TRACE)]
    pub async fn meal_ids(&self) -> Result<Vec<BoardPost>> {
        let text = fetch_text(&self.fetcher, &self.site.meal_list(), "board list").await?;
        let posts = BoardPost::list_from_document(&text);
        log::debug!("board list has {} posts", posts.len());
        Ok(posts)
    }

    #[instrument(skip(self), level = Level::TRACE)]
    pub async fn week_by_id(&self, id: i64) -> Result<Vec<DayMeal>> {
        let text = fetch_text(&self.fetcher, &self.site.meal_board(id), "meal table processing").await?;
        Ok(DayMeal::week_from_document(&text))
    }

    /// The week whose post title covers `now`. The first matching post wins.
    #[instrument(skip(self), level = Level::TRACE)]
    pub async fn week_at(&self, now: DateTime<FixedOffset>) -> Result<Vec<DayMeal>> {
        let now = now.with_timezone(&seoul());
        if matches!(now.weekday(), Weekday::Sat | Weekday::Sun) {
            return Err(Error::not_found("no meals are served on weekends")).context("current week meals");
        }

        let posts = self.meal_ids().await.context("current week meals")?;
        for post in &posts {
            let Some(range) = DateRange::from_post(post) else {
                log::trace!("skipping post {} without a date range: {:?}", post.id, post.title);
                continue;
            };
            if range.contains(now) {
                log::debug!("post {} covers {now}", post.id);
                return self.week_by_id(post.id).await.context("current week meals");
            }
        }

        Err(Error::not_found(format!("no menu was posted for {}", now.date_naive())))
            .context("current week meals")
    }

    /// One day (1 = Monday .. 5 = Friday) of the week covering `now`.
    pub async fn day_at(&self, now: DateTime<FixedOffset>, weekday: i64) -> Result<Vec<DayMeal>> {
        let index = weekday_index(weekday).context("weekday meals")?;
        let mut week = self.week_at(now).await.context("weekday meals")?;
        if index >= week.len() {
            return Err(Error::not_found(format!("weekday {weekday} is missing from the menu")))
                .context("weekday meals");
        }
        Ok(vec![week.swap_remove(index)])
    }

    pub async fn meals(&self, request: MealRequest, now: DateTime<FixedOffset>) -> Result<Vec<DayMeal>> {
        match request {
            MealRequest::CurrentWeek => self.week_at(now).await,
            MealRequest::Weekday(day) => self.day_at(now, day).await,
            MealRequest::Post(id) => self.week_by_id(id).await,
            MealRequest::PostWeekday(id, day) => {
                let mut week = self.week_by_id(id).await?;
                // a post that did not yield a full week is returned whole
                if week.len() == DAYS_PER_WEEK {
                    let index = weekday_index(day).context("meal table processing")?;
                    week = vec![week.swap_remove(index)];
                }
                Ok(week)
            }
        }
    }

    #[instrument(skip(self), level = Level::TRACE)]
    pub async fn schedules(&self, month: Option<YearMonth>) -> Result<Vec<ScheduleEntry>> {
        let text = fetch_text(&self.fetcher, &self.site.schedules(month), "schedules").await?;
        Ok(ScheduleEntry::list_from_document(&text))
    }
}
