use gqmdes_calendar::{
    CalendarError, ForecastWindow, NaiveDate, date_sequence, hindcast_windows, stamp,
};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn november_run_crosses_year() {
    let w = ForecastWindow::new(2010, 11).unwrap();
    let segs = w.segments();

    assert_eq!(segs[0].start(), ymd(2010, 12, 1));
    assert_eq!(segs[0].end(), ymd(2010, 12, 31));
    assert_eq!(segs[1].start(), ymd(2011, 1, 1));
    assert_eq!(segs[1].end(), ymd(2011, 1, 31));
    assert_eq!(segs[2].start(), ymd(2011, 2, 1));
    assert_eq!(segs[2].end(), ymd(2011, 2, 28));
    assert_eq!(w.day_counts(), [31, 31, 28]);
    assert_eq!(w.month_abbrev(), "nov");
}

#[test]
fn december_run_in_leap_year() {
    let w = ForecastWindow::new(2011, 12).unwrap();
    assert_eq!(w.day_counts(), [31, 29, 31]);
    assert_eq!(stamp(w.forecast_start()), "20120101");
    assert_eq!(stamp(w.forecast_end()), "20120331");
}

#[test]
fn hindcast_period_has_one_window_per_year() {
    let windows = hindcast_windows(1, 1981..=2010).unwrap();
    assert_eq!(windows.len(), 30);
    assert_eq!(windows[0].run_date(), ymd(1981, 1, 1));
    assert_eq!(windows[29].run_date(), ymd(2010, 1, 1));

    // February lead is 29 days exactly in leap years.
    let leap_years: Vec<i32> = windows
        .iter()
        .filter(|w| w.day_counts()[0] == 29)
        .map(|w| w.forecast_start().format("%Y").to_string().parse().unwrap())
        .collect();
    assert_eq!(
        leap_years,
        vec![1984, 1988, 1992, 1996, 2000, 2004, 2008]
    );
}

#[test]
fn hindcast_rejects_bad_month() {
    assert_eq!(
        hindcast_windows(13, 1981..=1982),
        Err(CalendarError::InvalidMonth { month: 13 })
    );
}

#[test]
fn sequence_spans_window() {
    let w = ForecastWindow::new(2023, 1).unwrap();
    let dates = date_sequence(w.forecast_start(), w.total_days());
    assert_eq!(dates.len(), 89);
    assert_eq!(dates[0], w.forecast_start());
    assert_eq!(*dates.last().unwrap(), w.forecast_end());

    // Segment boundaries land on the 1st of each lead month.
    let [d1, d2, _] = w.day_counts();
    assert_eq!(dates[d1], ymd(2023, 3, 1));
    assert_eq!(dates[d1 + d2], ymd(2023, 4, 1));
}
