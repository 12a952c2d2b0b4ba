/// Days shown in a month grid: six full weeks
pub const DAYS_IN_GRID: usize = 42;

/// Days in one displayed week
pub const DAYS_PER_WEEK: usize = 7;

/// Number of months in a year
pub const MONTHS_PER_YEAR: u32 = 12;
/// Month number for January
pub const JANUARY: u32 = 1;
/// Month number for December
pub const DECEMBER: u32 = 12;

/// Weekday header labels, Monday first
pub const WEEKDAY_HEADERS: [&str; DAYS_PER_WEEK] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Display pattern used when the picker config names none
pub const DEFAULT_DATE_FORMAT: &str = "dd MMM yyyy";
/// Pattern for month headers ("February 2026")
pub const MONTH_YEAR_FORMAT: &str = "MMMM yyyy";
/// Pattern for week-view time slot labels ("09:30 AM")
pub const TIME_SLOT_FORMAT: &str = "hh:mm a";
/// Placeholder shown by an empty picker input
pub const DEFAULT_PLACEHOLDER: &str = "Select date range";

/// Joins the two ends of a formatted range
pub const RANGE_DISPLAY_SEPARATOR: &str = " - ";
/// Joins the two ends of a week label
pub const WEEK_LABEL_SEPARATOR: &str = " - ";

/// ISO 8601 calendar date, the serialized form exchanged with host forms
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
/// Date/time separator in ISO 8601 extended format
pub const ISO_TIME_SEPARATOR: char = 'T';

/// Minutes covered by one week-view time slot
pub const SLOT_MINUTES: u32 = 30;
/// Time slots in one day
pub const SLOTS_PER_DAY: usize = 48;

/// Month number for February
pub const FEBRUARY: u32 = 2;
/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u32 = 29;

/// Days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: i32 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: i32 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: i32 = 400;
