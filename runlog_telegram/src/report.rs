//! Reply texts.

use runlog_core::{UserId, WorkoutDetails, YearMonth, format_date};
use runlog_store::{DistanceTotals, GroupWorkouts, UserWorkouts};

pub const ASK_PASSWORD: &str = "Hi! Before we start, what is the secret password?";
pub const PASSWORD_ACCEPTED: &str = "Password is valid! Please share with me your name :)";
pub const PASSWORD_REJECTED: &str = "Bro you sure you're authorized?";
pub const REGISTRATION_CLOSED: &str = "Registration is closed on this bot.";
pub const EMPTY_NAME: &str = "Please send a non-empty name.";
pub const NOT_AUTHORIZED: &str =
    "You are not authorized to use this bot, use /start to authenticate.";
pub const CANCELLED: &str = "Oh, goodbye!";

pub const NO_GROUP_HISTORY: &str = "No Workout history exists, please submit images to begin!";
pub const NO_USER_HISTORY: &str = "No existing workout history for user in group.";

pub const ASK_DELETE_DATE: &str =
    "Please provide the date of the workout entry you want to delete (format: YYYY-MM-DD):";
pub const INVALID_DATE: &str =
    "Invalid date format. Please provide the date in the format YYYY-MM-DD.";
pub const DELETED: &str = "Workout entry deleted successfully.";
pub const NOTHING_TO_DELETE: &str = "No workout entry found for the provided date.";

pub const ASK_PERIOD: &str = "Do you want to search by WEEK or MONTH?";
pub const INVALID_PERIOD: &str =
    "You've just entered an invalid input, please use the words WEEK or MONTH";
pub const ASK_WEEK_RANGE: &str = "Please enter the date range that you want to search \
     (format: YYYY-MM-DD, YYYY-MM-DD), example (2024-05-01, 2024-05-10):";
pub const INVALID_RANGE: &str = "Invalid date range format. Please provide the date range \
     in the format startDate, endDate with endDate not before startDate.";
pub const ASK_MONTH: &str = "Which month do you want to search? (format: YYYY-MM) (example: 2024-01)";
pub const INVALID_MONTH: &str = "Invalid month format. Please provide the month in the format YYYY-MM.";
pub const TOTALS_FAILED: &str = "Error getting total distance for user.";

pub const IMAGE_FAILED: &str = "Error processing image. Please try again.";
pub const EXTRACTION_FAILED: &str = "Error extracting workout details. Please try again.";
pub const INCOMPLETE_WORKOUT: &str =
    "Invalid workout details. No insertion performed into database.";
pub const SAVE_FAILED: &str = "Error saving workout data.";
pub const STORE_FAILED: &str = "Something went wrong reading the workout log. Please try again.";

#[must_use]
pub fn help() -> String {
    format!("Welcome to Run Tracker Bot!\n{}", crate::Command::help_text())
}

#[must_use]
pub fn welcome(name: &str) -> String {
    format!(
        "Welcome {name}! Send me a workout image and I will log the details.\n{}",
        crate::Command::help_text()
    )
}

#[must_use]
pub fn already_registered(name: &str) -> String {
    format!("You are already registered as {name}.")
}

#[must_use]
pub fn workout_logged(details: &WorkoutDetails) -> String {
    let mut lines = vec![
        "Workout logged!".to_string(),
        format!("Source: {}", details.variant),
        format!("Date: {}", format_date(details.date)),
        format!("Distance: {}KM", details.distance),
        format!("Avg Pace: {}", details.pace),
    ];
    if let Some(total_time) = &details.total_time {
        lines.push(format!("Time: {total_time}"));
    }
    if let Some(calories) = &details.calories {
        lines.push(format!("Calories: {calories}"));
    }
    lines.join("\n")
}

fn workout_lines(workouts: &UserWorkouts) -> String {
    workouts
        .iter()
        .map(|(date, entry)| {
            format!(
                "Date: {}\n- Distance: {}KM, Pace: {}\n",
                format_date(*date),
                entry.distance,
                entry.pace
            )
        })
        .collect()
}

#[must_use]
pub fn user_history(name: &str, workouts: &UserWorkouts) -> String {
    if workouts.is_empty() {
        return NO_USER_HISTORY.to_string();
    }
    format!("Workouts for {name}\n{}", workout_lines(workouts))
}

#[must_use]
pub fn group_history(workouts: &GroupWorkouts, name_of: impl Fn(UserId) -> String) -> String {
    let users: String = workouts
        .iter()
        .map(|(user_id, dates)| format!("User: {}\n{}", name_of(*user_id), workout_lines(dates)))
        .collect();
    format!("Workouts for Group\n{users}")
}

fn total_lines(totals: &DistanceTotals, name_of: impl Fn(UserId) -> String) -> String {
    totals
        .iter()
        .map(|(user_id, total)| format!("{}: {total}KM\n", name_of(*user_id)))
        .collect()
}

#[must_use]
pub fn range_totals(totals: &DistanceTotals, name_of: impl Fn(UserId) -> String) -> String {
    format!("Total Distance for each user:\n{}", total_lines(totals, name_of))
}

#[must_use]
pub fn month_totals(
    month: YearMonth,
    totals: &DistanceTotals,
    name_of: impl Fn(UserId) -> String,
) -> String {
    format!(
        "Total Distance for each user in {} {}:\n{}",
        month.abbreviation(),
        month.year(),
        total_lines(totals, name_of)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use runlog_core::{Variant, WorkoutEntry};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap_or_default()
    }

    fn name_of(user_id: UserId) -> String {
        match user_id {
            7 => "Alice".to_string(),
            other => other.to_string(),
        }
    }

    #[test]
    fn test_workout_logged_includes_optional_fields() {
        let details = WorkoutDetails {
            variant: Variant::RunKeeper,
            date: date(1),
            distance: "5.23".to_string(),
            pace: "5:30".to_string(),
            total_time: Some("28:45".to_string()),
            calories: None,
        };
        assert_eq!(
            workout_logged(&details),
            "Workout logged!\nSource: RunKeeper\nDate: 2024-05-01\nDistance: 5.23KM\nAvg Pace: 5:30\nTime: 28:45"
        );
    }

    #[test]
    fn test_user_history_lists_dates_in_order() {
        let workouts = UserWorkouts::from([
            (date(3), WorkoutEntry::new("3.00", "6'00\"/km")),
            (date(1), WorkoutEntry::new("5.20", "5'30\"/km")),
        ]);
        let text = user_history("Alice", &workouts);
        assert!(text.starts_with("Workouts for Alice\nDate: 2024-05-01\n- Distance: 5.20KM"));
        assert!(text.contains("Date: 2024-05-03\n- Distance: 3.00KM, Pace: 6'00\"/km\n"));
    }

    #[test]
    fn test_empty_user_history() {
        assert_eq!(user_history("Alice", &UserWorkouts::new()), NO_USER_HISTORY);
    }

    #[test]
    fn test_group_history_falls_back_to_ids() {
        let workouts = GroupWorkouts::from([
            (7, UserWorkouts::from([(date(1), WorkoutEntry::new("5.00", "5:00/km"))])),
            (9, UserWorkouts::from([(date(2), WorkoutEntry::new("2.00", "7:00/km"))])),
        ]);
        let text = group_history(&workouts, name_of);
        assert!(text.contains("User: Alice\nDate: 2024-05-01"));
        assert!(text.contains("User: 9\nDate: 2024-05-02"));
    }

    #[test]
    fn test_month_totals_header() {
        let totals = DistanceTotals::from([(7, "5.00".to_string()), (9, "0.00".to_string())]);
        let month = YearMonth::new(2024, 5).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(
            month_totals(month, &totals, name_of),
            "Total Distance for each user in MAY 2024:\nAlice: 5.00KM\n9: 0.00KM\n"
        );
    }
}
