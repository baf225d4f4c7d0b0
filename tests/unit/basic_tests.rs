/// Basic unit tests to verify core functionality through the public API
use chrono::{Duration, Utc};
use habit_tracker_api::*;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    #[test]
    fn test_habit_creation() {
        let habit = Habit::new("Test Habit", "weekly").unwrap();

        assert_eq!(habit.name, "Test Habit");
        assert_eq!(habit.frequency, Frequency::Weekly);
        assert_eq!(habit.current_streak, 0);
    }

    #[test]
    fn test_validate_habit() {
        assert_eq!(validate_habit("Run", "monthly"), Ok(Frequency::Monthly));
        assert!(validate_habit("", "daily").is_err());
        assert!(validate_habit("Run", "yearly").is_err());
    }

    #[test]
    fn test_documented_examples() {
        let now = Utc::now();

        let mut daily = Habit::new("Floss", "daily").unwrap();
        daily.current_streak = 3;
        daily.total_completions = 3;
        daily.last_completed_at = Some(now - Duration::hours(23));
        assert_eq!(complete(&daily, now).0.current_streak, 4);

        let mut weekly = Habit::new("Call home", "weekly").unwrap();
        weekly.current_streak = 7;
        weekly.total_completions = 7;
        weekly.last_completed_at = Some(now - Duration::days(15));
        assert_eq!(complete(&weekly, now).0.current_streak, 1);
    }

    #[test]
    fn test_service_over_sqlite() {
        let service = HabitService::new(SqliteStorage::in_memory().unwrap());

        let habit = service.create_habit("Read", "daily").unwrap();
        service.delete_habit(&habit.id).unwrap();

        assert!(matches!(
            service.get_habit(&habit.id),
            Err(ServiceError::NotFound { .. })
        ));
    }
}
