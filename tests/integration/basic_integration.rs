/// Basic integration tests
use habit_tracker_api::*;
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    #[tokio::test]
    async fn test_server_basic_workflow() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let server = HabitTrackerServer::new(temp_file.path().to_path_buf())
            .await
            .expect("Failed to create server");

        let service = server.service();
        let habit = service.create_habit("Meditate", "daily").unwrap();
        let outcome = service.mark_completed(&habit.id).unwrap();

        assert_eq!(outcome.habit.current_streak, 1);
        assert_eq!(service.list_streaks().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let habit_id = {
            let server = HabitTrackerServer::new(db_path.clone())
                .await
                .expect("Failed to create first server");
            let habit = server.service().create_habit("Walk", "weekly").unwrap();
            server.service().mark_completed(&habit.id).unwrap();
            habit.id
        };

        // A second server on the same file sees the completed habit
        let server2 = HabitTrackerServer::new(db_path)
            .await
            .expect("Failed to create second server");
        let habit = server2.service().get_habit(&habit_id).unwrap();

        assert_eq!(habit.name, "Walk");
        assert_eq!(habit.total_completions, 1);
        assert!(habit.last_completed_at.is_some());
    }

    #[test]
    fn test_storage_interface() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path())
            .expect("Failed to create storage");

        let storage: &dyn HabitStorage = &storage;
        assert!(storage.list_habits().unwrap().is_empty());
    }
}
