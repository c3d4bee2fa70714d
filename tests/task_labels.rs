#[cfg(test)]
mod tests {
    use tasklink::db::db::DB_FILE_NAME;
    use tasklink::db::labels::Label;
    use tasklink::libs::error::{ErrorKind, StorageError};
    use tasklink::libs::task::Task;
    use tasklink::storage::{Storage, Store};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskLabelTestContext {
        _temp_dir: TempDir,
        store: Store,
        task_id: i64,
        label_id: i64,
    }

    impl TaskLabelTestContext {
        fn pair_count(&self, task_id: i64, label_id: i64) -> i64 {
            self.store
                .connection()
                .query_row(
                    "SELECT COUNT(*) FROM tasks_labels WHERE task_id = ?1 AND label_id = ?2",
                    [task_id, label_id],
                    |row| row.get(0),
                )
                .unwrap()
        }
    }

    impl TestContext for TaskLabelTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut store = Store::open(temp_dir.path().join(DB_FILE_NAME)).unwrap();
            let label_id = store.new_label(&Label::new("Срочно")).unwrap();
            let task_id = store.new_task(&Task::new("Без меток", "")).unwrap().task_id;
            TaskLabelTestContext {
                _temp_dir: temp_dir,
                store,
                task_id,
                label_id,
            }
        }
    }

    #[test_context(TaskLabelTestContext)]
    #[test]
    fn test_add_label_to_task(ctx: &mut TaskLabelTestContext) {
        ctx.store.add_label_to_task(ctx.label_id, ctx.task_id).unwrap();

        let task = ctx.store.select_task_by_id(ctx.task_id).unwrap();
        assert_eq!(task.labels, vec![ctx.label_id]);
        assert_eq!(ctx.pair_count(ctx.task_id, ctx.label_id), 1);
    }

    #[test_context(TaskLabelTestContext)]
    #[test]
    fn test_add_label_twice(ctx: &mut TaskLabelTestContext) {
        ctx.store.add_label_to_task(ctx.label_id, ctx.task_id).unwrap();

        let err = ctx.store.add_label_to_task(ctx.label_id, ctx.task_id).unwrap_err();
        assert!(matches!(
            err,
            StorageError::DuplicateLabel { task_id, label_id } if task_id == ctx.task_id && label_id == ctx.label_id
        ));
        assert_eq!(err.kind(), ErrorKind::Association);
        assert_eq!(ctx.pair_count(ctx.task_id, ctx.label_id), 1);
    }

    #[test_context(TaskLabelTestContext)]
    #[test]
    fn test_add_label_to_missing_task_or_label(ctx: &mut TaskLabelTestContext) {
        let err = ctx.store.add_label_to_task(ctx.label_id, 500).unwrap_err();
        assert!(matches!(err, StorageError::LabelOrTaskMissing { task_id: 500, .. }));

        let err = ctx.store.add_label_to_task(600, ctx.task_id).unwrap_err();
        assert!(matches!(err, StorageError::LabelOrTaskMissing { label_id: 600, .. }));

        assert!(ctx.store.select_task_by_id(ctx.task_id).unwrap().labels.is_empty());
    }

    #[test_context(TaskLabelTestContext)]
    #[test]
    fn test_remove_label_from_task(ctx: &mut TaskLabelTestContext) {
        ctx.store.add_label_to_task(ctx.label_id, ctx.task_id).unwrap();
        ctx.store.delete_label_to_task(ctx.label_id, ctx.task_id).unwrap();
        assert_eq!(ctx.pair_count(ctx.task_id, ctx.label_id), 0);

        let err = ctx.store.delete_label_to_task(ctx.label_id, ctx.task_id).unwrap_err();
        assert!(matches!(err, StorageError::AssociationNotFound { .. }));
        assert_eq!(err.kind(), ErrorKind::NotFound);

        // Both sides of the association survive
        assert!(ctx.store.select_task_by_id(ctx.task_id).is_ok());
        assert!(ctx.store.select_label_by_id(ctx.label_id).is_ok());
    }

    #[test_context(TaskLabelTestContext)]
    #[test]
    fn test_label_freed_after_detach_can_be_deleted(ctx: &mut TaskLabelTestContext) {
        ctx.store.add_label_to_task(ctx.label_id, ctx.task_id).unwrap();
        assert!(ctx.store.delete_label(ctx.label_id).is_err());

        ctx.store.delete_label_to_task(ctx.label_id, ctx.task_id).unwrap();
        ctx.store.delete_label(ctx.label_id).unwrap();
        assert!(ctx.store.select_labels().unwrap().is_empty());
    }
}
