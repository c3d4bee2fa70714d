#[cfg(test)]
mod tests {
    use tasklink::db::db::DB_FILE_NAME;
    use tasklink::db::labels::Label;
    use tasklink::db::users::User;
    use tasklink::libs::error::{Entity, ErrorKind, LabelLinkError, StorageError};
    use tasklink::libs::task::Task;
    use tasklink::storage::{Storage, Store};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct TaskTestContext {
        _temp_dir: TempDir,
        store: Store,
        author: i64,
        assignee: i64,
        bug: i64,
        idea: i64,
    }

    impl TestContext for TaskTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let mut store = Store::open(temp_dir.path().join(DB_FILE_NAME)).unwrap();
            let author = store.new_user(&User::new("Иван Иванов")).unwrap();
            let assignee = store.new_user(&User::new("Мария Петрова")).unwrap();
            let bug = store.new_label(&Label::new("Ошибка")).unwrap();
            let idea = store.new_label(&Label::new("Идея")).unwrap();
            TaskTestContext {
                _temp_dir: temp_dir,
                store,
                author,
                assignee,
                bug,
                idea,
            }
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_without_author_or_labels(ctx: &mut TaskTestContext) {
        let write = ctx.store.new_task(&Task::new("  Ошибка при авторизации ", " Кнопка не работает ")).unwrap();
        assert!(write.is_complete());

        let tasks = ctx.store.select_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        let task = &tasks[0];
        assert_eq!(task.id, write.task_id);
        assert_eq!(task.title, "Ошибка при авторизации");
        assert_eq!(task.content, "Кнопка не работает");
        assert_eq!(task.author_id, None);
        assert_eq!(task.assigned_id, None);
        assert_eq!(task.closed, 0);
        assert!(task.opened > 0);
        assert!(task.labels.is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_create_with_author_assignee_and_labels(ctx: &mut TaskTestContext) {
        let task = Task::new("Система уведомлений", "")
            .with_author(ctx.author)
            .with_assignee(ctx.assignee)
            .with_labels(&[ctx.idea, ctx.bug]);
        let task_id = ctx.store.new_task(&task).unwrap().into_result().unwrap();

        let stored = ctx.store.select_task_by_id(task_id).unwrap();
        assert_eq!(stored.author_id, Some(ctx.author));
        assert_eq!(stored.assigned_id, Some(ctx.assignee));
        assert_eq!(stored.labels, vec![ctx.bug, ctx.idea]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_missing_assignee_aborts_create(ctx: &mut TaskTestContext) {
        let task = Task::new("Никому", "").with_assignee(999).with_labels(&[ctx.bug]);
        let err = ctx.store.new_task(&task).unwrap_err();

        assert!(matches!(
            err,
            StorageError::AuthorOrAssigneeMissing { author_id: None, assigned_id: Some(999) }
        ));
        assert_eq!(err.kind(), ErrorKind::Referential);
        assert!(ctx.store.select_tasks().unwrap().is_empty());
        assert!(ctx.store.select_tasks_by_label_id(ctx.bug).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_missing_author_aborts_create(ctx: &mut TaskTestContext) {
        let err = ctx.store.new_task(&Task::new("Чужая", "").with_author(555)).unwrap_err();
        assert!(matches!(err, StorageError::AuthorOrAssigneeMissing { author_id: Some(555), .. }));
        assert!(ctx.store.select_tasks().unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_missing_label_is_partial_success(ctx: &mut TaskTestContext) {
        let task = Task::new("Добавить новый курс", "").with_labels(&[ctx.bug, 404]);
        let write = ctx.store.new_task(&task).unwrap();

        assert!(!write.is_complete());
        assert_eq!(write.failures, vec![LabelLinkError::MissingLabel { label_id: 404 }]);

        let stored = ctx.store.select_task_by_id(write.task_id).unwrap();
        assert_eq!(stored.labels, vec![ctx.bug]);

        match write.into_result() {
            Err(StorageError::Partial(partial)) => {
                assert_eq!(partial.errors.len(), 1);
                assert_eq!(partial.errors[0].label_id(), 404);
            }
            other => panic!("expected a partial error, got {:?}", other),
        }
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_repeated_label_is_reported_once(ctx: &mut TaskTestContext) {
        let task = Task::new("Дубль", "").with_labels(&[ctx.idea, ctx.idea]);
        let write = ctx.store.new_task(&task).unwrap();

        assert_eq!(
            write.failures,
            vec![LabelLinkError::DuplicateLabel {
                task_id: write.task_id,
                label_id: ctx.idea
            }]
        );
        assert_eq!(ctx.store.select_task_by_id(write.task_id).unwrap().labels, vec![ctx.idea]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_select_by_author_and_label(ctx: &mut TaskTestContext) {
        let first = ctx
            .store
            .new_task(&Task::new("Первая", "").with_author(ctx.author).with_labels(&[ctx.bug]))
            .unwrap()
            .task_id;
        let second = ctx
            .store
            .new_task(&Task::new("Вторая", "").with_author(ctx.assignee).with_labels(&[ctx.bug, ctx.idea]))
            .unwrap()
            .task_id;

        let by_author: Vec<i64> = ctx.store.select_tasks_by_author_id(ctx.author).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(by_author, vec![first]);

        let with_bug = ctx.store.select_tasks_by_label_id(ctx.bug).unwrap();
        let by_label: Vec<i64> = with_bug.iter().map(|t| t.id).collect();
        assert_eq!(by_label, vec![first, second]);
        // Every label of a matching task comes back, not only the filter label
        assert_eq!(with_bug[1].labels, vec![ctx.bug, ctx.idea]);
        let all_labels: Vec<Vec<i64>> = ctx.store.select_tasks().unwrap().into_iter().map(|t| t.labels).collect();
        assert_eq!(all_labels, vec![vec![ctx.bug], vec![ctx.bug, ctx.idea]]);

        assert!(ctx.store.select_tasks_by_author_id(12345).unwrap().is_empty());
        assert!(ctx.store.select_tasks_by_label_id(12345).unwrap().is_empty());
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_task_removes_associations(ctx: &mut TaskTestContext) {
        let keep = ctx.store.new_task(&Task::new("Оставить", "").with_labels(&[ctx.bug])).unwrap().task_id;
        let doomed = ctx
            .store
            .new_task(&Task::new("Удалить", "").with_labels(&[ctx.bug, ctx.idea]))
            .unwrap()
            .task_id;

        ctx.store.delete_task(doomed).unwrap();

        let remaining: Vec<i64> = ctx.store.select_tasks().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![keep]);
        assert!(ctx.store.select_tasks_by_label_id(ctx.idea).unwrap().is_empty());
        let with_bug: Vec<i64> = ctx.store.select_tasks_by_label_id(ctx.bug).unwrap().iter().map(|t| t.id).collect();
        assert_eq!(with_bug, vec![keep]);

        let rows: i64 = ctx
            .store
            .connection()
            .query_row("SELECT COUNT(*) FROM tasks_labels WHERE task_id = ?1", [doomed], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_delete_missing_task_has_no_side_effects(ctx: &mut TaskTestContext) {
        let id = ctx.store.new_task(&Task::new("Есть", "").with_labels(&[ctx.idea])).unwrap().task_id;

        let err = ctx.store.delete_task(id + 10).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: Entity::Task, .. }));

        assert_eq!(ctx.store.select_tasks().unwrap().len(), 1);
        assert_eq!(ctx.store.select_task_by_id(id).unwrap().labels, vec![ctx.idea]);
    }

    #[test_context(TaskTestContext)]
    #[test]
    fn test_user_referenced_by_task_cannot_be_deleted(ctx: &mut TaskTestContext) {
        ctx.store.new_task(&Task::new("Автор", "").with_author(ctx.author)).unwrap();

        let err = ctx.store.delete_user(ctx.author).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert!(ctx.store.select_user_by_id(ctx.author).is_ok());
    }
}
