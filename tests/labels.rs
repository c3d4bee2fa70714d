#[cfg(test)]
mod tests {
    use tasklink::db::db::DB_FILE_NAME;
    use tasklink::db::labels::Label;
    use tasklink::libs::error::{Entity, ErrorKind, NameError, StorageError};
    use tasklink::libs::task::Task;
    use tasklink::storage::{Storage, Store};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct LabelTestContext {
        _temp_dir: TempDir,
        store: Store,
    }

    impl TestContext for LabelTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let store = Store::open(temp_dir.path().join(DB_FILE_NAME)).unwrap();
            LabelTestContext {
                _temp_dir: temp_dir,
                store,
            }
        }
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_label_crud(ctx: &mut LabelTestContext) {
        // Create label
        let id = ctx.store.new_label(&Label::new("  Срочно   сделать ")).unwrap();
        assert_eq!(ctx.store.select_label_by_id(id).unwrap().name, "Срочно сделать");

        // Any alphabet is fine for labels
        let bug = ctx.store.new_label(&Label::new("bug")).unwrap();
        assert_eq!(ctx.store.select_label_by_id(bug).unwrap().name, "bug");

        // Update label
        ctx.store.update_label_name(id, " Идея ").unwrap();
        assert_eq!(ctx.store.select_label_by_id(id).unwrap().name, "Идея");

        let labels = ctx.store.select_labels().unwrap();
        assert_eq!(labels.iter().map(|l| l.id).collect::<Vec<_>>(), vec![id, bug]);

        // Delete label
        ctx.store.delete_label(id).unwrap();
        let err = ctx.store.select_label_by_id(id).unwrap_err();
        assert!(matches!(err, StorageError::NotFound { entity: Entity::Label, .. }));
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_empty_label_is_rejected(ctx: &mut LabelTestContext) {
        let err = ctx.store.new_label(&Label::new(" \t ")).unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(NameError::EmptyLabel)));
        assert!(ctx.store.select_labels().unwrap().is_empty());

        let id = ctx.store.new_label(&Label::new("Новая")).unwrap();
        let err = ctx.store.update_label_name(id, "").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_missing_label_operations(ctx: &mut LabelTestContext) {
        assert_eq!(ctx.store.update_label_name(42, "Новая").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(ctx.store.delete_label(42).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test_context(LabelTestContext)]
    #[test]
    fn test_label_in_use_cannot_be_deleted(ctx: &mut LabelTestContext) {
        let id = ctx.store.new_label(&Label::new("Ошибка")).unwrap();
        let write = ctx.store.new_task(&Task::new("Баг", "").with_labels(&[id])).unwrap();
        assert!(write.is_complete());

        let err = ctx.store.delete_label(id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert!(ctx.store.select_label_by_id(id).is_ok());
    }
}
