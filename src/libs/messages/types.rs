/// Every line of user-facing text the driver prints.
#[derive(Debug, Clone)]
pub enum Message {
    // === DATABASE MESSAGES ===
    DatabaseOpened(String),
    InMemoryDatabase,
    ConfigMissing(String),

    // === USER MESSAGES ===
    UserCreated(String, i64), // name, id
    UserRejected(String, String), // name, reason
    UserRenamed(i64, String),
    UserDeleted(i64),
    UsersHeader,
    NoUsersFound,

    // === LABEL MESSAGES ===
    LabelCreated(String, i64),
    LabelRejected(String, String),
    LabelRenamed(i64, String),
    LabelsHeader,
    NoLabelsFound,

    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskCreatedPartially(i64, String), // id, label failures
    TaskRejected(String, String),      // title, reason
    TaskUpdated(i64),
    TaskUpdatedPartially(i64, String),
    TaskUpdateRejected(i64, String),
    TaskDeleted(i64),
    TaskDeleteFailed(i64, String),
    TasksHeader,
    TasksByAuthorHeader(i64),
    TasksByLabelHeader(i64),
    NoTasksFound,

    // === ASSOCIATION MESSAGES ===
    LabelAttached(i64, i64), // label, task
    LabelAttachFailed(i64, i64, String),
    LabelDetached(i64, i64),
    LabelDetachFailed(i64, i64, String),

    // === DEMO MESSAGES ===
    DemoSection(String),
    DemoFinished,
}
