//! Scripted walkthrough of the storage layer.
//!
//! Seeds users and labels (including names that must be rejected), creates
//! tasks with and without authors and with partly invalid label lists, then
//! updates, relabels and deletes. Validation, referential and partial
//! failures are printed and the script moves on; database errors end it.

use crate::db::labels::Label;
use crate::db::users::User;
use crate::libs::error::StorageError;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskWrite};
use crate::libs::view::View;
use crate::storage::Storage;
use crate::{msg_error, msg_print, msg_success, msg_warning};
use anyhow::Result;

const USER_NAMES: [&str; 5] = ["Иван Иванов", "Мария Петрова", "Алексей   сидОРов ", "", "John Doe"];
const LABEL_NAMES: [&str; 6] = ["Ошибка", "Новая", "Срочно", "Переделать", "Идея", "   "];

pub fn cmd(store: &mut impl Storage) -> Result<()> {
    msg_print!(Message::DemoSection("Users".to_string()), true);
    let users = seed_users(store)?;

    msg_print!(Message::DemoSection("Labels".to_string()), true);
    let labels = seed_labels(store)?;

    msg_print!(Message::DemoSection("Tasks".to_string()), true);
    let author = users.first().copied();
    let assignee = users.get(1).copied();
    let idea = labels.last().copied();

    let mut created = Vec::new();

    let login = Task::new("Ошибка при авторизации", "При нажатии на кнопку \"Войти\" ничего не происходит");
    created.extend(create_task(store, &login)?);

    let mut signup = Task::new("  Баг в форме регистрации ", "Кнопка \"Отправить\" не активна после заполнения всех полей");
    signup.labels = idea.into_iter().collect();
    created.extend(create_task(store, &signup)?);

    let mut notifications = Task::new("Система уведомлений", "Реализовать уведомления при появлении новой новости");
    notifications.author_id = author;
    notifications.assigned_id = assignee;
    notifications.labels = idea.into_iter().collect();
    created.extend(create_task(store, &notifications)?);

    // Two of these labels do not exist
    let mut course = Task::new("Добавить новый курс", "Добавить возможность пользователю приобрести новый курс");
    course.labels = vec![labels.get(1).copied().unwrap_or(2), 10_000, labels.get(2).copied().unwrap_or(3), 20_000];
    created.extend(create_task(store, &course)?);

    // Nobody has this ID
    let orphan = Task::new("Задача без исполнителя", "Исполнитель не существует").with_assignee(99_999);
    created.extend(create_task(store, &orphan)?);

    print_tasks(store)?;

    if let Some(first) = created.first().copied() {
        msg_print!(Message::DemoSection("Update".to_string()), true);
        update_demo(store, first, author, users.get(2).copied(), &labels)?;
    }

    if let Some(second) = created.get(1).copied() {
        msg_print!(Message::DemoSection("Labels on tasks".to_string()), true);
        if let Some(&label_id) = labels.first() {
            attach(store, label_id, second)?;
            // Second attach of the same pair is reported as a duplicate
            attach(store, label_id, second)?;
            detach(store, label_id, second)?;
            detach(store, label_id, second)?;
        }

        msg_print!(Message::DemoSection("Delete".to_string()), true);
        delete(store, second)?;
        delete(store, second)?;
    }

    if let Some(author_id) = author {
        msg_print!(Message::TasksByAuthorHeader(author_id), true);
        View::tasks(&store.select_tasks_by_author_id(author_id)?);
    }
    if let Some(label_id) = idea {
        msg_print!(Message::TasksByLabelHeader(label_id), true);
        View::tasks(&store.select_tasks_by_label_id(label_id)?);
    }

    print_tasks(store)?;
    msg_success!(Message::DemoFinished);
    Ok(())
}

fn seed_users(store: &mut impl Storage) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for name in USER_NAMES {
        match store.new_user(&User::new(name)) {
            Ok(id) => {
                let stored = store.select_user_by_id(id)?;
                msg_success!(Message::UserCreated(stored.name, id));
                ids.push(id);
            }
            Err(StorageError::InvalidName(err)) => {
                msg_error!(Message::UserRejected(name.to_string(), err.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(&id) = ids.last() {
        store.update_user_name(id, "алексей петрович сидоров")?;
        msg_success!(Message::UserRenamed(id, store.select_user_by_id(id)?.name));
    }

    let temporary = store.new_user(&User::new("Временный Пользователь"))?;
    store.delete_user(temporary)?;
    msg_success!(Message::UserDeleted(temporary));
    Ok(ids)
}

fn seed_labels(store: &mut impl Storage) -> Result<Vec<i64>> {
    let mut ids = Vec::new();
    for name in LABEL_NAMES {
        match store.new_label(&Label::new(name)) {
            Ok(id) => {
                msg_success!(Message::LabelCreated(name.to_string(), id));
                ids.push(id);
            }
            Err(StorageError::InvalidName(err)) => {
                msg_error!(Message::LabelRejected(name.to_string(), err.to_string()));
            }
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(&id) = ids.get(3) {
        store.update_label_name(id, "  Переделать   срочно ")?;
        msg_success!(Message::LabelRenamed(id, store.select_label_by_id(id)?.name));
    }
    Ok(ids)
}

fn create_task(store: &mut impl Storage, task: &Task) -> Result<Option<i64>> {
    match store.new_task(task) {
        Ok(write) => {
            report_write(&write, Message::TaskCreated(write.task_id), Message::TaskCreatedPartially);
            Ok(Some(write.task_id))
        }
        Err(err) if err.is_recoverable() => {
            msg_error!(Message::TaskRejected(task.title.trim().to_string(), err.to_string()));
            Ok(None)
        }
        Err(err) => Err(err.into()),
    }
}

fn update_demo(
    store: &mut impl Storage,
    task_id: i64,
    author: Option<i64>,
    assignee: Option<i64>,
    labels: &[i64],
) -> Result<()> {
    let mut task = store.select_task_by_id(task_id)?;

    // First update asserts the author, the second tries to replace it
    task.author_id = author;
    task.assigned_id = assignee;
    task.content = "Проверить обработчик кнопки и запрос".to_string();
    task.labels = labels.iter().take(2).copied().chain([40_000]).collect();
    update(store, &task)?;

    task.author_id = author.map(|id| id + 1);
    update(store, &task)?;
    Ok(())
}

fn update(store: &mut impl Storage, task: &Task) -> Result<()> {
    match store.update_task_by_id(task) {
        Ok(write) => {
            report_write(&write, Message::TaskUpdated(write.task_id), Message::TaskUpdatedPartially);
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            msg_error!(Message::TaskUpdateRejected(task.id, err.to_string()));
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn report_write(write: &TaskWrite, complete: Message, partial: fn(i64, String) -> Message) {
    if write.is_complete() {
        msg_success!(complete);
        return;
    }
    let failures: String = write.failures.iter().map(|failure| format!("\n\t- {}", failure)).collect();
    msg_warning!(partial(write.task_id, failures));
}

fn attach(store: &mut impl Storage, label_id: i64, task_id: i64) -> Result<()> {
    match store.add_label_to_task(label_id, task_id) {
        Ok(()) => msg_success!(Message::LabelAttached(label_id, task_id)),
        Err(err) if err.is_recoverable() => {
            msg_warning!(Message::LabelAttachFailed(label_id, task_id, err.to_string()));
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn detach(store: &mut impl Storage, label_id: i64, task_id: i64) -> Result<()> {
    match store.delete_label_to_task(label_id, task_id) {
        Ok(()) => msg_success!(Message::LabelDetached(label_id, task_id)),
        Err(err) if err.is_recoverable() => {
            msg_warning!(Message::LabelDetachFailed(label_id, task_id, err.to_string()));
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn delete(store: &mut impl Storage, task_id: i64) -> Result<()> {
    match store.delete_task(task_id) {
        Ok(()) => msg_success!(Message::TaskDeleted(task_id)),
        Err(err) if err.is_recoverable() => {
            msg_error!(Message::TaskDeleteFailed(task_id, err.to_string()));
        }
        Err(err) => return Err(err.into()),
    }
    Ok(())
}

fn print_tasks(store: &mut impl Storage) -> Result<()> {
    msg_print!(Message::TasksHeader, true);
    View::tasks(&store.select_tasks()?);
    Ok(())
}
