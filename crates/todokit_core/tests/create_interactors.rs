mod common;

use common::{seams, CountingRepository, Recorder, HEADER_ID, LIST_ID};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use todokit_core::{
    CreateHeaderCallback, CreateHeaderInteractor, CreateHeaderRequest, CreateItemCallback,
    CreateItemInteractor, CreateItemRequest, CreateTodoListCallback, CreateTodoListInteractor,
    EditHeaderCallback, EditHeaderInteractor, EditHeaderRequest, Interactor, InteractorError,
    StorageError, TodoList, TodoListHeader, TodoListItem, TodoListRepository, ValidationError,
};

fn create_item(
    repo: &Arc<CountingRepository>,
    recorder: &Arc<Recorder<TodoListItem>>,
    header_id: &str,
) -> CreateItemInteractor {
    let (executor, main_thread) = seams();
    let recorder = Arc::clone(recorder);
    let callback: Arc<dyn CreateItemCallback> =
        Arc::new(move |item: TodoListItem| recorder.push(item));
    CreateItemInteractor::new(
        executor,
        main_thread,
        callback,
        repo.clone(),
        CreateItemRequest {
            header_id: header_id.to_string(),
            title: "Butter".to_string(),
            position: 2,
            details: "salted".to_string(),
            is_important: true,
        },
    )
}

fn create_header(
    repo: &Arc<CountingRepository>,
    recorder: &Arc<Recorder<TodoListHeader>>,
    list_id: &str,
) -> CreateHeaderInteractor {
    let (executor, main_thread) = seams();
    let recorder = Arc::clone(recorder);
    let callback: Arc<dyn CreateHeaderCallback> =
        Arc::new(move |header: TodoListHeader| recorder.push(header));
    CreateHeaderInteractor::new(
        executor,
        main_thread,
        callback,
        repo.clone(),
        CreateHeaderRequest {
            list_id: list_id.to_string(),
            title: "Bakery".to_string(),
            position: 1,
        },
    )
}

#[test]
fn create_item_inserts_under_existing_header() {
    let repo = Arc::new(CountingRepository::seeded());
    let recorder = Recorder::new();

    create_item(&repo, &recorder, HEADER_ID).run().unwrap();

    assert_eq!(repo.inserts(), 1);
    assert_eq!(repo.updates(), 0);
    let created = recorder.values();
    assert_eq!(created.len(), 1);
    assert!(created[0].is_important());
    assert!(!created[0].is_done());
    assert_eq!(created[0].details(), "salted");
    assert_eq!(
        repo.get_item_by_id(created[0].uuid()).unwrap().as_ref(),
        Some(&created[0])
    );
}

#[test]
fn create_item_generates_fresh_uuid_per_run() {
    let repo = Arc::new(CountingRepository::seeded());
    let recorder = Recorder::new();
    let create = create_item(&repo, &recorder, HEADER_ID);

    create.run().unwrap();
    create.run().unwrap();

    let created = recorder.values();
    assert_ne!(created[0].uuid(), created[1].uuid());
    assert_eq!(repo.tracked_uuids(), 2);
}

#[test]
fn create_item_without_parent_is_rejected_before_insert() {
    let repo = Arc::new(CountingRepository::seeded());
    let recorder = Recorder::new();

    let err = create_item(&repo, &recorder, "MISSING_UUID").run().unwrap_err();

    assert!(matches!(
        err,
        InteractorError::Validation(ValidationError::ParentHeaderNotFound(_))
    ));
    assert_eq!(repo.inserts(), 0);
    assert_eq!(recorder.count(), 0);
}

#[test]
fn rejected_insert_is_a_storage_error_without_callback() {
    let repo = Arc::new(CountingRepository::seeded());
    repo.reject_inserts.store(true, Ordering::SeqCst);
    let recorder = Recorder::new();

    let err = create_item(&repo, &recorder, HEADER_ID).run().unwrap_err();

    assert!(matches!(
        err,
        InteractorError::Storage(StorageError::InsertRejected { entity: "item", .. })
    ));
    assert_eq!(repo.inserts(), 1);
    assert_eq!(recorder.count(), 0);
}

#[test]
fn create_header_requires_existing_list() {
    let repo = Arc::new(CountingRepository::seeded());
    let recorder = Recorder::new();

    let err = create_header(&repo, &recorder, "no-such-list")
        .run()
        .unwrap_err();
    assert!(matches!(
        err,
        InteractorError::Validation(ValidationError::TodoListNotFound(_))
    ));
    assert_eq!(repo.inserts(), 0);

    create_header(&repo, &recorder, LIST_ID).run().unwrap();
    let created = recorder.values();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].list_id(), LIST_ID);
    assert_eq!(repo.get_sections_of_todo_list_id(LIST_ID).unwrap().len(), 2);
}

#[test]
fn edit_header_upserts() {
    let repo = Arc::new(CountingRepository::seeded());
    let recorder = Recorder::new();
    let (executor, main_thread) = seams();
    let sink = Arc::clone(&recorder);
    let callback: Arc<dyn EditHeaderCallback> =
        Arc::new(move |header: TodoListHeader| sink.push(header));

    EditHeaderInteractor::new(
        executor,
        main_thread,
        callback,
        repo.clone(),
        EditHeaderRequest {
            uuid: HEADER_ID.to_string(),
            list_id: LIST_ID.to_string(),
            title: "Cheese & milk".to_string(),
            position: 3,
        },
    )
    .run()
    .unwrap();

    let stored = repo.get_header_by_id(HEADER_ID).unwrap().unwrap();
    assert_eq!(stored.title(), "Cheese & milk");
    assert_eq!(stored.position(), 3);
    assert_eq!(recorder.values(), vec![stored]);
    assert_eq!(repo.updates(), 1);
}

#[test]
fn create_todo_list_notifies_with_new_list() {
    let repo = Arc::new(CountingRepository::default());
    let recorder = Recorder::new();
    let (executor, main_thread) = seams();
    let sink = Arc::clone(&recorder);
    let callback: Arc<dyn CreateTodoListCallback> =
        Arc::new(move |list: TodoList| sink.push(list));

    CreateTodoListInteractor::new(executor, main_thread, callback, repo.clone(), "Weekend")
        .run()
        .unwrap();

    let created = recorder.values();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].title(), "Weekend");
    assert_eq!(repo.get_all_todo_lists().unwrap(), created);
}
