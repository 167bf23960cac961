mod common;

use common::{CountingRepository, Recorder, HEADER_ID, LIST_ID};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::thread::{self, ThreadId};
use std::time::{Duration, Instant};
use todokit_core::{
    main_loop, EditItemCallback, EditItemInteractor, EditItemRequest, Executor, FailureHandler,
    InteractorError, MainLoop, MainThread, ThreadPoolExecutor, TodoListItem, TodoListRepository,
    ValidationError,
};

const WAIT: Duration = Duration::from_secs(5);

fn edit_request(uuid: &str, header_id: &str, title: &str) -> EditItemRequest {
    EditItemRequest {
        uuid: uuid.to_string(),
        title: title.to_string(),
        position: 0,
        is_done: false,
        details: String::new(),
        is_important: false,
        parent_header_id: header_id.to_string(),
    }
}

fn drain(main: &MainLoop, expected: usize) -> usize {
    let mut ran = 0;
    while ran < expected && main.run_next(WAIT) {
        ran += 1;
    }
    ran
}

#[test]
fn callbacks_run_on_the_draining_thread() {
    let repo = Arc::new(CountingRepository::seeded());
    let (handle, main) = main_loop();
    let main_thread: Arc<dyn MainThread> = Arc::new(handle);
    let executor: Arc<dyn Executor> = Arc::new(ThreadPoolExecutor::new(2).unwrap());
    let recorder: Arc<Recorder<ThreadId>> = Recorder::new();
    let sink = Arc::clone(&recorder);
    let callback: Arc<dyn EditItemCallback> =
        Arc::new(move |_item: TodoListItem| sink.push(thread::current().id()));

    for title in ["Milk", "Oat milk"] {
        EditItemInteractor::new(
            Arc::clone(&executor),
            Arc::clone(&main_thread),
            Arc::clone(&callback),
            repo.clone(),
            edit_request("milk", HEADER_ID, title),
        )
        .execute();
    }

    assert_eq!(drain(&main, 2), 2);
    let current = thread::current().id();
    assert_eq!(recorder.values(), vec![current, current]);
    assert_eq!(repo.updates(), 2);
}

#[test]
fn nothing_is_delivered_until_the_loop_drains() {
    let repo = Arc::new(CountingRepository::seeded());
    let (handle, main) = main_loop();
    let executor: Arc<dyn Executor> = Arc::new(ThreadPoolExecutor::new(1).unwrap());
    let recorder: Arc<Recorder<String>> = Recorder::new();
    let sink = Arc::clone(&recorder);
    let callback: Arc<dyn EditItemCallback> =
        Arc::new(move |item: TodoListItem| sink.push(item.title().to_string()));

    EditItemInteractor::new(
        Arc::clone(&executor),
        Arc::new(handle),
        callback,
        repo.clone(),
        edit_request("milk", HEADER_ID, "Milk"),
    )
    .execute();

    let deadline = Instant::now() + WAIT;
    while repo.get_item_by_id("milk").unwrap().is_none() && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(5));
    }

    assert_eq!(repo.updates(), 1);
    assert_eq!(recorder.count(), 0);
    assert!(main.run_next(WAIT));
    assert_eq!(recorder.values(), vec!["Milk".to_string()]);
}

#[test]
fn failures_reach_the_handler_on_a_worker() {
    let repo = Arc::new(CountingRepository::seeded());
    let (handle, main) = main_loop();
    let failures: Arc<Recorder<(String, &'static str, bool)>> = Recorder::new();
    let sink = Arc::clone(&failures);
    let handler: FailureHandler = Arc::new(move |name: &'static str, err: InteractorError| {
        let worker = thread::current().name().unwrap_or_default().to_string();
        let missing_parent = matches!(
            err,
            InteractorError::Validation(ValidationError::ParentHeaderNotFound(_))
        );
        sink.push((worker, name, missing_parent));
    });
    let executor: Arc<dyn Executor> =
        Arc::new(ThreadPoolExecutor::with_failure_handler(2, handler).unwrap());
    let delivered: Arc<Recorder<TodoListItem>> = Recorder::new();
    let sink = Arc::clone(&delivered);
    let callback: Arc<dyn EditItemCallback> = Arc::new(move |item: TodoListItem| sink.push(item));

    EditItemInteractor::new(
        executor,
        Arc::new(handle),
        callback,
        repo.clone(),
        edit_request("milk", "MISSING_UUID", "Milk"),
    )
    .execute();

    // Every handle is gone once the pool has joined, so the loop reports closed.
    assert!(!main.run_next(WAIT));
    let recorded = failures.values();
    assert_eq!(recorded.len(), 1);
    let (worker, name, missing_parent) = &recorded[0];
    assert!(worker.starts_with("todokit-worker-"));
    assert_eq!(*name, "edit_item");
    assert!(*missing_parent);
    assert_eq!(delivered.count(), 0);
    assert_eq!(repo.updates(), 0);
}

#[test]
fn concurrent_edits_of_one_uuid_leave_one_item() {
    let repo = Arc::new(CountingRepository::seeded());
    let (handle, main) = main_loop();
    let main_thread: Arc<dyn MainThread> = Arc::new(handle);
    let executor: Arc<dyn Executor> = Arc::new(ThreadPoolExecutor::new(4).unwrap());
    let recorder: Arc<Recorder<TodoListItem>> = Recorder::new();
    let sink = Arc::clone(&recorder);
    let callback: Arc<dyn EditItemCallback> = Arc::new(move |item: TodoListItem| sink.push(item));

    let titles: Vec<String> = (0..16).map(|index| format!("Milk {index}")).collect();
    for title in &titles {
        EditItemInteractor::new(
            Arc::clone(&executor),
            Arc::clone(&main_thread),
            Arc::clone(&callback),
            repo.clone(),
            edit_request("milk", HEADER_ID, title),
        )
        .execute();
    }

    assert_eq!(drain(&main, titles.len()), titles.len());
    assert_eq!(repo.updates(), titles.len());
    assert_eq!(repo.tracked_uuids(), 1);

    let sections = repo.get_sections_of_todo_list_id(LIST_ID).unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].items().len(), 1);
    let stored = &sections[0].items()[0];
    assert!(titles.iter().any(|title| title == stored.title()));
}

#[test]
fn panicking_run_does_not_stop_the_worker() {
    let repo = Arc::new(CountingRepository::seeded());
    repo.panic_next_header_lookup.store(true, Ordering::SeqCst);
    let (handle, main) = main_loop();
    let main_thread: Arc<dyn MainThread> = Arc::new(handle);
    let failures: Arc<Recorder<(&'static str, String)>> = Recorder::new();
    let sink = Arc::clone(&failures);
    let handler: FailureHandler = Arc::new(move |name: &'static str, err: InteractorError| {
        sink.push((name, err.kind().to_string()));
    });
    let executor: Arc<dyn Executor> =
        Arc::new(ThreadPoolExecutor::with_failure_handler(1, handler).unwrap());
    let delivered: Arc<Recorder<String>> = Recorder::new();
    let sink = Arc::clone(&delivered);
    let callback: Arc<dyn EditItemCallback> =
        Arc::new(move |item: TodoListItem| sink.push(item.title().to_string()));

    for title in ["Milk", "Oat milk"] {
        EditItemInteractor::new(
            Arc::clone(&executor),
            Arc::clone(&main_thread),
            Arc::clone(&callback),
            repo.clone(),
            edit_request("milk", HEADER_ID, title),
        )
        .execute();
    }

    assert!(main.run_next(WAIT));
    assert_eq!(delivered.values(), vec!["Oat milk".to_string()]);
    assert_eq!(failures.values(), vec![("edit_item", "panic".to_string())]);
    assert_eq!(repo.updates(), 1);
}
