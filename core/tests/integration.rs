//! End-to-end sessions against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives `TodoApp` over real
//! HTTP through `UreqTransport`. Validates that request building, transport
//! and response parsing agree with the actual server schema.

use todo_core::{
    toggle_labels, ApiError, CreateLabel, CreateTodo, Operation, TodoApi, TodoApp, TodoClient, UpdateTodo,
    UreqTransport,
};

/// Start the mock server on a random port and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn connect(base_url: &str) -> TodoApp<UreqTransport> {
    TodoApp::new(TodoApi::new(TodoClient::new(base_url), UreqTransport::new()))
}

#[test]
fn todo_and_label_session() {
    let base_url = start_server();
    let mut app = connect(&base_url);

    // Step 1: initialize against an empty service.
    app.initialize().unwrap();
    assert!(!app.is_loading());
    assert!(app.todos().is_empty());
    assert!(app.labels().is_empty());

    // Step 2: create labels; a duplicate name is skipped locally.
    let work = app.create_label(CreateLabel::new("work")).unwrap().cloned().unwrap();
    let home = app.create_label(CreateLabel::new("home")).unwrap().cloned().unwrap();
    assert!(app.create_label(CreateLabel::new("work")).unwrap().is_none());
    assert_eq!(app.labels().len(), 2);

    // Step 3: create todos, selecting labels the way the form does.
    let selection = toggle_labels(&[], &work);
    let selection = toggle_labels(&selection, &home);
    let selection = toggle_labels(&selection, &home);
    let report = app
        .create_todo(CreateTodo::new("write report").with_labels(&selection))
        .unwrap()
        .cloned()
        .unwrap();
    assert_eq!(report.labels, vec![work.clone()]);
    app.create_todo(CreateTodo::new("water plants")).unwrap();
    assert!(app.create_todo(CreateTodo::new("  ")).unwrap().is_none());
    assert_eq!(app.todos().len(), 2);

    // Step 4: filter by label.
    app.select_label_filter(Some(&work));
    let visible: Vec<&str> = app.visible_todos().iter().map(|t| t.text.as_str()).collect();
    assert_eq!(visible, vec!["write report"]);
    app.select_label_filter(Some(&home));
    assert!(app.visible_todos().is_empty());
    app.select_label_filter(None);
    assert_eq!(app.visible_todos().len(), 2);

    // Step 5: toggle completion; the refetched list carries the new value.
    app.toggle_completed(&report).unwrap();
    let refreshed = app.todos().iter().find(|t| t.id == report.id).cloned().unwrap();
    assert!(refreshed.completed);

    // Step 6: deleting a label still attached to a todo is refused.
    app.open_label_editor();
    app.delete_label(work.id, &work.name);
    assert!(app.delete_error().unwrap().contains("work"));
    assert_eq!(app.labels().len(), 2);

    // Step 7: detach the label through an edit, then delete succeeds.
    app.edit_todo(&refreshed, "write final report", &[]).unwrap();
    let edited = app.todos().iter().find(|t| t.id == report.id).unwrap();
    assert_eq!(edited.text, "write final report");
    assert!(edited.labels.is_empty());
    assert!(edited.completed);

    app.delete_label(work.id, &work.name);
    assert_eq!(app.delete_error(), None);
    assert_eq!(app.labels(), &[home.clone()]);
    app.close_label_editor();

    // Step 8: delete a todo; the list is refetched.
    app.delete_todo(report.id).unwrap();
    assert_eq!(app.todos().len(), 1);
    assert_eq!(app.todos()[0].text, "water plants");

    // Step 9: a fresh controller sees the same server state.
    let mut second = connect(&base_url);
    second.initialize().unwrap();
    assert_eq!(second.todos(), app.todos());
    assert_eq!(second.labels(), app.labels());
}

#[test]
fn server_errors_surface_as_request_errors() {
    let base_url = start_server();
    let mut app = connect(&base_url);
    app.initialize().unwrap();

    let err = app.delete_todo(42).unwrap_err();
    assert!(matches!(
        err,
        ApiError::Request {
            operation: Operation::DeleteTodo,
            status: 404,
            ..
        }
    ));

    let missing = UpdateTodo {
        id: 42,
        text: "ghost".to_string(),
        completed: true,
        label_ids: Vec::new(),
    };
    let err = app.update_todo(&missing).unwrap_err();
    assert_eq!(err.operation(), Some(Operation::UpdateTodo));

    let err = app.api().get_todo(42).unwrap_err();
    assert_eq!(err.status(), Some(404));

    let err = app.create_todo(CreateTodo::new("x".repeat(101))).unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert!(app.todos().is_empty());
}

#[test]
fn unreachable_service_is_a_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let mut app = connect(&format!("http://{addr}"));

    let err = app.initialize().unwrap_err();
    assert!(matches!(
        err,
        ApiError::Transport {
            operation: Operation::ListTodos,
            ..
        }
    ));
    assert!(app.is_loading());
}
