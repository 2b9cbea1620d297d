//! End-to-end runs of the shell loop against the in-memory client.

use restsh::repl::io::{MockClient, MockLineEditor, MockSecretReader};
use restsh::repl::services::http::{HttpMethod, ResponseRecord};
use restsh::{AppController, Flow, Session};

fn run(lines: &[&str], secrets: &[&str]) -> (String, Session<MockClient>) {
    let mut app = AppController::with_io(
        Session::with_client(MockClient::default()),
        MockLineEditor::new(lines.iter().copied()),
        MockSecretReader::new(secrets.iter().copied()),
        Vec::new(),
    );
    app.run().expect("shell loop should finish");
    let output = String::from_utf8(app.output().clone()).expect("utf-8 output");
    let session = Session::with_client(app.session().client().clone());
    (output, session)
}

#[test]
fn full_session_should_send_configured_request() {
    let (output, session) = run(
        &[
            "baseurl http://api.test/v1",
            "set header Accept application/json",
            "setenv id 42",
            "login alice",
            "set setting print_request no",
            "set setting print_headers no",
            "post /users/$id {\"name\": \"alice smith\"}",
            "quit",
        ],
        &["wonderland"],
    );

    assert_eq!(output, "Response body:\nhello\nStatus Code: 200\n");

    let client = session.client();
    assert_eq!(client.requests.len(), 1);
    let request = &client.requests[0];
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "http://api.test/v1/users/42");
    assert_eq!(request.body.as_deref(), Some("{\"name\": \"alice smith\"}"));
    assert_eq!(
        request.headers,
        vec![("Accept".to_string(), "application/json".to_string())]
    );
    assert_eq!(
        client.auth,
        Some((
            "alice".to_string(),
            "wonderland".to_string(),
            "basic".to_string()
        ))
    );
}

#[test]
fn errors_should_not_end_the_session() {
    let (output, session) = run(
        &[
            "set header onlykey",
            "nonsense",
            "show cookies",
            "set header X-Foo bar",
        ],
        &[],
    );

    assert_eq!(
        output,
        "*** Invalid number of parameters for 'set'\n\
         *** Command not found: nonsense\n\
         *** Invalid type of variables: 'cookies'\n"
    );
    assert_eq!(session.headers().get("X-Foo"), Some(&"bar".to_string()));
}

#[test]
fn every_verb_should_reach_the_client() {
    let (_, session) = run(
        &[
            "baseurl http://api.test",
            "get /a",
            "post /b x=1",
            "put /c y=2",
            "delete /d",
        ],
        &[],
    );
    let methods: Vec<HttpMethod> = session
        .client()
        .requests
        .iter()
        .map(|r| r.method)
        .collect();
    assert_eq!(
        methods,
        vec![
            HttpMethod::Get,
            HttpMethod::Post,
            HttpMethod::Put,
            HttpMethod::Delete
        ]
    );
}

#[test]
fn show_settings_should_list_every_setting() {
    let (output, _) = run(
        &[
            "set setting print_status 0",
            "set setting auth_method basic",
            "show settings",
        ],
        &[],
    );
    assert_eq!(output, "auth_method: basic\nprint_status: 0\n");
}

#[test]
fn execute_line_should_signal_quit() {
    let mut client = MockClient::default();
    client.response = ResponseRecord {
        status: 201,
        headers: Vec::new(),
        body: String::new(),
    };
    let mut app = AppController::with_io(
        Session::with_client(client),
        MockLineEditor::default(),
        MockSecretReader::default(),
        Vec::new(),
    );

    assert_eq!(app.execute_line("set setting print_body no").unwrap(), Flow::Continue);
    assert_eq!(app.execute_line("EOF").unwrap(), Flow::Quit);
    assert_eq!(app.execute_line("quit").unwrap(), Flow::Quit);
}
