//! Action handlers driven against a scripted in-memory transport.
//!
//! Each test queues the responses the "server" will give, dispatches
//! actions, then checks both the requests that went out and the resulting
//! form, status line and results table.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use recommendation_core::{
    Action, Controller, Field, HttpMethod, HttpRequest, HttpResponse, Outcome, Recommendation,
    RecommendationClient, Transport, TransportError,
};
use tokio::sync::oneshot;
use tokio::task::JoinSet;

#[derive(Clone, Default)]
struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Result<HttpResponse, TransportError>>>>,
    sent: Arc<Mutex<Vec<HttpRequest>>>,
}

impl ScriptedTransport {
    fn reply(&self, status: u16, body: &str) {
        self.replies.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }));
    }

    fn fail(&self, reason: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(TransportError(reason.to_string())));
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.sent.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left")
    }
}

fn controller() -> (Controller<ScriptedTransport>, ScriptedTransport) {
    let transport = ScriptedTransport::default();
    let controller = Controller::new(RecommendationClient::new(""), transport.clone());
    (controller, transport)
}

fn fill(controller: &mut Controller<ScriptedTransport>, values: [(Field, &str); 5]) {
    for (field, value) in values {
        controller.form_mut().set(field, value);
    }
}

fn rec(id: &str, product_a: &str, likes: &str) -> Recommendation {
    Recommendation {
        id: id.to_string(),
        product_a: product_a.to_string(),
        product_b: "B".to_string(),
        recom_type: "up-sell".to_string(),
        likes: likes.to_string(),
    }
}

fn body_of(request: &HttpRequest) -> serde_json::Value {
    serde_json::from_str(request.body.as_deref().unwrap()).unwrap()
}

const ENTITY_7: &str = r#"{"id":7,"product_a":"A","product_b":"B","recom_type":"up-sell","likes":3}"#;
const NOT_FOUND_7: &str =
    r#"{"status":404,"error":"Not Found","message":"Recommendation with id '7' was not found."}"#;

#[tokio::test]
async fn create_sends_numeric_likes_and_populates_from_reply() {
    let (mut c, transport) = controller();
    fill(
        &mut c,
        [
            (Field::Id, ""),
            (Field::ProductA, "A"),
            (Field::ProductB, "B"),
            (Field::RecomType, "up-sell"),
            (Field::Likes, "3"),
        ],
    );
    transport.reply(201, ENTITY_7);

    c.dispatch(Action::Create).await;

    let sent = transport.sent();
    assert_eq!(sent[0].method, HttpMethod::Post);
    assert_eq!(sent[0].path, "/recommendations");
    assert_eq!(
        body_of(&sent[0]),
        serde_json::json!({"product_a":"A","product_b":"B","recom_type":"up-sell","likes":3})
    );
    assert_eq!(c.view().form.read(), rec("7", "A", "3"));
    assert_eq!(c.view().status.message(), "Success");
}

// Only create coerces likes; update and like pass the raw text through.
#[tokio::test]
async fn update_and_like_send_likes_unchanged() {
    let (mut c, transport) = controller();
    fill(
        &mut c,
        [
            (Field::Id, "7"),
            (Field::ProductA, "A"),
            (Field::ProductB, "B"),
            (Field::RecomType, "up-sell"),
            (Field::Likes, "3"),
        ],
    );
    transport.reply(200, ENTITY_7);
    transport.reply(200, ENTITY_7);

    c.dispatch(Action::Update).await;
    c.dispatch(Action::Like).await;

    let sent = transport.sent();
    assert_eq!(sent[0].method, HttpMethod::Put);
    assert_eq!(sent[0].path, "/recommendations/7");
    assert_eq!(body_of(&sent[0])["likes"], "3");
    assert_eq!(sent[1].method, HttpMethod::Put);
    assert_eq!(sent[1].path, "/recommendations/7/likes");
    assert_eq!(body_of(&sent[1])["likes"], "3");
}

#[tokio::test]
async fn update_failure_shows_server_message_and_keeps_form() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));
    transport.reply(404, NOT_FOUND_7);

    c.dispatch(Action::Update).await;

    assert_eq!(c.view().form.read(), rec("7", "A", "3"));
    assert_eq!(
        c.view().status.message(),
        "Recommendation with id '7' was not found."
    );
}

#[tokio::test]
async fn retrieve_success_overwrites_every_slot() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "stale", "99"));
    transport.reply(200, r#"{"id":7,"product_a":"A"}"#);

    c.dispatch(Action::Retrieve).await;

    assert_eq!(transport.sent()[0].path, "/recommendations/7");
    assert_eq!(transport.sent()[0].method, HttpMethod::Get);
    let form = c.view().form.read();
    assert_eq!(form.id, "7");
    assert_eq!(form.product_a, "A");
    assert_eq!(form.product_b, "");
    assert_eq!(form.likes, "");
    assert_eq!(c.view().status.message(), "Success");
}

#[tokio::test]
async fn retrieve_failure_clears_form() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));
    transport.reply(404, NOT_FOUND_7);

    c.dispatch(Action::Retrieve).await;

    assert_eq!(c.view().form.read(), Recommendation::default());
    assert_eq!(
        c.view().status.message(),
        "Recommendation with id '7' was not found."
    );
}

#[tokio::test]
async fn delete_success_clears_form_with_fixed_message() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));
    transport.reply(204, "");

    c.dispatch(Action::Delete).await;

    assert_eq!(transport.sent()[0].method, HttpMethod::Delete);
    assert_eq!(transport.sent()[0].path, "/recommendations/7");
    assert_eq!(c.view().form.read(), Recommendation::default());
    assert_eq!(c.view().status.message(), "Recommendation has been Deleted!");
}

// The server's own message is deliberately discarded on a failed delete.
#[tokio::test]
async fn delete_failure_always_shows_generic_message() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));
    transport.reply(404, NOT_FOUND_7);
    transport.fail("connection reset");

    c.dispatch(Action::Delete).await;
    assert_eq!(c.view().status.message(), "Server error!");
    assert_eq!(c.view().form.read(), rec("7", "A", "3"));

    c.dispatch(Action::Delete).await;
    assert_eq!(c.view().status.message(), "Server error!");
}

#[tokio::test]
async fn clear_resets_form_without_request() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));

    c.dispatch(Action::Clear).await;

    assert!(transport.sent().is_empty());
    assert_eq!(c.view().form.read(), Recommendation::default());
}

#[tokio::test]
async fn search_renders_table_and_mirrors_first_row() {
    let (mut c, transport) = controller();
    fill(
        &mut c,
        [
            (Field::Id, ""),
            (Field::ProductA, "widget"),
            (Field::ProductB, ""),
            (Field::RecomType, ""),
            (Field::Likes, "5"),
        ],
    );
    transport.reply(
        200,
        r#"[{"id":2,"product_a":"widget","product_b":"B","recom_type":"up-sell","likes":5},
            {"id":1,"product_a":"widget","product_b":"B","recom_type":"up-sell","likes":5}]"#,
    );

    c.dispatch(Action::Search).await;

    assert_eq!(transport.sent()[0].path, "/recommendations?product_a=widget&likes=5");
    let results = c.view().results.as_ref().unwrap();
    assert_eq!(results.rows().len(), 2);
    assert_eq!(results.rows()[0].id, "2");
    assert_eq!(c.view().form.read(), rec("2", "widget", "5"));
    assert_eq!(c.view().status.message(), "Success");
    assert!(results.to_html().contains("<td>2</td><td>widget</td>"));
}

#[tokio::test]
async fn empty_search_leaves_form_unchanged() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "nothing-matches", "3"));
    transport.reply(200, "[]");

    c.dispatch(Action::Search).await;

    let results = c.view().results.as_ref().unwrap();
    assert!(results.is_empty());
    assert!(!results.to_html().contains("<td>"));
    assert_eq!(c.view().form.read(), rec("7", "nothing-matches", "3"));
    assert_eq!(c.view().status.message(), "Success");
}

#[tokio::test]
async fn malformed_error_payload_stays_visible() {
    let (mut c, transport) = controller();
    transport.reply(500, "<html>oops</html>");

    c.dispatch(Action::Search).await;

    assert_eq!(c.view().status.message(), "HTTP 500: <html>oops</html>");
}

#[tokio::test]
async fn transport_failure_still_sets_a_message() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));
    transport.fail("connection refused");

    c.dispatch(Action::Update).await;

    assert_eq!(
        c.view().status.message(),
        "transport failure: connection refused"
    );
    assert_eq!(c.view().form.read(), rec("7", "A", "3"));
}

#[tokio::test]
async fn every_outcome_replaces_the_previous_message() {
    let (mut c, transport) = controller();
    c.form_mut().populate(&rec("7", "A", "3"));
    transport.reply(200, ENTITY_7);
    transport.reply(500, "");

    c.dispatch(Action::Retrieve).await;
    assert_eq!(c.view().status.message(), "Success");
    c.dispatch(Action::Delete).await;
    assert_eq!(c.view().status.message(), "Server error!");
}

/// Holds each reply until the test releases it, keyed by request method.
#[derive(Default)]
struct GatedTransport {
    gates: Mutex<HashMap<&'static str, oneshot::Receiver<HttpResponse>>>,
}

impl GatedTransport {
    fn gate(&self, method: HttpMethod) -> oneshot::Sender<HttpResponse> {
        let (tx, rx) = oneshot::channel();
        self.gates.lock().unwrap().insert(method.as_str(), rx);
        tx
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let gate = self.gates.lock().unwrap().remove(request.method.as_str());
        match gate {
            Some(rx) => rx
                .await
                .map_err(|_| TransportError("reply dropped".to_string())),
            None => Err(TransportError(format!("no gate for {}", request.method))),
        }
    }
}

fn response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        headers: Vec::new(),
        body: body.to_string(),
    }
}

// Overlapping requests are not ordered: the outcome that completes last wins,
// even when it belongs to the request issued first.
#[tokio::test]
async fn last_completion_wins() {
    let transport = GatedTransport::default();
    let update_reply = transport.gate(HttpMethod::Put);
    let delete_reply = transport.gate(HttpMethod::Delete);
    let mut c = Controller::new(RecommendationClient::new(""), transport);
    c.form_mut().populate(&rec("7", "A", "3"));

    let update = c.prepare(Action::Update).unwrap();
    let delete = c.prepare(Action::Delete).unwrap();
    assert_eq!(update.request().unwrap().method, HttpMethod::Put);
    assert_eq!(delete.request().unwrap().method, HttpMethod::Delete);

    let mut in_flight = JoinSet::new();
    in_flight.spawn(update.send());
    in_flight.spawn(delete.send());

    // The delete, issued second, completes first.
    delete_reply.send(response(204, "")).unwrap();
    let outcome = in_flight.join_next().await.unwrap().unwrap();
    assert!(matches!(outcome, Outcome::Deleted(Ok(()))));
    c.apply(outcome);
    assert_eq!(c.view().form.read(), Recommendation::default());
    assert_eq!(c.view().status.message(), "Recommendation has been Deleted!");

    // The stale update then lands on top of it.
    update_reply
        .send(response(
            200,
            r#"{"id":7,"product_a":"updated","product_b":"B","recom_type":"up-sell","likes":3}"#,
        ))
        .unwrap();
    let outcome = in_flight.join_next().await.unwrap().unwrap();
    c.apply(outcome);

    assert!(in_flight.is_empty());
    assert_eq!(c.view().form.read(), rec("7", "updated", "3"));
    assert_eq!(c.view().status.message(), "Success");
}
