use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use carpool_data_management::DataManager;
use server::{config::Config, server_state::ServerState};
use serde_json::Value;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    state: Arc<ServerState>,
}

impl TestApp {
    async fn new() -> Self {
        let data_manager = DataManager::in_memory().await.unwrap();
        let state = Arc::new(ServerState::new(data_manager, Config::default()));
        Self {
            router: server::app(state.clone()),
            state,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn get(&self, uri: &str, session: Option<&str>) -> Response {
        let mut request = Request::get(uri);
        if let Some(session) = session {
            request = request.header(header::COOKIE, session);
        }
        self.send(request.body(Body::empty()).unwrap()).await
    }

    async fn post(&self, uri: &str, form: &str, session: Option<&str>) -> Response {
        let mut request = Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(session) = session {
            request = request.header(header::COOKIE, session);
        }
        self.send(request.body(Body::from(form.to_string())).unwrap()).await
    }

    /// Registers `name` and returns the session cookie pair to send back.
    async fn register(&self, name: &str) -> String {
        let form = format!("username={name}&email={name}%40example.com&password=pw-{name}&confirmation=pw-{name}");
        let response = self.post("/register", &form, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response)
    }

    async fn state_id(&self, name: &str) -> i64 {
        self.state.data_manager.get_states().await.unwrap()
            .into_iter()
            .find(|state| state.name == name)
            .unwrap()
            .state_id
    }

    /// Creates a Los Angeles to Reno trip and returns its id.
    async fn create_trip(&self, session: &str, seats: i64) -> i64 {
        let form = format!(
            "o_state={}&o_city=Los+Angeles&d_state={}&d_city=Reno&date_picker=2099-06-01&time_picker=08:30&est_time=480&car_size=medium&seats={seats}",
            self.state_id("California").await,
            self.state_id("Nevada").await,
        );
        let response = self.post("/trips/new", &form, Some(session)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let view = json(response).await;
        assert_eq!(view["view"], "success");

        self.state.data_manager.search_trips(&Default::default()).await.unwrap()[0].trip_id
    }
}

fn session_cookie(response: &Response) -> String {
    response.headers()
        .get(header::SET_COOKIE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .unwrap()
        .to_string()
}

async fn body(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn json(response: Response) -> Value {
    serde_json::from_str(&body(response).await).unwrap()
}

#[tokio::test]
async fn register_rejects_mismatched_passwords() {
    let app = TestApp::new().await;

    let response = app.post("/register", "username=ana&email=a%40b.c&password=one&confirmation=two", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let view = json(response).await;
    assert_eq!(view["view"], "register");
    assert_eq!(view["message"], "Passwords must match.");
    assert_eq!(app.state.data_manager.count_users().await.unwrap(), 0);
}

#[tokio::test]
async fn register_rejects_taken_username() {
    let app = TestApp::new().await;
    app.register("ana").await;

    let response = app.post("/register", "username=ana&email=x%40y.z&password=pw&confirmation=pw", None).await;

    let view = json(response).await;
    assert_eq!(view["message"], "Username already taken.");
    assert_eq!(app.state.data_manager.count_users().await.unwrap(), 1);
}

#[tokio::test]
async fn login_and_logout() {
    let app = TestApp::new().await;
    app.register("ana").await;

    let response = app.post("/login", "username=ana&password=wrong", None).await;
    assert_eq!(json(response).await["message"], "Invalid username and/or password.");

    let response = app.post("/login", "username=nobody&password=pw-ana", None).await;
    assert_eq!(json(response).await["message"], "Invalid username and/or password.");

    let response = app.post("/login", "username=ana&password=pw-ana", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
    let session = session_cookie(&response);

    let view = json(app.get("/", Some(&session)).await).await;
    assert_eq!(view["user"]["username"], "ana");

    let response = app.get("/logout", Some(&session)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let view = json(app.get("/", Some(&session)).await).await;
    assert!(view["user"].is_null());
}

#[tokio::test]
async fn protected_pages_redirect_to_login() {
    let app = TestApp::new().await;

    for uri in ["/messages", "/trips/mine", "/trips/new"] {
        let response = app.get(uri, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    let response = app.get("/messages", Some("carpool_session=forged")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn only_the_receiver_reads_a_message() {
    let app = TestApp::new().await;
    let ana = app.register("ana").await;
    let bob = app.register("bob").await;
    let bob_id = app.state.data_manager.find_user("bob").await.unwrap().unwrap().user_id;

    let response = app.post("/messages/send", &format!("content=see+you+at+8&receiver={bob_id}"), Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/messages");

    let view = json(app.get("/messages", Some(&bob)).await).await;
    assert_eq!(view["view"], "messages");
    assert_eq!(view["users"].as_array().unwrap().len(), 2);
    let message = &view["received_messages"][0];
    assert_eq!(message["content"], "see you at 8");
    assert_eq!(message["read"], false);
    let message_id = message["message_id"].as_i64().unwrap();

    let response = app.post(&format!("/messages/{message_id}/read"), "", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json(response).await["message"], "You cannot read someone else's message.");
    assert!(!app.state.data_manager.get_message(message_id).await.unwrap().read);

    let response = app.post(&format!("/messages/{message_id}/read"), "", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await, "true");
    assert!(app.state.data_manager.get_message(message_id).await.unwrap().read);

    let response = app.post("/messages/999/read", "", Some(&bob)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sending_needs_content_receiver_and_post() {
    let app = TestApp::new().await;
    let ana = app.register("ana").await;

    let response = app.post("/messages/send", "content=+&receiver=1", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post("/messages/send", "content=hello", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.post("/messages/send", "content=hello&receiver=404", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.get("/messages/send", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    let view = json(response).await;
    assert_eq!(view["view"], "error");
    assert_eq!(view["message"], "You cannot send messages with a get request");
}

#[tokio::test]
async fn seat_toggle_joins_leaves_and_stops_at_zero() {
    let app = TestApp::new().await;
    let dan = app.register("dan").await;
    let rita = app.register("rita").await;
    let lee = app.register("lee").await;
    let trip_id = app.create_trip(&dan, 1).await;
    let toggle = format!("/trips/{trip_id}/toggle-passenger");

    assert_eq!(body(app.get(&format!("/trips/{trip_id}/seats"), None).await).await, "1");

    let response = app.post(&toggle, "", Some(&rita)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body(response).await, "You have successfully registered for the trip.");
    assert_eq!(body(app.get(&format!("/trips/{trip_id}/seats"), None).await).await, "0");
    assert_eq!(body(app.get(&format!("/trips/{trip_id}/passengers"), None).await).await, "1");
    assert_eq!(json(app.get(&format!("/trips/{trip_id}"), Some(&lee)).await).await["is_full"], true);

    let response = app.post(&toggle, "", Some(&lee)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(body(response).await, "This trip has no seats available.");
    assert_eq!(body(app.get(&format!("/trips/{trip_id}/passengers"), None).await).await, "1");

    let response = app.post(&toggle, "", Some(&rita)).await;
    assert_eq!(body(response).await, "You have successfully unlisted from the trip.");
    assert_eq!(body(app.get(&format!("/trips/{trip_id}/seats"), None).await).await, "1");
    assert_eq!(json(app.get(&format!("/trips/{trip_id}"), None).await).await["is_full"], false);

    let response = app.post(&toggle, "", Some(&dan)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.post("/trips/999/toggle-passenger", "", Some(&rita)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn trip_detail_depends_on_who_asks() {
    let app = TestApp::new().await;
    let dan = app.register("dan").await;
    let rita = app.register("rita").await;
    let lee = app.register("lee").await;
    let trip_id = app.create_trip(&dan, 3).await;
    app.post(&format!("/trips/{trip_id}/toggle-passenger"), "", Some(&rita)).await;

    let uri = format!("/trips/{trip_id}");

    let view = json(app.get(&uri, Some(&dan)).await).await;
    assert_eq!(view["access"]["role"], "driver");
    assert_eq!(view["access"]["passengers"][0]["username"], "rita");
    assert_eq!(view["trip"]["available_seats"], 2);
    assert_eq!(view["is_full"], false);

    let view = json(app.get(&uri, Some(&rita)).await).await;
    assert_eq!(view["access"]["role"], "passenger");

    let view = json(app.get(&uri, Some(&lee)).await).await;
    assert_eq!(view["access"]["role"], "public");

    let view = json(app.get(&uri, None).await).await;
    assert_eq!(view["access"]["role"], "public");
    assert_eq!(view["trip"]["origin_city"], "Los Angeles");

    assert_eq!(app.get("/trips/999", None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_the_driver_deletes() {
    let app = TestApp::new().await;
    let dan = app.register("dan").await;
    let rita = app.register("rita").await;
    let trip_id = app.create_trip(&dan, 3).await;
    let delete = format!("/trips/{trip_id}/delete");

    let response = app.post(&delete, "", Some(&rita)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json(response).await["message"], "You cannot delete someone else's trip.");
    assert!(app.state.data_manager.get_trip(trip_id).await.is_ok());

    let response = app.post(&delete, "", Some(&dan)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["view"], "success");
    assert_eq!(app.get(&format!("/trips/{trip_id}"), None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_trip_rejects_unknown_cities_and_empty_cars() {
    let app = TestApp::new().await;
    let dan = app.register("dan").await;
    let california = app.state_id("California").await;

    let view = json(app.get("/trips/new", Some(&dan)).await).await;
    assert_eq!(view["view"], "create_trip");
    assert_eq!(view["states"].as_array().unwrap().len(), 50);

    // Reno is not in California.
    let form = format!(
        "o_state={california}&o_city=Fresno&d_state={california}&d_city=Reno&date_picker=2099-06-01&time_picker=08:30&est_time=60&car_size=small&seats=2"
    );
    let response = app.post("/trips/new", &form, Some(&dan)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let form = format!(
        "o_state={california}&o_city=Fresno&d_state={california}&d_city=San+Diego&date_picker=2099-06-01&time_picker=08:30&est_time=60&car_size=+&seats=2"
    );
    let response = app.post("/trips/new", &form, Some(&dan)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let form = format!(
        "o_state={california}&o_city=Fresno&d_state={california}&d_city=San+Diego&date_picker=2099-06-01&time_picker=08:30&est_time=60&car_size=small&seats=0"
    );
    let response = app.post("/trips/new", &form, Some(&dan)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.state.data_manager.search_trips(&Default::default()).await.unwrap().is_empty());
}

#[tokio::test]
async fn discovery_lists_search_and_user_trips() {
    let app = TestApp::new().await;
    let dan = app.register("dan").await;
    let rita = app.register("rita").await;
    let trip_id = app.create_trip(&dan, 3).await;
    app.post(&format!("/trips/{trip_id}/toggle-passenger"), "", Some(&rita)).await;

    let view = json(app.get("/trips", None).await).await;
    assert_eq!(view["view"], "trips");
    assert_eq!(view["states"].as_array().unwrap().len(), 50);
    assert_eq!(view["trips"][0]["trip_id"], trip_id);

    let view = json(app.get("/trips/search?o_state=california&o_city=&d_city=reno", None).await).await;
    assert_eq!(view["trips"].as_array().unwrap().len(), 1);
    assert!(view.get("states").is_none());

    let view = json(app.get("/trips/search?o_state=nevada", None).await).await;
    assert!(view["trips"].as_array().unwrap().is_empty());

    let view = json(app.get("/trips/mine", Some(&rita)).await).await;
    assert_eq!(view["p_trips"][0]["trip_id"], trip_id);
    assert!(view["d_trips"].as_array().unwrap().is_empty());

    let view = json(app.get("/trips/mine", Some(&dan)).await).await;
    assert_eq!(view["d_trips"][0]["trip_id"], trip_id);

    let view = json(app.get("/trips/full", None).await).await;
    assert_eq!(view["view"], "error");
}

#[tokio::test]
async fn cities_of_a_state() {
    let app = TestApp::new().await;
    let nevada = app.state_id("Nevada").await;

    let cities = json(app.get(&format!("/states/{nevada}/cities"), None).await).await;
    let names: Vec<_> = cities.as_array().unwrap().iter().map(|city| city["name"].as_str().unwrap().to_string()).collect();
    assert_eq!(names, vec!["Carson City", "Henderson", "Las Vegas", "Reno"]);

    assert_eq!(app.get("/states/999/cities", None).await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/nowhere", None).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn store_failure_while_resolving_a_session_is_a_server_error() {
    let app = TestApp::new().await;
    let ana = app.register("ana").await;

    app.state.data_manager.close().await;

    let response = app.get("/messages", Some(&ana)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(response).await["view"], "error");
}
