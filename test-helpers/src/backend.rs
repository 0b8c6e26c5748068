//! In-memory stand-in for the back-office REST backend.
//!
//! Routes are resolved generically from the path shape the console uses for
//! every resource:
//!
//! - `GET  {resource}/getAll..`          full collection
//! - `GET  {resource}/get..ById/{id}`    single record
//! - `GET  {resource}/{parent}/{id}`     records whose `{parent}Id` matches
//! - `GET  {resource}/media/{id}`        raw media bytes
//! - `POST {resource}/save..`            create, assigns an id
//! - `PUT  {resource}/update../{id}`     full replacement
//! - `DELETE {resource}/delete../{id}`   refused while referenced
//!
//! Every request except the health check is recorded, and must carry the
//! configured secret key.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::StatusCode;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use payloads::session::SECRET_KEY_HEADER;
use serde_json::{Value, json};

/// Message the backend answers a delete of a still-referenced record with.
pub const REFERENCED_MESSAGE: &str =
    "Cannot delete: referenced by existing records";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: Option<Value>,
}

impl RecordedRequest {
    pub fn is(&self, method: &str, path: &str) -> bool {
        self.method == method && self.path == path
    }
}

/// A one-shot answer that replaces normal handling for a method and path.
#[derive(Debug, Clone)]
struct Canned {
    status: u16,
    body: Value,
}

#[derive(Default)]
struct BackendState {
    collections: HashMap<String, BTreeMap<i64, Value>>,
    next_id: i64,
    requests: Vec<RecordedRequest>,
    canned: HashMap<(String, String), VecDeque<Canned>>,
    delays: HashMap<String, Duration>,
    enveloped: HashSet<String>,
    media: HashMap<i64, (Vec<u8>, String)>,
}

type Outcome = (u16, Value);

fn message(status: u16, text: impl Into<String>) -> Outcome {
    (status, json!({ "message": text.into() }))
}

/// The field holding a record's display name.
fn name_field(resource: &str) -> &str {
    match resource {
        "country" | "state" | "district" => resource,
        "branch" => "branchName",
        "project" => "projectName",
        _ => "name",
    }
}

/// The foreign key tying a record to its owner, if the resource has one.
fn parent_field(resource: &str) -> Option<&'static str> {
    match resource {
        "state" => Some("countryId"),
        "district" => Some("stateId"),
        "project" => Some("builderId"),
        _ => None,
    }
}

fn normalized_name(record: &Value, field: &str) -> Option<String> {
    record
        .get(field)
        .and_then(Value::as_str)
        .map(|name| name.trim().to_lowercase())
}

impl BackendState {
    fn collection(&mut self, resource: &str) -> &mut BTreeMap<i64, Value> {
        self.collections.entry(resource.to_string()).or_default()
    }

    fn insert(&mut self, resource: &str, mut record: Value) -> i64 {
        let id = match record.get("id").and_then(Value::as_i64) {
            Some(id) => id,
            None => self.next_id + 1,
        };
        self.next_id = self.next_id.max(id);
        record["id"] = json!(id);
        self.collection(resource).insert(id, record);
        id
    }

    fn duplicate_of(
        &mut self,
        resource: &str,
        candidate: &Value,
        except: Option<i64>,
    ) -> Option<String> {
        let field = name_field(resource);
        let name = normalized_name(candidate, field)?;
        let parent = parent_field(resource).map(|key| candidate.get(key).cloned());
        self.collection(resource)
            .iter()
            .filter(|(id, _)| Some(**id) != except)
            .find(|(_, existing)| {
                normalized_name(existing, field).as_deref() == Some(&name)
                    && parent.as_ref().is_none_or(|parent| {
                        existing.get(parent_field(resource).unwrap_or(""))
                            == parent.as_ref()
                    })
            })
            .map(|(_, existing)| {
                existing
                    .get(field)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string()
            })
    }

    fn is_referenced(&self, resource: &str, id: i64) -> bool {
        let key = format!("{resource}Id");
        self.collections.iter().any(|(child, records)| {
            parent_field(child) == Some(key.as_str())
                && records
                    .values()
                    .any(|record| record.get(&key).and_then(Value::as_i64) == Some(id))
        })
    }

    fn handle(&mut self, method: &str, path: &str, body: Option<Value>) -> Outcome {
        let segments: Vec<&str> = path.split('/').collect();
        match (method, segments.as_slice()) {
            ("GET", [resource, action]) if action.starts_with("getAll") => {
                let records = self.collection(resource).values().cloned().collect();
                (200, Value::Array(records))
            }
            ("GET", [resource, action, id]) if action.starts_with("get") => {
                let Ok(id) = id.parse::<i64>() else {
                    return message(400, "Invalid id");
                };
                match self.collection(resource).get(&id) {
                    Some(record) => (200, record.clone()),
                    None => message(404, format!("No {resource} with id {id}")),
                }
            }
            ("GET", [resource, parent, id]) => {
                let Ok(id) = id.parse::<i64>() else {
                    return message(400, "Invalid id");
                };
                let key = format!("{parent}Id");
                let records = self
                    .collection(resource)
                    .values()
                    .filter(|record| record.get(&key).and_then(Value::as_i64) == Some(id))
                    .cloned()
                    .collect();
                (200, Value::Array(records))
            }
            ("POST", [resource, action]) if action.starts_with("save") => {
                let Some(record @ Value::Object(_)) = body else {
                    return message(400, "Expected a JSON object");
                };
                if let Some(existing) = self.duplicate_of(resource, &record, None) {
                    return message(409, format!("{existing} already exists"));
                }
                let mut record = record;
                if let Some(map) = record.as_object_mut() {
                    map.remove("id");
                }
                let id = self.insert(resource, record);
                (200, self.collection(resource)[&id].clone())
            }
            ("PUT", [resource, action, id]) if action.starts_with("update") => {
                let Ok(id) = id.parse::<i64>() else {
                    return message(400, "Invalid id");
                };
                let Some(mut record @ Value::Object(_)) = body else {
                    return message(400, "Expected a JSON object");
                };
                if !self.collection(resource).contains_key(&id) {
                    return message(404, format!("No {resource} with id {id}"));
                }
                if let Some(existing) = self.duplicate_of(resource, &record, Some(id)) {
                    return message(409, format!("{existing} already exists"));
                }
                record["id"] = json!(id);
                self.collection(resource).insert(id, record.clone());
                (200, record)
            }
            ("DELETE", [resource, action, id]) if action.starts_with("delete") => {
                let Ok(id) = id.parse::<i64>() else {
                    return message(400, "Invalid id");
                };
                if self.is_referenced(resource, id) {
                    return message(409, REFERENCED_MESSAGE);
                }
                match self.collection(resource).remove(&id) {
                    Some(_) => message(200, "Deleted successfully"),
                    None => message(404, format!("No {resource} with id {id}")),
                }
            }
            _ => message(404, format!("No route for {method} {path}")),
        }
    }
}

/// Handle to a mock backend. Clones share state.
#[derive(Clone)]
pub struct MockBackend {
    state: Arc<Mutex<BackendState>>,
    secret_key: String,
    allowed_origins: Vec<String>,
}

impl MockBackend {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            state: Arc::default(),
            secret_key: secret_key.into(),
            allowed_origins: vec!["*".into()],
        }
    }

    /// Browser origins allowed to call the backend; `*` allows any.
    pub fn with_allowed_origins(mut self, origins: Vec<String>) -> Self {
        self.allowed_origins = origins;
        self
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, BackendState> {
        self.state.lock().unwrap()
    }

    /// Store a record directly, keeping its `id` if it has one. Returns the
    /// id.
    pub fn insert(&self, resource: &str, record: Value) -> i64 {
        self.lock().insert(resource, record)
    }

    pub fn records(&self, resource: &str) -> Vec<Value> {
        self.lock().collection(resource).values().cloned().collect()
    }

    /// Every request received since start-up or the last
    /// [`Self::clear_requests`].
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    /// Answer the next `method path` request with an error status and a
    /// `{ "message": .. }` body.
    pub fn fail_next(&self, method: &str, path: &str, status: u16, text: &str) {
        self.respond_next(method, path, status, json!({ "message": text }));
    }

    /// Answer the next `method path` request with an arbitrary body.
    pub fn respond_next(&self, method: &str, path: &str, status: u16, body: Value) {
        self.lock()
            .canned
            .entry((method.to_string(), path.trim_matches('/').to_string()))
            .or_default()
            .push_back(Canned { status, body });
    }

    /// Hold every request to `path` for `delay` before answering.
    pub fn set_delay(&self, path: &str, delay: Duration) {
        self.lock()
            .delays
            .insert(path.trim_matches('/').to_string(), delay);
    }

    /// Wrap successful responses for `resource` in a `{ "data": .. }`
    /// envelope.
    pub fn use_envelope(&self, resource: &str) {
        self.lock().enveloped.insert(resource.to_string());
    }

    pub fn put_media(&self, id: i64, bytes: Vec<u8>, content_type: &str) {
        self.lock().media.insert(id, (bytes, content_type.to_string()));
    }

    /// Bind the backend and build its server, without awaiting it. Returns
    /// the bound port, which is OS-assigned when `port` is 0.
    pub fn serve(&self, ip: &str, port: u16) -> std::io::Result<(Server, u16)> {
        let listener = TcpListener::bind(format!("{ip}:{port}"))?;
        let port = listener.local_addr()?.port();
        let data = web::Data::new(self.clone());
        let allowed_origins = self.allowed_origins.clone();
        let server = HttpServer::new(move || {
            let cors = if allowed_origins.iter().any(|origin| origin == "*") {
                Cors::default().allow_any_origin()
            } else {
                allowed_origins
                    .iter()
                    .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            }
            .allow_any_method()
            .allow_any_header();

            App::new()
                .wrap(cors)
                .app_data(data.clone())
                .default_service(web::to(dispatch))
        })
        .workers(1)
        .listen(listener)?
        .run();
        Ok((server, port))
    }
}

fn reply((status, body): Outcome) -> HttpResponse {
    HttpResponse::build(
        StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    )
    .json(body)
}

async fn dispatch(
    req: HttpRequest,
    body: web::Bytes,
    backend: web::Data<MockBackend>,
) -> HttpResponse {
    let method = req.method().as_str().to_string();
    let path = req.path().trim_matches('/').to_string();
    if path == "health_check" {
        return HttpResponse::Ok().body("healthy");
    }

    let body = serde_json::from_slice::<Value>(&body).ok();
    backend.lock().requests.push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        body: body.clone(),
    });

    let key = req
        .headers()
        .get(SECRET_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    if key != Some(backend.secret_key.as_str()) {
        return reply(message(401, "Invalid or missing secret key"));
    }

    let delay = backend.lock().delays.get(&path).copied();
    if let Some(delay) = delay {
        actix_web::rt::time::sleep(delay).await;
    }

    let mut state = backend.lock();
    if let Some(canned) = state
        .canned
        .get_mut(&(method.clone(), path.clone()))
        .and_then(VecDeque::pop_front)
    {
        return reply((canned.status, canned.body));
    }

    let segments: Vec<&str> = path.split('/').collect();
    if let ("GET", [_, "media", id]) = (method.as_str(), segments.as_slice()) {
        return match id.parse::<i64>().ok().and_then(|id| state.media.get(&id)) {
            Some((bytes, content_type)) => HttpResponse::Ok()
                .content_type(content_type.as_str())
                .body(bytes.clone()),
            None => reply(message(404, "No such media")),
        };
    }

    let (status, payload) = state.handle(&method, &path, body);
    let enveloped = segments
        .first()
        .is_some_and(|resource| state.enveloped.contains(*resource));
    if enveloped && (200..300).contains(&status) {
        reply((status, json!({ "data": payload })))
    } else {
        reply((status, payload))
    }
}
