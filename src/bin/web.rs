//! Single binary web server: JSON API over the simulator, gated by an operator login.
//! Run with: cargo run --bin web
//! Configuration comes from the environment (HOST, PORT, DATA_DIR, OPERATOR_USERNAME,
//! OPERATOR_PASSWORD_SHA256, RUN_INACTIVITY_HOURS); see `volley_finals_sim::config`.

use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{
    cookie::Key,
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use volley_finals_sim::logic::{group_standings, parse_result_code};
use volley_finals_sim::{
    add_match_result, compute_avulsa_and_bracket, load_standings, reset_group,
    select_bracket_winner, update_team_counter, Config, Counter, CsvDirSource, FallbackSource,
    Group, JsonDirSource, Run, RunError, RunId, SlotId,
};

/// Session key holding the logged-in operator's username.
const OPERATOR_KEY: &str = "operator";

/// Per-run entry: run data + last activity time (for auto-cleanup).
struct RunEntry {
    run: Run,
    last_activity: Instant,
}

/// In-memory state: many runs by ID. Entries are removed after the configured inactivity.
type AppState = Data<RwLock<HashMap<RunId, RunEntry>>>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct LoginBody {
    username: String,
    password: String,
}

#[derive(Deserialize)]
struct UpdateCounterBody {
    counter: String,
    value: u32,
}

#[derive(Deserialize)]
struct AddMatchBody {
    home_team_id: String,
    away_team_id: String,
    result: String,
}

#[derive(Deserialize)]
struct SelectWinnerBody {
    match_id: String,
    winner_id: String,
}

/// Path segment: run id (e.g. /api/runs/{id})
#[derive(Deserialize)]
struct RunPath {
    id: RunId,
}

/// Path segments: run id and team id (e.g. /api/runs/{id}/teams/{team_id}/counters)
#[derive(Deserialize)]
struct RunTeamPath {
    id: RunId,
    team_id: String,
}

/// Path segments: run id and group letter (e.g. /api/runs/{id}/groups/{group}/reset)
#[derive(Deserialize)]
struct RunGroupPath {
    id: RunId,
    group: String,
}

fn error_response(e: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No run" }))
}

/// 401 unless the session belongs to a logged-in operator.
fn require_operator(session: &Session) -> Result<(), HttpResponse> {
    match session.get::<String>(OPERATOR_KEY) {
        Ok(Some(_)) => Ok(()),
        _ => Err(HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Login required" }))),
    }
}

/// Apply `op` to the run with `id` under the write lock and answer with the updated run.
fn with_run<F>(state: &AppState, id: RunId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Run) -> Result<(), RunError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return not_found(),
    };
    entry.last_activity = Instant::now();
    match op(&mut entry.run) {
        Ok(()) => HttpResponse::Ok().json(&entry.run),
        Err(e) => error_response(e),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "volley-finals-sim",
    })
}

#[post("/api/login")]
async fn api_login(config: Data<Config>, session: Session, body: Json<LoginBody>) -> HttpResponse {
    if !config.check_credentials(body.username.trim(), &body.password) {
        log::warn!("Rejected login for '{}'", body.username.trim());
        return HttpResponse::Unauthorized()
            .json(serde_json::json!({ "error": "Invalid credentials" }));
    }
    session.renew();
    if session.insert(OPERATOR_KEY, body.username.trim()).is_err() {
        return HttpResponse::InternalServerError().body("session error");
    }
    log::info!("Operator '{}' logged in", body.username.trim());
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

#[post("/api/logout")]
async fn api_logout(session: Session) -> HttpResponse {
    session.purge();
    HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
}

/// Create a new, empty run (client stores its id for subsequent requests).
#[post("/api/runs")]
async fn api_create_run(
    state: AppState,
    config: Data<Config>,
    session: Session,
) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let run = Run::new().with_playoff_dates(config.playoff_dates.clone());
    let id = run.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let response = HttpResponse::Ok().json(&run);
    g.insert(
        id,
        RunEntry {
            run,
            last_activity: Instant::now(),
        },
    );
    response
}

/// Get a run by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/runs/{id}")]
async fn api_get_run(state: AppState, session: Session, path: Path<RunPath>) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    with_run(&state, path.id, |_| Ok(()))
}

#[delete("/api/runs/{id}")]
async fn api_delete_run(state: AppState, session: Session, path: Path<RunPath>) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.remove(&path.id) {
        Some(_) => HttpResponse::NoContent().finish(),
        None => not_found(),
    }
}

/// Load all groups from the data directory (JSON first, CSV as fallback).
#[post("/api/runs/{id}/load")]
async fn api_load(
    state: AppState,
    config: Data<Config>,
    session: Session,
    path: Path<RunPath>,
) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let source = FallbackSource::new()
        .then(JsonDirSource::new(&config.data_dir))
        .then(CsvDirSource::new(&config.data_dir));
    with_run(&state, path.id, |run| load_standings(run, &source))
}

/// Each group's table in ranking order.
#[get("/api/runs/{id}/standings")]
async fn api_standings(state: AppState, session: Session, path: Path<RunPath>) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(group_standings(&entry.run.teams)),
        None => not_found(),
    }
}

/// Edit one raw counter of a team.
#[put("/api/runs/{id}/teams/{team_id}/counters")]
async fn api_update_counter(
    state: AppState,
    session: Session,
    path: Path<RunTeamPath>,
    body: Json<UpdateCounterBody>,
) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let counter: Counter = match body.counter.parse() {
        Ok(c) => c,
        Err(name) => return error_response(RunError::UnknownCounter(name)),
    };
    with_run(&state, path.id, |run| {
        update_team_counter(run, &path.team_id, counter, body.value)
    })
}

/// Simulate a match between two teams of the same group.
#[post("/api/runs/{id}/matches")]
async fn api_add_match(
    state: AppState,
    session: Session,
    path: Path<RunPath>,
    body: Json<AddMatchBody>,
) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let result = match parse_result_code(&body.result) {
        Ok(r) => r,
        Err(e) => return error_response(e),
    };
    with_run(&state, path.id, |run| {
        add_match_result(run, &body.home_team_id, &body.away_team_id, result)
    })
}

/// Restore one group to its loaded values.
#[post("/api/runs/{id}/groups/{group}/reset")]
async fn api_reset_group(
    state: AppState,
    session: Session,
    path: Path<RunGroupPath>,
) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let group: Group = match path.group.parse() {
        Ok(g) => g,
        Err(name) => return error_response(RunError::UnknownGroup(name)),
    };
    with_run(&state, path.id, |run| reset_group(run, group))
}

/// Compute avulsa ranking and bracket from the current standings.
#[post("/api/runs/{id}/compute")]
async fn api_compute(state: AppState, session: Session, path: Path<RunPath>) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    with_run(&state, path.id, compute_avulsa_and_bracket)
}

/// Pick the winner of one bracket slot.
#[put("/api/runs/{id}/bracket/winner")]
async fn api_select_winner(
    state: AppState,
    session: Session,
    path: Path<RunPath>,
    body: Json<SelectWinnerBody>,
) -> HttpResponse {
    if let Err(resp) = require_operator(&session) {
        return resp;
    }
    let slot: SlotId = match body.match_id.parse() {
        Ok(s) => s,
        Err(code) => return error_response(RunError::UnknownSlot(code)),
    };
    with_run(&state, path.id, |run| {
        select_bracket_winner(run, slot, &body.winner_id)
    })
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    if config.operator_password_sha256.is_none() {
        log::warn!("OPERATOR_PASSWORD_SHA256 is not set; operator login is disabled");
    }
    let bind = (config.host.clone(), config.port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Standings data directory: {}", config.data_dir.display());

    let inactivity = config.run_inactivity;
    let config = Data::new(config);
    let state = Data::new(RwLock::new(HashMap::<RunId, RunEntry>::new()));
    let session_key = Key::generate();

    // Background task: every 30 minutes, remove runs inactive for longer than configured
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < inactivity);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive run(s)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .wrap(SessionMiddleware::new(
                CookieSessionStore::default(),
                session_key.clone(),
            ))
            .app_data(state.clone())
            .app_data(config.clone())
            .service(api_health)
            .service(api_login)
            .service(api_logout)
            .service(api_create_run)
            .service(api_get_run)
            .service(api_delete_run)
            .service(api_load)
            .service(api_standings)
            .service(api_update_counter)
            .service(api_add_match)
            .service(api_reset_group)
            .service(api_compute)
            .service(api_select_winner)
    })
    .bind(bind)?
    .run()
    .await
}
