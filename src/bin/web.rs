//! Single binary web server: HTML from templates/, static from /static, API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_files::Files;
use actix_web::{
    delete, get, post, put,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rotation_planner_web::{
    bench_players, clear_entry, continue_setup, interval_windows, lineup_positions,
    manual_substitution, next_half, pause_clock, planned_substitutions, player_stats, reset_game,
    select_interval, select_step, set_half_length_input, set_incoming, set_outgoing,
    set_substitution_interval_input, start_clock, start_game, tick, toggle_clock, GameConfig, Half,
    PlayerId, Position, Session, SessionError, SessionId, SetupStep,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-session entry: session data + last activity time (for auto-cleanup).
struct SessionEntry {
    session: Session,
    last_activity: Instant,
}

/// In-memory state: many sessions by ID. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<SessionId, SessionEntry>>>;

/// Inactivity threshold: sessions not accessed for this long are removed.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Cadence of the live game clock.
const TICK_PERIOD: Duration = Duration::from_secs(1);

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

/// Raw form values; unusable input falls back to the defaults.
#[derive(Deserialize, Default)]
struct ConfigBody {
    /// Half length in whole minutes.
    half_length: Option<String>,
    /// Substitution interval in minutes (decimals allowed).
    substitution_interval: Option<String>,
}

#[derive(Deserialize)]
struct NameBody {
    name: String,
}

#[derive(Deserialize)]
struct StepBody {
    step: SetupStep,
}

#[derive(Deserialize)]
struct PlanSlotBody {
    half: Half,
    interval: usize,
    position: Position,
    /// Null clears that side of the entry.
    #[serde(default)]
    player_id: Option<PlayerId>,
}

#[derive(Deserialize)]
struct ClearSlotBody {
    half: Half,
    interval: usize,
    position: Position,
}

#[derive(Deserialize)]
struct ManualSubBody {
    player_out: String,
    player_in: String,
}

#[derive(Deserialize)]
struct IntervalBody {
    index: usize,
}

/// Path segment: session id (e.g. /api/sessions/{id})
#[derive(Deserialize)]
struct SessionPath {
    id: SessionId,
}

/// Path segments: session id and player id (e.g. /api/sessions/{id}/players/{player_id})
#[derive(Deserialize)]
struct SessionPlayerPath {
    id: SessionId,
    player_id: PlayerId,
}

/// Path segments: session id and role label.
#[derive(Deserialize)]
struct SessionRolePath {
    id: SessionId,
    role: String,
}

/// Path segments: session id, player id and role label.
#[derive(Deserialize)]
struct SessionPlayerRolePath {
    id: SessionId,
    player_id: PlayerId,
    role: String,
}

/// Run `op` against the session under the write lock and answer with the updated session.
/// Unknown ids are 404, session errors 400.
fn mutate_session<F>(state: &AppState, id: SessionId, op: F) -> HttpResponse
where
    F: FnOnce(&mut Session) -> Result<(), SessionError>,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    };
    entry.last_activity = Instant::now();
    let s = &mut entry.session;
    match op(s) {
        Ok(()) => HttpResponse::Ok().json(&*s),
        Err(e) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
    }
}

/// Build a read-only view of the session as JSON.
fn view_session<F>(state: &AppState, id: SessionId, view: F) -> HttpResponse
where
    F: FnOnce(&Session) -> serde_json::Value,
{
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(view(&entry.session))
        }
        None => HttpResponse::NotFound().json(serde_json::json!({ "error": "No session" })),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "rotation-planner-web",
    })
}

/// Avoid 404 in browser tab: favicon not required for app logic.
#[get("/favicon.ico")]
async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

/// Create a new session (returns it with id; client stores id for subsequent requests).
#[post("/api/sessions")]
async fn api_create_session(state: AppState, body: Option<Json<ConfigBody>>) -> HttpResponse {
    let body = body.map(Json::into_inner).unwrap_or_default();
    let config = GameConfig {
        half_length_minutes: body
            .half_length
            .as_deref()
            .map(GameConfig::parse_half_length_minutes)
            .unwrap_or(rotation_planner_web::DEFAULT_HALF_LENGTH_MINUTES),
        substitution_interval_secs: body
            .substitution_interval
            .as_deref()
            .map(GameConfig::parse_substitution_interval_secs)
            .unwrap_or(rotation_planner_web::DEFAULT_SUBSTITUTION_INTERVAL_SECS),
    };
    let session = Session::new(config);
    let id = session.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("Created session {}", id);
    let entry = g.entry(id).or_insert(SessionEntry {
        session,
        last_activity: Instant::now(),
    });
    HttpResponse::Ok().json(&entry.session)
}

/// Get a session by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/sessions/{id}")]
async fn api_get_session(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    view_session(&state, path.id, |s| serde_json::json!(s))
}

/// Add a player (Setup only). Blank names and a full roster are ignored.
#[post("/api/sessions/{id}/players")]
async fn api_add_player(state: AppState, path: Path<SessionPath>, body: Json<NameBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| s.add_player(body.name.as_str()).map(|_| ()))
}

/// Remove a player by id (Setup only).
#[delete("/api/sessions/{id}/players/{player_id}")]
async fn api_remove_player(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    mutate_session(&state, path.id, |s| s.remove_player(path.player_id))
}

/// Add a role label (Setup only). Blank and duplicate labels are ignored.
#[post("/api/sessions/{id}/roles")]
async fn api_add_role(state: AppState, path: Path<SessionPath>, body: Json<NameBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| s.add_role(body.name.as_str()).map(|_| ()))
}

/// Remove a role label from the session and from every player.
#[delete("/api/sessions/{id}/roles/{role}")]
async fn api_remove_role(state: AppState, path: Path<SessionRolePath>) -> HttpResponse {
    mutate_session(&state, path.id, |s| s.remove_role(&path.role))
}

/// Toggle a role on a player.
#[post("/api/sessions/{id}/players/{player_id}/roles/{role}/toggle")]
async fn api_toggle_player_role(state: AppState, path: Path<SessionPlayerRolePath>) -> HttpResponse {
    mutate_session(&state, path.id, |s| s.toggle_player_role(path.player_id, &path.role))
}

/// Select or deselect a starter.
#[post("/api/sessions/{id}/lineup/{player_id}/toggle")]
async fn api_toggle_starting(state: AppState, path: Path<SessionPlayerPath>) -> HttpResponse {
    mutate_session(&state, path.id, |s| s.toggle_starting(path.player_id))
}

/// Update half length and/or substitution interval from form values (Setup only).
#[put("/api/sessions/{id}/config")]
async fn api_set_config(state: AppState, path: Path<SessionPath>, body: Json<ConfigBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| {
        if let Some(input) = body.half_length.as_deref() {
            set_half_length_input(s, input)?;
        }
        if let Some(input) = body.substitution_interval.as_deref() {
            set_substitution_interval_input(s, input)?;
        }
        Ok(())
    })
}

/// Jump to a setup step.
#[put("/api/sessions/{id}/step")]
async fn api_select_step(state: AppState, path: Path<SessionPath>, body: Json<StepBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| select_step(s, body.step))
}

/// Continue to the next setup step (gated on roster / lineup size).
#[post("/api/sessions/{id}/step/continue")]
async fn api_continue_setup(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, |s| continue_setup(s).map(|_| ()))
}

/// Set the outgoing player of a planned substitution.
#[put("/api/sessions/{id}/plan/outgoing")]
async fn api_plan_outgoing(state: AppState, path: Path<SessionPath>, body: Json<PlanSlotBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| {
        set_outgoing(s, body.half, body.interval, body.position, body.player_id)
    })
}

/// Set the incoming player of a planned substitution.
#[put("/api/sessions/{id}/plan/incoming")]
async fn api_plan_incoming(state: AppState, path: Path<SessionPath>, body: Json<PlanSlotBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| {
        set_incoming(s, body.half, body.interval, body.position, body.player_id)
    })
}

/// Remove a planned substitution.
#[post("/api/sessions/{id}/plan/clear")]
async fn api_plan_clear(state: AppState, path: Path<SessionPath>, body: Json<ClearSlotBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| clear_entry(s, body.half, body.interval, body.position))
}

/// Start the live game (Setup -> Live). The clock starts paused.
#[post("/api/sessions/{id}/start")]
async fn api_start_game(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, start_game)
}

#[post("/api/sessions/{id}/clock/start")]
async fn api_start_clock(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, start_clock)
}

#[post("/api/sessions/{id}/clock/pause")]
async fn api_pause_clock(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, pause_clock)
}

#[post("/api/sessions/{id}/clock/toggle")]
async fn api_toggle_clock(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, |s| toggle_clock(s).map(|_| ()))
}

/// Point the live clock at another interval.
#[put("/api/sessions/{id}/interval")]
async fn api_select_interval(state: AppState, path: Path<SessionPath>, body: Json<IntervalBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| select_interval(s, body.index))
}

/// Move to the second half (clock pauses).
#[post("/api/sessions/{id}/next-half")]
async fn api_next_half(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, next_half)
}

/// Reset the live game back to setup; play time is cleared.
#[post("/api/sessions/{id}/reset")]
async fn api_reset_game(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    mutate_session(&state, path.id, reset_game)
}

/// Manual substitution by player names. Unknown names leave the session unchanged.
#[post("/api/sessions/{id}/substitution")]
async fn api_manual_substitution(state: AppState, path: Path<SessionPath>, body: Json<ManualSubBody>) -> HttpResponse {
    mutate_session(&state, path.id, |s| {
        manual_substitution(s, &body.player_out, &body.player_in).map(|_| ())
    })
}

#[get("/api/sessions/{id}/bench")]
async fn api_bench(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    view_session(&state, path.id, |s| serde_json::json!(bench_players(s)))
}

/// Players sorted by play time, most first.
#[get("/api/sessions/{id}/stats")]
async fn api_stats(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    view_session(&state, path.id, |s| serde_json::json!(player_stats(s)))
}

/// Position each selected starter would take.
#[get("/api/sessions/{id}/lineup")]
async fn api_lineup(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    view_session(&state, path.id, |s| {
        let lineup: Vec<_> = lineup_positions(s)
            .into_iter()
            .map(|(position, player)| serde_json::json!({ "position": position, "player": player }))
            .collect();
        serde_json::json!(lineup)
    })
}

/// Interval time windows for the configured half.
#[get("/api/sessions/{id}/intervals")]
async fn api_intervals(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    view_session(&state, path.id, |s| serde_json::json!(interval_windows(&s.config)))
}

/// Planned swaps for the interval the live clock points at.
#[get("/api/sessions/{id}/planned")]
async fn api_planned(state: AppState, path: Path<SessionPath>) -> HttpResponse {
    view_session(&state, path.id, |s| serde_json::json!(planned_substitutions(s)))
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(HashMap::<SessionId, SessionEntry>::new()));

    // Game clock: one tick per second for every running live session
    let state_clock = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(TICK_PERIOD);
        loop {
            interval.tick().await;
            let mut g = match state_clock.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            for entry in g.values_mut() {
                // A running game counts as activity, so it is never evicted mid-game
                if entry.session.is_clock_running() {
                    entry.last_activity = Instant::now();
                }
                tick(&mut entry.session);
            }
        }
    });

    // Background task: every 30 minutes, remove sessions inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive session(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .route("/", web::get().to(serve_index_async))
            .service(api_health)
            .service(favicon)
            .service(api_create_session)
            .service(api_get_session)
            .service(api_add_player)
            .service(api_remove_player)
            .service(api_add_role)
            .service(api_remove_role)
            .service(api_toggle_player_role)
            .service(api_toggle_starting)
            .service(api_set_config)
            .service(api_select_step)
            .service(api_continue_setup)
            .service(api_plan_outgoing)
            .service(api_plan_incoming)
            .service(api_plan_clear)
            .service(api_start_game)
            .service(api_start_clock)
            .service(api_pause_clock)
            .service(api_toggle_clock)
            .service(api_select_interval)
            .service(api_next_half)
            .service(api_reset_game)
            .service(api_manual_substitution)
            .service(api_bench)
            .service(api_stats)
            .service(api_lineup)
            .service(api_intervals)
            .service(api_planned)
            .service(Files::new("/static", "static"))
    })
    .bind(bind)?
    .run()
    .await
}

async fn serve_index_async() -> HttpResponse {
    let html = include_str!("../../templates/index.html");
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
