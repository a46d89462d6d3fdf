use std::env;
use std::path::PathBuf;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use rs_ebooks_core::io::{list_corpora, normalize_folder};
use rs_ebooks_core::model::generation_input::DEFAULT_LIMIT;
use rs_ebooks_core::{CorpusModel, EbooksError, EnglishText, GenerationInput};

/// Server settings, read from the environment.
///
/// - `EBOOKS_HOST` (default `127.0.0.1`)
/// - `EBOOKS_PORT` (default `5000`)
/// - `EBOOKS_DATA_DIR` (default `./data`)
#[derive(Clone, Debug)]
struct ServerConfig {
	host: String,
	port: u16,
	data_dir: PathBuf,
}

impl ServerConfig {
	fn from_env() -> Result<Self, String> {
		let host = env::var("EBOOKS_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
		let port = match env::var("EBOOKS_PORT") {
			Ok(port) => port.parse::<u16>().map_err(|_| format!("EBOOKS_PORT must be a port number, got {port}"))?,
			Err(_) => 5000,
		};
		let data_dir = normalize_folder(&env::var("EBOOKS_DATA_DIR").unwrap_or_else(|_| "./data".to_owned()));
		Ok(Self { host, port, data_dir })
	}
}

/// Query parameters of the `/v1/status` endpoint
#[derive(Deserialize)]
struct StatusParams {
	limit: Option<usize>,
	retry_limit: Option<usize>,
}

impl StatusParams {
	fn generation_input(&self) -> GenerationInput {
		let mut input = GenerationInput::default();
		if let Some(limit) = self.limit {
			input.limit = limit;
		}
		if let Some(retry_limit) = self.retry_limit {
			input.retry_limit = retry_limit;
		}
		input
	}
}

/// Query parameters of the `/v1/reply` endpoint
#[derive(Deserialize)]
struct ReplyParams {
	input: Option<String>,
	limit: Option<usize>,
}

#[derive(Deserialize)]
struct KeywordsQuery {
	count: Option<usize>,
}

#[derive(Deserialize)]
struct ModelQuery {
	name: Option<String>,
}

struct SharedData {
	model: CorpusModel,
	data_dir: PathBuf,
}

/// HTTP GET endpoint `/v1/status`
///
/// Generates a status from the loaded model.
#[get("/v1/status")]
async fn get_status(data: web::Data<RwLock<SharedData>>, query: web::Query<StatusParams>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let input = query.generation_input();
	let status = shared_data.model.generate_status_with(&input, None, &EnglishText, &mut rand::rng());
	HttpResponse::Ok().body(status)
}

/// HTTP GET endpoint `/v1/reply`
///
/// Generates a reply to `input` from the mentions of the loaded model.
#[get("/v1/reply")]
async fn get_reply(data: web::Data<RwLock<SharedData>>, query: web::Query<ReplyParams>) -> impl Responder {
	let input = match &query.input {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty input"),
	};

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
	HttpResponse::Ok().body(shared_data.model.generate_reply(input, limit, None))
}

#[get("/v1/keywords")]
async fn get_keywords(data: web::Data<RwLock<SharedData>>, query: web::Query<KeywordsQuery>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let keywords = shared_data.model.keywords();
	let count = query.count.unwrap_or(keywords.len()).min(keywords.len());
	HttpResponse::Ok().body(keywords[..count].join("\n"))
}

#[get("/v1/models")]
async fn get_models(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let data_dir = match data.read() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_corpora(&data_dir) {
		Ok(names) => HttpResponse::Ok().body(names.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list models"),
	}
}

#[get("/v1/export")]
async fn get_export(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match shared_data.model.serialize() {
		Ok(json) => HttpResponse::Ok().content_type("application/json").body(json),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to serialize model: {e}")),
	}
}

/// HTTP PUT endpoint `/v1/load_model`
///
/// Replaces the active model with `<data_dir>/<name>.json`.
/// Generation requests wait for the swap to finish.
#[put("/v1/load_model")]
async fn put_model(data: web::Data<RwLock<SharedData>>, query: web::Query<ModelQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty model name"),
	};
	if name.contains(['/', '\\']) || name.starts_with('.') {
		return HttpResponse::BadRequest().body("Invalid model name");
	}

	let data_dir = match data.read() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	// Build outside the lock, consuming a corpus can take a while
	let model = match CorpusModel::open(data_dir.join(format!("{name}.json"))) {
		Ok(m) => m,
		Err(EbooksError::InvalidCorpus) => return HttpResponse::BadRequest().body("Corpus has neither statuses nor mentions"),
		Err(e) => return HttpResponse::InternalServerError().body(format!("Failed to load model: {e}")),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.model = model;
	log::info!("Active model is now '{}'", name);

	HttpResponse::Ok().body("Model loaded successfully")
}

/// Main entry point for the server.
///
/// Starts with an empty model, wrapped in a `RwLock` so generation requests
/// run concurrently while `/v1/load_model` swaps models exclusively.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env().map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
	log::info!("Serving data from {} on {}:{}", config.data_dir.display(), config.host, config.port);

	let shared_data = SharedData {
		model: CorpusModel::default(),
		data_dir: config.data_dir.clone(),
	};
	let shared_model = web::Data::new(RwLock::new(shared_data));

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_status)
			.service(get_reply)
			.service(get_keywords)
			.service(get_models)
			.service(get_export)
			.service(put_model)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
