//
// Copyright (c) 2023 Nathan Fiedler
//
use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{
    delete, get, http::header::ContentType, middleware, post, web, App, HttpRequest,
    HttpResponse, HttpServer, Responder,
};
use anyhow::{anyhow, Error};
use blog_likes::actions::{Envelope, LikeActions};
use blog_likes::config::{Protocol, Settings};
use blog_likes::data::repositories::LikeRepositoryImpl;
use blog_likes::data::sources::build_data_source;
use blog_likes::domain::repositories::LikeRepository;
use blog_likes::presentation::contact::ContactForm;
use blog_likes::presentation::header::Header;
use blog_likes::presentation::nav::NavLinks;
use blog_likes::presentation::{page, Render};
use blog_likes::ErrorKind;
use log::{error, info};
use rustls::{Certificate, PrivateKey, ServerConfig};
use rustls_pemfile::{certs, pkcs8_private_keys};
use serde::Deserialize;
use std::{fs::File, io::BufReader, sync::Arc};

///
/// Settings needed to render the HTML pages.
///
struct Pages {
    site_key: Option<String>,
    relay_url: String,
}

///
/// Incoming JSON body for liking a post.
///
#[derive(Deserialize)]
struct LikeRequest {
    // missing is treated as empty and rejected by the action
    #[serde(default)]
    user_id: String,
}

#[get("/api/posts/{post_id}/likes")]
async fn get_like_count(
    actions: web::Data<LikeActions>,
    path: web::Path<String>,
) -> web::Json<Envelope> {
    let post_id = path.into_inner();
    web::Json(actions.count_likes(&post_id).await)
}

#[post("/api/posts/{post_id}/likes")]
async fn post_like(
    actions: web::Data<LikeActions>,
    path: web::Path<String>,
    body: web::Json<LikeRequest>,
) -> web::Json<Envelope> {
    let post_id = path.into_inner();
    web::Json(actions.add_like(&post_id, &body.user_id).await)
}

#[get("/api/posts/{post_id}/likes/{user_id}")]
async fn get_like(
    actions: web::Data<LikeActions>,
    path: web::Path<(String, String)>,
) -> web::Json<Envelope> {
    let (post_id, user_id) = path.into_inner();
    web::Json(actions.is_post_liked_by_user(&post_id, &user_id).await)
}

#[delete("/api/posts/{post_id}/likes/{user_id}")]
async fn delete_like(
    actions: web::Data<LikeActions>,
    path: web::Path<(String, String)>,
) -> web::Json<Envelope> {
    let (post_id, user_id) = path.into_inner();
    web::Json(actions.remove_like(&post_id, &user_id).await)
}

///
/// Remove every like of every post; only registered when admin routes are
/// enabled.
///
#[delete("/api/likes")]
async fn delete_all_likes(actions: web::Data<LikeActions>) -> web::Json<Envelope> {
    web::Json(actions.remove_all_likes().await)
}

#[get("/")]
async fn index() -> impl Responder {
    let header = Header::new(NavLinks::default());
    let body = "<p>Thanks for reading. Say hello on the <a href=\"/contact\">contact</a> page.</p>";
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::document("Blog", &header, body))
}

#[get("/contact")]
async fn contact(pages: web::Data<Pages>) -> impl Responder {
    let header = Header::new(NavLinks::default());
    let form = ContactForm::new(pages.site_key.clone(), pages.relay_url.clone());
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(page::document("Contact", &header, &form.render()))
}

#[get("/status")]
async fn app_status() -> impl Responder {
    HttpResponse::Ok()
}

fn load_rustls_config(cert_path: &str, key_path: &str) -> Result<rustls::ServerConfig, Error> {
    let config = ServerConfig::builder()
        .with_safe_defaults()
        .with_no_client_auth();
    let cert_file = &mut BufReader::new(File::open(cert_path)?);
    let key_file = &mut BufReader::new(File::open(key_path)?);
    let cert_chain = certs(cert_file)?.into_iter().map(Certificate).collect();
    let mut keys: Vec<PrivateKey> = pkcs8_private_keys(key_file)?
        .into_iter()
        .map(PrivateKey)
        .collect();
    if keys.is_empty() {
        return Err(anyhow!("could not find PKCS 8 private keys in {}", key_path));
    }
    Ok(config.with_single_cert(cert_chain, keys.remove(0))?)
}

///
/// An unreadable JSON body is answered like any other failed action: a 200
/// carrying a `validation` failure envelope.
///
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let envelope = Envelope {
        success: false,
        error: Some(format!("invalid request body: {}", err)),
        kind: Some(ErrorKind::Validation),
        ..Default::default()
    };
    error!("Error in post_like: {}", err);
    InternalError::from_response(err, HttpResponse::Ok().json(envelope)).into()
}

fn config(cfg: &mut web::ServiceConfig, admin_routes: bool) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler));
    cfg.service(get_like_count)
        .service(post_like)
        .service(get_like)
        .service(delete_like)
        .service(index)
        .service(contact)
        .service(app_status);
    if admin_routes {
        cfg.service(delete_all_likes);
    }
    cfg.service(
        actix_files::Files::new("/static", "static")
            .use_etag(true)
            .use_last_modified(true),
    );
}

fn io_error<E>(err: E) -> std::io::Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    std::io::Error::new(std::io::ErrorKind::Other, err)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();
    let settings = Settings::from_env().map_err(io_error)?;
    let source = build_data_source(settings.data_source.clone()).map_err(io_error)?;
    let records: Arc<dyn LikeRepository> = Arc::new(LikeRepositoryImpl::new(source));
    let actions = web::Data::new(LikeActions::new(records));
    let pages = web::Data::new(Pages {
        site_key: settings.site_key.clone(),
        relay_url: settings.relay_url.clone(),
    });
    let admin_routes = settings.admin_routes;
    let addr = settings.bind_address();
    let factory = move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(actions.clone())
            .app_data(pages.clone())
            .configure(move |cfg| config(cfg, admin_routes))
    };
    if settings.protocol == Protocol::Https {
        let rustls_config =
            load_rustls_config(&settings.cert_file, &settings.key_file).map_err(io_error)?;
        info!("listening on https://{}/...", addr);
        HttpServer::new(factory)
            .bind_rustls(addr, rustls_config)?
            .run()
            .await
    } else {
        info!("listening on http://{}/...", addr);
        HttpServer::new(factory).bind(addr)?.run().await
    }
}
