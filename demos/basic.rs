//! Minimal afterburner example: a small API driven through the in-process
//! test client, with request tracing on stdout.
//!
//! Run with:
//!   cargo run --example basic

use afterburner::middleware::Trace;
use afterburner::{App, Error, Method, Middleware, Request, Resource, Response, Status};

const API: &str = "/api";

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let app = App::new()
        .middleware(Trace)
        .middleware(PoweredBy)
        .route(&format!("{API}/home"), home)
        .route(&format!("{API}/reverse/{{name}}"), reverse)
        .resource(
            &format!("{API}/books"),
            Resource::new().get(get_book).post(create_book).delete(delete_book),
        )
        .route_with_methods("/json", drinks, [Method::Get])
        .route(&format!("{API}/exception"), explode)
        .exception_handler(on_error);

    let client = app.test_client();
    let requests = [
        (Method::Get,    "/api/home"),
        (Method::Get,    "/api/reverse/afterburner"),
        (Method::Get,    "/api/books"),
        (Method::Post,   "/api/books"),
        (Method::Put,    "/api/books"),
        (Method::Get,    "/json"),
        (Method::Post,   "/json"),
        (Method::Get,    "/api/exception"),
        (Method::Get,    "/nowhere"),
    ];

    for (method, path) in requests {
        match client.request(method, path) {
            Ok(res) => println!("{method} {path} -> {} {}", res.status(), res.text().trim_end()),
            Err(e) => println!("{method} {path} -> unhandled: {e}"),
        }
    }
}

// Stamps every successful response.
struct PoweredBy;

impl Middleware for PoweredBy {
    fn process_response(&self, _req: &Request, res: &mut Response) {
        res.set_header("x-powered-by", "afterburner");
    }
}

fn home(_req: &Request, res: &mut Response) {
    res.set_text("Home API");
}

// GET /api/reverse/{name} → "name<br>eman"
fn reverse(req: &Request, res: &mut Response) {
    let name = req.param("name").unwrap_or_default();
    let reversed: String = name.chars().rev().collect();
    res.set_text(format!("{name}<br>{reversed}"));
}

fn get_book(_req: &Request, res: &mut Response) {
    res.set_text("Endpoint to RETRIEVE a book\n");
}

fn create_book(_req: &Request, res: &mut Response) {
    res.set_status(Status::Created);
    res.set_text("Endpoint to CREATE a book\n");
}

fn delete_book(_req: &Request, res: &mut Response) {
    res.set_text("Endpoint to DELETE a book\n");
}

fn drinks(_req: &Request, res: &mut Response) -> Result<(), serde_json::Error> {
    res.set_json(&serde_json::json!({ "alcohol": "Whiskey", "mixer": "Coke" }))
}

fn explode(_req: &Request, _res: &mut Response) -> Result<(), String> {
    Err("This handler should not be used".to_owned())
}

fn on_error(req: &Request, res: &mut Response, err: &Error) {
    let status = match err {
        Error::MethodNotAllowed { .. } => Status::MethodNotAllowed,
        _ => Status::InternalServerError,
    };
    res.set_status(status);
    res.set_html(format!("<h1>afterburner</h1><p>{} {}: {err}</p>", req.method(), req.path()));
}
