//! JSON envelopes for subcommand results.
//!
//! Every subcommand prints exactly one envelope: `data` on stdout when it
//! succeeds, `error` on stderr when it fails. The two never appear together.

use serde::Serialize;

const API_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct Envelope<T> {
    success: bool,
    api_version: &'static str,
    #[serde(flatten)]
    body: Body<T>,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Body<T> {
    Data(T),
    Error(String),
}

/// A listing with its length, so scripts need not count.
#[derive(Serialize)]
struct Page<T> {
    items: Vec<T>,
    count: usize,
}

fn encode<T: Serialize>(body: Body<T>) -> String {
    let envelope = Envelope {
        success: matches!(body, Body::Data(_)),
        api_version: API_VERSION,
        body,
    };
    serde_json::to_string(&envelope).unwrap_or_else(|e| {
        tracing::debug!("Response encoding failed: {}", e);
        serde_json::json!({
            "success": false,
            "api_version": API_VERSION,
            "error": format!("cannot encode response: {}", e),
        })
        .to_string()
    })
}

pub fn output_success<T: Serialize>(data: T) {
    println!("{}", encode(Body::Data(data)));
}

pub fn output_list<T: Serialize>(items: Vec<T>) {
    let count = items.len();
    output_success(Page { items, count });
}

/// Reports the failure on stderr and exits with status 1.
pub fn output_error(message: &str) -> ! {
    eprintln!("{}", encode(Body::<()>::Error(message.to_string())));
    std::process::exit(1);
}
