//! Dev host: line-delimited JSON over stdin/stdout.
//!
//! Each input line is one request `{"op": "<name>", "input": {...}}`; each
//! output line is `{"ok": ...}` or `{"error": {"code": ..., "message": ...}}`.
//! Backed by in-memory repositories; real deployments put their own transport
//! and persistence around the `App`.

use std::io::{self, BufRead, Write};

use serde::Deserialize;
use serde_json::Value;

use invoicer_api::{App, Principal};

#[derive(Debug, Deserialize)]
struct Request {
    op: String,
    #[serde(default)]
    input: Option<Value>,
}

fn main() -> anyhow::Result<()> {
    invoicer_observability::init();

    let app = App::with_memory_store();
    let principal = Principal::system();
    tracing::info!(
        operations = app.registry().operation_names().count(),
        "invoicer api host ready"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => {
                let input = request
                    .input
                    .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
                match app.registry().dispatch(&principal, &request.op, input) {
                    Ok(data) => serde_json::json!({ "ok": data }),
                    Err(e) => serde_json::json!({
                        "error": { "code": e.code(), "message": e.to_string() }
                    }),
                }
            }
            Err(e) => serde_json::json!({
                "error": { "code": "VALIDATION", "message": format!("malformed request: {e}") }
            }),
        };

        serde_json::to_writer(&mut stdout, &response)?;
        writeln!(stdout)?;
    }

    Ok(())
}
