//! Backend Command Wrappers
//!
//! Frontend bindings to backend commands, organized by domain.

mod menu;
mod item;

use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// How a command call failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    /// Arguments could not be encoded or the bridge threw
    Transport(String),
    /// The command returned an error string
    Command(String),
    /// The reply did not match the expected type
    Decode(String),
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CallError::Transport(msg) | CallError::Command(msg) | CallError::Decode(msg) => f.write_str(msg),
        }
    }
}

async fn call<A: Serialize, T: DeserializeOwned>(cmd: &str, args: &A) -> Result<T, CallError> {
    // Flattened fields go through serialize_map; keep them plain objects
    let js_args = args
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| CallError::Transport(e.to_string()))?;
    let result = invoke(cmd, js_args).await.map_err(|err| match err.as_string() {
        Some(msg) => CallError::Command(msg),
        None => CallError::Transport(format!("{:?}", err)),
    })?;
    serde_wasm_bindgen::from_value(result).map_err(|e| CallError::Decode(e.to_string()))
}

#[derive(Serialize)]
struct NoArgs {}

#[derive(Serialize)]
struct IdArgs<'a> {
    id: &'a str,
}

pub use item::*;
pub use menu::*;
