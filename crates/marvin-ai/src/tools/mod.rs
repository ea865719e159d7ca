//! Built-in mock tools for the demo agents.
//!
//! Tools are functions the AI can call; all built-ins here are backed by
//! static data baked into the source (weather table, mock database) or a
//! mocked execution sandbox. Nothing is mutated or fetched remotely.

mod database;
mod definitions;
mod sandbox;
mod weather;

pub use database::{run_query, schema_description};
pub use definitions::{
    builtin_tools, database_tool, python_tool, to_openai_tool, weather_tool,
};
pub use sandbox::PythonSandbox;
pub use weather::lookup_weather;

use tracing::{debug, warn};

use crate::session::ToolExecutor;

/// Execute a built-in tool by name. Unknown names are an error the caller
/// reports back to the model as the tool result.
pub fn dispatch_tool(name: &str, arguments: &serde_json::Value) -> Result<String, String> {
    debug!(tool = %name, "dispatching built-in tool");
    match name {
        "get_current_weather" => {
            let city = arguments["city"]
                .as_str()
                .ok_or_else(|| "missing required argument 'city'".to_string())?;
            Ok(weather::report(city))
        }
        "ask_database" => {
            let query = arguments["query"]
                .as_str()
                .ok_or_else(|| "missing required argument 'query'".to_string())?;
            database::run_query(query)
        }
        "run_python" => {
            let code = arguments["code"]
                .as_str()
                .ok_or_else(|| "missing required argument 'code'".to_string())?;
            PythonSandbox::new().execute(code)
        }
        other => Err(format!("unknown tool: {other}")),
    }
}

/// Build a session executor over the built-in tools.
///
/// Errors (including unknown tools) are folded into the result text so the
/// model sees what went wrong and can recover in the next round.
pub fn default_executor() -> ToolExecutor {
    Box::new(|name, arguments| match dispatch_tool(name, arguments) {
        Ok(output) => output,
        Err(e) => {
            warn!(tool = %name, error = %e, "tool execution failed");
            format!("[tool error] {e}")
        }
    })
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    #[test]
    fn dispatch_weather() {
        let output =
            dispatch_tool("get_current_weather", &serde_json::json!({"city": "Tokyo"})).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["city"], "Tokyo");
        assert!(json["temperature_c"].is_number());
    }

    #[test]
    fn dispatch_database() {
        let output = dispatch_tool(
            "ask_database",
            &serde_json::json!({"query": "SELECT name FROM artists LIMIT 1"}),
        )
        .unwrap();
        let rows: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(rows.as_array().unwrap().len(), 1);
    }

    #[test]
    fn dispatch_unknown_tool_errors() {
        let result = dispatch_tool("launch_rockets", &serde_json::json!({}));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("unknown tool"));
    }

    #[test]
    fn dispatch_missing_argument_errors() {
        let result = dispatch_tool("get_current_weather", &serde_json::json!({}));
        assert!(result.unwrap_err().contains("city"));
    }

    #[test]
    fn default_executor_folds_errors_into_text() {
        let executor = default_executor();
        let output = executor("launch_rockets", &serde_json::json!({}));
        assert!(output.starts_with("[tool error]"));
        assert!(output.contains("unknown tool"));
    }
}
