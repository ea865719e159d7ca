//! Tool schemas for the built-in mock tools, plus wire-format conversion.

use crate::ToolDefinition;

/// All built-in tool definitions.
pub fn builtin_tools() -> Vec<ToolDefinition> {
    vec![weather_tool(), database_tool(), python_tool()]
}

pub fn weather_tool() -> ToolDefinition {
    ToolDefinition {
        name: "get_current_weather".to_string(),
        description: "Get the current weather conditions for a city".to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name, e.g. 'Tokyo' or 'San Francisco'"
                }
            },
            "required": ["city"]
        }),
    }
}

pub fn database_tool() -> ToolDefinition {
    ToolDefinition {
        name: "ask_database".to_string(),
        description: "Run a read-only SQL query against the catalog database. \
                      Only 'SELECT cols FROM table [WHERE col = 'value'] [LIMIT n]' \
                      is supported."
            .to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "The SQL query to execute"
                }
            },
            "required": ["query"]
        }),
    }
}

pub fn python_tool() -> ToolDefinition {
    ToolDefinition {
        name: "run_python".to_string(),
        description: "Run a short Python snippet in a restricted sandbox. Use \
                      assignments and print() with arithmetic expressions only."
            .to_string(),
        parameters: serde_json::json!({
            "type": "object",
            "properties": {
                "code": {
                    "type": "string",
                    "description": "The Python code to execute"
                }
            },
            "required": ["code"]
        }),
    }
}

/// Convert a tool definition into the chat-completions `tools` entry form.
pub fn to_openai_tool(tool: &ToolDefinition) -> serde_json::Value {
    serde_json::json!({
        "type": "function",
        "function": {
            "name": tool.name,
            "description": tool.description,
            "parameters": tool.parameters,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tools_have_object_schemas() {
        let tools = builtin_tools();
        assert_eq!(tools.len(), 3);
        for tool in &tools {
            assert_eq!(tool.parameters["type"], "object");
            assert!(tool.parameters["required"].is_array());
            assert!(!tool.description.is_empty());
        }
    }

    #[test]
    fn to_openai_tool_wraps_function() {
        let wire = to_openai_tool(&weather_tool());
        assert_eq!(wire["type"], "function");
        assert_eq!(wire["function"]["name"], "get_current_weather");
        assert_eq!(
            wire["function"]["parameters"]["required"][0],
            "city"
        );
    }
}
