//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Marvin Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.
# The API key is read from the OPENAI_API_KEY environment variable
# (a .env file next to the binary works too), never from this file.

[provider]
# model = "gpt-4o-mini"
# base_url = "https://api.openai.com/v1"   # any compatible endpoint
# max_tokens = 4096      # 1-128000
# temperature = 0.7      # 0.0-2.0

[session]
# transcript_dir = ""    # empty = <data dir>/marvin/sessions
# persist = true
# max_tool_rounds = 10   # 1-50

[logging]
# filter = "marvin=info" # tracing filter directive
"##
    .to_string()
}
