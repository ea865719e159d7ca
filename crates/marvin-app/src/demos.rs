//! Demo scenarios: each wires a session, tools, and a prompt, then prints
//! the result. These are the runnable counterparts of the classic
//! tool-calling tutorial scripts.

use std::path::PathBuf;

use marvin_ai::tools::{
    database_tool, default_executor, python_tool, schema_description, weather_tool,
};
use marvin_ai::{OpenAiClient, OpenAiConfig, Session, ToolChoice, TranscriptStore};
use marvin_common::{MarvinError, Result, SessionId};
use marvin_config::MarvinConfig;
use tracing::info;

/// Resolve the provider settings: key always from the environment, base URL
/// and model from the config file unless `OPENAI_BASE_URL`/`OPENAI_MODEL`
/// override them.
fn resolve_provider_config(config: &MarvinConfig) -> Result<OpenAiConfig> {
    let mut ai_config = OpenAiConfig::from_env()
        .map_err(|e| MarvinError::Ai(e.to_string()))?
        .with_max_tokens(config.provider.max_tokens)
        .with_temperature(config.provider.temperature);
    if std::env::var("OPENAI_BASE_URL").is_err() {
        ai_config = ai_config.with_base_url(&config.provider.base_url);
    }
    if std::env::var("OPENAI_MODEL").is_err() {
        ai_config = ai_config.with_model(&config.provider.model);
    }
    Ok(ai_config)
}

/// Build the provider client for a demo run.
pub fn build_client(config: &MarvinConfig) -> Result<OpenAiClient> {
    Ok(OpenAiClient::new(resolve_provider_config(config)?))
}

/// Open the transcript store configured in `[session]`, or `None` when
/// persistence is disabled.
pub fn open_store(config: &MarvinConfig) -> Result<Option<TranscriptStore>> {
    if !config.session.persist {
        return Ok(None);
    }
    let dir = if config.session.transcript_dir.is_empty() {
        TranscriptStore::default_dir()?
    } else {
        PathBuf::from(&config.session.transcript_dir)
    };
    Ok(Some(TranscriptStore::new(dir)?))
}

/// Create or resume the session for a demo run.
fn make_session(
    config: &MarvinConfig,
    resume: Option<&str>,
    system_prompt: Option<String>,
) -> Result<Session> {
    let store = open_store(config)?;
    let model = &config.provider.model;

    let mut session = match (store, resume) {
        (Some(store), Some(id)) => {
            Session::resume(model, store, SessionId::from_string(id))?
        }
        (Some(store), None) => Session::new(model).with_store(store),
        (None, _) => Session::new(model),
    };
    session = session.with_max_tool_rounds(config.session.max_tool_rounds);
    if let Some(prompt) = system_prompt {
        session = session.with_system_prompt(prompt);
    }
    Ok(session)
}

fn finish(session: &Session, reply: &str) {
    println!("{reply}");
    info!(
        session = %session.id(),
        calls = session.ledger().call_count(),
        tokens = session.ledger().total_tokens(),
        "done"
    );
}

/// Plain chat, optionally streamed. No tools.
pub async fn chat(
    config: &MarvinConfig,
    resume: Option<&str>,
    message: &str,
    stream: bool,
) -> Result<()> {
    let client = build_client(config)?;
    let mut session = make_session(config, resume, None)?;

    if stream {
        let reply = session
            .chat_streaming(
                &client,
                message,
                Box::new(|chunk| {
                    print!("{chunk}");
                    use std::io::Write;
                    let _ = std::io::stdout().flush();
                }),
            )
            .await
            .map_err(|e| MarvinError::Ai(e.to_string()))?;
        println!();
        info!(session = %session.id(), chars = reply.len(), "streaming done");
    } else {
        let reply = session
            .chat(&client, message)
            .await
            .map_err(|e| MarvinError::Ai(e.to_string()))?;
        finish(&session, &reply);
    }
    Ok(())
}

/// Weather agent: the model calls `get_current_weather` and summarizes.
pub async fn weather(config: &MarvinConfig, resume: Option<&str>, question: &str) -> Result<()> {
    let client = build_client(config)?;
    let mut session = make_session(
        config,
        resume,
        Some(
            "You are a weather assistant. Use the get_current_weather tool \
             for any weather question; do not guess conditions."
                .to_string(),
        ),
    )?
    .with_tools(vec![weather_tool()])
    .with_tool_choice(forced_choice_from_env())
    .with_tool_executor(default_executor());

    let reply = session
        .chat(&client, question)
        .await
        .map_err(|e| MarvinError::Ai(e.to_string()))?;
    finish(&session, &reply);
    Ok(())
}

/// Database Q&A: the model writes restricted SQL against the mock catalog.
pub async fn database(config: &MarvinConfig, resume: Option<&str>, question: &str) -> Result<()> {
    let client = build_client(config)?;
    let system = format!(
        "You answer questions using the ask_database tool.\n\n{}",
        schema_description()
    );
    let mut session = make_session(config, resume, Some(system))?
        .with_tools(vec![database_tool()])
        .with_tool_executor(default_executor());

    let reply = session
        .chat(&client, question)
        .await
        .map_err(|e| MarvinError::Ai(e.to_string()))?;
    finish(&session, &reply);
    Ok(())
}

/// Data analysis: SQL over the passenger table plus the Python sandbox for
/// arithmetic (rates, averages).
pub async fn analyze(config: &MarvinConfig, resume: Option<&str>, question: &str) -> Result<()> {
    let client = build_client(config)?;
    let system = format!(
        "You are a data analyst working on the passengers table. Fetch rows \
         with ask_database, then compute statistics with run_python (only \
         assignments, arithmetic, and print() are available).\n\n{}",
        schema_description()
    );
    let mut session = make_session(config, resume, Some(system))?
        .with_tools(vec![database_tool(), python_tool()])
        .with_tool_executor(default_executor());

    let reply = session
        .chat(&client, question)
        .await
        .map_err(|e| MarvinError::Ai(e.to_string()))?;
    finish(&session, &reply);
    Ok(())
}

/// Print a stored transcript, one line per turn.
pub fn history(config: &MarvinConfig, session_id: &str) -> Result<()> {
    let store = open_store(config)?
        .ok_or_else(|| MarvinError::Transcript("session persistence is disabled".into()))?;
    let id = SessionId::from_string(session_id);
    let messages = store.load(&id)?;
    if messages.is_empty() {
        println!("(no transcript for session {id})");
        return Ok(());
    }
    for message in &messages {
        let role = format!("{:?}", message.role).to_lowercase();
        if message.tool_calls.is_empty() {
            println!("[{role}] {}", message.content);
        } else {
            let names: Vec<&str> = message
                .tool_calls
                .iter()
                .map(|c| c.name.as_str())
                .collect();
            println!("[{role}] {} (tool calls: {})", message.content, names.join(", "));
        }
    }
    Ok(())
}

/// List stored session ids.
pub fn sessions(config: &MarvinConfig) -> Result<()> {
    let store = open_store(config)?
        .ok_or_else(|| MarvinError::Transcript("session persistence is disabled".into()))?;
    let ids = store.list()?;
    if ids.is_empty() {
        println!("(no stored sessions)");
    }
    for id in ids {
        println!("{id}");
    }
    Ok(())
}

/// Tool-choice override for prompt testing: set MARVIN_FORCE_TOOL to a tool
/// name to make the model call it on the first round.
pub fn forced_choice_from_env() -> ToolChoice {
    match std::env::var("MARVIN_FORCE_TOOL") {
        Ok(name) if !name.is_empty() => ToolChoice::Tool(name),
        _ => ToolChoice::Auto,
    }
}
