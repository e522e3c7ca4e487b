//! ai-hub CLI — 模型目录查询、模型选择预演与文本生成的命令行工具
//!
//! Usage:
//!   ai-hub-cli models [--capability <cap>]        List catalog models
//!   ai-hub-cli select --capability <cap> [...]    Show which model would be chosen
//!   ai-hub-cli generate <prompt> [...]            Generate text with cache + fallback

use ai_hub::{
    AiHub, FallbackStrategy, GenerationRequest, HubConfig, ModelCatalog, Provider,
    SelectionPreferences,
};
use anyhow::{anyhow, bail, Context};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ai_hub=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let outcome = match args[1].as_str() {
        "models" => cmd_models(&args[2..]),
        "select" => cmd_select(&args[2..]),
        "generate" => cmd_generate(&args[2..]).await,
        "version" | "--version" | "-V" => {
            println!("ai-hub-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = outcome {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"ai-hub-cli — AI Hub 命令行工具

USAGE:
    ai-hub-cli <COMMAND> [OPTIONS]

COMMANDS:
    models [--capability <cap>]          List catalog models as JSON
    select --capability <cap>            Show the model selection for preferences
           [--max-cost <usd>] [--min-context <tokens>]
           [--prefer <p1,p2>] [--strategy cost|context|availability]
    generate <prompt>                    Generate text
           [--system <text>] [--capability <cap>] [--cache-key <key>]
           [--no-cache] [--config <file.yaml>] + selection flags
    version                              Show version information
    help                                 Show this help message

ENVIRONMENT:
    RUST_LOG                    Log filter (default ai_hub=info)
    <PROVIDER>_API_KEY          Provider credentials (e.g. GROQ_API_KEY)
    REDIS_URL, KV_REST_API_TOKEN  Redis REST cache store
    AI_HUB_CACHE_TTL_SECS, AI_HUB_HTTP_TIMEOUT_SECS, AI_HUB_FALLBACK"#
    );
}

fn flag_value<'a>(args: &'a [String], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == name)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn has_flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn parse_preferences(args: &[String], default_capability: Option<&str>) -> anyhow::Result<SelectionPreferences> {
    let capability = flag_value(args, "--capability")
        .or(default_capability)
        .ok_or_else(|| anyhow!("--capability is required"))?;
    let mut prefs = SelectionPreferences::new(capability);

    if let Some(v) = flag_value(args, "--max-cost") {
        prefs = prefs.with_max_cost(v.parse().with_context(|| format!("invalid --max-cost '{v}'"))?);
    }
    if let Some(v) = flag_value(args, "--min-context") {
        prefs = prefs
            .with_min_context_window(v.parse().with_context(|| format!("invalid --min-context '{v}'"))?);
    }
    if let Some(v) = flag_value(args, "--prefer") {
        let providers = v
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Provider>())
            .collect::<ai_hub::Result<Vec<_>>>()?;
        prefs = prefs.with_preferred_providers(providers);
    }
    if let Some(v) = flag_value(args, "--strategy") {
        prefs = prefs.with_strategy(v.parse::<FallbackStrategy>()?);
    }
    Ok(prefs)
}

fn cmd_models(args: &[String]) -> anyhow::Result<()> {
    let catalog = ModelCatalog::builtin();
    let models = catalog.list_by_capability(flag_value(args, "--capability"));
    println!("{}", serde_json::to_string_pretty(&models)?);
    Ok(())
}

fn cmd_select(args: &[String]) -> anyhow::Result<()> {
    let prefs = parse_preferences(args, None)?;
    let catalog = ModelCatalog::builtin();
    let snapshot = catalog.snapshot();
    let model = ai_hub::select_model(&snapshot, &prefs);
    println!("{}", serde_json::to_string_pretty(model)?);
    Ok(())
}

async fn cmd_generate(args: &[String]) -> anyhow::Result<()> {
    let Some(prompt) = args.first().filter(|a| !a.starts_with("--")) else {
        bail!("generate needs a prompt");
    };

    let mut config = match flag_value(args, "--config") {
        Some(path) => HubConfig::from_yaml_file(path)?,
        None => HubConfig::default(),
    };
    config.apply_env()?;

    let hub = AiHub::builder().config(config).build()?;
    let prefs = parse_preferences(args, Some("chat"))?;

    let mut request = GenerationRequest::new(prompt.as_str(), prefs).with_use_cache(!has_flag(args, "--no-cache"));
    if let Some(system) = flag_value(args, "--system") {
        request = request.with_system(system);
    }
    if let Some(key) = flag_value(args, "--cache-key") {
        request = request.with_cache_key(key);
    }

    let result = hub.generate(&request).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
