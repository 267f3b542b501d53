use clap::Parser;
use rpollinate::logger::{self, LogLevel, LoggerConfig};
use rpollinate::{AspectRatio, Error, FetchedImage, ImageModel, ImageRequest, PollinationsClient};
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[command(
    name = "rpollinate",
    version,
    about = "AI image generator powered by Pollinations AI"
)]
struct Cli {
    /// Description of the image to generate.
    #[arg(long, default_value = "A fantasy castle on a floating island")]
    prompt: String,
    #[arg(long, default_value = "flux", value_parser = parse_model)]
    model: ImageModel,
    #[arg(long, default_value = "square", value_parser = parse_aspect)]
    aspect: AspectRatio,
    /// 0 lets the service pick a seed.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Write the generated image to this path.
    #[arg(long)]
    output: Option<PathBuf>,
    #[arg(long)]
    list_models: bool,
    /// Report failures without offering a retry.
    #[arg(long)]
    no_retry: bool,
    /// Debug logging with file locations; overrides --log-level.
    #[arg(short, long)]
    verbose: bool,
    #[arg(long, default_value = "warn", value_parser = parse_log_level)]
    log_level: LogLevel,
    #[arg(long)]
    json_logs: bool,
    #[arg(long)]
    no_color: bool,
}

fn parse_model(value: &str) -> Result<ImageModel, Error> {
    value.parse()
}

fn parse_aspect(value: &str) -> Result<AspectRatio, Error> {
    value.parse()
}

fn parse_log_level(value: &str) -> Result<LogLevel, String> {
    value.parse()
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("rpollinate error: {}", err);
            std::process::exit(1);
        }
    }
}

fn logger_config(cli: &Cli) -> LoggerConfig {
    let config = if cli.json_logs {
        LoggerConfig::production().with_level(cli.log_level)
    } else if cli.verbose {
        LoggerConfig::development()
    } else {
        LoggerConfig::new().with_level(cli.log_level)
    };
    let config = if cli.verbose {
        config.with_level(LogLevel::Debug)
    } else {
        config
    };
    config.with_colors(!cli.no_color && !cli.json_logs)
}

async fn run(cli: Cli) -> rpollinate::Result<i32> {
    let env_loaded = dotenv::dotenv().is_ok();

    if let Err(e) = logger::init_with_config(logger_config(&cli)) {
        eprintln!("{}", e);
    }
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if env_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::debug!("No .env file found, using system environment variables");
    }

    if cli.list_models {
        println!("Available models:");
        for (id, name, provider) in ImageModel::supported_models() {
            println!("  {} - {} ({})", id, name, provider);
        }
        println!("Aspect ratios:");
        for aspect in AspectRatio::ALL {
            let (width, height) = aspect.dimensions();
            println!("  {} - {}x{}", aspect, width, height);
        }
        return Ok(0);
    }

    let request = match ImageRequest::new(cli.prompt, cli.model, cli.aspect, cli.seed) {
        Ok(request) => request,
        Err(Error::Validation(msg)) => {
            eprintln!("{}", msg);
            return Ok(2);
        }
        Err(e) => return Err(e),
    };

    let mut client = PollinationsClient::from_env()?;
    logger::log_config_info(client.config());

    let mut answers = BufReader::new(tokio::io::stdin());
    generate_until_done(
        &mut client,
        &request,
        cli.output.as_deref(),
        !cli.no_retry,
        &mut answers,
    )
    .await
}

/// Generates until success or until a retry is declined; returns the exit
/// code. `answers` is read one line per retry prompt.
async fn generate_until_done<R>(
    client: &mut PollinationsClient,
    request: &ImageRequest,
    output: Option<&Path>,
    offer_retry: bool,
    answers: &mut R,
) -> rpollinate::Result<i32>
where
    R: AsyncBufRead + Unpin,
{
    loop {
        println!("Generating your image... please wait ⏳");
        match client.generate(request).await {
            Ok(image) => {
                show_image(&image, request.prompt(), output).await?;
                return Ok(0);
            }
            Err(e) if e.is_retryable() => {
                eprintln!("{}", failure_message(&e));
                if !offer_retry || !ask_retry(answers).await? {
                    return Ok(1);
                }
            }
            Err(e) => return Err(e),
        }
    }
}

fn failure_message(err: &Error) -> String {
    match err {
        Error::Http { status, reason } => format!("Generation failed: {} {}", status, reason),
        Error::Network(_) => {
            "⚠️ Network error or timeout. Try again with a simpler prompt or retry.".to_string()
        }
        other => other.to_string(),
    }
}

/// End of input counts as "no".
async fn ask_retry<R>(answers: &mut R) -> std::io::Result<bool>
where
    R: AsyncBufRead + Unpin,
{
    print!("Retry? [y/N] ");
    std::io::stdout().flush()?;

    let mut answer = String::new();
    answers.read_line(&mut answer).await?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}

async fn show_image(
    image: &FetchedImage,
    prompt: &str,
    output: Option<&Path>,
) -> rpollinate::Result<()> {
    println!("Image generated successfully! 🎉");
    println!("Prompt: {}", prompt.trim());

    let format = image
        .format_hint()
        .map(|f| f.extension().to_string())
        .or_else(|| image.content_type.clone())
        .unwrap_or_else(|| "unknown format".to_string());
    println!("Image: {} bytes ({})", image.len(), format);

    if let Some(path) = output {
        tokio::fs::write(path, &image.bytes).await?;
        println!("Saved to {}", path.display());
    }

    println!("Image URL: {}", image.url);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::get, Router};
    use rpollinate::PollinationsConfig;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10];

    /// Serves `/prompt/:prompt` with `status` and counts requests.
    async fn client_with_status(status: StatusCode, hits: Arc<AtomicUsize>) -> PollinationsClient {
        let app = Router::new().route(
            "/prompt/:prompt",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (status, JPEG_BYTES.to_vec())
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = PollinationsConfig::new().with_base_url(format!("http://{}/prompt", addr));
        PollinationsClient::new(config).unwrap()
    }

    fn castle() -> ImageRequest {
        ImageRequest::new(
            "A fantasy castle on a floating island",
            ImageModel::Flux,
            AspectRatio::Square,
            0,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_each_yes_reissues_the_request() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut client = client_with_status(StatusCode::INTERNAL_SERVER_ERROR, hits.clone()).await;
        let mut answers: &[u8] = b"y\nyes\nn\n";

        let code = generate_until_done(&mut client, &castle(), None, true, &mut answers)
            .await
            .unwrap();

        assert_eq!(code, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert!(answers.is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_declines_retry() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut client = client_with_status(StatusCode::BAD_GATEWAY, hits.clone()).await;
        let mut answers: &[u8] = b"y\n";

        let code = generate_until_done(&mut client, &castle(), None, true, &mut answers)
            .await
            .unwrap();

        assert_eq!(code, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_no_retry_stops_after_first_failure() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut client = client_with_status(StatusCode::INTERNAL_SERVER_ERROR, hits.clone()).await;
        let mut answers: &[u8] = b"y\ny\n";

        let code = generate_until_done(&mut client, &castle(), None, false, &mut answers)
            .await
            .unwrap();

        assert_eq!(code, 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(answers, b"y\ny\n");
    }

    #[tokio::test]
    async fn test_success_writes_requested_output() {
        let hits = Arc::new(AtomicUsize::new(0));
        let mut client = client_with_status(StatusCode::OK, hits.clone()).await;
        let path = std::env::temp_dir().join(format!("rpollinate-{}.jpg", uuid::Uuid::new_v4()));
        let mut answers: &[u8] = b"";

        let code = generate_until_done(&mut client, &castle(), Some(&path), true, &mut answers)
            .await
            .unwrap();

        assert_eq!(code, 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(std::fs::read(&path).unwrap(), JPEG_BYTES);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_failure_messages() {
        let http = Error::Http {
            status: 500,
            reason: "Internal Server Error".into(),
        };
        assert_eq!(
            failure_message(&http),
            "Generation failed: 500 Internal Server Error"
        );
        assert!(failure_message(&Error::Network("connection reset".into()))
            .starts_with("⚠️ Network error or timeout"));
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["rpollinate"]);
        assert_eq!(cli.prompt, "A fantasy castle on a floating island");
        assert_eq!(cli.model, ImageModel::Flux);
        assert_eq!(cli.aspect, AspectRatio::Square);
        assert_eq!(cli.seed, 0);
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_cli_rejects_unknown_model() {
        assert!(Cli::try_parse_from(["rpollinate", "--model", "dall-e"]).is_err());
        let cli = Cli::try_parse_from([
            "rpollinate",
            "--model",
            "stable-diffusion",
            "--aspect",
            "portrait",
        ])
        .unwrap();
        assert_eq!(cli.model, ImageModel::StableDiffusion);
        assert_eq!(cli.aspect, AspectRatio::Portrait);
    }

    #[test]
    fn test_logger_config_from_flags() {
        let config = logger_config(&Cli::parse_from(["rpollinate", "--log-level", "info"]));
        assert_eq!(config.min_level, LogLevel::Info);
        assert!(config.show_colors);

        let config = logger_config(&Cli::parse_from(["rpollinate", "-v", "--no-color"]));
        assert_eq!(config.min_level, LogLevel::Debug);
        assert!(config.show_file_location);
        assert!(!config.show_colors);

        let config = logger_config(&Cli::parse_from(["rpollinate", "--json-logs"]));
        assert!(config.output_json);
        assert_eq!(config.min_level, LogLevel::Warn);

        assert!(Cli::try_parse_from(["rpollinate", "--log-level", "loud"]).is_err());
    }
}
