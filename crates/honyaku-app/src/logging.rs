use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins; otherwise `info` for everything
pub fn init(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(atty::is(atty::Stream::Stdout))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("logging already initialized: {e}");
    }
}
