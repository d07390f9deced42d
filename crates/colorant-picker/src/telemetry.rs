use tracing_subscriber::EnvFilter;

/// Installs the global subscriber, logging to stderr. `RUST_LOG` wins over `verbosity`.
/// Later calls are no-ops.
pub fn init_tracing(verbosity: u8) {
    let env_filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,colorant_picker=info,colorant_harmony=info",
        2 => "warn,colorant_picker=debug,colorant_harmony=debug",
        _ => "colorant_picker=trace,colorant_harmony=trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_the_level() {
        assert_eq!(default_directives(0), "warn");
        assert!(default_directives(1).contains("colorant_harmony=info"));
        assert!(default_directives(2).contains("colorant_picker=debug"));
        assert_eq!(default_directives(9), default_directives(3));
    }
}
