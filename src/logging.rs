use tracing_subscriber::EnvFilter;

/// `NOVA_LOG` first, then `RUST_LOG` when `honor_rust_log`, then `fallback`.
/// Unparseable directives are skipped rather than aborting startup.
fn filter_from<F>(lookup: F, honor_rust_log: bool, fallback: &str) -> EnvFilter
where
    F: Fn(&str) -> Option<String>,
{
    let candidates = if honor_rust_log {
        &["NOVA_LOG", "RUST_LOG"][..]
    } else {
        &["NOVA_LOG"][..]
    };
    candidates
        .iter()
        .filter_map(|name| lookup(name))
        .find_map(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

/// Daemon logging. `component` is the binary's crate target and is raised to
/// debug alongside the library by default.
pub fn init_tracing(component: &str) {
    let filter = filter_from(
        |name| std::env::var(name).ok(),
        true,
        &format!("info,nova_bot=debug,{component}=debug"),
    );

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .compact()
        .try_init();
}

/// Quieter setup for the interactive front ends, which share the terminal
/// with the user. Only warnings and above unless `NOVA_LOG` says otherwise;
/// `RUST_LOG` is ignored so a shell-wide setting does not flood the prompt.
pub fn init_cli_tracing() {
    let filter = filter_from(|name| std::env::var(name).ok(), false, "warn");

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}
