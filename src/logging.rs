use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "CODE_TUTOR_LOG";

fn default_directives(component: &str) -> String {
    if component == "code_tutor" {
        "info,code_tutor=debug".to_string()
    } else {
        format!("info,code_tutor=debug,{component}=debug")
    }
}

/// Installs the global fmt subscriber. `CODE_TUTOR_LOG` wins over `RUST_LOG`;
/// a second call is a no-op.
pub fn init_tracing(component: &str) {
    let filter = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| EnvFilter::try_new(value).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(component)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_do_not_repeat_the_crate() {
        assert_eq!(default_directives("code_tutor"), "info,code_tutor=debug");
        assert_eq!(
            default_directives("tower_http"),
            "info,code_tutor=debug,tower_http=debug"
        );
    }

    #[test]
    fn init_twice_is_harmless() {
        init_tracing("code_tutor");
        init_tracing("code_tutor");
    }
}
