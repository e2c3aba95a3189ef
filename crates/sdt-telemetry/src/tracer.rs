//! Subscriber and tracer provider setup

use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::{SimpleSpanProcessor, TracerProvider};
use sdt_core::{LogFormat, ObservabilityConfig};
use std::sync::{Arc, Mutex, OnceLock};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

static TRACER_PROVIDER: OnceLock<Arc<TracerProvider>> = OnceLock::new();

/// Span processor builders registered before initialization
type ProcessorBuilder = Box<dyn FnOnce() -> SimpleSpanProcessor + Send>;
static SPAN_PROCESSOR_BUILDERS: Mutex<Option<Vec<ProcessorBuilder>>> =
    Mutex::new(Some(Vec::new()));

/// Settings for `init_telemetry`
#[derive(Debug, Clone)]
pub struct TelemetryOptions {
    /// Name given to the OpenTelemetry tracer
    pub service_name: String,
    pub log_format: LogFormat,
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,
}

impl Default for TelemetryOptions {
    fn default() -> Self {
        Self {
            service_name: crate::attributes::SYSTEM_NAME.to_string(),
            log_format: LogFormat::Text,
            default_filter: "info".to_string(),
        }
    }
}

impl From<&ObservabilityConfig> for TelemetryOptions {
    fn from(config: &ObservabilityConfig) -> Self {
        Self {
            service_name: config.service_name.clone(),
            log_format: config.log_format,
            default_filter: config.log_filter.clone(),
        }
    }
}

impl TelemetryOptions {
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Register a span processor builder to be used when telemetry is initialized.
///
/// Exporters (OTLP, Jaeger, a test collector) plug in here. Must be called
/// before `init_telemetry()`; later registrations are dropped with a warning.
///
/// # Example
///
/// ```ignore
/// use sdt_telemetry::{init_telemetry, register_span_processor, TelemetryOptions};
/// use opentelemetry_sdk::trace::SimpleSpanProcessor;
///
/// register_span_processor(Box::new(|| {
///     SimpleSpanProcessor::new(Box::new(/* your exporter */))
/// }));
/// init_telemetry(&TelemetryOptions::default());
/// ```
pub fn register_span_processor(builder: ProcessorBuilder) {
    let mut builders = SPAN_PROCESSOR_BUILDERS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());

    if let Some(ref mut vec) = *builders {
        vec.push(builder);
    } else {
        tracing::warn!("Attempted to register span processor after telemetry initialization");
    }
}

/// Install the global subscriber.
///
/// Layers: OpenTelemetry (with every registered span processor), a text or
/// JSON formatter, and an `EnvFilter` that prefers `RUST_LOG` over
/// `options.default_filter`. Calling it a second time is a no-op.
pub fn init_telemetry(options: &TelemetryOptions) {
    // Taking the builders marks telemetry as initialized
    let Some(builders) = SPAN_PROCESSOR_BUILDERS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .take()
    else {
        return;
    };

    let mut provider_builder = TracerProvider::builder();
    for builder in builders {
        provider_builder = provider_builder.with_span_processor(builder());
    }
    let tracer_provider = provider_builder.build();
    let tracer = tracer_provider.tracer(options.service_name.clone());
    let _ = TRACER_PROVIDER.set(Arc::new(tracer_provider));

    let telemetry_layer = tracing_opentelemetry::layer().with_tracer(tracer);

    let (json_layer, text_layer) = match options.log_format {
        LogFormat::Json => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_target(true),
            ),
            None,
        ),
        LogFormat::Text => (
            None,
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_thread_ids(false)
                    .with_line_number(true),
            ),
        ),
    };

    let result = tracing_subscriber::registry()
        .with(telemetry_layer)
        .with(json_layer)
        .with(text_layer)
        .with(options.env_filter())
        .try_init();

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {}", e);
    }
}

/// Get the global tracer provider if initialized
pub fn tracer_provider() -> Option<Arc<TracerProvider>> {
    TRACER_PROVIDER.get().cloned()
}
