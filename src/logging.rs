use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use wasm_bindgen::JsValue;

use crate::config::AppConfig;

/// Installs the panic hook and a console-backed tracing subscriber.
pub fn init(config: &AppConfig) {
    console_error_panic_hook::set_once();

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(true)
        .with_writer(ConsoleMakeWriter)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        web_sys::console::warn_1(&JsValue::from_str("tracing subscriber already installed"));
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and hands it to `console.*` on drop.
struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }
        let value = JsValue::from_str(line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&value);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&value);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&value);
        } else {
            web_sys::console::debug_1(&value);
        }
    }
}
