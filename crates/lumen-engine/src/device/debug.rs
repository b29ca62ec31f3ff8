use glow::HasContext;

/// Maps a `DEBUG_SEVERITY_*` value to a log level.
pub(crate) fn level_for(severity: u32) -> log::Level {
    match severity {
        glow::DEBUG_SEVERITY_HIGH => log::Level::Error,
        glow::DEBUG_SEVERITY_MEDIUM => log::Level::Warn,
        glow::DEBUG_SEVERITY_LOW => log::Level::Info,
        _ => log::Level::Debug,
    }
}

fn message_type(kind: u32) -> &'static str {
    match kind {
        glow::DEBUG_TYPE_ERROR => "error",
        glow::DEBUG_TYPE_DEPRECATED_BEHAVIOR => "deprecated",
        glow::DEBUG_TYPE_UNDEFINED_BEHAVIOR => "undefined behavior",
        glow::DEBUG_TYPE_PORTABILITY => "portability",
        glow::DEBUG_TYPE_PERFORMANCE => "performance",
        _ => "other",
    }
}

/// Enables synchronous debug output and forwards every message to `log`.
///
/// Returns false when the context has no debug output support.
pub(crate) fn install(gl: &mut glow::Context) -> bool {
    if !gl.supports_debug() {
        return false;
    }

    unsafe {
        gl.enable(glow::DEBUG_OUTPUT);
        gl.enable(glow::DEBUG_OUTPUT_SYNCHRONOUS);
        gl.debug_message_callback(|_source, kind, id, severity, message| {
            log::log!(
                target: "lumen::gl",
                level_for(severity),
                "[{} #{id}] {message}",
                message_type(kind)
            );
        });
    }
    true
}
