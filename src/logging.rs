//! Browser console logging.

use std::sync::Once;

static INIT: Once = Once::new();

/// Route `log` records to the browser console and install the panic hook.
///
/// Only the first call takes effect; later viewers on the same page share
/// the logger set up by the first.
pub fn init(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            log::warn!("a logger was already installed; keeping it");
        }
    });
}
