use crate::ui::tui;

/// Leaves the alternate screen before the default hook prints, so the
/// panic message is readable.
pub fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::Tui::restore();
        tracing::error!(panic = %panic_info, "jukebox_panicked");
        hook(panic_info);
    }));
}
