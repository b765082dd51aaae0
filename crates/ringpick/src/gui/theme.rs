use gtk::gdk;
use gtk4 as gtk;

/// Keeps the window and drawing area see-through so the cleared center of
/// the ring shows whatever is behind the window.
pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.ringpick-window, .ringpick-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
