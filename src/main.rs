#![windows_subsystem = "windows"]

use iced::window;
use todogate::app::Todogate;
use tracing_subscriber::EnvFilter;

fn main() -> iced::Result {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("todogate=info")),
        )
        .init();

    // Initialize i18n by accessing the lazy static
    std::sync::LazyLock::force(&todogate::i18n::LANGUAGE_LOADER);

    iced::application(Todogate::new, Todogate::update, Todogate::view)
        .subscription(Todogate::subscription)
        .title(Todogate::title)
        .window(window::Settings {
            size: (480.0, 760.0).into(),
            min_size: Some((400.0, 560.0).into()),
            ..window::Settings::default()
        })
        .run()
}
