//! Community events desktop app. Run: cargo run -p eventapp-frontend --features desktop

#[cfg(feature = "desktop")]
fn main() {
    use eventapp_core::{log_bridge, AppConfig, Services};
    use eventapp_frontend::app::App;

    let config = match AppConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("eventapp: bad configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    log_bridge::init(config.log_level);
    let services = match Services::from_config(&config) {
        Ok(s) => s,
        Err(e) => {
            log::error!("eventapp: could not start services: {:#}", e);
            std::process::exit(1);
        }
    };
    dioxus::LaunchBuilder::desktop().with_context(services).launch(App);
}

#[cfg(not(feature = "desktop"))]
fn main() {
    eprintln!("eventapp-frontend was built without a UI platform.");
    eprintln!("Run: cargo run -p eventapp-frontend --features desktop");
    std::process::exit(1);
}
