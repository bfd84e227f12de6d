//! Tests for the backend application bootstrap, covering server assembly and
//! readiness signalling.

use std::path::Path;

use super::{HealthState, ServerConfig, create_server};
use actix_web::web;
use avatar_backend::settings::AvatarSettings;
use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn health_state() -> web::Data<HealthState> {
    web::Data::new(HealthState::new())
}

#[fixture]
fn output_root() -> TempDir {
    TempDir::new().expect("temporary output root")
}

#[fixture]
fn config(output_root: TempDir) -> (ServerConfig, TempDir) {
    let bind_addr = "127.0.0.1:0".parse().expect("literal address");
    let config = ServerConfig::new(bind_addr, output_root.path().join("generated_images"))
        .with_rng_seed(Some(7));
    (config, output_root)
}

#[rstest]
#[actix_rt::test]
async fn create_server_marks_ready(
    health_state: web::Data<HealthState>,
    config: (ServerConfig, TempDir),
) {
    let (config, _root) = config;
    assert!(!health_state.is_ready(), "state should start unready");

    let _server = create_server(health_state.clone(), config).expect("server should build");

    assert!(
        health_state.is_ready(),
        "server creation should mark readiness"
    );
}

#[rstest]
fn config_keeps_overrides(config: (ServerConfig, TempDir)) {
    let (config, root) = config;
    let config = config.with_font_path(Some(root.path().join("missing.ttf")));
    assert_eq!(config.bind_addr().ip().to_string(), "127.0.0.1");
    assert!(config.output_root().ends_with("generated_images"));
    assert_eq!(config.rng_seed, Some(7));
    assert!(config.font_path.is_some());
}

#[rstest]
fn config_from_settings_carries_every_field() {
    let settings = AvatarSettings {
        host: Some("127.0.0.1".to_owned()),
        port: Some(8088),
        output_root: Some("/srv/avatars".into()),
        font_path: Some("/opt/fonts/Bold.ttf".into()),
        rng_seed: Some(11),
    };

    let config = ServerConfig::from_settings(&settings).expect("settings resolve");
    assert_eq!(config.bind_addr().port(), 8088);
    assert_eq!(config.output_root(), Path::new("/srv/avatars"));
    assert_eq!(config.font_path.as_deref(), Some(Path::new("/opt/fonts/Bold.ttf")));
    assert_eq!(config.rng_seed, Some(11));
}
