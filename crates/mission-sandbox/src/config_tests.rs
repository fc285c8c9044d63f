// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial(docker_image_env)]
fn defaults_to_built_in_image() {
    std::env::remove_var("OPENJULES_DOCKER_IMAGE");
    let resolved = resolve_docker_config(&DockerSettings::default());
    assert_eq!(resolved.image, DEFAULT_IMAGE);
}

#[test]
#[serial(docker_image_env)]
fn settings_image_overrides_default() {
    std::env::remove_var("OPENJULES_DOCKER_IMAGE");
    let settings = DockerSettings { image: Some("custom:latest".to_string()), ..DockerSettings::default() };
    let resolved = resolve_docker_config(&settings);
    assert_eq!(resolved.image, "custom:latest");
}

#[test]
#[serial(docker_image_env)]
fn env_var_overrides_settings() {
    std::env::set_var("OPENJULES_DOCKER_IMAGE", "env:latest");
    let settings = DockerSettings { image: Some("custom:latest".to_string()), ..DockerSettings::default() };
    let resolved = resolve_docker_config(&settings);
    std::env::remove_var("OPENJULES_DOCKER_IMAGE");
    assert_eq!(resolved.image, "env:latest");
}

#[test]
#[serial(sandbox_persist_env)]
fn persist_env_override() {
    std::env::set_var("OPENJULES_SANDBOX_PERSIST", "true");
    assert!(resolve_persist(false));
    std::env::remove_var("OPENJULES_SANDBOX_PERSIST");
    assert!(!resolve_persist(false));
}
