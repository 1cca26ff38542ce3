#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Write profiles to a directory and read them back through the store.

use std::time::Duration;

use {
    clipshare_auth::{KdfParams, derive_key_with_params},
    clipshare_config::{
        Config, ConfigStore, default_cert_file, default_key_file, extract_clipboard,
        load_config_from_file, write_file,
    },
};

const TEST_KDF: KdfParams = KdfParams {
    m_cost: 256,
    t_cost: 1,
    p_cost: 1,
};

fn full_config(dir: &std::path::Path) -> Config {
    let cert_file = dir.join("work.crt");
    std::fs::write(&cert_file, "-----BEGIN CERTIFICATE-----\n").unwrap();

    Config {
        listen_addr: ":1234".into(),
        server_addr: Some("clip.example.com".into()),
        key: Some(derive_key_with_params(b"hunter2", b"pepper-salt", &TEST_KDF).unwrap()),
        key_file: Some(dir.join("work.key")),
        cert_file: Some(cert_file),
        clipboard_dir: dir.join("clipboard"),
        clipboard_size_limit: Some(10 * 1024 * 1024),
        clipboard_count_limit: Some(101),
        file_size_limit: Some(123 * 1024),
        file_expire_after: Duration::from_secs(10 * 24 * 3600),
        web_ui: Some(false),
    }
}

#[test]
fn every_field_survives_a_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_dir(dir.path());
    let path = store.file_from_name("work");
    let config = full_config(dir.path());

    write_file(&config, &path).unwrap();
    let loaded = load_config_from_file(&path).unwrap();

    assert_eq!(
        loaded.server_addr.as_deref(),
        Some("clip.example.com:2586")
    );
    assert_eq!(
        Config {
            server_addr: config.server_addr.clone(),
            ..loaded.clone()
        },
        config
    );
    assert_eq!(
        loaded.key.as_ref().unwrap().bytes(),
        config.key.as_ref().unwrap().bytes()
    );
}

#[test]
fn explicit_port_is_not_doubled() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("p.conf");
    let config = Config {
        server_addr: Some("clip.example.com:443".into()),
        ..Config::default()
    };
    write_file(&config, &path).unwrap();
    assert_eq!(load_config_from_file(&path).unwrap(), config);
}

#[test]
fn store_lists_written_profiles() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_dir(dir.path());
    write_file(&full_config(dir.path()), &store.file_from_name("work")).unwrap();
    write_file(&Config::default(), &store.file_from_name("default")).unwrap();

    let all = store.all();
    let names: Vec<String> = all.keys().map(|p| extract_clipboard(p)).collect();
    assert_eq!(names, ["default", "work"]);
    assert!(all.values().all(Result::is_ok));
    assert!(all.keys().all(|p| p.is_absolute()));
}

#[test]
fn conventional_tls_files_feed_a_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_dir(dir.path());
    let path = store.file_from_name("myclip");
    std::fs::write(dir.path().join("myclip.crt"), "cert").unwrap();

    let config = Config {
        cert_file: default_cert_file(&path, true),
        key_file: default_key_file(&path, false),
        ..Config::default()
    };
    write_file(&config, &path).unwrap();

    let loaded = load_config_from_file(&path).unwrap();
    assert_eq!(loaded.cert_file, Some(dir.path().join("myclip.crt")));
    assert_eq!(loaded.key_file, Some(dir.path().join("myclip.key")));
}

#[test]
fn removed_cert_breaks_only_that_profile() {
    let dir = tempfile::tempdir().unwrap();
    let store = ConfigStore::with_dir(dir.path());
    write_file(&full_config(dir.path()), &store.file_from_name("work")).unwrap();
    write_file(&Config::default(), &store.file_from_name("default")).unwrap();
    std::fs::remove_file(dir.path().join("work.crt")).unwrap();

    let all = store.all();
    assert!(all[&store.file_from_name("work")].is_err());
    assert!(all[&store.file_from_name("default")].is_ok());
}
