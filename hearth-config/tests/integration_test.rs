//! Integration tests for hearth-config

use hearth_config::{ConfigRegistry, DirResources, HostContext, NoResources, YamlDocument};
use std::sync::Arc;

fn data_dir() -> (tempfile::TempDir, Arc<HostContext>) {
    let dir = tempfile::tempdir().unwrap();
    let ctx = HostContext::new(dir.path(), Box::new(NoResources));
    (dir, ctx)
}

#[test]
fn register_load_edit_save_cycle() {
    let (dir, ctx) = data_dir();
    std::fs::write(dir.path().join("config.yml"), "server:\n  port: 25565\n").unwrap();

    let registry = ConfigRegistry::new(ctx.clone());
    let config = registry.register("config", YamlDocument::new(ctx, "config.yml"));

    // registration already performed a silent load
    assert_eq!(config.get_i64("server.port"), Some(25565));

    config.set("server.port", 40000);
    registry.save_all(false);

    let text = std::fs::read_to_string(dir.path().join("config.yml")).unwrap();
    assert!(text.contains("port: 40000"));
}

#[test]
fn bundled_resource_seeds_first_run() {
    let bundle = tempfile::tempdir().unwrap();
    std::fs::write(bundle.path().join("config.yml"), "motd: from bundle\n").unwrap();
    let data = tempfile::tempdir().unwrap();
    let ctx = HostContext::new(data.path(), Box::new(DirResources(bundle.path().into())));

    let registry = ConfigRegistry::new(ctx.clone());
    let config = registry.register("config", YamlDocument::new(ctx, "config.yml"));

    assert_eq!(config.get_string("motd"), Some("from bundle".to_owned()));
    assert!(data.path().join("config.yml").exists());
}

#[test]
fn bulk_load_survives_one_broken_document() {
    let (dir, ctx) = data_dir();
    std::fs::write(dir.path().join("good.yml"), "ok: true\n").unwrap();
    std::fs::write(dir.path().join("bad.yml"), "a: [broken\n").unwrap();

    let registry = ConfigRegistry::new(ctx.clone());
    registry.register("good", YamlDocument::new(ctx.clone(), "good.yml"));
    registry.register("bad", YamlDocument::new(ctx, "bad.yml"));

    // must not panic or abort on the broken document
    registry.load_all(true);
    assert_eq!(registry.get("good").unwrap().get_bool("ok"), Some(true));
}

#[test]
fn directory_scan_registers_by_stem() {
    let (dir, ctx) = data_dir();
    let sub = dir.path().join("modules");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(sub.join("arena.yml"), "enabled: true\n").unwrap();
    std::fs::write(sub.join("shop.yml"), "enabled: false\n").unwrap();
    std::fs::write(sub.join("README.md"), "not a config").unwrap();

    let registry = ConfigRegistry::new(ctx);
    let added = registry.register_directory("modules");

    let mut names: Vec<&str> = added.iter().map(|(n, _)| n.as_str()).collect();
    names.sort();
    assert_eq!(names, vec!["arena", "shop"]);
    assert_eq!(registry.get("arena").unwrap().get_bool("enabled"), Some(true));
}

#[test]
fn custom_extension_filter() {
    let (dir, ctx) = data_dir();
    let sub = dir.path().join("conf");
    std::fs::create_dir_all(&sub).unwrap();
    std::fs::write(sub.join("a.yaml"), "k: 1\n").unwrap();
    std::fs::write(sub.join("b.yml"), "k: 2\n").unwrap();

    let registry = ConfigRegistry::new(ctx).with_extension("yaml");
    let added = registry.register_directory("conf");
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].0, "a");
}
