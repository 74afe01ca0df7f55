//! Integration tests for hearth-lang

use hearth_config::{HostContext, NoResources};
use hearth_lang::{LangDocument, LangRegistry, Locale, tags_for_language};
use std::sync::Arc;

fn data_dir() -> (tempfile::TempDir, Arc<HostContext>) {
    let dir = tempfile::tempdir().unwrap();
    let ctx = HostContext::new(dir.path(), Box::new(NoResources));
    (dir, ctx)
}

fn locale(tag: &str) -> Locale {
    Locale::parse(tag).unwrap()
}

fn write_lang(dir: &std::path::Path, name: &str, contents: &str) {
    let lang_dir = dir.join("lang");
    std::fs::create_dir_all(&lang_dir).unwrap();
    std::fs::write(lang_dir.join(name), contents).unwrap();
}

#[test]
fn placeholder_round_trip() {
    let (dir, ctx) = data_dir();
    write_lang(
        dir.path(),
        "en.yml",
        "greeting: \"Hello %name%!\"\nplaceholders:\n  name: World\n",
    );

    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.set_default_locale(locale("en"), en);

    assert_eq!(registry.resolve(Some(&locale("en")), "greeting", "?"), "Hello World!");
}

#[test]
fn global_replacements_apply_before_per_document() {
    let (dir, ctx) = data_dir();
    write_lang(
        dir.path(),
        "en.yml",
        "motd: \"{server} says: hi %name%\"\nplaceholders:\n  name: World\n",
    );

    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.set_default_locale(locale("en"), en);
    registry.replace_global("{server}", "Hearth");

    assert_eq!(registry.value("motd"), "Hearth says: hi World");
}

#[test]
fn global_map_wins_on_overlapping_tokens() {
    let (dir, ctx) = data_dir();
    write_lang(
        dir.path(),
        "en.yml",
        "motd: \"hi %name%\"\nplaceholders:\n  name: PerDocument\n",
    );

    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.set_default_locale(locale("en"), en);
    // global targets the same token; it runs first, so the per-document
    // pass finds nothing left to replace
    registry.replace_global("%name%", "Global");

    assert_eq!(registry.value("motd"), "hi Global");
}

#[test]
fn request_for_unbound_locale_falls_back_to_default() {
    let (dir, ctx) = data_dir();
    write_lang(dir.path(), "en.yml", "greeting: hello\n");

    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.set_default_locale(locale("en"), en);

    assert_eq!(registry.resolve(Some(&locale("fr")), "greeting", "?"), "hello");
}

#[test]
fn directory_scan_expands_codes_and_shares_documents() {
    let (dir, ctx) = data_dir();
    write_lang(dir.path(), "en.yml", "greeting: hello\n");
    write_lang(dir.path(), "de.yml", "greeting: hallo\n");
    write_lang(dir.path(), "notes.txt", "ignored");
    write_lang(dir.path(), "xx.yml", "greeting: unknowable\n");

    let registry = LangRegistry::new(ctx);
    let added = registry.add_all_from_directory("lang");

    let mut codes: Vec<&str> = added.iter().map(|(c, _)| c.as_str()).collect();
    codes.sort();
    assert_eq!(codes, vec!["de", "en"]);

    // every tag of a code shares one document instance
    let en_doc = registry.get(&locale("en")).unwrap();
    for tag in tags_for_language("en").unwrap() {
        assert!(Arc::ptr_eq(&registry.get(tag).unwrap(), &en_doc));
    }

    assert_eq!(registry.resolve(Some(&locale("de-DE")), "greeting", "?"), "hallo");
    assert_eq!(registry.resolve(Some(&locale("en-GB")), "greeting", "?"), "hello");
}

#[test]
fn stale_placeholders_rebuild_once_per_reload() {
    let (dir, ctx) = data_dir();
    write_lang(
        dir.path(),
        "en.yml",
        "greeting: \"hi %name%\"\nplaceholders:\n  name: First\n",
    );

    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.set_default_locale(locale("en"), en.clone());
    assert!(en.placeholders().is_stale());

    assert_eq!(registry.value("greeting"), "hi First");
    assert!(!en.placeholders().is_stale());

    // mutating the section in memory is not picked up without a reload
    en.set("placeholders.name", "Second");
    assert_eq!(registry.value("greeting"), "hi First");

    // a reload marks the cache stale and the next lookup rebuilds
    write_lang(
        dir.path(),
        "en.yml",
        "greeting: \"hi %name%\"\nplaceholders:\n  name: Third\n",
    );
    en.load(false).unwrap();
    assert!(en.placeholders().is_stale());
    assert_eq!(registry.value("greeting"), "hi Third");
}

#[test]
fn bulk_io_deduplicates_shared_documents() {
    let (dir, ctx) = data_dir();
    write_lang(dir.path(), "en.yml", "greeting: hello\n");

    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.add_language_by_code(en.clone(), "en", &[]);
    assert!(registry.len() > 1);

    en.set("edited", true);
    registry.save_all(false);

    // all tags still point at one document; the save ran once and wrote
    // the edit exactly once
    let text = std::fs::read_to_string(dir.path().join("lang").join("en.yml")).unwrap();
    assert_eq!(text.matches("edited: true").count(), 1);
    assert_eq!(registry.locales().len(), registry.len());
}

#[test]
fn shutdown_flushes_language_files() {
    let (dir, ctx) = data_dir();
    let registry = LangRegistry::new(ctx.clone());
    let en = Arc::new(LangDocument::new(ctx, "lang/en.yml"));
    registry.set_default_locale(locale("en"), en.clone());

    en.set("farewell", "bye");
    registry.shutdown();

    let text = std::fs::read_to_string(dir.path().join("lang").join("en.yml")).unwrap();
    assert!(text.contains("farewell: bye"));
}
