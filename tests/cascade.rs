//! End-to-end tests of the configuration cascade against temporary directories.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use modshot_config::configuration::{
    defaults_document,
    CascadeDiagnostic,
    DocumentSource,
    FixedPreferencePath,
    Kind,
    PlatformCapabilities,
    PreferencePathProvider,
    CONFIGURATION_FILE_NAME,
};
use modshot_config::{ConfigurationCascade, ConfigurationError, ResolvedConfiguration};
use serde_json::{json, Value};
use tempfile::TempDir;


const NO_PLATFORM_FEATURES: PlatformCapabilities = PlatformCapabilities {
    native_renderer: false,
    big_picture_override: false,
};


struct Fixture {
    start_directory: TempDir,
    user_directory: TempDir,
}

impl Fixture {
    fn new() -> Self {
        Self {
            start_directory: tempfile::tempdir().unwrap(),
            user_directory: tempfile::tempdir().unwrap(),
        }
    }

    fn write_bundled(&self, contents: &str) {
        fs::write(
            self.start_directory.path().join(CONFIGURATION_FILE_NAME),
            contents,
        )
        .unwrap();
    }

    fn write_user(&self, contents: &str) {
        fs::write(self.user_configuration_path(), contents).unwrap();
    }

    fn user_configuration_path(&self) -> PathBuf {
        self.user_directory.path().join(CONFIGURATION_FILE_NAME)
    }

    fn cascade(&self, launch_tokens: &[&str]) -> ConfigurationCascade {
        ConfigurationCascade::new(
            self.start_directory.path(),
            launch_tokens.iter().copied(),
        )
        .with_environment(HashMap::<String, String>::new())
        .with_preference_paths(FixedPreferencePath::new(self.user_directory.path()))
        .with_platform(NO_PLATFORM_FEATURES)
    }

    fn resolve(&self) -> ResolvedConfiguration {
        self.cascade(&["prog"]).resolve().unwrap()
    }
}

fn environment(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}


#[derive(Clone, Default)]
struct RecordingPreferencePath {
    path: Option<PathBuf>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl PreferencePathProvider for RecordingPreferencePath {
    fn preference_path(&self, organization: &str, application: &str) -> Option<PathBuf> {
        self.requests
            .lock()
            .unwrap()
            .push((organization.to_string(), application.to_string()));
        self.path.clone()
    }
}


#[test]
fn empty_sources_resolve_to_schema_defaults() {
    let fixture = Fixture::new();
    let resolved = fixture.resolve();
    let configuration = resolved.configuration();

    assert!(resolved.diagnostics().is_empty());
    assert_eq!(resolved.raw_document(), &Value::Object(defaults_document()));

    assert_eq!(configuration.rgss_version, 1);
    assert!(!configuration.debug_mode);
    assert_eq!(configuration.display.default_screen_width, 640);
    assert_eq!(configuration.display.default_screen_height, 480);
    assert!(configuration.display.fixed_aspect_ratio);
    assert!(!configuration.display.fullscreen);
    assert_eq!(configuration.display.window_title, "");
    assert_eq!(configuration.display.fixed_framerate, 0);
    assert!(configuration.display.integer_scaling.last_mile_scaling);
    assert!(configuration.display.enable_settings);
    assert_eq!(configuration.display.enable_blitting, !cfg!(windows));
    assert!(configuration.display.font_substitutions.is_empty());
    assert_eq!(configuration.paths.game_folder, ".");
    assert_eq!(
        configuration.paths.game_root,
        dunce::canonicalize(fixture.start_directory.path()).unwrap()
    );
    assert_eq!(configuration.paths.data_path_org, ".");
    assert_eq!(configuration.paths.data_path_app, "Oneshot");
    assert_eq!(configuration.paths.exec_name, "modshot");
    assert!(configuration.paths.path_cache);
    assert!(!configuration.paths.allow_symlinks);
    assert!(configuration.paths.rtps.is_empty());
    assert_eq!(configuration.audio.sound_effect_source_count, 6);
    assert_eq!(configuration.audio.midi.sound_font, "");
    assert!(configuration.scripting.use_script_names);
    assert_eq!(configuration.scripting.script_load_paths, vec!["rubygems"]);
    assert!(!configuration.scripting.jit.enabled);
    assert_eq!(configuration.scripting.jit.verbose_level, 0);
    assert_eq!(configuration.scripting.jit.max_cache, 100);
    assert_eq!(configuration.scripting.jit.min_calls, 10000);
    assert_eq!(configuration.bindings.action, "Action");
    assert_eq!(configuration.bindings.cancel, "Cancel");
    assert_eq!(configuration.bindings.menu, "Menu");
    assert_eq!(configuration.bindings.items, "Items");
    assert_eq!(configuration.bindings.run, "Run");
    assert_eq!(configuration.bindings.deactivate, "Deactivate");
    assert_eq!(configuration.bindings.l, "L");
    assert_eq!(configuration.bindings.r, "R");
    assert_eq!(configuration.game.title, "OneShot");
    assert_eq!(configuration.game.scripts, "Data/xScripts.rxdata");
    assert!(!configuration.launch.editor.debug);
    assert!(!configuration.launch.console_visible);
    assert!(!configuration.launch.manual_folder_select);
    assert_eq!(configuration.launch.arguments, vec!["prog"]);
}

#[test]
fn empty_documents_match_absent_documents() {
    let absent = Fixture::new();
    let empty = Fixture::new();
    empty.write_bundled("{}");
    empty.write_user("{}");

    let from_absent = absent.resolve();
    let from_empty = empty.resolve();

    assert_eq!(from_absent.raw_document(), from_empty.raw_document());
    assert_eq!(
        from_absent.configuration().display,
        from_empty.configuration().display
    );
    assert_eq!(
        from_absent.configuration().scripting,
        from_empty.configuration().scripting
    );
    assert_eq!(
        from_absent.configuration().bindings,
        from_empty.configuration().bindings
    );
    assert!(from_empty.diagnostics().is_empty());
}

#[test]
fn unrecognised_keys_never_enter_the_result() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "notAKey": 5, "fullscreen": true }"#);
    fixture.write_user(r#"{ "alsoNotAKey": [1, 2] }"#);

    let resolved = fixture.resolve();
    let raw = resolved.raw_document().as_object().unwrap();

    assert!(!raw.contains_key("notAKey"));
    assert!(!raw.contains_key("alsoNotAKey"));
    assert!(resolved.configuration().display.fullscreen);
    assert!(resolved.diagnostics().is_empty());
}

#[test]
fn wrong_kind_is_rejected_with_one_diagnostic() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "rgssVersion": "abc" }"#);

    let resolved = fixture.resolve();

    assert_eq!(resolved.configuration().rgss_version, 1);
    assert_eq!(resolved.raw_document()["rgssVersion"], json!(1));
    assert_eq!(resolved.diagnostics().len(), 1);

    match &resolved.diagnostics()[0] {
        CascadeDiagnostic::RejectedValue {
            document,
            diagnostic,
        } => {
            assert_eq!(*document, DocumentSource::Bundled);
            assert_eq!(diagnostic.key, "rgssVersion");
            assert_eq!(diagnostic.expected, Kind::Number);
            assert_eq!(diagnostic.found, Kind::String);
        }
        other => panic!("unexpected diagnostic {:?}", other),
    }
}

#[test]
fn bundled_binding_names_merge_key_by_key() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "bindingNames": { "action": "Fire" } }"#);

    let resolved = fixture.resolve();
    let bindings = &resolved.configuration().bindings;

    assert_eq!(bindings.action, "Fire");
    assert_eq!(bindings.cancel, "Cancel");
    assert_eq!(bindings.menu, "Menu");
    assert_eq!(bindings.items, "Items");
    assert_eq!(bindings.run, "Run");
    assert_eq!(bindings.deactivate, "Deactivate");
    assert_eq!(bindings.l, "L");
    assert_eq!(bindings.r, "R");
}

#[test]
fn user_document_does_not_descend_into_binding_names() {
    let fixture = Fixture::new();
    fixture.write_user(r#"{ "bindingNames": { "action": "Fire" }, "vsync": true }"#);

    let resolved = fixture.resolve();

    assert_eq!(resolved.configuration().bindings.action, "Action");
    assert!(resolved.configuration().display.vsync);
}

#[test]
fn user_document_overrides_bundled_document() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "windowTitle": "Bundled", "fullscreen": true, "RTP": ["A", "B"] }"#);
    fixture.write_user(r#"{ "windowTitle": "Mine", "RTP": ["C"], "useScriptNames": 0 }"#);

    let resolved = fixture.resolve();
    let configuration = resolved.configuration();

    assert_eq!(configuration.display.window_title, "Mine");
    assert!(configuration.display.fullscreen);
    assert_eq!(configuration.paths.rtps, vec!["C"]);
    assert!(!configuration.scripting.use_script_names);
    assert_eq!(
        configuration.paths.user_configuration_path,
        Some(fixture.user_configuration_path())
    );
}

#[test]
fn early_fields_are_not_reread_after_the_user_document() {
    let fixture = Fixture::new();
    fixture.write_user(r#"{ "rgssVersion": 2, "JITEnable": true, "defScreenW": 800 }"#);

    let resolved = fixture.resolve();
    let configuration = resolved.configuration();

    assert_eq!(configuration.rgss_version, 1);
    assert!(!configuration.scripting.jit.enabled);
    assert_eq!(configuration.display.default_screen_width, 640);

    // The merged document still records what the user asked for.
    assert_eq!(resolved.raw_document()["rgssVersion"], json!(2));
}

#[test]
fn native_renderer_preference_follows_the_environment_on_gated_platforms() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "preferMetalRenderer": false }"#);
    let gated = PlatformCapabilities {
        native_renderer: true,
        big_picture_override: false,
    };

    let enabled = fixture
        .cascade(&["prog"])
        .with_platform(gated)
        .with_environment(environment(&[("MKXPZ_MACOS_METAL", "1")]))
        .resolve()
        .unwrap();
    assert!(enabled.configuration().display.prefer_metal_renderer);

    let unrecognised = fixture
        .cascade(&["prog"])
        .with_platform(gated)
        .with_environment(environment(&[("MKXPZ_MACOS_METAL", "yes")]))
        .resolve()
        .unwrap();
    assert!(!unrecognised.configuration().display.prefer_metal_renderer);
}

#[test]
fn native_renderer_preference_is_ignored_on_other_platforms() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "preferMetalRenderer": true }"#);

    let resolved = fixture
        .cascade(&["prog"])
        .with_environment(environment(&[("MKXPZ_MACOS_METAL", "1")]))
        .resolve()
        .unwrap();

    assert_eq!(
        resolved.configuration().display.prefer_metal_renderer,
        cfg!(all(target_os = "macos", target_arch = "aarch64"))
    );
}

#[test]
fn big_picture_override_forces_fullscreen_when_compiled_in() {
    let fixture = Fixture::new();
    let steam = PlatformCapabilities {
        native_renderer: false,
        big_picture_override: true,
    };

    let forced = fixture
        .cascade(&["prog"])
        .with_platform(steam)
        .with_environment(environment(&[("SteamTenfoot", "1")]))
        .resolve()
        .unwrap();
    assert!(forced.configuration().display.fullscreen);

    let without_feature = fixture
        .cascade(&["prog"])
        .with_environment(environment(&[("SteamTenfoot", "1")]))
        .resolve()
        .unwrap();
    assert!(!without_feature.configuration().display.fullscreen);
}

#[test]
fn console_and_folder_select_come_from_the_environment() {
    let fixture = Fixture::new();

    let debug_default = fixture.cascade(&["prog", "debug"]).resolve().unwrap();
    assert!(debug_default.configuration().launch.console_visible);

    let overridden = fixture
        .cascade(&["prog", "debug"])
        .with_environment(environment(&[
            ("MKXPZ_WINDOWS_CONSOLE", "0"),
            ("MKXPZ_FOLDER_SELECT", "1"),
        ]))
        .resolve()
        .unwrap();
    assert!(!overridden.configuration().launch.console_visible);
    assert!(overridden.configuration().launch.manual_folder_select);
}

#[test]
fn ranged_fields_are_clamped() {
    let high = Fixture::new();
    high.write_bundled(r#"{ "rgssVersion": 9, "SESourceCount": 200 }"#);
    let high = high.resolve();
    assert_eq!(high.configuration().rgss_version, 3);
    assert_eq!(high.configuration().audio.sound_effect_source_count, 64);

    let low = Fixture::new();
    low.write_bundled(r#"{ "SESourceCount": 0 }"#);
    let low = low.resolve();
    assert_eq!(low.configuration().audio.sound_effect_source_count, 1);
}

#[test]
fn screen_size_is_derived_from_the_rgss_version() {
    let first = Fixture::new();
    first.write_bundled(r#"{ "rgssVersion": 1 }"#);
    let first = first.resolve();
    assert_eq!(first.configuration().display.default_screen_width, 640);
    assert_eq!(first.configuration().display.default_screen_height, 480);

    let second = Fixture::new();
    second.write_bundled(r#"{ "rgssVersion": 2 }"#);
    let second = second.resolve();
    assert_eq!(second.configuration().display.default_screen_width, 544);
    assert_eq!(second.configuration().display.default_screen_height, 416);
}

#[test]
fn malformed_user_document_behaves_like_an_absent_one() {
    let absent = Fixture::new();
    let malformed = Fixture::new();
    malformed.write_user(r#"{ "fullscreen": true, "#);

    let from_absent = absent.resolve();
    let from_malformed = malformed.resolve();

    assert_eq!(from_absent.raw_document(), from_malformed.raw_document());
    assert_eq!(
        from_absent.configuration().display,
        from_malformed.configuration().display
    );
    assert_eq!(
        from_absent.configuration().audio,
        from_malformed.configuration().audio
    );

    assert_eq!(from_malformed.diagnostics().len(), 1);
    match &from_malformed.diagnostics()[0] {
        CascadeDiagnostic::UnreadableDocument { document, path, .. } => {
            assert_eq!(*document, DocumentSource::User);
            assert_eq!(path, &malformed.user_configuration_path());
        }
        other => panic!("unexpected diagnostic {:?}", other),
    }
}

#[test]
fn malformed_bundled_document_is_not_fatal() {
    let fixture = Fixture::new();
    fixture.write_bundled("this is not json");
    fixture.write_user(r#"{ "vsync": true }"#);

    let resolved = fixture.resolve();

    assert!(resolved.configuration().display.vsync);
    assert!(matches!(
        resolved.diagnostics(),
        [CascadeDiagnostic::UnreadableDocument {
            document: DocumentSource::Bundled,
            ..
        }]
    ));
}

#[test]
fn commented_documents_with_trailing_commas_are_used() {
    let fixture = Fixture::new();
    fixture.write_bundled(
        "{\n  // ship in fullscreen\n  \"fullscreen\": true,\n  \"SESourceCount\": 12,\n  bindingNames: { action: 'Fire', },\n}\n",
    );
    fixture.write_user("/* player overrides */\n{ vsync: true, }");

    let resolved = fixture.resolve();
    let configuration = resolved.configuration();

    assert!(resolved.diagnostics().is_empty());
    assert!(configuration.display.fullscreen);
    assert!(configuration.display.vsync);
    assert_eq!(configuration.audio.sound_effect_source_count, 12);
    assert_eq!(configuration.bindings.action, "Fire");
}

#[test]
fn launch_tokens_are_classified() {
    let fixture = Fixture::new();

    let resolved = fixture
        .cascade(&["prog", "debug", "--seed", "debug"])
        .resolve()
        .unwrap();
    let launch = &resolved.configuration().launch;

    assert!(launch.editor.debug);
    assert!(!launch.editor.battle_test);
    assert_eq!(launch.arguments, vec!["prog", "--seed"]);

    let battle_test = fixture.cascade(&["prog", "btest"]).resolve().unwrap();
    assert!(battle_test.configuration().launch.editor.battle_test);
    assert_eq!(
        battle_test.configuration().launch.arguments,
        vec!["prog", "btest"]
    );
}

#[test]
fn game_folder_becomes_the_game_root() {
    let fixture = Fixture::new();
    fs::create_dir(fixture.start_directory.path().join("game")).unwrap();
    fixture.write_bundled(r#"{ "gameFolder": "game" }"#);

    let resolved = fixture.resolve();
    let paths = &resolved.configuration().paths;
    let game_root = dunce::canonicalize(fixture.start_directory.path().join("game")).unwrap();

    assert_eq!(paths.game_folder, "game");
    assert_eq!(paths.game_root, game_root);
    assert_eq!(
        paths.resolve_in_game_folder("Graphics/Icon.png"),
        game_root.join("Graphics/Icon.png")
    );
}

#[test]
fn missing_game_folder_aborts_resolution() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "gameFolder": "does-not-exist" }"#);

    let error = fixture.cascade(&["prog"]).resolve().unwrap_err();
    let ConfigurationError::GameFolderUnavailable { path, .. } = error;

    assert_eq!(path, fixture.start_directory.path().join("does-not-exist"));
}

#[test]
fn empty_game_folder_stays_in_the_start_directory() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "gameFolder": "" }"#);

    let resolved = fixture.resolve();

    assert_eq!(
        resolved.configuration().paths.game_root,
        dunce::canonicalize(fixture.start_directory.path()).unwrap()
    );
}

#[test]
fn preference_path_uses_the_early_identity_fields() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "dataPathOrg": "", "dataPathApp": "" }"#);
    fixture.write_user(r#"{ "fullscreen": true }"#);

    let provider = RecordingPreferencePath {
        path: Some(fixture.user_directory.path().to_path_buf()),
        ..RecordingPreferencePath::default()
    };
    let requests = Arc::clone(&provider.requests);

    let resolved = fixture
        .cascade(&["prog"])
        .with_preference_paths(provider)
        .resolve()
        .unwrap();

    assert_eq!(
        *requests.lock().unwrap(),
        vec![(".".to_string(), "OneShot".to_string())]
    );
    assert_eq!(resolved.configuration().paths.data_path_org, ".");
    assert_eq!(resolved.configuration().paths.data_path_app, "OneShot");
    assert!(resolved.configuration().display.fullscreen);
}

#[test]
fn missing_preference_path_skips_the_user_document() {
    let fixture = Fixture::new();
    fixture.write_user(r#"{ "fullscreen": true }"#);

    let resolved = fixture
        .cascade(&["prog"])
        .with_preference_paths(RecordingPreferencePath::default())
        .resolve()
        .unwrap();
    let paths = &resolved.configuration().paths;

    assert!(!resolved.configuration().display.fullscreen);
    assert_eq!(paths.custom_data_path, None);
    assert_eq!(paths.user_configuration_path, None);
}

#[test]
fn shared_configuration_is_readable_from_other_threads() {
    let fixture = Fixture::new();
    fixture.write_bundled(r#"{ "SESourceCount": 12 }"#);

    let shared = fixture.resolve().into_shared();
    let reader = {
        let shared = Arc::clone(&shared);
        std::thread::spawn(move || shared.audio.sound_effect_source_count)
    };

    assert_eq!(reader.join().unwrap(), 12);
    assert_eq!(shared.audio.sound_effect_source_count, 12);
}
