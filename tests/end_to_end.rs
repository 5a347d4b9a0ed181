//! Full orchestrator runs against a scratch source tree.
use std::fs;
use std::path::{Path, PathBuf};

use splice::engine::{self, ApplyOptions};
use splice::inject::Anchor;
use splice::matcher::AnchorSpec;
use splice::recipes;
use splice::report::Disposition;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn fix_imports_rewrites_only_the_import_line() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/models/mod.rs", "pub struct User {\n    pub id: i64,\n}\n");
    let target = write(
        dir.path(),
        "src/auth/mod.rs",
        "use actix_web::web;\nuse crate::admin::user::User;\nuse serde::Deserialize;\n\npub fn login() {}\n",
    );

    let pass = recipes::fix_imports(dir.path().to_path_buf(), "User".into(), "crate".into()).unwrap();
    let report = engine::apply(&target, &[pass], ApplyOptions::default()).unwrap();
    assert!(report.success);
    assert!(report.persisted);
    assert_eq!(
        fs::read_to_string(&target).unwrap(),
        "use actix_web::web;\nuse crate::models::User;\nuse serde::Deserialize;\n\npub fn login() {}\n",
    );
}

#[test]
fn inject_services_round_trips_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let target = write(
        dir.path(),
        "src/main.rs",
        "fn main() {\n    HttpServer::new(|| {\n        App::new()\n            .wrap(middleware())\n    })\n}\n",
    );

    let anchor = Anchor {
        tag: "services".into(),
        marker: AnchorSpec::Literal("App::new()".into()),
        entries: vec![
            ".service(app::auth::login)".into(),
            ".service(app::auth::logout)".into(),
        ],
        retire: Some(regex::Regex::new(r"^\.service\(app::auth::").unwrap()),
    };
    let passes = vec![recipes::inject_block(anchor)];

    engine::apply(&target, &passes, ApplyOptions::default()).unwrap();
    let patched = fs::read_to_string(&target).unwrap();
    assert_eq!(
        patched,
        "fn main() {\n    HttpServer::new(|| {\n        App::new()\n            .service(app::auth::login)\n            .service(app::auth::logout)\n            .wrap(middleware())\n    })\n}\n",
    );

    // Second run over the patched file converges and does not rewrite.
    let report = engine::apply(&target, &passes, ApplyOptions::default()).unwrap();
    assert!(report.success);
    assert!(!report.persisted);
    assert_eq!(fs::read_to_string(&target).unwrap(), patched);
    assert_eq!(patched.matches("app::auth::login").count(), 1);
}

#[test]
fn required_anchor_missing_fails_and_preserves_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let original = "fn main() {\n    plain();\n}\n";
    let target = write(dir.path(), "src/main.rs", original);

    let anchor = Anchor {
        tag: "services".into(),
        marker: AnchorSpec::Literal("App::new()".into()),
        entries: vec![".service(app::auth::login)".into()],
        retire: None,
    };
    let report =
        engine::apply(&target, &[recipes::inject_block(anchor)], ApplyOptions::default()).unwrap();
    assert!(!report.success);
    assert!(!report.persisted);
    assert_eq!(report.outcomes[0].disposition, Disposition::Failed);
    let reason = report.outcomes[0].reason.as_deref().unwrap();
    assert!(reason.contains("App::new()"), "reason names the anchor: {reason}");
    assert_eq!(fs::read_to_string(&target).unwrap(), original);
}

#[test]
fn failed_optional_injection_does_not_retire_tagged_lines() {
    let dir = tempfile::tempdir().unwrap();
    let target = write(
        dir.path(),
        "src/main.rs",
        "fn main() {\n    builder()\n        .service(app::auth::stale)\n}\nfn legacy() {\n    old();\n}\n",
    );

    // The marker is absent, so the injection fails; its retirement step must
    // not survive into the run's output.
    let anchor = Anchor {
        tag: "services".into(),
        marker: AnchorSpec::Literal("App::new()".into()),
        entries: vec![".service(app::auth::login)".into()],
        retire: Some(regex::Regex::new(r"^\.service\(app::auth::").unwrap()),
    };
    let passes = vec![
        recipes::inject_block(anchor).optional(),
        recipes::strip_block(AnchorSpec::FnHeader("fn legacy(".into())),
    ];
    let report = engine::apply(&target, &passes, ApplyOptions::default()).unwrap();
    assert!(report.success);
    assert_eq!(report.outcomes[0].disposition, Disposition::Failed);
    assert_eq!(report.outcomes[1].disposition, Disposition::Applied);

    let patched = fs::read_to_string(&target).unwrap();
    assert!(patched.contains(".service(app::auth::stale)"));
    assert!(!patched.contains("fn legacy("));
}

#[test]
fn report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let target = write(dir.path(), "src/lib.rs", "fn stays() {}\n");

    let pass = recipes::strip_block(AnchorSpec::FnHeader("fn gone(".into()));
    let report = engine::apply(&target, &[pass], ApplyOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["outcomes"][0]["disposition"], "skipped");
}
