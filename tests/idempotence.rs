//! Orchestrator-level fixed point: applying a full pass list to its own
//! output changes nothing.
use std::fs;
use std::path::{Path, PathBuf};

use splice::engine::{self, ApplyOptions};
use splice::inject::Anchor;
use splice::matcher::AnchorSpec;
use splice::pass::PatchPass;
use splice::recipes;

fn write(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

fn full_pass_list(root: &Path) -> Vec<PatchPass> {
    let anchor = Anchor {
        tag: "services".into(),
        marker: AnchorSpec::Literal("App::new()".into()),
        entries: vec![".service(app::auth::login)".into()],
        retire: Some(regex::Regex::new(r"^\.service\(app::").unwrap()),
    };
    vec![
        recipes::fix_imports(root.to_path_buf(), "User".into(), "crate".into()).unwrap(),
        recipes::inject_block(anchor),
        recipes::strip_block(AnchorSpec::FnHeader("fn legacy_helper(".into())),
        recipes::replace_line(
            AnchorSpec::Literal("const MODE: &str = \"legacy\";".into()),
            "const MODE: &str = \"current\";".into(),
        ),
    ]
}

#[test]
fn whole_recipe_list_reaches_a_fixed_point() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/models/mod.rs", "pub struct User;\n");
    let target = write(
        dir.path(),
        "src/main.rs",
        "use crate::admin::user::User;\n\
         const MODE: &str = \"legacy\";\n\
         \n\
         fn legacy_helper() {\n\
             obsolete();\n\
         }\n\
         \n\
         fn main() {\n\
             App::new()\n\
                 .run()\n\
         }\n",
    );

    let report =
        engine::apply(&target, &full_pass_list(dir.path()), ApplyOptions::default()).unwrap();
    assert!(report.success);
    assert!(report.persisted);
    let once = fs::read_to_string(&target).unwrap();

    assert!(once.contains("use crate::models::User;"));
    assert!(once.contains("const MODE: &str = \"current\";"));
    assert!(once.contains(".service(app::auth::login)"));
    assert!(!once.contains("legacy_helper"));

    let report =
        engine::apply(&target, &full_pass_list(dir.path()), ApplyOptions::default()).unwrap();
    assert!(report.success);
    assert!(!report.persisted);
    assert_eq!(fs::read_to_string(&target).unwrap(), once);
}

#[test]
fn dry_run_produces_the_report_without_touching_disk() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "src/models/mod.rs", "pub struct User;\n");
    let original = "use crate::admin::user::User;\nconst MODE: &str = \"legacy\";\nfn main() {\n    App::new()\n}\n";
    let target = write(dir.path(), "src/main.rs", original);

    let report = engine::apply(
        &target,
        &full_pass_list(dir.path()),
        ApplyOptions { dry_run: true },
    )
    .unwrap();
    assert!(report.success);
    assert!(!report.persisted);
    assert_eq!(report.outcomes.len(), 4);
    assert_eq!(fs::read_to_string(&target).unwrap(), original);
}
