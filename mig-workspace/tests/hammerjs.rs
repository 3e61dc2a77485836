use std::fs;

use matmig_workspace::{
    AngularWorkspace, PatchOutcome, WORKSPACE_FILE, WorkspaceError, add_hammerjs_to_main_file,
};
use tempfile::TempDir;

const WORKSPACE: &str = r#"{
  "version": 1,
  "projects": {
    "demo": {
      "root": "",
      "sourceRoot": "src",
      "architect": {
        "build": { "options": { "main": "src/main.ts" } }
      }
    }
  }
}"#;

const MAIN_TS: &str = "import { platformBrowserDynamic } from '@angular/platform-browser-dynamic';\n";

fn write_workspace(with_main: bool) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(WORKSPACE_FILE), WORKSPACE).unwrap();
    if with_main {
        fs::create_dir_all(temp.path().join("src")).unwrap();
        fs::write(temp.path().join("src/main.ts"), MAIN_TS).unwrap();
    }
    temp
}

#[test]
fn test_patching_twice_inserts_one_import() {
    let temp = write_workspace(true);
    let workspace = AngularWorkspace::open(temp.path()).unwrap();
    let project = workspace.default_project().unwrap();

    let first = add_hammerjs_to_main_file(&workspace, project).unwrap();
    assert!(first.is_inserted());
    let second = add_hammerjs_to_main_file(&workspace, project).unwrap();
    assert!(matches!(second, PatchOutcome::AlreadyPresent { .. }));

    let main = fs::read_to_string(temp.path().join("src/main.ts")).unwrap();
    assert_eq!(main, format!("import 'hammerjs';\n{MAIN_TS}"));
    assert_eq!(main.matches("hammerjs").count(), 1);
}

#[test]
fn test_unreadable_main_file_is_skipped() {
    let temp = write_workspace(false);
    let workspace = AngularWorkspace::open(temp.path()).unwrap();

    let outcome = add_hammerjs_to_main_file(&workspace, "demo").unwrap();
    assert!(matches!(
        outcome,
        PatchOutcome::Skipped(WorkspaceError::MainFileUnreadable { .. })
    ));
}

#[test]
fn test_unknown_project() {
    let temp = write_workspace(true);
    let workspace = AngularWorkspace::open(temp.path()).unwrap();

    let err = add_hammerjs_to_main_file(&workspace, "other").unwrap_err();
    assert!(matches!(err, WorkspaceError::UnknownProject { .. }));
}

#[test]
fn test_missing_workspace_file() {
    let temp = TempDir::new().unwrap();
    let err = AngularWorkspace::open(temp.path()).unwrap_err();
    assert!(matches!(err, WorkspaceError::Read { .. }));
}
