use super::*;
use crate::process::mock::ScriptedRunner;
use crate::process::ProcessOutput;
use std::fs;
use tempfile::TempDir;

fn manifest() -> Manifest {
    Manifest {
        id: "com.my-app!".to_string(),
        name: "My <App>".to_string(),
        version: None,
        description: None,
    }
}

#[tokio::test]
async fn test_requirements_met() {
    let runner = ScriptedRunner::new(|_| {
        ProcessOutput::success("id: 1 or \"android-16\"\nid: 2 or \"android-17\"\n")
    });

    let result = AndroidPlatform::new().check_requirements(&runner).await;

    assert!(result.is_ok());
    let calls = runner.calls();
    assert_eq!(calls[0].program, PathBuf::from("android"));
    assert_eq!(calls[0].args_lossy(), vec!["list", "target"]);
}

#[tokio::test]
async fn test_requirements_missing_target() {
    let runner = ScriptedRunner::new(|_| ProcessOutput::success("id: 1 or \"android-16\"\n"));

    let err = AndroidPlatform::new().check_requirements(&runner).await.unwrap_err();

    assert!(err.contains("android-17"));
}

#[tokio::test]
async fn test_requirements_tool_failure() {
    let runner = ScriptedRunner::new(|_| ProcessOutput::failure(None, "not found"));

    let err = AndroidPlatform::new().check_requirements(&runner).await.unwrap_err();

    assert!(err.contains("`android` failed"));
    assert!(err.contains("not found"));
}

#[test]
fn test_generator_args() {
    let input = GeneratorInput {
        output_dir: PathBuf::from("/p/platforms/android"),
        package_id: "com.my_app_".to_string(),
        name: "My_App".to_string(),
    };

    let args = AndroidPlatform::new().generator_args(&input);

    assert_eq!(
        args,
        vec![
            OsString::from("/p/platforms/android"),
            OsString::from("com.my_app_"),
            OsString::from("My_App"),
        ]
    );
}

#[tokio::test]
async fn test_update_project_rewrites_config_and_copies_www() {
    let temp_dir = TempDir::new().unwrap();
    let platform_dir = temp_dir.path().join("platforms").join("android");
    let app_dir = temp_dir.path().join("www");
    fs::create_dir_all(platform_dir.join("res").join("values")).unwrap();
    fs::create_dir_all(&app_dir).unwrap();
    fs::write(app_dir.join("index.html"), "hello").unwrap();
    fs::write(
        platform_dir.join("res").join("values").join("strings.xml"),
        "<resources><string name=\"app_name\">Placeholder</string></resources>",
    )
    .unwrap();
    fs::write(
        platform_dir.join("AndroidManifest.xml"),
        "<manifest xmlns:android=\"x\" package=\"org.placeholder\" android:versionCode=\"1\">",
    )
    .unwrap();

    let project = AndroidPlatform::new().open_project(&platform_dir);
    project.update_project(&manifest(), &app_dir).await.unwrap();

    let strings = fs::read_to_string(platform_dir.join("res/values/strings.xml")).unwrap();
    assert!(strings.contains("<string name=\"app_name\">My &lt;App&gt;</string>"));
    let android_manifest = fs::read_to_string(platform_dir.join("AndroidManifest.xml")).unwrap();
    assert!(android_manifest.contains("package=\"com.my_app_\""));
    assert!(android_manifest.contains("android:versionCode=\"1\""));
    assert_eq!(
        fs::read_to_string(platform_dir.join("assets/www/index.html")).unwrap(),
        "hello"
    );
}

#[tokio::test]
async fn test_update_project_without_native_files() {
    let temp_dir = TempDir::new().unwrap();
    let platform_dir = temp_dir.path().join("android");
    fs::create_dir_all(&platform_dir).unwrap();

    let project = AndroidPlatform::new().open_project(&platform_dir);
    project
        .update_project(&manifest(), &temp_dir.path().join("www"))
        .await
        .unwrap();

    assert!(platform_dir.join("assets/www").is_dir());
}
