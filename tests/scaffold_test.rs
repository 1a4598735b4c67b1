use scaffoldify::config::{AnswerContext, Destination, ObjectDecl, RawConfig};
use scaffoldify::error::Error;
use scaffoldify::prompt::StaticAnswers;
use scaffoldify::renderer::MiniJinjaRenderer;
use scaffoldify::scaffold::{file_action, target_path, FileAction, NormalizedConfig, Scaffolder};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let path = root.join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }
}

fn read(path: PathBuf) -> String {
    fs::read_to_string(path).unwrap()
}

fn answers() -> StaticAnswers {
    StaticAnswers(serde_json::from_value(json!({"Hello": "HelloWorld", "hello": "hello,world"})).unwrap())
}

fn run(config: RawConfig) -> scaffoldify::error::Result<AnswerContext> {
    let renderer = MiniJinjaRenderer::new().unwrap();
    let collector = answers();
    Scaffolder::new(&renderer, &collector).run(config)
}

fn test_dirs() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test_log::test]
fn test_plain_templates_are_copied() {
    let (templates, home) = test_dirs();
    write_tree(
        templates.path(),
        &[("README.md", "#1"), ("src/index.js", "//index.js"), ("deep/nested/folder/test.txt", "nested")],
    );

    run(RawConfig::new(templates.path()).with_cwd(home.path())).unwrap();

    assert_eq!(read(home.path().join("README.md")), "#1");
    assert_eq!(read(home.path().join("src/index.js")), "//index.js");
    assert_eq!(read(home.path().join("deep/nested/folder/test.txt")), "nested");
}

#[test_log::test]
fn test_tmpl_extension_is_stripped() {
    let (templates, home) = test_dirs();
    write_tree(
        templates.path(),
        &[("README.md.tmpl", "#1"), ("src/index.js.tmpl", "//index.js"), ("deep/nested/folder/test.txt.tmpl", "nested")],
    );

    run(RawConfig::new(templates.path()).with_cwd(home.path())).unwrap();

    assert_eq!(read(home.path().join("README.md")), "#1");
    assert_eq!(read(home.path().join("src/index.js")), "//index.js");
    assert_eq!(read(home.path().join("deep/nested/folder/test.txt")), "nested");
    assert!(!home.path().join("README.md.tmpl").exists());
}

fn mapped_config(templates: &Path, home: &Path) -> RawConfig {
    write_tree(
        templates,
        &[("README.md", "#tag<%=tag%>"), ("src/index.js", "//<%=Hello%>"), ("index.test.js", "<%=hello%>")],
    );
    RawConfig::new(templates)
        .with_cwd(home)
        .with_option("tag", json!(1))
        .with_option("ui", json!("ui/src"))
        .with_mapper("README.md=>ui/readme.md")
        .with_mapper("src/index.js => [ui]/index.js")
        .with_mapper(ObjectDecl {
            from: "index.test.js".into(),
            to: Some(Destination::dynamic(|_| "ui/src/__test__/index.test.js".to_string())),
            overwrite: None,
        })
}

#[test_log::test]
fn test_different_forms_of_mappers() {
    let (templates, home) = test_dirs();

    let context = run(mapped_config(templates.path(), home.path())).unwrap();

    assert_eq!(read(home.path().join("ui/readme.md")), "#tag1");
    assert_eq!(read(home.path().join("ui/src/index.js")), "//HelloWorld");
    assert_eq!(read(home.path().join("ui/src/__test__/index.test.js")), "hello,world");
    assert!(!home.path().join("README.md").exists());
    assert_eq!(context["tag"], json!(1));
    assert_eq!(context["Hello"], json!("HelloWorld"));
}

#[test_log::test]
fn test_mappers_with_transform() {
    let (templates, home) = test_dirs();
    let config = mapped_config(templates.path(), home.path()).with_transform(|mut answers| {
        answers.insert("Hello".into(), json!("TRANSFORMED"));
        answers.insert("hello".into(), json!("transformed"));
        answers
    });

    let context = run(config).unwrap();

    assert_eq!(read(home.path().join("ui/readme.md")), "#tag1");
    assert_eq!(read(home.path().join("ui/src/index.js")), "//TRANSFORMED");
    assert_eq!(read(home.path().join("ui/src/__test__/index.test.js")), "transformed");
    assert_eq!(context["Hello"], json!("TRANSFORMED"));
}

#[test_log::test]
fn test_transform_may_build_new_context() {
    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("name.txt", "<%= name %>")]);
    let config = RawConfig::new(templates.path()).with_cwd(home.path()).with_transform(|_| {
        AnswerContext::from([("name".to_string(), json!("fresh"))])
    });

    let context = run(config).unwrap();

    assert_eq!(read(home.path().join("name.txt")), "fresh");
    assert_eq!(context.len(), 1);
}

#[test_log::test]
fn test_answers_take_precedence_over_options() {
    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("a.txt", "<%= Hello %>")]);
    let config = RawConfig::new(templates.path())
        .with_cwd(home.path())
        .with_option("Hello", json!("from options"));

    run(config).unwrap();

    assert_eq!(read(home.path().join("a.txt")), "HelloWorld");
}

#[test_log::test]
fn test_overwrite_option() {
    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("overwrite.md", "#overwrite"), ("existed.js", "//TODO")]);
    write_tree(home.path(), &[("dest/overwrite.md", "#old"), ("dest/existed.js", "//existed")]);

    let config = RawConfig::new(templates.path())
        .with_cwd(home.path())
        .with_option("tag", json!("1"))
        .with_mapper("overwrite.md=>dest/overwrite.md")
        .with_mapper("existed.js => dest/existed.js?overwrite=false");
    run(config).unwrap();

    assert_eq!(read(home.path().join("dest/overwrite.md")), "#overwrite");
    assert_eq!(read(home.path().join("dest/existed.js")), "//existed");
}

#[test_log::test]
fn test_empty_destination_is_not_written() {
    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("skip.md", "skip"), ("keep.md", "keep")]);
    let config = RawConfig::new(templates.path())
        .with_cwd(home.path())
        .with_mapper(ObjectDecl { from: "skip.md".into(), to: None, overwrite: None })
        .with_mapper(ObjectDecl {
            from: "keep.md".into(),
            to: Some(Destination::dynamic(|ctx| {
                if ctx.contains_key("Hello") { "kept.md".to_string() } else { String::new() }
            })),
            overwrite: None,
        });

    run(config).unwrap();

    let written: Vec<_> = fs::read_dir(home.path()).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(written, vec![std::ffi::OsString::from("kept.md")]);
}

#[test_log::test]
fn test_path_written_twice_keeps_one_template() {
    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("a.txt", "A"), ("b.txt", "B")]);
    let config = RawConfig::new(templates.path())
        .with_cwd(home.path())
        .with_mapper("a.txt=>out.txt")
        .with_mapper("b.txt=>out.txt");

    run(config).unwrap();

    let content = read(home.path().join("out.txt"));
    assert!(content == "A" || content == "B");
}

#[test_log::test]
fn test_rerun_without_overwrite_is_idempotent() {
    let (templates, home) = test_dirs();
    let reference = TempDir::new().unwrap();
    write_tree(templates.path(), &[("README.md", "# <%= Hello %>"), ("src/lib.rs.tmpl", "// <%= hello %>\n")]);

    let config = |cwd: &Path| RawConfig::new(templates.path()).with_cwd(cwd);
    run(config(home.path())).unwrap();
    run(config(home.path())).unwrap();
    run(config(reference.path())).unwrap();
    assert!(!dir_diff::is_different(home.path(), reference.path()).unwrap());

    let renderer = MiniJinjaRenderer::new().unwrap();
    let collector = StaticAnswers(
        serde_json::from_value(json!({"Hello": "changed", "hello": "changed"})).unwrap(),
    );
    let third = config(home.path())
        .with_mapper("README.md=>README.md?overwrite=false")
        .with_mapper("src/lib.rs.tmpl=>src/lib.rs?overwrite=false");
    Scaffolder::new(&renderer, &collector).run(third).unwrap();

    assert!(!dir_diff::is_different(home.path(), reference.path()).unwrap());
    assert_eq!(read(home.path().join("README.md")), "# HelloWorld");
}

#[test_log::test]
fn test_foreign_template_markup_is_copied_unchanged() {
    let (templates, home) = test_dirs();
    let page = "{% include header.html %}\n<h1>{{ page.title }}</h1>\n";
    write_tree(templates.path(), &[("page.html", page), ("raw.txt.tmpl", "{% raw %}x")]);

    run(RawConfig::new(templates.path()).with_cwd(home.path())).unwrap();

    assert_eq!(read(home.path().join("page.html")), page);
    assert_eq!(read(home.path().join("raw.txt")), "{% raw %}x");
}

#[cfg(unix)]
#[test]
fn test_unreadable_template_directory_aborts_run() {
    use std::os::unix::fs::PermissionsExt;

    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("a.txt", "a"), ("locked/b.txt", "b")]);
    let locked = templates.path().join("locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    if fs::read_dir(&locked).is_ok() {
        // Permission bits are not enforced for root.
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = run(RawConfig::new(templates.path()).with_cwd(home.path()));
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    assert!(matches!(result, Err(Error::WalkError { .. })));
    assert!(!home.path().join("locked/b.txt").exists());
}

#[test]
fn test_missing_templates_fails_before_writing() {
    let (templates, home) = test_dirs();
    let config = RawConfig::new(templates.path().join("missing")).with_cwd(home.path());

    assert!(matches!(run(config), Err(Error::TemplatesDoNotExistError { .. })));
    assert_eq!(fs::read_dir(home.path()).unwrap().count(), 0);
}

#[test]
fn test_missing_templates_setting() {
    let result = NormalizedConfig::compile(RawConfig::default());
    assert!(matches!(result, Err(Error::ConfigError(_))));
}

#[test]
fn test_render_error_aborts_run() {
    let (templates, home) = test_dirs();
    write_tree(templates.path(), &[("broken.txt", "<%= not_an_answer %>")]);

    let result = run(RawConfig::new(templates.path()).with_cwd(home.path()));

    assert!(matches!(result, Err(Error::RenderError { .. })));
    assert!(!home.path().join("broken.txt").exists());
}

#[test]
fn test_compile_normalizes_mappers() {
    let templates = TempDir::new().unwrap();
    let config = RawConfig::new(templates.path())
        .with_mapper("a=>b?overwrite=false")
        .with_mapper(scaffoldify::config::MapperDecl::Malformed(json!(null)));

    let compiled = NormalizedConfig::compile(config).unwrap();

    assert_eq!(compiled.mappers.len(), 1);
    assert!(!compiled.mappers[0].overwrite);
    assert!(compiled.cwd.is_absolute());
}

#[test]
fn test_target_path_stays_below_cwd() {
    assert_eq!(target_path("/home/users", "ui/readme.md"), PathBuf::from("/home/users/ui/readme.md"));
    assert_eq!(target_path("/home/users", "/abs/readme.md"), PathBuf::from("/home/users/abs/readme.md"));
}

#[test]
fn test_file_action() {
    assert_eq!(file_action(false, false), FileAction::Write);
    assert_eq!(file_action(false, true), FileAction::Write);
    assert_eq!(file_action(true, true), FileAction::Overwrite);
    assert_eq!(file_action(true, false), FileAction::Skip);
    assert_eq!(FileAction::Skip.to_string(), "skip");
}
