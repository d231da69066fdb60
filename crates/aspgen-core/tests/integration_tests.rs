//! Integration tests for aspgen-core, wired to the real adapters.

use std::path::{Path, PathBuf};

use aspgen_adapters::{InMemoryStore, LocalFilesystem, MemoryFilesystem, SimpleRenderer};
use aspgen_core::{
    application::{ApplicationError, ScaffoldService, TemplateService},
    domain::{ConflictPolicy, GeneratorKind, TemplateTarget},
    prelude::*,
};

fn memory_service() -> (ScaffoldService, MemoryFilesystem) {
    let filesystem = MemoryFilesystem::new();
    let service = ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(filesystem.clone()),
    );
    (service, filesystem)
}

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(Path::new(path))
        .unwrap_or_else(|| panic!("{path} was not written"))
}

#[test]
fn readme_without_descriptor_uses_default_namespace() {
    let (service, fs) = memory_service();

    let report = service
        .generate(&GenerationRequest::new("readme", "/work"))
        .unwrap();

    assert_eq!(report.generator, GeneratorKind::Readme);
    assert_eq!(report.written, vec![PathBuf::from("/work/README.md")]);
    assert!(read(&fs, "/work/README.md").starts_with("# MyNamespace\n"));
}

#[test]
fn readme_txt_flag_switches_extension() {
    let (service, fs) = memory_service();

    service
        .generate(&GenerationRequest::new("readme", "/work").with_args(["--txt"]))
        .unwrap();

    assert!(fs.read_file(Path::new("/work/README.txt")).is_some());
    assert!(fs.read_file(Path::new("/work/README.md")).is_none());
}

#[test]
fn dockerfile_with_and_without_sqlite() {
    let (service, fs) = memory_service();

    service
        .generate(&GenerationRequest::new("dockerfile", "/plain"))
        .unwrap();
    service
        .generate(&GenerationRequest::new("dockerfile", "/sqlite").with_args(["--sqlite"]))
        .unwrap();

    let plain = read(&fs, "/plain/Dockerfile");
    assert!(plain.contains("FROM microsoft/dotnet:1.1.0-sdk-projectjson"));
    assert!(!plain.contains("libsqlite3-dev"));
    assert!(!plain.contains(r#"RUN ["dotnet", "ef", "database", "update"]"#));

    let sqlite = read(&fs, "/sqlite/Dockerfile");
    assert!(sqlite.contains("RUN apt-get update && apt-get install -y sqlite3 libsqlite3-dev"));
    assert!(sqlite.contains(r#"RUN ["dotnet", "ef", "database", "update"]"#));
}

#[test]
fn bootstrap_then_generate_infers_namespace() {
    let (service, fs) = memory_service();

    let boot = service
        .bootstrap("classlib", "emptyTest", Path::new("/w"), &PromptAnswers::default())
        .unwrap();
    assert_eq!(boot.root, PathBuf::from("/w/emptyTest"));

    for generator in ["startup", "readme"] {
        service
            .generate(&GenerationRequest::new(generator, "/w/emptyTest"))
            .unwrap();
    }
    service
        .generate(&GenerationRequest::new("class", "/w/emptyTest").with_args(["MyClass"]))
        .unwrap();

    assert!(
        read(&fs, "/w/emptyTest/Startup.cs")
            .lines()
            .any(|l| l == "namespace emptyTest")
    );
    assert!(read(&fs, "/w/emptyTest/README.md").starts_with("# emptyTest\n"));

    let class = read(&fs, "/w/emptyTest/MyClass.cs");
    assert!(class.contains("namespace emptyTest"));
    assert!(class.contains("public class MyClass"));
}

#[test]
fn mvc_bootstrap_writes_matching_sdk_versions() {
    let (service, fs) = memory_service();

    service
        .bootstrap("mvc", "webTest", Path::new("/w"), &PromptAnswers::default())
        .unwrap();
    service
        .generate(&GenerationRequest::new("mvccontroller", "/w/webTest").with_args(["file"]))
        .unwrap();

    let project = read(&fs, "/w/webTest/project.json");
    assert!(project.contains("\"title\": \"webTest\""));
    assert!(project.contains("\"Microsoft.NETCore.App\": {\n      \"version\": \"1.1.0\""));

    assert!(read(&fs, "/w/webTest/Dockerfile").starts_with("FROM microsoft/dotnet:1.1.0-sdk-projectjson\n"));
    assert!(
        read(&fs, "/w/webTest/Dockerfile.nano")
            .starts_with("FROM microsoft/dotnet:1.1.0-sdk-projectjson-nanoserver\n")
    );
    assert!(read(&fs, "/w/webTest/file.cs").contains("namespace webTest.Controllers"));
}

#[test]
fn bootstrap_into_existing_directory_fails() {
    let (service, fs) = memory_service();
    fs.create_dir_all(Path::new("/w/taken")).unwrap();

    let err = service
        .bootstrap("console", "taken", Path::new("/w"), &PromptAnswers::default())
        .unwrap_err();
    assert!(matches!(
        err.as_application(),
        Some(ApplicationError::ProjectExists { .. })
    ));
}

#[test]
fn named_generators_strip_extension() {
    let (service, fs) = memory_service();

    for (generator, arg, file, needle) in [
        ("interface", "IContact.cs", "IContact.cs", "public interface IContact"),
        ("middleware", "MyMiddleware", "MyMiddleware.cs", "IApplicationBuilder UseMyMiddleware"),
        ("taghelper", "CartTagHelper.cs", "CartTagHelper.cs", "public class CartTagHelper : TagHelper"),
        ("json", "file.json", "file.json", "{"),
        ("jsx", "file", "file.jsx", "React.createClass"),
        ("mvcview", "file.cshtml", "file.cshtml", "ViewData[\"Title\"] = \"file\""),
        ("webapicontroller", "file", "file.cs", "[Route(\"api/[controller]\")]"),
    ] {
        service
            .generate(&GenerationRequest::new(generator, "/n").with_args([arg]))
            .unwrap();
        let content = read(&fs, &format!("/n/{file}"));
        assert!(content.contains(needle), "{generator}: {content}");
    }
}

#[test]
fn conflict_policies() {
    let (service, fs) = memory_service();
    fs.create_dir_all(Path::new("/c")).unwrap();
    fs.write_file(Path::new("/c/Startup.cs"), "// mine").unwrap();

    let skip = PromptAnswers::default().conflict(ConflictPolicy::Skip);
    let report = service
        .generate(&GenerationRequest::new("startup", "/c").with_answers(skip))
        .unwrap();
    assert!(report.written.is_empty());
    assert_eq!(report.skipped, vec![PathBuf::from("/c/Startup.cs")]);
    assert_eq!(read(&fs, "/c/Startup.cs"), "// mine");

    let fail = PromptAnswers::default().conflict(ConflictPolicy::Fail);
    let err = service
        .generate(&GenerationRequest::new("startup", "/c").with_answers(fail))
        .unwrap_err();
    assert!(matches!(
        err.as_application(),
        Some(ApplicationError::FileConflict { .. })
    ));

    service
        .generate(&GenerationRequest::new("startup", "/c"))
        .unwrap();
    assert!(read(&fs, "/c/Startup.cs").contains("public class Startup"));
}

#[test]
fn answer_variables_override_namespace() {
    let (service, fs) = memory_service();
    let answers = PromptAnswers::default().variable("NAMESPACE", "Contoso.Web");

    service
        .generate(&GenerationRequest::new("readme", "/a").with_answers(answers))
        .unwrap();
    assert!(read(&fs, "/a/README.md").starts_with("# Contoso.Web\n"));
}

#[test]
fn generation_is_idempotent() {
    let (service, fs) = memory_service();
    let request = GenerationRequest::new("middleware", "/i").with_args(["Audit"]);

    service.generate(&request).unwrap();
    let first = read(&fs, "/i/Audit.cs");
    service.generate(&request).unwrap();

    assert_eq!(read(&fs, "/i/Audit.cs"), first);
    assert_eq!(fs.list_files(), vec![PathBuf::from("/i/Audit.cs")]);
}

#[test]
fn template_service_lists_builtins() {
    let service = TemplateService::new(Box::new(InMemoryStore::with_builtin().unwrap()));
    let info = service
        .for_target(TemplateTarget::Generator(GeneratorKind::Dockerfile))
        .unwrap();
    assert_eq!(info.files, vec!["{{OUTPUT_FILE}}".to_string()]);
    assert_eq!(service.list().unwrap().len(), 22);
}

#[test]
fn local_filesystem_end_to_end() {
    let temp = tempfile::TempDir::new().unwrap();
    let service = ScaffoldService::new(
        Box::new(InMemoryStore::with_builtin().unwrap()),
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );

    service
        .bootstrap("webapi", "api", temp.path(), &PromptAnswers::default())
        .unwrap();
    service
        .generate(
            &GenerationRequest::new("webapicontroller", temp.path().join("api"))
                .with_args(["OrdersController"]),
        )
        .unwrap();

    let controller =
        std::fs::read_to_string(temp.path().join("api").join("OrdersController.cs")).unwrap();
    assert!(controller.contains("namespace api.Controllers"));
    assert!(temp.path().join("api/Controllers/ValuesController.cs").is_file());
}
