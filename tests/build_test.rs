use pysuerga::build::build_site;
use pysuerga::cli::Args;
use pysuerga::error::Error;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tiny_http::{Response, Server};

/// Serves one release listing for `acme/site`; everything else is a 404.
fn spawn_release_server(listing: serde_json::Value) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    std::thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = if request.url() == "/repos/acme/site/releases" {
                Response::from_string(listing.to_string()).with_status_code(200)
            } else {
                Response::from_string("not found").with_status_code(404)
            };
            let _ = request.respond(response);
        }
    });
    format!("http://{}", addr)
}

fn write_site(source: &Path, api_url: &str) {
    fs::create_dir_all(source.join("templates")).unwrap();
    fs::write(
        source.join("templates/layout.html"),
        concat!(
            "<nav>{% for item in navbar %}{{ item.slug }}:{{ item.has_subitems }}{% endfor %}</nav>\n",
            "<main>{% block body %}{% endblock %}</main>\n",
            "<footer>{% for release in releases %}{{ release.name }}|{{ release.tag }}|{{ release.url }}{% endfor %} {{ base_url }}</footer>\n",
        ),
    )
    .unwrap();
    fs::write(source.join("index.md"), "# Welcome\n\nSite docs.\n").unwrap();
    fs::create_dir_all(source.join("static")).unwrap();
    fs::write(source.join("static/style.css"), "body { margin: 0 }").unwrap();
    fs::write(
        source.join("pysuerga.yml"),
        format!(
            r#"pysuerga:
  templates_path: templates
  ignore:
    - pysuerga.yml
    - templates/**
navbar:
  - name: About Us
    target: /about
blog:
  feed: []
  num_posts: 5
maintainers:
  active: []
github:
  api_url: {api_url}
  repo: acme/site
"#
        ),
    )
    .unwrap();
}

fn make_args(source: &TempDir, target: &TempDir, base_url: &str) -> Args {
    Args {
        source_path: source.path().to_path_buf(),
        target_path: target.path().to_path_buf(),
        base_url: base_url.to_string(),
        verbose: false,
    }
}

#[test]
fn test_build_site_end_to_end() {
    let api_url = spawn_release_server(json!([
        {
            "tag_name": "v1.2.0",
            "prerelease": false,
            "published_at": "2024-03-05T10:00:00Z",
            "assets": []
        }
    ]));
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write_site(source.path(), &api_url);

    build_site(&make_args(&source, &target, "/docs")).unwrap();

    let index = fs::read_to_string(target.path().join("index.html")).unwrap();
    assert!(index.contains("about-us:false"));
    assert!(index.contains(r#"<h1 id="welcome">"#));
    assert!(index.contains("Site docs."));
    assert!(index.contains("1.2.0|v1.2.0|"));
    assert!(index.contains("/docs"));

    // Static assets are copied byte-for-byte at the mirrored path.
    assert_eq!(
        fs::read(target.path().join("static/style.css")).unwrap(),
        b"body { margin: 0 }"
    );

    // Ignored paths never reach the output tree.
    assert!(!target.path().join("pysuerga.yml").exists());
    assert!(!target.path().join("templates").exists());
}

#[test]
fn test_build_site_resets_target_dir() {
    let api_url = spawn_release_server(json!([]));
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write_site(source.path(), &api_url);
    fs::write(target.path().join("stale.txt"), "from a previous run").unwrap();

    build_site(&make_args(&source, &target, "")).unwrap();

    assert!(!target.path().join("stale.txt").exists());
    assert!(target.path().join("index.html").exists());
}

#[test]
fn test_build_site_copies_asset_tree_verbatim() {
    let api_url = spawn_release_server(json!([]));
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    write_site(source.path(), &api_url);
    fs::remove_file(source.path().join("index.md")).unwrap();
    fs::create_dir_all(source.path().join("static/img")).unwrap();
    fs::write(source.path().join("static/img/logo.svg"), "<svg/>").unwrap();
    fs::write(source.path().join("robots.txt"), "User-agent: *\n").unwrap();

    build_site(&make_args(&source, &target, "")).unwrap();

    // With only assets left, the output equals the source minus the
    // ignored configuration and templates.
    let expected = TempDir::new().unwrap();
    fs::create_dir_all(expected.path().join("static/img")).unwrap();
    fs::write(expected.path().join("static/style.css"), "body { margin: 0 }").unwrap();
    fs::write(expected.path().join("static/img/logo.svg"), "<svg/>").unwrap();
    fs::write(expected.path().join("robots.txt"), "User-agent: *\n").unwrap();

    assert!(!dir_diff::is_different(target.path(), expected.path()).unwrap());
}

#[test]
fn test_build_site_missing_config() {
    let source = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let err = build_site(&make_args(&source, &target, "")).unwrap_err();

    match err {
        Error::Config(message) => assert!(message.contains("not found")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}
