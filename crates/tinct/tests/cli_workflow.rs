//! End-to-end command runs against temporary directories.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::{json, Value};
use serial_test::serial;
use tempfile::TempDir;
use tinct::cli::{Cli, Commands};
use tinct::commands::generate::GenerateReport;
use tinct::config::{ExtractConfig, GenerateConfig};
use tinct_engine::color::TRANSPARENT;
use tinct_engine::Palette;

const TEMPLATE: &str = r#"{
    "background": "TODO",
    "editor.background": "TODO",
    "text": "TODO",
    "border.variant": "TODO",
    "element.hover": "TODO",
    "status_bar.background": "TODO"
}"#;

fn palette_json(alpha: Value, background_appearance: &str) -> Value {
    json!({
        "meta": {
            "name": "Night (Hybrid)",
            "author": "tester",
            "appearance": "dark",
            "theme_name": "Night Hybrid",
            "background_appearance": background_appearance
        },
        "roles": {
            "surface": "#1A1B26",
            "overlay": "#24283B",
            "text": "#C0CAF5",
            "muted": "#565F89",
            "foam": "#7DCFFF",
            "love": "#F7768E",
            "highlight_low": "#292E42",
            "highlight_med": "#33467C"
        },
        "alpha": alpha
    })
}

struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new() -> Self {
        let workspace = Self {
            dir: TempDir::new().unwrap(),
        };
        workspace.write("template.json", TEMPLATE);
        workspace
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn arg(&self, name: &str) -> String {
        self.path(name).to_str().unwrap().to_string()
    }

    fn write(&self, name: &str, text: &str) {
        fs::write(self.path(name), text).unwrap();
    }

    fn write_json(&self, name: &str, value: &Value) {
        self.write(name, &serde_json::to_string_pretty(value).unwrap());
    }

    fn read_json(&self, name: &str) -> Value {
        read_json(&self.path(name))
    }

    fn generate(&self, palette: &str, out: &str, extra: &[&str]) -> anyhow::Result<GenerateReport> {
        let mut args = vec![
            "tinct".to_string(),
            "generate".to_string(),
            "--palette".to_string(),
            self.arg(palette),
            "--template".to_string(),
            self.arg("template.json"),
            "--alpha".to_string(),
            self.arg("alpha.json"),
            "--out".to_string(),
            self.arg(out),
        ];
        args.extend(extra.iter().map(|s| s.to_string()));
        let cli = Cli::try_parse_from(args).unwrap();
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        tinct::commands::generate::run(&GenerateConfig::try_from(args)?)
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_generate_writes_theme_document() {
    let ws = Workspace::new();
    ws.write_json("alpha.json", &json!({"dark": {"ui": "E6"}}));
    ws.write_json("night.json", &palette_json(json!({}), ""));

    let report = ws.generate("night.json", "out/night.json", &[]).unwrap();
    assert_eq!(report.out, ws.path("out/night.json"));
    assert_eq!(report.blur_out, None);
    assert!(report.diff.is_none());

    let theme = ws.read_json("out/night.json");
    assert_eq!(theme["$schema"], "https://zed.dev/schema/themes/v0.2.0.json");
    assert_eq!(theme["name"], "Night (Hybrid)");
    assert_eq!(theme["author"], "tester");
    assert_eq!(theme["themes"][0]["appearance"], "dark");
    assert_eq!(theme["themes"][0]["name"], "Night Hybrid");

    let style = &theme["themes"][0]["style"];
    assert_eq!(style["background"], "#1A1B26E6");
    assert_eq!(style["editor.background"], "#1A1B26");
    assert_eq!(style["text"], "#C0CAF5");
}

#[test]
fn test_missing_alpha_file_is_tolerated() {
    let ws = Workspace::new();
    ws.write_json("night.json", &palette_json(json!({"dark": {"ui": "CC"}}), ""));

    ws.generate("night.json", "night-theme.json", &[]).unwrap();
    let theme = ws.read_json("night-theme.json");
    assert_eq!(theme["themes"][0]["style"]["background"], "#1A1B26CC");
}

#[test]
fn test_wip_names_and_unset_keys() {
    let ws = Workspace::new();
    ws.write("template.json", r#"{"text": "TODO", "never.filled": "TODO"}"#);
    ws.write_json("night.json", &palette_json(json!({}), ""));

    ws.generate("night.json", "plain.json", &[]).unwrap();
    let plain = ws.read_json("plain.json");
    assert!(plain["themes"][0]["style"].get("never.filled").is_none());

    ws.generate("night.json", "wip.json", &["--wip", "--keep-unset"]).unwrap();
    let wip = ws.read_json("wip.json");
    assert_eq!(wip["name"], "Night (Hybrid) (WIP)");
    assert_eq!(wip["themes"][0]["name"], "Night Hybrid (WIP)");
    assert_eq!(wip["themes"][0]["style"]["never.filled"], "TODO");
}

#[test]
fn test_blurred_palette_writes_flat_variant() {
    let ws = Workspace::new();
    ws.write_json("night.json", &palette_json(json!({}), "blurred"));

    let report = ws.generate("night.json", "night-hybrid.json", &[]).unwrap();
    assert_eq!(report.blur_out, Some(ws.path("night-blur.json")));

    let main = ws.read_json("night-hybrid.json");
    assert_eq!(main["themes"][0]["style"]["editor.background"], "#1A1B26");
    assert_eq!(main["themes"][0]["style"]["background.appearance"], "blurred");

    let blur = ws.read_json("night-blur.json");
    assert_eq!(blur["name"], "Night (Blur)");
    assert_eq!(blur["themes"][0]["name"], "Night Blur");
    assert_eq!(blur["themes"][0]["style"]["editor.background"], TRANSPARENT);
}

#[test]
fn test_blur_output_is_not_doubled() {
    let ws = Workspace::new();
    ws.write_json("night.json", &palette_json(json!({}), "blurred"));

    let report = ws.generate("night.json", "night-blur.json", &[]).unwrap();
    assert_eq!(report.blur_out, None);
}

#[test]
fn test_compare_and_write_alpha_converges() {
    let ws = Workspace::new();
    ws.write_json(
        "target.json",
        &palette_json(json!({"dark": {"ui": "E6", "border_variant": "40"}}), ""),
    );
    ws.generate("target.json", "reference.json", &[]).unwrap();

    ws.write_json("night.json", &palette_json(json!({}), ""));
    let reference = ws.arg("reference.json");

    let report = ws
        .generate("night.json", "night-theme.json", &["--compare", reference.as_str()])
        .unwrap();
    let diff = report.diff.unwrap();
    assert!(diff.changed.contains(&"background".to_string()));
    assert!(diff.changed.contains(&"border.variant".to_string()));
    assert!(!report.palette_updated);

    let report = ws
        .generate(
            "night.json",
            "night-theme.json",
            &["--compare", reference.as_str(), "--write-alpha"],
        )
        .unwrap();
    assert!(report.palette_updated);

    let updated: Palette =
        Palette::from_json_str(&fs::read_to_string(ws.path("night.json")).unwrap()).unwrap();
    assert_eq!(updated.alpha.dark.get("ui").map(String::as_str), Some("E6"));
    assert_eq!(
        updated.alpha.dark.get("border_variant").map(String::as_str),
        Some("40")
    );

    let report = ws
        .generate("night.json", "night-theme.json", &["--compare", reference.as_str()])
        .unwrap();
    assert!(report.diff.unwrap().converged());
}

#[test]
fn test_write_overrides_pins_unmatched_keys() {
    let ws = Workspace::new();
    ws.write_json("night.json", &palette_json(json!({}), ""));
    ws.write_json(
        "reference.json",
        &json!({"themes": [{"style": {
            "editor.background": "#1A1B26",
            "element.hover": "#ABCDEF",
            "panel.background": "#101010",
            "text": "#FFFFFF"
        }}]}),
    );
    let reference = ws.arg("reference.json");

    ws.generate(
        "night.json",
        "night-theme.json",
        &["--compare", reference.as_str(), "--write-overrides"],
    )
    .unwrap();

    let updated = ws.read_json("night.json");
    assert_eq!(
        updated["overrides"],
        json!({"element.hover": "#ABCDEF", "panel.background": "#101010"})
    );
}

#[test]
fn test_bad_reference_writes_nothing() {
    let ws = Workspace::new();
    ws.write_json("night.json", &palette_json(json!({}), ""));
    ws.write_json("reference.json", &json!({"themes": []}));
    let reference = ws.arg("reference.json");
    let before = fs::read_to_string(ws.path("night.json")).unwrap();

    let err = ws
        .generate(
            "night.json",
            "night-theme.json",
            &["--compare", reference.as_str(), "--write-alpha"],
        )
        .unwrap_err();
    assert!(format!("{err:#}").contains("missing themes array"));
    assert!(!ws.path("night-theme.json").exists());
    assert_eq!(fs::read_to_string(ws.path("night.json")).unwrap(), before);
}

#[test]
fn test_yaml_palette_generates() {
    let ws = Workspace::new();
    ws.write(
        "night.yaml",
        "meta:\n  name: Night\n  appearance: dark\nroles:\n  surface: \"#1A1B26\"\n  text: \"#C0CAF5\"\nalpha:\n  dark:\n    ui: E6\n",
    );

    ws.generate("night.yaml", "night.json", &[]).unwrap();
    let theme = ws.read_json("night.json");
    assert_eq!(theme["name"], "Night");
    assert_eq!(theme["themes"][0]["style"]["background"], "#1A1B26E6");
}

#[test]
fn test_extract_then_generate() {
    let ws = Workspace::new();
    ws.write_json("source.json", &palette_json(json!({"dark": {"ui": "E6"}}), ""));
    ws.generate("source.json", "theme.json", &[]).unwrap();

    let cli = Cli::try_parse_from([
        "tinct",
        "extract",
        "--theme",
        ws.arg("theme.json").as_str(),
        "--out",
        ws.arg("extracted.json").as_str(),
        "--style-keys",
        "element.hover,missing",
        "--with-alpha",
        "--alpha",
        ws.arg("alpha.json").as_str(),
    ])
    .unwrap();
    let Commands::Extract(args) = cli.command else {
        panic!("expected extract");
    };
    let palette = tinct::commands::extract::run(&ExtractConfig::try_from(args).unwrap()).unwrap();

    assert_eq!(palette.meta.name, "Night (Hybrid)");
    assert_eq!(palette.role("surface"), Some("#1A1B26"));
    assert_eq!(palette.role("text"), Some("#C0CAF5"));
    assert_eq!(
        palette.style,
        json!({"element.hover": "#292E42"}).as_object().unwrap().clone()
    );
    assert_eq!(palette.alpha.dark.get("ui").map(String::as_str), Some("E6"));

    ws.generate("extracted.json", "regenerated.json", &[]).unwrap();
    let theme = ws.read_json("regenerated.json");
    assert_eq!(theme["themes"][0]["style"]["background"], "#1A1B26E6");
}

#[test]
fn test_fmt_groups_keys() {
    let ws = Workspace::new();
    ws.write("a.json", r#"{"editor.b": 1, "text": 2, "editor.a": 3}"#);

    tinct::run(Cli::try_parse_from(["tinct", "fmt", ws.arg("a.json").as_str()]).unwrap()).unwrap();
    assert_eq!(
        fs::read_to_string(ws.path("a.json")).unwrap(),
        "{\n  \"text\": 2,\n\n  \"editor.a\": 3,\n  \"editor.b\": 1\n}\n"
    );
}

#[test]
fn test_fmt_stops_on_invalid_json() {
    let ws = Workspace::new();
    ws.write("bad.json", "{ nope");
    let result = tinct::run(Cli::try_parse_from(["tinct", "fmt", ws.arg("bad.json").as_str()]).unwrap());
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(ws.path("bad.json")).unwrap(), "{ nope");
}

#[test]
#[serial]
fn test_template_and_alpha_from_environment() {
    let ws = Workspace::new();
    std::env::set_var("TINCT_TEMPLATE", ws.arg("template.json"));
    std::env::set_var("TINCT_ALPHA", ws.arg("shared-alpha.json"));

    let cli = Cli::try_parse_from(["tinct", "generate", "--palette", "night.json"]).unwrap();

    std::env::remove_var("TINCT_TEMPLATE");
    std::env::remove_var("TINCT_ALPHA");

    let Commands::Generate(args) = cli.command else {
        panic!("expected generate");
    };
    assert_eq!(args.template, ws.path("template.json"));
    assert_eq!(args.alpha, ws.path("shared-alpha.json"));
}

#[test]
#[serial]
fn test_default_paths_without_environment() {
    std::env::remove_var("TINCT_TEMPLATE");
    std::env::remove_var("TINCT_ALPHA");

    let cli = Cli::try_parse_from(["tinct", "generate", "--palette", "night.json"]).unwrap();
    let Commands::Generate(args) = cli.command else {
        panic!("expected generate");
    };
    assert_eq!(args.template, PathBuf::from("templates/base-style.json"));
    assert_eq!(args.alpha, PathBuf::from("palettes/alpha.json"));
}
