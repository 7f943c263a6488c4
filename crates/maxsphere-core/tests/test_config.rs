#[allow(dead_code)]
mod common;

use std::path::PathBuf;

use maxsphere_core::consts::{DEFAULT_ANTIALIAS, DEFAULT_STOP_INDEX};
use maxsphere_core::pipeline::config::BatchConfig;
use maxsphere_core::pipeline::PipelineStage;
use maxsphere_core::template::TemplateRegistry;

#[test]
fn test_minimal_toml_uses_defaults() {
    let config: BatchConfig = toml::from_str(r#"input = "track%d/frame%04d.jpg""#).unwrap();
    assert_eq!(config.input, "track%d/frame%04d.jpg");
    assert_eq!(config.output, None);
    assert_eq!(config.start, 0);
    assert_eq!(config.stop, DEFAULT_STOP_INDEX);
    assert_eq!(config.antialias, DEFAULT_ANTIALIAS);
    assert!(config.threads >= 1);
    assert!(config.skip_existing);
    assert_eq!(config.cache_dir, PathBuf::from("."));
    assert!(config.templates.is_empty());
}

#[test]
fn test_toml_roundtrip() {
    let mut config = BatchConfig::new("in/%d_%05d.png");
    config.output = Some("out/%05d.png".into());
    config.start = 3;
    config.stop = 40;
    config.threads = 6;
    config.antialias = 3;
    config.width = Some(2048);
    config.skip_existing = false;
    config.cache_dir = PathBuf::from("/tmp/luts");
    config.templates.push(common::tiny_template());

    let text = toml::to_string_pretty(&config).unwrap();
    let back: BatchConfig = toml::from_str(&text).unwrap();

    assert_eq!(back.input, config.input);
    assert_eq!(back.output, config.output);
    assert_eq!((back.start, back.stop), (3, 40));
    assert_eq!(back.threads, 6);
    assert_eq!(back.antialias, 3);
    assert_eq!(back.width, Some(2048));
    assert!(!back.skip_existing);
    assert_eq!(back.cache_dir, config.cache_dir);
    assert_eq!(back.templates, config.templates);
}

#[test]
fn test_user_template_is_detected() {
    let text = r#"
input = "t%d_%d.png"

[[templates]]
id = 7
name = "tiny"
width = 112
height = 32
side_width = 40
center_width = 32
blend_width = 4
equirect_width = 64
"#;
    let config: BatchConfig = toml::from_str(text).unwrap();
    let registry = config.registry().unwrap();
    assert_eq!(registry.detect(112, 32).unwrap().name, "tiny");
    assert_eq!(registry.detect(4096, 1344).unwrap().id, 0);
    assert_eq!(registry.by_id(7).unwrap().side_width, 40);
    assert_eq!(registry.templates().len(), 3);
}

#[test]
fn test_default_registry_is_builtin_only() {
    let config = BatchConfig::new("t%d_%d.png");
    let registry = config.registry().unwrap();
    assert_eq!(registry.templates(), TemplateRegistry::builtin().templates());
    assert!(registry.by_id(7).is_none());
}

#[test]
fn test_registry_rejects_clashing_template_id() {
    let mut config = BatchConfig::new("t%d_%d.png");
    let mut template = common::tiny_template();
    template.id = 1;
    config.templates.push(template);
    assert!(config.registry().is_err());
}

#[test]
fn test_validate() {
    let mut config = BatchConfig::new("t%d_%d.png");
    assert!(config.validate().is_ok());
    config.antialias = 0;
    assert!(config.validate().is_err());
    config.antialias = 1;
    config.threads = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_frame_count_inclusive() {
    let mut config = BatchConfig::new("t%d_%d.png");
    config.start = 5;
    config.stop = 5;
    assert_eq!(config.frame_count(), 1);
    config.stop = 104;
    assert_eq!(config.frame_count(), 100);
}

#[test]
fn test_pipeline_stage_display() {
    assert_eq!(PipelineStage::Probing.to_string(), "Probing frames");
    assert_eq!(PipelineStage::Converting.to_string(), "Converting frames");
}
