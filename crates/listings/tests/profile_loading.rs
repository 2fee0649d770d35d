//! Loading profiles from disk in each supported format.

use listings::{ListingError, UserProfile};
use std::fs;
use tempfile::TempDir;

const YAML_PROFILE: &str = r#"
name: Jane Doe
title: Full-Stack Developer
years_experience: 6
skills:
  - Python
  - React
bio: I ship web products.
achievements:
  - Built a SaaS dashboard
rate: "$60-$90/hr"
portfolio_url: https://janedoe.dev
"#;

#[test]
fn test_load_yaml_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.yaml");
    fs::write(&path, YAML_PROFILE).unwrap();

    let profile = UserProfile::load(&path).unwrap();
    assert_eq!(profile.name, "Jane Doe");
    assert_eq!(profile.years_experience, 6);
    assert_eq!(profile.skills_str(), "Python, React");
    assert_eq!(profile.tone, "professional");

    let context = profile.to_prompt_context();
    assert!(context.contains("Portfolio: https://janedoe.dev"));
    assert!(context.contains("• Built a SaaS dashboard"));
}

#[test]
fn test_load_txt_by_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.txt");
    fs::write(&path, "Name: Raj\nSkills: Go, Kubernetes\nLocation: Pune").unwrap();

    let profile = UserProfile::load(&path).unwrap();
    assert_eq!(profile.name, "Raj");
    assert_eq!(profile.title, "Developer");
    assert_eq!(profile.skills, vec!["Go", "Kubernetes"]);
    assert_eq!(profile.location.as_deref(), Some("Pune"));
}

#[test]
fn test_unknown_extension_falls_back_to_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.md");
    fs::write(&path, "Hello, I am a freelance designer.").unwrap();

    let profile = UserProfile::load(&path).unwrap();
    assert_eq!(profile.name, "User");
    assert_eq!(profile.bio, "Hello, I am a freelance designer.");
}

#[test]
fn test_unknown_extension_prefers_yaml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("profile.conf");
    fs::write(&path, YAML_PROFILE).unwrap();

    let profile = UserProfile::load(&path).unwrap();
    assert_eq!(profile.title, "Full-Stack Developer");
}

#[test]
fn test_missing_profile() {
    let dir = TempDir::new().unwrap();
    let result = UserProfile::load(dir.path().join("nope.yaml"));
    assert!(matches!(result, Err(ListingError::ProfileNotFound { .. })));
}
