//! End-to-end assembly scenarios
//!
//! Exercises the flow a build tool goes through: read the group and releases
//! documents from a data checkout, settle the assembly, then resolve member
//! metadata and pinned builds.

use assembly_core::{AssemblyContext, AssemblySettings, Error, MemberKind, dependency_nvrs, pinned_nvr};
use assembly_model::{ConfigValue, ReleasesDocument};
use assembly_test_utils::{RELEASES_YAML, init_tracing, meta_seed, releases_fixture};
use std::fs;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

const GROUP_YAML: &str = r#"
name: openshift-4.9
assemblies:
  enabled: true
arches:
- x86_64
- aarch64
advisories:
  image: 1
  extras: 1
dependencies:
  rpms:
  - el8: base-dep-1.0-1.el8
"#;

const RELEASES_YAML_49: &str = r#"
releases:
  4.9.0:
    assembly:
      basis:
        brew_event: 41000
      group:
        advisories:
          image: 90
      rhcos:
        machine-os-content:
          images:
            x86_64: quay.io/rhcos@sha256:aaa
  4.9.1:
    assembly:
      basis:
        assembly: 4.9.0
      group:
        advisories:
          extras: 91
        dependencies:
          rpms:
          - el8: hotfix-2.0-1.el8
      members:
        rpms:
        - distgit_key: '*'
          metadata:
            is:
              el8: placeholder-1-1.el8
        - distgit_key: openshift-clients
          metadata:
            is:
              el8: openshift-clients-4.9.1-1.el8
        images:
        - distgit_key: ose-installer
          metadata:
            is:
              nvr: ose-installer-container-v4.9.1-1
      issues:
        include:
        - id: 2001
        exclude:
        - id: 2002
  hotfix_x:
    assembly:
      basis:
        assembly: 4.9.1
      issues:
        include:
        - id: 2003
"#;

/// Lay out a data checkout with `group.yml` and `releases.yml`
fn setup_data_dir(releases: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("group.yml"), GROUP_YAML).unwrap();
    fs::write(temp.path().join("releases.yml"), releases).unwrap();
    temp
}

fn load(dir: &Path) -> (ConfigValue, ReleasesDocument) {
    let group = fs::read_to_string(dir.join("group.yml")).unwrap();
    let releases = fs::read_to_string(dir.join("releases.yml")).unwrap();
    (
        ConfigValue::from_yaml_str(&group).unwrap(),
        ReleasesDocument::from_yaml_str(&releases).unwrap(),
    )
}

fn settings(assembly: &str) -> AssemblySettings {
    AssemblySettings {
        assembly: Some(assembly.to_string()),
        ..AssemblySettings::default()
    }
}

#[test]
fn test_patch_release_flow() {
    init_tracing();
    let data = setup_data_dir(RELEASES_YAML_49);
    let (group, releases) = load(data.path());

    let context = AssemblyContext::new(settings("4.9.1"), releases, &group).unwrap();
    assert!(context.is_strict());
    assert_eq!(context.brew_event(), Some(41000));
    assert_eq!(context.build_assembly_suffix().as_deref(), Some(".assembly.stream"));

    let group = context.group_config();
    assert_eq!(group.lookup(&["advisories", "image"]), Some(&ConfigValue::Integer(90)));
    assert_eq!(group.lookup(&["advisories", "extras"]), Some(&ConfigValue::Integer(91)));
    assert_eq!(group.get("arches").map(|a| a.items().len()), Some(2));

    let pins = dependency_nvrs(group, 8).unwrap();
    assert_eq!(pins.get("base-dep").map(String::as_str), Some("base-dep-1.0-1.el8"));
    assert_eq!(pins.get("hotfix").map(String::as_str), Some("hotfix-2.0-1.el8"));

    let rhcos = context.rhcos_config().unwrap().unwrap();
    assert_eq!(
        rhcos.lookup(&["machine-os-content", "images", "x86_64"]).and_then(ConfigValue::as_str),
        Some("quay.io/rhcos@sha256:aaa")
    );
}

#[test]
fn test_member_pins_after_wildcard() {
    let data = setup_data_dir(RELEASES_YAML_49);
    let (group, releases) = load(data.path());
    let context = AssemblyContext::new(settings("4.9.1"), releases, &group).unwrap();

    let meta: ConfigValue = serde_json::json!({"name": "openshift-clients"}).into();
    let clients = context.metadata_config(MemberKind::Rpm, "openshift-clients", &meta).unwrap();
    assert_eq!(
        pinned_nvr(&clients, MemberKind::Rpm, "openshift-clients", Some(8)).unwrap(),
        Some("openshift-clients-4.9.1-1.el8".to_string())
    );

    let other = context.metadata_config(MemberKind::Rpm, "other-rpm", &meta).unwrap();
    assert_eq!(
        pinned_nvr(&other, MemberKind::Rpm, "other-rpm", Some(8)).unwrap(),
        Some("placeholder-1-1.el8".to_string())
    );

    let installer = context
        .metadata_config(MemberKind::Image, "ose-installer", &ConfigValue::empty_mapping())
        .unwrap();
    assert_eq!(
        pinned_nvr(&installer, MemberKind::Image, "ose-installer", None).unwrap(),
        Some("ose-installer-container-v4.9.1-1".to_string())
    );
}

#[test]
fn test_hotfix_issue_overrides() {
    let data = setup_data_dir(RELEASES_YAML_49);
    let (group, releases) = load(data.path());
    let context = AssemblyContext::new(settings("hotfix_x"), releases, &group).unwrap();

    let overrides = context.issue_overrides().unwrap();
    assert_eq!(overrides.apply(&[2002, 1500]), vec![1500, 2001, 2003]);
    assert_eq!(context.build_assembly_suffix().as_deref(), Some(".assembly.stream"));
}

#[test]
fn test_brew_event_conflict() {
    let data = setup_data_dir(RELEASES_YAML_49);
    let (group, releases) = load(data.path());
    let mut requested = settings("4.9.0");
    requested.brew_event = Some(1);
    let err = AssemblyContext::new(requested, releases, &group).unwrap_err();
    assert!(err.to_string().contains("41000"), "{err}");
}

#[test]
fn test_stream_runs_without_pins() {
    let data = setup_data_dir(RELEASES_YAML_49);
    let (group, releases) = load(data.path());
    let mut requested = AssemblySettings::default();
    requested.brew_event = Some(123);
    let context = AssemblyContext::new(requested, releases, &group).unwrap();
    assert!(!context.is_strict());
    assert_eq!(context.brew_event(), Some(123));
    assert_eq!(context.group_config(), &group);
    assert_eq!(context.rhcos_config().unwrap(), None);
}

#[test]
fn test_settings_from_yaml() {
    let settings: AssemblySettings =
        serde_yaml::from_str("assembly: 4.9.1\nenable_assemblies: true\n").unwrap();
    assert_eq!(settings.assembly.as_deref(), Some("4.9.1"));
    assert!(settings.enable_assemblies);
    assert_eq!(settings.brew_event, None);
}

#[test]
fn test_parallel_resolution_shares_document() {
    let releases = releases_fixture();
    let meta = meta_seed();
    let assemblies = ["ART_1", "ART_5", "ART_6", "ART_8"];

    let results: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = assemblies
            .iter()
            .copied()
            .map(|name| {
                let (releases, meta) = (&releases, &meta);
                scope.spawn(move || {
                    assembly_core::assembly_metadata_config(
                        releases,
                        Some(name),
                        MemberKind::Rpm,
                        "openshift-kuryr",
                        meta,
                    )
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (name, result) in assemblies.into_iter().zip(results) {
        let sequential = assembly_core::assembly_metadata_config(
            &releases,
            Some(name),
            MemberKind::Rpm,
            "openshift-kuryr",
            &meta,
        )
        .unwrap();
        assert_eq!(result.unwrap(), sequential, "{name}");
    }
}

#[test]
fn test_fixture_cycle_is_fatal_for_context() {
    let releases = ReleasesDocument::from_yaml_str(RELEASES_YAML).unwrap();
    let group: ConfigValue = serde_json::json!({"assemblies": {"enabled": true}}).into();
    let err = AssemblyContext::new(settings("ART_INFINITE"), releases, &group).unwrap_err();
    assert!(matches!(err, Error::AssemblyCycle { .. }));
}
