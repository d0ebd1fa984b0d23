//! Shared test fixtures for the assembly workspace.
//!
//! Dev-dependency only; never published.
//!
//! - [`releases_fixture`]: the `ART_*` releases document from
//!   `test-fixtures/releases/releases.yml`
//! - [`group_seed`] / [`meta_seed`]: the base configs those assemblies are
//!   layered over
//! - [`init_tracing`]: route `tracing` output to the test harness

use assembly_model::{ConfigValue, ReleasesDocument};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Raw text of the shared releases fixture
pub const RELEASES_YAML: &str = include_str!("../../../test-fixtures/releases/releases.yml");

/// Parsed releases fixture.
///
/// # Panics
/// Panics if the fixture file is not a valid releases document.
pub fn releases_fixture() -> ReleasesDocument {
    ReleasesDocument::from_yaml_str(RELEASES_YAML)
        .unwrap_or_else(|e| panic!("releases_fixture: invalid fixture: {e}"))
}

/// Group config the fixture assemblies are resolved against
pub fn group_seed() -> ConfigValue {
    json!({
        "arches": ["x86_64"],
        "advisories": {
            "image": 1,
            "extras": 1
        }
    })
    .into()
}

/// Metadata of the `openshift-kuryr` member before any assembly applies
pub fn meta_seed() -> ConfigValue {
    json!({
        "owners": ["kuryr-team@redhat.com"],
        "content": {
            "source": {
                "git": {
                    "url": "git@github.com:openshift-priv/kuryr-kubernetes.git",
                    "branch": {
                        "target": "release-4.8"
                    }
                },
                "specfile": "openshift-kuryr-kubernetes-rhel8.spec"
            }
        },
        "name": "openshift-kuryr"
    })
    .into()
}

/// Install a test-writer subscriber filtered by `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
