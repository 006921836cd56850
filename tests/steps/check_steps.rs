use std::sync::Arc;

use cucumber::{given, when};
use import_precheck::{Catalog, Check, OsInfo, OsVersionCheck};

use crate::world::World;

#[given(regex = r#"^a disk whose os-release has ID "([^"]*)" and VERSION_ID "([^"]*)"$"#)]
pub async fn disk_with_os_release(world: &mut World, id: String, version: String) {
    world.write_os_release(&format!("NAME=\"Test\"\nID={}\nVERSION_ID=\"{}\"\n", id, version));
}

#[given(regex = r#"^a disk whose os-release has no ID$"#)]
pub async fn disk_without_id(world: &mut World) {
    world.write_os_release("NAME=\"Mystery Linux\"\nVERSION_ID=\"5.4\"\n");
}

#[given(regex = r"^a disk without os-release$")]
pub async fn disk_without_os_release(world: &mut World) {
    world.ensure_root();
}

#[given(regex = r#"^the detector reports short name "([^"]*)" and version "([^"]*)"$"#)]
pub async fn detector_reports(world: &mut World, short_name: String, version: String) {
    world.ensure_root();
    world.short_name = Some(short_name);
    world.version = Some(version);
}

#[given(regex = r#"^the architecture is "([^"]*)"$"#)]
pub async fn architecture_is(world: &mut World, arch: String) {
    world.architecture = Some(arch);
}

#[given(regex = r#"^the supported catalog lists "([^"]*)"$"#)]
pub async fn catalog_lists(world: &mut World, ids: String) {
    let ids = ids
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    world.catalog = Some(ids);
}

#[when(regex = r"^I run the OS version check$")]
pub async fn run_os_version_check(world: &mut World) {
    let root = world.ensure_root().to_path_buf();
    let info = OsInfo::detect(&root).expect("detect").with_overrides(
        world.short_name.as_deref(),
        world.version.as_deref(),
        world.architecture.as_deref(),
    );
    let catalog = match &world.catalog {
        Some(ids) => Catalog::from_ids(ids.clone()),
        None => Catalog::builtin(),
    };
    let check = OsVersionCheck::new(info).with_validator(Arc::new(catalog));
    world.report = Some(check.run().expect("check must not error"));
}
