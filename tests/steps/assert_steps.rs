use cucumber::then;
use import_precheck::precheck::DOCS_URL;

use crate::world::World;

#[then(regex = r"^the result is (PASSED|SKIPPED|FAILED)$")]
pub async fn result_is(world: &mut World, expected: String) {
    let r = world.report();
    assert_eq!(r.result().to_string(), expected, "report:\n{}", r);
}

#[then(regex = r"^an info line reads `(.+)`$")]
pub async fn info_line_reads(world: &mut World, line: String) {
    let r = world.report();
    assert!(
        r.infos().iter().any(|i| *i == line),
        "info line missing: {}\n--- report ---\n{}",
        line,
        r
    );
}

#[then(regex = r"^the fatal message is `(.+)`$")]
pub async fn fatal_message_is(world: &mut World, msg: String) {
    let r = world.report();
    let expected = msg.replace("<docs>", DOCS_URL);
    assert_eq!(r.fatal_message(), Some(expected.as_str()), "report:\n{}", r);
}

#[then(regex = r"^there is no fatal message$")]
pub async fn no_fatal_message(world: &mut World) {
    let r = world.report();
    assert!(r.fatal_message().is_none(), "unexpected fatal:\n{}", r);
}

#[then(regex = r"^the report links the import docs$")]
pub async fn links_docs(world: &mut World) {
    let r = world.report();
    let rendered = r.to_string();
    assert!(rendered.contains(DOCS_URL), "docs URL missing:\n{}", rendered);
}
