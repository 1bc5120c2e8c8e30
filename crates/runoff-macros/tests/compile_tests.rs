#[test]
fn compile_tests() {
    let t = trybuild::TestCases::new();
    t.pass("tests/pass/basic.rs");
    t.pass("tests/pass/unbounded.rs");
}
