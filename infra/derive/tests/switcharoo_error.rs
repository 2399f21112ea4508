#[test]
fn switcharoo_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/switcharoo_error_pass.rs");
}
